use super::catalog::{ItemId, MenuItem};
use super::order::{Order, OrderId};
use super::table::{Table, TableId};
use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
pub trait TableStore: Send + Sync {
    async fn store(&self, table: Table) -> Result<()>;
    async fn get(&self, table_id: TableId) -> Result<Option<Table>>;
    async fn get_all(&self) -> Result<Vec<Table>>;
}

/// Active orders plus the append-only log of completed ones.
#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn store(&self, order: Order) -> Result<()>;
    async fn get(&self, order_id: OrderId) -> Result<Option<Order>>;
    /// Moves a completed order out of the active set and into the log.
    async fn archive(&self, order: Order) -> Result<()>;
    /// Completed orders with `start <= completed_at < end`.
    async fn archived_between(&self, start: DateTime<Utc>, end: DateTime<Utc>)
    -> Result<Vec<Order>>;
}

#[async_trait]
pub trait Catalog: Send + Sync {
    async fn get_item(&self, item_id: ItemId) -> Result<Option<MenuItem>>;
}

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub type TableStoreBox = Box<dyn TableStore>;
pub type OrderStoreBox = Box<dyn OrderStore>;
pub type CatalogBox = Box<dyn Catalog>;
pub type ClockBox = Box<dyn Clock>;
