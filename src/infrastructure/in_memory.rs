use crate::domain::catalog::{ItemId, MenuItem};
use crate::domain::order::{Order, OrderId};
use crate::domain::ports::{Catalog, OrderStore, TableStore};
use crate::domain::table::{Table, TableId};
use crate::error::{FloorError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory store for tables.
///
/// Uses `Arc<RwLock<BTreeMap<TableId, Table>>>` so `get_all` comes back in
/// floor-plan order.
#[derive(Default, Clone)]
pub struct InMemoryTableStore {
    tables: Arc<RwLock<BTreeMap<TableId, Table>>>,
}

impl InMemoryTableStore {
    /// Creates a new, empty in-memory table store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TableStore for InMemoryTableStore {
    async fn store(&self, table: Table) -> Result<()> {
        let mut tables = self.tables.write().await;
        tables.insert(table.id, table);
        Ok(())
    }

    async fn get(&self, table_id: TableId) -> Result<Option<Table>> {
        let tables = self.tables.read().await;
        Ok(tables.get(&table_id).cloned())
    }

    async fn get_all(&self) -> Result<Vec<Table>> {
        let tables = self.tables.read().await;
        Ok(tables.values().cloned().collect())
    }
}

/// A thread-safe in-memory store for orders.
///
/// Active orders and the completed log sit behind separate locks, so revenue
/// reads never contend with live table traffic.
#[derive(Default, Clone)]
pub struct InMemoryOrderStore {
    active: Arc<RwLock<HashMap<OrderId, Order>>>,
    archive: Arc<RwLock<Vec<Order>>>,
}

impl InMemoryOrderStore {
    /// Creates a new, empty in-memory order store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn store(&self, order: Order) -> Result<()> {
        let mut active = self.active.write().await;
        active.insert(order.id, order);
        Ok(())
    }

    async fn get(&self, order_id: OrderId) -> Result<Option<Order>> {
        let active = self.active.read().await;
        Ok(active.get(&order_id).cloned())
    }

    async fn archive(&self, order: Order) -> Result<()> {
        if order.completed_at.is_none() {
            return Err(FloorError::InternalError(
                format!("order {} archived without a completion time", order.id).into(),
            ));
        }

        self.active.write().await.remove(&order.id);
        self.archive.write().await.push(order);
        Ok(())
    }

    async fn archived_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Order>> {
        let archive = self.archive.read().await;
        Ok(archive
            .iter()
            .filter(|order| {
                order
                    .completed_at
                    .is_some_and(|at| start <= at && at < end)
            })
            .cloned()
            .collect())
    }
}

/// A fixed menu held in memory.
#[derive(Default, Clone)]
pub struct InMemoryCatalog {
    items: Arc<HashMap<ItemId, MenuItem>>,
}

impl InMemoryCatalog {
    pub fn new(items: impl IntoIterator<Item = MenuItem>) -> Self {
        Self {
            items: Arc::new(items.into_iter().map(|item| (item.id, item)).collect()),
        }
    }
}

#[async_trait]
impl Catalog for InMemoryCatalog {
    async fn get_item(&self, item_id: ItemId) -> Result<Option<MenuItem>> {
        Ok(self.items.get(&item_id).cloned())
    }
}
