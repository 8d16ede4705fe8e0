use crate::domain::order::{Order, OrderId};
use crate::domain::ports::{OrderStore, TableStore};
use crate::domain::table::{Table, TableId};
use crate::error::{FloorError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rocksdb::{ColumnFamily, ColumnFamilyDescriptor, DB, Direction, IteratorMode, Options, WriteBatch};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::Path;
use std::sync::Arc;

/// Column Family for table records.
pub const CF_TABLES: &str = "tables";
/// Column Family for active orders.
pub const CF_ORDERS: &str = "orders";
/// Column Family for completed orders, keyed by completion time.
pub const CF_ARCHIVE: &str = "archive";

/// A persistent store implementation using RocksDB.
///
/// Tables, active orders and the completed-orders log live in separate
/// Column Families. Archive keys are the completion timestamp (big-endian
/// milliseconds) followed by the order id, so a revenue period is a single
/// forward range scan.
///
/// This struct is thread-safe (`Clone` shares the underlying `Arc<DB>`).
#[derive(Clone)]
pub struct RocksDBStore {
    db: Arc<DB>,
}

impl RocksDBStore {
    /// Opens or creates a RocksDB instance at the specified path.
    ///
    /// Ensures that the required column families exist.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let families = [CF_TABLES, CF_ORDERS, CF_ARCHIVE]
            .into_iter()
            .map(|name| ColumnFamilyDescriptor::new(name, Options::default()))
            .collect::<Vec<_>>();

        let db = DB::open_cf_descriptors(&opts, path, families)?;

        Ok(Self { db: Arc::new(db) })
    }

    fn cf(&self, name: &str) -> Result<&ColumnFamily> {
        self.db.cf_handle(name).ok_or_else(|| {
            FloorError::InternalError(Box::new(std::io::Error::other(format!(
                "{name} column family not found"
            ))))
        })
    }
}

fn archive_key(completed_at: DateTime<Utc>, order_id: OrderId) -> Vec<u8> {
    let mut key = timestamp_key(completed_at).to_vec();
    key.extend_from_slice(order_id.as_bytes());
    key
}

// Sign bit flipped so pre-epoch instants still sort before later ones.
fn timestamp_key(at: DateTime<Utc>) -> [u8; 8] {
    ((at.timestamp_millis() as u64) ^ (1 << 63)).to_be_bytes()
}

fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    serde_json::to_vec(value).map_err(|e| {
        FloorError::InternalError(Box::new(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("Serialization error: {}", e),
        )))
    })
}

fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    serde_json::from_slice(bytes).map_err(|e| {
        FloorError::InternalError(Box::new(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("Deserialization error: {}", e),
        )))
    })
}

#[async_trait]
impl TableStore for RocksDBStore {
    async fn store(&self, table: Table) -> Result<()> {
        let cf = self.cf(CF_TABLES)?;
        self.db.put_cf(cf, table.id.to_be_bytes(), encode(&table)?)?;
        Ok(())
    }

    async fn get(&self, table_id: TableId) -> Result<Option<Table>> {
        let cf = self.cf(CF_TABLES)?;
        match self.db.get_cf(cf, table_id.to_be_bytes())? {
            Some(bytes) => Ok(Some(decode(&bytes)?)),
            None => Ok(None),
        }
    }

    async fn get_all(&self) -> Result<Vec<Table>> {
        let cf = self.cf(CF_TABLES)?;

        let mut tables = Vec::new();
        for item in self.db.iterator_cf(cf, IteratorMode::Start) {
            let (_key, value) = item?;
            tables.push(decode(&value)?);
        }

        Ok(tables)
    }
}

#[async_trait]
impl OrderStore for RocksDBStore {
    async fn store(&self, order: Order) -> Result<()> {
        let cf = self.cf(CF_ORDERS)?;
        self.db.put_cf(cf, order.id.as_bytes(), encode(&order)?)?;
        Ok(())
    }

    async fn get(&self, order_id: OrderId) -> Result<Option<Order>> {
        let cf = self.cf(CF_ORDERS)?;
        match self.db.get_cf(cf, order_id.as_bytes())? {
            Some(bytes) => Ok(Some(decode(&bytes)?)),
            None => Ok(None),
        }
    }

    async fn archive(&self, order: Order) -> Result<()> {
        let completed_at = order.completed_at.ok_or_else(|| {
            FloorError::InternalError(
                format!("order {} archived without a completion time", order.id).into(),
            )
        })?;

        // Delete and append in one batch so the order is never in both or neither.
        let mut batch = WriteBatch::default();
        batch.delete_cf(self.cf(CF_ORDERS)?, order.id.as_bytes());
        batch.put_cf(
            self.cf(CF_ARCHIVE)?,
            archive_key(completed_at, order.id),
            encode(&order)?,
        );
        self.db.write(batch)?;
        Ok(())
    }

    async fn archived_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Order>> {
        let cf = self.cf(CF_ARCHIVE)?;
        let from = timestamp_key(start);
        let until = timestamp_key(end);

        let mut orders = Vec::new();
        for item in self
            .db
            .iterator_cf(cf, IteratorMode::From(&from[..], Direction::Forward))
        {
            let (key, value) = item?;
            if key[..8] > until[..] {
                break;
            }
            // Keys only carry milliseconds; the bounds are exact.
            let order: Order = decode(&value)?;
            if order
                .completed_at
                .is_some_and(|completed_at| start <= completed_at && completed_at < end)
            {
                orders.push(order);
            }
        }

        Ok(orders)
    }
}
