use crate::domain::order::OrderId;
use crate::domain::ports::TableStoreBox;
use crate::domain::table::{Table, TableId, TableSeed, TableStatus};
use crate::error::{FloorError, Result};

/// The floor plan: every physical table and its occupancy.
///
/// Only the [`FloorController`](super::floor::FloorController) writes through
/// the registry, and only while holding the lock of the table it touches.
pub struct TableRegistry {
    store: TableStoreBox,
}

impl TableRegistry {
    pub fn new(store: TableStoreBox) -> Self {
        Self { store }
    }

    /// Inserts every seeded table that the store does not know yet.
    ///
    /// Existing records are left untouched so a restart over a durable store
    /// keeps the live floor.
    pub async fn seed(&self, seeds: impl IntoIterator<Item = TableSeed>) -> Result<()> {
        for seed in seeds {
            if self.store.get(seed.id).await?.is_none() {
                self.store.store(Table::new(seed.id, seed.name)).await?;
            }
        }
        Ok(())
    }

    pub async fn get(&self, table_id: TableId) -> Result<Table> {
        self.store
            .get(table_id)
            .await?
            .ok_or(FloorError::TableNotFound(table_id))
    }

    pub async fn all(&self) -> Result<Vec<Table>> {
        let mut tables = self.store.get_all().await?;
        tables.sort_by_key(|table| table.id);
        Ok(tables)
    }

    pub(crate) async fn set_status(
        &self,
        mut table: Table,
        status: TableStatus,
        order: Option<OrderId>,
    ) -> Result<Table> {
        debug_assert_eq!(status == TableStatus::Available, order.is_none());
        table.status = status;
        table.current_order = order;
        self.store.store(table.clone()).await?;
        Ok(table)
    }
}
