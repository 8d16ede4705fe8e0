use super::command::{FloorCommand, FloorSnapshot, LineOp, LineRequest, RevenuePeriod};
use super::registry::TableRegistry;
use crate::domain::money::Balance;
use crate::domain::order::{Order, OrderStatus, PaymentMethod};
use crate::domain::ports::{CatalogBox, ClockBox, OrderStoreBox, TableStoreBox};
use crate::domain::table::{Table, TableId, TableSeed, TableStatus};
use crate::error::{FloorError, Result};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, info};

/// The single entry point for staff actions on the floor.
///
/// `FloorController` owns the link between tables and their orders. Each
/// table has its own lock, held for the whole of every operation on that
/// table: commands on the same table run one after another, commands on
/// different tables never wait for each other.
///
/// Every operation works on owned copies of the table and order and writes
/// them back only once all checks have passed, so a rejected command leaves
/// no trace.
pub struct FloorController {
    registry: TableRegistry,
    orders: OrderStoreBox,
    catalog: CatalogBox,
    clock: ClockBox,
    locks: BTreeMap<TableId, Mutex<()>>,
}

impl FloorController {
    /// Seeds the floor plan and builds one lock per table.
    ///
    /// The set of tables is fixed from here on.
    pub async fn bootstrap(
        tables: TableStoreBox,
        orders: OrderStoreBox,
        catalog: CatalogBox,
        clock: ClockBox,
        seeds: impl IntoIterator<Item = TableSeed>,
    ) -> Result<Self> {
        let registry = TableRegistry::new(tables);
        registry.seed(seeds).await?;

        let locks: BTreeMap<TableId, Mutex<()>> = registry
            .all()
            .await?
            .into_iter()
            .map(|table| (table.id, Mutex::new(())))
            .collect();
        info!(tables = locks.len(), "Floor ready");

        Ok(Self {
            registry,
            orders,
            catalog,
            clock,
            locks,
        })
    }

    pub async fn execute(&self, command: FloorCommand) -> Result<FloorSnapshot> {
        match command {
            FloorCommand::Open { table_id, lines } => self.open_table(table_id, lines).await,
            FloorCommand::Modify { table_id, ops } => self.modify_order(table_id, ops).await,
            FloorCommand::RequestBill { table_id } => self.request_bill(table_id).await,
            FloorCommand::Pay {
                table_id,
                amount,
                method,
            } => self.pay(table_id, amount, method).await,
        }
    }

    /// Seats guests at an available table with their first lines.
    pub async fn open_table(
        &self,
        table_id: TableId,
        lines: Vec<LineRequest>,
    ) -> Result<FloorSnapshot> {
        let _guard = self.lock(table_id).await?;
        let table = self.registry.get(table_id).await?;
        if !table.is_available() {
            return Err(FloorError::TableNotAvailable(table_id));
        }
        if lines.is_empty() {
            return Err(FloorError::EmptyInitialOrder);
        }

        let mut order = Order::open(table_id, self.clock.now());
        for line in lines {
            self.add_line(&mut order, line).await?;
        }

        info!(table = table_id, order = %order.id, total = %order.total(), "Table opened");
        self.commit(table, order).await
    }

    /// Applies a batch of line changes; either all of them land or none do.
    pub async fn modify_order(&self, table_id: TableId, ops: Vec<LineOp>) -> Result<FloorSnapshot> {
        let _guard = self.lock(table_id).await?;
        let (table, mut order) = self.open_order(table_id).await?;
        let was_billed = order.status == OrderStatus::BillPending;

        for op in ops {
            match op {
                LineOp::Add(line) => self.add_line(&mut order, line).await?,
                LineOp::Decrement(line) => {
                    order.decrement_line_by(line.item_id, line.quantity)?
                }
                LineOp::Remove(item_id) => order.remove_line(item_id)?,
            }
        }

        debug!(table = table_id, order = %order.id, total = %order.total(), was_billed, "Order modified");
        self.commit(table, order).await
    }

    pub async fn request_bill(&self, table_id: TableId) -> Result<FloorSnapshot> {
        let _guard = self.lock(table_id).await?;
        let (table, mut order) = self.open_order(table_id).await?;
        order.mark_bill_pending()?;

        info!(table = table_id, order = %order.id, due = %order.due(), "Bill requested");
        self.commit(table, order).await
    }

    /// Records a payment. Settling the bill archives the order and frees the
    /// table in the same step.
    pub async fn pay(
        &self,
        table_id: TableId,
        amount: Decimal,
        method: PaymentMethod,
    ) -> Result<FloorSnapshot> {
        let _guard = self.lock(table_id).await?;
        let (table, mut order) = self.open_order(table_id).await?;
        order.record_payment(amount, method, self.clock.now())?;

        if order.status == OrderStatus::Completed {
            info!(table = table_id, order = %order.id, total = %order.total(), "Order completed");
        } else {
            debug!(table = table_id, order = %order.id, %amount, due = %order.due(), "Partial payment");
        }
        self.commit(table, order).await
    }

    /// Sum of order totals over orders completed within `period`.
    pub async fn revenue(&self, period: RevenuePeriod) -> Result<Balance> {
        Ok(self
            .completed_orders(period)
            .await?
            .iter()
            .map(Order::total)
            .sum())
    }

    pub async fn completed_orders(&self, period: RevenuePeriod) -> Result<Vec<Order>> {
        self.orders
            .archived_between(period.start, period.end)
            .await
    }

    pub async fn snapshot(&self, table_id: TableId) -> Result<FloorSnapshot> {
        let _guard = self.lock(table_id).await?;
        let table = self.registry.get(table_id).await?;
        let order = match table.current_order {
            Some(order_id) => Some(
                self.orders
                    .get(order_id)
                    .await?
                    .ok_or(FloorError::OrderNotFound(order_id))?,
            ),
            None => None,
        };
        Ok(FloorSnapshot { table, order })
    }

    /// Every table on the floor, in id order.
    pub async fn tables(&self) -> Result<Vec<FloorSnapshot>> {
        let mut snapshots = Vec::with_capacity(self.locks.len());
        for table_id in self.locks.keys() {
            snapshots.push(self.snapshot(*table_id).await?);
        }
        Ok(snapshots)
    }

    async fn lock(&self, table_id: TableId) -> Result<MutexGuard<'_, ()>> {
        let lock = self
            .locks
            .get(&table_id)
            .ok_or(FloorError::TableNotFound(table_id))?;
        Ok(lock.lock().await)
    }

    async fn open_order(&self, table_id: TableId) -> Result<(Table, Order)> {
        let table = self.registry.get(table_id).await?;
        let order_id = table
            .current_order
            .ok_or(FloorError::TableHasNoOpenOrder(table_id))?;
        let order = self
            .orders
            .get(order_id)
            .await?
            .ok_or(FloorError::OrderNotFound(order_id))?;
        Ok((table, order))
    }

    async fn add_line(&self, order: &mut Order, line: LineRequest) -> Result<()> {
        if line.quantity < 1 {
            return Err(FloorError::InvalidQuantity);
        }
        let item = self
            .catalog
            .get_item(line.item_id)
            .await?
            .ok_or(FloorError::UnknownItem(line.item_id))?;
        order.add_line(&item, line.quantity)
    }

    /// Writes the order back and brings the table in line with it.
    async fn commit(&self, table: Table, order: Order) -> Result<FloorSnapshot> {
        let status = TableStatus::from(order.status);
        let table = if order.status == OrderStatus::Completed {
            self.orders.archive(order.clone()).await?;
            self.registry.set_status(table, status, None).await?
        } else {
            self.orders.store(order.clone()).await?;
            self.registry
                .set_status(table, status, Some(order.id))
                .await?
        };

        Ok(FloorSnapshot {
            table,
            order: Some(order),
        })
    }
}
