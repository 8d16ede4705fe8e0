use super::catalog::{ItemId, MenuItem};
use super::money::{Amount, Balance};
use super::settlement;
use super::table::TableId;
use crate::error::{FloorError, Result};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type OrderId = Uuid;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Eating,
    BillPending,
    Completed,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cash,
    Card,
    Upi,
    Other,
}

/// One item on a tab. Price and name are copied from the menu when the item
/// is first added, so later menu edits never change an open tab.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct OrderLine {
    pub item_id: ItemId,
    pub name: String,
    pub unit_price: Amount,
    pub quantity: u32,
}

impl OrderLine {
    fn snapshot(item: &MenuItem, quantity: u32) -> Self {
        Self {
            item_id: item.id,
            name: item.name.clone(),
            unit_price: item.unit_price,
            quantity,
        }
    }

    pub fn subtotal(&self) -> Balance {
        self.unit_price * self.quantity
    }
}

/// A recorded payment. Never edited or removed once appended.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Payment {
    pub amount: Amount,
    pub method: PaymentMethod,
    pub recorded_at: DateTime<Utc>,
}

/// The tab for one occupancy cycle of a table.
///
/// Totals are never stored; they are recomputed from `lines` and `payments`
/// through [`settlement`] every time they are read.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Order {
    pub id: OrderId,
    pub table_id: TableId,
    pub lines: Vec<OrderLine>,
    pub payments: Vec<Payment>,
    pub status: OrderStatus,
    pub opened_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Order {
    pub fn open(table_id: TableId, opened_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            table_id,
            lines: Vec::new(),
            payments: Vec::new(),
            status: OrderStatus::Eating,
            opened_at,
            completed_at: None,
        }
    }

    pub fn total(&self) -> Balance {
        settlement::total(self)
    }

    pub fn paid(&self) -> Balance {
        settlement::paid(self)
    }

    pub fn due(&self) -> Balance {
        settlement::due(self)
    }

    pub fn line(&self, item_id: ItemId) -> Option<&OrderLine> {
        self.lines.iter().find(|line| line.item_id == item_id)
    }

    /// Adds `quantity` of `item`, merging into the existing line for the same
    /// item. A bill-pending order goes back to eating.
    ///
    /// Rejects the change if the order total would no longer fit a `Decimal`.
    pub fn add_line(&mut self, item: &MenuItem, quantity: u32) -> Result<()> {
        self.ensure_not_completed()?;
        if quantity < 1 {
            return Err(FloorError::InvalidQuantity);
        }

        let mut lines = self.lines.clone();
        match lines.iter_mut().find(|line| line.item_id == item.id) {
            Some(line) => {
                line.quantity = line
                    .quantity
                    .checked_add(quantity)
                    .ok_or(FloorError::InvalidQuantity)?;
            }
            None => lines.push(OrderLine::snapshot(item, quantity)),
        }
        if settlement::checked_total(&lines).is_none() {
            return Err(FloorError::TotalOutOfRange);
        }

        self.lines = lines;
        self.status = OrderStatus::Eating;
        Ok(())
    }

    /// Takes one unit off the line for `item_id`, dropping the line at zero.
    pub fn decrement_line(&mut self, item_id: ItemId) -> Result<()> {
        self.decrement_line_by(item_id, 1)
    }

    /// Takes `quantity` units off the line for `item_id` in one step. Taking
    /// exactly what the line holds drops it; taking more is rejected.
    pub fn decrement_line_by(&mut self, item_id: ItemId, quantity: u32) -> Result<()> {
        self.ensure_not_completed()?;
        let index = self.position(item_id)?;
        let line = &self.lines[index];
        if quantity < 1 || quantity > line.quantity {
            return Err(FloorError::InvalidQuantity);
        }
        self.ensure_covers_paid(line.unit_price * quantity)?;

        if line.quantity > quantity {
            self.lines[index].quantity -= quantity;
        } else {
            self.lines.remove(index);
        }

        self.status = OrderStatus::Eating;
        Ok(())
    }

    /// Drops the whole line for `item_id`, whatever its quantity.
    pub fn remove_line(&mut self, item_id: ItemId) -> Result<()> {
        self.ensure_not_completed()?;
        let index = self.position(item_id)?;
        self.ensure_covers_paid(self.lines[index].subtotal())?;

        self.lines.remove(index);
        self.status = OrderStatus::Eating;
        Ok(())
    }

    pub fn mark_bill_pending(&mut self) -> Result<()> {
        self.ensure_not_completed()?;
        if self.lines.is_empty() {
            return Err(FloorError::EmptyOrder);
        }

        self.status = OrderStatus::BillPending;
        Ok(())
    }

    /// Appends a payment and completes the order once nothing is due.
    ///
    /// Payments beyond the current due are rejected, not clamped.
    pub fn record_payment(
        &mut self,
        amount: Decimal,
        method: PaymentMethod,
        recorded_at: DateTime<Utc>,
    ) -> Result<()> {
        let amount = Amount::new(amount)?;
        if self.status != OrderStatus::BillPending {
            return Err(FloorError::OrderNotBillPending(self.id));
        }

        let due = self.due();
        if Balance::from(amount) > due {
            return Err(FloorError::Overpayment {
                amount: amount.value(),
                due: due.value(),
            });
        }

        self.payments.push(Payment {
            amount,
            method,
            recorded_at,
        });

        if settlement::is_settled(self) {
            self.status = OrderStatus::Completed;
            self.completed_at = Some(recorded_at);
        }
        Ok(())
    }

    fn position(&self, item_id: ItemId) -> Result<usize> {
        self.lines
            .iter()
            .position(|line| line.item_id == item_id)
            .ok_or(FloorError::LineNotFound(item_id))
    }

    fn ensure_not_completed(&self) -> Result<()> {
        if self.status == OrderStatus::Completed {
            return Err(FloorError::OrderCompleted(self.id));
        }
        Ok(())
    }

    // Once money has been taken the total must stay above it, otherwise the
    // order would be settled without a payment completing it.
    fn ensure_covers_paid(&self, reduction: Balance) -> Result<()> {
        if self.payments.is_empty() {
            return Ok(());
        }

        let remaining = self.total() - reduction;
        let paid = self.paid();
        if remaining <= paid {
            return Err(FloorError::BelowPaidAmount {
                total: remaining.value(),
                paid: paid.value(),
            });
        }
        Ok(())
    }
}
