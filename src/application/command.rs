use crate::domain::catalog::ItemId;
use crate::domain::order::{Order, PaymentMethod};
use crate::domain::settlement::{self, Statement};
use crate::domain::table::{Table, TableId};
use crate::error::{ErrorKind, FloorError};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

/// An item and quantity to put on a tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRequest {
    pub item_id: ItemId,
    pub quantity: u32,
}

impl LineRequest {
    pub fn new(item_id: ItemId, quantity: u32) -> Self {
        Self { item_id, quantity }
    }
}

/// One line change inside a modify batch. `Decrement` takes the requested
/// quantity off in a single step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOp {
    Add(LineRequest),
    Decrement(LineRequest),
    Remove(ItemId),
}

/// A staff action against one table.
#[derive(Debug, Clone, PartialEq)]
pub enum FloorCommand {
    Open {
        table_id: TableId,
        lines: Vec<LineRequest>,
    },
    Modify {
        table_id: TableId,
        ops: Vec<LineOp>,
    },
    RequestBill {
        table_id: TableId,
    },
    Pay {
        table_id: TableId,
        amount: Decimal,
        method: PaymentMethod,
    },
}

impl FloorCommand {
    pub fn table_id(&self) -> TableId {
        match self {
            Self::Open { table_id, .. }
            | Self::Modify { table_id, .. }
            | Self::RequestBill { table_id }
            | Self::Pay { table_id, .. } => *table_id,
        }
    }
}

/// The state of one table after a command, with its tab if it has one.
///
/// When a payment completes an order, the table is already `Available` and
/// `order` carries the completed tab.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FloorSnapshot {
    pub table: Table,
    pub order: Option<Order>,
}

impl FloorSnapshot {
    pub fn statement(&self) -> Option<Statement> {
        self.order.as_ref().map(settlement::statement)
    }
}

/// What a caller sees when a command is refused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandRejection {
    pub kind: ErrorKind,
    pub message: String,
}

impl From<&FloorError> for CommandRejection {
    fn from(error: &FloorError) -> Self {
        Self {
            kind: error.kind(),
            message: error.to_string(),
        }
    }
}

/// Half-open reporting window `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevenuePeriod {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl RevenuePeriod {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    pub fn all_time() -> Self {
        Self {
            start: DateTime::<Utc>::MIN_UTC,
            end: DateTime::<Utc>::MAX_UTC,
        }
    }
}
