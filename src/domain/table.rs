use super::order::{OrderId, OrderStatus};
use serde::{Deserialize, Serialize};

pub type TableId = u16;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum TableStatus {
    Available,
    Eating,
    BillPending,
}

impl From<OrderStatus> for TableStatus {
    /// The table status that mirrors an order in `status`. A completed order
    /// releases its table.
    fn from(status: OrderStatus) -> Self {
        match status {
            OrderStatus::Eating => Self::Eating,
            OrderStatus::BillPending => Self::BillPending,
            OrderStatus::Completed => Self::Available,
        }
    }
}

/// A physical seating unit on the floor.
///
/// `current_order` is the only link between a table and its tab: it is set
/// exactly when the status is not `Available`.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Table {
    pub id: TableId,
    pub name: String,
    pub status: TableStatus,
    pub current_order: Option<OrderId>,
}

impl Table {
    pub fn new(id: TableId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            status: TableStatus::Available,
            current_order: None,
        }
    }

    pub fn is_available(&self) -> bool {
        self.status == TableStatus::Available
    }
}

/// A floor plan entry used to seed the registry.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct TableSeed {
    pub id: TableId,
    pub name: String,
}
