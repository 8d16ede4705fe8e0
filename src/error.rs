use crate::domain::catalog::ItemId;
use crate::domain::order::OrderId;
use crate::domain::table::TableId;
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FloorError {
    #[error("Table {0} not found")]
    TableNotFound(TableId),
    #[error("Menu item {0} not found")]
    UnknownItem(ItemId),
    #[error("Order {0} not found")]
    OrderNotFound(OrderId),
    #[error("No line for item {0} on the order")]
    LineNotFound(ItemId),

    #[error("Table {0} is not available")]
    TableNotAvailable(TableId),
    #[error("Table {0} has no open order")]
    TableHasNoOpenOrder(TableId),
    #[error("Order {0} is not awaiting payment")]
    OrderNotBillPending(OrderId),
    #[error("Order {0} is already completed")]
    OrderCompleted(OrderId),
    #[error("Order total {total} would drop below the {paid} already paid")]
    BelowPaidAmount { total: Decimal, paid: Decimal },

    #[error("Quantity must be at least 1 and no more than the line holds")]
    InvalidQuantity,
    #[error("Amount must be positive, got {0}")]
    InvalidAmount(Decimal),
    #[error("Order total is out of range")]
    TotalOutOfRange,
    #[error("Cannot request the bill for an empty order")]
    EmptyOrder,
    #[error("A table must be opened with at least one line")]
    EmptyInitialOrder,
    #[error("Malformed command: {0}")]
    MalformedCommand(String),

    #[error("Payment of {amount} exceeds the {due} due")]
    Overpayment { amount: Decimal, due: Decimal },

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[cfg(feature = "storage-rocksdb")]
    #[error("Storage error: {0}")]
    StorageError(#[from] rocksdb::Error),
    #[error("Internal error: {0}")]
    InternalError(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Coarse classification of a [`FloorError`], surfaced to callers alongside
/// the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    NotFound,
    PreconditionViolation,
    InvalidInput,
    Overpayment,
    Internal,
}

impl FloorError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::TableNotFound(_)
            | Self::UnknownItem(_)
            | Self::OrderNotFound(_)
            | Self::LineNotFound(_) => ErrorKind::NotFound,
            Self::TableNotAvailable(_)
            | Self::TableHasNoOpenOrder(_)
            | Self::OrderNotBillPending(_)
            | Self::OrderCompleted(_)
            | Self::BelowPaidAmount { .. } => ErrorKind::PreconditionViolation,
            Self::InvalidQuantity
            | Self::InvalidAmount(_)
            | Self::TotalOutOfRange
            | Self::EmptyOrder
            | Self::EmptyInitialOrder
            | Self::MalformedCommand(_) => ErrorKind::InvalidInput,
            Self::Overpayment { .. } => ErrorKind::Overpayment,
            _ => ErrorKind::Internal,
        }
    }
}

pub type Result<T> = std::result::Result<T, FloorError>;

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_error_kinds() {
        assert_eq!(FloorError::TableNotFound(1).kind(), ErrorKind::NotFound);
        assert_eq!(
            FloorError::TableNotAvailable(1).kind(),
            ErrorKind::PreconditionViolation
        );
        assert_eq!(FloorError::EmptyOrder.kind(), ErrorKind::InvalidInput);
        assert_eq!(
            FloorError::Overpayment {
                amount: dec!(10),
                due: dec!(5)
            }
            .kind(),
            ErrorKind::Overpayment
        );
        assert_eq!(
            FloorError::IoError(std::io::Error::other("disk")).kind(),
            ErrorKind::Internal
        );
    }

    #[test]
    fn test_overpayment_message() {
        let err = FloorError::Overpayment {
            amount: dec!(30),
            due: dec!(20),
        };
        assert_eq!(err.to_string(), "Payment of 30 exceeds the 20 due");
    }
}
