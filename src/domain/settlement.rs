//! Balance math over an [`Order`].
//!
//! Everything here is a pure function of the order's lines and payments. The
//! order aggregate calls into it to decide completion, and the controller
//! hands the resulting [`Statement`] to callers.

use super::money::Balance;
use super::order::{Order, OrderLine};
use serde::{Deserialize, Serialize};

/// Sum of `unit_price × quantity` over the current lines.
pub fn total(order: &Order) -> Balance {
    order.lines.iter().map(|line| line.subtotal()).sum()
}

/// Like [`total`], but `None` when a subtotal or the running sum overflows.
///
/// Orders only take line changes that pass this check, so [`total`] never
/// overflows on a stored order.
pub fn checked_total(lines: &[OrderLine]) -> Option<Balance> {
    lines.iter().try_fold(Balance::ZERO, |sum, line| {
        sum.checked_add(line.unit_price.checked_mul(line.quantity)?)
    })
}

/// Sum of every payment recorded so far.
pub fn paid(order: &Order) -> Balance {
    order
        .payments
        .iter()
        .map(|payment| Balance::from(payment.amount))
        .sum()
}

/// Outstanding balance, never negative.
pub fn due(order: &Order) -> Balance {
    (total(order) - paid(order)).non_negative()
}

pub fn is_settled(order: &Order) -> bool {
    due(order).is_zero()
}

/// Read-only view of an order's balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Statement {
    pub total: Balance,
    pub paid: Balance,
    pub due: Balance,
}

pub fn statement(order: &Order) -> Statement {
    let total = total(order);
    let paid = paid(order);
    Statement {
        total,
        paid,
        due: (total - paid).non_negative(),
    }
}
