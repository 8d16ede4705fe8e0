mod common;

use chrono::Utc;
use common::menu;
use floorbook::domain::money::Balance;
use floorbook::domain::order::{Order, OrderStatus, PaymentMethod};
use floorbook::domain::settlement;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;

fn recomputed_total(order: &Order) -> Decimal {
    order
        .lines
        .iter()
        .map(|line| line.unit_price.value() * Decimal::from(line.quantity))
        .sum()
}

fn assert_balances(order: &Order) {
    assert_eq!(order.total().value(), recomputed_total(order));
    let expected_due = (order.total() - order.paid()).value().max(Decimal::ZERO);
    assert_eq!(order.due().value(), expected_due);
    assert_eq!(settlement::is_settled(order), expected_due.is_zero());
    if order.status == OrderStatus::Completed {
        assert_eq!(order.due(), Balance::ZERO);
    }
    if order.status == OrderStatus::BillPending {
        assert!(!order.lines.is_empty());
    }
}

#[test]
fn test_random_line_sequences_keep_totals_exact() {
    let menu = menu();

    for seed in 0..64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut order = Order::open(1, Utc::now());

        for _ in 0..200 {
            let item = &menu[rng.gen_range(0..menu.len())];
            // Errors are fine here (missing lines, zero quantity); the
            // balances must hold whatever happened.
            let _ = match rng.gen_range(0..4) {
                0 | 1 => order.add_line(item, rng.gen_range(0..4)),
                2 => order.decrement_line(item.id),
                _ => order.remove_line(item.id),
            };
            assert_balances(&order);
        }
    }
}

#[test]
fn test_random_payments_never_overshoot() {
    let menu = menu();

    for seed in 0..64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut order = Order::open(1, Utc::now());
        for item in &menu {
            order.add_line(item, rng.gen_range(1..5)).unwrap();
        }
        order.mark_bill_pending().unwrap();

        while order.status != OrderStatus::Completed {
            let cents: i64 = rng.gen_range(1..10_000);
            let amount = Decimal::new(cents, 2);
            let before = order.clone();

            match order.record_payment(amount, PaymentMethod::Cash, Utc::now()) {
                Ok(()) => assert_eq!(order.paid().value(), before.paid().value() + amount),
                Err(_) => {
                    assert!(amount > before.due().value());
                    assert_eq!(order, before);
                    // Settle whatever is left so the loop ends.
                    let due = order.due().value();
                    order
                        .record_payment(due, PaymentMethod::Card, Utc::now())
                        .unwrap();
                }
            }
            assert_balances(&order);
        }
    }
}
