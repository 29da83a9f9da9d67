//! Property-based tests (proptest)
//!
//! Drives the engine with random order flow and checks after every step:
//! - index/queue consistency (`self_check`)
//! - quantity conservation per submission
//! - exact maker decrements
//! - no trade-through for limit takers
//! - best-price-first, oldest-first consumption

use std::collections::HashMap;

use lob_types::ids::OrderId;
use lob_types::numeric::{Price, Quantity};
use lob_types::order::Side;
use lob_types::trade::Fill;
use matching_engine::{MatchingEngine, OrderBook, SubmitReport};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Limit { side: Side, price: i64, quantity: i64 },
    Market { side: Side, quantity: i64 },
    Cancel { order_id: u64 },
}

fn side() -> impl Strategy<Value = Side> {
    prop_oneof![Just(Side::Buy), Just(Side::Sell)]
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (side(), 95i64..=105, 1i64..=20)
            .prop_map(|(side, price, quantity)| Op::Limit { side, price, quantity }),
        1 => (side(), 1i64..=40).prop_map(|(side, quantity)| Op::Market { side, quantity }),
        2 => (1u64..=120).prop_map(|order_id| Op::Cancel { order_id }),
    ]
}

/// Each maker's quantity before the submission minus what it traded must
/// equal what is left in the book (or the maker must be gone at zero).
fn check_maker_decrements(before: &OrderBook, after: &OrderBook, fills: &[Fill]) -> Result<(), TestCaseError> {
    let mut traded: HashMap<OrderId, i64> = HashMap::new();
    for fill in fills {
        *traded.entry(fill.maker_order_id).or_default() += fill.quantity.units();
    }
    for (maker_id, total) in traded {
        let prior = before.order(maker_id).map(|o| o.quantity.units());
        prop_assert!(prior.is_some(), "maker {} was not resting", maker_id);
        let left = prior.unwrap_or_default() - total;
        prop_assert!(left >= 0);
        match after.order(maker_id) {
            Some(order) => prop_assert_eq!(order.quantity.units(), left),
            None => prop_assert_eq!(left, 0),
        }
    }
    Ok(())
}

/// Fills walk away from the touch and only the last maker may survive
fn check_priority(side: Side, after: &OrderBook, fills: &[Fill]) -> Result<(), TestCaseError> {
    for pair in fills.windows(2) {
        match side {
            Side::Buy => prop_assert!(pair[0].price <= pair[1].price),
            Side::Sell => prop_assert!(pair[0].price >= pair[1].price),
        }
    }
    if let Some((_, consumed)) = fills.split_last() {
        for fill in consumed {
            prop_assert!(!after.contains(fill.maker_order_id));
        }
    }
    Ok(())
}

fn check_conservation(report: &SubmitReport, quantity: i64) -> Result<(), TestCaseError> {
    prop_assert_eq!(report.filled_quantity().units() + report.remaining.units(), quantity);
    prop_assert!(report.fills.iter().all(|f| f.quantity.is_valid()));
    Ok(())
}

proptest! {
    #[test]
    fn prop_random_flow_preserves_invariants(ops in prop::collection::vec(op(), 1..120)) {
        let mut engine = MatchingEngine::new();

        for (step, op) in ops.into_iter().enumerate() {
            let before = engine.book().clone();
            let timestamp = step as i64;

            match op {
                Op::Limit { side, price, quantity } => {
                    let report = engine
                        .submit_limit(side, Price::from_ticks(price), Quantity::from_units(quantity), timestamp)
                        .unwrap();
                    check_conservation(&report, quantity)?;
                    check_maker_decrements(&before, engine.book(), &report.fills)?;
                    check_priority(side, engine.book(), &report.fills)?;
                    for fill in &report.fills {
                        match side {
                            Side::Buy => prop_assert!(fill.price.ticks() <= price),
                            Side::Sell => prop_assert!(fill.price.ticks() >= price),
                        }
                    }
                    prop_assert_eq!(report.rested, engine.book().contains(report.order_id));
                    prop_assert_eq!(report.rested, !report.remaining.is_zero());
                }
                Op::Market { side, quantity } => {
                    let report = engine
                        .submit_market(side, Quantity::from_units(quantity), timestamp)
                        .unwrap();
                    check_conservation(&report, quantity)?;
                    check_maker_decrements(&before, engine.book(), &report.fills)?;
                    check_priority(side, engine.book(), &report.fills)?;
                    prop_assert!(!engine.book().contains(report.order_id));
                    if !report.remaining.is_zero() {
                        prop_assert!(engine.book().side(side.opposite()).is_empty());
                    }
                }
                Op::Cancel { order_id } => {
                    let order_id = OrderId::new(order_id);
                    let was_resting = before.contains(order_id);
                    let removed = engine.cancel(order_id);
                    prop_assert_eq!(removed.is_some(), was_resting);
                    prop_assert!(!engine.book().contains(order_id));
                }
            }

            prop_assert!(engine.book().self_check(), "self_check failed at step {}", step);
            if let (Some(bid), Some(ask)) = (engine.book().best_bid(), engine.book().best_ask()) {
                prop_assert!(bid < ask, "book left crossed: {} >= {}", bid, ask);
            }
        }
    }

    #[test]
    fn prop_cancel_everything_empties_book(
        orders in prop::collection::vec((side(), 1i64..=50, 1i64..=10), 1..60),
        seed in any::<u64>(),
    ) {
        let mut book = OrderBook::new();
        let mut ids = Vec::new();
        for (i, (side, price, quantity)) in orders.into_iter().enumerate() {
            let order_id = OrderId::new(i as u64 + 1);
            book.insert_limit(lob_types::order::Order::limit(
                order_id,
                side,
                Price::from_ticks(price),
                Quantity::from_units(quantity),
                i as i64,
            ))
            .unwrap();
            ids.push(order_id);
        }

        // Deterministic shuffle so cancels hit heads, middles and tails
        let len = ids.len();
        for i in (1..len).rev() {
            let j = (seed.wrapping_mul(i as u64 + 7) % (i as u64 + 1)) as usize;
            ids.swap(i, j);
        }

        for order_id in ids {
            prop_assert!(book.cancel(order_id).is_some());
            prop_assert!(book.self_check());
        }
        prop_assert!(book.is_empty());
        prop_assert_eq!(book.bid_levels().count() + book.ask_levels().count(), 0);
    }
}
