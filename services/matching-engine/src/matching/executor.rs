//! Level walk
//!
//! Walks the opposite side of the book best level first and, within a
//! level, oldest order first. One algorithm serves both sides: the side
//! decides which end of the book is best and which way the limit gate
//! compares.

use lob_types::order::Order;
use lob_types::trade::Fill;
use tracing::{debug, trace};

use super::crossing;
use crate::book::OrderBook;

/// Match `taker` against the opposite side of `book`
///
/// A limit taker stops at the first level that is not marketable against
/// its limit; a market taker only stops when it is filled or the opposite
/// side runs dry. Every fill executes at the maker's level price. Fills are
/// appended to `fills` and the taker's quantity is reduced in place; the
/// caller decides what happens to any remainder.
pub fn execute(book: &mut OrderBook, taker: &mut Order, fills: &mut Vec<Fill>) {
    let limit = taker.is_limit().then_some(taker.price);
    let (makers, index) = book.side_and_index_mut(taker.side.opposite());

    while !taker.is_filled() {
        let Some(level) = makers.best_level_mut() else {
            break;
        };
        let level_price = level.price();
        if let Some(limit) = limit {
            if !crossing::is_marketable(taker.side, limit, level_price) {
                break;
            }
        }

        while !taker.is_filled() {
            let (maker_id, maker_quantity) = match level.front() {
                Some(maker) => (maker.order_id, maker.quantity),
                None => break,
            };
            let traded = taker.quantity.min(maker_quantity);

            fills.push(Fill::new(
                taker.order_id,
                maker_id,
                taker.side,
                level_price,
                traded,
                taker.created_at,
            ));
            trace!(
                taker = taker.order_id.get(),
                maker = maker_id.get(),
                price = level_price.ticks(),
                quantity = traded.units(),
                "fill"
            );

            taker.apply_fill(traded);
            if level.fill_front(traded).is_some() {
                index.remove(&maker_id);
                index.reindex_from(level, 0);
            }
        }

        if level.is_empty() {
            makers.remove_level(level_price);
            debug!(side = %makers.side(), price = level_price.ticks(), "level removed");
        }
    }
}
