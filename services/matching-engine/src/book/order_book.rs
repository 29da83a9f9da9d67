//! Order book for a single instrument
//!
//! Two sides of price levels plus an id → {side, price, position} index.
//! After every public operation the index and the physical queues agree
//! exactly: each resting order's entry records the level and offset it
//! occupies, and each entry resolves to that order.

use lob_types::errors::{BookResult, InvalidArgument};
use lob_types::ids::OrderId;
use lob_types::numeric::{Price, Quantity};
use lob_types::order::{Order, Side};
use tracing::debug;

use super::book_side::{BookSide, Levels};
use super::index::{IndexEntry, OrderIndex};
use super::price_level::PriceLevel;
use crate::snapshot::BookSnapshot;

#[derive(Debug, Clone)]
pub struct OrderBook {
    bids: BookSide,
    asks: BookSide,
    index: OrderIndex,
}

impl OrderBook {
    /// Create an empty book
    pub fn new() -> Self {
        Self {
            bids: BookSide::new(Side::Buy),
            asks: BookSide::new(Side::Sell),
            index: OrderIndex::new(),
        }
    }

    /// Rest a limit order at the tail of its price level
    ///
    /// Fails without touching the book if the order is not a limit order,
    /// its id is already resting, or its quantity or price is not positive.
    pub fn insert_limit(&mut self, order: Order) -> BookResult<()> {
        if !order.is_limit() {
            return Err(InvalidArgument::WrongOrderKind(order.order_type).into());
        }
        if self.index.contains(&order.order_id) {
            return Err(InvalidArgument::DuplicateIdentifier(order.order_id).into());
        }
        if !order.quantity.is_valid() {
            return Err(InvalidArgument::InvalidQuantity(order.quantity).into());
        }
        if !order.price.is_valid() {
            return Err(InvalidArgument::InvalidPrice(order.price).into());
        }
        self.check_level_capacity(order.side, order.price, order.quantity)?;

        let order_id = order.order_id;
        let side = order.side;
        let price = order.price;
        let position = self.side_mut(side).level_or_insert(price).push_back(order);
        self.index.insert(order_id, IndexEntry { side, price, position });

        debug!(order_id = order_id.get(), %side, price = price.ticks(), position, "order rested");
        Ok(())
    }

    /// Reject a quantity the level at `price` could not add to its total
    pub fn check_level_capacity(&self, side: Side, price: Price, quantity: Quantity) -> BookResult<()> {
        let resting = self.level(side, price).map_or(Quantity::ZERO, PriceLevel::total_quantity);
        match resting.checked_add(quantity) {
            Some(_) => Ok(()),
            None => Err(InvalidArgument::LevelQuantityOverflow { price, quantity }.into()),
        }
    }

    /// Withdraw a resting order
    ///
    /// Unknown ids are ignored: a cancel may legitimately race a fill.
    /// Returns the removed order.
    pub fn cancel(&mut self, order_id: OrderId) -> Option<Order> {
        let entry = *self.index.get(&order_id)?;

        let (side, index) = self.side_and_index_mut(entry.side);

        let mut removed = None;
        let mut level_emptied = false;
        if let Some(level) = side.level_mut(entry.price) {
            removed = level.remove_at(entry.position);
            if removed.is_some() {
                index.reindex_from(level, entry.position);
            }
            level_emptied = level.is_empty();
        }
        if level_emptied {
            side.remove_level(entry.price);
            debug!(side = %entry.side, price = entry.price.ticks(), "level removed");
        }

        index.remove(&order_id);
        debug!(order_id = order_id.get(), found = removed.is_some(), "order canceled");
        removed
    }

    /// Verify that the index and the level queues agree
    ///
    /// Checks both directions: every queued order has an entry naming its
    /// exact side, price and position, and every entry names a queued order.
    /// Also rejects empty levels and orders filed under the wrong side or
    /// price. Runs in O(resting orders); not meant for the hot path.
    pub fn self_check(&self) -> bool {
        let mut queued = 0usize;
        for book_side in [&self.bids, &self.asks] {
            for (price, level) in book_side.iter() {
                if level.is_empty() || level.price() != *price {
                    return false;
                }
                for (position, order) in level.iter().enumerate() {
                    if order.side != book_side.side()
                        || order.price != *price
                        || !order.quantity.is_valid()
                    {
                        return false;
                    }
                    let expected = IndexEntry { side: book_side.side(), price: *price, position };
                    if self.index.get(&order.order_id) != Some(&expected) {
                        return false;
                    }
                    queued += 1;
                }
            }
        }

        for (order_id, entry) in self.index.iter() {
            let resolved = self
                .side(entry.side)
                .level(entry.price)
                .and_then(|level| level.get(entry.position));
            match resolved {
                Some(order) if order.order_id == *order_id => {}
                _ => return false,
            }
        }

        queued == self.index.len()
    }

    /// Highest resting bid, `None` if there are no bids
    pub fn best_bid(&self) -> Option<Price> {
        self.bids.best_price()
    }

    /// Lowest resting ask, `None` if there are no asks
    pub fn best_ask(&self) -> Option<Price> {
        self.asks.best_price()
    }

    /// Floor average of best bid and best ask; `None` unless both sides exist
    pub fn mid(&self) -> Option<Price> {
        Some(Price::midpoint(self.best_bid()?, self.best_ask()?))
    }

    /// Best ask minus best bid in ticks; `None` unless both sides exist
    pub fn spread(&self) -> Option<i64> {
        Some(self.best_ask()?.ticks() - self.best_bid()?.ticks())
    }

    /// Check whether an order is currently resting
    pub fn contains(&self, order_id: OrderId) -> bool {
        self.index.contains(&order_id)
    }

    /// Look up a resting order by id
    pub fn order(&self, order_id: OrderId) -> Option<&Order> {
        let entry = self.index.get(&order_id)?;
        self.side(entry.side)
            .level(entry.price)?
            .get(entry.position)
    }

    /// Where a resting order sits: side, price and position in its level
    pub fn locate(&self, order_id: OrderId) -> Option<IndexEntry> {
        self.index.get(&order_id).copied()
    }

    pub fn level(&self, side: Side, price: Price) -> Option<&PriceLevel> {
        self.side(side).level(price)
    }

    /// Bid levels, highest price first
    pub fn bid_levels(&self) -> Levels<'_> {
        self.bids.levels_best_first()
    }

    /// Ask levels, lowest price first
    pub fn ask_levels(&self) -> Levels<'_> {
        self.asks.levels_best_first()
    }

    pub fn side(&self, side: Side) -> &BookSide {
        match side {
            Side::Buy => &self.bids,
            Side::Sell => &self.asks,
        }
    }

    /// Top `depth` levels of each side
    pub fn snapshot(&self, depth: usize) -> BookSnapshot {
        BookSnapshot::capture(self, depth)
    }

    /// Number of resting orders
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    fn side_mut(&mut self, side: Side) -> &mut BookSide {
        match side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        }
    }

    /// Borrow one side together with the index, for the matcher
    pub(crate) fn side_and_index_mut(&mut self, side: Side) -> (&mut BookSide, &mut OrderIndex) {
        match side {
            Side::Buy => (&mut self.bids, &mut self.index),
            Side::Sell => (&mut self.asks, &mut self.index),
        }
    }
}

impl Default for OrderBook {
    fn default() -> Self {
        Self::new()
    }
}
