//! One side of the order book
//!
//! Levels are kept in a `BTreeMap` keyed by price, which iterates in
//! ascending order. The side decides which end is "best": the highest
//! price for bids, the lowest for asks. Both sides share this one type.

use std::collections::btree_map::{self, BTreeMap};
use std::iter::Rev;

use lob_types::numeric::{Price, Quantity};
use lob_types::order::Side;

use super::price_level::PriceLevel;

/// Bid or ask side of the book
#[derive(Debug, Clone)]
pub struct BookSide {
    side: Side,
    /// Price levels sorted ascending; never contains an empty level
    levels: BTreeMap<Price, PriceLevel>,
}

impl BookSide {
    /// Create a new empty side
    pub fn new(side: Side) -> Self {
        Self {
            side,
            levels: BTreeMap::new(),
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    /// Get the best price (highest bid / lowest ask)
    pub fn best_price(&self) -> Option<Price> {
        match self.side {
            Side::Buy => self.levels.keys().next_back().copied(),
            Side::Sell => self.levels.keys().next().copied(),
        }
    }

    /// Get the best level with its total quantity
    pub fn best(&self) -> Option<(Price, Quantity)> {
        self.levels_best_first()
            .next()
            .map(|level| (level.price(), level.total_quantity()))
    }

    /// Get mutable reference to the best level
    pub(crate) fn best_level_mut(&mut self) -> Option<&mut PriceLevel> {
        match self.side {
            Side::Buy => self.levels.values_mut().next_back(),
            Side::Sell => self.levels.values_mut().next(),
        }
    }

    pub fn level(&self, price: Price) -> Option<&PriceLevel> {
        self.levels.get(&price)
    }

    pub(crate) fn level_mut(&mut self, price: Price) -> Option<&mut PriceLevel> {
        self.levels.get_mut(&price)
    }

    /// Level at `price`, created empty if missing
    pub(crate) fn level_or_insert(&mut self, price: Price) -> &mut PriceLevel {
        self.levels
            .entry(price)
            .or_insert_with(|| PriceLevel::new(price))
    }

    pub(crate) fn remove_level(&mut self, price: Price) -> Option<PriceLevel> {
        self.levels.remove(&price)
    }

    /// Iterate levels from best to worst price
    pub fn levels_best_first(&self) -> Levels<'_> {
        match self.side {
            Side::Buy => Levels::Descending(self.levels.values().rev()),
            Side::Sell => Levels::Ascending(self.levels.values()),
        }
    }

    /// Iterate `(price, level)` pairs in ascending price order
    pub(crate) fn iter(&self) -> btree_map::Iter<'_, Price, PriceLevel> {
        self.levels.iter()
    }

    /// Check if this side has no levels
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Get the total number of price levels
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// Get the total number of resting orders across all levels
    pub fn order_count(&self) -> usize {
        self.levels.values().map(PriceLevel::order_count).sum()
    }
}

/// Best-first iterator over the levels of one side
pub enum Levels<'a> {
    Ascending(btree_map::Values<'a, Price, PriceLevel>),
    Descending(Rev<btree_map::Values<'a, Price, PriceLevel>>),
}

impl<'a> Iterator for Levels<'a> {
    type Item = &'a PriceLevel;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Levels::Ascending(iter) => iter.next(),
            Levels::Descending(iter) => iter.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            Levels::Ascending(iter) => iter.size_hint(),
            Levels::Descending(iter) => iter.size_hint(),
        }
    }
}
