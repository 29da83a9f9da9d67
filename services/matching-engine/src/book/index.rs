//! Identifier → location index
//!
//! Every resting order has exactly one entry recording its side, its level
//! price and its position within that level's queue. Positions are plain
//! offsets, so any removal ahead of an order in the same level must be
//! followed by [`OrderIndex::reindex_from`].

use std::collections::HashMap;

use lob_types::ids::OrderId;
use lob_types::numeric::Price;
use lob_types::order::Side;
use serde::{Deserialize, Serialize};

use super::price_level::PriceLevel;

/// Where a resting order lives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    pub side: Side,
    pub price: Price,
    /// Offset within the level queue, 0 = oldest
    pub position: usize,
}

#[derive(Debug, Clone, Default)]
pub struct OrderIndex {
    entries: HashMap<OrderId, IndexEntry>,
}

impl OrderIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, order_id: &OrderId) -> Option<&IndexEntry> {
        self.entries.get(order_id)
    }

    pub fn contains(&self, order_id: &OrderId) -> bool {
        self.entries.contains_key(order_id)
    }

    pub fn insert(&mut self, order_id: OrderId, entry: IndexEntry) {
        self.entries.insert(order_id, entry);
    }

    pub fn remove(&mut self, order_id: &OrderId) -> Option<IndexEntry> {
        self.entries.remove(order_id)
    }

    /// Rewrite the position of every order in `level` from `start` onwards
    pub fn reindex_from(&mut self, level: &PriceLevel, start: usize) {
        for (position, order) in level.iter().enumerate().skip(start) {
            if let Some(entry) = self.entries.get_mut(&order.order_id) {
                entry.position = position;
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&OrderId, &IndexEntry)> + '_ {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
