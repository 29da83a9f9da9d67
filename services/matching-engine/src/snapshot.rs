//! Read-only book views for reporting
//!
//! A snapshot copies the top of each side out of the book so a reporter can
//! print or serialize it without holding a borrow on the engine.

use lob_types::numeric::{Price, Quantity};
use serde::{Deserialize, Serialize};

use crate::book::{OrderBook, PriceLevel};

/// Aggregate view of one price level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelSnapshot {
    pub price: Price,
    pub total_quantity: Quantity,
    pub order_count: usize,
}

impl From<&PriceLevel> for LevelSnapshot {
    fn from(level: &PriceLevel) -> Self {
        Self {
            price: level.price(),
            total_quantity: level.total_quantity(),
            order_count: level.order_count(),
        }
    }
}

/// Top-of-book snapshot; both level lists are best price first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookSnapshot {
    pub best_bid: Option<Price>,
    pub best_ask: Option<Price>,
    pub mid: Option<Price>,
    pub bids: Vec<LevelSnapshot>,
    pub asks: Vec<LevelSnapshot>,
}

impl BookSnapshot {
    /// Capture up to `depth` levels per side
    pub fn capture(book: &OrderBook, depth: usize) -> Self {
        Self {
            best_bid: book.best_bid(),
            best_ask: book.best_ask(),
            mid: book.mid(),
            bids: book.bid_levels().take(depth).map(LevelSnapshot::from).collect(),
            asks: book.ask_levels().take(depth).map(LevelSnapshot::from).collect(),
        }
    }
}
