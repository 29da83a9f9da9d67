//! Order book infrastructure module
//!
//! Contains price levels, the per-side level collection, the id index and
//! the order book that ties them together.

pub mod book_side;
pub mod index;
pub mod order_book;
pub mod price_level;

pub use book_side::{BookSide, Levels};
pub use index::{IndexEntry, OrderIndex};
pub use order_book::OrderBook;
pub use price_level::PriceLevel;
