//! Matching Engine
//!
//! Single-instrument limit order book with price-time priority matching.
//!
//! **Key Invariants:**
//! - Price-time priority strictly enforced
//! - A limit order never trades through its own price
//! - Conservation of quantity
//! - The id index always agrees with the level queues
//!
//! Everything is synchronous and single-threaded. All mutation goes through
//! `&mut MatchingEngine`; callers that need concurrent order entry must
//! serialize it themselves.

pub mod book;
pub mod config;
pub mod engine;
pub mod matching;
pub mod snapshot;

pub use book::OrderBook;
pub use config::{ConfigError, EngineConfig};
pub use engine::{MatchingEngine, SubmitReport};
pub use snapshot::{BookSnapshot, LevelSnapshot};
