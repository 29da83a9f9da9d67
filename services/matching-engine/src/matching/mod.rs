//! Matching logic module
//!
//! Implements the price-time priority walk over the opposite side

pub mod crossing;
pub mod executor;

pub use crossing::{can_match, is_marketable};
pub use executor::execute;
