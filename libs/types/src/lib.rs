//! Types library for the limit order book
//!
//! Value types shared by the order book, the matching engine and any
//! driver feeding them.
//!
//! # Modules
//! - `ids`: Order identifiers
//! - `numeric`: Integer tick/unit types (Price, Quantity)
//! - `order`: Side, order type and the order record
//! - `trade`: Fill records
//! - `errors`: Error taxonomy

pub mod errors;
pub mod ids;
pub mod numeric;
pub mod order;
pub mod trade;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::errors::*;
    pub use crate::ids::*;
    pub use crate::numeric::*;
    pub use crate::order::*;
    pub use crate::trade::*;
}
