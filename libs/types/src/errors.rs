//! Error types for the order book and matching engine
//!
//! Every error here is a local precondition violation, detected before any
//! state is touched. Cancelling an unknown id is not an error.

use crate::ids::OrderId;
use crate::numeric::{Price, Quantity};
use crate::order::OrderType;
use thiserror::Error;

/// Top-level book/engine error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(#[from] InvalidArgument),

    #[error("Order identifiers exhausted")]
    IdentifiersExhausted,
}

/// Rejected inputs
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidArgument {
    #[error("Duplicate order id: {0}")]
    DuplicateIdentifier(OrderId),

    #[error("Invalid quantity: {0} (must be > 0)")]
    InvalidQuantity(Quantity),

    #[error("Invalid price: {0} (must be > 0)")]
    InvalidPrice(Price),

    #[error("Wrong order kind: expected LIMIT, got {0}")]
    WrongOrderKind(OrderType),

    #[error("Order id out of range: {0}")]
    IdentifierOutOfRange(OrderId),

    #[error("Level quantity overflow at price {price}: cannot add {quantity}")]
    LevelQuantityOverflow { price: Price, quantity: Quantity },
}

pub type BookResult<T> = Result<T, BookError>;
