//! Order types
//!
//! An order is an intent to trade. Everything except the remaining quantity
//! is fixed at creation; the quantity only goes down, and only by matching.

use crate::ids::OrderId;
use crate::numeric::{Price, Quantity, Timestamp};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Order side (buyer or seller)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    /// Buy order (bid)
    Buy,
    /// Sell order (ask)
    Sell,
}

impl Side {
    /// Get the opposite side
    pub fn opposite(&self) -> Self {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => write!(f, "BUY"),
            Side::Sell => write!(f, "SELL"),
        }
    }
}

/// Order type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderType {
    /// Trades up to a limit price; any remainder rests in the book
    Limit,
    /// Trades at any price; any remainder is discarded
    Market,
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderType::Limit => write!(f, "LIMIT"),
            OrderType::Market => write!(f, "MARKET"),
        }
    }
}

/// A single order
///
/// `price` is ignored for market orders. `quantity` is the remaining
/// quantity; zero means the order is fully consumed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: OrderId,
    pub side: Side,
    pub order_type: OrderType,
    pub price: Price,
    pub quantity: Quantity,
    pub created_at: Timestamp,
}

impl Order {
    /// Create a limit order, e.g. to pre-seed a book
    pub fn limit(
        order_id: OrderId,
        side: Side,
        price: Price,
        quantity: Quantity,
        created_at: Timestamp,
    ) -> Self {
        Self {
            order_id,
            side,
            order_type: OrderType::Limit,
            price,
            quantity,
            created_at,
        }
    }

    /// Create a market order. The price field carries no meaning.
    pub fn market(order_id: OrderId, side: Side, quantity: Quantity, created_at: Timestamp) -> Self {
        Self {
            order_id,
            side,
            order_type: OrderType::Market,
            price: Price::from_ticks(Price::NONE_SENTINEL),
            quantity,
            created_at,
        }
    }

    pub fn is_limit(&self) -> bool {
        self.order_type == OrderType::Limit
    }

    /// Check if order is completely consumed
    pub fn is_filled(&self) -> bool {
        self.quantity.is_zero()
    }

    /// Take `fill_quantity` off the remaining quantity
    ///
    /// # Panics
    /// Panics if the fill would exceed the remaining quantity
    pub fn apply_fill(&mut self, fill_quantity: Quantity) {
        assert!(
            fill_quantity <= self.quantity,
            "Fill would exceed order quantity"
        );
        self.quantity -= fill_quantity;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_order(qty: i64) -> Order {
        Order::limit(
            OrderId::new(1),
            Side::Buy,
            Price::from_ticks(100),
            Quantity::from_units(qty),
            1_000,
        )
    }

    #[test]
    fn test_side_opposite() {
        assert_eq!(Side::Buy.opposite(), Side::Sell);
        assert_eq!(Side::Sell.opposite(), Side::Buy);
    }

    #[test]
    fn test_order_fill() {
        let mut order = create_test_order(5);

        order.apply_fill(Quantity::from_units(3));
        assert_eq!(order.quantity, Quantity::from_units(2));
        assert!(!order.is_filled());

        order.apply_fill(Quantity::from_units(2));
        assert!(order.is_filled());
    }

    #[test]
    #[should_panic(expected = "Fill would exceed order quantity")]
    fn test_order_overfill_panics() {
        let mut order = create_test_order(1);
        order.apply_fill(Quantity::from_units(2));
    }

    #[test]
    fn test_market_order_kind() {
        let order = Order::market(OrderId::new(9), Side::Sell, Quantity::from_units(4), 0);
        assert!(!order.is_limit());
        assert_eq!(order.order_type, OrderType::Market);
    }

    #[test]
    fn test_order_serialization() {
        let order = create_test_order(5);
        let json = serde_json::to_string(&order).unwrap();
        assert!(json.contains("\"side\":\"BUY\""));
        assert!(json.contains("\"order_type\":\"LIMIT\""));

        let deserialized: Order = serde_json::from_str(&json).unwrap();
        assert_eq!(order, deserialized);
    }
}
