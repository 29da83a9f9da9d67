//! Trade records
//!
//! A fill is produced for every maker order a taker touches.

use crate::ids::OrderId;
use crate::numeric::{Price, Quantity, Timestamp};
use crate::order::Side;
use serde::{Deserialize, Serialize};

/// One execution between an incoming (taker) order and a resting (maker) order
///
/// `price` is always the maker's level price, never the taker's limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fill {
    pub taker_order_id: OrderId,
    pub maker_order_id: OrderId,
    /// Side of the taker
    pub taker_side: Side,
    pub price: Price,
    pub quantity: Quantity,
    pub executed_at: Timestamp,
}

impl Fill {
    pub fn new(
        taker_order_id: OrderId,
        maker_order_id: OrderId,
        taker_side: Side,
        price: Price,
        quantity: Quantity,
        executed_at: Timestamp,
    ) -> Self {
        Self {
            taker_order_id,
            maker_order_id,
            taker_side,
            price,
            quantity,
            executed_at,
        }
    }

    /// Traded value in tick-units (price × quantity)
    pub fn notional(&self) -> i128 {
        i128::from(self.price.ticks()) * i128::from(self.quantity.units())
    }
}
