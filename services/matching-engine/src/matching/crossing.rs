//! Crossing detection logic
//!
//! Determines when an incoming limit order may trade against a resting
//! price level.

use lob_types::numeric::Price;
use lob_types::order::Side;

/// Check if a bid and ask can match at given prices
///
/// For a buy order to match with a sell order the bid must be >= the ask.
pub fn can_match(bid_price: Price, ask_price: Price) -> bool {
    bid_price >= ask_price
}

/// Check if an incoming limit order is marketable against a resting level
///
/// A buy takes asks priced at or below its limit; a sell takes bids priced
/// at or above its limit. Evaluated before entering each level, so a limit
/// order never trades through its own price.
pub fn is_marketable(taker_side: Side, limit_price: Price, level_price: Price) -> bool {
    match taker_side {
        Side::Buy => can_match(limit_price, level_price),
        Side::Sell => can_match(level_price, limit_price),
    }
}
