//! Matching engine core
//!
//! Owns the order book and the identifier counter. Every submission gets a
//! fresh id, is matched against the opposite side, and a limit remainder is
//! rested through the book's insert path.

use lob_types::errors::{BookError, BookResult, InvalidArgument};
use lob_types::ids::OrderId;
use lob_types::numeric::{Price, Quantity, Timestamp};
use lob_types::order::{Order, Side};
use lob_types::trade::Fill;
use tracing::{debug, error, warn};

use crate::book::OrderBook;
use crate::config::EngineConfig;
use crate::matching::executor;

/// Main matching engine
#[derive(Debug, Clone)]
pub struct MatchingEngine {
    book: OrderBook,
    config: EngineConfig,
    /// Id handed to the next submission
    next_order_id: OrderId,
}

/// Outcome of one submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitReport {
    pub order_id: OrderId,
    /// Fills in execution order
    pub fills: Vec<Fill>,
    /// Quantity left after matching. For a market order it was discarded.
    pub remaining: Quantity,
    /// Whether the remainder was placed in the book
    pub rested: bool,
}

impl SubmitReport {
    pub fn filled_quantity(&self) -> Quantity {
        self.fills.iter().map(|fill| fill.quantity).sum()
    }
}

impl MatchingEngine {
    /// Create an engine over an empty book with default configuration
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        let next_order_id = OrderId::new(config.first_order_id);
        Self {
            book: OrderBook::new(),
            config,
            next_order_id,
        }
    }

    /// Rest a pre-built limit order directly in the book without matching
    ///
    /// Later submissions are issued ids above the seeded one, so engine ids
    /// never collide with seeded ids. The last id of the range cannot be
    /// seeded since nothing could be issued after it.
    pub fn seed(&mut self, order: Order) -> BookResult<()> {
        let order_id = order.order_id;
        let Some(successor) = order_id.successor() else {
            warn!(order_id = order_id.get(), "seed rejected");
            return Err(InvalidArgument::IdentifierOutOfRange(order_id).into());
        };
        self.book.insert_limit(order)?;
        if successor > self.next_order_id {
            self.next_order_id = successor;
        }
        self.verify("seed");
        Ok(())
    }

    /// Submit a market order; any unfilled remainder is discarded
    pub fn submit_market(
        &mut self,
        side: Side,
        quantity: Quantity,
        timestamp: Timestamp,
    ) -> BookResult<SubmitReport> {
        let mut fills = Vec::new();
        let (order_id, remaining, rested) = self.submit_market_inner(side, quantity, timestamp, &mut fills)?;
        Ok(SubmitReport { order_id, fills, remaining, rested })
    }

    /// Like [`submit_market`](Self::submit_market), appending fills to a caller-owned buffer
    pub fn submit_market_into(
        &mut self,
        side: Side,
        quantity: Quantity,
        timestamp: Timestamp,
        fills: &mut Vec<Fill>,
    ) -> BookResult<OrderId> {
        self.submit_market_inner(side, quantity, timestamp, fills)
            .map(|(order_id, _, _)| order_id)
    }

    /// Submit a limit order; any remainder rests in the book
    pub fn submit_limit(
        &mut self,
        side: Side,
        price: Price,
        quantity: Quantity,
        timestamp: Timestamp,
    ) -> BookResult<SubmitReport> {
        let mut fills = Vec::new();
        let (order_id, remaining, rested) =
            self.submit_limit_inner(side, price, quantity, timestamp, &mut fills)?;
        Ok(SubmitReport { order_id, fills, remaining, rested })
    }

    /// Like [`submit_limit`](Self::submit_limit), appending fills to a caller-owned buffer
    pub fn submit_limit_into(
        &mut self,
        side: Side,
        price: Price,
        quantity: Quantity,
        timestamp: Timestamp,
        fills: &mut Vec<Fill>,
    ) -> BookResult<OrderId> {
        self.submit_limit_inner(side, price, quantity, timestamp, fills)
            .map(|(order_id, _, _)| order_id)
    }

    /// Withdraw a resting order; unknown ids are a no-op
    pub fn cancel(&mut self, order_id: OrderId) -> Option<Order> {
        let removed = self.book.cancel(order_id);
        self.verify("cancel");
        removed
    }

    pub fn book(&self) -> &OrderBook {
        &self.book
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The id the next submission will receive
    pub fn next_order_id(&self) -> OrderId {
        self.next_order_id
    }

    fn submit_market_inner(
        &mut self,
        side: Side,
        quantity: Quantity,
        timestamp: Timestamp,
        fills: &mut Vec<Fill>,
    ) -> BookResult<(OrderId, Quantity, bool)> {
        if !quantity.is_valid() {
            warn!(%side, quantity = quantity.units(), "market order rejected");
            return Err(InvalidArgument::InvalidQuantity(quantity).into());
        }

        let order_id = self.issue_order_id()?;
        let taker = Order::market(order_id, side, quantity, timestamp);
        let (remaining, rested) = self.process(taker, fills)?;
        Ok((order_id, remaining, rested))
    }

    fn submit_limit_inner(
        &mut self,
        side: Side,
        price: Price,
        quantity: Quantity,
        timestamp: Timestamp,
        fills: &mut Vec<Fill>,
    ) -> BookResult<(OrderId, Quantity, bool)> {
        if !quantity.is_valid() {
            warn!(%side, quantity = quantity.units(), "limit order rejected");
            return Err(InvalidArgument::InvalidQuantity(quantity).into());
        }
        if !price.is_valid() {
            warn!(%side, price = price.ticks(), "limit order rejected");
            return Err(InvalidArgument::InvalidPrice(price).into());
        }
        // Matching never touches this side, so a remainder that fits now still fits after
        if let Err(err) = self.book.check_level_capacity(side, price, quantity) {
            warn!(%side, price = price.ticks(), quantity = quantity.units(), "limit order rejected");
            return Err(err);
        }

        let order_id = self.issue_order_id()?;
        let taker = Order::limit(order_id, side, price, quantity, timestamp);
        let (remaining, rested) = self.process(taker, fills)?;
        Ok((order_id, remaining, rested))
    }

    /// Match a validated taker and rest a limit remainder
    fn process(&mut self, mut taker: Order, fills: &mut Vec<Fill>) -> BookResult<(Quantity, bool)> {
        let fills_before = fills.len();
        executor::execute(&mut self.book, &mut taker, fills);

        let order_id = taker.order_id;
        let remaining = taker.quantity;
        let rested = taker.is_limit() && !remaining.is_zero();
        if rested {
            self.book.insert_limit(taker)?;
        }

        debug!(
            order_id = order_id.get(),
            fills = fills.len() - fills_before,
            remaining = remaining.units(),
            rested,
            "order processed"
        );
        self.verify("submit");
        Ok((remaining, rested))
    }

    /// Ids are issued only while a successor exists, so the counter never wraps
    fn issue_order_id(&mut self) -> BookResult<OrderId> {
        let order_id = self.next_order_id;
        let Some(successor) = order_id.successor() else {
            warn!(order_id = order_id.get(), "order identifiers exhausted");
            return Err(BookError::IdentifiersExhausted);
        };
        self.next_order_id = successor;
        Ok(order_id)
    }

    /// A failed self-check means the book is corrupt; there is no recovery.
    fn verify(&self, operation: &'static str) {
        if self.config.verify_invariants && !self.book.self_check() {
            error!(operation, resting = self.book.len(), "order book invariant violated");
            panic!("order book invariant violated after {operation}");
        }
    }
}

impl Default for MatchingEngine {
    fn default() -> Self {
        Self::new()
    }
}
