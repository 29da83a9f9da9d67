//! Price level implementation with FIFO queue
//!
//! A price level contains all resting orders at one price on one side.
//! Orders are kept oldest-first to enforce time priority: new orders are
//! appended at the tail, matching consumes from the head, and a cancel can
//! remove from any position.

use std::collections::VecDeque;

use lob_types::numeric::{Price, Quantity};
use lob_types::order::Order;

/// A price level containing orders at a specific price
#[derive(Debug, Clone)]
pub struct PriceLevel {
    price: Price,
    /// Queue of orders at this price level (FIFO order)
    orders: VecDeque<Order>,
    /// Total remaining quantity across the queue
    total_quantity: Quantity,
}

impl PriceLevel {
    /// Create a new empty price level
    pub fn new(price: Price) -> Self {
        Self {
            price,
            orders: VecDeque::new(),
            total_quantity: Quantity::zero(),
        }
    }

    pub fn price(&self) -> Price {
        self.price
    }

    /// Append an order at the tail and return its position
    pub fn push_back(&mut self, order: Order) -> usize {
        self.total_quantity += order.quantity;
        self.orders.push_back(order);
        self.orders.len() - 1
    }

    /// Remove the order at `position`
    ///
    /// Every order behind it moves up by one position.
    pub fn remove_at(&mut self, position: usize) -> Option<Order> {
        let order = self.orders.remove(position)?;
        self.total_quantity -= order.quantity;
        Some(order)
    }

    /// Peek at the oldest order
    pub fn front(&self) -> Option<&Order> {
        self.orders.front()
    }

    /// Pop the oldest order
    pub fn pop_front(&mut self) -> Option<Order> {
        let order = self.orders.pop_front()?;
        self.total_quantity -= order.quantity;
        Some(order)
    }

    /// Trade `quantity` against the front order
    ///
    /// Returns the front order once it has been fully consumed and popped,
    /// or `None` while it still has quantity left (or the level is empty).
    ///
    /// # Panics
    /// Panics if `quantity` exceeds the front order's remaining quantity
    pub fn fill_front(&mut self, quantity: Quantity) -> Option<Order> {
        let front = self.orders.front_mut()?;
        front.apply_fill(quantity);
        self.total_quantity -= quantity;

        if front.is_filled() {
            self.orders.pop_front()
        } else {
            None
        }
    }

    /// Order at `position`, 0 being the oldest
    pub fn get(&self, position: usize) -> Option<&Order> {
        self.orders.get(position)
    }

    /// Iterate oldest-first
    pub fn iter(&self) -> impl Iterator<Item = &Order> + '_ {
        self.orders.iter()
    }

    /// Check if the price level is empty
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Get the total quantity at this price level
    pub fn total_quantity(&self) -> Quantity {
        self.total_quantity
    }

    /// Get the number of orders at this level
    pub fn order_count(&self) -> usize {
        self.orders.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lob_types::ids::OrderId;
    use lob_types::order::Side;

    fn ask(id: u64, qty: i64) -> Order {
        Order::limit(
            OrderId::new(id),
            Side::Sell,
            Price::from_ticks(101),
            Quantity::from_units(qty),
            id as i64,
        )
    }

    #[test]
    fn test_price_level_push_back_positions() {
        let mut level = PriceLevel::new(Price::from_ticks(101));

        assert_eq!(level.push_back(ask(1, 5)), 0);
        assert_eq!(level.push_back(ask(2, 3)), 1);

        assert_eq!(level.order_count(), 2);
        assert_eq!(level.total_quantity(), Quantity::from_units(8));
        assert!(!level.is_empty());
    }

    #[test]
    fn test_price_level_fifo_order() {
        let mut level = PriceLevel::new(Price::from_ticks(101));
        level.push_back(ask(1, 1));
        level.push_back(ask(2, 2));
        level.push_back(ask(3, 3));

        let ids: Vec<u64> = level.iter().map(|o| o.order_id.get()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(level.front().unwrap().order_id, OrderId::new(1));
    }

    #[test]
    fn test_price_level_remove_middle() {
        let mut level = PriceLevel::new(Price::from_ticks(101));
        level.push_back(ask(1, 1));
        level.push_back(ask(2, 2));
        level.push_back(ask(3, 3));

        let removed = level.remove_at(1).unwrap();
        assert_eq!(removed.order_id, OrderId::new(2));
        assert_eq!(level.get(1).unwrap().order_id, OrderId::new(3));
        assert_eq!(level.total_quantity(), Quantity::from_units(4));
        assert!(level.remove_at(5).is_none());
    }

    #[test]
    fn test_price_level_fill_front_partial_then_full() {
        let mut level = PriceLevel::new(Price::from_ticks(101));
        level.push_back(ask(1, 5));
        level.push_back(ask(2, 5));

        assert!(level.fill_front(Quantity::from_units(3)).is_none());
        assert_eq!(level.front().unwrap().quantity, Quantity::from_units(2));
        assert_eq!(level.total_quantity(), Quantity::from_units(7));

        let done = level.fill_front(Quantity::from_units(2)).unwrap();
        assert_eq!(done.order_id, OrderId::new(1));
        assert!(done.is_filled());
        assert_eq!(level.order_count(), 1);
        assert_eq!(level.total_quantity(), Quantity::from_units(5));
    }

    #[test]
    fn test_price_level_pop_front() {
        let mut level = PriceLevel::new(Price::from_ticks(101));
        level.push_back(ask(1, 4));

        let popped = level.pop_front().unwrap();
        assert_eq!(popped.order_id, OrderId::new(1));
        assert!(level.is_empty());
        assert_eq!(level.total_quantity(), Quantity::zero());
    }
}
