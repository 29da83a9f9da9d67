//! Integer tick/unit types for prices and quantities
//!
//! Prices are whole ticks and quantities are whole units. No fractional
//! rounding ever happens, so quantity is conserved exactly across fills.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};

/// Simulation clock in nanoseconds. Opaque to the book and engine.
pub type Timestamp = i64;

/// Price in integer ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(i64);

impl Price {
    /// Tick value callers use to mean "no price" when they cannot carry an `Option`
    pub const NONE_SENTINEL: i64 = 0;

    pub const fn from_ticks(ticks: i64) -> Self {
        Self(ticks)
    }

    pub const fn ticks(&self) -> i64 {
        self.0
    }

    /// A limit price must be strictly positive
    pub fn is_valid(&self) -> bool {
        self.0 > 0
    }

    /// Flatten an optional price into ticks, using [`Price::NONE_SENTINEL`] for `None`
    pub fn or_sentinel(price: Option<Price>) -> i64 {
        price.map_or(Self::NONE_SENTINEL, |p| p.0)
    }

    /// Floor average of two prices, exact over the whole tick range
    pub fn midpoint(a: Price, b: Price) -> Price {
        Price((a.0 >> 1) + (b.0 >> 1) + (a.0 & b.0 & 1))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for Price {
    fn from(ticks: i64) -> Self {
        Self(ticks)
    }
}

/// Quantity in whole units
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Quantity(i64);

impl Quantity {
    pub const ZERO: Quantity = Quantity(0);

    pub const fn from_units(units: i64) -> Self {
        Self(units)
    }

    pub const fn units(&self) -> i64 {
        self.0
    }

    pub fn zero() -> Self {
        Self::ZERO
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Orders must carry a strictly positive quantity
    pub fn is_valid(&self) -> bool {
        self.0 > 0
    }

    /// `None` when the sum does not fit in a quantity
    pub fn checked_add(self, rhs: Quantity) -> Option<Quantity> {
        self.0.checked_add(rhs.0).map(Quantity)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for Quantity {
    fn from(units: i64) -> Self {
        Self(units)
    }
}

impl Add for Quantity {
    type Output = Quantity;

    fn add(self, rhs: Quantity) -> Quantity {
        Quantity(self.0 + rhs.0)
    }
}

impl AddAssign for Quantity {
    fn add_assign(&mut self, rhs: Quantity) {
        self.0 += rhs.0;
    }
}

impl Sub for Quantity {
    type Output = Quantity;

    fn sub(self, rhs: Quantity) -> Quantity {
        Quantity(self.0 - rhs.0)
    }
}

impl SubAssign for Quantity {
    fn sub_assign(&mut self, rhs: Quantity) {
        self.0 -= rhs.0;
    }
}

impl std::iter::Sum for Quantity {
    fn sum<I: Iterator<Item = Quantity>>(iter: I) -> Self {
        iter.fold(Quantity::ZERO, |acc, q| acc + q)
    }
}
