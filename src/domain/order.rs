// ============================================================================
// Order Domain Model
// ============================================================================

use chrono::{DateTime, Utc};
use std::fmt;
use uuid::Uuid;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// Value Objects
// ============================================================================

/// Opaque order identifier. Callers normally supply their own 36-character
/// ids; [`OrderId::generate`] mints a fresh UUIDv4-formatted one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OrderId(String);

impl OrderId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OrderId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for OrderId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// The side an incoming order executes against.
    pub fn opposite(self) -> Side {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => f.write_str("buy"),
            Side::Sell => f.write_str("sell"),
        }
    }
}

// ============================================================================
// Order Entity
// ============================================================================

/// A day limit order. Orders are copied by value at the book boundary; the
/// copy the book retains is the resting order, and its `quantity` shrinks as
/// fills execute against it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Order {
    pub order_id: OrderId,
    pub user_id: String,
    pub side: Side,
    /// Limit price. Compared by exact `f64` equality inside the book's
    /// price index; must be finite and positive.
    pub price: f64,
    /// Remaining quantity, positive at admission.
    pub quantity: u64,
    pub timestamp: DateTime<Utc>,
}

impl Order {
    pub fn new(
        order_id: impl Into<OrderId>,
        user_id: impl Into<String>,
        side: Side,
        price: f64,
        quantity: u64,
    ) -> Self {
        Self {
            order_id: order_id.into(),
            user_id: user_id.into(),
            side,
            price,
            quantity,
            timestamp: Utc::now(),
        }
    }

    /// Overrides the admission timestamp (replay and tests).
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn is_buy(&self) -> bool {
        self.side == Side::Buy
    }
}
