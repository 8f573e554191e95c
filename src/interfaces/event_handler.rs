// ============================================================================
// Event Handler Interface
// Defines the contract for observing book activity
// ============================================================================

use chrono::{DateTime, Utc};

use crate::domain::{OrderId, Trade};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Events emitted by the book while processing submissions and cancels
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BookEvent {
    /// Order failed admission and was not applied to the book
    OrderRejected {
        order_id: OrderId,
        reason: String,
        timestamp: DateTime<Utc>,
    },

    /// A fill was executed and recorded in the trade log
    TradeExecuted { trade: Trade },

    /// The incoming order was fully consumed by matching
    OrderFilled {
        order_id: OrderId,
        total_filled: u64,
        timestamp: DateTime<Utc>,
    },

    /// Unfilled remainder was placed on the book
    OrderRested {
        order_id: OrderId,
        price: f64,
        quantity: u64,
        timestamp: DateTime<Utc>,
    },

    /// A resting order was cancelled
    OrderCancelled {
        order_id: OrderId,
        timestamp: DateTime<Utc>,
    },
}

/// Event handler trait for processing book events
/// Implementations can handle logging, metrics, notifications, etc.
pub trait EventHandler: Send + Sync {
    /// Handle a book event
    fn on_event(&self, event: BookEvent);

    /// Batch event handler (optional optimization)
    fn on_events(&self, events: Vec<BookEvent>) {
        for event in events {
            self.on_event(event);
        }
    }
}

/// No-op event handler for testing
pub struct NoOpEventHandler;

impl EventHandler for NoOpEventHandler {
    fn on_event(&self, _event: BookEvent) {
        // Do nothing
    }
}

/// Logging event handler
pub struct LoggingEventHandler;

impl EventHandler for LoggingEventHandler {
    fn on_event(&self, event: BookEvent) {
        tracing::debug!("book event: {:?}", event);
    }
}
