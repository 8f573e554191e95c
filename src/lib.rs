// ============================================================================
// Limit Book Library
// Single-instrument limit order book with price-time priority matching
// ============================================================================

//! # Limit Book
//!
//! An in-memory limit order book for a single instrument, with an
//! integrated continuous-auction matching engine.
//!
//! ## Features
//!
//! - **Price-time priority matching**: best price first, FIFO within a
//!   price level
//! - **AVL-indexed price levels** with O(log n) best-price selection and
//!   rebalance-stable cursors for depth traversal
//! - **O(1) cancellation** through a per-side order-id index
//! - **Append-only trade log** with per-book sequential trade ids
//! - **Event seam** for observing fills, rests and cancels
//!
//! Prices are `f64` and are compared by exact equality inside the price
//! index; production deployments that need tick-safe arithmetic should
//! quantize prices before submission.
//!
//! ## Example
//! ```rust
//! use limit_book::prelude::*;
//!
//! let mut book = Book::new();
//!
//! book.submit(Order::new("ask-1", "alice", Side::Sell, 100.0, 100)).unwrap();
//! let trades = book.submit(Order::new("bid-1", "bob", Side::Buy, 101.0, 50)).unwrap();
//!
//! assert_eq!(trades.len(), 1);
//! assert_eq!(book.best_ask(), 100.0); // 50 still resting
//! assert_eq!(book.trades()[0].price, 100.0); // resting side sets the price
//! ```

pub mod book;
pub mod collections;
pub mod domain;
pub mod engine;
pub mod interfaces;

// Re-exports for convenience
pub mod prelude {
    pub use crate::book::{BookSide, Fill, LevelView, PriceLevel};
    pub use crate::domain::{
        BookConfig, BookError, BookResult, Order, OrderId, Side, Trade, TradeId,
    };
    pub use crate::engine::Book;
    pub use crate::interfaces::{BookEvent, EventHandler, LoggingEventHandler, NoOpEventHandler};
}
