// ============================================================================
// Order Book Engine
// Routes incoming orders across the two sides and records trades
// ============================================================================

use chrono::Utc;
use std::sync::Arc;

use crate::book::{BookSide, LevelView};
use crate::domain::{BookConfig, BookError, BookResult, Order, Side, Trade, TradeId};
use crate::interfaces::{BookEvent, EventHandler, NoOpEventHandler};

/// A single-instrument limit order book with continuous-auction matching.
///
/// The book owns a bid side, an ask side and an append-only trade log.
/// Incoming orders execute against the opposite side under price-time
/// priority; any unfilled remainder rests on the same side. All methods are
/// synchronous and the book expects exclusive access: callers serialize
/// submissions, one writer per book.
pub struct Book {
    config: BookConfig,
    bids: BookSide,
    asks: BookSide,
    trade_log: Vec<Trade>,
    trade_seq: u64,
    event_handler: Arc<dyn EventHandler>,
}

impl Book {
    /// Creates a book with the default configuration and no event handler.
    pub fn new() -> Self {
        Self::build(BookConfig::default(), Arc::new(NoOpEventHandler))
    }

    /// Creates a book from a validated configuration.
    pub fn with_config(config: BookConfig) -> BookResult<Self> {
        config.validate().map_err(BookError::InvalidConfig)?;
        Ok(Self::build(config, Arc::new(NoOpEventHandler)))
    }

    /// Builder method: attach an event handler.
    pub fn with_event_handler(mut self, event_handler: Arc<dyn EventHandler>) -> Self {
        self.event_handler = event_handler;
        self
    }

    fn build(config: BookConfig, event_handler: Arc<dyn EventHandler>) -> Self {
        let bids = BookSide::with_config(true, &config);
        let asks = BookSide::with_config(false, &config);
        Self {
            config,
            bids,
            asks,
            trade_log: Vec::new(),
            trade_seq: 0,
            event_handler,
        }
    }

    pub fn instrument(&self) -> &str {
        &self.config.instrument
    }

    /// Submits a limit order. The order crosses against the opposite side;
    /// each fill is recorded as a trade at the resting order's price and the
    /// generated trade ids are returned in execution order. Any remainder
    /// rests on the book.
    ///
    /// Fails without touching the book when the order is malformed or when
    /// its id is already active on either side.
    pub fn submit(&mut self, order: Order) -> BookResult<Vec<TradeId>> {
        if let Err(reason) = validate_order(&order) {
            self.event_handler.on_event(BookEvent::OrderRejected {
                order_id: order.order_id.clone(),
                reason: reason.clone(),
                timestamp: Utc::now(),
            });
            return Err(BookError::InvalidOrder(reason));
        }

        let id = order.order_id.as_str();
        if self.bids.contains_order(id) || self.asks.contains_order(id) {
            self.event_handler.on_event(BookEvent::OrderRejected {
                order_id: order.order_id.clone(),
                reason: "duplicate order id".to_string(),
                timestamp: Utc::now(),
            });
            return Err(BookError::DuplicateOrderId(order.order_id));
        }

        let mut incoming = order;
        let fills = self
            .side_mut(incoming.side.opposite())
            .execute_against(&mut incoming);

        let mut events = Vec::with_capacity(fills.len() + 1);
        let mut trade_ids = Vec::with_capacity(fills.len());
        let mut total_filled = 0u64;
        for fill in &fills {
            let trade_id = TradeId::from_seq(self.trade_seq);
            self.trade_seq += 1;

            let trade = Trade::from_fill(trade_id.clone(), &incoming, &fill.counterparty, fill.size);
            events.push(BookEvent::TradeExecuted {
                trade: trade.clone(),
            });
            self.trade_log.push(trade);
            trade_ids.push(trade_id);
            total_filled += fill.size;
        }

        if incoming.quantity > 0 {
            events.push(BookEvent::OrderRested {
                order_id: incoming.order_id.clone(),
                price: incoming.price,
                quantity: incoming.quantity,
                timestamp: Utc::now(),
            });
            self.side_mut(incoming.side).add_resting(incoming);
        } else {
            events.push(BookEvent::OrderFilled {
                order_id: incoming.order_id.clone(),
                total_filled,
                timestamp: Utc::now(),
            });
        }

        self.event_handler.on_events(events);
        Ok(trade_ids)
    }

    /// Cancels a resting order by id, trying the bid side first. Returns
    /// `false` when the id is unknown; a repeated cancel is a no-op.
    pub fn cancel(&mut self, order_id: &str) -> bool {
        let removed = self.bids.cancel(order_id) || self.asks.cancel(order_id);
        if removed {
            self.event_handler.on_event(BookEvent::OrderCancelled {
                order_id: order_id.into(),
                timestamp: Utc::now(),
            });
        }
        removed
    }

    /// Highest bid price, or `0.0` when no bids rest.
    pub fn best_bid(&self) -> f64 {
        self.bids.best_price().unwrap_or(0.0)
    }

    /// Lowest ask price, or `0.0` when no asks rest.
    pub fn best_ask(&self) -> f64 {
        self.asks.best_price().unwrap_or(0.0)
    }

    /// Top `k` levels of both sides (bids descending, asks ascending);
    /// `k == 0` returns every level.
    pub fn depth(&self, k: usize) -> (Vec<LevelView>, Vec<LevelView>) {
        (self.bids.depth(k), self.asks.depth(k))
    }

    /// Snapshot of all executed trades in chronological order.
    pub fn trades(&self) -> Vec<Trade> {
        self.trade_log.clone()
    }

    pub fn trade_count(&self) -> usize {
        self.trade_log.len()
    }

    /// Looks up a trade by id. Linear over the log, which is acceptable for
    /// the volumes a single in-memory book sees.
    pub fn trade_by_id(&self, trade_id: &str) -> Option<&Trade> {
        self.trade_log
            .iter()
            .find(|t| t.trade_id.as_str() == trade_id)
    }

    pub fn bids(&self) -> &BookSide {
        &self.bids
    }

    pub fn asks(&self) -> &BookSide {
        &self.asks
    }

    fn side_mut(&mut self, side: Side) -> &mut BookSide {
        match side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        }
    }
}

impl Default for Book {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_order(order: &Order) -> Result<(), String> {
    if order.quantity == 0 {
        return Err("quantity must be positive".to_string());
    }
    if !order.price.is_finite() {
        return Err("price must be finite".to_string());
    }
    if order.price <= 0.0 {
        return Err("price must be positive".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bid(id: &str, price: f64, quantity: u64) -> Order {
        Order::new(id, "buyer", Side::Buy, price, quantity)
    }

    fn ask(id: &str, price: f64, quantity: u64) -> Order {
        Order::new(id, "seller", Side::Sell, price, quantity)
    }

    #[test]
    fn test_non_crossing_orders_rest() {
        let mut book = Book::new();
        assert_eq!(book.submit(ask("ask1", 101.0, 100)).unwrap(), vec![]);
        assert_eq!(book.submit(bid("bid1", 99.0, 50)).unwrap(), vec![]);

        assert!(book.trades().is_empty());
        assert_eq!(book.best_bid(), 99.0);
        assert_eq!(book.best_ask(), 101.0);
    }

    #[test]
    fn test_crossing_generates_trade_at_resting_price() {
        let mut book = Book::new();
        book.submit(ask("ask1", 100.0, 100)).unwrap();
        let ids = book.submit(bid("bid1", 101.0, 50)).unwrap();

        assert_eq!(ids.len(), 1);
        let trades = book.trades();
        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0].size, 50);
        assert_eq!(trades[0].price, 100.0);
        assert_eq!(trades[0].buy_order_id.as_str(), "bid1");
        assert_eq!(trades[0].sell_order_id.as_str(), "ask1");

        // 50 remains on the ask; the bid was fully filled.
        assert_eq!(book.best_ask(), 100.0);
        assert_eq!(book.best_bid(), 0.0);
    }

    #[test]
    fn test_remainder_rests_after_consuming_book() {
        let mut book = Book::new();
        book.submit(ask("ask1", 100.0, 100)).unwrap();
        book.submit(bid("bid1", 101.0, 50)).unwrap();

        let ids = book.submit(bid("bid2", 101.0, 100)).unwrap();
        assert_eq!(ids.len(), 1);
        assert_eq!(book.trades().len(), 2);
        assert_eq!(book.trades()[1].size, 50);

        assert_eq!(book.best_ask(), 0.0);
        assert_eq!(book.best_bid(), 101.0);
        assert_eq!(book.bids().get_order("bid2").map(|o| o.quantity), Some(50));
    }

    #[test]
    fn test_trade_ids_are_sequential() {
        let mut book = Book::new();
        book.submit(ask("a1", 100.0, 10)).unwrap();
        book.submit(ask("a2", 100.0, 10)).unwrap();
        let ids = book.submit(bid("b1", 100.0, 20)).unwrap();

        let ids: Vec<&str> = ids.iter().map(TradeId::as_str).collect();
        assert_eq!(ids, vec!["TRADE-00000000", "TRADE-00000001"]);
    }

    #[test]
    fn test_cancel_then_no_fill() {
        let mut book = Book::new();
        book.submit(bid("bid1", 99.0, 100)).unwrap();
        assert!(book.cancel("bid1"));

        let ids = book.submit(ask("ask1", 99.0, 10)).unwrap();
        assert!(ids.is_empty());
        assert!(book.trades().is_empty());
        assert_eq!(book.best_ask(), 99.0);
    }

    #[test]
    fn test_cancel_unknown_and_repeat() {
        let mut book = Book::new();
        assert!(!book.cancel("ghost"));
        book.submit(bid("bid1", 99.0, 100)).unwrap();
        assert!(book.cancel("bid1"));
        assert!(!book.cancel("bid1"));
    }

    #[test]
    fn test_rejects_invalid_orders() {
        let mut book = Book::new();
        assert!(matches!(
            book.submit(bid("b1", 99.0, 0)),
            Err(BookError::InvalidOrder(_))
        ));
        assert!(matches!(
            book.submit(bid("b2", -1.0, 10)),
            Err(BookError::InvalidOrder(_))
        ));
        assert!(matches!(
            book.submit(bid("b3", f64::NAN, 10)),
            Err(BookError::InvalidOrder(_))
        ));
        assert_eq!(book.bids().order_count(), 0);
    }

    #[test]
    fn test_rejects_duplicate_active_id() {
        let mut book = Book::new();
        book.submit(bid("ord-1", 99.0, 10)).unwrap();
        assert!(matches!(
            book.submit(bid("ord-1", 98.0, 10)),
            Err(BookError::DuplicateOrderId(_))
        ));
        // The original order is untouched.
        assert_eq!(book.bids().get_order("ord-1").map(|o| o.price), Some(99.0));

        // Once the order leaves the book the id may be reused.
        assert!(book.cancel("ord-1"));
        assert!(book.submit(bid("ord-1", 98.0, 10)).is_ok());
    }

    #[test]
    fn test_trade_by_id() {
        let mut book = Book::new();
        book.submit(ask("a1", 100.0, 10)).unwrap();
        let ids = book.submit(bid("b1", 100.0, 10)).unwrap();

        let trade = book.trade_by_id(ids[0].as_str()).expect("trade recorded");
        assert_eq!(trade.size, 10);
        assert!(book.trade_by_id("TRADE-99999999").is_none());
    }

    #[test]
    fn test_trades_snapshot_is_stable() {
        let mut book = Book::new();
        book.submit(ask("a1", 100.0, 10)).unwrap();
        book.submit(bid("b1", 100.0, 10)).unwrap();

        let before = book.trades();
        book.submit(ask("a2", 100.0, 5)).unwrap();
        book.submit(bid("b2", 100.0, 5)).unwrap();
        let after = book.trades();

        assert_eq!(after.len(), 2);
        assert_eq!(after[0], before[0]);
    }

    #[test]
    fn test_depth_query() {
        let mut book = Book::new();
        for (id, price) in [("b1", 95.0), ("b2", 96.0), ("b3", 97.0), ("b4", 98.0)] {
            book.submit(bid(id, price, 10)).unwrap();
        }
        for (id, price) in [("a1", 100.0), ("a2", 101.0), ("a3", 102.0), ("a4", 103.0)] {
            book.submit(ask(id, price, 10)).unwrap();
        }

        let (bids, asks) = book.depth(2);
        assert_eq!(bids.iter().map(|v| v.price).collect::<Vec<_>>(), vec![98.0, 97.0]);
        assert_eq!(asks.iter().map(|v| v.price).collect::<Vec<_>>(), vec![100.0, 101.0]);

        let (bids, asks) = book.depth(0);
        assert_eq!(bids.len(), 4);
        assert_eq!(asks.len(), 4);
    }

    #[test]
    fn test_with_config() {
        let book = Book::with_config(BookConfig::new("ACME")).unwrap();
        assert_eq!(book.instrument(), "ACME");

        assert!(matches!(
            Book::with_config(BookConfig::new("")),
            Err(BookError::InvalidConfig(_))
        ));
    }
}
