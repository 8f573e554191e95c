// ============================================================================
// Trade Domain Model
// ============================================================================

use chrono::{DateTime, Utc};
use std::fmt;

use super::{Order, OrderId};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Engine-assigned trade identifier: `TRADE-` followed by an 8-digit
/// zero-padded sequence number, monotonically increasing per book.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TradeId(String);

impl TradeId {
    pub(crate) fn from_seq(seq: u64) -> Self {
        Self(format!("TRADE-{seq:08}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TradeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A recorded match between one buy order and one sell order.
///
/// Immutable once created; the book's trade log owns the originals and
/// hands out clones.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Trade {
    pub trade_id: TradeId,
    pub buy_order_id: OrderId,
    pub buy_user_id: String,
    pub sell_order_id: OrderId,
    pub sell_user_id: String,
    /// Executed quantity, always positive.
    pub size: u64,
    /// Execution price: the resting order's limit price.
    pub price: f64,
    pub timestamp: DateTime<Utc>,
}

impl Trade {
    /// Builds a trade from the incoming order and the counterparty snapshot
    /// produced by a fill. Buyer and seller fields are selected by the
    /// incoming order's side; the price is the counterparty's (resting)
    /// price.
    pub(crate) fn from_fill(
        trade_id: TradeId,
        incoming: &Order,
        counterparty: &Order,
        size: u64,
    ) -> Self {
        let (buyer, seller) = if incoming.is_buy() {
            (incoming, counterparty)
        } else {
            (counterparty, incoming)
        };
        Self {
            trade_id,
            buy_order_id: buyer.order_id.clone(),
            buy_user_id: buyer.user_id.clone(),
            sell_order_id: seller.order_id.clone(),
            sell_user_id: seller.user_id.clone(),
            size,
            price: counterparty.price,
            timestamp: Utc::now(),
        }
    }

    /// Notional value of the trade (price × size).
    pub fn notional(&self) -> f64 {
        self.price * self.size as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Side;

    #[test]
    fn test_trade_id_format() {
        assert_eq!(TradeId::from_seq(0).as_str(), "TRADE-00000000");
        assert_eq!(TradeId::from_seq(42).as_str(), "TRADE-00000042");
        assert_eq!(TradeId::from_seq(99_999_999).as_str(), "TRADE-99999999");
    }

    #[test]
    fn test_from_fill_incoming_buyer() {
        let incoming = Order::new("bid-1", "buyer", Side::Buy, 101.0, 50);
        let resting = Order::new("ask-1", "seller", Side::Sell, 100.0, 50);

        let trade = Trade::from_fill(TradeId::from_seq(0), &incoming, &resting, 50);
        assert_eq!(trade.buy_order_id.as_str(), "bid-1");
        assert_eq!(trade.buy_user_id, "buyer");
        assert_eq!(trade.sell_order_id.as_str(), "ask-1");
        assert_eq!(trade.sell_user_id, "seller");
        // Resting side sets the trade price.
        assert_eq!(trade.price, 100.0);
        assert_eq!(trade.size, 50);
    }

    #[test]
    fn test_from_fill_incoming_seller() {
        let incoming = Order::new("ask-9", "seller", Side::Sell, 99.0, 10);
        let resting = Order::new("bid-9", "buyer", Side::Buy, 99.5, 10);

        let trade = Trade::from_fill(TradeId::from_seq(7), &incoming, &resting, 10);
        assert_eq!(trade.buy_order_id.as_str(), "bid-9");
        assert_eq!(trade.sell_order_id.as_str(), "ask-9");
        assert_eq!(trade.price, 99.5);
    }

    #[test]
    fn test_notional() {
        let incoming = Order::new("b", "u1", Side::Buy, 101.0, 3);
        let resting = Order::new("s", "u2", Side::Sell, 100.0, 3);
        let trade = Trade::from_fill(TradeId::from_seq(1), &incoming, &resting, 3);
        assert_eq!(trade.notional(), 300.0);
    }
}
