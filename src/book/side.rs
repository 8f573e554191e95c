// ============================================================================
// Book Side
// One side of the book: sorted price levels plus the order-id index
// ============================================================================

use crate::collections::{IdIndex, Iter, OrderedMap};
use crate::domain::{BookConfig, Order};

use super::PriceLevel;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One executed portion of an incoming order against a single resting
/// counterparty. `counterparty` is a snapshot taken at fill time whose
/// `quantity` equals the fill size.
#[derive(Debug, Clone)]
pub struct Fill {
    pub counterparty: Order,
    pub size: u64,
}

/// Aggregate view of one price level, as returned by depth queries.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LevelView {
    pub price: f64,
    pub size: u64,
}

/// One side (bid or ask) of the order book.
///
/// Levels are owned by the sorted price map; the id index stores
/// `order_id -> price` and resolves to the owning level through the map, so
/// evicting a level can never leave a dangling reference behind.
#[derive(Debug)]
pub struct BookSide {
    levels: OrderedMap<PriceLevel>,
    order_index: IdIndex<f64>,
    is_buy_side: bool,
}

impl BookSide {
    pub fn new(is_buy_side: bool) -> Self {
        Self::with_config(is_buy_side, &BookConfig::default())
    }

    pub fn with_config(is_buy_side: bool, config: &BookConfig) -> Self {
        Self {
            levels: OrderedMap::new(),
            order_index: IdIndex::with_capacity(config.id_index_capacity),
            is_buy_side,
        }
    }

    pub fn is_buy_side(&self) -> bool {
        self.is_buy_side
    }

    /// Number of resting orders on this side.
    pub fn order_count(&self) -> usize {
        self.order_index.len()
    }

    /// Number of populated price levels.
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn contains_order(&self, order_id: &str) -> bool {
        self.order_index.contains_key(order_id)
    }

    /// Rests an order on this side: locates or creates the price level and
    /// registers the order id.
    pub fn add_resting(&mut self, order: Order) {
        let price = order.price;
        let order_id = order.order_id.clone();

        match self.levels.get_mut(price) {
            Some(level) => level.add_order(order),
            None => {
                let mut level = PriceLevel::new(price);
                level.add_order(order);
                self.levels.insert(price, level);
            }
        }

        self.order_index.insert(order_id.as_str(), price);
    }

    /// Resolves an order id to the resting order, without mutation.
    pub fn get_order(&self, order_id: &str) -> Option<&Order> {
        let price = *self.order_index.get(order_id)?;
        self.levels.get(price)?.find_by_id(order_id)
    }

    /// Cancels a resting order by id. The level is evicted atomically with
    /// the removal that emptied it.
    pub fn cancel(&mut self, order_id: &str) -> bool {
        let price = match self.order_index.get(order_id) {
            Some(price) => *price,
            None => return false,
        };
        let Some(level) = self.levels.get_mut(price) else {
            return false;
        };
        if !level.delete_by_id(order_id) {
            return false;
        }
        let now_empty = level.is_empty();
        self.order_index.remove(order_id);
        if now_empty {
            self.levels.remove(price);
        }
        true
    }

    /// Executes an incoming order from the opposite side against this side's
    /// resting liquidity, consuming the most competitive levels first and
    /// the oldest orders first within each level.
    ///
    /// `incoming.quantity` is decremented in place by the filled amount; the
    /// returned fills are in execution order. Fully consumed counterparties
    /// are dropped from the id index, and a level is evicted as soon as its
    /// queue empties.
    pub fn execute_against(&mut self, incoming: &mut Order) -> Vec<Fill> {
        let mut fills = Vec::new();

        while incoming.quantity > 0 && !self.levels.is_empty() {
            let best = if self.is_buy_side {
                self.levels.max()
            } else {
                self.levels.min()
            };
            let price = match best {
                Some((price, _)) => price,
                None => break,
            };
            if !self.crosses(price, incoming.price) {
                break;
            }

            let Some(level) = self.levels.get_mut(price) else {
                break;
            };
            while incoming.quantity > 0 && !level.is_empty() {
                let head_quantity = match level.peek_head() {
                    Some(head) => head.quantity,
                    None => break,
                };
                let fill = head_quantity.min(incoming.quantity);

                let counterparty = if fill == head_quantity {
                    let Some(order) = level.pop_head() else { break };
                    self.order_index.remove(order.order_id.as_str());
                    order
                } else {
                    let Some(snapshot) = level.reduce_head(fill) else {
                        break;
                    };
                    snapshot
                };

                incoming.quantity -= fill;
                fills.push(Fill {
                    counterparty,
                    size: fill,
                });
            }

            if level.is_empty() {
                self.levels.remove(price);
            }
        }

        fills
    }

    /// Most competitive price: the maximum for the buy side, the minimum
    /// for the sell side.
    pub fn best_price(&self) -> Option<f64> {
        let entry = if self.is_buy_side {
            self.levels.max()
        } else {
            self.levels.min()
        };
        entry.map(|(price, _)| price)
    }

    /// Top `k` levels in competitiveness order (descending price for bids,
    /// ascending for asks). `k == 0` returns all levels.
    pub fn depth(&self, k: usize) -> Vec<LevelView> {
        let take = if k == 0 {
            self.levels.len()
        } else {
            k.min(self.levels.len())
        };
        let mut views = Vec::with_capacity(take);

        let mut cursor = if self.is_buy_side {
            self.levels.back()
        } else {
            self.levels.front()
        };
        while views.len() < take {
            match cursor.get() {
                Some((price, level)) => views.push(LevelView {
                    price,
                    size: level.total_quantity(),
                }),
                None => break,
            }
            let advanced = if self.is_buy_side {
                cursor.prev()
            } else {
                cursor.next()
            };
            if !advanced {
                break;
            }
        }

        views
    }

    /// Levels in ascending price order.
    pub fn levels(&self) -> Iter<'_, PriceLevel> {
        self.levels.iter()
    }

    /// Whether a resting level at `level_price` crosses an incoming order
    /// limited at `incoming_price`. Equality crosses on both sides.
    fn crosses(&self, level_price: f64, incoming_price: f64) -> bool {
        if self.is_buy_side {
            level_price >= incoming_price
        } else {
            level_price <= incoming_price
        }
    }
}
