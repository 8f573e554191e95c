// ============================================================================
// Collections Module
// Purpose-built indexes backing the order book sides
// ============================================================================
//
// This module provides:
// - OrderedMap<V>: AVL-balanced sorted map keyed by f64 price
// - IdIndex<V>: separate-chaining hash table keyed by string identifiers
//
// Design principles:
// - The map OWNS its values; secondary indexes resolve through map keys
//   instead of holding references
// - Key-based cursors that survive tree rebalancing
// - Exact (bitwise) equality on price keys

mod id_index;
mod ordered_map;

pub use id_index::IdIndex;
pub use ordered_map::{Cursor, Iter, OrderedMap};
