//! Order node for slab-based storage.
//!
//! ## Design
//!
//! `OrderNode` wraps an `Order` with doubly-linked list pointers so that an
//! order can be unlinked from its price level in O(1) given only its slab key.
//!
//! ## Slab Integration
//!
//! Per the slab docs (https://docs.rs/slab/0.4.11):
//! - Keys are `usize` values returned by `slab.insert()`
//! - Keys may be reused after `slab.remove()`
//! - O(1) insert, remove, and lookup
//!
//! ## Linked List
//!
//! Orders at the same price level form a doubly-linked list:
//! - `next`: the order queued behind this one (later update time)
//! - `prev`: the order queued ahead of this one (earlier update time)

use crate::types::Order;

/// Order node stored in the slab.
///
/// The pointers are slab keys (`usize`), not direct references.
#[derive(Debug, Clone)]
pub struct OrderNode {
    /// The actual order data
    pub order: Order,

    /// Next order in the price level queue (slab key)
    /// None if this is the tail (lowest priority)
    pub next: Option<usize>,

    /// Previous order in the price level queue (slab key)
    /// None if this is the head (highest priority)
    pub prev: Option<usize>,
}

impl OrderNode {
    /// Create a new order node (not yet linked)
    ///
    /// ```
    /// use price_time_book::orderbook::OrderNode;
    /// use price_time_book::types::{Order, Side};
    ///
    /// let node = OrderNode::new(Order::new("A", Side::Bid, 5_000_000_000, 100, 0));
    ///
    /// assert!(node.is_unlinked());
    /// ```
    #[inline]
    pub fn new(order: Order) -> Self {
        Self {
            order,
            next: None,
            prev: None,
        }
    }

    /// Check if this node has no neighbours
    ///
    /// A node that is the only order at its level is also unlinked.
    #[inline]
    pub fn is_unlinked(&self) -> bool {
        self.next.is_none() && self.prev.is_none()
    }

    #[inline]
    pub fn order_id(&self) -> &str {
        &self.order.id
    }

    #[inline]
    pub fn price(&self) -> u64 {
        self.order.price
    }

    #[inline]
    pub fn quantity(&self) -> u64 {
        self.order.quantity
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Side;

    #[test]
    fn test_order_node_new() {
        let order = Order::new("A", Side::Ask, 5_500_000_000, 400, 7);
        let node = OrderNode::new(order.clone());

        assert_eq!(node.order, order);
        assert!(node.is_unlinked());
    }

    #[test]
    fn test_order_node_accessors() {
        let node = OrderNode::new(Order::new("A42", Side::Bid, 5_000_000_000, 300, 0));

        assert_eq!(node.order_id(), "A42");
        assert_eq!(node.price(), 5_000_000_000);
        assert_eq!(node.quantity(), 300);
    }

    #[test]
    fn test_order_node_linking() {
        let mut node = OrderNode::new(Order::new("A", Side::Bid, 1, 1, 0));

        node.next = Some(2);
        assert!(!node.is_unlinked());

        node.next = None;
        node.prev = Some(0);
        assert!(!node.is_unlinked());

        node.prev = None;
        assert!(node.is_unlinked());
    }
}
