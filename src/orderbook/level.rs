//! Price level management for orders at the same price.
//!
//! ## Design
//!
//! A `PriceLevel` represents all orders on one side at a single price.
//! Orders are kept in a doubly-linked list threaded through the slab, in
//! priority order (earliest update time first).
//!
//! ## Queue Structure
//!
//! ```text
//! head (first in line) <-> order2 <-> order3 <-> tail (last in line)
//! ```
//!
//! - New and requeued orders are appended at the tail
//! - Any order can be removed in O(1) using the slab key
//! - Quantity reductions happen in place and do not touch the links

use slab::Slab;

use crate::orderbook::OrderNode;
use crate::types::Order;

/// A price level containing orders at a single price.
///
/// The order data lives in the slab; this struct only holds the queue
/// metadata and running totals.
#[derive(Debug, Clone)]
pub struct PriceLevel {
    /// Price for this level (fixed-point, scaled by 10^8)
    pub price: u64,

    /// Sum of the quantities of all orders at this level
    ///
    /// Widened to u128 so any number of u64 quantities sums exactly.
    pub total_quantity: u128,

    /// Head of the queue (highest priority, slab key)
    pub head: Option<usize>,

    /// Tail of the queue (lowest priority, slab key)
    pub tail: Option<usize>,

    /// Number of orders at this price level
    pub order_count: usize,
}

impl PriceLevel {
    /// Create a new empty price level
    pub fn new(price: u64) -> Self {
        Self {
            price,
            total_quantity: 0,
            head: None,
            tail: None,
            order_count: 0,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order_count == 0
    }

    /// Append an order to the tail of the queue
    ///
    /// # Panics
    ///
    /// Panics if `key` (or the current tail) is not in the slab
    pub fn push_back(&mut self, key: usize, slab: &mut Slab<OrderNode>) {
        let node = slab.get_mut(key).expect("Invalid slab key");
        let quantity = node.quantity();

        node.prev = self.tail;
        node.next = None;

        if let Some(tail_key) = self.tail {
            let tail_node = slab.get_mut(tail_key).expect("Invalid tail key");
            tail_node.next = Some(key);
        } else {
            // Empty list - this is also the head
            self.head = Some(key);
        }

        self.tail = Some(key);
        self.order_count += 1;
        self.total_quantity += u128::from(quantity);
    }

    /// Unlink an order from the queue by slab key
    ///
    /// The node stays in the slab with cleared pointers.
    ///
    /// # Returns
    ///
    /// The quantity of the unlinked order
    pub fn remove(&mut self, key: usize, slab: &mut Slab<OrderNode>) -> u64 {
        let node = slab.get(key).expect("Invalid slab key");
        let quantity = node.quantity();
        let prev_key = node.prev;
        let next_key = node.next;

        if let Some(prev) = prev_key {
            let prev_node = slab.get_mut(prev).expect("Invalid prev key");
            prev_node.next = next_key;
        } else {
            self.head = next_key;
        }

        if let Some(next) = next_key {
            let next_node = slab.get_mut(next).expect("Invalid next key");
            next_node.prev = prev_key;
        } else {
            self.tail = prev_key;
        }

        let node = slab.get_mut(key).expect("Invalid slab key");
        node.prev = None;
        node.next = None;

        self.order_count -= 1;
        self.total_quantity -= u128::from(quantity);

        quantity
    }

    /// Lower the running total after an in-place quantity reduction
    ///
    /// `delta` must not exceed the quantity of the reduced order.
    pub fn reduce_quantity(&mut self, delta: u64) {
        self.total_quantity -= u128::from(delta);
    }

    /// Iterate the orders at this level in priority order
    pub fn iter<'a>(&self, slab: &'a Slab<OrderNode>) -> LevelIter<'a> {
        LevelIter {
            slab,
            cursor: self.head,
        }
    }
}

/// Walks a level's linked list from head to tail
#[derive(Debug, Clone)]
pub struct LevelIter<'a> {
    slab: &'a Slab<OrderNode>,
    cursor: Option<usize>,
}

impl<'a> Iterator for LevelIter<'a> {
    type Item = &'a Order;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.slab.get(self.cursor?)?;
        self.cursor = node.next;
        Some(&node.order)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
