//! Limit order book with price-time priority.
//!
//! ## Architecture
//!
//! - **Slab**: arena of [`OrderNode`]s; the slab key is an order's stable handle
//! - **BookSide**: per-side `BTreeMap` of price levels, best level first
//! - **HashMap**: order id to [`OrderLocator`] for O(1) cancel and amend
//!
//! Each price level threads its orders through the slab as a doubly-linked
//! list, so removing or requeueing an order never scans a level.
//!
//! ## Priority
//!
//! - New orders join the tail of their level
//! - Price changes and quantity increases move the order to the tail
//! - Quantity decreases keep the order where it is
//!
//! The book never matches. A crossed book is reported by [`OrderBook::is_crossed`]
//! and left as is.
//!
//! ## Example
//!
//! ```
//! use price_time_book::orderbook::OrderBook;
//! use price_time_book::types::Side;
//!
//! let mut book = OrderBook::with_capacity(1_000);
//!
//! book.add_at("A", Side::Bid, 5_000_000_000, 400, 0).unwrap();
//! book.add_at("B", Side::Bid, 5_000_000_000, 300, 1).unwrap();
//! book.add_at("C", Side::Ask, 5_500_000_000, 400, 2).unwrap();
//!
//! assert_eq!(book.top_price(Side::Bid), Some(5_000_000_000));
//! assert_eq!(book.top_price(Side::Ask), Some(5_500_000_000));
//! assert!(!book.is_crossed());
//! ```

use std::collections::HashMap;

use slab::Slab;
use tracing::{debug, error};

use crate::orderbook::snapshot::{self, LevelSummary};
use crate::orderbook::{AmendEffect, BookError, BookSide, OrderNode, PriceLevel};
use crate::types::time::{self, Timestamp};
use crate::types::{Order, Side, Transaction, TxnKind};

/// Where a resting order lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderLocator {
    pub side: Side,
    /// Current price, i.e. the level holding the order
    pub price: u64,
    /// Slab key of the order's node
    pub key: usize,
}

/// In-memory limit order book for a single instrument.
#[derive(Debug, Clone)]
pub struct OrderBook {
    /// Order storage
    /// Key: slab index, Value: OrderNode
    orders: Slab<OrderNode>,

    /// Price levels, indexed by `Side::index()`
    sides: [BookSide; 2],

    /// Order id to location (for O(1) cancel/amend)
    index: HashMap<String, OrderLocator>,
}

impl Default for OrderBook {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderBook {
    /// Create a new empty book
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create a book with storage pre-allocated for `order_capacity` orders
    ///
    /// ```
    /// use price_time_book::orderbook::OrderBook;
    ///
    /// let book = OrderBook::with_capacity(100_000);
    /// assert!(book.capacity() >= 100_000);
    /// ```
    pub fn with_capacity(order_capacity: usize) -> Self {
        Self {
            orders: Slab::with_capacity(order_capacity),
            sides: [BookSide::new(Side::Bid), BookSide::new(Side::Ask)],
            index: HashMap::with_capacity(order_capacity),
        }
    }

    // ========================================================================
    // Capacity and Size
    // ========================================================================

    #[inline]
    pub fn capacity(&self) -> usize {
        self.orders.capacity()
    }

    /// Number of resting orders on both sides
    #[inline]
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    #[inline]
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    #[inline]
    fn side(&self, side: Side) -> &BookSide {
        &self.sides[side.index()]
    }

    // ========================================================================
    // Order Management
    // ========================================================================

    /// Add an order stamped with the current wall-clock time
    pub fn add(
        &mut self,
        id: impl Into<String>,
        side: Side,
        price: u64,
        quantity: u64,
    ) -> Result<(), BookError> {
        self.add_at(id, side, price, quantity, time::now())
    }

    /// Add an order at the tail of its price level
    ///
    /// # Errors
    ///
    /// [`BookError::DuplicateId`] if an order with the same id is resting.
    pub fn add_at(
        &mut self,
        id: impl Into<String>,
        side: Side,
        price: u64,
        quantity: u64,
        timestamp: Timestamp,
    ) -> Result<(), BookError> {
        let id = id.into();
        if self.index.contains_key(&id) {
            debug!(order_id = %id, "add rejected: duplicate id");
            return Err(BookError::DuplicateId(id));
        }

        let node = OrderNode::new(Order::new(id.clone(), side, price, quantity, timestamp));
        let key = self.orders.insert(node);
        self.sides[side.index()].push_back(price, key, &mut self.orders);

        debug!(order_id = %id, %side, price, quantity, timestamp, "order added");
        self.index.insert(id, OrderLocator { side, price, key });
        Ok(())
    }

    /// Remove an order, stamping the returned value with the current time
    pub fn remove(&mut self, id: &str) -> Result<Order, BookError> {
        self.remove_at(id, time::now())
    }

    /// Remove a resting order
    ///
    /// The order leaves every index and its level is dropped if it becomes
    /// empty. The book keeps no history; the removed order is handed back
    /// with a `Remove` transaction at `timestamp`.
    ///
    /// # Errors
    ///
    /// - [`BookError::UnknownId`] if no such order is resting
    /// - [`BookError::InternalInconsistency`] if the index disagrees with the
    ///   level or slab slot it points at; nothing is changed
    pub fn remove_at(&mut self, id: &str, timestamp: Timestamp) -> Result<Order, BookError> {
        let locator = self.resolve(id)?;

        let book_side = &mut self.sides[locator.side.index()];
        if book_side.unlink(locator.price, locator.key, &mut self.orders).is_none() {
            return Err(Self::inconsistency(id, locator));
        }
        self.index.remove(id);

        let mut order = self.orders.remove(locator.key).order;
        order.last_txn = Transaction::new(TxnKind::Remove, timestamp);

        debug!(order_id = %id, side = %locator.side, price = locator.price, "order removed");
        Ok(order)
    }

    /// Amend an order using the current wall-clock time
    pub fn amend(
        &mut self,
        id: &str,
        new_price: Option<u64>,
        new_quantity: Option<u64>,
    ) -> Result<AmendEffect, BookError> {
        self.amend_at(id, new_price, new_quantity, time::now())
    }

    /// Change an order's price and/or quantity
    ///
    /// See [`AmendEffect`] for how each change affects queue position.
    ///
    /// # Errors
    ///
    /// - [`BookError::UnknownId`] if no such order is resting
    /// - [`BookError::NoOpAmend`] if neither value differs from the current one
    /// - [`BookError::InternalInconsistency`] if the index disagrees with the
    ///   level or slab slot it points at; nothing is changed
    pub fn amend_at(
        &mut self,
        id: &str,
        new_price: Option<u64>,
        new_quantity: Option<u64>,
        timestamp: Timestamp,
    ) -> Result<AmendEffect, BookError> {
        let locator = self.resolve(id)?;
        let key = locator.key;

        let (current_price, current_quantity) = match self.orders.get(key) {
            Some(node) => (node.price(), node.quantity()),
            None => return Err(Self::inconsistency(id, locator)),
        };

        let Some(effect) =
            AmendEffect::decide(current_price, current_quantity, new_price, new_quantity)
        else {
            debug!(order_id = %id, "amend rejected: nothing changes");
            return Err(BookError::NoOpAmend(id.to_string()));
        };

        let price = new_price.unwrap_or(current_price);
        let quantity = new_quantity.unwrap_or(current_quantity);
        let requeued = !effect.keeps_priority();

        let book_side = &mut self.sides[locator.side.index()];
        match effect {
            AmendEffect::Reprice => {
                book_side.unlink(current_price, key, &mut self.orders);
                if let Some(node) = self.orders.get_mut(key) {
                    node.order.record_amend(price, quantity, timestamp, requeued);
                }
                book_side.push_back(price, key, &mut self.orders);
                if let Some(entry) = self.index.get_mut(id) {
                    entry.price = price;
                }
            }
            AmendEffect::ReduceInPlace => {
                if let Some(node) = self.orders.get_mut(key) {
                    node.order.record_amend(price, quantity, timestamp, requeued);
                }
                if let Some(level) = book_side.level_mut(price) {
                    level.reduce_quantity(current_quantity - quantity);
                }
            }
            AmendEffect::Requeue => {
                if let Some(level) = book_side.level_mut(price) {
                    level.remove(key, &mut self.orders);
                    if let Some(node) = self.orders.get_mut(key) {
                        node.order.record_amend(price, quantity, timestamp, requeued);
                    }
                    level.push_back(key, &mut self.orders);
                }
            }
        }

        debug!(
            order_id = %id,
            side = %locator.side,
            ?effect,
            from_price = current_price,
            price,
            from_quantity = current_quantity,
            quantity,
            "order amended"
        );
        Ok(effect)
    }

    fn find(&self, id: &str) -> Result<OrderLocator, BookError> {
        self.index.get(id).copied().ok_or_else(|| {
            debug!(order_id = %id, "unknown order id");
            BookError::UnknownId(id.to_string())
        })
    }

    /// Look up an order and check that its slab node and level agree with
    /// the index before anything is mutated
    fn resolve(&self, id: &str) -> Result<OrderLocator, BookError> {
        let locator = self.find(id)?;

        let node_matches = self.orders.get(locator.key).is_some_and(|node| {
            node.order_id() == id
                && node.order.side == locator.side
                && node.price() == locator.price
        });
        if !node_matches || self.side(locator.side).level(locator.price).is_none() {
            return Err(Self::inconsistency(id, locator));
        }
        Ok(locator)
    }

    fn inconsistency(id: &str, locator: OrderLocator) -> BookError {
        error!(
            order_id = %id,
            side = %locator.side,
            price = locator.price,
            key = locator.key,
            "order index points at a missing level or node"
        );
        BookError::InternalInconsistency {
            id: id.to_string(),
            side: locator.side,
            price: locator.price,
        }
    }

    /// Drop every order and level
    pub fn clear(&mut self) {
        self.orders.clear();
        for book_side in &mut self.sides {
            book_side.clear();
        }
        self.index.clear();
    }

    // ========================================================================
    // Best / Worst Prices
    // ========================================================================

    /// Best price on a side (highest bid / lowest ask)
    #[inline]
    pub fn top_price(&self, side: Side) -> Option<u64> {
        self.side(side).best_price()
    }

    /// Worst price on a side (lowest bid / highest ask)
    #[inline]
    pub fn bottom_price(&self, side: Side) -> Option<u64> {
        self.side(side).worst_price()
    }

    /// True when both sides have orders and best ask <= best bid
    pub fn is_crossed(&self) -> bool {
        match (self.top_price(Side::Bid), self.top_price(Side::Ask)) {
            (Some(bid), Some(ask)) => ask <= bid,
            _ => false,
        }
    }

    // ========================================================================
    // Levels
    // ========================================================================

    #[inline]
    pub fn num_price_levels(&self, side: Side) -> usize {
        self.side(side).level_count()
    }

    /// Prices on a side, best first
    pub fn price_levels(&self, side: Side) -> Vec<u64> {
        self.levels(side).map(|level| level.price).collect()
    }

    /// Levels on a side, best first
    pub fn levels(&self, side: Side) -> impl Iterator<Item = &PriceLevel> + '_ {
        self.side(side).levels()
    }

    /// Summaries of the best `n` levels on a side
    pub fn depth(&self, side: Side, n: usize) -> Vec<LevelSummary> {
        self.levels(side).take(n).map(LevelSummary::from).collect()
    }

    /// Sum of quantities at a level, 0 if the level does not exist
    pub fn total_quantity_at(&self, side: Side, price: u64) -> u128 {
        self.side(side)
            .level(price)
            .map_or(0, |level| level.total_quantity)
    }

    // ========================================================================
    // Orders
    // ========================================================================

    pub fn num_orders_at(&self, side: Side, price: u64) -> usize {
        self.side(side)
            .level(price)
            .map_or(0, |level| level.order_count)
    }

    /// Orders at a level in priority order
    pub fn orders_at(&self, side: Side, price: u64) -> Vec<&Order> {
        self.side(side)
            .level(price)
            .map(|level| level.iter(&self.orders).collect())
            .unwrap_or_default()
    }

    pub fn num_orders_on_side(&self, side: Side) -> usize {
        self.side(side).order_count()
    }

    /// Every order on a side: best level first, then queue order within a level
    pub fn orders_on_side(&self, side: Side) -> Vec<&Order> {
        self.levels(side)
            .flat_map(|level| level.iter(&self.orders))
            .collect()
    }

    pub fn get_order(&self, id: &str) -> Option<&Order> {
        let locator = self.index.get(id)?;
        self.orders.get(locator.key).map(|node| &node.order)
    }

    /// Where a resting order currently lives
    pub fn locate(&self, id: &str) -> Option<OrderLocator> {
        self.index.get(id).copied()
    }

    /// Last transaction of a resting order; `None` once it has been removed
    pub fn last_transaction(&self, id: &str) -> Option<Transaction> {
        self.get_order(id).map(|order| order.last_txn)
    }

    // ========================================================================
    // Time Scans (unordered, both sides)
    // ========================================================================

    fn scan(&self, pred: impl Fn(&Order) -> bool) -> Vec<&Order> {
        self.orders
            .iter()
            .map(|(_, node)| &node.order)
            .filter(|order| pred(order))
            .collect()
    }

    pub fn orders_created_before(&self, t: Timestamp) -> Vec<&Order> {
        self.scan(|o| o.created_before(t))
    }

    pub fn orders_created_after(&self, t: Timestamp) -> Vec<&Order> {
        self.scan(|o| o.created_after(t))
    }

    pub fn orders_updated_before(&self, t: Timestamp) -> Vec<&Order> {
        self.scan(|o| o.updated_before(t))
    }

    pub fn orders_updated_after(&self, t: Timestamp) -> Vec<&Order> {
        self.scan(|o| o.updated_after(t))
    }

    // ========================================================================
    // State Root
    // ========================================================================

    /// SHA-256 digest of the whole book: levels and orders in priority order
    pub fn state_root(&self) -> Result<[u8; 32], BookError> {
        snapshot::compute_state_root(self)
    }

    pub fn state_root_hex(&self) -> Result<String, BookError> {
        self.state_root().map(hex::encode)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
