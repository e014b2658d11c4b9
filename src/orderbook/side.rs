//! One side of the book: price levels ordered best-first.
//!
//! Both sides share one container type. The ordering is carried by the key:
//! a [`PriceKey`] built for [`Side::Bid`] sorts high-to-low, one built for
//! [`Side::Ask`] sorts low-to-high, so `BTreeMap` iteration always yields the
//! best level first and the worst level last.
//!
//! The best and worst prices are cached and refreshed whenever a level is
//! created or dropped, so reading them is O(1).

use std::cmp::Ordering;
use std::collections::BTreeMap;

use slab::Slab;

use crate::orderbook::{OrderNode, PriceLevel};
use crate::types::Side;

/// Price key whose ordering depends on the side it was built for.
///
/// Keys are only ever compared with keys of the same side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceKey {
    side: Side,
    price: u64,
}

impl PriceKey {
    #[inline]
    pub fn new(side: Side, price: u64) -> Self {
        Self { side, price }
    }

    #[inline]
    pub fn price(&self) -> u64 {
        self.price
    }
}

impl Ord for PriceKey {
    fn cmp(&self, other: &Self) -> Ordering {
        debug_assert_eq!(self.side, other.side);
        match self.side {
            Side::Bid => other.price.cmp(&self.price),
            Side::Ask => self.price.cmp(&other.price),
        }
    }
}

impl PartialOrd for PriceKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Price levels for a single side.
///
/// Empty levels are never left in the map.
#[derive(Debug, Clone)]
pub struct BookSide {
    side: Side,
    levels: BTreeMap<PriceKey, PriceLevel>,
    /// Price of the first level in `levels`
    best: Option<u64>,
    /// Price of the last level in `levels`
    worst: Option<u64>,
}

impl BookSide {
    pub fn new(side: Side) -> Self {
        Self {
            side,
            levels: BTreeMap::new(),
            best: None,
            worst: None,
        }
    }

    #[inline]
    pub fn side(&self) -> Side {
        self.side
    }

    #[inline]
    fn key(&self, price: u64) -> PriceKey {
        PriceKey::new(self.side, price)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    #[inline]
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// Total number of orders across every level
    pub fn order_count(&self) -> usize {
        self.levels.values().map(|level| level.order_count).sum()
    }

    /// Best price (highest bid / lowest ask)
    #[inline]
    pub fn best_price(&self) -> Option<u64> {
        self.best
    }

    /// Worst price (lowest bid / highest ask)
    #[inline]
    pub fn worst_price(&self) -> Option<u64> {
        self.worst
    }

    fn refresh_extremes(&mut self) {
        self.best = self.levels.first_key_value().map(|(key, _)| key.price());
        self.worst = self.levels.last_key_value().map(|(key, _)| key.price());
    }

    pub fn level(&self, price: u64) -> Option<&PriceLevel> {
        self.levels.get(&self.key(price))
    }

    pub fn level_mut(&mut self, price: u64) -> Option<&mut PriceLevel> {
        let key = self.key(price);
        self.levels.get_mut(&key)
    }

    /// Levels in priority order
    pub fn levels(&self) -> impl Iterator<Item = &PriceLevel> + '_ {
        self.levels.values()
    }

    /// Append an order to the tail of the level at `price`, creating the
    /// level if needed
    pub fn push_back(&mut self, price: u64, key: usize, slab: &mut Slab<OrderNode>) {
        let level_key = self.key(price);
        match self.levels.get_mut(&level_key) {
            Some(level) => level.push_back(key, slab),
            None => {
                let mut level = PriceLevel::new(price);
                level.push_back(key, slab);
                self.levels.insert(level_key, level);
                self.refresh_extremes();
            }
        }
    }

    /// Unlink an order from the level at `price`, dropping the level if it
    /// becomes empty.
    ///
    /// Returns `None` without touching anything if there is no such level.
    pub fn unlink(&mut self, price: u64, key: usize, slab: &mut Slab<OrderNode>) -> Option<u64> {
        let level_key = self.key(price);
        let level = self.levels.get_mut(&level_key)?;
        let quantity = level.remove(key, slab);
        if level.is_empty() {
            self.levels.remove(&level_key);
            self.refresh_extremes();
        }
        Some(quantity)
    }

    pub fn clear(&mut self) {
        self.levels.clear();
        self.best = None;
        self.worst = None;
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Order;

    fn insert(slab: &mut Slab<OrderNode>, book_side: &mut BookSide, id: &str, price: u64) -> usize {
        let key = slab.insert(OrderNode::new(Order::new(id, book_side.side(), price, 10, 0)));
        book_side.push_back(price, key, slab);
        key
    }

    fn prices(book_side: &BookSide) -> Vec<u64> {
        book_side.levels().map(|level| level.price).collect()
    }

    #[test]
    fn test_price_key_ordering() {
        assert!(PriceKey::new(Side::Bid, 52) < PriceKey::new(Side::Bid, 50));
        assert!(PriceKey::new(Side::Ask, 50) < PriceKey::new(Side::Ask, 52));
        assert_eq!(
            PriceKey::new(Side::Ask, 50).cmp(&PriceKey::new(Side::Ask, 50)),
            Ordering::Equal
        );
    }

    #[test]
    fn test_bid_side_is_descending() {
        let mut slab = Slab::new();
        let mut bids = BookSide::new(Side::Bid);

        insert(&mut slab, &mut bids, "A", 50);
        insert(&mut slab, &mut bids, "B", 52);
        insert(&mut slab, &mut bids, "C", 51);

        assert_eq!(prices(&bids), [52, 51, 50]);
        assert_eq!(bids.best_price(), Some(52));
        assert_eq!(bids.worst_price(), Some(50));
    }

    #[test]
    fn test_ask_side_is_ascending() {
        let mut slab = Slab::new();
        let mut asks = BookSide::new(Side::Ask);

        insert(&mut slab, &mut asks, "A", 55);
        insert(&mut slab, &mut asks, "B", 54);
        insert(&mut slab, &mut asks, "C", 56);

        assert_eq!(prices(&asks), [54, 55, 56]);
        assert_eq!(asks.best_price(), Some(54));
        assert_eq!(asks.worst_price(), Some(56));
    }

    #[test]
    fn test_same_price_shares_level() {
        let mut slab = Slab::new();
        let mut bids = BookSide::new(Side::Bid);

        insert(&mut slab, &mut bids, "A", 50);
        insert(&mut slab, &mut bids, "B", 50);

        assert_eq!(bids.level_count(), 1);
        assert_eq!(bids.order_count(), 2);
        assert_eq!(bids.level(50).map(|l| l.total_quantity), Some(20));
    }

    #[test]
    fn test_unlink_drops_empty_level() {
        let mut slab = Slab::new();
        let mut asks = BookSide::new(Side::Ask);

        let a = insert(&mut slab, &mut asks, "A", 55);
        let b = insert(&mut slab, &mut asks, "B", 55);
        let c = insert(&mut slab, &mut asks, "C", 56);

        assert_eq!(asks.unlink(55, a, &mut slab), Some(10));
        assert_eq!(asks.level_count(), 2);

        asks.unlink(55, b, &mut slab);
        assert_eq!(prices(&asks), [56]);

        asks.unlink(56, c, &mut slab);
        assert!(asks.is_empty());
        assert!(asks.best_price().is_none());
        assert!(asks.worst_price().is_none());
    }

    #[test]
    fn test_cached_extremes_follow_levels() {
        let mut slab = Slab::new();
        let mut bids = BookSide::new(Side::Bid);

        let a = insert(&mut slab, &mut bids, "A", 50);
        let b = insert(&mut slab, &mut bids, "B", 52);
        insert(&mut slab, &mut bids, "C", 51);
        insert(&mut slab, &mut bids, "D", 52);
        assert_eq!((bids.best_price(), bids.worst_price()), (Some(52), Some(50)));

        // Level 52 still holds D
        bids.unlink(52, b, &mut slab);
        assert_eq!(bids.best_price(), Some(52));

        bids.unlink(50, a, &mut slab);
        assert_eq!(bids.worst_price(), Some(51));

        bids.clear();
        assert_eq!((bids.best_price(), bids.worst_price()), (None, None));
    }

    #[test]
    fn test_unlink_missing_level() {
        let mut slab = Slab::new();
        let mut asks = BookSide::new(Side::Ask);
        let a = insert(&mut slab, &mut asks, "A", 55);

        assert_eq!(asks.unlink(60, a, &mut slab), None);
        assert_eq!(asks.order_count(), 1);
    }
}
