//! Order types for the price-time book.
//!
//! ## Fixed-Point Representation
//!
//! Prices are stored as u64 scaled by 10^8 (see [`crate::types::price::SCALE`]).
//! Two prices are the same level only when the integers are equal; there is
//! no tolerance.
//!
//! ## Timestamps
//!
//! Creation and update times are caller-supplied milliseconds since the Unix
//! epoch. They are only ever compared with strict `<` / `>`.

use std::fmt;

use crate::types::time::Timestamp;

// ============================================================================
// Side enum
// ============================================================================

/// Order side: Bid or Ask
///
/// Represented as u8 when hashed into the state root:
/// - Bid = 0
/// - Ask = 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// Bid (buy) - best price is the highest
    Bid,
    /// Ask (sell) - best price is the lowest
    Ask,
}

impl Side {
    /// Both sides, bids first
    pub const ALL: [Side; 2] = [Side::Bid, Side::Ask];

    /// Convert to u8 for encoding
    pub fn to_u8(self) -> u8 {
        match self {
            Side::Bid => 0,
            Side::Ask => 1,
        }
    }

    /// Slot of this side in per-side arrays
    #[inline]
    pub(crate) fn index(self) -> usize {
        self.to_u8() as usize
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Bid => f.write_str("Bid"),
            Side::Ask => f.write_str("Ask"),
        }
    }
}

// ============================================================================
// Transactions
// ============================================================================

/// Kind of the last mutation applied to an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TxnKind {
    Add,
    Amend,
    /// Only seen on the value returned by a removal
    Remove,
}

/// The most recent transaction recorded against an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Transaction {
    pub kind: TxnKind,
    pub time: Timestamp,
}

impl Transaction {
    pub fn new(kind: TxnKind, time: Timestamp) -> Self {
        Self { kind, time }
    }
}

// ============================================================================
// Order struct
// ============================================================================

/// A resting limit order.
///
/// The book owns every live `Order`; queries hand out `&Order` views.
///
/// ## Example
///
/// ```
/// use price_time_book::types::{Order, Side, TxnKind};
///
/// let order = Order::new("A", Side::Bid, 5_000_000_000, 400, 1_000);
/// assert_eq!(order.created_at, order.updated_at);
/// assert_eq!(order.last_txn.kind, TxnKind::Add);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    /// Caller-chosen identifier, unique among resting orders
    pub id: String,

    pub side: Side,

    /// Price in fixed-point (scaled by 10^8)
    pub price: u64,

    pub quantity: u64,

    /// Time the order entered the book
    pub created_at: Timestamp,

    /// Time the order last lost (or was first given) its queue position.
    /// Left untouched by quantity reductions.
    pub updated_at: Timestamp,

    pub last_txn: Transaction,
}

impl Order {
    /// Create a new order stamped with an `Add` transaction at `timestamp`
    pub fn new(
        id: impl Into<String>,
        side: Side,
        price: u64,
        quantity: u64,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            id: id.into(),
            side,
            price,
            quantity,
            created_at: timestamp,
            updated_at: timestamp,
            last_txn: Transaction::new(TxnKind::Add, timestamp),
        }
    }

    /// Apply an accepted amendment.
    ///
    /// `requeued` orders take `timestamp` as their new update time; orders
    /// that keep their queue position keep their update time too.
    pub(crate) fn record_amend(
        &mut self,
        price: u64,
        quantity: u64,
        timestamp: Timestamp,
        requeued: bool,
    ) {
        self.price = price;
        self.quantity = quantity;
        if requeued {
            self.updated_at = timestamp;
        }
        self.last_txn = Transaction::new(TxnKind::Amend, timestamp);
    }

    #[inline]
    pub fn created_before(&self, t: Timestamp) -> bool {
        self.created_at < t
    }

    #[inline]
    pub fn created_after(&self, t: Timestamp) -> bool {
        self.created_at > t
    }

    #[inline]
    pub fn updated_before(&self, t: Timestamp) -> bool {
        self.updated_at < t
    }

    #[inline]
    pub fn updated_after(&self, t: Timestamp) -> bool {
        self.updated_at > t
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
