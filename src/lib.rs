//! # Price-Time Book
//!
//! In-memory limit order book for a single instrument, with price-time
//! priority and O(1) cancel and amend.
//!
//! ## Architecture
//!
//! - **Types**: Order, Side, Transaction, fixed-point prices, timestamps
//! - **OrderBook**: slab-backed price levels with an id index
//!
//! ## Design Principles
//!
//! 1. **Exact prices**: fixed-point `u64` (10^8 scaling), compared exactly
//! 2. **Stable handles**: orders live in a slab; levels link slab keys
//! 3. **No matching**: a crossed book is reported, never resolved
//! 4. **Synchronous**: single owner, no locking inside the book
//!
//! Callers that share a book across threads wrap the whole `OrderBook` in
//! their own lock.

// ============================================================================
// Module declarations
// ============================================================================

/// Core data types: Order, Side, Transaction
pub mod types;

/// Order book: levels, id index, amend policy
pub mod orderbook;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use orderbook::{AmendEffect, BookError, LevelSummary, OrderBook, PriceLevel};
pub use types::{Order, Side, Timestamp, Transaction, TxnKind};
