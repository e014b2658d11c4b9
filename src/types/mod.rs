//! Core data types for the price-time book
//!
//! ## Types
//!
//! - [`Order`]: A resting limit order
//! - [`Side`]: Bid or Ask
//! - [`Transaction`] / [`TxnKind`]: Last mutation applied to an order
//! - [`Timestamp`]: Milliseconds since the Unix epoch
//!
//! ## Fixed-Point Prices
//!
//! Prices are stored as `u64` scaled by 10^8.
//! Example: 50.25 is stored as 5_025_000_000u64

mod order;
pub mod price;
pub mod time;

pub use order::{Order, Side, Transaction, TxnKind};
pub use time::Timestamp;
