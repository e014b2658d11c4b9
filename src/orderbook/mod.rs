//! Order book module.
//!
//! ## Architecture
//!
//! - **Slab-based storage**: O(1) order insertion, removal, and lookup
//! - **Price levels**: orders grouped by price in a side-ordered `BTreeMap`
//! - **Price-time priority**: FIFO queue per level, with amend rules deciding
//!   when an order keeps its place
//!
//! ## Components
//!
//! - [`OrderNode`]: `Order` plus linked-list pointers for its level
//! - [`PriceLevel`]: queue of orders at a single price
//! - [`BookSide`]: levels of one side, best first
//! - [`AmendEffect`]: amend policy
//! - [`OrderBook`]: both sides plus the id index
//!
//! ## Performance
//!
//! | Operation | Complexity |
//! |-----------|------------|
//! | Add order | O(log L) |
//! | Remove by id | O(1) unlink + O(log L) level lookup |
//! | Amend, quantity down | O(1) node update + O(log L) level lookup |
//! | Amend, quantity up | O(1) relink + O(log L) level lookup |
//! | Amend, price change | O(log L) |
//! | Best / worst price | O(1) (cached) |
//!
//! L = number of price levels on the side.

pub mod amend;
pub mod book;
pub mod error;
pub mod level;
pub mod node;
pub mod side;
pub mod snapshot;

pub use amend::AmendEffect;
pub use book::{OrderBook, OrderLocator};
pub use error::BookError;
pub use level::{LevelIter, PriceLevel};
pub use node::OrderNode;
pub use side::{BookSide, PriceKey};
pub use snapshot::LevelSummary;
