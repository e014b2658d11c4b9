//! Order book error types.

use thiserror::Error;

use crate::types::Side;

/// Reasons a book operation was rejected.
///
/// A rejected operation leaves the book exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookError {
    /// An order with this id is already resting.
    #[error("duplicate order id: {0}")]
    DuplicateId(String),

    /// No resting order has this id.
    #[error("unknown order id: {0}")]
    UnknownId(String),

    /// Amendment changes neither price nor quantity.
    #[error("amend of {0} changes neither price nor quantity")]
    NoOpAmend(String),

    /// The id index points at a price level or slab slot that does not exist.
    ///
    /// Indicates the book's indices disagree and must be investigated.
    #[error("index inconsistency: order {id} is not at its indexed {side} level {price}")]
    InternalInconsistency { id: String, side: Side, price: u64 },

    /// Level summary could not be encoded for the state root.
    #[error("state encoding failed: {0}")]
    Encoding(String),
}
