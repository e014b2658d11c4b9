//! Level summaries and the book state root.
//!
//! ## SSZ Serialization
//!
//! [`LevelSummary`] derives `SimpleSerialize` from ssz_rs so each level has a
//! fixed 32-byte little-endian encoding: price (u64), total quantity (u128)
//! and order count (u64).
//!
//! ## State Root
//!
//! The state root is a SHA-256 digest over both sides, bids first. For each
//! level, best first, it absorbs the SSZ-encoded summary followed by every
//! order in queue order (length-prefixed id, quantity, creation time, update
//! time). Two books that went through the same operations hash equal; any
//! change in priority order changes the digest.

use sha2::{Digest, Sha256};
use ssz_rs::prelude::*;

use crate::orderbook::{BookError, OrderBook, PriceLevel};
use crate::types::{Order, Side};

/// Aggregate view of one price level.
#[derive(Debug, Clone, PartialEq, Eq, Default, SimpleSerialize)]
pub struct LevelSummary {
    /// Level price (fixed-point, scaled by 10^8)
    pub price: u64,

    pub total_quantity: u128,

    pub order_count: u64,
}

impl From<&PriceLevel> for LevelSummary {
    fn from(level: &PriceLevel) -> Self {
        Self {
            price: level.price,
            total_quantity: level.total_quantity,
            order_count: level.order_count as u64,
        }
    }
}

fn absorb_order(hasher: &mut Sha256, order: &Order) {
    hasher.update((order.id.len() as u64).to_le_bytes());
    hasher.update(order.id.as_bytes());
    hasher.update(order.quantity.to_le_bytes());
    hasher.update(order.created_at.to_le_bytes());
    hasher.update(order.updated_at.to_le_bytes());
}

pub(crate) fn compute_state_root(book: &OrderBook) -> Result<[u8; 32], BookError> {
    let mut hasher = Sha256::new();

    for side in Side::ALL {
        hasher.update([side.to_u8()]);
        for level in book.levels(side) {
            let summary = LevelSummary::from(level);
            let bytes = ssz_rs::serialize(&summary)
                .map_err(|e| BookError::Encoding(format!("{e:?}")))?;
            hasher.update(&bytes);

            for order in book.orders_at(side, level.price) {
                absorb_order(&mut hasher, order);
            }
        }
    }

    let mut root = [0u8; 32];
    root.copy_from_slice(&hasher.finalize());
    Ok(root)
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_book() -> OrderBook {
        let mut book = OrderBook::new();
        book.add_at("A", Side::Bid, 5_000_000_000, 400, 0).unwrap();
        book.add_at("B", Side::Bid, 5_000_000_000, 300, 1).unwrap();
        book.add_at("C", Side::Ask, 5_500_000_000, 400, 2).unwrap();
        book
    }

    #[test]
    fn test_level_summary_ssz_size() {
        let summary = LevelSummary { price: 1, total_quantity: 2, order_count: 3 };
        let bytes = ssz_rs::serialize(&summary).expect("Failed to serialize");

        // u64 + u128 + u64
        assert_eq!(bytes.len(), 32);
        assert_eq!(&bytes[..8], &1u64.to_le_bytes());
        assert_eq!(&bytes[8..24], &2u128.to_le_bytes());
    }

    #[test]
    fn test_level_summary_ssz_roundtrip() {
        let summary = LevelSummary { price: 5_000_000_000, total_quantity: 700, order_count: 2 };
        let bytes = ssz_rs::serialize(&summary).expect("Failed to serialize");
        let decoded: LevelSummary = ssz_rs::deserialize(&bytes).expect("Failed to deserialize");

        assert_eq!(summary, decoded);
    }

    #[test]
    fn test_state_root_deterministic() {
        let root1 = sample_book().state_root().unwrap();
        let root2 = sample_book().state_root().unwrap();

        assert_eq!(root1, root2);
        assert_ne!(root1, OrderBook::new().state_root().unwrap());
    }

    #[test]
    fn test_state_root_tracks_priority() {
        let mut book = sample_book();
        let before = book.state_root().unwrap();

        // Requeue A behind B, then bring quantity back: same sizes, new order
        book.amend_at("A", None, Some(500), 3).unwrap();
        book.amend_at("A", None, Some(400), 4).unwrap();

        assert_ne!(book.state_root().unwrap(), before);
    }

    #[test]
    fn test_state_root_hex() {
        let hex = sample_book().state_root_hex().unwrap();

        assert_eq!(hex.len(), 64);
        assert!(hex.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
