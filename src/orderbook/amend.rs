//! Amend policy: what an amendment does to an order's queue position.
//!
//! | price changed | quantity           | effect                             |
//! |---------------|--------------------|------------------------------------|
//! | yes           | any                | [`AmendEffect::Reprice`]           |
//! | no            | decreased          | [`AmendEffect::ReduceInPlace`]     |
//! | no            | increased          | [`AmendEffect::Requeue`]           |
//! | no            | unchanged / absent | no-op, rejected                    |
//!
//! A size reduction never hurts the counterparties of resting liquidity, so
//! the order keeps its place. Anything else sends it to the back of the queue
//! at its (new or current) price.

/// Outcome of an accepted amendment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AmendEffect {
    /// Moved to the tail of the level at the new price
    Reprice,
    /// Quantity lowered in place; update time and position kept
    ReduceInPlace,
    /// Quantity raised; moved to the tail of the same level
    Requeue,
}

impl AmendEffect {
    /// Classify a requested amendment against the order's current values.
    ///
    /// A requested value only counts as a change when it differs exactly
    /// from the current one. Returns `None` when nothing changes.
    ///
    /// ```
    /// use price_time_book::orderbook::AmendEffect;
    ///
    /// assert_eq!(AmendEffect::decide(50, 400, None, Some(300)), Some(AmendEffect::ReduceInPlace));
    /// assert_eq!(AmendEffect::decide(50, 400, Some(50), Some(500)), Some(AmendEffect::Requeue));
    /// assert_eq!(AmendEffect::decide(50, 400, Some(51), None), Some(AmendEffect::Reprice));
    /// assert_eq!(AmendEffect::decide(50, 400, Some(50), Some(400)), None);
    /// ```
    pub fn decide(
        current_price: u64,
        current_quantity: u64,
        new_price: Option<u64>,
        new_quantity: Option<u64>,
    ) -> Option<Self> {
        let price_changed = new_price.is_some_and(|p| p != current_price);
        if price_changed {
            return Some(AmendEffect::Reprice);
        }

        match new_quantity {
            Some(q) if q < current_quantity => Some(AmendEffect::ReduceInPlace),
            Some(q) if q > current_quantity => Some(AmendEffect::Requeue),
            _ => None,
        }
    }

    /// Whether the order keeps its queue position
    #[inline]
    pub fn keeps_priority(self) -> bool {
        matches!(self, AmendEffect::ReduceInPlace)
    }
}
