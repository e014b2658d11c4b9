//! Fixed-point price utilities.
//!
//! ## Overview
//!
//! Prices are stored as u64 scaled by 10^8. Level lookup relies on exact
//! integer equality, so two prices that print the same are the same level.
//!
//! ## Examples
//!
//! ```
//! use price_time_book::types::price::{to_fixed, from_fixed};
//!
//! let price = to_fixed("50.25").unwrap();
//! assert_eq!(price, 5_025_000_000);
//! assert_eq!(from_fixed(price), "50.25000000");
//! ```

use rust_decimal::prelude::*;
use rust_decimal::Decimal;

/// Scaling factor for fixed-point prices: 10^8
pub const SCALE: u64 = 100_000_000;

// ============================================================================
// Conversion Functions
// ============================================================================

/// Convert a decimal string to fixed-point u64
///
/// Returns `None` if parsing fails, the value is negative, or it does not
/// fit in a u64 once scaled.
///
/// ```
/// use price_time_book::types::price::to_fixed;
///
/// assert_eq!(to_fixed("1.0"), Some(100_000_000));
/// assert_eq!(to_fixed("0.00000001"), Some(1));
/// assert_eq!(to_fixed("-1"), None);
/// ```
pub fn to_fixed(s: &str) -> Option<u64> {
    let decimal = Decimal::from_str(s).ok()?;
    decimal_to_fixed(decimal)
}

/// Convert a Decimal to fixed-point u64, rounding to 8 places
pub fn decimal_to_fixed(d: Decimal) -> Option<u64> {
    if d.is_sign_negative() {
        return None;
    }

    let scaled = d.checked_mul(Decimal::from(SCALE))?;
    scaled.round_dp(0).to_u64()
}

/// Convert fixed-point u64 to a Decimal
pub fn fixed_to_decimal(value: u64) -> Decimal {
    Decimal::from(value) / Decimal::from(SCALE)
}

/// Convert fixed-point u64 to a string with 8 decimal places
pub fn from_fixed(value: u64) -> String {
    format!("{:.8}", fixed_to_decimal(value))
}

/// Convert fixed-point u64 to a string with trailing zeros trimmed
///
/// ```
/// use price_time_book::types::price::from_fixed_trimmed;
///
/// assert_eq!(from_fixed_trimmed(5_000_000_000), "50");
/// assert_eq!(from_fixed_trimmed(5_050_000_000), "50.5");
/// ```
pub fn from_fixed_trimmed(value: u64) -> String {
    format!("{}", fixed_to_decimal(value).normalize())
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_fixed_basic() {
        assert_eq!(to_fixed("1"), Some(100_000_000));
        assert_eq!(to_fixed("50"), Some(5_000_000_000));
        assert_eq!(to_fixed("0.5"), Some(50_000_000));
        assert_eq!(to_fixed("50000.12345678"), Some(5_000_012_345_678));
    }

    #[test]
    fn test_to_fixed_edge_cases() {
        assert_eq!(to_fixed("0"), Some(0));
        assert_eq!(to_fixed("-1.0"), None);
        assert_eq!(to_fixed("abc"), None);
        assert_eq!(to_fixed(""), None);
    }

    #[test]
    fn test_to_fixed_rounds_extra_places() {
        // 9th decimal place is rounded away
        assert_eq!(to_fixed("0.000000014"), Some(1));
        assert_eq!(to_fixed("0.000000016"), Some(2));
    }

    #[test]
    fn test_from_fixed() {
        assert_eq!(from_fixed(100_000_000), "1.00000000");
        assert_eq!(from_fixed(1), "0.00000001");
        assert_eq!(from_fixed(0), "0.00000000");
    }

    #[test]
    fn test_from_fixed_trimmed() {
        assert_eq!(from_fixed_trimmed(100_000_000), "1");
        assert_eq!(from_fixed_trimmed(150_000_000), "1.5");
        assert_eq!(from_fixed_trimmed(123_456_789), "1.23456789");
    }

    #[test]
    fn test_equal_decimals_map_to_equal_levels() {
        assert_eq!(to_fixed("50"), to_fixed("50.00000000"));
        assert_ne!(to_fixed("50"), to_fixed("50.00000001"));
    }
}
