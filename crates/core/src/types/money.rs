//! Money conversion helpers.
//!
//! Prices are carried as [`Decimal`] in major units (dollars). The payment
//! gateway's amount field is an integer count of the minor unit (cents).

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

/// Convert a major-unit price to integer minor units (cents), truncating.
///
/// `25.50` becomes `2550`; `10.999` becomes `1099`. Returns `None` for
/// non-positive prices or amounts too large for `i64`.
#[must_use]
pub fn minor_units(price: Decimal) -> Option<i64> {
    if price <= Decimal::ZERO {
        return None;
    }
    (price * Decimal::from(100)).trunc().to_i64()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_converts_dollars_to_cents() {
        // 25.50
        assert_eq!(minor_units(Decimal::new(2550, 2)), Some(2550));
    }

    #[test]
    fn test_truncates_fractional_cents() {
        // 10.999 -> 1099, not 1100
        assert_eq!(minor_units(Decimal::new(10_999, 3)), Some(1099));
    }

    #[test]
    fn test_whole_dollars() {
        assert_eq!(minor_units(Decimal::from(7)), Some(700));
    }

    #[test]
    fn test_rejects_zero_and_negative() {
        assert_eq!(minor_units(Decimal::ZERO), None);
        assert_eq!(minor_units(Decimal::new(-420, 2)), None);
    }
}
