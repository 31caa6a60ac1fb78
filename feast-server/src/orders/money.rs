//! Money calculation utilities using rust_decimal for precision
//!
//! Prices are stored and serialized as `f64`; every sum and product goes
//! through `Decimal` and is rounded half-up to 2 decimal places.

use rust_decimal::prelude::*;

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Maximum allowed unit price
pub const MAX_PRICE: f64 = 1_000_000.0;

/// Convert f64 to Decimal (non-finite values become zero)
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// `unit_price × quantity` for one order line; `None` on overflow
pub fn line_total(unit_price: f64, quantity: i64) -> Option<Decimal> {
    to_decimal(unit_price).checked_mul(Decimal::from(quantity))
}

/// Sum of `unit_price × quantity` over all lines, rounded for storage
///
/// Returns `None` when any product or the running sum leaves the
/// `Decimal` range.
pub fn order_total<I>(lines: I) -> Option<f64>
where
    I: IntoIterator<Item = (f64, i64)>,
{
    let mut total = Decimal::ZERO;
    for (price, qty) in lines {
        total = total.checked_add(line_total(price, qty)?)?;
    }
    Some(to_f64(total))
}

/// A price is acceptable when finite, non-negative and below [`MAX_PRICE`]
pub fn is_valid_price(price: f64) -> bool {
    price.is_finite() && (0.0..=MAX_PRICE).contains(&price)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_is_sum_of_price_times_quantity() {
        assert_eq!(order_total([(10.0, 2), (5.0, 1)]), Some(25.0));
        assert_eq!(order_total([(2.5, 3)]), Some(7.5));
        assert_eq!(order_total(std::iter::empty()), Some(0.0));
    }

    #[test]
    fn total_avoids_float_drift() {
        // 0.1 * 3 in plain f64 is 0.30000000000000004
        assert_eq!(order_total([(0.1, 3)]), Some(0.3));
        assert_eq!(order_total([(0.1, 1), (0.2, 1)]), Some(0.3));
    }

    #[test]
    fn oversized_totals_are_none_instead_of_panicking() {
        assert_eq!(line_total(1e20, i64::MAX), None);
        let huge = std::iter::repeat_n((MAX_PRICE, i64::MAX), 9000);
        assert_eq!(order_total(huge), None);
        assert_eq!(order_total([(MAX_PRICE, 1000); 100]), Some(100_000_000_000.0));
    }

    #[test]
    fn rounding_is_half_up() {
        assert_eq!(to_f64(Decimal::new(1005, 3)), 1.01);
        assert_eq!(to_f64(Decimal::new(-1005, 3)), -1.01);
    }

    #[test]
    fn price_bounds() {
        assert!(is_valid_price(0.0));
        assert!(is_valid_price(2.5));
        assert!(!is_valid_price(-0.01));
        assert!(!is_valid_price(f64::NAN));
        assert!(!is_valid_price(f64::INFINITY));
    }
}
