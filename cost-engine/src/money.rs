//! Money calculation utilities using rust_decimal for precision
//!
//! All arithmetic is done in `Decimal`; values enter and leave the engines
//! as `f64`, rounded to 2 decimal places (half away from zero) on the way
//! out.

use rust_decimal::prelude::*;

use crate::error::{CalcError, CalcResult};

/// Rounding strategy for monetary values (2 decimal places, half-up)
pub const DECIMAL_PLACES: u32 = 2;

/// Kilogram figures are reported to the gram
pub const KG_DECIMAL_PLACES: u32 = 3;

/// Gram figures are reported to a tenth of a gram
pub const GRAM_DECIMAL_PLACES: u32 = 1;

/// Largest monetary amount or percentage accepted as input
pub const MAX_AMOUNT: f64 = 1_000_000_000_000.0;

/// Largest exchange rate accepted as input
pub const MAX_RATE: f64 = 10_000.0;

/// Largest dimension (cm) or weight (g or kg) accepted as input
pub const MAX_MEASURE: f64 = 10_000_000.0;

/// Convert f64 to Decimal for calculation
///
/// NaN becomes zero; finite values beyond `Decimal`'s range saturate.
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    match Decimal::from_f64(value) {
        Some(d) => d,
        None if value.is_nan() => Decimal::ZERO,
        None if value > 0.0 => Decimal::MAX,
        None => Decimal::MIN,
    }
}

/// Convert Decimal back to f64, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    round_to(value, DECIMAL_PLACES)
}

/// Convert Decimal to f64 rounded to `places` decimal places
#[inline]
pub fn round_to(value: Decimal, places: u32) -> f64 {
    value
        .round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Convert a CNY amount with a BRL-per-CNY rate
#[inline]
pub fn convert(amount: Decimal, rate: Decimal) -> Decimal {
    amount * rate
}

/// `a × b`, failing instead of overflowing
#[inline]
pub fn checked_mul(a: Decimal, b: Decimal, field: &'static str) -> CalcResult<Decimal> {
    a.checked_mul(b).ok_or(CalcError::AmountOverflow(field))
}

/// `a + b`, failing instead of overflowing
#[inline]
pub fn checked_add(a: Decimal, b: Decimal, field: &'static str) -> CalcResult<Decimal> {
    a.checked_add(b).ok_or(CalcError::AmountOverflow(field))
}

/// Reject a computed amount above [`MAX_AMOUNT`]
///
/// Every later step (fees, insurance, BRL conversion) stays in range once
/// its operands are capped here.
pub fn within_amount(value: Decimal, field: &'static str) -> CalcResult<Decimal> {
    if value > to_decimal(MAX_AMOUNT) {
        return Err(CalcError::AmountOverflow(field));
    }
    Ok(value)
}

/// Validate that a f64 value is finite (not NaN, not Infinity)
#[inline]
fn is_finite_non_negative(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

/// Convert a validated input, rejecting values above `max`
fn bounded(value: f64, max: f64, field: &'static str) -> CalcResult<Decimal> {
    if value > max {
        return Err(CalcError::OutOfRange { field, value, max });
    }
    Decimal::from_f64(value).ok_or(CalcError::OutOfRange { field, value, max })
}

/// Require a finite, non-negative monetary amount up to [`MAX_AMOUNT`]
pub fn require_amount(value: f64, field: &'static str) -> CalcResult<Decimal> {
    if !is_finite_non_negative(value) {
        return Err(CalcError::InvalidAmount { field, value });
    }
    bounded(value, MAX_AMOUNT, field)
}

/// Require a finite, strictly positive exchange rate up to [`MAX_RATE`]
pub fn require_rate(value: f64, field: &'static str) -> CalcResult<Decimal> {
    if !value.is_finite() || value <= 0.0 {
        return Err(CalcError::InvalidExchangeRate { field, value });
    }
    bounded(value, MAX_RATE, field)
}

/// Require a finite, strictly positive dimension or weight up to [`MAX_MEASURE`]
pub fn require_positive(value: f64, field: &'static str) -> CalcResult<Decimal> {
    if !value.is_finite() || value <= 0.0 {
        return Err(CalcError::InvalidDimensions { field, value });
    }
    bounded(value, MAX_MEASURE, field)
}

/// Require a finite dimension in `[0, MAX_MEASURE]`
pub fn require_measure(value: f64, field: &'static str) -> CalcResult<Decimal> {
    if !is_finite_non_negative(value) {
        return Err(CalcError::InvalidDimensions { field, value });
    }
    bounded(value, MAX_MEASURE, field)
}

/// Number of whole `step`s needed to cover `amount`, partial steps counted whole
///
/// Returns zero for non-positive amounts. `step` must be positive. A count
/// past `Decimal`'s range saturates.
pub fn ceil_steps(amount: Decimal, step: Decimal) -> Decimal {
    if amount <= Decimal::ZERO || step <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    amount.checked_div(step).unwrap_or(Decimal::MAX).ceil()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_decimal_precision() {
        // Classic floating point problem: 0.1 + 0.2 != 0.3
        let sum_f64 = 0.1_f64 + 0.2_f64;
        assert_ne!(sum_f64, 0.3);

        let sum_dec = to_decimal(0.1) + to_decimal(0.2);
        assert_eq!(to_f64(sum_dec), 0.3);
    }

    #[test]
    fn test_half_up_rounding() {
        assert_eq!(to_f64(to_decimal(1.005)), 1.01);
        assert_eq!(to_f64(to_decimal(1.672)), 1.67);
        assert_eq!(to_f64(to_decimal(-2.345)), -2.35);
        assert_eq!(round_to(to_decimal(0.7504), KG_DECIMAL_PLACES), 0.75);
    }

    #[test]
    fn test_out_of_range_saturates() {
        assert_eq!(to_decimal(f64::NAN), Decimal::ZERO);
        assert_eq!(to_decimal(f64::INFINITY), Decimal::MAX);
        assert_eq!(to_decimal(1e30), Decimal::MAX);
        assert_eq!(to_decimal(-1e30), Decimal::MIN);
    }

    #[test]
    fn test_huge_inputs_rejected() {
        assert_eq!(
            require_amount(1e29, "productPriceCny"),
            Err(CalcError::OutOfRange {
                field: "productPriceCny",
                value: 1e29,
                max: MAX_AMOUNT
            })
        );
        assert!(require_amount(MAX_AMOUNT, "productPriceCny").is_ok());
        assert!(require_rate(1e5, "cnyToBrl").is_err());
        assert!(require_positive(1e10, "lengthCm").is_err());
        assert!(require_measure(1e10, "lengthCm").is_err());
        assert!(require_measure(0.0, "lengthCm").is_ok());
    }

    #[test]
    fn test_checked_arithmetic() {
        assert_eq!(
            checked_mul(Decimal::MAX, Decimal::TWO, "freight"),
            Err(CalcError::AmountOverflow("freight"))
        );
        assert_eq!(
            checked_add(Decimal::MAX, Decimal::ONE, "freight"),
            Err(CalcError::AmountOverflow("freight"))
        );
        assert_eq!(checked_mul(Decimal::TWO, Decimal::TWO, "freight").unwrap(), Decimal::from(4));
        assert!(within_amount(to_decimal(MAX_AMOUNT), "freight").is_ok());
        assert!(within_amount(to_decimal(MAX_AMOUNT * 2.0), "freight").is_err());
    }

    #[test]
    fn test_require_amount() {
        assert!(require_amount(0.0, "productPriceCny").is_ok());
        assert_eq!(
            require_amount(-1.0, "productPriceCny"),
            Err(CalcError::InvalidAmount {
                field: "productPriceCny",
                value: -1.0
            })
        );
        assert!(require_amount(f64::NAN, "productPriceCny").is_err());
    }

    #[test]
    fn test_require_rate_rejects_zero() {
        assert!(require_rate(0.0, "cnyToBrl").is_err());
        assert!(require_rate(f64::INFINITY, "cnyToBrl").is_err());
        assert_eq!(require_rate(0.8, "cnyToBrl").unwrap(), to_decimal(0.8));
    }

    #[test]
    fn test_require_positive() {
        assert!(require_positive(0.0, "lengthCm").is_err());
        assert!(require_positive(-3.0, "lengthCm").is_err());
        assert!(require_positive(0.1, "lengthCm").is_ok());
    }

    #[test]
    fn test_ceil_steps() {
        let half = to_decimal(0.5);
        assert_eq!(ceil_steps(to_decimal(0.8), half), Decimal::from(2));
        assert_eq!(ceil_steps(to_decimal(0.5), half), Decimal::ONE);
        assert_eq!(ceil_steps(to_decimal(0.5000001), half), Decimal::from(2));
        assert_eq!(ceil_steps(Decimal::ZERO, half), Decimal::ZERO);
        assert_eq!(ceil_steps(to_decimal(-1.0), half), Decimal::ZERO);
        assert_eq!(ceil_steps(Decimal::MAX, half), Decimal::MAX);
    }
}
