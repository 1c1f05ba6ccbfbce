//! Discount pricing.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors specific to discount calculations.
#[derive(Debug, Error, PartialEq)]
pub enum DiscountError {
    /// The discount percentage falls outside the supported `[0, 100]` range.
    #[error("discount percent {0} is outside the supported range of 0 to 100")]
    PercentOutOfRange(Decimal),

    /// Decimal arithmetic overflowed while applying the discount.
    #[error("discount calculation overflowed")]
    Overflow,
}

/// Applies a percentage discount to a unit price.
///
/// Returns `unit_price * (1 - discount_percent / 100)`. A zero percentage
/// returns the price unchanged; 100 returns zero.
///
/// # Errors
///
/// - [`DiscountError::PercentOutOfRange`]: `discount_percent` is negative or
///   greater than 100. Out-of-range percentages would produce negative
///   prices, so they are rejected before any payload is built.
/// - [`DiscountError::Overflow`]: the multiplication overflowed the decimal
///   range.
pub fn discounted_unit_price(
    unit_price: Decimal,
    discount_percent: Decimal,
) -> Result<Decimal, DiscountError> {
    if discount_percent < Decimal::ZERO || discount_percent > Decimal::ONE_HUNDRED {
        return Err(DiscountError::PercentOutOfRange(discount_percent));
    }

    let remaining = Decimal::ONE_HUNDRED - discount_percent;

    unit_price
        .checked_mul(remaining)
        .and_then(|scaled| scaled.checked_div(Decimal::ONE_HUNDRED))
        .ok_or(DiscountError::Overflow)
}
