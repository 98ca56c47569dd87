//! Common utility functions for cost calculations.
//!
//! This module provides the rounding conventions used when cost figures are
//! displayed, and small aggregate helpers shared by the calculator and the
//! reference catalog.

use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal places shown for the hourly per-head rate.
pub const HOURLY_RATE_DECIMAL_PLACES: u32 = 6;

/// Rounds a monthly amount to whole currency units using half-up rounding.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use gcc_core::calculations::common::round_currency;
///
/// assert_eq!(round_currency(dec!(155000.49)), dec!(155000));
/// assert_eq!(round_currency(dec!(155000.50)), dec!(155001));
/// ```
pub fn round_currency(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds an hourly rate to [`HOURLY_RATE_DECIMAL_PLACES`] using half-up rounding.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use gcc_core::calculations::common::round_hourly_rate;
///
/// assert_eq!(round_hourly_rate(dec!(1.5196078431)), dec!(1.519608));
/// ```
pub fn round_hourly_rate(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(
        HOURLY_RATE_DECIMAL_PLACES,
        RoundingStrategy::MidpointAwayFromZero,
    )
}

/// Arithmetic mean of `values`, or `None` when there are none.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use gcc_core::calculations::common::mean;
///
/// assert_eq!(mean([dec!(10), dec!(20)]), Some(dec!(15)));
/// assert_eq!(mean(Vec::new()), None);
/// ```
pub fn mean<I>(values: I) -> Option<Decimal>
where
    I: IntoIterator<Item = Decimal>,
{
    let (sum, count) = values
        .into_iter()
        .fold((Decimal::ZERO, 0u32), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        None
    } else {
        Some(sum / Decimal::from(count))
    }
}
