//! Free-pay allowance calculation.
//!
//! This module converts the numeric part of a tax code into the amount of
//! pay that is free of tax for one pay period, reproducing the statutory
//! free-pay tables to the penny.

use rust_decimal::Decimal;

use crate::models::PayPeriod;

use super::rounding::ceil_to_penny;

/// Size of one complete block of the numeric part.
pub const ALLOWANCE_BLOCK_SIZE: u32 = 500;

/// Weekly free pay for each complete block of [`ALLOWANCE_BLOCK_SIZE`], in pounds.
pub const WEEKLY_BLOCK_VALUE: Decimal = Decimal::from_parts(9616, 0, 0, false, 2);

/// Calculates the free pay for a tax code's numeric part.
///
/// The numeric part is split into complete blocks of 500 and a remainder.
/// Each complete block is worth a fixed £96.16 a week; the remainder is
/// turned into an annual figure (`remainder * 10 + 9`), divided by 52 and
/// rounded up to the next penny. Monthly free pay is the weekly total
/// scaled by 52/12 and rounded up to the next penny again.
///
/// # Arguments
///
/// * `numeric_part` - The numeric part of the tax code (e.g. 1257 for `1257L`)
/// * `period` - The pay period the amount is wanted for
///
/// # Returns
///
/// Returns the free pay for one period with two decimal places. A numeric
/// part of zero always yields `0.00`.
///
/// # Examples
///
/// ```
/// use tax_code_engine::calculation::calculate_allowance;
/// use tax_code_engine::models::PayPeriod;
///
/// assert_eq!(calculate_allowance(1257, PayPeriod::Weekly).to_string(), "241.92");
/// assert_eq!(calculate_allowance(1257, PayPeriod::Monthly).to_string(), "1048.32");
/// assert_eq!(calculate_allowance(0, PayPeriod::Monthly).to_string(), "0.00");
/// ```
pub fn calculate_allowance(numeric_part: u32, period: PayPeriod) -> Decimal {
    if numeric_part == 0 {
        return Decimal::new(0, 2);
    }

    let adjusted = numeric_part - 1;
    let quotient = adjusted / ALLOWANCE_BLOCK_SIZE;
    let remainder = adjusted % ALLOWANCE_BLOCK_SIZE + 1;

    let quotient_value = Decimal::from(quotient) * WEEKLY_BLOCK_VALUE;

    let remainder_annual = Decimal::from(remainder * 10 + 9);
    let remainder_weekly = ceil_to_penny(remainder_annual / PayPeriod::Weekly.divisor());

    let weekly_total = remainder_weekly + quotient_value;

    match period {
        PayPeriod::Weekly => weekly_total,
        // Multiply before dividing so the only inexact step is the final division.
        PayPeriod::Monthly => ceil_to_penny(
            weekly_total * PayPeriod::Weekly.divisor() / PayPeriod::Monthly.divisor(),
        ),
    }
}
