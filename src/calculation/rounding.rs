//! Penny and pound rounding helpers.
//!
//! Statutory free-pay tables always round *up* to the next whole penny, so
//! these helpers operate on [`Decimal`] rather than binary floats: an exact
//! `.xx50` boundary must never drift to the neighbouring penny.

use rust_decimal::Decimal;

/// Number of minor units (pence) in one pound.
const PENCE_PER_POUND: Decimal = Decimal::ONE_HUNDRED;

/// Rounds an amount up to the next whole penny.
///
/// Amounts already on an exact penny are left unchanged. The result always
/// carries two decimal places.
///
/// # Example
///
/// ```
/// use tax_code_engine::calculation::ceil_to_penny;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let value = Decimal::from(2579) / Decimal::from(52);
/// assert_eq!(ceil_to_penny(value).to_string(), "49.60");
/// assert_eq!(ceil_to_penny(Decimal::from_str("48.25").unwrap()).to_string(), "48.25");
/// ```
pub fn ceil_to_penny(amount: Decimal) -> Decimal {
    let pence = (amount * PENCE_PER_POUND).ceil();
    with_penny_scale(pence / PENCE_PER_POUND)
}

/// Rounds an amount down to the whole pound below it.
///
/// The result always carries two decimal places, so `1048.32` becomes
/// `1048.00`.
pub fn floor_to_pound(amount: Decimal) -> Decimal {
    with_penny_scale(amount.floor())
}

fn with_penny_scale(mut amount: Decimal) -> Decimal {
    amount.rescale(2);
    amount
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_ceil_rounds_fraction_of_penny_up() {
        assert_eq!(ceil_to_penny(dec("0.3653846")), dec("0.37"));
        assert_eq!(ceil_to_penny(dec("96.3269")), dec("96.33"));
    }

    #[test]
    fn test_ceil_leaves_exact_penny_unchanged() {
        assert_eq!(ceil_to_penny(dec("48.25")), dec("48.25"));
        assert_eq!(ceil_to_penny(dec("1042.4700")), dec("1042.47"));
    }

    #[test]
    fn test_ceil_never_rounds_half_penny_down() {
        assert_eq!(ceil_to_penny(dec("10.005")), dec("10.01"));
        assert_eq!(ceil_to_penny(dec("10.0001")), dec("10.01"));
    }

    #[test]
    fn test_ceil_result_has_two_decimal_places() {
        assert_eq!(ceil_to_penny(dec("5")).to_string(), "5.00");
        assert_eq!(ceil_to_penny(dec("1047.4967")).to_string(), "1047.50");
    }

    #[test]
    fn test_ceil_of_zero_is_zero() {
        assert_eq!(ceil_to_penny(Decimal::ZERO).to_string(), "0.00");
    }

    #[test]
    fn test_floor_to_pound_drops_pence() {
        assert_eq!(floor_to_pound(dec("1048.32")).to_string(), "1048.00");
        assert_eq!(floor_to_pound(dec("241.99")).to_string(), "241.00");
    }

    #[test]
    fn test_floor_to_pound_keeps_whole_pounds() {
        assert_eq!(floor_to_pound(dec("12570")).to_string(), "12570.00");
    }
}
