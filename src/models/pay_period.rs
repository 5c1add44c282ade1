//! Pay period model.
//!
//! This module contains the [`PayPeriod`] type used to select the frequency
//! that free-pay allowances and band thresholds are expressed in.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The frequency an employee is paid at.
///
/// Statutory free-pay tables are published for weekly and monthly pay, and
/// annual band thresholds are rescaled to one of these periods.
///
/// # Example
///
/// ```
/// use tax_code_engine::models::PayPeriod;
///
/// assert_eq!(PayPeriod::Weekly.periods_per_year(), 52);
/// assert_eq!(PayPeriod::Monthly.periods_per_year(), 12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayPeriod {
    /// Paid every week (52 periods a year).
    #[default]
    Weekly,
    /// Paid every calendar month (12 periods a year).
    Monthly,
}

impl PayPeriod {
    /// Returns the number of pay periods in a tax year.
    pub fn periods_per_year(self) -> u32 {
        match self {
            PayPeriod::Weekly => 52,
            PayPeriod::Monthly => 12,
        }
    }

    /// Returns [`PayPeriod::periods_per_year`] as a [`Decimal`] divisor.
    pub fn divisor(self) -> Decimal {
        Decimal::from(self.periods_per_year())
    }

    /// Returns the lowercase name of the period.
    pub fn as_str(self) -> &'static str {
        match self {
            PayPeriod::Weekly => "weekly",
            PayPeriod::Monthly => "monthly",
        }
    }
}

impl fmt::Display for PayPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekly_has_52_periods() {
        assert_eq!(PayPeriod::Weekly.periods_per_year(), 52);
        assert_eq!(PayPeriod::Weekly.divisor(), Decimal::from(52));
    }

    #[test]
    fn test_monthly_has_12_periods() {
        assert_eq!(PayPeriod::Monthly.periods_per_year(), 12);
        assert_eq!(PayPeriod::Monthly.divisor(), Decimal::from(12));
    }

    #[test]
    fn test_default_is_weekly() {
        assert_eq!(PayPeriod::default(), PayPeriod::Weekly);
    }

    #[test]
    fn test_serializes_as_snake_case() {
        assert_eq!(
            serde_json::to_string(&PayPeriod::Monthly).unwrap(),
            "\"monthly\""
        );
        let period: PayPeriod = serde_json::from_str("\"weekly\"").unwrap();
        assert_eq!(period, PayPeriod::Weekly);
    }

    #[test]
    fn test_display_matches_as_str() {
        assert_eq!(PayPeriod::Weekly.to_string(), "weekly");
        assert_eq!(PayPeriod::Monthly.to_string(), "monthly");
    }
}
