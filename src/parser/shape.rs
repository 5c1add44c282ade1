//! Shape classification of a cleaned code body.
//!
//! A body is tried against the special fixed codes first, then the standard
//! `digits + letter` shape, then a bare run of digits.

use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;

use crate::calculation::calculate_allowance;
use crate::models::{PayPeriod, Suffix};

/// A special fixed code and the allowance it carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct SpecialCode {
    pub code: &'static str,
    pub suffix: Suffix,
    allowance_pence: i64,
}

impl SpecialCode {
    pub fn allowance(&self) -> Decimal {
        Decimal::new(self.allowance_pence, 2)
    }
}

/// Allowance used for `NT`: larger than any realistic pay, so nothing is
/// ever taxed.
const NO_TAX_ALLOWANCE_PENCE: i64 = 99_999_999;

pub(super) const SPECIAL_CODES: [SpecialCode; 6] = [
    SpecialCode { code: "BR", suffix: Suffix::Br, allowance_pence: 0 },
    SpecialCode { code: "D0", suffix: Suffix::D0, allowance_pence: 0 },
    SpecialCode { code: "D1", suffix: Suffix::D1, allowance_pence: 0 },
    SpecialCode { code: "D2", suffix: Suffix::D2, allowance_pence: 0 },
    SpecialCode { code: "NT", suffix: Suffix::Nt, allowance_pence: NO_TAX_ALLOWANCE_PENCE },
    SpecialCode { code: "0T", suffix: Suffix::ZeroT, allowance_pence: 0 },
];

lazy_static! {
    /// Digits followed by one standard suffix letter.
    static ref STANDARD_CODE: Regex =
        Regex::new(r"^([0-9]+)([LMNT])$").expect("standard code pattern is valid");

    /// Digits only.
    static ref NUMERIC_ONLY: Regex =
        Regex::new(r"^[0-9]+$").expect("numeric code pattern is valid");
}

/// The recognised shape of a cleaned code body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Shape {
    /// One of the special fixed codes.
    Special(SpecialCode),
    /// Digits followed by one of `L`, `M`, `N`, `T`.
    Standard { numeric_part: u32, suffix: Suffix },
    /// Digits only, as left behind by a K-code.
    NumericOnly { numeric_part: u32 },
}

/// The suffix, numeric part and weekly allowance a shape resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Classification {
    pub suffix: Suffix,
    pub numeric_part: u32,
    pub allowance: Decimal,
}

impl Shape {
    /// Classifies a body with all prefixes and indicators removed.
    ///
    /// Returns `None` when the body matches no known shape, including when
    /// its digits do not fit in a `u32`.
    pub fn classify(body: &str) -> Option<Self> {
        if let Some(special) = SPECIAL_CODES.iter().find(|special| special.code == body) {
            return Some(Shape::Special(*special));
        }

        if let Some(captures) = STANDARD_CODE.captures(body) {
            let numeric_part = captures[1].parse().ok()?;
            let suffix = captures[2].chars().next().and_then(Suffix::from_standard_letter)?;
            return Some(Shape::Standard {
                numeric_part,
                suffix,
            });
        }

        if NUMERIC_ONLY.is_match(body) {
            let numeric_part = body.parse().ok()?;
            return Some(Shape::NumericOnly { numeric_part });
        }

        None
    }

    pub fn is_special(&self) -> bool {
        matches!(self, Shape::Special(_))
    }

    /// Resolves the shape into its final classification.
    ///
    /// A bare numeric body takes suffix `K` when the code carried a K prefix
    /// and `L` otherwise.
    pub fn resolve(self, is_allowance_negative: bool) -> Classification {
        match self {
            Shape::Special(special) => Classification {
                suffix: special.suffix,
                numeric_part: 0,
                allowance: special.allowance(),
            },
            Shape::Standard {
                numeric_part,
                suffix,
            } => Classification {
                suffix,
                numeric_part,
                allowance: calculate_allowance(numeric_part, PayPeriod::Weekly),
            },
            Shape::NumericOnly { numeric_part } => Classification {
                suffix: if is_allowance_negative { Suffix::K } else { Suffix::L },
                numeric_part,
                allowance: calculate_allowance(numeric_part, PayPeriod::Weekly),
            },
        }
    }
}
