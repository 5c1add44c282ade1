//! Tax code models.
//!
//! This module contains the [`TaxCode`] record produced by the parser, along
//! with the [`Region`] and [`Suffix`] classifications it is built from.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::parser::TaxCodeParser;

/// The tax region a code applies to.
///
/// The region decides which rate/band schedule is used. Scottish codes are
/// prefixed with `S`, Welsh codes with `C`; unprefixed codes use the rest of
/// UK schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    /// England and Northern Ireland.
    #[default]
    Uk,
    /// Scottish taxpayers (`S` prefix).
    Scotland,
    /// Welsh taxpayers (`C` prefix).
    Wales,
}

impl Region {
    /// Returns the key used for this region in schedule data.
    ///
    /// # Example
    ///
    /// ```
    /// use tax_code_engine::models::Region;
    ///
    /// assert_eq!(Region::Scotland.as_str(), "scotland");
    /// ```
    pub fn as_str(self) -> &'static str {
        match self {
            Region::Uk => "uk",
            Region::Scotland => "scotland",
            Region::Wales => "wales",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The classification label of a tax code.
///
/// A suffix is either one of the standard letters (`L`, `M`, `N`, `T`), the
/// negative-allowance marker `K`, or one of the special fixed codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Suffix {
    /// Standard personal allowance.
    L,
    /// Marriage allowance recipient.
    M,
    /// Marriage allowance transferor.
    N,
    /// Allowance needs review by the tax authority.
    T,
    /// Negative allowance; the numeric part is added to taxable pay.
    K,
    /// All pay taxed at the basic rate.
    #[serde(rename = "BR")]
    Br,
    /// All pay taxed at the higher rate.
    D0,
    /// All pay taxed at the additional rate.
    D1,
    /// All pay taxed at the top rate (Scotland).
    D2,
    /// No tax withheld.
    #[serde(rename = "NT")]
    Nt,
    /// No personal allowance; pay taxed through the bands.
    #[serde(rename = "0T")]
    ZeroT,
}

impl Suffix {
    /// Returns the suffix as written in a tax code.
    pub fn as_str(self) -> &'static str {
        match self {
            Suffix::L => "L",
            Suffix::M => "M",
            Suffix::N => "N",
            Suffix::T => "T",
            Suffix::K => "K",
            Suffix::Br => "BR",
            Suffix::D0 => "D0",
            Suffix::D1 => "D1",
            Suffix::D2 => "D2",
            Suffix::Nt => "NT",
            Suffix::ZeroT => "0T",
        }
    }

    /// Maps a standard suffix letter to its [`Suffix`].
    ///
    /// Returns `None` for anything other than `L`, `M`, `N` or `T`.
    pub fn from_standard_letter(letter: char) -> Option<Self> {
        match letter {
            'L' => Some(Suffix::L),
            'M' => Some(Suffix::M),
            'N' => Some(Suffix::N),
            'T' => Some(Suffix::T),
            _ => None,
        }
    }

    /// Whether this suffix is a special fixed code with no numeric part.
    pub fn is_special(self) -> bool {
        matches!(
            self,
            Suffix::Br | Suffix::D0 | Suffix::D1 | Suffix::D2 | Suffix::Nt | Suffix::ZeroT
        )
    }

    /// Whether all pay under this suffix is taxed at a single flat rate.
    pub fn is_flat_rate(self) -> bool {
        matches!(self, Suffix::Br | Suffix::D0 | Suffix::D1 | Suffix::D2)
    }
}

impl fmt::Display for Suffix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed tax code.
///
/// Records are built once by [`TaxCodeParser::parse`] and never change
/// afterwards. The allowance is always a non-negative magnitude; K-codes are
/// flagged through [`TaxCode::is_allowance_negative`] so that payroll logic
/// can apply the deduction explicitly.
///
/// # Example
///
/// ```
/// use tax_code_engine::models::{Region, Suffix, TaxCode};
///
/// let code: TaxCode = "s1257l".parse().unwrap();
/// assert_eq!(code.code(), "S1257L");
/// assert_eq!(code.region(), Region::Scotland);
/// assert_eq!(code.suffix(), Suffix::L);
/// assert_eq!(code.numeric_part(), 1257);
/// assert_eq!(code.allowance().to_string(), "241.92");
/// assert!(code.is_cumulative());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaxCode {
    code: String,
    region: Region,
    suffix: Suffix,
    numeric_part: u32,
    allowance: Decimal,
    is_allowance_negative: bool,
    is_emergency: bool,
    is_cumulative: bool,
}

/// Field values for a [`TaxCode`], assembled by the parser.
#[derive(Debug, Clone)]
pub(crate) struct TaxCodeParts {
    pub code: String,
    pub region: Region,
    pub suffix: Suffix,
    pub numeric_part: u32,
    pub allowance: Decimal,
    pub is_allowance_negative: bool,
    pub is_emergency: bool,
    pub is_cumulative: bool,
}

impl TaxCode {
    pub(crate) fn from_parts(parts: TaxCodeParts) -> Self {
        debug_assert!(!(parts.is_emergency && parts.is_cumulative));
        debug_assert!(!(parts.is_allowance_negative && parts.suffix.is_special()));
        Self {
            code: parts.code,
            region: parts.region,
            suffix: parts.suffix,
            numeric_part: parts.numeric_part,
            allowance: parts.allowance,
            is_allowance_negative: parts.is_allowance_negative,
            is_emergency: parts.is_emergency,
            is_cumulative: parts.is_cumulative,
        }
    }

    /// Parses a tax code string. Equivalent to [`TaxCodeParser::parse`].
    pub fn parse(raw: &str) -> EngineResult<Self> {
        TaxCodeParser::parse(raw)
    }

    /// The normalized (trimmed, uppercase) code as supplied.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// The region whose schedule applies.
    pub fn region(&self) -> Region {
        self.region
    }

    /// The classification suffix.
    pub fn suffix(&self) -> Suffix {
        self.suffix
    }

    /// The numeric part of the code; 0 for special codes.
    pub fn numeric_part(&self) -> u32 {
        self.numeric_part
    }

    /// The weekly free pay (or deduction, for K-codes) as a positive amount.
    pub fn allowance(&self) -> Decimal {
        self.allowance
    }

    /// Whether the allowance is a deduction added to taxable pay.
    pub fn is_allowance_negative(&self) -> bool {
        self.is_allowance_negative
    }

    /// Whether the code carries an emergency indicator.
    pub fn is_emergency(&self) -> bool {
        self.is_emergency
    }

    /// Whether tax is worked out on a cumulative (year-to-date) basis.
    pub fn is_cumulative(&self) -> bool {
        self.is_cumulative
    }

    /// Whether the code is one of the special fixed codes.
    pub fn is_special(&self) -> bool {
        self.suffix.is_special()
    }

    /// Whether all pay is taxed at a single flat rate (`BR`, `D0`, `D1`, `D2`).
    ///
    /// Flat-rate codes bypass banded rates entirely.
    pub fn should_use_flat_rate(&self) -> bool {
        self.suffix.is_flat_rate()
    }
}

impl FromStr for TaxCode {
    type Err = EngineError;

    fn from_str(s: &str) -> EngineResult<Self> {
        TaxCodeParser::parse(s)
    }
}

impl fmt::Display for TaxCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code)
    }
}
