//! UK tax year model.
//!
//! A UK tax year runs from 6 April to the following 5 April and is written
//! as `YYYY-YY`, e.g. `2025-26`. Schedule data files are named after this
//! label.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Month in which a tax year starts.
const START_MONTH: u32 = 4;
/// Day of [`START_MONTH`] on which a tax year starts.
const START_DAY: u32 = 6;

/// A UK tax year, identified by the calendar year it starts in.
///
/// # Example
///
/// ```
/// use tax_code_engine::models::TaxYear;
/// use chrono::NaiveDate;
///
/// let year = TaxYear::containing(NaiveDate::from_ymd_opt(2026, 1, 15).unwrap());
/// assert_eq!(year.label(), "2025-26");
/// assert_eq!(year.start_date(), NaiveDate::from_ymd_opt(2025, 4, 6).unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TaxYear {
    start_year: i32,
}

impl TaxYear {
    /// Creates the tax year that starts on 6 April of `start_year`.
    pub fn new(start_year: i32) -> Self {
        Self { start_year }
    }

    /// Returns the tax year a given date falls in.
    ///
    /// Dates on or after 6 April belong to the tax year starting that
    /// calendar year; earlier dates belong to the previous one.
    pub fn containing(date: NaiveDate) -> Self {
        let starts_this_year = (date.month(), date.day()) >= (START_MONTH, START_DAY);
        if starts_this_year {
            Self::new(date.year())
        } else {
            Self::new(date.year() - 1)
        }
    }

    /// Returns the calendar year the tax year starts in.
    pub fn start_year(&self) -> i32 {
        self.start_year
    }

    /// Returns the first day of the tax year (6 April).
    pub fn start_date(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.start_year, START_MONTH, START_DAY)
            .unwrap_or(NaiveDate::MIN)
    }

    /// Returns the last day of the tax year (5 April of the following year).
    pub fn end_date(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.start_year + 1, START_MONTH, START_DAY - 1)
            .unwrap_or(NaiveDate::MAX)
    }

    /// Checks whether a date falls inside this tax year (inclusive).
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date() && date <= self.end_date()
    }

    /// Returns the `YYYY-YY` label used for schedule file names.
    pub fn label(&self) -> String {
        format!(
            "{}-{:02}",
            self.start_year,
            (self.start_year + 1).rem_euclid(100)
        )
    }
}

impl fmt::Display for TaxYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl FromStr for TaxYear {
    type Err = EngineError;

    /// Parses a `YYYY-YY` label. The two-digit end year must follow the
    /// start year.
    fn from_str(s: &str) -> EngineResult<Self> {
        let invalid = || EngineError::InvalidTaxYear {
            value: s.to_string(),
        };

        let (start, end) = s.trim().split_once('-').ok_or_else(invalid)?;
        let all_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
        if start.len() != 4 || end.len() != 2 || !all_digits(start) || !all_digits(end) {
            return Err(invalid());
        }

        let start_year: i32 = start.parse().map_err(|_| invalid())?;
        let end_suffix: i32 = end.parse().map_err(|_| invalid())?;
        if (start_year + 1).rem_euclid(100) != end_suffix {
            return Err(invalid());
        }

        Ok(Self::new(start_year))
    }
}

impl TryFrom<String> for TaxYear {
    type Error = EngineError;

    fn try_from(value: String) -> EngineResult<Self> {
        value.parse()
    }
}

impl From<TaxYear> for String {
    fn from(year: TaxYear) -> Self {
        year.label()
    }
}
