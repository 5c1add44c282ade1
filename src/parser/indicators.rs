//! Emergency and non-cumulative indicator handling.

use lazy_static::lazy_static;
use regex::Regex;

/// Substrings that mark a code as emergency or non-cumulative, in the order
/// they are stripped from a code body.
pub(super) const INDICATORS: [&str; 4] = ["X", "W1", "M1", "EMERGENCY"];

const EMERGENCY_MARKERS: [&str; 2] = ["X", "EMERGENCY"];
const NON_CUMULATIVE_MARKERS: [&str; 2] = ["W1", "M1"];

lazy_static! {
    /// A standard code immediately followed by the `X` emergency marker.
    static ref EMERGENCY_SUFFIX: Regex =
        Regex::new(r"[0-9]+[LMNT]X$").expect("emergency suffix pattern is valid");
}

/// The basis a code is operated on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Indicators {
    pub is_emergency: bool,
    pub is_cumulative: bool,
}

impl Indicators {
    /// Detects indicators on the complete normalized code.
    ///
    /// `normalized` must be the whole trimmed, uppercased code *before* any
    /// prefix or indicator is removed, because later stages strip exactly
    /// the markers looked for here.
    pub fn detect(normalized: &str) -> Self {
        let is_emergency = EMERGENCY_MARKERS
            .iter()
            .any(|marker| normalized.contains(marker))
            || EMERGENCY_SUFFIX.is_match(normalized);

        let is_non_cumulative = is_emergency
            || NON_CUMULATIVE_MARKERS
                .iter()
                .any(|marker| normalized.contains(marker));

        Self {
            is_emergency,
            is_cumulative: !is_non_cumulative,
        }
    }
}

/// Removes every indicator substring from a code body.
pub(super) fn strip_indicators(body: &str) -> String {
    INDICATORS
        .iter()
        .fold(body.to_string(), |acc, indicator| acc.replace(indicator, ""))
}
