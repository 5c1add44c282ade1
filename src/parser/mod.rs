//! Tax code parsing.
//!
//! This module turns an arbitrary input string into a [`TaxCode`]. Parsing
//! runs in independent stages whose outcomes are merged into the final
//! record:
//!
//! 1. indicator detection (emergency / non-cumulative) on the full code
//! 2. regional prefix (`S` Scotland, `C` Wales)
//! 3. K prefix (negative allowance)
//! 4. indicator stripping (`X`, `W1`, `M1`, `EMERGENCY`)
//! 5. shape classification: special code, then `digits + L/M/N/T`, then
//!    digits only
//!
//! # Example
//!
//! ```
//! use tax_code_engine::models::{Region, Suffix};
//! use tax_code_engine::parser::TaxCodeParser;
//!
//! let code = TaxCodeParser::parse("SK789LX").unwrap();
//! assert_eq!(code.region(), Region::Scotland);
//! assert_eq!(code.suffix(), Suffix::L);
//! assert!(code.is_allowance_negative());
//! assert!(code.is_emergency());
//! assert!(!code.is_cumulative());
//! ```

mod indicators;
mod prefix;
mod shape;

use tracing::{debug, warn};

use crate::error::{EngineError, EngineResult};
use crate::models::{TaxCode, TaxCodeParts};

use indicators::{Indicators, strip_indicators};
use prefix::{split_negative_prefix, split_region_prefix};
use shape::Shape;

/// Parses tax code strings into [`TaxCode`] records.
///
/// The parser holds no state; every call is independent.
#[derive(Debug, Clone, Copy, Default)]
pub struct TaxCodeParser;

impl TaxCodeParser {
    /// Parses a tax code.
    ///
    /// Input is trimmed and uppercased before anything else, so `" s1257l "`
    /// and `"S1257L"` produce identical records.
    ///
    /// # Returns
    ///
    /// Returns the parsed record, or an error if:
    /// - The trimmed input is empty (`EmptyInput`)
    /// - What remains after removing prefixes and indicators matches no known
    ///   shape (`UnrecognizedFormat`)
    pub fn parse(raw: &str) -> EngineResult<TaxCode> {
        let code = normalize(raw);
        if code.is_empty() {
            warn!("Rejected empty tax code");
            return Err(EngineError::EmptyInput);
        }

        let indicators = Indicators::detect(&code);
        let (region, body) = split_region_prefix(&code);
        let (is_allowance_negative, unsigned_body) = split_negative_prefix(body);
        let cleaned = strip_indicators(unsigned_body);

        // A K prefix is only meaningful on a numeric code.
        let shape = Shape::classify(&cleaned)
            .filter(|shape| !(is_allowance_negative && shape.is_special()))
            .ok_or_else(|| {
                warn!(code = %code, body = %body, "Unrecognized tax code format");
                EngineError::UnrecognizedFormat {
                    code: body.to_string(),
                }
            })?;
        let classification = shape.resolve(is_allowance_negative);

        debug!(
            code = %code,
            region = %region,
            suffix = %classification.suffix,
            numeric_part = classification.numeric_part,
            emergency = indicators.is_emergency,
            cumulative = indicators.is_cumulative,
            "Parsed tax code"
        );

        Ok(TaxCode::from_parts(TaxCodeParts {
            code,
            region,
            suffix: classification.suffix,
            numeric_part: classification.numeric_part,
            allowance: classification.allowance,
            is_allowance_negative,
            is_emergency: indicators.is_emergency,
            is_cumulative: indicators.is_cumulative,
        }))
    }
}

fn normalize(raw: &str) -> String {
    raw.trim().to_uppercase()
}
