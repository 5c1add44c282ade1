//! Error types for the tax code engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure the parser, schedule loader and data service can report.

use thiserror::Error;

/// The main error type for the tax code engine.
///
/// All fallible operations in the crate return this error type. The parser
/// only ever produces [`EngineError::EmptyInput`] and
/// [`EngineError::UnrecognizedFormat`]; the data service only produces
/// [`EngineError::UnknownRegion`].
///
/// # Example
///
/// ```
/// use tax_code_engine::error::EngineError;
///
/// let error = EngineError::UnknownRegion {
///     region: "atlantis".to_string(),
/// };
/// assert_eq!(error.to_string(), "Unknown region: atlantis");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The tax code was empty or contained only whitespace.
    #[error("Tax code cannot be empty")]
    EmptyInput,

    /// The tax code body matched none of the known shapes.
    #[error("Invalid tax code format: {code}")]
    UnrecognizedFormat {
        /// The offending code body, after any regional prefix was removed.
        code: String,
    },

    /// A region was requested that the loaded schedule does not contain.
    #[error("Unknown region: {region}")]
    UnknownRegion {
        /// The region key that was looked up.
        region: String,
    },

    /// A schedule file or directory was not found.
    #[error("Schedule file not found: {path}")]
    ScheduleNotFound {
        /// The path that was not found.
        path: String,
    },

    /// A schedule file could not be parsed or contained invalid data.
    #[error("Failed to parse schedule file '{path}': {message}")]
    ScheduleParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A tax year label could not be parsed.
    #[error("Invalid tax year: {value}")]
    InvalidTaxYear {
        /// The value that was rejected.
        value: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
