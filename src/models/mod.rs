//! Core data models for the tax code engine.
//!
//! This module contains the domain models used throughout the engine.

mod pay_period;
mod tax_code;
mod tax_year;

pub use pay_period::PayPeriod;
pub use tax_code::{Region, Suffix, TaxCode};
pub(crate) use tax_code::TaxCodeParts;
pub use tax_year::TaxYear;
