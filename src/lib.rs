//! UK PAYE Tax Code Engine
//!
//! This crate parses UK PAYE tax codes (e.g. `1257L`, `SK123`, `C0TW1`),
//! calculates the tax-free pay each code grants per week or month, and looks
//! up the rates and bands that apply to the code's region from per-tax-year
//! schedule files.
//!
//! # Example
//!
//! ```
//! use tax_code_engine::models::{PayPeriod, TaxCode};
//! use tax_code_engine::calculation::calculate_allowance;
//! use rust_decimal::Decimal;
//!
//! let code = TaxCode::parse("1257L").unwrap();
//! assert_eq!(code.allowance(), Decimal::new(24192, 2));
//! assert_eq!(calculate_allowance(1257, PayPeriod::Monthly), Decimal::new(104832, 2));
//! ```

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod parser;
pub mod service;
