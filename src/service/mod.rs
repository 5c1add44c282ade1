//! Region rate and band queries.
//!
//! This module turns a loaded schedule into the rates and period-scaled
//! bands that apply to a parsed tax code.

mod tax_data;

pub use tax_data::{TaxData, TaxDataService};
