//! Rate/band schedule configuration for the tax code engine.
//!
//! This module provides functionality to load a tax year's rates and bands
//! from YAML or JSON files, one file per tax year.
//!
//! # Example
//!
//! ```no_run
//! use tax_code_engine::config::ScheduleLoader;
//! use tax_code_engine::models::TaxYear;
//!
//! let schedule = ScheduleLoader::load_year("./config/tax_years", TaxYear::new(2025)).unwrap();
//! println!("Loaded {} regions", schedule.regions().len());
//! ```

mod loader;
mod types;

pub use loader::{ScheduleFormat, ScheduleLoader};
pub use types::{Band, RegionSchedule, TaxYearSchedule, bare_name};
