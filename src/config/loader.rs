//! Schedule loading functionality.
//!
//! This module provides the [`ScheduleLoader`] type for loading a tax
//! year's rate/band schedule from YAML or JSON files.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::error::{EngineError, EngineResult};
use crate::models::TaxYear;

use super::types::TaxYearSchedule;

/// The file formats a schedule can be stored in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleFormat {
    /// YAML (`.yaml` or `.yml`).
    Yaml,
    /// JSON (`.json`).
    Json,
}

impl ScheduleFormat {
    /// File extensions tried, in order, when looking a tax year up.
    const SEARCH_ORDER: [(&'static str, ScheduleFormat); 3] = [
        ("yaml", ScheduleFormat::Yaml),
        ("yml", ScheduleFormat::Yaml),
        ("json", ScheduleFormat::Json),
    ];

    /// Picks a format from a file's extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        Self::SEARCH_ORDER
            .iter()
            .find(|(ext, _)| *ext == extension)
            .map(|&(_, format)| format)
    }
}

/// Loads tax year schedules from disk.
///
/// # Directory Structure
///
/// Schedules are stored one file per tax year, named after the tax year
/// label:
/// ```text
/// config/tax_years/
/// ├── 2024-25.json
/// └── 2025-26.yaml
/// ```
///
/// # Example
///
/// ```no_run
/// use tax_code_engine::config::ScheduleLoader;
/// use tax_code_engine::models::TaxYear;
///
/// let schedule = ScheduleLoader::load_year("./config/tax_years", TaxYear::new(2025))?;
/// println!("Regions: {:?}", schedule.regions().keys().collect::<Vec<_>>());
/// # Ok::<(), tax_code_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ScheduleLoader;

impl ScheduleLoader {
    /// Loads a schedule from a single file.
    ///
    /// The format is chosen from the file extension.
    ///
    /// # Returns
    ///
    /// Returns the schedule on success, or an error if:
    /// - The file is missing or unreadable (`ScheduleNotFound`)
    /// - The extension is not a supported format, or the contents are not a
    ///   valid schedule (`ScheduleParseError`)
    pub fn load_file<P: AsRef<Path>>(path: P) -> EngineResult<TaxYearSchedule> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let format = ScheduleFormat::from_path(path).ok_or_else(|| {
            EngineError::ScheduleParseError {
                path: path_str.clone(),
                message: "unsupported file extension (expected .yaml, .yml or .json)".to_string(),
            }
        })?;

        let content = fs::read_to_string(path).map_err(|_| EngineError::ScheduleNotFound {
            path: path_str.clone(),
        })?;

        let schedule = Self::parse_str(&content, format).map_err(|message| {
            EngineError::ScheduleParseError {
                path: path_str.clone(),
                message,
            }
        })?;

        info!(
            path = %path_str,
            tax_year = ?schedule.tax_year().map(|year| year.label()),
            regions = schedule.regions().len(),
            "Loaded tax year schedule"
        );

        Ok(schedule)
    }

    /// Loads the schedule for a tax year from a directory.
    ///
    /// Looks for `<label>.yaml`, `<label>.yml` and `<label>.json` in that
    /// order. If the file declares a tax year it must match the one asked for.
    pub fn load_year<P: AsRef<Path>>(dir: P, tax_year: TaxYear) -> EngineResult<TaxYearSchedule> {
        let dir = dir.as_ref();
        let path = Self::find_year_file(dir, tax_year)?;
        let schedule = Self::load_file(&path)?;

        match schedule.tax_year() {
            Some(declared) if declared != tax_year => Err(EngineError::ScheduleParseError {
                path: path.display().to_string(),
                message: format!(
                    "schedule declares tax year {} but {} was requested",
                    declared, tax_year
                ),
            }),
            _ => Ok(schedule),
        }
    }

    /// Loads the schedule for the tax year containing `date`.
    pub fn load_for_date<P: AsRef<Path>>(dir: P, date: NaiveDate) -> EngineResult<TaxYearSchedule> {
        Self::load_year(dir, TaxYear::containing(date))
    }

    /// Parses schedule contents that have already been read.
    ///
    /// Returns the underlying parser message on failure.
    pub fn parse_str(content: &str, format: ScheduleFormat) -> Result<TaxYearSchedule, String> {
        match format {
            ScheduleFormat::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
            ScheduleFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
        }
    }

    fn find_year_file(dir: &Path, tax_year: TaxYear) -> EngineResult<PathBuf> {
        let label = tax_year.label();

        for (extension, _) in ScheduleFormat::SEARCH_ORDER {
            let candidate = dir.join(format!("{}.{}", label, extension));
            if candidate.is_file() {
                debug!(path = %candidate.display(), "Found schedule file");
                return Ok(candidate);
            }
        }

        Err(EngineError::ScheduleNotFound {
            path: dir.join(format!("{}.{{yaml,yml,json}}", label)).display().to_string(),
        })
    }
}
