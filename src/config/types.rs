//! Schedule types for rate/band data.
//!
//! This module contains the strongly-typed structures that a tax year's
//! schedule file is deserialized into. Region entries are accepted in two
//! layouts and normalized into a single [`RegionSchedule`]:
//!
//! ```yaml
//! # flat: suffix-keyed entries
//! uk:
//!   basicRate: 0.20
//!   basicRateBand: { start: 12571, end: 50270 }
//!
//! # separated: explicit rates and bands
//! uk:
//!   rates: { basic: 0.20 }
//!   bands: { basic: { start: 12571, end: 50270 } }
//! ```

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::models::{PayPeriod, TaxYear};

const RATE_KEY_SUFFIX: &str = "Rate";
const BAND_KEY_SUFFIX: &str = "Band";

/// Strips the `...Band` and `...Rate` key suffixes from a schedule key.
///
/// Both `basicRate` and `basicRateBand` normalize to `basic`, so a band
/// shares its name with the rate that applies to it.
pub fn bare_name(key: &str) -> &str {
    let key = key.strip_suffix(BAND_KEY_SUFFIX).unwrap_or(key);
    key.strip_suffix(RATE_KEY_SUFFIX).unwrap_or(key)
}

/// A contiguous pay range taxed at a single rate.
///
/// Both bounds are inclusive. A `start` of `None` means the band runs from
/// zero, and an `end` of `None` means it is unbounded above.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Band {
    /// The lower bound of the band, or `None` for a band starting at zero.
    pub start: Option<Decimal>,
    /// The upper bound of the band, or `None` for the top band.
    pub end: Option<Decimal>,
}

impl Band {
    /// Creates a band from its bounds.
    pub fn new(start: Option<Decimal>, end: Option<Decimal>) -> Self {
        Self { start, end }
    }

    /// Rescales annual bounds to a pay period.
    ///
    /// Each bound is divided by the number of periods in a year and floored
    /// to an integer. Missing bounds stay missing.
    ///
    /// # Example
    ///
    /// ```
    /// use tax_code_engine::config::Band;
    /// use tax_code_engine::models::PayPeriod;
    /// use rust_decimal::Decimal;
    ///
    /// let band = Band::new(Some(Decimal::from(12532)), None);
    /// let weekly = band.rescale(PayPeriod::Weekly);
    /// assert_eq!(weekly.start, Some(Decimal::from(241)));
    /// assert_eq!(weekly.end, None);
    /// ```
    pub fn rescale(&self, period: PayPeriod) -> Self {
        let divisor = period.divisor();
        let scale = |bound: Decimal| (bound / divisor).floor();
        Self {
            start: self.start.map(scale),
            end: self.end.map(scale),
        }
    }

    /// Whether the band has no upper bound.
    pub fn is_unbounded(&self) -> bool {
        self.end.is_none()
    }

    fn validate(&self, name: &str) -> Result<(), String> {
        match (self.start, self.end) {
            (Some(start), Some(end)) if end < start => Err(format!(
                "band '{}' ends ({}) before it starts ({})",
                name, end, start
            )),
            _ => Ok(()),
        }
    }
}

/// The rates and bands for one region, keyed by bare name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawRegionSchedule")]
pub struct RegionSchedule {
    rates: BTreeMap<String, Decimal>,
    bands: BTreeMap<String, Band>,
}

impl RegionSchedule {
    /// Creates a region schedule, normalizing every key to its bare name.
    pub fn new(rates: BTreeMap<String, Decimal>, bands: BTreeMap<String, Band>) -> Self {
        Self {
            rates: rates
                .into_iter()
                .map(|(key, rate)| (bare_name(&key).to_string(), rate))
                .collect(),
            bands: bands
                .into_iter()
                .map(|(key, band)| (bare_name(&key).to_string(), band))
                .collect(),
        }
    }

    /// Returns the rate percentages, as fractions (0.20 for 20%).
    pub fn rates(&self) -> &BTreeMap<String, Decimal> {
        &self.rates
    }

    /// Returns the bands in annual terms.
    pub fn bands(&self) -> &BTreeMap<String, Band> {
        &self.bands
    }

    fn validated(self) -> Result<Self, String> {
        for (name, band) in &self.bands {
            band.validate(name)?;
        }
        Ok(self)
    }
}

/// A single entry in the flat layout.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FlatEntry {
    Rate(Decimal),
    Band(Band),
    Other(IgnoredAny),
}

/// A region entry as it appears in a schedule file.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawRegionSchedule {
    Separated {
        rates: BTreeMap<String, Decimal>,
        bands: BTreeMap<String, Band>,
    },
    Flat(BTreeMap<String, FlatEntry>),
}

impl TryFrom<RawRegionSchedule> for RegionSchedule {
    type Error = String;

    fn try_from(raw: RawRegionSchedule) -> Result<Self, Self::Error> {
        match raw {
            RawRegionSchedule::Separated { rates, bands } => {
                RegionSchedule::new(rates, bands).validated()
            }
            RawRegionSchedule::Flat(entries) => {
                let mut rates = BTreeMap::new();
                let mut bands = BTreeMap::new();

                for (key, entry) in entries {
                    let is_band_key = key.ends_with(BAND_KEY_SUFFIX);
                    let is_rate_key = !is_band_key && key.ends_with(RATE_KEY_SUFFIX);

                    match entry {
                        FlatEntry::Band(band) if is_band_key => {
                            bands.insert(key, band);
                        }
                        FlatEntry::Rate(rate) if is_rate_key => {
                            rates.insert(key, rate);
                        }
                        _ if is_band_key || is_rate_key => {
                            return Err(format!("schedule entry '{}' has the wrong shape", key));
                        }
                        _ => {
                            warn!(key = %key, "Ignoring schedule entry that is neither a rate nor a band");
                        }
                    }
                }

                RegionSchedule::new(rates, bands).validated()
            }
        }
    }
}

/// The complete rate/band schedule for one tax year.
///
/// The schedule is read-only once loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxYearSchedule {
    /// The tax year the schedule applies to, if the file declares one.
    #[serde(default, alias = "tax_year", skip_serializing_if = "Option::is_none")]
    tax_year: Option<TaxYear>,
    /// Region name to region schedule.
    regions: BTreeMap<String, RegionSchedule>,
}

impl TaxYearSchedule {
    /// Creates a schedule from its component parts.
    pub fn new(tax_year: Option<TaxYear>, regions: BTreeMap<String, RegionSchedule>) -> Self {
        Self { tax_year, regions }
    }

    /// Returns the tax year declared by the schedule.
    pub fn tax_year(&self) -> Option<TaxYear> {
        self.tax_year
    }

    /// Returns all region schedules.
    pub fn regions(&self) -> &BTreeMap<String, RegionSchedule> {
        &self.regions
    }

    /// Gets the schedule for a region key (e.g. `"scotland"`).
    pub fn region(&self, region: &str) -> Option<&RegionSchedule> {
        self.regions.get(region)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    const FLAT_JSON: &str = r#"{
        "basicRate": 0.20,
        "higherRate": 0.40,
        "basicRateBand": { "start": 12571, "end": 50270 },
        "higherRateBand": { "start": 50271, "end": null }
    }"#;

    const SEPARATED_YAML: &str = r#"
rates:
  basic: 0.20
  higher: 0.40
bands:
  basic: { start: 12571, end: 50270 }
  higher: { start: 50271, end: ~ }
"#;

    #[test]
    fn test_bare_name_strips_suffixes() {
        assert_eq!(bare_name("basicRate"), "basic");
        assert_eq!(bare_name("basicRateBand"), "basic");
        assert_eq!(bare_name("starterBand"), "starter");
        assert_eq!(bare_name("basic"), "basic");
    }

    #[test]
    fn test_flat_layout_is_split_into_rates_and_bands() {
        let region: RegionSchedule = serde_json::from_str(FLAT_JSON).unwrap();

        assert_eq!(region.rates().len(), 2);
        assert_eq!(region.rates()["basic"], dec("0.20"));
        assert_eq!(region.rates()["higher"], dec("0.40"));

        assert_eq!(region.bands().len(), 2);
        assert_eq!(region.bands()["basic"], Band::new(Some(dec("12571")), Some(dec("50270"))));
        assert!(region.bands()["higher"].is_unbounded());
    }

    #[test]
    fn test_both_layouts_normalize_identically() {
        let flat: RegionSchedule = serde_json::from_str(FLAT_JSON).unwrap();
        let separated: RegionSchedule = serde_yaml::from_str(SEPARATED_YAML).unwrap();
        assert_eq!(flat, separated);
    }

    #[test]
    fn test_separated_layout_keys_are_normalized() {
        let json = r#"{
            "rates": { "basicRate": 0.2 },
            "bands": { "basicRateBand": { "start": 1, "end": 2 } }
        }"#;
        let region: RegionSchedule = serde_json::from_str(json).unwrap();

        assert!(region.rates().contains_key("basic"));
        assert!(region.bands().contains_key("basic"));
    }

    #[test]
    fn test_flat_layout_ignores_unrelated_keys() {
        let json = r#"{ "name": "Scotland", "basicRate": 0.2 }"#;
        let region: RegionSchedule = serde_json::from_str(json).unwrap();

        assert_eq!(region.rates().len(), 1);
        assert!(region.bands().is_empty());
    }

    #[test]
    fn test_flat_layout_rejects_mismatched_entry() {
        let json = r#"{ "basicRate": { "start": 1, "end": 2 } }"#;
        let result = serde_json::from_str::<RegionSchedule>(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_inverted_band_is_rejected() {
        let json = r#"{ "basicRateBand": { "start": 50270, "end": 12571 } }"#;
        let error = serde_json::from_str::<RegionSchedule>(json).unwrap_err();
        assert!(error.to_string().contains("ends"));
    }

    #[test]
    fn test_flat_layout_accepts_band_starting_at_zero() {
        let json = r#"{
            "basicRate": 0.2,
            "personalAllowanceBand": { "start": null, "end": 12570 },
            "basicRateBand": { "start": 12571, "end": 50270 }
        }"#;
        let region: RegionSchedule = serde_json::from_str(json).unwrap();

        assert_eq!(region.bands().len(), 2);
        assert_eq!(region.bands()["personalAllowance"], Band::new(None, Some(dec("12570"))));
        assert_eq!(region.bands()["basic"].start, Some(dec("12571")));
    }

    #[test]
    fn test_separated_layout_accepts_band_starting_at_zero() {
        let yaml = r#"
rates:
  basic: 0.20
bands:
  personalAllowance: { start: ~, end: 12570 }
  basic: { end: 50270 }
"#;
        let region: RegionSchedule = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(region.bands()["personalAllowance"], Band::new(None, Some(dec("12570"))));
        assert_eq!(region.bands()["basic"].start, None);
    }

    #[test]
    fn test_band_rescale_keeps_missing_start() {
        let band = Band::new(None, Some(dec("12570")));
        let weekly = band.rescale(PayPeriod::Weekly);

        assert_eq!(weekly.start, None);
        assert_eq!(weekly.end, Some(dec("241")));
    }

    #[test]
    fn test_rescaled_bounds_are_integers() {
        let band = Band::new(Some(dec("12571")), None);
        let weekly = band.rescale(PayPeriod::Weekly);

        assert_eq!(weekly.start.map(|start| start.scale()), Some(0));
        let json = serde_json::to_value(weekly).unwrap();
        assert_eq!(json["start"], serde_json::json!("241"));
        assert_eq!(json["end"], serde_json::Value::Null);
    }

    #[test]
    fn test_band_rescale_weekly() {
        let band = Band::new(Some(dec("12532")), Some(dec("50270")));
        let weekly = band.rescale(PayPeriod::Weekly);

        assert_eq!(weekly.start, Some(dec("241")));
        assert_eq!(weekly.end, Some(dec("966")));
    }

    #[test]
    fn test_band_rescale_monthly() {
        let band = Band::new(Some(dec("12571")), Some(dec("50270")));
        let monthly = band.rescale(PayPeriod::Monthly);

        assert_eq!(monthly.start, Some(dec("1047")));
        assert_eq!(monthly.end, Some(dec("4189")));
    }

    #[test]
    fn test_band_rescale_keeps_unbounded_end() {
        let band = Band::new(Some(dec("125141")), None);
        assert_eq!(band.rescale(PayPeriod::Weekly).end, None);
        assert_eq!(band.rescale(PayPeriod::Monthly).end, None);
    }

    #[test]
    fn test_schedule_reads_tax_year_and_regions() {
        let json = format!(r#"{{ "taxYear": "2025-26", "regions": {{ "uk": {} }} }}"#, FLAT_JSON);
        let schedule: TaxYearSchedule = serde_json::from_str(&json).unwrap();

        assert_eq!(schedule.tax_year(), Some(TaxYear::new(2025)));
        assert!(schedule.region("uk").is_some());
        assert!(schedule.region("wales").is_none());
    }

    #[test]
    fn test_schedule_tax_year_is_optional() {
        let schedule: TaxYearSchedule = serde_json::from_str(r#"{ "regions": {} }"#).unwrap();
        assert_eq!(schedule.tax_year(), None);
        assert!(schedule.regions().is_empty());
    }
}
