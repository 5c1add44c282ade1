//! Rate and band lookup for parsed tax codes.
//!
//! This module provides the [`TaxDataService`], which answers region
//! queries against a loaded [`TaxYearSchedule`].

use std::collections::BTreeMap;
use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::{Band, RegionSchedule, TaxYearSchedule};
use crate::error::{EngineError, EngineResult};
use crate::models::{PayPeriod, TaxCode};

/// The rates and bands that apply to a tax code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaxData {
    /// Rate name to rate, as a fraction (0.20 for 20%).
    pub rates: BTreeMap<String, Decimal>,
    /// Band name to band, rescaled to the requested pay period.
    pub bands: BTreeMap<String, Band>,
}

/// Looks up rates and bands by region.
///
/// The schedule is shared behind an [`Arc`], so cloning the service is cheap
/// and clones can be used from several threads at once.
///
/// # Example
///
/// ```no_run
/// use tax_code_engine::config::ScheduleLoader;
/// use tax_code_engine::models::{PayPeriod, TaxCode, TaxYear};
/// use tax_code_engine::service::TaxDataService;
///
/// let schedule = ScheduleLoader::load_year("./config/tax_years", TaxYear::new(2025))?;
/// let service = TaxDataService::new(schedule);
///
/// let code = TaxCode::parse("S1257L")?;
/// let data = service.tax_data_for_code(&code, PayPeriod::Weekly)?;
/// println!("Starter rate: {}", data.rates["starter"]);
/// # Ok::<(), tax_code_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct TaxDataService {
    schedule: Arc<TaxYearSchedule>,
}

impl TaxDataService {
    /// Creates a service over a loaded schedule.
    pub fn new(schedule: TaxYearSchedule) -> Self {
        Self {
            schedule: Arc::new(schedule),
        }
    }

    /// Returns the underlying schedule.
    pub fn schedule(&self) -> &TaxYearSchedule {
        &self.schedule
    }

    /// Returns the region keys the schedule covers.
    pub fn regions(&self) -> impl Iterator<Item = &str> {
        self.schedule.regions().keys().map(String::as_str)
    }

    /// Gets the rates for a region.
    ///
    /// Rates are fractions of pay and do not depend on the pay period.
    ///
    /// # Returns
    ///
    /// Returns rate name to rate, or `UnknownRegion` if the schedule has no
    /// such region.
    pub fn rates_for_region(&self, region: &str) -> EngineResult<BTreeMap<String, Decimal>> {
        Ok(self.region(region)?.rates().clone())
    }

    /// Gets the bands for a region in annual terms, as stored.
    pub fn annual_bands_for_region(&self, region: &str) -> EngineResult<BTreeMap<String, Band>> {
        Ok(self.region(region)?.bands().clone())
    }

    /// Gets the bands for a region rescaled to a pay period.
    ///
    /// Each annual bound is divided by 52 (weekly) or 12 (monthly) and
    /// floored to an integer. Missing bounds stay missing.
    ///
    /// # Returns
    ///
    /// Returns band name to band, or `UnknownRegion` if the schedule has no
    /// such region.
    pub fn bands_for_region(
        &self,
        region: &str,
        period: PayPeriod,
    ) -> EngineResult<BTreeMap<String, Band>> {
        let bands = self
            .region(region)?
            .bands()
            .iter()
            .map(|(name, band)| (name.clone(), band.rescale(period)))
            .collect();

        debug!(region = %region, period = %period, "Rescaled bands");
        Ok(bands)
    }

    /// Gets the rates and period bands for a parsed tax code's region.
    pub fn tax_data_for_code(&self, code: &TaxCode, period: PayPeriod) -> EngineResult<TaxData> {
        let region = code.region().as_str();
        Ok(TaxData {
            rates: self.rates_for_region(region)?,
            bands: self.bands_for_region(region, period)?,
        })
    }

    fn region(&self, region: &str) -> EngineResult<&RegionSchedule> {
        self.schedule.region(region).ok_or_else(|| {
            warn!(region = %region, "Unknown region requested");
            EngineError::UnknownRegion {
                region: region.to_string(),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TaxYear;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn band(start: &str, end: Option<&str>) -> Band {
        Band::new(Some(dec(start)), end.map(dec))
    }

    fn create_test_service() -> TaxDataService {
        let uk = RegionSchedule::new(
            BTreeMap::from([
                ("basicRate".to_string(), dec("0.20")),
                ("higherRate".to_string(), dec("0.40")),
            ]),
            BTreeMap::from([
                ("basicRateBand".to_string(), band("12532", Some("50270"))),
                ("higherRateBand".to_string(), band("50271", None)),
            ]),
        );
        let scotland = RegionSchedule::new(
            BTreeMap::from([("starter".to_string(), dec("0.19"))]),
            BTreeMap::from([("starter".to_string(), band("12571", Some("15397")))]),
        );

        TaxDataService::new(TaxYearSchedule::new(
            Some(TaxYear::new(2025)),
            BTreeMap::from([("uk".to_string(), uk), ("scotland".to_string(), scotland)]),
        ))
    }

    #[test]
    fn test_rates_for_region() {
        let service = create_test_service();
        let rates = service.rates_for_region("uk").unwrap();

        assert_eq!(rates.len(), 2);
        assert_eq!(rates["basic"], dec("0.20"));
        assert_eq!(rates["higher"], dec("0.40"));
    }

    #[test]
    fn test_weekly_bands_are_floored() {
        let service = create_test_service();
        let bands = service.bands_for_region("uk", PayPeriod::Weekly).unwrap();

        // 12532 / 52 = 241, 50270 / 52 = 966.73, 50271 / 52 = 966.75
        assert_eq!(bands["basic"], band("241", Some("966")));
        assert_eq!(bands["higher"], band("966", None));
    }

    #[test]
    fn test_monthly_bands_are_floored() {
        let service = create_test_service();
        let bands = service.bands_for_region("uk", PayPeriod::Monthly).unwrap();

        // 12532 / 12 = 1044.33, 50270 / 12 = 4189.17
        assert_eq!(bands["basic"], band("1044", Some("4189")));
        assert_eq!(bands["higher"].end, None);
    }

    #[test]
    fn test_annual_bands_are_unchanged() {
        let service = create_test_service();
        let bands = service.annual_bands_for_region("uk").unwrap();

        assert_eq!(bands["basic"], band("12532", Some("50270")));
    }

    #[test]
    fn test_rates_and_bands_are_disjoint() {
        let service = create_test_service();
        let rates = service.rates_for_region("uk").unwrap();
        let bands = service.bands_for_region("uk", PayPeriod::Weekly).unwrap();

        for name in rates.keys().chain(bands.keys()) {
            assert!(!name.ends_with("Rate"), "{} still carries a suffix", name);
            assert!(!name.ends_with("Band"), "{} still carries a suffix", name);
        }
    }

    #[test]
    fn test_unknown_region() {
        let service = create_test_service();

        match service.rates_for_region("bogus") {
            Err(EngineError::UnknownRegion { region }) => assert_eq!(region, "bogus"),
            other => panic!("Expected UnknownRegion error, got {:?}", other),
        }
        assert!(matches!(
            service.bands_for_region("nonexistent", PayPeriod::Weekly),
            Err(EngineError::UnknownRegion { .. })
        ));
        assert!(matches!(
            service.annual_bands_for_region("nonexistent"),
            Err(EngineError::UnknownRegion { .. })
        ));
    }

    #[test]
    fn test_tax_data_for_code_uses_code_region() {
        let service = create_test_service();
        let code = TaxCode::parse("S1257L").unwrap();
        let data = service.tax_data_for_code(&code, PayPeriod::Weekly).unwrap();

        assert_eq!(data.rates["starter"], dec("0.19"));
        assert_eq!(data.bands["starter"], band("241", Some("296")));
    }

    #[test]
    fn test_tax_data_for_code_missing_region() {
        let service = create_test_service();
        let code = TaxCode::parse("C1257L").unwrap();

        match service.tax_data_for_code(&code, PayPeriod::Monthly) {
            Err(EngineError::UnknownRegion { region }) => assert_eq!(region, "wales"),
            other => panic!("Expected UnknownRegion error, got {:?}", other),
        }
    }

    #[test]
    fn test_regions_lists_schedule_keys() {
        let service = create_test_service();
        let regions: Vec<&str> = service.regions().collect();
        assert_eq!(regions, vec!["scotland", "uk"]);
    }

    #[test]
    fn test_service_is_send_sync_and_clone() {
        fn assert_shareable<T: Send + Sync + Clone>() {}
        assert_shareable::<TaxDataService>();
    }
}
