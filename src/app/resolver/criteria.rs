//! Query normalization
//!
//! Turns user-facing [`Criteria`] into a [`NormalizedQuery`] once, at the
//! boundary, so the filter stages only ever see validated values.

use chrono::NaiveDate;

use crate::app::models::{Criteria, CycleRuntime, ForecastRange};
use crate::app::provider::ProviderProfile;
use crate::constants::{listing, query};
use crate::errors::{ValidationError, ValidationResult};

/// Validated form of [`Criteria`] for one provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedQuery {
    /// Date as it appears in directory names, cycle-qualified where the
    /// provider requires it
    pub date: String,
    /// Plain run date, tried when no directory carries the qualified one
    /// (`gdas.20180322` sits next to `gfs.2018032218`)
    pub fallback_date: Option<String>,
    pub format: Option<String>,
    pub cycle: Option<CycleRuntime>,
    pub resolution: Option<String>,
    pub product_type: Option<String>,
    /// Catalog code to match in file names
    pub product_code: Option<String>,
    pub forecast: Option<ForecastRange>,
}

/// Check a date is a real calendar day written as YYYYMMDD
pub fn validate_date(date: &str) -> ValidationResult<()> {
    let invalid = || ValidationError::InvalidDate {
        date: date.to_string(),
    };

    if date.len() != listing::DATE_LENGTH || !date.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(date, "%Y%m%d").map_err(|_| invalid())?;
    Ok(())
}

impl NormalizedQuery {
    /// Directory dates to look for, most specific first
    pub fn directory_dates(&self) -> Vec<&str> {
        std::iter::once(self.date.as_str())
            .chain(self.fallback_date.as_deref())
            .collect()
    }

    pub fn from_criteria(profile: &ProviderProfile, criteria: &Criteria) -> ValidationResult<Self> {
        validate_date(&criteria.date)?;

        let cycle = non_empty(&criteria.cycle_runtime)
            .map(CycleRuntime::parse)
            .transpose()?;

        let format = non_empty(&criteria.format).map(str::to_string);
        if let Some(format) = &format {
            if query::UNSUPPORTED_FORMATS.contains(&format.as_str()) {
                return Err(ValidationError::UnsupportedFormat {
                    format: format.clone(),
                });
            }
        }

        let product_type = non_empty(&criteria.product_type);
        let product_code = match (product_type, non_empty(&criteria.product_name)) {
            (Some(product_type), Some(product_name)) => {
                let code = profile.catalog.lookup_code(product_type, product_name)?;
                Some(prefix_code(profile, code, cycle.as_ref()))
            }
            (None, Some(product_name)) => {
                return Err(ValidationError::ProductNameWithoutType {
                    product_name: product_name.to_string(),
                })
            }
            _ => None,
        };

        let (date, fallback_date) = if profile.cycle_qualified_directories {
            let cycle = cycle.ok_or_else(|| ValidationError::MissingCycleRuntime {
                provider: profile.key.to_string(),
            })?;
            (format!("{}{}", criteria.date, cycle), Some(criteria.date.clone()))
        } else {
            (criteria.date.clone(), None)
        };

        let forecast = parse_forecast_range(
            non_empty(&criteria.forecast_start),
            non_empty(&criteria.forecast_end),
        )?;

        Ok(Self {
            date,
            fallback_date,
            format,
            cycle,
            resolution: non_empty(&criteria.resolution).map(str::to_string),
            product_type: product_type.map(str::to_string),
            product_code,
            forecast,
        })
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn prefix_code(profile: &ProviderProfile, code: &str, cycle: Option<&CycleRuntime>) -> String {
    match (profile.cycle_prefixed_code, cycle) {
        (Some(sentinel), Some(cycle)) if sentinel == code => format!("{}.{}", cycle.token(), code),
        _ => code.to_string(),
    }
}

/// Parse a forecast hour, ignoring leading zeros ("000" is hour 0)
pub fn parse_forecast_hour(field: &'static str, value: &str, max: u32) -> ValidationResult<u32> {
    let invalid = || ValidationError::InvalidForecastHour {
        field,
        value: value.to_string(),
        max,
    };

    let digits = value.trim().trim_start_matches('0');
    let hour = if digits.is_empty() {
        0
    } else {
        digits.parse::<u32>().map_err(|_| invalid())?
    };

    if hour > max {
        return Err(invalid());
    }
    Ok(hour)
}

/// Validate the forecast bounds; a range is only produced when both are set
pub fn parse_forecast_range(
    start: Option<&str>,
    end: Option<&str>,
) -> ValidationResult<Option<ForecastRange>> {
    let start = start
        .map(|s| parse_forecast_hour("forecast start", s, query::MAX_FORECAST_START))
        .transpose()?;

    let Some(end) = end else {
        return Ok(None);
    };
    let Some(start) = start else {
        return Err(ValidationError::ForecastEndWithoutStart);
    };

    let end = parse_forecast_hour("forecast end", end, query::MAX_FORECAST_END)?;
    if start > end {
        return Err(ValidationError::ForecastRangeInverted { start, end });
    }
    Ok(Some(ForecastRange { start, end }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::provider::{GFS, NAM};

    #[test]
    fn test_validate_date_accepts_calendar_days() {
        for date in ["20180322", "20000229", "19991231"] {
            assert!(validate_date(date).is_ok(), "rejected {date}");
        }
    }

    #[test]
    fn test_validate_date_rejects_everything_else() {
        for date in [
            "2018032",
            "201803221",
            "03/22/2018",
            "2018-03-22",
            "2018O322",
            "20181322",
            "20180230",
            "+2018032",
            "",
        ] {
            assert!(
                matches!(validate_date(date), Err(ValidationError::InvalidDate { .. })),
                "accepted {date}"
            );
        }
    }

    #[test]
    fn test_gfs_date_is_cycle_qualified() {
        let criteria = Criteria::new("gfs", "20180322").cycle_runtime("18");
        let query = NormalizedQuery::from_criteria(&GFS, &criteria).unwrap();
        assert_eq!(query.date, "2018032218");
        assert_eq!(query.directory_dates(), vec!["2018032218", "20180322"]);
        assert_eq!(query.cycle.unwrap().token(), "t18z");
    }

    #[test]
    fn test_gfs_requires_cycle_runtime() {
        let criteria = Criteria::new("gfs", "20180322").format("gfs");
        assert!(matches!(
            NormalizedQuery::from_criteria(&GFS, &criteria),
            Err(ValidationError::MissingCycleRuntime { .. })
        ));
    }

    #[test]
    fn test_nam_date_is_left_alone() {
        let criteria = Criteria::new("nam", "20180322");
        let query = NormalizedQuery::from_criteria(&NAM, &criteria).unwrap();
        assert_eq!(query.date, "20180322");
        assert_eq!(query.directory_dates(), vec!["20180322"]);
        assert!(query.cycle.is_none());
    }

    #[test]
    fn test_enkf_format_is_rejected() {
        for profile in [&GFS, &NAM] {
            let criteria = Criteria::new(profile.key, "20180322")
                .format("enkf")
                .cycle_runtime("00")
                .resolution("1p00");
            assert!(matches!(
                NormalizedQuery::from_criteria(profile, &criteria),
                Err(ValidationError::UnsupportedFormat { .. })
            ));
        }
    }

    #[test]
    fn test_product_lookup_and_sentinel_prefix() {
        let criteria = Criteria::new("gfs", "20180322")
            .cycle_runtime("06")
            .product("GFS", "Global longitude-latitude grid");
        let query = NormalizedQuery::from_criteria(&GFS, &criteria).unwrap();
        assert_eq!(query.product_code.as_deref(), Some("t06z.pgrb"));

        let criteria = Criteria::new("gfs", "20180322")
            .cycle_runtime("06")
            .product("GDAS", "Pressure Level Data");
        let query = NormalizedQuery::from_criteria(&GFS, &criteria).unwrap();
        assert_eq!(query.product_code.as_deref(), Some("pgrb2"));
        assert_eq!(query.product_type.as_deref(), Some("GDAS"));
    }

    #[test]
    fn test_product_lookup_failures() {
        let criteria = Criteria::new("nam", "20180322").product("NAM", "Not a product");
        assert!(matches!(
            NormalizedQuery::from_criteria(&NAM, &criteria),
            Err(ValidationError::UnknownProductName { .. })
        ));

        let mut criteria = Criteria::new("nam", "20180322");
        criteria.product_name = Some("NAM MOS".to_string());
        assert!(matches!(
            NormalizedQuery::from_criteria(&NAM, &criteria),
            Err(ValidationError::ProductNameWithoutType { .. })
        ));
    }

    #[test]
    fn test_forecast_hour_strips_leading_zeros() {
        assert_eq!(parse_forecast_hour("forecast start", "000", 385).unwrap(), 0);
        assert_eq!(parse_forecast_hour("forecast start", "003", 385).unwrap(), 3);
        assert_eq!(parse_forecast_hour("forecast end", "386", 386).unwrap(), 386);
        assert!(parse_forecast_hour("forecast start", "386", 385).is_err());
        assert!(parse_forecast_hour("forecast start", "-1", 385).is_err());
        assert!(parse_forecast_hour("forecast start", "f003", 385).is_err());
    }

    #[test]
    fn test_forecast_end_without_start_always_fails() {
        for end in ["0", "5", "386", "999", "abc"] {
            assert!(matches!(
                parse_forecast_range(None, Some(end)),
                Err(ValidationError::ForecastEndWithoutStart)
            ));
        }
    }

    #[test]
    fn test_forecast_range_rules() {
        assert_eq!(
            parse_forecast_range(Some("3"), Some("5")).unwrap(),
            Some(ForecastRange { start: 3, end: 5 })
        );
        assert_eq!(parse_forecast_range(Some("3"), None).unwrap(), None);
        assert_eq!(parse_forecast_range(None, None).unwrap(), None);
        assert!(matches!(
            parse_forecast_range(Some("6"), Some("5")),
            Err(ValidationError::ForecastRangeInverted { start: 6, end: 5 })
        ));
    }
}
