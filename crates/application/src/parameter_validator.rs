//! Parameter validator
//!
//! Turns raw query-string values into validated value objects. Each field has
//! a closed interval and a default; missing values take the default, values
//! outside the interval are rejected (never clamped), and cross-field checks
//! run only after every field passed its own bounds.

use std::str::FromStr;

use domain::value_objects::{
    BurstDuration, CascadeLevels, DelayRange, FailureProbability, FieldConstraint, FixedDelay,
};
use domain::DomainError;
use serde::Serialize;
use tracing::debug;

use crate::error::ApplicationError;

/// Upper limit for any configured fixed delay, in seconds
pub const MAX_CONFIGURABLE_DELAY_SECS: u64 = 600;

/// Process-wide defaults, fixed at startup
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FaultDefaults {
    /// Delay used by `/slow` when the caller omits one
    pub default_delay: u64,
    /// Largest delay `/slow` accepts
    pub max_delay: u64,
    /// Failure probability used by `/sometimes-fail` when the caller omits one
    pub failure_rate: f64,
}

impl Default for FaultDefaults {
    fn default() -> Self {
        Self {
            default_delay: 3,
            max_delay: 30,
            failure_rate: 0.0,
        }
    }
}

/// Validates caller input for every scenario
#[derive(Debug, Clone)]
pub struct ParameterValidator {
    defaults: FaultDefaults,
    slow_delay: FieldConstraint<u64>,
    random_min: FieldConstraint<f64>,
    random_max: FieldConstraint<f64>,
    failure_rate: FieldConstraint<f64>,
    failure_delay: FieldConstraint<u64>,
    cascade_levels: FieldConstraint<u64>,
    burst_duration: FieldConstraint<u64>,
}

impl ParameterValidator {
    /// Build a validator from startup defaults
    ///
    /// The defaults themselves are checked here, once, so a bad configuration
    /// fails at startup instead of on the first request.
    pub fn new(defaults: FaultDefaults) -> Result<Self, ApplicationError> {
        if !(1..=MAX_CONFIGURABLE_DELAY_SECS).contains(&defaults.max_delay) {
            return Err(ApplicationError::Configuration(format!(
                "max_delay must be between 1 and {MAX_CONFIGURABLE_DELAY_SECS}, got {}",
                defaults.max_delay
            )));
        }
        if !(1..=defaults.max_delay).contains(&defaults.default_delay) {
            return Err(ApplicationError::Configuration(format!(
                "default_delay must be between 1 and max_delay ({}), got {}",
                defaults.max_delay, defaults.default_delay
            )));
        }
        let failure_rate = FailureProbability::new(defaults.failure_rate)
            .map_err(|e| ApplicationError::Configuration(e.to_string()))?;

        Ok(Self {
            defaults,
            slow_delay: FieldConstraint::new(
                "delay",
                1,
                defaults.max_delay,
                defaults.default_delay,
            ),
            random_min: FieldConstraint::new(DelayRange::LOWER_FIELD, 0.0, 10.0, 1.0),
            random_max: FieldConstraint::new(DelayRange::UPPER_FIELD, 1.0, 30.0, 10.0),
            failure_rate: FieldConstraint::new(
                FailureProbability::FIELD,
                0.0,
                1.0,
                failure_rate.value(),
            ),
            failure_delay: FieldConstraint::new("delay", 0, 10, 2),
            cascade_levels: FieldConstraint::new(
                CascadeLevels::FIELD,
                u64::from(CascadeLevels::MIN),
                u64::from(CascadeLevels::MAX),
                u64::from(CascadeLevels::DEFAULT),
            ),
            burst_duration: FieldConstraint::new(
                BurstDuration::FIELD,
                u64::from(BurstDuration::MIN),
                u64::from(BurstDuration::MAX),
                u64::from(BurstDuration::DEFAULT),
            ),
        })
    }

    /// Defaults this validator was built from
    pub const fn defaults(&self) -> &FaultDefaults {
        &self.defaults
    }

    /// `/slow`: `delay` in `[1, max_delay]`
    pub fn slow(&self, delay: Option<&str>) -> Result<FixedDelay, DomainError> {
        let secs = parse_integer(&self.slow_delay, delay)?;
        FixedDelay::new(secs, &self.slow_delay)
    }

    /// `/random`: `min_delay` in `[0, 10]`, `max_delay` in `[1, 30]`, `min <= max`
    pub fn random(
        &self,
        min_delay: Option<&str>,
        max_delay: Option<&str>,
    ) -> Result<DelayRange, DomainError> {
        let lo = parse_float(&self.random_min, min_delay)?;
        let hi = parse_float(&self.random_max, max_delay)?;
        DelayRange::with_fields(lo, hi, self.random_min.name, self.random_max.name)
    }

    /// `/sometimes-fail`: `failure_rate` in `[0, 1]`, `delay` in `[0, 10]`
    pub fn sometimes_fail(
        &self,
        failure_rate: Option<&str>,
        delay: Option<&str>,
    ) -> Result<(FailureProbability, FixedDelay), DomainError> {
        let p = parse_float(&self.failure_rate, failure_rate)?;
        let secs = parse_integer(&self.failure_delay, delay)?;
        Ok((
            FailureProbability::new(p)?,
            FixedDelay::new(secs, &self.failure_delay)?,
        ))
    }

    /// `/cascade`: `levels` in `[1, 5]`
    pub fn cascade(&self, levels: Option<&str>) -> Result<CascadeLevels, DomainError> {
        CascadeLevels::new(parse_integer(&self.cascade_levels, levels)?)
    }

    /// `/burst-error`: `error_duration` in `[1, 300]`
    pub fn burst(&self, error_duration: Option<&str>) -> Result<BurstDuration, DomainError> {
        BurstDuration::new(parse_integer(&self.burst_duration, error_duration)?)
    }
}

/// Parse an optional raw value, falling back to the default and checking bounds
fn parse_field<T>(constraint: &FieldConstraint<T>, raw: Option<&str>) -> Result<T, DomainError>
where
    T: FromStr + PartialOrd + Copy + std::fmt::Display,
{
    let Some(raw) = raw else {
        debug!(field = constraint.name, default = %constraint.default, "Using default");
        return Ok(constraint.default);
    };
    let value = raw
        .trim()
        .parse::<T>()
        .map_err(|_| DomainError::malformed(constraint.name, raw))?;
    constraint.check(value)
}

fn parse_float(constraint: &FieldConstraint<f64>, raw: Option<&str>) -> Result<f64, DomainError> {
    parse_field(constraint, raw)
}

/// Integers additionally report negative input as out of range rather than
/// malformed
fn parse_integer(
    constraint: &FieldConstraint<u64>,
    raw: Option<&str>,
) -> Result<u64, DomainError> {
    parse_field(constraint, raw).map_err(|err| {
        let trimmed = raw.unwrap_or_default().trim();
        if matches!(err, DomainError::Malformed { .. }) && trimmed.parse::<i64>().is_ok() {
            DomainError::out_of_range(constraint.name, trimmed, constraint.min, constraint.max)
        } else {
            err
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator() -> ParameterValidator {
        ParameterValidator::new(FaultDefaults::default()).unwrap()
    }

    #[test]
    fn default_config_is_valid() {
        let v = validator();
        assert_eq!(v.defaults().default_delay, 3);
        assert_eq!(v.defaults().max_delay, 30);
    }

    #[test]
    fn rejects_default_delay_above_max() {
        let result = ParameterValidator::new(FaultDefaults {
            default_delay: 40,
            max_delay: 30,
            failure_rate: 0.0,
        });
        assert!(matches!(result, Err(ApplicationError::Configuration(_))));
    }

    #[test]
    fn rejects_zero_max_delay() {
        let result = ParameterValidator::new(FaultDefaults {
            default_delay: 1,
            max_delay: 0,
            failure_rate: 0.0,
        });
        assert!(matches!(result, Err(ApplicationError::Configuration(_))));
    }

    #[test]
    fn rejects_configured_failure_rate_outside_unit_interval() {
        let result = ParameterValidator::new(FaultDefaults {
            failure_rate: 1.5,
            ..FaultDefaults::default()
        });
        assert!(matches!(result, Err(ApplicationError::Configuration(_))));
    }

    #[test]
    fn slow_uses_configured_default() {
        let v = ParameterValidator::new(FaultDefaults {
            default_delay: 5,
            max_delay: 20,
            failure_rate: 0.0,
        })
        .unwrap();
        assert_eq!(v.slow(None).unwrap().secs(), 5);
    }

    #[test]
    fn slow_respects_configured_max() {
        let v = ParameterValidator::new(FaultDefaults {
            default_delay: 3,
            max_delay: 10,
            failure_rate: 0.0,
        })
        .unwrap();
        assert_eq!(v.slow(Some("10")).unwrap().secs(), 10);
        let err = v.slow(Some("11")).unwrap_err();
        assert_eq!(err, DomainError::out_of_range("delay", 11, 1, 10));
    }

    #[test]
    fn slow_rejects_zero_and_negative_as_out_of_range() {
        let v = validator();
        assert!(matches!(
            v.slow(Some("0")),
            Err(DomainError::OutOfRange { .. })
        ));
        assert!(matches!(
            v.slow(Some("-4")),
            Err(DomainError::OutOfRange { .. })
        ));
    }

    #[test]
    fn slow_rejects_garbage_as_malformed() {
        let v = validator();
        assert_eq!(
            v.slow(Some("soon")).unwrap_err(),
            DomainError::malformed("delay", "soon")
        );
        assert!(matches!(
            v.slow(Some("2.5")),
            Err(DomainError::Malformed { .. })
        ));
        assert!(matches!(v.slow(Some("")), Err(DomainError::Malformed { .. })));
    }

    #[test]
    fn random_defaults_to_one_through_ten() {
        let range = validator().random(None, None).unwrap();
        assert!((range.lo() - 1.0).abs() < f64::EPSILON);
        assert!((range.hi() - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn random_bounds_checked_per_field() {
        let v = validator();
        let err = v.random(Some("11"), Some("20")).unwrap_err();
        assert_eq!(err.field(), Some("min_delay"));
        assert!(matches!(err, DomainError::OutOfRange { .. }));

        let err = v.random(Some("0"), Some("0")).unwrap_err();
        assert_eq!(err.field(), Some("max_delay"));
        assert!(matches!(err, DomainError::OutOfRange { .. }));
    }

    #[test]
    fn random_cross_field_violation_is_distinct() {
        let err = validator().random(Some("8"), Some("2")).unwrap_err();
        assert_eq!(err, DomainError::invalid_range("min_delay", 8.0, "max_delay", 2.0));
    }

    #[test]
    fn random_accepts_fractional_bounds() {
        let range = validator().random(Some("0.5"), Some("1.5")).unwrap();
        assert!((range.lo() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn sometimes_fail_defaults() {
        let v = ParameterValidator::new(FaultDefaults {
            failure_rate: 0.3,
            ..FaultDefaults::default()
        })
        .unwrap();
        let (p, delay) = v.sometimes_fail(None, None).unwrap();
        assert!((p.value() - 0.3).abs() < f64::EPSILON);
        assert_eq!(delay.secs(), 2);
    }

    #[test]
    fn sometimes_fail_allows_zero_delay() {
        let (_, delay) = validator().sometimes_fail(Some("1.0"), Some("0")).unwrap();
        assert_eq!(delay.secs(), 0);
    }

    #[test]
    fn sometimes_fail_rejects_bad_rate() {
        let v = validator();
        assert!(matches!(
            v.sometimes_fail(Some("1.2"), None),
            Err(DomainError::OutOfRange { .. })
        ));
        assert!(matches!(
            v.sometimes_fail(Some("NaN"), None),
            Err(DomainError::OutOfRange { .. })
        ));
        assert!(matches!(
            v.sometimes_fail(Some("often"), None),
            Err(DomainError::Malformed { .. })
        ));
    }

    #[test]
    fn sometimes_fail_rejects_long_delay() {
        let err = validator().sometimes_fail(None, Some("11")).unwrap_err();
        assert_eq!(err, DomainError::out_of_range("delay", 11, 0, 10));
    }

    #[test]
    fn cascade_levels_bounds() {
        let v = validator();
        assert_eq!(v.cascade(None).unwrap().get(), 3);
        assert_eq!(v.cascade(Some("5")).unwrap().get(), 5);
        assert!(v.cascade(Some("0")).is_err());
        assert!(v.cascade(Some("6")).is_err());
    }

    #[test]
    fn burst_bounds() {
        let v = validator();
        assert_eq!(v.burst(None).unwrap().secs(), 30);
        assert_eq!(v.burst(Some("300")).unwrap().secs(), 300);
        assert!(v.burst(Some("301")).is_err());
    }

    #[test]
    fn whitespace_is_trimmed() {
        assert_eq!(validator().cascade(Some(" 2 ")).unwrap().get(), 2);
    }
}
