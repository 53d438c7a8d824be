//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading calculator
//! configuration from YAML files.

use rust_decimal::Decimal;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::error::{EngineError, EngineResult};

use super::types::{CalculatorConfig, SlaConfig, SlaPolicy, WorkdayConfig, WorkdayPolicy};

/// Loads and provides access to calculator configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── workday.yaml   # Standard hours and lunch deduction rule
/// └── sla.yaml       # Per-severity SLA thresholds
/// ```
///
/// # Example
///
/// ```no_run
/// use sla_engine::config::ConfigLoader;
/// use sla_engine::models::Severity;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// println!("sev1 threshold: {}h", loader.sla().threshold(Severity::Sev1));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: CalculatorConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if a file is missing, holds invalid YAML, or holds a
    /// value the calculators cannot work with (such as a zero threshold).
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let workday = Self::load_yaml::<WorkdayConfig>(&path.join("workday.yaml"))?.workday;
        let sla = Self::load_yaml::<SlaConfig>(&path.join("sla.yaml"))?.sla;

        validate_workday(&workday)?;
        validate_sla(&sla)?;

        info!(
            path = %path.display(),
            standard_hours = %workday.standard_hours,
            lunch_mode = ?workday.lunch_mode,
            "Loaded calculator configuration"
        );

        Ok(Self {
            config: CalculatorConfig { workday, sla },
        })
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: CalculatorConfig) -> Self {
        Self { config }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the complete configuration.
    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    /// Returns the workday policy.
    pub fn workday(&self) -> &WorkdayPolicy {
        &self.config.workday
    }

    /// Returns the SLA policy.
    pub fn sla(&self) -> &SlaPolicy {
        &self.config.sla
    }
}

const MAX_HOUR_DECIMAL_PLACES: u32 = 2;

fn require_positive(field: &str, value: Decimal) -> EngineResult<()> {
    if value <= Decimal::ZERO {
        return Err(EngineError::InvalidConfig {
            field: field.to_string(),
            message: format!("must be greater than zero, got {}", value),
        });
    }
    Ok(())
}

fn require_non_negative(field: &str, value: Decimal) -> EngineResult<()> {
    if value < Decimal::ZERO {
        return Err(EngineError::InvalidConfig {
            field: field.to_string(),
            message: format!("must not be negative, got {}", value),
        });
    }
    Ok(())
}

/// Hour values feed straight into results, so they must already fit the
/// 2-decimal-place output format.
fn require_hours(field: &str, value: Decimal) -> EngineResult<()> {
    if value.normalize().scale() > MAX_HOUR_DECIMAL_PLACES {
        return Err(EngineError::InvalidConfig {
            field: field.to_string(),
            message: format!(
                "must have at most {} decimal places, got {}",
                MAX_HOUR_DECIMAL_PLACES, value
            ),
        });
    }
    Ok(())
}

fn validate_workday(workday: &WorkdayPolicy) -> EngineResult<()> {
    require_positive("workday.standard_hours", workday.standard_hours)?;
    require_hours("workday.standard_hours", workday.standard_hours)?;
    require_non_negative("workday.lunch_deduction_hours", workday.lunch_deduction_hours)?;
    require_hours("workday.lunch_deduction_hours", workday.lunch_deduction_hours)?;
    require_non_negative("workday.lunch_threshold_hours", workday.lunch_threshold_hours)?;
    require_hours("workday.lunch_threshold_hours", workday.lunch_threshold_hours)
}

fn validate_sla(sla: &SlaPolicy) -> EngineResult<()> {
    let thresholds = &sla.thresholds;
    for (field, value) in [
        ("sla.thresholds.sev1", thresholds.sev1),
        ("sla.thresholds.sev2", thresholds.sev2),
        ("sla.thresholds.sev3", thresholds.sev3),
        ("sla.thresholds.sev4", thresholds.sev4),
    ] {
        require_positive(field, value)?;
        require_hours(field, value)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LunchDeductionMode, Severity};

    fn config_path() -> &'static str {
        "./config/default"
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.config(), &CalculatorConfig::default());
    }

    #[test]
    fn test_loaded_thresholds_match_tiers() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        assert_eq!(loader.sla().threshold(Severity::Sev1), Decimal::from(4));
        assert_eq!(loader.sla().threshold(Severity::Sev4), Decimal::from(48));
        assert_eq!(loader.workday().lunch_mode, LunchDeductionMode::PerSession);
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("workday.yaml"));
            }
            _ => panic!("Expected ConfigNotFound error"),
        }
    }

    #[test]
    fn test_validate_rejects_zero_threshold() {
        let mut sla = SlaPolicy::default();
        sla.thresholds.sev3 = Decimal::ZERO;

        match validate_sla(&sla) {
            Err(EngineError::InvalidConfig { field, .. }) => {
                assert_eq!(field, "sla.thresholds.sev3");
            }
            other => panic!("Expected InvalidConfig error, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_negative_lunch() {
        let workday = WorkdayPolicy {
            lunch_deduction_hours: Decimal::from(-1),
            ..WorkdayPolicy::default()
        };

        assert!(matches!(
            validate_workday(&workday),
            Err(EngineError::InvalidConfig { .. })
        ));
    }

    fn write_config_dir(name: &str, workday_yaml: &str, sla_yaml: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("sla-engine-{}-{}", name, std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("workday.yaml"), workday_yaml).unwrap();
        fs::write(dir.join("sla.yaml"), sla_yaml).unwrap();
        dir
    }

    const DEFAULT_SLA_YAML: &str =
        "sla:\n  thresholds:\n    sev1: 4\n    sev2: 12\n    sev3: 24\n    sev4: 48\n";

    #[test]
    fn test_load_rejects_three_decimal_workday_hours() {
        let dir = write_config_dir(
            "three-dp-workday",
            "workday:\n  standard_hours: 7.125\n  lunch_deduction_hours: 0.125\n  lunch_threshold_hours: 5\n",
            DEFAULT_SLA_YAML,
        );

        let result = ConfigLoader::load(&dir);
        fs::remove_dir_all(&dir).ok();

        match result {
            Err(EngineError::InvalidConfig { field, message }) => {
                assert_eq!(field, "workday.standard_hours");
                assert!(message.contains("decimal places"));
            }
            other => panic!("Expected InvalidConfig error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_accepts_two_decimal_workday_hours() {
        let dir = write_config_dir(
            "two-dp-workday",
            "workday:\n  standard_hours: 7.50\n  lunch_deduction_hours: 0.75\n  lunch_threshold_hours: 5\n",
            DEFAULT_SLA_YAML,
        );

        let result = ConfigLoader::load(&dir);
        fs::remove_dir_all(&dir).ok();

        let loader = result.unwrap();
        assert_eq!(loader.workday().standard_hours, Decimal::new(75, 1));
        assert_eq!(loader.workday().lunch_deduction_hours, Decimal::new(75, 2));
    }

    #[test]
    fn test_validate_rejects_three_decimal_threshold() {
        let mut sla = SlaPolicy::default();
        sla.thresholds.sev2 = Decimal::new(12_005, 3);

        match validate_sla(&sla) {
            Err(EngineError::InvalidConfig { field, .. }) => {
                assert_eq!(field, "sla.thresholds.sev2");
            }
            other => panic!("Expected InvalidConfig error, got {:?}", other),
        }
    }

    #[test]
    fn test_trailing_zeros_do_not_count_as_decimal_places() {
        let workday = WorkdayPolicy {
            standard_hours: Decimal::new(8000, 3),
            ..WorkdayPolicy::default()
        };

        assert!(validate_workday(&workday).is_ok());
    }

    #[test]
    fn test_default_loader_uses_builtin_constants() {
        let loader = ConfigLoader::default();
        assert_eq!(loader.workday().standard_hours, Decimal::from(8));
    }
}
