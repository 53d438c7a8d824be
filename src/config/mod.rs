//! Configuration loading and management for the SLA engine.
//!
//! This module loads the workday rules and SLA thresholds from YAML files.
//! [`CalculatorConfig::default`] carries the same values built in.
//!
//! # Example
//!
//! ```no_run
//! use sla_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Standard workday: {}h", config.workday().standard_hours);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    CalculatorConfig, DEFAULT_LUNCH_DEDUCTION_HOURS, DEFAULT_LUNCH_THRESHOLD_HOURS,
    DEFAULT_STANDARD_WORKDAY_HOURS, SeverityThresholds, SlaConfig, SlaPolicy, WorkdayConfig,
    WorkdayPolicy,
};
