//! Configuration types for the calculators.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{LunchDeductionMode, Severity};

/// Standard workday length in hours.
pub const DEFAULT_STANDARD_WORKDAY_HOURS: Decimal = Decimal::from_parts(8, 0, 0, false, 0);

/// Lunch hour deducted from a Field Engineer session.
pub const DEFAULT_LUNCH_DEDUCTION_HOURS: Decimal = Decimal::from_parts(1, 0, 0, false, 0);

/// Raw hours a Field Engineer session must exceed before lunch is deducted.
pub const DEFAULT_LUNCH_THRESHOLD_HOURS: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

/// Workday rules applied to attendance sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkdayPolicy {
    /// Hours before overtime starts.
    pub standard_hours: Decimal,
    /// Hours deducted for lunch.
    pub lunch_deduction_hours: Decimal,
    /// Raw hours that must be exceeded before lunch is deducted.
    pub lunch_threshold_hours: Decimal,
    /// How lunch is taken across several sessions of one day.
    #[serde(default)]
    pub lunch_mode: LunchDeductionMode,
}

impl Default for WorkdayPolicy {
    fn default() -> Self {
        Self {
            standard_hours: DEFAULT_STANDARD_WORKDAY_HOURS,
            lunch_deduction_hours: DEFAULT_LUNCH_DEDUCTION_HOURS,
            lunch_threshold_hours: DEFAULT_LUNCH_THRESHOLD_HOURS,
            lunch_mode: LunchDeductionMode::PerSession,
        }
    }
}

/// SLA thresholds in hours, one per severity tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityThresholds {
    /// Threshold for `sev1`.
    pub sev1: Decimal,
    /// Threshold for `sev2`.
    pub sev2: Decimal,
    /// Threshold for `sev3`.
    pub sev3: Decimal,
    /// Threshold for `sev4`.
    pub sev4: Decimal,
}

impl Default for SeverityThresholds {
    fn default() -> Self {
        Self {
            sev1: Decimal::from(4),
            sev2: Decimal::from(12),
            sev3: Decimal::from(24),
            sev4: Decimal::from(48),
        }
    }
}

/// SLA rules applied to tickets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlaPolicy {
    /// Per-severity thresholds.
    pub thresholds: SeverityThresholds,
}

impl SlaPolicy {
    /// Returns the threshold in hours for a severity tier.
    ///
    /// # Example
    ///
    /// ```
    /// use sla_engine::config::SlaPolicy;
    /// use sla_engine::models::Severity;
    /// use rust_decimal::Decimal;
    ///
    /// let policy = SlaPolicy::default();
    /// assert_eq!(policy.threshold(Severity::Sev2), Decimal::from(12));
    /// ```
    pub fn threshold(&self, severity: Severity) -> Decimal {
        match severity {
            Severity::Sev1 => self.thresholds.sev1,
            Severity::Sev2 => self.thresholds.sev2,
            Severity::Sev3 => self.thresholds.sev3,
            Severity::Sev4 => self.thresholds.sev4,
        }
    }
}

/// Layout of `workday.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct WorkdayConfig {
    /// The workday section.
    pub workday: WorkdayPolicy,
}

/// Layout of `sla.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct SlaConfig {
    /// The SLA section.
    pub sla: SlaPolicy,
}

/// The complete calculator configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculatorConfig {
    /// Attendance rules.
    pub workday: WorkdayPolicy,
    /// Ticket SLA rules.
    pub sla: SlaPolicy,
}
