//! Per-day attendance summary model.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::DerivedDuration;

/// How the Field Engineer lunch hour is taken across several sessions of
/// the same day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LunchDeductionMode {
    /// Each session is deducted independently.
    #[default]
    PerSession,
    /// Session totals are summed first and deducted once.
    PerDay,
}

/// Hour figures for all sessions of one employee-day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailySummary {
    /// The day summarized.
    pub date: NaiveDate,
    /// The lunch mode used.
    pub lunch_mode: LunchDeductionMode,
    /// Closed sessions summed before deduction.
    pub raw_hours: Decimal,
    /// Lunch hours deducted for the day.
    pub lunch_deduction_hours: Decimal,
    /// Closed-session hours after deduction.
    pub effective_hours: Decimal,
    /// Hours up to the standard workday.
    pub regular_hours: Decimal,
    /// Hours beyond the standard workday.
    pub overtime_hours: Decimal,
    /// Elapsed hours of sessions still open (excluded from the split).
    pub active_hours: Decimal,
    /// Per-session figures in input order.
    pub sessions: Vec<DerivedDuration>,
}
