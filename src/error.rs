//! Error types for the SLA engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate.
//! Configuration problems and input validation failures share one enum so
//! every operation can propagate with `?`.

use rust_decimal::Decimal;
use thiserror::Error;

/// The main error type for the SLA engine.
///
/// Validation variants always name the offending input field so that a
/// caller can surface the message to an end user unchanged.
///
/// # Example
///
/// ```
/// use sla_engine::error::EngineError;
///
/// let error = EngineError::InvalidTimeFormat {
///     field: "work_end".to_string(),
///     value: "25:00".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Invalid time format for 'work_end': '25:00' (expected HH:MM or HH:MM:SS)"
/// );
/// assert!(error.is_validation());
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but holds an unusable value.
    #[error("Invalid configuration value '{field}': {message}")]
    InvalidConfig {
        /// The configuration key.
        field: String,
        /// Why the value was rejected.
        message: String,
    },

    /// A time-of-day field could not be parsed.
    #[error("Invalid time format for '{field}': '{value}' (expected HH:MM or HH:MM:SS)")]
    InvalidTimeFormat {
        /// The input field.
        field: String,
        /// The rejected value.
        value: String,
    },

    /// A date field could not be parsed.
    #[error("Invalid date format for '{field}': '{value}' (expected YYYY-MM-DD)")]
    InvalidDateFormat {
        /// The input field.
        field: String,
        /// The rejected value.
        value: String,
    },

    /// Work completion falls before acknowledgement.
    #[error("Invalid field '{field}': work completion is {hours} hours before acknowledgement")]
    NegativeElapsed {
        /// The field that produced the completion instant.
        field: String,
        /// How far (in hours) completion precedes acknowledgement.
        hours: Decimal,
    },

    /// Only one half of a pause pair was supplied.
    #[error("Invalid field '{field}': required when '{counterpart}' is supplied")]
    IncompletePause {
        /// The missing half.
        field: String,
        /// The half that was supplied.
        counterpart: String,
    },

    /// A pause is longer than the time it is subtracted from.
    #[error(
        "Invalid field '{field}': pause of {pause_hours} hours exceeds remaining {remaining_hours} hours"
    )]
    PauseExceedsDuration {
        /// The pause end field.
        field: String,
        /// Length of the pause in hours.
        pause_hours: Decimal,
        /// Hours left to subtract from.
        remaining_hours: Decimal,
    },
}

impl EngineError {
    /// Returns true for errors caused by caller input (HTTP 400 semantics).
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            EngineError::InvalidTimeFormat { .. }
                | EngineError::InvalidDateFormat { .. }
                | EngineError::NegativeElapsed { .. }
                | EngineError::IncompletePause { .. }
                | EngineError::PauseExceedsDuration { .. }
        )
    }

    /// Returns the input field a validation error is attributed to.
    pub fn field(&self) -> Option<&str> {
        match self {
            EngineError::InvalidConfig { field, .. }
            | EngineError::InvalidTimeFormat { field, .. }
            | EngineError::InvalidDateFormat { field, .. }
            | EngineError::NegativeElapsed { field, .. }
            | EngineError::IncompletePause { field, .. }
            | EngineError::PauseExceedsDuration { field, .. } => Some(field),
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => None,
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
