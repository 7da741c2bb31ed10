//! Error types for the Payroll Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while computing payroll or
//! talking to the admin backend.

use thiserror::Error;

use crate::models::PayrollStatus;

/// The main error type for the Payroll Engine.
///
/// All fallible operations in the engine return this error type, making it
/// easy to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/settings.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/settings.yaml");
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

    /// A month/year pair does not name a real calendar month.
    #[error("Invalid payroll period {month}/{year}")]
    InvalidPeriod {
        /// The requested month (expected 1-12).
        month: u32,
        /// The requested year.
        year: i32,
    },

    /// Input rejected before any calculation or network call was made.
    #[error("Invalid field '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A user-facing description of the problem.
        message: String,
    },

    /// The payroll run is PAID and no longer accepts changes.
    #[error("Payroll run '{run_id}' is PAID and locked")]
    PayrollLocked {
        /// The ID of the locked payroll run.
        run_id: String,
    },

    /// A payroll status change that skips or reverses a step.
    #[error("Cannot move payroll run from {from} to {to}")]
    InvalidStatusTransition {
        /// The current status.
        from: PayrollStatus,
        /// The requested status.
        to: PayrollStatus,
    },

    /// No payroll item with the given ID exists in the run.
    #[error("Payroll item not found: {id}")]
    PayrollItemNotFound {
        /// The missing payroll item ID.
        id: String,
    },

    /// No adjustment with the given ID exists in the run.
    #[error("Payroll adjustment not found: {id}")]
    AdjustmentNotFound {
        /// The missing adjustment ID.
        id: String,
    },

    /// The admin backend returned a non-2xx response or could not be reached.
    ///
    /// The message is the single user-visible string for the failure.
    #[error("{message}")]
    Backend {
        /// The HTTP status, if a response was received at all.
        status: Option<u16>,
        /// The user-visible error message.
        message: String,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

impl EngineError {
    /// Shorthand for a [`EngineError::Validation`] error.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/settings.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/settings.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_invalid_period_displays_month_and_year() {
        let error = EngineError::InvalidPeriod {
            month: 13,
            year: 2026,
        };
        assert_eq!(error.to_string(), "Invalid payroll period 13/2026");
    }

    #[test]
    fn test_validation_displays_field_and_message() {
        let error = EngineError::validation("amount", "Amount must be greater than 0");
        assert_eq!(
            error.to_string(),
            "Invalid field 'amount': Amount must be greater than 0"
        );
    }

    #[test]
    fn test_payroll_locked_displays_run_id() {
        let error = EngineError::PayrollLocked {
            run_id: "run_001".to_string(),
        };
        assert_eq!(error.to_string(), "Payroll run 'run_001' is PAID and locked");
    }

    #[test]
    fn test_invalid_transition_displays_statuses() {
        let error = EngineError::InvalidStatusTransition {
            from: PayrollStatus::Paid,
            to: PayrollStatus::Draft,
        };
        assert_eq!(error.to_string(), "Cannot move payroll run from PAID to DRAFT");
    }

    #[test]
    fn test_backend_error_displays_message_only() {
        let error = EngineError::Backend {
            status: Some(500),
            message: "Failed to save attendance".to_string(),
        };
        assert_eq!(error.to_string(), "Failed to save attendance");
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_locked() -> EngineResult<()> {
            Err(EngineError::PayrollLocked {
                run_id: "run_001".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_locked()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
