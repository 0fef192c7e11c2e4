use std::fmt;

use thiserror::Error;

use crate::error::FieldViolation;
use crate::error::StructuredError;

/// Message carried by every validation failure.
pub const INVALID_INPUT_MESSAGE: &str = "invalid input data";

/// A single field rejected by a validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub reason: String,
}

/// Outcome of a failed validation pass.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The input was checked and rejected.
    #[error("{} field(s) failed validation", .0.len())]
    Fields(Vec<FieldError>),

    /// The input could not be checked at all.
    #[error("validation could not run: {0}")]
    Engine(String),
}

impl From<ValidationError> for StructuredError {
    fn from(error: ValidationError) -> Self {
        match error {
            ValidationError::Fields(failures) => StructuredError::invalid_input(
                INVALID_INPUT_MESSAGE,
                failures
                    .into_iter()
                    .map(|failure| FieldViolation::new(failure.field, failure.reason))
                    .collect(),
            ),
            ValidationError::Engine(cause) => StructuredError::internal(cause),
        }
    }
}

/// Collects per-field results in the order fields are checked.
///
/// ```
/// use error_model::FieldChecks;
///
/// let mut checks = FieldChecks::new();
/// let age = checks.check("age", "42".parse::<u8>());
/// let name = checks.check("name", Err::<String, _>("required"));
///
/// assert_eq!(age, Some(42));
/// assert!(name.is_none());
/// assert!(checks.finish().is_err());
/// ```
#[derive(Debug, Default)]
pub struct FieldChecks {
    failures: Vec<FieldError>,
}

impl FieldChecks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome of validating one field.
    ///
    /// # Returns
    /// The validated value, or `None` after recording the failure
    pub fn check<T, E: fmt::Display>(&mut self, field: &str, result: Result<T, E>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                self.failures.push(FieldError {
                    field: field.to_string(),
                    reason: e.to_string(),
                });
                None
            }
        }
    }

    /// # Errors
    /// * `Fields` - At least one field failed, in check order
    pub fn finish(self) -> Result<(), ValidationError> {
        if self.failures.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::Fields(self.failures))
        }
    }
}
