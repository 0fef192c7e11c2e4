use std::fmt;

use thiserror::Error;

use crate::kind::ErrorKind;

/// Message used for every `Internal` error. Causes are logged, never returned.
pub const INTERNAL_MESSAGE: &str = "internal server error";

/// One rejected input field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: String,
    pub description: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            description: description.into(),
        }
    }
}

/// A request failure, independent of the transport that will carry it.
///
/// Immutable once built. `violations` is non-empty only when `kind` is
/// [`ErrorKind::InvalidInput`]; the constructors drop violations attached to
/// any other kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct StructuredError {
    kind: ErrorKind,
    message: String,
    violations: Vec<FieldViolation>,
}

impl StructuredError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            violations: Vec::new(),
        }
    }

    /// Invalid input with one violation per rejected field, in the given order.
    pub fn invalid_input(message: impl Into<String>, violations: Vec<FieldViolation>) -> Self {
        Self::new(ErrorKind::InvalidInput, message).with_violations(violations)
    }

    /// Unexpected server-side failure.
    ///
    /// The cause is logged here and replaced by a generic message.
    pub fn internal(cause: impl fmt::Display) -> Self {
        tracing::error!(error = %cause, "Internal error");
        Self::new(ErrorKind::Internal, INTERNAL_MESSAGE)
    }

    pub fn with_violations(mut self, violations: Vec<FieldViolation>) -> Self {
        if self.kind == ErrorKind::InvalidInput {
            self.violations = violations;
        } else if !violations.is_empty() {
            tracing::debug!(
                kind = %self.kind,
                dropped = violations.len(),
                "Ignoring field violations on non-validation error"
            );
        }
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }
}
