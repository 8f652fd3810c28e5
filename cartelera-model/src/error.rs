use std::fmt::{self, Display};

use serde::Serialize;

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Violation {
    /// Name of the offending field.
    pub field: &'static str,
    /// Human-readable description of the rule that failed.
    pub message: String,
}

impl Violation {
    /// Build a violation for `field`.
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Errors produced by request validation routines.
///
/// Carries every violation found in the payload, not just the first one.
#[derive(Debug, Clone)]
pub struct ValidationError {
    violations: Vec<Violation>,
}

impl ValidationError {
    /// Wrap a non-empty list of violations.
    pub fn new(violations: Vec<Violation>) -> Self {
        Self { violations }
    }

    /// The itemized violations.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Consume the error, yielding its violations.
    pub fn into_violations(self) -> Vec<Violation> {
        self.violations
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validation failed")?;
        for (index, violation) in self.violations.iter().enumerate() {
            let sep = if index == 0 { ": " } else { "; " };
            write!(f, "{sep}{}: {}", violation.field, violation.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}
