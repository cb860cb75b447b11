//! Domain-level errors

use std::fmt::Display;

use thiserror::Error;

/// Errors that can occur in the domain layer
///
/// Every variant is a caller mistake detected before any delay is scheduled.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// A single field is outside its closed interval
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: String,
        value: String,
        min: String,
        max: String,
    },

    /// Two individually valid fields violate their ordering constraint
    #[error("{lower_field} ({lower}) must not exceed {upper_field} ({upper})")]
    InvalidRange {
        lower_field: String,
        upper_field: String,
        lower: String,
        upper: String,
    },

    /// The raw value could not be parsed as a number
    #[error("{field} is not a valid number: {value:?}")]
    Malformed { field: String, value: String },

    /// Process configuration is inconsistent
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl DomainError {
    /// Create an out-of-range error
    pub fn out_of_range(
        field: impl Into<String>,
        value: impl Display,
        min: impl Display,
        max: impl Display,
    ) -> Self {
        Self::OutOfRange {
            field: field.into(),
            value: value.to_string(),
            min: min.to_string(),
            max: max.to_string(),
        }
    }

    /// Create a cross-field ordering error
    pub fn invalid_range(
        lower_field: impl Into<String>,
        lower: impl Display,
        upper_field: impl Into<String>,
        upper: impl Display,
    ) -> Self {
        Self::InvalidRange {
            lower_field: lower_field.into(),
            upper_field: upper_field.into(),
            lower: lower.to_string(),
            upper: upper.to_string(),
        }
    }

    /// Create a parse error
    pub fn malformed(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Malformed {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Name of the offending field, if the error is tied to one
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::OutOfRange { field, .. } | Self::Malformed { field, .. } => Some(field),
            Self::InvalidRange { lower_field, .. } => Some(lower_field),
            Self::InvalidConfiguration(_) => None,
        }
    }
}
