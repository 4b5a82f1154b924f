//! Validation error types

use std::fmt;

/// Validation error for client input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required field is missing or blank
    Required { field: &'static str },

    /// Field exceeds maximum length
    TooLong { field: &'static str, max: usize },

    /// Value doesn't parse as the expected format (e.g. UUID)
    InvalidFormat { field: &'static str },

    /// Request body isn't a JSON document of the expected shape
    InvalidBody { reason: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required { field } => write!(f, "{} is required", field),
            Self::TooLong { field, max } => {
                write!(f, "{} must be at most {} characters", field, max)
            }
            Self::InvalidFormat { field } => write!(f, "Invalid {} format", field),
            Self::InvalidBody { reason } => write!(f, "Invalid request body: {}", reason),
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ValidationError::TooLong {
            field: "description",
            max: 500,
        };
        assert_eq!(
            err.to_string(),
            "description must be at most 500 characters"
        );
        assert_eq!(
            ValidationError::InvalidFormat { field: "userId" }.to_string(),
            "Invalid userId format"
        );
    }
}
