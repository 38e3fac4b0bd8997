//! Unified error hierarchy for healthrs
//!
//! Input validation failures and model failures are kept apart: a bad
//! profile aborts an evaluation, while a missing or broken model only
//! removes the wellness score from it.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for all healthrs operations
#[derive(Debug, Error)]
pub enum HealthError {
    /// Profile input outside its documented range
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Wellness model could not be loaded or failed during inference
    #[error("Model unavailable: {0}")]
    ModelUnavailable(#[from] ModelError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Feature export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Generic internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Profile validation errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Value falls outside the accepted range for the field
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// NaN or infinite input
    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },

    /// Value that must be strictly positive (divisor or body measure)
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },

    /// Required field absent from the submitted profile
    #[error("Missing required field: {field}")]
    MissingField { field: String },
}

/// Wellness model errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    /// Artifact file does not exist
    #[error("Model artifact not found: {path}")]
    NotFound { path: PathBuf },

    /// Artifact could not be read
    #[error("Failed to read model artifact {path}: {reason}")]
    Unreadable { path: PathBuf, reason: String },

    /// Artifact contents could not be deserialized
    #[error("Failed to parse model artifact: {reason}")]
    Malformed { reason: String },

    /// Artifact references columns the feature schema does not have
    #[error("Model expects unknown feature: {feature}")]
    UnknownFeature { feature: String },

    /// Inference call failed or returned nothing usable
    #[error("Inference failed: {reason}")]
    Inference { reason: String },
}

/// Result type alias for healthrs operations
pub type Result<T> = std::result::Result<T, HealthError>;

impl HealthError {
    /// Whether the caller can keep going with a degraded result
    pub fn is_recoverable(&self) -> bool {
        matches!(self, HealthError::ModelUnavailable(_))
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            HealthError::Validation(_) => ErrorSeverity::Warning,
            HealthError::ModelUnavailable(ModelError::NotFound { .. }) => ErrorSeverity::Warning,
            HealthError::ModelUnavailable(_) => ErrorSeverity::Error,
            HealthError::Configuration(_) => ErrorSeverity::Error,
            HealthError::Internal(_) => ErrorSeverity::Critical,
            _ => ErrorSeverity::Error,
        }
    }

    /// Get user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            HealthError::Validation(ValidationError::OutOfRange {
                field, min, max, ..
            }) => {
                format!("Please enter a {} between {} and {}.", field, min, max)
            }
            HealthError::Validation(ValidationError::MissingField { field }) => {
                format!("Please fill in {}.", field)
            }
            HealthError::ModelUnavailable(ModelError::NotFound { .. }) => {
                "Model file not found. Your metrics are shown without an AI score.".to_string()
            }
            HealthError::ModelUnavailable(_) => {
                "The wellness model is unavailable. Your metrics are shown without an AI score."
                    .to_string()
            }
            _ => self.to_string(),
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Critical system error requiring immediate attention
    Critical,
    /// Error that prevents operation but system can continue
    Error,
    /// Warning that doesn't prevent operation
    Warning,
}

impl ErrorSeverity {
    /// Convert to tracing level
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            ErrorSeverity::Critical => tracing::Level::ERROR,
            ErrorSeverity::Error => tracing::Level::ERROR,
            ErrorSeverity::Warning => tracing::Level::WARN,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_severity() {
        let err = HealthError::ModelUnavailable(ModelError::NotFound {
            path: PathBuf::from("/models/wellness.json"),
        });
        assert_eq!(err.severity(), ErrorSeverity::Warning);

        let err = HealthError::Internal("test".to_string());
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert_eq!(err.severity().to_tracing_level(), tracing::Level::ERROR);
    }

    #[test]
    fn test_model_errors_are_recoverable() {
        let err = HealthError::from(ModelError::Inference {
            reason: "empty output".to_string(),
        });
        assert!(err.is_recoverable());

        let err = HealthError::from(ValidationError::NonPositive {
            field: "height_cm",
            value: 0.0,
        });
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_user_messages() {
        let err = HealthError::from(ValidationError::OutOfRange {
            field: "age",
            value: 12.0,
            min: 18.0,
            max: 100.0,
        });
        assert!(err.user_message().contains("between 18 and 100"));

        let err = HealthError::from(ModelError::NotFound {
            path: PathBuf::from("deploy_model.json"),
        });
        assert!(err.user_message().contains("without an AI score"));
    }

    #[test]
    fn test_validation_display() {
        let err = ValidationError::OutOfRange {
            field: "weight_kg",
            value: 250.0,
            min: 30.0,
            max: 200.0,
        };
        assert_eq!(err.to_string(), "weight_kg must be between 30 and 200, got 250");
    }
}
