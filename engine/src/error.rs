//! Error handling for the Climate Risk Analytics engine
//!
//! Every failure carries a stable code so the presentation layer can map it
//! to a user-facing message.

use serde::Serialize;
use thiserror::Error;

/// Engine error types
#[derive(Error, Debug)]
pub enum AppError {
    // Precondition errors
    #[error("Anomaly model not trained. Call train() first.")]
    ModelNotTrained,

    #[error("Invalid state transition: {0}")]
    InvalidStateTransition(String),

    // Input errors
    #[error("Empty weather series")]
    EmptyWeatherSeries,

    #[error("Empty training history")]
    EmptyTrainingHistory,

    #[error("Validation error: {message}")]
    Validation { field: String, message: String },

    // Infrastructure errors
    #[error("Configuration error: {0}")]
    Configuration(#[from] config::ConfigError),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Structured error detail for callers that render errors
#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl AppError {
    /// Build a validation error for a named field
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        AppError::Validation {
            field: field.to_string(),
            message: message.into(),
        }
    }

    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            AppError::ModelNotTrained => "MODEL_NOT_TRAINED",
            AppError::InvalidStateTransition(_) => "INVALID_STATE_TRANSITION",
            AppError::EmptyWeatherSeries => "EMPTY_WEATHER_SERIES",
            AppError::EmptyTrainingHistory => "EMPTY_TRAINING_HISTORY",
            AppError::Validation { .. } => "VALIDATION_ERROR",
            AppError::Configuration(_) => "CONFIGURATION_ERROR",
            AppError::Serialization(_) => "SERIALIZATION_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Precondition violations come from calling operations out of order
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            AppError::ModelNotTrained | AppError::InvalidStateTransition(_)
        )
    }

    /// Input violations come from bad arguments
    pub fn is_input(&self) -> bool {
        matches!(
            self,
            AppError::EmptyWeatherSeries
                | AppError::EmptyTrainingHistory
                | AppError::Validation { .. }
        )
    }

    pub fn detail(&self) -> ErrorDetail {
        let field = match self {
            AppError::Validation { field, .. } => Some(field.clone()),
            _ => None,
        };

        ErrorDetail {
            code: self.code().to_string(),
            message: self.to_string(),
            field,
        }
    }
}

impl From<csv::Error> for AppError {
    fn from(e: csv::Error) -> Self {
        AppError::Serialization(format!("CSV serialization error: {}", e))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Serialization(format!("JSON serialization error: {}", e))
    }
}

/// Result type alias for engine operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(AppError::ModelNotTrained.code(), "MODEL_NOT_TRAINED");
        assert_eq!(AppError::EmptyWeatherSeries.code(), "EMPTY_WEATHER_SERIES");
        assert_eq!(
            AppError::validation("history_days", "too short").code(),
            "VALIDATION_ERROR"
        );
    }

    #[test]
    fn test_error_taxonomy() {
        assert!(AppError::ModelNotTrained.is_precondition());
        assert!(!AppError::ModelNotTrained.is_input());
        assert!(AppError::EmptyWeatherSeries.is_input());
        assert!(!AppError::EmptyWeatherSeries.is_precondition());
    }

    #[test]
    fn test_validation_detail_carries_field() {
        let detail = AppError::validation("forecast_days", "must be positive").detail();
        assert_eq!(detail.code, "VALIDATION_ERROR");
        assert_eq!(detail.field.as_deref(), Some("forecast_days"));
        assert!(detail.message.contains("must be positive"));
    }

    #[test]
    fn test_internal_error_is_neither_precondition_nor_input() {
        let err = AppError::Internal("flushing anomaly CSV: broken pipe".to_string());
        assert_eq!(err.code(), "INTERNAL_ERROR");
        assert!(!err.is_precondition());
        assert!(!err.is_input());
        assert!(err.detail().field.is_none());
    }
}
