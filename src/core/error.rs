//! Typed error handling for churrasco-rs
//!
//! Each domain module owns a leaf error type; [`ChurrascoError`] wraps them
//! so HTTP handlers can map any failure to a status code and a stable
//! machine-readable code.
//!
//! # Error Categories
//!
//! - [`PixError`]: payload encoding and verification
//! - [`SplitError`]: bill splitting
//! - [`AiError`]: calls to the text-generation service
//! - [`ConfigError`]: configuration parsing and credential resolution
//! - [`ValidationError`]: request input validation
//!
//! # Example
//!
//! ```rust
//! use churrasco::core::error::{ChurrascoError, ChurrascoResult};
//! use churrasco::pix::encode_pix_payload;
//!
//! fn payload() -> ChurrascoResult<String> {
//!     Ok(encode_pix_payload("a@b.c", "Ana", "Recife", 0.0, "")?.into_string())
//! }
//!
//! let err = payload().unwrap_err();
//! assert_eq!(err.error_code(), "INVALID_AMOUNT");
//! assert_eq!(err.status_code().as_u16(), 400);
//! ```

use crate::ai::AiError;
use crate::pix::PixError;
use crate::split::SplitError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;

/// The main error type for churrasco-rs
#[derive(Debug)]
pub enum ChurrascoError {
    /// Pix payload errors
    Pix(PixError),

    /// Bill splitting errors
    Split(SplitError),

    /// Text-generation service errors
    Ai(AiError),

    /// Configuration errors
    Config(ConfigError),

    /// Validation errors
    Validation(ValidationError),

    /// A feature that this process was started without
    Unavailable { feature: String },

    /// Internal errors (should not happen in normal operation)
    Internal(String),
}

impl fmt::Display for ChurrascoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChurrascoError::Pix(e) => write!(f, "{}", e),
            ChurrascoError::Split(e) => write!(f, "{}", e),
            ChurrascoError::Ai(e) => write!(f, "{}", e),
            ChurrascoError::Config(e) => write!(f, "{}", e),
            ChurrascoError::Validation(e) => write!(f, "{}", e),
            ChurrascoError::Unavailable { feature } => {
                write!(f, "{} is not available on this server", feature)
            }
            ChurrascoError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ChurrascoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ChurrascoError::Pix(e) => Some(e),
            ChurrascoError::Split(e) => Some(e),
            ChurrascoError::Ai(e) => Some(e),
            ChurrascoError::Config(e) => Some(e),
            ChurrascoError::Validation(e) => Some(e),
            ChurrascoError::Unavailable { .. } | ChurrascoError::Internal(_) => None,
        }
    }
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ChurrascoError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ChurrascoError::Pix(_) => StatusCode::BAD_REQUEST,
            ChurrascoError::Split(_) => StatusCode::BAD_REQUEST,
            ChurrascoError::Ai(e) => ai_status_code(e),
            ChurrascoError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ChurrascoError::Validation(_) => StatusCode::BAD_REQUEST,
            ChurrascoError::Unavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            ChurrascoError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ChurrascoError::Pix(e) => e.error_code(),
            ChurrascoError::Split(e) => e.error_code(),
            ChurrascoError::Ai(e) => e.error_code(),
            ChurrascoError::Config(_) => "CONFIG_ERROR",
            ChurrascoError::Validation(_) => "VALIDATION_ERROR",
            ChurrascoError::Unavailable { .. } => "FEATURE_UNAVAILABLE",
            ChurrascoError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            ChurrascoError::Pix(PixError::ChecksumMismatch { expected, found }) => {
                Some(serde_json::json!({ "expected": expected, "found": found }))
            }
            ChurrascoError::Pix(PixError::Malformed { offset, .. }) => {
                Some(serde_json::json!({ "offset": offset }))
            }
            ChurrascoError::Validation(ValidationError::FieldErrors(errors)) => {
                Some(serde_json::json!({ "fields": errors }))
            }
            _ => None,
        }
    }
}

fn ai_status_code(err: &AiError) -> StatusCode {
    match err {
        AiError::EmptyInput { .. } | AiError::NotAReceipt { .. } => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        e if e.is_rate_limited() => StatusCode::TOO_MANY_REQUESTS,
        _ => StatusCode::BAD_GATEWAY,
    }
}

impl IntoResponse for ChurrascoError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), error = %self, "Request failed");
        }
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

impl From<PixError> for ChurrascoError {
    fn from(err: PixError) -> Self {
        ChurrascoError::Pix(err)
    }
}

impl From<SplitError> for ChurrascoError {
    fn from(err: SplitError) -> Self {
        ChurrascoError::Split(err)
    }
}

impl From<AiError> for ChurrascoError {
    fn from(err: AiError) -> Self {
        ChurrascoError::Ai(err)
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse configuration file
    ParseError {
        file: Option<String>,
        message: String,
    },

    /// Missing required setting
    MissingField { field: String, context: String },

    /// Invalid value in configuration
    InvalidValue {
        field: String,
        value: String,
        message: String,
    },

    /// IO error while reading configuration
    IoError { message: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError { file, message } => {
                if let Some(file) = file {
                    write!(f, "Failed to parse config file '{}': {}", file, message)
                } else {
                    write!(f, "Failed to parse config: {}", message)
                }
            }
            ConfigError::MissingField { field, context } => {
                write!(f, "Missing required field '{}' in {}", field, context)
            }
            ConfigError::InvalidValue {
                field,
                value,
                message,
            } => {
                write!(
                    f,
                    "Invalid value '{}' for field '{}': {}",
                    value, field, message
                )
            }
            ConfigError::IoError { message } => {
                write!(f, "IO error: {}", message)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for ChurrascoError {
    fn from(err: ConfigError) -> Self {
        ChurrascoError::Config(err)
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors related to input validation
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Single field validation error
    FieldError { field: String, message: String },

    /// Multiple field validation errors
    FieldErrors(Vec<FieldValidationError>),

    /// Invalid JSON body
    InvalidJson { message: String },
}

/// A single field validation error
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldValidationError {
    pub field: String,
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::FieldError { field, message } => {
                write!(f, "Validation error for field '{}': {}", field, message)
            }
            ValidationError::FieldErrors(errors) => {
                let msgs: Vec<String> = errors
                    .iter()
                    .map(|e| format!("{}: {}", e.field, e.message))
                    .collect();
                write!(f, "Validation errors: {}", msgs.join(", "))
            }
            ValidationError::InvalidJson { message } => {
                write!(f, "Invalid JSON: {}", message)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for ChurrascoError {
    fn from(err: ValidationError) -> Self {
        ChurrascoError::Validation(err)
    }
}

impl From<validator::ValidationErrors> for ValidationError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<FieldValidationError> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| FieldValidationError {
                    field: field.to_string(),
                    message: e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string()),
                })
            })
            .collect();
        fields.sort_by(|a, b| a.field.cmp(&b.field));
        ValidationError::FieldErrors(fields)
    }
}

// =============================================================================
// Conversions from external errors
// =============================================================================

impl From<serde_json::Error> for ChurrascoError {
    fn from(err: serde_json::Error) -> Self {
        ChurrascoError::Validation(ValidationError::InvalidJson {
            message: err.to_string(),
        })
    }
}

impl From<std::io::Error> for ChurrascoError {
    fn from(err: std::io::Error) -> Self {
        ChurrascoError::Config(ConfigError::IoError {
            message: err.to_string(),
        })
    }
}

impl From<serde_yaml::Error> for ChurrascoError {
    fn from(err: serde_yaml::Error) -> Self {
        ChurrascoError::Config(ConfigError::ParseError {
            file: None,
            message: err.to_string(),
        })
    }
}

impl From<anyhow::Error> for ChurrascoError {
    fn from(err: anyhow::Error) -> Self {
        ChurrascoError::Internal(err.to_string())
    }
}

/// A specialized Result type for churrasco-rs operations
pub type ChurrascoResult<T> = Result<T, ChurrascoError>;
