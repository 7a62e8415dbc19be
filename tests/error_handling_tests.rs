//! Tests for the typed error handling system
//!
//! These tests verify that:
//! - Errors return correct HTTP status codes
//! - Error responses carry stable codes and useful details
//! - Leaf errors convert into `ChurrascoError`

use axum::http::StatusCode;
use axum::response::IntoResponse;
use churrasco::core::error::{ConfigError, FieldValidationError, ValidationError};
use churrasco::prelude::*;

// =============================================================================
// HTTP Status Code Tests
// =============================================================================

mod status_code_tests {
    use super::*;

    #[test]
    fn test_pix_errors_return_400() {
        let errors = [
            PixError::InvalidField { field: "key" },
            PixError::InvalidAmount { value: 0.0 },
            PixError::FieldTooLong {
                id: "26".to_string(),
                len: 120,
            },
            PixError::ChecksumMismatch {
                expected: "3300".to_string(),
                found: "0000".to_string(),
            },
        ];
        for err in errors {
            assert_eq!(ChurrascoError::from(err).status_code(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn test_split_error_returns_400() {
        let err: ChurrascoError = SplitError::NoParticipants.into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_code(), "NO_PARTICIPANTS");
    }

    #[test]
    fn test_validation_error_returns_400() {
        let err = ChurrascoError::Validation(ValidationError::FieldError {
            field: "amount".to_string(),
            message: "must not be negative".to_string(),
        });
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_empty_input_returns_422() {
        let err: ChurrascoError = AiError::EmptyInput { what: "image" }.into();
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.error_code(), "EMPTY_INPUT");
    }

    #[test]
    fn test_rate_limit_returns_429() {
        let by_status: ChurrascoError = AiError::Api {
            status: 429,
            message: "Too Many Requests".to_string(),
        }
        .into();
        assert_eq!(by_status.status_code(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(by_status.error_code(), "AI_RATE_LIMITED");

        let by_message: ChurrascoError = AiError::Api {
            status: 403,
            message: "RATELIMIT_EXCEEDED".to_string(),
        }
        .into();
        assert_eq!(by_message.status_code(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[test]
    fn test_upstream_failures_return_502() {
        let transport: ChurrascoError = AiError::Transport {
            message: "connection refused".to_string(),
        }
        .into();
        assert_eq!(transport.status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(transport.error_code(), "AI_UNAVAILABLE");

        let invalid: ChurrascoError = AiError::InvalidResponse {
            message: "expected value".to_string(),
        }
        .into();
        assert_eq!(invalid.status_code(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_config_error_returns_500() {
        let err: ChurrascoError = ConfigError::MissingField {
            field: "ai.api_key".to_string(),
            context: "environment".to_string(),
        }
        .into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.error_code(), "CONFIG_ERROR");
    }

    #[test]
    fn test_unavailable_returns_503() {
        let err = ChurrascoError::Unavailable {
            feature: "Model API".to_string(),
        };
        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
        assert!(err.to_string().contains("Model API"));
    }
}

// =============================================================================
// Error Response Tests
// =============================================================================

mod response_tests {
    use super::*;

    #[test]
    fn test_field_errors_in_details() {
        let err = ChurrascoError::Validation(ValidationError::FieldErrors(vec![
            FieldValidationError {
                field: "city".to_string(),
                message: "must not be empty".to_string(),
            },
        ]));

        let response = err.to_response();
        assert_eq!(response.code, "VALIDATION_ERROR");
        let details = response.details.unwrap();
        assert_eq!(details["fields"][0]["field"], "city");
    }

    #[test]
    fn test_checksum_mismatch_in_details() {
        let err = verify_payload("00020101021226270014br.gov.bcb.pix0105a@b.c63040000")
            .map_err(ChurrascoError::from)
            .unwrap_err();

        let response = err.to_response();
        assert_eq!(response.code, "CHECKSUM_MISMATCH");
        assert_eq!(response.details.unwrap()["found"], "0000");
    }

    #[test]
    fn test_errors_without_details_skip_the_field() {
        let err: ChurrascoError = SplitError::NoParticipants.into();
        let json = serde_json::to_value(err.to_response()).unwrap();
        assert!(json.get("details").is_none());
        assert_eq!(json["message"], "No participants were given");
    }
}

// =============================================================================
// IntoResponse Tests
// =============================================================================

mod into_response_tests {
    use super::*;

    #[test]
    fn test_pix_error_into_response_status() {
        let err = ChurrascoError::from(PixError::InvalidAmount { value: -5.0 });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_not_a_receipt_into_response_status() {
        let response = ChurrascoError::from(AiError::NotAReceipt {
            message: "Não é uma nota fiscal".to_string(),
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}

// =============================================================================
// Conversion Tests
// =============================================================================

mod conversion_tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_source_is_leaf_error() {
        let err: ChurrascoError = PixError::MissingRecord { id: "63" }.into();
        let source = err.source().unwrap();
        assert!(source.to_string().contains("63"));
    }

    #[test]
    fn test_from_yaml_error() {
        let yaml_err = serde_yaml::from_str::<AppConfig>("server: [").unwrap_err();
        let err: ChurrascoError = yaml_err.into();
        assert!(matches!(
            err,
            ChurrascoError::Config(ConfigError::ParseError { .. })
        ));
    }

    #[test]
    fn test_from_anyhow() {
        let err: ChurrascoError = anyhow::anyhow!("boom").into();
        assert_eq!(err.error_code(), "INTERNAL_ERROR");
    }
}
