use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

/// Errors raised while talking to the text-generation service
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AiError {
    /// Nothing to send (blank description, empty image)
    #[error("Missing input: {what}")]
    EmptyInput { what: &'static str },

    /// The API answered with a non-success status
    #[error("Model API returned {status}: {message}")]
    Api { status: u16, message: String },

    /// The request never got an answer (DNS, TLS, timeout...)
    #[error("Model API request failed: {message}")]
    Transport { message: String },

    /// The answer could not be decoded into the expected record
    #[error("Unexpected model response: {message}")]
    InvalidResponse { message: String },

    /// The model reported that the image is not a receipt
    #[error("{message}")]
    NotAReceipt { message: String },
}

impl AiError {
    /// Rate-limit class failures: HTTP 429 or a message that says so
    pub fn is_rate_limited(&self) -> bool {
        static RATE_LIMIT_REGEX: OnceLock<Regex> = OnceLock::new();

        if matches!(self, AiError::Api { status: 429, .. }) {
            return true;
        }
        let regex = RATE_LIMIT_REGEX
            .get_or_init(|| Regex::new(r"429|RATELIMIT_EXCEEDED|(?i:quota|rate limit)").unwrap());
        regex.is_match(&self.to_string())
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            AiError::EmptyInput { .. } => "EMPTY_INPUT",
            AiError::Api { .. } if self.is_rate_limited() => "AI_RATE_LIMITED",
            AiError::Api { .. } => "AI_API_ERROR",
            AiError::Transport { .. } => "AI_UNAVAILABLE",
            AiError::InvalidResponse { .. } => "AI_INVALID_RESPONSE",
            AiError::NotAReceipt { .. } => "NOT_A_RECEIPT",
        }
    }
}

impl From<reqwest::Error> for AiError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => AiError::Api {
                status: status.as_u16(),
                message: err.to_string(),
            },
            None if err.is_decode() => AiError::InvalidResponse {
                message: err.to_string(),
            },
            None => AiError::Transport {
                message: err.to_string(),
            },
        }
    }
}

impl From<serde_json::Error> for AiError {
    fn from(err: serde_json::Error) -> Self {
        AiError::InvalidResponse {
            message: err.to_string(),
        }
    }
}
