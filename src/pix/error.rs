use thiserror::Error;

/// Errors raised while building or reading a Pix payload
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PixError {
    /// A required text field is empty or whitespace-only
    #[error("Field '{field}' must not be empty")]
    InvalidField { field: &'static str },

    /// Amount is zero, negative, NaN or infinite
    #[error("Amount must be a positive finite number (got {value})")]
    InvalidAmount { value: f64 },

    /// A value does not fit the two-digit length prefix
    #[error("Field '{id}' is {len} bytes long, the maximum is 99")]
    FieldTooLong { id: String, len: usize },

    /// Input does not follow the tag-length-value grammar
    #[error("Malformed payload at byte {offset}: {reason}")]
    Malformed { offset: usize, reason: &'static str },

    /// A mandatory record is absent from a parsed payload
    #[error("Payload has no '{id}' record")]
    MissingRecord { id: &'static str },

    /// Stored checksum does not match the recomputed one
    #[error("Checksum mismatch: expected {expected}, found {found}")]
    ChecksumMismatch { expected: String, found: String },
}

impl PixError {
    pub fn error_code(&self) -> &'static str {
        match self {
            PixError::InvalidField { .. } => "INVALID_FIELD",
            PixError::InvalidAmount { .. } => "INVALID_AMOUNT",
            PixError::FieldTooLong { .. } => "FIELD_TOO_LONG",
            PixError::Malformed { .. } => "MALFORMED_PAYLOAD",
            PixError::MissingRecord { .. } => "MISSING_RECORD",
            PixError::ChecksumMismatch { .. } => "CHECKSUM_MISMATCH",
        }
    }
}
