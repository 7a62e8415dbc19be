//! Core module containing the error hierarchy and request extractors

pub mod error;
pub mod extractors;

pub use error::{ChurrascoError, ChurrascoResult, ConfigError, ValidationError};
pub use extractors::ValidatedJson;
