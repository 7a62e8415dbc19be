//! Pix key classification
//!
//! Keys are opaque to the encoder: classification is informational and
//! never causes a charge to be rejected.

use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;
use uuid::Uuid;

/// The kind of alias a Pix key looks like
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PixKeyKind {
    Email,
    Phone,
    /// Individual taxpayer id (11 digits)
    Cpf,
    /// Company taxpayer id (14 digits)
    Cnpj,
    /// Random key issued by the bank (UUID)
    Random,
    Unknown,
}

impl PixKeyKind {
    /// Guess the key kind from its textual shape
    pub fn detect(key: &str) -> Self {
        let key = key.trim();

        if Uuid::parse_str(key).is_ok() {
            PixKeyKind::Random
        } else if Self::is_email(key) {
            PixKeyKind::Email
        } else if Self::is_phone(key) {
            PixKeyKind::Phone
        } else if Self::is_cnpj(key) {
            PixKeyKind::Cnpj
        } else if Self::is_cpf(key) {
            PixKeyKind::Cpf
        } else {
            PixKeyKind::Unknown
        }
    }

    fn is_email(key: &str) -> bool {
        static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
        let regex = EMAIL_REGEX.get_or_init(|| {
            Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap()
        });
        regex.is_match(key)
    }

    fn is_phone(key: &str) -> bool {
        static PHONE_REGEX: OnceLock<Regex> = OnceLock::new();
        // Phone keys are registered in E.164 form, so the leading '+' is mandatory
        let regex = PHONE_REGEX.get_or_init(|| Regex::new(r"^\+[1-9]\d{7,14}$").unwrap());
        regex.is_match(key)
    }

    fn is_cpf(key: &str) -> bool {
        static CPF_REGEX: OnceLock<Regex> = OnceLock::new();
        let regex =
            CPF_REGEX.get_or_init(|| Regex::new(r"^\d{3}\.?\d{3}\.?\d{3}-?\d{2}$").unwrap());
        regex.is_match(key)
    }

    fn is_cnpj(key: &str) -> bool {
        static CNPJ_REGEX: OnceLock<Regex> = OnceLock::new();
        let regex = CNPJ_REGEX
            .get_or_init(|| Regex::new(r"^\d{2}\.?\d{3}\.?\d{3}/?\d{4}-?\d{2}$").unwrap());
        regex.is_match(key)
    }
}
