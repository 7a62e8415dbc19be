//! BR Code payload assembly and verification

use super::crc::crc16_hex;
use super::error::PixError;
use super::field::{MAX_FIELD_LEN, TlvField, encode_field, parse_fields};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Globally unique identifier of the Pix arrangement (tag 26, sub-tag 00)
pub const PIX_GUI: &str = "br.gov.bcb.pix";

/// Reference label meaning "no specific reference assigned" (tag 62, sub-tag 05)
pub const NO_REFERENCE: &str = "***";

pub const RECEIVER_NAME_MAX_CHARS: usize = 25;
pub const CITY_MAX_CHARS: usize = 15;
pub const DESCRIPTION_MAX_CHARS: usize = 25;

/// Top-level record order of every payload produced here
pub const TAG_ORDER: [&str; 11] = [
    "00", "01", "26", "52", "53", "54", "58", "59", "60", "62", "63",
];

const CRC_PREFIX: &str = "6304";

/// Everything needed to produce a Pix charge payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PixChargeRequest {
    /// Payee's registered key (email, phone, random id or tax id), verbatim
    pub key: String,
    pub receiver_name: String,
    pub city: String,
    pub amount: f64,
    /// Optional short description; omitted from the payload when empty
    #[serde(default)]
    pub description: String,
}

impl PixChargeRequest {
    pub fn new(
        key: impl Into<String>,
        receiver_name: impl Into<String>,
        city: impl Into<String>,
        amount: f64,
    ) -> Self {
        Self {
            key: key.into(),
            receiver_name: receiver_name.into(),
            city: city.into(),
            amount,
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Build the payload for this request
    pub fn encode(&self) -> Result<PixPayload, PixError> {
        encode_pix_payload(
            &self.key,
            &self.receiver_name,
            &self.city,
            self.amount,
            &self.description,
        )
    }
}

/// A complete BR Code string, terminated by its CRC record
///
/// The same string serves as copy-paste text and as QR renderer input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PixPayload(String);

impl PixPayload {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// The 4 hex digits of the trailing CRC record
    pub fn crc(&self) -> &str {
        &self.0[self.0.len() - 4..]
    }

    /// Parse and verify an existing payload string
    pub fn parse(input: &str) -> Result<DecodedPix, PixError> {
        verify_payload(input)?;
        DecodedPix::from_fields(&parse_fields(input)?)
    }
}

impl fmt::Display for PixPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PixPayload {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Encode a Pix charge as a BR Code payload
///
/// Receiver name and city are truncated (25 and 15 characters) and
/// upper-cased, the description is truncated to 25 characters. The name is
/// further cut to 99 bytes on a char boundary. The key is kept verbatim.
/// Either a complete payload is returned or an error.
pub fn encode_pix_payload(
    key: &str,
    receiver_name: &str,
    city: &str,
    amount: f64,
    description: &str,
) -> Result<PixPayload, PixError> {
    require_non_blank("key", key)?;
    require_non_blank("receiver_name", receiver_name)?;
    require_non_blank("city", city)?;

    if !amount.is_finite() || amount <= 0.0 {
        return Err(PixError::InvalidAmount { value: amount });
    }
    // Must still be positive after rounding to cents
    let formatted_amount = format_amount(amount);
    if formatted_amount == "0.00" {
        return Err(PixError::InvalidAmount { value: amount });
    }

    let description = truncate_chars(description, DESCRIPTION_MAX_CHARS);
    let receiver_name = truncate_chars(receiver_name, RECEIVER_NAME_MAX_CHARS).to_uppercase();
    let receiver_name = truncate_bytes(&receiver_name, MAX_FIELD_LEN);
    let city = truncate_chars(city, CITY_MAX_CHARS).to_uppercase();

    let mut payload = String::with_capacity(160);
    payload.push_str(&encode_field("00", "01")?);
    payload.push_str(&encode_field("01", "12")?);
    payload.push_str(&merchant_account_information(key, description)?);
    payload.push_str(&encode_field("52", "0000")?);
    payload.push_str(&encode_field("53", "986")?);
    payload.push_str(&encode_field("54", &formatted_amount)?);
    payload.push_str(&encode_field("58", "BR")?);
    payload.push_str(&encode_field("59", receiver_name)?);
    payload.push_str(&encode_field("60", &city)?);
    payload.push_str(&additional_data_field()?);
    payload.push_str(CRC_PREFIX);

    let crc = crc16_hex(&payload);
    payload.push_str(&crc);

    tracing::debug!(len = payload.len(), crc = %crc, "Encoded Pix payload");

    Ok(PixPayload(payload))
}

/// Tag 26: Pix GUI, key and optional description
pub fn merchant_account_information(key: &str, description: &str) -> Result<String, PixError> {
    let mut group = encode_field("00", PIX_GUI)?;
    group.push_str(&encode_field("01", key)?);
    if !description.is_empty() {
        group.push_str(&encode_field("02", description)?);
    }
    encode_field("26", &group)
}

/// Tag 62: reference label only
pub fn additional_data_field() -> Result<String, PixError> {
    encode_field("62", &encode_field("05", NO_REFERENCE)?)
}

/// Fixed-point with two decimals, `.` separator, no grouping
pub fn format_amount(amount: f64) -> String {
    format!("{amount:.2}")
}

/// Check that the trailing `63` record holds the CRC of everything before it
pub fn verify_payload(input: &str) -> Result<(), PixError> {
    let split = input.len().checked_sub(4).ok_or(PixError::Malformed {
        offset: 0,
        reason: "payload shorter than its checksum",
    })?;

    let (covered, found) = match (input.get(..split), input.get(split..)) {
        (Some(covered), Some(found)) => (covered, found),
        _ => {
            return Err(PixError::Malformed {
                offset: split,
                reason: "checksum is not ASCII",
            });
        }
    };

    if !covered.ends_with(CRC_PREFIX) {
        return Err(PixError::MissingRecord { id: "63" });
    }

    let expected = crc16_hex(covered);
    if !expected.eq_ignore_ascii_case(found) {
        return Err(PixError::ChecksumMismatch {
            expected,
            found: found.to_string(),
        });
    }

    Ok(())
}

/// Business fields recovered from a payload
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecodedPix {
    pub key: String,
    pub description: Option<String>,
    pub amount: String,
    pub receiver_name: String,
    pub city: String,
    pub crc: String,
    /// Top-level tag ids in payload order
    pub tags: Vec<String>,
}

impl DecodedPix {
    fn from_fields(fields: &[TlvField]) -> Result<Self, PixError> {
        let find = |id: &'static str| {
            fields
                .iter()
                .find(|f| f.id == id)
                .map(|f| f.value.clone())
                .ok_or(PixError::MissingRecord { id })
        };

        let account = parse_fields(&find("26")?)?;
        let sub = |id: &str| account.iter().find(|f| f.id == id).map(|f| f.value.clone());

        if sub("00").as_deref() != Some(PIX_GUI) {
            return Err(PixError::MissingRecord { id: "26.00" });
        }

        Ok(Self {
            key: sub("01").ok_or(PixError::MissingRecord { id: "26.01" })?,
            description: sub("02"),
            amount: find("54")?,
            receiver_name: find("59")?,
            city: find("60")?,
            crc: find("63")?,
            tags: fields.iter().map(|f| f.id.clone()).collect(),
        })
    }
}

fn require_non_blank(field: &'static str, value: &str) -> Result<(), PixError> {
    if value.trim().is_empty() {
        return Err(PixError::InvalidField { field });
    }
    Ok(())
}

fn truncate_chars(value: &str, max: usize) -> &str {
    match value.char_indices().nth(max) {
        Some((idx, _)) => &value[..idx],
        None => value,
    }
}

/// Longest prefix of at most `max` bytes that ends on a char boundary
fn truncate_bytes(value: &str, max: usize) -> &str {
    if value.len() <= max {
        return value;
    }
    let mut end = max;
    while !value.is_char_boundary(end) {
        end -= 1;
    }
    &value[..end]
}
