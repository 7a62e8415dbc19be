//! Tag-length-value records of the EMV/BR Code grammar

use super::error::PixError;

/// Largest value a two-digit length prefix can describe
pub const MAX_FIELD_LEN: usize = 99;

/// A single decoded `ID + LEN + VALUE` record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlvField {
    /// Two-digit tag id (e.g. "26")
    pub id: String,
    /// Raw value, without the id and length prefix
    pub value: String,
}

/// Encode one record as `ID + LEN + VALUE`
///
/// `LEN` is the UTF-8 byte length of `value`, zero-padded to two digits.
pub fn encode_field(id: &str, value: &str) -> Result<String, PixError> {
    debug_assert!(id.len() == 2 && id.bytes().all(|b| b.is_ascii_digit()));

    let len = value.len();
    if len > MAX_FIELD_LEN {
        return Err(PixError::FieldTooLong {
            id: id.to_string(),
            len,
        });
    }

    Ok(format!("{id}{len:02}{value}"))
}

/// Split a string into consecutive records
///
/// Works for the top level of a payload as well as for the nested groups
/// (`26`, `62`), whose values follow the same grammar.
pub fn parse_fields(input: &str) -> Result<Vec<TlvField>, PixError> {
    let mut fields = Vec::new();
    let mut rest = input;

    while !rest.is_empty() {
        let offset = input.len() - rest.len();
        let header = rest.get(..4).ok_or(PixError::Malformed {
            offset,
            reason: "truncated record header",
        })?;

        if !header.bytes().all(|b| b.is_ascii_digit()) {
            return Err(PixError::Malformed {
                offset,
                reason: "record header is not numeric",
            });
        }

        let (id, len) = header.split_at(2);
        let len: usize = len.parse().map_err(|_| PixError::Malformed {
            offset,
            reason: "invalid record length",
        })?;

        let value = rest.get(4..4 + len).ok_or(PixError::Malformed {
            offset,
            reason: "record value shorter than its length",
        })?;

        fields.push(TlvField {
            id: id.to_string(),
            value: value.to_string(),
        });
        rest = &rest[4 + len..];
    }

    Ok(fields)
}
