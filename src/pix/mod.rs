//! Pix BR Code payloads
//!
//! Builds the EMV-style tag-length-value string used both as the content of a
//! Pix QR code and as the "copy and paste" text, terminated by a CRC16
//! record. Encoding is a pure function of its input: no I/O, no shared
//! state, safe to call from any thread.
//!
//! ```rust
//! use churrasco::pix::{PixChargeRequest, PixPayload};
//!
//! let payload = PixChargeRequest::new("teste@pix.com", "Joao Silva", "Sao Paulo", 10.0)
//!     .with_description("Churras")
//!     .encode()?;
//!
//! let decoded = PixPayload::parse(payload.as_str())?;
//! assert_eq!(decoded.receiver_name, "JOAO SILVA");
//! assert_eq!(decoded.amount, "10.00");
//! # Ok::<(), churrasco::pix::PixError>(())
//! ```

pub mod crc;
pub mod error;
pub mod field;
pub mod key;
pub mod payload;

pub use crc::{crc16_ccitt, crc16_hex};
pub use error::PixError;
pub use field::{TlvField, encode_field, parse_fields};
pub use key::PixKeyKind;
pub use payload::{
    DecodedPix, PixChargeRequest, PixPayload, TAG_ORDER, encode_pix_payload, verify_payload,
};
