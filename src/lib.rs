//! # churrasco-rs
//!
//! Pix charges, bill splitting and a model-backed assistant for organising
//! a barbecue, exposed over a small REST API.
//!
//! ## Features
//!
//! - **Pix payloads**: BR Code (EMV tag-length-value) encoding with CRC16
//!   checksum, plus parsing and verification of existing payloads
//! - **Bill splitting**: even shares, with restricted items (drinks) charged
//!   only to the participants who consumed them
//! - **Assistant**: shopping lists, receipt reading and charge messages via
//!   any OpenAI-compatible chat-completion endpoint, with rate-limit backoff
//! - **QR rendering**: optional, behind the `qr` cargo feature
//!
//! ## Quick Start
//!
//! ```rust
//! use churrasco::prelude::*;
//!
//! let payload = PixChargeRequest::new("teste@pix.com", "Joao Silva", "Sao Paulo", 10.0)
//!     .with_description("Churras")
//!     .encode()
//!     .unwrap();
//!
//! assert!(payload.as_str().starts_with("000201010212"));
//! assert_eq!(PixPayload::parse(payload.as_str()).unwrap().city, "SAO PAULO");
//! ```

pub mod ai;
pub mod config;
pub mod core;
pub mod pix;
pub mod render;
pub mod server;
pub mod split;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Pix ===
    pub use crate::pix::{
        DecodedPix, PixChargeRequest, PixError, PixKeyKind, PixPayload, encode_pix_payload,
        verify_payload,
    };

    // === Split ===
    pub use crate::split::{BillItem, BillSplit, SplitError, parse_participants, split_bill};

    // === Assistant ===
    pub use crate::ai::{
        AiError, Assistant, CompletionRequest, OpenAiClient, Receipt, RetryPolicy, ShoppingList,
        TextGenerator,
    };

    // === Rendering ===
    pub use crate::render::{QrFormat, QrRenderer, RenderCapability, RenderedCode};

    // === Config ===
    pub use crate::config::{AiCredentials, AppConfig};

    // === Errors ===
    pub use crate::core::error::{ChurrascoError, ChurrascoResult};

    // === Server ===
    pub use crate::server::ServerBuilder;

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use serde::{Deserialize, Serialize};
}
