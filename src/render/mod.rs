//! Optional QR-code rendering
//!
//! Rendering is a capability resolved once at startup. When the `qr` feature
//! is disabled, or rendering fails, callers still get the copy-paste payload.

#[cfg(feature = "qr")]
pub mod qr;

#[cfg(feature = "qr")]
pub use qr::QrCodeRenderer;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Output format of a rendered code
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QrFormat {
    /// Standalone SVG document
    #[default]
    Svg,
    /// Unicode half-block art, suitable for terminals
    Unicode,
}

/// A rendered code, ready to display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedCode {
    pub format: QrFormat,
    pub body: String,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error("QR encoding failed: {0}")]
    Encode(String),
}

/// Turns an arbitrary text payload into a displayable code
pub trait QrRenderer: Send + Sync {
    fn render(&self, text: &str) -> Result<RenderedCode, RenderError>;
}

/// Whether a renderer is available in this build
#[derive(Clone)]
pub enum RenderCapability {
    Available(Arc<dyn QrRenderer>),
    Unavailable,
}

impl RenderCapability {
    /// Pick the built-in renderer if it was compiled in
    #[cfg(feature = "qr")]
    pub fn detect(format: QrFormat) -> Self {
        RenderCapability::Available(Arc::new(QrCodeRenderer::new(format)))
    }

    /// Pick the built-in renderer if it was compiled in
    #[cfg(not(feature = "qr"))]
    pub fn detect(_format: QrFormat) -> Self {
        RenderCapability::Unavailable
    }

    pub fn with_renderer(renderer: impl QrRenderer + 'static) -> Self {
        RenderCapability::Available(Arc::new(renderer))
    }

    pub fn is_available(&self) -> bool {
        matches!(self, RenderCapability::Available(_))
    }

    /// Render `text`, or `None` when no renderer is available or it failed
    pub fn render(&self, text: &str) -> Option<RenderedCode> {
        let RenderCapability::Available(renderer) = self else {
            return None;
        };

        match renderer.render(text) {
            Ok(code) => Some(code),
            Err(e) => {
                tracing::warn!(error = %e, "QR rendering failed, serving text payload only");
                None
            }
        }
    }
}

impl fmt::Debug for RenderCapability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderCapability::Available(_) => f.write_str("Available"),
            RenderCapability::Unavailable => f.write_str("Unavailable"),
        }
    }
}
