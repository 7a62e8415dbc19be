use super::{QrFormat, QrRenderer, RenderError, RenderedCode};
use qrcode::render::{svg, unicode};
use qrcode::{EcLevel, QrCode};

/// Renderer backed by the `qrcode` crate
#[derive(Debug, Clone, Copy)]
pub struct QrCodeRenderer {
    format: QrFormat,
}

impl QrCodeRenderer {
    pub fn new(format: QrFormat) -> Self {
        Self { format }
    }
}

impl QrRenderer for QrCodeRenderer {
    fn render(&self, text: &str) -> Result<RenderedCode, RenderError> {
        let code = QrCode::with_error_correction_level(text.as_bytes(), EcLevel::M)
            .map_err(|e| RenderError::Encode(e.to_string()))?;

        let body = match self.format {
            QrFormat::Svg => code
                .render::<svg::Color<'_>>()
                .min_dimensions(256, 256)
                .build(),
            QrFormat::Unicode => code
                .render::<unicode::Dense1x2>()
                .dark_color(unicode::Dense1x2::Light)
                .light_color(unicode::Dense1x2::Dark)
                .build(),
        };

        Ok(RenderedCode {
            format: self.format,
            body,
        })
    }
}
