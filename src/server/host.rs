//! Server host, the transport-agnostic state shared by every exposure

use crate::ai::Assistant;
use crate::config::AppConfig;
use crate::render::RenderCapability;
use std::sync::Arc;

/// Everything the handlers need, immutable once built
///
/// The host holds the configuration, the optional model-backed assistant
/// and the QR rendering capability. Exposures such as
/// [`RestExposure`](super::exposure::RestExposure) consume it to build their
/// routers.
pub struct ServerHost {
    pub config: Arc<AppConfig>,

    /// `None` when the server was started without model credentials
    pub assistant: Option<Arc<Assistant>>,

    pub render: RenderCapability,
}

impl ServerHost {
    pub fn new(
        config: AppConfig,
        assistant: Option<Assistant>,
        render: RenderCapability,
    ) -> Self {
        Self {
            config: Arc::new(config),
            assistant: assistant.map(Arc::new),
            render,
        }
    }

    /// Whether the model-backed endpoints can serve requests
    pub fn has_assistant(&self) -> bool {
        self.assistant.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_without_assistant() {
        let host = ServerHost::new(AppConfig::default(), None, RenderCapability::Unavailable);
        assert!(!host.has_assistant());
        assert!(!host.render.is_available());
        assert_eq!(host.config.pix.default_key, "churrasco@pix.com");
    }
}
