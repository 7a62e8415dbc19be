//! ServerBuilder for fluent API to build HTTP servers

use super::exposure::RestExposure;
use super::host::ServerHost;
use crate::ai::{Assistant, TextGenerator};
use crate::config::AppConfig;
use crate::render::RenderCapability;
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Builder for creating the HTTP server
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_config(config)
///     .with_text_generator(OpenAiClient::from_config(&config.ai)?)
///     .build()?;
/// ```
pub struct ServerBuilder {
    config: AppConfig,
    generator: Option<Arc<dyn TextGenerator>>,
    assistant: Option<Assistant>,
    render: Option<RenderCapability>,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
            generator: None,
            assistant: None,
            render: None,
            custom_routes: Vec::new(),
        }
    }

    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    /// Back the model endpoints with `generator`, wrapped in the configured
    /// retry policy
    pub fn with_text_generator(mut self, generator: impl TextGenerator + 'static) -> Self {
        self.generator = Some(Arc::new(generator));
        self
    }

    /// Use a fully assembled assistant, overriding `with_text_generator`
    pub fn with_assistant(mut self, assistant: Assistant) -> Self {
        self.assistant = Some(assistant);
        self
    }

    /// Override the QR capability detected from `pix.qr_format`
    pub fn with_render_capability(mut self, render: RenderCapability) -> Self {
        self.render = Some(render);
        self
    }

    /// Add custom routes
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Build the transport-agnostic host
    pub fn build_host(self) -> Result<ServerHost> {
        let assistant = match (self.assistant, self.generator) {
            (Some(assistant), _) => Some(assistant),
            (None, Some(generator)) => {
                let retry = self.config.retry.to_policy()?;
                Some(Assistant::new(generator, retry))
            }
            (None, None) => {
                tracing::warn!("No text generator configured, model endpoints will be unavailable");
                None
            }
        };

        let render = self
            .render
            .unwrap_or_else(|| RenderCapability::detect(self.config.pix.qr_format));
        tracing::debug!(?render, "QR rendering capability");

        Ok(ServerHost::new(self.config, assistant, render))
    }

    /// Build the final REST router
    pub fn build(mut self) -> Result<Router> {
        let custom_routes = std::mem::take(&mut self.custom_routes);
        let host = Arc::new(self.build_host()?);
        RestExposure::build_router(host, custom_routes)
    }

    /// Serve on `addr` until Ctrl+C or SIGTERM
    pub async fn serve(self, addr: &str) -> Result<()> {
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Wait for Ctrl+C or SIGTERM
///
/// If a handler cannot be installed the corresponding branch never fires,
/// the server keeps running on the other one.
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
