//! churrasco-server
//!
//! Reads `CHURRASCO_CONFIG` (a YAML file) when set, applies the
//! `CHURRASCO_*` environment overrides and serves the REST API. Without model
//! credentials the Pix and split routes still work; the assistant routes
//! answer `503`.

use churrasco::ai::OpenAiClient;
use churrasco::config::AppConfig;
use churrasco::server::ServerBuilder;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match std::env::var("CHURRASCO_CONFIG") {
        Ok(path) => {
            tracing::info!(path = %path, "Loading configuration");
            AppConfig::from_yaml_file(&path)?
        }
        Err(_) => AppConfig::default(),
    }
    .with_env_overrides();

    let mut builder = ServerBuilder::new().with_config(config.clone());

    match OpenAiClient::from_config(&config.ai) {
        Ok(client) => builder = builder.with_text_generator(client),
        Err(e) => tracing::warn!(error = %e, "Model API client not configured"),
    }

    builder.serve(&config.server.bind).await
}
