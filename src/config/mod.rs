//! Configuration loading and management
//!
//! Configuration is an explicit value handed to the components that need
//! it; nothing reads settings from global state after startup.

use crate::ai::RetryPolicy;
use crate::core::error::ConfigError;
use crate::render::QrFormat;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Environment variable holding a user-supplied API key
pub const CUSTOM_KEY_VAR: &str = "CUSTOM_OPENAI_API_KEY";
/// Environment variables provided by the hosting integration
pub const INTEGRATION_KEY_VAR: &str = "AI_INTEGRATIONS_OPENAI_API_KEY";
pub const INTEGRATION_BASE_URL_VAR: &str = "AI_INTEGRATIONS_OPENAI_BASE_URL";

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind, e.g. "127.0.0.1:3000"
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:3000".to_string(),
        }
    }
}

/// Model API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    pub model: String,

    /// Explicit API key; takes precedence over every environment variable
    pub api_key: Option<String>,

    /// Base URL used together with `api_key`
    pub base_url: Option<String>,

    pub timeout_secs: u64,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o".to_string(),
            api_key: None,
            base_url: None,
            timeout_secs: 60,
        }
    }
}

/// Backoff settings for model API calls
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    pub max_attempts: u32,
    pub multiplier: f64,
    pub min_delay_secs: f64,
    pub max_delay_secs: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            multiplier: 1.0,
            min_delay_secs: 2.0,
            max_delay_secs: 64.0,
        }
    }
}

impl RetryConfig {
    pub fn to_policy(&self) -> Result<RetryPolicy, ConfigError> {
        let delay = |field: &str, secs: f64| {
            Duration::try_from_secs_f64(secs).map_err(|e| ConfigError::InvalidValue {
                field: field.to_string(),
                value: secs.to_string(),
                message: e.to_string(),
            })
        };

        let min_delay = delay("retry.min_delay_secs", self.min_delay_secs)?;
        let max_delay = delay("retry.max_delay_secs", self.max_delay_secs)?;
        if min_delay > max_delay {
            return Err(ConfigError::InvalidValue {
                field: "retry.min_delay_secs".to_string(),
                value: self.min_delay_secs.to_string(),
                message: "must not exceed retry.max_delay_secs".to_string(),
            });
        }

        Ok(RetryPolicy {
            max_attempts: self.max_attempts,
            multiplier: self.multiplier,
            min_delay,
            max_delay,
            ..RetryPolicy::default()
        })
    }
}

/// Pix defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PixConfig {
    /// Key used in charge messages when the request names none
    pub default_key: String,
    pub qr_format: QrFormat,
}

impl Default for PixConfig {
    fn default() -> Self {
        Self {
            default_key: "churrasco@pix.com".to_string(),
            qr_format: QrFormat::Svg,
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub ai: AiConfig,
    #[serde(default)]
    pub retry: RetryConfig,
    #[serde(default)]
    pub pix: PixConfig,
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Apply `CHURRASCO_BIND` and `CHURRASCO_MODEL` from the process environment
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(bind) = non_empty(lookup("CHURRASCO_BIND")) {
            self.server.bind = bind;
        }
        if let Some(model) = non_empty(lookup("CHURRASCO_MODEL")) {
            self.ai.model = model;
        }
        self
    }
}

/// Where the API credentials came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    /// `ai.api_key` in configuration
    Explicit,
    /// `CUSTOM_OPENAI_API_KEY`
    CustomEnv,
    /// `AI_INTEGRATIONS_OPENAI_*`
    Integration,
}

/// Resolved API key and endpoint
#[derive(Clone, PartialEq, Eq)]
pub struct AiCredentials {
    pub api_key: String,
    pub base_url: String,
    pub source: CredentialSource,
}

impl std::fmt::Debug for AiCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AiCredentials")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("source", &self.source)
            .finish()
    }
}

impl AiCredentials {
    /// Resolve credentials against the process environment
    pub fn from_env(config: &AiConfig) -> Result<Self, ConfigError> {
        Self::resolve(config, |key| std::env::var(key).ok())
    }

    /// Resolve credentials in precedence order:
    ///
    /// 1. `ai.api_key` (with `ai.base_url` if set)
    /// 2. `CUSTOM_OPENAI_API_KEY`, against the public OpenAI endpoint
    /// 3. `AI_INTEGRATIONS_OPENAI_API_KEY` with `AI_INTEGRATIONS_OPENAI_BASE_URL`
    ///
    /// Empty values count as unset.
    pub fn resolve(
        config: &AiConfig,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(api_key) = non_empty(config.api_key.clone()) {
            return Ok(Self {
                api_key,
                base_url: non_empty(config.base_url.clone())
                    .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
                source: CredentialSource::Explicit,
            });
        }

        if let Some(api_key) = non_empty(lookup(CUSTOM_KEY_VAR)) {
            return Ok(Self {
                api_key,
                base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
                source: CredentialSource::CustomEnv,
            });
        }

        if let Some(api_key) = non_empty(lookup(INTEGRATION_KEY_VAR)) {
            return Ok(Self {
                api_key,
                base_url: non_empty(lookup(INTEGRATION_BASE_URL_VAR))
                    .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
                source: CredentialSource::Integration,
            });
        }

        Err(ConfigError::MissingField {
            field: "ai.api_key".to_string(),
            context: format!(
                "configuration or environment ({CUSTOM_KEY_VAR}, {INTEGRATION_KEY_VAR})"
            ),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
