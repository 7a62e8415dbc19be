//! Tests for configuration loading and credential resolution

use churrasco::config::{
    AiConfig, AiCredentials, AppConfig, CredentialSource, DEFAULT_OPENAI_BASE_URL,
};
use churrasco::core::error::ConfigError;
use churrasco::render::QrFormat;
use std::collections::HashMap;
use std::io::Write;
use std::time::Duration;
use tempfile::NamedTempFile;

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn test_load_from_yaml_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
server:
  bind: "0.0.0.0:8080"
ai:
  model: gpt-4o-mini
  timeout_secs: 30
retry:
  max_attempts: 3
  min_delay_secs: 1
  max_delay_secs: 10
pix:
  default_key: "+5511999998888"
  qr_format: unicode
"#
    )
    .unwrap();

    let config = AppConfig::from_yaml_file(file.path().to_str().unwrap()).unwrap();

    assert_eq!(config.server.bind, "0.0.0.0:8080");
    assert_eq!(config.ai.model, "gpt-4o-mini");
    assert_eq!(config.ai.timeout_secs, 30);
    assert_eq!(config.pix.default_key, "+5511999998888");
    assert_eq!(config.pix.qr_format, QrFormat::Unicode);

    let policy = config.retry.to_policy().unwrap();
    assert_eq!(policy.max_attempts, 3);
    assert_eq!(policy.min_delay, Duration::from_secs(1));
    assert_eq!(policy.max_delay, Duration::from_secs(10));
}

#[test]
fn test_partial_yaml_keeps_defaults() {
    let config = AppConfig::from_yaml_str("ai:\n  model: gpt-4.1\n").unwrap();

    assert_eq!(config.ai.model, "gpt-4.1");
    assert_eq!(config.ai.timeout_secs, 60);
    assert_eq!(config.server.bind, "127.0.0.1:3000");
    assert_eq!(config.retry.max_attempts, 5);
    assert_eq!(config.pix.default_key, "churrasco@pix.com");
    assert_eq!(config.pix.qr_format, QrFormat::Svg);
}

#[test]
fn test_empty_yaml_is_default() {
    let config = AppConfig::from_yaml_str("{}").unwrap();
    assert_eq!(config.ai.model, "gpt-4o");
}

#[test]
fn test_empty_sections_keep_defaults() {
    let config = AppConfig::from_yaml_str("server: {}\nretry: {}\npix: {}\n").unwrap();
    assert_eq!(config.server.bind, "127.0.0.1:3000");
    assert_eq!(config.retry.max_attempts, 5);
    assert_eq!(config.pix.default_key, "churrasco@pix.com");
}

#[test]
fn test_missing_file_is_error() {
    assert!(AppConfig::from_yaml_file("/nonexistent/churrasco.yaml").is_err());
}

#[test]
fn test_invalid_yaml_is_error() {
    assert!(AppConfig::from_yaml_str("server: [unclosed").is_err());
}

#[test]
fn test_env_overrides() {
    let config = AppConfig::default().with_overrides_from(lookup(&[
        ("CHURRASCO_BIND", "0.0.0.0:9000"),
        ("CHURRASCO_MODEL", "gpt-4o-mini"),
    ]));

    assert_eq!(config.server.bind, "0.0.0.0:9000");
    assert_eq!(config.ai.model, "gpt-4o-mini");
}

// =============================================================================
// Credential precedence
// =============================================================================

mod credential_tests {
    use super::*;

    #[test]
    fn test_explicit_key_with_custom_base_url() {
        let config = AiConfig {
            api_key: Some("sk-explicit".to_string()),
            base_url: Some("http://localhost:8080/v1".to_string()),
            ..AiConfig::default()
        };

        let creds = AiCredentials::resolve(&config, lookup(&[("CUSTOM_OPENAI_API_KEY", "sk-c")]))
            .unwrap();

        assert_eq!(creds.source, CredentialSource::Explicit);
        assert_eq!(creds.base_url, "http://localhost:8080/v1");
    }

    #[test]
    fn test_custom_key_ignores_integration_base_url() {
        let creds = AiCredentials::resolve(
            &AiConfig::default(),
            lookup(&[
                ("CUSTOM_OPENAI_API_KEY", "sk-custom"),
                ("AI_INTEGRATIONS_OPENAI_BASE_URL", "http://proxy/v1"),
            ]),
        )
        .unwrap();

        assert_eq!(creds.source, CredentialSource::CustomEnv);
        assert_eq!(creds.base_url, DEFAULT_OPENAI_BASE_URL);
    }

    #[test]
    fn test_integration_credentials() {
        let creds = AiCredentials::resolve(
            &AiConfig::default(),
            lookup(&[
                ("AI_INTEGRATIONS_OPENAI_API_KEY", "sk-int"),
                ("AI_INTEGRATIONS_OPENAI_BASE_URL", "http://proxy/v1"),
            ]),
        )
        .unwrap();

        assert_eq!(creds.api_key, "sk-int");
        assert_eq!(creds.source, CredentialSource::Integration);
        assert_eq!(creds.base_url, "http://proxy/v1");
    }

    #[test]
    fn test_integration_key_without_base_url() {
        let creds = AiCredentials::resolve(
            &AiConfig::default(),
            lookup(&[("AI_INTEGRATIONS_OPENAI_API_KEY", "sk-int")]),
        )
        .unwrap();

        assert_eq!(creds.base_url, DEFAULT_OPENAI_BASE_URL);
    }

    #[test]
    fn test_nothing_configured() {
        let result = AiCredentials::resolve(&AiConfig::default(), lookup(&[]));
        assert!(matches!(result, Err(ConfigError::MissingField { .. })));
    }
}
