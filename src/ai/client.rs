//! OpenAI-compatible chat-completion client

use super::error::AiError;
use super::generator::{CompletionRequest, TextGenerator};
use crate::config::{AiConfig, AiCredentials};
use crate::core::error::ConfigError;
use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::{Value, json};
use std::time::Duration;

/// Chat-completion client for any OpenAI-compatible endpoint
#[derive(Clone)]
pub struct OpenAiClient {
    http: reqwest::Client,
    credentials: AiCredentials,
    model: String,
}

impl OpenAiClient {
    /// Create a client with the default HTTP settings
    pub fn new(credentials: AiCredentials, model: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            credentials,
            model: model.into(),
        }
    }

    /// Create a client from configuration, resolving credentials from the
    /// process environment
    pub fn from_config(config: &AiConfig) -> Result<Self, ConfigError> {
        let credentials = AiCredentials::from_env(config)?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ConfigError::InvalidValue {
                field: "ai.timeout_secs".to_string(),
                value: config.timeout_secs.to_string(),
                message: e.to_string(),
            })?;

        tracing::info!(
            model = %config.model,
            source = ?credentials.source,
            base_url = %credentials.base_url,
            "Configured model API client"
        );

        Ok(Self {
            http,
            credentials,
            model: config.model.clone(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.credentials.base_url.trim_end_matches('/')
        )
    }

    /// JSON body sent for `request`
    pub fn request_body(&self, request: &CompletionRequest) -> Value {
        let mut messages = Vec::new();
        if let Some(system) = &request.system {
            messages.push(json!({ "role": "system", "content": system }));
        }

        let user_content = match &request.image_jpeg {
            Some(jpeg) => {
                let data_url = format!("data:image/jpeg;base64,{}", STANDARD.encode(jpeg));
                json!([
                    { "type": "text", "text": request.prompt },
                    { "type": "image_url", "image_url": { "url": data_url } }
                ])
            }
            None => json!(request.prompt),
        };
        messages.push(json!({ "role": "user", "content": user_content }));

        let mut body = json!({
            "model": self.model,
            "messages": messages,
            "max_tokens": request.max_tokens,
        });
        if request.json_mode {
            body["response_format"] = json!({ "type": "json_object" });
        }
        body
    }
}

#[async_trait]
impl TextGenerator for OpenAiClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, AiError> {
        let response = self
            .http
            .post(self.endpoint())
            .bearer_auth(&self.credentials.api_key)
            .json(&self.request_body(request))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(AiError::Api {
                status: status.as_u16(),
                message: api_error_message(&text),
            });
        }

        let body: Value = response.json().await?;
        extract_content(&body)
    }
}

/// Text of the first choice of a chat-completion response
pub fn extract_content(body: &Value) -> Result<String, AiError> {
    body.pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| AiError::InvalidResponse {
            message: "response has no choices[0].message.content".to_string(),
        })
}

/// Prefer `error.message` from a JSON error body, fall back to the raw text
fn api_error_message(text: &str) -> String {
    serde_json::from_str::<Value>(text)
        .ok()
        .and_then(|v| {
            v.pointer("/error/message")
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or_else(|| text.to_string())
}
