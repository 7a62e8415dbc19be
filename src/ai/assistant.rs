//! High-level operations backed by the text-generation service

use super::error::AiError;
use super::generator::{CompletionRequest, TextGenerator};
use super::prompts;
use super::retry::RetryPolicy;
use super::types::{Receipt, ShoppingList};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

const JSON_MAX_TOKENS: u32 = 2000;
const CHARGE_MAX_TOKENS: u32 = 300;
const OVERDUE_MAX_TOKENS: u32 = 400;

/// Shopping lists, receipt reading and charge messages
///
/// Every call goes through the retry policy; rate-limited calls are retried
/// with backoff, other failures surface immediately.
#[derive(Clone)]
pub struct Assistant {
    generator: Arc<dyn TextGenerator>,
    retry: RetryPolicy,
}

impl Assistant {
    pub fn new(generator: Arc<dyn TextGenerator>, retry: RetryPolicy) -> Self {
        Self { generator, retry }
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Generate a shopping list from a free-text event description
    pub async fn shopping_list(&self, description: &str) -> Result<ShoppingList, AiError> {
        let description = description.trim();
        if description.is_empty() {
            return Err(AiError::EmptyInput {
                what: "description",
            });
        }

        let request = CompletionRequest::new(prompts::shopping_list(description), JSON_MAX_TOKENS)
            .with_system(prompts::SHOPPING_LIST_SYSTEM)
            .json();

        let text = self.call("shopping_list", &request).await?;
        parse_json(&text)
    }

    /// Read the line items of a receipt photo (JPEG bytes)
    pub async fn read_receipt(&self, image_jpeg: &[u8]) -> Result<Receipt, AiError> {
        if image_jpeg.is_empty() {
            return Err(AiError::EmptyInput { what: "image" });
        }

        let request = CompletionRequest::new(prompts::RECEIPT, JSON_MAX_TOKENS)
            .with_image(image_jpeg.to_vec())
            .json();

        let text = self.call("read_receipt", &request).await?;
        let value: Value = parse_json(&text)?;

        if let Some(message) = value.get("error").and_then(Value::as_str) {
            return Err(AiError::NotAReceipt {
                message: message.to_string(),
            });
        }

        Ok(serde_json::from_value(value)?)
    }

    /// Friendly payment request for one participant
    pub async fn charge_message(
        &self,
        name: &str,
        amount: f64,
        items: &[String],
        pix_key: &str,
    ) -> Result<String, AiError> {
        let request = CompletionRequest::new(
            prompts::charge(name, amount, items, pix_key),
            CHARGE_MAX_TOKENS,
        )
        .with_system(prompts::CHARGE_SYSTEM);

        let text = self.call("charge_message", &request).await?;
        Ok(text.trim().to_string())
    }

    /// Teasing reminder for someone who has not paid yet
    pub async fn overdue_charge_message(
        &self,
        name: &str,
        amount: f64,
        days_late: u32,
    ) -> Result<String, AiError> {
        let request = CompletionRequest::new(
            prompts::overdue_charge(name, amount, days_late),
            OVERDUE_MAX_TOKENS,
        )
        .with_system(prompts::OVERDUE_SYSTEM);

        let text = self.call("overdue_charge_message", &request).await?;
        Ok(text.trim().to_string())
    }

    async fn call(&self, operation: &str, request: &CompletionRequest) -> Result<String, AiError> {
        let generator = &self.generator;
        self.retry
            .run(operation, move || generator.complete(request))
            .await
    }
}

/// Decode a JSON answer, tolerating a surrounding markdown code fence
fn parse_json<T: DeserializeOwned>(text: &str) -> Result<T, AiError> {
    let trimmed = text.trim();
    let body = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.strip_suffix("```"))
        .unwrap_or(trimmed);

    Ok(serde_json::from_str(body.trim())?)
}
