//! Language-model collaborator
//!
//! The model itself is an external service reached through the
//! [`TextGenerator`] trait. [`OpenAiClient`] talks to any OpenAI-compatible
//! chat-completion endpoint; tests plug in scripted generators instead.
//! [`Assistant`] turns prompts into typed records and applies the
//! [`RetryPolicy`] around every call.

pub mod assistant;
pub mod client;
pub mod error;
pub mod generator;
pub mod prompts;
pub mod retry;
pub mod types;

pub use assistant::Assistant;
pub use client::OpenAiClient;
pub use error::AiError;
pub use generator::{CompletionRequest, TextGenerator};
pub use retry::RetryPolicy;
pub use types::{Receipt, ShoppingItem, ShoppingList};
