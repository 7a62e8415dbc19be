//! HTTP handlers for the REST exposure

use crate::ai::{Assistant, Receipt, ShoppingList};
use crate::config::AppConfig;
use crate::core::error::{ChurrascoError, ChurrascoResult, ValidationError};
use crate::core::extractors::ValidatedJson;
use crate::pix::{DecodedPix, PixChargeRequest, PixKeyKind, PixPayload};
use crate::render::{RenderCapability, RenderedCode};
use crate::split::{BillItem, BillSplit, split_bill};
use axum::Json;
use axum::extract::State;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

/// State shared by the handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub assistant: Option<Arc<Assistant>>,
    pub render: RenderCapability,
}

impl AppState {
    fn assistant(&self) -> ChurrascoResult<&Assistant> {
        self.assistant
            .as_deref()
            .ok_or_else(|| ChurrascoError::Unavailable {
                feature: "Model API".to_string(),
            })
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct PixRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub key: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub receiver_name: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub city: String,
    pub amount: f64,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Serialize)]
pub struct PixResponse {
    pub payload: PixPayload,
    pub crc: String,
    pub key_kind: PixKeyKind,
    /// `null` when no renderer is available or rendering failed
    pub qr: Option<RenderedCode>,
}

/// Encode a Pix charge
///
/// POST /pix
pub async fn create_pix(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<PixRequest>,
) -> ChurrascoResult<Json<PixResponse>> {
    let key_kind = PixKeyKind::detect(&request.key);
    let payload = PixChargeRequest::new(
        request.key,
        request.receiver_name,
        request.city,
        request.amount,
    )
    .with_description(request.description)
    .encode()?;

    let qr = state.render.render(payload.as_str());

    Ok(Json(PixResponse {
        crc: payload.crc().to_string(),
        key_kind,
        qr,
        payload,
    }))
}

#[derive(Debug, Deserialize, Validate)]
pub struct VerifyRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub payload: String,
}

/// Parse and check an existing payload
///
/// POST /pix/verify
pub async fn verify_pix(
    ValidatedJson(request): ValidatedJson<VerifyRequest>,
) -> ChurrascoResult<Json<DecodedPix>> {
    let decoded = PixPayload::parse(request.payload.trim())?;
    Ok(Json(decoded))
}

#[derive(Debug, Deserialize, Validate)]
pub struct SplitRequest {
    pub items: Vec<BillItem>,
    #[validate(length(min = 1, message = "at least one participant is required"))]
    pub participants: Vec<String>,
    #[serde(default, alias = "drinkers")]
    pub restricted_participants: Vec<String>,
}

/// Split a bill among participants
///
/// POST /split
pub async fn split(
    ValidatedJson(request): ValidatedJson<SplitRequest>,
) -> ChurrascoResult<Json<BillSplit>> {
    let split = split_bill(
        &request.items,
        &request.participants,
        &request.restricted_participants,
    )?;
    Ok(Json(split))
}

#[derive(Debug, Deserialize, Validate)]
pub struct ShoppingListRequest {
    #[validate(length(min = 1, max = 2000, message = "must be 1 to 2000 characters"))]
    pub description: String,
}

/// Generate a shopping list for an event
///
/// POST /shopping-list
pub async fn shopping_list(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<ShoppingListRequest>,
) -> ChurrascoResult<Json<ShoppingList>> {
    let list = state.assistant()?.shopping_list(&request.description).await?;
    Ok(Json(list))
}

#[derive(Debug, Deserialize, Validate)]
pub struct ReceiptRequest {
    /// JPEG bytes, base64 encoded; a `data:` URL prefix is accepted
    #[validate(length(min = 1, message = "must not be empty"))]
    pub image_base64: String,
}

/// Read the items of a receipt photo
///
/// POST /receipt
pub async fn read_receipt(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<ReceiptRequest>,
) -> ChurrascoResult<Json<Receipt>> {
    let image = decode_image(&request.image_base64)?;
    let receipt = state.assistant()?.read_receipt(&image).await?;
    Ok(Json(receipt))
}

fn decode_image(encoded: &str) -> Result<Vec<u8>, ValidationError> {
    let data = encoded
        .split_once(";base64,")
        .map(|(_, data)| data)
        .unwrap_or(encoded);

    STANDARD
        .decode(data.trim())
        .map_err(|e| ValidationError::FieldError {
            field: "image_base64".to_string(),
            message: e.to_string(),
        })
}

#[derive(Debug, Deserialize, Validate)]
pub struct ChargeRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub name: String,
    #[validate(range(min = 0.0, message = "must not be negative"))]
    pub amount: f64,
    #[serde(default)]
    pub items: Vec<String>,
    /// Falls back to `pix.default_key`
    #[serde(default)]
    pub pix_key: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct OverdueChargeRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub name: String,
    #[validate(range(min = 0.0, message = "must not be negative"))]
    pub amount: f64,
    #[serde(default = "default_days_late")]
    pub days_late: u32,
}

fn default_days_late() -> u32 {
    3
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Friendly payment request
///
/// POST /charges
pub async fn charge(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<ChargeRequest>,
) -> ChurrascoResult<Json<MessageResponse>> {
    let pix_key = request
        .pix_key
        .filter(|k| !k.trim().is_empty())
        .unwrap_or_else(|| state.config.pix.default_key.clone());

    let message = state
        .assistant()?
        .charge_message(&request.name, request.amount, &request.items, &pix_key)
        .await?;
    Ok(Json(MessageResponse { message }))
}

/// Reminder for an overdue share
///
/// POST /charges/overdue
pub async fn overdue_charge(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<OverdueChargeRequest>,
) -> ChurrascoResult<Json<MessageResponse>> {
    let message = state
        .assistant()?
        .overdue_charge_message(&request.name, request.amount, request.days_late)
        .await?;
    Ok(Json(MessageResponse { message }))
}
