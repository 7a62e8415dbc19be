//! Axum extractors for validated request bodies

use crate::core::error::{ChurrascoError, ValidationError};
use axum::Json;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use validator::Validate;

/// Axum extractor that deserializes a JSON body and runs its `Validate` rules
///
/// Rejections are regular [`ChurrascoError`] responses: malformed JSON and
/// failed rules both come back as `400 VALIDATION_ERROR`.
///
/// # Usage
///
/// ```rust,ignore
/// pub async fn create_pix(
///     ValidatedJson(request): ValidatedJson<PixRequest>,
/// ) -> ChurrascoResult<Json<PixResponse>> {
///     // request already passed its field rules
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<T> ValidatedJson<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> std::ops::Deref for ValidatedJson<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ChurrascoError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload): Json<T> = Json::from_request(req, state).await.map_err(|e| {
            ValidationError::InvalidJson {
                message: e.body_text(),
            }
        })?;

        payload.validate().map_err(ValidationError::from)?;

        Ok(ValidatedJson(payload))
    }
}
