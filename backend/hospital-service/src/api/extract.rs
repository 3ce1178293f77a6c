use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::AppError;

/// JSON body extractor that ignores `Content-Type` and turns every parse
/// failure into [`AppError::InvalidInput`].
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|e| {
            tracing::debug!(error = %e, "Failed to read request body");
            AppError::InvalidInput
        })?;

        let value = serde_json::from_slice(&bytes).map_err(|e| {
            tracing::debug!(error = %e, "Rejected request body");
            AppError::InvalidInput
        })?;

        Ok(JsonBody(value))
    }
}

impl<T: Validate> JsonBody<T> {
    pub fn validated(self) -> Result<T, AppError> {
        self.0.validate().map_err(|e| {
            tracing::debug!(error = %e, "Request body failed validation");
            AppError::InvalidInput
        })?;
        Ok(self.0)
    }
}
