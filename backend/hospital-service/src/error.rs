use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::db::StoreError;

/// Coarse classification of [`AppError`], one per HTTP status family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    Conflict,
    NotFound,
    Internal,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid input data")]
    InvalidInput,

    #[error("Username is already taken")]
    UsernameTaken,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{context}")]
    Store {
        context: &'static str,
        #[source]
        source: StoreError,
    },

    #[error("{context}")]
    Internal {
        context: &'static str,
        #[source]
        source: anyhow::Error,
    },
}

impl AppError {
    pub fn store(context: &'static str, source: StoreError) -> Self {
        AppError::Store { context, source }
    }

    pub fn internal(context: &'static str, source: impl Into<anyhow::Error>) -> Self {
        AppError::Internal {
            context,
            source: source.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::InvalidInput => ErrorKind::InvalidInput,
            AppError::UsernameTaken => ErrorKind::Conflict,
            AppError::NotFound(_) => ErrorKind::NotFound,
            AppError::Store { .. } | AppError::Internal { .. } => ErrorKind::Internal,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self.kind() {
            // Username conflicts are reported as a plain bad request.
            ErrorKind::InvalidInput | ErrorKind::Conflict => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match &self {
            AppError::Store { context, source } => {
                tracing::error!(error = %source, "{}", context);
            }
            AppError::Internal { context, source } => {
                tracing::error!(error = ?source, "{}", context);
            }
            _ => {}
        }

        let body = Json(json!({ "error": self.to_string() }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(AppError::InvalidInput.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::UsernameTaken.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::NotFound("Doctor").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::store("Error creating doctor", StoreError::Unavailable("down".into()))
                .status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(AppError::NotFound("Doctor").to_string(), "Doctor not found");
        assert_eq!(
            AppError::UsernameTaken.to_string(),
            "Username is already taken"
        );
        let err = AppError::internal("Error hashing password", anyhow::anyhow!("boom"));
        assert_eq!(err.to_string(), "Error hashing password");
        assert_eq!(err.kind(), ErrorKind::Internal);
    }

    #[tokio::test]
    async fn test_response_body_shape() {
        let response = AppError::NotFound("Patient").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, json!({ "error": "Patient not found" }));
    }
}
