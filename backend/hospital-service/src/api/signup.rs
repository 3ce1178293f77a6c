use axum::{extract::State, routing::post, Json, Router};

use super::{message, JsonBody};
use crate::error::Result;
use crate::models::SignUpRequest;
use crate::services::AccountService;
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/signup", post(sign_up))
}

async fn sign_up(
    State(state): State<AppState>,
    body: JsonBody<SignUpRequest>,
) -> Result<Json<serde_json::Value>> {
    let payload = body.validated()?;

    AccountService::new(state.store.clone())
        .sign_up(payload)
        .await?;

    Ok(message("User created successfully"))
}
