mod doctors;
mod extract;
mod patients;
mod signup;

pub use extract::JsonBody;

use axum::Router;
use serde_json::json;

use crate::AppState;

pub fn routes(expose_patient_schedule: bool) -> Router<AppState> {
    Router::new()
        .merge(signup::routes())
        .nest("/doctors", doctors::routes())
        .nest("/patients", patients::routes(expose_patient_schedule))
}

/// Body used by every successful mutation.
fn message(text: &str) -> axum::Json<serde_json::Value> {
    axum::Json(json!({ "message": text }))
}
