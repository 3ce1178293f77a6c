use axum::{
    extract::{Path, State},
    routing::{post, put},
    Json, Router,
};

use super::{message, JsonBody};
use crate::error::Result;
use crate::services::AppointmentService;
use crate::AppState;

/// The schedule listing is only mounted on request; by default the
/// appointments collection route accepts POST only.
pub fn routes(expose_schedule: bool) -> Router<AppState> {
    let appointments = if expose_schedule {
        post(book_appointment).get(list_appointments)
    } else {
        post(book_appointment)
    };

    Router::new()
        .route("/:id/appointments", appointments)
        .route(
            "/:id/appointments/:appointment_id",
            put(update_appointment).delete(cancel_appointment),
        )
}

async fn list_appointments(
    State(state): State<AppState>,
    Path(patient_id): Path<String>,
) -> Result<Json<Vec<String>>> {
    let schedule = AppointmentService::new(state.store.clone())
        .list(&patient_id)
        .await?;
    Ok(Json(schedule))
}

async fn book_appointment(
    State(state): State<AppState>,
    Path(patient_id): Path<String>,
    JsonBody(appointment): JsonBody<String>,
) -> Result<Json<serde_json::Value>> {
    AppointmentService::new(state.store.clone())
        .book(&patient_id, &appointment)
        .await?;

    Ok(message("Appointment booked successfully"))
}

async fn update_appointment(
    State(state): State<AppState>,
    Path((patient_id, appointment_id)): Path<(String, String)>,
    JsonBody(updated): JsonBody<String>,
) -> Result<Json<serde_json::Value>> {
    AppointmentService::new(state.store.clone())
        .update(&patient_id, &appointment_id, &updated)
        .await?;

    Ok(message("Appointment updated successfully"))
}

async fn cancel_appointment(
    State(state): State<AppState>,
    Path((patient_id, appointment_id)): Path<(String, String)>,
) -> Result<Json<serde_json::Value>> {
    AppointmentService::new(state.store.clone())
        .cancel(&patient_id, &appointment_id)
        .await?;

    Ok(message("Appointment canceled successfully"))
}
