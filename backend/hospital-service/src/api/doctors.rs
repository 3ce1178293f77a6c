use axum::{
    extract::{Path, State},
    routing::{get, put},
    Json, Router,
};

use super::{message, JsonBody};
use crate::error::Result;
use crate::models::Doctor;
use crate::services::DoctorService;
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_doctors).post(create_doctor))
        .route("/:id", get(get_doctor))
        .route("/:id/schedule", put(set_schedule))
}

async fn list_doctors(State(state): State<AppState>) -> Result<Json<Vec<Doctor>>> {
    let doctors = DoctorService::new(state.store.clone()).list_doctors().await?;
    Ok(Json(doctors))
}

async fn get_doctor(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Doctor>> {
    let doctor = DoctorService::new(state.store.clone()).get_doctor(&id).await?;
    Ok(Json(doctor))
}

async fn create_doctor(
    State(state): State<AppState>,
    JsonBody(doctor): JsonBody<Doctor>,
) -> Result<Json<serde_json::Value>> {
    DoctorService::new(state.store.clone())
        .create_doctor(doctor)
        .await?;

    Ok(message("Doctor created successfully"))
}

async fn set_schedule(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(schedule): JsonBody<Vec<String>>,
) -> Result<Json<serde_json::Value>> {
    DoctorService::new(state.store.clone())
        .set_schedule(&id, schedule)
        .await?;

    Ok(message("Doctor's schedule updated successfully"))
}
