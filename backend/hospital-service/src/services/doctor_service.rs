// Doctor service - directory queries and schedule management
use std::sync::Arc;

use crate::db::{HospitalStore, StoreError};
use crate::error::{AppError, Result};
use crate::models::Doctor;

pub struct DoctorService {
    store: Arc<dyn HospitalStore>,
}

impl DoctorService {
    pub fn new(store: Arc<dyn HospitalStore>) -> Self {
        Self { store }
    }

    pub async fn list_doctors(&self) -> Result<Vec<Doctor>> {
        self.store.list_doctors().await.map_err(|e| match e {
            StoreError::Decode(_) => AppError::store("Error decoding doctor data", e),
            e => AppError::store("Error fetching doctor data", e),
        })
    }

    pub async fn get_doctor(&self, id: &str) -> Result<Doctor> {
        self.store
            .find_doctor(id)
            .await
            .map_err(|e| AppError::store("Error fetching doctor data", e))?
            .ok_or(AppError::NotFound("Doctor"))
    }

    /// Inserts the document as given. Ids are not checked for duplicates.
    pub async fn create_doctor(&self, doctor: Doctor) -> Result<()> {
        self.store
            .insert_doctor(&doctor)
            .await
            .map_err(|e| AppError::store("Error creating doctor", e))?;

        tracing::info!(doctor_id = %doctor.id, "Doctor created");
        Ok(())
    }

    /// Replaces the whole schedule. Unknown ids are a silent no-op.
    pub async fn set_schedule(&self, id: &str, schedule: Vec<String>) -> Result<()> {
        self.store
            .set_doctor_schedule(id, &schedule)
            .await
            .map_err(|e| AppError::store("Error updating doctor's schedule", e))?;

        tracing::info!(doctor_id = %id, entries = schedule.len(), "Doctor schedule replaced");
        Ok(())
    }
}
