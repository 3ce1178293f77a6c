// Appointment service - patient schedule mutations
use std::sync::Arc;

use crate::db::HospitalStore;
use crate::error::{AppError, Result};

/// Operates on the `schedule` array of patient documents. None of the
/// mutations verify that the patient or the appointment exists.
pub struct AppointmentService {
    store: Arc<dyn HospitalStore>,
}

impl AppointmentService {
    pub fn new(store: Arc<dyn HospitalStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self, patient_id: &str) -> Result<Vec<String>> {
        let patient = self
            .store
            .find_patient(patient_id)
            .await
            .map_err(|e| AppError::store("Error fetching patient data", e))?
            .ok_or(AppError::NotFound("Patient"))?;

        Ok(patient.schedule)
    }

    pub async fn book(&self, patient_id: &str, appointment: &str) -> Result<()> {
        self.store
            .push_appointment(patient_id, appointment)
            .await
            .map_err(|e| AppError::store("Error booking appointment", e))?;

        tracing::info!(patient_id = %patient_id, appointment = %appointment, "Appointment booked");
        Ok(())
    }

    pub async fn update(&self, patient_id: &str, appointment_id: &str, updated: &str) -> Result<()> {
        self.store
            .replace_appointment(patient_id, appointment_id, updated)
            .await
            .map_err(|e| AppError::store("Error updating appointment", e))?;

        tracing::info!(
            patient_id = %patient_id,
            appointment = %appointment_id,
            updated = %updated,
            "Appointment updated"
        );
        Ok(())
    }

    pub async fn cancel(&self, patient_id: &str, appointment_id: &str) -> Result<()> {
        self.store
            .pull_appointment(patient_id, appointment_id)
            .await
            .map_err(|e| AppError::store("Error canceling appointment", e))?;

        tracing::info!(patient_id = %patient_id, appointment = %appointment_id, "Appointment canceled");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::InMemoryStore;
    use crate::models::Patient;

    async fn service_with_patient(id: &str) -> (Arc<InMemoryStore>, AppointmentService) {
        let store = Arc::new(InMemoryStore::new());
        store
            .insert_patient(Patient {
                id: id.to_string(),
                pname: "Pat".to_string(),
                schedule: Vec::new(),
            })
            .await
            .unwrap();
        let service = AppointmentService::new(store.clone());
        (store, service)
    }

    #[tokio::test]
    async fn test_book_appends_in_order() {
        let (_store, service) = service_with_patient("p1").await;

        service.book("p1", "A1").await.unwrap();
        service.book("p1", "A2").await.unwrap();

        assert_eq!(service.list("p1").await.unwrap(), vec!["A1", "A2"]);
    }

    #[tokio::test]
    async fn test_update_replaces_only_matching_entry() {
        let (_store, service) = service_with_patient("p1").await;
        service.book("p1", "A1").await.unwrap();
        service.book("p1", "A2").await.unwrap();

        service.update("p1", "A1", "A1-rescheduled").await.unwrap();

        assert_eq!(
            service.list("p1").await.unwrap(),
            vec!["A1-rescheduled", "A2"]
        );
    }

    #[tokio::test]
    async fn test_cancel_missing_is_ok() {
        let (_store, service) = service_with_patient("p1").await;
        service.book("p1", "A1").await.unwrap();

        service.cancel("p1", "ZZZ").await.unwrap();

        assert_eq!(service.list("p1").await.unwrap(), vec!["A1"]);
    }

    #[tokio::test]
    async fn test_list_unknown_patient() {
        let (_store, service) = service_with_patient("p1").await;
        let err = service.list("p2").await.unwrap_err();
        assert_eq!(err.to_string(), "Patient not found");
    }

    #[tokio::test]
    async fn test_book_store_failure() {
        let (store, service) = service_with_patient("p1").await;
        store.set_unavailable(true);

        let err = service.book("p1", "A1").await.unwrap_err();
        assert_eq!(err.to_string(), "Error booking appointment");
    }
}
