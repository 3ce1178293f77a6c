//! Document store access.
//!
//! Handlers never talk to MongoDB directly; they go through [`HospitalStore`],
//! which has a MongoDB implementation for production and an in-process one
//! for tests.

mod memory;
mod mongo;

pub use memory::{Fault, InMemoryStore};
pub use mongo::MongoStore;

use async_trait::async_trait;

use crate::models::{Doctor, Patient, User};

pub const USERS_COLLECTION: &str = "users";
pub const DOCTORS_COLLECTION: &str = "doctor";
pub const PATIENTS_COLLECTION: &str = "patients";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    #[error("Failed to decode document: {0}")]
    Decode(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Operations the HTTP layer needs from the document store.
///
/// Update operations follow update-one semantics: a filter that matches
/// nothing is not an error.
#[async_trait]
pub trait HospitalStore: Send + Sync {
    async fn username_exists(&self, username: &str) -> StoreResult<bool>;

    /// Fails with [`StoreError::DuplicateKey`] if the username is already taken.
    async fn insert_user(&self, user: &User) -> StoreResult<()>;

    async fn list_doctors(&self) -> StoreResult<Vec<Doctor>>;

    async fn find_doctor(&self, id: &str) -> StoreResult<Option<Doctor>>;

    async fn insert_doctor(&self, doctor: &Doctor) -> StoreResult<()>;

    async fn set_doctor_schedule(&self, id: &str, schedule: &[String]) -> StoreResult<()>;

    async fn find_patient(&self, id: &str) -> StoreResult<Option<Patient>>;

    /// Appends `appointment` to the end of the patient's schedule.
    async fn push_appointment(&self, patient_id: &str, appointment: &str) -> StoreResult<()>;

    /// Replaces the first schedule entry equal to `current` with `replacement`.
    async fn replace_appointment(
        &self,
        patient_id: &str,
        current: &str,
        replacement: &str,
    ) -> StoreResult<()>;

    /// Removes every schedule entry equal to `appointment`.
    async fn pull_appointment(&self, patient_id: &str, appointment: &str) -> StoreResult<()>;
}
