use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{HospitalStore, StoreError, StoreResult};
use crate::models::{Doctor, Patient, User};

/// Failure an [`InMemoryStore`] operation can be made to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    Unavailable,
    Decode,
}

impl Fault {
    fn into_error(self, operation: &str) -> StoreError {
        match self {
            Fault::Unavailable => StoreError::Unavailable(format!("{} failed", operation)),
            Fault::Decode => StoreError::Decode(format!("{} returned a malformed document", operation)),
        }
    }
}

#[derive(Default)]
struct Collections {
    users: Vec<User>,
    doctors: Vec<Doctor>,
    patients: Vec<Patient>,
}

/// In-process [`HospitalStore`] with the same matching rules as the MongoDB
/// implementation. Documents keep insertion order, which stands in for the
/// store's natural order.
#[derive(Default)]
pub struct InMemoryStore {
    collections: RwLock<Collections>,
    unavailable: AtomicBool,
    faults: Mutex<HashMap<&'static str, Fault>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// While set, every operation fails with [`StoreError::Unavailable`].
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Make the named trait operation (e.g. `"insert_user"`) fail with
    /// `fault` until [`InMemoryStore::clear_faults`] is called.
    pub fn inject_fault(&self, operation: &'static str, fault: Fault) {
        self.faults
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(operation, fault);
    }

    pub fn clear_faults(&self) {
        self.faults
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clear();
    }

    pub async fn insert_patient(&self, patient: Patient) -> StoreResult<()> {
        self.check("insert_patient")?;
        self.collections.write().await.patients.push(patient);
        Ok(())
    }

    pub async fn users(&self) -> Vec<User> {
        self.collections.read().await.users.clone()
    }

    fn check(&self, operation: &str) -> StoreResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("in-memory store marked unavailable".into()));
        }
        let faults = self
            .faults
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        match faults.get(operation) {
            Some(fault) => Err(fault.into_error(operation)),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl HospitalStore for InMemoryStore {
    async fn username_exists(&self, username: &str) -> StoreResult<bool> {
        self.check("username_exists")?;
        let collections = self.collections.read().await;
        Ok(collections.users.iter().any(|u| u.username == username))
    }

    async fn insert_user(&self, user: &User) -> StoreResult<()> {
        self.check("insert_user")?;
        let mut collections = self.collections.write().await;
        if collections.users.iter().any(|u| u.username == user.username) {
            return Err(StoreError::DuplicateKey(format!("username: {}", user.username)));
        }
        collections.users.push(user.clone());
        Ok(())
    }

    async fn list_doctors(&self) -> StoreResult<Vec<Doctor>> {
        self.check("list_doctors")?;
        Ok(self.collections.read().await.doctors.clone())
    }

    async fn find_doctor(&self, id: &str) -> StoreResult<Option<Doctor>> {
        self.check("find_doctor")?;
        let collections = self.collections.read().await;
        Ok(collections.doctors.iter().find(|d| d.id == id).cloned())
    }

    async fn insert_doctor(&self, doctor: &Doctor) -> StoreResult<()> {
        self.check("insert_doctor")?;
        self.collections.write().await.doctors.push(doctor.clone());
        Ok(())
    }

    async fn set_doctor_schedule(&self, id: &str, schedule: &[String]) -> StoreResult<()> {
        self.check("set_doctor_schedule")?;
        let mut collections = self.collections.write().await;
        if let Some(doctor) = collections.doctors.iter_mut().find(|d| d.id == id) {
            doctor.schedule = schedule.to_vec();
        }
        Ok(())
    }

    async fn find_patient(&self, id: &str) -> StoreResult<Option<Patient>> {
        self.check("find_patient")?;
        let collections = self.collections.read().await;
        Ok(collections.patients.iter().find(|p| p.id == id).cloned())
    }

    async fn push_appointment(&self, patient_id: &str, appointment: &str) -> StoreResult<()> {
        self.check("push_appointment")?;
        let mut collections = self.collections.write().await;
        if let Some(patient) = collections.patients.iter_mut().find(|p| p.id == patient_id) {
            patient.schedule.push(appointment.to_string());
        }
        Ok(())
    }

    async fn replace_appointment(
        &self,
        patient_id: &str,
        current: &str,
        replacement: &str,
    ) -> StoreResult<()> {
        self.check("replace_appointment")?;
        let mut collections = self.collections.write().await;
        let matching = collections
            .patients
            .iter_mut()
            .find(|p| p.id == patient_id && p.schedule.iter().any(|a| a == current));

        if let Some(patient) = matching {
            if let Some(slot) = patient.schedule.iter_mut().find(|a| a.as_str() == current) {
                *slot = replacement.to_string();
            }
        }
        Ok(())
    }

    async fn pull_appointment(&self, patient_id: &str, appointment: &str) -> StoreResult<()> {
        self.check("pull_appointment")?;
        let mut collections = self.collections.write().await;
        if let Some(patient) = collections.patients.iter_mut().find(|p| p.id == patient_id) {
            patient.schedule.retain(|a| a != appointment);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patient(id: &str, schedule: &[&str]) -> Patient {
        Patient {
            id: id.to_string(),
            pname: format!("patient {}", id),
            schedule: schedule.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected_atomically() {
        let store = InMemoryStore::new();
        let user = User {
            username: "alice".into(),
            password: "hash".into(),
            email: "alice@example.com".into(),
        };

        store.insert_user(&user).await.unwrap();
        let err = store.insert_user(&user).await.unwrap_err();

        assert!(matches!(err, StoreError::DuplicateKey(_)));
        assert_eq!(store.users().await.len(), 1);
    }

    #[tokio::test]
    async fn test_replace_only_first_match_on_matching_patient() {
        let store = InMemoryStore::new();
        store.insert_patient(patient("p1", &["A1", "B", "A1"])).await.unwrap();

        store.replace_appointment("p1", "A1", "A1-new").await.unwrap();

        let p = store.find_patient("p1").await.unwrap().unwrap();
        assert_eq!(p.schedule, vec!["A1-new", "B", "A1"]);
    }

    #[tokio::test]
    async fn test_replace_skips_same_id_patient_without_entry() {
        let store = InMemoryStore::new();
        store.insert_patient(patient("p1", &["X"])).await.unwrap();
        store.insert_patient(patient("p1", &["A1"])).await.unwrap();

        store.replace_appointment("p1", "A1", "A2").await.unwrap();

        let collections = store.collections.read().await;
        assert_eq!(collections.patients[0].schedule, vec!["X"]);
        assert_eq!(collections.patients[1].schedule, vec!["A2"]);
    }

    #[tokio::test]
    async fn test_pull_removes_all_occurrences() {
        let store = InMemoryStore::new();
        store.insert_patient(patient("p1", &["A1", "B", "A1"])).await.unwrap();

        store.pull_appointment("p1", "A1").await.unwrap();

        let p = store.find_patient("p1").await.unwrap().unwrap();
        assert_eq!(p.schedule, vec!["B"]);
    }

    #[tokio::test]
    async fn test_updates_on_unknown_ids_are_noops() {
        let store = InMemoryStore::new();

        store.push_appointment("ghost", "A1").await.unwrap();
        store.set_doctor_schedule("ghost", &["Mon".to_string()]).await.unwrap();

        assert!(store.find_patient("ghost").await.unwrap().is_none());
        assert!(store.list_doctors().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_fault_targets_single_operation() {
        let store = InMemoryStore::new();
        store.inject_fault("list_doctors", Fault::Decode);

        assert!(matches!(store.list_doctors().await, Err(StoreError::Decode(_))));
        assert!(store.find_doctor("d1").await.unwrap().is_none());

        store.clear_faults();
        assert!(store.list_doctors().await.is_ok());
    }

    #[tokio::test]
    async fn test_unavailable_fails_every_operation() {
        let store = InMemoryStore::new();
        store.set_unavailable(true);

        assert!(matches!(
            store.list_doctors().await,
            Err(StoreError::Unavailable(_))
        ));
        assert!(store.username_exists("alice").await.is_err());

        store.set_unavailable(false);
        assert!(store.list_doctors().await.is_ok());
    }
}
