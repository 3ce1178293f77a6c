use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::doc,
    error::{ErrorKind, WriteFailure},
    options::IndexOptions,
    Client, Collection, Database, IndexModel,
};

use super::{
    HospitalStore, StoreError, StoreResult, DOCTORS_COLLECTION, PATIENTS_COLLECTION,
    USERS_COLLECTION,
};
use crate::config::Config;
use crate::models::{Doctor, Patient, User};

const DUPLICATE_KEY_CODE: i32 = 11000;

#[derive(Clone)]
pub struct MongoStore {
    client: Client,
    db: Database,
}

impl MongoStore {
    /// Connect and verify the server answers a `ping`.
    pub async fn connect(config: &Config) -> anyhow::Result<Self> {
        let client = Client::with_uri_str(&config.db_base_url).await?;

        client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| anyhow::anyhow!("MongoDB connection error: {}", e))?;

        tracing::info!(database = %config.db_name, "Connected to MongoDB");

        Ok(Self::from_client(client, &config.db_name))
    }

    pub fn from_client(client: Client, db_name: &str) -> Self {
        let db = client.database(db_name);
        Self { client, db }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Create the unique index that backs username uniqueness.
    pub async fn ensure_indexes(&self) -> StoreResult<()> {
        let index = IndexModel::builder()
            .keys(doc! { "username": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        self.users().create_index(index).await.map_err(classify)?;
        tracing::info!("Unique username index ensured");
        Ok(())
    }

    /// Patients are provisioned outside the HTTP API.
    pub async fn insert_patient(&self, patient: &Patient) -> StoreResult<()> {
        self.patients().insert_one(patient).await.map_err(classify)?;
        Ok(())
    }

    fn users(&self) -> Collection<User> {
        self.db.collection(USERS_COLLECTION)
    }

    fn doctors(&self) -> Collection<Doctor> {
        self.db.collection(DOCTORS_COLLECTION)
    }

    fn patients(&self) -> Collection<Patient> {
        self.db.collection(PATIENTS_COLLECTION)
    }
}

fn classify(err: mongodb::error::Error) -> StoreError {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error))
            if write_error.code == DUPLICATE_KEY_CODE =>
        {
            StoreError::DuplicateKey(write_error.message.clone())
        }
        ErrorKind::BsonDeserialization(e) => StoreError::Decode(e.to_string()),
        _ => StoreError::Mongo(err),
    }
}

#[async_trait]
impl HospitalStore for MongoStore {
    async fn username_exists(&self, username: &str) -> StoreResult<bool> {
        let count = self
            .users()
            .count_documents(doc! { "username": username })
            .await
            .map_err(classify)?;
        Ok(count > 0)
    }

    async fn insert_user(&self, user: &User) -> StoreResult<()> {
        self.users().insert_one(user).await.map_err(classify)?;
        Ok(())
    }

    async fn list_doctors(&self) -> StoreResult<Vec<Doctor>> {
        let cursor = self.doctors().find(doc! {}).await.map_err(classify)?;
        cursor.try_collect().await.map_err(classify)
    }

    async fn find_doctor(&self, id: &str) -> StoreResult<Option<Doctor>> {
        self.doctors()
            .find_one(doc! { "id": id })
            .await
            .map_err(classify)
    }

    async fn insert_doctor(&self, doctor: &Doctor) -> StoreResult<()> {
        self.doctors().insert_one(doctor).await.map_err(classify)?;
        Ok(())
    }

    async fn set_doctor_schedule(&self, id: &str, schedule: &[String]) -> StoreResult<()> {
        let result = self
            .doctors()
            .update_one(doc! { "id": id }, doc! { "$set": { "schedule": schedule.to_vec() } })
            .await
            .map_err(classify)?;
        tracing::debug!(doctor_id = %id, matched = result.matched_count, "Doctor schedule set");
        Ok(())
    }

    async fn find_patient(&self, id: &str) -> StoreResult<Option<Patient>> {
        self.patients()
            .find_one(doc! { "id": id })
            .await
            .map_err(classify)
    }

    async fn push_appointment(&self, patient_id: &str, appointment: &str) -> StoreResult<()> {
        let result = self
            .patients()
            .update_one(
                doc! { "id": patient_id },
                doc! { "$push": { "schedule": appointment } },
            )
            .await
            .map_err(classify)?;
        tracing::debug!(patient_id = %patient_id, matched = result.matched_count, "Appointment pushed");
        Ok(())
    }

    async fn replace_appointment(
        &self,
        patient_id: &str,
        current: &str,
        replacement: &str,
    ) -> StoreResult<()> {
        let result = self
            .patients()
            .update_one(
                doc! { "id": patient_id, "schedule": current },
                doc! { "$set": { "schedule.$": replacement } },
            )
            .await
            .map_err(classify)?;
        tracing::debug!(patient_id = %patient_id, matched = result.matched_count, "Appointment replaced");
        Ok(())
    }

    async fn pull_appointment(&self, patient_id: &str, appointment: &str) -> StoreResult<()> {
        let result = self
            .patients()
            .update_one(
                doc! { "id": patient_id },
                doc! { "$pull": { "schedule": appointment } },
            )
            .await
            .map_err(classify)?;
        tracing::debug!(patient_id = %patient_id, modified = result.modified_count, "Appointment pulled");
        Ok(())
    }
}
