use serde::{Deserialize, Serialize};

use super::schedule_or_empty;

/// Doctor document as stored in the `doctor` collection and returned by the
/// directory endpoints. The `id` is assigned by the caller; missing fields
/// are stored as empty values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doctor {
    #[serde(default)]
    pub id: String,
    #[serde(default, alias = "name")]
    pub dname: String,
    #[serde(default, deserialize_with = "schedule_or_empty")]
    pub schedule: Vec<String>,
}
