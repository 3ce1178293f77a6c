use serde::{Deserialize, Serialize};

use super::schedule_or_empty;

/// Patient document from the `patients` collection. Patients are provisioned
/// outside this service; only their schedule is mutated here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    pub id: String,
    #[serde(default, alias = "name")]
    pub pname: String,
    #[serde(default, deserialize_with = "schedule_or_empty")]
    pub schedule: Vec<String>,
}
