mod doctor;
mod patient;
mod user;

pub use doctor::Doctor;
pub use patient::Patient;
pub use user::{SignUpRequest, User};

use serde::{Deserialize, Deserializer};

/// Reads a schedule that may be absent or stored as `null` as an empty list.
fn schedule_or_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}
