mod account_service;
mod appointment_service;
mod doctor_service;

pub use account_service::*;
pub use appointment_service::*;
pub use doctor_service::*;
