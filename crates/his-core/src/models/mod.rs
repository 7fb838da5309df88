//! Domain models for the Smart-HIS system.

mod doctor;
mod medication;
mod patient;
mod prescription;

pub use doctor::*;
pub use medication::*;
pub use patient::*;
pub use prescription::*;
