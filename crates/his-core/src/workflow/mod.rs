//! Prescription workflow: issuing at the doctor workstation and
//! dispensing at the pharmacy window.

mod dispensing;
mod prescribing;

pub use dispensing::*;
pub use prescribing::*;

use thiserror::Error;

/// Workflow errors.
#[derive(Error, Debug)]
pub enum WorkflowError {
    #[error("Database error: {0}")]
    Database(#[from] crate::db::DbError),

    #[error("Prescription not found: {0}")]
    PrescriptionNotFound(String),

    #[error("Medication not found: {0}")]
    MedicationNotFound(String),

    #[error("Already dispensed")]
    AlreadyDispensed,

    #[error("{name} 库存不足")]
    InsufficientStock { name: String },
}

pub type WorkflowResult<T> = Result<T, WorkflowError>;
