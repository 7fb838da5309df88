//! Prescription issuing at the doctor workstation.

use super::WorkflowResult;
use crate::db::Database;
use crate::models::{PatientStatus, Prescription};

/// Issues prescriptions and marks the consultation finished.
pub struct Prescriber<'a> {
    db: &'a mut Database,
}

impl<'a> Prescriber<'a> {
    /// Create a new prescriber.
    pub fn new(db: &'a mut Database) -> Self {
        Self { db }
    }

    /// Persist a prescription with its line items as one composite write,
    /// then mark the patient's consultation as completed.
    ///
    /// Neither the patient id, the doctor id, nor the items' medication ids
    /// are checked for existence here; medications are only validated when
    /// the pharmacy dispenses. A prescription for an unknown patient is
    /// accepted and simply skips the status side effect.
    pub fn issue(&mut self, rx: &Prescription) -> WorkflowResult<()> {
        self.db.upsert_prescription(rx)?;

        // Unconditional when the patient exists, silently skipped otherwise.
        self.db
            .set_patient_status(&rx.patient_id, PatientStatus::Completed)?;

        Ok(())
    }
}
