//! Smart-HIS Core Library
//!
//! Hospital front-desk workflow: patient registration, medication
//! inventory, and prescription issuing/dispensing backed by SQLite.
//!
//! # Architecture
//!
//! ```text
//! Registration ──► patients ◄──────────────┐
//!                                          │ status side effect
//! Doctor Workstation ──► prescriptions ────┤
//!                          │ line items    │
//!                          ▼               │
//! Pharmacy ──────────► dispense ───► medications (stock deduction)
//! ```
//!
//! # Modules
//!
//! - [`db`]: SQLite database layer
//! - [`models`]: Domain types (Patient, Medication, Prescription, Doctor)
//! - [`workflow`]: Prescription issuing and dispensing logic
//! - [`bootstrap`]: Idempotent demo-data seeding
//!
//! The [`HisCore`] object is the API surface: one thin method per
//! front-desk operation, each a synchronous read or write against the
//! store. Dispensing deducts stock item by item with no cross-record
//! transaction, so a mid-loop failure leaves earlier deductions applied.

pub mod bootstrap;
pub mod db;
pub mod models;
pub mod workflow;

// Re-export commonly used types
pub use bootstrap::SeedSummary;
pub use db::Database;
pub use models::{
    Doctor, Medication, Patient, PatientStatus, PatientUpdate, Prescription, PrescriptionItem,
    PrescriptionStatus,
};
pub use workflow::{Dispensary, Prescriber, WorkflowError};

use std::path::Path;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

// =========================================================================
// Error Type
// =========================================================================

#[derive(Debug, thiserror::Error)]
pub enum HisError {
    #[error("Database error: {0}")]
    Database(#[from] db::DbError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Lock poisoned: {0}")]
    LockPoisoned(String),
}

impl From<WorkflowError> for HisError {
    fn from(e: WorkflowError) -> Self {
        match e {
            WorkflowError::Database(e) => HisError::Database(e),
            WorkflowError::PrescriptionNotFound(id) => {
                HisError::NotFound(format!("prescription {}", id))
            }
            WorkflowError::MedicationNotFound(id) => {
                HisError::NotFound(format!("medication {}", id))
            }
            conflict @ (WorkflowError::AlreadyDispensed
            | WorkflowError::InsufficientStock { .. }) => HisError::Conflict(conflict.to_string()),
        }
    }
}

impl<T> From<std::sync::PoisonError<T>> for HisError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        HisError::LockPoisoned(e.to_string())
    }
}

pub type HisResult<T> = Result<T, HisError>;

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe service object over the database.
///
/// Every operation takes the connection lock for its full duration, so
/// calls within one process are serialized.
pub struct HisCore {
    db: Arc<Mutex<Database>>,
}

impl HisCore {
    /// Open or create a database at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> HisResult<Self> {
        let db = Database::open(path)?;
        Ok(Self {
            db: Arc::new(Mutex::new(db)),
        })
    }

    /// Create an in-memory instance (for testing).
    pub fn open_in_memory() -> HisResult<Self> {
        let db = Database::open_in_memory()?;
        Ok(Self {
            db: Arc::new(Mutex::new(db)),
        })
    }

    /// Seed demo data into empty tables; run once at startup.
    pub fn seed_demo_data(&self) -> HisResult<SeedSummary> {
        let db = self.db.lock()?;
        Ok(bootstrap::seed_if_empty(&db)?)
    }

    // =========================================================================
    // Patient Directory
    // =========================================================================

    /// List all patients in registration order.
    pub fn list_patients(&self) -> HisResult<Vec<PatientRecord>> {
        let db = self.db.lock()?;
        let patients = db.list_patients()?;
        Ok(patients.into_iter().map(Into::into).collect())
    }

    /// Register a patient. Re-registering an existing id replaces the
    /// record. Returns the (possibly generated) patient id.
    pub fn create_patient(&self, new: NewPatient) -> HisResult<String> {
        let db = self.db.lock()?;
        let patient = new.into_patient();
        db.upsert_patient(&patient)?;
        Ok(patient.id)
    }

    /// Apply a partial update at the doctor workstation. Only the fields
    /// present in the payload change; anything unrecognized was already
    /// dropped at deserialization.
    pub fn update_patient(&self, id: &str, update: &PatientUpdate) -> HisResult<()> {
        let db = self.db.lock()?;
        let mut patient = db
            .get_patient(id)?
            .ok_or_else(|| HisError::NotFound(format!("patient {}", id)))?;
        update.apply_to(&mut patient);
        db.upsert_patient(&patient)?;
        Ok(())
    }

    // =========================================================================
    // Medication Inventory
    // =========================================================================

    /// List all medication records.
    pub fn list_medications(&self) -> HisResult<Vec<Medication>> {
        let db = self.db.lock()?;
        Ok(db.list_medications()?)
    }

    /// Adjust a medication's stock by a signed delta, clamping at zero.
    /// Returns the updated record.
    pub fn adjust_stock(&self, id: &str, change: i64) -> HisResult<Medication> {
        let db = self.db.lock()?;
        let mut med = db
            .get_medication(id)?
            .ok_or_else(|| HisError::NotFound(format!("medication {}", id)))?;
        med.adjust_stock(change);
        db.set_medication_stock(&med.id, med.stock)?;
        Ok(med)
    }

    // =========================================================================
    // Prescription Workflow
    // =========================================================================

    /// List all prescriptions with embedded line items.
    pub fn list_prescriptions(&self) -> HisResult<Vec<PrescriptionRecord>> {
        let db = self.db.lock()?;
        let prescriptions = db.list_prescriptions()?;
        Ok(prescriptions.into_iter().map(Into::into).collect())
    }

    /// Issue a prescription and mark the patient's consultation finished.
    /// Returns the (possibly generated) prescription id.
    pub fn create_prescription(&self, new: NewPrescription) -> HisResult<String> {
        let mut db = self.db.lock()?;
        let rx = new.into_prescription();
        Prescriber::new(&mut db).issue(&rx)?;
        Ok(rx.id)
    }

    /// Dispense a prescription, deducting stock per line item.
    pub fn dispense(&self, prescription_id: &str) -> HisResult<()> {
        let db = self.db.lock()?;
        Dispensary::new(&db).dispense(prescription_id)?;
        Ok(())
    }

    // =========================================================================
    // Doctor Directory
    // =========================================================================

    /// List all doctors on staff.
    pub fn list_doctors(&self) -> HisResult<Vec<Doctor>> {
        let db = self.db.lock()?;
        Ok(db.list_doctors()?)
    }
}

// =========================================================================
// API Types
// =========================================================================

/// Registration payload. The id is generated when omitted; status and
/// registration time default.
#[derive(Debug, Clone, Deserialize)]
pub struct NewPatient {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    pub age: i64,
    pub gender: String,
    pub phone: String,
    #[serde(default)]
    pub status: Option<PatientStatus>,
    #[serde(default)]
    pub symptoms: Option<String>,
    #[serde(default)]
    pub diagnosis: Option<String>,
}

impl NewPatient {
    fn into_patient(self) -> Patient {
        let mut patient = Patient::new(
            self.id
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
            self.name,
            self.age,
            self.gender,
            self.phone,
        );
        if let Some(status) = self.status {
            patient.status = status;
        }
        patient.symptoms = self.symptoms;
        patient.diagnosis = self.diagnosis;
        patient
    }
}

/// Patient list entry with the display-formatted registration time.
#[derive(Debug, Clone, Serialize)]
pub struct PatientRecord {
    pub id: String,
    pub name: String,
    pub age: i64,
    pub gender: String,
    pub phone: String,
    pub status: PatientStatus,
    pub symptoms: Option<String>,
    pub diagnosis: Option<String>,
    #[serde(rename = "registerTime")]
    pub register_time: String,
}

impl From<Patient> for PatientRecord {
    fn from(p: Patient) -> Self {
        Self {
            id: p.id,
            name: p.name,
            age: p.age,
            gender: p.gender,
            phone: p.phone,
            status: p.status,
            symptoms: p.symptoms,
            diagnosis: p.diagnosis,
            register_time: format_display_time(&p.register_time),
        }
    }
}

/// Prescription payload from the doctor workstation.
#[derive(Debug, Clone, Deserialize)]
pub struct NewPrescription {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "patientId")]
    pub patient_id: String,
    #[serde(rename = "doctorId")]
    pub doctor_id: String,
    #[serde(default)]
    pub status: Option<PrescriptionStatus>,
    #[serde(rename = "medications")]
    pub items: Vec<PrescriptionItem>,
}

impl NewPrescription {
    fn into_prescription(self) -> Prescription {
        let mut rx = Prescription::new(
            self.id
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
            self.patient_id,
            self.doctor_id,
            self.items,
        );
        if let Some(status) = self.status {
            rx.status = status;
        }
        rx
    }
}

/// Prescription list entry with the display-formatted issue time.
#[derive(Debug, Clone, Serialize)]
pub struct PrescriptionRecord {
    pub id: String,
    #[serde(rename = "patientId")]
    pub patient_id: String,
    #[serde(rename = "doctorId")]
    pub doctor_id: String,
    pub status: PrescriptionStatus,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    #[serde(rename = "medications")]
    pub items: Vec<PrescriptionItem>,
}

impl From<Prescription> for PrescriptionRecord {
    fn from(rx: Prescription) -> Self {
        Self {
            id: rx.id,
            patient_id: rx.patient_id,
            doctor_id: rx.doctor_id,
            status: rx.status,
            created_at: format_display_time(&rx.created_at),
            items: rx.items,
        }
    }
}

/// Format a stored timestamp as "YYYY-MM-DD HH:MM" for list responses.
/// Falls back to the raw string for anything unparseable.
fn format_display_time(raw: &str) -> String {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(raw) {
        return dt.format("%Y-%m-%d %H:%M").to_string();
    }
    if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return dt.format("%Y-%m-%d %H:%M").to_string();
    }
    raw.to_string()
}
