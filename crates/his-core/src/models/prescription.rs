//! Prescription models.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a prescription.
///
/// Serialized with the wire strings the pharmacy UI expects.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PrescriptionStatus {
    /// Issued by a doctor, awaiting dispensing
    #[serde(rename = "已开立")]
    Issued,
    /// Paid at the cashier
    #[serde(rename = "已缴费")]
    Paid,
    /// Fulfilled by the pharmacy
    #[serde(rename = "已发药")]
    Dispensed,
}

impl Default for PrescriptionStatus {
    fn default() -> Self {
        PrescriptionStatus::Issued
    }
}

/// One medication line within a prescription.
///
/// Line items are owned exclusively by their prescription: they are
/// persisted and deleted together with it and carry no externally visible
/// identity. The `name` is a snapshot taken at issue time and is not kept
/// in sync with the medication record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PrescriptionItem {
    /// Referenced medication ID; only checked at dispense time
    #[serde(rename = "medicationId")]
    pub medication_id: String,
    /// Medication name snapshot
    pub name: String,
    /// Dosage instructions (free text)
    pub dosage: String,
    /// Units to dispense
    pub quantity: i64,
}

/// A prescription issued at the doctor workstation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Prescription {
    /// Prescription ID, primary key
    pub id: String,
    /// Patient reference; existence is not enforced
    #[serde(rename = "patientId")]
    pub patient_id: String,
    /// Issuing doctor reference; existence is not enforced
    #[serde(rename = "doctorId")]
    pub doctor_id: String,
    /// Lifecycle status
    pub status: PrescriptionStatus,
    /// Issue timestamp (RFC 3339), never updated
    #[serde(rename = "createdAt")]
    pub created_at: String,
    /// Ordered line items
    #[serde(rename = "medications")]
    pub items: Vec<PrescriptionItem>,
}

impl Prescription {
    /// Create a new prescription. The status defaults to
    /// [`PrescriptionStatus::Issued`] and the timestamp to now.
    pub fn new(id: String, patient_id: String, doctor_id: String, items: Vec<PrescriptionItem>) -> Self {
        Self {
            id,
            patient_id,
            doctor_id,
            status: PrescriptionStatus::default(),
            created_at: chrono::Utc::now().to_rfc3339(),
            items,
        }
    }

    /// Whether this prescription has already been fulfilled.
    pub fn is_dispensed(&self) -> bool {
        self.status == PrescriptionStatus::Dispensed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_prescription_defaults() {
        let rx = Prescription::new(
            "RX001".into(),
            "P001".into(),
            "DOC001".into(),
            vec![PrescriptionItem {
                medication_id: "M001".into(),
                name: "阿莫西林胶囊".into(),
                dosage: "每日三次".into(),
                quantity: 2,
            }],
        );
        assert_eq!(rx.status, PrescriptionStatus::Issued);
        assert!(!rx.is_dispensed());
        assert_eq!(rx.items.len(), 1);
    }

    #[test]
    fn test_status_wire_strings() {
        let json = serde_json::to_string(&PrescriptionStatus::Dispensed).unwrap();
        assert_eq!(json, "\"已发药\"");
        let status: PrescriptionStatus = serde_json::from_str("\"已开立\"").unwrap();
        assert_eq!(status, PrescriptionStatus::Issued);
    }

    #[test]
    fn test_item_json_field_names() {
        let item = PrescriptionItem {
            medication_id: "M001".into(),
            name: "阿莫西林胶囊".into(),
            dosage: "每日三次".into(),
            quantity: 2,
        };
        let json = serde_json::to_value(&item).unwrap();
        assert!(json.get("medicationId").is_some());
        assert!(json.get("medication_id").is_none());
    }
}
