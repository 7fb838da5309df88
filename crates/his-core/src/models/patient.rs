//! Patient models.

use serde::{Deserialize, Serialize};

/// Front-desk status of a patient.
///
/// Serialized with the wire strings the registration UI expects.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PatientStatus {
    /// Registered, waiting to be seen
    #[serde(rename = "待诊")]
    Waiting,
    /// Consultation in progress
    #[serde(rename = "就诊中")]
    InConsultation,
    /// Consultation finished
    #[serde(rename = "已完成")]
    Completed,
    /// Waiting for payment
    #[serde(rename = "待缴费")]
    AwaitingPayment,
}

impl Default for PatientStatus {
    fn default() -> Self {
        PatientStatus::Waiting
    }
}

/// A registered patient record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Patient {
    /// Registration ID (e.g. "P001"), primary key
    pub id: String,
    /// Patient name
    pub name: String,
    /// Age in years
    pub age: i64,
    /// Gender (free text)
    pub gender: String,
    /// Contact phone
    pub phone: String,
    /// Front-desk status
    pub status: PatientStatus,
    /// Chief complaint recorded at the doctor workstation
    pub symptoms: Option<String>,
    /// Diagnosis recorded at the doctor workstation
    pub diagnosis: Option<String>,
    /// Registration timestamp (RFC 3339), never updated
    pub register_time: String,
}

impl Patient {
    /// Create a new patient with required fields. The registration time
    /// defaults to now and the status to [`PatientStatus::Waiting`].
    pub fn new(id: String, name: String, age: i64, gender: String, phone: String) -> Self {
        Self {
            id,
            name,
            age,
            gender,
            phone,
            status: PatientStatus::default(),
            symptoms: None,
            diagnosis: None,
            register_time: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Partial update applied at the doctor workstation.
///
/// Only the three fields the workflow actually edits are recognized;
/// anything else in the payload is ignored during deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PatientUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symptoms: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagnosis: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<PatientStatus>,
}

impl PatientUpdate {
    /// Apply the present fields to a patient, leaving the rest untouched.
    pub fn apply_to(&self, patient: &mut Patient) {
        if let Some(symptoms) = &self.symptoms {
            patient.symptoms = Some(symptoms.clone());
        }
        if let Some(diagnosis) = &self.diagnosis {
            patient.diagnosis = Some(diagnosis.clone());
        }
        if let Some(status) = self.status {
            patient.status = status;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_patient_defaults() {
        let patient = Patient::new(
            "P001".into(),
            "张三".into(),
            35,
            "男".into(),
            "13800138000".into(),
        );
        assert_eq!(patient.status, PatientStatus::Waiting);
        assert!(patient.symptoms.is_none());
        assert!(!patient.register_time.is_empty());
    }

    #[test]
    fn test_status_wire_strings() {
        let json = serde_json::to_string(&PatientStatus::Completed).unwrap();
        assert_eq!(json, "\"已完成\"");
        let status: PatientStatus = serde_json::from_str("\"待诊\"").unwrap();
        assert_eq!(status, PatientStatus::Waiting);
    }

    #[test]
    fn test_partial_update_applies_only_present_fields() {
        let mut patient = Patient::new(
            "P001".into(),
            "张三".into(),
            35,
            "男".into(),
            "13800138000".into(),
        );
        patient.symptoms = Some("咳嗽".into());

        let update = PatientUpdate {
            diagnosis: Some("流感".into()),
            ..Default::default()
        };
        update.apply_to(&mut patient);

        assert_eq!(patient.diagnosis, Some("流感".into()));
        assert_eq!(patient.symptoms, Some("咳嗽".into()));
        assert_eq!(patient.status, PatientStatus::Waiting);
    }

    #[test]
    fn test_update_ignores_unknown_fields() {
        let update: PatientUpdate =
            serde_json::from_str(r#"{"diagnosis": "流感", "name": "new name"}"#).unwrap();
        assert_eq!(update.diagnosis, Some("流感".into()));
        assert!(update.symptoms.is_none());
        assert!(update.status.is_none());
    }
}
