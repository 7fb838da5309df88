//! Patient database operations.

use rusqlite::{params, OptionalExtension};

use super::{Database, DbError, DbResult};
use crate::models::{Patient, PatientStatus};

impl Database {
    /// Insert or fully replace a patient record, keyed by id.
    ///
    /// Registration re-submitting the same id overwrites the record; this
    /// is the upsert semantics the front desk relies on.
    pub fn upsert_patient(&self, patient: &Patient) -> DbResult<()> {
        self.conn.execute(
            r#"
            INSERT INTO patients (
                id, name, age, gender, phone, status, symptoms, diagnosis, register_time
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                age = excluded.age,
                gender = excluded.gender,
                phone = excluded.phone,
                status = excluded.status,
                symptoms = excluded.symptoms,
                diagnosis = excluded.diagnosis,
                register_time = excluded.register_time
            "#,
            params![
                patient.id,
                patient.name,
                patient.age,
                patient.gender,
                patient.phone,
                patient_status_to_string(&patient.status),
                patient.symptoms,
                patient.diagnosis,
                patient.register_time,
            ],
        )?;
        Ok(())
    }

    /// Get a patient by id.
    pub fn get_patient(&self, id: &str) -> DbResult<Option<Patient>> {
        self.conn
            .query_row(
                r#"
                SELECT id, name, age, gender, phone, status, symptoms, diagnosis, register_time
                FROM patients
                WHERE id = ?
                "#,
                [id],
                |row| {
                    Ok(PatientRow {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        age: row.get(2)?,
                        gender: row.get(3)?,
                        phone: row.get(4)?,
                        status: row.get(5)?,
                        symptoms: row.get(6)?,
                        diagnosis: row.get(7)?,
                        register_time: row.get(8)?,
                    })
                },
            )
            .optional()?
            .map(|row| row.try_into())
            .transpose()
    }

    /// List all patients in storage (insertion) order.
    pub fn list_patients(&self) -> DbResult<Vec<Patient>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, name, age, gender, phone, status, symptoms, diagnosis, register_time
            FROM patients
            "#,
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(PatientRow {
                id: row.get(0)?,
                name: row.get(1)?,
                age: row.get(2)?,
                gender: row.get(3)?,
                phone: row.get(4)?,
                status: row.get(5)?,
                symptoms: row.get(6)?,
                diagnosis: row.get(7)?,
                register_time: row.get(8)?,
            })
        })?;

        let mut patients = Vec::new();
        for row in rows {
            patients.push(row?.try_into()?);
        }
        Ok(patients)
    }

    /// Set a patient's front-desk status. Returns false if the id is unknown.
    pub fn set_patient_status(&self, id: &str, status: PatientStatus) -> DbResult<bool> {
        let rows_affected = self.conn.execute(
            "UPDATE patients SET status = ? WHERE id = ?",
            params![patient_status_to_string(&status), id],
        )?;
        Ok(rows_affected > 0)
    }
}

/// Intermediate row struct for database mapping.
struct PatientRow {
    id: String,
    name: String,
    age: i64,
    gender: String,
    phone: String,
    status: String,
    symptoms: Option<String>,
    diagnosis: Option<String>,
    register_time: String,
}

impl TryFrom<PatientRow> for Patient {
    type Error = DbError;

    fn try_from(row: PatientRow) -> Result<Self, Self::Error> {
        Ok(Patient {
            id: row.id,
            name: row.name,
            age: row.age,
            gender: row.gender,
            phone: row.phone,
            status: string_to_patient_status(&row.status)?,
            symptoms: row.symptoms,
            diagnosis: row.diagnosis,
            register_time: row.register_time,
        })
    }
}

pub(crate) fn patient_status_to_string(status: &PatientStatus) -> &'static str {
    match status {
        PatientStatus::Waiting => "待诊",
        PatientStatus::InConsultation => "就诊中",
        PatientStatus::Completed => "已完成",
        PatientStatus::AwaitingPayment => "待缴费",
    }
}

pub(crate) fn string_to_patient_status(s: &str) -> Result<PatientStatus, DbError> {
    match s {
        "待诊" => Ok(PatientStatus::Waiting),
        "就诊中" => Ok(PatientStatus::InConsultation),
        "已完成" => Ok(PatientStatus::Completed),
        "待缴费" => Ok(PatientStatus::AwaitingPayment),
        _ => Err(DbError::Constraint(format!("Unknown patient status: {}", s))),
    }
}
