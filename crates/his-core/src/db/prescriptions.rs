//! Prescription database operations.
//!
//! A prescription and its line items form one composite record: the items
//! are written and removed together with the parent row, inside a single
//! transaction, and have no lifecycle of their own.

use rusqlite::{params, OptionalExtension};

use super::{Database, DbError, DbResult};
use crate::models::{Prescription, PrescriptionItem, PrescriptionStatus};

impl Database {
    /// Insert or fully replace a prescription together with its line items.
    ///
    /// The whole write is one transaction; on upsert the previous item set
    /// is deleted before the new one is inserted (orphan removal).
    pub fn upsert_prescription(&mut self, rx: &Prescription) -> DbResult<()> {
        let tx = self.conn.transaction()?;

        tx.execute(
            r#"
            INSERT INTO prescriptions (id, patient_id, doctor_id, status, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT(id) DO UPDATE SET
                patient_id = excluded.patient_id,
                doctor_id = excluded.doctor_id,
                status = excluded.status,
                created_at = excluded.created_at
            "#,
            params![
                rx.id,
                rx.patient_id,
                rx.doctor_id,
                prescription_status_to_string(&rx.status),
                rx.created_at,
            ],
        )?;

        tx.execute(
            "DELETE FROM prescription_items WHERE prescription_id = ?",
            [&rx.id],
        )?;
        for item in &rx.items {
            tx.execute(
                r#"
                INSERT INTO prescription_items (prescription_id, medication_id, name, dosage, quantity)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
                params![rx.id, item.medication_id, item.name, item.dosage, item.quantity],
            )?;
        }

        tx.commit()?;
        Ok(())
    }

    /// Get a prescription with its line items in stored order.
    pub fn get_prescription(&self, id: &str) -> DbResult<Option<Prescription>> {
        let header = self
            .conn
            .query_row(
                r#"
                SELECT id, patient_id, doctor_id, status, created_at
                FROM prescriptions
                WHERE id = ?
                "#,
                [id],
                |row| {
                    Ok(PrescriptionRow {
                        id: row.get(0)?,
                        patient_id: row.get(1)?,
                        doctor_id: row.get(2)?,
                        status: row.get(3)?,
                        created_at: row.get(4)?,
                    })
                },
            )
            .optional()?;

        let Some(header) = header else {
            return Ok(None);
        };

        let items = self.load_items(&header.id)?;
        Ok(Some(header.into_prescription(items)?))
    }

    /// List all prescriptions with embedded line items, in storage order.
    pub fn list_prescriptions(&self) -> DbResult<Vec<Prescription>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, patient_id, doctor_id, status, created_at
            FROM prescriptions
            "#,
        )?;

        let headers = stmt
            .query_map([], |row| {
                Ok(PrescriptionRow {
                    id: row.get(0)?,
                    patient_id: row.get(1)?,
                    doctor_id: row.get(2)?,
                    status: row.get(3)?,
                    created_at: row.get(4)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let mut prescriptions = Vec::new();
        for header in headers {
            let items = self.load_items(&header.id)?;
            prescriptions.push(header.into_prescription(items)?);
        }
        Ok(prescriptions)
    }

    /// Set a prescription's status. Returns false if the id is unknown.
    pub fn set_prescription_status(
        &self,
        id: &str,
        status: PrescriptionStatus,
    ) -> DbResult<bool> {
        let rows_affected = self.conn.execute(
            "UPDATE prescriptions SET status = ? WHERE id = ?",
            params![prescription_status_to_string(&status), id],
        )?;
        Ok(rows_affected > 0)
    }

    /// Delete a prescription; line items go with it.
    pub fn delete_prescription(&self, id: &str) -> DbResult<bool> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM prescriptions WHERE id = ?", [id])?;
        Ok(rows_affected > 0)
    }

    fn load_items(&self, prescription_id: &str) -> DbResult<Vec<PrescriptionItem>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT medication_id, name, dosage, quantity
            FROM prescription_items
            WHERE prescription_id = ?
            ORDER BY id
            "#,
        )?;

        let rows = stmt.query_map([prescription_id], |row| {
            Ok(PrescriptionItem {
                medication_id: row.get(0)?,
                name: row.get(1)?,
                dosage: row.get(2)?,
                quantity: row.get(3)?,
            })
        })?;

        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}

/// Intermediate row struct for database mapping.
struct PrescriptionRow {
    id: String,
    patient_id: String,
    doctor_id: String,
    status: String,
    created_at: String,
}

impl PrescriptionRow {
    fn into_prescription(self, items: Vec<PrescriptionItem>) -> DbResult<Prescription> {
        Ok(Prescription {
            id: self.id,
            patient_id: self.patient_id,
            doctor_id: self.doctor_id,
            status: string_to_prescription_status(&self.status)?,
            created_at: self.created_at,
            items,
        })
    }
}

pub(crate) fn prescription_status_to_string(status: &PrescriptionStatus) -> &'static str {
    match status {
        PrescriptionStatus::Issued => "已开立",
        PrescriptionStatus::Paid => "已缴费",
        PrescriptionStatus::Dispensed => "已发药",
    }
}

pub(crate) fn string_to_prescription_status(s: &str) -> Result<PrescriptionStatus, DbError> {
    match s {
        "已开立" => Ok(PrescriptionStatus::Issued),
        "已缴费" => Ok(PrescriptionStatus::Paid),
        "已发药" => Ok(PrescriptionStatus::Dispensed),
        _ => Err(DbError::Constraint(format!(
            "Unknown prescription status: {}",
            s
        ))),
    }
}
