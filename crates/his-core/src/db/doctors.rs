//! Doctor directory database operations.

use rusqlite::{params, OptionalExtension};

use super::{Database, DbResult};
use crate::models::Doctor;

impl Database {
    /// Insert or update a doctor record.
    pub fn upsert_doctor(&self, doctor: &Doctor) -> DbResult<()> {
        self.conn.execute(
            r#"
            INSERT INTO doctors (id, name, department, title)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                department = excluded.department,
                title = excluded.title
            "#,
            params![doctor.id, doctor.name, doctor.department, doctor.title],
        )?;
        Ok(())
    }

    /// Get a doctor by id.
    pub fn get_doctor(&self, id: &str) -> DbResult<Option<Doctor>> {
        self.conn
            .query_row(
                "SELECT id, name, department, title FROM doctors WHERE id = ?",
                [id],
                |row| {
                    Ok(Doctor {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        department: row.get(2)?,
                        title: row.get(3)?,
                    })
                },
            )
            .optional()
            .map_err(Into::into)
    }

    /// List all doctors.
    pub fn list_doctors(&self) -> DbResult<Vec<Doctor>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, department, title FROM doctors")?;

        let rows = stmt.query_map([], |row| {
            Ok(Doctor {
                id: row.get(0)?,
                name: row.get(1)?,
                department: row.get(2)?,
                title: row.get(3)?,
            })
        })?;

        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Count doctor records (used by the seed guard).
    pub fn count_doctors(&self) -> DbResult<i64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM doctors", [], |row| row.get(0))?;
        Ok(count)
    }
}
