//! Medication inventory database operations.

use rusqlite::{params, OptionalExtension};

use super::{Database, DbResult};
use crate::models::Medication;

impl Database {
    /// Insert or update a medication record.
    pub fn upsert_medication(&self, med: &Medication) -> DbResult<()> {
        self.conn.execute(
            r#"
            INSERT INTO medications (id, name, spec, stock, unit, price, category)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                spec = excluded.spec,
                stock = excluded.stock,
                unit = excluded.unit,
                price = excluded.price,
                category = excluded.category
            "#,
            params![
                med.id,
                med.name,
                med.spec,
                med.stock,
                med.unit,
                med.price,
                med.category,
            ],
        )?;
        Ok(())
    }

    /// Get a medication by id.
    pub fn get_medication(&self, id: &str) -> DbResult<Option<Medication>> {
        self.conn
            .query_row(
                r#"
                SELECT id, name, spec, stock, unit, price, category
                FROM medications
                WHERE id = ?
                "#,
                [id],
                |row| {
                    Ok(Medication {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        spec: row.get(2)?,
                        stock: row.get(3)?,
                        unit: row.get(4)?,
                        price: row.get(5)?,
                        category: row.get(6)?,
                    })
                },
            )
            .optional()
            .map_err(Into::into)
    }

    /// List all medications in storage order.
    pub fn list_medications(&self) -> DbResult<Vec<Medication>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, name, spec, stock, unit, price, category
            FROM medications
            "#,
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(Medication {
                id: row.get(0)?,
                name: row.get(1)?,
                spec: row.get(2)?,
                stock: row.get(3)?,
                unit: row.get(4)?,
                price: row.get(5)?,
                category: row.get(6)?,
            })
        })?;

        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Persist a medication's stock level. Returns false if the id is unknown.
    pub fn set_medication_stock(&self, id: &str, stock: i64) -> DbResult<bool> {
        let rows_affected = self.conn.execute(
            "UPDATE medications SET stock = ? WHERE id = ?",
            params![stock, id],
        )?;
        Ok(rows_affected > 0)
    }

    /// Count medication records (used by the seed guard).
    pub fn count_medications(&self) -> DbResult<i64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM medications", [], |row| row.get(0))?;
        Ok(count)
    }
}
