//! Idempotent demo-data bootstrap.
//!
//! Seeds the medication dictionary and the doctor directory when the
//! corresponding table is empty, mirroring first-run initialization. Safe
//! to call on every startup.

use crate::db::{Database, DbResult};
use crate::models::{Doctor, Medication};

/// What a bootstrap run actually inserted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub medications: usize,
    pub doctors: usize,
}

/// Seed demo data into empty tables. Non-empty tables are left untouched.
pub fn seed_if_empty(db: &Database) -> DbResult<SeedSummary> {
    let mut summary = SeedSummary {
        medications: 0,
        doctors: 0,
    };

    if db.count_medications()? == 0 {
        for med in seed_medications() {
            db.upsert_medication(&med)?;
            summary.medications += 1;
        }
    }

    if db.count_doctors()? == 0 {
        for doctor in seed_doctors() {
            db.upsert_doctor(&doctor)?;
            summary.doctors += 1;
        }
    }

    Ok(summary)
}

fn seed_medications() -> Vec<Medication> {
    vec![
        Medication {
            id: "M001".into(),
            name: "阿莫西林胶囊".into(),
            spec: "0.25g*24粒".into(),
            stock: 500,
            unit: "盒".into(),
            price: 12.5,
            category: "抗生素".into(),
        },
        Medication {
            id: "M002".into(),
            name: "布洛芬缓释胶囊".into(),
            spec: "0.3g*10粒".into(),
            stock: 45,
            unit: "盒".into(),
            price: 25.0,
            category: "止痛药".into(),
        },
        Medication {
            id: "M003".into(),
            name: "连花清瘟胶囊".into(),
            spec: "0.35g*24粒".into(),
            stock: 150,
            unit: "盒".into(),
            price: 18.8,
            category: "感冒药".into(),
        },
    ]
}

fn seed_doctors() -> Vec<Doctor> {
    vec![Doctor {
        id: "DOC001".into(),
        name: "王医生".into(),
        department: "内科".into(),
        title: "主任医师".into(),
    }]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_empty_db() {
        let db = Database::open_in_memory().unwrap();

        let summary = seed_if_empty(&db).unwrap();
        assert_eq!(summary.medications, 3);
        assert_eq!(summary.doctors, 1);

        let m2 = db.get_medication("M002").unwrap().unwrap();
        assert_eq!(m2.name, "布洛芬缓释胶囊");
        assert_eq!(m2.stock, 45);
        assert!(db.get_doctor("DOC001").unwrap().is_some());
    }

    #[test]
    fn test_seed_is_idempotent() {
        let db = Database::open_in_memory().unwrap();

        seed_if_empty(&db).unwrap();
        db.set_medication_stock("M001", 7).unwrap();

        let summary = seed_if_empty(&db).unwrap();
        assert_eq!(summary.medications, 0);
        assert_eq!(summary.doctors, 0);

        // A second run must not reset adjusted stock
        assert_eq!(db.get_medication("M001").unwrap().unwrap().stock, 7);
    }

    #[test]
    fn test_seed_skips_populated_table() {
        let db = Database::open_in_memory().unwrap();

        db.upsert_medication(&Medication {
            id: "MX".into(),
            name: "existing".into(),
            spec: "1g".into(),
            stock: 1,
            unit: "盒".into(),
            price: 1.0,
            category: "其他".into(),
        })
        .unwrap();

        let summary = seed_if_empty(&db).unwrap();
        assert_eq!(summary.medications, 0);
        assert!(db.get_medication("M001").unwrap().is_none());
        // Doctors table was still empty, so it does get seeded
        assert_eq!(summary.doctors, 1);
    }
}
