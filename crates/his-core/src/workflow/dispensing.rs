//! Prescription dispensing at the pharmacy window.

use super::{WorkflowError, WorkflowResult};
use crate::db::Database;
use crate::models::PrescriptionStatus;

/// Fulfills prescriptions by deducting stock per line item.
pub struct Dispensary<'a> {
    db: &'a Database,
}

impl<'a> Dispensary<'a> {
    /// Create a new dispensary.
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Dispense a prescription.
    ///
    /// Line items are processed in stored order with a check-then-deduct
    /// per item; every decrement is persisted on its own. A missing
    /// medication or insufficient stock stops the loop immediately, and
    /// deductions already applied to earlier items are NOT rolled back.
    /// Dispensing twice is rejected, not silently absorbed.
    pub fn dispense(&self, prescription_id: &str) -> WorkflowResult<()> {
        let rx = self
            .db
            .get_prescription(prescription_id)?
            .ok_or_else(|| WorkflowError::PrescriptionNotFound(prescription_id.to_string()))?;

        if rx.is_dispensed() {
            return Err(WorkflowError::AlreadyDispensed);
        }

        for item in &rx.items {
            let med = self
                .db
                .get_medication(&item.medication_id)?
                .ok_or_else(|| WorkflowError::MedicationNotFound(item.medication_id.clone()))?;

            if !med.has_stock_for(item.quantity) {
                return Err(WorkflowError::InsufficientStock { name: med.name });
            }

            self.db
                .set_medication_stock(&med.id, med.stock - item.quantity)?;
        }

        self.db
            .set_prescription_status(prescription_id, PrescriptionStatus::Dispensed)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Medication, Prescription, PrescriptionItem};

    fn setup_db() -> Database {
        let db = Database::open_in_memory().unwrap();
        db.upsert_medication(&med("M001", "阿莫西林胶囊", 500)).unwrap();
        db.upsert_medication(&med("M002", "布洛芬缓释胶囊", 45)).unwrap();
        db
    }

    fn med(id: &str, name: &str, stock: i64) -> Medication {
        Medication {
            id: id.into(),
            name: name.into(),
            spec: "0.25g*24粒".into(),
            stock,
            unit: "盒".into(),
            price: 12.5,
            category: "抗生素".into(),
        }
    }

    fn item(medication_id: &str, name: &str, quantity: i64) -> PrescriptionItem {
        PrescriptionItem {
            medication_id: medication_id.into(),
            name: name.into(),
            dosage: "每日三次".into(),
            quantity,
        }
    }

    fn insert_rx(db: &mut Database, id: &str, items: Vec<PrescriptionItem>) {
        let rx = Prescription::new(id.into(), "P001".into(), "DOC001".into(), items);
        db.upsert_prescription(&rx).unwrap();
    }

    #[test]
    fn test_dispense_deducts_and_marks_status() {
        let mut db = setup_db();
        insert_rx(
            &mut db,
            "RX001",
            vec![
                item("M001", "阿莫西林胶囊", 3),
                item("M002", "布洛芬缓释胶囊", 5),
            ],
        );

        Dispensary::new(&db).dispense("RX001").unwrap();

        assert_eq!(db.get_medication("M001").unwrap().unwrap().stock, 497);
        assert_eq!(db.get_medication("M002").unwrap().unwrap().stock, 40);
        assert!(db.get_prescription("RX001").unwrap().unwrap().is_dispensed());
    }

    #[test]
    fn test_dispense_unknown_prescription() {
        let db = setup_db();
        let result = Dispensary::new(&db).dispense("RX404");
        assert!(matches!(
            result,
            Err(WorkflowError::PrescriptionNotFound(_))
        ));
    }

    #[test]
    fn test_double_dispense_rejected_without_stock_change() {
        let mut db = setup_db();
        insert_rx(&mut db, "RX001", vec![item("M001", "阿莫西林胶囊", 3)]);

        let dispensary = Dispensary::new(&db);
        dispensary.dispense("RX001").unwrap();
        let result = dispensary.dispense("RX001");

        assert!(matches!(result, Err(WorkflowError::AlreadyDispensed)));
        assert_eq!(db.get_medication("M001").unwrap().unwrap().stock, 497);
    }

    #[test]
    fn test_insufficient_stock_leaves_state_untouched() {
        let mut db = setup_db();
        insert_rx(&mut db, "RX001", vec![item("M002", "布洛芬缓释胶囊", 100)]);

        let result = Dispensary::new(&db).dispense("RX001");

        match result {
            Err(WorkflowError::InsufficientStock { name }) => {
                assert_eq!(name, "布洛芬缓释胶囊");
            }
            other => panic!("expected InsufficientStock, got {:?}", other),
        }
        assert_eq!(db.get_medication("M002").unwrap().unwrap().stock, 45);
        assert!(!db.get_prescription("RX001").unwrap().unwrap().is_dispensed());
    }

    #[test]
    fn test_partial_failure_keeps_earlier_deductions() {
        let mut db = setup_db();
        insert_rx(
            &mut db,
            "RX001",
            vec![
                item("M001", "阿莫西林胶囊", 10),
                item("M002", "布洛芬缓释胶囊", 100),
            ],
        );

        let result = Dispensary::new(&db).dispense("RX001");
        assert!(matches!(
            result,
            Err(WorkflowError::InsufficientStock { .. })
        ));

        // First item was already deducted and is not rolled back
        assert_eq!(db.get_medication("M001").unwrap().unwrap().stock, 490);
        assert_eq!(db.get_medication("M002").unwrap().unwrap().stock, 45);
        assert!(!db.get_prescription("RX001").unwrap().unwrap().is_dispensed());
    }

    #[test]
    fn test_dangling_medication_reference() {
        let mut db = setup_db();
        insert_rx(&mut db, "RX001", vec![item("M404", "幽灵药", 1)]);

        let result = Dispensary::new(&db).dispense("RX001");
        assert!(matches!(result, Err(WorkflowError::MedicationNotFound(_))));
        assert!(!db.get_prescription("RX001").unwrap().unwrap().is_dispensed());
    }

    #[test]
    fn test_exact_stock_dispenses_to_zero() {
        let mut db = setup_db();
        insert_rx(&mut db, "RX001", vec![item("M002", "布洛芬缓释胶囊", 45)]);

        Dispensary::new(&db).dispense("RX001").unwrap();
        assert_eq!(db.get_medication("M002").unwrap().unwrap().stock, 0);
    }
}
