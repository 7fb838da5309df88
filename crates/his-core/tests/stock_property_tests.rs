//! Property tests for stock arithmetic.

use his_core::db::Database;
use his_core::models::Medication;
use proptest::prelude::*;

fn med_with_stock(stock: i64) -> Medication {
    Medication {
        id: "M001".into(),
        name: "阿莫西林胶囊".into(),
        spec: "0.25g*24粒".into(),
        stock,
        unit: "盒".into(),
        price: 12.5,
        category: "抗生素".into(),
    }
}

proptest! {
    /// Adjusted stock is always max(0, previous + delta).
    #[test]
    fn adjust_stock_is_clamped_sum(stock in 0i64..1_000_000, delta in -1_000_000i64..1_000_000) {
        let mut med = med_with_stock(stock);
        med.adjust_stock(delta);
        prop_assert_eq!(med.stock, (stock + delta).max(0));
        prop_assert!(med.stock >= 0);
    }

    /// The clamped value survives a round trip through the store.
    #[test]
    fn adjusted_stock_persists(stock in 0i64..10_000, delta in -20_000i64..20_000) {
        let db = Database::open_in_memory().unwrap();
        let mut med = med_with_stock(stock);
        db.upsert_medication(&med).unwrap();

        med.adjust_stock(delta);
        db.set_medication_stock(&med.id, med.stock).unwrap();

        let stored = db.get_medication("M001").unwrap().unwrap();
        prop_assert_eq!(stored.stock, (stock + delta).max(0));
    }

    /// Dispensability check agrees with the comparison it abbreviates.
    #[test]
    fn has_stock_for_matches_comparison(stock in 0i64..10_000, quantity in 0i64..10_000) {
        let med = med_with_stock(stock);
        prop_assert_eq!(med.has_stock_for(quantity), stock >= quantity);
    }
}
