//! Standalone database initializer.
//!
//! Creates the schema and seeds demo data, mirroring what a server process
//! does on first startup.

use anyhow::{Context, Result};

use his_core::bootstrap::seed_if_empty;
use his_core::db::Database;

fn main() -> Result<()> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "his.db".to_string());

    let db = Database::open(&path).with_context(|| format!("failed to open database at {}", path))?;
    let summary = seed_if_empty(&db).context("failed to seed demo data")?;

    println!(
        "{}: seeded {} medications, {} doctors",
        path, summary.medications, summary.doctors
    );
    Ok(())
}
