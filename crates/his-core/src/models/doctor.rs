//! Doctor directory models.

use serde::{Deserialize, Serialize};

/// A doctor on staff. Referenced from prescriptions by id, but the
/// reference is informational only and never validated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Doctor {
    /// Staff ID (e.g. "DOC001"), primary key
    pub id: String,
    /// Doctor name
    pub name: String,
    /// Department (e.g. "内科")
    pub department: String,
    /// Professional title (e.g. "主任医师")
    pub title: String,
}
