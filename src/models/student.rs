// src/models/student.rs

use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;

/// Represents the 'students' table in the database.
/// Registration and credentials live in the (external) auth layer; this
/// core only reads the row and mutates the score aggregate.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Student {
    pub id: i64,
    pub name: String,

    /// Authoritative cumulative point total. Monotonically non-decreasing;
    /// mutated only through the score reconciler.
    pub score: i64,

    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}
