// src/models/attempt.rs

use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use validator::Validate;

/// Represents the 'quiz_attempts' table in the database.
/// Immutable once created; at most one row per (student, quiz) pair,
/// enforced by a uniqueness constraint in the schema.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct QuizAttempt {
    pub id: i64,
    pub student_id: i64,
    pub quiz_id: i64,

    /// The option the student picked. Kept as a plain id so the attempt
    /// survives later option replacement on quiz edit.
    pub selected_option_id: i64,

    pub is_correct: bool,

    /// Seconds the student spent before submitting.
    pub time_spent: i64,

    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// DTO for submitting a graded attempt.
#[derive(Debug, Deserialize, Validate)]
pub struct RecordAttemptRequest {
    pub student_id: i64,
    pub quiz_id: i64,
    pub selected_option_id: i64,
    pub is_correct: bool,
    #[validate(range(min = 0))]
    pub time_spent: i64,
}
