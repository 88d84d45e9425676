// src/models/lesson.rs

use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use validator::Validate;

use crate::models::quiz::QuizView;

/// Represents the 'lessons' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Lesson {
    pub id: i64,

    /// Topic the lesson belongs to. Topics live in the catalog layer and
    /// are referenced by id only.
    pub topic_id: i64,

    pub title: String,

    /// Ordering of the lesson within its topic.
    pub position: i64,

    /// Rich-text markup body. Opaque to the persistence engine.
    pub content: String,

    /// Content kind: 'text', 'video' or 'mixed'.
    pub content_kind: String,

    pub is_active: bool,

    /// Soft-delete marker. Rows with a value here are invisible to reads.
    pub deleted_at: Option<chrono::DateTime<chrono::Utc>>,

    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Denormalized read view: a lesson plus its quiz (if any) with options
/// collapsed into an ordered list.
#[derive(Debug, Serialize)]
pub struct LessonDetail {
    #[serde(flatten)]
    pub lesson: Lesson,
    pub quiz: Option<QuizView>,
}

/// DTO for creating or updating a lesson.
/// `lesson_id` absent means insert; present means update by that id.
#[derive(Debug, Deserialize, Validate)]
pub struct SaveLessonRequest {
    pub lesson_id: Option<i64>,
    pub topic_id: i64,
    #[validate(length(
        min = 1,
        max = 200,
        message = "Title length must be between 1 and 200 characters."
    ))]
    pub title: String,
    #[validate(range(min = 0))]
    pub position: i64,
    /// Rich-text body; may be empty while the lesson is being drafted.
    #[serde(default)]
    pub content: String,
    #[validate(custom(function = validate_content_kind))]
    pub content_kind: String,
    pub is_active: bool,
}

fn validate_content_kind(kind: &str) -> Result<(), validator::ValidationError> {
    match kind {
        "text" | "video" | "mixed" => Ok(()),
        _ => Err(validator::ValidationError::new("unknown_content_kind")),
    }
}
