// src/handlers/lesson.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    error::AppError,
    models::{lesson::SaveLessonRequest, quiz::QuizPayload},
    store::{composer, reader},
};

/// Creates or updates a lesson.
///
/// Returns the lesson id: the new id on insert, the addressed id unchanged
/// on update.
pub async fn save_lesson(
    State(pool): State<SqlitePool>,
    Json(payload): Json<SaveLessonRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    // Creations answer 201, updates 200, matching the composite save.
    let status = if payload.lesson_id.is_some() {
        StatusCode::OK
    } else {
        StatusCode::CREATED
    };

    let lesson_id = composer::save_lesson(&pool, &payload).await?;

    Ok((
        status,
        Json(serde_json::json!({
            "success": true,
            "lesson_id": lesson_id,
        })),
    ))
}

/// DTO for the composite save: a lesson and its quiz in one request.
#[derive(Debug, Deserialize, Validate)]
pub struct SaveLessonWithQuizRequest {
    #[validate(nested)]
    pub lesson: SaveLessonRequest,
    #[validate(nested)]
    pub quiz: QuizPayload,
}

/// Saves a lesson together with its quiz in one transaction, so the pair
/// is created (or edited) as a unit rather than as two round trips.
pub async fn save_lesson_with_quiz(
    State(pool): State<SqlitePool>,
    Json(payload): Json<SaveLessonWithQuizRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let (lesson_id, quiz_id) =
        composer::save_lesson_with_quiz(&pool, &payload.lesson, &payload.quiz).await?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "success": true,
            "lesson_id": lesson_id,
            "quiz_id": quiz_id,
        })),
    ))
}

/// Retrieves a single lesson with its quiz and options.
pub async fn get_lesson(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let lesson = reader::get_lesson(&pool, id).await?;

    Ok(Json(serde_json::json!({
        "success": true,
        "lesson": lesson,
    })))
}
