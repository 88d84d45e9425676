// src/handlers/quiz.rs

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use sqlx::SqlitePool;
use validator::Validate;

use crate::{error::AppError, models::quiz::SaveQuizRequest, store::composer};

/// Creates or updates a quiz and replaces its option set.
///
/// The caller saves the lesson first and passes the resulting lesson id;
/// the quiz row upsert, the option delete and the option reinsert run as
/// one transaction.
pub async fn save_quiz(
    State(pool): State<SqlitePool>,
    Json(payload): Json<SaveQuizRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    // Creations answer 201, updates 200, matching the composite save.
    let status = if payload.quiz.quiz_id.is_some() {
        StatusCode::OK
    } else {
        StatusCode::CREATED
    };

    let quiz_id = composer::save_quiz(&pool, payload.lesson_id, &payload.quiz).await?;

    Ok((
        status,
        Json(serde_json::json!({
            "success": true,
            "quiz_id": quiz_id,
        })),
    ))
}
