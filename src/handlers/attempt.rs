// src/handlers/attempt.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    error::AppError,
    models::attempt::RecordAttemptRequest,
    session::ScoreCache,
    store::{attempts, scores},
};

/// Records a student's one graded attempt at a quiz.
///
/// A correct attempt awards 10 points; an incorrect one awards 0 and still
/// consumes the slot. A repeat submission for the same (student, quiz)
/// pair is rejected with 409, whether it arrives after or concurrently
/// with the first.
pub async fn record_attempt(
    State(pool): State<SqlitePool>,
    State(cache): State<ScoreCache>,
    Json(payload): Json<RecordAttemptRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let outcome = attempts::record_attempt(&pool, &cache, &payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "success": true,
            "points": outcome.points,
            "new_total_score": outcome.new_total,
        })),
    ))
}

/// Returns a student's score, read through the store so the session cache
/// is freshly overwritten (the login-time refresh path).
pub async fn get_score(
    State(pool): State<SqlitePool>,
    State(cache): State<ScoreCache>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let student = scores::get_student(&pool, &cache, id).await?;

    Ok(Json(serde_json::json!({
        "success": true,
        "student_id": student.id,
        "name": student.name,
        "score": student.score,
    })))
}
