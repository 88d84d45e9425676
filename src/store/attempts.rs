// src/store/attempts.rs

use chrono::Utc;
use sqlx::SqlitePool;

use crate::{
    error::AppError,
    models::attempt::RecordAttemptRequest,
    session::ScoreCache,
    store::scores,
};

/// Points a correct attempt is worth. Incorrect attempts award zero but
/// still consume the student's one shot at the quiz.
pub const POINTS_PER_CORRECT: i64 = 10;

/// Result of a recorded attempt.
#[derive(Debug)]
pub struct AttemptOutcome {
    pub points: i64,
    pub new_total: i64,
}

/// Records a student's one graded attempt at a quiz and awards points.
///
/// The existence check is only the friendly fast path; the authoritative
/// at-most-once guarantee is the (student_id, quiz_id) uniqueness
/// constraint, which turns the loser of a concurrent double-submit into
/// the same `DuplicateAttempt` rejection instead of a storage error.
pub async fn record_attempt(
    pool: &SqlitePool,
    cache: &ScoreCache,
    req: &RecordAttemptRequest,
) -> Result<AttemptOutcome, AppError> {
    let existing: Option<i64> =
        sqlx::query_scalar("SELECT id FROM quiz_attempts WHERE student_id = ? AND quiz_id = ?")
            .bind(req.student_id)
            .bind(req.quiz_id)
            .fetch_optional(pool)
            .await?;

    if existing.is_some() {
        return Err(AppError::DuplicateAttempt);
    }

    sqlx::query(
        r#"
        INSERT INTO quiz_attempts
            (student_id, quiz_id, selected_option_id, is_correct, time_spent, created_at)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(req.student_id)
    .bind(req.quiz_id)
    .bind(req.selected_option_id)
    .bind(req.is_correct)
    .bind(req.time_spent)
    .bind(Utc::now())
    .execute(pool)
    .await
    .map_err(|e| {
        if e.to_string().contains("UNIQUE constraint failed") {
            AppError::DuplicateAttempt
        } else {
            tracing::error!(
                "Failed to record attempt for student {} on quiz {}: {:?}",
                req.student_id,
                req.quiz_id,
                e
            );
            AppError::from(e)
        }
    })?;

    let points = if req.is_correct { POINTS_PER_CORRECT } else { 0 };

    let new_total = if points > 0 {
        scores::add_points(pool, cache, req.student_id, points).await?
    } else {
        scores::current_total(pool, cache, req.student_id).await?
    };

    Ok(AttemptOutcome { points, new_total })
}
