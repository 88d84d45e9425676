// src/store/scores.rs

use sqlx::SqlitePool;

use crate::{error::AppError, models::student::Student, session::ScoreCache};

/// Adds `delta` to a student's authoritative score and returns the new
/// total, refreshing the session cache on the way out.
///
/// The increment is a single store-level statement rather than a
/// read-modify-write, so concurrent scoring events for the same student
/// (two browser tabs) cannot lose updates.
pub async fn add_points(
    pool: &SqlitePool,
    cache: &ScoreCache,
    student_id: i64,
    delta: i64,
) -> Result<i64, AppError> {
    let updated = sqlx::query("UPDATE students SET score = score + ? WHERE id = ?")
        .bind(delta)
        .bind(student_id)
        .execute(pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to add points for student {}: {:?}", student_id, e);
            AppError::from(e)
        })?;

    if updated.rows_affected() == 0 {
        return Err(AppError::NotFound("Student not found".to_string()));
    }

    current_total(pool, cache, student_id).await
}

/// Reads the authoritative total and overwrites the session cache with it.
/// The cache is never trusted as a source of truth; after any mutation (and
/// at session start) it is always repopulated from this read.
pub async fn current_total(
    pool: &SqlitePool,
    cache: &ScoreCache,
    student_id: i64,
) -> Result<i64, AppError> {
    let total: i64 = sqlx::query_scalar("SELECT score FROM students WHERE id = ?")
        .bind(student_id)
        .fetch_optional(pool)
        .await?
        .ok_or(AppError::NotFound("Student not found".to_string()))?;

    cache.put(student_id, total);
    Ok(total)
}

/// Loads a student row for display, refreshing the cached score. This is
/// the read-through path the session layer uses at login.
pub async fn get_student(
    pool: &SqlitePool,
    cache: &ScoreCache,
    student_id: i64,
) -> Result<Student, AppError> {
    let student = sqlx::query_as::<_, Student>(
        "SELECT id, name, score, created_at FROM students WHERE id = ?",
    )
    .bind(student_id)
    .fetch_optional(pool)
    .await?
    .ok_or(AppError::NotFound("Student not found".to_string()))?;

    cache.put(student.id, student.score);
    Ok(student)
}
