// src/store/composer.rs

use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};

use crate::{
    error::AppError,
    models::{lesson::SaveLessonRequest, quiz::QuizPayload},
};

/// Creates or updates a lesson and returns its id.
///
/// Absent `lesson_id` inserts and returns the new id; present `lesson_id`
/// updates that row and refreshes `updated_at`. An update addressed at a
/// missing or soft-deleted id affects zero rows and is still acknowledged.
pub async fn save_lesson(pool: &SqlitePool, req: &SaveLessonRequest) -> Result<i64, AppError> {
    let mut conn = pool.acquire().await?;
    upsert_lesson(&mut conn, req).await
}

/// Creates or updates a quiz and fully replaces its options, as one
/// transaction: upsert the quiz row, delete every existing option, then
/// insert the supplied options with ordinals 0..n-1 in list order. A
/// failure at any step rolls the whole write back; a quiz is never left
/// durably without its options.
pub async fn save_quiz(
    pool: &SqlitePool,
    lesson_id: i64,
    quiz: &QuizPayload,
) -> Result<i64, AppError> {
    let mut tx = pool.begin().await?;
    let quiz_id = replace_quiz(&mut tx, lesson_id, quiz).await?;
    tx.commit().await?;
    Ok(quiz_id)
}

/// Saves a lesson and its quiz in a single transaction, so a crash cannot
/// leave a lesson durably stored without the quiz it was authored with.
pub async fn save_lesson_with_quiz(
    pool: &SqlitePool,
    lesson: &SaveLessonRequest,
    quiz: &QuizPayload,
) -> Result<(i64, i64), AppError> {
    let mut tx = pool.begin().await?;
    let lesson_id = upsert_lesson(&mut tx, lesson).await?;
    let quiz_id = replace_quiz(&mut tx, lesson_id, quiz).await?;
    tx.commit().await?;
    Ok((lesson_id, quiz_id))
}

async fn upsert_lesson(
    conn: &mut SqliteConnection,
    req: &SaveLessonRequest,
) -> Result<i64, AppError> {
    let now = Utc::now();

    match req.lesson_id {
        Some(id) => {
            sqlx::query(
                r#"
                UPDATE lessons
                SET topic_id = ?, title = ?, position = ?, content = ?,
                    content_kind = ?, is_active = ?, updated_at = ?
                WHERE id = ? AND deleted_at IS NULL
                "#,
            )
            .bind(req.topic_id)
            .bind(&req.title)
            .bind(req.position)
            .bind(&req.content)
            .bind(&req.content_kind)
            .bind(req.is_active)
            .bind(now)
            .bind(id)
            .execute(&mut *conn)
            .await
            .map_err(|e| {
                tracing::error!("Failed to update lesson {}: {:?}", id, e);
                AppError::from(e)
            })?;
            Ok(id)
        }
        None => {
            let id: i64 = sqlx::query_scalar(
                r#"
                INSERT INTO lessons
                    (topic_id, title, position, content, content_kind, is_active,
                     created_at, updated_at)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?)
                RETURNING id
                "#,
            )
            .bind(req.topic_id)
            .bind(&req.title)
            .bind(req.position)
            .bind(&req.content)
            .bind(&req.content_kind)
            .bind(req.is_active)
            .bind(now)
            .bind(now)
            .fetch_one(&mut *conn)
            .await
            .map_err(|e| {
                tracing::error!("Failed to insert lesson: {:?}", e);
                AppError::from(e)
            })?;
            Ok(id)
        }
    }
}

async fn replace_quiz(
    conn: &mut SqliteConnection,
    lesson_id: i64,
    quiz: &QuizPayload,
) -> Result<i64, AppError> {
    let quiz_id: i64 = match quiz.quiz_id {
        Some(id) => {
            // Re-points lesson_id when the caller says so; the reference
            // never changes otherwise.
            sqlx::query(
                r#"
                UPDATE quizzes
                SET lesson_id = ?, question = ?, explanation = ?, difficulty = ?
                WHERE id = ? AND deleted_at IS NULL
                "#,
            )
            .bind(lesson_id)
            .bind(&quiz.question)
            .bind(&quiz.explanation)
            .bind(&quiz.difficulty)
            .bind(id)
            .execute(&mut *conn)
            .await
            .map_err(|e| one_quiz_per_lesson(e, lesson_id))?;
            id
        }
        None => {
            sqlx::query_scalar(
                r#"
                INSERT INTO quizzes (lesson_id, question, explanation, difficulty)
                VALUES (?, ?, ?, ?)
                RETURNING id
                "#,
            )
            .bind(lesson_id)
            .bind(&quiz.question)
            .bind(&quiz.explanation)
            .bind(&quiz.difficulty)
            .fetch_one(&mut *conn)
            .await
            .map_err(|e| one_quiz_per_lesson(e, lesson_id))?
        }
    };

    // Edit is full replace: clear whatever option set existed, then insert
    // the supplied list with contiguous zero-based ordinals.
    sqlx::query("DELETE FROM quiz_options WHERE quiz_id = ?")
        .bind(quiz_id)
        .execute(&mut *conn)
        .await?;

    for (ordinal, option) in quiz.options.iter().enumerate() {
        sqlx::query(
            r#"
            INSERT INTO quiz_options (quiz_id, text, is_correct, position)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(quiz_id)
        .bind(&option.text)
        .bind(option.is_correct)
        .bind(ordinal as i64)
        .execute(&mut *conn)
        .await?;
    }

    Ok(quiz_id)
}

/// The partial unique index on quizzes(lesson_id) enforces the 0-or-1
/// relationship; its violation gets a friendly message instead of a
/// storage error.
fn one_quiz_per_lesson(e: sqlx::Error, lesson_id: i64) -> AppError {
    if e.to_string().contains("UNIQUE constraint failed") {
        AppError::Conflict(format!("Lesson {} already has a quiz", lesson_id))
    } else {
        tracing::error!("Failed to save quiz for lesson {}: {:?}", lesson_id, e);
        AppError::from(e)
    }
}
