// src/store/reader.rs

use sqlx::SqlitePool;

use crate::{
    error::AppError,
    models::{
        lesson::{Lesson, LessonDetail},
        quiz::{Quiz, QuizOption, QuizView},
    },
};

/// Assembles the denormalized lesson view: the lesson row joined with its
/// quiz (if any) and that quiz's options in ordinal order.
///
/// Pure read. Soft-deleted lessons and quizzes are invisible; a lesson
/// without a quiz yields `quiz: None`, and a quiz caught mid-replace with
/// zero options yields an empty list rather than an error.
pub async fn get_lesson(pool: &SqlitePool, lesson_id: i64) -> Result<LessonDetail, AppError> {
    let lesson = sqlx::query_as::<_, Lesson>(
        r#"
        SELECT id, topic_id, title, position, content, content_kind,
               is_active, deleted_at, created_at, updated_at
        FROM lessons
        WHERE id = ? AND deleted_at IS NULL
        "#,
    )
    .bind(lesson_id)
    .fetch_optional(pool)
    .await?
    .ok_or(AppError::NotFound("Lesson not found".to_string()))?;

    let quiz = sqlx::query_as::<_, Quiz>(
        r#"
        SELECT id, lesson_id, question, explanation, difficulty, deleted_at
        FROM quizzes
        WHERE lesson_id = ? AND deleted_at IS NULL
        "#,
    )
    .bind(lesson_id)
    .fetch_optional(pool)
    .await?;

    let quiz = match quiz {
        Some(quiz) => {
            let options = sqlx::query_as::<_, QuizOption>(
                r#"
                SELECT id, quiz_id, text, is_correct, position
                FROM quiz_options
                WHERE quiz_id = ?
                ORDER BY position
                "#,
            )
            .bind(quiz.id)
            .fetch_all(pool)
            .await?;

            Some(QuizView::from_parts(quiz, options))
        }
        None => None,
    };

    Ok(LessonDetail { lesson, quiz })
}
