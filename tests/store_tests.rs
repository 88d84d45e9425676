// tests/store_tests.rs
//
// Exercises the persistence engine directly, below the HTTP surface, for
// the invariants that are awkward to provoke through handlers (forced
// mid-transaction failures in particular).

use lessonhub::error::AppError;
use lessonhub::models::lesson::SaveLessonRequest;
use lessonhub::models::quiz::{OptionInput, QuizPayload};
use lessonhub::models::attempt::RecordAttemptRequest;
use lessonhub::session::ScoreCache;
use lessonhub::store::{attempts, composer, reader, scores};
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;

async fn setup_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory SQLite");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to migrate database");

    pool
}

fn lesson_request(title: &str) -> SaveLessonRequest {
    SaveLessonRequest {
        lesson_id: None,
        topic_id: 3,
        title: title.to_string(),
        position: 1,
        content: "<p>body</p>".to_string(),
        content_kind: "text".to_string(),
        is_active: true,
    }
}

fn quiz_payload(quiz_id: Option<i64>, question: &str, options: &[(&str, bool)]) -> QuizPayload {
    QuizPayload {
        quiz_id,
        question: question.to_string(),
        explanation: String::new(),
        difficulty: "easy".to_string(),
        options: options
            .iter()
            .map(|(text, is_correct)| OptionInput {
                text: text.to_string(),
                is_correct: *is_correct,
            })
            .collect(),
    }
}

#[tokio::test]
async fn failed_option_insert_rolls_back_the_quiz_row() {
    // Arrange: a quiz with two healthy options
    let pool = setup_pool().await;
    let lesson_id = composer::save_lesson(&pool, &lesson_request("Intro")).await.unwrap();
    let quiz_id = composer::save_quiz(
        &pool,
        lesson_id,
        &quiz_payload(None, "What is 1+1?", &[("2", true), ("3", false)]),
    )
    .await
    .unwrap();

    // Act: an edit whose third option violates the non-empty CHECK, which
    // only the store can catch (handler validation is bypassed here)
    let poisoned = quiz_payload(
        Some(quiz_id),
        "Corrupted question",
        &[("2", true), ("3", false), ("", false)],
    );
    let result = composer::save_quiz(&pool, lesson_id, &poisoned).await;

    // Assert: the whole write rolled back; question and options are the
    // pre-call state, not a quiz with zero or partial options
    assert!(result.is_err());
    let question: String = sqlx::query_scalar("SELECT question FROM quizzes WHERE id = ?")
        .bind(quiz_id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(question, "What is 1+1?");

    let texts: Vec<String> = sqlx::query_scalar(
        "SELECT text FROM quiz_options WHERE quiz_id = ? ORDER BY position",
    )
    .bind(quiz_id)
    .fetch_all(&pool)
    .await
    .unwrap();
    assert_eq!(texts, vec!["2".to_string(), "3".to_string()]);
}

#[tokio::test]
async fn saving_the_same_option_list_twice_is_idempotent() {
    // Arrange
    let pool = setup_pool().await;
    let lesson_id = composer::save_lesson(&pool, &lesson_request("Intro")).await.unwrap();
    let payload = quiz_payload(None, "Pick one", &[("a", false), ("b", true), ("c", false)]);
    let quiz_id = composer::save_quiz(&pool, lesson_id, &payload).await.unwrap();

    // Act: identical edit
    let repeat = quiz_payload(Some(quiz_id), "Pick one", &[("a", false), ("b", true), ("c", false)]);
    composer::save_quiz(&pool, lesson_id, &repeat).await.unwrap();

    // Assert: exactly one option set, ordinals 0..n-1 in input order
    let rows: Vec<(String, i64)> = sqlx::query_as(
        "SELECT text, position FROM quiz_options WHERE quiz_id = ? ORDER BY position",
    )
    .bind(quiz_id)
    .fetch_all(&pool)
    .await
    .unwrap();
    assert_eq!(
        rows,
        vec![
            ("a".to_string(), 0),
            ("b".to_string(), 1),
            ("c".to_string(), 2)
        ]
    );
}

#[tokio::test]
async fn updating_a_missing_lesson_is_acknowledged_without_a_row() {
    // The composer reports success for updates that touch zero rows; this
    // pins that contract down.
    let pool = setup_pool().await;

    let mut request = lesson_request("Ghost");
    request.lesson_id = Some(999);
    let id = composer::save_lesson(&pool, &request).await.unwrap();
    assert_eq!(id, 999);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM lessons")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn reader_tolerates_a_quiz_with_no_options() {
    // Arrange: a quiz row inserted without any options, the transient shape
    // a concurrent reader may observe mid-replace
    let pool = setup_pool().await;
    let lesson_id = composer::save_lesson(&pool, &lesson_request("Intro")).await.unwrap();
    sqlx::query("INSERT INTO quizzes (lesson_id, question) VALUES (?, 'Bare')")
        .bind(lesson_id)
        .execute(&pool)
        .await
        .unwrap();

    // Act
    let detail = reader::get_lesson(&pool, lesson_id).await.unwrap();

    // Assert
    let quiz = detail.quiz.expect("quiz should be present");
    assert_eq!(quiz.question, "Bare");
    assert!(quiz.options.is_empty());
}

#[tokio::test]
async fn a_lesson_holds_at_most_one_live_quiz() {
    // Arrange
    let pool = setup_pool().await;
    let lesson_id = composer::save_lesson(&pool, &lesson_request("Intro")).await.unwrap();
    composer::save_quiz(
        &pool,
        lesson_id,
        &quiz_payload(None, "What is 1+1?", &[("2", true), ("3", false)]),
    )
    .await
    .unwrap();

    // Act: a second fresh quiz against the same lesson
    let result = composer::save_quiz(
        &pool,
        lesson_id,
        &quiz_payload(None, "Another?", &[("a", true), ("b", false)]),
    )
    .await;

    // Assert: rejected by the unique index, and exactly one live row remains
    assert!(matches!(result, Err(AppError::Conflict(_))));
    let live: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM quizzes WHERE lesson_id = ? AND deleted_at IS NULL",
    )
    .bind(lesson_id)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(live, 1);
}

#[tokio::test]
async fn replacing_a_soft_deleted_quiz_is_allowed() {
    // The unique index only covers live rows; a soft-deleted quiz does not
    // block authoring a new one for the lesson.
    let pool = setup_pool().await;
    let lesson_id = composer::save_lesson(&pool, &lesson_request("Intro")).await.unwrap();
    let quiz_id = composer::save_quiz(
        &pool,
        lesson_id,
        &quiz_payload(None, "Old", &[("a", true), ("b", false)]),
    )
    .await
    .unwrap();
    sqlx::query("UPDATE quizzes SET deleted_at = datetime('now') WHERE id = ?")
        .bind(quiz_id)
        .execute(&pool)
        .await
        .unwrap();

    let new_id = composer::save_quiz(
        &pool,
        lesson_id,
        &quiz_payload(None, "New", &[("a", true), ("b", false)]),
    )
    .await
    .unwrap();
    assert_ne!(new_id, quiz_id);
}

#[tokio::test]
async fn soft_deleted_lesson_is_not_found() {
    let pool = setup_pool().await;
    let lesson_id = composer::save_lesson(&pool, &lesson_request("Gone")).await.unwrap();
    sqlx::query("UPDATE lessons SET deleted_at = datetime('now') WHERE id = ?")
        .bind(lesson_id)
        .execute(&pool)
        .await
        .unwrap();

    let result = reader::get_lesson(&pool, lesson_id).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn soft_deleted_quiz_is_hidden_from_the_lesson_view() {
    // Arrange: visible lesson whose quiz has been soft-deleted
    let pool = setup_pool().await;
    let lesson_id = composer::save_lesson(&pool, &lesson_request("Intro")).await.unwrap();
    let quiz_id = composer::save_quiz(
        &pool,
        lesson_id,
        &quiz_payload(None, "What is 1+1?", &[("2", true), ("3", false)]),
    )
    .await
    .unwrap();
    sqlx::query("UPDATE quizzes SET deleted_at = datetime('now') WHERE id = ?")
        .bind(quiz_id)
        .execute(&pool)
        .await
        .unwrap();

    // Act
    let detail = reader::get_lesson(&pool, lesson_id).await.unwrap();

    // Assert: the lesson reads back quiz-less
    assert_eq!(detail.lesson.id, lesson_id);
    assert!(detail.quiz.is_none());
}

#[tokio::test]
async fn second_attempt_is_a_duplicate_rejection() {
    // Arrange
    let pool = setup_pool().await;
    let cache = ScoreCache::new();
    let student_id: i64 =
        sqlx::query_scalar("INSERT INTO students (name) VALUES ('ada') RETURNING id")
            .fetch_one(&pool)
            .await
            .unwrap();
    let lesson_id = composer::save_lesson(&pool, &lesson_request("Intro")).await.unwrap();
    let quiz_id = composer::save_quiz(
        &pool,
        lesson_id,
        &quiz_payload(None, "What is 1+1?", &[("2", true), ("3", false)]),
    )
    .await
    .unwrap();

    let request = RecordAttemptRequest {
        student_id,
        quiz_id,
        selected_option_id: 1,
        is_correct: true,
        time_spent: 12,
    };

    // Act + Assert: first accepted with 10 points, second rejected
    let outcome = attempts::record_attempt(&pool, &cache, &request).await.unwrap();
    assert_eq!(outcome.points, 10);
    assert_eq!(outcome.new_total, 10);

    let result = attempts::record_attempt(&pool, &cache, &request).await;
    assert!(matches!(result, Err(AppError::DuplicateAttempt)));
}

#[tokio::test]
async fn cache_tracks_the_store_through_point_awards() {
    let pool = setup_pool().await;
    let cache = ScoreCache::new();
    let student_id: i64 =
        sqlx::query_scalar("INSERT INTO students (name) VALUES ('grace') RETURNING id")
            .fetch_one(&pool)
            .await
            .unwrap();

    let total = scores::add_points(&pool, &cache, student_id, 10).await.unwrap();
    assert_eq!(total, 10);
    let total = scores::add_points(&pool, &cache, student_id, 10).await.unwrap();
    assert_eq!(total, 20);

    let stored: i64 = sqlx::query_scalar("SELECT score FROM students WHERE id = ?")
        .bind(student_id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(stored, 20);
    assert_eq!(cache.get(student_id), Some(20));
}

#[tokio::test]
async fn awarding_points_to_a_missing_student_is_not_found() {
    let pool = setup_pool().await;
    let cache = ScoreCache::new();

    let result = scores::add_points(&pool, &cache, 404, 10).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
    assert_eq!(cache.get(404), None);
}
