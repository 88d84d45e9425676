// src/models/quiz.rs

use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use validator::Validate;

/// Represents the 'quizzes' table in the database.
/// A lesson carries at most one quiz.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Quiz {
    pub id: i64,
    pub lesson_id: i64,
    pub question: String,

    /// Explanation shown after the student has answered.
    pub explanation: String,

    /// Difficulty: 'easy', 'medium' or 'hard'.
    pub difficulty: String,

    pub deleted_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Represents the 'quiz_options' table in the database.
/// Options are fully replaced on every quiz edit; `position` is the
/// zero-based ordinal within the quiz.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct QuizOption {
    pub id: i64,
    pub quiz_id: i64,
    pub text: String,
    pub is_correct: bool,
    pub position: i64,
}

/// One candidate answer as supplied by the authoring surface.
/// Ordinals are implied by list order, not carried in the payload.
/// Serialize is required so failed list validation can embed the offending
/// value in the `ValidationError` params.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionInput {
    pub text: String,
    pub is_correct: bool,
}

/// Quiz fields common to the standalone and composite save operations.
#[derive(Debug, Deserialize, Validate)]
pub struct QuizPayload {
    pub quiz_id: Option<i64>,
    #[validate(length(
        min = 1,
        max = 1000,
        message = "Question length must be between 1 and 1000 characters."
    ))]
    pub question: String,
    #[serde(default)]
    #[validate(length(max = 2000))]
    pub explanation: String,
    #[validate(custom(function = validate_difficulty))]
    pub difficulty: String,
    #[validate(custom(function = validate_options))]
    pub options: Vec<OptionInput>,
}

/// DTO for saving a quiz against an existing lesson.
#[derive(Debug, Deserialize, Validate)]
pub struct SaveQuizRequest {
    pub lesson_id: i64,
    #[serde(flatten)]
    #[validate(nested)]
    pub quiz: QuizPayload,
}

/// DTO for one answer option in the read view.
#[derive(Debug, Serialize)]
pub struct OptionView {
    pub id: i64,
    pub text: String,
    pub is_correct: bool,
}

/// A quiz with its options in ordinal order, as embedded in `LessonDetail`.
#[derive(Debug, Serialize)]
pub struct QuizView {
    pub id: i64,
    pub question: String,
    pub explanation: String,
    pub difficulty: String,
    pub options: Vec<OptionView>,
}

impl QuizView {
    pub fn from_parts(quiz: Quiz, options: Vec<QuizOption>) -> Self {
        Self {
            id: quiz.id,
            question: quiz.question,
            explanation: quiz.explanation,
            difficulty: quiz.difficulty,
            options: options
                .into_iter()
                .map(|o| OptionView {
                    id: o.id,
                    text: o.text,
                    is_correct: o.is_correct,
                })
                .collect(),
        }
    }
}

fn validate_difficulty(difficulty: &str) -> Result<(), validator::ValidationError> {
    match difficulty {
        "easy" | "medium" | "hard" => Ok(()),
        _ => Err(validator::ValidationError::new("unknown_difficulty")),
    }
}

/// A quiz is presentable only with at least two options, and authoring
/// requires exactly one of them to be marked correct.
fn validate_options(options: &[OptionInput]) -> Result<(), validator::ValidationError> {
    if options.len() < 2 {
        return Err(validator::ValidationError::new("need_at_least_two_options"));
    }
    let correct_count = options.iter().filter(|o| o.is_correct).count();
    if correct_count != 1 {
        return Err(validator::ValidationError::new("need_exactly_one_correct_option"));
    }
    for opt in options {
        if opt.text.is_empty() || opt.text.len() > 500 {
            return Err(validator::ValidationError::new("option_text_length"));
        }
    }
    Ok(())
}
