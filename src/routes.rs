// src/routes.rs

use axum::{
    Router,
    http::Method,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{attempt, lesson, quiz},
    state::AppState,
};

/// Assembles the main application router.
///
/// * Merges all sub-routers (lessons, quizzes, attempts, students).
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (Database Pool, Score Cache).
pub fn create_router(state: AppState) -> Router {
    let origins = [
        "http://localhost:3000".parse().unwrap(),
        "http://127.0.0.1:3000".parse().unwrap(),
    ];

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
        ]);

    let lesson_routes = Router::new()
        .route("/", post(lesson::save_lesson))
        .route("/with-quiz", post(lesson::save_lesson_with_quiz))
        .route("/{id}", get(lesson::get_lesson));

    let quiz_routes = Router::new().route("/", post(quiz::save_quiz));

    let attempt_routes = Router::new().route("/", post(attempt::record_attempt));

    let student_routes = Router::new().route("/{id}/score", get(attempt::get_score));

    Router::new()
        .nest("/api/lessons", lesson_routes)
        .nest("/api/quizzes", quiz_routes)
        .nest("/api/attempts", attempt_routes)
        .nest("/api/students", student_routes)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
