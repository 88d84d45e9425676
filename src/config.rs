// src/config.rs

use dotenvy::dotenv;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    pub rust_log: String,
    pub seed_student: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        // SQLite file store by default; tests and deployments override this.
        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://lessonhub.db?mode=rwc".to_string());

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let seed_student = env::var("SEED_STUDENT").ok();

        Self {
            database_url,
            bind_addr,
            rust_log,
            seed_student,
        }
    }
}
