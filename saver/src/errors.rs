use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid date: {0}")]
    Timestamp(#[from] chrono::ParseError),

    #[error("Invalid deviceId filter: {0}")]
    Filter(#[from] std::num::ParseIntError),

    #[error("Invalid query string: {0}")]
    Query(#[from] axum::extract::rejection::QueryRejection),

    #[error("Method error. Please use 'GET' method")]
    MethodNotAllowed,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config format error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Metrics error: {0}")]
    Metrics(#[from] prometheus::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
