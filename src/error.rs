// src/error.rs

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

/// Failures raised by the quiz pipeline (scrape -> generate -> store).
///
/// Every stage fails fast, so a `QuizError` always means nothing was persisted.
#[derive(Debug)]
pub enum QuizError {
    /// Transport failure or non-success status while fetching the article.
    Fetch(String),

    /// The page has no main content container.
    ContentNotFound,

    /// Unexpected problem while reading the article markup.
    Parse(String),

    /// The model provider call failed.
    Generation(String),

    /// The model answered, but not with a well-formed quiz.
    SchemaViolation(String),

    /// The record store rejected the read or write.
    Store(String),
}

impl fmt::Display for QuizError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuizError::Fetch(msg) => write!(f, "Error fetching URL: {}", msg),
            QuizError::ContentNotFound => write!(f, "Could not find main content area"),
            QuizError::Parse(msg) => write!(f, "Error parsing content: {}", msg),
            QuizError::Generation(msg) => write!(f, "Quiz generation failed: {}", msg),
            QuizError::SchemaViolation(msg) => {
                write!(f, "Model output did not match the quiz schema: {}", msg)
            }
            QuizError::Store(msg) => write!(f, "Quiz store error: {}", msg),
        }
    }
}

impl std::error::Error for QuizError {}

impl From<sqlx::Error> for QuizError {
    fn from(err: sqlx::Error) -> Self {
        QuizError::Store(err.to_string())
    }
}

/// Global Application Error Enum.
/// Centralizes error handling and mapping to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    // 500 Internal Server Error
    InternalServerError(String),

    // 400 Bad Request
    BadRequest(String),

    // 404 Not Found
    NotFound(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for AppError {}

/// Converts the error into a JSON body of the form `{"error": .., "detail": ..}`.
/// Server errors keep the underlying message in `detail` so callers can see what failed.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, detail) = match self {
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error", msg)
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "Bad Request", msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "Not Found", msg),
        };
        let body = Json(json!({
            "error": error,
            "detail": detail,
        }));

        (status, body).into_response()
    }
}

impl From<QuizError> for AppError {
    fn from(err: QuizError) -> Self {
        AppError::InternalServerError(err.to_string())
    }
}
