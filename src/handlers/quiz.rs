// src/handlers/quiz.rs

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::IntoResponse,
};
use validator::Validate;

use crate::{error::AppError, models::record::GenerateRequest, services::quiz::QuizService};

/// Generates a quiz from a Wikipedia URL.
///
/// * Scrapes the article.
/// * Asks the model for a structured quiz and validates it.
/// * Saves the record and returns it.
///
/// A malformed body or URL is a 400. Any failing step yields a 500 with the
/// cause in `detail`; nothing is stored.
pub async fn generate_quiz(
    State(quiz): State<QuizService>,
    body: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = body.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let record = quiz.generate(&payload.url).await?;

    Ok(Json(record))
}

/// Lists every stored quiz, newest first.
pub async fn get_history(State(quiz): State<QuizService>) -> Result<impl IntoResponse, AppError> {
    let records = quiz.history().await?;
    Ok(Json(records))
}
