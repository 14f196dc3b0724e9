// src/models/record.rs

use serde::{Deserialize, Serialize};
use sqlx::{prelude::FromRow, types::Json};
use url::Url;
use validator::Validate;

use crate::models::quiz::QuizPayload;

/// Represents the 'quiz_records' table in the database.
/// One row per successful generation; rows are never updated.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct QuizRecord {
    pub id: i64,

    /// The article URL exactly as submitted.
    pub url: String,

    pub title: String,

    /// The validated quiz, stored as JSONB.
    pub data: Json<QuizPayload>,

    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// DTO for requesting a new quiz.
#[derive(Debug, Deserialize, Validate)]
pub struct GenerateRequest {
    #[validate(length(min = 1, max = 2048), custom(function = validate_article_url))]
    pub url: String,
}

/// Accepts only absolute http(s) URLs with a host.
fn validate_article_url(url: &str) -> Result<(), validator::ValidationError> {
    let parsed = Url::parse(url).map_err(|_| validator::ValidationError::new("invalid_url"))?;
    if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
        return Err(validator::ValidationError::new("invalid_url"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(url: &str) -> GenerateRequest {
        GenerateRequest {
            url: url.to_string(),
        }
    }

    #[test]
    fn accepts_wikipedia_url() {
        assert!(
            request("https://en.wikipedia.org/wiki/Octopus")
                .validate()
                .is_ok()
        );
    }

    #[test]
    fn rejects_relative_and_non_http_urls() {
        assert!(request("/wiki/Octopus").validate().is_err());
        assert!(request("ftp://example.org/Octopus").validate().is_err());
        assert!(request("").validate().is_err());
    }
}
