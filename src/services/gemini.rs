// src/services/gemini.rs

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{config::Config, error::QuizError, services::generator::StructuredModel};

/// Google Gemini `generateContent` client with JSON-Schema constrained output.
#[derive(Clone)]
pub struct GeminiClient {
    http: Client,
    endpoint: String,
    api_key: String,
    temperature: f32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    system_instruction: Content<'a>,
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig<'a>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    temperature: f32,
    response_mime_type: &'a str,
    response_json_schema: &'a Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
    status: Option<String>,
}

impl GeminiClient {
    pub fn new(config: &Config) -> Result<Self, QuizError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.gemini_timeout_secs))
            .build()
            .map_err(|e| QuizError::Generation(e.to_string()))?;

        let endpoint = format!(
            "{}/models/{}:generateContent",
            config.gemini_base_url.trim_end_matches('/'),
            config.gemini_model
        );

        Ok(Self {
            http,
            endpoint,
            api_key: config.gemini_api_key.clone(),
            temperature: config.gemini_temperature,
        })
    }
}

#[async_trait]
impl StructuredModel for GeminiClient {
    async fn generate_structured(
        &self,
        system_instruction: &str,
        user_text: &str,
        schema: &Value,
    ) -> Result<Value, QuizError> {
        let body = build_request(system_instruction, user_text, schema, self.temperature);

        let response = self
            .http
            .post(&self.endpoint)
            .header("x-goog-api-key", self.api_key.as_str())
            .json(&body)
            .send()
            .await
            .map_err(|e| QuizError::Generation(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| QuizError::Generation(e.to_string()))?;

        if !status.is_success() {
            return Err(QuizError::Generation(provider_error_message(status.as_u16(), &text)));
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&text)
            .map_err(|e| QuizError::Generation(format!("unreadable provider response: {}", e)))?;

        let answer = extract_answer(parsed)?;
        serde_json::from_str(&answer).map_err(|e| {
            QuizError::SchemaViolation(format!("model did not return JSON: {}", e))
        })
    }
}

fn build_request<'a>(
    system_instruction: &'a str,
    user_text: &'a str,
    schema: &'a Value,
    temperature: f32,
) -> GenerateContentRequest<'a> {
    GenerateContentRequest {
        system_instruction: Content {
            role: None,
            parts: vec![Part {
                text: system_instruction,
            }],
        },
        contents: vec![Content {
            role: Some("user"),
            parts: vec![Part { text: user_text }],
        }],
        generation_config: GenerationConfig {
            temperature,
            response_mime_type: "application/json",
            response_json_schema: schema,
        },
    }
}

/// Joins the text parts of the first candidate.
fn extract_answer(response: GenerateContentResponse) -> Result<String, QuizError> {
    if let Some(reason) = response.prompt_feedback.and_then(|f| f.block_reason) {
        return Err(QuizError::Generation(format!("prompt blocked: {}", reason)));
    }

    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| QuizError::Generation("model returned no candidates".to_string()))?;

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        let reason = candidate
            .finish_reason
            .unwrap_or_else(|| "UNKNOWN".to_string());
        return Err(QuizError::Generation(format!(
            "model returned an empty answer (finish reason: {})",
            reason
        )));
    }

    Ok(text)
}

fn provider_error_message(status: u16, body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => match envelope.error.status {
            Some(kind) => format!("{} ({}): {}", status, kind, envelope.error.message),
            None => format!("{}: {}", status, envelope.error.message),
        },
        Err(_) => format!("{}: {}", status, body.trim()),
    }
}
