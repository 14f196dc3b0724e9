// src/services/generator.rs

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use validator::Validate;

use crate::{error::QuizError, models::quiz::QuizPayload, utils::text::truncate_chars};

/// Largest slice of article text sent to the model, in characters.
pub const MAX_INPUT_CHARS: usize = 15_000;

pub const SYSTEM_INSTRUCTION: &str =
    "You are an expert quiz creator. Analyze the content and generate a structured quiz.";

/// A generative model that can be forced to answer in a given JSON Schema.
///
/// Implementations return the decoded JSON object. A provider or transport failure is a
/// `QuizError::Generation`; an answer that is not JSON at all is a `QuizError::SchemaViolation`.
#[async_trait]
pub trait StructuredModel: Send + Sync {
    async fn generate_structured(
        &self,
        system_instruction: &str,
        user_text: &str,
        schema: &Value,
    ) -> Result<Value, QuizError>;
}

/// Turns article text into a validated `QuizPayload`.
#[derive(Clone)]
pub struct QuizGenerator {
    model: Arc<dyn StructuredModel>,
}

impl QuizGenerator {
    pub fn new(model: Arc<dyn StructuredModel>) -> Self {
        Self { model }
    }

    pub async fn generate(&self, article_text: &str) -> Result<QuizPayload, QuizError> {
        let content = truncate_chars(article_text, MAX_INPUT_CHARS);
        if content.len() < article_text.len() {
            tracing::debug!("Article text truncated to {} characters", MAX_INPUT_CHARS);
        }

        let raw = self
            .model
            .generate_structured(SYSTEM_INSTRUCTION, content, &QuizPayload::json_schema())
            .await?;

        let payload: QuizPayload = serde_json::from_value(raw)
            .map_err(|e| QuizError::SchemaViolation(e.to_string()))?;

        payload
            .validate()
            .map_err(|e| QuizError::SchemaViolation(e.to_string()))?;

        warn_on_unexpected_counts(&payload);

        Ok(payload)
    }
}

fn warn_on_unexpected_counts(payload: &QuizPayload) {
    let questions = payload.quiz_questions.len();
    if !(5..=10).contains(&questions) {
        tracing::warn!("Model returned {} questions, expected 5-10", questions);
    }
    let topics = payload.related_topics.len();
    if !(3..=5).contains(&topics) {
        tracing::warn!("Model returned {} related topics, expected 3-5", topics);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Mutex;

    /// Records what reached the provider boundary and replies with a canned result.
    struct RecordingModel {
        reply: Result<Value, String>,
        seen: Mutex<Vec<(String, String)>>,
    }

    impl RecordingModel {
        fn replying(reply: Result<Value, String>) -> Arc<Self> {
            Arc::new(Self {
                reply,
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl StructuredModel for RecordingModel {
        async fn generate_structured(
            &self,
            system_instruction: &str,
            user_text: &str,
            _schema: &Value,
        ) -> Result<Value, QuizError> {
            self.seen
                .lock()
                .unwrap()
                .push((system_instruction.to_string(), user_text.to_string()));
            self.reply.clone().map_err(QuizError::Generation)
        }
    }

    fn valid_quiz() -> Value {
        json!({
            "summary": "The octopus is a soft-bodied, eight-limbed mollusc.",
            "key_entities": [{"name": "Octopoda", "type": "order"}],
            "quiz_questions": [{
                "question": "How many arms does an octopus have?",
                "options": [
                    {"text": "Six", "is_correct": false},
                    {"text": "Eight", "is_correct": true},
                    {"text": "Ten", "is_correct": false},
                    {"text": "Twelve", "is_correct": false}
                ],
                "explanation": "Octopuses have eight arms.",
                "difficulty": "easy"
            }],
            "related_topics": ["Squid", "Cuttlefish", "Nautilus"]
        })
    }

    #[tokio::test]
    async fn input_is_truncated_before_reaching_the_model() {
        let model = RecordingModel::replying(Ok(valid_quiz()));
        let generator = QuizGenerator::new(model.clone());

        let text = "a".repeat(MAX_INPUT_CHARS + 1);
        generator.generate(&text).await.unwrap();

        let seen = model.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0, SYSTEM_INSTRUCTION);
        assert_eq!(seen[0].1.chars().count(), MAX_INPUT_CHARS);
        assert_eq!(seen[0].1, text[..MAX_INPUT_CHARS]);
    }

    #[tokio::test]
    async fn short_input_is_sent_verbatim() {
        let model = RecordingModel::replying(Ok(valid_quiz()));
        let generator = QuizGenerator::new(model.clone());

        generator.generate("Octopus\n\nShort text.").await.unwrap();
        assert_eq!(model.seen.lock().unwrap()[0].1, "Octopus\n\nShort text.");
    }

    #[tokio::test]
    async fn valid_reply_is_deserialized() {
        let generator = QuizGenerator::new(RecordingModel::replying(Ok(valid_quiz())));
        let quiz = generator.generate("Octopus").await.unwrap();
        assert_eq!(quiz.quiz_questions.len(), 1);
        assert_eq!(quiz.related_topics[2], "Nautilus");
    }

    #[tokio::test]
    async fn missing_field_is_a_schema_violation() {
        let generator =
            QuizGenerator::new(RecordingModel::replying(Ok(json!({"summary": "only"}))));
        let err = generator.generate("Octopus").await.unwrap_err();
        assert!(matches!(err, QuizError::SchemaViolation(_)));
    }

    #[tokio::test]
    async fn wrong_option_count_is_a_schema_violation() {
        let mut quiz = valid_quiz();
        quiz["quiz_questions"][0]["options"]
            .as_array_mut()
            .unwrap()
            .truncate(3);

        let generator = QuizGenerator::new(RecordingModel::replying(Ok(quiz)));
        let err = generator.generate("Octopus").await.unwrap_err();
        assert!(matches!(err, QuizError::SchemaViolation(_)));
    }

    #[tokio::test]
    async fn provider_failure_is_a_generation_error() {
        let generator = QuizGenerator::new(RecordingModel::replying(Err(
            "API key not valid".to_string()
        )));
        let err = generator.generate("Octopus").await.unwrap_err();
        match err {
            QuizError::Generation(msg) => assert_eq!(msg, "API key not valid"),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
