// src/models/quiz.rs

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use validator::Validate;

/// Number of options every generated question must carry.
pub const OPTIONS_PER_QUESTION: usize = 4;

/// One answer choice of a question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizOption {
    pub text: String,
    pub is_correct: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// A single multiple-choice question produced by the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct QuizQuestion {
    #[validate(length(min = 1))]
    pub question: String,

    /// Exactly four options, exactly one of them correct.
    #[validate(custom(function = validate_options))]
    pub options: Vec<QuizOption>,

    /// Why the correct answer is correct.
    pub explanation: String,

    pub difficulty: Difficulty,
}

/// The structured quiz generated for one article.
///
/// Stored as an opaque JSON blob in `quiz_records.data`. Counts of questions (5-10)
/// and related topics (3-5) are expectations passed to the model, not enforced here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct QuizPayload {
    pub summary: String,

    /// Main entities of the article, e.g. `{"name": "Aristotle", "type": "person"}`.
    pub key_entities: Vec<BTreeMap<String, String>>,

    #[validate(nested)]
    pub quiz_questions: Vec<QuizQuestion>,

    pub related_topics: Vec<String>,
}

fn validate_options(options: &[QuizOption]) -> Result<(), validator::ValidationError> {
    if options.len() != OPTIONS_PER_QUESTION {
        let mut err = validator::ValidationError::new("wrong_option_count");
        err.add_param("count".into(), &options.len());
        return Err(err);
    }
    match options.iter().filter(|opt| opt.is_correct).count() {
        1 => Ok(()),
        0 => Err(validator::ValidationError::new("no_correct_option")),
        _ => Err(validator::ValidationError::new("multiple_correct_options")),
    }
}

impl QuizPayload {
    /// JSON Schema handed to the model so its output is constrained to this shape.
    pub fn json_schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "summary": {
                    "type": "string",
                    "description": "Summary of article"
                },
                "key_entities": {
                    "type": "array",
                    "description": "Main entities",
                    "items": {
                        "type": "object",
                        "additionalProperties": { "type": "string" }
                    }
                },
                "quiz_questions": {
                    "type": "array",
                    "description": "5-10 questions",
                    "items": {
                        "type": "object",
                        "properties": {
                            "question": {
                                "type": "string",
                                "description": "The question text"
                            },
                            "options": {
                                "type": "array",
                                "description": "4 options",
                                "minItems": OPTIONS_PER_QUESTION,
                                "maxItems": OPTIONS_PER_QUESTION,
                                "items": {
                                    "type": "object",
                                    "properties": {
                                        "text": {
                                            "type": "string",
                                            "description": "Option text"
                                        },
                                        "is_correct": {
                                            "type": "boolean",
                                            "description": "True if correct"
                                        }
                                    },
                                    "required": ["text", "is_correct"]
                                }
                            },
                            "explanation": {
                                "type": "string",
                                "description": "Why the answer is correct"
                            },
                            "difficulty": {
                                "type": "string",
                                "description": "The level of the question: easy, medium, or hard",
                                "enum": ["easy", "medium", "hard"]
                            }
                        },
                        "required": ["question", "options", "explanation", "difficulty"]
                    }
                },
                "related_topics": {
                    "type": "array",
                    "description": "3-5 related Wikipedia topic titles",
                    "items": { "type": "string" }
                }
            },
            "required": ["summary", "key_entities", "quiz_questions", "related_topics"]
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn option(text: &str, is_correct: bool) -> QuizOption {
        QuizOption {
            text: text.to_string(),
            is_correct,
        }
    }

    fn question(options: Vec<QuizOption>) -> QuizQuestion {
        QuizQuestion {
            question: "How many hearts does an octopus have?".to_string(),
            options,
            explanation: "Two branchial hearts and one systemic heart.".to_string(),
            difficulty: Difficulty::Medium,
        }
    }

    fn payload(questions: Vec<QuizQuestion>) -> QuizPayload {
        QuizPayload {
            summary: "Octopuses are soft-bodied cephalopods.".to_string(),
            key_entities: vec![BTreeMap::from([(
                "name".to_string(),
                "Cephalopoda".to_string(),
            )])],
            quiz_questions: questions,
            related_topics: vec!["Squid".to_string(), "Cuttlefish".to_string()],
        }
    }

    fn four_options(correct: &[bool; 4]) -> Vec<QuizOption> {
        ["One", "Two", "Three", "Four"]
            .iter()
            .zip(correct)
            .map(|(text, is_correct)| option(text, *is_correct))
            .collect()
    }

    #[test]
    fn well_formed_payload_passes() {
        let quiz = payload(vec![question(four_options(&[false, false, true, false]))]);
        assert!(quiz.validate().is_ok());
    }

    #[test]
    fn three_options_is_rejected() {
        let mut options = four_options(&[true, false, false, false]);
        options.pop();
        let quiz = payload(vec![question(options)]);

        let err = quiz.validate().unwrap_err();
        assert!(err.to_string().contains("wrong_option_count"));
    }

    #[test]
    fn zero_correct_options_is_rejected() {
        let quiz = payload(vec![question(four_options(&[false; 4]))]);
        let err = quiz.validate().unwrap_err();
        assert!(err.to_string().contains("no_correct_option"));
    }

    #[test]
    fn two_correct_options_is_rejected() {
        let quiz = payload(vec![question(four_options(&[true, true, false, false]))]);
        assert!(quiz.validate().is_err());
    }

    #[test]
    fn deserializes_model_json() {
        let raw = json!({
            "summary": "s",
            "key_entities": [{"name": "Aristotle", "type": "person"}],
            "quiz_questions": [{
                "question": "q",
                "options": [
                    {"text": "a", "is_correct": false},
                    {"text": "b", "is_correct": true},
                    {"text": "c", "is_correct": false},
                    {"text": "d", "is_correct": false}
                ],
                "explanation": "e",
                "difficulty": "hard"
            }],
            "related_topics": ["Logic"]
        });

        let quiz: QuizPayload = serde_json::from_value(raw).unwrap();
        assert_eq!(quiz.quiz_questions[0].difficulty, Difficulty::Hard);
        assert_eq!(quiz.key_entities[0]["type"], "person");
    }

    #[test]
    fn unknown_difficulty_fails_to_deserialize() {
        let raw = json!({
            "question": "q",
            "options": [],
            "explanation": "e",
            "difficulty": "impossible"
        });
        assert!(serde_json::from_value::<QuizQuestion>(raw).is_err());
    }

    #[test]
    fn schema_requires_every_top_level_field() {
        let schema = QuizPayload::json_schema();
        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(Value::as_str)
            .collect();
        assert_eq!(
            required,
            vec!["summary", "key_entities", "quiz_questions", "related_topics"]
        );
    }
}
