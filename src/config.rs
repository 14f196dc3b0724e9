// src/config.rs

use std::{env, fmt, str::FromStr};

use dotenvy::dotenv;

const DEFAULT_GEMINI_MODEL: &str = "gemini-3-flash-preview";
const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Process-wide configuration, read once at startup and handed to every component.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub gemini_temperature: f32,
    pub gemini_timeout_secs: u64,
    pub scraper_user_agent: String,
    pub scraper_timeout_secs: u64,
    pub port: u16,
    /// Allowed CORS origins. Empty means any origin.
    pub cors_origins: Vec<String>,
    pub rust_log: String,
}

/// Raised when the environment cannot produce a usable `Config`.
#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid { key: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "{} must be set", key),
            ConfigError::Invalid { key, value } => {
                write!(f, "{} has an invalid value: '{}'", key, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();

        let database_url = required("DATABASE_URL")?;
        let gemini_api_key = required("GOOGLE_API_KEY")?;

        let gemini_model =
            env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.to_string());
        let gemini_base_url =
            env::var("GEMINI_BASE_URL").unwrap_or_else(|_| DEFAULT_GEMINI_BASE_URL.to_string());
        let scraper_user_agent =
            env::var("SCRAPER_USER_AGENT").unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string());

        let cors_origins = env::var("CORS_ORIGINS")
            .map(|raw| parse_origins(&raw))
            .unwrap_or_default();

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            database_url,
            gemini_api_key,
            gemini_model,
            gemini_base_url,
            gemini_temperature: parsed("GEMINI_TEMPERATURE", 0.1)?,
            gemini_timeout_secs: parsed("GEMINI_TIMEOUT_SECS", 120)?,
            scraper_user_agent,
            scraper_timeout_secs: parsed("SCRAPER_TIMEOUT_SECS", 10)?,
            port: parsed("PORT", 8000)?,
            cors_origins,
            rust_log,
        })
    }
}

fn required(key: &'static str) -> Result<String, ConfigError> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::Missing(key)),
    }
}

fn parsed<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
        Err(_) => Ok(default),
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty() && *origin != "*")
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origins_are_split_and_trimmed() {
        let origins = parse_origins(" http://localhost:5173 ,https://quiz.example.org,,");
        assert_eq!(
            origins,
            vec!["http://localhost:5173", "https://quiz.example.org"]
        );
    }

    #[test]
    fn wildcard_origin_means_any() {
        assert!(parse_origins("*").is_empty());
    }

    #[test]
    fn missing_key_message_names_variable() {
        let err = ConfigError::Missing("GOOGLE_API_KEY");
        assert_eq!(err.to_string(), "GOOGLE_API_KEY must be set");
    }
}
