// src/services/quiz.rs

use std::sync::Arc;

use crate::{
    error::QuizError,
    models::record::QuizRecord,
    services::{generator::QuizGenerator, scraper::ArticleScraper, store::QuizStore},
};

/// Runs scrape -> generate -> store for one URL and serves the history.
#[derive(Clone)]
pub struct QuizService {
    scraper: ArticleScraper,
    generator: QuizGenerator,
    store: Arc<dyn QuizStore>,
}

impl QuizService {
    pub fn new(scraper: ArticleScraper, generator: QuizGenerator, store: Arc<dyn QuizStore>) -> Self {
        Self {
            scraper,
            generator,
            store,
        }
    }

    /// Generates and persists a quiz for `url`.
    ///
    /// Any stage failing aborts the call before the insert, so a failed
    /// generation never leaves a record behind.
    pub async fn generate(&self, url: &str) -> Result<QuizRecord, QuizError> {
        tracing::info!("Scraping {}", url);
        let article = self.scraper.scrape(url).await?;
        tracing::info!(
            "Scraped '{}' ({} paragraphs, {} sections)",
            article.title,
            article.paragraphs.len(),
            article.section_headers.len()
        );

        let payload = self.generator.generate(&article.full_text).await?;
        tracing::info!(
            "Generated {} questions for '{}'",
            payload.quiz_questions.len(),
            article.title
        );

        let record = self.store.insert(url, &article.title, &payload).await?;
        tracing::info!("Stored quiz record {}", record.id);

        Ok(record)
    }

    /// All stored quizzes, newest first.
    pub async fn history(&self) -> Result<Vec<QuizRecord>, QuizError> {
        self.store.list_all().await
    }
}
