// src/services/scraper.rs

use std::time::Duration;

use reqwest::Client;
use scraper::{ElementRef, Html, Selector};

use crate::{
    config::Config,
    error::QuizError,
    models::article::ScrapedDocument,
    utils::html::{char_len, element_text},
};

pub const MAX_PARAGRAPHS: usize = 10;
pub const MIN_PARAGRAPH_CHARS: usize = 50;
pub const UNKNOWN_TITLE: &str = "Unknown Title";

/// Section titles that are page furniture rather than article content.
const SKIPPED_HEADERS: [&str; 5] = [
    "contents",
    "see also",
    "references",
    "external links",
    "navigation menu",
];

/// Fetches wiki article pages and reduces them to a `ScrapedDocument`.
#[derive(Clone)]
pub struct ArticleScraper {
    http: Client,
}

impl ArticleScraper {
    pub fn new(config: &Config) -> Result<Self, QuizError> {
        let http = Client::builder()
            .user_agent(config.scraper_user_agent.as_str())
            .timeout(Duration::from_secs(config.scraper_timeout_secs))
            .build()
            .map_err(|e| QuizError::Fetch(e.to_string()))?;

        Ok(Self { http })
    }

    /// Downloads `url` once and extracts the article. No retries.
    pub async fn scrape(&self, url: &str) -> Result<ScrapedDocument, QuizError> {
        let html = self.fetch(url).await?;
        parse_article(&html)
    }

    async fn fetch(&self, url: &str) -> Result<String, QuizError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .and_then(|res| res.error_for_status())
            .map_err(|e| {
                tracing::warn!("Failed to fetch {}: {}", url, e);
                QuizError::Fetch(e.to_string())
            })?;

        response
            .text()
            .await
            .map_err(|e| QuizError::Fetch(e.to_string()))
    }
}

/// Extracts title, paragraphs and section headers from article markup.
///
/// Fails with `ContentNotFound` when the page has no `div.mw-parser-output`.
/// A missing title heading is not an error; it falls back to `"Unknown Title"`.
/// A heading that is present but empty yields an empty title.
pub fn parse_article(html: &str) -> Result<ScrapedDocument, QuizError> {
    let document = Html::parse_document(html);

    let title_sel = selector("h1.firstHeading")?;
    let content_sel = selector("div.mw-parser-output")?;

    let title = document
        .select(&title_sel)
        .next()
        .map(element_text)
        .unwrap_or_else(|| UNKNOWN_TITLE.to_string());

    let content = document
        .select(&content_sel)
        .next()
        .ok_or(QuizError::ContentNotFound)?;

    let paragraphs = collect_paragraphs(content)?;
    let section_headers = collect_section_headers(content)?;

    tracing::debug!(
        "Extracted '{}': {} paragraphs, {} sections",
        title,
        paragraphs.len(),
        section_headers.len()
    );

    Ok(ScrapedDocument::new(title, paragraphs, section_headers))
}

/// Two passes: direct `<p>` children first, then any nested `<p>` to fill the quota.
fn collect_paragraphs(content: ElementRef<'_>) -> Result<Vec<String>, QuizError> {
    let mut paragraphs = Vec::with_capacity(MAX_PARAGRAPHS);

    for p in content
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|el| el.value().name() == "p")
    {
        let text = element_text(p);
        if char_len(&text) > MIN_PARAGRAPH_CHARS {
            paragraphs.push(text);
            if paragraphs.len() >= MAX_PARAGRAPHS {
                return Ok(paragraphs);
            }
        }
    }

    let p_sel = selector("p")?;
    for p in content.select(&p_sel) {
        let text = element_text(p);
        if char_len(&text) > MIN_PARAGRAPH_CHARS && !paragraphs.contains(&text) {
            paragraphs.push(text);
            if paragraphs.len() >= MAX_PARAGRAPHS {
                break;
            }
        }
    }

    Ok(paragraphs)
}

/// Labels of every `<h2>` under the content container, boilerplate excluded.
///
/// The label is read from `span.mw-headline`. Current MediaWiki skins drop that span and
/// put the text directly in the heading, in which case the heading text is used.
fn collect_section_headers(content: ElementRef<'_>) -> Result<Vec<String>, QuizError> {
    let h2_sel = selector("h2")?;
    let headline_sel = selector("span.mw-headline")?;

    let headers = content
        .select(&h2_sel)
        .filter_map(|h2| {
            let label = match h2.select(&headline_sel).next() {
                Some(span) => element_text(span),
                None => element_text(h2),
            };
            (!label.is_empty()).then_some(label)
        })
        .filter(|label| !SKIPPED_HEADERS.contains(&label.to_lowercase().as_str()))
        .collect();

    Ok(headers)
}

fn selector(css: &str) -> Result<Selector, QuizError> {
    Selector::parse(css).map_err(|e| QuizError::Parse(e.to_string()))
}
