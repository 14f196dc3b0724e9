// src/models/article.rs

use serde::Serialize;

/// The normalized slice of an article that the quiz is generated from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScrapedDocument {
    pub title: String,

    /// At most ten paragraphs, each longer than fifty characters.
    pub paragraphs: Vec<String>,

    /// Second-level section titles, boilerplate sections excluded.
    pub section_headers: Vec<String>,

    /// Title, paragraphs and `## ` prefixed headers joined into the model input.
    pub full_text: String,
}

impl ScrapedDocument {
    pub fn new(title: String, paragraphs: Vec<String>, section_headers: Vec<String>) -> Self {
        let full_text = assemble_full_text(&title, &paragraphs, &section_headers);
        Self {
            title,
            paragraphs,
            section_headers,
            full_text,
        }
    }
}

fn assemble_full_text(title: &str, paragraphs: &[String], headers: &[String]) -> String {
    let paragraphs_text = paragraphs.join("\n\n");
    let headers_text = headers
        .iter()
        .map(|h| format!("## {}", h))
        .collect::<Vec<_>>()
        .join("\n");

    format!("{}\n\n{}\n\n{}", title, paragraphs_text, headers_text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_text_layout() {
        let doc = ScrapedDocument::new(
            "Octopus".to_string(),
            vec!["First.".to_string(), "Second.".to_string()],
            vec!["Anatomy".to_string(), "Behaviour".to_string()],
        );
        assert_eq!(
            doc.full_text,
            "Octopus\n\nFirst.\n\nSecond.\n\n## Anatomy\n## Behaviour"
        );
    }

    #[test]
    fn full_text_without_headers_keeps_separators() {
        let doc = ScrapedDocument::new("Octopus".to_string(), vec!["Only.".to_string()], vec![]);
        assert_eq!(doc.full_text, "Octopus\n\nOnly.\n\n");
    }
}
