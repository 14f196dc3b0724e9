use scraper::ElementRef;

/// Visible text of an element with whitespace runs collapsed to single spaces.
///
/// Text nodes are concatenated in document order, so inline markup such as
/// `<b>`, `<a>` or `<sup>` contributes its text without extra separators.
/// Whitespace between and inside nodes is kept as a single space rather than
/// stripped per node, so `The <a>octopus</a> is` reads "The octopus is" (not
/// "Theoctopusis") and those spaces count toward the paragraph length filter.
pub fn element_text(element: ElementRef<'_>) -> String {
    collapse_whitespace(&element.text().collect::<String>())
}

pub fn collapse_whitespace(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Length in characters (not bytes), used by the paragraph length filter.
pub fn char_len(input: &str) -> usize {
    input.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    #[test]
    fn inline_markup_is_flattened() {
        let html = Html::parse_fragment("<p>The <b>common\n octopus</b> is  a <a href=\"#\">mollusc</a>.</p>");
        let selector = Selector::parse("p").unwrap();
        let p = html.select(&selector).next().unwrap();
        assert_eq!(element_text(p), "The common octopus is a mollusc.");
    }

    #[test]
    fn char_len_counts_unicode_scalars() {
        assert_eq!(char_len("Kraków"), 6);
    }
}
