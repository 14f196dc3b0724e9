/// Returns at most `max_chars` leading characters of `input` without splitting a code point.
pub fn truncate_chars(input: &str, max_chars: usize) -> &str {
    match input.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &input[..byte_idx],
        None => input,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shorter_input_is_untouched() {
        assert_eq!(truncate_chars("octopus", 50), "octopus");
    }

    #[test]
    fn cuts_at_character_boundary() {
        assert_eq!(truncate_chars("ééééé", 3), "ééé");
    }

    #[test]
    fn exact_length_is_untouched() {
        assert_eq!(truncate_chars("abc", 3), "abc");
    }
}
