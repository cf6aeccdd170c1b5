//! Text shortening for list previews.

const ELLIPSIS: char = '…';

/// Shorten `text` to at most `max_chars` characters, replacing the tail with
/// an ellipsis when it had to be cut.
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    if max_chars == 0 {
        return String::new();
    }

    let mut shortened: String = text.chars().take(max_chars - 1).collect();
    shortened.push(ELLIPSIS);
    shortened
}

#[cfg(test)]
mod tests {
    use super::truncate_text;

    #[test]
    fn short_text_is_untouched() {
        assert_eq!(truncate_text("hello", 5), "hello");
        assert_eq!(truncate_text("", 3), "");
    }

    #[test]
    fn long_text_ends_with_ellipsis_within_limit() {
        let shortened = truncate_text("abcdefghij", 5);
        assert_eq!(shortened, "abcd…");
        assert_eq!(shortened.chars().count(), 5);
    }

    #[test]
    fn counts_characters_not_bytes() {
        assert_eq!(truncate_text("éééééé", 4), "ééé…");
    }
}
