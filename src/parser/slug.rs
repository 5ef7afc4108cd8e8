//! Anchor slug generation.
//!
//! The extractor and the renderer must both call [`slugify`]; anchor links in
//! the outline only resolve when the two agree on every heading.

use regex::Regex;
use std::sync::OnceLock;

/// Generate an anchor-safe slug from heading text.
///
/// Lowercases and trims the text, turns whitespace runs into a single
/// hyphen, drops everything that is not an ASCII word character or hyphen,
/// then collapses repeated hyphens.
///
/// # Examples
///
/// ```
/// use articlenav::parser::slug::slugify;
///
/// assert_eq!(slugify("Hello World"), "hello-world");
/// assert_eq!(slugify("Tips & Tricks"), "tips-tricks");
/// assert_eq!(slugify("?!"), "");
/// ```
pub fn slugify(text: &str) -> String {
    static WHITESPACE: OnceLock<Regex> = OnceLock::new();
    static NON_WORD: OnceLock<Regex> = OnceLock::new();
    static HYPHENS: OnceLock<Regex> = OnceLock::new();

    let whitespace = WHITESPACE.get_or_init(|| Regex::new(r"\s+").unwrap());
    let non_word = NON_WORD.get_or_init(|| Regex::new(r"[^A-Za-z0-9_\-]+").unwrap());
    let hyphens = HYPHENS.get_or_init(|| Regex::new(r"-{2,}").unwrap());

    let lowered = text.to_lowercase();
    let hyphenated = whitespace.replace_all(lowered.trim(), "-");
    let stripped = non_word.replace_all(&hyphenated, "");
    hyphens.replace_all(&stripped, "-").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Title"), "title");
        assert_eq!(slugify("Sub Heading"), "sub-heading");
        assert_eq!(slugify("1. Getting Started"), "1-getting-started");
        assert_eq!(slugify("  padded   text  "), "padded-text");
        assert_eq!(slugify("snake_case stays"), "snake_case-stays");
    }

    #[test]
    fn test_punctuation_collapses_hyphens() {
        assert_eq!(slugify("a & b"), "a-b");
        assert_eq!(slugify("What's new?"), "whats-new");
        assert_eq!(slugify("one -- two"), "one-two");
    }

    #[test]
    fn test_non_ascii_letters_are_dropped() {
        assert_eq!(slugify("Café au lait"), "caf-au-lait");
        assert_eq!(slugify("日本語"), "");
    }

    #[test]
    fn test_empty_slug() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("!!!"), "");
        assert_eq!(slugify("   "), "");
    }

    #[test]
    fn test_idempotent() {
        for input in [
            "Sub Heading",
            "a & b",
            "What's new?",
            "-leading and trailing-",
            "Mixed_CASE words 42",
        ] {
            let once = slugify(input);
            assert_eq!(slugify(&once), once, "slug of {input:?} changed on reapply");
        }
    }
}
