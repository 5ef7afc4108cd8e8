//! Utility functions for markdown parsing.
//!
//! Shared helper functions used across the parser module.

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};
use regex::Regex;
use std::sync::OnceLock;

/// CommonMark extensions shared by heading extraction and rendering.
pub(crate) fn markdown_options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options
}

/// Join the visible text of a heading's inner events, stopping at the
/// heading's end tag.
///
/// Text and inline code contribute; markup, link targets and raw HTML do not.
/// Both heading ids and outline text come from this, so whatever the
/// renderer shows is what gets slugged.
pub(crate) fn heading_text<'e>(events: impl IntoIterator<Item = Event<'e>>) -> String {
    let mut text = String::new();
    for event in events {
        match event {
            Event::End(TagEnd::Heading(_)) => break,
            Event::Text(t) | Event::Code(t) => text.push_str(&t),
            _ => {}
        }
    }
    text
}

/// Plain text of a heading line's remainder, as a CommonMark renderer shows
/// it: emphasis, links, escapes and entities are resolved and a closing `#`
/// sequence is dropped.
///
/// # Examples
///
/// ```
/// # use articlenav::parser::utils::plain_heading_text;
/// assert_eq!(plain_heading_text(2, "**Bold** [docs](https://example.com)"), "Bold docs");
/// assert_eq!(plain_heading_text(2, r"Use \_private\_ names"), "Use _private_ names");
/// assert_eq!(plain_heading_text(1, "Q&amp;A ##"), "Q&A");
/// ```
pub fn plain_heading_text(depth: usize, rest: &str) -> String {
    // Re-prefix with a plain space so the remainder always parses as a heading
    let source = format!("{} {}", "#".repeat(depth), rest);
    let events = Parser::new_ext(&source, markdown_options())
        .skip_while(|event| !matches!(event, Event::Start(Tag::Heading { .. })))
        .skip(1);
    heading_text(events).trim().to_string()
}

/// Match a single line against the table-of-contents heading pattern.
///
/// Accepts up to three leading spaces, one to three `#`, at least one
/// whitespace character, then the heading text. Returns the `#` count and the
/// raw remainder. This is a line-level match: a `#` line inside a fenced code
/// block matches too.
///
/// # Examples
///
/// ```
/// # use articlenav::parser::utils::match_heading_line;
/// assert_eq!(match_heading_line("## Section"), Some((2, "Section")));
/// assert_eq!(match_heading_line("#### Deep"), None);
/// assert_eq!(match_heading_line("#NoSpace"), None);
/// ```
pub fn match_heading_line(line: &str) -> Option<(usize, &str)> {
    static HEADING: OnceLock<Regex> = OnceLock::new();
    let heading = HEADING.get_or_init(|| Regex::new(r"^\s{0,3}(#{1,3})\s+(.*)$").unwrap());

    let caps = heading.captures(line)?;
    let hashes = caps.get(1)?.as_str().len();
    let rest = caps.get(2).map_or("", |m| m.as_str());
    Some((hashes, rest))
}
