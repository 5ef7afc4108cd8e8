//! Markdown heading extraction.
//!
//! This module turns raw article Markdown into the ordered heading list that
//! drives the table of contents. Matching is line based; see
//! [`utils::match_heading_line`] for the exact pattern.

mod document;
pub mod heading;
pub mod slug;
pub mod utils;

pub use document::Document;
pub use heading::{HeadingDescriptor, HeadingLevel};
pub use slug::slugify;

use std::path::Path;

/// Extract h1-h3 headings from article Markdown, in line order.
///
/// Every line matching the heading pattern yields a descriptor whose id is
/// the slug of its text. The text is the remainder as the renderer displays
/// it (see [`utils::plain_heading_text`]), so ids agree with the rendered
/// anchors. Ids are not deduplicated. Lines inside code fences are not
/// special-cased.
///
/// # Examples
///
/// ```
/// use articlenav::parser::{extract_headings, HeadingLevel};
///
/// let headings = extract_headings("# Title\n\nSome text\n## Sub Heading\n");
/// assert_eq!(headings.len(), 2);
/// assert_eq!(headings[1].id, "sub-heading");
/// assert_eq!(headings[1].level, HeadingLevel::H2);
/// ```
pub fn extract_headings(markdown: &str) -> Vec<HeadingDescriptor> {
    markdown
        .lines()
        .filter_map(utils::match_heading_line)
        .filter_map(|(depth, rest)| {
            let level = HeadingLevel::from_depth(depth)?;
            let text = utils::plain_heading_text(depth, rest);
            let id = slugify(&text);
            Some(HeadingDescriptor { id, text, level })
        })
        .collect()
}

/// Parse a markdown file and extract its structure.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn parse_file(path: &Path) -> std::io::Result<Document> {
    let content = std::fs::read_to_string(path)?;
    Ok(parse_markdown(&content))
}

/// Parse markdown content and extract its headings.
pub fn parse_markdown(content: &str) -> Document {
    let headings = extract_headings(content);
    tracing::debug!(count = headings.len(), "extracted headings");

    let document = Document::new(content.to_string(), headings);
    let duplicates = document.duplicate_ids();
    if !duplicates.is_empty() {
        tracing::debug!(?duplicates, "headings share anchor ids");
    }
    document
}
