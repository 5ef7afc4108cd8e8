use super::heading::{HeadingDescriptor, HeadingLevel};
use serde::Serialize;

/// Article Markdown together with its extracted headings.
#[derive(Debug, Clone, Serialize)]
pub struct Document {
    #[serde(skip)]
    pub content: String,
    pub headings: Vec<HeadingDescriptor>,
}

impl Document {
    pub fn new(content: String, headings: Vec<HeadingDescriptor>) -> Self {
        Self { content, headings }
    }

    /// Find the first heading whose text matches exactly.
    pub fn find_heading(&self, text: &str) -> Option<&HeadingDescriptor> {
        self.headings.iter().find(|h| h.text == text)
    }

    pub fn headings_at_level(&self, level: HeadingLevel) -> Vec<&HeadingDescriptor> {
        self.headings.iter().filter(|h| h.level == level).collect()
    }

    /// Headings whose text contains `pattern`, case-insensitively.
    pub fn filter_headings(&self, pattern: &str) -> Vec<&HeadingDescriptor> {
        let needle = pattern.to_lowercase();
        self.headings
            .iter()
            .filter(|h| h.text.to_lowercase().contains(&needle))
            .collect()
    }

    /// Non-empty ids carried by more than one heading, in first-seen order.
    ///
    /// Only the first element with such an id can be scrolled to.
    pub fn duplicate_ids(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        let mut duplicates: Vec<&str> = Vec::new();
        for heading in self.headings.iter().filter(|h| h.has_anchor()) {
            let id = heading.id.as_str();
            if seen.contains(&id) {
                if !duplicates.contains(&id) {
                    duplicates.push(id);
                }
            } else {
                seen.push(id);
            }
        }
        duplicates
    }

    /// Count headings per level, h1 first.
    pub fn level_counts(&self) -> [(HeadingLevel, usize); 3] {
        let count = |level| self.headings.iter().filter(|h| h.level == level).count();
        [
            (HeadingLevel::H1, count(HeadingLevel::H1)),
            (HeadingLevel::H2, count(HeadingLevel::H2)),
            (HeadingLevel::H3, count(HeadingLevel::H3)),
        ]
    }
}
