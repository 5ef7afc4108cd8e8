//! Sidebar outline model.

use crate::parser::{HeadingDescriptor, HeadingLevel};
use serde::Serialize;

/// One row of the sidebar table of contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutlineEntry {
    pub text: String,
    pub level: HeadingLevel,
    /// Link target; `None` when the heading slugged to an empty id.
    pub anchor: Option<String>,
    pub active: bool,
    pub indent: usize,
}

impl OutlineEntry {
    pub fn is_navigable(&self) -> bool {
        self.anchor.is_some()
    }
}

/// Build the outline for `headings`, flagging entries whose id is `active_id`.
///
/// Duplicate ids mean several entries can be flagged at once; they all point
/// at the same element.
pub fn outline(headings: &[HeadingDescriptor], active_id: &str) -> Vec<OutlineEntry> {
    headings
        .iter()
        .map(|h| OutlineEntry {
            text: h.text.clone(),
            level: h.level,
            anchor: h.has_anchor().then(|| h.id.clone()),
            active: h.has_anchor() && h.id == active_id,
            indent: h.level.indent(),
        })
        .collect()
}

/// Render the outline as a nested Markdown link list.
///
/// Entries without an anchor are emitted as plain text.
pub fn to_markdown_list(entries: &[OutlineEntry]) -> String {
    let mut out = String::new();
    for entry in entries {
        out.push_str(&"  ".repeat(entry.indent - 1));
        match &entry.anchor {
            Some(anchor) => out.push_str(&format!("- [{}](#{})\n", entry.text, anchor)),
            None => out.push_str(&format!("- {}\n", entry.text)),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::extract_headings;

    #[test]
    fn test_outline_marks_active() {
        let headings = extract_headings("# Intro\n## Setup\n### Flags\n");
        let entries = outline(&headings, "setup");
        assert!(!entries[0].active);
        assert!(entries[1].active);
        assert_eq!(entries[2].indent, 2);
    }

    #[test]
    fn test_empty_id_is_not_navigable() {
        let headings = extract_headings("## ???\n## Real\n");
        let entries = outline(&headings, "");
        assert!(!entries[0].is_navigable());
        assert!(!entries[0].active);
        assert_eq!(entries[1].anchor.as_deref(), Some("real"));
    }

    #[test]
    fn test_markdown_list() {
        let headings = extract_headings("# Intro\n## Setup\n### Flags\n## !!!\n");
        let list = to_markdown_list(&outline(&headings, ""));
        assert_eq!(
            list,
            "- [Intro](#intro)\n- [Setup](#setup)\n  - [Flags](#flags)\n- !!!\n"
        );
    }

    #[test]
    fn test_empty_outline() {
        assert!(outline(&[], "").is_empty());
        assert_eq!(to_markdown_list(&[]), "");
    }
}
