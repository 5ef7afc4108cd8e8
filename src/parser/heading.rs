//! Heading descriptors produced by the extractor.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Heading depth indexed for the table of contents.
///
/// Only h1-h3 are instrumented with anchors by the renderer, so deeper
/// levels have no variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
}

impl HeadingLevel {
    /// Map a count of `#` characters to a level.
    pub fn from_depth(depth: usize) -> Option<Self> {
        match depth {
            1 => Some(Self::H1),
            2 => Some(Self::H2),
            3 => Some(Self::H3),
            _ => None,
        }
    }

    pub fn depth(self) -> usize {
        match self {
            Self::H1 => 1,
            Self::H2 => 2,
            Self::H3 => 3,
        }
    }

    /// HTML tag name for this level.
    pub fn tag(self) -> &'static str {
        match self {
            Self::H1 => "h1",
            Self::H2 => "h2",
            Self::H3 => "h3",
        }
    }

    /// Sidebar indentation step. h1 and h2 share the first step.
    pub fn indent(self) -> usize {
        match self {
            Self::H1 | Self::H2 => 1,
            Self::H3 => 2,
        }
    }
}

impl From<HeadingLevel> for u8 {
    fn from(level: HeadingLevel) -> Self {
        level.depth() as u8
    }
}

impl TryFrom<u8> for HeadingLevel {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_depth(value as usize)
            .ok_or_else(|| format!("heading level {value} is not indexed (expected 1-3)"))
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A heading extracted from article Markdown.
///
/// `id` is not unique across a document: headings with identical text share
/// an id, and text that slugs to nothing yields an empty id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingDescriptor {
    pub id: String,
    pub text: String,
    pub level: HeadingLevel,
}

impl HeadingDescriptor {
    /// Whether this heading can be linked to.
    pub fn has_anchor(&self) -> bool {
        !self.id.is_empty()
    }
}
