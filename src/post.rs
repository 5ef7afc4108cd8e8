//! Blog post records as served by the content API.
//!
//! The core only reads these. Everything except `content` defaults when the
//! API omits it, so trimmed-down fixtures deserialize too.

use crate::parser::{HeadingLevel, extract_headings, slugify};
use serde::{Deserialize, Serialize};

/// Reading speed used for the "N min read" estimate.
pub const WORDS_PER_MINUTE: usize = 200;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    #[serde(default)]
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub slug: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub post: Option<u64>,
    pub author_name: String,
    pub body: String,
    #[serde(default)]
    pub created_at: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment_count: Option<usize>,
}

impl Post {
    /// Wrap raw Markdown in a post.
    ///
    /// The title is the first h1 in the content, then `fallback_title`, then
    /// `"Untitled"`.
    pub fn from_markdown(fallback_title: Option<&str>, content: String) -> Self {
        let title = extract_headings(&content)
            .into_iter()
            .find(|h| h.level == HeadingLevel::H1)
            .map(|h| h.text)
            .or_else(|| fallback_title.map(str::to_string))
            .unwrap_or_else(|| "Untitled".to_string());

        Self {
            slug: slugify(&title),
            title,
            content,
            ..Self::default()
        }
    }

    pub fn word_count(&self) -> usize {
        self.content.split_whitespace().count()
    }

    /// Estimated reading time, never below one minute.
    pub fn read_time_minutes(&self) -> usize {
        self.word_count().max(1).div_ceil(WORDS_PER_MINUTE)
    }

    /// Date part of `created_at` (`2024-03-01T10:00:00Z` -> `2024-03-01`).
    pub fn published_date(&self) -> &str {
        self.created_at
            .split_once('T')
            .map_or(self.created_at.as_str(), |(date, _)| date)
    }

    /// Number of comments, preferring the API's count when present.
    pub fn total_comments(&self) -> usize {
        self.comment_count.unwrap_or(self.comments.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const API_JSON: &str = r#"{
        "id": 7,
        "title": "Shipping a Portfolio",
        "slug": "shipping-a-portfolio",
        "content": "Intro\n\n## Stack\n\nDjango and React.",
        "tags": [{"id": 1, "name": "web", "slug": "web"}],
        "comments": [
            {"id": 3, "post": 7, "author_name": "Jane Doe", "body": "Great article...", "created_at": "2024-05-02T08:00:00Z"}
        ],
        "is_active": true,
        "created_at": "2024-05-01T12:30:00.123456Z",
        "comment_count": 1
    }"#;

    #[test]
    fn test_deserialize_api_post() {
        let post: Post = serde_json::from_str(API_JSON).unwrap();
        assert_eq!(post.id, 7);
        assert_eq!(post.tags[0].name, "web");
        assert_eq!(post.comments[0].author_name, "Jane Doe");
        assert_eq!(post.published_date(), "2024-05-01");
        assert_eq!(post.total_comments(), 1);
    }

    #[test]
    fn test_minimal_post() {
        let post: Post = serde_json::from_str(r##"{"content": "# Hi"}"##).unwrap();
        assert!(post.tags.is_empty());
        assert!(post.comments.is_empty());
        assert_eq!(post.published_date(), "");
    }

    #[test]
    fn test_read_time() {
        let mut post = Post::default();
        assert_eq!(post.read_time_minutes(), 1);

        post.content = "word ".repeat(200);
        assert_eq!(post.read_time_minutes(), 1);

        post.content = "word ".repeat(201);
        assert_eq!(post.read_time_minutes(), 2);
    }

    #[test]
    fn test_from_markdown_title() {
        let post = Post::from_markdown(Some("notes"), "Intro\n## Part\n# Real Title\n".to_string());
        assert_eq!(post.title, "Real Title");
        assert_eq!(post.slug, "real-title");

        let post = Post::from_markdown(Some("notes"), "## Only h2\n".to_string());
        assert_eq!(post.title, "notes");

        let post = Post::from_markdown(None, String::new());
        assert_eq!(post.title, "Untitled");
    }
}
