//! # articlenav
//!
//! Blog article rendering with a scroll-synchronized table of contents.
//!
//! The pipeline runs from a post's Markdown to an ordered heading list, then
//! to HTML (or terminal rows) whose headings carry matching anchor ids, and
//! finally to a tracker that keeps one heading "active" while the reader
//! scrolls.
//!
//! ## Features
//!
//! - Line-based h1-h3 extraction with deterministic slug ids
//! - HTML rendering whose heading ids agree with the extracted list
//! - Two active-heading strategies (threshold scan, intersection band)
//! - Sidebar outline model with click-to-navigate
//! - Interactive terminal reader with live reload
//!
//! ## Example
//!
//! ```rust
//! use articlenav::{parse_markdown, TocTracker};
//! use articlenav::render::rendered_anchors;
//! use articlenav::toc::{LineViewport, StrategyKind};
//!
//! let markdown = format!(
//!     "# Introduction\n{}## Getting Started\nMore.\n",
//!     "Some content.\n".repeat(20)
//! );
//!
//! let doc = parse_markdown(&markdown);
//! assert_eq!(doc.headings[1].id, "getting-started");
//!
//! let rows = markdown.lines().count();
//! let viewport = LineViewport::new(&rendered_anchors(&markdown), rows, 10);
//! let mut tracker = TocTracker::new(StrategyKind::Threshold);
//! tracker.mount(doc.headings.clone(), &viewport);
//! assert_eq!(tracker.active_id(), "introduction");
//! ```

/// Persisted user preferences.
pub mod config;

/// Reading posts from files and stdin.
pub mod input;

/// Heading extraction and slugging.
pub mod parser;

/// Post records from the content API.
pub mod post;

/// Markdown to HTML with heading anchors.
pub mod render;

/// Active heading tracking.
pub mod toc;

/// Interactive terminal reader.
pub mod tui;

pub use config::Config;
pub use parser::{
    Document, HeadingDescriptor, HeadingLevel, extract_headings, parse_file, parse_markdown,
    slugify,
};
pub use post::Post;
pub use toc::TocTracker;
pub use tui::App;
