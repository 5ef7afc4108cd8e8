//! Non-interactive modes. Each report is built as a string so `main` only
//! has to print it.

mod commands;

pub use commands::{Cli, OutputFormat, StrategyArg};

use articlenav::parser::{Document, HeadingDescriptor, HeadingLevel};
use articlenav::render::{RenderOptions, render_html, rendered_anchors};
use articlenav::toc::{LineViewport, StrategyKind, TocTracker, outline, to_markdown_list};
use articlenav::Post;
use color_eyre::Result;
use serde::Serialize;

/// Headings selected by `--level` or `--filter`, all of them otherwise.
pub fn select_headings<'a>(args: &Cli, doc: &'a Document) -> Vec<&'a HeadingDescriptor> {
    if let Some(level) = args.level.and_then(|l| HeadingLevel::from_depth(l as usize)) {
        doc.headings_at_level(level)
    } else if let Some(ref filter) = args.filter {
        doc.filter_headings(filter)
    } else {
        doc.headings.iter().collect()
    }
}

pub fn list_headings(headings: &[&HeadingDescriptor], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Plain => Ok(headings
            .iter()
            .map(|h| {
                let anchor = if h.has_anchor() { h.id.as_str() } else { "-" };
                format!("{} {}  #{}\n", "#".repeat(h.level.depth()), h.text, anchor)
            })
            .collect()),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(headings)? + "\n"),
    }
}

pub fn table_of_contents(headings: &[&HeadingDescriptor], format: OutputFormat) -> Result<String> {
    let owned: Vec<HeadingDescriptor> = headings.iter().map(|h| (*h).clone()).collect();
    let entries = outline(&owned, "");
    match format {
        OutputFormat::Plain => Ok(to_markdown_list(&entries)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&entries)? + "\n"),
    }
}

pub fn html(post: &Post, options: &RenderOptions) -> String {
    render_html(&post.content, options)
}

#[derive(Debug, Serialize)]
struct PostInfo<'a> {
    title: &'a str,
    slug: &'a str,
    published: &'a str,
    words: usize,
    read_time_minutes: usize,
    tags: Vec<&'a str>,
    comments: usize,
    headings: usize,
    duplicate_ids: Vec<&'a str>,
}

pub fn info(post: &Post, doc: &Document, format: OutputFormat) -> Result<String> {
    let info = PostInfo {
        title: &post.title,
        slug: &post.slug,
        published: post.published_date(),
        words: post.word_count(),
        read_time_minutes: post.read_time_minutes(),
        tags: post.tags.iter().map(|t| t.name.as_str()).collect(),
        comments: post.total_comments(),
        headings: doc.headings.len(),
        duplicate_ids: doc.duplicate_ids(),
    };

    if format == OutputFormat::Json {
        return Ok(serde_json::to_string_pretty(&info)? + "\n");
    }

    let mut out = format!("{}\n", info.title);
    if !info.published.is_empty() {
        out.push_str(&format!("Published: {}\n", info.published));
    }
    out.push_str(&format!(
        "Read time: {} min ({} words)\n",
        info.read_time_minutes, info.words
    ));
    if !info.tags.is_empty() {
        out.push_str(&format!("Tags: {}\n", info.tags.join(", ")));
    }
    out.push_str(&format!("Comments: {}\n", info.comments));
    out.push_str(&format!("Headings: {}\n", info.headings));
    if !info.duplicate_ids.is_empty() {
        out.push_str(&format!(
            "Duplicate anchors: {}\n",
            info.duplicate_ids.join(", ")
        ));
    }
    Ok(out)
}

pub fn heading_counts(doc: &Document, format: OutputFormat) -> Result<String> {
    let counts = doc.level_counts();

    if format == OutputFormat::Json {
        let map: serde_json::Map<String, serde_json::Value> = counts
            .iter()
            .map(|(level, n)| (level.tag().to_string(), (*n).into()))
            .collect();
        return Ok(serde_json::to_string_pretty(&map)? + "\n");
    }

    let mut out = String::from("Heading counts:\n");
    for (level, count) in counts {
        if count > 0 {
            out.push_str(&format!("  {}: {}\n", "#".repeat(level.depth()), count));
        }
    }
    out.push_str(&format!("\nTotal: {}\n", doc.headings.len()));
    Ok(out)
}

#[derive(Debug, Serialize)]
struct ActiveHeading<'a> {
    row: usize,
    strategy: StrategyKind,
    active_id: &'a str,
    text: Option<&'a str>,
}

/// Scroll a line viewport of `visible_rows` to `row` and report the heading
/// the tracker activates.
pub fn active_at(
    post: &Post,
    doc: &Document,
    row: usize,
    visible_rows: usize,
    strategy: StrategyKind,
    format: OutputFormat,
) -> Result<String> {
    let total_rows = post.content.lines().count();
    let mut viewport = LineViewport::new(&rendered_anchors(&post.content), total_rows, visible_rows);
    viewport.scroll_to(row);

    let mut tracker = TocTracker::new(strategy);
    tracker.mount(doc.headings.clone(), &viewport);

    let active = ActiveHeading {
        row: viewport.scroll_row(),
        strategy,
        active_id: tracker.active_id(),
        text: tracker.active_heading().map(|h| h.text.as_str()),
    };

    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&active)? + "\n"),
        OutputFormat::Plain => Ok(match active.text {
            Some(text) => format!("{}\t{}\n", active.active_id, text),
            None => "(none)\n".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use articlenav::parse_markdown;
    use clap::Parser;

    const ARTICLE: &str = "# Intro\n\nHello there.\n\n## Setup\n\nInstall it.\n\n### Flags\n\n## ???\n";

    fn args(extra: &[&str]) -> Cli {
        let mut argv = vec!["articlenav"];
        argv.extend_from_slice(extra);
        argv.push("post.md");
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_list_plain() {
        let doc = parse_markdown(ARTICLE);
        let out = list_headings(&select_headings(&args(&["-l"]), &doc), OutputFormat::Plain).unwrap();
        assert_eq!(
            out,
            "# Intro  #intro\n## Setup  #setup\n### Flags  #flags\n## ???  #-\n"
        );
    }

    #[test]
    fn test_list_json_uses_numeric_levels() {
        let doc = parse_markdown(ARTICLE);
        let headings = select_headings(&args(&["-l", "-L", "3"]), &doc);
        let out = list_headings(&headings, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value[0]["id"], "flags");
        assert_eq!(value[0]["level"], 3);
    }

    #[test]
    fn test_toc_plain() {
        let doc = parse_markdown(ARTICLE);
        let headings = select_headings(&args(&["--toc"]), &doc);
        let out = table_of_contents(&headings, OutputFormat::Plain).unwrap();
        assert_eq!(
            out,
            "- [Intro](#intro)\n- [Setup](#setup)\n  - [Flags](#flags)\n- ???\n"
        );
    }

    #[test]
    fn test_counts() {
        let doc = parse_markdown(ARTICLE);
        let out = heading_counts(&doc, OutputFormat::Plain).unwrap();
        assert_eq!(out, "Heading counts:\n  #: 1\n  ##: 2\n  ###: 1\n\nTotal: 4\n");
    }

    #[test]
    fn test_info_reports_duplicates() {
        let post = Post::from_markdown(None, "# Notes\n## Setup\n## Setup\n".to_string());
        let doc = parse_markdown(&post.content);
        let out = info(&post, &doc, OutputFormat::Plain).unwrap();
        assert!(out.starts_with("Notes\n"));
        assert!(out.contains("Read time: 1 min (6 words)\n"));
        assert!(out.contains("Duplicate anchors: setup\n"));
    }

    #[test]
    fn test_active_at() {
        let mut content = String::from("# Intro\n");
        content.push_str(&"text\n".repeat(30));
        content.push_str("## Setup\n");
        content.push_str(&"text\n".repeat(60));
        let post = Post::from_markdown(None, content);
        let doc = parse_markdown(&post.content);

        let top = active_at(&post, &doc, 0, 20, StrategyKind::Threshold, OutputFormat::Plain)
            .unwrap();
        assert_eq!(top, "intro\tIntro\n");

        // "## Setup" is row 31; at scroll 30 it sits 24px below the top
        let out = active_at(&post, &doc, 30, 20, StrategyKind::Threshold, OutputFormat::Plain)
            .unwrap();
        assert_eq!(out, "setup\tSetup\n");
    }

    #[test]
    fn test_active_at_empty_post() {
        let post = Post::from_markdown(None, "just text\n".to_string());
        let doc = parse_markdown(&post.content);
        let out = active_at(&post, &doc, 5, 20, StrategyKind::Intersection, OutputFormat::Plain)
            .unwrap();
        assert_eq!(out, "(none)\n");
    }
}
