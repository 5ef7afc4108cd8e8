//! Article rendering with anchored headings.
//!
//! Headings h1-h3 receive an `id` computed by [`slugify`] over their rendered
//! text, the same function the extractor uses. If the two ever disagreed,
//! outline links would silently stop resolving.

use crate::parser::utils::{heading_text, markdown_options};
use crate::parser::{HeadingLevel, slugify};
use pulldown_cmark::{CowStr, Event, HeadingLevel as CmarkLevel, Parser, Tag};
use serde::Serialize;

/// Rendering switches.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Prefix for image sources that are not absolute `http(s)` URLs.
    pub asset_base_url: Option<String>,
}

/// A heading element the renderer tagged with an anchor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedAnchor {
    pub id: String,
    pub level: HeadingLevel,
    /// 0-based source line the heading starts on.
    pub line: usize,
}

fn indexed_level(level: CmarkLevel) -> Option<HeadingLevel> {
    match level {
        CmarkLevel::H1 => Some(HeadingLevel::H1),
        CmarkLevel::H2 => Some(HeadingLevel::H2),
        CmarkLevel::H3 => Some(HeadingLevel::H3),
        _ => None,
    }
}

fn absolutize<'a>(url: CowStr<'a>, base: &str) -> CowStr<'a> {
    if url.starts_with("http://") || url.starts_with("https://") || url.starts_with("data:") {
        return url;
    }
    let joined = format!(
        "{}/{}",
        base.trim_end_matches('/'),
        url.trim_start_matches('/')
    );
    CowStr::from(joined)
}

/// Render article Markdown to HTML.
///
/// # Examples
///
/// ```
/// use articlenav::render::{RenderOptions, render_html};
///
/// let html = render_html("## Sub Heading", &RenderOptions::default());
/// assert_eq!(html, "<h2 id=\"sub-heading\">Sub Heading</h2>\n");
/// ```
pub fn render_html(markdown: &str, options: &RenderOptions) -> String {
    let mut events: Vec<Event<'_>> = Parser::new_ext(markdown, markdown_options()).collect();

    for i in 0..events.len() {
        let anchor = match &events[i] {
            Event::Start(Tag::Heading { level, id: None, .. }) if indexed_level(*level).is_some() => {
                Some(slugify(&heading_text(events[i + 1..].iter().cloned())))
            }
            _ => None,
        };
        if let Some(anchor) = anchor.filter(|a| !a.is_empty()) {
            if let Event::Start(Tag::Heading { id, .. }) = &mut events[i] {
                *id = Some(CowStr::from(anchor));
            }
        }
    }

    let events = events.into_iter().map(|event| match (event, &options.asset_base_url) {
        (
            Event::Start(Tag::Image {
                link_type,
                dest_url,
                title,
                id,
            }),
            Some(base),
        ) => Event::Start(Tag::Image {
            link_type,
            dest_url: absolutize(dest_url, base),
            title,
            id,
        }),
        (event, _) => event,
    });

    let mut html = String::with_capacity(markdown.len() * 3 / 2);
    pulldown_cmark::html::push_html(&mut html, events);
    html
}

/// List the anchored headings the renderer would emit, with source lines.
///
/// Headings inside code blocks are not headings to a CommonMark parser, so
/// they are absent here even though the line-based extractor reports them.
pub fn rendered_anchors(markdown: &str) -> Vec<RenderedAnchor> {
    let events: Vec<(Event<'_>, std::ops::Range<usize>)> =
        Parser::new_ext(markdown, markdown_options())
            .into_offset_iter()
            .collect();

    let mut anchors = Vec::new();
    for (i, (event, range)) in events.iter().enumerate() {
        let Event::Start(Tag::Heading { level, .. }) = event else {
            continue;
        };
        let Some(level) = indexed_level(*level) else {
            continue;
        };
        let id = slugify(&heading_text(events[i + 1..].iter().map(|(e, _)| e.clone())));
        if id.is_empty() {
            continue;
        }
        let line = markdown[..range.start].matches('\n').count();
        anchors.push(RenderedAnchor { id, level, line });
    }
    anchors
}
