use crate::config::Config;
use crate::input::{self, InputError, InputSource};
use crate::parser::utils::match_heading_line;
use crate::parser::{Document, HeadingLevel, parse_markdown};
use crate::post::Post;
use crate::render::rendered_anchors;
use crate::toc::{
    Dispatch, LineViewport, OutlineEntry, StrategyKind, Subscription, TocEvent, TocTracker,
};
use crate::tui::theme::Theme;
use ratatui::widgets::ListState;
use std::time::{Duration, Instant};

/// How long status messages stay in the status bar.
const STATUS_TTL: Duration = Duration::from_secs(3);

const MIN_OUTLINE_WIDTH: u16 = 15;
const MAX_OUTLINE_WIDTH: u16 = 50;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Focus {
    Outline,
    Content,
}

/// How a row of the article pane is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RowKind {
    Body,
    Heading(HeadingLevel),
    Code,
    Discussion,
}

#[derive(Debug, Clone)]
pub struct Row {
    pub kind: RowKind,
    pub text: String,
}

pub struct App {
    pub source: InputSource,
    pub post: Post,
    pub document: Document,
    pub rows: Vec<Row>,
    pub viewport: LineViewport,
    pub tracker: TocTracker,
    subscription: Subscription,
    pub outline_state: ListState,
    pub focus: Focus,
    pub show_outline: bool,
    pub outline_width: u16,
    pub show_help: bool,
    pub help_scroll: u16,
    pub theme: Theme,
    status: Option<(String, Instant)>,
    config: Config,
}

/// Lay the post out one source line per row, followed by its comments.
fn layout_rows(post: &Post) -> Vec<Row> {
    let mut rows = Vec::new();
    let mut in_fence = false;

    for line in post.content.lines() {
        let trimmed = line.trim_start();
        let kind = if trimmed.starts_with("```") || trimmed.starts_with("~~~") {
            in_fence = !in_fence;
            RowKind::Code
        } else if in_fence {
            RowKind::Code
        } else if let Some(level) =
            match_heading_line(line).and_then(|(depth, _)| HeadingLevel::from_depth(depth))
        {
            RowKind::Heading(level)
        } else {
            RowKind::Body
        };
        rows.push(Row {
            kind,
            text: line.to_string(),
        });
    }

    if !post.comments.is_empty() {
        rows.push(Row {
            kind: RowKind::Body,
            text: String::new(),
        });
        rows.push(Row {
            kind: RowKind::Discussion,
            text: format!("Discussion ({})", post.comments.len()),
        });
        for comment in &post.comments {
            let date = comment
                .created_at
                .split_once('T')
                .map_or(comment.created_at.as_str(), |(d, _)| d);
            rows.push(Row {
                kind: RowKind::Discussion,
                text: format!("  {} · {}", comment.author_name, date),
            });
            for line in comment.body.lines() {
                rows.push(Row {
                    kind: RowKind::Body,
                    text: format!("    {line}"),
                });
            }
        }
    }

    rows
}

impl App {
    pub fn new(post: Post, source: InputSource, config: Config, strategy: StrategyKind) -> Self {
        let theme = Theme::default().with_custom_colors(&config.theme);
        let document = parse_markdown(&post.content);
        let rows = layout_rows(&post);
        let viewport = LineViewport::new(&rendered_anchors(&post.content), rows.len(), 0);

        let mut tracker = TocTracker::new(strategy);
        let subscription = tracker.mount(document.headings.clone(), &viewport);

        let mut app = Self {
            source,
            post,
            document,
            rows,
            viewport,
            tracker,
            subscription,
            outline_state: ListState::default(),
            focus: Focus::Content,
            show_outline: config.ui.show_outline,
            outline_width: config
                .ui
                .outline_width
                .clamp(MIN_OUTLINE_WIDTH, MAX_OUTLINE_WIDTH),
            show_help: false,
            help_scroll: 0,
            theme,
            status: None,
            config,
        };
        app.sync_outline_selection();
        app
    }

    /// Swap in a post, replacing the heading list before any new tracking
    /// event fires. The scroll row is kept when it is still in range.
    pub fn show_post(&mut self, post: Post) {
        let scroll_row = self.viewport.scroll_row();
        let visible_rows = self.viewport.visible_rows();

        self.tracker.unmount();

        self.document = parse_markdown(&post.content);
        self.rows = layout_rows(&post);
        self.post = post;
        self.viewport = LineViewport::new(
            &rendered_anchors(&self.post.content),
            self.rows.len(),
            visible_rows,
        );
        self.viewport.scroll_to(scroll_row);

        self.subscription = self
            .tracker
            .mount(self.document.headings.clone(), &self.viewport);
        self.outline_state = ListState::default();
        self.sync_outline_selection();
    }

    /// Re-read the post from its source file.
    pub fn reload(&mut self) -> Result<(), InputError> {
        if matches!(self.source, InputSource::Stdin(_)) {
            self.set_status("stdin input cannot be reloaded");
            return Ok(());
        }
        let post = input::load_post(&self.source)?;
        tracing::info!(title = %post.title, "reloading post");
        self.show_post(post);
        self.set_status("↻ Post reloaded");
        Ok(())
    }

    pub fn outline_entries(&self) -> Vec<OutlineEntry> {
        self.tracker.outline()
    }

    fn emit(&mut self, event: TocEvent) {
        if self.tracker.dispatch(self.subscription, event, &self.viewport) == Dispatch::Changed
            && self.focus == Focus::Content
        {
            self.sync_outline_selection();
        }
    }

    /// Keep the outline cursor on the active heading while reading.
    fn sync_outline_selection(&mut self) {
        let active = self.tracker.active_id();
        let index = if active.is_empty() {
            None
        } else {
            self.tracker.headings().iter().position(|h| h.id == active)
        };
        match index {
            Some(i) => self.outline_state.select(Some(i)),
            None if self.tracker.headings().is_empty() => self.outline_state.select(None),
            None => {
                if self.outline_state.selected().is_none() {
                    self.outline_state.select(Some(0));
                }
            }
        }
    }

    /// Update the number of visible article rows.
    pub fn set_visible_rows(&mut self, rows: usize) {
        if rows != self.viewport.visible_rows() {
            self.viewport.resize(rows);
            self.emit(TocEvent::Resize);
        }
    }

    pub fn scroll_by(&mut self, delta: isize) {
        if self.viewport.scroll_by(delta) {
            self.emit(TocEvent::Scroll);
        }
    }

    pub fn page_down(&mut self) {
        let page = self.viewport.visible_rows().max(1) as isize;
        self.scroll_by(page);
    }

    pub fn page_up(&mut self) {
        let page = self.viewport.visible_rows().max(1) as isize;
        self.scroll_by(-page);
    }

    pub fn scroll_to_top(&mut self) {
        if self.viewport.scroll_to(0) {
            self.emit(TocEvent::Scroll);
        }
    }

    pub fn scroll_to_bottom(&mut self) {
        let bottom = self.viewport.max_scroll();
        if self.viewport.scroll_to(bottom) {
            self.emit(TocEvent::Scroll);
        }
    }

    /// Advance smooth scrolling and expire the status message.
    pub fn tick(&mut self) {
        if self.viewport.step() {
            self.emit(TocEvent::Scroll);
        }
        if self
            .status
            .as_ref()
            .is_some_and(|(_, at)| at.elapsed() >= STATUS_TTL)
        {
            self.status = None;
        }
    }

    pub fn is_animating(&self) -> bool {
        self.viewport.is_animating()
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Outline => Focus::Content,
            Focus::Content if self.show_outline => Focus::Outline,
            Focus::Content => Focus::Content,
        };
    }

    pub fn toggle_outline(&mut self) {
        self.show_outline = !self.show_outline;
        if !self.show_outline {
            self.focus = Focus::Content;
        }
    }

    pub fn outline_next(&mut self) {
        let len = self.tracker.headings().len();
        if len == 0 {
            return;
        }
        let next = self.outline_state.selected().map_or(0, |i| (i + 1).min(len - 1));
        self.outline_state.select(Some(next));
    }

    pub fn outline_previous(&mut self) {
        if self.tracker.headings().is_empty() {
            return;
        }
        let prev = self.outline_state.selected().map_or(0, |i| i.saturating_sub(1));
        self.outline_state.select(Some(prev));
    }

    /// Jump to the heading under the outline cursor.
    pub fn jump_to_selected(&mut self) {
        let Some(heading) = self
            .outline_state
            .selected()
            .and_then(|i| self.tracker.headings().get(i))
        else {
            return;
        };
        let id = heading.id.clone();
        let text = heading.text.clone();

        if self.tracker.navigate(&id, &mut self.viewport) {
            if self.viewport.anchor_row(&id).is_none() {
                self.set_status(format!("'{text}' is not rendered as a heading"));
            }
        } else {
            self.set_status(format!("'{text}' has no anchor"));
        }
    }

    pub fn widen_outline(&mut self) {
        self.outline_width = (self.outline_width + 5).min(MAX_OUTLINE_WIDTH);
    }

    pub fn shrink_outline(&mut self) {
        self.outline_width = self.outline_width.saturating_sub(5).max(MIN_OUTLINE_WIDTH);
    }

    pub fn save_outline_width(&mut self) {
        match self.config.set_outline_width(self.outline_width) {
            Ok(()) => self.set_status(format!("✓ Outline width {}% saved", self.outline_width)),
            Err(err) => {
                tracing::warn!(%err, "failed to save config");
                self.set_status(format!("✗ {err}"));
            }
        }
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
        self.help_scroll = 0;
    }

    pub fn scroll_help_down(&mut self) {
        self.help_scroll = self.help_scroll.saturating_add(1);
    }

    pub fn scroll_help_up(&mut self) {
        self.help_scroll = self.help_scroll.saturating_sub(1);
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some((message.into(), Instant::now()));
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status.as_ref().map(|(msg, _)| msg.as_str())
    }
}
