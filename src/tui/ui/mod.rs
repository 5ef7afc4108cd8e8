mod layout;

use layout::{ReaderLayout, popup_area};

use crate::tui::app::{App, Focus, RowKind};
use crate::tui::help_text;
use ratatui::Frame;
use ratatui::layout::{Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, Borders, Clear, List, ListItem, Paragraph, Scrollbar, ScrollbarOrientation,
    ScrollbarState, Wrap,
};
use unicode_width::UnicodeWidthStr;

pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();
    let layout = ReaderLayout::split(area, app.show_outline.then_some(app.outline_width));

    // Keep the tracker's viewport in step with the pane size before drawing
    app.set_visible_rows(layout.article_rows());

    render_title_bar(frame, app, layout.title);
    if let Some(outline_area) = layout.outline {
        render_outline(frame, app, outline_area);
    }
    render_article(frame, app, layout.article);
    render_status_bar(frame, app, layout.status);

    if app.show_help {
        render_help_popup(frame, app, area);
    }
}

fn render_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let post = &app.post;
    let mut spans = vec![Span::styled(
        post.title.clone(),
        Style::default()
            .fg(app.theme.title_bar_fg)
            .add_modifier(Modifier::BOLD),
    )];

    let mut meta = Vec::new();
    if !post.published_date().is_empty() {
        meta.push(post.published_date().to_string());
    }
    meta.push(format!("{} min read", post.read_time_minutes()));
    if !post.tags.is_empty() {
        let tags: Vec<_> = post.tags.iter().map(|t| format!("#{}", t.name)).collect();
        meta.push(tags.join(" "));
    }
    spans.push(Span::styled(
        format!("  {}", meta.join(" • ")),
        Style::default().fg(app.theme.muted),
    ));

    let title = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(title, area);
}

/// Fit `text` into `width` columns, ending with an ellipsis when cut.
fn truncate_to_width(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

fn render_outline(frame: &mut Frame, app: &mut App, area: Rect) {
    let theme = &app.theme;
    let entries = app.outline_entries();
    // Borders, highlight symbol and the active marker
    let text_width = (area.width as usize).saturating_sub(6);

    let items: Vec<ListItem> = entries
        .iter()
        .map(|entry| {
            let indent = "  ".repeat(entry.indent - 1);
            let marker = if entry.active { "▎" } else { " " };
            let label = truncate_to_width(&entry.text, text_width.saturating_sub(indent.len()));

            let style = if entry.active {
                theme.active_style()
            } else if !entry.is_navigable() {
                Style::default()
                    .fg(theme.muted)
                    .add_modifier(Modifier::ITALIC)
            } else {
                Style::default().fg(theme.heading_color(entry.level))
            };

            ListItem::new(Line::from(vec![
                Span::styled(marker, theme.active_style()),
                Span::raw(indent),
                Span::styled(label, style),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border_style(app.focus == Focus::Outline))
                .title(" On this page "),
        )
        .style(theme.content_style())
        .highlight_style(theme.selection_style())
        .highlight_symbol("► ");

    frame.render_stateful_widget(list, area, &mut app.outline_state);
}

fn render_article(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let start = app.viewport.scroll_row();
    let end = (start + app.viewport.visible_rows()).min(app.rows.len());

    let lines: Vec<Line> = app.rows[start.min(end)..end]
        .iter()
        .map(|row| {
            let style = match row.kind {
                RowKind::Heading(level) => Style::default()
                    .fg(theme.heading_color(level))
                    .add_modifier(Modifier::BOLD),
                RowKind::Code => Style::default().fg(theme.code_fg),
                RowKind::Discussion => Style::default()
                    .fg(theme.muted)
                    .add_modifier(Modifier::BOLD),
                RowKind::Body => theme.content_style(),
            };
            Line::from(Span::styled(row.text.clone(), style))
        })
        .collect();

    let title = match app.tracker.active_heading() {
        Some(heading) => format!(" {} ", heading.text),
        None => " Article ".to_string(),
    };

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border_style(app.focus == Focus::Content))
            .title(title),
    );
    frame.render_widget(paragraph, area);

    let mut scrollbar_state =
        ScrollbarState::new(app.viewport.max_scroll()).position(app.viewport.scroll_row());
    let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
        .begin_symbol(Some("↑"))
        .end_symbol(Some("↓"))
        .style(Style::default().fg(theme.scrollbar_fg));
    frame.render_stateful_widget(
        scrollbar,
        area.inner(Margin {
            vertical: 1,
            horizontal: 0,
        }),
        &mut scrollbar_state,
    );
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(msg) = app.status_message() {
        let status = Paragraph::new(msg.to_string()).style(
            Style::default()
                .bg(Color::Rgb(0, 80, 120))
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        );
        frame.render_widget(status, area);
        return;
    }

    let headings = app.tracker.headings().len();
    let position = if app.viewport.max_scroll() == 0 {
        100
    } else {
        app.viewport.scroll_row() * 100 / app.viewport.max_scroll()
    };
    let focus = match app.focus {
        Focus::Outline => "Outline",
        Focus::Content => "Article",
    };
    let text = format!(
        " {} • {} headings • {}% • {} • ?:Help q:Quit",
        app.source.display_name(),
        headings,
        position,
        focus
    );
    let status = Paragraph::new(text).style(Style::default().fg(app.theme.muted));
    frame.render_widget(status, area);
}

fn render_help_popup(frame: &mut Frame, app: &App, area: Rect) {
    let popup = popup_area(area, 60, 70, 40, 10);
    let theme = &app.theme;

    frame.render_widget(Clear, popup);

    let paragraph = Paragraph::new(help_text::build_help_text(theme))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border_style(true))
                .title(" Help "),
        )
        .wrap(Wrap { trim: false })
        .scroll((app.help_scroll, 0));
    frame.render_widget(paragraph, popup);
}
