use crate::tui::theme::Theme;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

/// Key column width for keybindings
const KEY_COLUMN_WIDTH: usize = 11;

#[derive(Debug, Clone, Copy)]
pub enum HelpLine {
    Title(&'static str),
    SectionHeader(&'static str),
    KeyBinding { key: &'static str, desc: &'static str },
    Note(&'static str),
    Blank,
}

impl HelpLine {
    /// Convert this help line to a styled ratatui Line
    pub fn to_line(&self, theme: &Theme) -> Line<'static> {
        match self {
            HelpLine::Title(text) => Line::from(vec![Span::styled(
                text.to_string(),
                Style::default()
                    .fg(theme.title_bar_fg)
                    .add_modifier(Modifier::BOLD),
            )]),
            HelpLine::SectionHeader(text) => Line::from(vec![Span::styled(
                text.to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            )]),
            HelpLine::KeyBinding { key, desc } => {
                let formatted_key = format!("  {:<width$}", key, width = KEY_COLUMN_WIDTH);
                Line::from(vec![
                    Span::styled(formatted_key, Style::default().fg(theme.active_fg)),
                    Span::raw(desc.to_string()),
                ])
            }
            HelpLine::Note(text) => Line::from(vec![Span::styled(
                text.to_string(),
                Style::default()
                    .fg(theme.muted)
                    .add_modifier(Modifier::ITALIC),
            )]),
            HelpLine::Blank => Line::from(""),
        }
    }
}

pub const HELP_LINES: &[HelpLine] = &[
    HelpLine::Title("articlenav"),
    HelpLine::Blank,
    HelpLine::SectionHeader("Reading"),
    HelpLine::KeyBinding { key: "j / ↓", desc: "Scroll down one line" },
    HelpLine::KeyBinding { key: "k / ↑", desc: "Scroll up one line" },
    HelpLine::KeyBinding { key: "PgDn/Space", desc: "Scroll down one page" },
    HelpLine::KeyBinding { key: "PgUp", desc: "Scroll up one page" },
    HelpLine::KeyBinding { key: "g / G", desc: "Jump to top / bottom" },
    HelpLine::Blank,
    HelpLine::SectionHeader("Table of contents"),
    HelpLine::KeyBinding { key: "Tab", desc: "Switch focus between outline and article" },
    HelpLine::KeyBinding { key: "Enter", desc: "Jump to the selected heading" },
    HelpLine::KeyBinding { key: "o", desc: "Toggle the outline" },
    HelpLine::KeyBinding { key: "[ / ]", desc: "Shrink / widen the outline" },
    HelpLine::KeyBinding { key: "w", desc: "Save outline width" },
    HelpLine::Blank,
    HelpLine::SectionHeader("Other"),
    HelpLine::KeyBinding { key: "r", desc: "Reload the post" },
    HelpLine::KeyBinding { key: "?", desc: "Toggle this help" },
    HelpLine::KeyBinding { key: "q", desc: "Quit" },
    HelpLine::Blank,
    HelpLine::Note("Headings without an anchor are listed but cannot be jumped to."),
];

pub fn build_help_text(theme: &Theme) -> Vec<Line<'static>> {
    HELP_LINES.iter().map(|line| line.to_line(theme)).collect()
}
