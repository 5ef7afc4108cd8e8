//! Reader colors.

use crate::config::{ColorValue, CustomThemeConfig};
use crate::parser::HeadingLevel;
use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone)]
pub struct Theme {
    pub heading_1: Color,
    pub heading_2: Color,
    pub heading_3: Color,
    pub foreground: Color,
    pub muted: Color,
    pub active_fg: Color,
    pub border_focused: Color,
    pub border_unfocused: Color,
    pub selection_bg: Color,
    pub title_bar_fg: Color,
    pub scrollbar_fg: Color,
    pub code_fg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            heading_1: Color::Rgb(125, 211, 252),
            heading_2: Color::Rgb(147, 197, 253),
            heading_3: Color::Rgb(196, 181, 253),
            foreground: Color::Rgb(226, 232, 240),
            muted: Color::Rgb(100, 116, 139),
            active_fg: Color::Rgb(56, 189, 248),
            border_focused: Color::Rgb(56, 189, 248),
            border_unfocused: Color::Rgb(51, 65, 85),
            selection_bg: Color::Rgb(30, 41, 59),
            title_bar_fg: Color::Rgb(226, 232, 240),
            scrollbar_fg: Color::Rgb(71, 85, 105),
            code_fg: Color::Rgb(248, 113, 113),
        }
    }
}

impl Theme {
    /// Apply user overrides from the config file. Unparseable colors are ignored.
    pub fn with_custom_colors(mut self, custom: &CustomThemeConfig) -> Self {
        fn apply(slot: &mut Color, value: &Option<ColorValue>) {
            if let Some(color) = value.as_ref().and_then(ColorValue::to_color) {
                *slot = color;
            }
        }

        apply(&mut self.heading_1, &custom.heading_1);
        apply(&mut self.heading_2, &custom.heading_2);
        apply(&mut self.heading_3, &custom.heading_3);
        apply(&mut self.active_fg, &custom.active_fg);
        apply(&mut self.border_focused, &custom.border_focused);
        apply(&mut self.border_unfocused, &custom.border_unfocused);
        self
    }

    pub fn heading_color(&self, level: HeadingLevel) -> Color {
        match level {
            HeadingLevel::H1 => self.heading_1,
            HeadingLevel::H2 => self.heading_2,
            HeadingLevel::H3 => self.heading_3,
        }
    }

    pub fn border_style(&self, focused: bool) -> Style {
        let color = if focused {
            self.border_focused
        } else {
            self.border_unfocused
        };
        Style::default().fg(color)
    }

    pub fn active_style(&self) -> Style {
        Style::default()
            .fg(self.active_fg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn selection_style(&self) -> Style {
        Style::default().bg(self.selection_bg)
    }

    pub fn content_style(&self) -> Style {
        Style::default().fg(self.foreground)
    }
}
