use crate::render::RenderOptions;
use crate::toc::StrategyKind;
use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine config directory")]
    NoConfigDir,

    #[error("failed to write config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ui: UiConfig,

    #[serde(default)]
    pub toc: TocConfig,

    #[serde(default)]
    pub render: RenderConfig,

    #[serde(default)]
    pub theme: CustomThemeConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Outline pane width as a percentage of the terminal
    #[serde(default = "default_outline_width")]
    pub outline_width: u16,

    #[serde(default = "default_show_outline")]
    pub show_outline: bool,
}

/// Table of contents tracking
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TocConfig {
    /// "threshold" (default) or "intersection". Thresholds themselves are fixed.
    #[serde(default)]
    pub strategy: StrategyKind,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Base URL prepended to relative image sources in HTML output
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_base_url: Option<String>,
}

/// Custom theme color overrides
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomThemeConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading_1: Option<ColorValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading_2: Option<ColorValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading_3: Option<ColorValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_fg: Option<ColorValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_focused: Option<ColorValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_unfocused: Option<ColorValue>,
}

/// Color value that can be specified in multiple formats
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorValue {
    /// Named color (e.g., "Red", "Cyan", "White")
    Named(String),
    /// RGB color { rgb = [r, g, b] }
    Rgb { rgb: [u8; 3] },
    /// Indexed color { indexed = 235 }
    Indexed { indexed: u8 },
}

impl ColorValue {
    /// Convert to ratatui Color
    pub fn to_color(&self) -> Option<Color> {
        match self {
            ColorValue::Named(name) => match name.to_lowercase().as_str() {
                "black" => Some(Color::Black),
                "red" => Some(Color::Red),
                "green" => Some(Color::Green),
                "yellow" => Some(Color::Yellow),
                "blue" => Some(Color::Blue),
                "magenta" => Some(Color::Magenta),
                "cyan" => Some(Color::Cyan),
                "gray" | "grey" => Some(Color::Gray),
                "darkgray" | "darkgrey" => Some(Color::DarkGray),
                "lightred" => Some(Color::LightRed),
                "lightgreen" => Some(Color::LightGreen),
                "lightyellow" => Some(Color::LightYellow),
                "lightblue" => Some(Color::LightBlue),
                "lightmagenta" => Some(Color::LightMagenta),
                "lightcyan" => Some(Color::LightCyan),
                "white" => Some(Color::White),
                _ => None,
            },
            ColorValue::Rgb { rgb } => Some(Color::Rgb(rgb[0], rgb[1], rgb[2])),
            ColorValue::Indexed { indexed } => Some(Color::Indexed(*indexed)),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            outline_width: default_outline_width(),
            show_outline: default_show_outline(),
        }
    }
}

fn default_outline_width() -> u16 {
    25
}

fn default_show_outline() -> bool {
    true
}

impl Config {
    /// Get the platform-specific config file path
    /// - macOS: ~/Library/Application Support/articlenav/config.toml
    /// - Linux: ~/.config/articlenav/config.toml
    /// - Windows: %APPDATA%/articlenav/config.toml
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("articlenav").join("config.toml"))
    }

    /// Load config from file, or return default if file doesn't exist
    pub fn load() -> Self {
        Self::config_path()
            .and_then(|path| fs::read_to_string(&path).ok())
            .map(|contents| Self::from_toml(&contents))
            .unwrap_or_default()
    }

    /// Parse config text, falling back to defaults when it is malformed.
    pub fn from_toml(contents: &str) -> Self {
        toml::from_str(contents).unwrap_or_else(|err| {
            tracing::warn!(%err, "ignoring malformed config file");
            Self::default()
        })
    }

    /// Save config to file
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::config_path().ok_or(ConfigError::NoConfigDir)?;

        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(&path, contents)?;

        Ok(())
    }

    /// Update outline width and save config
    pub fn set_outline_width(&mut self, width: u16) -> Result<(), ConfigError> {
        self.ui.outline_width = width;
        self.save()
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            asset_base_url: self.render.asset_base_url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.ui.outline_width, 25);
        assert!(config.ui.show_outline);
        assert_eq!(config.toc.strategy, StrategyKind::Threshold);
        assert!(config.render.asset_base_url.is_none());
    }

    #[test]
    fn test_partial_file() {
        let config = Config::from_toml(
            r#"
[toc]
strategy = "intersection"

[render]
asset_base_url = "http://127.0.0.1:8000"

[theme]
active_fg = { rgb = [255, 128, 0] }
heading_1 = "Cyan"
"#,
        );
        assert_eq!(config.toc.strategy, StrategyKind::Intersection);
        assert_eq!(config.ui.outline_width, 25);
        assert_eq!(
            config.render_options().asset_base_url.as_deref(),
            Some("http://127.0.0.1:8000")
        );
        assert_eq!(
            config.theme.active_fg.as_ref().and_then(ColorValue::to_color),
            Some(Color::Rgb(255, 128, 0))
        );
        assert_eq!(
            config.theme.heading_1.as_ref().and_then(ColorValue::to_color),
            Some(Color::Cyan)
        );
    }

    #[test]
    fn test_malformed_falls_back() {
        let config = Config::from_toml("[toc]\nstrategy = \"polling\"\n");
        assert_eq!(config.toc.strategy, StrategyKind::Threshold);
    }

    #[test]
    fn test_round_trip_keeps_strategy() {
        let mut config = Config::default();
        config.toc.strategy = StrategyKind::Intersection;
        let text = toml::to_string_pretty(&config).unwrap();
        assert!(text.contains("strategy = \"intersection\""));
    }

    #[test]
    fn test_unknown_color_name() {
        assert_eq!(ColorValue::Named("chartreuse".into()).to_color(), None);
        assert_eq!(ColorValue::Indexed { indexed: 235 }.to_color(), Some(Color::Indexed(235)));
    }
}
