//! Screen regions for the reader.

use ratatui::layout::{Constraint, Layout, Rect};

/// Areas of one frame. `outline` is `None` when the sidebar is hidden.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReaderLayout {
    pub title: Rect,
    pub outline: Option<Rect>,
    pub article: Rect,
    pub status: Rect,
}

impl ReaderLayout {
    pub fn split(area: Rect, outline_width: Option<u16>) -> Self {
        let [title, body, status] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(area);

        match outline_width {
            Some(width) => {
                let width = width.min(100);
                let [outline, article] = Layout::horizontal([
                    Constraint::Percentage(width),
                    Constraint::Percentage(100 - width),
                ])
                .areas(body);
                Self {
                    title,
                    outline: Some(outline),
                    article,
                    status,
                }
            }
            None => Self {
                title,
                outline: None,
                article: body,
                status,
            },
        }
    }

    /// Rows of article text that fit inside the bordered article pane.
    pub fn article_rows(&self) -> usize {
        self.article.height.saturating_sub(2) as usize
    }
}

/// Centered popup taking a percentage of `area`, but never smaller than the
/// given minimums (or larger than `area`).
pub fn popup_area(area: Rect, percent_x: u16, percent_y: u16, min_w: u16, min_h: u16) -> Rect {
    let width = (area.width * percent_x / 100).max(min_w).min(area.width);
    let height = (area.height * percent_y / 100).max(min_h).min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_with_outline() {
        let layout = ReaderLayout::split(Rect::new(0, 0, 100, 50), Some(25));
        assert_eq!(layout.title.height, 2);
        assert_eq!(layout.status.height, 1);
        let outline = layout.outline.unwrap();
        assert_eq!(outline.width, 25);
        assert_eq!(layout.article.width, 75);
        assert_eq!(layout.article_rows(), 45);
    }

    #[test]
    fn test_split_with_oversized_outline() {
        let layout = ReaderLayout::split(Rect::new(0, 0, 100, 50), Some(120));
        assert_eq!(layout.outline.unwrap().width, 100);
        assert_eq!(layout.article.width, 0);
    }

    #[test]
    fn test_split_without_outline() {
        let layout = ReaderLayout::split(Rect::new(0, 0, 100, 50), None);
        assert!(layout.outline.is_none());
        assert_eq!(layout.article.width, 100);
    }

    #[test]
    fn test_popup_respects_minimums() {
        let popup = popup_area(Rect::new(0, 0, 40, 12), 50, 50, 30, 10);
        assert_eq!((popup.width, popup.height), (30, 10));
        assert_eq!((popup.x, popup.y), (5, 1));

        let clamped = popup_area(Rect::new(0, 0, 20, 5), 50, 50, 30, 10);
        assert_eq!((clamped.width, clamped.height), (20, 5));
    }
}
