//! A [`Viewport`] for renderers that lay an article out one source line per row.

use super::{ElementRect, Viewport};
use crate::render::RenderedAnchor;
use std::collections::HashMap;

/// Logical height of one rendered row.
pub const ROW_HEIGHT_PX: f32 = 24.0;

/// Rows moved per [`LineViewport::step`] while smooth scrolling.
const SMOOTH_SCROLL_STEP: usize = 3;

#[derive(Debug, Clone)]
pub struct LineViewport {
    /// First row carrying each anchor id.
    anchors: HashMap<String, usize>,
    total_rows: usize,
    visible_rows: usize,
    scroll_row: usize,
    scroll_target: Option<usize>,
}

impl LineViewport {
    pub fn new(anchors: &[RenderedAnchor], total_rows: usize, visible_rows: usize) -> Self {
        let mut map = HashMap::new();
        for anchor in anchors {
            map.entry(anchor.id.clone()).or_insert(anchor.line);
        }
        Self {
            anchors: map,
            total_rows,
            visible_rows,
            scroll_row: 0,
            scroll_target: None,
        }
    }

    pub fn scroll_row(&self) -> usize {
        self.scroll_row
    }

    pub fn visible_rows(&self) -> usize {
        self.visible_rows
    }

    pub fn total_rows(&self) -> usize {
        self.total_rows
    }

    pub fn max_scroll(&self) -> usize {
        self.total_rows.saturating_sub(self.visible_rows)
    }

    /// Row of the first element with `id`.
    pub fn anchor_row(&self, id: &str) -> Option<usize> {
        self.anchors.get(id).copied()
    }

    /// Jump to `row`, clamped to the scrollable range. Cancels any smooth
    /// scroll in progress. Returns whether the position changed.
    pub fn scroll_to(&mut self, row: usize) -> bool {
        self.scroll_target = None;
        self.set_row(row)
    }

    pub fn scroll_by(&mut self, delta: isize) -> bool {
        let row = self.scroll_row.saturating_add_signed(delta);
        self.scroll_to(row)
    }

    fn set_row(&mut self, row: usize) -> bool {
        let row = row.min(self.max_scroll());
        let changed = row != self.scroll_row;
        self.scroll_row = row;
        changed
    }

    /// Change the number of visible rows, keeping the scroll row in range.
    pub fn resize(&mut self, visible_rows: usize) {
        self.visible_rows = visible_rows;
        self.set_row(self.scroll_row);
    }

    pub fn is_animating(&self) -> bool {
        self.scroll_target.is_some()
    }

    /// Advance a pending smooth scroll by one step. Returns whether the
    /// scroll row moved.
    pub fn step(&mut self) -> bool {
        let Some(target) = self.scroll_target else {
            return false;
        };
        let next = if target > self.scroll_row {
            (self.scroll_row + SMOOTH_SCROLL_STEP).min(target)
        } else {
            self.scroll_row.saturating_sub(SMOOTH_SCROLL_STEP).max(target)
        };
        let moved = self.set_row(next);
        if self.scroll_row == target || !moved {
            self.scroll_target = None;
        }
        moved
    }
}

impl Viewport for LineViewport {
    fn element_rect(&self, id: &str) -> Option<ElementRect> {
        if id.is_empty() {
            return None;
        }
        let row = self.anchor_row(id)?;
        Some(ElementRect {
            top: (row as f32 - self.scroll_row as f32) * ROW_HEIGHT_PX,
            height: ROW_HEIGHT_PX,
        })
    }

    fn scroll_offset(&self) -> f32 {
        self.scroll_row as f32 * ROW_HEIGHT_PX
    }

    fn viewport_height(&self) -> f32 {
        self.visible_rows as f32 * ROW_HEIGHT_PX
    }

    fn scroll_into_view(&mut self, id: &str) -> bool {
        let Some(row) = self.anchor_row(id) else {
            return false;
        };
        let target = row.min(self.max_scroll());
        self.scroll_target = (target != self.scroll_row).then_some(target);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::rendered_anchors;

    fn viewport(markdown: &str, visible_rows: usize) -> LineViewport {
        let total = markdown.lines().count();
        LineViewport::new(&rendered_anchors(markdown), total, visible_rows)
    }

    fn article() -> String {
        let mut md = String::from("# Top\n");
        md.push_str(&"text\n".repeat(40));
        md.push_str("## Middle\n");
        md.push_str(&"text\n".repeat(40));
        md.push_str("## Middle\n");
        md.push_str(&"text\n".repeat(10));
        md
    }

    #[test]
    fn test_element_rect_follows_scroll() {
        let mut vp = viewport(&article(), 20);
        assert_eq!(vp.element_rect("middle").unwrap().top, 41.0 * ROW_HEIGHT_PX);
        vp.scroll_to(30);
        assert_eq!(vp.element_rect("middle").unwrap().top, 11.0 * ROW_HEIGHT_PX);
        assert_eq!(vp.scroll_offset(), 30.0 * ROW_HEIGHT_PX);
        assert!(vp.element_rect("").is_none());
        assert!(vp.element_rect("nowhere").is_none());
    }

    #[test]
    fn test_duplicate_ids_resolve_to_first_row() {
        let vp = viewport(&article(), 20);
        assert_eq!(vp.anchor_row("middle"), Some(41));
    }

    #[test]
    fn test_scroll_is_clamped() {
        let mut vp = viewport(&article(), 20);
        assert_eq!(vp.max_scroll(), 93 - 20);
        vp.scroll_to(500);
        assert_eq!(vp.scroll_row(), 73);
        assert!(!vp.scroll_by(5));
        assert!(vp.scroll_by(-100));
        assert_eq!(vp.scroll_row(), 0);
    }

    #[test]
    fn test_smooth_scroll_steps_to_target() {
        let mut vp = viewport(&article(), 20);
        assert!(vp.scroll_into_view("middle"));
        assert!(vp.is_animating());

        let mut steps = 0;
        while vp.step() {
            steps += 1;
        }
        assert_eq!(vp.scroll_row(), 41);
        assert_eq!(steps, 14);
        assert!(!vp.is_animating());
    }

    #[test]
    fn test_manual_scroll_cancels_animation() {
        let mut vp = viewport(&article(), 20);
        vp.scroll_into_view("middle");
        vp.step();
        vp.scroll_by(1);
        assert!(!vp.is_animating());
        assert_eq!(vp.scroll_row(), 4);
    }

    #[test]
    fn test_resize_keeps_row_in_range() {
        let mut vp = viewport(&article(), 20);
        vp.scroll_to(73);
        vp.resize(50);
        assert_eq!(vp.scroll_row(), 43);
    }
}
