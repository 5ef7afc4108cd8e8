//! Intersection spy: a heading becomes active when it enters a narrowed
//! band of the viewport.

use super::{ElementRect, Viewport};
use crate::parser::HeadingDescriptor;
use std::collections::HashMap;

/// The observed band starts this far below the viewport top.
pub const ROOT_MARGIN_TOP_PX: f32 = 100.0;

/// The observed band ends this fraction of the viewport height above the
/// viewport bottom.
pub const ROOT_MARGIN_BOTTOM_RATIO: f32 = 0.6;

/// Tracks which observed elements currently intersect the band and reports
/// the ones that just entered it.
#[derive(Debug, Clone, Default)]
pub struct IntersectionSpy {
    intersecting: HashMap<String, bool>,
}

impl IntersectionSpy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel all observations.
    pub fn reset(&mut self) {
        self.intersecting.clear();
    }

    fn band(viewport_height: f32) -> (f32, f32) {
        let bottom = viewport_height * (1.0 - ROOT_MARGIN_BOTTOM_RATIO);
        (ROOT_MARGIN_TOP_PX, bottom)
    }

    fn intersects(rect: ElementRect, band: (f32, f32)) -> bool {
        let (top, bottom) = band;
        rect.top < bottom && rect.top + rect.height >= top
    }

    /// Observe every rendered heading once and return the id of the last one
    /// that entered the band during this pass.
    ///
    /// Elements observed more than once (duplicate ids) share a single
    /// observation.
    pub fn observe<V: Viewport + ?Sized>(
        &mut self,
        headings: &[HeadingDescriptor],
        viewport: &V,
    ) -> Option<String> {
        let band = Self::band(viewport.viewport_height());
        let mut entered: Option<String> = None;
        let mut seen_this_pass: Vec<&str> = Vec::new();

        for heading in headings {
            if seen_this_pass.contains(&heading.id.as_str()) {
                continue;
            }
            let Some(rect) = viewport.element_rect(&heading.id) else {
                tracing::trace!(id = %heading.id, "heading element not rendered, not observed yet");
                continue;
            };
            seen_this_pass.push(&heading.id);

            let now = Self::intersects(rect, band);
            let before = self
                .intersecting
                .insert(heading.id.clone(), now)
                .unwrap_or(false);
            if now && !before {
                entered = Some(heading.id.clone());
            }
        }

        entered
    }
}
