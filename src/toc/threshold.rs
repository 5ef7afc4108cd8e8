//! Threshold scan: the last heading whose top has crossed a fixed line wins.

use super::Viewport;
use crate::parser::HeadingDescriptor;

/// A heading becomes active once its top is this close to the viewport top.
pub const ACTIVATION_THRESHOLD_PX: f32 = 150.0;

/// Below this page scroll offset, the first heading is active even before it
/// crosses the activation line.
pub const TOP_OF_PAGE_PX: f32 = 200.0;

/// Recomputed on mount, scroll and resize. Holds no state between passes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThresholdScan;

impl ThresholdScan {
    /// Return the id that should become active, or `None` to leave it as is.
    pub fn scan<V: Viewport + ?Sized>(
        &self,
        headings: &[HeadingDescriptor],
        viewport: &V,
    ) -> Option<String> {
        let mut passed: Option<&str> = None;

        for heading in headings {
            let Some(rect) = viewport.element_rect(&heading.id) else {
                tracing::trace!(id = %heading.id, "heading element not rendered, skipping");
                continue;
            };
            if rect.top <= ACTIVATION_THRESHOLD_PX {
                passed = Some(&heading.id);
            } else {
                break;
            }
        }

        if let Some(id) = passed.filter(|id| !id.is_empty()) {
            return Some(id.to_string());
        }

        match headings.first() {
            Some(first) if viewport.scroll_offset() < TOP_OF_PAGE_PX => Some(first.id.clone()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::extract_headings;
    use crate::toc::testing::FakeViewport;

    #[test]
    fn test_last_passed_heading_wins() {
        let headings = extract_headings("# A\n## B\n## C\n");
        let viewport = FakeViewport::new(900.0)
            .scrolled(1000.0)
            .with("a", -400.0)
            .with("b", 120.0)
            .with("c", 600.0);
        assert_eq!(ThresholdScan.scan(&headings, &viewport).as_deref(), Some("b"));
    }

    #[test]
    fn test_boundary_is_inclusive() {
        let headings = extract_headings("# A\n## B\n");
        let viewport = FakeViewport::new(900.0)
            .scrolled(500.0)
            .with("a", -10.0)
            .with("b", ACTIVATION_THRESHOLD_PX);
        assert_eq!(ThresholdScan.scan(&headings, &viewport).as_deref(), Some("b"));
    }

    #[test]
    fn test_stops_at_first_heading_below_threshold() {
        // A later heading reporting a small top (e.g. a stale layout) is not
        // considered once an earlier one is still below the line.
        let headings = extract_headings("# A\n## B\n## C\n");
        let viewport = FakeViewport::new(900.0)
            .scrolled(400.0)
            .with("a", 0.0)
            .with("b", 300.0)
            .with("c", 10.0);
        assert_eq!(ThresholdScan.scan(&headings, &viewport).as_deref(), Some("a"));
    }

    #[test]
    fn test_top_of_page_selects_first_heading() {
        let headings = extract_headings("# A\n## B\n");
        let viewport = FakeViewport::new(900.0)
            .scrolled(50.0)
            .with("a", 400.0)
            .with("b", 900.0);
        assert_eq!(ThresholdScan.scan(&headings, &viewport).as_deref(), Some("a"));
    }

    #[test]
    fn test_no_change_when_nothing_qualifies() {
        let headings = extract_headings("# A\n## B\n");
        let viewport = FakeViewport::new(900.0)
            .scrolled(250.0)
            .with("a", 400.0)
            .with("b", 900.0);
        assert_eq!(ThresholdScan.scan(&headings, &viewport), None);
    }

    #[test]
    fn test_missing_elements_are_skipped() {
        let headings = extract_headings("# A\n## B\n## C\n");
        let viewport = FakeViewport::new(900.0)
            .scrolled(800.0)
            .with("a", -300.0)
            .with("c", 40.0);
        assert_eq!(ThresholdScan.scan(&headings, &viewport).as_deref(), Some("c"));
    }

    #[test]
    fn test_empty_heading_list() {
        let viewport = FakeViewport::new(900.0);
        assert_eq!(ThresholdScan.scan(&[], &viewport), None);
    }
}
