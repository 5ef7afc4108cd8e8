//! Scroll-synchronized table of contents.
//!
//! [`TocTracker`] owns the single active heading of the displayed article.
//! It observes heading positions through the [`Viewport`] trait, so the same
//! tracker drives the terminal reader and the CLI simulation.
//!
//! ## Lifecycle
//!
//! ```text
//! load/mount ──► Subscription ──► dispatch(Mount | Scroll | Resize)
//!      ▲                                   │
//!      └──── unmount / next load ◄─────────┘   (old subscription goes stale)
//! ```

pub mod intersection;
pub mod outline;
pub mod threshold;
pub mod viewport;

pub use intersection::IntersectionSpy;
pub use outline::{OutlineEntry, outline, to_markdown_list};
pub use threshold::ThresholdScan;
pub use viewport::LineViewport;

use crate::parser::HeadingDescriptor;
use serde::{Deserialize, Serialize};

/// Position of a rendered heading element, in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementRect {
    /// Distance from the top of the viewport; negative once scrolled past.
    pub top: f32,
    pub height: f32,
}

/// What the tracker needs to know about the rendered article.
pub trait Viewport {
    /// Rect of the first element carrying `id`, if it has been rendered.
    ///
    /// Empty ids never resolve.
    fn element_rect(&self, id: &str) -> Option<ElementRect>;

    /// Vertical scroll offset of the whole page.
    fn scroll_offset(&self) -> f32;

    fn viewport_height(&self) -> f32;

    /// Start a smooth scroll that brings `id` to the top. Returns `false`
    /// when there is no such element.
    fn scroll_into_view(&mut self, id: &str) -> bool;
}

/// Which active-heading algorithm to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    #[default]
    Threshold,
    Intersection,
}

impl std::str::FromStr for StrategyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "threshold" => Ok(Self::Threshold),
            "intersection" => Ok(Self::Intersection),
            other => Err(format!(
                "unknown toc strategy '{other}' (expected threshold or intersection)"
            )),
        }
    }
}

/// A running strategy instance.
#[derive(Debug, Clone)]
pub enum TrackingStrategy {
    Threshold(ThresholdScan),
    Intersection(IntersectionSpy),
}

impl TrackingStrategy {
    pub fn new(kind: StrategyKind) -> Self {
        match kind {
            StrategyKind::Threshold => Self::Threshold(ThresholdScan),
            StrategyKind::Intersection => Self::Intersection(IntersectionSpy::new()),
        }
    }

    pub fn kind(&self) -> StrategyKind {
        match self {
            Self::Threshold(_) => StrategyKind::Threshold,
            Self::Intersection(_) => StrategyKind::Intersection,
        }
    }

    fn reset(&mut self) {
        if let Self::Intersection(spy) = self {
            spy.reset();
        }
    }

    fn evaluate<V: Viewport + ?Sized>(
        &mut self,
        headings: &[HeadingDescriptor],
        viewport: &V,
    ) -> Option<String> {
        match self {
            Self::Threshold(scan) => scan.scan(headings, viewport),
            Self::Intersection(spy) => spy.observe(headings, viewport),
        }
    }
}

/// Transient per-article state read by the sidebar.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TocState {
    pub active_id: String,
}

/// Handle to the listeners installed for one displayed article.
///
/// Once the tracker is unmounted or loads another article, events sent with
/// an older handle are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subscription {
    epoch: u64,
}

/// Layout events the tracker listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TocEvent {
    Mount,
    Scroll,
    Resize,
}

/// Outcome of delivering an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    Changed,
    Unchanged,
    /// The event came from a cancelled subscription and was dropped.
    Stale,
}

#[derive(Debug, Clone)]
pub struct TocTracker {
    headings: Vec<HeadingDescriptor>,
    state: TocState,
    strategy: TrackingStrategy,
    epoch: u64,
    live: Option<Subscription>,
}

impl TocTracker {
    pub fn new(kind: StrategyKind) -> Self {
        Self {
            headings: Vec::new(),
            state: TocState::default(),
            strategy: TrackingStrategy::new(kind),
            epoch: 0,
            live: None,
        }
    }

    pub fn strategy(&self) -> StrategyKind {
        self.strategy.kind()
    }

    pub fn headings(&self) -> &[HeadingDescriptor] {
        &self.headings
    }

    pub fn state(&self) -> &TocState {
        &self.state
    }

    pub fn active_id(&self) -> &str {
        &self.state.active_id
    }

    /// The heading descriptor for the active id, if any.
    pub fn active_heading(&self) -> Option<&HeadingDescriptor> {
        if self.state.active_id.is_empty() {
            return None;
        }
        self.headings.iter().find(|h| h.id == self.state.active_id)
    }

    pub fn is_mounted(&self) -> bool {
        self.live.is_some()
    }

    /// Replace the heading list for a newly displayed article.
    ///
    /// Cancels the previous subscription and clears the active heading. No
    /// tracking pass runs until the first event is dispatched.
    pub fn load(&mut self, headings: Vec<HeadingDescriptor>) -> Subscription {
        self.cancel();
        self.headings = headings;
        self.state = TocState::default();
        self.strategy.reset();

        let subscription = Subscription { epoch: self.epoch };
        self.live = Some(subscription);
        tracing::debug!(
            headings = self.headings.len(),
            strategy = ?self.strategy.kind(),
            "toc tracker loaded"
        );
        subscription
    }

    /// Load headings and run the initial tracking pass.
    pub fn mount<V: Viewport + ?Sized>(
        &mut self,
        headings: Vec<HeadingDescriptor>,
        viewport: &V,
    ) -> Subscription {
        let subscription = self.load(headings);
        self.dispatch(subscription, TocEvent::Mount, viewport);
        subscription
    }

    /// Tear down: cancel listeners and drop the article's headings.
    pub fn unmount(&mut self) {
        self.cancel();
        self.headings.clear();
        self.state = TocState::default();
        self.strategy.reset();
    }

    fn cancel(&mut self) {
        if self.live.take().is_some() {
            self.epoch += 1;
        }
    }

    /// Deliver a layout event.
    pub fn dispatch<V: Viewport + ?Sized>(
        &mut self,
        subscription: Subscription,
        event: TocEvent,
        viewport: &V,
    ) -> Dispatch {
        if self.live != Some(subscription) {
            tracing::debug!(?event, "dropping event from cancelled toc subscription");
            return Dispatch::Stale;
        }

        match self.strategy.evaluate(&self.headings, viewport) {
            Some(id) if id != self.state.active_id => {
                tracing::debug!(from = %self.state.active_id, to = %id, ?event, "active heading changed");
                self.state.active_id = id;
                Dispatch::Changed
            }
            _ => Dispatch::Unchanged,
        }
    }

    /// Anchor click: activate `id` immediately and scroll its element into view.
    ///
    /// Returns `false` for empty ids and ids not in the current heading list.
    pub fn navigate<V: Viewport + ?Sized>(&mut self, id: &str, viewport: &mut V) -> bool {
        if id.is_empty() || !self.headings.iter().any(|h| h.id == id) {
            return false;
        }
        self.state.active_id = id.to_string();
        if !viewport.scroll_into_view(id) {
            tracing::trace!(id, "anchor target not rendered; active heading set without scrolling");
        }
        true
    }

    pub fn outline(&self) -> Vec<OutlineEntry> {
        outline(&self.headings, &self.state.active_id)
    }
}

impl Default for TocTracker {
    fn default() -> Self {
        Self::new(StrategyKind::default())
    }
}


#[cfg(test)]
mod tests {
    use super::testing::FakeViewport;
    use super::*;
    use crate::parser::extract_headings;

    const ARTICLE: &str = "# Intro\n## Setup\n## Usage\n### Flags\n## Wrap Up\n";

    /// Place heading `i` at `i * spacing` document px and scroll to `offset`.
    fn laid_out(headings: &[HeadingDescriptor], spacing: f32, offset: f32) -> FakeViewport {
        let mut viewport = FakeViewport::new(800.0).scrolled(offset);
        for (i, heading) in headings.iter().enumerate() {
            viewport = viewport.with(&heading.id, 300.0 + i as f32 * spacing - offset);
        }
        viewport
    }

    #[test]
    fn test_mount_runs_initial_pass() {
        let headings = extract_headings(ARTICLE);
        let viewport = laid_out(&headings, 600.0, 0.0);
        let mut tracker = TocTracker::default();
        tracker.mount(headings, &viewport);
        assert_eq!(tracker.active_id(), "intro");
    }

    #[test]
    fn test_monotonic_scroll_walks_headings_in_order() {
        for kind in [StrategyKind::Threshold, StrategyKind::Intersection] {
            let headings = extract_headings(ARTICLE);
            let mut tracker = TocTracker::new(kind);
            let sub = tracker.load(headings.clone());

            let mut visited: Vec<String> = Vec::new();
            let mut offset = 0.0;
            while offset <= 3200.0 {
                let viewport = laid_out(&headings, 600.0, offset);
                tracker.dispatch(sub, TocEvent::Scroll, &viewport);
                let active = tracker.active_id().to_string();
                if !active.is_empty() && visited.last() != Some(&active) {
                    visited.push(active);
                }
                offset += 25.0;
            }

            assert_eq!(
                visited,
                vec!["intro", "setup", "usage", "flags", "wrap-up"],
                "strategy {kind:?}"
            );
        }
    }

    #[test]
    fn test_navigate_sets_active_synchronously() {
        let headings = extract_headings(ARTICLE);
        let mut viewport = laid_out(&headings, 600.0, 0.0);
        let mut tracker = TocTracker::default();
        tracker.mount(headings, &viewport);
        assert_eq!(tracker.active_id(), "intro");

        assert!(tracker.navigate("flags", &mut viewport));
        assert_eq!(tracker.active_id(), "flags");
        assert_eq!(viewport.scrolled_to, vec!["flags".to_string()]);
    }

    #[test]
    fn test_navigate_rejects_unknown_and_empty_ids() {
        let mut viewport = FakeViewport::new(800.0);
        let mut tracker = TocTracker::default();
        tracker.mount(extract_headings("# A\n## ???\n"), &viewport);

        assert!(!tracker.navigate("", &mut viewport));
        assert!(!tracker.navigate("missing", &mut viewport));
        assert!(viewport.scrolled_to.is_empty());
    }

    #[test]
    fn test_navigate_without_rendered_element_still_activates() {
        let mut viewport = FakeViewport::new(800.0).scrolled(500.0);
        let mut tracker = TocTracker::default();
        tracker.mount(extract_headings("# A\n## B\n"), &viewport);
        assert!(tracker.navigate("b", &mut viewport));
        assert_eq!(tracker.active_id(), "b");
    }

    #[test]
    fn test_reload_resets_before_events() {
        let first = extract_headings(ARTICLE);
        let viewport = laid_out(&first, 600.0, 1400.0);
        let mut tracker = TocTracker::default();
        let old = tracker.mount(first, &viewport);
        assert_eq!(tracker.active_id(), "usage");

        let second = extract_headings("# Another Post\n## Details\n");
        let new = tracker.load(second.clone());
        assert_eq!(tracker.active_id(), "");
        assert_eq!(tracker.headings(), second.as_slice());

        // A late scroll from the previous article must not leak through.
        assert_eq!(tracker.dispatch(old, TocEvent::Scroll, &viewport), Dispatch::Stale);
        assert_eq!(tracker.active_id(), "");

        let fresh = laid_out(&second, 600.0, 0.0);
        assert_eq!(tracker.dispatch(new, TocEvent::Mount, &fresh), Dispatch::Changed);
        assert_eq!(tracker.active_id(), "another-post");
    }

    #[test]
    fn test_unmount_cancels_subscription() {
        let headings = extract_headings(ARTICLE);
        let viewport = laid_out(&headings, 600.0, 0.0);
        let mut tracker = TocTracker::default();
        let sub = tracker.mount(headings, &viewport);

        tracker.unmount();
        assert!(!tracker.is_mounted());
        assert!(tracker.headings().is_empty());
        assert_eq!(tracker.dispatch(sub, TocEvent::Scroll, &viewport), Dispatch::Stale);
        assert_eq!(tracker.active_id(), "");
    }

    #[test]
    fn test_unchanged_dispatch() {
        let headings = extract_headings(ARTICLE);
        let viewport = laid_out(&headings, 600.0, 0.0);
        let mut tracker = TocTracker::default();
        let sub = tracker.mount(headings, &viewport);
        assert_eq!(tracker.dispatch(sub, TocEvent::Resize, &viewport), Dispatch::Unchanged);
    }

    #[test]
    fn test_active_id_is_always_a_known_heading() {
        let headings = extract_headings(ARTICLE);
        let mut tracker = TocTracker::new(StrategyKind::Intersection);
        let sub = tracker.load(headings.clone());
        let mut offset = 0.0;
        while offset < 3000.0 {
            tracker.dispatch(sub, TocEvent::Scroll, &laid_out(&headings, 450.0, offset));
            let active = tracker.active_id();
            assert!(active.is_empty() || headings.iter().any(|h| h.id == active));
            offset += 40.0;
        }
        assert!(tracker.active_heading().is_some());
    }

    #[test]
    fn test_strategy_kind_from_str() {
        assert_eq!("threshold".parse::<StrategyKind>(), Ok(StrategyKind::Threshold));
        assert_eq!("Intersection".parse::<StrategyKind>(), Ok(StrategyKind::Intersection));
        assert!("poll".parse::<StrategyKind>().is_err());
    }
}
