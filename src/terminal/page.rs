//! A document page scrolled in a terminal viewport.

use crate::platform::Page;
use crate::progress::ScrollMetrics;
use crate::section::Extent;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Movements smaller than this are not reported as scrolls.
const MOVE_EPSILON: f64 = 1e-3;

#[derive(Clone, Copy, Debug)]
/// Ease-out scroll from one offset to another over a fixed duration.
pub struct ScrollAnimation {
    from: f64,
    to: f64,
    started: Instant,
    duration: Duration,
}

impl ScrollAnimation {
    #[must_use]
    /// Starts an animation at `started`.
    pub fn new(from: f64, to: f64, started: Instant, duration: Duration) -> Self {
        Self {
            from,
            to,
            started,
            duration,
        }
    }

    #[must_use]
    /// Offset the animation has reached at `now`.
    pub fn position(&self, now: Instant) -> f64 {
        let t = self.progress(now);
        let eased = 1.0 - (1.0 - t) * (1.0 - t);
        self.from + (self.to - self.from) * eased
    }

    #[must_use]
    /// Whether the animation has reached its target at `now`.
    pub fn is_finished(&self, now: Instant) -> bool {
        self.progress(now) >= 1.0
    }

    #[must_use]
    /// Offset the animation is heading for.
    pub fn target(&self) -> f64 {
        self.to
    }

    fn progress(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }
}

/// Scroll state and section geometry of a document shown in the terminal.
pub struct TerminalPage {
    scroll: f64,
    extents: HashMap<String, Extent>,
    document_height: f64,
    viewport_height: f64,
    nav_bar_height: f64,
    scroll_duration: Duration,
    animation: Option<ScrollAnimation>,
    now: Instant,
}

impl TerminalPage {
    #[must_use]
    /// Creates a page scrolled to the top.
    pub fn new(
        extents: HashMap<String, Extent>,
        document_height: f64,
        nav_bar_height: f64,
        scroll_duration: Duration,
        now: Instant,
    ) -> Self {
        Self {
            scroll: 0.0,
            extents,
            document_height,
            viewport_height: 0.0,
            nav_bar_height,
            scroll_duration,
            animation: None,
            now,
        }
    }

    /// Records the number of rows the page is drawn into.
    pub fn set_viewport_height(&mut self, rows: u16) {
        self.viewport_height = f64::from(rows);
    }

    #[must_use]
    /// Rows the page is drawn into.
    pub fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    #[must_use]
    /// Furthest offset the page can scroll to: the last row at the top of the viewport.
    pub fn max_scroll(&self) -> f64 {
        (self.document_height - 1.0).max(0.0)
    }

    /// Scrolls by `delta` rows as the user would, cancelling any smooth scroll.
    ///
    /// Returns whether the offset changed.
    pub fn scroll_by(&mut self, delta: f64) -> bool {
        self.jump_to(self.scroll + delta)
    }

    /// Jumps to `offset` as the user would, cancelling any smooth scroll.
    ///
    /// Returns whether the offset changed.
    pub fn jump_to(&mut self, offset: f64) -> bool {
        self.animation = None;
        let next = offset.clamp(0.0, self.max_scroll());
        let moved = (next - self.scroll).abs() > MOVE_EPSILON;
        self.scroll = next;
        moved
    }

    /// Advances the clock and any smooth scroll. Returns whether the offset changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.now = now;
        let Some(animation) = self.animation else {
            return false;
        };
        let next = animation.position(now).clamp(0.0, self.max_scroll());
        if animation.is_finished(now) {
            self.animation = None;
        }
        let moved = (next - self.scroll).abs() > MOVE_EPSILON;
        self.scroll = next;
        moved
    }

    #[must_use]
    /// Whether a smooth scroll is in flight.
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    /// First document row visible at the top of the viewport.
    pub fn top_row(&self) -> usize {
        self.scroll.round().max(0.0) as usize
    }
}

impl Page for TerminalPage {
    fn scroll_position(&self) -> f64 {
        self.scroll
    }

    fn measure(&self, id: &str) -> Option<Extent> {
        self.extents.get(id).copied()
    }

    fn nav_bar_height(&self) -> Option<f64> {
        Some(self.nav_bar_height)
    }

    fn scroll_metrics(&self) -> ScrollMetrics {
        ScrollMetrics {
            document_height: self.document_height,
            viewport_height: self.viewport_height,
        }
    }

    fn clamp_offset(&self, offset: f64) -> f64 {
        offset.clamp(0.0, self.max_scroll())
    }

    fn smooth_scroll_to(&mut self, offset: f64) {
        let target = self.clamp_offset(offset);
        self.animation = Some(ScrollAnimation::new(
            self.scroll,
            target,
            self.now,
            self.scroll_duration,
        ));
    }

    fn is_smooth_scrolling(&self) -> bool {
        self.is_animating()
    }
}

#[cfg(test)]
mod tests {
    use super::{ScrollAnimation, TerminalPage};
    use crate::platform::Page;
    use crate::section::Extent;
    use std::collections::HashMap;
    use std::time::{Duration, Instant};

    fn page(now: Instant) -> TerminalPage {
        let extents = HashMap::from([("intro".to_string(), Extent::new(40.0, 20.0))]);
        TerminalPage::new(extents, 60.0, 3.0, Duration::from_millis(300), now)
    }

    #[test]
    fn test_animation_eases_to_target() {
        let start = Instant::now();
        let anim = ScrollAnimation::new(0.0, 100.0, start, Duration::from_millis(100));
        let halfway = anim.position(start + Duration::from_millis(50));
        assert!(halfway > 50.0 && halfway < 100.0, "ease-out front-loads motion");
        assert!((anim.position(start + Duration::from_millis(200)) - 100.0).abs() < 1e-9);
        assert!(anim.is_finished(start + Duration::from_millis(100)));
    }

    #[test]
    fn test_smooth_scroll_lands_on_tick() {
        let start = Instant::now();
        let mut page = page(start);
        page.smooth_scroll_to(37.0);
        assert!((page.scroll_position()).abs() < 1e-9, "no jump on request");

        assert!(page.tick(start + Duration::from_millis(150)));
        assert!(page.is_animating());
        assert!(page.tick(start + Duration::from_millis(300)));
        assert!(!page.is_animating());
        assert!((page.scroll_position() - 37.0).abs() < 1e-9);
        assert!(!page.tick(start + Duration::from_millis(320)));
    }

    #[test]
    fn test_user_scroll_cancels_animation_and_clamps() {
        let start = Instant::now();
        let mut page = page(start);
        page.smooth_scroll_to(37.0);
        assert!(page.scroll_by(5.0));
        assert!(!page.is_animating());
        assert!(page.scroll_by(-10.0));
        assert!((page.scroll_position()).abs() < 1e-9);
        page.jump_to(500.0);
        assert!((page.scroll_position() - 59.0).abs() < 1e-9);
    }

    #[test]
    fn test_measure_and_nav_height() {
        let page = page(Instant::now());
        assert_eq!(page.measure("intro"), Some(Extent::new(40.0, 20.0)));
        assert_eq!(page.measure("outro"), None);
        assert_eq!(page.nav_bar_height(), Some(3.0));
    }

    #[test]
    fn test_clamp_offset_matches_scroll_limits() {
        let page = page(Instant::now());
        assert!((page.clamp_offset(-3.0)).abs() < 1e-9);
        assert!((page.clamp_offset(37.0) - 37.0).abs() < 1e-9);
        assert!((page.clamp_offset(500.0) - 59.0).abs() < 1e-9);
    }

    #[test]
    fn test_smooth_scrolling_ends_when_user_scrolls() {
        let start = Instant::now();
        let mut page = page(start);
        page.smooth_scroll_to(37.0);
        assert!(page.is_smooth_scrolling());
        page.scroll_by(1.0);
        assert!(!page.is_smooth_scrolling());
    }
}
