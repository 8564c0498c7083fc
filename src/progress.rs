//! Scroll progress and the navigation bar's "scrolled" state.

#[derive(Clone, Copy, Debug, Default, PartialEq)]
/// Overall page and viewport sizes used to express scroll position as progress.
pub struct ScrollMetrics {
    /// Full height of the page content.
    pub document_height: f64,
    /// Height of the visible viewport.
    pub viewport_height: f64,
}

#[must_use]
/// Percentage of the scrollable distance covered at `scroll`, clamped to `0..=100`.
///
/// A page that fits in the viewport has nothing to scroll and reports 0.
pub fn scroll_progress(scroll: f64, metrics: ScrollMetrics) -> f64 {
    let scrollable = metrics.document_height - metrics.viewport_height;
    if scrollable <= 0.0 {
        return 0.0;
    }
    (scroll / scrollable * 100.0).clamp(0.0, 100.0)
}

#[must_use]
/// Whether the page has scrolled far enough for the navigation bar to switch to its compact style.
pub fn is_scrolled(scroll: f64, threshold: f64) -> bool {
    scroll > threshold
}

#[cfg(test)]
mod tests {
    use super::{is_scrolled, scroll_progress, ScrollMetrics};

    fn metrics(document_height: f64, viewport_height: f64) -> ScrollMetrics {
        ScrollMetrics {
            document_height,
            viewport_height,
        }
    }

    #[test]
    fn test_progress_is_fraction_of_scrollable_height() {
        let m = metrics(3000.0, 1000.0);
        assert!((scroll_progress(0.0, m)).abs() < 1e-9);
        assert!((scroll_progress(1000.0, m) - 50.0).abs() < 1e-9);
        assert!((scroll_progress(2000.0, m) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_progress_clamps_overscroll() {
        let m = metrics(3000.0, 1000.0);
        assert!((scroll_progress(2600.0, m) - 100.0).abs() < 1e-9);
        assert!((scroll_progress(-40.0, m)).abs() < 1e-9);
    }

    #[test]
    fn test_short_page_has_no_progress() {
        assert!((scroll_progress(10.0, metrics(500.0, 1000.0))).abs() < 1e-9);
        assert!((scroll_progress(10.0, metrics(1000.0, 1000.0))).abs() < 1e-9);
    }

    #[test]
    fn test_scrolled_is_strictly_past_threshold() {
        assert!(!is_scrolled(50.0, 50.0));
        assert!(is_scrolled(50.5, 50.0));
    }
}
