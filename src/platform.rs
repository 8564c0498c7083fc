//! The platform seams the tracker is driven through.
//!
//! The tracker never touches a real window. A host supplies three collaborators: a [`Page`] that
//! measures sections and scrolls, a [`Location`] that holds the URL fragment, and an
//! [`EventSource`] that delivers [`PageEvent`]s while the tracker is subscribed. All three run on the
//! host's single event loop, so none of them needs to be `Send` or `Sync`.

use crate::progress::ScrollMetrics;
use crate::section::Extent;
use std::time::Duration;

/// Layout measurement and scrolling of the rendered page.
pub trait Page {
    /// Current vertical scroll offset of the viewport.
    fn scroll_position(&self) -> f64;

    /// Measures a section by id, or `None` if it is not rendered yet.
    fn measure(&self, id: &str) -> Option<Extent>;

    /// Live height of the navigation bar, if the page can report it.
    fn nav_bar_height(&self) -> Option<f64> {
        None
    }

    /// Page and viewport sizes.
    fn scroll_metrics(&self) -> ScrollMetrics;

    /// Offset the page would actually settle at when asked to scroll to `offset`.
    fn clamp_offset(&self, offset: f64) -> f64 {
        offset.max(0.0)
    }

    /// Starts (or retargets) a smooth scroll towards `offset`.
    fn smooth_scroll_to(&mut self, offset: f64);

    /// Whether a smooth scroll is still in flight.
    ///
    /// Pages that cannot tell report `true`, and navigation then ends only once the scroll
    /// position reaches its target.
    fn is_smooth_scrolling(&self) -> bool {
        true
    }
}

/// Read and history-replace access to the URL fragment.
pub trait Location {
    /// Current fragment without its leading `#`, or `None` when empty.
    fn fragment(&self) -> Option<String>;

    /// Replaces the fragment without adding a history entry or scrolling.
    fn replace_fragment(&mut self, id: &str);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Handle returned by [`EventSource::subscribe`].
pub struct Subscription(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// One-shot timers the tracker schedules after mount.
pub enum Timer {
    /// First detection pass once the page has rendered.
    InitialCheck,
    /// Deferred scroll to the section named by the initial fragment.
    Settle,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Events a host delivers to [`crate::tracker::SectionTracker::handle`].
pub enum PageEvent {
    /// The viewport scrolled.
    Scroll,
    /// The viewport or layout changed size.
    Resize,
    /// A frame requested through [`EventSource::request_frame`] is about to paint.
    Frame,
    /// The fragment changed from outside the tracker (e.g. the user edited the URL).
    FragmentChanged,
    /// A timer scheduled through [`EventSource::schedule`] fired.
    Timer(Timer),
}

/// Subscription to page events plus the frame and timer scheduling primitives.
pub trait EventSource {
    /// Starts delivering page events to the tracker.
    fn subscribe(&mut self) -> Subscription;

    /// Stops delivering events for `subscription`. Unknown handles are ignored.
    fn unsubscribe(&mut self, subscription: Subscription);

    /// Asks for a single [`PageEvent::Frame`] before the next paint.
    fn request_frame(&mut self);

    /// Delivers [`PageEvent::Timer`] once `delay` has elapsed.
    fn schedule(&mut self, delay: Duration, timer: Timer);
}
