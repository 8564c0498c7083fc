//! The scroll-driven active-section tracker.
//!
//! [`SectionTracker`] is the single owner of the page's navigation state: which declared section is
//! active, and which fragment the tracker itself last wrote. Two producers feed it, both serialised
//! through [`SectionTracker::handle`] on the host's event loop:
//!
//! - scroll events, coalesced into at most one detection pass per frame, and
//! - navigation commands ([`SectionTracker::navigate_to`]), from nav links, the initial fragment,
//!   or a fragment the user typed.
//!
//! Navigation does not suppress detection. While a smooth scroll is in flight the phase is
//! [`Phase::Navigating`], and detection passes keep updating the active section as the viewport
//! passes over intermediate sections:
//!
//! ```text
//! Idle --navigate_to--> Navigating --pass lands on target--> Idle
//!                         |    ^     --pass after the page stopped scrolling--> Idle
//!                         |____| navigate_to (retarget)
//! ```
//!
//! The target recorded in [`Phase::Navigating`] is the offset the page will actually settle at,
//! so a section too close to the top of the page to sit below the nav bar still lands. A
//! navigation to the offset the page already rests at never enters `Navigating`.

use crate::detect::{self, DEFAULT_DETECTION_MARGIN};
use crate::error::TrackerError;
use crate::platform::{EventSource, Location, Page, PageEvent, Subscription, Timer};
use crate::progress::{is_scrolled, scroll_progress};
use crate::scheduler::FrameCoalescer;
use crate::section::Section;
use serde::Serialize;
use std::collections::HashSet;
use std::time::Duration;
use tracing::{debug, info, trace, warn};

/// Distance from a navigation target at which the smooth scroll counts as landed.
const NAVIGATION_TOLERANCE: f64 = 0.5;

#[derive(Clone, Debug, PartialEq)]
/// Tunables for detection and mount-time behaviour.
pub struct TrackerConfig {
    /// Units subtracted from each section's top so it activates before reaching the nav bar edge.
    pub detection_margin: f64,
    /// Wait before scrolling to the section named by the initial fragment.
    pub settle_delay: Duration,
    /// Wait before the first detection pass when there is no initial fragment.
    pub initial_check_delay: Duration,
    /// Scroll offset past which the page counts as scrolled.
    pub scrolled_threshold: f64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            detection_margin: DEFAULT_DETECTION_MARGIN,
            settle_delay: Duration::from_millis(500),
            initial_check_delay: Duration::from_millis(100),
            scrolled_threshold: 50.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
/// Whether a programmatic smooth scroll is in flight.
pub enum Phase {
    /// No navigation scroll in flight.
    Idle,
    /// A [`SectionTracker::navigate_to`] scroll is heading for `target`.
    Navigating {
        /// Section the navigation was issued for.
        id: String,
        /// Scroll offset the page will settle at, after clamping to its scroll range.
        target: f64,
    },
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
/// Running counters describing what the tracker has done.
pub struct TrackerStats {
    /// Scroll events received.
    pub scroll_events: u64,
    /// Detection passes run on frames.
    pub frames_run: u64,
    /// Changes of the active section, from any source.
    pub section_changes: u64,
    /// Fragment replacements issued.
    pub fragment_writes: u64,
    /// Fragment replacements skipped because the fragment already matched.
    pub redundant_writes_skipped: u64,
    /// Accepted navigation commands.
    pub navigations: u64,
    /// Navigation commands rejected for naming an unknown section.
    pub rejected_navigations: u64,
    /// User fragment edits that were followed with a navigation.
    pub fragment_edits_followed: u64,
}

#[derive(Debug)]
/// Read-only view of the tracker for the navigation bar and section views.
pub struct Snapshot<'a> {
    /// Active section id, `None` only before initialisation.
    pub active: Option<&'a str>,
    /// Current navigation phase.
    pub phase: &'a Phase,
    /// Scroll progress through the page, in percent.
    pub progress: f64,
    /// Whether the page is scrolled past the configured threshold.
    pub scrolled: bool,
}

/// Owns the active section and keeps the fragment and highlighted nav item in step with scrolling.
pub struct SectionTracker<P, L, E> {
    page: P,
    location: L,
    events: E,
    config: TrackerConfig,
    sections: Vec<Section>,
    nav_bar_height: f64,
    active: Option<String>,
    last_written: Option<String>,
    phase: Phase,
    subscription: Option<Subscription>,
    coalescer: FrameCoalescer,
    pending_settle: Option<String>,
    stats: TrackerStats,
}

impl<P: Page, L: Location, E: EventSource> SectionTracker<P, L, E> {
    #[must_use]
    /// Creates an unmounted tracker over the given platform collaborators.
    pub fn new(page: P, location: L, events: E, config: TrackerConfig) -> Self {
        Self {
            page,
            location,
            events,
            config,
            sections: Vec::new(),
            nav_bar_height: 0.0,
            active: None,
            last_written: None,
            phase: Phase::Idle,
            subscription: None,
            coalescer: FrameCoalescer::new(),
            pending_settle: None,
            stats: TrackerStats::default(),
        }
    }

    /// Mounts the tracker on a page of declared sections.
    ///
    /// Measures every section, picks the initial active section (the fragment if it names a
    /// declared section, otherwise the first one) and subscribes to page events. A valid initial
    /// fragment schedules the settle timer that scrolls to it; otherwise the initial-check timer
    /// schedules the first detection pass. Initialising a mounted tracker tears it down first.
    ///
    /// # Errors
    ///
    /// Returns an error if `sections` is empty or contains a duplicate id.
    pub fn initialize(
        &mut self,
        sections: Vec<Section>,
        nav_bar_height: f64,
    ) -> Result<(), TrackerError> {
        if sections.is_empty() {
            return Err(TrackerError::NoSections);
        }
        let mut seen = HashSet::new();
        for section in &sections {
            if !seen.insert(section.id.as_str()) {
                return Err(TrackerError::DuplicateSection(section.id.clone()));
            }
        }

        if self.subscription.is_some() {
            debug!("re-initialising mounted tracker");
            self.teardown();
        }

        self.sections = sections
            .into_iter()
            .enumerate()
            .map(|(order, mut section)| {
                section.order = order;
                section
            })
            .collect();
        self.nav_bar_height = nav_bar_height;
        self.phase = Phase::Idle;
        self.measure_all();

        let initial = self
            .location
            .fragment()
            .filter(|fragment| self.index_of(fragment).is_some());
        let active = initial
            .clone()
            .unwrap_or_else(|| self.sections[0].id.clone());
        info!(
            sections = self.sections.len(),
            active = %active,
            from_fragment = initial.is_some(),
            "section tracker initialised"
        );
        self.active = Some(active);
        self.subscription = Some(self.events.subscribe());

        match initial {
            Some(id) => {
                self.pending_settle = Some(id);
                self.events.schedule(self.config.settle_delay, Timer::Settle);
            }
            None => self
                .events
                .schedule(self.config.initial_check_delay, Timer::InitialCheck),
        }
        Ok(())
    }

    /// Dispatches one page event. Events are ignored while the tracker is not subscribed.
    pub fn handle(&mut self, event: PageEvent) {
        if self.subscription.is_none() {
            trace!(?event, "ignoring event while unsubscribed");
            return;
        }
        match event {
            PageEvent::Scroll => self.on_scroll(),
            PageEvent::Resize => {
                self.measure_all();
                self.schedule_pass();
            }
            PageEvent::Frame => self.on_frame(),
            PageEvent::FragmentChanged => self.on_fragment_change(),
            PageEvent::Timer(Timer::InitialCheck) => self.update_active(),
            PageEvent::Timer(Timer::Settle) => {
                if let Some(id) = self.pending_settle.take() {
                    debug!(section = %id, "settle delay elapsed, scrolling to initial fragment");
                    self.navigate_to(&id);
                }
            }
        }
    }

    /// Records a scroll event and requests a frame unless a detection pass is already pending.
    pub fn on_scroll(&mut self) {
        if self.subscription.is_none() {
            return;
        }
        self.stats.scroll_events += 1;
        self.schedule_pass();
    }

    /// Runs the pending detection pass, if any.
    pub fn on_frame(&mut self) {
        if self.coalescer.run() {
            self.stats.frames_run += 1;
            self.update_active();
        }
    }

    /// Makes `id` active and smooth-scrolls to it, logging and ignoring unknown ids.
    pub fn navigate_to(&mut self, id: &str) {
        if let Err(err) = self.try_navigate_to(id) {
            warn!(%err, "ignoring navigation request");
        }
    }

    /// Makes `id` active immediately, starts a smooth scroll to its top below the nav bar, and
    /// writes its fragment.
    ///
    /// A section that cannot be measured yet is still highlighted, but no scroll is issued.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::UnknownSection`] if `id` is not a declared section. State is left
    /// unchanged in that case.
    pub fn try_navigate_to(&mut self, id: &str) -> Result<(), TrackerError> {
        let Some(index) = self.index_of(id) else {
            self.stats.rejected_navigations += 1;
            return Err(TrackerError::UnknownSection(id.to_string()));
        };
        self.stats.navigations += 1;
        self.pending_settle = None;

        if self.active.as_deref() != Some(id) {
            self.stats.section_changes += 1;
        }
        self.active = Some(id.to_string());

        if self.sections[index].extent.is_none() {
            self.sections[index].extent = self.page.measure(id);
        }
        if let Some(extent) = self.sections[index].extent {
            let nav_bar_height = self.page.nav_bar_height().unwrap_or(self.nav_bar_height);
            let target = self.page.clamp_offset(extent.top - nav_bar_height);
            if (self.page.scroll_position() - target).abs() <= NAVIGATION_TOLERANCE {
                debug!(section = %id, target, "already at navigation target");
                self.phase = Phase::Idle;
            } else {
                debug!(section = %id, target, "navigating");
                self.phase = Phase::Navigating {
                    id: id.to_string(),
                    target,
                };
            }
            self.page.smooth_scroll_to(target);
        } else {
            warn!(section = %id, "navigation target not measurable, highlighting only");
        }

        self.write_fragment(id);
        Ok(())
    }

    /// Follows a fragment changed from outside the tracker.
    ///
    /// Fragments the tracker wrote itself are ignored, as are fragments naming no section.
    pub fn on_fragment_change(&mut self) {
        let Some(fragment) = self.location.fragment() else {
            return;
        };
        if self.last_written.as_deref() == Some(fragment.as_str()) {
            trace!(%fragment, "fragment change was self-caused");
            return;
        }
        if self.index_of(&fragment).is_none() {
            debug!(%fragment, "fragment does not name a section");
            return;
        }
        self.stats.fragment_edits_followed += 1;
        self.navigate_to(&fragment);
    }

    /// Unsubscribes from page events and drops pending work. Safe to call at any time.
    ///
    /// A smooth scroll already in flight is left to finish.
    pub fn teardown(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            self.events.unsubscribe(subscription);
            debug!("section tracker torn down");
        }
        self.coalescer.cancel();
        self.pending_settle = None;
    }

    #[must_use]
    /// Id of the active section, `None` only before the first initialisation.
    pub fn active_section_id(&self) -> Option<&str> {
        self.active.as_deref()
    }

    #[must_use]
    /// Current navigation phase.
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    #[must_use]
    /// Declared sections with their latest measurements.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    #[must_use]
    /// Counters accumulated since construction.
    pub fn stats(&self) -> &TrackerStats {
        &self.stats
    }

    #[must_use]
    /// Tunables in effect.
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    #[must_use]
    /// Navigation bar height used for detection.
    pub fn nav_bar_height(&self) -> f64 {
        self.nav_bar_height
    }

    #[must_use]
    /// Whether the tracker currently receives page events.
    pub fn is_subscribed(&self) -> bool {
        self.subscription.is_some()
    }

    #[must_use]
    /// Read-only view for rendering.
    pub fn snapshot(&self) -> Snapshot<'_> {
        let scroll = self.page.scroll_position();
        Snapshot {
            active: self.active.as_deref(),
            phase: &self.phase,
            progress: scroll_progress(scroll, self.page.scroll_metrics()),
            scrolled: is_scrolled(scroll, self.config.scrolled_threshold),
        }
    }

    #[must_use]
    /// The page collaborator.
    pub fn page(&self) -> &P {
        &self.page
    }

    /// Mutable access to the page, for hosts applying user scrolling.
    pub fn page_mut(&mut self) -> &mut P {
        &mut self.page
    }

    #[must_use]
    /// The location collaborator.
    pub fn location(&self) -> &L {
        &self.location
    }

    /// Mutable access to the location, for hosts applying user fragment edits.
    pub fn location_mut(&mut self) -> &mut L {
        &mut self.location
    }

    #[must_use]
    /// The event source collaborator.
    pub fn events(&self) -> &E {
        &self.events
    }

    /// Mutable access to the event source, for hosts pumping events.
    pub fn events_mut(&mut self) -> &mut E {
        &mut self.events
    }

    fn index_of(&self, id: &str) -> Option<usize> {
        self.sections.iter().position(|section| section.id == id)
    }

    fn schedule_pass(&mut self) {
        if self.coalescer.schedule() {
            self.events.request_frame();
        }
    }

    fn measure_all(&mut self) {
        for section in &mut self.sections {
            section.extent = self.page.measure(&section.id);
        }
    }

    fn measure_missing(&mut self) {
        for section in self.sections.iter_mut().filter(|s| s.extent.is_none()) {
            section.extent = self.page.measure(&section.id);
        }
    }

    fn update_active(&mut self) {
        self.measure_missing();
        let scroll = self.page.scroll_position();

        if let Phase::Navigating { id, target } = &self.phase {
            if (scroll - target).abs() <= NAVIGATION_TOLERANCE {
                debug!(section = %id, "navigation landed");
                self.phase = Phase::Idle;
            } else if !self.page.is_smooth_scrolling() {
                debug!(section = %id, scroll, "navigation interrupted");
                self.phase = Phase::Idle;
            }
        }

        let Some(index) = detect::active_index(
            &self.sections,
            scroll,
            self.nav_bar_height,
            self.config.detection_margin,
        ) else {
            trace!(scroll, "no section matched, keeping previous");
            return;
        };

        let id = &self.sections[index].id;
        if self.active.as_deref() == Some(id.as_str()) {
            return;
        }
        let id = id.clone();
        debug!(section = %id, scroll, "active section changed");
        self.stats.section_changes += 1;
        self.write_fragment(&id);
        self.active = Some(id);
    }

    fn write_fragment(&mut self, id: &str) {
        if self.location.fragment().as_deref() == Some(id) {
            self.stats.redundant_writes_skipped += 1;
        } else {
            self.location.replace_fragment(id);
            self.stats.fragment_writes += 1;
            trace!(section = %id, "fragment replaced");
        }
        self.last_written = Some(id.to_string());
    }
}

#[cfg(test)]
#[path = "tests/tracker.rs"]
mod tests;
