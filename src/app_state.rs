//! The pager state bridging the document, the section tracker and the terminal.
//!
//! The terminal event loop is the tracker's host. User input moves the page or issues navigation
//! commands; every loop iteration then advances the page animation and the event queue clock and
//! feeds whatever events were released to the tracker, in arrival order.

use crate::config::Config;
use crate::document::Document;
use crate::nav::{NavAction, NavMenu};
use crate::platform::{Location, PageEvent};
use crate::terminal::{EventQueue, TerminalLocation, TerminalPage};
use crate::tracker::{SectionTracker, TrackerStats};
use serde::Serialize;
use std::io;
use std::time::Instant;
use tracing::info;

/// Section tracker running on the terminal platform.
pub type TerminalTracker = SectionTracker<TerminalPage, TerminalLocation, EventQueue>;

#[derive(PartialEq, Debug)]
/// Determines which UI screen renders and how input is interpreted.
pub enum View {
    /// Scrolling the page.
    Page,
    /// Captures vim-style command input after ':' keystroke.
    Command,
}

#[derive(Serialize)]
/// Summary of a session, printed as JSON on exit when requested.
pub struct Report {
    /// Document address with the final fragment.
    pub location: String,
    /// Section active when the pager closed.
    pub active_section: Option<String>,
    /// History replacements made to the fragment.
    pub fragment_replacements: u64,
    /// Tracker counters.
    pub stats: TrackerStats,
}

/// Pager session state.
pub struct AppState {
    /// The document shown as a page.
    pub document: Document,
    /// Owner of the active section and the fragment.
    pub tracker: TerminalTracker,
    /// Navigation bar entries.
    pub nav: NavMenu,
    /// Active UI screen determining input handling.
    pub current_view: View,
    /// Accumulates vim-style command input after ':' is pressed.
    pub command_buffer: String,
    /// Status feedback displayed in the status bar.
    pub message: Option<String>,
}

impl AppState {
    /// Mounts a tracker on the document's sections.
    ///
    /// `fragment` is the address fragment the page was opened with, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the document declares no sections.
    pub fn new(
        document: Document,
        cfg: &Config,
        fragment: Option<&str>,
        now: Instant,
    ) -> io::Result<Self> {
        let nav_bar_height = f64::from(cfg.nav_bar_height);
        #[allow(clippy::cast_precision_loss)]
        let page = TerminalPage::new(
            document.extents(),
            document.height() as f64,
            nav_bar_height,
            cfg.scroll_duration(),
            now,
        );
        let location = TerminalLocation::new(fragment);
        let events = EventQueue::new(cfg.frame_interval(), now);

        let mut tracker = SectionTracker::new(page, location, events, cfg.tracker_config());
        tracker
            .initialize(document.sections(), nav_bar_height)
            .map_err(io::Error::other)?;

        let nav = NavMenu::new(
            document
                .headings
                .iter()
                .map(|h| (h.id.as_str(), h.title.as_str())),
            &cfg.routes,
        );
        info!(path = %document.path.display(), "page opened");

        Ok(Self {
            document,
            tracker,
            nav,
            current_view: View::Page,
            command_buffer: String::new(),
            message: None,
        })
    }

    /// Scrolls the page by `rows` as the user would.
    pub fn scroll_by(&mut self, rows: f64) {
        if self.tracker.page_mut().scroll_by(rows) {
            self.tracker.events_mut().push(PageEvent::Scroll);
        }
    }

    /// Jumps to the top of the page.
    pub fn scroll_to_top(&mut self) {
        if self.tracker.page_mut().jump_to(0.0) {
            self.tracker.events_mut().push(PageEvent::Scroll);
        }
    }

    /// Jumps to the end of the page.
    pub fn scroll_to_end(&mut self) {
        let end = self.tracker.page().max_scroll();
        if self.tracker.page_mut().jump_to(end) {
            self.tracker.events_mut().push(PageEvent::Scroll);
        }
    }

    /// Sets the viewport size the page is first drawn with.
    pub fn set_viewport(&mut self, viewport_rows: u16) {
        self.tracker.page_mut().set_viewport_height(viewport_rows);
    }

    /// Records a new viewport size after the terminal was resized.
    pub fn resize(&mut self, viewport_rows: u16) {
        self.tracker.page_mut().set_viewport_height(viewport_rows);
        self.tracker.events_mut().push(PageEvent::Resize);
    }

    /// Navigates `step` sections forward (or backward when negative) from the active one.
    pub fn navigate_relative(&mut self, step: isize) {
        let sections = self.tracker.sections();
        if sections.is_empty() {
            return;
        }
        let current = self
            .tracker
            .active_section_id()
            .and_then(|id| sections.iter().position(|s| s.id == id))
            .unwrap_or(0);
        let last = sections.len() - 1;
        let target = current.saturating_add_signed(step).min(last);
        let id = sections[target].id.clone();
        self.tracker.navigate_to(&id);
    }

    /// Activates the nav bar item at `index`.
    pub fn activate_nav(&mut self, index: usize) {
        match self.nav.activate(index) {
            Some(NavAction::Navigate(id)) => self.tracker.navigate_to(&id),
            Some(NavAction::Route(path)) => {
                self.message = Some(format!("{path} is served outside this page"));
            }
            None => {}
        }
    }

    /// Changes the fragment as if the user had edited the address.
    pub fn edit_fragment(&mut self, raw: &str) {
        self.tracker.location_mut().edit(raw);
        self.tracker.events_mut().push(PageEvent::FragmentChanged);
    }

    /// Advances animations and timers to `now` and delivers released events to the tracker.
    pub fn pump(&mut self, now: Instant) {
        if self.tracker.page_mut().tick(now) {
            self.tracker.events_mut().push(PageEvent::Scroll);
        }
        self.tracker.events_mut().advance_to(now);
        for event in self.tracker.events_mut().drain() {
            self.tracker.handle(event);
        }
    }

    /// Runs the command in the command buffer. Returns `true` when the pager should quit.
    pub fn execute_command(&mut self) -> bool {
        let cmd = std::mem::take(&mut self.command_buffer);
        self.current_view = View::Page;

        let cmd = cmd.trim();
        match cmd {
            "q" | "q!" => return true,
            "top" => self.scroll_to_top(),
            _ => {
                if let Some(raw) = cmd.strip_prefix("goto ").or_else(|| {
                    cmd.starts_with('#').then_some(cmd)
                }) {
                    self.edit_fragment(raw.trim());
                } else {
                    self.message = Some(format!("Unknown command: {cmd}"));
                }
            }
        }
        false
    }

    #[must_use]
    /// Address of the document with its current fragment.
    pub fn href(&self) -> String {
        self.tracker
            .location()
            .href(&self.document.path.display().to_string())
    }

    #[must_use]
    /// Session summary.
    pub fn report(&self) -> Report {
        Report {
            location: self.href(),
            active_section: self.tracker.active_section_id().map(str::to_string),
            fragment_replacements: self.tracker.location().replacements(),
            stats: self.tracker.stats().clone(),
        }
    }

    #[must_use]
    /// Fragment currently in the address.
    pub fn fragment(&self) -> Option<String> {
        self.tracker.location().fragment()
    }
}

#[cfg(test)]
#[path = "tests/app_state.rs"]
mod tests;
