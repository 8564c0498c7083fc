//! Configuration to acknowledge developer preferences as well as set defaults.
//!
//! Specifically, we try to find a scrollspy.toml, and if present we load settings from there.
//! This provides the navigation bar geometry, detection margin, timing and section depth.

use crate::tracker::TrackerConfig;
use facet::Facet;
use std::fs;
use std::time::Duration;

#[derive(Facet, Clone)]
/// User preferences loaded from scrollspy.toml or falling back to defaults.
pub struct Config {
    #[facet(default = 3)]
    /// Rows covered by the fixed navigation bar at the top of the page.
    pub nav_bar_height: u16,
    #[facet(default = 2.0)]
    /// Rows before a heading reaches the nav bar at which its section becomes active.
    pub detection_margin: f64,
    #[facet(default = 500)]
    /// Delay before scrolling to the section named by the initial fragment.
    pub settle_delay_ms: u64,
    #[facet(default = 100)]
    /// Delay before the first detection pass when there is no initial fragment.
    pub initial_check_delay_ms: u64,
    #[facet(default = 16)]
    /// Minimum time between frames.
    pub frame_interval_ms: u64,
    #[facet(default = 300)]
    /// Duration of a smooth scroll to a section.
    pub scroll_duration_ms: u64,
    #[facet(default = 1.0)]
    /// Rows scrolled past which the nav bar switches to its compact style.
    pub scrolled_threshold: f64,
    #[facet(default = 2)]
    /// Deepest heading level that starts a section.
    pub section_level: usize,
    #[facet(default = vec![])]
    /// Extra nav bar links handled outside the page, e.g. "resume".
    pub routes: Vec<String>,
}

impl Config {
    #[must_use]
    /// Load configuration from scrollspy.toml if present.
    ///
    /// # Panics
    ///
    /// Panics if the default configuration cannot be parsed.
    pub fn load() -> Self {
        if let Ok(contents) = fs::read_to_string("scrollspy.toml") {
            if let Some(config) = Self::parse(&contents) {
                return config;
            }
        }
        Self::parse("").unwrap()
    }

    #[must_use]
    /// Parses configuration from TOML text, returning `None` if it is malformed.
    pub fn parse(contents: &str) -> Option<Self> {
        facet_toml::from_str::<Self>(contents).ok()
    }

    #[must_use]
    /// Tracker tunables derived from these preferences.
    pub fn tracker_config(&self) -> TrackerConfig {
        TrackerConfig {
            detection_margin: self.detection_margin,
            settle_delay: Duration::from_millis(self.settle_delay_ms),
            initial_check_delay: Duration::from_millis(self.initial_check_delay_ms),
            scrolled_threshold: self.scrolled_threshold,
        }
    }

    #[must_use]
    /// Minimum time between frames.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }

    #[must_use]
    /// Duration of a smooth scroll to a section.
    pub fn scroll_duration(&self) -> Duration {
        Duration::from_millis(self.scroll_duration_ms)
    }
}
