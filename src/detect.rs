//! Maps a scroll position to the active section.
//!
//! Each measured section owns the half-open interval starting at its *adjusted top* (measured top
//! minus the navigation bar height minus a fixed detection margin) and spanning its height. The
//! first section in declaration order whose interval contains the scroll position wins, so
//! overlapping boundaries resolve towards the earlier section. The last declared section is special:
//! once the scroll position reaches its adjusted top it stays active through any overscroll past the
//! end of the page.

use crate::section::{Extent, Section};

/// Default detection margin in page units, matching the browser-pixel behaviour of the page.
pub const DEFAULT_DETECTION_MARGIN: f64 = 100.0;

#[must_use]
/// Top offset at which a section starts counting as active.
pub fn adjusted_top(extent: &Extent, nav_bar_height: f64, margin: f64) -> f64 {
    extent.top - nav_bar_height - margin
}

#[must_use]
/// Index of the section that should be active at `scroll`, or `None` when nothing matches.
///
/// Unmeasured sections never match. The tail rule only applies when the last declared section has
/// been measured.
pub fn active_index(
    sections: &[Section],
    scroll: f64,
    nav_bar_height: f64,
    margin: f64,
) -> Option<usize> {
    if let Some((last_index, last)) = sections.iter().enumerate().next_back() {
        if let Some(extent) = &last.extent {
            if scroll >= adjusted_top(extent, nav_bar_height, margin) {
                return Some(last_index);
            }
        }
    }

    sections.iter().position(|section| {
        section.extent.as_ref().is_some_and(|extent| {
            let start = adjusted_top(extent, nav_bar_height, margin);
            scroll >= start && scroll < start + extent.height
        })
    })
}

#[cfg(test)]
#[path = "tests/detect.rs"]
mod tests;
