//! scrollspy: scroll-driven active-section tracking for long single pages.
//!
//! The [`tracker::SectionTracker`] decides which declared section is in view as a page scrolls,
//! keeps the address fragment in step without redundant history writes, and exposes a
//! `navigate_to` command for navigation links. It runs against the [`platform`] traits, so any
//! host can drive it. The crate ships one such host: a terminal pager that renders a markdown
//! document as a page and its headings as sections.

pub mod app_state;
pub mod config;
pub mod detect;
pub mod document;
pub mod error;
pub mod formats;
pub mod fragment;
pub mod nav;
pub mod platform;
pub mod progress;
pub mod scheduler;
pub mod section;
pub mod terminal;
pub mod tracker;
pub mod ui;
