//! Terminal implementations of the platform seams.
//!
//! Page units are terminal rows. Time is passed in explicitly (`tick`, `advance_to`) so that the
//! event loop owns the clock and tests can step it deterministically.

pub mod events;
pub mod location;
pub mod page;

pub use events::EventQueue;
pub use location::TerminalLocation;
pub use page::{ScrollAnimation, TerminalPage};
