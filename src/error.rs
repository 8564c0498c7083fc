//! Error types for the section tracker.

/// Errors raised when the tracker's contract is violated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TrackerError {
    /// `initialize` was given an empty section list.
    #[error("at least one section must be declared")]
    NoSections,

    /// Two declared sections share an id.
    #[error("duplicate section id: {0}")]
    DuplicateSection(String),

    /// A navigation target is not a declared section.
    #[error("unknown section id: {0}")]
    UnknownSection(String),
}
