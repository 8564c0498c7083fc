//! URL fragment helpers.
//!
//! Fragments are stored without their leading `#`. An empty fragment (`#` alone) is the same as no
//! fragment at all.

#[must_use]
/// Strips the leading `#` from a raw fragment, returning `None` when nothing remains.
pub fn parse(raw: &str) -> Option<&str> {
    let id = raw.strip_prefix('#').unwrap_or(raw).trim();
    (!id.is_empty()).then_some(id)
}

#[must_use]
/// Renders a section id as a fragment, e.g. `about` becomes `#about`.
pub fn format(id: &str) -> String {
    format!("#{id}")
}

#[must_use]
/// Splits a `path#fragment` argument into its path and optional fragment.
pub fn split_target(target: &str) -> (&str, Option<&str>) {
    match target.split_once('#') {
        Some((path, raw)) => (path, parse(raw)),
        None => (target, None),
    }
}
