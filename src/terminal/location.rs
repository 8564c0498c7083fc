//! In-memory stand-in for the browser URL fragment.

use crate::fragment;
use crate::platform::Location;

#[derive(Debug, Default)]
/// Fragment of the page's address, with a count of history replacements.
pub struct TerminalLocation {
    fragment: Option<String>,
    replacements: u64,
}

impl TerminalLocation {
    #[must_use]
    /// Starts at `initial`, given with or without its leading `#`.
    pub fn new(initial: Option<&str>) -> Self {
        Self {
            fragment: initial.and_then(fragment::parse).map(str::to_string),
            replacements: 0,
        }
    }

    /// Changes the fragment as a user editing the address would.
    ///
    /// The host must follow this with a fragment-changed event.
    pub fn edit(&mut self, raw: &str) {
        self.fragment = fragment::parse(raw).map(str::to_string);
    }

    #[must_use]
    /// Number of history replacements made through [`Location::replace_fragment`].
    pub fn replacements(&self) -> u64 {
        self.replacements
    }

    #[must_use]
    /// Address of `path` with the current fragment appended.
    pub fn href(&self, path: &str) -> String {
        match &self.fragment {
            Some(id) => format!("{path}{}", fragment::format(id)),
            None => path.to_string(),
        }
    }
}

impl Location for TerminalLocation {
    fn fragment(&self) -> Option<String> {
        self.fragment.clone()
    }

    fn replace_fragment(&mut self, id: &str) {
        self.fragment = Some(id.to_string());
        self.replacements += 1;
    }
}
