//! A document rendered as one long page of sections.
//!
//! Headings up to a configured depth split the document into sections. Each section gets a unique
//! slug id (the same shape GitHub gives heading anchors) and a row extent running from its heading
//! to the next section heading, or to the end of the document.

use crate::formats::Format;
use crate::section::{Extent, Section};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::{fs, io};
use streaming_iterator::StreamingIterator;
use tree_sitter::{Parser, Query, QueryCursor};

#[derive(Clone, Debug, PartialEq, Eq)]
/// A heading that starts a section of the page.
pub struct Heading {
    /// Unique fragment id derived from the title.
    pub id: String,
    /// Heading text without markup symbols.
    pub title: String,
    /// Nesting depth (1 for top-level).
    pub level: usize,
    /// Zero-based row of the heading line.
    pub row: usize,
}

/// Parsed document lines and the headings that split them into sections.
pub struct Document {
    /// Source file the document was read from.
    pub path: PathBuf,
    /// Document text, one entry per rendered row.
    pub lines: Vec<String>,
    /// Section headings in page order.
    pub headings: Vec<Heading>,
}

impl Document {
    /// Reads and parses a document from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path, format: &impl Format, max_level: usize) -> io::Result<Self> {
        let source = fs::read_to_string(path)?;
        Self::parse(path, &source, format, max_level)
    }

    /// Parses document text, keeping headings of level `max_level` or shallower.
    ///
    /// # Errors
    ///
    /// Returns an error if the grammar cannot be loaded or the query is invalid.
    pub fn parse(
        path: &Path,
        source: &str,
        format: &impl Format,
        max_level: usize,
    ) -> io::Result<Self> {
        let language = format.language();
        let mut parser = Parser::new();
        parser.set_language(&language).map_err(io::Error::other)?;
        let tree = parser
            .parse(source, None)
            .ok_or_else(|| io::Error::other("tree-sitter produced no parse tree"))?;
        let query = Query::new(&language, format.section_query()).map_err(io::Error::other)?;

        let mut found = Vec::new();
        let mut cursor = QueryCursor::new();
        let mut matches = cursor.matches(&query, tree.root_node(), source.as_bytes());
        while let Some(m) = matches.next() {
            for capture in m.captures {
                let text = capture.node.utf8_text(source.as_bytes()).unwrap_or_default();
                let level = format.heading_level(text);
                if level == 0 || level > max_level {
                    continue;
                }
                found.push((
                    capture.node.start_position().row,
                    level,
                    format.heading_title(text).to_string(),
                ));
            }
        }
        found.sort_by_key(|(row, _, _)| *row);
        found.dedup_by_key(|(row, _, _)| *row);

        let mut ids = SlugAllocator::default();
        let headings = found
            .into_iter()
            .map(|(row, level, title)| Heading {
                id: ids.allocate(&title),
                title,
                level,
                row,
            })
            .collect();

        Ok(Self {
            path: path.to_path_buf(),
            lines: source.lines().map(str::to_string).collect(),
            headings,
        })
    }

    #[must_use]
    /// Number of rows in the page.
    pub fn height(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    /// Row extent of the section started by heading `index`.
    pub fn extent(&self, index: usize) -> Option<Extent> {
        let heading = self.headings.get(index)?;
        let end = self
            .headings
            .get(index + 1)
            .map_or(self.height(), |next| next.row);
        Some(Extent::new(
            to_units(heading.row),
            to_units(end.saturating_sub(heading.row)),
        ))
    }

    #[must_use]
    /// Extents keyed by section id, for page measurement.
    pub fn extents(&self) -> HashMap<String, Extent> {
        self.headings
            .iter()
            .enumerate()
            .filter_map(|(i, heading)| Some((heading.id.clone(), self.extent(i)?)))
            .collect()
    }

    #[must_use]
    /// Unmeasured tracker sections in page order.
    pub fn sections(&self) -> Vec<Section> {
        self.headings
            .iter()
            .map(|heading| Section::new(heading.id.clone()))
            .collect()
    }
}

#[allow(clippy::cast_precision_loss)]
fn to_units(rows: usize) -> f64 {
    rows as f64
}

#[must_use]
/// Lowercases a title into an anchor slug: alphanumerics and `_` kept, spaces and hyphens become
/// `-`, everything else is dropped.
pub fn slugify(title: &str) -> String {
    title
        .trim()
        .chars()
        .filter_map(|c| {
            if c.is_alphanumeric() || c == '_' {
                Some(c.to_lowercase().collect::<String>())
            } else if c == ' ' || c == '-' {
                Some("-".to_string())
            } else {
                None
            }
        })
        .collect()
}

#[derive(Default)]
/// Hands out unique slugs, suffixing repeats with `-1`, `-2`, ...
struct SlugAllocator {
    seen: HashMap<String, usize>,
}

impl SlugAllocator {
    fn allocate(&mut self, title: &str) -> String {
        let mut base = slugify(title);
        if base.is_empty() {
            base = "section".to_string();
        }
        let mut candidate = base.clone();
        while let Some(count) = self.seen.get_mut(&candidate) {
            *count += 1;
            candidate = format!("{base}-{count}");
        }
        self.seen.insert(candidate.clone(), 0);
        candidate
    }
}

#[cfg(test)]
#[path = "tests/document.rs"]
mod tests;
