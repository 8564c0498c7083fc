//! Markdown format implementation using tree-sitter-md.
//!
//! Sections start at ATX-style headings (# syntax).

use crate::formats::Format;

/// Tree-sitter queries for ATX-style markdown headings (# syntax).
pub struct MarkdownFormat;

impl Format for MarkdownFormat {
    fn language(&self) -> tree_sitter::Language {
        tree_sitter_md::LANGUAGE.into()
    }

    fn section_query(&self) -> &'static str {
        "(atx_heading) @heading"
    }

    fn heading_level(&self, heading: &str) -> usize {
        heading
            .trim_start()
            .chars()
            .take_while(|c| *c == '#')
            .count()
    }

    fn heading_title<'a>(&self, heading: &'a str) -> &'a str {
        let line = heading.lines().next().unwrap_or_default();
        let title = line.trim().trim_start_matches('#').trim();
        // Optional closing sequence: `## Title ##`
        let stripped = title.trim_end_matches('#');
        if stripped.len() < title.len() && stripped.ends_with(' ') {
            stripped.trim_end()
        } else {
            title
        }
    }
}
