//! Format trait and implementations for different document types.
//!
//! A format tells the document loader how to find section headings with tree-sitter: which grammar
//! to parse with and which query captures a heading node.

pub mod markdown;

/// Tree-sitter grammar and heading query for one document format.
pub trait Format {
    /// Grammar used to parse documents of this format.
    fn language(&self) -> tree_sitter::Language;
    /// Query with a single capture per section heading node.
    fn section_query(&self) -> &str;
    /// Nesting level of a captured heading, given its source text.
    fn heading_level(&self, heading: &str) -> usize;
    /// Heading text without markup.
    fn heading_title<'a>(&self, heading: &'a str) -> &'a str;
}
