use super::{slugify, Document};
use crate::formats::markdown::MarkdownFormat;
use crate::section::Extent;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

const PAGE: &str = "\
# Home

Welcome.

## About

Bio.
More bio.

### Early life

Details.

## Projects

- one
- two
";

#[test]
fn test_sections_up_to_level() {
    let doc = Document::parse(Path::new("page.md"), PAGE, &MarkdownFormat, 2).unwrap();
    let ids: Vec<&str> = doc.headings.iter().map(|h| h.id.as_str()).collect();
    assert_eq!(ids, vec!["home", "about", "projects"]);
    assert_eq!(doc.headings[1].title, "About");
    assert_eq!(doc.headings[1].level, 2);
    assert_eq!(doc.headings[1].row, 4);
}

#[test]
fn test_extents_are_contiguous() {
    let doc = Document::parse(Path::new("page.md"), PAGE, &MarkdownFormat, 2).unwrap();
    assert_eq!(doc.extent(0), Some(Extent::new(0.0, 4.0)));
    assert_eq!(doc.extent(1), Some(Extent::new(4.0, 9.0)));
    assert_eq!(doc.extent(2), Some(Extent::new(13.0, 4.0)));
    assert_eq!(doc.extent(3), None);
    assert_eq!(doc.height(), 17);
}

#[test]
fn test_deeper_level_splits_further() {
    let doc = Document::parse(Path::new("page.md"), PAGE, &MarkdownFormat, 3).unwrap();
    assert_eq!(doc.headings.len(), 4);
    assert_eq!(doc.headings[2].id, "early-life");
    assert_eq!(doc.extent(1), Some(Extent::new(4.0, 5.0)));
}

#[test]
fn test_duplicate_titles_get_unique_ids() {
    let source = "# Notes\n\n## Notes\n\n## Notes\n\n## ???\n";
    let doc = Document::parse(Path::new("n.md"), source, &MarkdownFormat, 2).unwrap();
    let ids: Vec<&str> = doc.headings.iter().map(|h| h.id.as_str()).collect();
    assert_eq!(ids, vec!["notes", "notes-1", "notes-2", "section"]);
    assert_eq!(doc.sections().len(), 4);
}

#[test]
fn test_slugify() {
    assert_eq!(slugify("About Me"), "about-me");
    assert_eq!(slugify("Skills & Tools"), "skills--tools");
    assert_eq!(slugify("C++ / Rust"), "c--rust");
    assert_eq!(slugify("Café"), "café");
    assert_eq!(slugify("snake_case Notes!"), "snake_case-notes");
}

#[test]
fn test_load_from_disk() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{PAGE}").unwrap();
    let doc = Document::load(file.path(), &MarkdownFormat, 2).unwrap();
    assert_eq!(doc.path, file.path());
    assert_eq!(doc.extents().len(), 3);
}
