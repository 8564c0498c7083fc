//! Section representation for a long single page.
//!
//! A section is a named, vertically stacked region of the page. Its identity (id and declaration
//! order) is fixed when the tracker is initialised; only its measured extent changes as the layout
//! settles or the viewport is resized.

#[derive(Clone, Copy, Debug, PartialEq)]
/// Vertical extent of a rendered section, in page units (pixels in a browser, rows in a terminal).
pub struct Extent {
    /// Offset of the section's top edge from the top of the page.
    pub top: f64,
    /// Rendered height of the section.
    pub height: f64,
}

impl Extent {
    #[must_use]
    /// Builds an extent from a top offset and a height.
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    #[must_use]
    /// Offset of the section's bottom edge (exclusive).
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

#[derive(Clone, Debug, PartialEq)]
/// Named page region with its declaration order and latest measurement.
pub struct Section {
    /// Unique short identifier, also used as the URL fragment.
    pub id: String,
    /// Position in the page, assigned from declaration order.
    pub order: usize,
    /// Latest measured extent, `None` while the section cannot be measured.
    pub extent: Option<Extent>,
}

impl Section {
    #[must_use]
    /// Declares an unmeasured section; order is assigned when the tracker is initialised.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            order: 0,
            extent: None,
        }
    }

    #[must_use]
    /// Declares a section with a known extent.
    pub fn with_extent(id: impl Into<String>, top: f64, height: f64) -> Self {
        Self {
            extent: Some(Extent::new(top, height)),
            ..Self::new(id)
        }
    }
}
