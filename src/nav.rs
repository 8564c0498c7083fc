//! Navigation bar model.
//!
//! The bar lists the page's sections followed by any route links (pages outside this one, such as a
//! résumé). Only section items are ever highlighted: a route shares no id space with the sections
//! even if the names collide.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// What activating a nav item does.
pub enum NavKind {
    /// Scrolls to a section of this page.
    Section,
    /// Leaves the page for another route.
    Route,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// A single entry of the navigation bar.
pub struct NavItem {
    /// Section id or route name.
    pub id: String,
    /// Text shown in the bar.
    pub label: String,
    /// Section link or route link.
    pub kind: NavKind,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Command produced by activating a nav item.
pub enum NavAction {
    /// Navigate to a section of this page.
    Navigate(String),
    /// Hand a route path (e.g. `/resume`) to the host.
    Route(String),
}

#[derive(Clone, Debug, Default)]
/// Ordered navigation bar entries.
pub struct NavMenu {
    /// Section items in page order, then route items.
    pub items: Vec<NavItem>,
}

impl NavMenu {
    #[must_use]
    /// Builds the menu from `(id, label)` section pairs and route names.
    pub fn new<'a>(
        sections: impl IntoIterator<Item = (&'a str, &'a str)>,
        routes: &[String],
    ) -> Self {
        let mut items: Vec<NavItem> = sections
            .into_iter()
            .map(|(id, label)| NavItem {
                id: id.to_string(),
                label: label.to_string(),
                kind: NavKind::Section,
            })
            .collect();
        items.extend(routes.iter().map(|route| NavItem {
            id: route.clone(),
            label: capitalise(route),
            kind: NavKind::Route,
        }));
        Self { items }
    }

    #[must_use]
    /// Whether `item` should be drawn as the current location.
    pub fn is_highlighted(item: &NavItem, active: Option<&str>) -> bool {
        item.kind == NavKind::Section && active == Some(item.id.as_str())
    }

    #[must_use]
    /// Index of the highlighted item, if any.
    pub fn highlighted(&self, active: Option<&str>) -> Option<usize> {
        self.items
            .iter()
            .position(|item| Self::is_highlighted(item, active))
    }

    #[must_use]
    /// Command for the item at `index`, or `None` if there is no such item.
    pub fn activate(&self, index: usize) -> Option<NavAction> {
        self.items.get(index).map(|item| match item.kind {
            NavKind::Section => NavAction::Navigate(item.id.clone()),
            NavKind::Route => NavAction::Route(format!("/{}", item.id)),
        })
    }
}

fn capitalise(name: &str) -> String {
    let mut chars = name.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
