use super::{active_index, adjusted_top};
use crate::section::{Extent, Section};

const NAV: f64 = 80.0;
const MARGIN: f64 = 100.0;

/// home, about, contact with adjusted intervals [0,800), [800,1600), [1600,2400).
fn page() -> Vec<Section> {
    vec![
        Section::with_extent("home", 180.0, 800.0),
        Section::with_extent("about", 980.0, 800.0),
        Section::with_extent("contact", 1780.0, 800.0),
    ]
}

fn id_at(sections: &[Section], scroll: f64) -> Option<&str> {
    active_index(sections, scroll, NAV, MARGIN).map(|i| sections[i].id.as_str())
}

#[test]
fn test_adjusted_top_subtracts_nav_and_margin() {
    let extent = Extent::new(980.0, 800.0);
    assert!((adjusted_top(&extent, NAV, MARGIN) - 800.0).abs() < f64::EPSILON);
}

#[test]
fn test_each_position_maps_to_containing_section() {
    let sections = page();
    for scroll in (0..1600).step_by(50) {
        let expected = if scroll < 800 { "home" } else { "about" };
        assert_eq!(id_at(&sections, f64::from(scroll)), Some(expected), "scroll {scroll}");
    }
}

#[test]
fn test_interval_is_half_open() {
    let sections = page();
    assert_eq!(id_at(&sections, 799.9), Some("home"));
    assert_eq!(id_at(&sections, 800.0), Some("about"));
}

#[test]
fn test_last_section_holds_through_overscroll() {
    let sections = page();
    for scroll in [1600.0, 2399.0, 2400.0, 2500.0, 1.0e6] {
        assert_eq!(id_at(&sections, scroll), Some("contact"), "scroll {scroll}");
    }
}

#[test]
fn test_above_first_section_matches_nothing() {
    let sections = page();
    assert_eq!(id_at(&sections, -10.0), None);
}

#[test]
fn test_overlap_prefers_earlier_section() {
    let sections = vec![
        Section::with_extent("a", 180.0, 1000.0),
        Section::with_extent("b", 980.0, 800.0),
        Section::with_extent("c", 3000.0, 100.0),
    ];
    assert_eq!(id_at(&sections, 900.0), Some("a"));
    assert_eq!(id_at(&sections, 1000.0), Some("b"));
}

#[test]
fn test_gap_between_sections_matches_nothing() {
    let sections = vec![
        Section::with_extent("a", 180.0, 400.0),
        Section::with_extent("b", 980.0, 800.0),
        Section::with_extent("c", 1780.0, 800.0),
    ];
    assert_eq!(id_at(&sections, 500.0), None);
}

#[test]
fn test_unmeasured_sections_are_skipped() {
    let mut sections = page();
    sections[1].extent = None;
    assert_eq!(id_at(&sections, 850.0), None);
    assert_eq!(id_at(&sections, 100.0), Some("home"));
}

#[test]
fn test_unmeasured_last_section_disables_tail_rule() {
    let mut sections = page();
    sections[2].extent = None;
    assert_eq!(id_at(&sections, 2500.0), None);
}
