//! Breadcrumb trail transform tests.

use pretty_assertions::assert_eq;

use pokedex_tui::crumbs::{push_crumb, remove_crumbs, Crumb};

fn crumb(label: &str) -> Crumb {
    Crumb::new(label, format!("/pokemon/{label}"))
}

#[test]
fn push_onto_empty_trail() {
    let trail = push_crumb(&[], crumb("bulbasaur"));
    assert_eq!(trail.len(), 1);
    assert_eq!(trail[0].content, "bulbasaur");
    assert!(!trail[0].active);
}

#[test]
fn push_marks_prior_crumbs_active() {
    let trail = push_crumb(&[], crumb("bulbasaur"));
    let trail = push_crumb(&trail, crumb("ivysaur"));
    assert_eq!(trail.len(), 2);
    assert!(trail[0].active);
    assert!(!trail[1].active);
}

#[test]
fn push_caps_trail_at_three_entries() {
    let mut trail = Vec::new();
    for label in ["a", "b", "c", "d"] {
        trail = push_crumb(&trail, crumb(label));
    }
    // Oldest crumb dropped, newest inactive, the rest active.
    assert_eq!(
        trail
            .iter()
            .map(|entry| entry.content.as_str())
            .collect::<Vec<_>>(),
        vec!["b", "c", "d"]
    );
    assert!(trail[0].active);
    assert!(trail[1].active);
    assert!(!trail[2].active);
}

#[test]
fn remove_rewinds_and_reactivates() {
    let mut trail = Vec::new();
    for label in ["a", "b", "c"] {
        trail = push_crumb(&trail, crumb(label));
    }
    let trail = remove_crumbs(&trail, 1);
    assert_eq!(
        trail
            .iter()
            .map(|entry| entry.content.as_str())
            .collect::<Vec<_>>(),
        vec!["a", "b"]
    );
    assert!(trail.iter().all(|entry| entry.active));
}

#[test]
fn remove_past_start_is_empty() {
    let trail = push_crumb(&[], crumb("a"));
    assert!(remove_crumbs(&trail, 5).is_empty());
    assert!(remove_crumbs(&[], 1).is_empty());
}

#[test]
fn remove_zero_keeps_entries_but_marks_active() {
    let trail = push_crumb(&[], crumb("a"));
    let trail = remove_crumbs(&trail, 0);
    assert_eq!(trail.len(), 1);
    assert!(trail[0].active);
}
