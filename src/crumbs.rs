//! Breadcrumb trail calculus.
//!
//! View changes in the TUI do not keep any native history, so the trail
//! travels with the navigation state: every forward navigation derives a
//! new trail from the old one, and back/delete flows derive a trimmed
//! one. Both operations are pure old-trail-in, new-trail-out transforms.

use serde::{Deserialize, Serialize};

/// One entry of the trail. `to` is the route path the crumb jumps back
/// to; `active` is false only on the terminal crumb (the current page,
/// which is not clickable).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Crumb {
    pub content: String,
    pub to: String,
    pub active: bool,
}

impl Crumb {
    pub fn new(content: impl Into<String>, to: impl Into<String>) -> Crumb {
        Crumb {
            content: content.into(),
            to: to.into(),
            active: false,
        }
    }
}

/// Existing crumbs kept when appending; the displayed trail never grows
/// past `MAX_PRIOR_CRUMBS + 1` entries.
pub const MAX_PRIOR_CRUMBS: usize = 2;

/// Trail for a forward navigation: every existing crumb becomes active
/// (it is no longer the current page), the oldest entries beyond the cap
/// are silently dropped, and the destination crumb lands at the end with
/// `active: false`.
pub fn push_crumb(trail: &[Crumb], next: Crumb) -> Vec<Crumb> {
    let start = trail.len().saturating_sub(MAX_PRIOR_CRUMBS);
    let mut crumbs: Vec<Crumb> = trail[start..]
        .iter()
        .map(|crumb| Crumb {
            active: true,
            ..crumb.clone()
        })
        .collect();
    crumbs.push(Crumb {
        active: false,
        ..next
    });
    crumbs
}

/// Trail after rewinding `count` steps (back navigation, or a delete
/// flow returning several screens up at once). All surviving crumbs are
/// active; rewinding past the start yields an empty trail.
pub fn remove_crumbs(trail: &[Crumb], count: usize) -> Vec<Crumb> {
    let keep = trail.len().saturating_sub(count);
    trail[..keep]
        .iter()
        .map(|crumb| Crumb {
            active: true,
            ..crumb.clone()
        })
        .collect()
}
