//! Evolution chain traversal.
//!
//! The species endpoint points at a recursively nested evolution tree
//! (arbitrary branching, e.g. eevee). [`flatten_chain`] turns that tree
//! into the two shapes the UI needs: a flat name list for the selectable
//! stage list and a leveled path for generation-by-generation display.
//! Custom pokemon carry only single forward/backward name references, so
//! they get the separate linked walk in [`linked_line`].

use std::collections::{HashSet, VecDeque};

use serde::{Deserialize, Serialize};

/// One species plus its evolutionary children, owned all the way down.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EvolutionNode {
    pub species: String,
    pub evolves_to: Vec<EvolutionNode>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EvolutionInfo {
    /// Every species in the tree, in level order, each exactly once.
    pub names: Vec<String>,
    /// One inner list per tree depth, preserving sibling order.
    pub levels: Vec<Vec<String>>,
}

/// Breadth-first level-order flattening with an explicit queue. A visited
/// set keyed by species name guarantees termination even if the source
/// data were cyclic; a missing root degrades to empty outputs and the
/// caller renders the species on its own.
pub fn flatten_chain(root: Option<&EvolutionNode>) -> EvolutionInfo {
    let mut info = EvolutionInfo::default();
    let Some(root) = root else {
        return info;
    };

    let mut queue: VecDeque<&EvolutionNode> = VecDeque::new();
    let mut visited: HashSet<&str> = HashSet::new();
    queue.push_back(root);
    visited.insert(root.species.as_str());

    while !queue.is_empty() {
        let mut level = Vec::new();
        for _ in 0..queue.len() {
            let Some(node) = queue.pop_front() else {
                break;
            };
            for child in &node.evolves_to {
                if visited.insert(child.species.as_str()) {
                    queue.push_back(child);
                }
            }
            info.names.push(node.species.clone());
            level.push(node.species.clone());
        }
        info.levels.push(level);
    }
    info
}

/// One display element of a linked evolution line.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum LineSlot {
    Species(String),
    /// Marker rendered between two adjacent species that both exist.
    Link,
}

/// Resolve a species name to its forward and backward references.
/// Unresolvable names end the walk in that direction.
pub trait EvolutionLinks {
    fn evolves_from(&self, name: &str) -> Option<String>;
    fn evolves_to(&self, name: &str) -> Option<String>;
    fn contains(&self, name: &str) -> bool;
}

/// Walk the single-linked evolution references of a custom pokemon in
/// both directions and lay the result out as one display line:
/// ancestors, the species itself, then descendants, with a [`LineSlot::Link`]
/// marker between every adjacent pair. Each direction stops at a missing,
/// unresolvable, or already-visited reference, so cyclic references
/// cannot hang the walk.
pub fn linked_line<L: EvolutionLinks>(start: &str, links: &L) -> Vec<LineSlot> {
    if !links.contains(start) {
        return Vec::new();
    }

    let mut visited: HashSet<String> = HashSet::new();
    visited.insert(start.to_string());

    let mut backward = Vec::new();
    let mut cursor = start.to_string();
    while let Some(prev) = links.evolves_from(&cursor) {
        if !links.contains(&prev) || !visited.insert(prev.clone()) {
            break;
        }
        backward.push(prev.clone());
        cursor = prev;
    }

    let mut forward = Vec::new();
    cursor = start.to_string();
    while let Some(next) = links.evolves_to(&cursor) {
        if !links.contains(&next) || !visited.insert(next.clone()) {
            break;
        }
        forward.push(next.clone());
        cursor = next;
    }

    let names = backward
        .into_iter()
        .rev()
        .chain(std::iter::once(start.to_string()))
        .chain(forward);

    let mut line = Vec::new();
    for name in names {
        if !line.is_empty() {
            line.push(LineSlot::Link);
        }
        line.push(LineSlot::Species(name));
    }
    line
}
