//! Evolution chain flattening and linked-line tests.

use std::collections::HashMap;

use pretty_assertions::assert_eq;

use pokedex_tui::evolution::{flatten_chain, linked_line, EvolutionNode, LineSlot};
use pokedex_tui::state::{CustomPokemon, CustomStats};

fn node(species: &str, evolves_to: Vec<EvolutionNode>) -> EvolutionNode {
    EvolutionNode {
        species: species.to_string(),
        evolves_to,
    }
}

fn custom(name: &str, from: Option<&str>, to: Option<&str>) -> CustomPokemon {
    CustomPokemon {
        name: name.to_string(),
        types: vec!["normal".to_string()],
        stats: CustomStats::default(),
        abilities: Vec::new(),
        genus: "Test Pokemon".to_string(),
        shape: "quadruped".to_string(),
        color: "gray".to_string(),
        description: String::new(),
        feet: 3,
        inches: 2,
        weight: 40,
        evolves_from: from.map(str::to_string),
        evolves_to: to.map(str::to_string),
    }
}

fn registry(entries: Vec<CustomPokemon>) -> HashMap<String, CustomPokemon> {
    entries
        .into_iter()
        .map(|entry| (entry.name.clone(), entry))
        .collect()
}

fn species(line: &[LineSlot]) -> Vec<String> {
    line.iter()
        .filter_map(|slot| match slot {
            LineSlot::Species(name) => Some(name.clone()),
            LineSlot::Link => None,
        })
        .collect()
}

#[test]
fn missing_root_is_empty() {
    let info = flatten_chain(None);
    assert!(info.names.is_empty());
    assert!(info.levels.is_empty());
}

#[test]
fn linear_chain_levels() {
    let chain = node(
        "bulbasaur",
        vec![node("ivysaur", vec![node("venusaur", vec![])])],
    );
    let info = flatten_chain(Some(&chain));
    assert_eq!(info.names, vec!["bulbasaur", "ivysaur", "venusaur"]);
    assert_eq!(
        info.levels,
        vec![
            vec!["bulbasaur".to_string()],
            vec!["ivysaur".to_string()],
            vec!["venusaur".to_string()],
        ]
    );
}

#[test]
fn branching_chain_keeps_sibling_order() {
    let chain = node(
        "eevee",
        vec![
            node("vaporeon", vec![]),
            node("jolteon", vec![]),
            node("flareon", vec![]),
        ],
    );
    let info = flatten_chain(Some(&chain));
    assert_eq!(info.names, vec!["eevee", "vaporeon", "jolteon", "flareon"]);
    assert_eq!(info.levels.len(), 2);
    assert_eq!(
        info.levels[1],
        vec![
            "vaporeon".to_string(),
            "jolteon".to_string(),
            "flareon".to_string()
        ]
    );
}

#[test]
fn duplicate_species_visited_once() {
    // A malformed tree repeating a species must not repeat it in the
    // output or loop.
    let chain = node(
        "slowpoke",
        vec![
            node("slowbro", vec![node("slowpoke", vec![])]),
            node("slowking", vec![]),
        ],
    );
    let info = flatten_chain(Some(&chain));
    assert_eq!(info.names, vec!["slowpoke", "slowbro", "slowking"]);
}

#[test]
fn linked_line_full_chain_from_middle() {
    let links = registry(vec![
        custom("alpha", None, Some("beta")),
        custom("beta", Some("alpha"), Some("gamma")),
        custom("gamma", Some("beta"), None),
    ]);
    let line = linked_line("beta", &links);
    assert_eq!(species(&line), vec!["alpha", "beta", "gamma"]);
    // Link marker between every adjacent pair.
    assert_eq!(line.len(), 5);
    assert_eq!(line[1], LineSlot::Link);
    assert_eq!(line[3], LineSlot::Link);
}

#[test]
fn linked_line_unknown_start_is_empty() {
    let links = registry(vec![custom("alpha", None, None)]);
    assert!(linked_line("missing", &links).is_empty());
}

#[test]
fn linked_line_stops_at_missing_reference() {
    // Backward reference points outside the registry; only the forward
    // half of the line survives.
    let links = registry(vec![
        custom("beta", Some("alpha"), Some("gamma")),
        custom("gamma", Some("beta"), None),
    ]);
    let line = linked_line("beta", &links);
    assert_eq!(species(&line), vec!["beta", "gamma"]);
    assert_eq!(line.len(), 3);
}

#[test]
fn linked_line_survives_reference_cycle() {
    let links = registry(vec![
        custom("ouro", Some("boros"), Some("boros")),
        custom("boros", Some("ouro"), Some("ouro")),
    ]);
    let line = linked_line("ouro", &links);
    // The visited set stops both walks after one hop each.
    assert_eq!(species(&line), vec!["boros", "ouro"]);
}

#[test]
fn solo_species_has_no_link_markers() {
    let links = registry(vec![custom("solo", None, None)]);
    let line = linked_line("solo", &links);
    assert_eq!(line, vec![LineSlot::Species("solo".to_string())]);
}
