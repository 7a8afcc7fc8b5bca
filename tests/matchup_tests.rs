//! Type matchup aggregation tests.

use pretty_assertions::assert_eq;

use pokedex_tui::matchup::{
    aggregate, types_for_multiplier, DamageRelationSet, ElementalType, MULTIPLIER_BUCKETS,
    TYPE_COUNT,
};

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|name| name.to_string()).collect()
}

fn fire_relations() -> DamageRelationSet {
    DamageRelationSet {
        no_damage_to: names(&[]),
        half_damage_to: names(&["fire", "water", "rock", "dragon"]),
        double_damage_to: names(&["grass", "ice", "bug", "steel"]),
        no_damage_from: names(&[]),
        half_damage_from: names(&["fire", "grass", "ice", "bug", "steel", "fairy"]),
        double_damage_from: names(&["water", "ground", "rock"]),
    }
}

fn flying_relations() -> DamageRelationSet {
    DamageRelationSet {
        no_damage_to: names(&[]),
        half_damage_to: names(&["electric", "rock", "steel"]),
        double_damage_to: names(&["grass", "fighting", "bug"]),
        no_damage_from: names(&["ground"]),
        half_damage_from: names(&["grass", "fighting", "bug"]),
        double_damage_from: names(&["electric", "ice", "rock"]),
    }
}

#[test]
fn empty_input_is_all_neutral() {
    let matchups = aggregate(&[]);
    for elemental in ElementalType::ALL {
        assert_eq!(matchups.attack.get(elemental), 1.0);
        assert_eq!(matchups.defense.get(elemental), 1.0);
    }
}

#[test]
fn single_type_defense() {
    let matchups = aggregate(&[fire_relations()]);
    assert_eq!(matchups.defense.get(ElementalType::Water), 2.0);
    assert_eq!(matchups.defense.get(ElementalType::Ground), 2.0);
    assert_eq!(matchups.defense.get(ElementalType::Grass), 0.5);
    assert_eq!(matchups.defense.get(ElementalType::Fairy), 0.5);
    assert_eq!(matchups.defense.get(ElementalType::Normal), 1.0);
}

#[test]
fn single_type_attack() {
    let matchups = aggregate(&[fire_relations()]);
    assert_eq!(matchups.attack.get(ElementalType::Grass), 2.0);
    assert_eq!(matchups.attack.get(ElementalType::Steel), 2.0);
    assert_eq!(matchups.attack.get(ElementalType::Water), 0.5);
    assert_eq!(matchups.attack.get(ElementalType::Dragon), 0.5);
    assert_eq!(matchups.attack.get(ElementalType::Electric), 1.0);
}

#[test]
fn dual_type_multiplies_componentwise() {
    // Fire/Flying: rock hits both sides for 2x each, grass resists stack
    // to a quarter.
    let matchups = aggregate(&[fire_relations(), flying_relations()]);
    assert_eq!(matchups.defense.get(ElementalType::Rock), 4.0);
    assert_eq!(matchups.defense.get(ElementalType::Grass), 0.25);
    assert_eq!(matchups.defense.get(ElementalType::Water), 2.0);
    // Ground: 2.0 from fire, 0.0 from flying immunity.
    assert_eq!(matchups.defense.get(ElementalType::Ground), 0.0);
    // Attack: grass doubled by both components.
    assert_eq!(matchups.attack.get(ElementalType::Grass), 4.0);
    // Rock: halved by both.
    assert_eq!(matchups.attack.get(ElementalType::Rock), 0.25);
}

#[test]
fn zero_survives_later_factors() {
    // Immunity first, then a later component halves the same type; the
    // product stays zero without special-casing.
    let first = DamageRelationSet {
        no_damage_from: names(&["ghost"]),
        ..DamageRelationSet::default()
    };
    let second = DamageRelationSet {
        half_damage_from: names(&["ghost"]),
        double_damage_from: names(&["ghost"]),
        ..DamageRelationSet::default()
    };
    let matchups = aggregate(&[first, second]);
    assert_eq!(matchups.defense.get(ElementalType::Ghost), 0.0);
}

#[test]
fn unknown_type_names_are_dropped() {
    let relations = DamageRelationSet {
        double_damage_from: names(&["shadow", "water"]),
        ..DamageRelationSet::default()
    };
    let matchups = aggregate(&[relations]);
    assert_eq!(matchups.defense.get(ElementalType::Water), 2.0);
    for elemental in ElementalType::ALL {
        if elemental != ElementalType::Water {
            assert_eq!(matchups.defense.get(elemental), 1.0);
        }
    }
}

#[test]
fn buckets_partition_all_types() {
    let matchups = aggregate(&[fire_relations(), flying_relations()]);
    for map in [&matchups.attack, &matchups.defense] {
        let total: usize = MULTIPLIER_BUCKETS
            .iter()
            .map(|multiplier| types_for_multiplier(map, *multiplier).len())
            .sum();
        assert_eq!(total, TYPE_COUNT);
    }
}

#[test]
fn neutral_bucket_holds_everything_by_default() {
    let matchups = aggregate(&[]);
    let neutral = types_for_multiplier(&matchups.defense, 1.0);
    assert_eq!(neutral.len(), TYPE_COUNT);
    assert!(types_for_multiplier(&matchups.defense, 4.0).is_empty());
}

#[test]
fn type_name_round_trip() {
    for elemental in ElementalType::ALL {
        assert_eq!(ElementalType::from_name(elemental.name()), Some(elemental));
    }
    assert_eq!(ElementalType::from_name("shadow"), None);
}
