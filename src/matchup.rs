//! Type effectiveness aggregation over the fixed 18-type universe.
//!
//! A pokemon with more than one type combines the damage relations of all
//! of its types multiplicatively: double from one type and half from the
//! other nets out to neutral, and an immunity from any type pins the
//! multiplier at zero no matter what the remaining relations say.

use serde::{Deserialize, Serialize};

/// The closed set of elemental types. Multiplier maps are indexed by the
/// enum ordinal, so a misspelled type name from the API can never create
/// a nineteenth bucket.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementalType {
    Normal,
    Fire,
    Water,
    Grass,
    Electric,
    Ice,
    Fighting,
    Poison,
    Ground,
    Flying,
    Psychic,
    Bug,
    Rock,
    Ghost,
    Dark,
    Dragon,
    Steel,
    Fairy,
}

pub const TYPE_COUNT: usize = 18;

impl ElementalType {
    pub const ALL: [ElementalType; TYPE_COUNT] = [
        ElementalType::Normal,
        ElementalType::Fire,
        ElementalType::Water,
        ElementalType::Grass,
        ElementalType::Electric,
        ElementalType::Ice,
        ElementalType::Fighting,
        ElementalType::Poison,
        ElementalType::Ground,
        ElementalType::Flying,
        ElementalType::Psychic,
        ElementalType::Bug,
        ElementalType::Rock,
        ElementalType::Ghost,
        ElementalType::Dark,
        ElementalType::Dragon,
        ElementalType::Steel,
        ElementalType::Fairy,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ElementalType::Normal => "normal",
            ElementalType::Fire => "fire",
            ElementalType::Water => "water",
            ElementalType::Grass => "grass",
            ElementalType::Electric => "electric",
            ElementalType::Ice => "ice",
            ElementalType::Fighting => "fighting",
            ElementalType::Poison => "poison",
            ElementalType::Ground => "ground",
            ElementalType::Flying => "flying",
            ElementalType::Psychic => "psychic",
            ElementalType::Bug => "bug",
            ElementalType::Rock => "rock",
            ElementalType::Ghost => "ghost",
            ElementalType::Dark => "dark",
            ElementalType::Dragon => "dragon",
            ElementalType::Steel => "steel",
            ElementalType::Fairy => "fairy",
        }
    }

    /// Unrecognized names (future API additions, `unknown`, `shadow`)
    /// resolve to `None` and are dropped by the aggregator.
    pub fn from_name(name: &str) -> Option<ElementalType> {
        Self::ALL.iter().copied().find(|t| t.name() == name)
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// One type's damage relations exactly as the type endpoint delivers them.
/// Entries are plain type names; order is irrelevant and duplicates are
/// harmless (a duplicated half entry just halves twice, as the source
/// data never contains duplicates in practice).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DamageRelationSet {
    pub no_damage_to: Vec<String>,
    pub half_damage_to: Vec<String>,
    pub double_damage_to: Vec<String>,
    pub no_damage_from: Vec<String>,
    pub half_damage_from: Vec<String>,
    pub double_damage_from: Vec<String>,
}

/// Per-type effectiveness multipliers. Always carries exactly the 18
/// types; starts at 1.0 everywhere and is only mutated by [`aggregate`]
/// while it builds a fresh result.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MultiplierMap {
    values: [f64; TYPE_COUNT],
}

impl Default for MultiplierMap {
    fn default() -> Self {
        MultiplierMap {
            values: [1.0; TYPE_COUNT],
        }
    }
}

impl MultiplierMap {
    pub fn get(&self, elemental: ElementalType) -> f64 {
        self.values[elemental.index()]
    }

    /// Multiply the named type's running value by `factor`. A zeroed
    /// entry stays zero through plain multiplication; immunities are not
    /// special-cased out of the chain.
    fn scale(&mut self, name: &str, factor: f64) {
        if let Some(elemental) = ElementalType::from_name(name) {
            self.values[elemental.index()] *= factor;
        }
    }
}

/// Composite attack and defense effectiveness for a (possibly
/// multi-typed) pokemon.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TypeMatchups {
    pub attack: MultiplierMap,
    pub defense: MultiplierMap,
}

/// Combine one damage-relation set per type of the pokemon into composite
/// attack and defense maps. Relation sets are applied in input order; the
/// running multiplier for each type accumulates multiplicatively across
/// sets, with immunities expressed as a multiply-by-zero.
pub fn aggregate(relations: &[DamageRelationSet]) -> TypeMatchups {
    let mut matchups = TypeMatchups::default();
    for relation in relations {
        for name in &relation.no_damage_to {
            matchups.attack.scale(name, 0.0);
        }
        for name in &relation.half_damage_to {
            matchups.attack.scale(name, 0.5);
        }
        for name in &relation.double_damage_to {
            matchups.attack.scale(name, 2.0);
        }
        for name in &relation.no_damage_from {
            matchups.defense.scale(name, 0.0);
        }
        for name in &relation.half_damage_from {
            matchups.defense.scale(name, 0.5);
        }
        for name in &relation.double_damage_from {
            matchups.defense.scale(name, 2.0);
        }
    }
    matchups
}

/// The canonical multiplier values a single- or dual-typed aggregation
/// can produce, in display order.
pub const MULTIPLIER_BUCKETS: [f64; 6] = [0.0, 0.25, 0.5, 1.0, 2.0, 4.0];

/// All types whose multiplier equals `multiplier` exactly. Exact float
/// comparison is safe here: every value in the map is a product of 0,
/// 0.5 and 2 factors, all exactly representable. Empty result means the
/// caller renders its "N/A" placeholder.
pub fn types_for_multiplier(map: &MultiplierMap, multiplier: f64) -> Vec<ElementalType> {
    ElementalType::ALL
        .iter()
        .copied()
        .filter(|elemental| map.get(*elemental) == multiplier)
        .collect()
}
