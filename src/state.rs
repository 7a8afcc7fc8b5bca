use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tui_dispatch_debug::debug::{ron_string, DebugSection, DebugState};

use crate::crumbs::Crumb;
use crate::evolution::{EvolutionLinks, EvolutionNode};
use crate::matchup::DamageRelationSet;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchState {
    pub active: bool,
    pub query: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DexEntry {
    pub id: u32,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PokemonStat {
    pub name: String,
    pub value: u16,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PokemonDetail {
    pub id: u32,
    pub name: String,
    pub types: Vec<String>,
    pub stats: Vec<PokemonStat>,
    pub abilities: Vec<String>,
    pub moves: Vec<String>,
    pub height: u16,
    pub weight: u16,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PokemonSpecies {
    pub name: String,
    pub flavor_text: Option<String>,
    pub genus: Option<String>,
    pub shape: Option<String>,
    pub color: Option<String>,
    pub evolution_chain_url: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MoveDetail {
    pub name: String,
    pub power: Option<u16>,
    pub accuracy: Option<u16>,
    pub pp: Option<u16>,
    pub effect: Option<String>,
}

/// One type's page worth of data: its damage relations (also the input
/// to matchup aggregation) and its member pokemon (also the type filter).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TypeDetail {
    pub name: String,
    pub relations: DamageRelationSet,
    pub members: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CustomAbility {
    pub name: String,
    pub hidden: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomStats {
    pub hp: u16,
    pub atk: u16,
    pub def: u16,
    pub sp_atk: u16,
    pub sp_def: u16,
    pub speed: u16,
}

/// A user-authored pokemon as stored by the custom CRUD service.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CustomPokemon {
    pub name: String,
    pub types: Vec<String>,
    pub stats: CustomStats,
    pub abilities: Vec<CustomAbility>,
    pub genus: String,
    pub shape: String,
    pub color: String,
    pub description: String,
    pub feet: u16,
    pub inches: u16,
    pub weight: u16,
    pub evolves_from: Option<String>,
    pub evolves_to: Option<String>,
}

/// Custom evolution references resolve against the loaded registry.
impl EvolutionLinks for HashMap<String, CustomPokemon> {
    fn evolves_from(&self, name: &str) -> Option<String> {
        self.get(name)?.evolves_from.clone()
    }

    fn evolves_to(&self, name: &str) -> Option<String> {
        self.get(name)?.evolves_to.clone()
    }

    fn contains(&self, name: &str) -> bool {
        self.contains_key(name)
    }
}

/// Regions are client-side national-dex ID ranges; switching regions
/// never refetches the index.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Region {
    pub label: &'static str,
    pub min_id: u32,
    pub max_id: u32,
}

pub const REGIONS: [Region; 9] = [
    Region { label: "NATIONAL", min_id: 1, max_id: u32::MAX },
    Region { label: "KANTO", min_id: 1, max_id: 151 },
    Region { label: "JOHTO", min_id: 152, max_id: 251 },
    Region { label: "HOENN", min_id: 252, max_id: 386 },
    Region { label: "SINNOH", min_id: 387, max_id: 494 },
    Region { label: "UNOVA", min_id: 495, max_id: 649 },
    Region { label: "KALOS", min_id: 650, max_id: 721 },
    Region { label: "ALOLA", min_id: 722, max_id: 809 },
    Region { label: "GALAR", min_id: 810, max_id: 898 },
];

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum View {
    Dex,
    CustomDex,
    Pokemon,
    Custom,
    Type,
    Move,
}

/// A navigable location, round-trippable through the route path strings
/// carried in breadcrumb `to` fields.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Route {
    Dex,
    CustomDex,
    Pokemon(String),
    Custom(String),
    Type(String),
    Move(String),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Dex => "/".to_string(),
            Route::CustomDex => "/custom".to_string(),
            Route::Pokemon(name) => format!("/pokemon/{name}"),
            Route::Custom(name) => format!("/custom/{name}"),
            Route::Type(name) => format!("/types/{name}"),
            Route::Move(name) => format!("/moves/{name}"),
        }
    }

    /// Malformed paths resolve to `None`; callers fall back to home.
    pub fn parse(path: &str) -> Option<Route> {
        match path {
            "/" => return Some(Route::Dex),
            "/custom" => return Some(Route::CustomDex),
            _ => {}
        }
        let rest = path.strip_prefix('/')?;
        let (kind, name) = rest.split_once('/')?;
        if name.is_empty() {
            return None;
        }
        match kind {
            "pokemon" => Some(Route::Pokemon(name.to_string())),
            "custom" => Some(Route::Custom(name.to_string())),
            "types" => Some(Route::Type(name.to_string())),
            "moves" => Some(Route::Move(name.to_string())),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum DetailTab {
    General,
    Moves,
    Matchup,
    Evolution,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AppState {
    pub terminal_size: (u16, u16),
    pub view: View,
    pub crumbs: Vec<Crumb>,

    pub dex: Vec<DexEntry>,
    pub filtered_indices: Vec<usize>,
    pub selected_index: usize,

    pub custom_index: Vec<String>,
    pub custom: HashMap<String, CustomPokemon>,
    pub custom_selected_index: usize,

    pub detail_name: Option<String>,
    pub custom_detail_name: Option<String>,
    pub type_detail_name: Option<String>,
    pub move_detail_name: Option<String>,

    pub details: HashMap<String, PokemonDetail>,
    pub species: HashMap<String, PokemonSpecies>,
    pub evolution: HashMap<String, EvolutionNode>,
    pub type_cache: HashMap<String, TypeDetail>,
    pub move_cache: HashMap<String, MoveDetail>,

    pub detail_tab: DetailTab,
    pub selected_move_index: usize,
    pub evolution_selected_index: usize,
    /// True shows attack multipliers in matchup tables, false defense.
    pub matchup_attack: bool,

    pub search: SearchState,
    pub type_list: Vec<String>,
    pub type_filter: Option<String>,
    pub region_index: usize,

    pub list_loading: bool,
    pub custom_loading: bool,
    pub detail_loading: bool,
    pub type_loading: bool,
    pub type_detail_loading: bool,
    pub evolution_loading: bool,
    pub matchup_loading: bool,
    pub move_loading: bool,
    pub delete_pending: bool,
    pub message: Option<String>,
    pub tick: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            terminal_size: (80, 24),
            view: View::Dex,
            crumbs: Vec::new(),
            dex: Vec::new(),
            filtered_indices: Vec::new(),
            selected_index: 0,
            custom_index: Vec::new(),
            custom: HashMap::new(),
            custom_selected_index: 0,
            detail_name: None,
            custom_detail_name: None,
            type_detail_name: None,
            move_detail_name: None,
            details: HashMap::new(),
            species: HashMap::new(),
            evolution: HashMap::new(),
            type_cache: HashMap::new(),
            move_cache: HashMap::new(),
            detail_tab: DetailTab::General,
            selected_move_index: 0,
            evolution_selected_index: 0,
            matchup_attack: true,
            search: SearchState::default(),
            type_list: Vec::new(),
            type_filter: None,
            region_index: 0,
            list_loading: false,
            custom_loading: false,
            detail_loading: false,
            type_loading: false,
            type_detail_loading: false,
            evolution_loading: false,
            matchup_loading: false,
            move_loading: false,
            delete_pending: false,
            message: None,
            tick: 0,
        }
    }
}

impl AppState {
    pub fn selected_entry(&self) -> Option<&DexEntry> {
        self.filtered_indices
            .get(self.selected_index)
            .and_then(|idx| self.dex.get(*idx))
    }

    pub fn selected_name(&self) -> Option<String> {
        self.selected_entry().map(|entry| entry.name.clone())
    }

    pub fn custom_selected_name(&self) -> Option<String> {
        self.custom_index.get(self.custom_selected_index).cloned()
    }

    pub fn set_selected_index(&mut self, index: usize) -> bool {
        if self.filtered_indices.is_empty() {
            self.selected_index = 0;
            return false;
        }
        let bounded = index.min(self.filtered_indices.len() - 1);
        if bounded != self.selected_index {
            self.selected_index = bounded;
            return true;
        }
        false
    }

    pub fn set_custom_selected_index(&mut self, index: usize) -> bool {
        if self.custom_index.is_empty() {
            self.custom_selected_index = 0;
            return false;
        }
        let bounded = index.min(self.custom_index.len() - 1);
        if bounded != self.custom_selected_index {
            self.custom_selected_index = bounded;
            return true;
        }
        false
    }

    pub fn rebuild_filtered(&mut self) {
        let query = self.search.query.trim().to_lowercase();
        let region = self.current_region();
        let members = self
            .type_filter
            .as_ref()
            .and_then(|name| self.type_cache.get(name))
            .map(|detail| &detail.members);
        self.filtered_indices = self
            .dex
            .iter()
            .enumerate()
            .filter(|(_, entry)| {
                let matches_query = query.is_empty()
                    || entry.name.to_lowercase().contains(&query)
                    || entry.id.to_string().contains(&query);
                let matches_region =
                    entry.id >= region.min_id && entry.id <= region.max_id;
                let matches_type = match (&self.type_filter, members) {
                    (Some(_), Some(members)) => members.contains(&entry.name),
                    (Some(_), None) => false,
                    (None, _) => true,
                };
                matches_query && matches_region && matches_type
            })
            .map(|(idx, _)| idx)
            .collect();

        if self.selected_index >= self.filtered_indices.len() {
            self.selected_index = 0;
        }
    }

    pub fn current_region(&self) -> Region {
        REGIONS[self.region_index.min(REGIONS.len() - 1)]
    }

    pub fn current_detail(&self) -> Option<&PokemonDetail> {
        let name = self.detail_name.as_ref()?;
        self.details.get(name)
    }

    pub fn current_species(&self) -> Option<&PokemonSpecies> {
        let name = self.detail_name.as_ref()?;
        self.species.get(name)
    }

    pub fn current_custom(&self) -> Option<&CustomPokemon> {
        let name = self.custom_detail_name.as_ref()?;
        self.custom.get(name)
    }

    pub fn current_move_name(&self) -> Option<String> {
        let detail = self.current_detail()?;
        detail.moves.get(self.selected_move_index).cloned()
    }

    pub fn current_evolution_chain(&self) -> Option<&EvolutionNode> {
        let species = self.current_species()?;
        let url = species.evolution_chain_url.as_ref()?;
        self.evolution.get(&evolution_id_from_url(url))
    }

    pub fn reset_detail_selection(&mut self) {
        self.detail_tab = DetailTab::General;
        self.selected_move_index = 0;
        self.evolution_selected_index = 0;
        self.matchup_attack = true;
    }

    /// Current location as a route, derived from the view fields.
    pub fn current_route(&self) -> Route {
        match self.view {
            View::Dex => Route::Dex,
            View::CustomDex => Route::CustomDex,
            View::Pokemon => self
                .detail_name
                .clone()
                .map(Route::Pokemon)
                .unwrap_or(Route::Dex),
            View::Custom => self
                .custom_detail_name
                .clone()
                .map(Route::Custom)
                .unwrap_or(Route::CustomDex),
            View::Type => self
                .type_detail_name
                .clone()
                .map(Route::Type)
                .unwrap_or(Route::Dex),
            View::Move => self
                .move_detail_name
                .clone()
                .map(Route::Move)
                .unwrap_or(Route::Dex),
        }
    }
}

pub fn evolution_id_from_url(url: &str) -> String {
    url.trim_end_matches('/')
        .split('/')
        .next_back()
        .unwrap_or("unknown")
        .to_string()
}

/// `"mr-mime"` -> `"Mr Mime"`, the display form used for crumb labels
/// and page headings.
pub fn display_name(name: &str) -> String {
    name.split('-')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => format!("{}{}", first.to_ascii_uppercase(), chars.as_str()),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

impl DebugState for AppState {
    fn debug_sections(&self) -> Vec<DebugSection> {
        vec![
            DebugSection::new("Nav")
                .entry("view", ron_string(&self.view))
                .entry("route", ron_string(&self.current_route().path()))
                .entry(
                    "crumbs",
                    ron_string(
                        &self
                            .crumbs
                            .iter()
                            .map(|crumb| crumb.to.clone())
                            .collect::<Vec<_>>(),
                    ),
                )
                .entry("detail_tab", ron_string(&self.detail_tab)),
            DebugSection::new("Dex")
                .entry("total", ron_string(&self.dex.len()))
                .entry("filtered", ron_string(&self.filtered_indices.len()))
                .entry("selected", ron_string(&self.selected_index))
                .entry("custom_total", ron_string(&self.custom_index.len()))
                .entry("region", ron_string(&self.current_region().label)),
            DebugSection::new("Filters")
                .entry("search", ron_string(&self.search.query))
                .entry("search_active", ron_string(&self.search.active))
                .entry("type", ron_string(&self.type_filter)),
            DebugSection::new("Status")
                .entry("list_loading", ron_string(&self.list_loading))
                .entry("custom_loading", ron_string(&self.custom_loading))
                .entry("detail_loading", ron_string(&self.detail_loading))
                .entry("matchup_loading", ron_string(&self.matchup_loading))
                .entry("delete_pending", ron_string(&self.delete_pending))
                .entry("message", ron_string(&self.message)),
        ]
    }
}
