use serde::{Deserialize, Serialize};

use crate::evolution::EvolutionNode;
use crate::state::{
    CustomPokemon, DexEntry, MoveDetail, PokemonDetail, PokemonSpecies, Route, TypeDetail,
};

#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[action(infer_categories)]
pub enum Action {
    Init,

    DexDidLoad(Vec<DexEntry>),
    DexDidError(String),
    TypesDidLoad(Vec<String>),
    TypesDidError(String),
    CustomDidLoad(Vec<CustomPokemon>),
    CustomDidError(String),

    PokemonDidLoad(PokemonDetail),
    PokemonDidError { name: String, error: String },
    SpeciesDidLoad(PokemonSpecies),
    SpeciesDidError { name: String, error: String },
    EvolutionDidLoad { id: String, chain: EvolutionNode },
    EvolutionDidError { id: String, error: String },
    TypeDetailDidLoad(TypeDetail),
    TypeDetailDidError { name: String, error: String },
    MoveDetailDidLoad(MoveDetail),
    MoveDetailDidError { name: String, error: String },

    Navigate(Route),
    NavigateBack,
    CrumbJump(usize),
    GoHome,
    OpenSelected,

    SelectionMove(i16),
    SelectionPage(i16),
    SelectionJumpTop,
    SelectionJumpBottom,
    DexSelect(usize),
    CustomSelect(usize),

    SearchStart,
    SearchCancel,
    SearchSubmit,
    SearchInput(char),
    SearchBackspace,

    RegionNext,
    RegionPrev,
    TypeFilterNext,
    TypeFilterPrev,
    TypeFilterClear,

    DetailTabNext,
    DetailTabPrev,
    MoveSelect(usize),
    EvolutionSelect(usize),
    MatchupToggle,

    DeleteCustom,
    DeleteDidSucceed { name: String },
    DeleteDidError { name: String, error: String },

    UiTerminalResize(u16, u16),
    Tick,
    Quit,
}
