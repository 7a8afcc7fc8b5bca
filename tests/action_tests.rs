//! Reducer flow tests using EffectStore.

use tui_dispatch::EffectStore;

use pokedex_tui::action::Action;
use pokedex_tui::effect::Effect;
use pokedex_tui::reducer::reducer;
use pokedex_tui::state::{
    AppState, CustomPokemon, CustomStats, DexEntry, DetailTab, PokemonDetail, Route, TypeDetail,
    View,
};

fn entry(id: u32, name: &str) -> DexEntry {
    DexEntry {
        id,
        name: name.to_string(),
    }
}

fn detail(name: &str, types: &[&str], moves: &[&str]) -> PokemonDetail {
    PokemonDetail {
        id: 1,
        name: name.to_string(),
        types: types.iter().map(|t| t.to_string()).collect(),
        stats: Vec::new(),
        abilities: Vec::new(),
        moves: moves.iter().map(|m| m.to_string()).collect(),
        height: 7,
        weight: 69,
    }
}

fn custom(name: &str) -> CustomPokemon {
    CustomPokemon {
        name: name.to_string(),
        types: vec!["normal".to_string()],
        stats: CustomStats::default(),
        abilities: Vec::new(),
        genus: "Test Pokemon".to_string(),
        shape: "ball".to_string(),
        color: "pink".to_string(),
        description: String::new(),
        feet: 1,
        inches: 8,
        weight: 12,
        evolves_from: None,
        evolves_to: None,
    }
}

fn loaded_dex(store: &mut EffectStore<AppState, Action, Effect>) {
    store.dispatch(Action::DexDidLoad(vec![
        entry(1, "bulbasaur"),
        entry(152, "chikorita"),
        entry(4, "charmander"),
    ]));
}

#[test]
fn init_kicks_off_all_index_loads() {
    let mut store = EffectStore::new(AppState::default(), reducer);
    let result = store.dispatch(Action::Init);
    assert!(result.changed);
    assert_eq!(
        result.effects,
        vec![Effect::LoadDex, Effect::LoadTypes, Effect::LoadCustomIndex]
    );
    assert!(store.state().list_loading);
    assert!(store.state().custom_loading);
}

#[test]
fn dex_load_builds_filtered_view() {
    let mut store = EffectStore::new(AppState::default(), reducer);
    loaded_dex(&mut store);
    assert!(!store.state().list_loading);
    assert_eq!(store.state().filtered_indices.len(), 3);
}

#[test]
fn open_selected_navigates_and_pushes_crumb() {
    let mut store = EffectStore::new(AppState::default(), reducer);
    loaded_dex(&mut store);
    let result = store.dispatch(Action::OpenSelected);
    assert!(result.changed);
    assert_eq!(store.state().view, View::Pokemon);
    assert_eq!(store.state().detail_name.as_deref(), Some("bulbasaur"));
    assert_eq!(store.state().crumbs.len(), 1);
    assert_eq!(store.state().crumbs[0].to, "/pokemon/bulbasaur");
    assert!(result
        .effects
        .iter()
        .any(|effect| matches!(effect, Effect::LoadPokemonDetail { name } if name == "bulbasaur")));
}

#[test]
fn navigate_back_rewinds_one_crumb() {
    let mut store = EffectStore::new(AppState::default(), reducer);
    loaded_dex(&mut store);
    store.dispatch(Action::OpenSelected);
    let result = store.dispatch(Action::NavigateBack);
    assert!(result.changed);
    assert_eq!(store.state().view, View::Dex);
    assert!(store.state().crumbs.is_empty());
    // Back on an empty trail is a no-op.
    let result = store.dispatch(Action::NavigateBack);
    assert!(!result.changed);
}

#[test]
fn deep_navigation_caps_the_trail() {
    let mut store = EffectStore::new(AppState::default(), reducer);
    for name in ["a", "b", "c", "d"] {
        store.dispatch(Action::Navigate(Route::Pokemon(name.to_string())));
    }
    let crumbs = &store.state().crumbs;
    assert_eq!(crumbs.len(), 3);
    assert_eq!(crumbs[0].to, "/pokemon/b");
    assert_eq!(crumbs[2].to, "/pokemon/d");
}

#[test]
fn crumb_jump_rewinds_to_that_entry() {
    let mut store = EffectStore::new(AppState::default(), reducer);
    for name in ["a", "b", "c"] {
        store.dispatch(Action::Navigate(Route::Pokemon(name.to_string())));
    }
    let result = store.dispatch(Action::CrumbJump(0));
    assert!(result.changed);
    assert_eq!(store.state().crumbs.len(), 1);
    assert_eq!(store.state().view, View::Pokemon);
    assert_eq!(store.state().detail_name.as_deref(), Some("a"));
    // Jumping at the current page changes nothing.
    let result = store.dispatch(Action::CrumbJump(0));
    assert!(!result.changed);
}

#[test]
fn go_home_clears_the_trail() {
    let mut store = EffectStore::new(AppState::default(), reducer);
    store.dispatch(Action::Navigate(Route::Pokemon("mew".to_string())));
    let result = store.dispatch(Action::GoHome);
    assert!(result.changed);
    assert_eq!(store.state().view, View::Dex);
    assert!(store.state().crumbs.is_empty());
}

#[test]
fn detail_load_requests_species_follow_up() {
    let mut store = EffectStore::new(AppState::default(), reducer);
    store.dispatch(Action::Navigate(Route::Pokemon("bulbasaur".to_string())));
    let result = store.dispatch(Action::PokemonDidLoad(detail(
        "bulbasaur",
        &["grass", "poison"],
        &["tackle"],
    )));
    assert!(!store.state().detail_loading);
    assert!(result
        .effects
        .iter()
        .any(|effect| matches!(effect, Effect::LoadSpecies { name } if name == "bulbasaur")));
}

#[test]
fn matchup_tab_requests_missing_type_relations() {
    let mut store = EffectStore::new(AppState::default(), reducer);
    store.dispatch(Action::Navigate(Route::Pokemon("charmander".to_string())));
    store.dispatch(Action::PokemonDidLoad(detail("charmander", &["fire"], &[])));
    // General -> Moves -> Matchup.
    store.dispatch(Action::DetailTabNext);
    let result = store.dispatch(Action::DetailTabNext);
    assert_eq!(store.state().detail_tab, DetailTab::Matchup);
    assert!(store.state().matchup_loading);
    assert_eq!(
        result.effects,
        vec![Effect::LoadTypeDetail {
            name: "fire".to_string()
        }]
    );
    // Delivery clears the loading flag.
    store.dispatch(Action::TypeDetailDidLoad(TypeDetail {
        name: "fire".to_string(),
        relations: Default::default(),
        members: Vec::new(),
    }));
    assert!(!store.state().matchup_loading);
}

#[test]
fn moves_tab_requests_highlighted_move() {
    let mut store = EffectStore::new(AppState::default(), reducer);
    store.dispatch(Action::Navigate(Route::Pokemon("bulbasaur".to_string())));
    store.dispatch(Action::PokemonDidLoad(detail(
        "bulbasaur",
        &["grass"],
        &["tackle", "growl"],
    )));
    let result = store.dispatch(Action::DetailTabNext);
    assert_eq!(store.state().detail_tab, DetailTab::Moves);
    assert_eq!(
        result.effects,
        vec![Effect::LoadMoveDetail {
            name: "tackle".to_string()
        }]
    );
    let result = store.dispatch(Action::MoveSelect(1));
    assert_eq!(
        result.effects,
        vec![Effect::LoadMoveDetail {
            name: "growl".to_string()
        }]
    );
}

#[test]
fn delete_flow_rewinds_two_crumbs_and_refreshes() {
    let mut store = EffectStore::new(AppState::default(), reducer);
    store.dispatch(Action::CustomDidLoad(vec![custom("fakemon")]));
    store.dispatch(Action::Navigate(Route::CustomDex));
    store.dispatch(Action::OpenSelected);
    assert_eq!(store.state().view, View::Custom);
    assert_eq!(store.state().crumbs.len(), 2);

    let result = store.dispatch(Action::DeleteCustom);
    assert!(store.state().delete_pending);
    assert_eq!(
        result.effects,
        vec![Effect::DeleteCustom {
            name: "fakemon".to_string()
        }]
    );

    let result = store.dispatch(Action::DeleteDidSucceed {
        name: "fakemon".to_string(),
    });
    assert!(!store.state().delete_pending);
    assert!(store.state().custom.is_empty());
    // Lands back on the custom list, with the list as the sole crumb.
    assert_eq!(store.state().view, View::CustomDex);
    assert_eq!(store.state().crumbs.len(), 1);
    assert_eq!(store.state().crumbs[0].to, "/custom");
    assert_eq!(
        result
            .effects
            .iter()
            .filter(|effect| matches!(effect, Effect::LoadCustomIndex))
            .count(),
        1
    );
}

#[test]
fn empty_custom_index_does_not_refetch_itself() {
    let mut store = EffectStore::new(AppState::default(), reducer);
    let result = store.dispatch(Action::Navigate(Route::Custom("ghostmon".to_string())));
    assert_eq!(store.state().view, View::Custom);
    assert_eq!(result.effects, vec![Effect::LoadCustomIndex]);

    // The service has nothing; the page stays empty instead of asking
    // for the same index again.
    let result = store.dispatch(Action::CustomDidLoad(Vec::new()));
    assert!(result.changed);
    assert!(result.effects.is_empty());
    assert!(!store.state().custom_loading);
}

#[test]
fn delete_outside_custom_view_is_ignored() {
    let mut store = EffectStore::new(AppState::default(), reducer);
    let result = store.dispatch(Action::DeleteCustom);
    assert!(!result.changed);
    assert!(result.effects.is_empty());
}

#[test]
fn region_cycle_filters_by_id_range() {
    let mut store = EffectStore::new(AppState::default(), reducer);
    loaded_dex(&mut store);
    // NATIONAL -> KANTO
    store.dispatch(Action::RegionNext);
    assert_eq!(store.state().current_region().label, "KANTO");
    assert_eq!(store.state().filtered_indices.len(), 2);
    // KANTO -> JOHTO
    store.dispatch(Action::RegionNext);
    assert_eq!(store.state().filtered_indices.len(), 1);
}

#[test]
fn search_narrows_by_name() {
    let mut store = EffectStore::new(AppState::default(), reducer);
    loaded_dex(&mut store);
    store.dispatch(Action::SearchStart);
    assert!(store.state().search.active);
    for ch in "char".chars() {
        store.dispatch(Action::SearchInput(ch));
    }
    assert_eq!(store.state().filtered_indices.len(), 1);
    store.dispatch(Action::SearchSubmit);
    assert!(!store.state().search.active);
    assert_eq!(store.state().filtered_indices.len(), 1);
    store.dispatch(Action::SearchCancel);
    assert_eq!(store.state().filtered_indices.len(), 3);
}

#[test]
fn type_filter_waits_for_member_list() {
    let mut store = EffectStore::new(AppState::default(), reducer);
    loaded_dex(&mut store);
    store.dispatch(Action::TypesDidLoad(vec![
        "fire".to_string(),
        "water".to_string(),
    ]));
    let result = store.dispatch(Action::TypeFilterNext);
    assert_eq!(store.state().type_filter.as_deref(), Some("fire"));
    assert_eq!(
        result.effects,
        vec![Effect::LoadTypeDetail {
            name: "fire".to_string()
        }]
    );
    // Members unknown yet: nothing passes the filter.
    assert!(store.state().filtered_indices.is_empty());

    store.dispatch(Action::TypeDetailDidLoad(TypeDetail {
        name: "fire".to_string(),
        relations: Default::default(),
        members: vec!["charmander".to_string()],
    }));
    assert_eq!(store.state().filtered_indices.len(), 1);

    store.dispatch(Action::TypeFilterClear);
    assert!(store.state().type_filter.is_none());
    assert_eq!(store.state().filtered_indices.len(), 3);
}

#[test]
fn matchup_toggle_only_on_detail_views() {
    let mut store = EffectStore::new(AppState::default(), reducer);
    let result = store.dispatch(Action::MatchupToggle);
    assert!(!result.changed);
    store.dispatch(Action::Navigate(Route::Pokemon("mew".to_string())));
    store.dispatch(Action::MatchupToggle);
    assert!(!store.state().matchup_attack);
}

#[test]
fn tick_is_silent_when_idle() {
    let mut store = EffectStore::new(AppState::default(), reducer);
    let result = store.dispatch(Action::Tick);
    assert!(!result.changed);
    store.dispatch(Action::Init);
    let result = store.dispatch(Action::Tick);
    assert!(result.changed);
}
