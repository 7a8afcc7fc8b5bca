use tui_dispatch::DispatchResult;

use crate::action::Action;
use crate::crumbs::{push_crumb, remove_crumbs, Crumb};
use crate::effect::Effect;
use crate::evolution::flatten_chain;
use crate::state::{display_name, evolution_id_from_url, AppState, DetailTab, Route, View, REGIONS};

pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        Action::Init => {
            state.list_loading = true;
            state.type_loading = true;
            state.custom_loading = true;
            state.message = None;
            DispatchResult::changed_with_many(vec![
                Effect::LoadDex,
                Effect::LoadTypes,
                Effect::LoadCustomIndex,
            ])
        }

        Action::DexDidLoad(entries) => {
            state.dex = entries;
            state.list_loading = false;
            state.selected_index = 0;
            state.rebuild_filtered();
            DispatchResult::changed()
        }

        Action::DexDidError(error) => {
            state.list_loading = false;
            state.message = Some(format!("Pokedex error: {error}"));
            DispatchResult::changed()
        }

        Action::TypesDidLoad(types) => {
            state.type_loading = false;
            state.type_list = types;
            DispatchResult::changed()
        }

        Action::TypesDidError(error) => {
            state.type_loading = false;
            state.message = Some(format!("Type error: {error}"));
            DispatchResult::changed()
        }

        Action::CustomDidLoad(entries) => {
            state.custom_loading = false;
            state.custom_index = entries.iter().map(|entry| entry.name.clone()).collect();
            state.custom.clear();
            for entry in entries {
                state.custom.insert(entry.name.clone(), entry);
            }
            if state.custom_selected_index >= state.custom_index.len() {
                state.custom_selected_index = 0;
            }
            // The index just arrived; a page whose entry is absent stays
            // empty rather than re-requesting the same index.
            let mut effects = Vec::new();
            if state.view == View::Custom {
                let follow_types = state
                    .custom_detail_name
                    .as_ref()
                    .and_then(|name| state.custom.get(name))
                    .map(|custom| custom.types.clone());
                if let Some(types) = follow_types {
                    effects.extend(matchup_effects(state, &types));
                }
            }
            if effects.is_empty() {
                DispatchResult::changed()
            } else {
                DispatchResult::changed_with_many(effects)
            }
        }

        Action::CustomDidError(error) => {
            state.custom_loading = false;
            state.message = Some(format!("Custom dex error: {error}"));
            DispatchResult::changed()
        }

        Action::PokemonDidLoad(detail) => {
            let name = detail.name.clone();
            state.details.insert(name.clone(), detail);
            state.detail_loading = false;
            state.message = None;
            let effects = detail_follow_up(state, &name);
            if effects.is_empty() {
                DispatchResult::changed()
            } else {
                DispatchResult::changed_with_many(effects)
            }
        }

        Action::PokemonDidError { name, error } => {
            state.detail_loading = false;
            state.message = Some(format!("{name} load error: {error}"));
            DispatchResult::changed()
        }

        Action::SpeciesDidLoad(species) => {
            let name = species.name.clone();
            state.species.insert(name.clone(), species);
            let effects = detail_evolution_effects(state, &name);
            if effects.is_empty() {
                DispatchResult::changed()
            } else {
                DispatchResult::changed_with_many(effects)
            }
        }

        Action::SpeciesDidError { name, error } => {
            state.message = Some(format!("{name} species error: {error}"));
            DispatchResult::changed()
        }

        Action::EvolutionDidLoad { id, chain } => {
            state.evolution.insert(id, chain);
            state.evolution_loading = false;
            sync_evolution_selection(state);
            DispatchResult::changed()
        }

        Action::EvolutionDidError { id: _, error } => {
            state.evolution_loading = false;
            state.message = Some(format!("Evolution error: {error}"));
            DispatchResult::changed()
        }

        Action::TypeDetailDidLoad(detail) => {
            let name = detail.name.clone();
            state.type_cache.insert(name.clone(), detail);
            if state.type_detail_name.as_deref() == Some(&name) {
                state.type_detail_loading = false;
            }
            if state.type_filter.as_deref() == Some(&name) {
                state.type_loading = false;
                state.rebuild_filtered();
            }
            state.matchup_loading = current_matchup_loading(state);
            DispatchResult::changed()
        }

        Action::TypeDetailDidError { name, error } => {
            if state.type_detail_name.as_deref() == Some(&name) {
                state.type_detail_loading = false;
            }
            if state.type_filter.as_deref() == Some(&name) {
                state.type_loading = false;
            }
            state.matchup_loading = current_matchup_loading(state);
            state.message = Some(format!("Type {name} error: {error}"));
            DispatchResult::changed()
        }

        Action::MoveDetailDidLoad(detail) => {
            let name = detail.name.clone();
            state.move_cache.insert(name.clone(), detail);
            if state.move_detail_name.as_deref() == Some(&name) {
                state.move_loading = false;
            }
            DispatchResult::changed()
        }

        Action::MoveDetailDidError { name, error } => {
            if state.move_detail_name.as_deref() == Some(&name) {
                state.move_loading = false;
            }
            state.message = Some(format!("Move {name} error: {error}"));
            DispatchResult::changed()
        }

        Action::Navigate(route) => {
            if route == state.current_route() {
                return DispatchResult::unchanged();
            }
            let effects = navigate_to(state, route, true);
            if effects.is_empty() {
                DispatchResult::changed()
            } else {
                DispatchResult::changed_with_many(effects)
            }
        }

        Action::NavigateBack => {
            if state.crumbs.is_empty() {
                return DispatchResult::unchanged();
            }
            state.crumbs = remove_crumbs(&state.crumbs, 1);
            let route = trail_route(state);
            let effects = navigate_to(state, route, false);
            if effects.is_empty() {
                DispatchResult::changed()
            } else {
                DispatchResult::changed_with_many(effects)
            }
        }

        Action::CrumbJump(index) => {
            if index + 1 >= state.crumbs.len() {
                return DispatchResult::unchanged();
            }
            let excess = state.crumbs.len() - (index + 1);
            state.crumbs = remove_crumbs(&state.crumbs, excess);
            let route = trail_route(state);
            let effects = navigate_to(state, route, false);
            if effects.is_empty() {
                DispatchResult::changed()
            } else {
                DispatchResult::changed_with_many(effects)
            }
        }

        Action::GoHome => {
            if state.crumbs.is_empty() && state.view == View::Dex {
                return DispatchResult::unchanged();
            }
            state.crumbs.clear();
            let effects = navigate_to(state, Route::Dex, false);
            if effects.is_empty() {
                DispatchResult::changed()
            } else {
                DispatchResult::changed_with_many(effects)
            }
        }

        Action::OpenSelected => {
            let Some(route) = open_target(state) else {
                return DispatchResult::unchanged();
            };
            if route == state.current_route() {
                return DispatchResult::unchanged();
            }
            let effects = navigate_to(state, route, true);
            if effects.is_empty() {
                DispatchResult::changed()
            } else {
                DispatchResult::changed_with_many(effects)
            }
        }

        Action::SelectionMove(delta) => move_selection(state, delta),

        Action::SelectionPage(delta) => {
            let page = list_page_size(state) as i16;
            move_selection(state, delta * page)
        }

        Action::SelectionJumpTop => jump_selection(state, 0),

        Action::SelectionJumpBottom => {
            let last = match state.view {
                View::Dex => state.filtered_indices.len().saturating_sub(1),
                View::CustomDex => state.custom_index.len().saturating_sub(1),
                _ => return DispatchResult::unchanged(),
            };
            jump_selection(state, last)
        }

        Action::DexSelect(index) => {
            if state.view != View::Dex || !state.set_selected_index(index) {
                return DispatchResult::unchanged();
            }
            DispatchResult::changed()
        }

        Action::CustomSelect(index) => {
            if state.view != View::CustomDex || !state.set_custom_selected_index(index) {
                return DispatchResult::unchanged();
            }
            DispatchResult::changed()
        }

        Action::SearchStart => {
            if state.view != View::Dex {
                return DispatchResult::unchanged();
            }
            state.search.active = true;
            state.search.query.clear();
            state.rebuild_filtered();
            DispatchResult::changed()
        }

        Action::SearchCancel => {
            if !state.search.active && state.search.query.is_empty() {
                return DispatchResult::unchanged();
            }
            state.search.active = false;
            state.search.query.clear();
            state.rebuild_filtered();
            DispatchResult::changed()
        }

        Action::SearchSubmit => {
            state.search.active = false;
            state.rebuild_filtered();
            DispatchResult::changed()
        }

        Action::SearchInput(ch) => {
            state.search.query.push(ch);
            state.rebuild_filtered();
            DispatchResult::changed()
        }

        Action::SearchBackspace => {
            state.search.query.pop();
            state.rebuild_filtered();
            DispatchResult::changed()
        }

        Action::RegionNext => cycle_region(state, 1),
        Action::RegionPrev => cycle_region(state, -1),

        Action::TypeFilterNext => cycle_filter(state, 1),
        Action::TypeFilterPrev => cycle_filter(state, -1),

        Action::TypeFilterClear => {
            if state.type_filter.is_none() {
                return DispatchResult::unchanged();
            }
            state.type_filter = None;
            state.type_loading = false;
            state.rebuild_filtered();
            DispatchResult::changed()
        }

        Action::DetailTabNext => cycle_detail_tab(state, 1),
        Action::DetailTabPrev => cycle_detail_tab(state, -1),

        Action::MoveSelect(index) => {
            if !select_move_index(state, index) {
                return DispatchResult::unchanged();
            }
            tab_effects(state)
        }

        Action::EvolutionSelect(index) => {
            if !select_evolution_index(state, index) {
                return DispatchResult::unchanged();
            }
            DispatchResult::changed()
        }

        Action::MatchupToggle => {
            if !matches!(state.view, View::Pokemon | View::Custom) {
                return DispatchResult::unchanged();
            }
            state.matchup_attack = !state.matchup_attack;
            DispatchResult::changed()
        }

        Action::DeleteCustom => {
            if state.view != View::Custom || state.delete_pending {
                return DispatchResult::unchanged();
            }
            let Some(name) = state.custom_detail_name.clone() else {
                return DispatchResult::unchanged();
            };
            state.delete_pending = true;
            state.message = None;
            DispatchResult::changed_with(Effect::DeleteCustom { name })
        }

        Action::DeleteDidSucceed { name } => {
            state.delete_pending = false;
            state.custom.remove(&name);
            state.custom_index.retain(|entry| entry != &name);
            if state.custom_selected_index >= state.custom_index.len() {
                state.custom_selected_index = 0;
            }
            // Rewind past both the deleted page and its originating list
            // entry, then land on the custom list. If the rewound trail
            // already ends on a (surviving) custom-side route, that crumb
            // stays the terminal one; otherwise a fresh custom-list crumb
            // is pushed on top of whatever remains.
            state.crumbs = remove_crumbs(&state.crumbs, 2);
            let mut effects = match trail_route(state) {
                Route::CustomDex => navigate_to(state, Route::CustomDex, false),
                Route::Custom(other) if other != name => {
                    navigate_to(state, Route::Custom(other), false)
                }
                _ => navigate_to(state, Route::CustomDex, true),
            };
            if !effects.contains(&Effect::LoadCustomIndex) {
                state.custom_loading = true;
                effects.push(Effect::LoadCustomIndex);
            }
            state.message = Some(format!("Deleted {}", display_name(&name)));
            DispatchResult::changed_with_many(effects)
        }

        Action::DeleteDidError { name, error } => {
            state.delete_pending = false;
            state.message = Some(format!("Delete {name} error: {error}"));
            DispatchResult::changed()
        }

        Action::UiTerminalResize(width, height) => {
            if state.terminal_size != (width, height) {
                state.terminal_size = (width, height);
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Tick => {
            state.tick = state.tick.wrapping_add(1);
            if any_loading(state) {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

/// Switch the app to `route`, optionally recording it on the trail, and
/// return whatever fetches the destination still needs.
fn navigate_to(state: &mut AppState, route: Route, push: bool) -> Vec<Effect> {
    if push {
        state.crumbs = push_crumb(
            &state.crumbs,
            Crumb::new(crumb_label(&route), route.path()),
        );
    }
    state.message = None;
    match route {
        Route::Dex => {
            state.view = View::Dex;
            Vec::new()
        }
        Route::CustomDex => {
            state.view = View::CustomDex;
            state.custom_loading = true;
            vec![Effect::LoadCustomIndex]
        }
        Route::Pokemon(name) => {
            state.view = View::Pokemon;
            state.detail_name = Some(name.clone());
            state.reset_detail_selection();
            detail_follow_up(state, &name)
        }
        Route::Custom(name) => {
            state.view = View::Custom;
            state.custom_detail_name = Some(name.clone());
            state.matchup_attack = true;
            custom_follow_up(state, &name)
        }
        Route::Type(name) => {
            state.view = View::Type;
            state.type_detail_name = Some(name.clone());
            if state.type_cache.contains_key(&name) {
                Vec::new()
            } else {
                state.type_detail_loading = true;
                vec![Effect::LoadTypeDetail { name }]
            }
        }
        Route::Move(name) => {
            state.view = View::Move;
            state.move_detail_name = Some(name.clone());
            if state.move_cache.contains_key(&name) {
                Vec::new()
            } else {
                state.move_loading = true;
                vec![Effect::LoadMoveDetail { name }]
            }
        }
    }
}

/// Route of the trail's last crumb; an empty or malformed trail falls
/// back to the dex.
fn trail_route(state: &AppState) -> Route {
    state
        .crumbs
        .last()
        .and_then(|crumb| Route::parse(&crumb.to))
        .unwrap_or(Route::Dex)
}

fn crumb_label(route: &Route) -> String {
    match route {
        Route::Dex => "Pokedex".to_string(),
        Route::CustomDex => "Custom Dex".to_string(),
        Route::Pokemon(name)
        | Route::Custom(name)
        | Route::Type(name)
        | Route::Move(name) => display_name(name),
    }
}

fn open_target(state: &AppState) -> Option<Route> {
    match state.view {
        View::Dex => state.selected_name().map(Route::Pokemon),
        View::CustomDex => state.custom_selected_name().map(Route::Custom),
        View::Pokemon => match state.detail_tab {
            DetailTab::Moves => state.current_move_name().map(Route::Move),
            DetailTab::Evolution => {
                let info = flatten_chain(state.current_evolution_chain());
                info.names
                    .get(state.evolution_selected_index)
                    .cloned()
                    .map(Route::Pokemon)
            }
            DetailTab::General | DetailTab::Matchup => {
                let detail = state.current_detail()?;
                detail.types.first().cloned().map(Route::Type)
            }
        },
        View::Custom => None,
        View::Type => None,
        View::Move => None,
    }
}

fn move_selection(state: &mut AppState, delta: i16) -> DispatchResult<Effect> {
    match state.view {
        View::Dex => {
            let index = clamped(state.selected_index, delta);
            if !state.set_selected_index(index) {
                return DispatchResult::unchanged();
            }
            DispatchResult::changed()
        }
        View::CustomDex => {
            let index = clamped(state.custom_selected_index, delta);
            if !state.set_custom_selected_index(index) {
                return DispatchResult::unchanged();
            }
            DispatchResult::changed()
        }
        View::Pokemon => match state.detail_tab {
            DetailTab::Moves => {
                let index = clamped(state.selected_move_index, delta);
                if !select_move_index(state, index) {
                    return DispatchResult::unchanged();
                }
                tab_effects(state)
            }
            DetailTab::Evolution => {
                let index = clamped(state.evolution_selected_index, delta);
                if !select_evolution_index(state, index) {
                    return DispatchResult::unchanged();
                }
                DispatchResult::changed()
            }
            DetailTab::General | DetailTab::Matchup => DispatchResult::unchanged(),
        },
        View::Custom | View::Type | View::Move => DispatchResult::unchanged(),
    }
}

fn jump_selection(state: &mut AppState, index: usize) -> DispatchResult<Effect> {
    match state.view {
        View::Dex => {
            if !state.set_selected_index(index) {
                return DispatchResult::unchanged();
            }
            DispatchResult::changed()
        }
        View::CustomDex => {
            if !state.set_custom_selected_index(index) {
                return DispatchResult::unchanged();
            }
            DispatchResult::changed()
        }
        _ => DispatchResult::unchanged(),
    }
}

fn clamped(current: usize, delta: i16) -> usize {
    let next = current as i16 + delta;
    if next < 0 {
        0
    } else {
        next as usize
    }
}

fn cycle_region(state: &mut AppState, step: i16) -> DispatchResult<Effect> {
    if state.view != View::Dex {
        return DispatchResult::unchanged();
    }
    let len = REGIONS.len() as i16;
    let mut next = state.region_index as i16 + step;
    if next < 0 {
        next = len - 1;
    } else if next >= len {
        next = 0;
    }
    let next_index = next as usize;
    if next_index == state.region_index {
        return DispatchResult::unchanged();
    }
    state.region_index = next_index;
    state.selected_index = 0;
    state.rebuild_filtered();
    DispatchResult::changed()
}

fn cycle_filter(state: &mut AppState, step: i16) -> DispatchResult<Effect> {
    if state.view != View::Dex || state.type_list.is_empty() {
        return DispatchResult::unchanged();
    }

    let list_len = state.type_list.len() as i16;
    let current_index = state
        .type_filter
        .as_ref()
        .and_then(|name| state.type_list.iter().position(|t| t == name))
        .map(|idx| idx as i16 + 1)
        .unwrap_or(0);
    let mut next = current_index + step;
    let max_index = list_len;
    if next < 0 {
        next = max_index;
    } else if next > max_index {
        next = 0;
    }

    if next == 0 {
        state.type_filter = None;
        state.type_loading = false;
        state.rebuild_filtered();
        return DispatchResult::changed();
    }

    let next_type = state.type_list[(next - 1) as usize].clone();
    state.type_filter = Some(next_type.clone());
    state.selected_index = 0;
    if state.type_cache.contains_key(&next_type) {
        state.type_loading = false;
        state.rebuild_filtered();
        return DispatchResult::changed();
    }

    state.type_loading = true;
    state.rebuild_filtered();
    DispatchResult::changed_with(Effect::LoadTypeDetail { name: next_type })
}

fn cycle_detail_tab(state: &mut AppState, step: i16) -> DispatchResult<Effect> {
    if state.view != View::Pokemon {
        return DispatchResult::unchanged();
    }
    let tabs = [
        DetailTab::General,
        DetailTab::Moves,
        DetailTab::Matchup,
        DetailTab::Evolution,
    ];
    let current = tabs
        .iter()
        .position(|tab| tab == &state.detail_tab)
        .unwrap_or(0) as i16;
    let len = tabs.len() as i16;
    let mut next = current + step;
    if next < 0 {
        next = len - 1;
    } else if next >= len {
        next = 0;
    }
    let next_tab = tabs[next as usize];
    if next_tab == state.detail_tab {
        return DispatchResult::unchanged();
    }
    state.detail_tab = next_tab;
    tab_effects(state)
}

fn select_move_index(state: &mut AppState, index: usize) -> bool {
    let Some(detail) = state.current_detail() else {
        return false;
    };
    if detail.moves.is_empty() {
        return false;
    }
    let bounded = index.min(detail.moves.len().saturating_sub(1));
    if bounded == state.selected_move_index {
        return false;
    }
    state.selected_move_index = bounded;
    true
}

fn select_evolution_index(state: &mut AppState, index: usize) -> bool {
    let info = flatten_chain(state.current_evolution_chain());
    if info.names.is_empty() {
        return false;
    }
    let bounded = index.min(info.names.len().saturating_sub(1));
    if bounded == state.evolution_selected_index {
        return false;
    }
    state.evolution_selected_index = bounded;
    true
}

fn sync_evolution_selection(state: &mut AppState) {
    let Some(name) = state.detail_name.clone() else {
        return;
    };
    let info = flatten_chain(state.current_evolution_chain());
    if let Some(index) = info.names.iter().position(|stage| stage == &name) {
        state.evolution_selected_index = index;
    }
}

/// First fetch for a pokemon page; everything past the base detail is
/// tab-driven and deferred until its tab is opened.
fn detail_follow_up(state: &mut AppState, name: &str) -> Vec<Effect> {
    let mut effects = Vec::new();
    if !state.details.contains_key(name) {
        state.detail_loading = true;
        effects.push(Effect::LoadPokemonDetail {
            name: name.to_string(),
        });
        return effects;
    }
    if !state.species.contains_key(name) {
        effects.push(Effect::LoadSpecies {
            name: name.to_string(),
        });
    }
    effects.extend(tab_fetches(state));
    effects
}

fn tab_effects(state: &mut AppState) -> DispatchResult<Effect> {
    let effects = tab_fetches(state);
    if effects.is_empty() {
        DispatchResult::changed()
    } else {
        DispatchResult::changed_with_many(effects)
    }
}

/// Fetches the active tab still needs for the current pokemon page.
fn tab_fetches(state: &mut AppState) -> Vec<Effect> {
    let mut effects = Vec::new();
    if state.view == View::Pokemon {
        match state.detail_tab {
            DetailTab::Moves => {
                if let Some(move_name) = state.current_move_name() {
                    if !state.move_cache.contains_key(&move_name) {
                        effects.push(Effect::LoadMoveDetail { name: move_name });
                    }
                }
            }
            DetailTab::Matchup => {
                if let Some(detail) = state.current_detail() {
                    let types = detail.types.clone();
                    effects.extend(matchup_effects(state, &types));
                }
            }
            DetailTab::Evolution => {
                if let Some(name) = state.detail_name.clone() {
                    effects.extend(detail_evolution_effects(state, &name));
                }
            }
            DetailTab::General => {}
        }
    }
    effects
}

fn matchup_effects(state: &mut AppState, types: &[String]) -> Vec<Effect> {
    let mut effects = Vec::new();
    let mut missing = false;
    for type_name in types {
        if !state.type_cache.contains_key(type_name) {
            effects.push(Effect::LoadTypeDetail {
                name: type_name.clone(),
            });
            missing = true;
        }
    }
    state.matchup_loading = missing;
    effects
}

fn current_matchup_loading(state: &AppState) -> bool {
    let types = match state.view {
        View::Pokemon if state.detail_tab == DetailTab::Matchup => state
            .current_detail()
            .map(|detail| detail.types.clone()),
        View::Custom => state.current_custom().map(|custom| custom.types.clone()),
        _ => None,
    };
    let Some(types) = types else {
        return false;
    };
    types
        .iter()
        .any(|type_name| !state.type_cache.contains_key(type_name))
}

/// Chain fetch is gated on the species record carrying the chain URL;
/// if the species is still missing, fetch that first and the chain
/// follows from its DidLoad.
fn detail_evolution_effects(state: &mut AppState, name: &str) -> Vec<Effect> {
    if state.view != View::Pokemon
        || state.detail_tab != DetailTab::Evolution
        || state.detail_name.as_deref() != Some(name)
    {
        return Vec::new();
    }
    let Some(species) = state.species.get(name) else {
        return vec![Effect::LoadSpecies {
            name: name.to_string(),
        }];
    };
    let Some(url) = species.evolution_chain_url.clone() else {
        return Vec::new();
    };
    let id = evolution_id_from_url(&url);
    if state.evolution.contains_key(&id) {
        sync_evolution_selection(state);
        return Vec::new();
    }
    state.evolution_loading = true;
    vec![Effect::LoadEvolutionChain { id, url }]
}

/// Custom pages render matchup tables too, so their types need the same
/// relation records as the pokeapi pages.
fn custom_follow_up(state: &mut AppState, name: &str) -> Vec<Effect> {
    if state.custom.is_empty() {
        state.custom_loading = true;
        return vec![Effect::LoadCustomIndex];
    }
    let Some(custom) = state.custom.get(name) else {
        return Vec::new();
    };
    let types = custom.types.clone();
    matchup_effects(state, &types)
}

fn any_loading(state: &AppState) -> bool {
    state.list_loading
        || state.custom_loading
        || state.detail_loading
        || state.type_loading
        || state.type_detail_loading
        || state.evolution_loading
        || state.matchup_loading
        || state.move_loading
        || state.delete_pending
}

fn list_page_size(state: &AppState) -> usize {
    state.terminal_size.1.saturating_sub(8) as usize
}
