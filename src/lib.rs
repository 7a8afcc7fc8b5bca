//! Pokedex catalog TUI over PokeAPI with a companion custom-pokemon dex.
//!
//! The library exposes the app's modules for testing; the binary wires
//! them to the terminal runtime.

pub mod action;
pub mod api;
pub mod crumbs;
pub mod effect;
pub mod evolution;
pub mod matchup;
pub mod reducer;
pub mod state;
pub mod ui;

use tui_dispatch::EventRoutingState;

use crate::state::{AppState, View};

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum DexComponentId {
    Header,
    List,
    Detail,
    Search,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DexContext {
    Header,
    List,
    Detail,
    Search,
}

impl EventRoutingState<DexComponentId, DexContext> for AppState {
    fn focused(&self) -> Option<DexComponentId> {
        if self.search.active {
            return Some(DexComponentId::Search);
        }
        match self.view {
            View::Dex | View::CustomDex => Some(DexComponentId::List),
            View::Pokemon => Some(DexComponentId::Detail),
            View::Custom | View::Type | View::Move => None,
        }
    }

    fn modal(&self) -> Option<DexComponentId> {
        if self.search.active {
            Some(DexComponentId::Search)
        } else {
            None
        }
    }

    fn binding_context(&self, id: DexComponentId) -> DexContext {
        match id {
            DexComponentId::Header => DexContext::Header,
            DexComponentId::List => DexContext::List,
            DexComponentId::Detail => DexContext::Detail,
            DexComponentId::Search => DexContext::Search,
        }
    }

    fn default_context(&self) -> DexContext {
        DexContext::List
    }
}
