use std::cell::RefCell;
use std::io;
use std::rc::Rc;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventKind,
    HandlerResponse, Keybindings, TaskKey,
};
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};

use pokedex_tui::action::Action;
use pokedex_tui::api;
use pokedex_tui::effect::Effect;
use pokedex_tui::reducer::reducer;
use pokedex_tui::state::{AppState, Route};
use pokedex_tui::ui::DexUi;
use pokedex_tui::{DexComponentId, DexContext};

#[derive(Parser, Debug)]
#[command(name = "pokedex-tui")]
#[command(about = "Pokedex catalog TUI over PokeAPI")]
struct Args {
    /// Base URL of the custom pokemon service
    #[arg(long)]
    custom_base: Option<String>,

    #[command(flatten)]
    debug: DebugCliArgs,
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let args = Args::parse();
    if let Some(base) = args.custom_base {
        std::env::set_var("CUSTOM_DEX_BASE", base);
    }
    let debug = DebugSession::new(args.debug);

    let state = debug
        .load_state_or_else_async(|| async { Ok::<AppState, io::Error>(AppState::default()) })
        .await
        .map_err(debug_error)?;
    let replay_actions = debug.load_replay_items().map_err(debug_error)?;
    let (middleware, recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &debug, store, replay_actions).await;

    if use_alt_screen {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
    }

    let run_output = result?;
    run_output.write_render_output()?;
    debug.save_actions(recorder.as_ref()).map_err(debug_error)?;
    Ok(())
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    replay_actions: Vec<ReplayItem<Action>>,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(DexUi::new()));
    let mut bus: EventBus<AppState, Action, DexComponentId, DexContext> = EventBus::new();
    let keybindings: Keybindings<DexContext> = Keybindings::new();

    let ui_list = Rc::clone(&ui);
    bus.register(DexComponentId::List, move |event, state| {
        ui_list.borrow_mut().handle_list_event(&event.kind, state)
    });

    let ui_detail = Rc::clone(&ui);
    bus.register(DexComponentId::Detail, move |event, state| {
        ui_detail
            .borrow_mut()
            .handle_detail_event(&event.kind, state)
    });

    let ui_search = Rc::clone(&ui);
    bus.register(DexComponentId::Search, move |event, state| {
        ui_search
            .borrow_mut()
            .handle_search_event(&event.kind, state)
    });

    bus.register_global(|event, state| match event.kind {
        EventKind::Resize(width, height) => {
            HandlerResponse::action(Action::UiTerminalResize(width, height)).with_render()
        }
        EventKind::Key(key) => match key.code {
            crossterm::event::KeyCode::Char('q') => HandlerResponse::action(Action::Quit),
            crossterm::event::KeyCode::Esc if !state.search.active => {
                HandlerResponse::action(Action::NavigateBack)
            }
            crossterm::event::KeyCode::Enter if !state.search.active => {
                HandlerResponse::action(Action::OpenSelected)
            }
            crossterm::event::KeyCode::Char('g') if !state.search.active => {
                HandlerResponse::action(Action::GoHome)
            }
            crossterm::event::KeyCode::Char('c') if !state.search.active => {
                HandlerResponse::action(Action::Navigate(Route::CustomDex))
            }
            crossterm::event::KeyCode::Char('/') if !state.search.active => {
                HandlerResponse::action(Action::SearchStart)
            }
            crossterm::event::KeyCode::Char('[') if !state.search.active => {
                HandlerResponse::action(Action::TypeFilterPrev)
            }
            crossterm::event::KeyCode::Char(']') if !state.search.active => {
                HandlerResponse::action(Action::TypeFilterNext)
            }
            crossterm::event::KeyCode::Backspace if !state.search.active => {
                HandlerResponse::action(Action::TypeFilterClear)
            }
            crossterm::event::KeyCode::Char('r') if !state.search.active => {
                HandlerResponse::action(Action::RegionNext)
            }
            crossterm::event::KeyCode::Char('R') if !state.search.active => {
                HandlerResponse::action(Action::RegionPrev)
            }
            crossterm::event::KeyCode::Char('a') if !state.search.active => {
                HandlerResponse::action(Action::MatchupToggle)
            }
            crossterm::event::KeyCode::Char('x') if !state.search.active => {
                HandlerResponse::action(Action::DeleteCustom)
            }
            crossterm::event::KeyCode::Char(digit @ '1'..='9') if !state.search.active => {
                HandlerResponse::action(Action::CrumbJump(digit as usize - '1' as usize))
            }
            _ => HandlerResponse::ignored(),
        },
        _ => HandlerResponse::ignored(),
    });

    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            Some(Action::Init),
            Some(Action::Quit),
            |runtime| {
                if debug.render_once() {
                    return;
                }
                runtime
                    .subscriptions()
                    .interval("tick", Duration::from_millis(120), || Action::Tick);
            },
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                ui.borrow_mut()
                    .render(frame, area, state, render_ctx, event_ctx);
            },
            |action| matches!(action, Action::Quit),
            handle_effect,
        )
        .await
}

fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>) {
    match effect {
        Effect::LoadDex => {
            ctx.tasks().spawn(TaskKey::new("dex"), async {
                match api::fetch_dex().await {
                    Ok(entries) => Action::DexDidLoad(entries),
                    Err(err) => Action::DexDidError(err),
                }
            });
        }
        Effect::LoadTypes => {
            ctx.tasks().spawn(TaskKey::new("types"), async {
                match api::fetch_type_list().await {
                    Ok(types) => Action::TypesDidLoad(types),
                    Err(err) => Action::TypesDidError(err),
                }
            });
        }
        Effect::LoadCustomIndex => {
            ctx.tasks().spawn(TaskKey::new("custom_index"), async {
                match api::fetch_custom_index().await {
                    Ok(entries) => Action::CustomDidLoad(entries),
                    Err(err) => Action::CustomDidError(err),
                }
            });
        }
        Effect::LoadPokemonDetail { name } => {
            let key = format!("pokemon_{name}");
            ctx.tasks().spawn(TaskKey::new(key), async move {
                match api::fetch_pokemon_detail(&name).await {
                    Ok(detail) => Action::PokemonDidLoad(detail),
                    Err(error) => Action::PokemonDidError { name, error },
                }
            });
        }
        Effect::LoadSpecies { name } => {
            let key = format!("species_{name}");
            ctx.tasks().spawn(TaskKey::new(key), async move {
                match api::fetch_pokemon_species(&name).await {
                    Ok(species) => Action::SpeciesDidLoad(species),
                    Err(error) => Action::SpeciesDidError { name, error },
                }
            });
        }
        Effect::LoadEvolutionChain { id, url } => {
            let key = format!("evo_{id}");
            ctx.tasks().spawn(TaskKey::new(key), async move {
                match api::fetch_evolution_chain(&url).await {
                    Ok(chain) => Action::EvolutionDidLoad { id, chain },
                    Err(error) => Action::EvolutionDidError { id, error },
                }
            });
        }
        Effect::LoadTypeDetail { name } => {
            let key = format!("type_{name}");
            ctx.tasks().spawn(TaskKey::new(key), async move {
                match api::fetch_type_detail(&name).await {
                    Ok(detail) => Action::TypeDetailDidLoad(detail),
                    Err(error) => Action::TypeDetailDidError { name, error },
                }
            });
        }
        Effect::LoadMoveDetail { name } => {
            let key = format!("move_{name}");
            ctx.tasks().spawn(TaskKey::new(key), async move {
                match api::fetch_move_detail(&name).await {
                    Ok(detail) => Action::MoveDetailDidLoad(detail),
                    Err(error) => Action::MoveDetailDidError { name, error },
                }
            });
        }
        Effect::DeleteCustom { name } => {
            let key = format!("delete_{name}");
            ctx.tasks().spawn(TaskKey::new(key), async move {
                match api::delete_custom_pokemon(&name).await {
                    Ok(()) => Action::DeleteDidSucceed { name },
                    Err(error) => Action::DeleteDidError { name, error },
                }
            });
        }
    }
}
