use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Tabs, Wrap},
    Frame,
};
use tui_dispatch::{Component, EventContext, EventKind, HandlerResponse, RenderContext};
use tui_dispatch_components::style::BorderStyle;
use tui_dispatch_components::{
    BaseStyle, Padding, SelectList, SelectListBehavior, SelectListProps, SelectListStyle,
    SelectionStyle, StatusBar, StatusBarHint, StatusBarItem, StatusBarProps, StatusBarSection,
    StatusBarStyle,
};

use crate::action::Action;
use crate::evolution::{flatten_chain, linked_line, LineSlot};
use crate::matchup::{aggregate, DamageRelationSet, MultiplierMap, TypeMatchups, MULTIPLIER_BUCKETS};
use crate::state::{display_name, AppState, DetailTab, PokemonStat, View};

const BG_BASE: Color = Color::Rgb(24, 12, 14);
const BG_PANEL: Color = Color::Rgb(38, 20, 24);
const BG_PANEL_ALT: Color = Color::Rgb(50, 28, 32);
const BG_HIGHLIGHT: Color = Color::Rgb(120, 38, 44);
const TEXT_MAIN: Color = Color::Rgb(244, 234, 230);
const TEXT_DIM: Color = Color::Rgb(198, 172, 166);
const ACCENT_RED: Color = Color::Rgb(228, 88, 92);
const ACCENT_GOLD: Color = Color::Rgb(230, 188, 96);
const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

pub struct DexUi {
    dex_list: SelectList,
    custom_list: SelectList,
    move_list: SelectList,
    evolution_list: SelectList,
    status_bar: StatusBar,
}

impl DexUi {
    pub fn new() -> Self {
        Self {
            dex_list: SelectList::new(),
            custom_list: SelectList::new(),
            move_list: SelectList::new(),
            evolution_list: SelectList::new(),
            status_bar: StatusBar::new(),
        }
    }

    pub fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        render_ctx: RenderContext,
        event_ctx: &mut EventContext<crate::DexComponentId>,
    ) {
        render_app(
            frame,
            area,
            state,
            render_ctx,
            event_ctx,
            &mut self.dex_list,
            &mut self.custom_list,
            &mut self.move_list,
            &mut self.evolution_list,
            &mut self.status_bar,
        );
    }

    pub fn handle_list_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        handle_list_event(event, state, &mut self.dex_list, &mut self.custom_list)
    }

    pub fn handle_detail_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        handle_detail_event(event, state, &mut self.move_list, &mut self.evolution_list)
    }

    pub fn handle_search_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        handle_search_event(event, state)
    }
}

impl Default for DexUi {
    fn default() -> Self {
        Self::new()
    }
}

pub fn render_app(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    _render_ctx: RenderContext,
    event_ctx: &mut EventContext<crate::DexComponentId>,
    dex_list: &mut SelectList,
    custom_list: &mut SelectList,
    move_list: &mut SelectList,
    evolution_list: &mut SelectList,
    status_bar: &mut StatusBar,
) {
    let base = Block::default().style(Style::default().bg(BG_BASE));
    frame.render_widget(base, area);
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(10),
            Constraint::Length(3),
        ])
        .split(area);

    render_header(frame, layout[0], state, event_ctx);
    match state.view {
        View::Dex => render_dex(frame, layout[1], state, event_ctx, dex_list),
        View::CustomDex => render_custom_dex(frame, layout[1], state, event_ctx, custom_list),
        View::Pokemon => {
            render_pokemon(frame, layout[1], state, event_ctx, move_list, evolution_list)
        }
        View::Custom => render_custom(frame, layout[1], state),
        View::Type => render_type(frame, layout[1], state),
        View::Move => render_move(frame, layout[1], state),
    }
    render_footer(frame, layout[2], state, status_bar);
}

pub fn handle_list_event(
    event: &EventKind,
    state: &AppState,
    dex_list: &mut SelectList,
    custom_list: &mut SelectList,
) -> HandlerResponse<Action> {
    let actions = match event {
        EventKind::Key(key) => match key.code {
            crossterm::event::KeyCode::Enter => vec![Action::OpenSelected],
            crossterm::event::KeyCode::PageDown => vec![Action::SelectionPage(1)],
            crossterm::event::KeyCode::PageUp => vec![Action::SelectionPage(-1)],
            crossterm::event::KeyCode::Home => vec![Action::SelectionJumpTop],
            crossterm::event::KeyCode::End => vec![Action::SelectionJumpBottom],
            _ => {
                return match state.view {
                    View::Dex => {
                        let items = dex_items(state);
                        let props = SelectListProps {
                            items: &items,
                            count: items.len(),
                            selected: state.selected_index.min(items.len().saturating_sub(1)),
                            is_focused: true,
                            style: list_style(),
                            behavior: SelectListBehavior {
                                show_scrollbar: true,
                                wrap_navigation: false,
                            },
                            on_select: Action::DexSelect,
                            render_item: &|item| item.clone(),
                        };
                        let actions: Vec<_> =
                            dex_list.handle_event(event, props).into_iter().collect();
                        handler_response(actions)
                    }
                    View::CustomDex => {
                        let items = custom_items(state);
                        let props = SelectListProps {
                            items: &items,
                            count: items.len(),
                            selected: state
                                .custom_selected_index
                                .min(items.len().saturating_sub(1)),
                            is_focused: true,
                            style: list_style(),
                            behavior: SelectListBehavior {
                                show_scrollbar: true,
                                wrap_navigation: false,
                            },
                            on_select: Action::CustomSelect,
                            render_item: &|item| item.clone(),
                        };
                        let actions: Vec<_> =
                            custom_list.handle_event(event, props).into_iter().collect();
                        handler_response(actions)
                    }
                    _ => HandlerResponse::ignored(),
                };
            }
        },
        EventKind::Scroll { delta, .. } => vec![Action::SelectionMove((*delta * 3) as i16)],
        _ => vec![],
    };
    handler_response(actions)
}

pub fn handle_detail_event(
    event: &EventKind,
    state: &AppState,
    move_list: &mut SelectList,
    evolution_list: &mut SelectList,
) -> HandlerResponse<Action> {
    let actions = match event {
        EventKind::Key(key) => match key.code {
            crossterm::event::KeyCode::Enter => vec![Action::OpenSelected],
            crossterm::event::KeyCode::Left | crossterm::event::KeyCode::Char('h') => {
                vec![Action::DetailTabPrev]
            }
            crossterm::event::KeyCode::Right | crossterm::event::KeyCode::Char('l') => {
                vec![Action::DetailTabNext]
            }
            _ => vec![],
        },
        _ => vec![],
    };
    if !actions.is_empty() {
        return handler_response(actions);
    }
    match state.detail_tab {
        DetailTab::Moves => {
            let items = move_items(state);
            if items.is_empty() {
                return HandlerResponse::ignored();
            }
            let props = SelectListProps {
                items: &items,
                count: items.len(),
                selected: state.selected_move_index.min(items.len().saturating_sub(1)),
                is_focused: true,
                style: detail_list_style(),
                behavior: SelectListBehavior {
                    show_scrollbar: true,
                    wrap_navigation: false,
                },
                on_select: Action::MoveSelect,
                render_item: &|item| item.clone(),
            };
            let actions: Vec<_> = move_list.handle_event(event, props).into_iter().collect();
            handler_response(actions)
        }
        DetailTab::Evolution => {
            let items = evolution_items(state);
            if items.is_empty() {
                return HandlerResponse::ignored();
            }
            let props = SelectListProps {
                items: &items,
                count: items.len(),
                selected: state
                    .evolution_selected_index
                    .min(items.len().saturating_sub(1)),
                is_focused: true,
                style: detail_list_style(),
                behavior: SelectListBehavior {
                    show_scrollbar: true,
                    wrap_navigation: false,
                },
                on_select: Action::EvolutionSelect,
                render_item: &|item| item.clone(),
            };
            let actions: Vec<_> = evolution_list
                .handle_event(event, props)
                .into_iter()
                .collect();
            handler_response(actions)
        }
        DetailTab::General | DetailTab::Matchup => HandlerResponse::ignored(),
    }
}

pub fn handle_search_event(event: &EventKind, _state: &AppState) -> HandlerResponse<Action> {
    let actions = match event {
        EventKind::Key(key) => match key.code {
            crossterm::event::KeyCode::Esc => vec![Action::SearchCancel],
            crossterm::event::KeyCode::Enter => vec![Action::SearchSubmit],
            crossterm::event::KeyCode::Backspace => vec![Action::SearchBackspace],
            crossterm::event::KeyCode::Char(ch) => vec![Action::SearchInput(ch)],
            _ => vec![],
        },
        _ => vec![],
    };
    handler_response(actions)
}

fn handler_response(actions: Vec<Action>) -> HandlerResponse<Action> {
    if actions.is_empty() {
        HandlerResponse::ignored()
    } else {
        HandlerResponse {
            actions,
            consumed: true,
            needs_render: false,
        }
    }
}

fn render_header(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    event_ctx: &mut EventContext<crate::DexComponentId>,
) {
    event_ctx.set_component_area(crate::DexComponentId::Header, area);
    if state.search.active {
        event_ctx.set_component_area(crate::DexComponentId::Search, area);
    }
    let block = Block::default()
        .borders(Borders::ALL)
        .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN))
        .border_style(Style::default().fg(TEXT_DIM))
        .title("POKEDEX");
    let paragraph = Paragraph::new(Text::from(vec![
        crumb_line(state),
        filter_line(state),
    ]))
    .block(block)
    .style(Style::default().fg(TEXT_MAIN));
    frame.render_widget(paragraph, area);
}

/// Breadcrumb bar: the fixed home marker, then the trail. The last crumb
/// is the current page and renders highlighted; prior crumbs carry their
/// jump digit.
fn crumb_line(state: &AppState) -> Line<'static> {
    let mut spans = vec![Span::styled(
        "Home",
        if state.crumbs.is_empty() {
            Style::default().fg(ACCENT_RED).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(TEXT_DIM)
        },
    )];
    let last = state.crumbs.len().saturating_sub(1);
    for (index, crumb) in state.crumbs.iter().enumerate() {
        spans.push(Span::styled(" > ", Style::default().fg(TEXT_DIM)));
        if index == last {
            spans.push(Span::styled(
                crumb.content.clone(),
                Style::default().fg(ACCENT_RED).add_modifier(Modifier::BOLD),
            ));
        } else {
            spans.push(Span::styled(
                format!("[{}] {}", index + 1, crumb.content),
                Style::default().fg(ACCENT_GOLD),
            ));
        }
    }
    Line::from(spans)
}

fn filter_line(state: &AppState) -> Line<'static> {
    if state.view != View::Dex {
        return Line::from(Span::styled(
            view_caption(state),
            Style::default().fg(TEXT_DIM),
        ));
    }
    let filter = state
        .type_filter
        .as_deref()
        .map(|name| name.to_ascii_uppercase())
        .unwrap_or_else(|| "ALL".to_string());
    let search = if state.search.active {
        format!("/{}_", state.search.query)
    } else if state.search.query.is_empty() {
        "/".to_string()
    } else {
        format!("/{}", state.search.query)
    };
    Line::from(vec![
        Span::styled(
            state.current_region().label.to_string(),
            Style::default().fg(ACCENT_GOLD).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  |  Type: "),
        Span::styled(filter, Style::default().fg(ACCENT_GOLD)),
        Span::raw("  |  Search: "),
        Span::styled(search, Style::default().fg(ACCENT_RED)),
        Span::raw("  |  "),
        Span::styled(
            format!("{}/{}", state.filtered_indices.len(), state.dex.len()),
            Style::default().fg(TEXT_DIM),
        ),
    ])
}

fn view_caption(state: &AppState) -> String {
    match state.view {
        View::Dex => String::new(),
        View::CustomDex => format!("{} custom entries", state.custom_index.len()),
        View::Pokemon => state
            .detail_name
            .as_deref()
            .map(display_name)
            .unwrap_or_default(),
        View::Custom => state
            .custom_detail_name
            .as_deref()
            .map(|name| format!("{} (custom)", display_name(name)))
            .unwrap_or_default(),
        View::Type => state
            .type_detail_name
            .as_deref()
            .map(|name| format!("{} type", display_name(name)))
            .unwrap_or_default(),
        View::Move => state
            .move_detail_name
            .as_deref()
            .map(|name| format!("{} move", display_name(name)))
            .unwrap_or_default(),
    }
}

fn render_dex(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    event_ctx: &mut EventContext<crate::DexComponentId>,
    dex_list: &mut SelectList,
) {
    event_ctx.set_component_area(crate::DexComponentId::List, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .title("NATIONAL DEX")
        .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN))
        .border_style(Style::default().fg(TEXT_DIM));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let items = dex_items(state);
    if items.is_empty() {
        let message = if state.list_loading {
            "Loading pokedex..."
        } else {
            "No matches."
        };
        frame.render_widget(
            Paragraph::new(message)
                .style(Style::default().fg(TEXT_DIM))
                .wrap(Wrap { trim: true }),
            inner,
        );
        return;
    }
    let props = SelectListProps {
        items: &items,
        count: items.len(),
        selected: state.selected_index.min(items.len().saturating_sub(1)),
        is_focused: true,
        style: list_style(),
        behavior: SelectListBehavior {
            show_scrollbar: true,
            wrap_navigation: false,
        },
        on_select: Action::DexSelect,
        render_item: &|item| item.clone(),
    };
    dex_list.render(frame, inner, props);
}

fn render_custom_dex(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    event_ctx: &mut EventContext<crate::DexComponentId>,
    custom_list: &mut SelectList,
) {
    event_ctx.set_component_area(crate::DexComponentId::List, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .title("CUSTOM DEX")
        .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN))
        .border_style(Style::default().fg(TEXT_DIM));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let items = custom_items(state);
    if items.is_empty() {
        let message = if state.custom_loading {
            "Loading custom dex..."
        } else {
            "No custom pokemon."
        };
        frame.render_widget(
            Paragraph::new(message)
                .style(Style::default().fg(TEXT_DIM))
                .wrap(Wrap { trim: true }),
            inner,
        );
        return;
    }
    let props = SelectListProps {
        items: &items,
        count: items.len(),
        selected: state
            .custom_selected_index
            .min(items.len().saturating_sub(1)),
        is_focused: true,
        style: list_style(),
        behavior: SelectListBehavior {
            show_scrollbar: true,
            wrap_navigation: false,
        },
        on_select: Action::CustomSelect,
        render_item: &|item| item.clone(),
    };
    custom_list.render(frame, inner, props);
}

fn render_pokemon(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    event_ctx: &mut EventContext<crate::DexComponentId>,
    move_list: &mut SelectList,
    evolution_list: &mut SelectList,
) {
    event_ctx.set_component_area(crate::DexComponentId::Detail, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .title("POKEMON")
        .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN))
        .border_style(Style::default().fg(TEXT_DIM));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(detail) = state.current_detail() else {
        let message = if state.detail_loading {
            "Loading pokemon..."
        } else {
            "No data."
        };
        frame.render_widget(
            Paragraph::new(message)
                .style(Style::default().fg(TEXT_DIM))
                .alignment(Alignment::Center),
            inner,
        );
        return;
    };

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(2),
            Constraint::Min(4),
        ])
        .split(inner);

    let genus = state
        .current_species()
        .and_then(|species| species.genus.clone())
        .unwrap_or_default();
    let title = Text::from(vec![
        Line::from(vec![
            Span::styled(
                format!("#{:04}  {}", detail.id, display_name(&detail.name)),
                Style::default().fg(ACCENT_RED).add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(genus, Style::default().fg(TEXT_DIM)),
        ]),
        Line::from(format!(
            "Type: {}",
            detail
                .types
                .iter()
                .map(|name| display_name(name))
                .collect::<Vec<_>>()
                .join(" / ")
        )),
    ]);
    frame.render_widget(Paragraph::new(title), layout[0]);

    let tabs = Tabs::new(vec!["General", "Moves", "Matchup", "Evolution"])
        .select(detail_tab_index(state))
        .style(Style::default().fg(TEXT_DIM))
        .highlight_style(Style::default().fg(ACCENT_RED).add_modifier(Modifier::BOLD));
    frame.render_widget(tabs, layout[1]);

    match state.detail_tab {
        DetailTab::General => render_general_tab(frame, layout[2], state),
        DetailTab::Moves => render_moves_tab(frame, layout[2], state, move_list),
        DetailTab::Matchup => {
            let matchups = collect_matchups(state, &detail.types);
            render_matchup_panel(frame, layout[2], state, matchups, state.matchup_loading);
        }
        DetailTab::Evolution => render_evolution_tab(frame, layout[2], state, evolution_list),
    }
}

fn render_general_tab(frame: &mut Frame, area: Rect, state: &AppState) {
    let Some(detail) = state.current_detail() else {
        return;
    };
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    let flavor = state
        .current_species()
        .and_then(|species| species.flavor_text.clone())
        .unwrap_or_default();
    let abilities = detail
        .abilities
        .iter()
        .map(|name| display_name(name))
        .collect::<Vec<_>>()
        .join(", ");
    let mut lines = vec![
        Line::from(format!(
            "Height: {:.1} m  Weight: {:.1} kg",
            detail.height as f64 / 10.0,
            detail.weight as f64 / 10.0
        )),
        Line::from(format!("Abilities: {abilities}")),
    ];
    if !flavor.is_empty() {
        lines.push(Line::from(" "));
        lines.push(Line::from(flavor));
    }
    frame.render_widget(
        Paragraph::new(Text::from(lines))
            .style(Style::default().fg(TEXT_MAIN))
            .wrap(Wrap { trim: true }),
        layout[0],
    );

    let stats_block = Block::default()
        .borders(Borders::ALL)
        .title("STATS")
        .style(Style::default().bg(BG_PANEL_ALT).fg(TEXT_MAIN));
    let stats_inner = stats_block.inner(layout[1]);
    frame.render_widget(stats_block, layout[1]);
    let stats = detail
        .stats
        .iter()
        .map(|stat| Line::from(render_stat(stat)))
        .collect::<Vec<_>>();
    frame.render_widget(Paragraph::new(Text::from(stats)), stats_inner);
}

fn render_moves_tab(frame: &mut Frame, area: Rect, state: &AppState, move_list: &mut SelectList) {
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);
    let list_block = Block::default()
        .borders(Borders::ALL)
        .title("MOVES")
        .style(Style::default().bg(BG_PANEL_ALT).fg(TEXT_MAIN));
    let list_inner = list_block.inner(layout[0]);
    frame.render_widget(list_block, layout[0]);

    let items = move_items(state);
    if items.is_empty() {
        frame.render_widget(
            Paragraph::new("No moves.").style(Style::default().fg(TEXT_DIM)),
            list_inner,
        );
    } else {
        let props = SelectListProps {
            items: &items,
            count: items.len(),
            selected: state.selected_move_index.min(items.len().saturating_sub(1)),
            is_focused: true,
            style: detail_list_style(),
            behavior: SelectListBehavior {
                show_scrollbar: true,
                wrap_navigation: false,
            },
            on_select: Action::MoveSelect,
            render_item: &|item| item.clone(),
        };
        move_list.render(frame, list_inner, props);
    }

    let detail_block = Block::default()
        .borders(Borders::ALL)
        .title("MOVE DETAIL")
        .style(Style::default().bg(BG_PANEL_ALT).fg(TEXT_MAIN));
    let detail_inner = detail_block.inner(layout[1]);
    frame.render_widget(detail_block, layout[1]);
    let text = state
        .current_move_name()
        .map(|name| move_text(state, &name))
        .unwrap_or_else(|| Text::from("No move selected."));
    frame.render_widget(
        Paragraph::new(text)
            .style(Style::default().fg(TEXT_MAIN))
            .wrap(Wrap { trim: true }),
        detail_inner,
    );
}

fn render_evolution_tab(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    evolution_list: &mut SelectList,
) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(3)])
        .split(area);

    let info = flatten_chain(state.current_evolution_chain());
    let path = if info.levels.is_empty() {
        if state.evolution_loading {
            "Loading evolution chain...".to_string()
        } else {
            "No evolution data.".to_string()
        }
    } else {
        info.levels
            .iter()
            .map(|level| {
                level
                    .iter()
                    .map(|name| display_name(name))
                    .collect::<Vec<_>>()
                    .join(" / ")
            })
            .collect::<Vec<_>>()
            .join("  ->  ")
    };
    let path_block = Block::default()
        .borders(Borders::ALL)
        .title("CHAIN")
        .style(Style::default().bg(BG_PANEL_ALT).fg(TEXT_MAIN));
    let path_inner = path_block.inner(layout[0]);
    frame.render_widget(path_block, layout[0]);
    frame.render_widget(
        Paragraph::new(path)
            .style(Style::default().fg(TEXT_MAIN))
            .wrap(Wrap { trim: true }),
        path_inner,
    );

    let list_block = Block::default()
        .borders(Borders::ALL)
        .title("STAGES")
        .style(Style::default().bg(BG_PANEL_ALT).fg(TEXT_MAIN));
    let list_inner = list_block.inner(layout[1]);
    frame.render_widget(list_block, layout[1]);
    let items = evolution_items(state);
    if items.is_empty() {
        return;
    }
    let props = SelectListProps {
        items: &items,
        count: items.len(),
        selected: state
            .evolution_selected_index
            .min(items.len().saturating_sub(1)),
        is_focused: true,
        style: detail_list_style(),
        behavior: SelectListBehavior {
            show_scrollbar: true,
            wrap_navigation: false,
        },
        on_select: Action::EvolutionSelect,
        render_item: &|item| item.clone(),
    };
    evolution_list.render(frame, list_inner, props);
}

fn render_custom(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("CUSTOM POKEMON")
        .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN))
        .border_style(Style::default().fg(TEXT_DIM));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(custom) = state.current_custom() else {
        let message = if state.custom_loading {
            "Loading custom dex..."
        } else {
            "Custom pokemon not found."
        };
        frame.render_widget(
            Paragraph::new(message)
                .style(Style::default().fg(TEXT_DIM))
                .alignment(Alignment::Center),
            inner,
        );
        return;
    };

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(8), Constraint::Length(3)])
        .split(inner);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(layout[0]);

    let types = custom
        .types
        .iter()
        .map(|name| display_name(name))
        .collect::<Vec<_>>()
        .join(" / ");
    let abilities = custom
        .abilities
        .iter()
        .map(|ability| {
            if ability.hidden {
                format!("{} (hidden)", display_name(&ability.name))
            } else {
                display_name(&ability.name)
            }
        })
        .collect::<Vec<_>>()
        .join(", ");
    let stats = &custom.stats;
    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                display_name(&custom.name),
                Style::default().fg(ACCENT_RED).add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(custom.genus.clone(), Style::default().fg(TEXT_DIM)),
        ]),
        Line::from(format!("Type: {types}")),
        Line::from(format!(
            "Size: {}'{}\"  Weight: {} lbs",
            custom.feet, custom.inches, custom.weight
        )),
        Line::from(format!(
            "Shape: {}  Color: {}",
            display_name(&custom.shape),
            display_name(&custom.color)
        )),
        Line::from(format!("Abilities: {abilities}")),
        Line::from(format!(
            "HP {}  ATK {}  DEF {}  SPA {}  SPD {}  SPE {}",
            stats.hp, stats.atk, stats.def, stats.sp_atk, stats.sp_def, stats.speed
        )),
    ];
    if !custom.description.is_empty() {
        lines.push(Line::from(" "));
        lines.push(Line::from(custom.description.clone()));
    }
    frame.render_widget(
        Paragraph::new(Text::from(lines))
            .style(Style::default().fg(TEXT_MAIN))
            .wrap(Wrap { trim: true }),
        columns[0],
    );

    let matchups = collect_matchups(state, &custom.types);
    render_matchup_panel(frame, columns[1], state, matchups, false);

    let line_block = Block::default()
        .borders(Borders::ALL)
        .title("LINE")
        .style(Style::default().bg(BG_PANEL_ALT).fg(TEXT_MAIN));
    let line_inner = line_block.inner(layout[1]);
    frame.render_widget(line_block, layout[1]);
    frame.render_widget(
        Paragraph::new(custom_line_text(state, &custom.name))
            .style(Style::default().fg(TEXT_MAIN))
            .wrap(Wrap { trim: true }),
        line_inner,
    );
}

fn render_type(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("TYPE")
        .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN))
        .border_style(Style::default().fg(TEXT_DIM));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(name) = state.type_detail_name.as_deref() else {
        return;
    };
    let Some(detail) = state.type_cache.get(name) else {
        let message = if state.type_detail_loading {
            "Loading type..."
        } else {
            "No type data."
        };
        frame.render_widget(
            Paragraph::new(message)
                .style(Style::default().fg(TEXT_DIM))
                .alignment(Alignment::Center),
            inner,
        );
        return;
    };

    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(inner);
    frame.render_widget(
        Paragraph::new(relations_text(&detail.relations))
            .style(Style::default().fg(TEXT_MAIN))
            .wrap(Wrap { trim: true }),
        layout[0],
    );

    let member_block = Block::default()
        .borders(Borders::ALL)
        .title(format!("MEMBERS ({})", detail.members.len()))
        .style(Style::default().bg(BG_PANEL_ALT).fg(TEXT_MAIN));
    let member_inner = member_block.inner(layout[1]);
    frame.render_widget(member_block, layout[1]);
    let sample = detail
        .members
        .iter()
        .take(member_inner.height as usize)
        .map(|member| Line::from(display_name(member)))
        .collect::<Vec<_>>();
    frame.render_widget(Paragraph::new(Text::from(sample)), member_inner);
}

fn render_move(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("MOVE")
        .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN))
        .border_style(Style::default().fg(TEXT_DIM));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(name) = state.move_detail_name.clone() else {
        return;
    };
    frame.render_widget(
        Paragraph::new(move_text(state, &name))
            .style(Style::default().fg(TEXT_MAIN))
            .wrap(Wrap { trim: true }),
        inner,
    );
}

fn move_text(state: &AppState, name: &str) -> Text<'static> {
    let Some(detail) = state.move_cache.get(name) else {
        if state.move_loading || state.view == View::Pokemon {
            return Text::from(format!("Loading move: {name}..."));
        }
        return Text::from("No move data.");
    };
    let power = detail
        .power
        .map(|value| value.to_string())
        .unwrap_or_else(|| "--".to_string());
    let accuracy = detail
        .accuracy
        .map(|value| value.to_string())
        .unwrap_or_else(|| "--".to_string());
    let pp = detail
        .pp
        .map(|value| value.to_string())
        .unwrap_or_else(|| "--".to_string());
    let effect = detail.effect.clone().unwrap_or_default();
    Text::from(vec![
        Line::from(Span::styled(
            display_name(&detail.name),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("Power: {power}  Acc: {accuracy}  PP: {pp}")),
        Line::from(effect),
    ])
}

fn relations_text(relations: &DamageRelationSet) -> Text<'static> {
    let groups: [(&str, &[String]); 6] = [
        ("Double damage to", &relations.double_damage_to),
        ("Half damage to", &relations.half_damage_to),
        ("No damage to", &relations.no_damage_to),
        ("Double damage from", &relations.double_damage_from),
        ("Half damage from", &relations.half_damage_from),
        ("No damage from", &relations.no_damage_from),
    ];
    let mut lines = Vec::new();
    for (label, names) in groups {
        lines.push(Line::from(Span::styled(
            label,
            Style::default().fg(ACCENT_RED).add_modifier(Modifier::BOLD),
        )));
        let value = if names.is_empty() {
            "N/A".to_string()
        } else {
            names
                .iter()
                .map(|name| display_name(name))
                .collect::<Vec<_>>()
                .join(", ")
        };
        lines.push(Line::from(value));
        lines.push(Line::from(" "));
    }
    Text::from(lines)
}

/// Six-bucket multiplier table for whichever direction is toggled on.
/// Empty buckets render as N/A rather than disappearing, so the table
/// shape never shifts between pokemon.
fn render_matchup_panel(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    matchups: Option<TypeMatchups>,
    loading: bool,
) {
    let title = if state.matchup_attack {
        "MATCHUP: ATTACK"
    } else {
        "MATCHUP: DEFENSE"
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .style(Style::default().bg(BG_PANEL_ALT).fg(TEXT_MAIN));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(matchups) = matchups else {
        let message = if loading {
            "Loading type data..."
        } else {
            "No type data."
        };
        frame.render_widget(
            Paragraph::new(message).style(Style::default().fg(TEXT_DIM)),
            inner,
        );
        return;
    };
    let map = if state.matchup_attack {
        &matchups.attack
    } else {
        &matchups.defense
    };
    frame.render_widget(
        Paragraph::new(bucket_text(map)).wrap(Wrap { trim: true }),
        inner,
    );
}

fn bucket_text(map: &MultiplierMap) -> Text<'static> {
    let mut lines = Vec::new();
    for multiplier in MULTIPLIER_BUCKETS {
        let names = crate::matchup::types_for_multiplier(map, multiplier);
        let value = if names.is_empty() {
            "N/A".to_string()
        } else {
            names
                .iter()
                .map(|elemental| display_name(elemental.name()))
                .collect::<Vec<_>>()
                .join(", ")
        };
        lines.push(Line::from(vec![
            Span::styled(
                format!("{:>5} ", bucket_label(multiplier)),
                Style::default().fg(ACCENT_GOLD).add_modifier(Modifier::BOLD),
            ),
            Span::raw(value),
        ]));
    }
    Text::from(lines)
}

fn bucket_label(multiplier: f64) -> &'static str {
    if multiplier == 0.0 {
        "x0"
    } else if multiplier == 0.25 {
        "x1/4"
    } else if multiplier == 0.5 {
        "x1/2"
    } else if multiplier == 1.0 {
        "x1"
    } else if multiplier == 2.0 {
        "x2"
    } else {
        "x4"
    }
}

fn collect_matchups(state: &AppState, types: &[String]) -> Option<TypeMatchups> {
    let mut relations = Vec::with_capacity(types.len());
    for type_name in types {
        relations.push(state.type_cache.get(type_name)?.relations.clone());
    }
    if relations.is_empty() {
        return None;
    }
    Some(aggregate(&relations))
}

fn custom_line_text(state: &AppState, name: &str) -> Text<'static> {
    let line = linked_line(name, &state.custom);
    if line.is_empty() {
        return Text::from("No evolution line.");
    }
    let mut spans = Vec::new();
    for slot in line {
        match slot {
            LineSlot::Species(species) => {
                let style = if species == name {
                    Style::default().fg(ACCENT_RED).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(TEXT_MAIN)
                };
                spans.push(Span::styled(display_name(&species), style));
            }
            LineSlot::Link => {
                spans.push(Span::styled("  ->  ", Style::default().fg(TEXT_DIM)));
            }
        }
    }
    Text::from(Line::from(spans))
}

fn render_footer(frame: &mut Frame, area: Rect, state: &AppState, status_bar: &mut StatusBar) {
    let status = state.message.clone().unwrap_or_else(|| {
        let label = if state.list_loading {
            "Loading pokedex..."
        } else if state.custom_loading {
            "Loading custom dex..."
        } else if state.detail_loading {
            "Loading pokemon..."
        } else if state.type_detail_loading || state.matchup_loading || state.type_loading {
            "Loading type data..."
        } else if state.evolution_loading {
            "Loading evolution chain..."
        } else if state.move_loading {
            "Loading move..."
        } else if state.delete_pending {
            "Deleting..."
        } else {
            ""
        };
        if label.is_empty() {
            String::new()
        } else {
            let spinner = SPINNER[(state.tick as usize) % SPINNER.len()];
            format!("{spinner} {label}")
        }
    });
    let (left_hints, center_hints) = status_hints(state);
    let status_span = Span::styled(status.as_str(), Style::default().fg(ACCENT_GOLD));
    let status_items = [StatusBarItem::span(status_span)];

    let style = StatusBarStyle {
        base: BaseStyle {
            border: Some(BorderStyle {
                borders: Borders::ALL,
                style: Style::default().fg(TEXT_DIM),
                focused_style: Some(Style::default().fg(ACCENT_RED)),
            }),
            padding: Padding::xy(1, 0),
            bg: Some(BG_PANEL),
            fg: Some(TEXT_MAIN),
        },
        text: Style::default().fg(TEXT_DIM),
        hint_key: Style::default().fg(ACCENT_RED).add_modifier(Modifier::BOLD),
        hint_label: Style::default().fg(TEXT_DIM),
        separator: Style::default().fg(TEXT_DIM),
    };

    let props = StatusBarProps {
        left: StatusBarSection::hints(&left_hints).with_separator("  "),
        center: StatusBarSection::hints(&center_hints).with_separator("  "),
        right: StatusBarSection::items(&status_items).with_separator("  "),
        style,
        is_focused: false,
    };
    Component::<Action>::render(status_bar, frame, area, props);
}

fn status_hints(state: &AppState) -> (Vec<StatusBarHint<'static>>, Vec<StatusBarHint<'static>>) {
    if state.search.active {
        let left = vec![
            StatusBarHint::new("Enter", "Apply"),
            StatusBarHint::new("Esc", "Cancel"),
            StatusBarHint::new("Bksp", "Delete"),
        ];
        return (left, vec![]);
    }

    let mut left = Vec::new();
    match state.view {
        View::Dex => {
            left.extend([
                StatusBarHint::new("j/k", "Move"),
                StatusBarHint::new("Enter", "Open"),
                StatusBarHint::new("/", "Search"),
                StatusBarHint::new("[ ]", "Type"),
                StatusBarHint::new("r/R", "Region"),
                StatusBarHint::new("c", "Custom"),
            ]);
            if state.type_filter.is_some() {
                left.push(StatusBarHint::new("Bksp", "Clear type"));
            }
        }
        View::CustomDex => {
            left.extend([
                StatusBarHint::new("j/k", "Move"),
                StatusBarHint::new("Enter", "Open"),
            ]);
        }
        View::Pokemon => {
            left.push(StatusBarHint::new("h/l", "Tabs"));
            match state.detail_tab {
                DetailTab::Moves | DetailTab::Evolution => {
                    left.push(StatusBarHint::new("j/k", "Select"));
                    left.push(StatusBarHint::new("Enter", "Open"));
                }
                DetailTab::Matchup => {
                    left.push(StatusBarHint::new("a", "Atk/Def"));
                }
                DetailTab::General => {
                    left.push(StatusBarHint::new("Enter", "Type page"));
                }
            }
        }
        View::Custom => {
            left.push(StatusBarHint::new("a", "Atk/Def"));
            left.push(StatusBarHint::new("x", "Delete"));
        }
        View::Type | View::Move => {}
    }

    let mut center = vec![StatusBarHint::new("Esc", "Back")];
    if !state.crumbs.is_empty() {
        center.push(StatusBarHint::new("1-3", "Crumb"));
        center.push(StatusBarHint::new("g", "Home"));
    }
    center.push(StatusBarHint::new("q", "Quit"));
    (left, center)
}

fn dex_items(state: &AppState) -> Vec<Line<'static>> {
    state
        .filtered_indices
        .iter()
        .filter_map(|idx| state.dex.get(*idx))
        .map(|entry| Line::from(format!("#{:04} {}", entry.id, display_name(&entry.name))))
        .collect()
}

fn custom_items(state: &AppState) -> Vec<Line<'static>> {
    state
        .custom_index
        .iter()
        .map(|name| {
            let genus = state
                .custom
                .get(name)
                .map(|custom| custom.genus.clone())
                .unwrap_or_default();
            Line::from(format!("{}  {}", display_name(name), genus))
        })
        .collect()
}

fn move_items(state: &AppState) -> Vec<Line<'static>> {
    let Some(detail) = state.current_detail() else {
        return Vec::new();
    };
    detail
        .moves
        .iter()
        .enumerate()
        .map(|(idx, name)| Line::from(format!("{:02} {}", idx + 1, display_name(name))))
        .collect()
}

fn evolution_items(state: &AppState) -> Vec<Line<'static>> {
    let info = flatten_chain(state.current_evolution_chain());
    info.names
        .iter()
        .map(|name| {
            let marker = if state.detail_name.as_deref() == Some(name.as_str()) {
                "*"
            } else {
                " "
            };
            Line::from(format!("{} {}", marker, display_name(name)))
        })
        .collect()
}

fn detail_tab_index(state: &AppState) -> usize {
    match state.detail_tab {
        DetailTab::General => 0,
        DetailTab::Moves => 1,
        DetailTab::Matchup => 2,
        DetailTab::Evolution => 3,
    }
}

fn render_stat(stat: &PokemonStat) -> String {
    let label = shorten_stat(&stat.name);
    let bar_len = (stat.value as usize / 10).clamp(1, 20);
    let bar = "#".repeat(bar_len);
    format!("{label:>4} {value:>3} {bar}", value = stat.value)
}

fn shorten_stat(name: &str) -> String {
    match name {
        "hp" => " HP".to_string(),
        "attack" => "ATK".to_string(),
        "defense" => "DEF".to_string(),
        "special-attack" => "SAT".to_string(),
        "special-defense" => "SDF".to_string(),
        "speed" => "SPD".to_string(),
        _ => name.to_ascii_uppercase(),
    }
}

fn list_style() -> SelectListStyle {
    SelectListStyle {
        base: BaseStyle {
            border: None,
            padding: Padding::xy(1, 0),
            bg: None,
            fg: Some(TEXT_MAIN),
        },
        selection: SelectionStyle {
            style: Some(
                Style::default()
                    .bg(BG_HIGHLIGHT)
                    .fg(TEXT_MAIN)
                    .add_modifier(Modifier::BOLD),
            ),
            marker: None,
            disabled: false,
        },
        ..SelectListStyle::default()
    }
}

fn detail_list_style() -> SelectListStyle {
    SelectListStyle {
        base: BaseStyle {
            border: None,
            padding: Padding::xy(1, 0),
            bg: Some(BG_PANEL_ALT),
            fg: Some(TEXT_MAIN),
        },
        selection: SelectionStyle {
            style: Some(
                Style::default()
                    .bg(BG_HIGHLIGHT)
                    .fg(TEXT_MAIN)
                    .add_modifier(Modifier::BOLD),
            ),
            marker: None,
            disabled: false,
        },
        ..SelectListStyle::default()
    }
}
