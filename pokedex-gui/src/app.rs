use iced::widget::{
    Column, Row, button, column, container, image, progress_bar, row, scrollable, text,
    text_input,
};
use iced::{Border, Color, Element, Length, Subscription, Task, keyboard};
use pokedex_core::format::{capitalize_name, format_pokemon_id, hex_to_rgb, type_color};
use pokedex_core::pagination::{PageCursor, is_back_jump, parse_go_to};
use pokedex_core::{
    DebouncedQuery, PageEntry, PaginationState, PokeApiClient, Pokedex,
    PokemonCard, PokemonDetail, SEARCH_DEBOUNCE,
};
use std::collections::{HashMap, HashSet};

// Grid card dimensions (official artwork is square)
const GRID_CARD_WIDTH: f32 = 180.0;
const GRID_SPRITE_SIZE: f32 = 120.0;
const GRID_COLUMNS: usize = 5;

const DETAIL_SPRITE_SIZE: f32 = 220.0;
const GRID_SCROLL_ID: &str = "catalog-grid";

#[derive(Debug, Clone)]
pub enum Message {
    // Paginated listing
    PageLoaded(PaginationState),
    GoToPage(usize),
    RetryPage,
    ToggleGoTo,
    GoToInput(String),
    GoToSubmit,

    // Search box
    SearchInput(String),
    SearchSettle(u64),
    ClearSearch,
    SearchFinished {
        query: String,
        result: Result<Vec<PokemonCard>, String>,
    },

    // Detail panel
    OpenDetail(u32),
    DetailLoaded {
        id: u32,
        result: Result<PokemonDetail, String>,
    },
    ToggleShiny,
    CloseDetail,

    SpriteLoaded {
        url: String,
        result: Result<Vec<u8>, String>,
    },
}

/// Detail panel shown in place of the grid while open
#[derive(Debug, Clone)]
pub struct DetailPanel {
    pub id: u32,
    pub result: Option<Result<PokemonDetail, String>>,
    pub shiny: bool,
}

#[derive(Debug, Default)]
pub struct SearchView {
    pub results: Vec<PokemonCard>,
    pub loading: bool,
    pub error: Option<String>,
}

pub struct AppState {
    pokedex: Pokedex,
    listing: PaginationState,
    query: DebouncedQuery,
    search: SearchView,
    detail: Option<DetailPanel>,
    show_go_to: bool,
    go_to_input: String,
    sprites: HashMap<String, image::Handle>,
    requested_sprites: HashSet<String>,
}

impl AppState {
    pub fn new(pokedex: Pokedex) -> Self {
        let listing = pokedex.listing().snapshot();
        Self {
            pokedex,
            listing,
            query: DebouncedQuery::default(),
            search: SearchView::default(),
            detail: None,
            show_go_to: false,
            go_to_input: String::new(),
            sprites: HashMap::new(),
            requested_sprites: HashSet::new(),
        }
    }

    fn is_searching(&self) -> bool {
        self.query.is_searching()
    }

    /// Start downloads for sprites that are neither cached nor already requested
    fn fetch_sprites<'a>(&mut self, urls: impl IntoIterator<Item = &'a str>) -> Task<Message> {
        let mut tasks = Vec::new();
        for url in urls {
            if url.is_empty() || !self.requested_sprites.insert(url.to_string()) {
                continue;
            }
            let pokedex = self.pokedex.clone();
            let url = url.to_string();
            tasks.push(Task::perform(
                async move {
                    let result = pokedex
                        .sprite_bytes(&url)
                        .await
                        .map_err(|e| e.to_string());
                    (url, result)
                },
                |(url, result)| Message::SpriteLoaded { url, result },
            ));
        }
        Task::batch(tasks)
    }
}

pub fn initialize(pokedex: Pokedex) -> (AppState, Task<Message>) {
    let state = AppState::new(pokedex);
    let pokedex = state.pokedex.clone();
    let task = Task::perform(
        async move { pokedex.listing().initial_load().await },
        Message::PageLoaded,
    );
    (state, task)
}

fn load_page(state: &mut AppState, page: usize) -> Task<Message> {
    // Same optimistic switch the controller makes, so the strip disables right away
    state.listing.begin_load(page);

    let pokedex = state.pokedex.clone();
    Task::batch([
        Task::perform(
            async move { pokedex.load_page(page).await },
            Message::PageLoaded,
        ),
        scrollable::scroll_to(
            scrollable::Id::new(GRID_SCROLL_ID),
            scrollable::AbsoluteOffset { x: 0.0, y: 0.0 },
        ),
    ])
}

fn run_search(state: &mut AppState, query: String) -> Task<Message> {
    if query.trim().is_empty() {
        state.search = SearchView::default();
        return Task::none();
    }
    state.search.loading = true;
    state.search.error = None;

    let pokedex = state.pokedex.clone();
    Task::perform(
        async move {
            let result = pokedex
                .search_names(&query)
                .await
                .map_err(|e| e.to_string());
            (query, result)
        },
        |(query, result)| Message::SearchFinished { query, result },
    )
}

pub fn update(state: &mut AppState, message: Message) -> Task<Message> {
    match message {
        Message::PageLoaded(snapshot) => {
            log::debug!(
                "GUI received page {} ({:?}, {} items)",
                snapshot.current_page,
                snapshot.status,
                snapshot.items.len()
            );
            state.listing = snapshot;
            let urls: Vec<String> = state.listing.items.iter().map(|c| c.sprite.clone()).collect();
            return state.fetch_sprites(urls.iter().map(String::as_str));
        }
        Message::GoToPage(page) => {
            if state.listing.loading() {
                return Task::none();
            }
            return load_page(state, page);
        }
        Message::RetryPage => {
            if state.is_searching() {
                let query = state.query.settled().to_string();
                return run_search(state, query);
            }
            let page = state.listing.current_page;
            return load_page(state, page);
        }
        Message::ToggleGoTo => {
            state.show_go_to = !state.show_go_to;
        }
        Message::GoToInput(value) => {
            state.go_to_input = value;
        }
        Message::GoToSubmit => {
            if let Some(page) = parse_go_to(&state.go_to_input, state.listing.total_pages()) {
                if !state.listing.loading() {
                    state.go_to_input.clear();
                    state.show_go_to = false;
                    return load_page(state, page);
                }
            }
        }
        Message::SearchInput(value) => {
            let generation = state.query.input(value);
            return Task::perform(
                async move {
                    tokio::time::sleep(SEARCH_DEBOUNCE).await;
                    generation
                },
                Message::SearchSettle,
            );
        }
        Message::SearchSettle(generation) => {
            if let Some(query) = state.query.settle(generation).map(str::to_string) {
                return run_search(state, query);
            }
        }
        Message::ClearSearch => {
            state.query.clear();
            state.search = SearchView::default();
        }
        Message::SearchFinished { query, result } => {
            if query != state.query.settled() {
                log::debug!("Dropping results for outdated query '{}'", query);
                return Task::none();
            }
            state.search.loading = false;
            match result {
                Ok(results) => {
                    state.search.results = results;
                    state.search.error = None;
                }
                Err(e) => {
                    state.search.results.clear();
                    state.search.error = Some(e);
                }
            }
            let urls: Vec<String> = state.search.results.iter().map(|c| c.sprite.clone()).collect();
            return state.fetch_sprites(urls.iter().map(String::as_str));
        }
        Message::OpenDetail(id) => {
            state.detail = Some(DetailPanel {
                id,
                result: None,
                shiny: false,
            });
            let pokedex = state.pokedex.clone();
            return Task::perform(
                async move {
                    pokedex
                        .detail(&id.to_string())
                        .await
                        .map_err(|e| e.to_string())
                },
                move |result| Message::DetailLoaded { id, result },
            );
        }
        Message::DetailLoaded { id, result } => {
            let Some(panel) = state.detail.as_mut().filter(|panel| panel.id == id) else {
                return Task::none();
            };
            let urls: Vec<String> = match &result {
                Ok(detail) => [detail.sprite(false), detail.sprite(true)]
                    .into_iter()
                    .flatten()
                    .map(str::to_string)
                    .collect(),
                Err(_) => Vec::new(),
            };
            panel.result = Some(result);
            return state.fetch_sprites(urls.iter().map(String::as_str));
        }
        Message::ToggleShiny => {
            if let Some(panel) = state.detail.as_mut() {
                panel.shiny = !panel.shiny;
            }
        }
        Message::CloseDetail => {
            state.detail = None;
        }
        Message::SpriteLoaded { url, result } => match result {
            Ok(bytes) => {
                state.sprites.insert(url, image::Handle::from_bytes(bytes));
            }
            Err(e) => {
                log::warn!("Failed to load sprite {}: {}", url, e);
            }
        },
    }

    Task::none()
}

pub fn subscription(_state: &AppState) -> Subscription<Message> {
    keyboard::on_key_press(|key, _modifiers| match key {
        keyboard::Key::Named(keyboard::key::Named::Escape) => Some(Message::CloseDetail),
        _ => None,
    })
}

fn hex_color(hex: &str) -> Color {
    hex_to_rgb(hex)
        .map(|(r, g, b)| Color::from_rgb8(r, g, b))
        .unwrap_or(Color::BLACK)
}

fn type_badge<'a>(type_name: &str) -> Element<'a, Message> {
    let background = hex_color(type_color(type_name));
    container(
        text(capitalize_name(type_name))
            .size(12)
            .color(Color::WHITE),
    )
    .padding([2, 8])
    .style(move |_theme| container::Style {
        background: Some(background.into()),
        border: Border {
            radius: 8.0.into(),
            ..Default::default()
        },
        ..Default::default()
    })
    .into()
}

fn sprite_view<'a>(state: &AppState, url: Option<&str>, size: f32) -> Element<'a, Message> {
    match url.and_then(|url| state.sprites.get(url)) {
        Some(handle) => image::Image::<image::Handle>::new(handle.clone())
            .width(Length::Fixed(size))
            .height(Length::Fixed(size))
            .into(),
        None => container(text("…").size(24))
            .width(Length::Fixed(size))
            .height(Length::Fixed(size))
            .center_x(Length::Fixed(size))
            .center_y(Length::Fixed(size))
            .into(),
    }
}

fn card_view<'a>(state: &AppState, card: &PokemonCard) -> Element<'a, Message> {
    let badges = Row::with_children(card.types.iter().map(|t| type_badge(t))).spacing(4);
    button(
        column![
            sprite_view(state, Some(card.sprite.as_str()), GRID_SPRITE_SIZE),
            text(format_pokemon_id(card.id)).size(12),
            text(capitalize_name(&card.name)).size(16),
            badges,
        ]
        .spacing(4)
        .align_x(iced::Alignment::Center),
    )
    .on_press(Message::OpenDetail(card.id))
    .width(Length::Fixed(GRID_CARD_WIDTH))
    .padding(8)
    .into()
}

fn grid_view<'a>(state: &AppState, cards: &[PokemonCard]) -> Element<'a, Message> {
    let rows = cards.chunks(GRID_COLUMNS).map(|chunk| {
        Row::with_children(chunk.iter().map(|card| card_view(state, card)))
            .spacing(12)
            .into()
    });
    scrollable(Column::with_children(rows).spacing(12).padding(8))
        .id(scrollable::Id::new(GRID_SCROLL_ID))
        .height(Length::Fill)
        .into()
}

fn error_view<'a>(error: &str) -> Element<'a, Message> {
    column![
        text("Something went wrong").size(18),
        text(error.to_string()).size(14),
        button("Retry").on_press(Message::RetryPage).padding(8),
    ]
    .spacing(10)
    .into()
}

fn pagination_view<'a>(state: &AppState) -> Element<'a, Message> {
    let listing = &state.listing;
    let window = listing.window();
    if window.is_hidden() {
        return row![].into();
    }

    let disabled = listing.loading();
    let current = listing.current_page;
    let cursor = PageCursor::new(current, listing.total_pages());
    let enabled = |message: Message| if disabled { None } else { Some(message) };

    let mut pages = Row::new().spacing(6);
    pages = pages.push(
        button("←")
            .on_press_maybe(cursor.prev_page().and_then(|p| enabled(Message::GoToPage(p))))
            .padding(6),
    );
    for entry in &window.pages {
        pages = match entry {
            PageEntry::Page(page) if *page == current => {
                pages.push(button(text(format!("[{}]", page))).padding(6))
            }
            PageEntry::Page(page) => pages.push(
                button(text(page.to_string()))
                    .on_press_maybe(enabled(Message::GoToPage(*page)))
                    .padding(6),
            ),
            PageEntry::Ellipsis => pages.push(text("…").size(16)),
        };
    }
    pages = pages
        .push(
            button("→")
                .on_press_maybe(cursor.next_page().and_then(|p| enabled(Message::GoToPage(p))))
                .padding(6),
        )
        .push(
            button("#")
                .on_press_maybe(enabled(Message::ToggleGoTo))
                .padding(6),
        );

    let mut strip = Column::new().spacing(8).push(pages);

    if !window.quick_jumps.is_empty() {
        let mut jumps = Row::new().spacing(6).push(text("Jump to:").size(14));
        for &jump in &window.quick_jumps {
            let label = if is_back_jump(jump, current) {
                format!("‹ {}", jump)
            } else {
                jump.to_string()
            };
            jumps = jumps.push(
                button(text(label).size(14))
                    .on_press_maybe(enabled(Message::GoToPage(jump)))
                    .padding(4),
            );
        }
        strip = strip.push(jumps);
    }

    if state.show_go_to {
        let total = listing.total_pages();
        strip = strip.push(
            row![
                text("Go to page:").size(14),
                text_input(&format!("1-{}", total), &state.go_to_input)
                    .on_input(Message::GoToInput)
                    .on_submit(Message::GoToSubmit)
                    .width(Length::Fixed(80.0)),
                button("Go")
                    .on_press_maybe(
                        parse_go_to(&state.go_to_input, total)
                            .and_then(|_| enabled(Message::GoToSubmit))
                    )
                    .padding(6),
            ]
            .spacing(6),
        );
    }

    strip
        .push(text(format!("Page {} of {}", current, listing.total_pages())).size(12))
        .into()
}

fn detail_view<'a>(state: &AppState, panel: &DetailPanel) -> Element<'a, Message> {
    let close = button("Close").on_press(Message::CloseDetail).padding(8);

    let detail = match &panel.result {
        None => return column![close, text("Loading…").size(16)].spacing(10).into(),
        Some(Err(e)) => {
            return column![close, text(format!("Could not load details: {}", e)).size(14)]
                .spacing(10)
                .into();
        }
        Some(Ok(detail)) => detail,
    };

    let mut header_info = column![
        text(detail.display_id()).size(14),
        text(detail.display_name()).size(28),
    ]
    .spacing(4);
    if let Some(genus) = detail.genus() {
        header_info = header_info.push(text(genus.to_string()).size(14));
    }
    header_info = header_info.push(
        Row::with_children(detail.types().iter().map(|t| type_badge(t))).spacing(4),
    );

    let mut sprite_column = column![sprite_view(
        state,
        detail.sprite(panel.shiny),
        DETAIL_SPRITE_SIZE
    )]
    .spacing(6);
    if detail.has_shiny() {
        sprite_column = sprite_column.push(
            button(if panel.shiny { "Normal" } else { "Shiny ✨" })
                .on_press(Message::ToggleShiny)
                .padding(6),
        );
    }

    let mut body = column![row![sprite_column, header_info].spacing(20)].spacing(14);

    if let Some(flavor) = detail.flavor_text() {
        body = body.push(text(flavor).size(14));
    }

    body = body.push(
        row![
            text(format!("Height: {} m", detail.height_m())).size(14),
            text(format!("Weight: {} kg", detail.weight_kg())).size(14),
        ]
        .spacing(20),
    );

    let mut stats = Column::new().spacing(4).push(text("Base Stats").size(18));
    for stat in detail.stats() {
        let bar_color = hex_color(stat.tier.color());
        stats = stats.push(
            row![
                text(stat.label.clone()).size(14).width(Length::Fixed(70.0)),
                text(stat.value.to_string()).size(14).width(Length::Fixed(40.0)),
                progress_bar(0.0..=1.0, stat.fraction)
                    .width(Length::Fixed(220.0))
                    .height(Length::Fixed(10.0))
                    .style(move |_theme| progress_bar::Style {
                        background: Color::from_rgb(0.9, 0.9, 0.9).into(),
                        bar: bar_color.into(),
                        border: Border::default(),
                    }),
            ]
            .spacing(8)
            .align_y(iced::Alignment::Center),
        );
    }
    stats = stats.push(text(format!("Total: {}", detail.stat_total())).size(14));
    body = body.push(stats);

    let mut abilities = Column::new().spacing(4).push(text("Abilities").size(18));
    for ability in detail.abilities() {
        let label = if ability.hidden {
            format!("{} (Hidden)", ability.label)
        } else {
            ability.label
        };
        abilities = abilities.push(text(label).size(14));
    }
    body = body.push(abilities);

    let evolutions = detail.evolution_names();
    if evolutions.len() > 1 {
        let names: Vec<String> = evolutions.iter().map(|n| capitalize_name(n)).collect();
        body = body.push(text(format!("Evolution: {}", names.join(" → "))).size(14));
    }

    let accent = detail
        .types()
        .first()
        .map(|t| hex_color(type_color(t)))
        .unwrap_or(Color::from_rgb(0.5, 0.5, 0.5));

    container(scrollable(column![close, body].spacing(12).padding(16)))
        .style(move |_theme| container::Style {
            background: Some(Color::WHITE.into()),
            border: Border {
                color: accent,
                width: 3.0,
                radius: 8.0.into(),
            },
            ..Default::default()
        })
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

fn footer_view<'a>(state: &AppState) -> Element<'a, Message> {
    let roster = state
        .pokedex
        .search()
        .roster_if_loaded()
        .map(|roster| {
            format!(
                "Search roster: {} names, fetched {}",
                roster.len(),
                roster
                    .fetched_at()
                    .format(&time::format_description::well_known::Rfc3339)
                    .unwrap_or_else(|_| "Unknown".to_string())
            )
        })
        .unwrap_or_else(|| "Search roster not loaded yet".to_string());

    column![
        text(format!(
            "{} • API calls this session: {}",
            roster,
            PokeApiClient::get_api_call_history().len()
        ))
        .size(12),
        text("Data from PokéAPI (https://pokeapi.co/)").size(12),
    ]
    .spacing(2)
    .into()
}

pub fn view(state: &AppState) -> Element<Message> {
    let header = column![
        text("Pokédex").size(32),
        text("Discover all Pokémon").size(14),
    ]
    .spacing(4);

    let mut search_row = row![
        text_input("Search Pokémon...", state.query.input_text())
            .on_input(Message::SearchInput)
            .padding(8)
            .width(Length::Fixed(360.0)),
    ]
    .spacing(8);
    if !state.query.input_text().is_empty() {
        search_row = search_row.push(button("✕").on_press(Message::ClearSearch).padding(8));
    }

    let content: Element<Message> = if let Some(panel) = &state.detail {
        detail_view(state, panel)
    } else if state.is_searching() {
        if state.search.loading {
            text("Searching…").size(16).into()
        } else if let Some(error) = &state.search.error {
            error_view(error)
        } else if state.search.results.is_empty() {
            text(format!("No Pokémon match '{}'", state.query.settled().trim()))
                .size(16)
                .into()
        } else {
            grid_view(state, &state.search.results)
        }
    } else if state.listing.loading() && state.listing.items.is_empty() {
        text(format!("Loading page {}…", state.listing.current_page))
            .size(16)
            .into()
    } else if let Some(error) = &state.listing.error {
        error_view(error)
    } else {
        grid_view(state, &state.listing.items)
    };

    let mut page = column![header, search_row, content].spacing(16).padding(20);
    if state.detail.is_none() && !state.is_searching() && state.listing.shows_pagination() {
        page = page.push(pagination_view(state));
    }
    page = page.push(footer_view(state));

    page.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pokedex_core::{ClientConfig, LoadStatus};

    fn test_state() -> AppState {
        AppState::new(Pokedex::new(ClientConfig::default(), 1).unwrap())
    }

    #[test]
    fn test_stale_search_results_are_dropped() {
        let mut state = test_state();
        let generation = state.query.input("pika");
        let _ = update(&mut state, Message::SearchSettle(generation));
        assert!(state.search.loading);

        let _ = update(
            &mut state,
            Message::SearchFinished {
                query: "pik".to_string(),
                result: Ok(Vec::new()),
            },
        );
        assert!(state.search.loading);
    }

    #[test]
    fn test_go_to_rejects_out_of_range_input() {
        let mut state = test_state();
        state.listing.total_count = 100;
        state.listing.status = LoadStatus::Loaded;
        let _ = update(&mut state, Message::GoToInput("9".to_string()));
        let _ = update(&mut state, Message::GoToSubmit);
        assert_eq!(state.listing.current_page, 1);
        assert_eq!(state.go_to_input, "9");
    }

    #[test]
    fn test_go_to_page_disables_strip_immediately() {
        let mut state = test_state();
        state.listing.total_count = 100;
        state.listing.status = LoadStatus::Errored;
        state.listing.error = Some("boom".to_string());

        let _ = update(&mut state, Message::GoToPage(4));
        assert!(state.listing.loading());
        assert_eq!(state.listing.current_page, 4);
        assert_eq!(state.listing.error, None);
    }

    #[test]
    fn test_page_change_ignored_while_loading() {
        let mut state = test_state();
        state.listing.status = LoadStatus::Loading;
        let _ = update(&mut state, Message::GoToPage(3));
        assert_eq!(state.listing.current_page, 1);
    }

    #[test]
    fn test_detail_result_for_closed_panel_is_ignored() {
        let mut state = test_state();
        let _ = update(
            &mut state,
            Message::DetailLoaded {
                id: 25,
                result: Err("gone".to_string()),
            },
        );
        assert!(state.detail.is_none());
    }

    #[test]
    fn test_clear_search_returns_to_listing() {
        let mut state = test_state();
        let generation = state.query.input("eevee");
        let _ = state.query.settle(generation);
        assert!(state.is_searching());

        let _ = update(&mut state, Message::ClearSearch);
        assert!(!state.is_searching());
        assert!(state.search.results.is_empty());
    }
}
