//! Paginated listing controller.
//!
//! Owns the pagination state of one listing view. The state is only changed
//! through [`ListingController::load_page`]; views read it through snapshots.
//! Overlapping loads are tagged with a sequence number and only the most
//! recently *requested* page may write its outcome.

use crate::config::ITEMS_PER_PAGE;
use crate::error::PokedexError;
use crate::pagination::{self, PageCursor, PageWindow};
use crate::pokeapi::PokemonCard;
use crate::source::PokemonSource;
use futures::future::try_join_all;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    Idle,
    Loading,
    Loaded,
    Errored,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaginationState {
    pub current_page: usize,
    pub total_count: usize,
    pub items_per_page: usize,
    pub items: Vec<PokemonCard>,
    pub status: LoadStatus,
    pub error: Option<String>,
}

impl PaginationState {
    fn new(initial_page: usize) -> Self {
        Self {
            current_page: initial_page.max(1),
            total_count: 0,
            items_per_page: ITEMS_PER_PAGE,
            items: Vec::new(),
            status: LoadStatus::Idle,
            error: None,
        }
    }

    /// Switch to `page` (0 is treated as 1) and mark a load as in flight.
    /// Items and total count stay until the response arrives.
    pub fn begin_load(&mut self, page: usize) {
        self.current_page = page.max(1);
        self.status = LoadStatus::Loading;
        self.error = None;
    }

    pub fn loading(&self) -> bool {
        self.status == LoadStatus::Loading
    }

    /// Not authoritative while a load is in flight
    pub fn total_pages(&self) -> usize {
        pagination::total_pages(self.total_count, self.items_per_page)
    }

    pub fn cursor(&self) -> PageCursor {
        PageCursor::new(self.current_page, self.total_pages())
    }

    pub fn window(&self) -> PageWindow {
        pagination::compute_window(self.current_page, self.total_pages())
    }

    /// The page strip is shown only for a settled, non-empty, error-free page
    pub fn shows_pagination(&self) -> bool {
        self.status == LoadStatus::Loaded && self.error.is_none() && !self.items.is_empty()
    }
}

struct Inner {
    state: PaginationState,
    latest_request: u64,
}

pub struct ListingController<S> {
    source: Arc<S>,
    inner: Mutex<Inner>,
    initial_page: usize,
    started: AtomicBool,
}

impl<S: PokemonSource> ListingController<S> {
    /// Create the controller without loading anything yet.
    /// Call [`ListingController::initial_load`] once the owner is ready to await it.
    pub fn new(source: Arc<S>, initial_page: usize) -> Self {
        Self {
            source,
            inner: Mutex::new(Inner {
                state: PaginationState::new(initial_page),
                latest_request: 0,
            }),
            initial_page: initial_page.max(1),
            started: AtomicBool::new(false),
        }
    }

    /// Create the controller and run its initial load
    pub async fn open(source: Arc<S>, initial_page: usize) -> Self {
        let controller = Self::new(source, initial_page);
        controller.initial_load().await;
        controller
    }

    /// Load the initial page. Only the first call does anything; later calls return the current snapshot.
    pub async fn initial_load(&self) -> PaginationState {
        if self.started.swap(true, Ordering::SeqCst) {
            return self.snapshot();
        }
        self.load_page(self.initial_page).await
    }

    pub fn snapshot(&self) -> PaginationState {
        self.lock().state.clone()
    }

    /// Reload whatever page is current, e.g. after an error
    pub async fn retry(&self) -> PaginationState {
        let page = self.lock().state.current_page;
        self.load_page(page).await
    }

    /// Load `page` (1-based; 0 is treated as 1) and return the state afterwards.
    ///
    /// `current_page` switches to `page` as soon as the request starts. Errors never
    /// escape: they end up as the state's `error` message with an empty item list.
    pub async fn load_page(&self, page: usize) -> PaginationState {
        let page = page.max(1);
        self.started.store(true, Ordering::SeqCst);

        let request_id = {
            let mut inner = self.lock();
            inner.latest_request += 1;
            inner.state.begin_load(page);
            inner.latest_request
        };
        debug!(page, request_id, "Loading listing page");

        let result = self.fetch_page(page).await;

        let mut inner = self.lock();
        if inner.latest_request != request_id {
            debug!(
                page,
                request_id,
                latest = inner.latest_request,
                "Discarding response for superseded page request"
            );
            return inner.state.clone();
        }

        match result {
            Ok((items, total_count)) => {
                info!(page, items = items.len(), total_count, "Listing page loaded");
                inner.state.items = items;
                inner.state.total_count = total_count;
                inner.state.status = LoadStatus::Loaded;
            }
            Err(e) => {
                warn!(page, error = %e, "Listing page failed to load");
                inner.state.error = Some(e.to_string());
                inner.state.items.clear();
                inner.state.status = LoadStatus::Errored;
            }
        }
        inner.state.clone()
    }

    async fn fetch_page(&self, page: usize) -> Result<(Vec<PokemonCard>, usize), PokedexError> {
        let Some(offset) = (page - 1).checked_mul(ITEMS_PER_PAGE) else {
            let total_pages = self.lock().state.total_pages();
            return Err(PokedexError::PageOutOfRange { page, total_pages });
        };
        let list = self.source.list(ITEMS_PER_PAGE, offset).await?;

        let total_pages = pagination::total_pages(list.count, ITEMS_PER_PAGE);
        if page > total_pages.max(1) {
            return Err(PokedexError::PageOutOfRange { page, total_pages });
        }

        let items = try_join_all(
            list.results
                .iter()
                .map(|record| self.source.enrich(&record.name)),
        )
        .await?;
        Ok((items, list.count))
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
