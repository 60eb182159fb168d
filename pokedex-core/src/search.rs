//! Name search over the full roster.
//!
//! The roster (every name and resource url) is fetched once and kept in memory.
//! Matching is a case-insensitive substring test; only the capped match set is enriched.

use crate::error::PokedexError;
use crate::pokeapi::{NamedResource, PokemonCard};
use crate::source::PokemonSource;
use futures::future::try_join_all;
use std::sync::Arc;
use time::OffsetDateTime;
use tokio::sync::OnceCell;
use tracing::{debug, info};

pub const SEARCH_RESULT_LIMIT: usize = 20;
/// Large enough for the whole national dex in one request
pub const ROSTER_LIMIT: usize = 1000;

#[derive(Debug, Clone)]
pub struct Roster {
    entries: Vec<NamedResource>,
    fetched_at: OffsetDateTime,
}

impl Roster {
    pub fn new(entries: Vec<NamedResource>) -> Self {
        Self {
            entries,
            fetched_at: OffsetDateTime::now_utc(),
        }
    }

    pub async fn fetch<S: PokemonSource>(source: &S) -> Result<Self, PokedexError> {
        info!(limit = ROSTER_LIMIT, "Fetching search roster");
        let list = source.list(ROSTER_LIMIT, 0).await?;
        info!(entries = list.results.len(), "Search roster loaded");
        Ok(Self::new(list.results))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn fetched_at(&self) -> OffsetDateTime {
        self.fetched_at
    }

    /// Roster entries whose name contains `query`, ignoring case, in roster order.
    /// Blank queries match nothing.
    pub fn matches(&self, query: &str) -> Vec<&NamedResource> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.entries
            .iter()
            .filter(|entry| entry.name.to_lowercase().contains(&needle))
            .take(SEARCH_RESULT_LIMIT)
            .collect()
    }
}

pub struct PokemonSearch<S> {
    source: Arc<S>,
    roster: OnceCell<Roster>,
}

impl<S: PokemonSource> PokemonSearch<S> {
    pub fn new(source: Arc<S>) -> Self {
        Self {
            source,
            roster: OnceCell::new(),
        }
    }

    /// Search with an already known roster, e.g. in tests or after a prefetch
    pub fn with_roster(source: Arc<S>, roster: Roster) -> Self {
        Self {
            source,
            roster: OnceCell::new_with(Some(roster)),
        }
    }

    /// The roster, fetching it on first use. A failed fetch is retried on the next call.
    pub async fn roster(&self) -> Result<&Roster, PokedexError> {
        self.roster
            .get_or_try_init(|| Roster::fetch(self.source.as_ref()))
            .await
    }

    pub fn roster_if_loaded(&self) -> Option<&Roster> {
        self.roster.get()
    }

    /// Enriched cards for every roster name containing `query`, capped at [`SEARCH_RESULT_LIMIT`]
    pub async fn search(&self, query: &str) -> Result<Vec<PokemonCard>, PokedexError> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }

        let roster = self.roster().await?;
        let matches = roster.matches(query);
        debug!(query = %query.trim(), matches = matches.len(), "Roster search");
        if matches.is_empty() {
            return Ok(Vec::new());
        }

        try_join_all(matches.iter().map(|entry| self.source.enrich(&entry.name))).await
    }
}
