pub mod config;
pub mod debounce;
pub mod detail;
pub mod error;
pub mod format;
pub mod listing;
pub mod pagination;
pub mod pokeapi;
pub mod search;
pub mod source;
pub mod type_filter;

pub use config::{ClientConfig, ITEMS_PER_PAGE};
pub use debounce::{DebouncedQuery, SEARCH_DEBOUNCE};
pub use detail::{AbilityLine, PokemonDetail, StatLine, StatTier, load_detail};
pub use error::PokedexError;
pub use listing::{ListingController, LoadStatus, PaginationState};
pub use pagination::{PageCursor, PageEntry, PageWindow, compute_window};
pub use pokeapi::{ApiCall, NamedResource, PokeApiClient, PokemonCard};
pub use search::{PokemonSearch, Roster, SEARCH_RESULT_LIMIT};
pub use source::PokemonSource;
pub use type_filter::list_by_type;

use std::sync::Arc;

/// Everything one catalog view needs, backed by a single PokeAPI client.
///
/// Cheap to clone; clones share the client, the listing state, and the search roster.
#[derive(Clone)]
pub struct Pokedex {
    client: Arc<PokeApiClient>,
    listing: Arc<ListingController<PokeApiClient>>,
    search: Arc<PokemonSearch<PokeApiClient>>,
}

impl Pokedex {
    /// Build the catalog without touching the network. The listing starts idle on `initial_page`.
    pub fn new(config: ClientConfig, initial_page: usize) -> Result<Self, PokedexError> {
        let client = Arc::new(PokeApiClient::with_config(config)?);
        Ok(Pokedex {
            listing: Arc::new(ListingController::new(client.clone(), initial_page)),
            search: Arc::new(PokemonSearch::new(client.clone())),
            client,
        })
    }

    pub fn client(&self) -> &PokeApiClient {
        &self.client
    }

    pub fn listing(&self) -> &ListingController<PokeApiClient> {
        &self.listing
    }

    pub fn search(&self) -> &PokemonSearch<PokeApiClient> {
        &self.search
    }

    pub async fn load_page(&self, page: usize) -> PaginationState {
        self.listing.load_page(page).await
    }

    pub async fn search_names(&self, query: &str) -> Result<Vec<PokemonCard>, PokedexError> {
        self.search.search(query).await
    }

    pub async fn detail(&self, id_or_name: &str) -> Result<PokemonDetail, PokedexError> {
        load_detail(self.client.as_ref(), id_or_name).await
    }

    pub async fn by_type(&self, type_name: &str) -> Result<Vec<PokemonCard>, PokedexError> {
        list_by_type(self.client.as_ref(), type_name).await
    }

    pub async fn sprite_bytes(&self, url: &str) -> Result<Vec<u8>, PokedexError> {
        self.client.get_image_bytes(url).await
    }
}
