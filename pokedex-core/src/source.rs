//! The seam between the catalog logic and wherever records come from.
//!
//! [`PokeApiClient`] is the production implementation; tests plug in in-memory sources.

use crate::error::PokedexError;
use crate::pokeapi::{
    EvolutionChain, PokeApiClient, Pokemon, PokemonCard, PokemonListResponse, PokemonSpecies,
    PokemonTypeInfo,
};
use std::future::Future;

pub trait PokemonSource: Send + Sync {
    /// One page of bare name/url records plus the total record count
    fn list(
        &self,
        limit: usize,
        offset: usize,
    ) -> impl Future<Output = Result<PokemonListResponse, PokedexError>> + Send;

    fn pokemon(
        &self,
        id_or_name: &str,
    ) -> impl Future<Output = Result<Pokemon, PokedexError>> + Send;

    fn species(
        &self,
        id_or_name: &str,
    ) -> impl Future<Output = Result<PokemonSpecies, PokedexError>> + Send;

    fn evolution_chain_by_url(
        &self,
        url: &str,
    ) -> impl Future<Output = Result<EvolutionChain, PokedexError>> + Send;

    fn type_info(
        &self,
        type_name: &str,
    ) -> impl Future<Output = Result<PokemonTypeInfo, PokedexError>> + Send;

    /// Fetch the full record and reduce it to the fields a grid card shows
    fn enrich(
        &self,
        id_or_name: &str,
    ) -> impl Future<Output = Result<PokemonCard, PokedexError>> + Send {
        async move {
            let pokemon = self.pokemon(id_or_name).await?;
            Ok(PokemonCard::from(&pokemon))
        }
    }
}

impl PokemonSource for PokeApiClient {
    async fn list(&self, limit: usize, offset: usize) -> Result<PokemonListResponse, PokedexError> {
        self.list_pokemon(limit, offset).await
    }

    async fn pokemon(&self, id_or_name: &str) -> Result<Pokemon, PokedexError> {
        self.get_pokemon(id_or_name).await
    }

    async fn species(&self, id_or_name: &str) -> Result<PokemonSpecies, PokedexError> {
        self.get_species(id_or_name).await
    }

    async fn evolution_chain_by_url(&self, url: &str) -> Result<EvolutionChain, PokedexError> {
        self.get_evolution_chain_by_url(url).await
    }

    async fn type_info(&self, type_name: &str) -> Result<PokemonTypeInfo, PokedexError> {
        self.get_type(type_name).await
    }
}

/// In-memory source shared by the unit tests of the listing, search, and detail modules
#[cfg(test)]
pub(crate) mod fake {
    use super::*;
    use crate::pokeapi::NamedResource;
    use crate::pokeapi::models::{PokemonSprites, PokemonTypeSlot};
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    pub(crate) fn named(name: &str, id: u32) -> NamedResource {
        NamedResource {
            name: name.to_string(),
            url: format!("https://pokeapi.co/api/v2/pokemon/{}/", id),
        }
    }

    pub(crate) fn pokemon(name: &str, id: u32, types: &[&str]) -> Pokemon {
        Pokemon {
            id,
            name: name.to_string(),
            base_experience: Some(64),
            height: 7,
            weight: 69,
            is_default: true,
            order: id as i32,
            abilities: Vec::new(),
            types: types
                .iter()
                .enumerate()
                .map(|(i, t)| PokemonTypeSlot {
                    slot: i as u32 + 1,
                    kind: NamedResource {
                        name: t.to_string(),
                        url: String::new(),
                    },
                })
                .collect(),
            stats: Vec::new(),
            sprites: PokemonSprites {
                front_default: Some(format!("{}.png", id)),
                ..Default::default()
            },
            species: named(name, id),
        }
    }

    #[derive(Default)]
    pub(crate) struct FakeSource {
        pub roster: Vec<NamedResource>,
        pub records: HashMap<String, Pokemon>,
        pub species: HashMap<String, PokemonSpecies>,
        pub chains: HashMap<String, EvolutionChain>,
        pub types: HashMap<String, PokemonTypeInfo>,
        pub fail_list: bool,
        pub fail_enrich: Option<String>,
        pub list_calls: Mutex<Vec<(usize, usize)>>,
        pub enrich_calls: AtomicUsize,
    }

    impl FakeSource {
        pub(crate) fn with_pokemon(entries: &[(&str, u32, &[&str])]) -> Self {
            let mut source = FakeSource::default();
            for (name, id, types) in entries {
                source.roster.push(named(name, *id));
                source
                    .records
                    .insert(name.to_string(), pokemon(name, *id, types));
                source
                    .records
                    .insert(id.to_string(), pokemon(name, *id, types));
            }
            source
        }

        pub(crate) fn recorded_list_calls(&self) -> Vec<(usize, usize)> {
            self.list_calls.lock().unwrap().clone()
        }

        pub(crate) fn enrich_count(&self) -> usize {
            self.enrich_calls.load(Ordering::SeqCst)
        }
    }

    fn not_found(what: &str) -> PokedexError {
        PokedexError::Status {
            status: 404,
            url: format!("fake://{}", what),
        }
    }

    impl PokemonSource for FakeSource {
        async fn list(
            &self,
            limit: usize,
            offset: usize,
        ) -> Result<PokemonListResponse, PokedexError> {
            self.list_calls.lock().unwrap().push((limit, offset));
            if self.fail_list {
                return Err(PokedexError::Status {
                    status: 500,
                    url: "fake://pokemon".to_string(),
                });
            }
            Ok(PokemonListResponse {
                count: self.roster.len(),
                next: None,
                previous: None,
                results: self.roster.iter().skip(offset).take(limit).cloned().collect(),
            })
        }

        async fn pokemon(&self, id_or_name: &str) -> Result<Pokemon, PokedexError> {
            self.enrich_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_enrich.as_deref() == Some(id_or_name) {
                return Err(PokedexError::InvalidRecord(format!(
                    "broken record {}",
                    id_or_name
                )));
            }
            self.records
                .get(id_or_name)
                .cloned()
                .ok_or_else(|| not_found(id_or_name))
        }

        async fn species(&self, id_or_name: &str) -> Result<PokemonSpecies, PokedexError> {
            self.species
                .get(id_or_name)
                .cloned()
                .ok_or_else(|| not_found(id_or_name))
        }

        async fn evolution_chain_by_url(&self, url: &str) -> Result<EvolutionChain, PokedexError> {
            self.chains.get(url).cloned().ok_or_else(|| not_found(url))
        }

        async fn type_info(&self, type_name: &str) -> Result<PokemonTypeInfo, PokedexError> {
            self.types
                .get(type_name)
                .cloned()
                .ok_or_else(|| not_found(type_name))
        }
    }
}
