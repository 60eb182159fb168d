pub mod api;
pub mod client;
pub mod models;

pub use client::{ApiCall, PokeApiClient};
pub use models::{
    ChainLink, EvolutionChain, NamedResource, Pokemon, PokemonCard, PokemonListResponse,
    PokemonSpecies, PokemonTypeInfo,
};
