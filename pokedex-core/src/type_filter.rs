use crate::config::ITEMS_PER_PAGE;
use crate::error::PokedexError;
use crate::format::extract_id_from_url;
use crate::pokeapi::PokemonCard;
use crate::source::PokemonSource;
use futures::future::try_join_all;
use tracing::info;

/// The first page worth of pokemon that have `type_name`, enriched for display.
/// Members are looked up by the id in their resource url, falling back to their name.
pub async fn list_by_type<S: PokemonSource>(
    source: &S,
    type_name: &str,
) -> Result<Vec<PokemonCard>, PokedexError> {
    let info = source.type_info(type_name).await?;
    info!(
        type_name = %info.name,
        members = info.pokemon.len(),
        "Type loaded"
    );

    let keys: Vec<String> = info
        .pokemon
        .iter()
        .take(ITEMS_PER_PAGE)
        .map(|member| match extract_id_from_url(&member.pokemon.url) {
            0 => member.pokemon.name.clone(),
            id => id.to_string(),
        })
        .collect();

    try_join_all(keys.iter().map(|key| source.enrich(key))).await
}
