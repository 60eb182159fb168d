//! Detail view: one pokemon with its species text and evolution line.

use crate::error::PokedexError;
use crate::format::{capitalize_name, format_pokemon_id, format_tenths};
use crate::pokeapi::{ChainLink, EvolutionChain, Pokemon, PokemonSpecies};
use crate::source::PokemonSource;
use std::collections::VecDeque;
use tracing::{debug, warn};

/// Highest possible base stat, used to scale stat bars
pub const MAX_STAT: u32 = 255;

const DETAIL_LANGUAGE: &str = "en";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatTier {
    Low,
    BelowAverage,
    Average,
    Good,
    Great,
    Excellent,
}

impl StatTier {
    pub fn for_value(value: u32) -> Self {
        match value {
            0..=49 => StatTier::Low,
            50..=79 => StatTier::BelowAverage,
            80..=99 => StatTier::Average,
            100..=119 => StatTier::Good,
            120..=149 => StatTier::Great,
            _ => StatTier::Excellent,
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            StatTier::Low => "#F34444",
            StatTier::BelowAverage => "#FF7F0F",
            StatTier::Average => "#FFDD57",
            StatTier::Good => "#A0E515",
            StatTier::Great => "#23CD5E",
            StatTier::Excellent => "#00C2B8",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatLine {
    pub label: String,
    pub value: u32,
    /// Bar length in `0.0..=1.0`
    pub fraction: f32,
    pub tier: StatTier,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbilityLine {
    pub label: String,
    pub hidden: bool,
}

pub fn stat_label(stat_name: &str) -> String {
    match stat_name {
        "hp" => "HP".to_string(),
        "attack" => "Attack".to_string(),
        "defense" => "Defense".to_string(),
        "special-attack" => "Sp. Atk".to_string(),
        "special-defense" => "Sp. Def".to_string(),
        "speed" => "Speed".to_string(),
        other => other.to_string(),
    }
}

/// Form feeds and line breaks from the game text become plain spaces
pub fn clean_flavor_text(text: &str) -> String {
    text.replace(['\u{c}', '\n'], " ")
}

#[derive(Debug, Clone, PartialEq)]
pub struct PokemonDetail {
    pub pokemon: Pokemon,
    pub species: Option<PokemonSpecies>,
    pub evolution: Option<EvolutionChain>,
}

impl PokemonDetail {
    pub fn display_id(&self) -> String {
        format_pokemon_id(self.pokemon.id)
    }

    pub fn display_name(&self) -> String {
        capitalize_name(&self.pokemon.name)
    }

    pub fn types(&self) -> Vec<String> {
        self.pokemon
            .types
            .iter()
            .map(|t| t.kind.name.clone())
            .collect()
    }

    pub fn genus(&self) -> Option<&str> {
        self.species
            .as_ref()?
            .genera
            .iter()
            .find(|g| g.language.name == DETAIL_LANGUAGE)
            .map(|g| g.genus.as_str())
    }

    pub fn flavor_text(&self) -> Option<String> {
        self.species
            .as_ref()?
            .flavor_text_entries
            .iter()
            .find(|entry| entry.language.name == DETAIL_LANGUAGE)
            .map(|entry| clean_flavor_text(&entry.flavor_text))
    }

    /// Height in metres with one decimal
    pub fn height_m(&self) -> String {
        format_tenths(self.pokemon.height)
    }

    /// Weight in kilograms with one decimal
    pub fn weight_kg(&self) -> String {
        format_tenths(self.pokemon.weight)
    }

    pub fn stats(&self) -> Vec<StatLine> {
        self.pokemon
            .stats
            .iter()
            .map(|s| StatLine {
                label: stat_label(&s.stat.name),
                value: s.base_stat,
                fraction: (s.base_stat as f32 / MAX_STAT as f32).min(1.0),
                tier: StatTier::for_value(s.base_stat),
            })
            .collect()
    }

    pub fn stat_total(&self) -> u32 {
        self.pokemon.stats.iter().map(|s| s.base_stat).sum()
    }

    pub fn abilities(&self) -> Vec<AbilityLine> {
        self.pokemon
            .abilities
            .iter()
            .map(|a| AbilityLine {
                label: capitalize_name(&a.ability.name.replacen('-', " ", 1)),
                hidden: a.is_hidden,
            })
            .collect()
    }

    /// Sprite url, shiny when asked for and available
    pub fn sprite(&self, shiny: bool) -> Option<&str> {
        let sprites = &self.pokemon.sprites;
        if shiny {
            sprites.best_shiny().or_else(|| sprites.best_default())
        } else {
            sprites.best_default()
        }
    }

    pub fn has_shiny(&self) -> bool {
        self.pokemon.sprites.best_shiny().is_some()
    }

    /// Species names of the evolution line, breadth first from the base form
    pub fn evolution_names(&self) -> Vec<String> {
        let Some(chain) = &self.evolution else {
            return Vec::new();
        };
        let mut names = Vec::new();
        let mut queue: VecDeque<&ChainLink> = VecDeque::from([&chain.chain]);
        while let Some(link) = queue.pop_front() {
            names.push(link.species.name.clone());
            queue.extend(link.evolves_to.iter());
        }
        names
    }
}

/// Fetch pokemon, species, and evolution chain in that order.
/// Any failure fails the whole detail view.
pub async fn load_detail<S: PokemonSource>(
    source: &S,
    id_or_name: &str,
) -> Result<PokemonDetail, PokedexError> {
    debug!(pokemon = %id_or_name, "Loading detail");
    let result = fetch_detail(source, id_or_name).await;
    if let Err(e) = &result {
        warn!(pokemon = %id_or_name, error = %e, "Detail failed to load");
    }
    result
}

async fn fetch_detail<S: PokemonSource>(
    source: &S,
    id_or_name: &str,
) -> Result<PokemonDetail, PokedexError> {
    let pokemon = source.pokemon(id_or_name).await?;
    let species = source.species(&pokemon.species.name).await?;
    let evolution = match &species.evolution_chain {
        Some(link) => Some(source.evolution_chain_by_url(&link.url).await?),
        None => None,
    };
    Ok(PokemonDetail {
        pokemon,
        species: Some(species),
        evolution,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::fake::FakeSource;

    fn pikachu_source() -> FakeSource {
        let mut source = FakeSource::default();
        let pokemon: Pokemon =
            serde_json::from_str(include_str!("../test_data/pokemon_pikachu.json")).unwrap();
        let species: PokemonSpecies =
            serde_json::from_str(include_str!("../test_data/species_pikachu.json")).unwrap();
        let chain: EvolutionChain =
            serde_json::from_str(include_str!("../test_data/evolution_chain_10.json")).unwrap();
        source.records.insert("pikachu".to_string(), pokemon.clone());
        source.records.insert("25".to_string(), pokemon);
        source.species.insert("pikachu".to_string(), species);
        source.chains.insert(
            "https://pokeapi.co/api/v2/evolution-chain/10/".to_string(),
            chain,
        );
        source
    }

    #[tokio::test]
    async fn test_detail_view_model() {
        let detail = load_detail(&pikachu_source(), "25").await.unwrap();

        assert_eq!(detail.display_id(), "#025");
        assert_eq!(detail.display_name(), "Pikachu");
        assert_eq!(detail.genus(), Some("Mouse Pokémon"));
        assert_eq!(
            detail.flavor_text().as_deref(),
            Some("When several of these POKéMON gather, their electricity could build and cause lightning storms.")
        );
        assert_eq!(detail.height_m(), "0.4");
        assert_eq!(detail.weight_kg(), "6.0");
        assert_eq!(detail.types(), vec!["electric".to_string()]);
        assert_eq!(detail.stat_total(), 320);
        assert_eq!(
            detail.evolution_names(),
            vec!["pichu".to_string(), "pikachu".to_string(), "raichu".to_string()]
        );
    }

    #[tokio::test]
    async fn test_stats_and_abilities() {
        let detail = load_detail(&pikachu_source(), "pikachu").await.unwrap();

        let stats = detail.stats();
        let labels: Vec<&str> = stats.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["HP", "Attack", "Defense", "Sp. Atk", "Sp. Def", "Speed"]
        );
        assert_eq!(stats[0].tier, StatTier::Low);
        assert_eq!(stats[5].tier, StatTier::Average);
        assert!((stats[5].fraction - 90.0 / 255.0).abs() < f32::EPSILON);

        let abilities = detail.abilities();
        assert_eq!(
            abilities,
            vec![
                AbilityLine {
                    label: "Static".to_string(),
                    hidden: false
                },
                AbilityLine {
                    label: "Lightning rod".to_string(),
                    hidden: true
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_shiny_sprite() {
        let detail = load_detail(&pikachu_source(), "pikachu").await.unwrap();
        assert!(detail.has_shiny());
        assert!(detail.sprite(true).unwrap().ends_with("official-artwork/shiny/25.png"));
        assert!(detail.sprite(false).unwrap().ends_with("official-artwork/25.png"));
    }

    #[tokio::test]
    async fn test_missing_species_fails_detail() {
        let mut source = pikachu_source();
        source.species.clear();
        let result = load_detail(&source, "pikachu").await;
        assert!(matches!(result, Err(PokedexError::Status { status: 404, .. })));
    }

    #[tokio::test]
    async fn test_species_without_chain() {
        let mut source = pikachu_source();
        if let Some(species) = source.species.get_mut("pikachu") {
            species.evolution_chain = None;
        }
        let detail = load_detail(&source, "pikachu").await.unwrap();
        assert!(detail.evolution.is_none());
        assert!(detail.evolution_names().is_empty());
    }

    #[test]
    fn test_stat_tiers() {
        assert_eq!(StatTier::for_value(0), StatTier::Low);
        assert_eq!(StatTier::for_value(49), StatTier::Low);
        assert_eq!(StatTier::for_value(50), StatTier::BelowAverage);
        assert_eq!(StatTier::for_value(99), StatTier::Average);
        assert_eq!(StatTier::for_value(100), StatTier::Good);
        assert_eq!(StatTier::for_value(149), StatTier::Great);
        assert_eq!(StatTier::for_value(255), StatTier::Excellent);
        assert_eq!(StatTier::Excellent.color(), "#00C2B8");
    }

    #[test]
    fn test_stat_labels_pass_unknown_through() {
        assert_eq!(stat_label("special-attack"), "Sp. Atk");
        assert_eq!(stat_label("accuracy"), "accuracy");
    }
}
