use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct NamedResource {
    pub name: String,
    pub url: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PokemonListResponse {
    pub count: usize,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<NamedResource>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PokemonTypeSlot {
    pub slot: u32,
    #[serde(rename = "type")]
    pub kind: NamedResource,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PokemonAbility {
    pub ability: NamedResource,
    pub is_hidden: bool,
    pub slot: u32,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PokemonStat {
    pub base_stat: u32,
    pub effort: u32,
    pub stat: NamedResource,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct ArtworkSprites {
    pub front_default: Option<String>,
    pub front_shiny: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct OtherSprites {
    #[serde(rename = "official-artwork", default)]
    pub official_artwork: Option<ArtworkSprites>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct PokemonSprites {
    pub front_default: Option<String>,
    pub front_shiny: Option<String>,
    #[serde(default)]
    pub other: Option<OtherSprites>,
}

impl PokemonSprites {
    fn artwork(&self) -> Option<&ArtworkSprites> {
        self.other.as_ref()?.official_artwork.as_ref()
    }

    /// Official artwork, then the plain front sprite, then nothing
    pub fn best_default(&self) -> Option<&str> {
        self.artwork()
            .and_then(|a| a.front_default.as_deref())
            .filter(|url| !url.is_empty())
            .or(self.front_default.as_deref())
            .filter(|url| !url.is_empty())
    }

    pub fn best_shiny(&self) -> Option<&str> {
        self.artwork()
            .and_then(|a| a.front_shiny.as_deref())
            .filter(|url| !url.is_empty())
            .or(self.front_shiny.as_deref())
            .filter(|url| !url.is_empty())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Pokemon {
    pub id: u32,
    pub name: String,
    pub base_experience: Option<u32>,
    pub height: u32,
    pub weight: u32,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub order: i32,
    pub abilities: Vec<PokemonAbility>,
    pub types: Vec<PokemonTypeSlot>,
    pub stats: Vec<PokemonStat>,
    pub sprites: PokemonSprites,
    pub species: NamedResource,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ApiResourceLink {
    pub url: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FlavorTextEntry {
    pub flavor_text: String,
    pub language: NamedResource,
    pub version: Option<NamedResource>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Genus {
    pub genus: String,
    pub language: NamedResource,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PokemonSpecies {
    pub id: u32,
    pub name: String,
    pub evolution_chain: Option<ApiResourceLink>,
    #[serde(default)]
    pub flavor_text_entries: Vec<FlavorTextEntry>,
    #[serde(default)]
    pub genera: Vec<Genus>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct EvolutionDetail {
    pub min_level: Option<u32>,
    pub trigger: NamedResource,
    pub item: Option<NamedResource>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ChainLink {
    pub is_baby: bool,
    pub species: NamedResource,
    #[serde(default)]
    pub evolution_details: Vec<EvolutionDetail>,
    #[serde(default)]
    pub evolves_to: Vec<ChainLink>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct EvolutionChain {
    pub id: u32,
    pub chain: ChainLink,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TypeMember {
    pub pokemon: NamedResource,
    pub slot: u32,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PokemonTypeInfo {
    pub id: u32,
    pub name: String,
    pub pokemon: Vec<TypeMember>,
}

/// Display record used by list views: one grid card
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PokemonCard {
    pub id: u32,
    pub name: String,
    pub sprite: String,
    pub types: Vec<String>,
}

impl From<&Pokemon> for PokemonCard {
    fn from(pokemon: &Pokemon) -> Self {
        PokemonCard {
            id: pokemon.id,
            name: pokemon.name.clone(),
            sprite: pokemon
                .sprites
                .best_default()
                .unwrap_or_default()
                .to_string(),
            types: pokemon.types.iter().map(|t| t.kind.name.clone()).collect(),
        }
    }
}
