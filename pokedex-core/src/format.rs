use itertools::Itertools;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref TRAILING_ID: Regex = Regex::new(r"/(\d+)/?$").expect("valid id pattern");
}

pub const POKEMON_TYPES: [&str; 18] = [
    "normal", "fire", "water", "electric", "grass", "ice", "fighting", "poison", "ground",
    "flying", "psychic", "bug", "rock", "ghost", "dragon", "dark", "steel", "fairy",
];

const FALLBACK_TYPE_COLOR: &str = "#A8A878";

/// Badge colour for a type name as `#RRGGBB`; unknown types use the `normal` colour
pub fn type_color(type_name: &str) -> &'static str {
    match type_name.to_lowercase().as_str() {
        "normal" => "#A8A878",
        "fire" => "#F08030",
        "water" => "#6890F0",
        "electric" => "#F8D030",
        "grass" => "#78C850",
        "ice" => "#98D8D8",
        "fighting" => "#C03028",
        "poison" => "#A040A0",
        "ground" => "#E0C068",
        "flying" => "#A890F0",
        "psychic" => "#F85888",
        "bug" => "#A8B820",
        "rock" => "#B8A038",
        "ghost" => "#705898",
        "dragon" => "#7038F8",
        "dark" => "#705848",
        "steel" => "#B8B8D0",
        "fairy" => "#EE99AC",
        _ => FALLBACK_TYPE_COLOR,
    }
}

/// `#RRGGBB` to 8-bit channels
pub fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(digits.get(i..i + 2)?, 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

/// `25` becomes `#025`; ids past three digits are not truncated
pub fn format_pokemon_id(id: u32) -> String {
    format!("#{:03}", id)
}

pub fn capitalize_name(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Numeric id at the end of a resource url, 0 when there is none.
/// `https://pokeapi.co/api/v2/pokemon/25/` gives 25.
pub fn extract_id_from_url(url: &str) -> u32 {
    TRAILING_ID
        .captures(url)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}

/// API heights and weights come in tenths (decimetres, hectograms)
pub fn format_tenths(value: u32) -> String {
    format!("{:.1}", value as f64 / 10.0)
}

pub fn format_types(types: &[String]) -> String {
    types.iter().map(|t| capitalize_name(t)).join(" / ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_pokemon_id() {
        assert_eq!(format_pokemon_id(1), "#001");
        assert_eq!(format_pokemon_id(25), "#025");
        assert_eq!(format_pokemon_id(150), "#150");
        assert_eq!(format_pokemon_id(1025), "#1025");
    }

    #[test]
    fn test_capitalize_name() {
        assert_eq!(capitalize_name("pikachu"), "Pikachu");
        assert_eq!(capitalize_name("mr-mime"), "Mr-mime");
        assert_eq!(capitalize_name(""), "");
    }

    #[test]
    fn test_extract_id_from_url() {
        assert_eq!(extract_id_from_url("https://pokeapi.co/api/v2/pokemon/25/"), 25);
        assert_eq!(extract_id_from_url("https://pokeapi.co/api/v2/pokemon/10034"), 10034);
        assert_eq!(extract_id_from_url("https://pokeapi.co/api/v2/pokemon/pikachu/"), 0);
        assert_eq!(extract_id_from_url(""), 0);
    }

    #[test]
    fn test_type_colors() {
        assert_eq!(type_color("fire"), "#F08030");
        assert_eq!(type_color("Electric"), "#F8D030");
        assert_eq!(type_color("shadow"), "#A8A878");
        for name in POKEMON_TYPES {
            assert!(hex_to_rgb(type_color(name)).is_some(), "{}", name);
        }
    }

    #[test]
    fn test_hex_to_rgb() {
        assert_eq!(hex_to_rgb("#F08030"), Some((0xF0, 0x80, 0x30)));
        assert_eq!(hex_to_rgb("F08030"), None);
        assert_eq!(hex_to_rgb("#F080"), None);
    }

    #[test]
    fn test_measurements() {
        assert_eq!(format_tenths(4), "0.4");
        assert_eq!(format_tenths(60), "6.0");
        assert_eq!(format_tenths(9999), "999.9");
    }

    #[test]
    fn test_format_types() {
        let types = vec!["grass".to_string(), "poison".to_string()];
        assert_eq!(format_types(&types), "Grass / Poison");
    }
}
