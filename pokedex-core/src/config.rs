use crate::error::PokedexError;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";
pub const DEFAULT_USER_AGENT: &str = "pokedex-core/0.1";
pub const DEFAULT_COOLDOWN: Duration = Duration::from_millis(10);

/// Records shown per listing page.
pub const ITEMS_PER_PAGE: usize = 20;

/// Connection settings for [`crate::PokeApiClient`]
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub base_url: String,
    pub user_agent: String,
    /// Minimum spacing between two calls against `base_url`
    pub cooldown: Duration,
}

impl ClientConfig {
    /// Use a different API root, e.g. a local mirror. Trailing slashes are dropped.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, PokedexError> {
        let trimmed = base_url.trim().trim_end_matches('/');
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(PokedexError::Config(format!(
                "base url must start with http:// or https://, got '{}'",
                base_url
            )));
        }
        self.base_url = trimmed.to_string();
        Ok(self)
    }

    pub fn with_cooldown(mut self, cooldown: Duration) -> Self {
        self.cooldown = cooldown;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            cooldown: DEFAULT_COOLDOWN,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_dropped() {
        let config = ClientConfig::default()
            .with_base_url("http://127.0.0.1:8080/api/v2/")
            .unwrap();
        assert_eq!(config.base_url, "http://127.0.0.1:8080/api/v2");
    }

    #[test]
    fn test_base_url_requires_scheme() {
        let result = ClientConfig::default().with_base_url("pokeapi.co/api/v2");
        assert!(matches!(result, Err(PokedexError::Config(_))));
    }
}
