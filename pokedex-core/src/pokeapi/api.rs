use super::{client::PokeApiClient, models::*};
use crate::error::PokedexError;
use log::info;

/// Lowercases and trims a pokemon name or numeric id for use in a URL path
fn resource_key(id_or_name: &str) -> String {
    id_or_name.trim().to_lowercase()
}

impl PokeApiClient {
    pub async fn list_pokemon(
        &self,
        limit: usize,
        offset: usize,
    ) -> Result<PokemonListResponse, PokedexError> {
        let uri = self.endpoint(&format!("pokemon?limit={}&offset={}", limit, offset));
        let list: PokemonListResponse = self.get_json(&uri).await?;
        info!(
            "Listed {} of {} pokemon at offset {}",
            list.results.len(),
            list.count,
            offset
        );
        Ok(list)
    }

    pub async fn get_pokemon(&self, id_or_name: &str) -> Result<Pokemon, PokedexError> {
        let key = resource_key(id_or_name);
        if key.is_empty() {
            return Err(PokedexError::InvalidRecord(
                "Empty pokemon name or id".to_string(),
            ));
        }
        self.get_json(&self.endpoint(&format!("pokemon/{}", key)))
            .await
    }

    pub async fn get_species(&self, id_or_name: &str) -> Result<PokemonSpecies, PokedexError> {
        let key = resource_key(id_or_name);
        self.get_json(&self.endpoint(&format!("pokemon-species/{}", key)))
            .await
    }

    pub async fn get_evolution_chain(&self, id: u32) -> Result<EvolutionChain, PokedexError> {
        self.get_json(&self.endpoint(&format!("evolution-chain/{}", id)))
            .await
    }

    pub async fn get_evolution_chain_by_url(
        &self,
        url: &str,
    ) -> Result<EvolutionChain, PokedexError> {
        self.get_json(url).await
    }

    pub async fn get_type(&self, type_name: &str) -> Result<PokemonTypeInfo, PokedexError> {
        let key = resource_key(type_name);
        self.get_json(&self.endpoint(&format!("type/{}", key)))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use mockito::Matcher;
    use std::time::Duration;

    fn client_for(server: &mockito::ServerGuard) -> PokeApiClient {
        let config = ClientConfig::default()
            .with_base_url(&server.url())
            .unwrap()
            .with_cooldown(Duration::ZERO);
        PokeApiClient::with_config(config).unwrap()
    }

    #[tokio::test]
    async fn test_list_pokemon_sends_limit_and_offset() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/pokemon")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("limit".into(), "20".into()),
                Matcher::UrlEncoded("offset".into(), "40".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(include_str!("../../test_data/pokemon_list_page3.json"))
            .create_async()
            .await;

        let client = client_for(&server);
        let list = client.list_pokemon(20, 40).await.unwrap();

        mock.assert_async().await;
        assert_eq!(list.count, 1302);
        assert_eq!(list.results[2].name, "nidoking");
    }

    #[tokio::test]
    async fn test_get_pokemon_normalizes_name() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/pokemon/pikachu")
            .with_status(200)
            .with_body(include_str!("../../test_data/pokemon_pikachu.json"))
            .create_async()
            .await;

        let client = client_for(&server);
        let pokemon = client.get_pokemon("  Pikachu ").await.unwrap();

        mock.assert_async().await;
        assert_eq!(pokemon.id, 25);
    }

    #[tokio::test]
    async fn test_non_success_status_is_reported() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/pokemon/missingno")
            .with_status(404)
            .with_body("Not Found")
            .create_async()
            .await;

        let client = client_for(&server);
        match client.get_pokemon("missingno").await {
            Err(PokedexError::Status { status, url }) => {
                assert_eq!(status, 404);
                assert!(url.ends_with("/pokemon/missingno"));
            }
            other => panic!("Expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_payload_is_json_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/type/fire")
            .with_status(200)
            .with_body(r#"{"id": 10, "name": "fire"}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let result = client.get_type("fire").await;
        assert!(matches!(result, Err(PokedexError::Json(_))));
    }

    #[tokio::test]
    async fn test_empty_name_is_rejected_without_request() {
        let server = mockito::Server::new_async().await;
        let client = client_for(&server);
        let result = client.get_pokemon("   ").await;
        assert!(matches!(result, Err(PokedexError::InvalidRecord(_))));
    }

    #[tokio::test]
    async fn test_calls_are_recorded_in_history() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/evolution-chain/10")
            .with_status(200)
            .with_body(include_str!("../../test_data/evolution_chain_10.json"))
            .create_async()
            .await;

        let client = client_for(&server);
        let chain = client.get_evolution_chain(10).await.unwrap();
        assert_eq!(chain.id, 10);

        let history = PokeApiClient::get_api_call_history();
        assert!(
            history
                .iter()
                .any(|call| call.url.ends_with("/evolution-chain/10") && call.success)
        );
    }
}
