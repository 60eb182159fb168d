mod app;

use pokedex_core::{ClientConfig, Pokedex};

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            // Default to info level, but allow override via RUST_LOG
            // Example: RUST_LOG=pokedex_core::listing=debug,pokedex_core::search=debug
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pokedex_core=info,pokedex_gui=info".into()),
        )
        .init();
}

fn build_pokedex() -> Result<Pokedex, pokedex_core::PokedexError> {
    let mut config = ClientConfig::default();
    if let Ok(base_url) = std::env::var("POKEDEX_API_URL") {
        config = config.with_base_url(&base_url)?;
    }
    Pokedex::new(config, 1)
}

fn main() -> iced::Result {
    init_logging();

    let pokedex = match build_pokedex() {
        Ok(pokedex) => pokedex,
        Err(e) => {
            eprintln!("Failed to set up PokéAPI client: {}", e);
            std::process::exit(1);
        }
    };
    log::info!(
        "Browsing PokéAPI at {}",
        pokedex.client().config().base_url
    );

    iced::application("Pokédex", app::update, app::view)
        .subscription(app::subscription)
        .run_with(move || app::initialize(pokedex))
}
