use clap::{Parser, Subcommand};
use pokedex_core::format::{POKEMON_TYPES, capitalize_name, format_pokemon_id, format_types};
use pokedex_core::{
    ClientConfig, LoadStatus, PageEntry, PageWindow, PokeApiClient, Pokedex, PokemonCard,
};

#[derive(Parser)]
#[command(name = "pokedex-cli")]
#[command(about = "Browse the PokéAPI catalog from the terminal")]
struct Cli {
    /// PokéAPI root url
    #[arg(long, env = "POKEDEX_API_URL", global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List one page of the catalog
    List {
        /// Page number, starting at 1
        #[arg(short, long, default_value = "1")]
        page: usize,
    },
    /// Search pokemon by (part of) their name
    Search {
        query: String,
    },
    /// Show stats, abilities, and evolutions of one pokemon
    Show {
        /// Name or national dex number
        name: String,
        /// Print the shiny sprite url instead of the default one
        #[arg(long)]
        shiny: bool,
    },
    /// List pokemon of one type
    Type {
        name: String,
    },
}

fn print_card(card: &PokemonCard) {
    println!(
        "  {} {} - {}",
        format_pokemon_id(card.id),
        capitalize_name(&card.name),
        format_types(&card.types)
    );
}

/// One line page strip, current page in brackets: `1 … 9 [10] 11 … 20`
fn render_strip(window: &PageWindow, current_page: usize) -> String {
    window
        .pages
        .iter()
        .map(|entry| match entry {
            PageEntry::Page(page) if *page == current_page => format!("[{}]", page),
            PageEntry::Page(page) => page.to_string(),
            PageEntry::Ellipsis => "…".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn render_jumps(window: &PageWindow) -> Option<String> {
    if window.quick_jumps.is_empty() {
        return None;
    }
    let jumps: Vec<String> = window.quick_jumps.iter().map(|p| p.to_string()).collect();
    Some(format!("Jump to: {}", jumps.join(" ")))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let cli = Cli::parse();
    let mut config = ClientConfig::default();
    if let Some(base_url) = &cli.base_url {
        config = config.with_base_url(base_url)?;
    }

    match cli.command {
        Commands::List { page } => {
            let pokedex = Pokedex::new(config, page)?;
            let state = pokedex.listing().initial_load().await;

            if state.status == LoadStatus::Errored {
                eprintln!(
                    "Failed to load page {}: {}",
                    state.current_page,
                    state.error.unwrap_or_default()
                );
                std::process::exit(1);
            }

            println!(
                "Page {} of {} ({} pokemon)",
                state.current_page,
                state.total_pages().max(1),
                state.total_count
            );
            for card in &state.items {
                print_card(card);
            }

            let window = state.window();
            if !window.is_hidden() {
                println!();
                println!("{}", render_strip(&window, state.current_page));
                if let Some(jumps) = render_jumps(&window) {
                    println!("{}", jumps);
                }
            }
        }
        Commands::Search { query } => {
            let pokedex = Pokedex::new(config, 1)?;
            println!("Searching for '{}'...", query.trim());

            match pokedex.search_names(&query).await {
                Ok(results) if results.is_empty() => println!("No pokemon found."),
                Ok(results) => {
                    println!("Found {} pokemon:", results.len());
                    for card in &results {
                        print_card(card);
                    }
                }
                Err(e) => {
                    eprintln!("Search failed: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Commands::Show { name, shiny } => {
            let pokedex = Pokedex::new(config, 1)?;
            let detail = match pokedex.detail(&name).await {
                Ok(detail) => detail,
                Err(e) => {
                    eprintln!("Could not load '{}': {}", name, e);
                    std::process::exit(1);
                }
            };

            println!("{} {}", detail.display_id(), detail.display_name());
            if let Some(genus) = detail.genus() {
                println!("{}", genus);
            }
            println!("Type: {}", format_types(&detail.types()));
            if let Some(text) = detail.flavor_text() {
                println!();
                println!("{}", text);
            }
            println!();
            println!("Height: {} m   Weight: {} kg", detail.height_m(), detail.weight_kg());

            println!();
            println!("Base stats:");
            for stat in detail.stats() {
                let bar = "#".repeat((stat.fraction * 30.0).round() as usize);
                println!("  {:<8} {:>3} {}", stat.label, stat.value, bar);
            }
            println!("  {:<8} {:>3}", "Total", detail.stat_total());

            println!();
            println!("Abilities:");
            for ability in detail.abilities() {
                if ability.hidden {
                    println!("  {} (hidden)", ability.label);
                } else {
                    println!("  {}", ability.label);
                }
            }

            let evolutions = detail.evolution_names();
            if evolutions.len() > 1 {
                println!();
                let names: Vec<String> = evolutions.iter().map(|n| capitalize_name(n)).collect();
                println!("Evolution: {}", names.join(" -> "));
            }

            if let Some(sprite) = detail.sprite(shiny) {
                println!();
                println!("Sprite: {}", sprite);
            }
        }
        Commands::Type { name } => {
            let name = name.trim().to_lowercase();
            if !POKEMON_TYPES.contains(&name.as_str()) {
                eprintln!(
                    "Unknown type '{}'. Known types: {}",
                    name,
                    POKEMON_TYPES.join(", ")
                );
                std::process::exit(2);
            }
            let pokedex = Pokedex::new(config, 1)?;
            match pokedex.by_type(&name).await {
                Ok(cards) => {
                    println!("{} type ({} shown):", capitalize_name(&name), cards.len());
                    for card in &cards {
                        print_card(card);
                    }
                }
                Err(e) => {
                    eprintln!("Could not load type '{}': {}", name, e);
                    std::process::exit(1);
                }
            }
        }
    }

    log::debug!(
        "{} API calls made",
        PokeApiClient::get_api_call_history().len()
    );
    Ok(())
}
