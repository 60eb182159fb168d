use std::fmt;

#[derive(Debug)]
pub enum PokedexError {
    Network(reqwest::Error),
    Status { status: u16, url: String },
    Json(serde_json::Error),
    InvalidRecord(String),
    PageOutOfRange { page: usize, total_pages: usize },
    Config(String),
}

impl fmt::Display for PokedexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PokedexError::Network(e) => write!(f, "Network error: {}", e),
            PokedexError::Status { status, url } => {
                write!(f, "HTTP error! status: {} ({})", status, url)
            }
            PokedexError::Json(e) => write!(f, "JSON parsing error: {}", e),
            PokedexError::InvalidRecord(e) => write!(f, "Invalid record: {}", e),
            PokedexError::PageOutOfRange { page, total_pages } => write!(
                f,
                "Page {} is out of range (1-{})",
                page,
                (*total_pages).max(1)
            ),
            PokedexError::Config(e) => write!(f, "Configuration error: {}", e),
        }
    }
}

impl std::error::Error for PokedexError {}

impl From<reqwest::Error> for PokedexError {
    fn from(err: reqwest::Error) -> Self {
        PokedexError::Network(err)
    }
}

impl From<serde_json::Error> for PokedexError {
    fn from(err: serde_json::Error) -> Self {
        PokedexError::Json(err)
    }
}
