//! Debounced text input for the search box.
//!
//! Each keystroke bumps a generation number; the UI schedules a settle for that
//! generation after [`SEARCH_DEBOUNCE`] and the settle is ignored if newer input arrived.

use std::time::Duration;

pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DebouncedQuery {
    input: String,
    settled: String,
    generation: u64,
}

impl DebouncedQuery {
    /// Record new input and return the generation to settle later
    pub fn input(&mut self, text: impl Into<String>) -> u64 {
        self.input = text.into();
        self.generation += 1;
        self.generation
    }

    /// Settle `generation`. Returns the newly settled query, or `None` if the
    /// generation is stale or the query did not change.
    pub fn settle(&mut self, generation: u64) -> Option<&str> {
        if generation != self.generation || self.input == self.settled {
            return None;
        }
        self.settled = self.input.clone();
        Some(&self.settled)
    }

    /// Clear input and settled query at once, invalidating pending settles
    pub fn clear(&mut self) {
        self.input.clear();
        self.settled.clear();
        self.generation += 1;
    }

    pub fn input_text(&self) -> &str {
        &self.input
    }

    pub fn settled(&self) -> &str {
        &self.settled
    }

    /// Whether the settled query should replace the paginated listing
    pub fn is_searching(&self) -> bool {
        !self.settled.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_latest_generation_settles() {
        let mut query = DebouncedQuery::default();
        let first = query.input("p");
        let second = query.input("pi");
        let third = query.input("pik");

        assert_eq!(query.settle(first), None);
        assert_eq!(query.settle(second), None);
        assert_eq!(query.settle(third), Some("pik"));
        assert_eq!(query.settled(), "pik");
        assert!(query.is_searching());
    }

    #[test]
    fn test_unchanged_query_does_not_settle_twice() {
        let mut query = DebouncedQuery::default();
        let generation = query.input("eevee");
        assert_eq!(query.settle(generation), Some("eevee"));
        assert_eq!(query.settle(generation), None);

        let retyped = query.input("eevee");
        assert_eq!(query.settle(retyped), None);
    }

    #[test]
    fn test_clear_invalidates_pending_settle() {
        let mut query = DebouncedQuery::default();
        let generation = query.input("mew");
        query.clear();

        assert_eq!(query.settle(generation), None);
        assert_eq!(query.input_text(), "");
        assert!(!query.is_searching());
    }

    #[test]
    fn test_whitespace_is_not_searching() {
        let mut query = DebouncedQuery::default();
        let generation = query.input("   ");
        assert_eq!(query.settle(generation), Some("   "));
        assert!(!query.is_searching());
    }
}
