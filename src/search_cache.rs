//! Recently fetched first pages, keyed by committed query.

use std::collections::HashMap;
use std::time::Duration;

use tokio::time::Instant;
use tracing::debug;

use crate::catalog::SearchPage;

pub const DEFAULT_SEARCH_TTL: Duration = Duration::from_secs(300);
pub const DEFAULT_SEARCH_CAPACITY: usize = 32;

#[derive(Debug)]
pub struct SearchCache {
    ttl: Duration,
    capacity: usize,
    entries: HashMap<String, (Instant, SearchPage)>,
}

impl SearchCache {
    pub fn new(ttl: Duration, capacity: usize) -> Self {
        Self {
            ttl,
            capacity,
            entries: HashMap::new(),
        }
    }

    /// First page for `query`, if it was stored within the freshness window.
    pub fn fresh(&self, query: &str) -> Option<&SearchPage> {
        self.entries
            .get(query)
            .filter(|(stored_at, _)| stored_at.elapsed() < self.ttl)
            .map(|(_, page)| page)
    }

    pub fn store(&mut self, query: &str, page: SearchPage) {
        if self.capacity == 0 {
            return;
        }
        let ttl = self.ttl;
        self.entries
            .retain(|_, (stored_at, _)| stored_at.elapsed() < ttl);

        if self.entries.len() >= self.capacity && !self.entries.contains_key(query) {
            let oldest = self
                .entries
                .iter()
                .min_by_key(|(_, (stored_at, _))| *stored_at)
                .map(|(key, _)| key.clone());
            if let Some(oldest) = oldest {
                debug!(query = %oldest, "evicting cached search");
                self.entries.remove(&oldest);
            }
        }

        self.entries
            .insert(query.to_string(), (Instant::now(), page));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for SearchCache {
    fn default() -> Self {
        Self::new(DEFAULT_SEARCH_TTL, DEFAULT_SEARCH_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::MovieSummary;

    fn page(id: &str) -> SearchPage {
        SearchPage {
            results: vec![MovieSummary {
                id: id.to_string(),
                title: id.to_string(),
                year: "1995".into(),
                poster: None,
                media_type: "movie".into(),
            }],
            total_available: 1,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn entries_expire_after_ttl() {
        let mut cache = SearchCache::new(Duration::from_secs(300), 8);
        cache.store("heat", page("tt0113277"));
        assert_eq!(cache.fresh("heat").map(|p| p.results[0].id.as_str()), Some("tt0113277"));
        assert!(cache.fresh("Heat").is_none());

        tokio::time::advance(Duration::from_secs(301)).await;
        assert!(cache.fresh("heat").is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn oldest_entry_is_evicted_at_capacity() {
        let mut cache = SearchCache::new(Duration::from_secs(300), 2);
        cache.store("a", page("a"));
        tokio::time::advance(Duration::from_secs(1)).await;
        cache.store("b", page("b"));
        tokio::time::advance(Duration::from_secs(1)).await;
        cache.store("c", page("c"));

        assert_eq!(cache.len(), 2);
        assert!(cache.fresh("a").is_none());
        assert!(cache.fresh("b").is_some());
        assert!(cache.fresh("c").is_some());
    }

    #[test]
    fn zero_capacity_stores_nothing() {
        let mut cache = SearchCache::new(Duration::from_secs(300), 0);
        cache.store("heat", page("h"));
        assert!(cache.is_empty());
    }
}
