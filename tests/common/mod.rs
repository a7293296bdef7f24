#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use omdb_browse::catalog::{
    Catalog, CatalogError, DetailResponse, MovieDetails, MovieSummary, SearchPage, SearchResponse,
};

/// Provider page size used by the fake, matching OMDb.
pub const PROVIDER_PAGE_SIZE: usize = 10;

/// In-memory catalog that pages its canned results the way the provider does.
#[derive(Default)]
pub struct FakeCatalog {
    titles: HashMap<String, Vec<MovieSummary>>,
    failures: HashMap<String, CatalogError>,
    delays: HashMap<String, Duration>,
    reported_totals: HashMap<String, u32>,
    details: HashMap<String, MovieDetails>,
    searches: Mutex<Vec<(String, u32)>>,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_titles(mut self, query: &str, prefix: &str, count: usize) -> Self {
        self.titles.insert(query.to_string(), movies(prefix, count));
        self
    }

    pub fn with_results(mut self, query: &str, results: Vec<MovieSummary>) -> Self {
        self.titles.insert(query.to_string(), results);
        self
    }

    pub fn failing(mut self, query: &str, err: CatalogError) -> Self {
        self.failures.insert(query.to_string(), err);
        self
    }

    pub fn delayed(mut self, query: &str, delay: Duration) -> Self {
        self.delays.insert(query.to_string(), delay);
        self
    }

    /// Advertises a larger total than the pages actually hold.
    pub fn overstating(mut self, query: &str, total: u32) -> Self {
        self.reported_totals.insert(query.to_string(), total);
        self
    }

    pub fn with_details(mut self, details: MovieDetails) -> Self {
        self.details.insert(details.id.clone(), details);
        self
    }

    pub fn searches(&self) -> Vec<(String, u32)> {
        self.searches.lock().unwrap().clone()
    }

    pub fn searches_for(&self, query: &str) -> usize {
        self.searches()
            .iter()
            .filter(|(recorded, _)| recorded == query)
            .count()
    }
}

impl Catalog for FakeCatalog {
    async fn search(&self, query: &str, page: u32) -> SearchResponse {
        let query = query.trim();
        if query.is_empty() {
            return Err(CatalogError::EmptyQuery);
        }
        self.searches.lock().unwrap().push((query.to_string(), page));

        if let Some(delay) = self.delays.get(query) {
            tokio::time::sleep(*delay).await;
        }
        if let Some(err) = self.failures.get(query) {
            return Err(err.clone());
        }

        let not_found = || CatalogError::ProviderEmpty("Movie not found!".to_string());
        let all = self.titles.get(query).ok_or_else(not_found)?;
        let start = (page.max(1) as usize - 1) * PROVIDER_PAGE_SIZE;
        if start >= all.len() {
            return Err(not_found());
        }
        let end = (start + PROVIDER_PAGE_SIZE).min(all.len());
        Ok(SearchPage {
            results: all[start..end].to_vec(),
            total_available: self
                .reported_totals
                .get(query)
                .copied()
                .unwrap_or(all.len() as u32),
        })
    }

    async fn get_by_id(&self, id: &str) -> DetailResponse {
        if id.trim().is_empty() {
            return Err(CatalogError::EmptyQuery);
        }
        self.details
            .get(id)
            .cloned()
            .ok_or_else(|| CatalogError::ProviderEmpty("Incorrect IMDb ID.".to_string()))
    }
}

pub fn movie(id: &str, poster: Option<&str>) -> MovieSummary {
    MovieSummary {
        id: id.to_string(),
        title: format!("Title {id}"),
        year: "2010".to_string(),
        poster: poster.map(String::from),
        media_type: "movie".to_string(),
    }
}

pub fn movies(prefix: &str, count: usize) -> Vec<MovieSummary> {
    (0..count)
        .map(|i| {
            let id = format!("{prefix}{i}");
            let poster = format!("https://img.example/{id}.jpg");
            movie(&id, Some(&poster))
        })
        .collect()
}

pub fn details(id: &str, title: &str) -> MovieDetails {
    MovieDetails {
        id: id.to_string(),
        title: title.to_string(),
        year: Some("1999".to_string()),
        poster: None,
        media_type: Some("movie".to_string()),
        rated: Some("R".to_string()),
        released: None,
        runtime: Some("136 min".to_string()),
        genre: Some("Action, Sci-Fi".to_string()),
        director: Some("Lana Wachowski, Lilly Wachowski".to_string()),
        writer: None,
        actors: Some("Keanu Reeves".to_string()),
        plot: Some("A hacker learns the truth.".to_string()),
        language: None,
        country: None,
        awards: None,
        metascore: None,
        imdb_rating: Some("8.7".to_string()),
        imdb_votes: None,
        dvd: None,
        box_office: None,
        production: None,
        website: None,
        ratings: Vec::new(),
    }
}
