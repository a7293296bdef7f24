use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::catalog::{Catalog, MovieSummary};

pub const DEFAULT_SHOWCASE_SIZE: usize = 9;
pub const DEFAULT_SHOWCASE_TTL: Duration = Duration::from_secs(600);

/// Assembles the default grid by taking the first postered hit of each seed
/// query, in seed order, until `target_count` titles are collected.
///
/// A failing seed, or one without any postered hit, is skipped.
pub async fn build_showcase<C, S>(catalog: &C, seeds: &[S], target_count: usize) -> Vec<MovieSummary>
where
    C: Catalog,
    S: AsRef<str>,
{
    let mut showcase: Vec<MovieSummary> = Vec::with_capacity(target_count);
    if target_count == 0 {
        return showcase;
    }

    for seed in seeds {
        let seed = seed.as_ref();
        match catalog.search(seed, 1).await {
            Ok(page) => match page.results.into_iter().find(MovieSummary::has_poster) {
                Some(movie) => {
                    debug!(seed, id = %movie.id, "showcase pick");
                    showcase.push(movie);
                }
                None => debug!(seed, "seed has no postered result; skipping"),
            },
            Err(err) => warn!(seed, error = %err, "showcase seed failed; skipping"),
        }

        if showcase.len() >= target_count {
            break;
        }
    }

    showcase.truncate(target_count);
    info!(count = showcase.len(), "showcase ready");
    showcase
}

/// Last built showcase together with the instant it was built.
#[derive(Debug)]
pub struct ShowcaseCache {
    ttl: Duration,
    entry: Option<(Instant, Vec<MovieSummary>)>,
}

impl ShowcaseCache {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, entry: None }
    }

    /// Returns the cached showcase while it is still fresh.
    pub fn fresh(&self) -> Option<&[MovieSummary]> {
        self.entry
            .as_ref()
            .filter(|(built_at, _)| built_at.elapsed() < self.ttl)
            .map(|(_, movies)| movies.as_slice())
    }

    pub fn store(&mut self, movies: Vec<MovieSummary>) {
        self.entry = Some((Instant::now(), movies));
    }
}

impl Default for ShowcaseCache {
    fn default() -> Self {
        Self::new(DEFAULT_SHOWCASE_TTL)
    }
}
