use std::env;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use anyhow::Context;

use crate::api::Theme;

/// Key used when `OMDB_API_KEY` is not set.
pub const FALLBACK_API_KEY: &str = "3ba02a38";
pub const DEFAULT_BASE_URL: &str = "https://www.omdbapi.com/";

/// Seeds used to assemble the showcase shown before the first search.
pub const DEFAULT_SHOWCASE_SEEDS: &[&str] = &[
    "Inception",
    "Interstellar",
    "Avatar",
    "Gladiator",
    "Matrix",
    "Joker",
    "Titanic",
    "Shutter Island",
    "Parasite",
];

/// Application configuration driven by environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_key: String,
    pub base_url: String,
    pub bind_addr: SocketAddr,
    pub request_timeout: Duration,
    pub debounce: Duration,
    pub showcase_seeds: Vec<String>,
    pub showcase_size: usize,
    pub showcase_ttl: Duration,
    pub search_ttl: Duration,
    pub theme: Theme,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let api_key = env::var("OMDB_API_KEY")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| FALLBACK_API_KEY.to_string());

        let base_url =
            env::var("OMDB_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let bind_addr: SocketAddr = env::var("OMDB_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:3000".to_string())
            .parse()
            .context("parsing OMDB_BIND_ADDR")?;

        let request_timeout = Duration::from_millis(parse_var("OMDB_REQUEST_TIMEOUT_MS", 10_000)?);
        let debounce = Duration::from_millis(parse_var("OMDB_DEBOUNCE_MS", 400)?);

        let showcase_seeds = env::var("OMDB_SHOWCASE_SEEDS")
            .map(|raw| {
                raw.split(',')
                    .map(|s| s.trim())
                    .filter(|value| !value.is_empty())
                    .map(String::from)
                    .collect::<Vec<String>>()
            })
            .unwrap_or_else(|_| {
                DEFAULT_SHOWCASE_SEEDS
                    .iter()
                    .map(|seed| seed.to_string())
                    .collect()
            });

        let showcase_size = parse_var("OMDB_SHOWCASE_SIZE", 9)?;
        let showcase_ttl = Duration::from_secs(parse_var("OMDB_SHOWCASE_TTL_SECS", 600)?);
        let search_ttl = Duration::from_secs(parse_var("OMDB_SEARCH_TTL_SECS", 300)?);
        let theme = parse_var("OMDB_THEME", Theme::Light)?;

        Ok(Self {
            api_key,
            base_url,
            bind_addr,
            request_timeout,
            debounce,
            showcase_seeds,
            showcase_size,
            showcase_ttl,
            search_ttl,
            theme,
        })
    }
}

fn parse_var<T>(name: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("parsing {name}={raw:?}")),
        Err(_) => Ok(default),
    }
}
