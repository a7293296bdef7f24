use serde::{Deserialize, Serialize};

use super::error::CatalogError;
use super::utils::{deserialize_not_available, deserialize_total_results};

/// One search hit as shown on a poster card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieSummary {
    pub id: String,
    pub title: String,
    pub year: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
    pub media_type: String,
}

impl MovieSummary {
    pub fn has_poster(&self) -> bool {
        self.poster.is_some()
    }
}

/// Full record for a single title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieDetails {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rated: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub released: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub director: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub writer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actors: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plot: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub awards: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metascore: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imdb_rating: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imdb_votes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dvd: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub box_office: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub production: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default)]
    pub ratings: Vec<SourceRating>,
}

impl MovieDetails {
    /// Splits the provider's comma-joined genre string.
    pub fn genres(&self) -> Vec<&str> {
        self.genre
            .as_deref()
            .map(|joined| {
                joined
                    .split(',')
                    .map(|s| s.trim())
                    .filter(|value| !value.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRating {
    pub source: String,
    pub value: String,
}

/// One provider page of search hits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchPage {
    pub results: Vec<MovieSummary>,
    pub total_available: u32,
}

pub type SearchResponse = Result<SearchPage, CatalogError>;
pub type DetailResponse = Result<MovieDetails, CatalogError>;

// Provider wire format. OMDb answers every request with HTTP 200 and signals
// "nothing found" through `Response: "False"` plus an `Error` message.

#[derive(Debug, Deserialize)]
pub(crate) struct OmdbSearchEnvelope {
    #[serde(rename = "Response")]
    pub response: String,
    #[serde(rename = "Search", default)]
    pub search: Vec<OmdbSearchItem>,
    #[serde(
        rename = "totalResults",
        default,
        deserialize_with = "deserialize_total_results"
    )]
    pub total_results: u32,
    #[serde(rename = "Error", default)]
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OmdbSearchItem {
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Year", default)]
    pub year: String,
    #[serde(rename = "Poster", default, deserialize_with = "deserialize_not_available")]
    pub poster: Option<String>,
    #[serde(rename = "Type", default)]
    pub media_type: String,
}

impl From<OmdbSearchItem> for MovieSummary {
    fn from(item: OmdbSearchItem) -> Self {
        Self {
            id: item.imdb_id,
            title: item.title,
            year: item.year,
            poster: item.poster,
            media_type: item.media_type,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct OmdbDetails {
    #[serde(rename = "Response")]
    pub response: String,
    #[serde(rename = "Error", default)]
    pub error: Option<String>,
    #[serde(rename = "imdbID", default)]
    pub imdb_id: String,
    #[serde(rename = "Title", default)]
    pub title: String,
    #[serde(rename = "Year", default, deserialize_with = "deserialize_not_available")]
    pub year: Option<String>,
    #[serde(rename = "Poster", default, deserialize_with = "deserialize_not_available")]
    pub poster: Option<String>,
    #[serde(rename = "Type", default, deserialize_with = "deserialize_not_available")]
    pub media_type: Option<String>,
    #[serde(rename = "Rated", default, deserialize_with = "deserialize_not_available")]
    pub rated: Option<String>,
    #[serde(rename = "Released", default, deserialize_with = "deserialize_not_available")]
    pub released: Option<String>,
    #[serde(rename = "Runtime", default, deserialize_with = "deserialize_not_available")]
    pub runtime: Option<String>,
    #[serde(rename = "Genre", default, deserialize_with = "deserialize_not_available")]
    pub genre: Option<String>,
    #[serde(rename = "Director", default, deserialize_with = "deserialize_not_available")]
    pub director: Option<String>,
    #[serde(rename = "Writer", default, deserialize_with = "deserialize_not_available")]
    pub writer: Option<String>,
    #[serde(rename = "Actors", default, deserialize_with = "deserialize_not_available")]
    pub actors: Option<String>,
    #[serde(rename = "Plot", default, deserialize_with = "deserialize_not_available")]
    pub plot: Option<String>,
    #[serde(rename = "Language", default, deserialize_with = "deserialize_not_available")]
    pub language: Option<String>,
    #[serde(rename = "Country", default, deserialize_with = "deserialize_not_available")]
    pub country: Option<String>,
    #[serde(rename = "Awards", default, deserialize_with = "deserialize_not_available")]
    pub awards: Option<String>,
    #[serde(rename = "Metascore", default, deserialize_with = "deserialize_not_available")]
    pub metascore: Option<String>,
    #[serde(rename = "imdbRating", default, deserialize_with = "deserialize_not_available")]
    pub imdb_rating: Option<String>,
    #[serde(rename = "imdbVotes", default, deserialize_with = "deserialize_not_available")]
    pub imdb_votes: Option<String>,
    #[serde(rename = "DVD", default, deserialize_with = "deserialize_not_available")]
    pub dvd: Option<String>,
    #[serde(rename = "BoxOffice", default, deserialize_with = "deserialize_not_available")]
    pub box_office: Option<String>,
    #[serde(rename = "Production", default, deserialize_with = "deserialize_not_available")]
    pub production: Option<String>,
    #[serde(rename = "Website", default, deserialize_with = "deserialize_not_available")]
    pub website: Option<String>,
    #[serde(rename = "Ratings", default)]
    pub ratings: Vec<OmdbRating>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OmdbRating {
    #[serde(rename = "Source")]
    pub source: String,
    #[serde(rename = "Value")]
    pub value: String,
}

impl From<OmdbDetails> for MovieDetails {
    fn from(raw: OmdbDetails) -> Self {
        Self {
            id: raw.imdb_id,
            title: raw.title,
            year: raw.year,
            poster: raw.poster,
            media_type: raw.media_type,
            rated: raw.rated,
            released: raw.released,
            runtime: raw.runtime,
            genre: raw.genre,
            director: raw.director,
            writer: raw.writer,
            actors: raw.actors,
            plot: raw.plot,
            language: raw.language,
            country: raw.country,
            awards: raw.awards,
            metascore: raw.metascore,
            imdb_rating: raw.imdb_rating,
            imdb_votes: raw.imdb_votes,
            dvd: raw.dvd,
            box_office: raw.box_office,
            production: raw.production,
            website: raw.website,
            ratings: raw
                .ratings
                .into_iter()
                .map(|rating| SourceRating {
                    source: rating.source,
                    value: rating.value,
                })
                .collect(),
        }
    }
}

pub(crate) fn is_provider_success(flag: &str) -> bool {
    flag.eq_ignore_ascii_case("true")
}
