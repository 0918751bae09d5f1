use serde::Deserialize;

use crate::error::AppError;

pub mod category;
pub mod filter;
pub mod movie;

pub use category::{Category, CategoryKey};
pub use filter::{DiscoverParams, Filter, FilterField, RecommendParams, ALL_GENRES, GENRES};
pub use movie::{Movie, Recommendation, Suggestion, NO_DESCRIPTION};

// ============================================================================
// Recommendation API Types
// ============================================================================

/// Raw movie record as emitted by `/api/discover`, `/api/recommend` and the
/// home rows.
///
/// The API emits both `id`/`tmdbId` and `poster`/`poster_url` spellings
/// depending on the endpoint, so every field is optional here and validated
/// on conversion.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiMovie {
    #[serde(default, rename = "tmdbId")]
    pub tmdb_id: Option<u64>,
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub poster_url: Option<String>,
    #[serde(default)]
    pub poster: Option<String>,
    #[serde(default)]
    pub backdrop_url: Option<String>,
    #[serde(default)]
    pub backdrop: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl TryFrom<ApiMovie> for Movie {
    type Error = AppError;

    fn try_from(api: ApiMovie) -> Result<Self, Self::Error> {
        let id = api
            .tmdb_id
            .or(api.id)
            .ok_or_else(|| AppError::MalformedPayload("movie record without id".to_string()))?;

        let title = non_blank(api.title).ok_or_else(|| {
            AppError::MalformedPayload(format!("movie record {} without title", id))
        })?;

        let poster = non_blank(api.poster_url.or(api.poster)).unwrap_or_default();
        let backdrop = non_blank(api.backdrop_url.or(api.backdrop)).unwrap_or_else(|| poster.clone());
        let description =
            non_blank(api.description).unwrap_or_else(|| NO_DESCRIPTION.to_string());

        Ok(Movie {
            id,
            title,
            rating: api.rating.unwrap_or_default(),
            year: api.year.unwrap_or_default(),
            poster,
            backdrop,
            genres: api.genres,
            description,
        })
    }
}

/// Suggestion record from `/api/search`
#[derive(Debug, Clone, Deserialize)]
pub struct ApiSuggestion {
    #[serde(default, rename = "tmdbId")]
    pub tmdb_id: Option<u64>,
    pub title: String,
    #[serde(default)]
    pub year: Option<i32>,
}

impl TryFrom<ApiSuggestion> for Suggestion {
    type Error = AppError;

    fn try_from(api: ApiSuggestion) -> Result<Self, Self::Error> {
        let title = non_blank(Some(api.title))
            .ok_or_else(|| AppError::MalformedPayload("suggestion without title".to_string()))?;

        Ok(Suggestion {
            id: api.tmdb_id,
            title,
            year: api.year,
        })
    }
}

/// Body of a successful `/api/recommend` response
#[derive(Debug, Clone, Deserialize)]
pub struct ApiRecommendation {
    pub source: ApiMovie,
    #[serde(default)]
    pub recommendations: Vec<serde_json::Value>,
}

/// One row of the `/api/home` payload
#[derive(Debug, Clone, Deserialize)]
pub struct ApiCategory {
    /// Stable category key, when the server supplies one
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub movies: Vec<serde_json::Value>,
}

/// `/api/home` answers either with the rows directly or wrapped in `data`
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum HomePayload {
    Rows(Vec<ApiCategory>),
    Wrapped { data: Vec<ApiCategory> },
}

impl HomePayload {
    pub fn into_rows(self) -> Vec<ApiCategory> {
        match self {
            HomePayload::Rows(rows) => rows,
            HomePayload::Wrapped { data } => data,
        }
    }
}

/// Decodes a list of records one by one, dropping and logging the malformed ones
pub fn decode_items<A, T>(values: Vec<serde_json::Value>, what: &'static str) -> Vec<T>
where
    A: serde::de::DeserializeOwned,
    T: TryFrom<A, Error = AppError>,
{
    values
        .into_iter()
        .filter_map(|value| {
            let decoded = serde_json::from_value::<A>(value)
                .map_err(|e| AppError::MalformedPayload(e.to_string()))
                .and_then(<T as TryFrom<A>>::try_from);
            match decoded {
                Ok(item) => Some(item),
                Err(e) => {
                    tracing::warn!(error = %e, record = what, "Skipping malformed record");
                    None
                }
            }
        })
        .collect()
}
