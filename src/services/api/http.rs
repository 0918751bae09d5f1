/// HTTP client for the recommendation API
///
/// Every payload is parsed into the typed schemas in `models` at this
/// boundary. List endpoints skip (and log) individual malformed records; a
/// malformed recommend source fails the whole request.
use std::time::Duration;

use reqwest::{Client as HttpClient, Response, StatusCode};
use serde::Serialize;
use tracing::instrument;

use crate::{
    error::{AppError, AppResult},
    models::{
        decode_items, ApiMovie, ApiRecommendation, ApiSuggestion, Category, DiscoverParams,
        HomePayload, Movie, RecommendParams, Recommendation, Suggestion,
    },
    services::api::MovieApi,
};

#[derive(Clone)]
pub struct HttpMovieApi {
    http_client: HttpClient,
    api_url: String,
}

impl HttpMovieApi {
    /// Creates a client rooted at `api_url` (e.g. `http://localhost:8000/api`)
    pub fn new(api_url: impl Into<String>, timeout: Duration) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;
        let api_url = api_url.into().trim_end_matches('/').to_string();

        tracing::info!(api_url = %api_url, "Recommendation API client ready");

        Ok(Self {
            http_client,
            api_url,
        })
    }

    /// Issues a GET and maps non-success statuses onto `AppError`
    async fn get<Q: Serialize + ?Sized>(&self, path: &str, query: &Q) -> AppResult<Response> {
        let url = format!("{}/{}", self.api_url, path);

        let response = self.http_client.get(&url).query(query).send().await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::NotFound(body));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "Recommendation API returned status {}: {}",
                status, body
            )));
        }

        Ok(response)
    }
}

#[async_trait::async_trait]
impl MovieApi for HttpMovieApi {
    #[instrument(skip(self))]
    async fn home(&self) -> AppResult<Vec<Category>> {
        let response = self.get("home", &[] as &[(&str, &str)]).await?;
        let payload: HomePayload = response.json().await?;

        let categories: Vec<Category> = payload
            .into_rows()
            .into_iter()
            .enumerate()
            .map(|(position, row)| {
                let (key, title) = Category::identify(
                    position,
                    row.key.as_deref(),
                    row.id.as_deref(),
                    &row.title,
                );
                Category {
                    key,
                    title,
                    movies: decode_items::<ApiMovie, Movie>(row.movies, "home movie"),
                }
            })
            .collect();

        tracing::info!(rows = categories.len(), "Home rows loaded");

        Ok(categories)
    }

    #[instrument(skip(self))]
    async fn search(&self, query: &str) -> AppResult<Vec<Suggestion>> {
        if query.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Search query cannot be empty".to_string(),
            ));
        }

        let response = self.get("search", &[("query", query)]).await?;
        let values: Vec<serde_json::Value> = response.json().await?;
        let suggestions = decode_items::<ApiSuggestion, Suggestion>(values, "suggestion");

        tracing::debug!(
            query = %query,
            results = suggestions.len(),
            "Suggestion search completed"
        );

        Ok(suggestions)
    }

    #[instrument(skip(self, params), fields(genre = %params.genre))]
    async fn discover(&self, params: &DiscoverParams) -> AppResult<Vec<Movie>> {
        let response = self.get("discover", params).await?;
        let values: Vec<serde_json::Value> = response.json().await?;
        let movies = decode_items::<ApiMovie, Movie>(values, "discover movie");

        tracing::info!(
            genre = %params.genre,
            min_year = params.min_year,
            min_rating = params.min_rating,
            results = movies.len(),
            "Discover completed"
        );

        Ok(movies)
    }

    #[instrument(skip(self, params), fields(title = %params.title))]
    async fn recommend(&self, params: &RecommendParams) -> AppResult<Recommendation> {
        let response = self.get("recommend", params).await.map_err(|e| match e {
            AppError::NotFound(_) => AppError::NotFound(format!("No movie matches {:?}", params.title)),
            other => other,
        })?;

        let body: ApiRecommendation = response.json().await?;
        let source = Movie::try_from(body.source)?;
        let recommendations = decode_items::<ApiMovie, Movie>(body.recommendations, "recommendation");

        tracing::info!(
            title = %params.title,
            source = %source.title,
            results = recommendations.len(),
            "Recommend completed"
        );

        Ok(Recommendation {
            source,
            recommendations,
        })
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_url_trailing_slash_trimmed() {
        let api = HttpMovieApi::new("http://localhost:8000/api/", Duration::from_secs(1)).unwrap();
        assert_eq!(api.api_url, "http://localhost:8000/api");
        assert_eq!(api.name(), "http");
    }

    #[tokio::test]
    async fn test_blank_search_rejected_without_network() {
        let api = HttpMovieApi::new("http://127.0.0.1:9", Duration::from_secs(1)).unwrap();
        let result = api.search("   ").await;
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }
}
