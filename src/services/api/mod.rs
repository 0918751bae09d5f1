/// Recommendation API client abstraction
///
/// The orchestrator talks to the movie backend only through this trait, so the
/// session loop can run against the real HTTP client or a test double.
use crate::{
    error::AppResult,
    models::{Category, DiscoverParams, Movie, RecommendParams, Recommendation, Suggestion},
};

pub mod http;

pub use http::HttpMovieApi;

/// Client for the four endpoints of the recommendation API
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MovieApi: Send + Sync {
    /// Category rows for the default landing view (`/api/home`)
    async fn home(&self) -> AppResult<Vec<Category>>;

    /// Title suggestions for a partial query (`/api/search`)
    async fn search(&self, query: &str) -> AppResult<Vec<Suggestion>>;

    /// Genre-filtered listing (`/api/discover`); the first entry is the anchor
    async fn discover(&self, params: &DiscoverParams) -> AppResult<Vec<Movie>>;

    /// Title-anchored recommendations (`/api/recommend`)
    ///
    /// Returns `AppError::NotFound` when the API has no movie matching the title.
    async fn recommend(&self, params: &RecommendParams) -> AppResult<Recommendation>;

    /// Client name for logging and debugging
    fn name(&self) -> &'static str;
}
