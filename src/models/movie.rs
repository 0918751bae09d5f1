use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

pub const NO_DESCRIPTION: &str = "No description available for this movie.";

/// A movie as rendered by cards, the hero banner and the detail modal
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    /// TMDB identifier
    pub id: u64,
    pub title: String,
    /// Average vote, 0-10
    pub rating: f64,
    pub year: i32,
    pub poster: String,
    pub backdrop: String,
    pub genres: Vec<String>,
    pub description: String,
}

impl Movie {
    /// Image for wide layouts; the backdrop falls back to the poster
    pub fn banner(&self) -> &str {
        if self.backdrop.is_empty() {
            &self.poster
        } else {
            &self.backdrop
        }
    }

    /// External "learn more" link opened from the detail modal
    pub fn learn_more_url(&self) -> AppResult<Url> {
        Url::parse_with_params(
            "https://www.google.com/search",
            &[("q", format!("{} movie", self.title))],
        )
        .map_err(|e| AppError::Internal(format!("Invalid learn-more URL: {}", e)))
    }
}

/// A title suggestion shown under the search field
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Suggestion {
    pub id: Option<u64>,
    pub title: String,
    pub year: Option<i32>,
}

/// Anchor movie plus related titles returned by a recommend request
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub source: Movie,
    pub recommendations: Vec<Movie>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(backdrop: &str) -> Movie {
        Movie {
            id: 438631,
            title: "Dune".to_string(),
            rating: 7.8,
            year: 2021,
            poster: "https://image.tmdb.org/t/p/w500/dune.jpg".to_string(),
            backdrop: backdrop.to_string(),
            genres: vec!["Science Fiction".to_string()],
            description: "Paul Atreides arrives on Arrakis.".to_string(),
        }
    }

    #[test]
    fn test_banner_prefers_backdrop() {
        let m = movie("https://image.tmdb.org/t/p/original/dune.jpg");
        assert_eq!(m.banner(), "https://image.tmdb.org/t/p/original/dune.jpg");
    }

    #[test]
    fn test_banner_falls_back_to_poster() {
        let m = movie("");
        assert_eq!(m.banner(), m.poster);
    }

    #[test]
    fn test_learn_more_url_encodes_title() {
        let mut m = movie("");
        m.title = "Dune: Part Two".to_string();
        let url = m.learn_more_url().unwrap();

        assert_eq!(url.host_str(), Some("www.google.com"));
        let q: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(q, vec![("q".to_string(), "Dune: Part Two movie".to_string())]);
    }
}
