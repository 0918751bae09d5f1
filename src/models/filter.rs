use serde::Serialize;

/// Genre sentinel that means "no genre filter"
pub const ALL_GENRES: &str = "All";

/// Genres offered by the filter sidebar
pub const GENRES: [&str; 12] = [
    "Action",
    "Adventure",
    "Animation",
    "Comedy",
    "Crime",
    "Drama",
    "Fantasy",
    "Mystery",
    "Romance",
    "Sci-Fi",
    "Thriller",
    "War",
];

pub const MIN_RATING: f64 = 0.0;
pub const MAX_RATING: f64 = 10.0;
const RATING_STEP: f64 = 0.5;

pub const MIN_YEAR: i32 = 1950;
pub const MAX_YEAR: i32 = 2026;

/// Sidebar filter state
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub genre: Option<String>,
    pub min_rating: f64,
    pub min_year: i32,
}

impl Default for Filter {
    fn default() -> Self {
        Self {
            genre: None,
            min_rating: MIN_RATING,
            min_year: MIN_YEAR,
        }
    }
}

/// A single slider change
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FilterField {
    MinRating(f64),
    MinYear(i32),
}

impl Filter {
    /// Applies a slider change, snapping the value onto the slider's range
    pub fn apply(&mut self, field: FilterField) {
        match field {
            FilterField::MinRating(value) => {
                let value = if value.is_finite() { value } else { MIN_RATING };
                let snapped = (value / RATING_STEP).round() * RATING_STEP;
                self.min_rating = snapped.clamp(MIN_RATING, MAX_RATING);
            }
            FilterField::MinYear(value) => {
                self.min_year = value.clamp(MIN_YEAR, MAX_YEAR);
            }
        }
    }
}

/// Query parameters for `/api/discover`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiscoverParams {
    pub genre: String,
    pub min_year: i32,
    pub min_rating: f64,
}

/// Query parameters for `/api/recommend`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendParams {
    pub title: String,
    pub min_year: i32,
    pub min_rating: f64,
}

impl DiscoverParams {
    pub fn new(genre: impl Into<String>, filter: &Filter) -> Self {
        Self {
            genre: genre.into(),
            min_year: filter.min_year,
            min_rating: filter.min_rating,
        }
    }
}

impl RecommendParams {
    pub fn new(title: impl Into<String>, filter: &Filter) -> Self {
        Self {
            title: title.into(),
            min_year: filter.min_year,
            min_rating: filter.min_rating,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let filter = Filter::default();
        assert_eq!(filter.genre, None);
        assert_eq!(filter.min_rating, 0.0);
        assert_eq!(filter.min_year, 1950);
    }

    #[test]
    fn test_rating_snaps_and_clamps() {
        let mut filter = Filter::default();

        filter.apply(FilterField::MinRating(7.3));
        assert_eq!(filter.min_rating, 7.5);

        filter.apply(FilterField::MinRating(42.0));
        assert_eq!(filter.min_rating, 10.0);

        filter.apply(FilterField::MinRating(-1.0));
        assert_eq!(filter.min_rating, 0.0);

        filter.apply(FilterField::MinRating(f64::NAN));
        assert_eq!(filter.min_rating, 0.0);
    }

    #[test]
    fn test_year_clamps() {
        let mut filter = Filter::default();

        filter.apply(FilterField::MinYear(1900));
        assert_eq!(filter.min_year, 1950);

        filter.apply(FilterField::MinYear(2031));
        assert_eq!(filter.min_year, 2026);

        filter.apply(FilterField::MinYear(1999));
        assert_eq!(filter.min_year, 1999);
    }

    #[test]
    fn test_params_carry_filter_values() {
        let filter = Filter {
            genre: Some("Comedy".to_string()),
            min_rating: 6.5,
            min_year: 2000,
        };

        let params = RecommendParams::new("Dune", &filter);
        assert_eq!(params.title, "Dune");
        assert_eq!(params.min_year, 2000);
        assert_eq!(params.min_rating, 6.5);

        let params = DiscoverParams::new("Comedy", &filter);
        assert_eq!(params.genre, "Comedy");
    }

    #[test]
    fn test_genre_catalogue_excludes_sentinel() {
        assert!(!GENRES.contains(&ALL_GENRES));
        assert!(GENRES.contains(&"Sci-Fi"));
    }
}
