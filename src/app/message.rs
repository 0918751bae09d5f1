use std::time::Duration;

use crate::error::AppResult;
use crate::models::{
    Category, DiscoverParams, FilterField, Movie, RecommendParams, Recommendation, Suggestion,
};
use crate::services::Key;

use super::state::Token;

/// Everything that can happen to the search/discovery UI
#[derive(Debug)]
pub enum Message {
    // Input
    LoadHome,
    QueryChanged(String),
    KeyPressed(Key),
    SuggestionClicked(usize),
    /// Focus left the search field
    OutsideClick,
    /// Submit `title`, or the current query when `None`
    SubmitSearch(Option<String>),
    GenreSelected(String),
    FilterChanged(FilterField),
    Reset,
    OpenMovie(Movie),
    CloseMovie,

    // Timers
    DebounceElapsed { generation: u64 },

    // Request completions
    HomeLoaded {
        token: Token,
        result: AppResult<Vec<Category>>,
    },
    SuggestionsLoaded {
        token: Token,
        result: AppResult<Vec<Suggestion>>,
    },
    SearchCompleted {
        token: Token,
        query: String,
        result: AppResult<Recommendation>,
    },
    DiscoverCompleted {
        token: Token,
        genre: String,
        result: AppResult<Vec<Movie>>,
    },
}

/// Side effects requested by the reducer, executed by the session loop
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    ScheduleDebounce { generation: u64, delay: Duration },
    FetchHome { token: Token },
    FetchSuggestions { token: Token, query: String },
    Recommend { token: Token, params: RecommendParams },
    Discover { token: Token, params: DiscoverParams },
}
