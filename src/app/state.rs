use std::collections::HashMap;
use std::fmt::Display;

use crate::config::Settings;
use crate::error::Failure;
use crate::models::{Category, Filter, Movie, Suggestion};
use crate::services::Debouncer;

pub const CONNECTION_FAILED: &str = "Connection failed.";
pub const COULD_NOT_LOAD: &str = "Could not load movies.";
pub const NO_MOVIES_FOR_FILTER: &str = "No movies found for this filter.";

/// Exclusive phase of the search/discovery panel
#[derive(Debug, Clone, PartialEq)]
pub enum ResultMode {
    Idle,
    Searching,
    Loaded,
    /// Title lookup missed; keeps the query that was submitted
    NotFound { query: String },
    Error { failure: Failure, message: String },
}

/// Kinds of outgoing request, each with its own staleness tracking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestClass {
    Home,
    Suggest,
    Search,
    Discover,
}

impl RequestClass {
    /// Search and discover both write the result panel
    fn writes_results(self) -> bool {
        matches!(self, RequestClass::Search | RequestClass::Discover)
    }
}

/// Request generation token
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Token(u64);

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Issues monotonically increasing tokens and remembers the newest one per class.
///
/// Search and discover share the result panel, so only the newest of the two
/// classes may land; a search issued after a discover makes the discover stale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestTracker {
    issued: u64,
    latest: HashMap<RequestClass, Token>,
    results_owner: Option<RequestClass>,
}

impl RequestTracker {
    pub fn issue(&mut self, class: RequestClass) -> Token {
        self.issued += 1;
        let token = Token(self.issued);
        self.latest.insert(class, token);
        if class.writes_results() {
            self.results_owner = Some(class);
        }
        token
    }

    /// True when a response tagged `token` may still be applied
    pub fn is_current(&self, class: RequestClass, token: Token) -> bool {
        if self.latest.get(&class) != Some(&token) {
            return false;
        }
        !class.writes_results() || self.results_owner == Some(class)
    }

    /// Makes every outstanding request of `class` stale
    pub fn invalidate(&mut self, class: RequestClass) {
        self.latest.remove(&class);
        if self.results_owner == Some(class) {
            self.results_owner = None;
        }
    }

    /// Number of tokens handed out so far
    pub fn issued(&self) -> u64 {
        self.issued
    }
}

/// Snapshot of everything the search/discovery UI renders
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub mode: ResultMode,
    pub query: String,
    pub filter: Filter,
    pub suggestions: Vec<Suggestion>,
    pub show_suggestions: bool,
    /// Keyboard highlight over the visible suggestions
    pub selected_index: Option<usize>,
    pub source_movie: Option<Movie>,
    pub recommendations: Vec<Movie>,
    pub grid_title: String,
    pub categories: Vec<Category>,
    pub home_loading: bool,
    /// Movie open in the detail modal
    pub selected_movie: Option<Movie>,
    pub(crate) debouncer: Debouncer,
    pub(crate) requests: RequestTracker,
}

impl ViewState {
    pub fn new(settings: Settings) -> Self {
        Self::landing(
            Category::skeleton(),
            false,
            None,
            Debouncer::new(settings.debounce, settings.min_query_len),
            RequestTracker::default(),
        )
    }

    /// Default search/discovery state around the parts that outlive a reset
    pub(crate) fn landing(
        categories: Vec<Category>,
        home_loading: bool,
        selected_movie: Option<Movie>,
        debouncer: Debouncer,
        requests: RequestTracker,
    ) -> Self {
        Self {
            mode: ResultMode::Idle,
            query: String::new(),
            filter: Filter::default(),
            suggestions: Vec::new(),
            show_suggestions: false,
            selected_index: None,
            source_movie: None,
            recommendations: Vec::new(),
            grid_title: String::new(),
            categories,
            home_loading,
            selected_movie,
            debouncer,
            requests,
        }
    }

    /// False while the landing view is shown
    pub fn has_searched(&self) -> bool {
        self.mode != ResultMode::Idle
    }

    pub fn is_loading(&self) -> bool {
        self.mode == ResultMode::Searching
    }

    /// Suggestions the dropdown currently shows
    pub fn visible_suggestions(&self) -> &[Suggestion] {
        if self.show_suggestions {
            &self.suggestions
        } else {
            &[]
        }
    }

    pub fn requests(&self) -> &RequestTracker {
        &self.requests
    }
}
