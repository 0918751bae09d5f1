//! The search/discovery reducer.
//!
//! `update` takes the current state by value and returns the next state plus
//! the side effects to run. It never performs I/O; completions come back in as
//! messages tagged with the token they were issued under, and anything no
//! longer current is dropped here.

use crate::error::{AppResult, Failure};
use crate::models::{
    Category, DiscoverParams, FilterField, Movie, RecommendParams, Recommendation, Suggestion,
    ALL_GENRES,
};
use crate::services::{navigate, Debounce, Key, KeyOutcome};

use super::message::{Action, Message};
use super::state::{
    RequestClass, ResultMode, Token, ViewState, CONNECTION_FAILED, COULD_NOT_LOAD,
    NO_MOVIES_FOR_FILTER,
};

/// Next state plus the effects the session loop must run
#[derive(Debug)]
pub struct Update {
    pub state: ViewState,
    pub actions: Vec<Action>,
}

impl Update {
    fn none(state: ViewState) -> Self {
        Self {
            state,
            actions: Vec::new(),
        }
    }

    fn with(state: ViewState, action: Action) -> Self {
        Self {
            state,
            actions: vec![action],
        }
    }
}

pub fn update(state: ViewState, message: Message) -> Update {
    match message {
        Message::LoadHome => load_home(state),
        Message::QueryChanged(text) => query_changed(state, text),
        Message::DebounceElapsed { generation } => commit_query(state, generation),
        Message::KeyPressed(key) => key_pressed(state, key),
        Message::SuggestionClicked(index) => suggestion_clicked(state, index),
        Message::OutsideClick => {
            let mut state = state;
            clear_suggestions(&mut state);
            Update::none(state)
        }
        Message::SubmitSearch(title) => submit_search(state, title),
        Message::GenreSelected(genre) => select_genre(state, genre),
        Message::FilterChanged(field) => change_filter(state, field),
        Message::Reset => Update::none(reset(state)),
        Message::OpenMovie(movie) => {
            let mut state = state;
            state.selected_movie = Some(movie);
            Update::none(state)
        }
        Message::CloseMovie => {
            let mut state = state;
            state.selected_movie = None;
            Update::none(state)
        }
        Message::HomeLoaded { token, result } => home_loaded(state, token, result),
        Message::SuggestionsLoaded { token, result } => suggestions_loaded(state, token, result),
        Message::SearchCompleted {
            token,
            query,
            result,
        } => search_completed(state, token, query, result),
        Message::DiscoverCompleted {
            token,
            genre,
            result,
        } => discover_completed(state, token, genre, result),
    }
}

/// Back to the landing view with default filters.
///
/// Home rows and the modal survive; every outstanding suggestion, search
/// and discover response becomes stale.
pub fn reset(state: ViewState) -> ViewState {
    let ViewState {
        categories,
        home_loading,
        selected_movie,
        mut debouncer,
        mut requests,
        ..
    } = state;

    debouncer.cancel();
    requests.invalidate(RequestClass::Suggest);
    requests.invalidate(RequestClass::Search);
    requests.invalidate(RequestClass::Discover);

    ViewState::landing(categories, home_loading, selected_movie, debouncer, requests)
}

fn clear_suggestions(state: &mut ViewState) {
    state.suggestions.clear();
    state.show_suggestions = false;
    state.selected_index = None;
}

/// Clears suggestions and makes sure none arrive for the current input
fn dismiss_suggestions(state: &mut ViewState) {
    clear_suggestions(state);
    state.debouncer.cancel();
    state.requests.invalidate(RequestClass::Suggest);
}

fn clear_results(state: &mut ViewState) {
    state.source_movie = None;
    state.recommendations.clear();
}

fn load_home(mut state: ViewState) -> Update {
    state.home_loading = true;
    let token = state.requests.issue(RequestClass::Home);
    Update::with(state, Action::FetchHome { token })
}

fn home_loaded(
    mut state: ViewState,
    token: Token,
    result: AppResult<Vec<Category>>,
) -> Update {
    if !state.requests.is_current(RequestClass::Home, token) {
        tracing::debug!(token = %token, "Discarding stale home rows");
        return Update::none(state);
    }

    state.home_loading = false;
    match result {
        Ok(categories) if categories.is_empty() => {
            tracing::warn!("Home payload had no rows, keeping built-in rows");
        }
        Ok(categories) => state.categories = categories,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to load home rows, keeping built-in rows");
        }
    }
    Update::none(state)
}

fn query_changed(mut state: ViewState, text: String) -> Update {
    if text.is_empty() {
        return Update::none(reset(state));
    }

    state.query = text;
    clear_suggestions(&mut state);
    state.requests.invalidate(RequestClass::Suggest);

    match state.debouncer.update(&state.query) {
        Debounce::Clear => Update::none(state),
        Debounce::Schedule { generation, delay } => {
            Update::with(state, Action::ScheduleDebounce { generation, delay })
        }
    }
}

fn commit_query(mut state: ViewState, generation: u64) -> Update {
    match state.debouncer.fire(generation) {
        Some(query) => {
            let token = state.requests.issue(RequestClass::Suggest);
            tracing::debug!(query = %query, token = %token, "Fetching suggestions");
            Update::with(state, Action::FetchSuggestions { token, query })
        }
        None => Update::none(state),
    }
}

fn suggestions_loaded(
    mut state: ViewState,
    token: Token,
    result: AppResult<Vec<Suggestion>>,
) -> Update {
    if !state.requests.is_current(RequestClass::Suggest, token) {
        tracing::debug!(token = %token, "Discarding stale suggestions");
        return Update::none(state);
    }

    match result {
        Ok(suggestions) => {
            state.show_suggestions =
                !suggestions.is_empty() && state.debouncer.meets_min_len(&state.query);
            state.suggestions = suggestions;
            state.selected_index = None;
        }
        Err(e) => {
            tracing::warn!(error = %e, query = %state.query, "Suggestion fetch failed");
            clear_suggestions(&mut state);
        }
    }
    Update::none(state)
}

fn key_pressed(mut state: ViewState, key: Key) -> Update {
    let visible = state.visible_suggestions().len();

    match navigate(state.selected_index, visible, key) {
        KeyOutcome::Moved(selected) => {
            state.selected_index = selected;
            Update::none(state)
        }
        KeyOutcome::SubmitSuggestion(index) => {
            let title = state.suggestions[index].title.clone();
            submit_search(state, Some(title))
        }
        KeyOutcome::SubmitQuery => submit_search(state, None),
        KeyOutcome::Ignored => Update::none(state),
    }
}

fn suggestion_clicked(state: ViewState, index: usize) -> Update {
    let title = state
        .visible_suggestions()
        .get(index)
        .map(|suggestion| suggestion.title.clone());

    match title {
        Some(title) => submit_search(state, Some(title)),
        None => Update::none(state),
    }
}

/// Title-anchored search; a blank title is a no-op
fn submit_search(mut state: ViewState, title: Option<String>) -> Update {
    let title = title.unwrap_or_else(|| state.query.clone());
    if title.trim().is_empty() {
        return Update::none(state);
    }

    state.query = title.clone();
    dismiss_suggestions(&mut state);
    state.filter.genre = None;
    state.mode = ResultMode::Searching;

    let token = state.requests.issue(RequestClass::Search);
    let params = RecommendParams::new(title, &state.filter);
    tracing::debug!(title = %params.title, token = %token, "Submitting search");

    Update::with(state, Action::Recommend { token, params })
}

fn search_completed(
    mut state: ViewState,
    token: Token,
    query: String,
    result: AppResult<Recommendation>,
) -> Update {
    if !state.requests.is_current(RequestClass::Search, token) {
        tracing::debug!(token = %token, query = %query, "Discarding stale search response");
        return Update::none(state);
    }

    match result {
        Ok(Recommendation {
            source,
            recommendations,
        }) => {
            state.grid_title = format!("More like \"{}\"", source.title);
            state.source_movie = Some(source);
            state.recommendations = recommendations;
            state.mode = ResultMode::Loaded;
        }
        Err(e) => {
            clear_results(&mut state);
            state.mode = match e.failure() {
                Failure::NotFound => {
                    tracing::info!(query = %query, "No movie matches search");
                    ResultMode::NotFound { query }
                }
                failure => {
                    tracing::warn!(error = %e, query = %query, "Search failed");
                    ResultMode::Error {
                        failure,
                        message: CONNECTION_FAILED.to_string(),
                    }
                }
            };
        }
    }
    Update::none(state)
}

fn select_genre(state: ViewState, genre: String) -> Update {
    if genre == ALL_GENRES {
        return Update::none(reset(state));
    }
    discover(state, genre)
}

fn discover(mut state: ViewState, genre: String) -> Update {
    dismiss_suggestions(&mut state);
    state.mode = ResultMode::Searching;
    state.grid_title = format!("Top {} Movies", genre);
    state.filter.genre = Some(genre.clone());

    let token = state.requests.issue(RequestClass::Discover);
    let params = DiscoverParams::new(genre, &state.filter);
    tracing::debug!(genre = %params.genre, token = %token, "Submitting discover");

    Update::with(state, Action::Discover { token, params })
}

fn discover_completed(
    mut state: ViewState,
    token: Token,
    genre: String,
    result: AppResult<Vec<Movie>>,
) -> Update {
    if !state.requests.is_current(RequestClass::Discover, token) {
        tracing::debug!(token = %token, genre = %genre, "Discarding stale discover response");
        return Update::none(state);
    }

    match result {
        Ok(movies) if movies.is_empty() => {
            clear_results(&mut state);
            state.mode = empty_result();
        }
        Ok(movies) => {
            let mut movies = movies.into_iter();
            state.source_movie = movies.next();
            // List items come back without genre lists
            state.recommendations = movies
                .map(|mut movie| {
                    movie.genres = vec![genre.clone()];
                    movie
                })
                .collect();
            state.mode = ResultMode::Loaded;
        }
        Err(e) => {
            tracing::warn!(error = %e, genre = %genre, "Discover failed");
            clear_results(&mut state);
            state.mode = match e.failure() {
                // A genre the API has nothing for is an empty listing
                Failure::NotFound | Failure::EmptyResult => empty_result(),
                Failure::Transport => ResultMode::Error {
                    failure: Failure::Transport,
                    message: COULD_NOT_LOAD.to_string(),
                },
            };
        }
    }
    Update::none(state)
}

fn empty_result() -> ResultMode {
    ResultMode::Error {
        failure: Failure::EmptyResult,
        message: NO_MOVIES_FOR_FILTER.to_string(),
    }
}

fn change_filter(mut state: ViewState, field: FilterField) -> Update {
    state.filter.apply(field);
    match state.filter.genre.clone() {
        Some(genre) => discover(state, genre),
        None => Update::none(state),
    }
}
