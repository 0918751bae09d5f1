//! Projection of `ViewState` into what the rendering layer draws.

use reqwest::Url;

use crate::error::Failure;
use crate::models::{Category, Movie, Suggestion};

use super::state::{ResultMode, ViewState};

const THINKING: &str = "Thinking...";
const DEFAULT_RESULTS_TITLE: &str = "Search Results";
const NOT_FOUND_HEADING: &str = "Movie Not Found";
pub const BACK_HOME: &str = "Go Back Home";

/// Dropdown under the search field
#[derive(Debug, Clone, PartialEq)]
pub struct SearchBox<'a> {
    pub query: &'a str,
    pub suggestions: &'a [Suggestion],
    pub highlighted: Option<usize>,
}

/// Full-panel message with a single "return to home" action
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub heading: &'static str,
    pub detail: String,
    pub action: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Content<'a> {
    /// Landing view: category rows
    Home {
        rows: &'a [Category],
        loading: bool,
    },
    /// Result grid under the hero
    Results {
        heading: String,
        movies: &'a [Movie],
    },
    Notice(Notice),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Modal<'a> {
    pub movie: &'a Movie,
    pub image: &'a str,
    pub learn_more: Option<Url>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct View<'a> {
    pub search: SearchBox<'a>,
    pub hero: Option<&'a Movie>,
    pub content: Content<'a>,
    pub modal: Option<Modal<'a>>,
}

pub fn project(state: &ViewState) -> View<'_> {
    let search = SearchBox {
        query: &state.query,
        suggestions: state.visible_suggestions(),
        highlighted: state.selected_index,
    };

    let (hero, content) = match &state.mode {
        ResultMode::Idle => (
            state.categories.iter().find_map(|row| row.movies.first()),
            Content::Home {
                rows: &state.categories,
                loading: state.home_loading,
            },
        ),
        ResultMode::Searching | ResultMode::Loaded => {
            let heading = if state.is_loading() {
                THINKING.to_string()
            } else if state.grid_title.is_empty() {
                DEFAULT_RESULTS_TITLE.to_string()
            } else {
                state.grid_title.clone()
            };
            (
                state.source_movie.as_ref(),
                Content::Results {
                    heading,
                    movies: &state.recommendations,
                },
            )
        }
        ResultMode::NotFound { query } => (None, Content::Notice(not_found(query))),
        ResultMode::Error { failure, message } => {
            (None, Content::Notice(failed(*failure, message)))
        }
    };

    let modal = state.selected_movie.as_ref().map(|movie| Modal {
        movie,
        image: movie.banner(),
        learn_more: movie.learn_more_url().ok(),
    });

    View {
        search,
        hero,
        content,
        modal,
    }
}

fn not_found(query: &str) -> Notice {
    Notice {
        heading: NOT_FOUND_HEADING,
        detail: format!(
            "We couldn't find anything for \"{}\". Try checking the spelling or searching for another title.",
            query
        ),
        action: BACK_HOME,
    }
}

fn failed(failure: Failure, message: &str) -> Notice {
    let heading = match failure {
        Failure::NotFound => NOT_FOUND_HEADING,
        Failure::EmptyResult => "No Movies Found",
        Failure::Transport => "Something Went Wrong",
    };
    Notice {
        heading,
        detail: message.to_string(),
        action: BACK_HOME,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::NO_MOVIES_FOR_FILTER;
    use crate::config::Settings;
    use crate::models::CategoryKey;

    fn movie(id: u64, title: &str) -> Movie {
        Movie {
            id,
            title: title.to_string(),
            rating: 8.0,
            year: 2010,
            poster: "poster.jpg".to_string(),
            backdrop: "backdrop.jpg".to_string(),
            genres: vec![],
            description: "desc".to_string(),
        }
    }

    #[test]
    fn test_landing_view_leads_with_first_row_movie() {
        let mut state = ViewState::new(Settings::default());
        state.categories = vec![
            Category {
                key: CategoryKey::SciFi,
                title: "Sci-Fi & Fantasy".to_string(),
                movies: vec![],
            },
            Category {
                key: CategoryKey::TopRated,
                title: "Top Rated Gems".to_string(),
                movies: vec![movie(1, "Inception")],
            },
        ];

        let view = project(&state);
        assert_eq!(view.hero.map(|m| m.id), Some(1));
        assert!(matches!(view.content, Content::Home { rows, loading: false } if rows.len() == 2));
    }

    #[test]
    fn test_searching_heading() {
        let mut state = ViewState::new(Settings::default());
        state.mode = ResultMode::Searching;
        state.grid_title = "Top Comedy Movies".to_string();

        let view = project(&state);
        assert!(matches!(view.content, Content::Results { ref heading, .. } if heading == "Thinking..."));
    }

    #[test]
    fn test_loaded_heading_and_hero() {
        let mut state = ViewState::new(Settings::default());
        state.mode = ResultMode::Loaded;
        state.source_movie = Some(movie(2, "Dune: Part Two"));
        state.grid_title = "More like \"Dune: Part Two\"".to_string();

        let view = project(&state);
        assert_eq!(view.hero.map(|m| m.title.as_str()), Some("Dune: Part Two"));
        assert!(matches!(
            view.content,
            Content::Results { ref heading, .. } if heading == "More like \"Dune: Part Two\""
        ));
    }

    #[test]
    fn test_loaded_without_title_uses_default_heading() {
        let mut state = ViewState::new(Settings::default());
        state.mode = ResultMode::Loaded;

        let view = project(&state);
        assert!(matches!(view.content, Content::Results { ref heading, .. } if heading == "Search Results"));
    }

    #[test]
    fn test_not_found_notice_quotes_query() {
        let mut state = ViewState::new(Settings::default());
        state.mode = ResultMode::NotFound {
            query: "Zzzznotreal".to_string(),
        };

        match project(&state).content {
            Content::Notice(notice) => {
                assert_eq!(notice.heading, "Movie Not Found");
                assert!(notice.detail.contains("\"Zzzznotreal\""));
                assert_eq!(notice.action, BACK_HOME);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_failure_notices_are_distinct() {
        let mut state = ViewState::new(Settings::default());
        state.mode = ResultMode::Error {
            failure: Failure::EmptyResult,
            message: NO_MOVIES_FOR_FILTER.to_string(),
        };
        let empty = match project(&state).content {
            Content::Notice(notice) => notice,
            other => panic!("unexpected {:?}", other),
        };

        state.mode = ResultMode::Error {
            failure: Failure::Transport,
            message: "Connection failed.".to_string(),
        };
        let transport = match project(&state).content {
            Content::Notice(notice) => notice,
            other => panic!("unexpected {:?}", other),
        };

        assert_ne!(empty.heading, transport.heading);
        assert_eq!(empty.detail, NO_MOVIES_FOR_FILTER);
    }

    #[test]
    fn test_modal_uses_banner_and_link() {
        let mut state = ViewState::new(Settings::default());
        state.selected_movie = Some(movie(3, "Heat"));

        let view = project(&state);
        let modal = view.modal.expect("modal open");
        assert_eq!(modal.image, "backdrop.jpg");
        assert!(modal.learn_more.is_some());
    }
}
