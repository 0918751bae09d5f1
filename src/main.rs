use std::fmt::Write as _;
use std::sync::Arc;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use cinescope::app::{project, Content, Message, Session, View, ViewState};
use cinescope::config::Config;
use cinescope::models::{FilterField, Movie, GENRES};
use cinescope::services::{HttpMovieApi, Key};

const HELP: &str = "\
type text to edit the query (empty line resets)
:up :down :enter      move through suggestions / submit
:pick N               click suggestion N
:blur                 click outside the search field
:search [TITLE]       submit TITLE or the current query
:genre NAME           select a genre (All resets)
:rating X  :year N    move the filter sliders
:open N  :close       open movie N in the detail modal
:reset  :quit";

#[derive(Debug)]
enum Command {
    Send(Message),
    Open(usize),
    Help,
    Quit,
    Unknown(String),
}

fn parse_command(line: &str) -> Command {
    let Some(rest) = line.strip_prefix(':') else {
        return Command::Send(Message::QueryChanged(line.to_string()));
    };

    let (name, arg) = match rest.split_once(' ') {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest.trim(), ""),
    };
    let unknown = || Command::Unknown(line.to_string());

    match name {
        "up" => Command::Send(Message::KeyPressed(Key::ArrowUp)),
        "down" => Command::Send(Message::KeyPressed(Key::ArrowDown)),
        "enter" => Command::Send(Message::KeyPressed(Key::Enter)),
        "pick" => arg
            .parse()
            .map(|i| Command::Send(Message::SuggestionClicked(i)))
            .unwrap_or_else(|_| unknown()),
        "blur" => Command::Send(Message::OutsideClick),
        "search" if arg.is_empty() => Command::Send(Message::SubmitSearch(None)),
        "search" => Command::Send(Message::SubmitSearch(Some(arg.to_string()))),
        "genre" if !arg.is_empty() => Command::Send(Message::GenreSelected(arg.to_string())),
        "rating" => arg
            .parse()
            .map(|v| Command::Send(Message::FilterChanged(FilterField::MinRating(v))))
            .unwrap_or_else(|_| unknown()),
        "year" => arg
            .parse()
            .map(|v| Command::Send(Message::FilterChanged(FilterField::MinYear(v))))
            .unwrap_or_else(|_| unknown()),
        "open" => arg.parse().map(Command::Open).unwrap_or_else(|_| unknown()),
        "close" => Command::Send(Message::CloseMovie),
        "reset" => Command::Send(Message::Reset),
        "help" => Command::Help,
        "quit" | "q" => Command::Quit,
        _ => unknown(),
    }
}

/// Movies on screen in display order: hero first, then the grid or rows
fn visible_movies(view: &View<'_>) -> Vec<Movie> {
    let mut movies: Vec<Movie> = view.hero.into_iter().cloned().collect();
    match &view.content {
        Content::Home { rows, .. } => {
            movies.extend(rows.iter().flat_map(|row| row.movies.iter().cloned()))
        }
        Content::Results { movies: grid, .. } => movies.extend(grid.iter().cloned()),
        Content::Notice(_) => {}
    }
    movies
}

fn render(view: &View<'_>) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "search: {:?}", view.search.query);
    for (i, suggestion) in view.search.suggestions.iter().enumerate() {
        let marker = if view.search.highlighted == Some(i) { '>' } else { ' ' };
        let year = suggestion.year.map(|y| y.to_string()).unwrap_or_default();
        let _ = writeln!(out, " {} [{}] {} {}", marker, i, suggestion.title, year);
    }

    if let Some(hero) = view.hero {
        let _ = writeln!(out, "hero: {} ({}) * {:.1}", hero.title, hero.year, hero.rating);
    }

    match &view.content {
        Content::Home { loading: true, .. } => {
            let _ = writeln!(out, "Loading movies...");
        }
        Content::Home { rows, .. } => {
            for row in rows.iter() {
                let _ = writeln!(out, "[{}] {} ({} movies)", row.key, row.title, row.movies.len());
            }
        }
        Content::Results { heading, movies } => {
            let _ = writeln!(out, "{}", heading);
            for movie in movies.iter() {
                let _ = writeln!(out, "  - {} ({}) * {:.1}", movie.title, movie.year, movie.rating);
            }
        }
        Content::Notice(notice) => {
            let _ = writeln!(out, "{}\n{}\n[{}]", notice.heading, notice.detail, notice.action);
        }
    }

    if let Some(modal) = &view.modal {
        let _ = writeln!(
            out,
            "== {} ({}) ==\n{}\n{}",
            modal.movie.title,
            modal.movie.genres.join(", "),
            modal.movie.description,
            modal.image
        );
        if let Some(url) = &modal.learn_more {
            let _ = writeln!(out, "learn more: {}", url);
        }
    }

    out
}

fn open_movie(state: &ViewState, index: usize) -> Option<Message> {
    visible_movies(&project(state))
        .into_iter()
        .nth(index)
        .map(Message::OpenMovie)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;
    let api = HttpMovieApi::new(config.api_base_url.clone(), config.request_timeout())?;
    let handle = Session::start(Arc::new(api), config.settings());

    let mut view_rx = handle.subscribe();
    tokio::spawn(async move {
        let mut last = String::new();
        while view_rx.changed().await.is_ok() {
            let text = {
                let state = view_rx.borrow_and_update();
                render(&project(&state))
            };
            if text != last {
                println!("{}", text);
                last = text;
            }
        }
    });

    println!("genres: {}", GENRES.join(", "));
    println!("{}", HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_command(&line) {
            Command::Send(message) => handle.dispatch(message)?,
            Command::Open(index) => match open_movie(&handle.snapshot(), index) {
                Some(message) => handle.dispatch(message)?,
                None => println!("no movie at position {}", index),
            },
            Command::Help => println!("{}", HELP),
            Command::Quit => break,
            Command::Unknown(line) => println!("unknown command: {} (try :help)", line),
        }
    }

    handle.shutdown().await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_edits_query() {
        match parse_command("dune") {
            Command::Send(Message::QueryChanged(q)) => assert_eq!(q, "dune"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_keys_and_filters() {
        assert!(matches!(
            parse_command(":down"),
            Command::Send(Message::KeyPressed(Key::ArrowDown))
        ));
        assert!(matches!(
            parse_command(":rating 7.5"),
            Command::Send(Message::FilterChanged(FilterField::MinRating(v))) if v == 7.5
        ));
        assert!(matches!(
            parse_command(":year 1999"),
            Command::Send(Message::FilterChanged(FilterField::MinYear(1999)))
        ));
    }

    #[test]
    fn test_search_with_and_without_title() {
        assert!(matches!(
            parse_command(":search"),
            Command::Send(Message::SubmitSearch(None))
        ));
        match parse_command(":search Blade Runner") {
            Command::Send(Message::SubmitSearch(Some(title))) => assert_eq!(title, "Blade Runner"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_bad_arguments_are_unknown() {
        assert!(matches!(parse_command(":pick x"), Command::Unknown(_)));
        assert!(matches!(parse_command(":genre"), Command::Unknown(_)));
        assert!(matches!(parse_command(":nope"), Command::Unknown(_)));
    }

    #[test]
    fn test_render_landing() {
        let state = ViewState::new(cinescope::config::Settings::default());
        let text = render(&project(&state));
        assert!(text.contains("[sci-fi] Sci-Fi & Fantasy (0 movies)"));
    }
}
