use std::fmt::Display;

use serde::{Deserialize, Serialize};

use super::Movie;

/// Stable identity of a home-page row
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CategoryKey {
    TopRated,
    RomanceDrama,
    ActionAdventure,
    SciFi,
    Comedy,
    /// A row the client has no dedicated anchor for
    Other(String),
}

impl CategoryKey {
    /// Parses a server-supplied category key
    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim().to_lowercase().replace('_', "-").as_str() {
            "top-rated" => Some(CategoryKey::TopRated),
            "romance-drama" => Some(CategoryKey::RomanceDrama),
            "action-adventure" => Some(CategoryKey::ActionAdventure),
            "sci-fi" => Some(CategoryKey::SciFi),
            "comedy" => Some(CategoryKey::Comedy),
            _ => None,
        }
    }

    /// Anchor id used by the sidebar to scroll to the row
    pub fn as_str(&self) -> &str {
        match self {
            CategoryKey::TopRated => "top-rated",
            CategoryKey::RomanceDrama => "romance-drama",
            CategoryKey::ActionAdventure => "action-adventure",
            CategoryKey::SciFi => "sci-fi",
            CategoryKey::Comedy => "comedy",
            CategoryKey::Other(id) => id,
        }
    }
}

impl Display for CategoryKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A titled row of movies on the home view
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub key: CategoryKey,
    pub title: String,
    pub movies: Vec<Movie>,
}

const SCI_FI_TITLE: &str = "Sci-Fi & Fantasy";
/// Row position the legacy payload uses for the sci-fi row
const LEGACY_SCI_FI_POSITION: usize = 3;

impl Category {
    /// Resolves the identity of the row at `position` in the home payload.
    ///
    /// A recognised server `key` wins. Without one, the legacy rules apply:
    /// the fourth row is the sci-fi row, the rest are sniffed from the title.
    pub fn identify(
        position: usize,
        key: Option<&str>,
        id: Option<&str>,
        title: &str,
    ) -> (CategoryKey, String) {
        if let Some(key) = key.and_then(CategoryKey::from_key) {
            return (key, title.to_string());
        }

        if position == LEGACY_SCI_FI_POSITION {
            return (CategoryKey::SciFi, SCI_FI_TITLE.to_string());
        }

        let lower = title.to_lowercase();
        let key = if lower.contains("top rated") {
            CategoryKey::TopRated
        } else if lower.contains("romance") {
            CategoryKey::RomanceDrama
        } else if lower.contains("action") {
            CategoryKey::ActionAdventure
        } else if lower.contains("comedy") {
            CategoryKey::Comedy
        } else {
            let fallback = id
                .map(str::to_string)
                .unwrap_or_else(|| lower.replace(' ', "_"));
            CategoryKey::Other(fallback)
        };

        (key, title.to_string())
    }

    /// Empty rows shown until the home payload arrives, or if it never does
    pub fn skeleton() -> Vec<Category> {
        [
            (CategoryKey::SciFi, SCI_FI_TITLE),
            (CategoryKey::TopRated, "Top Rated Gems"),
            (CategoryKey::RomanceDrama, "Romance & Drama"),
            (CategoryKey::ActionAdventure, "Action & Adventure"),
            (CategoryKey::Comedy, "Comedy Hits"),
        ]
        .into_iter()
        .map(|(key, title)| Category {
            key,
            title: title.to_string(),
            movies: Vec::new(),
        })
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_key_is_authoritative() {
        let (key, title) = Category::identify(3, Some("comedy"), None, "Comedy Hits");
        assert_eq!(key, CategoryKey::Comedy);
        assert_eq!(title, "Comedy Hits");
    }

    #[test]
    fn test_legacy_position_forces_sci_fi() {
        let (key, title) = Category::identify(3, None, Some("sci-fi_&_fantasy"), "Science Stuff");
        assert_eq!(key, CategoryKey::SciFi);
        assert_eq!(title, "Sci-Fi & Fantasy");
    }

    #[test]
    fn test_legacy_title_sniffing() {
        let cases = [
            ("Top Rated Gems", CategoryKey::TopRated),
            ("Romance & Drama", CategoryKey::RomanceDrama),
            ("ACTION & Adventure", CategoryKey::ActionAdventure),
            ("Comedy Hits", CategoryKey::Comedy),
        ];
        for (title, expected) in cases {
            let (key, _) = Category::identify(0, None, None, title);
            assert_eq!(key, expected, "title {:?}", title);
        }
    }

    #[test]
    fn test_unknown_key_falls_back_to_legacy_rules() {
        let (key, _) = Category::identify(1, Some("mystery"), None, "Romance & Drama");
        assert_eq!(key, CategoryKey::RomanceDrama);
    }

    #[test]
    fn test_unmatched_row_keeps_server_id() {
        let (key, _) = Category::identify(5, None, Some("hidden_gems"), "Hidden Gems");
        assert_eq!(key, CategoryKey::Other("hidden_gems".to_string()));
        assert_eq!(key.to_string(), "hidden_gems");
    }

    #[test]
    fn test_skeleton_rows() {
        let rows = Category::skeleton();
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0].key, CategoryKey::SciFi);
        assert!(rows.iter().all(|c| c.movies.is_empty()));
    }
}
