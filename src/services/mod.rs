pub mod api;
pub mod debounce;
pub mod keyboard;

pub use api::{HttpMovieApi, MovieApi};
pub use debounce::{Debounce, Debouncer};
pub use keyboard::{navigate, Key, KeyOutcome};
