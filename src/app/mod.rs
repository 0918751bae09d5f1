//! Search/discovery orchestrator.
//!
//! `handler::update` is the state machine, `session` drives it against a
//! `MovieApi`, and `view::project` turns the resulting state into what gets
//! drawn.

pub mod handler;
pub mod message;
pub mod session;
pub mod state;
pub mod view;

pub use handler::{reset, update, Update};
pub use message::{Action, Message};
pub use session::{Session, SessionHandle};
pub use state::{RequestClass, RequestTracker, ResultMode, Token, ViewState};
pub use view::{project, Content, View};
