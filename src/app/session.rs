use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::config::Settings;
use crate::error::{AppError, AppResult};
use crate::services::MovieApi;

use super::handler::{self, Update};
use super::message::{Action, Message};
use super::state::ViewState;

/// Event loop owning the search/discovery state.
///
/// Messages are reduced one at a time on a single task. Requests run as
/// detached tasks that post their completion back as a message; nothing
/// in flight is ever cancelled, stale completions are dropped by the reducer.
pub struct Session {
    api: Arc<dyn MovieApi>,
    events_tx: mpsc::UnboundedSender<Message>,
    view_tx: watch::Sender<ViewState>,
}

/// Handle for feeding input to a running session and observing its state
pub struct SessionHandle {
    events_tx: mpsc::UnboundedSender<Message>,
    view_rx: watch::Receiver<ViewState>,
    shutdown_tx: mpsc::Sender<()>,
    task: JoinHandle<()>,
}

impl Session {
    /// Spawns the event loop and kicks off the home row fetch.
    ///
    /// The home request is issued before the first snapshot is published, so
    /// observers never see the built-in rows as if they had loaded.
    pub fn start(api: Arc<dyn MovieApi>, settings: Settings) -> SessionHandle {
        let Update { state, actions } =
            handler::update(ViewState::new(settings), Message::LoadHome);

        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (view_tx, view_rx) = watch::channel(state);
        let (shutdown_tx, shutdown_rx) = mpsc::channel(1);

        tracing::info!(
            client = api.name(),
            debounce_ms = settings.debounce.as_millis() as u64,
            "Starting search session"
        );

        let session = Session {
            api,
            events_tx: events_tx.clone(),
            view_tx,
        };
        for action in actions {
            session.execute(action);
        }
        let task = tokio::spawn(session.run(events_rx, shutdown_rx));

        SessionHandle {
            events_tx,
            view_rx,
            shutdown_tx,
            task,
        }
    }

    async fn run(
        self,
        mut events_rx: mpsc::UnboundedReceiver<Message>,
        mut shutdown_rx: mpsc::Receiver<()>,
    ) {
        let mut state = self.view_tx.borrow().clone();

        loop {
            tokio::select! {
                Some(message) = events_rx.recv() => {
                    let Update { state: next, actions } = handler::update(state, message);
                    state = next;
                    self.view_tx.send_replace(state.clone());
                    for action in actions {
                        self.execute(action);
                    }
                }
                _ = shutdown_rx.recv() => {
                    tracing::info!("Search session stopped");
                    break;
                }
            }
        }
    }

    /// Runs one side effect on its own task
    fn execute(&self, action: Action) {
        let api = Arc::clone(&self.api);
        let events_tx = self.events_tx.clone();

        match action {
            Action::ScheduleDebounce { generation, delay } => {
                tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    post(&events_tx, Message::DebounceElapsed { generation });
                });
            }
            Action::FetchHome { token } => {
                tokio::spawn(async move {
                    let result = api.home().await;
                    post(&events_tx, Message::HomeLoaded { token, result });
                });
            }
            Action::FetchSuggestions { token, query } => {
                tokio::spawn(async move {
                    let result = api.search(&query).await;
                    post(&events_tx, Message::SuggestionsLoaded { token, result });
                });
            }
            Action::Recommend { token, params } => {
                tokio::spawn(async move {
                    let result = api.recommend(&params).await;
                    let query = params.title;
                    post(&events_tx, Message::SearchCompleted { token, query, result });
                });
            }
            Action::Discover { token, params } => {
                tokio::spawn(async move {
                    let result = api.discover(&params).await;
                    let genre = params.genre;
                    post(&events_tx, Message::DiscoverCompleted { token, genre, result });
                });
            }
        }
    }
}

fn post(events_tx: &mpsc::UnboundedSender<Message>, message: Message) {
    if events_tx.send(message).is_err() {
        tracing::debug!("Session gone, dropping completion");
    }
}

impl SessionHandle {
    /// Queues an input message
    pub fn dispatch(&self, message: Message) -> AppResult<()> {
        self.events_tx
            .send(message)
            .map_err(|_| AppError::Internal("search session has stopped".to_string()))
    }

    /// Latest published state
    pub fn snapshot(&self) -> ViewState {
        self.view_rx.borrow().clone()
    }

    /// Receiver that observes every published state
    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.view_rx.clone()
    }

    /// Stops the event loop and waits for it to exit
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(()).await;
        if let Err(e) = self.task.await {
            tracing::error!(error = %e, "Search session task failed");
        }
    }
}
