use std::future::Future;

use teloxide::types::ChatId;

use crate::bot::commands::Command;
use crate::bot::handlers;
use crate::bot::reply::Reply;
use crate::bot::state::ChatMode;
use crate::bot::AppState;
use crate::movies::Snapshot;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    Text(String),
    Callback(String),
}

/// One update from the transport, reduced to what routing needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundEvent {
    pub chat_id: ChatId,
    pub kind: EventKind,
}

/// The handler chosen for an event.
#[derive(Debug, PartialEq, Eq)]
pub enum Route<'a> {
    Start,
    List,
    Random,
    DeleteRequest,
    DeleteConfirm {
        text: &'a str,
        snapshot: &'a Snapshot,
    },
    AddDefault(&'a str),
    UnknownCallback(&'a str),
}

impl From<Command> for Route<'_> {
    fn from(cmd: Command) -> Self {
        match cmd {
            Command::Start => Route::Start,
            Command::List => Route::List,
            Command::Random => Route::Random,
            Command::Delete => Route::DeleteRequest,
        }
    }
}

/// Pick the handler for an event given the chat's current mode.
///
/// Order matters: callbacks first, then a pending delete swallows any text
/// (keywords included), then keywords, then everything else is a new title.
pub fn route<'a>(kind: &'a EventKind, mode: &'a ChatMode) -> Route<'a> {
    match (kind, mode) {
        (EventKind::Callback(token), _) => Command::from_callback(token)
            .map(Route::from)
            .unwrap_or(Route::UnknownCallback(token)),
        (EventKind::Text(text), ChatMode::AwaitingDeleteIndex(snapshot)) => {
            Route::DeleteConfirm { text, snapshot }
        }
        (EventKind::Text(text), ChatMode::Idle) => Command::from_keyword(text)
            .map(Route::from)
            .unwrap_or(Route::AddDefault(text)),
    }
}

/// Replies for one event, plus a mode change that only takes effect once the
/// replies were delivered.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Outcome {
    pub replies: Vec<Reply>,
    pub pending: Option<ChatMode>,
}

impl From<Vec<Reply>> for Outcome {
    fn from(replies: Vec<Reply>) -> Self {
        Self {
            replies,
            pending: None,
        }
    }
}

/// Run exactly one handler for the event and collect its replies.
pub async fn dispatch(state: &AppState, event: &InboundEvent) -> Outcome {
    let chat_id = event.chat_id;
    let mode = state.chats.get(chat_id);
    let route = route(&event.kind, &mode);
    tracing::debug!("Chat {} routed to {:?}", chat_id, route);

    match route {
        Route::Start => handlers::start().into(),
        Route::List => handlers::list(state).await.into(),
        Route::Random => handlers::random(state).await.into(),
        Route::DeleteRequest => handlers::delete_request(state, chat_id).await,
        Route::DeleteConfirm { text, snapshot } => {
            handlers::delete_confirm(state, chat_id, text, snapshot).await.into()
        }
        Route::AddDefault(text) => handlers::add_default(state, text).await.into(),
        Route::UnknownCallback(token) => {
            tracing::warn!("Unknown callback '{}' from chat {}", token, chat_id);
            vec![Reply::text("Неизвестная команда")].into()
        }
    }
}

/// Dispatch an event, hand the replies to `send`, and commit the pending mode
/// change only if sending succeeded.
///
/// A numbered list the user never received must not leave the chat waiting
/// for a number.
pub async fn handle_event<F, Fut, E>(
    state: &AppState,
    event: &InboundEvent,
    send: F,
) -> Result<(), E>
where
    F: FnOnce(Vec<Reply>) -> Fut,
    Fut: Future<Output = Result<(), E>>,
{
    let outcome = dispatch(state, event).await;
    send(outcome.replies).await?;

    if let Some(mode) = outcome.pending {
        state.chats.set(event.chat_id, mode);
        tracing::debug!("{} chats waiting for a delete number", state.chats.len());
    }
    Ok(())
}
