pub mod callbacks;
pub mod commands;
pub mod handlers;
pub mod reply;
pub mod router;
pub mod state;

use teloxide::dispatching::{UpdateFilterExt, UpdateHandler};
use teloxide::dptree;
use teloxide::prelude::*;

use crate::config::AppConfig;
use crate::movies::{ContentFilter, MovieRepository};
use state::ChatStateStore;

/// Shared application state, accessible from all handlers.
pub struct AppState {
    pub config: AppConfig,
    pub movies: MovieRepository,
    pub filter: ContentFilter,
    pub chats: ChatStateStore,
}

impl AppState {
    pub fn new(config: AppConfig, movies: MovieRepository) -> Self {
        let filter = ContentFilter::new(&config.deny_list);
        Self {
            config,
            movies,
            filter,
            chats: ChatStateStore::new(),
        }
    }
}

/// Build the teloxide update handler tree.
///
/// Commands are not filtered here: `/start` must be treated as an answer while a
/// chat is choosing a movie to delete, so all text goes through the router.
pub fn build_handler() -> UpdateHandler<Box<dyn std::error::Error + Send + Sync + 'static>> {
    let callback_handler = Update::filter_callback_query().endpoint(callbacks::handle_callback);

    let message_handler = Update::filter_message().endpoint(handlers::handle_message);

    dptree::entry()
        .branch(callback_handler)
        .branch(message_handler)
}
