use async_trait::async_trait;

use crate::db::models::{Movie, MovieId};
use crate::error::MovieError;

/// Raw persistence for movie titles.
///
/// Implementors own the records; nothing else writes to the backing store.
#[async_trait]
pub trait MovieStore: Send + Sync {
    /// Persist a new title. Fails with `DuplicateTitle` when the exact title exists.
    async fn insert(&self, title: &str) -> Result<Movie, MovieError>;

    /// All movies in the store's natural order.
    async fn all(&self) -> Result<Vec<Movie>, MovieError>;

    /// Remove by id, returning the removed record if it was still there.
    async fn remove(&self, id: MovieId) -> Result<Option<Movie>, MovieError>;
}
