use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::db::models::{Movie, MovieId};
use crate::error::MovieError;
use crate::movies::store::MovieStore;

#[derive(Default)]
struct Inner {
    next_id: MovieId,
    movies: Vec<Movie>,
}

/// Process-local store, kept in insertion order. Lost on restart.
#[derive(Default)]
pub struct InMemoryMovieStore {
    inner: Mutex<Inner>,
}

impl InMemoryMovieStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MovieStore for InMemoryMovieStore {
    async fn insert(&self, title: &str) -> Result<Movie, MovieError> {
        let mut inner = self.inner.lock().await;
        if inner.movies.iter().any(|m| m.title == title) {
            return Err(MovieError::DuplicateTitle(title.to_string()));
        }

        inner.next_id += 1;
        let movie = Movie {
            id: inner.next_id,
            title: title.to_string(),
        };
        inner.movies.push(movie.clone());
        Ok(movie)
    }

    async fn all(&self) -> Result<Vec<Movie>, MovieError> {
        Ok(self.inner.lock().await.movies.clone())
    }

    async fn remove(&self, id: MovieId) -> Result<Option<Movie>, MovieError> {
        let mut inner = self.inner.lock().await;
        let pos = inner.movies.iter().position(|m| m.id == id);
        Ok(pos.map(|i| inner.movies.remove(i)))
    }
}
