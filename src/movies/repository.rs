use std::sync::Arc;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tokio::sync::Mutex;

use crate::db::models::Movie;
use crate::error::MovieError;
use crate::movies::snapshot::Snapshot;
use crate::movies::store::MovieStore;

/// The shared movie list, as the chat handlers see it.
pub struct MovieRepository {
    store: Arc<dyn MovieStore>,
    rng: Mutex<StdRng>,
}

impl MovieRepository {
    pub fn new(store: Arc<dyn MovieStore>, rng: StdRng) -> Self {
        Self {
            store,
            rng: Mutex::new(rng),
        }
    }

    /// Save a title exactly as given.
    pub async fn add(&self, title: &str) -> Result<Movie, MovieError> {
        let movie = self.store.insert(title).await?;
        tracing::info!("Saved movie {} '{}'", movie.id, movie.title);
        Ok(movie)
    }

    pub async fn list(&self) -> Result<Vec<Movie>, MovieError> {
        self.store.all().await
    }

    pub async fn snapshot(&self) -> Result<Snapshot, MovieError> {
        Ok(Snapshot::new(self.list().await?))
    }

    /// Delete the movie shown at `index` (1-based) in `snapshot`.
    ///
    /// The movie is removed by the id captured in the snapshot, so changes to the
    /// list since it was displayed never shift the target onto another record.
    pub async fn delete_by_index(
        &self,
        index: i64,
        snapshot: &Snapshot,
    ) -> Result<Movie, MovieError> {
        let target = snapshot.resolve(index)?;
        match self.store.remove(target.id).await? {
            Some(movie) => {
                tracing::info!("Deleted movie {} '{}'", movie.id, movie.title);
                Ok(movie)
            }
            None => Err(MovieError::AlreadyDeleted(target.title.clone())),
        }
    }

    /// Pick one movie uniformly at random. The movie stays in the list.
    pub async fn pick_random(&self) -> Result<Movie, MovieError> {
        let movies = self.list().await?;
        let mut rng = self.rng.lock().await;
        movies
            .choose(&mut *rng)
            .cloned()
            .ok_or(MovieError::NoMovies)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::movies::memory::InMemoryMovieStore;
    use async_trait::async_trait;
    use rand::SeedableRng;

    pub(crate) fn memory_repo() -> MovieRepository {
        MovieRepository::new(
            Arc::new(InMemoryMovieStore::new()),
            StdRng::seed_from_u64(7),
        )
    }

    /// A store whose backend is always down.
    pub(crate) struct BrokenStore;

    #[async_trait]
    impl MovieStore for BrokenStore {
        async fn insert(&self, _title: &str) -> Result<Movie, MovieError> {
            Err(sqlx::Error::PoolClosed.into())
        }

        async fn all(&self) -> Result<Vec<Movie>, MovieError> {
            Err(sqlx::Error::PoolClosed.into())
        }

        async fn remove(&self, _id: i64) -> Result<Option<Movie>, MovieError> {
            Err(sqlx::Error::PoolClosed.into())
        }
    }

    fn titles(movies: &[Movie]) -> Vec<&str> {
        movies.iter().map(|m| m.title.as_str()).collect()
    }

    #[tokio::test]
    async fn list_returns_added_titles_in_order() {
        let repo = memory_repo();
        assert!(repo.list().await.unwrap().is_empty());

        for t in ["Alien", "Brazil", "Casablanca", "alien"] {
            repo.add(t).await.unwrap();
        }

        let movies = repo.list().await.unwrap();
        assert_eq!(titles(&movies), ["Alien", "Brazil", "Casablanca", "alien"]);
    }

    #[tokio::test]
    async fn duplicate_title_is_rejected() {
        let repo = memory_repo();
        repo.add("X").await.unwrap();

        let err = repo.add("X").await.unwrap_err();
        assert!(matches!(err, MovieError::DuplicateTitle(t) if t == "X"));
        assert_eq!(titles(&repo.list().await.unwrap()), ["X"]);
    }

    #[tokio::test]
    async fn no_normalization_before_uniqueness() {
        let repo = memory_repo();
        repo.add("X").await.unwrap();
        repo.add("X ").await.unwrap();
        repo.add("x").await.unwrap();
        assert_eq!(repo.list().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn pick_random_on_empty_fails() {
        let repo = memory_repo();
        assert!(matches!(repo.pick_random().await, Err(MovieError::NoMovies)));
    }

    #[tokio::test]
    async fn pick_random_returns_member_and_keeps_it() {
        let repo = memory_repo();
        for t in ["A", "B", "C", "D"] {
            repo.add(t).await.unwrap();
        }

        for _ in 0..20 {
            let before = repo.list().await.unwrap();
            let picked = repo.pick_random().await.unwrap();
            assert!(before.contains(&picked));
            assert_eq!(repo.list().await.unwrap().len(), 4);
        }
    }

    #[tokio::test]
    async fn seeded_picks_are_reproducible() {
        let a = memory_repo();
        let b = memory_repo();
        for t in ["A", "B", "C", "D", "E"] {
            a.add(t).await.unwrap();
            b.add(t).await.unwrap();
        }

        for _ in 0..5 {
            assert_eq!(
                a.pick_random().await.unwrap(),
                b.pick_random().await.unwrap()
            );
        }
    }

    #[tokio::test]
    async fn delete_by_index_uses_snapshot() {
        let repo = memory_repo();
        for t in ["A", "B", "C"] {
            repo.add(t).await.unwrap();
        }
        let snap = repo.snapshot().await.unwrap();

        let removed = repo.delete_by_index(2, &snap).await.unwrap();
        assert_eq!(removed.title, "B");
        assert_eq!(titles(&repo.list().await.unwrap()), ["A", "C"]);
    }

    #[tokio::test]
    async fn delete_ignores_changes_after_snapshot() {
        let repo = memory_repo();
        for t in ["A", "B", "C"] {
            repo.add(t).await.unwrap();
        }
        let snap = repo.snapshot().await.unwrap();

        // Another chat removes "A"; live position 2 is now "C".
        let other = repo.snapshot().await.unwrap();
        repo.delete_by_index(1, &other).await.unwrap();

        let removed = repo.delete_by_index(2, &snap).await.unwrap();
        assert_eq!(removed.title, "B");
        assert_eq!(titles(&repo.list().await.unwrap()), ["C"]);
    }

    #[tokio::test]
    async fn delete_of_vanished_movie_is_rejected() {
        let repo = memory_repo();
        for t in ["A", "B"] {
            repo.add(t).await.unwrap();
        }
        let snap = repo.snapshot().await.unwrap();
        repo.delete_by_index(1, &snap).await.unwrap();

        let err = repo.delete_by_index(1, &snap).await.unwrap_err();
        assert!(matches!(err, MovieError::AlreadyDeleted(t) if t == "A"));
        assert_eq!(titles(&repo.list().await.unwrap()), ["B"]);
    }

    #[tokio::test]
    async fn delete_out_of_range_leaves_store_alone() {
        let repo = memory_repo();
        for t in ["A", "B", "C"] {
            repo.add(t).await.unwrap();
        }
        let snap = repo.snapshot().await.unwrap();

        for index in [0, -1, 4, 99] {
            assert!(matches!(
                repo.delete_by_index(index, &snap).await,
                Err(MovieError::IndexOutOfRange { .. })
            ));
        }
        assert_eq!(repo.list().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn store_failure_surfaces_as_unavailable() {
        let repo = MovieRepository::new(Arc::new(BrokenStore), StdRng::seed_from_u64(1));
        assert!(matches!(repo.list().await, Err(MovieError::StoreUnavailable(_))));
        assert!(matches!(
            repo.pick_random().await,
            Err(MovieError::StoreUnavailable(_))
        ));
    }
}
