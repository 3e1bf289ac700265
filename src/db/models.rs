use sqlx::FromRow;

/// Surrogate key assigned by the store.
pub type MovieId = i64;

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
}
