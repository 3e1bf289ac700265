use thiserror::Error;

/// Everything that can go wrong while working with the shared movie list.
#[derive(Debug, Error)]
pub enum MovieError {
    #[error("no movies in the list")]
    NoMovies,

    #[error("movie '{0}' is already in the list")]
    DuplicateTitle(String),

    #[error("index {index} is outside 1..={len}")]
    IndexOutOfRange { index: i64, len: usize },

    #[error("'{0}' is not a positive number")]
    InvalidNumber(String),

    #[error("movie '{0}' was already deleted")]
    AlreadyDeleted(String),

    #[error("movie store unavailable: {0}")]
    StoreUnavailable(#[from] sqlx::Error),
}
