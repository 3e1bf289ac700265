use crate::db::models::Movie;
use crate::error::MovieError;

/// The list exactly as it was shown to a chat, used to resolve a numbered pick later.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    movies: Vec<Movie>,
}

impl Snapshot {
    pub fn new(movies: Vec<Movie>) -> Self {
        Self { movies }
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    /// Look up a 1-based position.
    pub fn resolve(&self, index: i64) -> Result<&Movie, MovieError> {
        let out_of_range = || MovieError::IndexOutOfRange {
            index,
            len: self.movies.len(),
        };
        if index < 1 {
            return Err(out_of_range());
        }
        let pos = usize::try_from(index - 1).map_err(|_| out_of_range())?;
        self.movies.get(pos).ok_or_else(out_of_range)
    }
}
