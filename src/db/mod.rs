pub mod models;

use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;

use crate::error::MovieError;
use crate::movies::store::MovieStore;
use models::{Movie, MovieId};

#[derive(Debug, Clone)]
pub struct Database {
    pub pool: PgPool,
}

impl Database {
    pub async fn connect(options: PgConnectOptions) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;
        Ok(Self { pool })
    }

    pub async fn run_migrations(&self) -> anyhow::Result<()> {
        sqlx::query(
            r#"CREATE TABLE IF NOT EXISTS movies (
                id BIGSERIAL PRIMARY KEY,
                title TEXT NOT NULL UNIQUE
            )"#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl MovieStore for Database {
    async fn insert(&self, title: &str) -> Result<Movie, MovieError> {
        // The unique index decides; a conflict yields no row.
        let movie = sqlx::query_as::<_, Movie>(
            r#"
            INSERT INTO movies (title)
            VALUES ($1)
            ON CONFLICT (title) DO NOTHING
            RETURNING id, title
            "#,
        )
        .bind(title)
        .fetch_optional(&self.pool)
        .await?;

        movie.ok_or_else(|| MovieError::DuplicateTitle(title.to_string()))
    }

    async fn all(&self) -> Result<Vec<Movie>, MovieError> {
        let movies = sqlx::query_as::<_, Movie>("SELECT id, title FROM movies ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(movies)
    }

    async fn remove(&self, id: MovieId) -> Result<Option<Movie>, MovieError> {
        let movie =
            sqlx::query_as::<_, Movie>("DELETE FROM movies WHERE id = $1 RETURNING id, title")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(movie)
    }
}
