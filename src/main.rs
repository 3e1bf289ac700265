use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use teloxide::prelude::*;
use tracing_subscriber::EnvFilter;

mod bot;
mod config;
mod db;
mod error;
mod health;
mod movies;

use config::{AppConfig, StoreKind};
use db::Database;
use movies::{InMemoryMovieStore, MovieRepository, MovieStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("🎬 Starting movie list bot...");

    let mut config = AppConfig::from_env()?;
    tracing::info!("Config loaded. Store: {:?}", config.store);

    if let Some(path) = &config.delete_image_path {
        if !path.exists() {
            tracing::warn!(
                "Delete image {} not found, deletions will be confirmed with text",
                path.display()
            );
            config.delete_image_path = None;
        }
    }

    let store: Arc<dyn MovieStore> = match config.store {
        StoreKind::Postgres => {
            let db = Database::connect(config.db.connect_options()?).await?;
            db.run_migrations().await?;
            tracing::info!("Database connected and migrations applied.");
            Arc::new(db)
        }
        StoreKind::Memory => {
            tracing::warn!("Using in-memory movie store, the list is lost on restart.");
            Arc::new(InMemoryMovieStore::new())
        }
    };

    // One generator for the whole process
    let movies = MovieRepository::new(store, StdRng::from_entropy());

    let health_addr = config.health_addr.clone();
    tokio::spawn(async move {
        if let Err(e) = health::serve(&health_addr).await {
            tracing::error!("Health server error: {}", e);
        }
    });

    let bot = Bot::new(&config.bot_token);
    let state = Arc::new(bot::AppState::new(config, movies));

    let handler = bot::build_handler();

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    tracing::info!("Shutting down...");
    Ok(())
}
