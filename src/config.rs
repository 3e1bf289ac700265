use std::path::PathBuf;
use std::str::FromStr;

use sqlx::postgres::{PgConnectOptions, PgSslMode};

/// Which backend keeps the movie list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Postgres,
    Memory,
}

impl FromStr for StoreKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "postgres" | "pg" => Ok(Self::Postgres),
            "memory" | "mem" => Ok(Self::Memory),
            other => anyhow::bail!("unknown MOVIE_STORE '{}' (expected postgres or memory)", other),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Full connection URL; takes precedence over the individual parts.
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    pub ssl_mode: String,
}

impl DbConfig {
    pub fn connect_options(&self) -> anyhow::Result<PgConnectOptions> {
        if let Some(url) = &self.url {
            return Ok(PgConnectOptions::from_str(url)?);
        }

        let ssl_mode = PgSslMode::from_str(&self.ssl_mode)?;
        let mut options = PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .database(&self.name)
            .ssl_mode(ssl_mode);
        if !self.password.is_empty() {
            options = options.password(&self.password);
        }
        Ok(options)
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bot_token: String,
    pub store: StoreKind,
    pub db: DbConfig,

    /// Phrases that block a title from being saved
    pub deny_list: Vec<String>,
    /// Picture attached to the "movie deleted" reply
    pub delete_image_path: Option<PathBuf>,
    /// Longest list message in UTF-16 code units, capped at Telegram's 4096
    pub list_max_len: usize,
    pub health_addr: String,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var_or = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let bot_token = lookup("BOT_TOKEN").unwrap_or_default();
        if bot_token.trim().is_empty() {
            anyhow::bail!("BOT_TOKEN environment variable is required");
        }

        let deny_list: Vec<String> = lookup("DENY_LIST")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let delete_image_path = match lookup("DELETE_IMAGE_PATH") {
            Some(p) if p.trim().is_empty() => None,
            Some(p) => Some(PathBuf::from(p)),
            None => Some(PathBuf::from("assets/del_image.jpg")),
        };

        Ok(Self {
            bot_token,
            store: var_or("MOVIE_STORE", "postgres").parse()?,
            db: DbConfig {
                url: lookup("DATABASE_URL").filter(|v| !v.trim().is_empty()),
                host: var_or("DB_HOST", "localhost"),
                port: var_or("DB_PORT", "5432").parse()?,
                user: var_or("DB_USER", "postgres"),
                password: lookup("DB_PASSWORD").unwrap_or_default(),
                name: var_or("DB_NAME", "postgres"),
                ssl_mode: var_or("DB_SSL_MODE", "prefer"),
            },
            deny_list,
            delete_image_path,
            list_max_len: var_or("LIST_MAX_LEN", "4000").parse()?,
            health_addr: var_or("HEALTH_ADDR", "0.0.0.0:8080"),
        })
    }
}
