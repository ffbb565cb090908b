use std::net::SocketAddr;

use chrono::Duration;
use clap::Args;

use crate::utils::jwt::SessionKeys;

pub const DEFAULT_NEWS_COUNT_ON_HOME_PAGE: i64 = 10;

#[derive(Debug, Clone, Args)]
pub struct DatabaseArgs {
    /// SQLite connection string.
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite://newsroom.db")]
    pub database_url: String,
}

#[derive(Debug, Clone, Args)]
pub struct ServeArgs {
    /// Address to listen on.
    #[arg(long, env = "NEWSROOM_LISTEN", default_value = "127.0.0.1:8000")]
    pub listen: SocketAddr,

    /// Secret used to sign session cookies.
    #[arg(long, env = "NEWSROOM_SECRET_KEY", hide_env_values = true)]
    pub secret_key: String,

    /// How many news items the home page shows.
    #[arg(
        long,
        env = "NEWS_COUNT_ON_HOME_PAGE",
        default_value_t = DEFAULT_NEWS_COUNT_ON_HOME_PAGE,
        value_parser = clap::value_parser!(i64).range(1..)
    )]
    pub news_count_on_home_page: i64,

    /// Session lifetime in days.
    #[arg(
        long,
        env = "NEWSROOM_SESSION_DAYS",
        default_value_t = 14,
        value_parser = clap::value_parser!(i64).range(1..=365)
    )]
    pub session_days: i64,
}

impl ServeArgs {
    pub fn settings(&self) -> Settings {
        Settings {
            news_count_on_home_page: self.news_count_on_home_page,
        }
    }

    pub fn session_keys(&self) -> SessionKeys {
        SessionKeys::from_secret(self.secret_key.as_bytes(), Duration::days(self.session_days))
    }
}

/// Site settings the views read at request time.
#[derive(Debug, Clone, Copy)]
pub struct Settings {
    pub news_count_on_home_page: i64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            news_count_on_home_page: DEFAULT_NEWS_COUNT_ON_HOME_PAGE,
        }
    }
}
