mod user;
pub use user::*;
mod news;
pub use news::*;
mod comment;
pub use comment::*;

use std::str::FromStr;

use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Executor, SqlitePool,
};

const MAX_POOL_SIZE: u32 = 5;

/// Opens a pool for `database_url`, creating the database file if needed.
///
/// In-memory databases live as long as their connection, so they get a single
/// connection that is never recycled.
pub async fn connect(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = if database_url.contains(":memory:") {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(MAX_POOL_SIZE)
    };

    pool.connect_with(options).await
}

pub async fn prepare_db(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    pool.execute(include_str!("sql/schema.sql")).await?;
    Ok(())
}

/// Drops every table and recreates the schema.
pub async fn initialize_db(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    pool.execute(include_str!("sql/down.sql")).await?;
    pool.execute(include_str!("sql/schema.sql")).await?;
    Ok(())
}
