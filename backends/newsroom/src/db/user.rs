use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, SqlitePool};

use crate::error::{AppResult, DBError};

pub type UserId = i64;

/// Stored in place of a hash for accounts that cannot log in with a password.
pub const UNUSABLE_PASSWORD: &str = "!";

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: UserId,
    pub username: String,
    #[serde(skip)]
    pub password_hash: String,
    pub date_joined: DateTime<Utc>,
}

impl User {
    pub fn has_usable_password(&self) -> bool {
        self.password_hash != UNUSABLE_PASSWORD
    }
}

pub async fn create_user(pool: &SqlitePool, username: &str, password_hash: &str) -> AppResult<User> {
    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (username, password_hash, date_joined)
        VALUES (?1, ?2, ?3)
        RETURNING *
        "#,
    )
    .bind(username)
    .bind(password_hash)
    .bind(Utc::now())
    .fetch_one(pool)
    .await;

    match user {
        Ok(user) => Ok(user),
        Err(sqlx::Error::Database(err)) if err.is_unique_violation() => {
            Err(DBError::UsernameTaken.into())
        }
        Err(err) => Err(err.into()),
    }
}

pub async fn find_user(pool: &SqlitePool, user_id: UserId) -> AppResult<Option<User>> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?1")
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

    Ok(user)
}

pub async fn find_user_by_username(pool: &SqlitePool, username: &str) -> AppResult<Option<User>> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = ?1")
        .bind(username)
        .fetch_optional(pool)
        .await?;

    Ok(user)
}
