use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, SqlitePool};

use crate::error::{AppError, AppResult, DBError};

use super::{NewsId, UserId};

pub type CommentId = i64;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Comment {
    pub id: CommentId,
    pub news_id: NewsId,
    pub author_id: UserId,
    pub text: String,
    pub created: DateTime<Utc>,
}

/// A comment as shown under a news item.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CommentView {
    pub id: CommentId,
    pub author_id: UserId,
    pub author: String,
    pub text: String,
    pub created: DateTime<Utc>,
}

#[derive(Debug)]
pub struct NewComment<'a> {
    pub news_id: NewsId,
    pub author_id: UserId,
    pub text: &'a str,
}

pub async fn create_comment(pool: &SqlitePool, comment: NewComment<'_>) -> AppResult<Comment> {
    let comment = sqlx::query_as::<_, Comment>(
        r#"
        INSERT INTO comments (news_id, author_id, text, created)
        VALUES (?1, ?2, ?3, ?4)
        RETURNING *
        "#,
    )
    .bind(comment.news_id)
    .bind(comment.author_id)
    .bind(comment.text)
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    Ok(comment)
}

pub async fn comments_for_news(pool: &SqlitePool, news_id: NewsId) -> AppResult<Vec<CommentView>> {
    let comments = sqlx::query_as::<_, CommentView>(
        r#"
        SELECT
            comments.id,
            comments.author_id,
            users.username AS author,
            comments.text,
            comments.created
        FROM comments
        INNER JOIN users ON users.id = comments.author_id
        WHERE comments.news_id = ?1
        ORDER BY comments.created ASC, comments.id ASC
        "#,
    )
    .bind(news_id)
    .fetch_all(pool)
    .await?;

    Ok(comments)
}

// Every owned_* query filters on the author as well as the id, so a comment
// that belongs to someone else is indistinguishable from a missing one.

pub async fn get_owned_comment(
    pool: &SqlitePool,
    comment_id: CommentId,
    author_id: UserId,
) -> AppResult<Comment> {
    let comment = sqlx::query_as::<_, Comment>(
        "SELECT * FROM comments WHERE id = ?1 AND author_id = ?2",
    )
    .bind(comment_id)
    .bind(author_id)
    .fetch_optional(pool)
    .await?;

    comment.ok_or(AppError::DBError(DBError::NotFound))
}

pub async fn update_owned_comment(
    pool: &SqlitePool,
    comment_id: CommentId,
    author_id: UserId,
    text: &str,
) -> AppResult<Comment> {
    let comment = sqlx::query_as::<_, Comment>(
        r#"
        UPDATE comments
        SET text = ?3
        WHERE id = ?1
            AND author_id = ?2
        RETURNING *
        "#,
    )
    .bind(comment_id)
    .bind(author_id)
    .bind(text)
    .fetch_optional(pool)
    .await?;

    comment.ok_or(AppError::DBError(DBError::NotFound))
}

pub async fn delete_owned_comment(
    pool: &SqlitePool,
    comment_id: CommentId,
    author_id: UserId,
) -> AppResult<Comment> {
    let deleted = sqlx::query_as::<_, Comment>(
        r#"
        DELETE FROM comments
        WHERE id = ?1
            AND author_id = ?2
        RETURNING *
        "#,
    )
    .bind(comment_id)
    .bind(author_id)
    .fetch_optional(pool)
    .await?;

    deleted.ok_or(AppError::DBError(DBError::NotFound))
}
