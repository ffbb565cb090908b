use chrono::NaiveDate;
use serde::Serialize;
use sqlx::{FromRow, SqlitePool};

use crate::error::{AppError, AppResult, DBError};

pub type NewsId = i64;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct News {
    pub id: NewsId,
    pub title: String,
    pub text: String,
    pub date: NaiveDate,
}

/// A home page row: the news item plus how many comments it has.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct NewsListItem {
    pub id: NewsId,
    pub title: String,
    pub text: String,
    pub date: NaiveDate,
    pub comment_count: i64,
}

#[derive(Debug)]
pub struct NewNews<'a> {
    pub title: &'a str,
    pub text: &'a str,
    pub date: NaiveDate,
}

pub async fn create_news(pool: &SqlitePool, news: NewNews<'_>) -> AppResult<News> {
    let news = sqlx::query_as::<_, News>(
        r#"
        INSERT INTO news (title, text, date)
        VALUES (?1, ?2, ?3)
        RETURNING *
        "#,
    )
    .bind(news.title)
    .bind(news.text)
    .bind(news.date)
    .fetch_one(pool)
    .await?;

    Ok(news)
}

/// The `limit` most recent items, presented oldest first.
///
/// Which items make the cut is a choice: a plain cap over the ascending list
/// would keep the oldest ones. Here "most recent" means newest by `date`, ties
/// broken by newest `id`, and the cap applies to that ordering before the page
/// order is restored.
pub async fn list_home_news(pool: &SqlitePool, limit: i64) -> AppResult<Vec<NewsListItem>> {
    let news = sqlx::query_as::<_, NewsListItem>(
        r#"
        SELECT
            recent.id,
            recent.title,
            recent.text,
            recent.date,
            (
                SELECT COUNT(*)
                FROM comments
                WHERE comments.news_id = recent.id
            ) AS comment_count
        FROM (
            SELECT * FROM news
            ORDER BY date DESC, id DESC
            LIMIT ?1
        ) AS recent
        ORDER BY recent.date ASC, recent.id ASC
        "#,
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(news)
}

pub async fn get_news(pool: &SqlitePool, news_id: NewsId) -> AppResult<News> {
    let news = sqlx::query_as::<_, News>("SELECT * FROM news WHERE id = ?1")
        .bind(news_id)
        .fetch_optional(pool)
        .await?;

    news.ok_or(AppError::DBError(DBError::NotFound))
}
