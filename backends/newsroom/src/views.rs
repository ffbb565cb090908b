pub mod auth;
pub mod comments;
pub mod news;

use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

use crate::{
    db::NewsId,
    error::{AppError, DBError},
};

/// Where a comment lands after it is created, edited or deleted.
pub fn comments_url(news_id: NewsId) -> String {
    format!("/news/{news_id}/#comments")
}

/// A numeric row id taken from the path.
///
/// Only plain digits that fit an `i64` match. Anything else answers 404 like
/// an id with no row behind it.
#[derive(Debug, Clone, Copy)]
pub struct IdPath(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| DBError::NotFound)?;

        parse_id(&raw).map(IdPath).ok_or_else(|| DBError::NotFound.into())
    }
}

fn parse_id(raw: &str) -> Option<i64> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digits_parse() {
        assert_eq!(parse_id("42"), Some(42));
        assert_eq!(parse_id("007"), Some(7));
    }

    #[test]
    fn anything_else_is_rejected() {
        for raw in ["", "abc", "-1", "+1", "1.5", " 1", "99999999999999999999"] {
            assert_eq!(parse_id(raw), None, "{raw:?}");
        }
    }
}
