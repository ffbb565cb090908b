//! Session handling and the login gate.
//!
//! A session is an HS256 token in the `newsroom_session` cookie. Handlers that
//! merely want to know who is asking take [`CurrentUser`]; handlers that need
//! a logged-in user take [`LoginRequired`], which sends anonymous requests to
//! the login page with a `next` parameter pointing back at them.

use async_trait::async_trait;
use axum::{
    extract::{FromRef, FromRequestParts},
    headers::Cookie,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
    TypedHeader,
};
use chrono::Duration;
use sqlx::SqlitePool;

use crate::{
    db::{self, User},
    error::AppError,
    utils::jwt::{self, SessionKeys},
};

pub const SESSION_COOKIE: &str = "newsroom_session";
pub const LOGIN_URL: &str = "/auth/login/";

/// The requesting user, or `None` for anonymous requests.
///
/// Invalid or expired tokens, and tokens naming a user that no longer exists,
/// count as anonymous.
#[derive(Debug)]
pub struct CurrentUser(pub Option<User>);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
    SqlitePool: FromRef<S>,
    SessionKeys: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Ok(TypedHeader(cookie)) = TypedHeader::<Cookie>::from_request_parts(parts, state).await
        else {
            return Ok(CurrentUser(None));
        };
        let Some(token) = cookie.get(SESSION_COOKIE) else {
            return Ok(CurrentUser(None));
        };

        let keys = SessionKeys::from_ref(state);
        let user_id = match jwt::verify_token(token, &keys.decoding) {
            Ok(user_id) => user_id,
            Err(err) => {
                tracing::debug!(error = %err, "ignoring invalid session token");
                return Ok(CurrentUser(None));
            }
        };

        let pool = SqlitePool::from_ref(state);
        Ok(CurrentUser(db::find_user(&pool, user_id).await?))
    }
}

/// A logged-in user.
#[derive(Debug)]
pub struct LoginRequired(pub User);

#[async_trait]
impl<S> FromRequestParts<S> for LoginRequired
where
    S: Send + Sync,
    SqlitePool: FromRef<S>,
    SessionKeys: FromRef<S>,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let CurrentUser(user) = CurrentUser::from_request_parts(parts, state)
            .await
            .map_err(IntoResponse::into_response)?;

        match user {
            Some(user) => Ok(LoginRequired(user)),
            None => {
                let next = parts
                    .uri
                    .path_and_query()
                    .map(|path| path.as_str())
                    .unwrap_or_else(|| parts.uri.path());
                Err(Redirect::to(&login_url(next)).into_response())
            }
        }
    }
}

/// Login page URL that returns to `next` afterwards.
pub fn login_url(next: &str) -> String {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("next", next)
        .finish();
    format!("{LOGIN_URL}?{query}")
}

/// Only local absolute paths are followed after login; anything else goes home.
pub fn safe_next(next: Option<&str>) -> &str {
    match next {
        Some(next) if next.starts_with('/') && !next.starts_with("//") && !next.contains('\\') => {
            next
        }
        _ => "/",
    }
}

pub fn session_cookie(token: &str, lifetime: Duration) -> String {
    format!(
        "{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        lifetime.num_seconds()
    )
}

pub fn clear_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}
