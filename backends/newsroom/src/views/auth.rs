use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::header::SET_COOKIE,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::{
    auth::{self, CurrentUser},
    db::{self, User},
    error::{AppError, AppResult, DBError},
    forms::{BoundForm, LoginForm, SignupForm},
    templates::{self, Templates},
    utils::{
        hasher,
        jwt::{self, SessionKeys},
    },
};

pub const INVALID_LOGIN: &str =
    "Please enter a correct username and password. Note that both fields may be case-sensitive.";
pub const USERNAME_TAKEN: &str = "A user with that username already exists.";

#[derive(Debug, Deserialize)]
pub struct NextQuery {
    next: Option<String>,
}

#[derive(Serialize)]
struct LoginPage<'a> {
    user: Option<&'a User>,
    next: &'a str,
    form: &'a BoundForm<LoginForm>,
}

#[derive(Serialize)]
struct SignupPage<'a> {
    user: Option<&'a User>,
    form: &'a BoundForm<SignupForm>,
}

#[derive(Serialize)]
struct LoggedOutPage {
    user: Option<User>,
}

/// Redirects to `to` with a fresh session cookie for `user`.
fn start_session(user: &User, keys: &SessionKeys, to: &str) -> AppResult<Response> {
    let token = jwt::generate_jwt(user.id, keys)?;
    let cookie = auth::session_cookie(&token, keys.lifetime);

    Ok(([(SET_COOKIE, cookie)], Redirect::to(to)).into_response())
}

// ================================================= LOGIN ================================================= //

// GET /auth/login/
pub async fn login_page(
    State(templates): State<Arc<Templates>>,
    CurrentUser(user): CurrentUser,
    Query(query): Query<NextQuery>,
) -> AppResult<Html<String>> {
    templates.render(
        templates::LOGIN,
        &LoginPage {
            user: user.as_ref(),
            next: auth::safe_next(query.next.as_deref()),
            form: &BoundForm::unbound(LoginForm::default()),
        },
    )
}

// POST /auth/login/
pub async fn login(
    State(pool): State<SqlitePool>,
    State(keys): State<SessionKeys>,
    State(templates): State<Arc<Templates>>,
    Form(form): Form<LoginForm>,
) -> AppResult<Response> {
    let next = auth::safe_next(form.next.as_deref()).to_string();
    let mut form = form.bind();

    if form.is_valid() {
        let user = db::find_user_by_username(&pool, &form.data.username).await?;
        let authenticated = match user {
            Some(user) => hasher::verify_password(&form.data.password, &user.password_hash)?
                .then_some(user),
            None => {
                hasher::reject_without_hash(&form.data.password);
                None
            }
        };

        match authenticated {
            Some(user) => {
                tracing::info!(user = %user.username, "logged in");
                return start_session(&user, &keys, &next);
            }
            None => {
                tracing::warn!(username = %form.data.username, "rejected login");
                form.errors.add("non_field_errors", INVALID_LOGIN);
            }
        }
    }

    let page = templates.render(
        templates::LOGIN,
        &LoginPage {
            user: None,
            next: &next,
            form: &form,
        },
    )?;
    Ok(page.into_response())
}

// ================================================= SIGNUP ================================================= //

// GET /auth/signup/
pub async fn signup_page(
    State(templates): State<Arc<Templates>>,
    CurrentUser(user): CurrentUser,
) -> AppResult<Html<String>> {
    templates.render(
        templates::SIGNUP,
        &SignupPage {
            user: user.as_ref(),
            form: &BoundForm::unbound(SignupForm::default()),
        },
    )
}

// POST /auth/signup/
pub async fn signup(
    State(pool): State<SqlitePool>,
    State(keys): State<SessionKeys>,
    State(templates): State<Arc<Templates>>,
    Form(form): Form<SignupForm>,
) -> AppResult<Response> {
    let mut form = form.bind();

    if form.is_valid() {
        let hash = hasher::hash_password(&form.data.password1)?;

        match db::create_user(&pool, &form.data.username, &hash).await {
            Ok(user) => {
                tracing::info!(user = %user.username, "user registered");
                return start_session(&user, &keys, "/");
            }
            Err(AppError::DBError(DBError::UsernameTaken)) => {
                form.errors.add("username", USERNAME_TAKEN);
            }
            Err(err) => return Err(err),
        }
    }

    let page = templates.render(
        templates::SIGNUP,
        &SignupPage {
            user: None,
            form: &form,
        },
    )?;
    Ok(page.into_response())
}

// ================================================= LOGOUT ================================================= //

// GET /auth/logout/
// POST /auth/logout/
pub async fn logout(
    State(templates): State<Arc<Templates>>,
    CurrentUser(user): CurrentUser,
) -> AppResult<Response> {
    if let Some(user) = user {
        tracing::info!(user = %user.username, "logged out");
    }

    let page = templates.render(templates::LOGGED_OUT, &LoggedOutPage { user: None })?;
    Ok(([(SET_COOKIE, auth::clear_session_cookie())], page).into_response())
}
