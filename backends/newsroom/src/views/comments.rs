//! Editing and deleting comments.
//!
//! Every lookup goes through the `owned_*` queries, so another user's comment
//! answers exactly like a missing one: 404.

use std::sync::Arc;

use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::{
    auth::LoginRequired,
    db::{self, Comment, User},
    error::AppResult,
    forms::{BoundForm, CommentFilter, CommentForm},
    templates::{self, Templates},
};

use super::{comments_url, IdPath};

#[derive(Serialize)]
struct EditPage<'a> {
    user: &'a User,
    comment: &'a Comment,
    form: &'a BoundForm<CommentForm>,
}

#[derive(Serialize)]
struct DeletePage<'a> {
    user: &'a User,
    comment: &'a Comment,
}

// GET /edit_comment/:id/
pub async fn edit_comment_page(
    LoginRequired(user): LoginRequired,
    State(pool): State<SqlitePool>,
    State(templates): State<Arc<Templates>>,
    IdPath(comment_id): IdPath,
) -> AppResult<Html<String>> {
    let comment = db::get_owned_comment(&pool, comment_id, user.id).await?;
    let form = BoundForm::unbound(CommentForm {
        text: comment.text.clone(),
    });

    templates.render(
        templates::EDIT,
        &EditPage {
            user: &user,
            comment: &comment,
            form: &form,
        },
    )
}

// POST /edit_comment/:id/
pub async fn edit_comment(
    LoginRequired(user): LoginRequired,
    State(pool): State<SqlitePool>,
    State(templates): State<Arc<Templates>>,
    State(filter): State<Arc<CommentFilter>>,
    IdPath(comment_id): IdPath,
    Form(form): Form<CommentForm>,
) -> AppResult<Response> {
    let comment = db::get_owned_comment(&pool, comment_id, user.id).await?;
    let form = form.bind(&filter);

    if !form.is_valid() {
        let page = templates.render(
            templates::EDIT,
            &EditPage {
                user: &user,
                comment: &comment,
                form: &form,
            },
        )?;
        return Ok(page.into_response());
    }

    let updated = db::update_owned_comment(&pool, comment.id, user.id, &form.data.text).await?;
    tracing::info!(comment_id = updated.id, author = %user.username, "comment updated");

    Ok(Redirect::to(&comments_url(updated.news_id)).into_response())
}

// GET /delete_comment/:id/
pub async fn delete_comment_page(
    LoginRequired(user): LoginRequired,
    State(pool): State<SqlitePool>,
    State(templates): State<Arc<Templates>>,
    IdPath(comment_id): IdPath,
) -> AppResult<Html<String>> {
    let comment = db::get_owned_comment(&pool, comment_id, user.id).await?;

    templates.render(
        templates::DELETE,
        &DeletePage {
            user: &user,
            comment: &comment,
        },
    )
}

// POST /delete_comment/:id/
// DELETE /delete_comment/:id/
pub async fn delete_comment(
    LoginRequired(user): LoginRequired,
    State(pool): State<SqlitePool>,
    IdPath(comment_id): IdPath,
) -> AppResult<Redirect> {
    let deleted = db::delete_owned_comment(&pool, comment_id, user.id).await?;
    tracing::info!(comment_id = deleted.id, author = %user.username, "comment deleted");

    Ok(Redirect::to(&comments_url(deleted.news_id)))
}
