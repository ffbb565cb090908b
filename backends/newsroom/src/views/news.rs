use std::sync::Arc;

use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::{
    auth::{CurrentUser, LoginRequired},
    config::Settings,
    db::{self, CommentView, NewComment, News, NewsListItem, User},
    error::AppResult,
    forms::{BoundForm, CommentFilter, CommentForm},
    templates::{self, Templates},
};

use super::{comments_url, IdPath};

#[derive(Serialize)]
struct HomePage<'a> {
    user: Option<&'a User>,
    object_list: Vec<NewsListItem>,
}

#[derive(Serialize)]
struct DetailPage<'a> {
    user: Option<&'a User>,
    news: &'a News,
    comments: Vec<CommentView>,
    form: Option<&'a BoundForm<CommentForm>>,
}

// GET /
pub async fn home(
    State(pool): State<SqlitePool>,
    State(templates): State<Arc<Templates>>,
    State(settings): State<Settings>,
    CurrentUser(user): CurrentUser,
) -> AppResult<Html<String>> {
    let object_list = db::list_home_news(&pool, settings.news_count_on_home_page).await?;

    templates.render(
        templates::HOME,
        &HomePage {
            user: user.as_ref(),
            object_list,
        },
    )
}

// GET /news/:id/
pub async fn news_detail(
    State(pool): State<SqlitePool>,
    State(templates): State<Arc<Templates>>,
    CurrentUser(user): CurrentUser,
    IdPath(news_id): IdPath,
) -> AppResult<Html<String>> {
    let news = db::get_news(&pool, news_id).await?;
    let comments = db::comments_for_news(&pool, news.id).await?;
    let form = user
        .as_ref()
        .map(|_| BoundForm::unbound(CommentForm::default()));

    templates.render(
        templates::DETAIL,
        &DetailPage {
            user: user.as_ref(),
            news: &news,
            comments,
            form: form.as_ref(),
        },
    )
}

// POST /news/:id/
pub async fn add_comment(
    LoginRequired(user): LoginRequired,
    State(pool): State<SqlitePool>,
    State(templates): State<Arc<Templates>>,
    State(filter): State<Arc<CommentFilter>>,
    IdPath(news_id): IdPath,
    Form(form): Form<CommentForm>,
) -> AppResult<Response> {
    let news = db::get_news(&pool, news_id).await?;
    let form = form.bind(&filter);

    if !form.is_valid() {
        let comments = db::comments_for_news(&pool, news.id).await?;
        let page = templates.render(
            templates::DETAIL,
            &DetailPage {
                user: Some(&user),
                news: &news,
                comments,
                form: Some(&form),
            },
        )?;
        return Ok(page.into_response());
    }

    let comment = db::create_comment(
        &pool,
        NewComment {
            news_id: news.id,
            author_id: user.id,
            text: &form.data.text,
        },
    )
    .await?;
    tracing::info!(comment_id = comment.id, news_id = news.id, author = %user.username, "comment created");

    Ok(Redirect::to(&comments_url(news.id)).into_response())
}
