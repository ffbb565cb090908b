//! Which pages answer whom.

mod common;

use axum::http::{Method, StatusCode};
use rstest::rstest;

use common::*;
use newsroom::auth::login_url;

#[rstest]
#[case::home(|_: &NewsWorld| "/".to_string())]
#[case::detail(|w: &NewsWorld| detail_url(&w.news))]
#[case::login(|_: &NewsWorld| "/auth/login/".to_string())]
#[case::signup(|_: &NewsWorld| "/auth/signup/".to_string())]
#[case::logout(|_: &NewsWorld| "/auth/logout/".to_string())]
#[tokio::test]
async fn pages_are_available_to_anonymous_clients(
    #[case] url: fn(&NewsWorld) -> String,
    #[future] news_world: NewsWorld,
) {
    let w = news_world.await;
    let response = w.app.get(&url(&w), None).await;
    assert_eq!(response.status, StatusCode::OK);
}

#[rstest]
#[case::author_edit(true, edit_url, StatusCode::OK)]
#[case::author_delete(true, delete_url, StatusCode::OK)]
#[case::not_author_edit(false, edit_url, StatusCode::NOT_FOUND)]
#[case::not_author_delete(false, delete_url, StatusCode::NOT_FOUND)]
#[tokio::test]
async fn comment_pages_are_available_only_to_the_author(
    #[case] as_author: bool,
    #[case] url: fn(&newsroom::db::Comment) -> String,
    #[case] expected: StatusCode,
    #[future] comment_world: CommentWorld,
) {
    let CommentWorld { world, comment } = comment_world.await;
    let cookie = if as_author {
        world.author_cookie()
    } else {
        world.not_author_cookie()
    };

    let response = world.app.get(&url(&comment), Some(&cookie)).await;
    assert_eq!(response.status, expected);
}

#[rstest]
#[case::edit(edit_url)]
#[case::delete(delete_url)]
#[tokio::test]
async fn anonymous_clients_are_sent_to_login(
    #[case] url: fn(&newsroom::db::Comment) -> String,
    #[future] comment_world: CommentWorld,
) {
    let CommentWorld { world, comment } = comment_world.await;
    let url = url(&comment);

    let response = world.app.get(&url, None).await;
    response.assert_redirects(&login_url(&url));
}

#[rstest]
#[tokio::test]
async fn missing_news_is_not_found(#[future] news_world: NewsWorld) {
    let w = news_world.await;
    let response = w.app.get(&format!("/news/{}/", w.news.id + 1), None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[rstest]
#[tokio::test]
async fn missing_comment_is_not_found_for_a_logged_in_user(#[future] news_world: NewsWorld) {
    let w = news_world.await;
    let response = w.app.get("/edit_comment/999/", Some(&w.author_cookie())).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[rstest]
#[tokio::test]
async fn unknown_paths_are_not_found(#[future] news_world: NewsWorld) {
    let w = news_world.await;
    let response = w.app.get("/no/such/page/", None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[rstest]
#[tokio::test]
async fn edit_route_rejects_delete_verb(#[future] comment_world: CommentWorld) {
    let CommentWorld { world, comment } = comment_world.await;
    let response = world
        .app
        .request(Method::DELETE, &edit_url(&comment), Some(&world.author_cookie()), None)
        .await;
    assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);
}

#[rstest]
#[tokio::test]
async fn forged_session_counts_as_anonymous(#[future] comment_world: CommentWorld) {
    let CommentWorld { world, comment } = comment_world.await;
    let url = edit_url(&comment);

    let response = world
        .app
        .get(&url, Some("newsroom_session=not-a-token"))
        .await;
    response.assert_redirects(&login_url(&url));
}

#[rstest]
#[case::news_word("/news/abc/")]
#[case::news_overflow("/news/99999999999999999999/")]
#[case::news_negative("/news/-1/")]
#[case::edit_word("/edit_comment/abc/")]
#[case::delete_word("/delete_comment/abc/")]
#[tokio::test]
async fn non_numeric_ids_are_not_found(
    #[case] url: &str,
    #[future] news_world: NewsWorld,
) {
    let w = news_world.await;
    let response = w.app.get(url, Some(&w.author_cookie())).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[rstest]
#[tokio::test]
async fn posting_to_a_non_numeric_news_id_is_not_found(#[future] news_world: NewsWorld) {
    let w = news_world.await;
    let response = w
        .app
        .post("/news/abc/", Some(&w.author_cookie()), &[("text", "Просто текст.")])
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(w.app.comment_count().await, 0);
}
