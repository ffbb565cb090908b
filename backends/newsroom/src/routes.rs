use axum::{
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::{
    error::{AppError, DBError},
    views, AppState,
};

pub fn generate_routes(state: AppState) -> Router {
    Router::new()
        // ==== NEWS ==== //
        .route("/", get(views::news::home))
        .route(
            "/news/:id/",
            get(views::news::news_detail).post(views::news::add_comment),
        )
        // ==== COMMENTS ==== //
        .route(
            "/edit_comment/:id/",
            get(views::comments::edit_comment_page).post(views::comments::edit_comment),
        )
        .route(
            "/delete_comment/:id/",
            get(views::comments::delete_comment_page)
                .post(views::comments::delete_comment)
                .delete(views::comments::delete_comment),
        )
        // ==== USERS ==== //
        .route(
            "/auth/login/",
            get(views::auth::login_page).post(views::auth::login),
        )
        .route(
            "/auth/signup/",
            get(views::auth::signup_page).post(views::auth::signup),
        )
        .route("/auth/logout/", post(views::auth::logout).get(views::auth::logout))
        .fallback(handler_404)
        .with_state(state)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
}

async fn handler_404() -> impl IntoResponse {
    AppError::DBError(DBError::NotFound)
}
