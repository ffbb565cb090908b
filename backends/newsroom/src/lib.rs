pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod forms;
pub mod routes;
pub mod templates;
pub mod utils;
pub mod views;

use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::SqlitePool;

use crate::{
    config::Settings, forms::CommentFilter, templates::Templates, utils::jwt::SessionKeys,
};

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub keys: SessionKeys,
    pub settings: Settings,
    pub templates: Arc<Templates>,
    pub comment_filter: Arc<CommentFilter>,
}

impl AppState {
    pub fn new(pool: SqlitePool, keys: SessionKeys, settings: Settings) -> Result<Self, tera::Error> {
        Ok(Self {
            pool,
            keys,
            settings,
            templates: Arc::new(Templates::new()?),
            comment_filter: Arc::new(CommentFilter::default()),
        })
    }

    pub fn with_comment_filter(mut self, filter: CommentFilter) -> Self {
        self.comment_filter = Arc::new(filter);
        self
    }
}

impl FromRef<AppState> for SqlitePool {
    fn from_ref(app_state: &AppState) -> SqlitePool {
        app_state.pool.clone()
    }
}

impl FromRef<AppState> for SessionKeys {
    fn from_ref(app_state: &AppState) -> SessionKeys {
        app_state.keys.clone()
    }
}

impl FromRef<AppState> for Settings {
    fn from_ref(app_state: &AppState) -> Settings {
        app_state.settings
    }
}

impl FromRef<AppState> for Arc<Templates> {
    fn from_ref(app_state: &AppState) -> Arc<Templates> {
        app_state.templates.clone()
    }
}

impl FromRef<AppState> for Arc<CommentFilter> {
    fn from_ref(app_state: &AppState) -> Arc<CommentFilter> {
        app_state.comment_filter.clone()
    }
}
