use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

pub type AppResult<T> = std::result::Result<T, AppError>;

#[derive(thiserror::Error, Debug)]
pub enum DBError {
    #[error("Username is already taken")]
    UsernameTaken,

    #[error("Not Found")]
    NotFound,
}

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Any error: {0:?}")]
    Anyhow(#[from] anyhow::Error),

    #[error("DB Error: {0:?}")]
    DBError(#[from] DBError),

    #[error("SQL failed: {0:?}")]
    Sqlx(#[from] sqlx::Error),

    #[error("Template error: {0:?}")]
    Template(#[from] tera::Error),

    #[error("JWT error: {0:?}")]
    JwtError(#[from] jsonwebtoken::errors::Error),

    #[error("Password hash error: {0}")]
    Hasher(#[from] password_hash::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::DBError(DBError::NotFound) => StatusCode::NOT_FOUND,
            AppError::DBError(DBError::UsernameTaken) => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// Tell axum how to convert `AppError` into a response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(error = ?self, "request failed");
        } else {
            tracing::debug!(error = %self, "request rejected");
        }

        let reason = status.canonical_reason().unwrap_or("Error");
        let body = Html(format!(
            "<!DOCTYPE html><html><head><title>{code} {reason}</title></head>\
             <body><h1>{code} {reason}</h1></body></html>",
            code = status.as_u16(),
        ));

        (status, body).into_response()
    }
}
