use axum::response::Html;
use serde::Serialize;
use tera::{Context, Tera};

use crate::error::AppResult;

pub const HOME: &str = "news/home.html";
pub const DETAIL: &str = "news/detail.html";
pub const EDIT: &str = "news/edit.html";
pub const DELETE: &str = "news/delete.html";
pub const LOGIN: &str = "registration/login.html";
pub const SIGNUP: &str = "registration/signup.html";
pub const LOGGED_OUT: &str = "registration/logged_out.html";

/// Page templates, compiled into the binary and parsed once at startup.
pub struct Templates {
    tera: Tera,
}

impl Templates {
    pub fn new() -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            ("base.html", include_str!("../templates/base.html")),
            (HOME, include_str!("../templates/news/home.html")),
            (DETAIL, include_str!("../templates/news/detail.html")),
            (EDIT, include_str!("../templates/news/edit.html")),
            (DELETE, include_str!("../templates/news/delete.html")),
            (LOGIN, include_str!("../templates/registration/login.html")),
            (SIGNUP, include_str!("../templates/registration/signup.html")),
            (LOGGED_OUT, include_str!("../templates/registration/logged_out.html")),
        ])?;

        Ok(Self { tera })
    }

    pub fn render(&self, name: &str, context: &impl Serialize) -> AppResult<Html<String>> {
        let context = Context::from_serialize(context)?;
        Ok(Html(self.tera.render(name, &context)?))
    }
}
