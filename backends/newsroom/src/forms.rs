//! HTML form payloads and their validation.
//!
//! Field-level rules (required, length) are declared with `validator`; rules
//! that depend on injected state, like the comment denylist, run afterwards
//! and add to the same [`FormErrors`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

pub const BAD_WORDS: [&str; 2] = ["редиска", "негодяй"];
pub const WARNING: &str = "Не ругайтесь!";
pub const REQUIRED: &str = "This field is required.";
const MAX_USERNAME_LENGTH: usize = 150;

/// Rejects comment text containing any denylisted word.
///
/// Matching is a plain case-sensitive substring test, so a denylisted word
/// inside a longer word is rejected as well.
#[derive(Debug, Clone)]
pub struct CommentFilter {
    bad_words: Vec<String>,
    warning: String,
}

impl Default for CommentFilter {
    fn default() -> Self {
        Self::new(BAD_WORDS, WARNING)
    }
}

impl CommentFilter {
    pub fn new<I, S>(bad_words: I, warning: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            bad_words: bad_words.into_iter().map(Into::into).collect(),
            warning: warning.into(),
        }
    }

    pub fn warning(&self) -> &str {
        &self.warning
    }

    pub fn check(&self, text: &str) -> Result<(), &str> {
        if self.bad_words.iter().any(|word| text.contains(word.as_str())) {
            return Err(&self.warning);
        }
        Ok(())
    }
}

/// Error messages keyed by field name.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FormErrors(BTreeMap<&'static str, Vec<String>>);

impl FormErrors {
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn field(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    fn from_validation(result: Result<(), ValidationErrors>) -> Self {
        let mut errors = Self::default();
        if let Err(validation) = result {
            for (field, field_errors) in validation.field_errors() {
                for error in field_errors {
                    let message = error
                        .message
                        .as_ref()
                        .map(ToString::to_string)
                        .unwrap_or_else(|| error.code.to_string());
                    errors.add(field, message);
                }
            }
        }
        errors
    }
}

/// A form together with the errors found when it was submitted.
#[derive(Debug, Default, Serialize)]
pub struct BoundForm<F> {
    pub data: F,
    pub errors: FormErrors,
}

impl<F> BoundForm<F> {
    pub fn unbound(data: F) -> Self {
        Self { data, errors: FormErrors::default() }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

#[derive(Debug, Default, Clone, Deserialize, Serialize, Validate)]
pub struct CommentForm {
    #[serde(default)]
    #[validate(length(min = 1, message = "This field is required."))]
    pub text: String,
}

impl CommentForm {
    pub fn bind(mut self, filter: &CommentFilter) -> BoundForm<Self> {
        self.text = self.text.trim().to_string();

        let mut errors = FormErrors::from_validation(self.validate());
        if errors.field("text").is_empty() {
            if let Err(warning) = filter.check(&self.text) {
                errors.add("text", warning);
            }
        }

        BoundForm { data: self, errors }
    }
}

#[derive(Debug, Default, Clone, Deserialize, Serialize, Validate)]
pub struct LoginForm {
    #[serde(default)]
    #[validate(length(min = 1, message = "This field is required."))]
    pub username: String,
    #[serde(default, skip_serializing)]
    #[validate(length(min = 1, message = "This field is required."))]
    pub password: String,
    #[serde(default, skip_serializing)]
    pub next: Option<String>,
}

impl LoginForm {
    pub fn bind(mut self) -> BoundForm<Self> {
        self.username = self.username.trim().to_string();
        let errors = FormErrors::from_validation(self.validate());
        BoundForm { data: self, errors }
    }
}

#[derive(Debug, Default, Clone, Deserialize, Serialize, Validate)]
pub struct SignupForm {
    #[serde(default)]
    #[validate(length(min = 1, message = "This field is required."))]
    pub username: String,
    #[serde(default, skip_serializing)]
    #[validate(length(min = 8, message = "This password is too short. It must contain at least 8 characters."))]
    pub password1: String,
    #[serde(default, skip_serializing)]
    pub password2: String,
}

impl SignupForm {
    pub fn bind(mut self) -> BoundForm<Self> {
        self.username = self.username.trim().to_string();

        let mut errors = FormErrors::from_validation(self.validate());
        if self.username.chars().count() > MAX_USERNAME_LENGTH {
            errors.add("username", "Ensure this value has at most 150 characters.");
        }
        if self.password1 != self.password2 {
            errors.add("password2", "The two password fields didn't match.");
        }

        BoundForm { data: self, errors }
    }
}
