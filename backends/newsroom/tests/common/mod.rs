#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use chrono::{Duration, NaiveDate};
use rstest::fixture;
use sqlx::SqlitePool;
use tower::ServiceExt;

use newsroom::{
    auth::SESSION_COOKIE,
    config::Settings,
    db::{self, Comment, NewComment, NewNews, News, User, UNUSABLE_PASSWORD},
    routes,
    utils::jwt::{self, SessionKeys},
    AppState,
};

pub const NEWS_COUNT_ON_HOME_PAGE: i64 = 10;

pub struct TestApp {
    pub router: Router,
    pub pool: SqlitePool,
    pub keys: SessionKeys,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
    }

    /// The `name=value` part of the session cookie this response sets.
    pub fn session_cookie(&self) -> Option<String> {
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .filter_map(|value| value.split(';').next())
            .find(|pair| pair.starts_with(SESSION_COOKIE))
            .map(str::to_string)
    }

    #[track_caller]
    pub fn assert_redirects(&self, to: &str) {
        assert!(
            self.status.is_redirection(),
            "expected a redirect to {to}, got {}",
            self.status
        );
        assert_eq!(self.location(), Some(to));
    }
}

impl TestApp {
    pub async fn new() -> Self {
        let pool = db::connect("sqlite::memory:").await.unwrap();
        db::prepare_db(&pool).await.unwrap();

        let keys = SessionKeys::from_secret(b"test secret", Duration::days(1));
        let settings = Settings {
            news_count_on_home_page: NEWS_COUNT_ON_HOME_PAGE,
        };
        let state = AppState::new(pool.clone(), keys.clone(), settings).unwrap();

        Self {
            router: routes::generate_routes(state),
            pool,
            keys,
        }
    }

    pub async fn create_user(&self, username: &str) -> User {
        db::create_user(&self.pool, username, UNUSABLE_PASSWORD)
            .await
            .unwrap()
    }

    /// Cookie header value that logs `user` in without going through the form.
    pub fn login_cookie(&self, user: &User) -> String {
        let token = jwt::generate_jwt(user.id, &self.keys).unwrap();
        format!("{SESSION_COOKIE}={token}")
    }

    pub async fn create_news(&self, title: &str, date: NaiveDate) -> News {
        db::create_news(
            &self.pool,
            NewNews {
                title,
                text: "Просто текст.",
                date,
            },
        )
        .await
        .unwrap()
    }

    pub async fn create_comment(&self, news: &News, author: &User, text: &str) -> Comment {
        db::create_comment(
            &self.pool,
            NewComment {
                news_id: news.id,
                author_id: author.id,
                text,
            },
        )
        .await
        .unwrap()
    }

    pub async fn comment_count(&self) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM comments")
            .fetch_one(&self.pool)
            .await
            .unwrap()
    }

    pub async fn only_comment(&self) -> Comment {
        sqlx::query_as::<_, Comment>("SELECT * FROM comments")
            .fetch_one(&self.pool)
            .await
            .unwrap()
    }

    pub async fn request(&self, method: Method, uri: &str, cookie: Option<&str>, form: Option<&[(&str, &str)]>) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }

        let body = match form {
            Some(fields) => {
                builder = builder.header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
                let encoded = url::form_urlencoded::Serializer::new(String::new())
                    .extend_pairs(fields)
                    .finish();
                Body::from(encoded)
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();

        TestResponse {
            status,
            headers,
            body: String::from_utf8(bytes.to_vec()).unwrap(),
        }
    }

    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> TestResponse {
        self.request(Method::GET, uri, cookie, None).await
    }

    pub async fn post(&self, uri: &str, cookie: Option<&str>, form: &[(&str, &str)]) -> TestResponse {
        self.request(Method::POST, uri, cookie, Some(form)).await
    }
}

pub fn today() -> NaiveDate {
    chrono::Utc::now().date_naive()
}

pub fn detail_url(news: &News) -> String {
    format!("/news/{}/", news.id)
}

pub fn edit_url(comment: &Comment) -> String {
    format!("/edit_comment/{}/", comment.id)
}

pub fn delete_url(comment: &Comment) -> String {
    format!("/delete_comment/{}/", comment.id)
}

/// An author, a second user and a news item.
pub struct NewsWorld {
    pub app: TestApp,
    pub author: User,
    pub not_author: User,
    pub news: News,
}

impl NewsWorld {
    pub fn author_cookie(&self) -> String {
        self.app.login_cookie(&self.author)
    }

    pub fn not_author_cookie(&self) -> String {
        self.app.login_cookie(&self.not_author)
    }
}

/// [`NewsWorld`] plus one comment by the author.
pub struct CommentWorld {
    pub world: NewsWorld,
    pub comment: Comment,
}

async fn build_news_world() -> NewsWorld {
    let app = TestApp::new().await;
    let author = app.create_user("Author").await;
    let not_author = app.create_user("NotAuthor").await;
    let news = app.create_news("Новость", today()).await;

    NewsWorld {
        app,
        author,
        not_author,
        news,
    }
}

#[fixture]
pub async fn news_world() -> NewsWorld {
    build_news_world().await
}

#[fixture]
pub async fn comment_world() -> CommentWorld {
    let world = build_news_world().await;
    let comment = world
        .app
        .create_comment(&world.news, &world.author, "Просто текст.")
        .await;

    CommentWorld { world, comment }
}
