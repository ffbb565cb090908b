use anyhow::Context;
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use tracing::info;

use newsroom::{
    config::{DatabaseArgs, ServeArgs},
    db::{self, NewNews},
    routes,
    utils::hasher,
    AppState,
};

/// News site with comments.
#[derive(Parser, Debug)]
#[command(name = "newsroom", about = "News site with comments")]
struct Cli {
    #[command(flatten)]
    db: DatabaseArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the web server.
    Serve(ServeArgs),

    /// Create the schema, optionally dropping existing tables first.
    Migrate {
        #[arg(long)]
        reset: bool,
    },

    /// Publish a news item.
    AddNews {
        #[arg(long)]
        title: String,
        #[arg(long)]
        text: String,
        /// Publication date, defaults to today.
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Create a user account.
    CreateUser {
        #[arg(long)]
        username: String,
        #[arg(long, env = "NEWSROOM_PASSWORD", hide_env_values = true)]
        password: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    let pool = db::connect(&cli.db.database_url)
        .await
        .with_context(|| format!("failed to open database {}", cli.db.database_url))?;

    match cli.command {
        Command::Serve(args) => {
            db::prepare_db(&pool).await?;

            let state = AppState::new(pool, args.session_keys(), args.settings())?;
            let app = routes::generate_routes(state);

            info!("Listening on {}", args.listen);
            axum::Server::bind(&args.listen)
                .serve(app.into_make_service())
                .with_graceful_shutdown(shutdown_signal())
                .await?;
        }
        Command::Migrate { reset } => {
            if reset {
                db::initialize_db(&pool).await?;
                info!("Database reset");
            } else {
                db::prepare_db(&pool).await?;
                info!("Schema is up to date");
            }
        }
        Command::AddNews { title, text, date } => {
            db::prepare_db(&pool).await?;
            let date = date.unwrap_or_else(|| Utc::now().date_naive());
            let news = db::create_news(&pool, NewNews { title: &title, text: &text, date }).await?;
            info!(news_id = news.id, "News published");
        }
        Command::CreateUser { username, password } => {
            db::prepare_db(&pool).await?;
            let hash = hasher::hash_password(&password)?;
            let user = db::create_user(&pool, &username, &hash).await?;
            info!(user_id = user.id, "User {} created", user.username);
        }
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", err);
    }
    info!("Shutting down");
}
