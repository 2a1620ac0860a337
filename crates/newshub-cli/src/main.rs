use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use newshub_core::{AppConfig, NewsClient, SessionStore};

mod commands;
mod display;

#[derive(Parser)]
#[command(name = "newshub")]
#[command(author, version, about = "Read and manage NewsHub articles from the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Trending article followed by the full feed
    Home,
    /// Browse the feed with filters and sorting
    Feed(FeedArgs),
    /// Show the trending article and the latest headlines
    Hero,
    /// List the categories and regions present in the feed
    Facets,
    /// Read an article (counts one view)
    Show {
        /// Article id
        id: String,
    },
    /// Log in as an administrator
    Login {
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
    },
    /// Create an administrator account
    Register {
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Manage articles (requires login)
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Args, Default)]
pub struct FeedArgs {
    /// Only articles tagged with this category
    #[arg(short, long)]
    pub category: Option<String>,
    /// Only articles from this region
    #[arg(short = 'r', long)]
    pub country: Option<String>,
    /// Earliest publication day (YYYY-MM-DD, inclusive)
    #[arg(long)]
    pub from: Option<NaiveDate>,
    /// Latest publication day (YYYY-MM-DD, inclusive)
    #[arg(long)]
    pub to: Option<NaiveDate>,
    /// newest, oldest or popular (anything else keeps API order)
    #[arg(short, long)]
    pub sort: Option<String>,
}

#[derive(Subcommand)]
enum AdminAction {
    /// List all articles
    List,
    /// Publish a new article; categories are assigned by the backend
    Create {
        #[arg(long)]
        headline: String,
        #[arg(long)]
        body: String,
        /// Comma-separated regions
        #[arg(long)]
        regions: String,
        /// Publication day (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Edit an article; omitted fields keep their current value
    Update {
        id: String,
        #[arg(long)]
        headline: Option<String>,
        #[arg(long)]
        body: Option<String>,
        /// Comma-separated regions
        #[arg(long)]
        regions: Option<String>,
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Delete an article
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = AppConfig::load()?;

    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| config.general.log_level.clone()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let store = SessionStore::from_config(&config);
    let client = NewsClient::new(&config, store.load()?)?;

    match cli.command {
        Some(Commands::Home) | None => commands::feed::home(&client, &config).await,
        Some(Commands::Feed(args)) => commands::feed::run(&client, &config, &args).await,
        Some(Commands::Hero) => commands::hero::run(&client, &config).await,
        Some(Commands::Facets) => commands::facets::run(&client).await,
        Some(Commands::Show { id }) => commands::show::run(&client, &id).await,
        Some(Commands::Login { email, password }) => {
            commands::auth::login(&client, &store, &email, &password).await
        }
        Some(Commands::Register { email, password }) => {
            commands::auth::register(&client, &email, &password).await
        }
        Some(Commands::Logout) => commands::auth::logout(&store),
        Some(Commands::Admin { action }) => {
            commands::admin::ensure_logged_in(&client)?;
            match action {
                AdminAction::List => commands::admin::list(&client).await,
                AdminAction::Create {
                    headline,
                    body,
                    regions,
                    date,
                } => commands::admin::create(&client, &headline, &body, &regions, date).await,
                AdminAction::Update {
                    id,
                    headline,
                    body,
                    regions,
                    date,
                } => {
                    let changes = commands::admin::ArticleChanges {
                        headline,
                        body,
                        regions,
                        date,
                    };
                    commands::admin::update(&client, &id, changes).await
                }
                AdminAction::Delete { id, yes } => commands::admin::delete(&client, &id, yes).await,
            }
        }
    }
}
