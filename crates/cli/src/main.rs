use std::sync::Arc;

use clap::{Parser, Subcommand};
use stonks_core::gateway::{DataGateway, HttpDataGateway};
use stonks_core::store::catalog::FIRST_PAGE;
use stonks_core::store::{CatalogStore, RecommendationStore};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod browse;
mod render;

#[derive(Debug, Parser)]
#[command(name = "stonks_cli")]
struct Args {
    /// Print state snapshots as pretty JSON instead of a table.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show one page of the rating catalog.
    List {
        #[arg(long, default_value_t = FIRST_PAGE)]
        page: u32,
    },
    /// Show every rating event for a ticker.
    Search { ticker: String },
    /// Leave search mode and show the first catalog page.
    Clear,
    /// Show the current buy recommendations.
    Recommendations,
    /// Interactive session reading commands from stdin.
    Browse,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = stonks_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer())
        .init();

    let args = Args::parse();

    if let Err(err) = run(&settings, args).await {
        sentry_anyhow::capture_anyhow(&err);
        tracing::error!(error = %err, "stonks_cli failed");
        return Err(err);
    }

    Ok(())
}

async fn run(settings: &stonks_core::config::Settings, args: Args) -> anyhow::Result<()> {
    let gateway: Arc<dyn DataGateway> = Arc::new(HttpDataGateway::from_settings(settings)?);
    let catalog = CatalogStore::with_page_size(Arc::clone(&gateway), settings.page_size);
    let recommendations = RecommendationStore::new(gateway);

    match args.command {
        Command::List { page } => {
            anyhow::ensure!(page >= FIRST_PAGE, "page must be >= {FIRST_PAGE}");
            catalog.load_page(page).await;
            render::print_catalog(&catalog.snapshot(), args.json)
        }
        Command::Search { ticker } => {
            catalog.search_by_ticker(&ticker).await;
            render::print_catalog(&catalog.snapshot(), args.json)
        }
        Command::Clear => {
            catalog.clear_search().await;
            render::print_catalog(&catalog.snapshot(), args.json)
        }
        Command::Recommendations => {
            recommendations.load_recommendations().await;
            render::print_recommendations(&recommendations.snapshot(), args.json)
        }
        Command::Browse => browse::run(catalog, recommendations, args.json).await,
    }
}

fn init_sentry(settings: &stonks_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
