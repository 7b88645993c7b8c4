//! KundaPay Quote Server
//!
//! Prices money transfers between Gabon and its partner countries.

mod api;
mod config;
mod server;
mod shutdown;
mod state;

use clap::Parser;
use config::file::StoreBackend;
use config::{ConfigLoader, StoreConfig, get_database_url};
use kundapay_core::framework::DatabaseProcessor;
use kundapay_core::quote::QuoteCalculator;
use kundapay_core::repository::{
    CachedQuoteRepository, FixtureQuoteRepository, PgQuoteRepository, QuoteRepository,
};
use server::{build_router, run_server};
use shutdown::spawn_config_reload_handler;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use state::AppState;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// KundaPay - transfer quote service
#[derive(Parser, Debug)]
#[command(name = "kundapay-server")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the configuration file
    #[arg(short, long, default_value = "./kundapay-config.toml")]
    config: PathBuf,

    /// Override the listen address (e.g., 0.0.0.0:3000)
    #[arg(short, long)]
    listen: Option<SocketAddr>,

    /// Run database migrations on startup
    #[arg(long, default_value = "false")]
    migrate: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    init_tracing();

    // Parse command line arguments
    let args = Args::parse();

    tracing::info!("Starting kundapay-server v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config_loader = Arc::new(ConfigLoader::new(&args.config, args.listen));
    let loaded_config = config_loader.load().map_err(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        e
    })?;

    let listen_addr = loaded_config.server.listen;
    tracing::info!("Configuration loaded from {:?}", args.config);

    // Pick the rate/fee/promo store
    let (repository, db_pool) = connect_store(&loaded_config.store, args.migrate).await?;

    // Create application state
    let calculator = QuoteCalculator::new(repository, loaded_config.limits);
    let state = AppState::new(calculator, loaded_config.debounce);

    // Spawn config reload handler (listens for SIGHUP)
    let shutdown_notify = spawn_config_reload_handler(state.clone(), config_loader);

    // Build the router
    let router = build_router(state);

    // Run the server
    tracing::info!("Starting HTTP server on {}", listen_addr);
    let result = run_server(router, listen_addr).await;

    // Signal the config reload handler to stop
    shutdown_notify.notify_one();

    // Close database connections gracefully
    if let Some(db_pool) = db_pool {
        tracing::info!("Closing database connections...");
        db_pool.close().await;
    }
    tracing::info!("Server shutdown complete");

    result.map_err(Into::into)
}

/// Build the quote repository for the configured backend.
///
/// Returns the pool as well when the backend is Postgres so it can be
/// closed on shutdown.
async fn connect_store(
    store: &StoreConfig,
    migrate: bool,
) -> anyhow::Result<(Arc<dyn QuoteRepository>, Option<PgPool>)> {
    let (repository, db_pool): (Arc<dyn QuoteRepository>, Option<PgPool>) = match store.backend {
        StoreBackend::Fixtures => {
            tracing::warn!("Using built-in fixture rates and fees, no database");
            (Arc::new(FixtureQuoteRepository::seeded()), None)
        }
        StoreBackend::Postgres => {
            // Get database URL from environment
            let database_url = get_database_url().map_err(|e| {
                tracing::error!("DATABASE_URL environment variable not set");
                e
            })?;

            // Create database connection pool
            tracing::info!("Connecting to database...");
            let db_pool = PgPoolOptions::new()
                .max_connections(10)
                .connect(&database_url)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to connect to database: {}", e);
                    e
                })?;
            tracing::info!("Database connection established");

            // Run migrations if requested
            if migrate {
                tracing::info!("Running database migrations...");
                sqlx::migrate!("../migrations")
                    .run(&db_pool)
                    .await
                    .map_err(|e| {
                        tracing::error!("Failed to run migrations: {}", e);
                        e
                    })?;
                tracing::info!("Migrations completed successfully");
            }

            let processor = DatabaseProcessor::new(db_pool.clone());
            (Arc::new(PgQuoteRepository::new(processor)), Some(db_pool))
        }
    };

    let repository = match store.cache_ttl {
        Some(ttl) => {
            tracing::info!(ttl_secs = ttl.as_secs(), "Caching rate and fee lookups");
            Arc::new(CachedQuoteRepository::new(repository, ttl)) as Arc<dyn QuoteRepository>
        }
        None => repository,
    };

    Ok((repository, db_pool))
}

/// Initialize the tracing subscriber with environment-based filtering.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
