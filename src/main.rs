//! spendlog - Minimal in-memory expense tracking API

use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use spendlog::api::{self, AppState};
use spendlog::config::Config;
use spendlog::store::ExpenseStore;

#[derive(Parser)]
#[command(name = "spendlog")]
#[command(about = "Minimal in-memory expense tracking API")]
#[command(version)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind (overrides config)
        #[arg(long)]
        host: Option<String>,
    },

    /// Print the seed records as JSON
    Seed,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            format!("spendlog={},tower_http=debug", log_level).into()
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment
    let _ = dotenvy::dotenv();

    // Load config
    let mut config = Config::load()?;

    match cli.command {
        Commands::Serve { port, host } => {
            if let Some(port) = port {
                config.port = port;
            }
            if let Some(host) = host {
                config.host = host;
            }

            let state = AppState {
                store: Arc::new(ExpenseStore::with_seed_data()),
            };
            let router = api::create_router(state);

            tracing::info!("Starting HTTP server on {}", config.listen_addr());

            let listener = tokio::net::TcpListener::bind(config.listen_addr()).await?;

            println!("spendlog server running at http://localhost:{}", config.port);
            println!("  Expenses: http://localhost:{}/expenses", config.port);
            println!("  API Docs: http://localhost:{}/api/docs", config.port);
            println!("  Health:   http://localhost:{}/health", config.port);

            axum::serve(listener, router).await?;
        }

        Commands::Seed => {
            let store = ExpenseStore::with_seed_data();
            let expenses = store.list().await;
            println!("{}", serde_json::to_string_pretty(&expenses)?);
        }
    }

    Ok(())
}
