//! Political candidates API entry point.

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use candidates_api::api::{create_router, AppState};
use candidates_api::config::Config;
use candidates_api::error::AppError;
use candidates_api::metrics;
use candidates_api::store::CandidateStore;
use candidates_api::utils::shutdown_signal;

/// Political candidates HTTP API.
#[derive(Parser, Debug)]
#[command(name = "candidates-api")]
#[command(about = "In-memory HTTP API for managing political candidates")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Option<Command>,

    /// HTTP server port (overrides PORT).
    #[arg(short, long)]
    port: Option<u16>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default).
    Serve {
        /// HTTP server port (overrides PORT).
        #[arg(short, long)]
        port: Option<u16>,

        /// Start with an empty collection instead of the sample candidates.
        #[arg(long)]
        no_seed: bool,
    },

    /// Check configuration validity.
    CheckConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Load configuration first so RUST_LOG from .env reaches the filter
    let loaded = Config::load();
    let level = loaded
        .as_ref()
        .map(|config| config.rust_log.as_str())
        .unwrap_or("info");

    // Initialize logging
    let registry = tracing_subscriber::registry().with(log_filter(args.verbose, level));
    if args.json_logs {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }

    // Handle subcommands
    match serve_options(&args) {
        Some((port, no_seed)) => cmd_serve(loaded, port, no_seed).await,
        None => cmd_check_config(loaded),
    }
}

/// Log filter for the given verbosity and configured level.
fn log_filter(verbose: bool, level: &str) -> EnvFilter {
    if verbose {
        EnvFilter::new("candidates_api=debug,info")
    } else {
        EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"))
    }
}

/// Port override and seeding flag when the server should run, `None` for
/// `check-config`. A `--port` given before the subcommand still applies.
fn serve_options(args: &Args) -> Option<(Option<u16>, bool)> {
    match &args.command {
        Some(Command::CheckConfig) => None,
        Some(Command::Serve { port, no_seed }) => Some((port.or(args.port), *no_seed)),
        None => Some((args.port, false)),
    }
}

/// Check configuration validity.
fn cmd_check_config(loaded: Result<Config, AppError>) -> anyhow::Result<()> {
    println!("======================================================================");
    println!("CANDIDATES API - CONFIGURATION CHECK");
    println!("======================================================================");

    print!("Loading configuration... ");
    let config = match loaded {
        Ok(c) => {
            println!("OK");
            c
        }
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration load failed"));
        }
    };

    print!("Validating configuration... ");
    match config.validate() {
        Ok(()) => println!("OK"),
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration validation failed"));
        }
    }

    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!("  Listen Address: {}:{}", config.bind_address, config.port);
    println!("  CORS Origins: {}", config.cors_origins.join(", "));
    println!("  Sample Data: {}", if config.seed_sample_data { "Enabled" } else { "Disabled" });
    println!("  Log Level: {}", config.rust_log);
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}

/// Run the HTTP server until a shutdown signal arrives.
async fn cmd_serve(
    loaded: Result<Config, AppError>,
    port_override: Option<u16>,
    no_seed: bool,
) -> anyhow::Result<()> {
    info!("Loading configuration...");
    let mut config = loaded.map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;

    // Override with CLI args if provided
    if let Some(port) = port_override {
        config.port = port;
    }
    if no_seed {
        config.seed_sample_data = false;
    }

    // Validate configuration
    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        return Err(anyhow::anyhow!("Configuration validation failed: {}", e));
    }

    let store = if config.seed_sample_data {
        CandidateStore::with_sample_data()
    } else {
        CandidateStore::new()
    };
    info!("Loaded {} candidates", store.count());

    // Create app state
    let mut app_state = AppState::new(store);
    match metrics::init_metrics() {
        Ok(handle) => app_state = app_state.with_metrics(handle),
        Err(e) => warn!("Metrics disabled: {}", e),
    }
    metrics::set_candidates_stored(app_state.store.read().await.count());

    // Start HTTP server
    let addr = config.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    info!("HTTP server listening on http://{}", addr);
    info!("CORS origins: {}", config.cors_origins.join(", "));

    let router = create_router(app_state, config.cors_header_values());

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
