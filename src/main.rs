//! taskd — a minimal HTTP service for managing task records.
//!
//! Opens (or creates) the SQLite database, bootstraps the schema, and
//! serves the REST API. Startup failures are fatal: the process never
//! accepts connections without a working store.

use anyhow::Result;
use clap::Parser;
use std::fs::OpenOptions;
use std::sync::Arc;
use taskd::config::Config;
use taskd::db::Database;
use taskd::server::start_server;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "taskd", version, about = "Task record HTTP service")]
struct Cli {
    /// Path to a YAML config file (default: taskd.yaml if present)
    #[arg(long)]
    config: Option<String>,

    /// Path to the SQLite database file (overrides config)
    #[arg(long)]
    database: Option<String>,

    /// Port to listen on (overrides config)
    #[arg(long)]
    port: Option<u16>,

    /// Log destination: 0/off, 1/stdout, 2/stderr, or a filename
    #[arg(long, default_value = "2")]
    log: String,

    /// Enable debug-level logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on --log option
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    match cli.log.as_str() {
        "0" | "off" => {
            // No logging
        }
        "1" | "stdout" => {
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(std::io::stdout)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        "2" | "stderr" => {
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(std::io::stderr)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        filename => {
            // Log to file (append mode)
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(filename)?;
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(file)
                .with_ansi(false)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
    }

    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::load_or_default(),
    };

    // Override paths from CLI arguments
    if let Some(db_path) = &cli.database {
        config.server.db_path = db_path.into();
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    config.ensure_db_dir()?;
    let db = Database::open(&config.server.db_path)?;
    info!("Opened database at {}", config.server.db_path.display());

    start_server(Arc::new(db), config.server.port).await
}
