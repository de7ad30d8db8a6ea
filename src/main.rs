//! # AR-15 Catalog CLI (`catalog`)
//!
//! ## Usage
//!
//! ```bash
//! catalog --config ./config/catalog.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `catalog init` | Create the SQLite database and run schema migrations |
//! | `catalog serve` | Start the HTTP API |
//! | `catalog enums <category>` | Print a category's enumeration registry as JSON |
//! | `catalog schema` | Print every collection with its unique fields and indexes |
//!
//! `enums` and `schema` read only compiled-in data and never touch the
//! config file.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use ar15_catalog::config::{self, Backend, Config};
use ar15_catalog::core::Category;
use ar15_catalog::{inspect, migrate, server};

/// AR-15 parts catalog: grips, handguards, and trigger guards.
#[derive(Parser)]
#[command(
    name = "catalog",
    about = "AR-15 parts catalog service",
    version,
    long_about = "Stores AR-15 grips, handguards, and trigger guards as product groups and \
    purchasable variants, validates them against per-category enumerations, and serves \
    them over an HTTP API."
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/catalog.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the database schema.
    ///
    /// Idempotent: running it on an existing database is a no-op.
    Init,

    /// Start the HTTP server.
    Serve,

    /// Print the enumeration registry of a category.
    Enums {
        /// `grips`, `handguards`, or `trigger-guards`.
        category: Category,
    },

    /// Print collection declarations.
    Schema,
}

fn init_tracing(cfg: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cfg.server.log_filter));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Commands that don't require config
    match &cli.command {
        Commands::Enums { category } => {
            println!("{}", inspect::enums_json(*category)?);
            return Ok(());
        }
        Commands::Schema => {
            print!("{}", inspect::schema_report());
            return Ok(());
        }
        _ => {}
    }

    let cfg = config::load_config(&cli.config)?;
    init_tracing(&cfg);

    match cli.command {
        Commands::Init => {
            if cfg.db.backend == Backend::Memory {
                println!("Memory backend configured; nothing to initialize.");
                return Ok(());
            }
            migrate::run_migrations(&cfg)
                .await
                .with_context(|| format!("Failed to initialize {}", cfg.db.path.display()))?;
            println!("Database initialized successfully.");
        }
        Commands::Serve => {
            server::run_server(&cfg).await?;
        }
        Commands::Enums { .. } | Commands::Schema => {}
    }

    Ok(())
}
