//! salesdm CLI
//!
//! Serve simulated direct-message replies and manage the product catalog.

use anyhow::Result;
use clap::Parser;
use salesdm_core::error::exit_codes;
use salesdm_core::{Config, Database, SalesDmError};
use tracing_subscriber::EnvFilter;

mod app;
mod commands;
mod output;

use app::{Cli, Commands};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {:#}", e);
        let code = e
            .downcast_ref::<SalesDmError>()
            .map(SalesDmError::exit_code)
            .unwrap_or(exit_codes::GENERAL_ERROR);
        std::process::exit(code);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    init_tracing(&config, cli.verbose);

    let mut db = Database::open(&config.database_path)?;
    db.initialize()?;

    match cli.command {
        Commands::Serve(args) => commands::serve::run(args, db, config).await,
        Commands::Catalog(args) => commands::catalog::run(args, &mut db, cli.format).await,
        Commands::Search(args) => commands::search::run(args, &db, &config, cli.format).await,
        Commands::Ask(args) => commands::ask::run(args, &db, &config, cli.format).await,
        Commands::Status => commands::status::run(&db, &config, cli.format).await,
    }
}

/// `RUST_LOG` wins; otherwise the configured level, or debug with `--verbose`
fn init_tracing(config: &Config, verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new(config.log_filter())
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
