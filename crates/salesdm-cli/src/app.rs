//! CLI argument definitions

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "salesdm")]
#[command(
    author,
    version,
    about = "Direct-message sales assistant backed by a local product catalog"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "cli")]
    pub format: OutputFormat,

    /// Config file (defaults to <config dir>/salesdm/config.yml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP service
    Serve(ServeArgs),

    /// Manage the product catalog
    Catalog(CatalogArgs),

    /// Show keywords and retrieved products for a message
    Search(SearchArgs),

    /// Run the full reply pipeline for a message
    Ask(AskArgs),

    /// Show catalog and service status
    Status,
}

#[derive(Args)]
pub struct ServeArgs {
    /// Address to bind, overrides config
    #[arg(long)]
    pub bind: Option<String>,

    /// Do not insert the sample catalog into an empty database
    #[arg(long)]
    pub no_seed: bool,
}

#[derive(Args)]
pub struct CatalogArgs {
    #[command(subcommand)]
    pub action: CatalogAction,
}

#[derive(Subcommand)]
pub enum CatalogAction {
    /// Create the schema
    Init,

    /// Insert the sample catalog if the database is empty
    Seed,

    /// Import products from a JSON or CSV file
    Import {
        file: PathBuf,

        /// Remove existing products first
        #[arg(long)]
        replace: bool,
    },

    /// List products
    List {
        #[arg(short = 'n', long, default_value = "50")]
        limit: usize,
    },
}

#[derive(Args)]
pub struct SearchArgs {
    /// Customer message
    #[arg(required = true, num_args = 1..)]
    pub query: Vec<String>,

    /// Maximum products, overrides config
    #[arg(short = 'n', long)]
    pub top_k: Option<usize>,
}

#[derive(Args)]
pub struct AskArgs {
    /// Customer message
    #[arg(required = true, num_args = 1..)]
    pub text: Vec<String>,
}

#[derive(Clone, Copy, ValueEnum, Default, PartialEq, Eq, Debug)]
pub enum OutputFormat {
    #[default]
    Cli,
    Json,
}
