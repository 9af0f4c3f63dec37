//! Status command

use crate::app::OutputFormat;
use anyhow::Result;
use salesdm_core::{Config, Database};

pub async fn run(db: &Database, config: &Config, format: OutputFormat) -> Result<()> {
    let products = db.count_products()?;
    let schema_version = db.schema_version()?;

    match format {
        OutputFormat::Json => {
            let status = serde_json::json!({
                "database": config.database_path,
                "schema_version": schema_version,
                "products": products,
                "llm_url": config.llm.url,
                "llm_timeout_secs": config.llm.timeout_secs,
                "rate_limit": config.server.parsed_rate_limit()?.to_string(),
                "top_k": config.retrieval.top_k,
                "max_context_length": config.retrieval.max_context_length,
            });
            println!("{}", serde_json::to_string_pretty(&status)?);
        }
        OutputFormat::Cli => {
            println!("Database:        {}", config.database_path.display());
            println!("Schema version:  {}", schema_version.unwrap_or_default());
            println!("Products:        {}", products);
            println!();
            println!("LLM:");
            println!("  URL:           {}", config.llm.url);
            println!("  Timeout:       {}s", config.llm.timeout_secs);
            println!();
            println!("Server:");
            println!("  Bind:          {}", config.server.bind_addr);
            println!("  Rate limit:    {}", config.server.parsed_rate_limit()?);
            println!("  Top K:         {}", config.retrieval.top_k);
        }
    }
    Ok(())
}
