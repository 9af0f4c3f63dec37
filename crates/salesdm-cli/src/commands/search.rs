//! Search command

use crate::app::{OutputFormat, SearchArgs};
use crate::output;
use anyhow::Result;
use salesdm_core::{clean_query, extract_keywords, Config, Database, Retriever};

pub async fn run(
    args: SearchArgs,
    db: &Database,
    config: &Config,
    format: OutputFormat,
) -> Result<()> {
    let query = args.query.join(" ");
    let top_k = args.top_k.unwrap_or(config.retrieval.top_k).max(1);

    let keywords = extract_keywords(&clean_query(&query));
    let products = Retriever::new(db, top_k).retrieve_relevant_products(&query)?;

    print!(
        "{}",
        output::format_retrieval(&keywords, &products, format)
    );
    Ok(())
}
