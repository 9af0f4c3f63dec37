//! Ask command

use crate::app::{AskArgs, OutputFormat};
use anyhow::Result;
use salesdm_core::{Config, Database, Retriever, SalesResponder};

pub async fn run(args: AskArgs, db: &Database, config: &Config, format: OutputFormat) -> Result<()> {
    let text = args.text.join(" ");
    let text = text.trim();
    if text.is_empty() {
        anyhow::bail!("message cannot be empty or whitespace");
    }

    let products = Retriever::new(db, config.retrieval.top_k).retrieve_relevant_products(text)?;
    tracing::info!("Retrieved {} products for query", products.len());

    let responder =
        SalesResponder::from_config(config.llm.clone(), config.retrieval.max_context_length)?;
    let reply = responder.generate_response(text, &products).await;

    match format {
        OutputFormat::Json => {
            let ids: Vec<i64> = products.iter().map(|p| p.id).collect();
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "reply": reply,
                    "product_ids": ids,
                }))?
            );
        }
        OutputFormat::Cli => println!("{}", reply),
    }
    Ok(())
}
