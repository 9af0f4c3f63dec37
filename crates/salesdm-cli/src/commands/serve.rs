//! Serve command

use crate::app::ServeArgs;
use anyhow::Result;
use salesdm_core::{Config, Database, SalesResponder};
use salesdm_server::AppState;

pub async fn run(args: ServeArgs, mut db: Database, mut config: Config) -> Result<()> {
    if let Some(bind) = args.bind {
        config.server.bind_addr = bind;
    }

    if !args.no_seed {
        db.seed_default_catalog()?;
    }

    let responder =
        SalesResponder::from_config(config.llm.clone(), config.retrieval.max_context_length)?;
    tracing::info!(
        "LLM endpoint {}, rate limit {}",
        config.llm.url,
        config.server.rate_limit
    );

    let state = AppState::new(db, responder, config.retrieval);
    salesdm_server::run_server(state, &config.server).await?;
    Ok(())
}
