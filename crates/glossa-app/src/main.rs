use std::sync::Arc;

use clap::Parser;
use glossa_core::{NormalizerSet, Pipeline, QueryService, StepResultCache};
use glossa_engine::{DummyEngine, EngineRegistry};
use tokio::signal;
use tokio_util::sync::CancellationToken;

mod cli;
mod logging;

use self::cli::Args;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let args = Args::parse();
    let config = args.load_config()?;
    logging::init(&config.log);

    let mut registry = EngineRegistry::new();
    registry.register(Arc::new(DummyEngine::new()))?;
    let registry = Arc::new(registry);

    let mut normalizers = NormalizerSet::new();
    normalizers.register_all(glossa_lang_english::normalizers())?;
    normalizers.register_all(glossa_lang_norwegian::normalizers())?;
    tracing::info!(
        "Loaded {} engines and {} normalizers",
        registry.len(),
        normalizers.len()
    );

    let cache = Arc::new(StepResultCache::new(
        config.executor.cache_capacity,
        config.executor.cache_ttl(),
    ));
    let pipeline = Pipeline::from_config(&config, Arc::new(normalizers), cache);
    let service = QueryService::new(registry, pipeline, config.aggregation.clone());

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            tracing::info!("Cancellation requested");
            trigger.cancel();
        }
    });

    let response = service
        .respond_raw_with_cancel(&args.query, &args.dictionaries, &args.languages, &cancel)
        .await;

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
