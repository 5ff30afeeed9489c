//! Service entry point

use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use emotion_recommender::api::{build_router, AppState};
use emotion_recommender::catalog::{seed_demo_catalog, ContentIndex};
use emotion_recommender::config::Config;
use emotion_recommender::emotion::StrategyTable;
use emotion_recommender::engine::RecommendationEngine;
use emotion_recommender::profile::{AdaptationLearner, ProfileStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::load()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone()));
    if config.logging.json {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    info!("Starting emotion-recommender");

    let strategy = Arc::new(StrategyTable::new()?);
    let index = Arc::new(ContentIndex::new());
    if config.catalog.seed_demo_data {
        let seeded = seed_demo_catalog(&index)?;
        info!("Seeded demo catalog: {} records", seeded);
    }

    let profiles = Arc::new(ProfileStore::new(config.engine.history_limit));
    let engine = Arc::new(RecommendationEngine::new(
        strategy,
        index.clone(),
        profiles.clone(),
        config.engine.clone(),
    ));
    let learner = Arc::new(AdaptationLearner::new(index.clone(), profiles.clone()));

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState {
        engine,
        learner,
        profiles,
        index,
        config: Arc::new(config),
    };
    let router = build_router(state);

    info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
