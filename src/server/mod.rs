pub mod handlers;

use crate::adapters::cache::CachedSource;
use crate::adapters::credentials::EnvCredentials;
use crate::adapters::football_data::FootballDataClient;
use crate::adapters::user_store::InMemoryUserRepository;
use crate::core::aggregator::{AggregationSettings, MatchAggregator};
use crate::core::{ConfigProvider, FootballDataSource, UserRepository};
use crate::utils::error::Result;
use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use std::time::Instant;
use tokio::net::TcpListener;

/// Shared by every request handler. Built once per process.
#[derive(Clone)]
pub struct AppState {
    pub aggregator: Arc<MatchAggregator>,
    pub users: Arc<dyn UserRepository>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(aggregator: MatchAggregator, users: Arc<dyn UserRepository>) -> Self {
        Self {
            aggregator: Arc::new(aggregator),
            users,
            started_at: Instant::now(),
        }
    }

    /// Production wiring: HTTP client (optionally cached), key from the environment.
    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        let client = FootballDataClient::new(config.api_base_url(), config.request_timeout())?;
        let source: Arc<dyn FootballDataSource> = match config.cache_ttl() {
            Some(ttl) => {
                tracing::info!("Caching upstream responses for {}s", ttl.as_secs());
                Arc::new(CachedSource::new(client, ttl))
            }
            None => Arc::new(client),
        };

        let aggregator = MatchAggregator::new(
            source,
            Arc::new(EnvCredentials),
            AggregationSettings::from_config(config),
        );
        let settings = aggregator.settings();
        tracing::info!(
            "Aggregating {} (threshold {}, max {}, filter {:?})",
            settings.competitions.join(","),
            settings.threshold,
            settings.max_matches,
            settings.filter_policy
        );
        Ok(Self::new(aggregator, Arc::new(InMemoryUserRepository::new())))
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/matches", get(handlers::list_matches))
        .route("/api/competitions", get(handlers::list_competitions))
        .route("/healthz", get(handlers::health))
        .with_state(state)
}

/// Serves until ctrl-c.
pub async fn serve(listener: TcpListener, state: AppState) -> Result<()> {
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
