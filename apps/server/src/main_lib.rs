use std::sync::Arc;

use crate::config::Config;
use tardi_core::interest::{InterestService, InterestServiceTrait};
use tardi_storage_sqlite::{
    db::{self, PoolOptions},
    interest::InterestRepository,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub struct AppState {
    pub interest_service: Arc<dyn InterestServiceTrait + Send + Sync>,
}

pub fn init_tracing() {
    let log_format = std::env::var("TARDI_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

/// Wires storage and services from an explicit config. Nothing here reads the
/// environment, so tests and embedders can inject their own settings.
pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let database_url = db::init(&config.database_url)?;
    tracing::info!("Database in use: {}", database_url);

    let pool_options = PoolOptions {
        max_size: config.db_pool_size,
        ..PoolOptions::default()
    };
    let pool = db::create_pool(&database_url, &pool_options)?;
    db::run_migrations(&pool)?;
    let writer = db::spawn_writer((*pool).clone());

    let interest_repository = Arc::new(InterestRepository::new(pool.clone(), writer));
    let interest_service: Arc<dyn InterestServiceTrait + Send + Sync> =
        Arc::new(InterestService::new(interest_repository));

    Ok(Arc::new(AppState { interest_service }))
}
