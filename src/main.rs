mod models;
mod services;
mod utils;

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use models::config_models::Config;
use services::{
    execution_services::process_runner::ProcessRunner,
    http_services::http_server::run_http_server,
    validation_services::{
        language_validation::ValidatorRegistry,
        request_validation::validation_service::ValidationService,
    },
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load()?;

    let registry = ValidatorRegistry::from_config(&config, Arc::new(ProcessRunner));
    info!(
        "{} validators ready, tool timeout {:?}",
        registry.len(),
        config.tool_timeout()
    );
    let service = ValidationService::new(registry);

    run_http_server(&config, service).await
}
