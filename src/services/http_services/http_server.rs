use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::HeaderValue,
    routing::{get, post},
};
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::{
    models::{
        config_models::Config,
        error_models::{AppError, ConfigError},
        validation_models::{AnalysisRequest, ValidationResult},
    },
    services::validation_services::request_validation::validation_service::ValidationService,
};

pub const ANALYZE_ROUTE: &str = "/analizar-codigo";

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ValidationService>,
}

pub fn create_router(state: AppState, allowed_origin: &str) -> Result<Router, ConfigError> {
    Ok(Router::new()
        .route("/health", get(|| async { "OK" }))
        .route(ANALYZE_ROUTE, post(analyze_code))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(allowed_origin)?)
        .with_state(state))
}

/// Single origin with credentials. `Any` is not allowed together with
/// credentials, so methods and headers mirror the preflight request instead.
fn cors_layer(allowed_origin: &str) -> Result<CorsLayer, ConfigError> {
    let origin = HeaderValue::from_str(allowed_origin)
        .map_err(|e| ConfigError::Invalid(format!("bad CORS origin {:?}: {}", allowed_origin, e)))?;
    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list([origin]))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request()))
}

async fn analyze_code(
    State(state): State<AppState>,
    Json(request): Json<AnalysisRequest>,
) -> Result<Json<ValidationResult>, AppError> {
    let result = state.service.analyze(&request).await?;
    Ok(Json(result))
}

pub async fn run_http_server(
    config: &Config,
    service: ValidationService,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let addr = config.socket_address()?;
    let state = AppState {
        service: Arc::new(service),
    };
    let app = create_router(state, &config.cors.allowed_origin)?;

    let listener = TcpListener::bind(addr).await?;
    info!(
        "{} listening on http://{} (origin {})",
        config.build.service_name, addr, config.cors.allowed_origin
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
