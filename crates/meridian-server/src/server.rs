use std::net::SocketAddr;

use axum::{middleware, routing::get, Router};
use metrics_exporter_prometheus::PrometheusHandle;
use tower::ServiceBuilder;

use crate::handlers::{
    config_files::{query_config_as_json, query_config_as_properties, query_config_as_raw},
    health::health_check,
    metrics::metrics_handler,
};
use crate::middleware::{access_log, RequestIdLayer};
use crate::state::AppState;

/// Creates the application router: the three config-file routes plus health,
/// with the request-id/logging/metrics middleware applied.
pub fn create_router_with_state(state: AppState) -> Router {
    let middleware_stack = ServiceBuilder::new()
        .layer(RequestIdLayer)
        .layer(middleware::from_fn(access_log));

    Router::new()
        .route("/health", get(health_check))
        .route(
            "/configfiles/{app_id}/{cluster_name}/{namespace}",
            get(query_config_as_properties),
        )
        .route(
            "/configfiles/json/{app_id}/{cluster_name}/{namespace}",
            get(query_config_as_json),
        )
        .route(
            "/configfiles/raw/{app_id}/{cluster_name}/{namespace}",
            get(query_config_as_raw),
        )
        .with_state(state)
        .layer(middleware::from_fn(
            crate::metrics::http::http_metrics_middleware,
        ))
        .layer(middleware_stack)
}

/// Application router plus the Prometheus exposition endpoint.
pub fn create_router_with_metrics(state: AppState, prometheus_handle: PrometheusHandle) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(metrics_handler))
        .with_state(prometheus_handle);

    create_router_with_state(state).merge(metrics_router)
}

/// Runs the server until a shutdown signal arrives.
pub async fn run_server_with_state(
    addr: SocketAddr,
    state: AppState,
    prometheus_handle: PrometheusHandle,
) -> Result<(), std::io::Error> {
    let app = create_router_with_metrics(state, prometheus_handle);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
