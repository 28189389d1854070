//! HTTP Server
//!
//! This module implements the multi-target exporter HTTP surface.
//!
//! # Architecture
//!
//! - **HTTP Server**: Axum-based server exposing `/probe`, `/metrics`, `/health`, and `/`
//! - **Per-request probing**: every `/probe` request logs in to the requested
//!   array, collects into a fresh registry and renders it. Nothing is cached
//!   between requests.
//! - **State Management**: the prober (HTTP transport + credential map) and the
//!   exporter's own metrics are shared through `Arc`s
//!
//! # Endpoints
//!
//! - `GET /` - HTML landing page
//! - `GET /probe?target=https://array:7443` - Probe an array, Prometheus text format
//! - `GET /metrics` - Exporter self-metrics
//! - `GET /health` - Liveness check
//!
//! # Error Handling
//!
//! A missing or malformed `target` is rejected with 400 before any network
//! activity. A failed probe still returns every series gathered so far,
//! together with `probe_success 0`, under a 503 status.

use crate::config::Config;
use crate::credentials::Credentials;
use crate::metrics::{ExporterMetrics, ProbeRegistry};
use crate::probe::Prober;
use crate::spectrum::{build_http_client, Target};
use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{error, info, warn};

const PROMETHEUS_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

#[derive(Clone)]
pub struct AppState {
    prober: Arc<Prober>,
    metrics: ExporterMetrics,
}

impl AppState {
    pub fn new(prober: Prober, metrics: ExporterMetrics) -> Self {
        metrics.credentials.set(prober.credentials().len() as i64);
        Self {
            prober: Arc::new(prober),
            metrics,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/probe", get(probe_handler))
        .route("/metrics", get(metrics_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}

pub async fn start(config: Config, credentials: Credentials) -> anyhow::Result<()> {
    let http = build_http_client(&config.tls)?;
    let prober = Prober::new(http, Arc::new(credentials), config.probe.clone());
    let state = AppState::new(prober, ExporterMetrics::new()?);

    let app = router(state);

    // Start the server
    let addr = format!("{}:{}", config.server.addr, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("Spectrum Virtualize exporter listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

async fn root_handler() -> impl IntoResponse {
    axum::response::Html(
        r#"<html>
<head><title>Spectrum Virtualize Exporter</title></head>
<body>
<h1>Spectrum Virtualize Exporter</h1>
<form action="/probe">
<label>Target:</label> <input type="text" name="target" placeholder="https://array:7443">
<input type="submit" value="Probe">
</form>
<p><a href="/metrics">Metrics</a></p>
<p><a href="/health">Health</a></p>
</body>
</html>"#,
    )
}

async fn probe_handler(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let raw_target = params.get("target").map(String::as_str).unwrap_or("");
    if raw_target.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            "Target parameter missing or empty",
        )
            .into_response();
    }

    let target = match Target::parse(raw_target) {
        Ok(target) => target,
        Err(e) => {
            warn!("Probe request rejected; error is: {}", e);
            return (StatusCode::BAD_REQUEST, format!("probe: {}", e)).into_response();
        }
    };

    let registry = match ProbeRegistry::new() {
        Ok(registry) => registry,
        Err(e) => return internal_error(e),
    };

    let outcome = match state.prober.probe(&target, &registry).await {
        Ok(outcome) => outcome,
        Err(e) => return internal_error(e),
    };

    registry.record_outcome(outcome.success, outcome.duration);
    state.metrics.record_probe(outcome.success);

    let seconds = outcome.duration.as_secs_f64();
    let status = if outcome.success {
        info!("Probe of {} succeeded, took {:.3} seconds", target, seconds);
        StatusCode::OK
    } else {
        info!("Probe of {} failed, took {:.3} seconds", target, seconds);
        StatusCode::SERVICE_UNAVAILABLE
    };

    match registry.render() {
        Ok(body) => (status, [(header::CONTENT_TYPE, PROMETHEUS_CONTENT_TYPE)], body).into_response(),
        Err(e) => internal_error(e),
    }
}

async fn metrics_handler(State(state): State<AppState>) -> Response {
    match state.metrics.render() {
        Ok(body) => ([(header::CONTENT_TYPE, PROMETHEUS_CONTENT_TYPE)], body).into_response(),
        Err(e) => internal_error(e),
    }
}

async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

fn internal_error(e: impl std::fmt::Display) -> Response {
    error!("Failed to serve probe: {}", e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        format!("Error rendering metrics: {}", e),
    )
        .into_response()
}
