use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
};
use std::sync::Arc;

use crate::collector::encode_text;
use crate::handlers::AppState;

/// GET <metrics-path> - provede scrape cyklus a vrátí Prometheus text format
pub async fn metrics(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let samples = state.collector.scrape().await.map_err(|e| {
        tracing::error!("Scrape task failed: {}", e);
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })?;

    let body = encode_text(&samples, state.registry.gather()).map_err(|e| {
        tracing::error!("Failed to render metrics: {:#}", e);
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })?;

    Ok(([(header::CONTENT_TYPE, prometheus::TEXT_FORMAT)], body))
}
