pub mod metrics;

use axum::{
    extract::State,
    response::{Html, IntoResponse},
    http::StatusCode,
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::collector::{ExporterRegistry, ShardCollector};

pub struct AppState {
    pub collector: Arc<ShardCollector>,
    pub registry: ExporterRegistry,
    pub metrics_path: String,
}

/// Sestaví router: landing page, health check a metriky na konfigurovatelné cestě
pub fn router(state: Arc<AppState>) -> Router {
    let metrics_path = state.metrics_path.clone();

    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route(&metrics_path, get(metrics::metrics))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Landing page s odkazem na metriky
pub async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    let metrics_path = escape_attr(&state.metrics_path);

    Html(format!(
        r#"<!DOCTYPE html>
<html>
<head><title>Elasticsearch Shard Exporter</title></head>
<body>
<h1>Elasticsearch Shard Exporter</h1>
<p><a href="{}">Metrics</a></p>
<p>Version: {}</p>
</body>
</html>"#,
        metrics_path,
        env!("CARGO_PKG_VERSION"),
    ))
}

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::config::CollectorConfig;
    use axum::body::Body;
    use axum::http::{header, Request};
    use tower::ServiceExt;

    pub(crate) fn app(es_url: &str, metrics_path: &str) -> Router {
        let collector = ShardCollector::new(&CollectorConfig {
            es_url: es_url.to_string(),
            ..Default::default()
        })
        .unwrap();
        let registry = ExporterRegistry::new(&collector).unwrap();

        router(Arc::new(AppState {
            collector: Arc::new(collector),
            registry,
            metrics_path: metrics_path.to_string(),
        }))
    }

    pub(crate) async fn get_body(app: Router, uri: &str) -> (StatusCode, Option<String>, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .map(|v| v.to_str().unwrap().to_string());
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();

        (status, content_type, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let (status, _, body) = get_body(app("http://127.0.0.1:1", "/metrics"), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "OK");
    }

    #[tokio::test]
    async fn test_landing_page_links_metrics_path() {
        let (status, content_type, body) =
            get_body(app("http://127.0.0.1:1", "/probe/metrics"), "/").await;

        assert_eq!(status, StatusCode::OK);
        assert!(content_type.unwrap().starts_with("text/html"));
        assert!(body.contains("<h1>Elasticsearch Shard Exporter</h1>"));
        assert!(body.contains(r#"<a href="/probe/metrics">Metrics</a>"#));
        assert!(body.contains(env!("CARGO_PKG_VERSION")));
    }

    #[tokio::test]
    async fn test_unknown_path() {
        let (status, _, _) = get_body(app("http://127.0.0.1:1", "/metrics"), "/nope").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_escape_attr() {
        assert_eq!(escape_attr(r#"/m"<x>&"#), "/m&quot;&lt;x&gt;&amp;");
    }
}
