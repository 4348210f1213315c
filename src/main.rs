mod collector;
mod config;
mod es;
mod handlers;

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use collector::{ExporterRegistry, ShardCollector};
use config::CollectorConfig;
use handlers::AppState;

#[derive(Parser, Debug)]
#[command(name = "elasticsearch-shard-exporter")]
#[command(version, about = "Prometheus exporter for Elasticsearch shard relocation and replica status", long_about = None)]
struct Args {
    /// Address to listen on for HTTP requests
    #[arg(long, default_value = "0.0.0.0:9061")]
    listen_address: String,

    /// Path under which to expose metrics
    #[arg(long, default_value = "/metrics")]
    metrics_path: String,

    /// Elasticsearch URL (required, ES_URL overrides)
    #[arg(long, default_value = "")]
    es_url: String,

    /// Elasticsearch username for authentication (ES_USER overrides)
    #[arg(long, default_value = "")]
    es_user: String,

    /// Elasticsearch password for authentication (ES_PASS overrides)
    #[arg(long, default_value = "")]
    es_pass: String,

    /// Enable SSL/TLS for Elasticsearch connection
    #[arg(long)]
    ssl_enable: bool,

    /// Skip SSL certificate verification
    #[arg(long)]
    ssl_skip_verify: bool,
}

impl Args {
    fn collector_config(&self) -> CollectorConfig {
        CollectorConfig {
            es_url: self.es_url.clone(),
            es_user: self.es_user.clone(),
            es_pass: self.es_pass.clone(),
            ssl_enable: self.ssl_enable,
            ssl_skip_verify: self.ssl_skip_verify,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Inicializuj logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "elasticsearch_shard_exporter=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Parse CLI argumenty
    let args = Args::parse();

    let mut config = args.collector_config();
    config.apply_env_overrides(|name| std::env::var(name).ok());
    config.validate().context("Configuration error")?;
    config::validate_metrics_path(&args.metrics_path).context("Configuration error")?;

    let collector = ShardCollector::new(&config).context("Failed to create collector")?;
    let registry = ExporterRegistry::new(&collector).context("Failed to register collectors")?;

    let state = Arc::new(AppState {
        collector: Arc::new(collector),
        registry,
        metrics_path: args.metrics_path.clone(),
    });
    let app = handlers::router(state);

    tracing::info!("Starting Elasticsearch Shard Exporter v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Elasticsearch URL: {}", config.es_url);

    let listener = tokio::net::TcpListener::bind(&args.listen_address)
        .await
        .with_context(|| format!("Failed to bind {}", args.listen_address))?;

    tracing::info!("Listening on {}", args.listen_address);
    tracing::info!("Metrics available at http://{}{}", args.listen_address, args.metrics_path);

    axum::serve(listener, app)
        .await
        .context("Failed to start HTTP server")?;

    Ok(())
}
