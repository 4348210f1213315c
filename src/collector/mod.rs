pub mod descriptors;
pub mod encode;
pub mod registry;

use anyhow::{Context, Result};
use prometheus::core::Desc;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinError;

use crate::config::CollectorConfig;
use crate::es::{ClusterHealth, EsClient, IndexSettingsMap};

pub use descriptors::Descriptors;
pub use encode::encode_text;
pub use registry::ExporterRegistry;

/// Jeden vzorek metriky emitovaný během scrape cyklu
#[derive(Debug, Clone)]
pub struct MetricSample {
    pub desc: Arc<Desc>,
    pub label_value: Option<String>,
    pub value: f64,
}

impl MetricSample {
    pub fn labeled(desc: &Arc<Desc>, label_value: impl Into<String>, value: f64) -> Self {
        Self {
            desc: Arc::clone(desc),
            label_value: Some(label_value.into()),
            value,
        }
    }

    pub fn plain(desc: &Arc<Desc>, value: f64) -> Self {
        Self {
            desc: Arc::clone(desc),
            label_value: None,
            value,
        }
    }

    pub fn name(&self) -> &str {
        &self.desc.fq_name
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelocationStatus {
    Active,
    Inactive,
}

impl RelocationStatus {
    pub fn from_health(health: &ClusterHealth) -> Self {
        if health.relocating_shards > 0 {
            Self::Active
        } else {
            Self::Inactive
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

/// Maximum number_of_replicas přes všechny indexy.
/// Neparsovatelné hodnoty počítáme jako 0, prázdná mapa dává 0.
pub fn max_replicas(settings: &IndexSettingsMap) -> u64 {
    settings.values().map(|index| index.replicas()).fold(0, u64::max)
}

/// Kolektor shard metrik. Každé volání `collect` je samostatný snapshot
/// clusteru, souběžná volání se serializují zámkem.
#[derive(Debug)]
pub struct ShardCollector {
    client: EsClient,
    descs: Descriptors,
    scrape_lock: Mutex<()>,
}

impl ShardCollector {
    pub fn new(config: &CollectorConfig) -> Result<Self> {
        let client = EsClient::new(config).context("Failed to create Elasticsearch client")?;
        Self::with_client(client)
    }

    pub fn with_client(client: EsClient) -> Result<Self> {
        let descs = Descriptors::new().context("Failed to build metric descriptors")?;
        tracing::debug!("Shard collector targets {}", client.base_url());

        Ok(Self {
            client,
            descs,
            scrape_lock: Mutex::new(()),
        })
    }

    /// Popisy metrik, bez kontaktu s Elasticsearch a bez zámku
    pub fn describe(&self) -> Vec<&Desc> {
        self.descs.all()
    }

    /// Provede jeden scrape cyklus a pošle vzorky do kanálu.
    ///
    /// Pořadí: relocation, replica (pokud se podařilo je získat), potom vždy
    /// scrape_error a scrape_duration_seconds.
    pub async fn collect(&self, tx: &mpsc::UnboundedSender<MetricSample>) {
        let _guard = self.scrape_lock.lock().await;

        let start = Instant::now();
        let mut scrape_error = false;

        match self.client.cluster_health().await {
            Ok(health) => {
                let status = RelocationStatus::from_health(&health);
                self.emit(tx, MetricSample::labeled(&self.descs.shard_relocation, status.as_str(), 1.0));
            }
            Err(e) => {
                tracing::error!("Error fetching cluster health: {}", e);
                scrape_error = true;
            }
        }

        match self.client.index_settings().await {
            Ok(settings) => {
                let replicas = max_replicas(&settings);
                self.emit(tx, MetricSample::labeled(&self.descs.shard_replica, replicas.to_string(), 1.0));
            }
            Err(e) => {
                tracing::error!("Error fetching replica count: {}", e);
                scrape_error = true;
            }
        }

        let scrape_error = if scrape_error { 1.0 } else { 0.0 };
        self.emit(tx, MetricSample::plain(&self.descs.scrape_error, scrape_error));

        let elapsed = start.elapsed().as_secs_f64();
        self.emit(tx, MetricSample::plain(&self.descs.scrape_duration, elapsed));

        tracing::debug!("Scrape finished in {:.3}s (error: {})", elapsed, scrape_error);
    }

    /// Scrape cyklus do vlastního kanálu, vrací vzorky jako Vec.
    ///
    /// Cyklus běží v samostatném tasku, takže doběhne i když volající
    /// future zahodí (např. Prometheus scrape_timeout).
    pub async fn scrape(self: &Arc<Self>) -> std::result::Result<Vec<MetricSample>, JoinError> {
        let collector = Arc::clone(self);

        tokio::spawn(async move {
            let (tx, mut rx) = mpsc::unbounded_channel();
            collector.collect(&tx).await;
            drop(tx);

            let mut samples = Vec::new();
            while let Some(sample) = rx.recv().await {
                samples.push(sample);
            }
            samples
        })
        .await
    }

    fn emit(&self, tx: &mpsc::UnboundedSender<MetricSample>, sample: MetricSample) {
        if let Err(e) = tx.send(sample) {
            tracing::warn!("Metric receiver closed, dropping {}", e.0.name());
        }
    }
}
