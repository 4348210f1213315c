use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::client::EsClient;
use super::error::Result;

/// Cluster health response
///
/// Většina položek se zatím do metrik nepropisuje, dekódujeme ale celý
/// kontrakt `_cluster/health`. Chybějící položky mají výchozí hodnotu.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterHealth {
    pub cluster_name: String,
    pub status: String,
    pub timed_out: bool,
    pub number_of_nodes: u32,
    pub number_of_data_nodes: u32,
    pub active_primary_shards: u32,
    pub active_shards: u32,
    pub relocating_shards: u32,
    pub initializing_shards: u32,
    pub unassigned_shards: u32,
    pub delayed_unassigned_shards: u32,
    pub number_of_pending_tasks: u32,
    pub number_of_in_flight_fetch: u32,
    pub task_max_waiting_in_queue_millis: u64,
    pub active_shards_percent_as_number: f64,
}

/// `_settings` response: název indexu -> jeho settings
pub type IndexSettingsMap = HashMap<String, IndexSettings>;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexSettings {
    pub settings: Settings,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub index: IndexLevelSettings,
}

/// Elasticsearch posílá počty jako řetězce ("1", "3")
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexLevelSettings {
    pub number_of_replicas: String,
    pub number_of_shards: String,
}

impl IndexSettings {
    /// Parsuje úvodní číslice number_of_replicas ("2abc" -> 2).
    /// Bez číslic, záporná hodnota nebo přetečení = 0.
    pub fn replicas(&self) -> u64 {
        let raw = self.settings.index.number_of_replicas.trim_start();
        let raw = raw.strip_prefix('+').unwrap_or(raw);
        let end = raw
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(raw.len());

        raw[..end].parse().unwrap_or(0)
    }
}

impl EsClient {
    /// Získá cluster health
    pub async fn cluster_health(&self) -> Result<ClusterHealth> {
        self.get("/_cluster/health").await
    }

    /// Získá settings všech indexů
    pub async fn index_settings(&self) -> Result<IndexSettingsMap> {
        self.get("/_settings").await
    }
}
