use prometheus::core::{Collector, Desc};
use prometheus::proto::MetricFamily;
use prometheus::Registry;

use super::ShardCollector;

/// Popisy scrape cyklu zaregistrované v registry. Vzorky samotné vznikají
/// až v `ShardCollector::collect`, tady jen hlídáme kolize názvů.
#[derive(Debug)]
struct CycleDescriptors(Vec<Desc>);

impl Collector for CycleDescriptors {
    fn desc(&self) -> Vec<&Desc> {
        self.0.iter().collect()
    }

    fn collect(&self) -> Vec<MetricFamily> {
        Vec::new()
    }
}

/// Registry exporteru: procesní metriky a popisy shard kolektoru
pub struct ExporterRegistry {
    registry: Registry,
}

impl ExporterRegistry {
    pub fn new(collector: &ShardCollector) -> prometheus::Result<Self> {
        let registry = Registry::new();

        let descs = collector.describe().into_iter().cloned().collect();
        registry.register(Box::new(CycleDescriptors(descs)))?;

        #[cfg(target_os = "linux")]
        registry.register(Box::new(
            prometheus::process_collector::ProcessCollector::for_self(),
        ))?;

        Ok(Self { registry })
    }

    /// Metriky registrovaných kolektorů (process_*)
    pub fn gather(&self) -> Vec<MetricFamily> {
        self.registry.gather()
    }
}
