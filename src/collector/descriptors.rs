use prometheus::core::Desc;
use prometheus::Opts;
use std::collections::HashMap;
use std::sync::Arc;

pub const NAMESPACE: &str = "trendyol_nosql";
const EXPORTER_SUBSYSTEM: &str = "exporter";

/// Popisy všech metrik kolektoru. Vytvářejí se jednou při konstrukci
/// a dál se nemění.
#[derive(Debug)]
pub struct Descriptors {
    pub shard_relocation: Arc<Desc>,
    pub shard_replica: Arc<Desc>,
    pub scrape_error: Arc<Desc>,
    pub scrape_duration: Arc<Desc>,
}

impl Descriptors {
    pub fn new() -> prometheus::Result<Self> {
        Ok(Self {
            shard_relocation: gauge_desc(
                Opts::new("shard_relocation", "Elasticsearch shard relocation status")
                    .namespace(NAMESPACE),
                &["status"],
            )?,
            shard_replica: gauge_desc(
                Opts::new("shard_replica", "Elasticsearch shard replica count")
                    .namespace(NAMESPACE),
                &["count"],
            )?,
            scrape_error: gauge_desc(
                Opts::new("scrape_error", "Scrape error status")
                    .namespace(NAMESPACE)
                    .subsystem(EXPORTER_SUBSYSTEM),
                &[],
            )?,
            scrape_duration: gauge_desc(
                Opts::new("scrape_duration_seconds", "Duration of the scrape in seconds")
                    .namespace(NAMESPACE)
                    .subsystem(EXPORTER_SUBSYSTEM),
                &[],
            )?,
        })
    }

    /// Všechny popisy v pořadí, ve kterém se emitují
    pub fn all(&self) -> Vec<&Desc> {
        vec![
            self.shard_relocation.as_ref(),
            self.shard_replica.as_ref(),
            self.scrape_error.as_ref(),
            self.scrape_duration.as_ref(),
        ]
    }
}

fn gauge_desc(opts: Opts, labels: &[&str]) -> prometheus::Result<Arc<Desc>> {
    let desc = Desc::new(
        opts.fq_name(),
        opts.help.clone(),
        labels.iter().map(|l| l.to_string()).collect(),
        HashMap::new(),
    )?;
    Ok(Arc::new(desc))
}
