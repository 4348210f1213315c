use anyhow::{Context, Result};
use prometheus::core::Collector;
use prometheus::proto::MetricFamily;
use prometheus::{Encoder, Gauge, GaugeVec, Opts, TextEncoder};

use super::MetricSample;

/// Převede vzorky jednoho scrape cyklu na Prometheus text format.
/// Pořadí metrik ve výstupu odpovídá pořadí vzorků, metriky z registry
/// (`gathered`) následují za nimi.
pub fn encode_text(samples: &[MetricSample], gathered: Vec<MetricFamily>) -> Result<String> {
    let mut families = Vec::with_capacity(samples.len() + gathered.len());

    for sample in samples {
        let desc = &sample.desc;
        let opts = Opts::new(desc.fq_name.clone(), desc.help.clone());

        match &sample.label_value {
            Some(label_value) => {
                let label_names: Vec<&str> =
                    desc.variable_labels.iter().map(String::as_str).collect();
                let gauge = GaugeVec::new(opts, &label_names)?;
                gauge
                    .get_metric_with_label_values(&[label_value.as_str()])
                    .with_context(|| format!("Invalid labels for {}", desc.fq_name))?
                    .set(sample.value);
                families.extend(gauge.collect());
            }
            None => {
                let gauge = Gauge::with_opts(opts)?;
                gauge.set(sample.value);
                families.extend(gauge.collect());
            }
        }
    }

    families.extend(gathered);

    let mut buffer = Vec::new();
    TextEncoder::new()
        .encode(&families, &mut buffer)
        .context("Failed to encode Prometheus metrics")?;

    String::from_utf8(buffer).context("Encoded metrics are not valid UTF-8")
}
