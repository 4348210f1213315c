pub mod api;
pub mod client;
pub mod error;

pub use api::{ClusterHealth, IndexSettingsMap};
pub use client::EsClient;
