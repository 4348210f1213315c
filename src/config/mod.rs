use anyhow::{bail, Result};
use std::fmt;

/// Konfigurace kolektoru - co potřebuje engine pro připojení k Elasticsearch
#[derive(Clone, Default)]
pub struct CollectorConfig {
    pub es_url: String,
    pub es_user: String,
    pub es_pass: String,
    pub ssl_enable: bool,
    pub ssl_skip_verify: bool,
}

impl CollectorConfig {
    /// Ověří povinné položky
    pub fn validate(&self) -> Result<()> {
        if self.es_url.trim().is_empty() {
            bail!("--es-url is required (or set ES_URL environment variable)");
        }
        Ok(())
    }

    /// Neprázdné ES_URL / ES_USER / ES_PASS přepíší hodnoty z příkazové řádky
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let fields = [
            ("ES_URL", &mut self.es_url),
            ("ES_USER", &mut self.es_user),
            ("ES_PASS", &mut self.es_pass),
        ];

        for (name, field) in fields {
            if let Some(value) = lookup(name).filter(|v| !v.is_empty()) {
                *field = value;
            }
        }
    }

    /// Vrací (username, password) pouze pokud jsou vyplněné oba údaje
    pub fn credentials(&self) -> Option<(String, String)> {
        if self.es_user.is_empty() || self.es_pass.is_empty() {
            return None;
        }
        Some((self.es_user.clone(), self.es_pass.clone()))
    }
}

// Heslo nesmí skončit v logu
impl fmt::Debug for CollectorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollectorConfig")
            .field("es_url", &self.es_url)
            .field("es_user", &self.es_user)
            .field("es_pass", &if self.es_pass.is_empty() { "" } else { "***" })
            .field("ssl_enable", &self.ssl_enable)
            .field("ssl_skip_verify", &self.ssl_skip_verify)
            .finish()
    }
}

/// Cesty, které router obsluhuje sám
const RESERVED_PATHS: &[&str] = &["/health"];

/// Ověří cestu pro metriky: musí začínat lomítkem, nesmí kolidovat
/// s ostatními routami a nesmí obsahovat syntaxi parametrů axum routeru
pub fn validate_metrics_path(path: &str) -> Result<()> {
    if !path.starts_with('/') {
        bail!("--metrics-path must start with '/', got {:?}", path);
    }
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() || RESERVED_PATHS.contains(&trimmed) {
        bail!("--metrics-path {:?} is already used by the exporter", path);
    }
    if path.contains(|c: char| matches!(c, '{' | '}' | '*' | ':')) {
        bail!("--metrics-path must not contain '{{', '}}', '*' or ':', got {:?}", path);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> CollectorConfig {
        CollectorConfig {
            es_url: "http://localhost:9200".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_missing_url_is_rejected() {
        let err = CollectorConfig::default().validate().unwrap_err();
        assert!(err.to_string().contains("--es-url is required"));

        let cfg = CollectorConfig { es_url: "   ".to_string(), ..Default::default() };
        assert!(cfg.validate().is_err());

        assert!(config().validate().is_ok());
    }

    #[test]
    fn test_credentials_need_both_parts() {
        let mut cfg = config();
        assert_eq!(cfg.credentials(), None);

        cfg.es_user = "elastic".to_string();
        assert_eq!(cfg.credentials(), None);

        cfg.es_pass = "changeme".to_string();
        assert_eq!(
            cfg.credentials(),
            Some(("elastic".to_string(), "changeme".to_string()))
        );

        cfg.es_user.clear();
        assert_eq!(cfg.credentials(), None);
    }

    #[test]
    fn test_debug_hides_password() {
        let cfg = CollectorConfig {
            es_user: "elastic".to_string(),
            es_pass: "secret-password".to_string(),
            ..config()
        };
        let out = format!("{:?}", cfg);
        assert!(!out.contains("secret-password"));
        assert!(out.contains("***"));
        assert!(out.contains("elastic"));
    }

    #[test]
    fn test_metrics_path() {
        assert!(validate_metrics_path("/metrics").is_ok());
        assert!(validate_metrics_path("/probe/metrics").is_ok());
        assert!(validate_metrics_path("metrics").is_err());
        assert!(validate_metrics_path("/").is_err());
        assert!(validate_metrics_path("//").is_err());
    }

    #[test]
    fn test_metrics_path_reserved_and_route_syntax() {
        assert!(validate_metrics_path("/health").is_err());
        assert!(validate_metrics_path("/health/").is_err());
        assert!(validate_metrics_path("/health/metrics").is_ok());
        assert!(validate_metrics_path("/{name}").is_err());
        assert!(validate_metrics_path("/metrics/{*rest}").is_err());
        assert!(validate_metrics_path("/:metrics").is_err());
    }

    #[test]
    fn test_env_overrides_flags() {
        let mut cfg = CollectorConfig {
            es_url: "http://from-flag:9200".to_string(),
            es_user: "flag-user".to_string(),
            es_pass: "flag-pass".to_string(),
            ..Default::default()
        };

        cfg.apply_env_overrides(|name| match name {
            "ES_URL" => Some("http://from-env:9200".to_string()),
            "ES_USER" => Some(String::new()),
            _ => None,
        });

        assert_eq!(cfg.es_url, "http://from-env:9200");
        // prázdná proměnná nic nepřepisuje
        assert_eq!(cfg.es_user, "flag-user");
        assert_eq!(cfg.es_pass, "flag-pass");
    }
}
