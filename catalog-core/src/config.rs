use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const CONFIG_FILE: &str = "catalog.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[cfg(not(target_arch = "wasm32"))]
    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// How long a notice stays on screen before it clears itself.
    pub notice_duration_ms: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub service: ServiceConfig,
    pub ui: UiConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        ServiceConfig {
            base_url: "http://localhost:3001".to_string(),
            timeout_seconds: 30,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            notice_duration_ms: 3000,
        }
    }
}

impl CatalogConfig {
    /// Load `catalog.toml` from the working directory if present, then apply
    /// environment overrides. A broken file is reported and the defaults used.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let mut config = match Self::load_from_file(std::path::Path::new(CONFIG_FILE)) {
            Ok(Some(config)) => config,
            Ok(None) => {
                log::debug!("{} not found, using defaults", CONFIG_FILE);
                CatalogConfig::default()
            }
            Err(e) => {
                log::warn!("{}; using defaults", e);
                CatalogConfig::default()
            }
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        config
    }

    /// No filesystem or process environment in the browser.
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        CatalogConfig::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_file(path: &std::path::Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

        let config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;

        Ok(Some(config))
    }

    /// `CATALOG_SERVICE_URL` and `CATALOG_NOTICE_MS`. Unparsable values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("CATALOG_SERVICE_URL") {
            self.service.base_url = url;
        }

        if let Some(raw) = lookup("CATALOG_NOTICE_MS") {
            match raw.trim().parse() {
                Ok(ms) => self.ui.notice_duration_ms = ms,
                Err(_) => log::warn!("Ignoring CATALOG_NOTICE_MS={:?}", raw),
            }
        }

        self.service.base_url = self.service.base_url.trim_end_matches('/').to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = CatalogConfig::default();
        assert_eq!(config.service.base_url, "http://localhost:3001");
        assert_eq!(config.ui.notice_duration_ms, 3000);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: CatalogConfig = toml::from_str(
            r#"
            [service]
            base_url = "http://catalog.internal:8080"
            "#,
        )
        .unwrap();

        assert_eq!(config.service.base_url, "http://catalog.internal:8080");
        assert_eq!(config.service.timeout_seconds, 30);
        assert_eq!(config.ui.notice_duration_ms, 3000);
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("CATALOG_SERVICE_URL", "http://example.test:9000/"),
            ("CATALOG_NOTICE_MS", "1500"),
        ]
        .into_iter()
        .collect();

        let mut config = CatalogConfig::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.service.base_url, "http://example.test:9000");
        assert_eq!(config.ui.notice_duration_ms, 1500);
    }

    #[test]
    fn test_bad_notice_override_is_ignored() {
        let mut config = CatalogConfig::default();
        config.apply_overrides(|key| (key == "CATALOG_NOTICE_MS").then(|| "soon".to_string()));

        assert_eq!(config.ui.notice_duration_ms, 3000);
    }

    #[test]
    fn test_missing_file_is_not_an_error() {
        let result = CatalogConfig::load_from_file(std::path::Path::new("does-not-exist.toml"));
        assert!(matches!(result, Ok(None)));
    }
}
