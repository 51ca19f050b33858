// src/config.rs
//
// Where the two CSV resources live. The base URL is explicit configuration:
// both the main load and the coordinate-only fallback resolve against it, so
// no code path depends on ambient state for its resource location.

use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

const ENV_CONFIG_PATH: &str = "PISA_DATASET_CONFIG_PATH";
const ENV_BASE_URL: &str = "PISA_DATA_BASE_URL";
const DEFAULT_CONFIG_PATH: &str = "config/dataset.toml";

#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
pub struct DatasetConfig {
    /// Base URL the resource names are joined onto.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Primary indicator table (one row per student or per-country record).
    #[serde(default = "default_primary_resource")]
    pub primary_resource: String,
    /// Coordinate table: country code, X, Y, composite well-being score.
    #[serde(default = "default_coords_resource")]
    pub coords_resource: String,
}

fn default_base_url() -> String {
    "http://localhost:8080/data".to_string()
}

fn default_primary_resource() -> String {
    "country_means.csv".to_string()
}

fn default_coords_resource() -> String {
    "OWB_PCA_country_means_2.csv".to_string()
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            primary_resource: default_primary_resource(),
            coords_resource: default_coords_resource(),
        }
    }
}

impl DatasetConfig {
    /// Load configuration using env var + fallbacks:
    /// 1) $PISA_DATASET_CONFIG_PATH (must exist if set)
    /// 2) config/dataset.toml
    /// 3) built-in defaults
    /// $PISA_DATA_BASE_URL overrides the base URL from any of the above.
    pub fn load() -> Result<Self> {
        let mut cfg = if let Ok(p) = std::env::var(ENV_CONFIG_PATH) {
            let pb = PathBuf::from(p);
            if !pb.exists() {
                return Err(anyhow!("{ENV_CONFIG_PATH} points to non-existent path"));
            }
            Self::from_toml_file(&pb)?
        } else {
            let default_p = PathBuf::from(DEFAULT_CONFIG_PATH);
            if default_p.exists() {
                Self::from_toml_file(&default_p)?
            } else {
                Self::default()
            }
        };

        if let Ok(url) = std::env::var(ENV_BASE_URL) {
            if !url.trim().is_empty() {
                cfg.base_url = url;
            }
        }
        Ok(cfg)
    }

    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading dataset config from {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("parsing dataset config at {}", path.display()))
    }

    pub fn primary_url(&self) -> String {
        join_url(&self.base_url, &self.primary_resource)
    }

    pub fn coords_url(&self) -> String {
        join_url(&self.base_url, &self.coords_resource)
    }
}

fn join_url(base: &str, resource: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), resource)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn urls_join_without_double_slashes() {
        let cfg = DatasetConfig {
            base_url: "https://example.org/pisa/".into(),
            ..DatasetConfig::default()
        };
        assert_eq!(
            cfg.primary_url(),
            "https://example.org/pisa/country_means.csv"
        );
        assert_eq!(
            cfg.coords_url(),
            "https://example.org/pisa/OWB_PCA_country_means_2.csv"
        );
    }

    #[test]
    fn toml_fields_are_optional() {
        let cfg: DatasetConfig = toml::from_str(r#"base_url = "https://cdn.example.org""#).unwrap();
        assert_eq!(cfg.base_url, "https://cdn.example.org");
        assert_eq!(cfg.primary_resource, "country_means.csv");
    }

    #[serial_test::serial]
    #[test]
    fn env_base_url_overrides_file_and_defaults() {
        env::remove_var(ENV_CONFIG_PATH);
        env::set_var(ENV_BASE_URL, "https://override.example.org");
        let cfg = DatasetConfig::load().unwrap();
        assert_eq!(cfg.base_url, "https://override.example.org");
        env::remove_var(ENV_BASE_URL);
    }

    #[serial_test::serial]
    #[test]
    fn missing_env_config_path_is_an_error() {
        env::set_var(ENV_CONFIG_PATH, "/definitely/not/here.toml");
        assert!(DatasetConfig::load().is_err());
        env::remove_var(ENV_CONFIG_PATH);
    }
}
