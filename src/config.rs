//! Configuration Management
//!
//! Handles persistent configuration storage for hwcloud. Values are read from
//! `<config dir>/hwcloud/config.yaml`, then overridden by `HWCLOUD_*`
//! environment variables; the CLI applies its flags last.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Region used when nothing else is configured
pub const DEFAULT_REGION: &str = "cn-north-4";

/// Per-service endpoint overrides. When set, the URL replaces the discovered
/// service endpoint verbatim.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct EndpointOverrides {
    #[serde(default)]
    pub compute: Option<String>,
    #[serde(default)]
    pub bss: Option<String>,
}

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub region: Option<String>,
    /// Project scoping compute calls
    #[serde(default)]
    pub project_id: Option<String>,
    /// Account (domain) scoping billing calls
    #[serde(default)]
    pub domain_id: Option<String>,
    /// IAM token; never written back to disk
    #[serde(default, skip_serializing)]
    pub token: Option<String>,
    #[serde(default)]
    pub endpoints: EndpointOverrides,
    /// Compute API microversion, e.g. "2.26"
    #[serde(default)]
    pub compute_microversion: Option<String>,
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("hwcloud").join("config.yaml"))
    }

    /// Load configuration from disk and the environment.
    ///
    /// A missing or unreadable file yields the defaults.
    pub fn load() -> Self {
        let from_file = Self::config_path()
            .filter(|path| path.exists())
            .and_then(|path| match Self::load_from(&path) {
                Ok(config) => Some(config),
                Err(e) => {
                    tracing::warn!("Ignoring config file {:?}: {}", path, e);
                    None
                },
            })
            .unwrap_or_default();

        from_file.with_env_overrides(|key| std::env::var(key).ok())
    }

    /// Load configuration from a specific YAML file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {}", path.display(), e)))?;
        serde_yaml::from_str(&content)
            .map_err(|e| Error::Config(format!("cannot parse {}: {}", path.display(), e)))
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let Some(path) = Self::config_path() else {
            return Ok(());
        };
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| Error::Config(format!("cannot create {}: {}", parent.display(), e)))?;
        }

        let content =
            serde_yaml::to_string(self).map_err(|e| Error::Config(e.to_string()))?;
        std::fs::write(path, content)
            .map_err(|e| Error::Config(format!("cannot write {}: {}", path.display(), e)))?;

        Ok(())
    }

    /// Apply `HWCLOUD_*` variables on top of the current values.
    ///
    /// `lookup` abstracts the environment so tests need not mutate it.
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(v) = get("HWCLOUD_TOKEN") {
            self.token = Some(v);
        }
        if let Some(v) = get("HWCLOUD_REGION") {
            self.region = Some(v);
        }
        if let Some(v) = get("HWCLOUD_PROJECT_ID") {
            self.project_id = Some(v);
        }
        if let Some(v) = get("HWCLOUD_DOMAIN_ID") {
            self.domain_id = Some(v);
        }
        if let Some(v) = get("HWCLOUD_COMPUTE_ENDPOINT") {
            self.endpoints.compute = Some(v);
        }
        if let Some(v) = get("HWCLOUD_BSS_ENDPOINT") {
            self.endpoints.bss = Some(v);
        }
        if let Some(v) = get("HWCLOUD_COMPUTE_MICROVERSION") {
            self.compute_microversion = Some(v);
        }
        self
    }

    /// Get effective region (CLI > env > config > default)
    pub fn effective_region(&self) -> String {
        self.region
            .clone()
            .unwrap_or_else(|| DEFAULT_REGION.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn yaml_round_trip_skips_token() {
        let config = Config {
            region: Some("ap-southeast-1".to_string()),
            token: Some("secret".to_string()),
            endpoints: EndpointOverrides {
                compute: Some("http://127.0.0.1:8774/v2.1/p".to_string()),
                bss: None,
            },
            ..Default::default()
        };

        let yaml = serde_yaml::to_string(&config).unwrap();
        assert!(!yaml.contains("secret"));

        let parsed: Config = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed.region.as_deref(), Some("ap-southeast-1"));
        assert_eq!(parsed.token, None);
        assert_eq!(parsed.endpoints, config.endpoints);
    }

    #[test]
    fn partial_yaml_uses_defaults() {
        let parsed: Config = serde_yaml::from_str("project_id: abc\n").unwrap();
        assert_eq!(parsed.project_id.as_deref(), Some("abc"));
        assert_eq!(parsed.effective_region(), DEFAULT_REGION);
        assert!(parsed.endpoints.bss.is_none());
    }

    #[test]
    fn env_overrides_win_over_file_values() {
        let env: HashMap<&str, &str> = [
            ("HWCLOUD_REGION", "eu-west-0"),
            ("HWCLOUD_TOKEN", "tok"),
            ("HWCLOUD_BSS_ENDPOINT", "http://localhost:9000/v1.0"),
            ("HWCLOUD_DOMAIN_ID", ""),
        ]
        .into_iter()
        .collect();

        let config = Config {
            region: Some("cn-north-4".to_string()),
            domain_id: Some("dom".to_string()),
            ..Default::default()
        }
        .with_env_overrides(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(config.region.as_deref(), Some("eu-west-0"));
        assert_eq!(config.token.as_deref(), Some("tok"));
        assert_eq!(config.endpoints.bss.as_deref(), Some("http://localhost:9000/v1.0"));
        // Empty variables do not clobber configured values
        assert_eq!(config.domain_id.as_deref(), Some("dom"));
    }

    #[test]
    fn save_and_load_from_file() {
        let path = std::env::temp_dir()
            .join(format!("hwcloud-config-{}", std::process::id()))
            .join("config.yaml");
        let config = Config {
            project_id: Some("0123456789abcdef0123456789abcdef".to_string()),
            compute_microversion: Some("2.26".to_string()),
            ..Default::default()
        };

        config.save_to(&path).unwrap();
        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn load_from_missing_file_is_config_error() {
        let err = Config::load_from(Path::new("/nonexistent/hwcloud.yaml")).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
