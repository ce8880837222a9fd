//! Infrastructure implementation of the `ConfigStore` port.

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::application::ports::ConfigStore;
use crate::domain::config::ProvisionConfig;

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "MQW_PROVISION_CONFIG";

/// Production implementation of `ConfigStore` that reads a YAML file on disk.
///
/// Path resolution: explicit path (the `--config` flag), then
/// `$MQW_PROVISION_CONFIG`, then `~/.config/mqw-provision/config.yaml`.
#[derive(Debug, Default, Clone)]
pub struct YamlConfigStore {
    explicit: Option<PathBuf>,
}

impl YamlConfigStore {
    #[must_use]
    pub fn new(explicit: Option<PathBuf>) -> Self {
        Self { explicit }
    }
}

impl ConfigStore for YamlConfigStore {
    fn load(&self) -> Result<ProvisionConfig> {
        let path = self.path()?;
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("cannot read {}", path.display()))?;
        serde_yaml::from_str(&content).with_context(|| format!("cannot parse {}", path.display()))
    }

    fn path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.explicit {
            return Ok(path.clone());
        }
        if let Ok(val) = std::env::var(CONFIG_ENV) {
            return Ok(PathBuf::from(val));
        }
        let dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("cannot determine config directory"))?;
        Ok(dir.join("mqw-provision").join("config.yaml"))
    }
}
