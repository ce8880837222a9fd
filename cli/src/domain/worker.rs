//! Worker-side configuration documents (`gerrit.yml`, `amqp.yml`).

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::domain::config::ProvisionConfig;

pub const GERRIT_FILE: &str = "gerrit.yml";
pub const AMQP_FILE: &str = "amqp.yml";

/// How the worker reaches the code-review server and signs its commits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GerritSettings {
    pub user: String,
    pub git_user_email: String,
    pub git_user_name: String,
    pub host: String,
    pub port: u16,
}

impl GerritSettings {
    #[must_use]
    pub fn from_config(cfg: &ProvisionConfig) -> Self {
        Self {
            user: cfg.worker.username.clone(),
            git_user_email: cfg.worker.email.clone(),
            git_user_name: cfg.worker.full_name.clone(),
            host: cfg.gerrit.host.clone(),
            port: cfg.gerrit.port,
        }
    }
}

/// Message-queue connection of the worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmqpSettings {
    pub user: String,
    pub pass: String,
    pub host: String,
    pub vhost: String,
}

/// Serializes a settings document to YAML.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn render<T: Serialize>(settings: &T) -> Result<String> {
    serde_yaml::to_string(settings).context("cannot serialize worker config")
}
