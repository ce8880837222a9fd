//! Domain types and validators for provisioning configuration.
//!
//! Pure functions only — no I/O, no async, no filesystem access.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::account::{
    AccountRequest, DEFAULT_GROUPS, DEFAULT_SSH_PORT, RemoteHost, RemoteIdentity,
};
use crate::domain::error::ConfigError;

#[allow(clippy::expect_used)] // Pattern is a compile-time constant
static USERNAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9._@-]+$").expect("valid regex"));

// ── Config schema ────────────────────────────────────────────────────────────

/// Top-level configuration, stored as YAML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvisionConfig {
    /// Code-review server endpoint.
    pub gerrit: GerritConfig,
    /// Privileged identity allowed to create accounts.
    pub admin: AdminConfig,
    /// The worker account to provision.
    pub worker: WorkerConfig,
    /// SSH client settings.
    #[serde(default)]
    pub ssh: SshConfig,
    /// Worker deployment root; `gerrit.yml` / `amqp.yml` go to
    /// `<deploy_base>/shared/config/`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deploy_base: Option<PathBuf>,
    /// Message-queue connection written to `amqp.yml`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amqp: Option<AmqpConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GerritConfig {
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminConfig {
    pub username: String,
    pub key_path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerConfig {
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub key_path: PathBuf,
    #[serde(default = "default_groups")]
    pub groups: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SshConfig {
    /// SSH client config file receiving the `Host` block.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_file: Option<PathBuf>,
    /// `known_hosts` file used for probes and host key registration; see
    /// [`ProvisionConfig::known_hosts_path`] for the default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub known_hosts_file: Option<PathBuf>,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_command_timeout")]
    pub command_timeout_secs: u64,
}

impl Default for SshConfig {
    fn default() -> Self {
        Self {
            config_file: None,
            known_hosts_file: None,
            connect_timeout_secs: default_connect_timeout(),
            command_timeout_secs: default_command_timeout(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmqpConfig {
    pub user: String,
    pub server: String,
    #[serde(default = "default_vhost")]
    pub vhost: String,
    /// Environment variable holding the password.
    #[serde(default = "default_password_env")]
    pub password_env: String,
}

fn default_port() -> u16 {
    DEFAULT_SSH_PORT
}

fn default_groups() -> Vec<String> {
    DEFAULT_GROUPS.iter().map(|g| (*g).to_string()).collect()
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_command_timeout() -> u64 {
    60
}

fn default_vhost() -> String {
    "/".to_string()
}

fn default_password_env() -> String {
    "MQW_AMQP_PASSWORD".to_string()
}

// ── Derived values ───────────────────────────────────────────────────────────

impl ProvisionConfig {
    #[must_use]
    pub fn host(&self) -> RemoteHost {
        RemoteHost::new(self.gerrit.host.clone(), self.gerrit.port)
    }

    #[must_use]
    pub fn admin_identity(&self) -> RemoteIdentity {
        RemoteIdentity::new(self.admin.username.clone(), self.admin.key_path.clone())
    }

    #[must_use]
    pub fn worker_identity(&self) -> RemoteIdentity {
        RemoteIdentity::new(self.worker.username.clone(), self.worker.key_path.clone())
    }

    /// The account request for the worker, with the key material left empty
    /// until it is read from disk.
    #[must_use]
    pub fn account_request(&self) -> AccountRequest {
        AccountRequest {
            target_username: self.worker.username.clone(),
            full_name: self.worker.full_name.clone(),
            email: self.worker.email.clone(),
            public_key_material: String::new(),
            group_memberships: self.worker.groups.clone(),
        }
    }

    /// `known_hosts` file used to verify the code-review host.
    ///
    /// Defaults to `known_hosts` next to the worker key, i.e. the worker's
    /// `~/.ssh/known_hosts` for the usual key location.
    #[must_use]
    pub fn known_hosts_path(&self) -> PathBuf {
        if let Some(path) = &self.ssh.known_hosts_file {
            return path.clone();
        }
        self.worker
            .key_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."))
            .join("known_hosts")
    }

    #[must_use]
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.ssh.connect_timeout_secs)
    }

    #[must_use]
    pub fn command_timeout(&self) -> Duration {
        Duration::from_secs(self.ssh.command_timeout_secs)
    }

    /// Directory receiving the worker's YAML config files, if deployment is
    /// configured.
    #[must_use]
    pub fn worker_config_dir(&self) -> Option<PathBuf> {
        self.deploy_base
            .as_ref()
            .map(|base| base.join("shared").join("config"))
    }

    /// Validates every field that the provisioning steps rely on.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_host(&self.gerrit.host)?;
        if self.gerrit.port == 0 {
            return Err(ConfigError::InvalidPort(self.gerrit.port));
        }
        validate_username("admin.username", &self.admin.username)?;
        non_empty("admin.key_path", &self.admin.key_path.to_string_lossy())?;
        validate_username("worker.username", &self.worker.username)?;
        non_empty("worker.full_name", &self.worker.full_name)?;
        non_empty("worker.email", &self.worker.email)?;
        non_empty("worker.key_path", &self.worker.key_path.to_string_lossy())?;

        let mut seen = HashSet::new();
        for group in &self.worker.groups {
            non_empty("worker.groups[]", group)?;
            if !seen.insert(group.as_str()) {
                return Err(ConfigError::DuplicateGroup(group.clone()));
            }
        }

        if self.ssh.connect_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout {
                field: "ssh.connect_timeout_secs",
            });
        }
        if self.ssh.command_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout {
                field: "ssh.command_timeout_secs",
            });
        }

        if let Some(amqp) = &self.amqp {
            non_empty("amqp.user", &amqp.user)?;
            non_empty("amqp.server", &amqp.server)?;
            non_empty("amqp.password_env", &amqp.password_env)?;
        }
        Ok(())
    }
}

// ── Validators ───────────────────────────────────────────────────────────────

fn non_empty(field: &'static str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Empty { field });
    }
    Ok(())
}

/// Validates the code-review hostname. It is passed to `ssh` and
/// `ssh-keyscan` as a positional argument, so it must not look like an
/// option or split into several words.
///
/// # Errors
///
/// Returns an error if the name is empty, starts with `-`, or contains
/// whitespace.
pub fn validate_host(value: &str) -> Result<(), ConfigError> {
    non_empty("gerrit.host", value)?;
    if value.starts_with('-') || value.chars().any(char::is_whitespace) {
        return Err(ConfigError::InvalidHost(value.to_string()));
    }
    Ok(())
}

/// Validates a remote account name.
///
/// # Errors
///
/// Returns an error if the name is empty or contains characters outside
/// `[a-zA-Z0-9._@-]`.
pub fn validate_username(field: &'static str, value: &str) -> Result<(), ConfigError> {
    non_empty(field, value)?;
    if !USERNAME_RE.is_match(value) {
        return Err(ConfigError::InvalidUsername {
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}

// ── Unit tests ───────────────────────────────────────────────────────────────
