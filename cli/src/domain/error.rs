//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use std::path::PathBuf;

use thiserror::Error;

// ── Provisioning errors ───────────────────────────────────────────────────────

/// Terminal failures of the remote account provisioning procedure.
#[derive(Debug, Error)]
pub enum ProvisionError {
    #[error(
        "worker account cannot connect to {host} and cannot be created, fix manually: \
         admin '{admin}' with key {} could not authenticate",
        key_path.display()
    )]
    AdminUnavailable {
        admin: String,
        key_path: PathBuf,
        host: String,
    },

    #[error("public key {} is not readable: {reason}", path.display())]
    KeyUnreadable { path: PathBuf, reason: String },

    #[error("remote account creation failed (exit status {exit_status}): {stderr}")]
    RemoteCommandFailed { exit_status: i32, stderr: String },
}

impl ProvisionError {
    /// Stable machine-readable code used by `--json` error output.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::AdminUnavailable { .. } => "admin_unavailable",
            Self::KeyUnreadable { .. } => "key_unreadable",
            Self::RemoteCommandFailed { .. } => "remote_command_failed",
        }
    }
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to provisioning configuration validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{field} must not be empty")]
    Empty { field: &'static str },

    #[error("invalid {field} '{value}': must match ^[a-zA-Z0-9._@-]+$")]
    InvalidUsername { field: &'static str, value: String },

    #[error("invalid gerrit.host '{0}': must not start with '-' or contain whitespace")]
    InvalidHost(String),

    #[error("invalid port {0}: must be between 1 and 65535")]
    InvalidPort(u16),

    #[error("group '{0}' is listed more than once")]
    DuplicateGroup(String),

    #[error("{field} must be greater than zero")]
    ZeroTimeout { field: &'static str },
}
