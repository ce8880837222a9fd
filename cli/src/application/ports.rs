//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain` — never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::path::{Path, PathBuf};
use std::process::Output;
use std::time::Duration;

use anyhow::Result;

use crate::domain::{CommandOutcome, ProvisionConfig, RemoteHost, RemoteIdentity};

// ── Value Types ───────────────────────────────────────────────────────────────

/// Whether a file-producing step had to touch the disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileChange {
    /// The file already had the desired content.
    Unchanged,
    /// The file was created or rewritten.
    Written,
}

impl FileChange {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unchanged => "unchanged",
            Self::Written => "written",
        }
    }
}

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a program and capture its output.
    ///
    /// Implementations should delegate to `run_with_timeout` using the
    /// instance's configured default timeout.
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output>;
    /// Run a program with a custom timeout override.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or exceeds `timeout`.
    /// On timeout, the child process must be killed (not left orphaned).
    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<Output>;
}

// ── SSH Ports ─────────────────────────────────────────────────────────────────

/// Read-only authentication check against an SSH endpoint.
#[allow(async_fn_in_trait)]
pub trait SshProbe {
    /// Returns `true` iff `identity` authenticates to `host`.
    ///
    /// Must not execute any remote command. Connection failures and
    /// timeouts are reported as `false`.
    async fn can_authenticate(&self, identity: &RemoteIdentity, host: &RemoteHost) -> bool;
}

/// One-shot remote command execution over SSH.
#[allow(async_fn_in_trait)]
pub trait RemoteCommandRunner {
    /// Run `command_line` on `host` as `identity` and capture its outcome.
    ///
    /// With `host_key_checking == false` the host key is neither verified
    /// nor recorded.
    ///
    /// # Errors
    ///
    /// Returns an error if the session could not be run at all (spawn
    /// failure, timeout). A remote non-zero exit is an `Ok` outcome.
    async fn run_remote(
        &self,
        identity: &RemoteIdentity,
        host: &RemoteHost,
        command_line: &str,
        host_key_checking: bool,
    ) -> Result<CommandOutcome>;
}

/// Local OpenSSH key tooling.
#[allow(async_fn_in_trait)]
pub trait SshKeyTools {
    /// Generate a new passphrase-less key pair at `private_key_path`
    /// (and `<path>.pub`) with the given comment.
    async fn generate_keypair(&self, private_key_path: &Path, comment: &str) -> Result<()>;
    /// Derive the public key line from an existing private key.
    async fn derive_public_key(&self, private_key_path: &Path) -> Result<String>;
    /// Fetch the host keys `host` presents, in `known_hosts` line format.
    async fn scan_host_keys(&self, host: &RemoteHost) -> Result<String>;
}

// ── Filesystem Ports ──────────────────────────────────────────────────────────

/// Reads public key files.
#[allow(async_fn_in_trait)]
pub trait PublicKeyReader {
    /// Read the public key file at `path`.
    async fn read_public_key(&self, path: &Path) -> Result<String>;
}

/// Abstracts local filesystem access for the file-producing steps.
pub trait LocalFs {
    /// Returns `true` if `path` exists.
    fn exists(&self, path: &Path) -> bool;
    /// Read a UTF-8 file, returning `None` when it does not exist.
    fn read_optional(&self, path: &Path) -> Result<Option<String>>;
    /// Atomically replace `path` with `content`, creating parent
    /// directories. The file is made readable by its owner only.
    fn write_private(&self, path: &Path, content: &str) -> Result<()>;
}

/// Abstracts secret lookup (e.g. the AMQP password).
pub trait SecretSource {
    /// Returns the secret stored under `name`, if any.
    fn secret(&self, name: &str) -> Option<String>;
}

// ── Config Port ───────────────────────────────────────────────────────────────

/// Abstracts loading the provisioning configuration.
pub trait ConfigStore {
    /// Load and parse the configuration file.
    fn load(&self) -> Result<ProvisionConfig>;
    /// Resolved path of the configuration file.
    fn path(&self) -> Result<PathBuf>;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait — no async needed.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
}
