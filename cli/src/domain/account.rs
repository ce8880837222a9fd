//! Value types for remote account provisioning and the account-creation
//! command line.
//!
//! Pure functions only — no I/O, no async, no filesystem access.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::domain::shell;

// ── Constants ────────────────────────────────────────────────────────────────

/// SSH port of the code-review server.
pub const DEFAULT_SSH_PORT: u16 = 29418;

/// Groups a freshly created worker account joins unless configured otherwise.
pub const DEFAULT_GROUPS: &[&str] = &["Non-Interactive Users", "Administrators"];

/// Exit status reported when a process produced no exit code.
pub const NO_EXIT_STATUS: i32 = -1;

// ── Identities and hosts ─────────────────────────────────────────────────────

/// A credential usable to authenticate an SSH session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteIdentity {
    pub username: String,
    pub private_key_path: PathBuf,
}

impl RemoteIdentity {
    #[must_use]
    pub fn new(username: impl Into<String>, private_key_path: impl Into<PathBuf>) -> Self {
        Self {
            username: username.into(),
            private_key_path: private_key_path.into(),
        }
    }

    /// Path of the public half of this identity's key pair (`<key>.pub`).
    #[must_use]
    pub fn public_key_path(&self) -> PathBuf {
        public_key_path(&self.private_key_path)
    }
}

/// Returns `<private_key_path>.pub`.
#[must_use]
pub fn public_key_path(private_key_path: &Path) -> PathBuf {
    let mut os = private_key_path.as_os_str().to_owned();
    os.push(".pub");
    PathBuf::from(os)
}

/// An SSH-speaking endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteHost {
    pub hostname: String,
    pub port: u16,
}

impl RemoteHost {
    #[must_use]
    pub fn new(hostname: impl Into<String>, port: u16) -> Self {
        Self {
            hostname: hostname.into(),
            port,
        }
    }

    /// The name under which OpenSSH records this host in `known_hosts`:
    /// bare hostname on port 22, `[host]:port` otherwise.
    #[must_use]
    pub fn known_hosts_name(&self) -> String {
        if self.port == 22 {
            self.hostname.clone()
        } else {
            format!("[{}]:{}", self.hostname, self.port)
        }
    }
}

impl fmt::Display for RemoteHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.hostname, self.port)
    }
}

// ── Account request ──────────────────────────────────────────────────────────

/// The account to create on the code-review server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountRequest {
    pub target_username: String,
    pub full_name: String,
    pub email: String,
    pub public_key_material: String,
    pub group_memberships: Vec<String>,
}

impl AccountRequest {
    /// Builds the remote `gerrit create-account` command line.
    ///
    /// Every token is shell-quoted so that free text (names, email, key
    /// material) reaches the remote side as exactly one argument each.
    #[must_use]
    pub fn create_command(&self) -> String {
        let mut words: Vec<&str> = vec!["gerrit", "create-account"];
        for group in &self.group_memberships {
            words.push("--group");
            words.push(group);
        }
        words.extend([
            "--full-name",
            &self.full_name,
            "--email",
            &self.email,
            "--ssh-key",
            self.public_key_material.trim(),
            &self.target_username,
        ]);
        shell::join(words)
    }
}

// ── Outcomes ─────────────────────────────────────────────────────────────────

/// Captured result of one remote command execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutcome {
    pub exit_status: i32,
    pub stdout: String,
    pub stderr: String,
    pub succeeded: bool,
}

impl CommandOutcome {
    #[must_use]
    pub fn new(exit_status: i32, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            exit_status,
            stdout: stdout.into(),
            stderr: stderr.into(),
            succeeded: exit_status == 0,
        }
    }
}

/// Terminal success states of `ensure_account`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountOutcome {
    /// The target identity already authenticates; nothing was done.
    AlreadyExists,
    /// The account was created through the admin identity.
    Created,
}

impl AccountOutcome {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AlreadyExists => "already_exists",
            Self::Created => "created",
        }
    }
}
