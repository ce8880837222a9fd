//! Application service — code-review host key registration.

use std::path::Path;

use anyhow::{Context, Result};

use crate::application::ports::{LocalFs, ProgressReporter, SshKeyTools};
use crate::domain::RemoteHost;
use crate::domain::ssh::{filter_scanned_keys, known_hosts_contains};

/// Outcome of `register_host_key`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostKeyOutcome {
    /// `known_hosts` already had an entry for the host.
    AlreadyKnown,
    /// The listed key lines were appended.
    Added(Vec<String>),
}

/// Append the host keys of `host` to `known_hosts` unless the host is
/// already listed there.
///
/// # Errors
///
/// Returns an error if the host cannot be scanned, presents no keys, or the
/// file cannot be written.
pub async fn register_host_key(
    tools: &impl SshKeyTools,
    fs: &impl LocalFs,
    reporter: &impl ProgressReporter,
    host: &RemoteHost,
    known_hosts: &Path,
) -> Result<HostKeyOutcome> {
    let existing = fs.read_optional(known_hosts)?.unwrap_or_default();
    if known_hosts_contains(&existing, host) {
        return Ok(HostKeyOutcome::AlreadyKnown);
    }

    reporter.step(&format!("scanning host keys of {host}..."));
    let scanned = tools
        .scan_host_keys(host)
        .await
        .with_context(|| format!("scanning host keys of {host}"))?;
    let lines = filter_scanned_keys(&scanned, host);
    anyhow::ensure!(!lines.is_empty(), "{host} presented no host keys");

    let mut content = existing;
    if !content.is_empty() && !content.ends_with('\n') {
        content.push('\n');
    }
    for line in &lines {
        content.push_str(line);
        content.push('\n');
    }
    fs.write_private(known_hosts, &content)?;
    reporter.success(&format!(
        "added {} host key(s) for {host} to {}",
        lines.len(),
        known_hosts.display()
    ));
    Ok(HostKeyOutcome::Added(lines))
}
