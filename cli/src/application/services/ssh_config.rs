//! Application service — SSH client config block for the code-review host.

use std::path::Path;

use anyhow::Result;

use crate::application::ports::{FileChange, LocalFs, ProgressReporter};
use crate::domain::ssh::{merge_host_block, render_host_block};
use crate::domain::{RemoteHost, RemoteIdentity};

/// Ensure `config_file` carries a `Host` block pinning the worker's user,
/// identity file and port for `host`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or written.
pub fn ensure_ssh_config(
    fs: &impl LocalFs,
    reporter: &impl ProgressReporter,
    config_file: &Path,
    host: &RemoteHost,
    identity: &RemoteIdentity,
) -> Result<FileChange> {
    let existing = fs.read_optional(config_file)?.unwrap_or_default();
    let block = render_host_block(host, &identity.username, &identity.private_key_path);
    let merged = merge_host_block(&existing, &host.hostname, &block);
    if merged == existing {
        return Ok(FileChange::Unchanged);
    }
    fs.write_private(config_file, &merged)?;
    reporter.success(&format!(
        "SSH config for {} written to {}",
        host.hostname,
        config_file.display()
    ));
    Ok(FileChange::Written)
}
