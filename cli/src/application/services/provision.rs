//! Application service — the full provisioning run.
//!
//! Runs every step in order and stops at the first failure.

use std::path::PathBuf;

use anyhow::Result;

use crate::application::ports::{
    FileChange, LocalFs, ProgressReporter, PublicKeyReader, RemoteCommandRunner, SecretSource,
    SshKeyTools, SshProbe,
};
use crate::application::services::account::AccountProvisioner;
use crate::application::services::host_key::{HostKeyOutcome, register_host_key};
use crate::application::services::keypair::{KeyPairOutcome, ensure_keypair};
use crate::application::services::ssh_config::ensure_ssh_config;
use crate::application::services::worker_config::write_worker_config;
use crate::domain::{AccountOutcome, ProvisionConfig};

/// What each step of a provisioning run did. The SSH config step is `None`
/// when `ssh.config_file` is not configured.
#[derive(Debug)]
pub struct ProvisionReport {
    pub keypair: KeyPairOutcome,
    pub host_key: HostKeyOutcome,
    pub ssh_config: Option<FileChange>,
    pub account: AccountOutcome,
    pub worker_files: Vec<(PathBuf, FileChange)>,
}

/// Provision the worker: key pair, host key, SSH config, remote account,
/// worker config files.
///
/// # Errors
///
/// Returns the first step's error. A `ProvisionError` from the account step
/// is preserved and can be recovered with `downcast_ref`.
pub async fn provision(
    ssh: &(impl SshProbe + RemoteCommandRunner + SshKeyTools),
    fs: &(impl LocalFs + PublicKeyReader),
    secrets: &impl SecretSource,
    reporter: &impl ProgressReporter,
    cfg: &ProvisionConfig,
) -> Result<ProvisionReport> {
    cfg.validate()?;
    let host = cfg.host();
    let worker = cfg.worker_identity();

    let keypair = ensure_keypair(ssh, fs, reporter, &worker, &cfg.worker.email).await?;

    let host_key =
        register_host_key(ssh, fs, reporter, &host, &cfg.known_hosts_path()).await?;

    let ssh_config = match &cfg.ssh.config_file {
        Some(path) => Some(ensure_ssh_config(fs, reporter, path, &host, &worker)?),
        None => None,
    };

    let account = AccountProvisioner::new(ssh, ssh, fs, reporter)
        .ensure_account(&worker, &cfg.admin_identity(), &host, cfg.account_request())
        .await?;

    let worker_files = write_worker_config(fs, secrets, reporter, cfg)?;

    Ok(ProvisionReport {
        keypair,
        host_key,
        ssh_config,
        account,
        worker_files,
    })
}
