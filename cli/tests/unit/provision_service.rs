//! Tests for the full `provision` run.

#![allow(clippy::expect_used)]

use std::path::PathBuf;

use mqw_provision::application::ports::FileChange;
use mqw_provision::application::services::host_key::HostKeyOutcome;
use mqw_provision::application::services::keypair::KeyPairOutcome;
use mqw_provision::application::services::provision::provision;
use mqw_provision::domain::{AccountOutcome, ProvisionError};

use crate::helpers::{WORKER_KEY, config};
use crate::mocks::{FakeSsh, MapSecrets, MemoryFs, NoopReporter};

/// Default `known_hosts` location: next to the worker key.
const KNOWN_HOSTS: &str = "/home/mq/.ssh/known_hosts";

const SCAN: &str = "[review.example.org]:29418 ssh-ed25519 AAAAC3NzaC1lZDI1NTE5\n";

#[tokio::test]
async fn test_fresh_worker_is_fully_provisioned() {
    let fs = MemoryFs::default();
    let ssh = FakeSsh::new(&fs).authenticating("batch-admin").scanning(SCAN);
    let mut cfg = config();
    cfg.ssh.known_hosts_file = Some(PathBuf::from("/etc/mq/known_hosts"));
    cfg.ssh.config_file = Some(PathBuf::from("/home/mq/.ssh/config"));
    cfg.deploy_base = Some(PathBuf::from("/srv/mq"));

    let report = provision(&ssh, &fs, &MapSecrets::default(), &NoopReporter, &cfg)
        .await
        .expect("provision");

    assert_eq!(report.keypair, KeyPairOutcome::Generated);
    assert!(matches!(report.host_key, HostKeyOutcome::Added(ref l) if l.len() == 1));
    assert!(fs.get("/etc/mq/known_hosts").is_some());
    assert_eq!(report.ssh_config, Some(FileChange::Written));
    assert_eq!(report.account, AccountOutcome::Created);
    assert_eq!(report.worker_files.len(), 1);

    let cmd = &ssh.remote_calls()[0].command_line;
    assert!(
        cmd.contains("--ssh-key 'ssh-rsa AAAAB3NzaC1yc2E mq@example.org'"),
        "generated key is registered: {cmd}"
    );
}

#[tokio::test]
async fn test_already_provisioned_worker_only_probes() {
    let fs = MemoryFs::default()
        .with_file(WORKER_KEY, "private")
        .with_file(format!("{WORKER_KEY}.pub"), crate::helpers::PUBLIC_KEY)
        .with_file(KNOWN_HOSTS, SCAN);
    let ssh = FakeSsh::new(&fs).authenticating("mqwreview");

    let report = provision(&ssh, &fs, &MapSecrets::default(), &NoopReporter, &config())
        .await
        .expect("provision");

    assert_eq!(report.keypair, KeyPairOutcome::Existing);
    assert_eq!(report.host_key, HostKeyOutcome::AlreadyKnown);
    assert_eq!(ssh.scan_count(), 0);
    assert_eq!(report.ssh_config, None);
    assert_eq!(report.account, AccountOutcome::AlreadyExists);
    assert!(ssh.remote_calls().is_empty());
    assert!(fs.writes().is_empty());
}

#[tokio::test]
async fn test_default_config_registers_host_key_before_probing() {
    let fs = MemoryFs::default();
    let ssh = FakeSsh::new(&fs).authenticating("batch-admin").scanning(SCAN);

    let report = provision(&ssh, &fs, &MapSecrets::default(), &NoopReporter, &config())
        .await
        .expect("provision");

    assert_eq!(ssh.scan_count(), 1, "host key must be scanned on a fresh machine");
    assert!(matches!(report.host_key, HostKeyOutcome::Added(_)));
    assert_eq!(fs.get(KNOWN_HOSTS).as_deref(), Some(SCAN));
}

#[tokio::test]
async fn test_account_error_is_recoverable_from_chain() {
    let fs = MemoryFs::default();
    let ssh = FakeSsh::new(&fs).scanning(SCAN);

    let err = provision(&ssh, &fs, &MapSecrets::default(), &NoopReporter, &config())
        .await
        .expect_err("must fail");

    let inner = err
        .downcast_ref::<ProvisionError>()
        .expect("ProvisionError in chain");
    assert_eq!(inner.code(), "admin_unavailable");
}

#[tokio::test]
async fn test_invalid_config_stops_before_any_step() {
    let fs = MemoryFs::default();
    let ssh = FakeSsh::new(&fs);
    let mut cfg = config();
    cfg.worker.username = "bad user".to_string();

    let err = provision(&ssh, &fs, &MapSecrets::default(), &NoopReporter, &cfg)
        .await
        .expect_err("must fail");

    assert!(err.to_string().contains("worker.username"), "got: {err}");
    assert!(ssh.generated().is_empty());
    assert!(ssh.probes().is_empty());
}
