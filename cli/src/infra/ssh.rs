//! OpenSSH client adapter — implements `SshProbe`, `RemoteCommandRunner` and
//! `SshKeyTools` by running `ssh`, `ssh-keygen` and `ssh-keyscan` through a
//! `CommandRunner`.

use std::path::{Path, PathBuf};
use std::process::Output;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::application::ports::{CommandRunner, RemoteCommandRunner, SshKeyTools, SshProbe};
use crate::domain::account::NO_EXIT_STATUS;
use crate::domain::{CommandOutcome, ProvisionConfig, RemoteHost, RemoteIdentity};

/// Exit status `ssh` reserves for its own errors (connection refused,
/// authentication failure, host key mismatch).
pub const SSH_ERROR_STATUS: i32 = 255;

/// Connection settings shared by every `ssh` invocation.
#[derive(Debug, Clone)]
pub struct SshOptions {
    /// `ConnectTimeout` passed to `ssh` / `-T` passed to `ssh-keyscan`.
    pub connect_timeout: Duration,
    /// Deadline for the whole process; it is killed afterwards.
    pub command_timeout: Duration,
    /// `known_hosts` file for host key verification.
    pub known_hosts_file: PathBuf,
}

impl SshOptions {
    #[must_use]
    pub fn from_config(cfg: &ProvisionConfig) -> Self {
        Self {
            connect_timeout: cfg.connect_timeout(),
            command_timeout: cfg.command_timeout(),
            known_hosts_file: cfg.known_hosts_path(),
        }
    }
}

/// Production SSH adapter backed by the OpenSSH command-line tools.
pub struct OpenSsh<R: CommandRunner> {
    runner: R,
    options: SshOptions,
}

#[cfg(windows)]
const DEV_NULL: &str = "NUL";
#[cfg(not(windows))]
const DEV_NULL: &str = "/dev/null";

impl<R: CommandRunner> OpenSsh<R> {
    #[must_use]
    pub fn new(runner: R, options: SshOptions) -> Self {
        Self { runner, options }
    }

    /// The process runner every OpenSSH tool is launched through.
    #[must_use]
    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Builds the `ssh` argument list for `identity@host`, optionally
    /// followed by a remote command line.
    #[must_use]
    pub fn ssh_args(
        &self,
        identity: &RemoteIdentity,
        host: &RemoteHost,
        host_key_checking: bool,
        command_line: Option<&str>,
    ) -> Vec<String> {
        let mut args: Vec<String> = vec![
            "-T".into(),
            "-o".into(),
            "BatchMode=yes".into(),
            "-o".into(),
            "IdentitiesOnly=yes".into(),
            "-o".into(),
            format!("ConnectTimeout={}", self.options.connect_timeout.as_secs().max(1)),
        ];
        if host_key_checking {
            args.extend([
                "-o".into(),
                "StrictHostKeyChecking=yes".into(),
                "-o".into(),
                format!("UserKnownHostsFile={}", self.options.known_hosts_file.display()),
            ]);
        } else {
            args.extend([
                "-o".into(),
                "StrictHostKeyChecking=no".into(),
                "-o".into(),
                format!("UserKnownHostsFile={DEV_NULL}"),
                "-o".into(),
                "LogLevel=ERROR".into(),
            ]);
        }
        args.extend([
            "-i".into(),
            identity.private_key_path.display().to_string(),
            "-p".into(),
            host.port.to_string(),
            "-l".into(),
            identity.username.clone(),
            host.hostname.clone(),
        ]);
        if let Some(cmd) = command_line {
            args.push(cmd.to_string());
        }
        args
    }

    async fn run_ssh(&self, program: &str, args: &[String]) -> Result<Output> {
        let argv: Vec<&str> = args.iter().map(String::as_str).collect();
        self.runner
            .run_with_timeout(program, &argv, self.options.command_timeout)
            .await
    }
}

/// Creates `dir` and its missing parents; the leaf is made 700 on Unix.
async fn create_private_dir(dir: &Path) -> Result<()> {
    tokio::fs::create_dir_all(dir)
        .await
        .with_context(|| format!("create dir {}", dir.display()))?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tokio::fs::set_permissions(dir, std::fs::Permissions::from_mode(0o700))
            .await
            .with_context(|| format!("set permissions on {}", dir.display()))?;
    }
    Ok(())
}

fn exit_status(output: &Output) -> i32 {
    output.status.code().unwrap_or(NO_EXIT_STATUS)
}

fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).trim_end().to_string()
}

impl<R: CommandRunner> SshProbe for OpenSsh<R> {
    async fn can_authenticate(&self, identity: &RemoteIdentity, host: &RemoteHost) -> bool {
        let args = self.ssh_args(identity, host, true, None);
        match self.run_ssh("ssh", &args).await {
            Ok(output) => {
                let status = exit_status(&output);
                let reachable = status != SSH_ERROR_STATUS && status != NO_EXIT_STATUS;
                tracing::debug!(
                    user = %identity.username,
                    %host,
                    status,
                    stderr = %lossy(&output.stderr),
                    reachable,
                    "ssh probe"
                );
                reachable
            }
            Err(e) => {
                tracing::warn!(user = %identity.username, %host, "ssh probe failed: {e:#}");
                false
            }
        }
    }
}

impl<R: CommandRunner> RemoteCommandRunner for OpenSsh<R> {
    async fn run_remote(
        &self,
        identity: &RemoteIdentity,
        host: &RemoteHost,
        command_line: &str,
        host_key_checking: bool,
    ) -> Result<CommandOutcome> {
        let args = self.ssh_args(identity, host, host_key_checking, Some(command_line));
        let output = self
            .run_ssh("ssh", &args)
            .await
            .with_context(|| format!("running remote command on {host}"))?;
        let outcome = CommandOutcome::new(
            exit_status(&output),
            lossy(&output.stdout),
            lossy(&output.stderr),
        );
        tracing::debug!(%host, status = outcome.exit_status, "remote command finished");
        Ok(outcome)
    }
}

impl<R: CommandRunner> SshKeyTools for OpenSsh<R> {
    async fn generate_keypair(&self, private_key_path: &Path, comment: &str) -> Result<()> {
        match private_key_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() && !parent.exists() => {
                create_private_dir(parent).await?;
            }
            _ => {}
        }
        let path = private_key_path.display().to_string();
        let output = self
            .runner
            .run(
                "ssh-keygen",
                &["-t", "rsa", "-b", "4096", "-q", "-N", "", "-f", &path, "-C", comment],
            )
            .await?;
        anyhow::ensure!(
            output.status.success(),
            "ssh-keygen failed: {}",
            lossy(&output.stderr)
        );
        Ok(())
    }

    async fn derive_public_key(&self, private_key_path: &Path) -> Result<String> {
        let path = private_key_path.display().to_string();
        let output = self.runner.run("ssh-keygen", &["-y", "-f", &path]).await?;
        anyhow::ensure!(
            output.status.success(),
            "ssh-keygen -y failed: {}",
            lossy(&output.stderr)
        );
        String::from_utf8(output.stdout).context("ssh-keygen output is not valid UTF-8")
    }

    async fn scan_host_keys(&self, host: &RemoteHost) -> Result<String> {
        let port = host.port.to_string();
        let timeout = self.options.connect_timeout.as_secs().max(1).to_string();
        let output = self
            .runner
            .run_with_timeout(
                "ssh-keyscan",
                &["-p", &port, "-T", &timeout, &host.hostname],
                self.options.command_timeout,
            )
            .await?;
        let stdout =
            String::from_utf8(output.stdout).context("ssh-keyscan output is not valid UTF-8")?;
        anyhow::ensure!(
            output.status.success() || !stdout.trim().is_empty(),
            "ssh-keyscan failed: {}",
            lossy(&output.stderr)
        );
        Ok(stdout)
    }
}
