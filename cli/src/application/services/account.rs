//! Application service — remote account provisioning.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! All I/O is routed through injected port traits.

use crate::application::ports::{
    ProgressReporter, PublicKeyReader, RemoteCommandRunner, SshProbe,
};
use crate::domain::account::NO_EXIT_STATUS;
use crate::domain::ssh::validate_public_key;
use crate::domain::{
    AccountOutcome, AccountRequest, ProvisionError, RemoteHost, RemoteIdentity,
};

/// Decides whether the worker account must be created on the code-review
/// server and creates it through the admin identity when it must.
///
/// Probe, remote runner and key reader are separate capabilities so each can
/// be replaced independently; one object may implement several of them.
pub struct AccountProvisioner<'a, P, R, K, Rep> {
    probe: &'a P,
    runner: &'a R,
    keys: &'a K,
    reporter: &'a Rep,
}

impl<'a, P, R, K, Rep> AccountProvisioner<'a, P, R, K, Rep>
where
    P: SshProbe,
    R: RemoteCommandRunner,
    K: PublicKeyReader,
    Rep: ProgressReporter,
{
    #[must_use]
    pub fn new(probe: &'a P, runner: &'a R, keys: &'a K, reporter: &'a Rep) -> Self {
        Self {
            probe,
            runner,
            keys,
            reporter,
        }
    }

    /// Ensure `target` can log in to `host`, creating the account if needed.
    ///
    /// The admin identity is only probed after the target probe failed, and
    /// the creation command is only issued after the admin probe succeeded.
    /// `request.public_key_material` is replaced by the content of
    /// `<target key>.pub`.
    ///
    /// # Errors
    ///
    /// - [`ProvisionError::AdminUnavailable`] if neither identity authenticates.
    /// - [`ProvisionError::KeyUnreadable`] if the target's public key cannot
    ///   be read or is not a public key.
    /// - [`ProvisionError::RemoteCommandFailed`] if the creation command exits
    ///   non-zero or cannot be run.
    pub async fn ensure_account(
        &self,
        target: &RemoteIdentity,
        admin: &RemoteIdentity,
        host: &RemoteHost,
        mut request: AccountRequest,
    ) -> Result<AccountOutcome, ProvisionError> {
        self.reporter
            .step(&format!("checking SSH login of '{}' on {host}...", target.username));
        if self.probe.can_authenticate(target, host).await {
            self.reporter
                .success(&format!("account '{}' already exists", target.username));
            return Ok(AccountOutcome::AlreadyExists);
        }

        self.reporter
            .step(&format!("checking SSH login of admin '{}'...", admin.username));
        if !self.probe.can_authenticate(admin, host).await {
            return Err(ProvisionError::AdminUnavailable {
                admin: admin.username.clone(),
                key_path: admin.private_key_path.clone(),
                host: host.to_string(),
            });
        }

        let pub_path = target.public_key_path();
        let key = self
            .keys
            .read_public_key(&pub_path)
            .await
            .map_err(|e| ProvisionError::KeyUnreadable {
                path: pub_path.clone(),
                reason: format!("{e:#}"),
            })?;
        validate_public_key(&key).map_err(|e| ProvisionError::KeyUnreadable {
            path: pub_path.clone(),
            reason: e.to_string(),
        })?;
        request.public_key_material = key.trim().to_string();

        self.reporter
            .step(&format!("creating account '{}'...", request.target_username));
        let command_line = request.create_command();
        let outcome = self
            .runner
            .run_remote(admin, host, &command_line, false)
            .await
            .map_err(|e| ProvisionError::RemoteCommandFailed {
                exit_status: NO_EXIT_STATUS,
                stderr: format!("{e:#}"),
            })?;

        if !outcome.succeeded {
            return Err(ProvisionError::RemoteCommandFailed {
                exit_status: outcome.exit_status,
                stderr: outcome.stderr,
            });
        }

        self.reporter
            .success(&format!("account '{}' created", request.target_username));
        Ok(AccountOutcome::Created)
    }
}
