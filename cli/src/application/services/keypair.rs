//! Application service — worker SSH key pair.

use anyhow::{Context, Result};

use crate::application::ports::{LocalFs, ProgressReporter, SshKeyTools};
use crate::domain::RemoteIdentity;
use crate::domain::ssh::validate_public_key;

/// Outcome of `ensure_keypair`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPairOutcome {
    /// Both halves were already present.
    Existing,
    /// The private key existed; the missing `.pub` file was derived from it.
    PublicKeyRestored,
    /// A new key pair was generated.
    Generated,
}

impl KeyPairOutcome {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Existing => "existing",
            Self::PublicKeyRestored => "public_key_restored",
            Self::Generated => "generated",
        }
    }
}

/// Generate the identity's key pair unless its private key already exists.
///
/// An existing private key is never overwritten.
///
/// # Errors
///
/// Returns an error if key generation fails or the derived public key is
/// invalid.
pub async fn ensure_keypair(
    tools: &impl SshKeyTools,
    fs: &impl LocalFs,
    reporter: &impl ProgressReporter,
    identity: &RemoteIdentity,
    comment: &str,
) -> Result<KeyPairOutcome> {
    let private = &identity.private_key_path;
    let public = identity.public_key_path();

    if fs.exists(private) {
        if fs.exists(&public) {
            return Ok(KeyPairOutcome::Existing);
        }
        reporter.warn(&format!(
            "{} is missing, deriving it from the private key",
            public.display()
        ));
        let key = tools.derive_public_key(private).await?;
        validate_public_key(&key)?;
        fs.write_private(&public, &format!("{}\n", key.trim()))?;
        return Ok(KeyPairOutcome::PublicKeyRestored);
    }

    reporter.step(&format!("generating SSH key {}...", private.display()));
    tools
        .generate_keypair(private, comment)
        .await
        .with_context(|| format!("generating SSH key {}", private.display()))?;
    anyhow::ensure!(
        fs.exists(&public),
        "ssh-keygen did not produce {}",
        public.display()
    );
    reporter.success(&format!("generated SSH key {}", private.display()));
    Ok(KeyPairOutcome::Generated)
}
