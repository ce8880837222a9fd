//! `mqw-provision keygen` — generate the worker SSH key pair.

use anyhow::Result;

use crate::app::AppContext;
use crate::application::services::keypair::{KeyPairOutcome, ensure_keypair};
use crate::output::json;

/// Run the key pair step on its own.
///
/// # Errors
///
/// Returns an error if key generation fails.
pub async fn run(app: &AppContext) -> Result<()> {
    let cfg = app.load_config()?;
    let ssh = app.ssh(&cfg);
    let identity = cfg.worker_identity();
    let outcome = {
        let reporter = app.reporter();
        ensure_keypair(&ssh, &app.fs, &reporter, &identity, &cfg.worker.email).await?
    };

    if app.is_json() {
        return json::print(&serde_json::json!({
            "key": identity.private_key_path.display().to_string(),
            "outcome": outcome.as_str(),
        }));
    }
    if outcome == KeyPairOutcome::Existing {
        app.output
            .info(&format!("{} already exists", identity.private_key_path.display()));
    }
    Ok(())
}
