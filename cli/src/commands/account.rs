//! `mqw-provision account` — ensure the worker account exists.

use anyhow::Result;

use crate::app::AppContext;
use crate::application::services::account::AccountProvisioner;
use crate::domain::AccountOutcome;
use crate::output::json;

/// Run the account step on its own.
///
/// # Errors
///
/// Returns the `ProvisionError` of a failed attempt, wrapped in `anyhow`.
pub async fn run(app: &AppContext) -> Result<()> {
    let cfg = app.load_config()?;
    let ssh = app.ssh(&cfg);
    let outcome = {
        let reporter = app.reporter();
        AccountProvisioner::new(&ssh, &ssh, &app.fs, &reporter)
            .ensure_account(
                &cfg.worker_identity(),
                &cfg.admin_identity(),
                &cfg.host(),
                cfg.account_request(),
            )
            .await?
    };

    if app.is_json() {
        return json::print(&serde_json::json!({
            "account": cfg.worker.username,
            "host": cfg.host().to_string(),
            "outcome": outcome.as_str(),
        }));
    }
    if outcome == AccountOutcome::AlreadyExists {
        app.output.info("nothing to do");
    }
    Ok(())
}
