//! `mqw-provision probe` — check SSH login of the worker or admin identity.

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::ports::SshProbe;
use crate::output::json;

/// Arguments for the probe command.
#[derive(Args)]
pub struct ProbeArgs {
    /// Probe the admin identity instead of the worker
    #[arg(long)]
    pub admin: bool,
}

/// Probe one identity. Unreachable is a result, not an error.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded.
pub async fn run(app: &AppContext, args: &ProbeArgs) -> Result<()> {
    let cfg = app.load_config()?;
    let identity = if args.admin {
        cfg.admin_identity()
    } else {
        cfg.worker_identity()
    };
    let host = cfg.host();
    let reachable = app.ssh(&cfg).can_authenticate(&identity, &host).await;

    if app.is_json() {
        return json::print(&serde_json::json!({
            "user": identity.username,
            "host": host.to_string(),
            "reachable": reachable,
        }));
    }
    let msg = format!("{}@{host}", identity.username);
    if reachable {
        app.output.success(&format!("{msg} can log in"));
    } else {
        app.output.warn(&format!("{msg} cannot log in"));
    }
    Ok(())
}
