//! `mqw-provision ssh-config` — write the SSH client config block.

use anyhow::{Context, Result};

use crate::app::AppContext;
use crate::application::ports::FileChange;
use crate::application::services::ssh_config::ensure_ssh_config;
use crate::output::json;

/// Run the SSH config step on its own.
///
/// # Errors
///
/// Returns an error if `ssh.config_file` is not configured or cannot be
/// written.
pub fn run(app: &AppContext) -> Result<()> {
    let cfg = app.load_config()?;
    let path = cfg
        .ssh
        .config_file
        .clone()
        .context("ssh.config_file is not configured")?;
    let change = ensure_ssh_config(
        &app.fs,
        &app.reporter(),
        &path,
        &cfg.host(),
        &cfg.worker_identity(),
    )?;

    if app.is_json() {
        return json::print(&serde_json::json!({
            "path": path.display().to_string(),
            "change": change.as_str(),
        }));
    }
    if change == FileChange::Unchanged {
        app.output.info(&format!("{} is up to date", path.display()));
    }
    Ok(())
}
