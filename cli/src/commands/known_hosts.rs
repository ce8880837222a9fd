//! `mqw-provision known-hosts` — register the code-review host key.

use anyhow::Result;

use crate::app::AppContext;
use crate::application::services::host_key::{HostKeyOutcome, register_host_key};
use crate::output::json;

/// Run the host key step on its own.
///
/// # Errors
///
/// Returns an error if the host cannot be scanned or the file cannot be
/// written.
pub async fn run(app: &AppContext) -> Result<()> {
    let cfg = app.load_config()?;
    let path = cfg.known_hosts_path();
    let ssh = app.ssh(&cfg);
    let host = cfg.host();
    let outcome = {
        let reporter = app.reporter();
        register_host_key(&ssh, &app.fs, &reporter, &host, &path).await?
    };

    let added = match &outcome {
        HostKeyOutcome::AlreadyKnown => 0,
        HostKeyOutcome::Added(lines) => lines.len(),
    };
    if app.is_json() {
        return json::print(&serde_json::json!({
            "known_hosts": path.display().to_string(),
            "host": host.known_hosts_name(),
            "added": added,
        }));
    }
    if added == 0 {
        app.output
            .info(&format!("{} already in {}", host.known_hosts_name(), path.display()));
    }
    Ok(())
}
