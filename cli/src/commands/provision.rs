//! `mqw-provision provision` — run every provisioning step.

use anyhow::Result;

use crate::app::AppContext;
use crate::application::services::host_key::HostKeyOutcome;
use crate::application::services::provision::{ProvisionReport, provision};
use crate::commands::files_json;
use crate::output::json;

/// Run the full provisioning pipeline.
///
/// # Errors
///
/// Returns the first failing step's error.
pub async fn run(app: &AppContext) -> Result<()> {
    let cfg = app.load_config()?;
    let ssh = app.ssh(&cfg);
    let report = {
        let reporter = app.reporter();
        provision(&ssh, &app.fs, &app.secrets, &reporter, &cfg).await?
    };

    if app.is_json() {
        return json::print(&report_json(&report));
    }
    app.output.success(&format!(
        "worker '{}' provisioned on {}",
        cfg.worker.username,
        cfg.host()
    ));
    print_summary(app, &report);
    Ok(())
}

fn print_summary(app: &AppContext, report: &ProvisionReport) {
    let out = &app.output;
    out.summary("key pair", report.keypair.as_str());
    match &report.host_key {
        HostKeyOutcome::AlreadyKnown => out.summary("host key", "already known"),
        HostKeyOutcome::Added(lines) => {
            out.summary("host key", &format!("{} added", lines.len()));
        }
    }
    out.summary(
        "ssh config",
        report.ssh_config.map_or("not configured", |c| c.as_str()),
    );
    out.summary("account", report.account.as_str());
    for (path, change) in &report.worker_files {
        out.summary(change.as_str(), &path.display().to_string());
    }
}

fn report_json(report: &ProvisionReport) -> serde_json::Value {
    let (host_key, host_keys_added) = match &report.host_key {
        HostKeyOutcome::AlreadyKnown => ("already_known", 0),
        HostKeyOutcome::Added(lines) => ("added", lines.len()),
    };
    serde_json::json!({
        "keypair": report.keypair.as_str(),
        "host_key": host_key,
        "host_keys_added": host_keys_added,
        "ssh_config": report.ssh_config.map(|c| c.as_str()),
        "account": report.account.as_str(),
        "worker_files": files_json(&report.worker_files),
    })
}
