//! Application service — worker `gerrit.yml` / `amqp.yml`.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::application::ports::{FileChange, LocalFs, ProgressReporter, SecretSource};
use crate::domain::ProvisionConfig;
use crate::domain::worker::{self, AMQP_FILE, AmqpSettings, GERRIT_FILE, GerritSettings};

/// Write the worker's config documents under `<deploy_base>/shared/config/`.
///
/// Files whose content is already current are left untouched. Returns one
/// entry per file considered; empty when `deploy_base` is not configured.
///
/// # Errors
///
/// Returns an error if a file cannot be read or written.
pub fn write_worker_config(
    fs: &impl LocalFs,
    secrets: &impl SecretSource,
    reporter: &impl ProgressReporter,
    cfg: &ProvisionConfig,
) -> Result<Vec<(PathBuf, FileChange)>> {
    let Some(dir) = cfg.worker_config_dir() else {
        reporter.warn("deploy_base not configured, skipping worker config files");
        return Ok(Vec::new());
    };

    let mut written = Vec::new();

    let gerrit = worker::render(&GerritSettings::from_config(cfg))?;
    let path = dir.join(GERRIT_FILE);
    written.push((path.clone(), write_if_changed(fs, &path, &gerrit)?));

    if let Some(amqp) = &cfg.amqp {
        match secrets.secret(&amqp.password_env) {
            Some(pass) => {
                let settings = AmqpSettings {
                    user: amqp.user.clone(),
                    pass,
                    host: amqp.server.clone(),
                    vhost: amqp.vhost.clone(),
                };
                let path = dir.join(AMQP_FILE);
                let content = worker::render(&settings)?;
                written.push((path.clone(), write_if_changed(fs, &path, &content)?));
            }
            None => reporter.warn(&format!(
                "{} is not set, AMQP connection will be disabled ({AMQP_FILE} not written)",
                amqp.password_env
            )),
        }
    }

    for (path, change) in &written {
        if *change == FileChange::Written {
            reporter.success(&format!("wrote {}", path.display()));
        }
    }
    Ok(written)
}

fn write_if_changed(fs: &impl LocalFs, path: &Path, content: &str) -> Result<FileChange> {
    if fs.read_optional(path)?.as_deref() == Some(content) {
        return Ok(FileChange::Unchanged);
    }
    fs.write_private(path, content)?;
    Ok(FileChange::Written)
}
