//! `mqw-provision worker-config` — write the worker's YAML config files.

use anyhow::Result;

use crate::app::AppContext;
use crate::application::services::worker_config::write_worker_config;
use crate::commands::files_json;
use crate::output::json;

/// Run the worker config step on its own.
///
/// # Errors
///
/// Returns an error if a file cannot be written.
pub fn run(app: &AppContext) -> Result<()> {
    let cfg = app.load_config()?;
    let files = write_worker_config(&app.fs, &app.secrets, &app.reporter(), &cfg)?;

    if app.is_json() {
        return json::print(&serde_json::json!({ "files": files_json(&files) }));
    }
    Ok(())
}
