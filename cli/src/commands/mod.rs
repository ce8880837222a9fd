//! Command implementations

pub mod account;
pub mod config;
pub mod keygen;
pub mod known_hosts;
pub mod probe;
pub mod provision;
pub mod ssh_config;
pub mod version;
pub mod worker_config;

use std::path::PathBuf;

use crate::application::ports::FileChange;

/// JSON list of `{ "path", "change" }` objects.
pub(crate) fn files_json(files: &[(PathBuf, FileChange)]) -> serde_json::Value {
    files
        .iter()
        .map(|(path, change)| {
            serde_json::json!({
                "path": path.display().to_string(),
                "change": change.as_str(),
            })
        })
        .collect()
}
