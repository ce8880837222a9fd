//! JSON output helpers.
//!
//! Provides the error-object formatter used by all `--json` code paths when
//! a command fails.

use anyhow::{Context, Result};

use crate::domain::ProvisionError;

/// Format a JSON error object.
///
/// Output (pretty-printed):
/// ```json
/// {
///   "error": true,
///   "message": "...",
///   "code": "..."
/// }
/// ```
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_error(message: &str, code: &str) -> Result<String> {
    let obj = serde_json::json!({
        "error": true,
        "message": message,
        "code": code,
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}

/// Stable error code for `err`: the `ProvisionError` code when the chain
/// carries one, `"error"` otherwise.
#[must_use]
pub fn error_code(err: &anyhow::Error) -> &'static str {
    err.chain()
        .find_map(|e| e.downcast_ref::<ProvisionError>())
        .map_or("error", ProvisionError::code)
}

/// Pretty-print `value` to stdout.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn print(value: &serde_json::Value) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).context("JSON serialization failed")?
    );
    Ok(())
}
