//! `mqw-provision config` — inspect the provisioning configuration.

use anyhow::{Context, Result};
use clap::Subcommand;

use crate::app::AppContext;
use crate::application::ports::ConfigStore;
use crate::output::json;

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration, defaults filled in
    Show,
    /// Load and validate the configuration file
    Validate,
    /// Print the resolved configuration file path
    Path,
}

/// Run the config command.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded or is invalid.
pub fn run(app: &AppContext, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show => show(app),
        ConfigCommand::Validate => validate(app),
        ConfigCommand::Path => path(app),
    }
}

fn show(app: &AppContext) -> Result<()> {
    let cfg = app.config_store.load()?;
    if app.is_json() {
        let value = serde_json::to_value(&cfg).context("JSON serialization failed")?;
        return json::print(&value);
    }
    let yaml = serde_yaml::to_string(&cfg).context("YAML serialization failed")?;
    print!("{yaml}");
    Ok(())
}

fn validate(app: &AppContext) -> Result<()> {
    let path = app.config_store.path()?;
    app.load_config()?;
    if app.is_json() {
        return json::print(&serde_json::json!({
            "path": path.display().to_string(),
            "valid": true,
        }));
    }
    app.output.success(&format!("{} is valid", path.display()));
    Ok(())
}

fn path(app: &AppContext) -> Result<()> {
    let path = app.config_store.path()?;
    if app.is_json() {
        return json::print(&serde_json::json!({ "path": path.display().to_string() }));
    }
    println!("{}", path.display());
    Ok(())
}
