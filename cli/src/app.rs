//! Application context — unified state passed to every command handler.
//!
//! `AppContext` is built once from the top-level flags and hands out the
//! production adapters (config store, OpenSSH, filesystem, reporter).

use std::path::PathBuf;

use anyhow::Result;

use crate::application::ports::ConfigStore;
use crate::domain::ProvisionConfig;
use crate::infra::command_runner::TokioCommandRunner;
use crate::infra::config::YamlConfigStore;
use crate::infra::fs::HostFs;
use crate::infra::secrets::EnvSecrets;
use crate::infra::ssh::{OpenSsh, SshOptions};
use crate::output::{OutputContext, TerminalReporter};

/// Output rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable terminal output (default).
    Human,
    /// Machine-readable JSON output.
    Json,
}

/// Output rendering flags.
pub struct OutputFlags {
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Suppress non-error output.
    pub quiet: bool,
    /// Enable JSON output mode.
    pub json: bool,
}

/// Unified application context passed to every command handler.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    pub output: OutputContext,
    /// Output rendering mode (human vs JSON).
    pub mode: OutputMode,
    /// Provisioning configuration store.
    pub config_store: YamlConfigStore,
    /// Local filesystem adapter.
    pub fs: HostFs,
    /// Secret lookup (AMQP password).
    pub secrets: EnvSecrets,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags.
    ///
    /// JSON mode implies quiet progress output so stdout carries only the
    /// JSON document.
    #[must_use]
    pub fn new(flags: &OutputFlags, config: Option<PathBuf>) -> Self {
        let mode = if flags.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        };
        Self {
            output: OutputContext::new(flags.no_color, flags.quiet || flags.json),
            mode,
            config_store: YamlConfigStore::new(config),
            fs: HostFs,
            secrets: EnvSecrets,
        }
    }

    /// Returns `true` when JSON output mode is active.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.mode == OutputMode::Json
    }

    /// Load and validate the provisioning configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or fails
    /// validation.
    pub fn load_config(&self) -> Result<ProvisionConfig> {
        let cfg = self.config_store.load()?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// OpenSSH adapter configured from `cfg`.
    #[must_use]
    pub fn ssh(&self, cfg: &ProvisionConfig) -> OpenSsh<TokioCommandRunner> {
        OpenSsh::new(
            TokioCommandRunner::new(cfg.command_timeout()),
            SshOptions::from_config(cfg),
        )
    }

    /// Progress reporter for the current output mode.
    #[must_use]
    pub fn reporter(&self) -> TerminalReporter<'_> {
        TerminalReporter::with_spinner(&self.output)
    }
}
