//! CLI argument parsing with clap derive

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::app::{AppContext, OutputFlags};
use crate::commands;

/// Provision the code-review account and SSH setup of a message-queue worker
#[derive(Parser)]
#[command(
    name = "mqw-provision",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Path to the provisioning config file
    #[arg(long, global = true, env = "MQW_PROVISION_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(
        long,
        global = true,
        env = "NO_COLOR",
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    pub no_color: bool,

    /// Log diagnostics to stderr (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run every provisioning step
    Provision,

    /// Ensure the worker account exists on the code-review server
    Account,

    /// Generate the worker SSH key pair if missing
    Keygen,

    /// Register the code-review host key in known_hosts
    KnownHosts,

    /// Write the SSH client config block for the code-review host
    SshConfig,

    /// Write the worker's gerrit.yml / amqp.yml
    WorkerConfig,

    /// Check whether an identity can log in to the code-review server
    Probe(commands::probe::ProbeArgs),

    /// Inspect configuration
    #[command(subcommand)]
    Config(commands::config::ConfigCommand),

    /// Show version
    Version,
}

/// Install the stderr `tracing` subscriber.
///
/// `-v` flags take precedence over `RUST_LOG`; without either only warnings
/// are logged.
pub fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("mqw_provision=info"),
        _ => EnvFilter::new("mqw_provision=debug"),
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails.
    pub async fn run(self) -> Result<()> {
        let Cli {
            config,
            json,
            quiet,
            no_color,
            command,
            ..
        } = self;
        let app = AppContext::new(
            &OutputFlags {
                no_color,
                quiet,
                json,
            },
            config,
        );
        match command {
            Command::Provision => commands::provision::run(&app).await,
            Command::Account => commands::account::run(&app).await,
            Command::Keygen => commands::keygen::run(&app).await,
            Command::KnownHosts => commands::known_hosts::run(&app).await,
            Command::SshConfig => commands::ssh_config::run(&app),
            Command::WorkerConfig => commands::worker_config::run(&app),
            Command::Probe(args) => commands::probe::run(&app, &args).await,
            Command::Config(cmd) => commands::config::run(&app, cmd),
            Command::Version => commands::version::run(json),
        }
    }
}
