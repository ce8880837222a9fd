//! Domain layer — pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod account;
pub mod config;
pub mod error;
pub mod shell;
pub mod ssh;
pub mod worker;

pub use account::{
    AccountOutcome, AccountRequest, CommandOutcome, DEFAULT_GROUPS, RemoteHost, RemoteIdentity,
};
pub use config::ProvisionConfig;
pub use error::{ConfigError, ProvisionError};
