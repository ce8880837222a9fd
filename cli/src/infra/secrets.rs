//! Infrastructure implementation of the `SecretSource` port.

use crate::application::ports::SecretSource;

/// Reads secrets from process environment variables.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvSecrets;

impl SecretSource for EnvSecrets {
    fn secret(&self, name: &str) -> Option<String> {
        std::env::var(name).ok().filter(|v| !v.is_empty())
    }
}
