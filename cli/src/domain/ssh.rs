//! OpenSSH file formats: public keys, `known_hosts`, client config blocks.
//!
//! Pure functions only — no I/O.

use std::path::Path;

use anyhow::Result;

use crate::domain::account::RemoteHost;

const KEY_TYPE_PREFIXES: &[&str] = &["ssh-", "ecdsa-", "sk-"];

/// Validates that `key` is a single-line OpenSSH public key with non-empty
/// key material, e.g. `ssh-rsa AAAAB3... comment`.
///
/// # Errors
///
/// Returns an error if the key type is unknown, the key material is missing,
/// or the key spans multiple lines.
pub fn validate_public_key(key: &str) -> Result<()> {
    let key = key.trim();
    anyhow::ensure!(!key.is_empty(), "public key is empty");
    anyhow::ensure!(!key.contains('\n'), "public key spans multiple lines");
    let mut fields = key.split_whitespace();
    let key_type = fields.next().unwrap_or_default();
    anyhow::ensure!(
        KEY_TYPE_PREFIXES.iter().any(|p| key_type.starts_with(p)),
        "unsupported public key type (got: {key_type:?})"
    );
    anyhow::ensure!(
        fields.next().is_some_and(|m| !m.is_empty()),
        "public key has no key material"
    );
    Ok(())
}

// ── known_hosts ──────────────────────────────────────────────────────────────

/// Returns `true` if any non-comment line of a `known_hosts` file lists
/// `host` among its (comma-separated) host patterns.
#[must_use]
pub fn known_hosts_contains(content: &str, host: &RemoteHost) -> bool {
    let name = host.known_hosts_name();
    content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .filter_map(|l| l.split_whitespace().next())
        .any(|patterns| patterns.split(',').any(|p| p == name))
}

/// Keeps only the host key lines of `ssh-keyscan` output that belong to
/// `host`, dropping comments and blank lines.
#[must_use]
pub fn filter_scanned_keys(scan_output: &str, host: &RemoteHost) -> Vec<String> {
    let name = host.known_hosts_name();
    scan_output
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .filter(|l| l.split_whitespace().next() == Some(name.as_str()))
        .map(str::to_string)
        .collect()
}

// ── ssh_config ───────────────────────────────────────────────────────────────

/// Renders the client config block pinning user, identity and port for
/// `host`.
#[must_use]
pub fn render_host_block(host: &RemoteHost, user: &str, identity_file: &Path) -> String {
    format!(
        "Host {}\n  User {user}\n  IdentityFile {}\n  Port {}\n",
        host.hostname,
        identity_file.display(),
        host.port
    )
}

fn starts_section(line: &str) -> Option<&str> {
    let trimmed = line.trim_start();
    let (keyword, rest) = trimmed.split_once(char::is_whitespace)?;
    if keyword.eq_ignore_ascii_case("host") || keyword.eq_ignore_ascii_case("match") {
        Some(rest.trim())
    } else {
        None
    }
}

/// Returns `existing` with the `Host <hostname>` block replaced by `block`,
/// or with `block` appended when no such block exists.
#[must_use]
pub fn merge_host_block(existing: &str, hostname: &str, block: &str) -> String {
    let lines: Vec<&str> = existing.lines().collect();
    let start = lines
        .iter()
        .position(|l| starts_section(l).is_some_and(|h| h == hostname));

    let Some(start) = start else {
        let mut out = existing.to_string();
        if !out.is_empty() && !out.ends_with('\n') {
            out.push('\n');
        }
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(block);
        return out;
    };

    let end = lines[start + 1..]
        .iter()
        .position(|l| starts_section(l).is_some())
        .map_or(lines.len(), |i| start + 1 + i);

    let mut out = String::new();
    for line in &lines[..start] {
        out.push_str(line);
        out.push('\n');
    }
    out.push_str(block);
    if end < lines.len() {
        out.push('\n');
        for line in &lines[end..] {
            out.push_str(line);
            out.push('\n');
        }
    }
    out
}
