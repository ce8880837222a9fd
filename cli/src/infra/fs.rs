//! Filesystem infrastructure — implements `LocalFs` and `PublicKeyReader`.

use std::io::Write as _;
use std::path::Path;

use anyhow::{Context, Result};

use crate::application::ports::{LocalFs, PublicKeyReader};

/// Production filesystem implementation.
///
/// Writes go through a temp file in the target directory followed by a
/// rename, so readers never observe a half-written file. Files are 600 and
/// newly created parent directories 700 on Unix.
#[derive(Debug, Default, Clone, Copy)]
pub struct HostFs;

impl LocalFs for HostFs {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read_optional(&self, path: &Path) -> Result<Option<String>> {
        match std::fs::read_to_string(path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("read {}", path.display())),
        }
    }

    fn write_private(&self, path: &Path, content: &str) -> Result<()> {
        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        if !parent.exists() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create dir {}", parent.display()))?;
            set_permissions(parent, 0o700)?;
        }

        let mut tmp = tempfile::NamedTempFile::new_in(parent)
            .with_context(|| format!("create temp file in {}", parent.display()))?;
        tmp.write_all(content.as_bytes())
            .with_context(|| format!("write {}", path.display()))?;
        set_permissions(tmp.path(), 0o600)?;
        tmp.persist(path)
            .with_context(|| format!("replace {}", path.display()))?;
        Ok(())
    }
}

impl PublicKeyReader for HostFs {
    async fn read_public_key(&self, path: &Path) -> Result<String> {
        tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("read {}", path.display()))
    }
}

#[cfg(unix)]
fn set_permissions(path: &Path, mode: u32) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode))
        .with_context(|| format!("set permissions on {}", path.display()))
}

#[cfg(not(unix))]
fn set_permissions(_path: &Path, _mode: u32) -> Result<()> {
    Ok(())
}
