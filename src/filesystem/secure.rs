//! Private files under the user's data directory: the cached session and the
//! TUI log.

use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
#[cfg(unix)]
use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
use std::path::Path;

#[cfg(unix)]
const DIR_MODE: u32 = 0o700;
#[cfg(unix)]
const FILE_MODE: u32 = 0o600;

/// Create the directory holding `path`, owner-only on Unix.
pub fn ensure_private_parent(path: &Path) -> Result<()> {
    let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) else {
        return Ok(());
    };
    fs::create_dir_all(parent)
        .with_context(|| format!("Failed to create {}", parent.display()))?;
    #[cfg(unix)]
    fs::set_permissions(parent, fs::Permissions::from_mode(DIR_MODE)).ok();
    Ok(())
}

fn private_options() -> fs::OpenOptions {
    let mut opts = fs::OpenOptions::new();
    opts.write(true);
    #[cfg(unix)]
    opts.mode(FILE_MODE);
    opts
}

/// Replace `path` with `bytes` via a sibling temp file and a rename, so
/// readers see either the old contents or the new ones.
pub fn write_private(path: &Path, bytes: &[u8]) -> Result<()> {
    ensure_private_parent(path)?;
    let staging = path.with_extension("tmp");
    let mut file = private_options()
        .create(true)
        .truncate(true)
        .open(&staging)
        .context("Failed to create temporary file")?;
    file.write_all(bytes)?;
    file.sync_data().ok();
    drop(file);
    fs::rename(&staging, path).context("Failed to replace file atomically")
}

/// Open `path` for appending, creating it owner-only when missing.
pub fn open_private_append(path: &Path) -> Result<fs::File> {
    ensure_private_parent(path)?;
    private_options()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn replaces_contents_and_leaves_no_staging_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("f.ron");
        write_private(&path, b"one").unwrap();
        write_private(&path, b"two").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"two");
        assert!(!path.with_extension("tmp").exists());
    }

    #[cfg(unix)]
    #[test]
    fn modes_are_owner_only() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("d").join("log.txt");
        let mut f = open_private_append(&path).unwrap();
        writeln!(f, "hello").unwrap();
        let file_mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        let dir_mode = fs::metadata(path.parent().unwrap()).unwrap().permissions().mode() & 0o777;
        assert_eq!(file_mode, 0o600);
        assert_eq!(dir_mode, 0o700);
    }
}
