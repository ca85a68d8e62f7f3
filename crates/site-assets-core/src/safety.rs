//! Backup-then-replace discipline for destructive file rewrites.
//!
//! Every write to a canonical path goes through a temporary sibling file that
//! is renamed into place, so a crash never leaves a half-written file behind.
//! Backups come in two flavours with deliberately different semantics:
//! [`PreserveFirst`] keeps the very first copy forever, [`RefreshEachRun`]
//! replaces it every time.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use log::debug;
use tempfile::NamedTempFile;

use crate::error::Result;
use crate::logging::{log_file_error, log_fs_modification};
use crate::types::BackupOutcome;

/// `icon.png` + `.backup` -> `icon.png.backup`
pub fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

/// Temporary file next to `path`. It takes the permissions of `like` when
/// that file exists, otherwise the usual umask-filtered default, so renaming
/// it into place does not leave an owner-only file behind.
fn temp_sibling(path: &Path, like: &Path) -> Result<NamedTempFile> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut builder = tempfile::Builder::new();
    builder.prefix(".site-assets-").suffix(".tmp");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o666));
    }
    let temp = builder.tempfile_in(dir)?;

    if let Ok(metadata) = fs::metadata(like) {
        temp.as_file().set_permissions(metadata.permissions())?;
    }

    debug!("Staging {} via {}", path.display(), temp.path().display());
    Ok(temp)
}

/// Stage content with `fill`, then atomically move it over `path`.
/// On failure the temporary file is removed and `path` is untouched.
pub fn replace_with<F>(path: &Path, fill: F) -> Result<()>
where
    F: FnOnce(&mut File) -> Result<()>,
{
    let mut temp = temp_sibling(path, path)?;
    fill(temp.as_file_mut())?;
    temp.as_file_mut().flush()?;
    temp.as_file().sync_all()?;

    temp.persist(path).map_err(|e| {
        log_file_error(path, "rename", &e.error);
        e
    })?;
    Ok(())
}

/// Atomically replace `path` with `bytes`
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    replace_with(path, |file| {
        file.write_all(bytes)?;
        Ok(())
    })
}

/// Atomically replace `dest` with a copy of `src`
pub fn copy_atomic(src: &Path, dest: &Path) -> Result<()> {
    let mut source = File::open(src)?;
    replace_with(dest, |file| {
        io::copy(&mut source, file)?;
        Ok(())
    })
}

/// How a file is preserved before it is rewritten
pub trait BackupPolicy {
    /// Where the backup of `path` lives
    fn backup_path(&self, path: &Path) -> PathBuf;

    /// Back up `path` if the policy calls for it
    fn back_up(&self, path: &Path) -> Result<BackupOutcome>;
}

/// First run wins: `<path>.backup` is written once and never touched again.
///
/// If a file is processed twice without removing the backup in between, the
/// backup still holds the state from before the first run.
#[derive(Debug, Clone, Copy, Default)]
pub struct PreserveFirst;

impl PreserveFirst {
    pub const SUFFIX: &'static str = ".backup";
}

impl BackupPolicy for PreserveFirst {
    fn backup_path(&self, path: &Path) -> PathBuf {
        with_suffix(path, Self::SUFFIX)
    }

    fn back_up(&self, path: &Path) -> Result<BackupOutcome> {
        if !path.exists() {
            return Ok(BackupOutcome::NothingToBackUp);
        }

        let backup = self.backup_path(path);
        if backup.exists() {
            debug!("Keeping existing backup {}", backup.display());
            return Ok(BackupOutcome::AlreadyPresent);
        }

        let mut temp = temp_sibling(&backup, path)?;
        io::copy(&mut File::open(path)?, temp.as_file_mut())?;
        temp.as_file().sync_all()?;

        match temp.persist_noclobber(&backup) {
            Ok(_) => {
                log_fs_modification("backup", &backup, Some("first copy preserved"));
                Ok(BackupOutcome::Created)
            }
            // Someone else won the race; theirs is the first copy
            Err(e) if e.error.kind() == io::ErrorKind::AlreadyExists => {
                Ok(BackupOutcome::AlreadyPresent)
            }
            Err(e) => {
                log_file_error(&backup, "backup", &e.error);
                Err(e.into())
            }
        }
    }
}

/// Every run refreshes `<path>.old` with the file about to be replaced.
#[derive(Debug, Clone, Copy, Default)]
pub struct RefreshEachRun;

impl RefreshEachRun {
    pub const SUFFIX: &'static str = ".old";
}

impl BackupPolicy for RefreshEachRun {
    fn backup_path(&self, path: &Path) -> PathBuf {
        with_suffix(path, Self::SUFFIX)
    }

    fn back_up(&self, path: &Path) -> Result<BackupOutcome> {
        if !path.exists() {
            return Ok(BackupOutcome::NothingToBackUp);
        }

        let backup = self.backup_path(path);
        let outcome = if backup.exists() {
            BackupOutcome::Replaced
        } else {
            BackupOutcome::Created
        };

        copy_atomic(path, &backup)?;
        log_fs_modification("backup", &backup, Some("previous version"));
        Ok(outcome)
    }
}
