//! Scoped per-file backups with rollback.
//!
//! A [`BackupGuard`] ties backup creation and potential restoration to the
//! lifetime of one file's processing: `begin` copies the current content to
//! a sibling `<path>.backup` before any write, and dropping the guard
//! without calling [`BackupGuard::commit`] restores the original, so no
//! half-written file survives an error mid-write. Committed backups are
//! retained for the operator; they are never auto-deleted.

use crate::error::Result;
use log::{debug, error};
use std::fs;
use std::path::{Path, PathBuf};

/// Backup file suffix appended to the mutated file's full name
pub const BACKUP_SUFFIX: &str = ".backup";

/// Returns the sibling backup path for a file, e.g. `guide.md.backup`.
pub fn backup_path_for(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(BACKUP_SUFFIX);
    PathBuf::from(name)
}

/// Guard over one file's backup. See the module docs for the lifecycle.
#[derive(Debug)]
pub struct BackupGuard {
    original: PathBuf,
    backup: PathBuf,
    committed: bool,
}

impl BackupGuard {
    /// Copies the file's current content to its backup path.
    ///
    /// Must be called before the first write to the file.
    pub fn begin(path: &Path) -> Result<Self> {
        let backup = backup_path_for(path);
        fs::copy(path, &backup)?;
        debug!("Backed up {} to {}", path.display(), backup.display());
        Ok(Self { original: path.to_path_buf(), backup, committed: false })
    }

    /// The backup file's location.
    pub fn backup_path(&self) -> &Path {
        &self.backup
    }

    /// Marks the write as successful. The backup file is kept; cleanup is
    /// owned by the operator.
    pub fn commit(mut self) -> PathBuf {
        self.committed = true;
        self.backup.clone()
    }
}

impl Drop for BackupGuard {
    fn drop(&mut self) {
        if self.committed {
            return;
        }
        // Uncommitted guard: a write failed downstream. Restore the original
        // and consume the backup, since no mutation survived.
        if let Err(e) = fs::copy(&self.backup, &self.original) {
            error!(
                "Failed to restore {} from {}: {}",
                self.original.display(),
                self.backup.display(),
                e
            );
            return;
        }
        if let Err(e) = fs::remove_file(&self.backup) {
            error!("Failed to remove backup {}: {}", self.backup.display(), e);
        }
        debug!("Rolled back {}", self.original.display());
    }
}
