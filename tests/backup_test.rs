use escape_fix::backup::{backup_path_for, BackupGuard, BACKUP_SUFFIX};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

#[test]
fn test_backup_path_for() {
    assert_eq!(backup_path_for(Path::new("docs/guide.md")), PathBuf::from("docs/guide.md.backup"));
    assert!(BACKUP_SUFFIX.starts_with('.'));
}

#[test]
fn test_begin_copies_content() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("guide.md");
    fs::write(&file, "original").unwrap();

    let guard = BackupGuard::begin(&file).unwrap();

    assert_eq!(guard.backup_path(), backup_path_for(&file));
    assert_eq!(fs::read_to_string(guard.backup_path()).unwrap(), "original");
}

#[test]
fn test_commit_keeps_backup_and_new_content() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("guide.md");
    fs::write(&file, "original").unwrap();

    let guard = BackupGuard::begin(&file).unwrap();
    fs::write(&file, "mutated").unwrap();
    let backup = guard.commit();

    assert_eq!(fs::read_to_string(&file).unwrap(), "mutated");
    assert_eq!(fs::read_to_string(&backup).unwrap(), "original");
}

#[test]
fn test_drop_without_commit_rolls_back() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("guide.md");
    fs::write(&file, "original").unwrap();

    {
        let _guard = BackupGuard::begin(&file).unwrap();
        fs::write(&file, "half-written").unwrap();
        // Guard dropped uncommitted: simulates a downstream error
    }

    assert_eq!(fs::read_to_string(&file).unwrap(), "original");
    // Rollback consumed the backup; no mutation survived to back up
    assert!(!backup_path_for(&file).exists());
}

#[test]
fn test_begin_fails_for_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("missing.md");

    assert!(BackupGuard::begin(&missing).is_err());
}
