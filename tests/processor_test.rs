use escape_fix::backup::backup_path_for;
use escape_fix::config::Config;
use escape_fix::error::Error;
use escape_fix::processor::Processor;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use tempfile::TempDir;

const JSX_DOC: &str = "# Styling\n\n```js\n<View style={{flex: 1}} />\n```\n";

fn write_doc(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_conflicting_region_is_wrapped() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_doc(temp_dir.path(), "styling.md", JSX_DOC);

    let config = Config::default();
    let processor = Processor::new(&config, false);
    let result = processor.process_file(&path).unwrap();

    assert!(result.changed);
    assert_eq!(result.regions_changed, 1);
    assert_eq!(result.backup_path, Some(backup_path_for(&path)));

    let output = fs::read_to_string(&path).unwrap();
    assert_eq!(
        output,
        "# Styling\n\n{% raw %}\n```js\n<View style={{flex: 1}} />\n```\n{% endraw %}\n"
    );
    // The conflicting line itself is unchanged
    assert!(output.contains("<View style={{flex: 1}} />"));
    // The original survives in the backup
    assert_eq!(fs::read_to_string(backup_path_for(&path)).unwrap(), JSX_DOC);
}

#[test]
fn test_second_run_is_idempotent() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_doc(temp_dir.path(), "styling.md", JSX_DOC);

    let config = Config::default();
    let processor = Processor::new(&config, false);

    processor.process_file(&path).unwrap();
    let after_first = fs::read_to_string(&path).unwrap();

    let result = processor.process_file(&path).unwrap();
    let after_second = fs::read_to_string(&path).unwrap();

    assert!(!result.changed);
    assert_eq!(result.regions_changed, 0);
    assert_eq!(after_first, after_second);
}

#[test]
fn test_clean_file_is_untouched() {
    let temp_dir = TempDir::new().unwrap();
    let content = "# Notes\n\n```js\nconst x = 1;\n```\n";
    let path = write_doc(temp_dir.path(), "notes.md", content);

    let config = Config::default();
    let processor = Processor::new(&config, false);
    let result = processor.process_file(&path).unwrap();

    assert!(!result.changed);
    assert!(result.backup_path.is_none());
    assert_eq!(fs::read_to_string(&path).unwrap(), content);
    assert!(!backup_path_for(&path).exists());
}

#[test]
fn test_previously_wrapped_file_gets_no_duplicate_markers() {
    let temp_dir = TempDir::new().unwrap();
    let content = "{% raw %}\n```js\n<View style={{flex: 1}} />\n```\n{% endraw %}\n";
    let path = write_doc(temp_dir.path(), "styling.md", content);

    let config = Config::default();
    let processor = Processor::new(&config, false);
    let result = processor.process_file(&path).unwrap();

    assert!(!result.changed);
    assert_eq!(fs::read_to_string(&path).unwrap(), content);
}

#[test]
fn test_unterminated_fence_skips_file() {
    let temp_dir = TempDir::new().unwrap();
    let content = "# Broken\n\n```js\nnever closed\n";
    let path = write_doc(temp_dir.path(), "broken.md", content);

    let config = Config::default();
    let processor = Processor::new(&config, false);
    let err = processor.process_file(&path).unwrap_err();

    match err {
        Error::UnterminatedFence { line, .. } => assert_eq!(line, 3),
        other => panic!("Expected UnterminatedFence, got {:?}", other),
    }
    // Zero mutations, no backup
    assert_eq!(fs::read_to_string(&path).unwrap(), content);
    assert!(!backup_path_for(&path).exists());
}

#[test]
fn test_dry_run_reports_without_writing() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_doc(temp_dir.path(), "styling.md", JSX_DOC);

    let config = Config::default();
    let processor = Processor::new(&config, true);
    let result = processor.process_file(&path).unwrap();

    assert!(result.changed);
    assert_eq!(result.regions_changed, 1);
    assert!(result.backup_path.is_none());
    assert_eq!(fs::read_to_string(&path).unwrap(), JSX_DOC);
    assert!(!backup_path_for(&path).exists());
}

#[test]
fn test_run_pass_isolates_per_file_errors() {
    let temp_dir = TempDir::new().unwrap();
    let good = write_doc(temp_dir.path(), "good.md", JSX_DOC);
    let bad = write_doc(temp_dir.path(), "bad.md", "```\nnever closed\n");

    let config = Config::default();
    let processor = Processor::new(&config, false);
    let cancel = AtomicBool::new(false);
    let files = vec![bad.clone(), good.clone()];
    let results = processor.run_pass(&files, &cancel);

    assert_eq!(results.len(), 2);
    let bad_result = results.iter().find(|(p, _)| p == &bad).unwrap();
    let good_result = results.iter().find(|(p, _)| p == &good).unwrap();

    assert!(matches!(bad_result.1, Err(Error::UnterminatedFence { .. })));
    assert!(good_result.1.as_ref().unwrap().changed);
}

#[test]
fn test_run_pass_honors_cancellation() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_doc(temp_dir.path(), "styling.md", JSX_DOC);

    let config = Config::default();
    let processor = Processor::new(&config, false);
    let cancel = AtomicBool::new(true);
    let results = processor.run_pass(&[path.clone()], &cancel);

    assert!(results.is_empty());
    assert_eq!(fs::read_to_string(&path).unwrap(), JSX_DOC);
}
