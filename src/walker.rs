//! Candidate file enumeration for escape-fix.
//! Walks the corpus root, keeping files whose extension is configured for
//! processing and excluding version-control and build-output directories,
//! backup files from previous runs, and any operator-supplied glob patterns.

use crate::config::Config;
use crate::error::{Error, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use log::debug;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Directory names never descended into
pub const EXCLUDED_DIRS: [&str; 8] =
    [".git", ".hg", ".svn", "node_modules", "_site", "target", "build", "dist"];

/// Compiles the configuration's exclusion globs into a matcher.
///
/// # Arguments
/// * `patterns` - Glob patterns relative to the corpus root
///
/// # Errors
/// * `Error::ConfigError` for an invalid glob pattern
pub fn build_exclude_set(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(
            Glob::new(pattern)
                .map_err(|e| Error::ConfigError(format!("Invalid exclude pattern: {}", e)))?,
        );
    }
    builder
        .build()
        .map_err(|e| Error::ConfigError(format!("Invalid exclude patterns: {}", e)))
}

fn is_excluded_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .map(|name| EXCLUDED_DIRS.contains(&name))
            .unwrap_or(false)
}

fn has_candidate_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| extensions.iter().any(|candidate| candidate == ext))
        .unwrap_or(false)
}

/// Enumerates the files a processing pass should visit, in walk order.
///
/// # Arguments
/// * `root_dir` - Corpus root
/// * `config` - Supplies the extension list and exclusion globs
///
/// # Errors
/// * `Error::ConfigError` for invalid exclusion globs
/// * `Error::WalkError` for traversal failures (unreadable directories)
pub fn collect_files(root_dir: &Path, config: &Config) -> Result<Vec<PathBuf>> {
    let exclude_set = build_exclude_set(&config.exclude)?;
    let mut files = Vec::new();

    let walker = WalkDir::new(root_dir).into_iter().filter_entry(|e| !is_excluded_dir(e));
    for entry in walker {
        let entry = entry.map_err(|e| Error::WalkError(e.to_string()))?;
        let path = entry.path();
        if !entry.file_type().is_file() {
            continue;
        }
        if !has_candidate_extension(path, &config.extensions) {
            continue;
        }
        let relative_path = path.strip_prefix(root_dir).unwrap_or(path);
        if exclude_set.is_match(relative_path) {
            debug!("Skipping excluded file {}", relative_path.display());
            continue;
        }
        files.push(path.to_path_buf());
    }

    debug!("Collected {} candidate files under {}", files.len(), root_dir.display());
    Ok(files)
}
