//! Core per-file processing orchestration.
//! Combines scanner, detector, injector and backup handling into a single
//! pass over one file, and exposes a parallel pass over a whole corpus.

use log::debug;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use crate::backup::BackupGuard;
use crate::config::Config;
use crate::detector::ConflictDetector;
use crate::error::Result;
use crate::injector::inject_markers;
use crate::scanner::scan_regions;

/// Outcome of processing a single file.
#[derive(Debug)]
pub struct ProcessingResult {
    pub path: PathBuf,
    /// Number of regions that were (or, in a dry run, would be) wrapped
    pub regions_changed: usize,
    /// False means the file is byte-identical to before the pass
    pub changed: bool,
    /// Backup written alongside the file, if a mutation was persisted
    pub backup_path: Option<PathBuf>,
}

/// Per-file processing pipeline.
///
/// A `Processor` is shared immutably across workers; every per-file
/// resource (lines, regions, backup guard) is owned exclusively by the
/// worker handling that file.
pub struct Processor<'a> {
    config: &'a Config,
    detector: ConflictDetector,
    dry_run: bool,
}

impl<'a> Processor<'a> {
    pub fn new(config: &'a Config, dry_run: bool) -> Self {
        Self { config, detector: ConflictDetector::new(config), dry_run }
    }

    /// Runs the full pipeline on one file:
    /// read, scan regions, classify, inject markers, back up, write.
    ///
    /// The file is written only when at least one region was wrapped; an
    /// unchanged file is never rewritten, so it stays byte-identical. On a
    /// write failure the backup guard restores the original content before
    /// the error propagates.
    ///
    /// # Errors
    /// * `Error::UnterminatedFence` - file skipped, zero mutations
    /// * `Error::IoError` - read, backup or write failure on this file
    pub fn process_file(&self, path: &Path) -> Result<ProcessingResult> {
        let content = fs::read_to_string(path)?;
        // Split on '\n' keeping any '\r' as line content, so unchanged
        // lines rejoin byte-identically.
        let lines: Vec<&str> = content.split('\n').collect();

        let mut regions = scan_regions(path, &lines)?;
        for region in &mut regions {
            self.detector.classify(&lines, region);
            debug!(
                "{}: lines {}-{} conflict={} escaped={}",
                path.display(),
                region.start + 1,
                region.end + 1,
                region.has_conflict,
                region.already_escaped
            );
        }

        let (new_lines, regions_changed) = inject_markers(&lines, &regions, self.config);
        if regions_changed == 0 {
            return Ok(ProcessingResult {
                path: path.to_path_buf(),
                regions_changed: 0,
                changed: false,
                backup_path: None,
            });
        }

        if self.dry_run {
            return Ok(ProcessingResult {
                path: path.to_path_buf(),
                regions_changed,
                changed: true,
                backup_path: None,
            });
        }

        let guard = BackupGuard::begin(path)?;
        fs::write(path, new_lines.join("\n"))?;
        let backup_path = guard.commit();

        Ok(ProcessingResult {
            path: path.to_path_buf(),
            regions_changed,
            changed: true,
            backup_path: Some(backup_path),
        })
    }

    /// Processes a set of files on a worker pool, one worker per file.
    ///
    /// Workers share no mutable state; results are collected and returned
    /// to the single coordinating caller in input order. The cancellation
    /// flag is checked at the top of each per-file task, so a file already
    /// mid-write finishes its write-or-rollback before the pass stops.
    pub fn run_pass(
        &self,
        files: &[PathBuf],
        cancel: &AtomicBool,
    ) -> Vec<(PathBuf, Result<ProcessingResult>)> {
        files
            .par_iter()
            .filter_map(|path| {
                if cancel.load(Ordering::Relaxed) {
                    debug!("Cancelled before processing {}", path.display());
                    return None;
                }
                Some((path.clone(), self.process_file(path)))
            })
            .collect()
    }
}
