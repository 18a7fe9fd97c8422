//! Line-oriented fence scanning for escape-fix.
//! Classifies every line of a file as outside or inside a fenced code block
//! and produces the ordered list of code regions the rest of the pipeline
//! operates on.

use crate::error::{Error, Result};
use std::path::Path;

/// A fenced code block located within a file's line sequence.
///
/// `start` and `end` are zero-based line indices of the opening and closing
/// fence delimiter lines (both inclusive). `fence_len` is the backtick run
/// length of the opening delimiter; the closing delimiter is guaranteed to
/// have an equal or greater run. Classification flags are filled in later by
/// the conflict detector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeRegion {
    /// Line index of the opening fence delimiter
    pub start: usize,
    /// Line index of the closing fence delimiter (inclusive)
    pub end: usize,
    /// Backtick run length of the opening delimiter
    pub fence_len: usize,
    /// Whether the region is already wrapped in a marker pair
    pub already_escaped: bool,
    /// Whether the region contains template-conflict syntax
    pub has_conflict: bool,
}

impl CodeRegion {
    /// Lines between the delimiters, i.e. the rendered code itself.
    pub fn interior<'a>(&self, lines: &'a [&'a str]) -> &'a [&'a str] {
        &lines[self.start + 1..self.end]
    }
}

/// Scanner state: outside any fence, or inside one opened with a recorded
/// backtick run length at a recorded line.
enum ScanState {
    Outside,
    Inside { start: usize, fence_len: usize },
}

/// Returns the length of the backtick run opening a fence delimiter line,
/// or `None` if the line is not a fence delimiter at all.
///
/// A delimiter is optional leading whitespace followed by three or more
/// backticks. Anything after the run (an info string such as `js`) is
/// permitted for opening delimiters and ignored here.
pub fn fence_run(line: &str) -> Option<usize> {
    let trimmed = line.trim_start();
    let len = trimmed.chars().take_while(|&c| c == '`').count();
    if len >= 3 {
        Some(len)
    } else {
        None
    }
}

/// Whether a line closes a fence opened with `open_len` backticks:
/// a run of equal or greater length followed by nothing but whitespace.
fn closes_fence(line: &str, open_len: usize) -> bool {
    match fence_run(line) {
        Some(len) if len >= open_len => {
            line.trim_start()[len..].trim().is_empty()
        }
        _ => false,
    }
}

/// Scans a file's lines and returns its ordered, non-overlapping code regions.
///
/// State machine: `OUTSIDE` + open fence -> `INSIDE(len)`; `INSIDE(len)` +
/// backtick run of length >= len (and nothing else on the line) -> `OUTSIDE`.
/// Shorter backtick runs inside a region are ordinary code content. Regions
/// carry their delimiter lines; classification flags start out false.
///
/// # Arguments
/// * `path` - File path, used only for error reporting
/// * `lines` - The file's lines, delimiters included
///
/// # Errors
/// * `Error::UnterminatedFence` if the file ends while still inside a region;
///   the caller must skip the file without mutating it
pub fn scan_regions(path: &Path, lines: &[&str]) -> Result<Vec<CodeRegion>> {
    let mut regions = Vec::new();
    let mut state = ScanState::Outside;

    for (index, line) in lines.iter().enumerate() {
        match state {
            ScanState::Outside => {
                if let Some(len) = fence_run(line) {
                    state = ScanState::Inside { start: index, fence_len: len };
                }
            }
            ScanState::Inside { start, fence_len } => {
                if closes_fence(line, fence_len) {
                    regions.push(CodeRegion {
                        start,
                        end: index,
                        fence_len,
                        already_escaped: false,
                        has_conflict: false,
                    });
                    state = ScanState::Outside;
                }
            }
        }
    }

    if let ScanState::Inside { start, .. } = state {
        return Err(Error::UnterminatedFence {
            path: path.display().to_string(),
            line: start + 1,
        });
    }

    Ok(regions)
}
