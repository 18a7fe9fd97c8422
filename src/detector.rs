//! Template-conflict detection for code regions.
//!
//! Detection is textual, not a parse of the embedded code's own language:
//! the pattern set is kept deliberately broad because a missed conflict
//! breaks the downstream build while a spuriously escaped region renders
//! fine. Reviewed false positives are handled by the configuration's
//! `exclude` list, not by narrowing these patterns.

use crate::config::Config;
use crate::scanner::CodeRegion;
use regex::Regex;
use std::sync::LazyLock;

/// A double open brace not immediately followed by a percent sign,
/// e.g. JSX `style={{flex:1}}` or template-literal-like tokens.
static DOUBLE_BRACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{(?:[^%]|$)").unwrap());

/// Any percent-brace delimiter, the opening or closing half of a tag.
static PERCENT_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{%|%\}").unwrap());

/// Classifies code regions as conflicting and/or already escaped.
pub struct ConflictDetector {
    begin_marker: String,
    end_marker: String,
}

impl ConflictDetector {
    pub fn new(config: &Config) -> Self {
        Self {
            begin_marker: config.begin_marker.clone(),
            end_marker: config.end_marker.clone(),
        }
    }

    /// Whether a single line of code contains syntax a template renderer
    /// would treat as a directive rather than literal text.
    pub fn line_has_conflict(line: &str) -> bool {
        DOUBLE_BRACE.is_match(line) || PERCENT_TAG.is_match(line)
    }

    /// Fills in `has_conflict` and `already_escaped` for one region.
    ///
    /// `already_escaped` is positional: the line immediately preceding the
    /// opening delimiter must be the begin marker and the line immediately
    /// following the closing delimiter must be the end marker. The
    /// comparison trims surrounding whitespace so indentation or a stray
    /// carriage return around a previously inserted marker does not cause
    /// a duplicate insertion on the next run.
    pub fn classify(&self, lines: &[&str], region: &mut CodeRegion) {
        region.already_escaped = self.is_already_escaped(lines, region);
        region.has_conflict =
            region.interior(lines).iter().any(|line| Self::line_has_conflict(line));
    }

    fn is_already_escaped(&self, lines: &[&str], region: &CodeRegion) -> bool {
        let before = match region.start.checked_sub(1) {
            Some(index) => lines[index].trim(),
            None => return false,
        };
        let after = match lines.get(region.end + 1) {
            Some(line) => line.trim(),
            None => return false,
        };
        before == self.begin_marker && after == self.end_marker
    }
}
