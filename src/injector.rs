//! Marker injection for conflicting code regions.
//! Produces a new line sequence rather than mutating in place, so the
//! caller can diff old against new and skip the write entirely when
//! nothing changed.

use crate::config::Config;
use crate::scanner::CodeRegion;
use std::collections::HashSet;

/// Inserts a begin marker line immediately before the opening fence and an
/// end marker line immediately after the closing fence of every region with
/// `has_conflict && !already_escaped`. Markers are never placed inside the
/// fenced span, which would corrupt the rendered example.
///
/// # Arguments
/// * `lines` - The file's current lines
/// * `regions` - Regions scanned from those lines, classification filled in
/// * `config` - Supplies the marker strings
///
/// # Returns
/// * The new line sequence and the number of regions that were wrapped.
///   When the count is zero the returned lines equal the input.
pub fn inject_markers(
    lines: &[&str],
    regions: &[CodeRegion],
    config: &Config,
) -> (Vec<String>, usize) {
    let mut opens: HashSet<usize> = HashSet::new();
    let mut closes: HashSet<usize> = HashSet::new();
    for region in regions {
        if region.has_conflict && !region.already_escaped {
            opens.insert(region.start);
            closes.insert(region.end);
        }
    }

    let mut result = Vec::with_capacity(lines.len() + opens.len() * 2);
    for (index, line) in lines.iter().enumerate() {
        if opens.contains(&index) {
            result.push(marker_line(&config.begin_marker, line));
        }
        result.push(line.to_string());
        if closes.contains(&index) {
            result.push(marker_line(&config.end_marker, line));
        }
    }

    (result, opens.len())
}

/// Marker lines adopt the carriage return of the fence line they attach to,
/// keeping CRLF files consistent.
fn marker_line(marker: &str, fence_line: &str) -> String {
    if fence_line.ends_with('\r') {
        format!("{}\r", marker)
    } else {
        marker.to_string()
    }
}
