//! Dashboard.md rewriting.
//!
//! The dashboard is treated as semi-structured text, not parsed markdown:
//! a line pass replaces the three count rows and the activity placeholder,
//! then everything from the first `*Last processed:` marker onward is
//! discarded and a fresh marker appended. Content after an old marker is
//! permanently lost.

use crate::error::Result;
use crate::io::atomic_write;
use chrono::Local;
use serde::Serialize;
use std::path::Path;
use tracing::{info, warn};

const PENDING_ROW: &str = "| Pending Actions |";
const IN_PROGRESS_ROW: &str = "| In Progress |";
const COMPLETED_ROW: &str = "| Completed Today |";
const NO_ACTIVITY_PLACEHOLDER: &str = "*No recent activity*";
const LAST_PROCESSED_MARKER: &str = "*Last processed:";

/// Queue counts for one orchestration cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Counts {
    /// Markdown files in the queue directory.
    pub pending: usize,
    /// Entries (files or directories) in the in-progress directory.
    pub in_progress: usize,
    /// Files in the done directory modified on the current local date.
    pub done_today: usize,
}

/// Rewrite the status fields of a dashboard document in place.
///
/// Returns `Ok(false)` without touching anything if the document is absent
/// (logged as a warning — a missing dashboard is not an error).
pub fn update(path: &Path, counts: &Counts) -> Result<bool> {
    if !path.exists() {
        warn!(path = %path.display(), "dashboard not found, skipping update");
        return Ok(false);
    }
    let content = std::fs::read_to_string(path)?;
    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    let updated = render(&content, counts, &timestamp);
    atomic_write(path, updated.as_bytes())?;
    info!("dashboard updated");
    Ok(true)
}

/// Pure text transformation behind [`update`].
///
/// Line pass: the three literal count rows get their trailing value replaced;
/// a line containing the `*No recent activity*` placeholder is replaced by a
/// timestamped pending line, but only when the pending count is non-zero.
/// Marker pass: the document is truncated at the first `*Last processed:`
/// occurrence and a fresh marker appended (at EOF if no marker existed).
pub fn render(content: &str, counts: &Counts, timestamp: &str) -> String {
    let mut lines: Vec<String> = Vec::with_capacity(content.len() / 16);
    // split('\n') rather than lines(): preserves blank trailing segments so
    // the rewrite is byte-stable on untouched regions.
    for line in content.split('\n') {
        if line.contains(PENDING_ROW) {
            lines.push(format!("| Pending Actions | {} |", counts.pending));
        } else if line.contains(IN_PROGRESS_ROW) {
            lines.push(format!("| In Progress | {} |", counts.in_progress));
        } else if line.contains(COMPLETED_ROW) {
            lines.push(format!("| Completed Today | {} |", counts.done_today));
        } else if line.contains(NO_ACTIVITY_PLACEHOLDER) && counts.pending > 0 {
            lines.push(format!(
                "- {timestamp}: {} item(s) pending",
                counts.pending
            ));
        } else {
            lines.push(line.to_string());
        }
    }

    let mut updated = lines.join("\n");
    match updated.find(LAST_PROCESSED_MARKER) {
        Some(pos) => updated.truncate(pos),
        None => {
            if !updated.ends_with('\n') {
                updated.push('\n');
            }
        }
    }
    updated.push_str(&format!("{LAST_PROCESSED_MARKER} {timestamp}"));
    updated
}
