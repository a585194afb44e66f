//! Append-only per-day activity log.
//!
//! One JSON object per line in `Logs/YYYY-MM-DD.jsonl`. Never rotated or
//! truncated; a new file simply starts at the next local calendar day.

use crate::error::Result;
use crate::io::append_text;
use crate::paths::VaultPaths;
use chrono::Local;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    /// ISO-8601 local timestamp.
    pub timestamp: String,
    pub action: String,
    pub details: String,
}

#[derive(Debug, Clone)]
pub struct ActivityLog {
    paths: VaultPaths,
}

impl ActivityLog {
    pub fn new(paths: VaultPaths) -> Self {
        Self { paths }
    }

    /// Append one record to today's log file.
    pub fn append(&self, action: &str, details: &str) -> Result<()> {
        let now = Local::now();
        let entry = LogEntry {
            timestamp: now.to_rfc3339(),
            action: action.to_string(),
            details: details.to_string(),
        };
        let line = serde_json::to_string(&entry)?;
        let path = self.paths.daily_log(now.date_naive());
        append_text(&path, &format!("{line}\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn append_writes_one_json_line_per_action() {
        let dir = TempDir::new().unwrap();
        let log = ActivityLog::new(VaultPaths::new(dir.path()));

        log.append("trigger_agent", "Processing 2 file(s)").unwrap();
        log.append("trigger_agent", "Processing 1 file(s)").unwrap();

        let path = VaultPaths::new(dir.path()).daily_log(Local::now().date_naive());
        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);

        let entry: LogEntry = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(entry.action, "trigger_agent");
        assert_eq!(entry.details, "Processing 2 file(s)");
        assert!(!entry.timestamp.is_empty());
    }
}
