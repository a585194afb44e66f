use crate::error::Result;
use crate::io::ensure_dir;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Directory and document constants
// ---------------------------------------------------------------------------

/// Queue directory polled by the orchestrator for pending action files.
pub const NEEDS_ACTION_DIR: &str = "Needs_Action";
/// Raw input directory monitored by watchers.
pub const INBOX_DIR: &str = "Inbox";
/// In-progress work (plans the agent is executing).
pub const PLANS_DIR: &str = "Plans";
/// Completed action files, relocated here by the agent.
pub const DONE_DIR: &str = "Done";
pub const LOGS_DIR: &str = "Logs";
pub const UPDATES_DIR: &str = "Updates";

pub const DASHBOARD_MD: &str = "Dashboard.md";
pub const HANDBOOK_MD: &str = "Company_Handbook.md";
/// Prompt-file agent target, overwritten on each trigger.
pub const PROMPT_FILE: &str = "ai_prompt.txt";

// ---------------------------------------------------------------------------
// VaultPaths
// ---------------------------------------------------------------------------

/// Resolves every vault subpath from a single root.
#[derive(Debug, Clone)]
pub struct VaultPaths {
    root: PathBuf,
}

impl VaultPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn needs_action(&self) -> PathBuf {
        self.root.join(NEEDS_ACTION_DIR)
    }

    pub fn inbox(&self) -> PathBuf {
        self.root.join(INBOX_DIR)
    }

    pub fn plans(&self) -> PathBuf {
        self.root.join(PLANS_DIR)
    }

    pub fn done(&self) -> PathBuf {
        self.root.join(DONE_DIR)
    }

    pub fn logs(&self) -> PathBuf {
        self.root.join(LOGS_DIR)
    }

    pub fn updates(&self) -> PathBuf {
        self.root.join(UPDATES_DIR)
    }

    pub fn dashboard(&self) -> PathBuf {
        self.root.join(DASHBOARD_MD)
    }

    pub fn handbook(&self) -> PathBuf {
        self.root.join(HANDBOOK_MD)
    }

    pub fn prompt_file(&self) -> PathBuf {
        self.updates().join(PROMPT_FILE)
    }

    /// Per-day activity log: `Logs/YYYY-MM-DD.jsonl`.
    pub fn daily_log(&self, date: NaiveDate) -> PathBuf {
        self.logs().join(format!("{}.jsonl", date.format("%Y-%m-%d")))
    }

    /// Directories a watcher needs before its first cycle.
    pub fn ensure_watch_dirs(&self) -> Result<()> {
        ensure_dir(&self.needs_action())?;
        ensure_dir(&self.inbox())?;
        ensure_dir(&self.logs())?;
        Ok(())
    }

    /// Directories the orchestrator needs before its first cycle.
    pub fn ensure_orchestrator_dirs(&self) -> Result<()> {
        ensure_dir(&self.needs_action())?;
        ensure_dir(&self.done())?;
        ensure_dir(&self.plans())?;
        ensure_dir(&self.logs())?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn path_helpers() {
        let paths = VaultPaths::new("/tmp/vault");
        assert_eq!(paths.needs_action(), PathBuf::from("/tmp/vault/Needs_Action"));
        assert_eq!(paths.dashboard(), PathBuf::from("/tmp/vault/Dashboard.md"));
        assert_eq!(
            paths.prompt_file(),
            PathBuf::from("/tmp/vault/Updates/ai_prompt.txt")
        );
    }

    #[test]
    fn daily_log_name() {
        let paths = VaultPaths::new("/tmp/vault");
        let date = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();
        assert_eq!(
            paths.daily_log(date),
            PathBuf::from("/tmp/vault/Logs/2026-03-07.jsonl")
        );
    }

    #[test]
    fn ensure_dirs_idempotent() {
        let dir = TempDir::new().unwrap();
        let paths = VaultPaths::new(dir.path());
        paths.ensure_orchestrator_dirs().unwrap();
        paths.ensure_orchestrator_dirs().unwrap();
        assert!(paths.needs_action().is_dir());
        assert!(paths.done().is_dir());
        assert!(paths.plans().is_dir());
        assert!(paths.logs().is_dir());

        paths.ensure_watch_dirs().unwrap();
        assert!(paths.inbox().is_dir());
    }
}
