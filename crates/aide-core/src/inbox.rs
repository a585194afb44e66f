//! Watcher over the vault `Inbox/` directory.
//!
//! Every file dropped into the inbox gets one markdown action file in the
//! queue directory asking the agent to review it. Seen filenames are tracked
//! in memory only; a restarted watcher re-materializes existing inbox files,
//! overwriting their (deterministic) action file names.

use crate::error::Result;
use crate::io::atomic_write;
use crate::paths::VaultPaths;
use crate::watcher::Watcher;
use chrono::Local;
use std::collections::HashSet;
use std::ffi::OsString;
use std::path::PathBuf;

pub struct InboxWatcher {
    paths: VaultPaths,
    seen: HashSet<OsString>,
}

impl InboxWatcher {
    pub fn new(paths: VaultPaths) -> Self {
        Self {
            paths,
            seen: HashSet::new(),
        }
    }
}

impl Watcher for InboxWatcher {
    type Item = PathBuf;

    fn name(&self) -> &str {
        "InboxWatcher"
    }

    fn check_for_updates(&mut self) -> Result<Vec<PathBuf>> {
        let mut new_items = Vec::new();
        for entry in std::fs::read_dir(self.paths.inbox())? {
            let entry = entry?;
            let path = entry.path();
            if !path.is_file() || self.seen.contains(&entry.file_name()) {
                continue;
            }
            new_items.push(path);
        }
        Ok(new_items)
    }

    fn create_action_file(&mut self, item: &PathBuf) -> Result<PathBuf> {
        let name = item
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let stem = item
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "item".to_string());

        let action_path = self.paths.needs_action().join(format!("INBOX_{stem}.md"));
        let body = format!(
            "# Action: review inbox item {name}\n\
             \n\
             - Source: Inbox/{name}\n\
             - Detected: {}\n\
             \n\
             Read the inbox item, decide what action it needs, and move it\n\
             out of the Inbox when handled.\n",
            Local::now().format("%Y-%m-%d %H:%M:%S")
        );
        atomic_write(&action_path, body.as_bytes())?;

        // Marked seen only after a successful write, so a failed item is
        // retried on the next cycle.
        if let Some(n) = item.file_name() {
            self.seen.insert(n.to_os_string());
        }
        Ok(action_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::watcher::run_cycle;
    use tempfile::TempDir;

    fn setup() -> (TempDir, InboxWatcher) {
        let dir = TempDir::new().unwrap();
        let paths = VaultPaths::new(dir.path());
        paths.ensure_watch_dirs().unwrap();
        let watcher = InboxWatcher::new(paths);
        (dir, watcher)
    }

    #[test]
    fn new_inbox_file_produces_action_file() {
        let (dir, mut watcher) = setup();
        std::fs::write(dir.path().join("Inbox/invoice.pdf"), b"%PDF").unwrap();

        assert_eq!(run_cycle(&mut watcher), 1);

        let action = dir.path().join("Needs_Action/INBOX_invoice.md");
        assert!(action.exists());
        let body = std::fs::read_to_string(&action).unwrap();
        assert!(body.contains("Inbox/invoice.pdf"));
    }

    #[test]
    fn seen_files_not_re_enumerated() {
        let (dir, mut watcher) = setup();
        std::fs::write(dir.path().join("Inbox/a.txt"), b"x").unwrap();

        assert_eq!(run_cycle(&mut watcher), 1);
        assert_eq!(run_cycle(&mut watcher), 0);

        // A second drop is picked up.
        std::fs::write(dir.path().join("Inbox/b.txt"), b"y").unwrap();
        assert_eq!(run_cycle(&mut watcher), 1);
    }

    #[test]
    fn directories_in_inbox_are_ignored() {
        let (dir, mut watcher) = setup();
        std::fs::create_dir(dir.path().join("Inbox/attachments")).unwrap();
        assert_eq!(run_cycle(&mut watcher), 0);
    }
}
