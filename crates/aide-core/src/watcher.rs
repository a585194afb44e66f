//! Generic watcher poll loop.
//!
//! A watcher enumerates new items from some input and materializes each as a
//! markdown action file in the queue directory. The loop here drives any
//! [`Watcher`] implementation on a fixed interval: per-item failures are
//! logged and skipped, enumeration failures skip the cycle, and the loop only
//! exits when the shutdown flag is set. No backoff, no jitter, no retry
//! ceiling — the next cycle is the only retry mechanism.

use crate::error::Result;
use crate::paths::VaultPaths;
use crate::shutdown::ShutdownFlag;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, error, info};

pub const DEFAULT_CHECK_INTERVAL: Duration = Duration::from_secs(60);

pub trait Watcher {
    type Item;

    /// Short name used in log output.
    fn name(&self) -> &str;

    /// Enumerate items that need action files. May return an empty list.
    fn check_for_updates(&mut self) -> Result<Vec<Self::Item>>;

    /// Materialize one item as an action file in the queue directory,
    /// returning the created file's path.
    fn create_action_file(&mut self, item: &Self::Item) -> Result<PathBuf>;
}

/// Drive `watcher` until `shutdown` is set.
///
/// Ensures the queue, inbox, and log directories exist before the first
/// cycle; a failure there is the only fatal startup error.
pub fn run_watcher<W: Watcher>(
    watcher: &mut W,
    paths: &VaultPaths,
    interval: Duration,
    shutdown: &ShutdownFlag,
) -> Result<()> {
    paths.ensure_watch_dirs()?;
    info!(
        watcher = watcher.name(),
        root = %paths.root().display(),
        interval_secs = interval.as_secs(),
        "starting watcher"
    );

    while !shutdown.is_set() {
        run_cycle(watcher);
        shutdown.sleep(interval);
    }

    info!(watcher = watcher.name(), "watcher stopped");
    Ok(())
}

/// One enumerate-and-materialize pass. Returns the number of action files
/// created; failures are logged, never returned.
pub fn run_cycle<W: Watcher>(watcher: &mut W) -> usize {
    let items = match watcher.check_for_updates() {
        Ok(items) => items,
        Err(e) => {
            error!(watcher = watcher.name(), err = %e, "error in check cycle");
            return 0;
        }
    };

    if items.is_empty() {
        debug!(watcher = watcher.name(), "no new items");
        return 0;
    }

    info!(watcher = watcher.name(), count = items.len(), "found new item(s)");
    let mut created = 0;
    for item in &items {
        match watcher.create_action_file(item) {
            Ok(path) => {
                info!(file = %path.display(), "created action file");
                created += 1;
            }
            Err(e) => {
                error!(watcher = watcher.name(), err = %e, "error creating action file");
            }
        }
    }
    created
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AideError;

    /// Watcher with scripted per-item outcomes.
    struct Scripted {
        items: Vec<&'static str>,
        fail_on: Vec<&'static str>,
        enumerate_err: bool,
        created: Vec<String>,
    }

    impl Watcher for Scripted {
        type Item = &'static str;

        fn name(&self) -> &str {
            "Scripted"
        }

        fn check_for_updates(&mut self) -> Result<Vec<&'static str>> {
            if self.enumerate_err {
                return Err(AideError::Io(std::io::Error::other("listing failed")));
            }
            Ok(self.items.clone())
        }

        fn create_action_file(&mut self, item: &&'static str) -> Result<PathBuf> {
            if self.fail_on.contains(item) {
                return Err(AideError::Io(std::io::Error::other("disk full")));
            }
            self.created.push(item.to_string());
            Ok(PathBuf::from(format!("Needs_Action/{item}.md")))
        }
    }

    #[test]
    fn failed_item_does_not_block_later_items() {
        let mut w = Scripted {
            items: vec!["a", "b", "c"],
            fail_on: vec!["b"],
            enumerate_err: false,
            created: Vec::new(),
        };
        let created = run_cycle(&mut w);
        assert_eq!(created, 2);
        assert_eq!(w.created, vec!["a", "c"]);
    }

    #[test]
    fn all_outcomes_mixed() {
        let mut w = Scripted {
            items: vec!["a", "b", "c", "d"],
            fail_on: vec!["a", "d"],
            enumerate_err: false,
            created: Vec::new(),
        };
        assert_eq!(run_cycle(&mut w), 2);
        assert_eq!(w.created, vec!["b", "c"]);
    }

    #[test]
    fn enumeration_failure_skips_cycle() {
        let mut w = Scripted {
            items: vec!["a"],
            fail_on: vec![],
            enumerate_err: true,
            created: Vec::new(),
        };
        assert_eq!(run_cycle(&mut w), 0);
        assert!(w.created.is_empty());
    }

    #[test]
    fn run_watcher_exits_on_shutdown() {
        let dir = tempfile::TempDir::new().unwrap();
        let paths = VaultPaths::new(dir.path());
        let shutdown = ShutdownFlag::new();
        shutdown.set();

        let mut w = Scripted {
            items: vec![],
            fail_on: vec![],
            enumerate_err: false,
            created: Vec::new(),
        };
        run_watcher(&mut w, &paths, Duration::from_secs(60), &shutdown).unwrap();
        // Directories were still ensured at startup.
        assert!(paths.needs_action().is_dir());
        assert!(paths.inbox().is_dir());
        assert!(paths.logs().is_dir());
    }
}
