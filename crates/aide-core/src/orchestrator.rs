//! Orchestration cycle: scan the queue, refresh the dashboard, brief the agent.
//!
//! Single-threaded and synchronous throughout. Other processes (watchers, the
//! agent, manual edits) may mutate the same directories between cycles; there
//! is no locking — last writer wins on the dashboard, and a file vanishing
//! between enumeration and stat surfaces as a cycle error.

use crate::activity_log::ActivityLog;
use crate::agent::{Agent, AgentKind};
use crate::config::Config;
use crate::dashboard::{self, Counts};
use crate::error::Result;
use crate::paths::VaultPaths;
use crate::shutdown::ShutdownFlag;
use chrono::{DateTime, Local};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{error, info};

pub struct Orchestrator {
    paths: VaultPaths,
    agent: Agent,
    log: ActivityLog,
}

impl Orchestrator {
    /// Build an orchestrator rooted at `root`, ensuring the queue,
    /// in-progress, done, and log directories exist.
    pub fn new(root: impl Into<PathBuf>, kind: AgentKind, config: &Config) -> Result<Self> {
        let paths = VaultPaths::new(root);
        paths.ensure_orchestrator_dirs()?;
        let agent = Agent::new(kind, &config.agent, &paths);
        let log = ActivityLog::new(paths.clone());
        Ok(Self { paths, agent, log })
    }

    pub fn paths(&self) -> &VaultPaths {
        &self.paths
    }

    /// All `*.md` files directly inside the queue directory, sorted ascending
    /// by modification time (oldest first).
    ///
    /// Ties on equal mtime keep the underlying directory enumeration order,
    /// which is platform-dependent and non-deterministic.
    pub fn pending_items(&self) -> Result<Vec<PathBuf>> {
        let mut items: Vec<(PathBuf, std::time::SystemTime)> = Vec::new();
        for entry in std::fs::read_dir(self.paths.needs_action())? {
            let entry = entry?;
            let path = entry.path();
            if path.is_file() && path.extension().is_some_and(|e| e == "md") {
                items.push((path, entry.metadata()?.modified()?));
            }
        }
        // Stable sort: equal keys stay in enumeration order.
        items.sort_by_key(|(_, mtime)| *mtime);
        Ok(items.into_iter().map(|(path, _)| path).collect())
    }

    /// Queue counts for the dashboard.
    pub fn count_items(&self) -> Result<Counts> {
        let pending = self.pending_items()?.len();

        let mut in_progress = 0;
        for entry in std::fs::read_dir(self.paths.plans())? {
            entry?;
            in_progress += 1;
        }

        let today = Local::now().date_naive();
        let mut done_today = 0;
        for entry in std::fs::read_dir(self.paths.done())? {
            let entry = entry?;
            if !entry.path().is_file() {
                continue;
            }
            let mtime: DateTime<Local> = entry.metadata()?.modified()?.into();
            // Local calendar-date comparison; a cycle straddling midnight
            // drops just-before-midnight items from this count.
            if mtime.date_naive() == today {
                done_today += 1;
            }
        }

        Ok(Counts {
            pending,
            in_progress,
            done_today,
        })
    }

    /// One orchestration cycle. Always refreshes the dashboard; briefs the
    /// agent only when pending items exist. Returns the pending count.
    pub fn run_once(&self) -> Result<usize> {
        let pending = self.pending_items()?;
        let counts = self.count_items()?;

        info!(count = pending.len(), "found pending item(s)");
        dashboard::update(&self.paths.dashboard(), &counts)?;

        if pending.is_empty() {
            info!("no pending items to process");
            return Ok(0);
        }

        let prompt = build_prompt(&pending);
        let triggered = self.agent.trigger(&prompt)?;
        if !triggered {
            error!("agent trigger failed; items remain queued for the next cycle");
        }
        self.log.append(
            "trigger_agent",
            &format!("Processing {} file(s)", pending.len()),
        )?;

        Ok(pending.len())
    }

    /// Repeat [`run_once`](Self::run_once) until `shutdown` is set.
    ///
    /// The interval is measured from the end of one cycle to the start of the
    /// next; there is no drift correction. A failed cycle is logged and the
    /// loop continues — the next cycle is the only retry mechanism.
    pub fn run_continuous(&self, interval: Duration, shutdown: &ShutdownFlag) {
        info!(
            interval_secs = interval.as_secs(),
            "starting continuous mode"
        );
        while !shutdown.is_set() {
            if let Err(e) = self.run_once() {
                error!(err = %e, "orchestration cycle failed");
            }
            shutdown.sleep(interval);
        }
        info!("orchestrator stopped");
    }
}

/// Fixed instructional template naming every pending file.
fn build_prompt(pending: &[PathBuf]) -> String {
    let files = pending
        .iter()
        .filter_map(|p| p.file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "Process the following files in /Needs_Action: {files}\n\
         \n\
         For each file:\n\
         1. Read and understand what action is needed\n\
         2. Check Company_Handbook.md for rules\n\
         3. Create a Plan.md if multiple steps are needed\n\
         4. Execute simple actions or create approval requests for sensitive ones\n\
         5. Move completed items to /Done\n\
         \n\
         Reference the Company Handbook for decision-making rules."
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
