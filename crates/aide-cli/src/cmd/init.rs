use aide_core::io::write_if_missing;
use aide_core::paths::VaultPaths;
use anyhow::Context;
use std::path::Path;

const DASHBOARD_TEMPLATE: &str = "\
# Dashboard

## Status

| Metric | Count |
| --- | --- |
| Pending Actions | 0 |
| In Progress | 0 |
| Completed Today | 0 |

## Recent Activity

*No recent activity*

*Last processed: never
";

const HANDBOOK_TEMPLATE: &str = "\
# Company Handbook

Rules the agent consults before acting on queued items.

- Prefer small, reversible actions.
- Anything touching money, credentials, or external recipients needs an
  approval request in Needs_Action instead of direct execution.
- Move finished items to Done/ and note the outcome in the item itself.
";

/// Seed the vault: full directory tree plus starter documents.
/// Idempotent — existing documents are never overwritten.
pub fn run(root: &Path) -> anyhow::Result<()> {
    let paths = VaultPaths::new(root);
    paths
        .ensure_orchestrator_dirs()
        .context("failed to create vault directories")?;
    paths
        .ensure_watch_dirs()
        .context("failed to create vault directories")?;
    aide_core::io::ensure_dir(&paths.updates()).context("failed to create Updates/")?;

    if write_if_missing(&paths.dashboard(), DASHBOARD_TEMPLATE.as_bytes())? {
        println!("created {}", paths.dashboard().display());
    }
    if write_if_missing(&paths.handbook(), HANDBOOK_TEMPLATE.as_bytes())? {
        println!("created {}", paths.handbook().display());
    }

    println!("vault ready at {}", root.display());
    Ok(())
}
