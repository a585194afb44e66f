use aide_core::config::Config;
use aide_core::inbox::InboxWatcher;
use aide_core::paths::VaultPaths;
use aide_core::shutdown::ShutdownFlag;
use aide_core::watcher::run_watcher;
use anyhow::Context;
use clap::Subcommand;
use std::path::Path;
use std::time::Duration;

#[derive(Subcommand)]
pub enum WatchSubcommand {
    /// Watch Inbox/ for new files and queue an action file for each
    Inbox {
        /// Seconds between checks (default: aide.yaml or 60)
        #[arg(long)]
        interval: Option<u64>,
    },
}

pub fn run(root: &Path, subcommand: WatchSubcommand) -> anyhow::Result<()> {
    let config = Config::load(root).context("failed to load aide.yaml")?;

    match subcommand {
        WatchSubcommand::Inbox { interval } => {
            let paths = VaultPaths::new(root);
            let mut watcher = InboxWatcher::new(paths.clone());

            let shutdown = ShutdownFlag::new();
            let flag = shutdown.clone();
            ctrlc::set_handler(move || flag.set())
                .context("failed to install interrupt handler")?;

            let interval = Duration::from_secs(interval.unwrap_or(config.check_interval_secs));
            run_watcher(&mut watcher, &paths, interval, &shutdown)?;
        }
    }
    Ok(())
}
