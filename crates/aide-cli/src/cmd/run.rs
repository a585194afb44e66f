use aide_core::agent::AgentKind;
use aide_core::config::Config;
use aide_core::orchestrator::Orchestrator;
use aide_core::shutdown::ShutdownFlag;
use anyhow::Context;
use std::path::Path;
use std::time::Duration;

pub fn run(
    root: &Path,
    continuous: bool,
    interval: Option<u64>,
    agent: Option<&str>,
) -> anyhow::Result<()> {
    let config = Config::load(root).context("failed to load aide.yaml")?;
    let kind: AgentKind = match agent {
        Some(s) => s.parse()?,
        None => AgentKind::default(),
    };

    let orchestrator =
        Orchestrator::new(root, kind, &config).context("failed to set up orchestrator")?;

    if continuous {
        let shutdown = ShutdownFlag::new();
        let flag = shutdown.clone();
        ctrlc::set_handler(move || flag.set()).context("failed to install interrupt handler")?;

        let interval = Duration::from_secs(interval.unwrap_or(config.check_interval_secs));
        orchestrator.run_continuous(interval, &shutdown);
    } else {
        let pending = orchestrator.run_once()?;
        println!("{pending} pending item(s)");
    }
    Ok(())
}
