use aide_core::agent::AgentKind;
use aide_core::config::Config;
use aide_core::orchestrator::Orchestrator;
use anyhow::Context;
use std::path::Path;

pub fn run(root: &Path) -> anyhow::Result<()> {
    let config = Config::load(root).context("failed to load aide.yaml")?;
    let orchestrator = Orchestrator::new(root, AgentKind::default(), &config)
        .context("failed to set up orchestrator")?;
    let counts = orchestrator.count_items().context("failed to count items")?;

    println!("Pending actions:  {}", counts.pending);
    println!("In progress:      {}", counts.in_progress);
    println!("Completed today:  {}", counts.done_today);
    Ok(())
}
