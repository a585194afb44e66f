mod cmd;

use clap::{Parser, Subcommand};
use cmd::watch::WatchSubcommand;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "aide",
    about = "File-based AI employee vault — watchers queue action files, the orchestrator briefs an agent",
    version,
    propagate_version = true
)]
struct Cli {
    /// Vault root (default: current directory)
    #[arg(long, global = true, env = "AIDE_VAULT")]
    root: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed the vault directory tree and starter documents
    Init,

    /// Run one orchestration cycle, or loop with --continuous
    Run {
        /// Keep running on a fixed interval until interrupted
        #[arg(long)]
        continuous: bool,

        /// Seconds between cycles (default: aide.yaml or 60)
        #[arg(long)]
        interval: Option<u64>,

        /// Agent backend: 'prompt-file' or 'command'
        #[arg(long)]
        agent: Option<String>,
    },

    /// Show queue counts without touching the dashboard or agent
    Status,

    /// Run a watcher loop
    Watch {
        #[command(subcommand)]
        subcommand: WatchSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_target(false)
        .init();

    let root = cli
        .root
        .clone()
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));

    let result = match cli.command {
        Commands::Init => cmd::init::run(&root),
        Commands::Run {
            continuous,
            interval,
            agent,
        } => cmd::run::run(&root, continuous, interval, agent.as_deref()),
        Commands::Status => cmd::status::run(&root),
        Commands::Watch { subcommand } => cmd::watch::run(&root, subcommand),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
