//! External agent invocation.
//!
//! Two variants: spawn a command-line agent as a bounded subprocess, or write
//! the prompt to a file for an agent that polls it. Invocation failures
//! (missing executable, timeout, non-zero exit) are reported as a boolean to
//! the caller, never raised; only filesystem errors from the prompt-file
//! variant propagate as `Err`.

use crate::config::AgentConfig;
use crate::error::{AideError, Result};
use crate::io::atomic_write;
use crate::paths::VaultPaths;
use std::io::Read;
use std::path::PathBuf;
use std::process::{Command, ExitStatus, Stdio};
use std::str::FromStr;
use std::time::Duration;
use tracing::{error, info, warn};
use wait_timeout::ChildExt;

/// Cap on agent stdout echoed into the diagnostic log.
pub const STDOUT_LOG_LIMIT: usize = 500;

// ---------------------------------------------------------------------------
// AgentKind
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AgentKind {
    /// Spawn the configured executable with the vault path and prompt.
    Command,
    /// Write the prompt to `Updates/ai_prompt.txt`; no process is spawned.
    #[default]
    PromptFile,
}

impl FromStr for AgentKind {
    type Err = AideError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "command" => Ok(Self::Command),
            "prompt-file" => Ok(Self::PromptFile),
            other => Err(AideError::InvalidAgentKind(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Agent
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Agent {
    kind: AgentKind,
    command: String,
    timeout: Duration,
    vault_root: PathBuf,
    prompt_path: PathBuf,
}

impl Agent {
    pub fn new(kind: AgentKind, config: &AgentConfig, paths: &VaultPaths) -> Self {
        Self {
            kind,
            command: config.command.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
            vault_root: paths.root().to_path_buf(),
            prompt_path: paths.prompt_file(),
        }
    }

    /// Hand a prompt to the agent.
    ///
    /// Returns `Ok(true)` on success and `Ok(false)` on any invocation
    /// failure. The prompt-file variant cannot fail this way; its only
    /// failure mode is a filesystem error, returned as `Err`.
    pub fn trigger(&self, prompt: &str) -> Result<bool> {
        match self.kind {
            AgentKind::PromptFile => {
                atomic_write(&self.prompt_path, prompt.as_bytes())?;
                info!(path = %self.prompt_path.display(), "prompt written for agent");
                Ok(true)
            }
            AgentKind::Command => Ok(self.run_command(prompt)),
        }
    }

    fn run_command(&self, prompt: &str) -> bool {
        info!(command = %self.command, "triggering agent");

        let mut cmd = Command::new(&self.command);
        cmd.arg("--cwd").arg(&self.vault_root).arg(prompt);

        match execute(cmd, self.timeout) {
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                error!(
                    "agent executable '{}' not found; install it or set agent.command in aide.yaml",
                    self.command
                );
                false
            }
            Err(e) => {
                error!(err = %e, "error triggering agent");
                false
            }
            Ok(Exec::TimedOut) => {
                error!(
                    timeout_secs = self.timeout.as_secs(),
                    "agent timed out, killed"
                );
                false
            }
            Ok(Exec::Completed {
                status,
                stdout,
                stderr,
            }) => {
                if status.success() {
                    info!("agent completed successfully");
                    if !stdout.is_empty() {
                        info!(output = %truncate_chars(&stdout, STDOUT_LOG_LIMIT), "agent output");
                    }
                    true
                } else {
                    error!(code = ?status.code(), "agent exited with failure");
                    if !stderr.is_empty() {
                        error!(stderr = %stderr.trim_end(), "agent stderr");
                    }
                    false
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Bounded subprocess execution
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub(crate) enum Exec {
    Completed {
        status: ExitStatus,
        stdout: String,
        stderr: String,
    },
    TimedOut,
}

/// Run `cmd` to completion or until `timeout` elapses, capturing output.
///
/// Pipes are drained on reader threads while waiting, so a chatty child
/// cannot deadlock against a full pipe buffer.
pub(crate) fn execute(mut cmd: Command, timeout: Duration) -> std::io::Result<Exec> {
    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let mut child = cmd.spawn()?;
    let stdout = drain(child.stdout.take());
    let stderr = drain(child.stderr.take());

    let status = match child.wait_timeout(timeout)? {
        Some(status) => status,
        None => {
            warn!(timeout_secs = timeout.as_secs(), "killing timed-out child");
            child.kill()?;
            child.wait()?;
            return Ok(Exec::TimedOut);
        }
    };

    Ok(Exec::Completed {
        status,
        stdout: stdout.join().unwrap_or_default(),
        stderr: stderr.join().unwrap_or_default(),
    })
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> std::thread::JoinHandle<String> {
    std::thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_end(&mut buf);
        }
        String::from_utf8_lossy(&buf).into_owned()
    })
}

fn truncate_chars(s: &str, limit: usize) -> &str {
    match s.char_indices().nth(limit) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
