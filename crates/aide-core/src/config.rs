use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Optional config file at the vault root. Absent file means all defaults.
pub const CONFIG_FILE: &str = "aide.yaml";

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Seconds between poll cycles (orchestrator and watchers).
    #[serde(default = "default_check_interval")]
    pub check_interval_secs: u64,

    #[serde(default)]
    pub agent: AgentConfig,
}

fn default_check_interval() -> u64 {
    60
}

impl Default for Config {
    fn default() -> Self {
        Self {
            check_interval_secs: default_check_interval(),
            agent: AgentConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Executable for the external-process agent variant.
    #[serde(default = "default_agent_command")]
    pub command: String,

    /// Wall-clock bound on one agent invocation.
    #[serde(default = "default_agent_timeout")]
    pub timeout_secs: u64,
}

fn default_agent_command() -> String {
    "claude".to_string()
}

fn default_agent_timeout() -> u64 {
    300
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            command: default_agent_command(),
            timeout_secs: default_agent_timeout(),
        }
    }
}

impl Config {
    /// Load `aide.yaml` from the vault root, falling back to defaults if the
    /// file does not exist.
    pub fn load(root: &Path) -> Result<Config> {
        let path = root.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Config::default());
        }
        let raw = std::fs::read_to_string(&path)?;
        Ok(serde_yaml::from_str(&raw)?)
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
    fn missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.check_interval_secs, 60);
        assert_eq!(config.agent.command, "claude");
        assert_eq!(config.agent.timeout_secs, 300);
    }

    #[test]
    fn partial_yaml_fills_defaults() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "check_interval_secs: 5\n").unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.check_interval_secs, 5);
        assert_eq!(config.agent, AgentConfig::default());
    }

    #[test]
    fn agent_override() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            "agent:\n  command: my-agent\n",
        )
        .unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.agent.command, "my-agent");
        assert_eq!(config.agent.timeout_secs, 300);
    }

    #[test]
    fn malformed_yaml_is_an_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "check_interval_secs: [oops\n").unwrap();
        assert!(Config::load(dir.path()).is_err());
    }
}
