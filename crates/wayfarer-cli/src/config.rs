use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use wayfarer_client::PollConfig;

// ---------------------------------------------------------------------------
// PollSettings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollSettings {
    #[serde(default = "default_floor_secs")]
    pub floor_secs: u64,
    #[serde(default = "default_ceiling_secs")]
    pub ceiling_secs: u64,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

fn default_floor_secs() -> u64 {
    5
}

fn default_ceiling_secs() -> u64 {
    60
}

fn default_max_retries() -> u32 {
    20
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            floor_secs: default_floor_secs(),
            ceiling_secs: default_ceiling_secs(),
            max_retries: default_max_retries(),
        }
    }
}

impl PollSettings {
    pub fn to_poll_config(&self) -> PollConfig {
        PollConfig {
            floor: Duration::from_secs(self.floor_secs),
            ceiling: Duration::from_secs(self.ceiling_secs),
            max_retries: self.max_retries,
            ..PollConfig::default()
        }
    }
}

// ---------------------------------------------------------------------------
// CliConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub poll: PollSettings,
}

fn default_api_url() -> String {
    "http://localhost:8000/api".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout_secs: default_timeout_secs(),
            poll: PollSettings::default(),
        }
    }
}

impl CliConfig {
    /// Load from a YAML file, or fall back to defaults when no path is given.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => {
                let data = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read config file {}", path.display()))?;
                let cfg = serde_yaml::from_str(&data)
                    .with_context(|| format!("invalid config file {}", path.display()))?;
                Ok(cfg)
            }
            None => Ok(Self::default()),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_backend_contract() {
        let cfg = CliConfig::default();
        assert_eq!(cfg.api_url, "http://localhost:8000/api");
        assert_eq!(cfg.poll.floor_secs, 5);
        assert_eq!(cfg.poll.ceiling_secs, 60);
        assert_eq!(cfg.poll.max_retries, 20);
    }

    #[test]
    fn partial_yaml_fills_in_defaults() {
        let cfg: CliConfig = serde_yaml::from_str("api_url: https://example.test/api\n").unwrap();
        assert_eq!(cfg.api_url, "https://example.test/api");
        assert_eq!(cfg.timeout_secs, 30);
        assert_eq!(cfg.poll.max_retries, 20);
    }

    #[test]
    fn poll_overrides_reach_poll_config() {
        let yaml = "poll:\n  floor_secs: 2\n  ceiling_secs: 10\n  max_retries: 3\n";
        let cfg: CliConfig = serde_yaml::from_str(yaml).unwrap();
        let poll = cfg.poll.to_poll_config();
        assert_eq!(poll.floor, Duration::from_secs(2));
        assert_eq!(poll.ceiling, Duration::from_secs(10));
        assert_eq!(poll.max_retries, 3);
    }

    #[test]
    fn load_without_path_uses_defaults() {
        let cfg = CliConfig::load(None).unwrap();
        assert_eq!(cfg.api_url, default_api_url());
    }
}
