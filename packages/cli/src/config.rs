use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uidsl_editor::SessionConfig;

pub const DEFAULT_CONFIG_NAME: &str = "uidsl.config.json";

/// uidsl configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Commit author, commit policy, batch atomicity, warning promotion
    #[serde(flatten)]
    pub session: SessionConfig,

    /// History file used when `--file` is not given
    #[serde(default = "default_history_file")]
    pub history_file: String,
}

fn default_history_file() -> String {
    "uidsl.history.json".to_string()
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Absolute path of the history file
    pub fn history_path(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.history_file)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            session: SessionConfig::default(),
            history_file: default_history_file(),
        }
    }
}
