use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_CONFIG_NAME: &str = "pagecraft.config.json";

/// Pagecraft configuration file format
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory holding one `<owner>.json` document per practitioner
    #[serde(default = "default_store_dir")]
    pub store_dir: String,

    /// Directory rendered pages are written to
    #[serde(default = "default_out_dir")]
    pub out_dir: String,

    /// How long a save may take before it is reported as failed
    #[serde(default = "default_save_timeout_ms")]
    pub save_timeout_ms: u64,
}

fn default_store_dir() -> String {
    "profiles".to_string()
}

fn default_out_dir() -> String {
    "dist".to_string()
}

fn default_save_timeout_ms() -> u64 {
    10_000
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
            // Return default config if none exists
            Ok(Config::default())
        }
    }

    pub fn get_store_dir(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.store_dir)
    }

    pub fn get_out_dir(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.out_dir)
    }

    pub fn save_timeout(&self) -> Duration {
        Duration::from_millis(self.save_timeout_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_dir: default_store_dir(),
            out_dir: default_out_dir(),
            save_timeout_ms: default_save_timeout_ms(),
        }
    }
}
