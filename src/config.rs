//! Configuration management

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Source guide published by epg.pw
pub const DEFAULT_EPG_URL: &str = "https://epg.pw/xmltv/epg.xml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConverterConfig {
    #[serde(default = "default_epg_url")]
    pub epg_url: String,
    /// Directory the output files are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Bound on the whole request, connect included
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_epg_url() -> String { DEFAULT_EPG_URL.to_string() }
fn default_output_dir() -> PathBuf { PathBuf::from(".") }
fn default_timeout() -> u64 { 120 }
fn default_connect_timeout() -> u64 { 30 }
fn default_user_agent() -> String { format!("epg-wib/{}", env!("CARGO_PKG_VERSION")) }

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            epg_url: default_epg_url(),
            output_dir: default_output_dir(),
            timeout_secs: default_timeout(),
            connect_timeout_secs: default_connect_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl ConverterConfig {
    fn config_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("epg_wib");
        path.push("config.json");
        path
    }

    /// Load overrides from the user config dir, falling back to the built-in defaults
    pub fn load() -> Self {
        let path = Self::config_path();

        if path.exists() {
            match fs::read_to_string(&path) {
                Ok(content) => match Self::from_json(&content) {
                    Ok(config) => {
                        log::debug!("Loaded config from {}", path.display());
                        return config;
                    }
                    Err(e) => log::warn!("Ignoring {}: {}", path.display(), e),
                },
                Err(e) => log::warn!("Cannot read {}: {}", path.display(), e),
            }
        }

        Self::default()
    }

    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }
}
