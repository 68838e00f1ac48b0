//! Guide download over HTTP(S)
//!
//! One attempt, bounded by a global timeout. Any transport failure or
//! non-success status aborts the run.

use std::io::Read;
use std::time::Duration;

use crate::config::ConverterConfig;
use crate::error::{EpgError, Result};

/// Source of raw guide bytes
pub trait FetchBytes {
    fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>>;
}

/// Download configuration
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Bound on the whole request in seconds
    pub timeout_secs: u64,
    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,
    /// Chunk size for reading (bytes)
    pub chunk_size: usize,
    /// User agent string
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self::from(&ConverterConfig::default())
    }
}

impl From<&ConverterConfig> for FetchConfig {
    fn from(config: &ConverterConfig) -> Self {
        Self {
            timeout_secs: config.timeout_secs,
            connect_timeout_secs: config.connect_timeout_secs,
            chunk_size: 64 * 1024, // 64KB chunks
            user_agent: config.user_agent.clone(),
        }
    }
}

/// Log a progress line every this many downloaded bytes
const PROGRESS_STEP: u64 = 16 * 1024 * 1024;

/// Blocking downloader backed by a ureq agent
pub struct HttpFetcher {
    agent: ureq::Agent,
    config: FetchConfig,
}

impl HttpFetcher {
    pub fn new(config: FetchConfig) -> Self {
        Self {
            agent: Self::create_agent(&config),
            config,
        }
    }

    /// Create a configured ureq agent
    fn create_agent(config: &FetchConfig) -> ureq::Agent {
        ureq::Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(config.timeout_secs)))
            .timeout_connect(Some(Duration::from_secs(config.connect_timeout_secs)))
            .build()
            .new_agent()
    }
}

impl FetchBytes for HttpFetcher {
    fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .agent
            .get(url)
            .header("User-Agent", &self.config.user_agent)
            .call()
            .map_err(|e| EpgError::Transport(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(EpgError::Transport(format!("HTTP error: {}", status)));
        }

        // Get content length if available
        let total_size: Option<u64> = response
            .headers()
            .get("Content-Length")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse().ok());

        let mut body = Vec::with_capacity(total_size.unwrap_or(0).min(512 * 1024 * 1024) as usize);
        let mut reader = response.into_body().into_reader();
        let mut buffer = vec![0u8; self.config.chunk_size];
        let mut next_report = PROGRESS_STEP;

        loop {
            match reader.read(&mut buffer) {
                Ok(0) => break, // EOF
                Ok(n) => {
                    body.extend_from_slice(&buffer[..n]);
                    let downloaded = body.len() as u64;
                    if downloaded >= next_report {
                        match total_size {
                            Some(total) => log::debug!("Downloaded {} of {} bytes", downloaded, total),
                            None => log::debug!("Downloaded {} bytes", downloaded),
                        }
                        next_report += PROGRESS_STEP;
                    }
                }
                Err(ref e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(EpgError::Transport(format!("Read failed: {}", e))),
            }
        }

        Ok(body)
    }
}
