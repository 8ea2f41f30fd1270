//! Configuration schema definitions.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub browser: BrowserConfig,

    #[serde(default)]
    pub snapshot: SnapshotConfig,

    #[serde(default)]
    pub stabilization: StabilizationConfig,

    #[serde(default)]
    pub preflight: PreflightConfig,
}

/// CDP connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserConfig {
    /// Chrome debugging endpoint, e.g. `http://localhost:9222`.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Per-command CDP response timeout.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

impl BrowserConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

fn default_endpoint() -> String {
    "http://localhost:9222".to_string()
}

fn default_request_timeout_ms() -> u64 {
    30000
}

/// Tree-building and rendering limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotConfig {
    /// Same-origin iframes deeper than this become placeholders.
    #[serde(default = "default_max_iframe_depth")]
    pub max_iframe_depth: usize,

    /// Accessible names longer than this are truncated when rendered.
    #[serde(default = "default_max_name_length")]
    pub max_name_length: usize,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            max_iframe_depth: default_max_iframe_depth(),
            max_name_length: default_max_name_length(),
        }
    }
}

fn default_max_iframe_depth() -> usize {
    5
}

fn default_max_name_length() -> usize {
    900
}

/// Post-action page stabilization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StabilizationConfig {
    /// Best-effort wait for the document to be parsed.
    #[serde(default = "default_content_parsed_timeout_ms")]
    pub content_parsed_timeout_ms: u64,

    /// Time box for the full-load wait; exceeding it is not an error.
    #[serde(default = "default_load_timeout_ms")]
    pub load_timeout_ms: u64,

    /// Unconditional delay after the load waits.
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,

    /// Ready-state polling interval.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

impl Default for StabilizationConfig {
    fn default() -> Self {
        Self {
            content_parsed_timeout_ms: default_content_parsed_timeout_ms(),
            load_timeout_ms: default_load_timeout_ms(),
            settle_delay_ms: default_settle_delay_ms(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

impl StabilizationConfig {
    pub fn content_parsed_timeout(&self) -> Duration {
        Duration::from_millis(self.content_parsed_timeout_ms)
    }

    pub fn load_timeout(&self) -> Duration {
        Duration::from_millis(self.load_timeout_ms)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

fn default_content_parsed_timeout_ms() -> u64 {
    10000
}

fn default_load_timeout_ms() -> u64 {
    5000
}

fn default_settle_delay_ms() -> u64 {
    1000
}

fn default_poll_interval_ms() -> u64 {
    100
}

/// Text-only checks run before an action reaches the browser.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreflightConfig {
    #[serde(default = "default_max_wait_seconds")]
    pub max_wait_seconds: u64,
}

impl Default for PreflightConfig {
    fn default() -> Self {
        Self {
            max_wait_seconds: default_max_wait_seconds(),
        }
    }
}

fn default_max_wait_seconds() -> u64 {
    30
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;
