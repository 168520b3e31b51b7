//! Configuration types for arqlog.
//!
//! [`Config::load`] layers the embedded defaults, then the user file at
//! `~/.config/arqlog/config.toml` (or an explicit path) when it exists. The
//! file is never created. [`Config::defaults`] returns the same defaults
//! without touching the filesystem (useful in tests).

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::Result;

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[logs]
dir           = "logs"
server_prefix = "server_"
client_prefix = "client_"

[patterns]
server_sn = "Adding packet with SN (.+?) to IB"
server_ts = " to IB at time (.+?)$"
client_sn = "Pushed packet with SN (.+?) to OB"
client_ts = " to OB at time (.+?)$"

[timestamps]
formats = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
]

[chart]
title       = "Packet delay"
max_x_ticks = 10
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub logs: LogsConfig,
    pub patterns: PatternsConfig,
    pub timestamps: TimestampsConfig,
    pub chart: ChartConfig,
}

/// `[logs]`: where log sets live and how their file names are built.
#[derive(Debug, Clone, Deserialize)]
pub struct LogsConfig {
    pub dir: PathBuf,
    pub server_prefix: String,
    pub client_prefix: String,
}

/// `[patterns]`: one sequence-number and one timestamp regex per side.
#[derive(Debug, Clone, Deserialize)]
pub struct PatternsConfig {
    pub server_sn: String,
    pub server_ts: String,
    pub client_sn: String,
    pub client_ts: String,
}

/// `[timestamps]`
#[derive(Debug, Clone, Deserialize)]
pub struct TimestampsConfig {
    /// `chrono` formats tried in order after RFC 3339.
    pub formats: Vec<String>,
}

/// `[chart]`
#[derive(Debug, Clone, Deserialize)]
pub struct ChartConfig {
    pub title: String,
    /// Upper bound on x-axis tick labels once there are more points than this.
    pub max_x_ticks: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load the defaults overlaid with `path`, or with the user config file
    /// when `path` is `None`. A missing user file is not an error; a missing
    /// explicit `path` is.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(p) => config::File::from(p).required(true),
            None => config::File::from(config_path().as_path()).required(false),
        };

        Ok(config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(file)
            .build()?
            .try_deserialize()?)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        Self::from_toml_str("").expect("built-in default config must deserialize correctly")
    }

    /// Defaults overlaid with an in-memory TOML document.
    pub fn from_toml_str(src: &str) -> Result<Self> {
        Ok(config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from_str(src, config::FileFormat::Toml))
            .build()?
            .try_deserialize()?)
    }

    /// `<dir>/<server_prefix><name>`
    pub fn server_log(&self, name: &str) -> PathBuf {
        self.logs.dir.join(format!("{}{}", self.logs.server_prefix, name))
    }

    /// `<dir>/<client_prefix><name>`
    pub fn client_log(&self, name: &str) -> PathBuf {
        self.logs.dir.join(format!("{}{}", self.logs.client_prefix, name))
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("arqlog")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
