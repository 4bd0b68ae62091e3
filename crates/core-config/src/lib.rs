//! Configuration loading and parsing.
//!
//! Two distinct inputs live here:
//! - the engine's one-shot JSON setup payload (`setup` module), which arrives
//!   over the bridge at session start and degrades gracefully on malformed or
//!   missing fields;
//! - the optional `sifter.toml` widget configuration, currently the
//!   `[debounce]` table controlling the backpressure delay policy.
//!
//! The debounce delay grows linearly with the number of outstanding filter
//! requests (`pending * base_ms`) and is capped at `max_ms` so sustained load
//! cannot grow latency without bound. An inconsistent file (`max_ms` below
//! `base_ms`) is clamped rather than rejected, and the clamp is recorded via
//! a structured `info!` so misconfiguration is visible in logs. Unknown
//! fields are ignored to allow forward evolution without warnings.

use anyhow::Result;
use serde::Deserialize;
use std::{fs, path::PathBuf};
use tracing::info;

pub mod setup;

pub use setup::{SetupParams, parse_setup};

/// Observed base delay of the original widget: 50 ms per outstanding request.
pub const DEFAULT_BASE_DELAY_MS: u64 = 50;
/// Delay ceiling; ten outstanding requests saturate the linear policy.
pub const DEFAULT_MAX_DELAY_MS: u64 = 500;

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
pub struct DebounceConfig {
    #[serde(default = "DebounceConfig::default_base_ms")]
    pub base_ms: u64,
    #[serde(default = "DebounceConfig::default_max_ms")]
    pub max_ms: u64,
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self {
            base_ms: Self::default_base_ms(),
            max_ms: Self::default_max_ms(),
        }
    }
}

impl DebounceConfig {
    const fn default_base_ms() -> u64 {
        DEFAULT_BASE_DELAY_MS
    }
    const fn default_max_ms() -> u64 {
        DEFAULT_MAX_DELAY_MS
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub debounce: Option<DebounceConfig>,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub raw: Option<String>,           // original file string (optional)
    pub file: ConfigFile,              // parsed (or default) data
    pub effective: DebounceConfig,     // clamped values used by the coordinator
}

/// Best-effort config path following platform conventions: working directory
/// first, then the platform config dir.
pub fn discover() -> PathBuf {
    let local = PathBuf::from("sifter.toml");
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("sifter").join("sifter.toml");
    }
    PathBuf::from("sifter.toml")
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let mut config = if let Ok(content) = fs::read_to_string(&path) {
        match toml::from_str::<ConfigFile>(&content) {
            Ok(file) => Config {
                raw: Some(content),
                file,
                effective: DebounceConfig::default(),
            },
            // Parse errors fall back to defaults; a broken config file must
            // never keep the widget from coming up.
            Err(_e) => Config::default(),
        }
    } else {
        Config::default()
    };
    config.apply();
    Ok(config)
}

impl Config {
    /// Compute the effective debounce policy, clamping `max_ms` to at least
    /// `base_ms`.
    pub fn apply(&mut self) -> DebounceConfig {
        let raw = self.file.debounce.unwrap_or_default();
        let clamped_max = raw.max_ms.max(raw.base_ms);
        if clamped_max != raw.max_ms {
            info!(
                target: "config",
                base_ms = raw.base_ms,
                raw_max_ms = raw.max_ms,
                clamped_max_ms = clamped_max,
                "debounce_ceiling_clamped"
            );
        }
        let effective = DebounceConfig {
            base_ms: raw.base_ms,
            max_ms: clamped_max,
        };
        self.effective = effective;
        effective
    }
}
