//! Configuration file loading with precedence handling.

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

use crate::reveal::{RevealTiming, ViewportTrigger};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "FOLIO_MOTION_CONFIG";

/// Environment variable overriding the settle delay, in milliseconds.
pub const SETTLE_ENV: &str = "FOLIO_MOTION_SETTLE_MS";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (file may not exist or have permission issues).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/folio-motion/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Wait after the document is ready before scanning for targets.
    #[serde(default)]
    pub settle_delay_ms: Option<u64>,

    /// Debounce window for refresh requests.
    #[serde(default)]
    pub refresh_delay_ms: Option<u64>,

    /// Share of the viewport height, measured from the bottom, an element
    /// must enter before its reveal fires.
    #[serde(default)]
    pub threshold_ratio: Option<f64>,

    /// Extra pixels added to the trigger line.
    #[serde(default)]
    pub root_margin_px: Option<f64>,

    /// Extra delay per marked element, in seconds.
    #[serde(default)]
    pub marker_stagger_secs: Option<f64>,

    /// Delay per section index, in seconds.
    #[serde(default)]
    pub section_stagger_secs: Option<f64>,

    /// Delay between consecutive cards, in seconds.
    #[serde(default)]
    pub card_stagger_secs: Option<f64>,

    /// Simulated frame interval.
    #[serde(default)]
    pub frame_interval_ms: Option<u64>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// Wait after ready before the first scan.
    pub settle_delay_ms: u64,
    /// Refresh debounce window.
    pub refresh_delay_ms: u64,
    /// Share of the viewport height, from the bottom, an anchor must pass.
    pub threshold_ratio: f64,
    /// Extra pixels added to the trigger line.
    pub root_margin_px: f64,
    /// Extra delay per marked element, in seconds.
    pub marker_stagger_secs: f64,
    /// Delay per section index, in seconds.
    pub section_stagger_secs: f64,
    /// Delay between consecutive cards, in seconds.
    pub card_stagger_secs: f64,
    /// Simulated frame interval.
    pub frame_interval_ms: u64,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        let timing = RevealTiming::default();
        Self {
            settle_delay_ms: 100,
            refresh_delay_ms: 100,
            threshold_ratio: timing.trigger.threshold_ratio,
            root_margin_px: timing.trigger.root_margin,
            marker_stagger_secs: timing.marker_stagger,
            section_stagger_secs: timing.section_stagger,
            card_stagger_secs: timing.card_stagger,
            frame_interval_ms: 16,
            log_file_path: default_log_path(),
        }
    }
}

impl ResolvedConfig {
    /// Timing for the reveal controller.
    pub fn reveal_timing(&self) -> RevealTiming {
        RevealTiming {
            settle_delay: Duration::from_millis(self.settle_delay_ms),
            refresh_delay: Duration::from_millis(self.refresh_delay_ms),
            marker_stagger: self.marker_stagger_secs.max(0.0),
            section_stagger: self.section_stagger_secs.max(0.0),
            card_stagger: self.card_stagger_secs.max(0.0),
            trigger: ViewportTrigger {
                threshold_ratio: self.threshold_ratio,
                root_margin: self.root_margin_px,
            },
        }
    }

    /// Frame interval as a `Duration`, never shorter than 1ms.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms.max(1))
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/folio-motion/folio-motion.log` on Unix-like
/// systems, or the platform state directory elsewhere.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("folio-motion").join("folio-motion.log")
    } else {
        PathBuf::from("folio-motion.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/folio-motion/config.toml` on Unix, appropriate path on
/// other platforms. Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("folio-motion").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `FOLIO_MOTION_CONFIG` environment variable
/// 3. Default path `~/.config/folio-motion/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV) {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for `FOLIO_MOTION_SETTLE_MS`. A value that is not a whole number of
/// milliseconds is logged and ignored.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(raw) = std::env::var(SETTLE_ENV) {
        match raw.trim().parse::<u64>() {
            Ok(ms) => config.settle_delay_ms = ms,
            Err(e) => warn!(value = %raw, error = %e, "ignoring {SETTLE_ENV}"),
        }
    }

    config
}

/// TOML accepts `inf` and `nan`; those are logged and replaced by the default.
fn finite_or(key: &str, value: Option<f64>, default: f64) -> f64 {
    match value {
        Some(v) if v.is_finite() => v,
        Some(v) => {
            warn!(key, value = %v, "ignoring non-finite config value");
            default
        }
        None => default,
    }
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
/// Non-finite floats count as unset.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        settle_delay_ms: config.settle_delay_ms.unwrap_or(defaults.settle_delay_ms),
        refresh_delay_ms: config.refresh_delay_ms.unwrap_or(defaults.refresh_delay_ms),
        threshold_ratio: finite_or(
            "threshold_ratio",
            config.threshold_ratio,
            defaults.threshold_ratio,
        ),
        root_margin_px: finite_or("root_margin_px", config.root_margin_px, defaults.root_margin_px),
        marker_stagger_secs: finite_or(
            "marker_stagger_secs",
            config.marker_stagger_secs,
            defaults.marker_stagger_secs,
        ),
        section_stagger_secs: finite_or(
            "section_stagger_secs",
            config.section_stagger_secs,
            defaults.section_stagger_secs,
        ),
        card_stagger_secs: finite_or(
            "card_stagger_secs",
            config.card_stagger_secs,
            defaults.card_stagger_secs,
        ),
        frame_interval_ms: config
            .frame_interval_ms
            .unwrap_or(defaults.frame_interval_ms),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply CLI argument overrides to resolved config.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    frame_ms_override: Option<u64>,
) -> ResolvedConfig {
    if let Some(frame_ms) = frame_ms_override {
        config.frame_interval_ms = frame_ms;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;

#[cfg(test)]
mod log_path_tests {
    use super::*;

    #[test]
    fn default_log_path_ends_with_log_file_name() {
        let path = default_log_path();
        assert!(
            path.to_string_lossy().ends_with("folio-motion.log"),
            "Default log path should end with 'folio-motion.log', got: {:?}",
            path
        );
    }

    #[test]
    fn resolved_config_default_includes_log_path() {
        let config = ResolvedConfig::default();
        assert!(
            !config.log_file_path.as_os_str().is_empty(),
            "Default config should have non-empty log_file_path"
        );
    }

    #[test]
    fn config_file_log_path_overrides_default() {
        let custom_path = PathBuf::from("/custom/path/to/app.log");
        let config_file = ConfigFile {
            log_file_path: Some(custom_path.clone()),
            ..ConfigFile::default()
        };

        let resolved = merge_config(Some(config_file));
        assert_eq!(
            resolved.log_file_path, custom_path,
            "Config file log_file_path should override default"
        );
    }

    #[test]
    fn missing_config_file_log_path_uses_default() {
        let resolved = merge_config(Some(ConfigFile::default()));
        assert_eq!(
            resolved.log_file_path,
            default_log_path(),
            "Missing log_file_path in config should use default"
        );
    }
}
