//! Flare configuration system
//!
//! Loads engine settings from `flare.toml`, with environment variables
//! taking precedence over file values.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

pub use flare_anim::FailurePolicy;

/// Default configuration file name, looked up in the current directory.
pub const CONFIG_FILE: &str = "flare.toml";

/// Errors raised while loading a configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct FlareConfig {
    /// Playback timing
    pub playback: PlaybackConfig,
    /// Layer build behaviour
    pub emitter: EmitterConfig,
    /// Log output
    pub logging: LoggingConfig,
}

/// Playback timing configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Frames per second of the animation timeline
    pub frame_rate: f64,
}

/// Emitter configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct EmitterConfig {
    /// What to do when one effect of a layer cannot be attached
    pub failure_policy: FailurePolicy,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing` env-filter directive, e.g. `"info,flare_anim=debug"`
    pub filter: String,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self { frame_rate: 30.0 }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

impl FlareConfig {
    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Ok(toml::from_str(&content)?)
    }

    /// Load `flare.toml` from the current directory, or defaults if it is
    /// missing or unreadable
    pub fn load_or_default() -> Self {
        Self::load_from_file(CONFIG_FILE).unwrap_or_default()
    }

    /// Merge configuration with environment variables
    ///
    /// Unparseable values are ignored and leave the file value in place.
    pub fn merge_with_env(&mut self) {
        if let Ok(val) = std::env::var("FLARE_FRAME_RATE") {
            if let Ok(rate) = val.parse::<f64>() {
                if rate > 0.0 {
                    self.playback.frame_rate = rate;
                }
            }
        }
        if let Ok(val) = std::env::var("FLARE_FAILURE_POLICY") {
            if let Some(policy) = parse_policy(&val) {
                self.emitter.failure_policy = policy;
            }
        }
        if let Ok(filter) = std::env::var("FLARE_LOG") {
            self.logging.filter = filter;
        }
    }

    /// Load configuration with environment variable overrides
    pub fn load() -> Self {
        let mut config = Self::load_or_default();
        config.merge_with_env();
        config
    }
}

fn parse_policy(value: &str) -> Option<FailurePolicy> {
    match value.trim().to_ascii_lowercase().replace('-', "_").as_str() {
        "skip_effect" | "skip" => Some(FailurePolicy::SkipEffect),
        "abort_layer" | "abort" => Some(FailurePolicy::AbortLayer),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = FlareConfig::default();
        assert_eq!(config.playback.frame_rate, 30.0);
        assert_eq!(config.emitter.failure_policy, FailurePolicy::SkipEffect);
        assert_eq!(config.logging.filter, "info");
    }

    #[test]
    fn test_toml_serialization() {
        let config = FlareConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: FlareConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_file() {
        let parsed: FlareConfig = toml::from_str(
            r#"
            [emitter]
            failure_policy = "abort_layer"
            "#,
        )
        .unwrap();
        assert_eq!(parsed.emitter.failure_policy, FailurePolicy::AbortLayer);
        assert_eq!(parsed.playback.frame_rate, 30.0);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[playback]\nframe_rate = 60.0\n\n[logging]\nfilter = \"debug\"").unwrap();

        let config = FlareConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.playback.frame_rate, 60.0);
        assert_eq!(config.logging.filter, "debug");
    }

    #[test]
    fn test_load_from_file_errors() {
        let missing = FlareConfig::load_from_file("/nonexistent/flare.toml").unwrap_err();
        assert!(matches!(missing, ConfigError::Io(_)));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[emitter]\nfailure_policy = \"explode\"").unwrap();
        let invalid = FlareConfig::load_from_file(file.path()).unwrap_err();
        assert!(matches!(invalid, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_or_default() {
        // Should not panic even if flare.toml doesn't exist
        let config = FlareConfig::load_or_default();
        assert!(config.playback.frame_rate > 0.0);
    }

    #[test]
    fn test_parse_policy() {
        assert_eq!(parse_policy("abort-layer"), Some(FailurePolicy::AbortLayer));
        assert_eq!(parse_policy(" SKIP "), Some(FailurePolicy::SkipEffect));
        assert_eq!(parse_policy("sometimes"), None);
    }

    #[test]
    fn test_merge_with_env() {
        unsafe {
            std::env::set_var("FLARE_FRAME_RATE", "24");
            std::env::set_var("FLARE_FAILURE_POLICY", "abort_layer");
            std::env::set_var("FLARE_LOG", "flare_anim=trace");
        }

        let mut config = FlareConfig::default();
        config.merge_with_env();

        assert_eq!(config.playback.frame_rate, 24.0);
        assert_eq!(config.emitter.failure_policy, FailurePolicy::AbortLayer);
        assert_eq!(config.logging.filter, "flare_anim=trace");

        unsafe {
            std::env::remove_var("FLARE_FRAME_RATE");
            std::env::remove_var("FLARE_FAILURE_POLICY");
            std::env::remove_var("FLARE_LOG");
        }
    }
}
