//! lingomark configuration file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use lingomark_timer::{ThresholdError, Thresholds};

/// Warning thresholds for the countdown, in seconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerConfig {
    #[serde(default = "default_five_minute")]
    pub five_minute_warning_secs: u64,
    #[serde(default = "default_one_minute")]
    pub one_minute_warning_secs: u64,
}

fn default_five_minute() -> u64 {
    300
}
fn default_one_minute() -> u64 {
    60
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            five_minute_warning_secs: default_five_minute(),
            one_minute_warning_secs: default_one_minute(),
        }
    }
}

impl TimerConfig {
    pub fn thresholds(&self) -> Result<Thresholds, ThresholdError> {
        Thresholds::new(self.five_minute_warning_secs, self.one_minute_warning_secs)
    }
}

/// Top-level lingomark configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LingomarkConfig {
    /// Output directory for reports.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Report format used when `--format` is not given.
    #[serde(default = "default_format")]
    pub default_format: String,
    #[serde(default)]
    pub timer: TimerConfig,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./lingomark-results")
}
fn default_format() -> String {
    "json".to_string()
}

impl Default for LingomarkConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            default_format: default_format(),
            timer: TimerConfig::default(),
        }
    }
}

/// Load config from an explicit path, `./lingomark.toml`, or
/// `~/.config/lingomark/config.toml`, in that order. Falls back to defaults
/// when none exists. Environment overrides apply last.
pub fn load_config_from(explicit: Option<&Path>) -> Result<LingomarkConfig> {
    let config_path = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => {
            let local = PathBuf::from("lingomark.toml");
            if local.exists() {
                Some(local)
            } else {
                dirs_path()
                    .map(|home| home.join("config.toml"))
                    .filter(|global| global.exists())
            }
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<LingomarkConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => LingomarkConfig::default(),
    };

    if let Ok(dir) = std::env::var("LINGOMARK_OUTPUT_DIR") {
        config.output_dir = PathBuf::from(dir);
    }
    if let Ok(format) = std::env::var("LINGOMARK_FORMAT") {
        config.default_format = format;
    }

    config
        .timer
        .thresholds()
        .context("invalid [timer] configuration")?;

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("lingomark"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = LingomarkConfig::default();
        assert_eq!(config.default_format, "json");
        assert_eq!(config.timer.five_minute_warning_secs, 300);
        assert_eq!(config.timer.thresholds().unwrap(), Thresholds::default());
    }

    #[test]
    fn parse_partial_config() {
        let toml_str = r#"
output_dir = "out"

[timer]
one_minute_warning_secs = 30
"#;
        let config: LingomarkConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.default_format, "json");
        assert_eq!(config.timer.five_minute_warning_secs, 300);
        assert_eq!(config.timer.one_minute_warning_secs, 30);
    }

    #[test]
    fn load_rejects_bad_thresholds() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lingomark.toml");
        std::fs::write(
            &path,
            "[timer]\nfive_minute_warning_secs = 30\none_minute_warning_secs = 60\n",
        )
        .unwrap();
        let err = load_config_from(Some(&path)).unwrap_err();
        assert!(format!("{err:#}").contains("must be below"));
    }

    #[test]
    fn load_missing_explicit_file_fails() {
        let err = load_config_from(Some(Path::new("/nonexistent/lingomark.toml"))).unwrap_err();
        assert!(err.to_string().contains("failed to read config"));
    }
}
