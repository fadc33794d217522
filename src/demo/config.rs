//! Demo configuration.
//!
//! YAML with precedence: CLI > file > defaults. Every field is optional in
//! the file.
//!
//! ```yaml
//! width: 100
//! height: 30
//! color: ansi256
//! pause: false
//! frame_delay_ms: 50
//! seed: 42
//! ```

use crate::error::{Error, Result};
use crate::output::TerminalMode;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::warn;

/// Settings for one demo run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemoConfig {
    /// Figure width in cells; `None` follows the terminal.
    #[serde(default)]
    pub width: Option<u32>,

    /// Figure height in cells; `None` follows the terminal.
    #[serde(default)]
    pub height: Option<u32>,

    /// Color mode of rendered figures.
    #[serde(default)]
    pub color: TerminalMode,

    /// Wait for Enter between scenes.
    #[serde(default = "default_pause")]
    pub pause: bool,

    /// Delay after the message that introduces an animation.
    #[serde(default = "default_lead_in_ms")]
    pub lead_in_ms: u64,

    /// Delay between frames of the growing line animation.
    #[serde(default = "default_frame_delay_ms")]
    pub frame_delay_ms: u64,

    /// Delay between frames of the streaming monitor.
    #[serde(default = "default_stream_delay_ms")]
    pub stream_delay_ms: u64,

    /// Frames in the growing line animation.
    #[serde(default = "default_animation_frames")]
    pub animation_frames: usize,

    /// Frames in the streaming monitor.
    #[serde(default = "default_stream_frames")]
    pub stream_frames: usize,

    /// Samples kept on screen by the streaming monitor.
    #[serde(default = "default_stream_window")]
    pub stream_window: usize,

    /// Seed for sample data; `None` draws from entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_pause() -> bool {
    true
}
fn default_lead_in_ms() -> u64 {
    1000
}
fn default_frame_delay_ms() -> u64 {
    100
}
fn default_stream_delay_ms() -> u64 {
    150
}
fn default_animation_frames() -> usize {
    30
}
fn default_stream_frames() -> usize {
    40
}
fn default_stream_window() -> usize {
    20
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            width: None,
            height: None,
            color: TerminalMode::default(),
            pause: default_pause(),
            lead_in_ms: default_lead_in_ms(),
            frame_delay_ms: default_frame_delay_ms(),
            stream_delay_ms: default_stream_delay_ms(),
            animation_frames: default_animation_frames(),
            stream_frames: default_stream_frames(),
            stream_window: default_stream_window(),
            seed: None,
        }
    }
}

impl DemoConfig {
    /// Creates a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Settings for unattended runs: no pauses, no delays, fixed seed.
    #[must_use]
    pub fn unattended(seed: u64) -> Self {
        Self {
            pause: false,
            lead_in_ms: 0,
            frame_delay_ms: 0,
            stream_delay_ms: 0,
            seed: Some(seed),
            ..Self::default()
        }
    }

    /// Default location: `<config dir>/termplot/demo.yaml`.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("termplot").join("demo.yaml"))
    }

    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .map_err(|_| Error::ConfigNotFound(path.display().to_string()))?;

        Self::parse(&content)
    }

    /// Parses configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error with line number if parsing fails.
    pub fn parse(yaml: &str) -> Result<Self> {
        // An empty document means "all defaults".
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml_ng::from_str(yaml).map_err(|e| {
            let line = e.location().map_or(0, |l| l.line());
            Error::ConfigParse { line, message: e.to_string() }
        })
    }

    /// Loads configuration, falling back to defaults with a warning.
    #[must_use]
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(config) => config,
            Err(err) => {
                warn!(path = %path.display(), %err, "using default demo configuration");
                Self::default()
            }
        }
    }

    /// Delay after an animation's lead-in message.
    #[must_use]
    pub fn lead_in(&self) -> Duration {
        Duration::from_millis(self.lead_in_ms)
    }

    /// Delay between growing line frames.
    #[must_use]
    pub fn frame_delay(&self) -> Duration {
        Duration::from_millis(self.frame_delay_ms)
    }

    /// Delay between streaming frames.
    #[must_use]
    pub fn stream_delay(&self) -> Duration {
        Duration::from_millis(self.stream_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = DemoConfig::new();

        assert!(config.pause);
        assert_eq!(config.lead_in_ms, 1000);
        assert_eq!(config.frame_delay_ms, 100);
        assert_eq!(config.stream_delay_ms, 150);
        assert_eq!(config.animation_frames, 30);
        assert_eq!(config.stream_frames, 40);
        assert_eq!(config.stream_window, 20);
        assert_eq!(config.color, TerminalMode::TrueColor);
        assert!(config.width.is_none() && config.seed.is_none());
    }

    #[test]
    fn test_config_parse_empty() {
        assert_eq!(DemoConfig::parse("").unwrap(), DemoConfig::default());
    }

    #[test]
    fn test_config_parse_partial() {
        let config = DemoConfig::parse("pause: false\nseed: 7").unwrap();

        assert!(!config.pause);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.frame_delay_ms, 100);
    }

    #[test]
    fn test_config_parse_full() {
        let yaml = r"
width: 100
height: 30
color: ansi256
pause: false
lead_in_ms: 0
frame_delay_ms: 20
stream_delay_ms: 30
animation_frames: 5
stream_frames: 6
stream_window: 4
seed: 42
";

        let config = DemoConfig::parse(yaml).unwrap();

        assert_eq!(config.width, Some(100));
        assert_eq!(config.height, Some(30));
        assert_eq!(config.color, TerminalMode::Ansi256);
        assert_eq!(config.frame_delay(), Duration::from_millis(20));
        assert_eq!(config.stream_delay(), Duration::from_millis(30));
        assert_eq!(config.lead_in(), Duration::ZERO);
        assert_eq!((config.animation_frames, config.stream_frames, config.stream_window), (5, 6, 4));
    }

    #[test]
    fn test_config_parse_error_includes_line() {
        let yaml = r"
pause: false
frame_delay_ms: soon
";

        let err = DemoConfig::parse(yaml).unwrap_err();
        assert!(matches!(err, Error::ConfigParse { line: 3, .. }), "{err}");
        assert!(err.to_string().contains('3'));
    }

    #[test]
    fn test_config_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("demo.yaml");
        std::fs::write(&path, "color: plain\n").unwrap();

        let config = DemoConfig::load(&path).unwrap();
        assert_eq!(config.color, TerminalMode::Plain);
    }

    #[test]
    fn test_config_load_missing() {
        let err = DemoConfig::load("/nonexistent/demo.yaml").unwrap_err();
        assert!(matches!(err, Error::ConfigNotFound(_)));
    }

    #[test]
    fn test_config_load_or_default() {
        let config = DemoConfig::load_or_default("/nonexistent/path");
        assert_eq!(config, DemoConfig::default());
    }

    #[test]
    fn test_unattended_has_no_delays() {
        let config = DemoConfig::unattended(3);
        assert!(!config.pause);
        assert_eq!(config.frame_delay(), Duration::ZERO);
        assert_eq!(config.seed, Some(3));
    }

    #[test]
    fn test_default_path_ends_with_file_name() {
        if let Some(path) = DemoConfig::default_path() {
            assert!(path.ends_with("termplot/demo.yaml"));
        }
    }
}
