//! Runtime configuration
//!
//! Every field has a default, so a config file only needs the values it
//! overrides. Durations are written in humantime syntax (`"16ms"`).

use std::path::{Path, PathBuf};
use std::time::Duration;

use deci_core::{DeciError, DeciResult};
use deci_face::DEFAULT_RADIUS;
use serde::{Deserialize, Serialize};

use crate::OFFSET_KEY;

/// Environment variable naming a JSON config file
pub const CONFIG_ENV: &str = "DECI_CLOCK_CONFIG";

/// Decimal clock configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockConfig {
    /// Delay between frames
    #[serde(with = "duration_text")]
    pub frame_interval: Duration,
    /// Logical surface width
    pub canvas_width: f64,
    /// Logical surface height
    pub canvas_height: f64,
    /// Dial radius in surface units
    pub radius: f64,
    /// Key holding the persisted offset
    pub preference_key: String,
    /// File backing the preference store
    pub preference_path: PathBuf,
    /// `EnvFilter` directive used when `DECI_LOG` is unset
    pub log_filter: String,
    pub log_json: bool,
    /// Write logs here instead of stderr
    pub log_file: Option<PathBuf>,
}

impl Default for ClockConfig {
    fn default() -> Self {
        ClockConfig {
            frame_interval: Duration::from_millis(16),
            canvas_width: 500.0,
            canvas_height: 500.0,
            radius: DEFAULT_RADIUS,
            preference_key: OFFSET_KEY.to_string(),
            preference_path: default_preference_path(),
            log_filter: "info".to_string(),
            log_json: false,
            log_file: None,
        }
    }
}

impl ClockConfig {
    /// Load a JSON config file
    pub fn load(path: &Path) -> DeciResult<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| DeciError::Config(format!("{}: {e}", path.display())))?;
        let config: ClockConfig = serde_json::from_str(&text)
            .map_err(|e| DeciError::Config(format!("{}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    /// Config from the file named by `DECI_CLOCK_CONFIG`, or defaults
    pub fn from_env() -> DeciResult<Self> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::load(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> DeciResult<()> {
        if self.frame_interval.is_zero() {
            return Err(DeciError::Config("frame_interval must be positive".into()));
        }
        let finite = self.canvas_width.is_finite() && self.canvas_height.is_finite();
        if !(finite && self.canvas_width > 0.0 && self.canvas_height > 0.0) {
            return Err(DeciError::Config(format!(
                "canvas must be non-empty, got {}x{}",
                self.canvas_width, self.canvas_height
            )));
        }
        let max_radius = self.canvas_width.min(self.canvas_height) / 2.0;
        if !(self.radius > 0.0 && self.radius <= max_radius) {
            return Err(DeciError::Config(format!(
                "radius must be in (0, {max_radius}], got {}",
                self.radius
            )));
        }
        if self.preference_key.is_empty() {
            return Err(DeciError::Config("preference_key must not be empty".into()));
        }
        Ok(())
    }
}

/// `$XDG_CONFIG_HOME/deci-clock/preferences.json`, falling back to
/// `$HOME/.config/...` and finally the working directory
pub fn default_preference_path() -> PathBuf {
    let base = std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")));

    match base {
        Some(dir) => dir.join("deci-clock").join("preferences.json"),
        None => PathBuf::from("deci-clock-preferences.json"),
    }
}

mod duration_text {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&humantime::format_duration(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let text = String::deserialize(deserializer)?;
        humantime::parse_duration(&text).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = ClockConfig::default();
        config.validate().unwrap();
        assert_eq!(config.frame_interval, Duration::from_millis(16));
        assert_eq!(config.radius, 220.0);
        assert_eq!(config.preference_key, "decimalClockTimezone");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clock.json");
        std::fs::write(&path, r#"{ "frame_interval": "33ms", "log_json": true }"#).unwrap();

        let config = ClockConfig::load(&path).unwrap();
        assert_eq!(config.frame_interval, Duration::from_millis(33));
        assert!(config.log_json);
        assert_eq!(config.canvas_width, 500.0);
    }

    #[test]
    fn test_roundtrip_through_json() {
        let config = ClockConfig {
            frame_interval: Duration::from_millis(40),
            log_file: Some(PathBuf::from("/tmp/clock.log")),
            ..Default::default()
        };
        let text = serde_json::to_string(&config).unwrap();
        assert!(text.contains("\"40ms\""));
        let back: ClockConfig = serde_json::from_str(&text).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_radius_must_fit_canvas() {
        let config = ClockConfig {
            radius: 250.0,
            ..Default::default()
        };
        config.validate().unwrap();

        for radius in [250.5, 1e300, f64::INFINITY, f64::NAN, 0.0] {
            let config = ClockConfig {
                radius,
                ..Default::default()
            };
            assert!(config.validate().is_err(), "radius {radius}");
        }

        let config = ClockConfig {
            canvas_width: f64::INFINITY,
            radius: 1e300,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        // Bound follows the smaller side
        let config = ClockConfig {
            canvas_width: 800.0,
            canvas_height: 300.0,
            radius: 160.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clock.json");

        std::fs::write(&path, r#"{ "frame_interval": "0s" }"#).unwrap();
        assert!(matches!(ClockConfig::load(&path), Err(DeciError::Config(_))));

        std::fs::write(&path, r#"{ "frame_interval": "soon" }"#).unwrap();
        assert!(matches!(ClockConfig::load(&path), Err(DeciError::Config(_))));

        std::fs::write(&path, r#"{ "radius": -1.0 }"#).unwrap();
        assert!(ClockConfig::load(&path).is_err());

        std::fs::write(&path, r#"{ "radius": 1e300 }"#).unwrap();
        assert!(matches!(ClockConfig::load(&path), Err(DeciError::Config(_))));

        assert!(ClockConfig::load(&dir.path().join("missing.json")).is_err());
    }
}
