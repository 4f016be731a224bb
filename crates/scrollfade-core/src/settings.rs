//! User settings
//!
//! Loaded from `~/.scrollfade/config.toml`. Every section is optional; missing
//! keys fall back to the defaults in [`crate::constants`].

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::constants::timing;
use crate::error::ConfigError;
use crate::fade::FadeConfig;
use crate::parallax::ParallaxConfig;
use crate::paths;
use crate::reveal::RevealConfig;

/// Broadcast scheduling
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingSettings {
    /// Scroll throttle window in milliseconds
    pub throttle_ms: u64,
    /// Resize settle delay in milliseconds
    pub resize_debounce_ms: u64,
    /// Frame interval in milliseconds
    pub frame_ms: u64,
}

impl Default for TimingSettings {
    fn default() -> Self {
        Self {
            throttle_ms: timing::SCROLL_THROTTLE.as_millis() as u64,
            resize_debounce_ms: timing::RESIZE_DEBOUNCE.as_millis() as u64,
            frame_ms: timing::FRAME_INTERVAL.as_millis() as u64,
        }
    }
}

impl TimingSettings {
    pub fn throttle(&self) -> Duration {
        Duration::from_millis(self.throttle_ms)
    }

    pub fn resize_debounce(&self) -> Duration {
        Duration::from_millis(self.resize_debounce_ms)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.frame_ms == 0 {
            return Err(ConfigError::ZeroDuration("frame_ms"));
        }
        Ok(())
    }
}

/// All user-tunable settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub timing: TimingSettings,
    /// Fade applied when no preset is named
    pub fade: FadeConfig,
    /// Named fade configurations
    pub presets: BTreeMap<String, FadeConfig>,
    pub reveal: RevealConfig,
    pub parallax: ParallaxConfig,
}

impl Default for Settings {
    fn default() -> Self {
        let mut presets = BTreeMap::new();
        presets.insert("hero".to_string(), FadeConfig::hero());
        presets.insert("subtle".to_string(), FadeConfig::subtle());

        Self {
            timing: TimingSettings::default(),
            fade: FadeConfig::default(),
            presets,
            reveal: RevealConfig::default(),
            parallax: ParallaxConfig::default(),
        }
    }
}

impl Settings {
    /// Load from the default config path
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&paths::config_file())
    }

    /// Load from `path`, or defaults if the file does not exist
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!(path = %path.display(), "No settings file, using defaults");
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut settings: Settings = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        // User presets extend the built-ins; a same-named user preset wins
        let user_presets = std::mem::take(&mut settings.presets);
        settings.presets = Self::default().presets;
        settings.presets.extend(user_presets);
        settings.validate()?;

        info!(
            path = %path.display(),
            presets = settings.presets.len(),
            "Loaded settings"
        );
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.timing.validate()?;
        self.fade.validate()?;
        for preset in self.presets.values() {
            preset.validate()?;
        }
        self.reveal.validate()?;
        self.parallax.validate()?;
        Ok(())
    }

    /// Fade config by name; `"default"` is the top-level `[fade]` section
    pub fn fade_preset(&self, name: &str) -> Result<FadeConfig, ConfigError> {
        if name == "default" {
            return Ok(self.fade);
        }
        self.presets
            .get(name)
            .copied()
            .ok_or_else(|| ConfigError::UnknownPreset(name.to_string()))
    }

    /// `"default"` followed by the configured presets
    pub fn preset_names(&self) -> Vec<&str> {
        std::iter::once("default")
            .chain(self.presets.keys().map(String::as_str))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let settings = Settings::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.timing.throttle(), Duration::from_millis(8));
        assert_eq!(settings.timing.resize_debounce(), Duration::from_millis(100));
        assert_eq!(settings.timing.frame_interval(), Duration::from_millis(16));
    }

    #[test]
    fn test_partial_file_merges_with_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[timing]
throttle_ms = 12

[fade]
min_opacity = 0.1

[presets.cards]
fadeInPoint = 0.8

[reveal]
once = false
"#,
        )
        .unwrap();

        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings.timing.throttle_ms, 12);
        assert_eq!(settings.timing.frame_ms, 16);
        assert_eq!(settings.fade.min_opacity, 0.1);
        assert_eq!(settings.fade.fade_in_point, 0.6);
        assert_eq!(settings.fade_preset("cards").unwrap().fade_in_point, 0.8);
        assert_eq!(settings.fade_preset("hero").unwrap(), FadeConfig::hero());
        assert!(!settings.reveal.once);
        assert_eq!(settings.reveal.threshold, 0.15);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[fade]\nfade_out_point = -1.0\n").unwrap();

        let err = Settings::load_from(&path).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                field: "fade_out_point",
                ..
            }
        ));
    }

    #[test]
    fn test_zero_frame_interval_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[timing]\nframe_ms = 0\n").unwrap();

        assert!(matches!(
            Settings::load_from(&path),
            Err(ConfigError::ZeroDuration("frame_ms"))
        ));
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[timing\nthrottle_ms = ").unwrap();

        assert!(matches!(
            Settings::load_from(&path),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_presets() {
        let settings = Settings::default();
        assert_eq!(settings.fade_preset("default").unwrap(), FadeConfig::default());
        assert_eq!(settings.fade_preset("hero").unwrap(), FadeConfig::hero());
        assert!(matches!(
            settings.fade_preset("nope"),
            Err(ConfigError::UnknownPreset(_))
        ));
        assert_eq!(settings.preset_names(), vec!["default", "hero", "subtle"]);
    }

    #[test]
    fn test_round_trips_through_toml() {
        let settings = Settings::default();
        let text = toml::to_string_pretty(&settings).unwrap();
        let parsed: Settings = toml::from_str(&text).unwrap();
        assert_eq!(parsed, settings);
    }

    #[test]
    fn test_user_preset_overrides_builtin_of_same_name() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[presets.subtle]\nmin_opacity = 0.5\n").unwrap();

        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings.fade_preset("subtle").unwrap().min_opacity, 0.5);
        assert_eq!(settings.fade_preset("hero").unwrap(), FadeConfig::hero());
        assert_eq!(settings.preset_names(), vec!["default", "hero", "subtle"]);
    }
}
