//! Fade tuning parameters

use serde::{Deserialize, Serialize};

use crate::constants::fade;
use crate::error::ConfigError;

/// Immutable per-element fade tuning
///
/// Accepts both `fade_out_point` and `fadeOutPoint` style keys.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FadeConfig {
    /// Fraction of the viewport height over which the exit fade runs
    #[serde(alias = "fadeOutPoint")]
    pub fade_out_point: f64,
    /// Fraction of the viewport height over which the entry fade runs
    #[serde(alias = "fadeInPoint")]
    pub fade_in_point: f64,
    /// Kept for config compatibility; does not affect the exit curve
    #[serde(alias = "fadeOutDuration")]
    pub fade_out_duration: f64,
    /// Multiplier on the entry ratio (higher = reaches full opacity sooner)
    #[serde(alias = "fadeInDuration")]
    pub fade_in_duration: f64,
    /// Opacity before the element enters the viewport
    #[serde(alias = "initialOpacity")]
    pub initial_opacity: f64,
    /// Floor once the element is visible or scrolled past
    #[serde(alias = "minOpacity")]
    pub min_opacity: f64,
}

impl Default for FadeConfig {
    fn default() -> Self {
        Self {
            fade_out_point: fade::FADE_OUT_POINT,
            fade_in_point: fade::FADE_IN_POINT,
            fade_out_duration: fade::FADE_OUT_DURATION,
            fade_in_duration: fade::FADE_IN_DURATION,
            initial_opacity: fade::INITIAL_OPACITY,
            min_opacity: fade::MIN_OPACITY,
        }
    }
}

impl FadeConfig {
    /// A gentler curve: stays brighter, never fully hidden
    pub fn subtle() -> Self {
        Self {
            fade_out_point: 0.35,
            fade_in_point: 0.4,
            fade_in_duration: 1.5,
            initial_opacity: 0.3,
            min_opacity: 0.3,
            ..Self::default()
        }
    }

    /// Large headline sections: quick entry, long exit
    pub fn hero() -> Self {
        Self {
            fade_out_point: 0.8,
            fade_in_point: 0.3,
            fade_in_duration: 2.0,
            initial_opacity: 0.0,
            min_opacity: 0.1,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("fade_out_point", self.fade_out_point)?;
        positive("fade_in_point", self.fade_in_point)?;
        non_negative("fade_out_duration", self.fade_out_duration)?;
        non_negative("fade_in_duration", self.fade_in_duration)?;
        unit("initial_opacity", self.initial_opacity)?;
        unit("min_opacity", self.min_opacity)?;
        Ok(())
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            field,
            value,
            reason: "must be a positive number",
        })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            field,
            value,
            reason: "must be zero or greater",
        })
    }
}

pub(crate) fn unit(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            field,
            value,
            reason: "must be between 0 and 1",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FadeConfig::default();
        assert_eq!(config.fade_out_point, 0.5);
        assert_eq!(config.fade_in_point, 0.6);
        assert_eq!(config.fade_out_duration, 1.5);
        assert_eq!(config.fade_in_duration, 1.0);
        assert_eq!(config.initial_opacity, 0.0);
        assert_eq!(config.min_opacity, 0.05);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builtin_presets_are_valid() {
        assert!(FadeConfig::subtle().validate().is_ok());
        assert!(FadeConfig::hero().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_fade_point() {
        let config = FadeConfig {
            fade_in_point: 0.0,
            ..FadeConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("fade_in_point"));
    }

    #[test]
    fn test_validate_rejects_opacity_out_of_range() {
        let config = FadeConfig {
            min_opacity: 1.5,
            ..FadeConfig::default()
        };
        assert!(config.validate().is_err());

        let config = FadeConfig {
            initial_opacity: f64::NAN,
            ..FadeConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_camel_case_keys_accepted() {
        let config: FadeConfig = toml::from_str(
            "fadeOutPoint = 0.4\nfadeInPoint = 0.7\nminOpacity = 0.1\n",
        )
        .unwrap();
        assert_eq!(config.fade_out_point, 0.4);
        assert_eq!(config.fade_in_point, 0.7);
        assert_eq!(config.min_opacity, 0.1);
        assert_eq!(config.fade_in_duration, 1.0);
    }
}
