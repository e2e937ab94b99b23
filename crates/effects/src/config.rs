//! Tunables for the animated backdrop
//!
//! Defaults reproduce the stock controller look. Pages can override any
//! subset through JSON (`window.BATTBRRR_CONFIG.effects`), missing keys keep
//! their defaults.

use serde::{Deserialize, Serialize};

use crate::error::{EffectsError, Result};

/// Upper bound for `filamentCount` and `sparkCount`
pub const MAX_POPULATION: usize = 1000;

/// Colours used for each particle population
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Palette {
    pub filament: String,
    pub pulse: String,
    pub spark: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            filament: "rgba(57, 198, 255, 0.75)".to_string(),
            pulse: "rgba(122, 92, 255, 0.65)".to_string(),
            spark: "rgba(255, 122, 24, 0.65)".to_string(),
        }
    }
}

/// Backdrop configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EffectsConfig {
    pub filament_count: usize,
    pub spark_count: usize,
    /// Minimum animation time between two pulse spawns
    pub pulse_gap_ms: f64,
    /// Spawns are skipped while this many pulses are still expanding
    pub max_live_pulses: usize,
    pub palette: Palette,
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            filament_count: 10,
            spark_count: 8,
            pulse_gap_ms: 2200.0,
            max_live_pulses: 64,
            palette: Palette::default(),
        }
    }
}

impl EffectsConfig {
    /// Parse overrides from a JSON object and validate them
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.pulse_gap_ms.is_finite() || self.pulse_gap_ms <= 0.0 {
            return Err(EffectsError::Config(format!(
                "pulseGapMs must be a positive number, got {}",
                self.pulse_gap_ms
            )));
        }
        if self.max_live_pulses == 0 {
            return Err(EffectsError::Config("maxLivePulses must be at least 1".to_string()));
        }
        for (key, count) in [("filamentCount", self.filament_count), ("sparkCount", self.spark_count)] {
            if count > MAX_POPULATION {
                return Err(EffectsError::Config(format!(
                    "{key} must be at most {MAX_POPULATION}, got {count}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EffectsConfig::default();
        assert_eq!(config.filament_count, 10);
        assert_eq!(config.spark_count, 8);
        assert!((config.pulse_gap_ms - 2200.0).abs() < f64::EPSILON);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let config = EffectsConfig::from_json(r#"{"sparkCount": 3, "palette": {"spark": "red"}}"#)
            .expect("valid override");
        assert_eq!(config.spark_count, 3);
        assert_eq!(config.filament_count, 10);
        assert_eq!(config.palette.spark, "red");
        assert_eq!(config.palette.pulse, Palette::default().pulse);
    }

    #[test]
    fn test_rejects_non_positive_gap() {
        let err = EffectsConfig::from_json(r#"{"pulseGapMs": 0}"#).unwrap_err();
        assert!(matches!(err, EffectsError::Config(_)));
    }

    #[test]
    fn test_rejects_oversized_populations() {
        for json in [r#"{"sparkCount": 4000000000}"#, r#"{"filamentCount": 1001}"#] {
            let err = EffectsConfig::from_json(json).unwrap_err();
            assert!(matches!(err, EffectsError::Config(_)), "{json}");
        }

        let config = EffectsConfig::from_json(r#"{"filamentCount": 1000, "sparkCount": 0}"#)
            .expect("cap is inclusive");
        assert_eq!(config.filament_count, MAX_POPULATION);
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = EffectsConfig::from_json("{sparkCount").unwrap_err();
        assert!(matches!(err, EffectsError::Json(_)));
    }
}
