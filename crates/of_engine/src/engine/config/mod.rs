//! # Engine Configuration
//!
//! Every tunable probability of the iteration core in one place.
//!
//! ## Presets
//! - `realistic()` (default)
//! - `arcade()`: fewer fouls and cards, no random injuries
//! - `deterministic()`: injuries and cards disabled, for scripted tests
//!
//! ```rust
//! use of_engine::engine::config::EngineConfig;
//!
//! let config = EngineConfig::default();
//! assert!(config.validate().is_ok());
//! ```

mod movement_config;
mod rules_config;

pub use movement_config::MovementConfig;
pub use rules_config::{
    CardBands, CardConfig, DeflectionConfig, FoulConfig, FoulOdds, InjuryConfig, IntensityBand,
};

use serde::{Deserialize, Serialize};

use crate::error::{MatchError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct EngineConfig {
    #[serde(default)]
    pub injury: InjuryConfig,
    #[serde(default)]
    pub fouls: FoulConfig,
    #[serde(default)]
    pub cards: CardConfig,
    #[serde(default)]
    pub deflection: DeflectionConfig,
    #[serde(default)]
    pub movement: MovementConfig,
}

impl EngineConfig {
    pub fn realistic() -> Self {
        Self::default()
    }

    pub fn arcade() -> Self {
        let mut cfg = Self::default();
        cfg.injury.per_tick_odds = 0;
        cfg.fouls.standing.threshold = 12;
        cfg.fouls.slide.threshold = 14;
        cfg.cards.standing.yellow = IntensityBand::new(85, 95);
        cfg.cards.standing.red = IntensityBand::new(95, 100);
        cfg.cards.slide.yellow = IntensityBand::new(80, 95);
        cfg.cards.slide.red = IntensityBand::new(95, 100);
        cfg
    }

    /// No random injuries and no cards.
    pub fn deterministic() -> Self {
        let mut cfg = Self::default();
        cfg.injury.per_tick_odds = 0;
        cfg.injury.tackle_likely_odds = 0;
        cfg.injury.tackle_unlikely_odds = 0;
        let never = IntensityBand::new(100, 100);
        cfg.cards.standing = CardBands { yellow: never, red: never };
        cfg.cards.slide = CardBands { yellow: never, red: never };
        cfg
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let cfg: Self = serde_yaml::from_str(yaml)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(json).map_err(|e| MatchError::Config(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        let injury = &self.injury;
        for (name, odds) in [
            ("injury.per_tick_odds", injury.per_tick_odds),
            ("injury.tackle_likely_odds", injury.tackle_likely_odds),
            ("injury.tackle_unlikely_odds", injury.tackle_unlikely_odds),
        ] {
            if odds < 0 {
                return Err(MatchError::Config(format!("{name} must not be negative")));
            }
        }

        for (name, odds) in [("fouls.standing", self.fouls.standing), ("fouls.slide", self.fouls.slide)] {
            if odds.range <= 0 || odds.threshold < 0 {
                return Err(MatchError::Config(format!("{name} needs a positive range")));
            }
        }

        for (name, bands) in [("cards.standing", self.cards.standing), ("cards.slide", self.cards.slide)] {
            for band in [bands.yellow, bands.red] {
                if band.low > band.high || band.low < 0 || band.high > 100 {
                    return Err(MatchError::Config(format!(
                        "{name} band {}..{} must lie within 0..=100",
                        band.low, band.high
                    )));
                }
            }
        }

        let m = &self.movement;
        if m.run_fitness_decay < 0.0 || m.sprint_fitness_decay < 0.0 {
            return Err(MatchError::Config("fitness decay must not be negative".to_string()));
        }
        if m.possession_window <= 0.0 || m.ball_attraction_window <= 0.0 {
            return Err(MatchError::Config("movement windows must be positive".to_string()));
        }
        if self.deflection.possession_threshold < 0.0 {
            return Err(MatchError::Config(
                "deflection.possession_threshold must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}

// ========== Tests ==========

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.injury.per_tick_odds, 40_000);
        assert_eq!(cfg.fouls.standing, FoulOdds { range: 10, threshold: 18 });
        assert_eq!(cfg.fouls.slide, FoulOdds { range: 11, threshold: 20 });
        assert_eq!(cfg.deflection.possession_threshold, 75.0);
        assert!((cfg.movement.sprint_fitness_decay - 0.01).abs() < f64::EPSILON);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_presets_validate() {
        assert!(EngineConfig::realistic().validate().is_ok());
        assert!(EngineConfig::arcade().validate().is_ok());
        assert!(EngineConfig::deterministic().validate().is_ok());
        assert!(EngineConfig::arcade().fouls.standing.threshold < EngineConfig::default().fouls.standing.threshold);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let cfg = EngineConfig::from_yaml_str("injury:\n  per_tick_odds: 100\n  tackle_likely_odds: 10\n  tackle_unlikely_odds: 20\n  hit_value: 5\n").unwrap();
        assert_eq!(cfg.injury.per_tick_odds, 100);
        assert_eq!(cfg.fouls, FoulConfig::default());
    }

    #[test]
    fn test_invalid_band_rejected() {
        let mut cfg = EngineConfig::default();
        cfg.cards.slide.red = IntensityBand::new(90, 120);
        assert!(matches!(cfg.validate(), Err(MatchError::Config(_))));
    }

    #[test]
    fn test_json_round_trip() {
        let json = serde_json::to_string(&EngineConfig::arcade()).unwrap();
        let back = EngineConfig::from_json_str(&json).unwrap();
        assert_eq!(back, EngineConfig::arcade());
    }

    #[test]
    fn test_bad_yaml_is_config_error() {
        assert!(matches!(EngineConfig::from_yaml_str("fouls: [1, 2"), Err(MatchError::Config(_))));
    }
}
