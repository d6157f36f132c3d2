//! Probabilities for injuries, fouls, cards and deflections.

use serde::{Deserialize, Serialize};

/// Injury odds. A roll of `random(0, odds) == hit_value` injures the player.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InjuryConfig {
    /// Per-tick roll applied to one random squad member of each team.
    pub per_tick_odds: i64,
    /// Tackle contact, for the player more likely to get hurt.
    pub tackle_likely_odds: i64,
    /// Tackle contact, for the player less likely to get hurt.
    pub tackle_unlikely_odds: i64,
    pub hit_value: i64,
}

impl Default for InjuryConfig {
    fn default() -> Self {
        Self {
            per_tick_odds: 40_000,
            tackle_likely_odds: 1_400,
            tackle_unlikely_odds: 1_500,
            hit_value: 23,
        }
    }
}

/// `wasFoul(range, threshold)`: draw `random(0, range)`, foul if `0 < draw < threshold/2 - 1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FoulOdds {
    pub range: i64,
    pub threshold: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FoulConfig {
    pub standing: FoulOdds,
    pub slide: FoulOdds,
}

impl Default for FoulConfig {
    fn default() -> Self {
        Self {
            standing: FoulOdds { range: 10, threshold: 18 },
            slide: FoulOdds { range: 11, threshold: 20 },
        }
    }
}

/// Open interval on the foul-intensity roll.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntensityBand {
    pub low: i64,
    pub high: i64,
}

impl IntensityBand {
    pub const fn new(low: i64, high: i64) -> Self {
        Self { low, high }
    }

    pub fn contains(&self, intensity: i64) -> bool {
        intensity > self.low && intensity < self.high
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CardBands {
    pub yellow: IntensityBand,
    pub red: IntensityBand,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CardConfig {
    pub standing: CardBands,
    pub slide: CardBands,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            standing: CardBands {
                yellow: IntensityBand::new(75, 90),
                red: IntensityBand::new(90, 100),
            },
            slide: CardBands {
                yellow: IntensityBand::new(65, 90),
                red: IntensityBand::new(85, 100),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeflectionConfig {
    /// Below this remaining power the deflecting player keeps the ball.
    pub possession_threshold: f64,
}

impl Default for DeflectionConfig {
    fn default() -> Self {
        Self { possession_threshold: 75.0 }
    }
}
