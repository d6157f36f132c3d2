//! Movement and fitness settings.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MovementConfig {
    /// Fitness only decays while above the floor.
    pub run_fitness_floor: f64,
    pub run_fitness_decay: f64,
    pub sprint_fitness_floor: f64,
    pub sprint_fitness_decay: f64,
    /// Run/sprint steps head for the ball inside this window on both axes.
    pub ball_attraction_window: f64,
    /// Possession is taken within this window on both axes (strict).
    pub possession_window: f64,
    /// Fitness restored at half time, capped at 100.
    #[serde(default = "default_half_time_recovery")]
    pub half_time_recovery: f64,
}

fn default_half_time_recovery() -> f64 {
    40.0
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            run_fitness_floor: 20.0,
            run_fitness_decay: 0.005,
            sprint_fitness_floor: 30.0,
            sprint_fitness_decay: 0.01,
            ball_attraction_window: 60.0,
            possession_window: 3.0,
            half_time_recovery: default_half_time_recovery(),
        }
    }
}
