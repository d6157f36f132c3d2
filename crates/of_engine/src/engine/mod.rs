//! # Match Iteration Engine
//!
//! [`MatchEngine`] advances a [`MatchDetails`] aggregate one tick at a time.
//!
//! ## Tick pipeline
//!
//! ```text
//! validate ─► injury roll (both teams) ─► ball in flight ──┬─► restart placed? ─► done
//!                                                         │
//!                                                         ▼
//!        closest player per team ─► kick-off team moves ─► second team moves ─► offside
//! ```
//!
//! Any dead-ball restart (throw-in, corner, goal kick, free kick, penalty, goal)
//! repositions all 22 players and the ball and sets `end_iteration`, which
//! short-circuits the rest of the tick.
//!
//! The engine owns only the random source and the tuning config; all match state
//! lives in the `MatchDetails` passed to each call.

pub mod config;
pub mod constants;
pub mod math;

mod ball_actions;
mod ball_physics;
mod boundaries;
mod decision;
mod discipline;
mod free_kicks;
mod goal;
mod injury;
mod movement;
mod offside;
mod set_pieces;
mod setup;
mod tackle;
mod validation;

pub use ball_physics::Resolution;
pub use boundaries::{Boundary, Touchline};
pub use config::EngineConfig;
pub use decision::{FieldHalf, Lane, Possession, Proximity, Situation, Weights};
pub use discipline::{issue_card, CardResult, CardType};
pub use free_kicks::FreeKickBand;
pub use tackle::{TackleKind, TackleOutcome};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::error::Result;
use crate::models::{MatchDetails, TeamSide};

pub struct MatchEngine<R: Rng = ChaCha8Rng> {
    rng: R,
    config: EngineConfig,
}

impl MatchEngine<ChaCha8Rng> {
    /// Reproducible engine: the same seed and inputs give the same ticks.
    pub fn with_seed(seed: u64) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> MatchEngine<R> {
    pub fn new(rng: R) -> Self {
        Self::with_config(rng, EngineConfig::default())
    }

    pub fn with_config(rng: R, config: EngineConfig) -> Self {
        Self { rng, config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Inclusive integer draw.
    pub(crate) fn random(&mut self, min: i64, max: i64) -> i64 {
        math::random_int(&mut self.rng, min, max)
    }

    /// Inclusive integer draw over rounded float bounds.
    pub(crate) fn random_between(&mut self, min: f64, max: f64) -> f64 {
        math::random_in(&mut self.rng, min, max)
    }

    // ===========================================
    // Tick
    // ===========================================

    /// Advance `md` by exactly one tick.
    ///
    /// `iteration_log` is replaced by this tick's events. On error the aggregate
    /// may be partially updated and should be discarded.
    pub fn play_iteration(&mut self, md: &mut MatchDetails) -> Result<()> {
        validation::validate_match(md)?;
        md.iteration_log.clear();
        md.end_iteration = false;
        md.ball_intended = None;

        for side in TeamSide::BOTH {
            self.roll_match_injury(md, side);
        }

        self.move_ball(md)?;
        if md.end_iteration {
            debug!(match_id = md.match_id, "tick ended by ball flight");
            return Ok(());
        }

        let closest = TeamSide::BOTH.map(|side| movement::closest_player_to_ball(md, side));
        for (side, nearest) in TeamSide::BOTH.into_iter().zip(closest) {
            if let Some(r) = nearest {
                let line = format!("Closest Player to ball: {}", md.player(r).name);
                md.log(line);
            }
            movement::set_intent_position(md, side, nearest);
        }

        for side in TeamSide::BOTH {
            self.decide_movement(md, side)?;
            if md.end_iteration {
                debug!(match_id = md.match_id, ?side, "tick ended by restart");
                return Ok(());
            }
        }

        if !md.ball.in_flight() || md.ball.with_team.is_some() {
            offside::check_offside(md);
        }
        Ok(())
    }
}
