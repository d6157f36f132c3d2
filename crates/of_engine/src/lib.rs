//! # of_engine - Tick-by-tick Football Match Iteration Core
//!
//! Advances a match one discrete tick at a time. Callers own the match state
//! (a [`MatchDetails`] document) between ticks and hand it back for the next.
//!
//! ## Features
//! - Seeded, reproducible ticks (same seed + same document = same tick)
//! - Ball flight, passing, shooting, tackling, fouls, cards and injuries
//! - Restarts: kick-off, throw-in, corner, goal kick, free kick, penalty
//! - JSON entry points in [`api`]
//!
//! ```rust
//! use of_engine::MatchEngine;
//!
//! let engine = MatchEngine::with_seed(7);
//! assert!(engine.config().validate().is_ok());
//! ```

// Struct initialization pattern used intentionally
#![allow(clippy::field_reassign_with_default)]
// Engine helpers thread match state, pitch and player refs together
#![allow(clippy::too_many_arguments)]

pub mod api;
pub mod engine;
pub mod error;
pub mod models;

#[cfg(test)]
mod test_fixtures;


pub use engine::{EngineConfig, MatchEngine};
pub use error::{MatchError, Result};
pub use models::{
    Action, Ball, MatchDetails, Pitch, PitchEnd, Player, PlayerInput, PlayerRef, Point, Role, Team,
    TeamInput, TeamSide,
};
