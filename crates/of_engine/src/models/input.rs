//! Roster documents accepted by match setup.
//!
//! These are the already-parsed shapes the I/O layer hands to
//! [`crate::MatchEngine::initiate_game`]. Loading them from disk is the caller's job.

use serde::{Deserialize, Serialize};

use super::pitch::Point;
use super::player::{Role, Skill};

fn full_fitness() -> f64 {
    100.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerInput {
    pub name: String,
    pub position: Role,
    pub rating: f64,
    pub skill: Skill,
    /// Formation slot, expressed for a team defending the top end.
    pub current_pos: Point,
    #[serde(default = "full_fitness")]
    pub fitness: f64,
    #[serde(default)]
    pub injured: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamInput {
    pub name: String,
    pub players: Vec<PlayerInput>,
}
