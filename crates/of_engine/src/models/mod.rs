//! Match data model: pitch, players, teams, ball and the match aggregate.

pub mod action;
pub mod ball;
pub mod input;
pub mod match_details;
pub mod pitch;
pub mod player;
pub mod team;

pub use action::Action;
pub use ball::{Ball, BallDirection, BallPosition, LastTouch, SubTick};
pub use input::{PlayerInput, TeamInput};
pub use match_details::{MatchDetails, PlayerRef, TeamSide};
pub use pitch::{Pitch, PitchEnd, Point};
pub use player::{
    Cards, PitchPosition, Player, PlayerStats, Role, RoleClass, Skill, TackleTally, Tally,
};
pub use team::{Intent, Team, TeamStatistics, SQUAD_SIZE};

pub type PlayerId = u64;
pub type TeamId = u64;
