//! Test Fixtures Module
//!
//! Shared builders for pitches, players, teams and match states used by the
//! unit tests across the crate.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::engine::MatchEngine;
use crate::models::{
    Ball, Intent, MatchDetails, Pitch, Player, PlayerInput, Point, Role, Skill, Team, TeamInput,
    TeamStatistics,
};

// =============================================================================
// Geometry
// =============================================================================

pub fn sample_pitch() -> Pitch {
    Pitch::new(680.0, 1050.0, 90.0)
}

/// 4-4-2 slots for a team defending the top end of [`sample_pitch`].
pub fn formation_442() -> [(Role, Point); 11] {
    [
        (Role::GK, Point::new(340.0, 0.0)),
        (Role::LB, Point::new(80.0, 80.0)),
        (Role::CB, Point::new(230.0, 80.0)),
        (Role::CB, Point::new(450.0, 80.0)),
        (Role::RB, Point::new(600.0, 80.0)),
        (Role::LM, Point::new(80.0, 270.0)),
        (Role::CM, Point::new(230.0, 270.0)),
        (Role::CM, Point::new(450.0, 270.0)),
        (Role::RM, Point::new(600.0, 270.0)),
        (Role::ST, Point::new(280.0, 500.0)),
        (Role::ST, Point::new(440.0, 500.0)),
    ]
}

// =============================================================================
// Players and Teams
// =============================================================================

pub fn default_skill(role: Role) -> Skill {
    Skill {
        passing: 60.0,
        shooting: 55.0,
        tackling: 50.0,
        saving: if role == Role::GK { 80.0 } else { 10.0 },
        agility: 55.0,
        strength: 60.0,
        penalty_taking: 55.0,
        jumping: 60.0,
    }
}

pub fn player_at(name: &str, role: Role, x: f64, y: f64) -> Player {
    let mut player = Player::new(name, 0, role, default_skill(role), Point::new(x, y));
    player.rating = 70.0;
    player
}

/// Eleven players in a 4-4-2. `mirrored` puts the team at the bottom end.
pub fn test_team(name: &str, team_id: u64, mirrored: bool) -> Team {
    let pitch = sample_pitch();
    let players = formation_442()
        .iter()
        .enumerate()
        .map(|(i, (role, slot))| {
            let y = if mirrored { pitch.height - slot.y } else { slot.y };
            let mut player = player_at(&format!("{} Player {}", name, i + 1), *role, slot.x, y);
            player.player_id = team_id * 100 + i as u64;
            player
        })
        .collect();

    Team {
        name: name.to_string(),
        team_id,
        players,
        intent: if mirrored { Intent::Defend } else { Intent::Attack },
    }
}

pub fn team_input(name: &str) -> TeamInput {
    TeamInput {
        name: name.to_string(),
        players: formation_442()
            .iter()
            .enumerate()
            .map(|(i, (role, slot))| PlayerInput {
                name: format!("{} Player {}", name, i + 1),
                position: *role,
                rating: 70.0,
                skill: default_skill(*role),
                current_pos: *slot,
                fitness: 100.0,
                injured: false,
            })
            .collect(),
    }
}

// =============================================================================
// Match States
// =============================================================================

/// Kick-off team ("Home", id 1) defends the top, second team ("Away", id 2) the
/// bottom. Ball loose on the centre spot, first half.
pub fn sample_match() -> MatchDetails {
    let pitch = sample_pitch();
    MatchDetails {
        match_id: 7,
        kick_off_team: test_team("Home", 1, false),
        second_team: test_team("Away", 2, true),
        kick_off_team_statistics: TeamStatistics::default(),
        second_team_statistics: TeamStatistics::default(),
        pitch,
        ball: Ball::at(pitch.centre()),
        half: 1,
        iteration_log: Vec::new(),
        end_iteration: false,
        ball_intended: None,
    }
}

pub fn seeded_engine(seed: u64) -> MatchEngine<ChaCha8Rng> {
    MatchEngine::new(ChaCha8Rng::seed_from_u64(seed))
}

/// Count players currently on the pitch in both teams.
pub fn players_on_pitch(md: &MatchDetails) -> usize {
    md.kick_off_team
        .players
        .iter()
        .chain(md.second_team.players.iter())
        .filter(|p| !p.is_sent_off())
        .count()
}
