//! Match setup and half time.

use std::collections::HashSet;

use rand::Rng;
use tracing::{debug, info};

use super::validation::{validate_match, validate_pitch, validate_team_input};
use super::MatchEngine;
use crate::error::Result;
use crate::models::{
    Ball, Intent, MatchDetails, Pitch, Player, Point, Team, TeamInput, TeamSide, TeamStatistics,
};

const MAX_ID: i64 = 999_999_999;

fn mirror_y(pitch: &Pitch, p: Point) -> Point {
    Point::new(p.x, pitch.height - p.y)
}

/// Flip a team to the other end: formation slots, intents and current positions.
fn mirror_team(team: &mut Team, pitch: &Pitch) {
    for player in &mut team.players {
        player.origin_pos = mirror_y(pitch, player.origin_pos);
        player.intent_pos = mirror_y(pitch, player.intent_pos);
        if let Some(at) = player.on_pitch() {
            player.relocate(mirror_y(pitch, at));
        }
    }
}

impl<R: Rng> MatchEngine<R> {
    fn fresh_id(&mut self, used: &mut HashSet<u64>) -> u64 {
        loop {
            let id = self.random(1, MAX_ID) as u64;
            if used.insert(id) {
                return id;
            }
        }
    }

    /// Roster to team, with formation slots normalised to the top end.
    fn build_team(&mut self, input: TeamInput, pitch: &Pitch, ids: &mut HashSet<u64>) -> Team {
        let team_id = self.fresh_id(ids);
        let from_bottom = input.players[0].current_pos.y > pitch.height / 2.0;
        let players = input
            .players
            .into_iter()
            .map(|p| {
                let slot = if from_bottom { mirror_y(pitch, p.current_pos) } else { p.current_pos };
                let mut player = Player::new(p.name, self.fresh_id(ids), p.position, p.skill, slot);
                player.rating = p.rating;
                player.fitness = p.fitness;
                player.injured = p.injured;
                player
            })
            .collect();
        Team { name: input.name, team_id, players, intent: Intent::Defend }
    }

    /// Build a ready-to-play match from two rosters.
    ///
    /// The kick-off team is drawn at random and defends the top end; the other
    /// team is mirrored to the bottom. The log holds exactly the two team lines.
    pub fn initiate_game(&mut self, team1: TeamInput, team2: TeamInput, pitch: Pitch) -> Result<MatchDetails> {
        validate_pitch(&pitch)?;
        validate_team_input(&team1)?;
        validate_team_input(&team2)?;

        let mut ids = HashSet::new();
        let match_id = self.fresh_id(&mut ids);
        let first = self.build_team(team1, &pitch, &mut ids);
        let second = self.build_team(team2, &pitch, &mut ids);
        let (mut kick_off_team, mut second_team) =
            if self.random(0, 1) == 0 { (first, second) } else { (second, first) };
        mirror_team(&mut second_team, &pitch);
        kick_off_team.intent = Intent::Attack;
        second_team.intent = Intent::Defend;

        let mut md = MatchDetails {
            match_id,
            kick_off_team,
            second_team,
            kick_off_team_statistics: TeamStatistics::default(),
            second_team_statistics: TeamStatistics::default(),
            pitch,
            ball: Ball::at(pitch.centre()),
            half: 1,
            iteration_log: Vec::new(),
            end_iteration: false,
            ball_intended: None,
        };
        md.log(format!("Team to kick off - {}", md.kick_off_team.name));
        md.log(format!("Second team - {}", md.second_team.name));
        self.kick_off_restart(&mut md, TeamSide::KickOff);

        info!(
            match_id,
            kick_off = %md.kick_off_team.name,
            second = %md.second_team.name,
            "match initiated"
        );
        Ok(md)
    }

    /// Swap ends, restore some fitness, and restart with the second team on the ball.
    pub fn start_second_half(&mut self, md: &mut MatchDetails) -> Result<()> {
        validate_match(md)?;
        let pitch = md.pitch;
        let recovery = self.config.movement.half_time_recovery;

        for side in TeamSide::BOTH {
            mirror_team(md.team_mut(side), &pitch);
        }
        for player in md.all_players_mut() {
            player.fitness = (player.fitness + recovery).min(100.0);
        }
        md.ball.ball_over_iterations.clear();
        md.ball.set_position(pitch.centre());
        md.ball_intended = None;
        md.end_iteration = false;
        self.reset_player_positions(md);
        self.kick_off_restart(md, TeamSide::Second);

        md.iteration_log.clear();
        md.log(format!("Second Half Started: {} to kick offs", md.second_team.name));
        md.half = md.half.saturating_add(1);
        debug!(match_id = md.match_id, half = md.half, "second half");
        Ok(())
    }
}
