use serde::{Deserialize, Serialize};

use super::ball::{Ball, LastTouch};
use super::pitch::{Pitch, Point};
use super::player::Player;
use super::team::{Intent, Team, TeamStatistics};
use super::{PlayerId, TeamId};

/// Which of the two match teams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamSide {
    KickOff,
    Second,
}

impl TeamSide {
    pub const BOTH: [TeamSide; 2] = [TeamSide::KickOff, TeamSide::Second];

    pub fn opponent(self) -> Self {
        match self {
            TeamSide::KickOff => TeamSide::Second,
            TeamSide::Second => TeamSide::KickOff,
        }
    }
}

/// Address of one player inside [`MatchDetails`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlayerRef {
    pub side: TeamSide,
    pub index: usize,
}

impl PlayerRef {
    pub const fn new(side: TeamSide, index: usize) -> Self {
        Self { side, index }
    }
}

/// Aggregate root for one match. Mutated in place by every tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchDetails {
    pub match_id: u64,
    pub kick_off_team: Team,
    pub second_team: Team,
    #[serde(default)]
    pub kick_off_team_statistics: TeamStatistics,
    #[serde(default)]
    pub second_team_statistics: TeamStatistics,
    pub pitch: Pitch,
    pub ball: Ball,
    pub half: u8,
    #[serde(default)]
    pub iteration_log: Vec<String>,
    /// Set when a dead-ball restart has fully determined this tick.
    #[serde(skip)]
    pub end_iteration: bool,
    /// Accepted in-play ball target handed back by the boundary check.
    #[serde(skip)]
    pub ball_intended: Option<Point>,
}

impl MatchDetails {
    pub fn team(&self, side: TeamSide) -> &Team {
        match side {
            TeamSide::KickOff => &self.kick_off_team,
            TeamSide::Second => &self.second_team,
        }
    }

    pub fn team_mut(&mut self, side: TeamSide) -> &mut Team {
        match side {
            TeamSide::KickOff => &mut self.kick_off_team,
            TeamSide::Second => &mut self.second_team,
        }
    }

    pub fn statistics(&self, side: TeamSide) -> &TeamStatistics {
        match side {
            TeamSide::KickOff => &self.kick_off_team_statistics,
            TeamSide::Second => &self.second_team_statistics,
        }
    }

    pub fn statistics_mut(&mut self, side: TeamSide) -> &mut TeamStatistics {
        match side {
            TeamSide::KickOff => &mut self.kick_off_team_statistics,
            TeamSide::Second => &mut self.second_team_statistics,
        }
    }

    pub fn side_of(&self, team_id: TeamId) -> Option<TeamSide> {
        TeamSide::BOTH.into_iter().find(|&side| self.team(side).team_id == team_id)
    }

    pub fn player(&self, r: PlayerRef) -> &Player {
        &self.team(r.side).players[r.index]
    }

    pub fn player_mut(&mut self, r: PlayerRef) -> &mut Player {
        &mut self.team_mut(r.side).players[r.index]
    }

    pub fn find_player(&self, player_id: PlayerId) -> Option<PlayerRef> {
        TeamSide::BOTH.into_iter().find_map(|side| {
            self.team(side).index_of(player_id).map(|index| PlayerRef::new(side, index))
        })
    }

    /// Current ball holder, if any.
    pub fn holder(&self) -> Option<PlayerRef> {
        self.ball.player.and_then(|id| self.find_player(id))
    }

    pub fn log(&mut self, line: impl Into<String>) {
        self.iteration_log.push(line.into());
    }

    pub fn all_players_mut(&mut self) -> impl Iterator<Item = &mut Player> {
        self.kick_off_team.players.iter_mut().chain(self.second_team.players.iter_mut())
    }

    pub fn remove_ball_from_all_players(&mut self) {
        for player in self.all_players_mut() {
            player.has_ball = false;
        }
    }

    /// Record `r` as the last player to touch the ball, without giving possession.
    pub fn record_touch(&mut self, r: PlayerRef) {
        let team_id = self.team(r.side).team_id;
        let player = self.player(r);
        self.ball.last_touch = LastTouch {
            player_name: player.name.clone(),
            player_id: Some(player.player_id),
            team_id: Some(team_id),
        };
    }

    /// Side of the last toucher, defaulting to the kick-off team before any touch.
    pub fn last_touch_side(&self) -> TeamSide {
        self.ball
            .last_touch
            .team_id
            .and_then(|id| self.side_of(id))
            .unwrap_or(TeamSide::KickOff)
    }

    /// Hand the ball to `r`: possession, last touch, and the ball on their feet.
    /// Any pending flight is discarded and the team intents follow possession.
    pub fn give_ball_to(&mut self, r: PlayerRef) {
        self.remove_ball_from_all_players();
        self.team_mut(r.side).intent = Intent::Attack;
        self.team_mut(r.side.opponent()).intent = Intent::Defend;
        let team_id = self.team(r.side).team_id;
        let player = self.player_mut(r);
        player.has_ball = true;
        let id = player.player_id;
        let pos = player.on_pitch();

        self.ball.with_player = true;
        self.ball.player = Some(id);
        self.ball.with_team = Some(team_id);
        self.record_touch(r);
        self.ball.ball_over_iterations.clear();
        if let Some(p) = pos {
            self.ball.set_position(p);
        }
    }
}
