use serde::{Deserialize, Serialize};

use super::pitch::{Pitch, PitchEnd};
use super::player::{Player, Role, Tally};
use super::{PlayerId, TeamId};

pub const SQUAD_SIZE: usize = 11;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    Attack,
    #[default]
    Defend,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub name: String,
    pub team_id: TeamId,
    pub players: Vec<Player>,
    #[serde(default)]
    pub intent: Intent,
}

impl Team {
    /// The end this team defends, read from the goalkeeper slot.
    pub fn defended_end(&self, pitch: &Pitch) -> PitchEnd {
        match self.players.first() {
            Some(gk) => gk.defended_end(pitch),
            None => PitchEnd::Top,
        }
    }

    pub fn attacked_end(&self, pitch: &Pitch) -> PitchEnd {
        self.defended_end(pitch).opposite()
    }

    pub fn index_of(&self, player_id: PlayerId) -> Option<usize> {
        self.players.iter().position(|p| p.player_id == player_id)
    }

    pub fn goalkeeper_index(&self) -> Option<usize> {
        self.players.iter().position(|p| p.position == Role::GK)
    }

    pub fn holder_index(&self) -> Option<usize> {
        self.players.iter().position(|p| p.has_ball)
    }

    /// `preferred` if still on the pitch, otherwise the closest-indexed outfield
    /// player who is.
    pub fn available_taker(&self, preferred: usize) -> Option<usize> {
        if self.players.get(preferred).is_some_and(|p| !p.is_sent_off()) {
            return Some(preferred);
        }
        (1..self.players.len())
            .filter(|&i| !self.players[i].is_sent_off())
            .min_by_key(|&i| i.abs_diff(preferred))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamStatistics {
    pub goals: u32,
    pub shots: Tally,
    pub corners: u32,
    pub freekicks: u32,
    pub penalties: u32,
    pub fouls: u32,
}

#[cfg(test)]
mod tests {
    use crate::models::PitchEnd;
    use crate::test_fixtures::{sample_pitch, test_team};

    #[test]
    fn test_defended_end_follows_goalkeeper_origin() {
        let pitch = sample_pitch();
        let team = test_team("Top", 1, false);
        assert_eq!(team.defended_end(&pitch), PitchEnd::Top);
        let mirrored = test_team("Bottom", 2, true);
        assert_eq!(mirrored.defended_end(&pitch), PitchEnd::Bottom);
    }

    #[test]
    fn test_available_taker_falls_back_to_nearest_index() {
        let mut team = test_team("Top", 1, false);
        assert_eq!(team.available_taker(5), Some(5));
        team.players[5].send_off();
        team.players[4].send_off();
        assert_eq!(team.available_taker(5), Some(6));
    }
}
