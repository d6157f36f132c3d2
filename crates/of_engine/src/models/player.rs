use serde::{Deserialize, Serialize};

use super::pitch::{Pitch, PitchEnd, Point};
use super::PlayerId;
use crate::error::{MatchError, Result};

/// Playing role. Index 0 of every squad is the goalkeeper by convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    GK,
    CB,
    LB,
    RB,
    CM,
    LM,
    RM,
    ST,
}

/// Coarse role grouping used by the set-piece recipes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoleClass {
    Goalkeeper,
    CentreBack,
    FullBack,
    Midfielder,
    Forward,
}

impl Role {
    pub fn is_goalkeeper(self) -> bool {
        self == Role::GK
    }

    pub fn class(self) -> RoleClass {
        match self {
            Role::GK => RoleClass::Goalkeeper,
            Role::CB => RoleClass::CentreBack,
            Role::LB | Role::RB => RoleClass::FullBack,
            Role::CM | Role::LM | Role::RM => RoleClass::Midfielder,
            Role::ST => RoleClass::Forward,
        }
    }
}

/// Skill attributes, roughly 0-100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub passing: f64,
    pub shooting: f64,
    pub tackling: f64,
    pub saving: f64,
    pub agility: f64,
    pub strength: f64,
    pub penalty_taking: f64,
    pub jumping: f64,
}

/// Where a player is. `SentOff` is terminal: there is no way back to the pitch.
///
/// Serialized as `[x, y]` or the string `"NP"`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PositionRepr", into = "PositionRepr")]
pub enum PitchPosition {
    OnPitch(Point),
    SentOff,
}

pub const NOT_PLAYING: &str = "NP";

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum PositionRepr {
    Coord([f64; 2]),
    Marker(String),
}

impl TryFrom<PositionRepr> for PitchPosition {
    type Error = String;

    fn try_from(repr: PositionRepr) -> std::result::Result<Self, Self::Error> {
        match repr {
            PositionRepr::Coord(c) => Ok(PitchPosition::OnPitch(c.into())),
            PositionRepr::Marker(m) if m == NOT_PLAYING => Ok(PitchPosition::SentOff),
            PositionRepr::Marker(m) => Err(format!("invalid position marker: {m}")),
        }
    }
}

impl From<PitchPosition> for PositionRepr {
    fn from(pos: PitchPosition) -> Self {
        match pos {
            PitchPosition::OnPitch(p) => PositionRepr::Coord(p.into()),
            PitchPosition::SentOff => PositionRepr::Marker(NOT_PLAYING.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub total: u32,
    pub on: u32,
    pub off: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TackleTally {
    pub total: u32,
    pub on: u32,
    pub off: u32,
    pub fouls: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cards {
    pub yellow: u32,
    pub red: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub goals: u32,
    pub shots: Tally,
    pub passes: Tally,
    pub tackles: TackleTally,
    pub cards: Cards,
    pub saves: u32,
}

fn default_action() -> String {
    "none".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub player_id: PlayerId,
    pub position: Role,
    pub rating: f64,
    pub skill: Skill,
    pub fitness: f64,
    /// Private so that `SentOff` stays terminal; see [`Player::relocate`].
    current_pos: PitchPosition,
    pub origin_pos: Point,
    pub intent_pos: Point,
    #[serde(default)]
    pub has_ball: bool,
    #[serde(default)]
    pub offside: bool,
    #[serde(default)]
    pub injured: bool,
    /// Externally supplied action override, `"none"` when absent.
    #[serde(default = "default_action")]
    pub action: String,
    #[serde(default)]
    pub stats: PlayerStats,
}

impl Player {
    /// Fresh player standing on its formation slot.
    pub fn new(name: impl Into<String>, player_id: PlayerId, position: Role, skill: Skill, slot: Point) -> Self {
        Self {
            name: name.into(),
            player_id,
            position,
            rating: 0.0,
            skill,
            fitness: 100.0,
            current_pos: PitchPosition::OnPitch(slot),
            origin_pos: slot,
            intent_pos: slot,
            has_ball: false,
            offside: false,
            injured: false,
            action: default_action(),
            stats: PlayerStats::default(),
        }
    }

    pub fn pitch_position(&self) -> PitchPosition {
        self.current_pos
    }

    pub fn on_pitch(&self) -> Option<Point> {
        match self.current_pos {
            PitchPosition::OnPitch(p) => Some(p),
            PitchPosition::SentOff => None,
        }
    }

    /// Current position, failing for a sent-off player.
    pub fn current(&self) -> Result<Point> {
        self.on_pitch().ok_or_else(|| MatchError::PlayerSentOff { name: self.name.clone() })
    }

    pub fn is_sent_off(&self) -> bool {
        self.current_pos == PitchPosition::SentOff
    }

    fn position_mut(&mut self) -> Option<&mut Point> {
        match &mut self.current_pos {
            PitchPosition::OnPitch(p) => Some(p),
            PitchPosition::SentOff => None,
        }
    }

    /// Move the player; ignored once sent off.
    pub fn relocate(&mut self, to: Point) {
        if let Some(pos) = self.position_mut() {
            *pos = to;
        }
    }

    pub fn send_off(&mut self) {
        self.current_pos = PitchPosition::SentOff;
        self.has_ball = false;
        self.offside = false;
    }

    /// The end this player's formation slot defends.
    pub fn defended_end(&self, pitch: &Pitch) -> PitchEnd {
        if self.origin_pos.y < pitch.height / 2.0 {
            PitchEnd::Top
        } else {
            PitchEnd::Bottom
        }
    }

    /// The end this player is attacking.
    pub fn attacked_end(&self, pitch: &Pitch) -> PitchEnd {
        self.defended_end(pitch).opposite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::player_at;

    #[test]
    fn test_sent_off_serializes_as_marker() {
        let mut player = player_at("Keeper", Role::GK, 340.0, 0.0);
        player.send_off();
        let json = serde_json::to_value(&player).unwrap();
        assert_eq!(json["current_pos"], "NP");

        let back: Player = serde_json::from_value(json).unwrap();
        assert!(back.is_sent_off());
    }

    #[test]
    fn test_invalid_marker_rejected() {
        let mut json = serde_json::to_value(player_at("A", Role::CB, 1.0, 1.0)).unwrap();
        json["current_pos"] = serde_json::json!("XX");
        assert!(serde_json::from_value::<Player>(json).is_err());
    }

    #[test]
    fn test_relocate_ignored_when_sent_off() {
        let mut player = player_at("Striker", Role::ST, 100.0, 100.0);
        player.relocate(Point::new(110.0, 90.0));
        assert_eq!(player.on_pitch(), Some(Point::new(110.0, 90.0)));

        player.send_off();
        player.relocate(Point::new(5.0, 5.0));
        assert_eq!(player.pitch_position(), PitchPosition::SentOff);
        assert!(matches!(player.current(), Err(MatchError::PlayerSentOff { .. })));
    }

    #[test]
    fn test_sent_off_survives_deserialize_round_trip() {
        let mut player = player_at("Winger", Role::LM, 80.0, 270.0);
        player.send_off();
        let mut back: Player = serde_json::from_value(serde_json::to_value(&player).unwrap()).unwrap();
        back.relocate(Point::new(80.0, 270.0));
        assert!(back.is_sent_off());
        assert_eq!(back.on_pitch(), None);
    }
}
