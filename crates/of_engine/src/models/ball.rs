use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use super::pitch::Point;
use super::{PlayerId, TeamId};

/// Compass heading of the ball. North is towards y = 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BallDirection {
    North,
    South,
    East,
    West,
    Northeast,
    Northwest,
    Southeast,
    Southwest,
    #[default]
    Wait,
}

impl BallDirection {
    /// Heading of a displacement from `from` to `to`.
    pub fn between(from: Point, to: Point) -> Self {
        let dx = to.x - from.x;
        let dy = to.y - from.y;
        if dx == 0.0 {
            if dy == 0.0 {
                Self::Wait
            } else if dy < 0.0 {
                Self::North
            } else {
                Self::South
            }
        } else if dy == 0.0 {
            if dx > 0.0 {
                Self::East
            } else {
                Self::West
            }
        } else {
            match (dx > 0.0, dy > 0.0) {
                (true, false) => Self::Northeast,
                (false, false) => Self::Northwest,
                (true, true) => Self::Southeast,
                (false, true) => Self::Southwest,
            }
        }
    }
}

/// Ball coordinate with elevation. Serialized as `[x, y, z]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f64; 3]", into = "[f64; 3]")]
pub struct BallPosition {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl BallPosition {
    pub fn planar(self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn grounded(p: Point) -> Self {
        Self { x: p.x, y: p.y, z: 0.0 }
    }
}

impl From<[f64; 3]> for BallPosition {
    fn from(v: [f64; 3]) -> Self {
        Self { x: v[0], y: v[1], z: v[2] }
    }
}

impl From<BallPosition> for [f64; 3] {
    fn from(b: BallPosition) -> Self {
        [b.x, b.y, b.z]
    }
}

/// One pending sub-tick of an in-flight ball. Serialized as `[x, y, power]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 3]", into = "[f64; 3]")]
pub struct SubTick {
    pub x: f64,
    pub y: f64,
    pub power: f64,
}

impl SubTick {
    pub fn point(self) -> Point {
        Point::new(self.x, self.y)
    }
}

impl From<[f64; 3]> for SubTick {
    fn from(v: [f64; 3]) -> Self {
        Self { x: v[0], y: v[1], power: v[2] }
    }
}

impl From<SubTick> for [f64; 3] {
    fn from(s: SubTick) -> Self {
        [s.x, s.y, s.power]
    }
}

/// Most recent contact; survives loss of possession.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LastTouch {
    pub player_name: String,
    pub player_id: Option<PlayerId>,
    pub team_id: Option<TeamId>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub position: BallPosition,
    #[serde(default)]
    pub direction: BallDirection,
    #[serde(default)]
    pub with_player: bool,
    #[serde(default)]
    pub player: Option<PlayerId>,
    #[serde(default)]
    pub with_team: Option<TeamId>,
    #[serde(default)]
    pub last_touch: LastTouch,
    #[serde(default)]
    pub ball_over_iterations: VecDeque<SubTick>,
}

impl Ball {
    pub fn at(p: Point) -> Self {
        Self { position: BallPosition::grounded(p), ..Self::default() }
    }

    pub fn set_position(&mut self, p: Point) {
        self.position = BallPosition::grounded(p);
    }

    /// Make the ball loose. Last touch is kept.
    pub fn release(&mut self) {
        self.with_player = false;
        self.player = None;
        self.with_team = None;
    }

    pub fn is_loose(&self) -> bool {
        self.with_team.is_none()
    }

    pub fn in_flight(&self) -> bool {
        !self.ball_over_iterations.is_empty()
    }
}
