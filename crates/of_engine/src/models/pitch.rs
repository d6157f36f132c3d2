use serde::{Deserialize, Serialize};
use std::fmt;

/// 2D pitch coordinate. Serialized as `[x, y]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// |dx| + |dy|
    pub fn manhattan(self, other: Point) -> f64 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    pub fn distance(self, other: Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<[f64; 2]> for Point {
    fn from(v: [f64; 2]) -> Self {
        Point::new(v[0], v[1])
    }
}

impl From<Point> for [f64; 2] {
    fn from(p: Point) -> Self {
        [p.x, p.y]
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

/// One of the two bylines. A team "defends" one end and attacks the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PitchEnd {
    /// y = 0
    Top,
    /// y = pitch height
    Bottom,
}

impl PitchEnd {
    pub fn opposite(self) -> Self {
        match self {
            PitchEnd::Top => PitchEnd::Bottom,
            PitchEnd::Bottom => PitchEnd::Top,
        }
    }

    /// Sign of forward movement in y for the team defending this end.
    pub fn forward(self) -> f64 {
        match self {
            PitchEnd::Top => 1.0,
            PitchEnd::Bottom => -1.0,
        }
    }
}

/// Pitch geometry. Immutable for a match.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pitch {
    #[serde(alias = "pitchWidth")]
    pub width: f64,
    #[serde(alias = "pitchHeight")]
    pub height: f64,
    #[serde(alias = "goalWidth")]
    pub goal_width: f64,
}

impl Pitch {
    pub const fn new(width: f64, height: f64, goal_width: f64) -> Self {
        Self { width, height, goal_width }
    }

    pub fn centre(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn left_post(&self) -> f64 {
        self.width / 2.0 - self.goal_width / 2.0
    }

    pub fn right_post(&self) -> f64 {
        self.width / 2.0 + self.goal_width / 2.0
    }

    pub fn byline(&self, end: PitchEnd) -> f64 {
        match end {
            PitchEnd::Top => 0.0,
            PitchEnd::Bottom => self.height,
        }
    }

    /// Absolute y of a point `depth` units in front of `end`'s byline.
    pub fn depth_from(&self, end: PitchEnd, depth: f64) -> f64 {
        match end {
            PitchEnd::Top => depth,
            PitchEnd::Bottom => self.height - depth,
        }
    }

    /// Inverse of [`Pitch::depth_from`].
    pub fn depth_of(&self, end: PitchEnd, y: f64) -> f64 {
        match end {
            PitchEnd::Top => y,
            PitchEnd::Bottom => self.height - y,
        }
    }

    /// Clamp a point onto the playing surface.
    pub fn clamp(&self, p: Point) -> Point {
        Point::new(p.x.clamp(0.0, self.width), p.y.clamp(0.0, self.height))
    }
}
