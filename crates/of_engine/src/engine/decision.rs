//! Action Decision
//!
//! Weight tables keyed by pitch situation and pressure, weighted selection, and
//! validation of externally supplied actions.
//!
//! Every weight vector follows [`Action::WEIGHTED`] order:
//! shoot, throughBall, pass, cross, tackle, intercept, slide, run, sprint, cleared, boot.

use rand::Rng;
use tracing::warn;

use super::constants::pressure;
use super::math::{between, in_penalty_box};
use super::MatchEngine;
use crate::error::{MatchError, Result};
use crate::models::{Action, MatchDetails, Pitch, PitchEnd, PlayerRef, Point, TeamSide};

pub type Weights = [u32; 11];

/// Touchline lane or the middle of the pitch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lane {
    Wide,
    Central,
}

impl Lane {
    pub fn of(pitch: &Pitch, x: f64) -> Self {
        let edge = pitch.width * pressure::WIDE_LANE;
        if x < edge || x > pitch.width - edge {
            Lane::Wide
        } else {
            Lane::Central
        }
    }
}

/// Where a ball carrier stands, as seen from the end their team defends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Situation {
    KeeperInBox,
    /// Keeper caught upfield with the ball.
    KeeperOutsideBox,
    OwnBox,
    OwnThird(Lane),
    Middle(Lane),
    FinalThird(Lane),
    OppositionBox,
    /// Deep in the opposition half, outside the box.
    ByLineCorner,
}

impl Situation {
    pub fn classify(pitch: &Pitch, defended: PitchEnd, keeper: bool, at: Point) -> Self {
        let in_own_box = in_penalty_box(pitch, defended, at);
        if keeper {
            return if in_own_box { Situation::KeeperInBox } else { Situation::KeeperOutsideBox };
        }
        if in_own_box {
            return Situation::OwnBox;
        }
        if in_penalty_box(pitch, defended.opposite(), at) {
            return Situation::OppositionBox;
        }
        let h = pitch.height;
        let depth = pitch.depth_of(defended, at.y);
        let lane = Lane::of(pitch, at.x);
        if depth > h - (h / 6.0 + 7.0) {
            Situation::ByLineCorner
        } else if depth < h / 3.0 {
            Situation::OwnThird(lane)
        } else if depth > 2.0 * h / 3.0 {
            Situation::FinalThird(lane)
        } else {
            Situation::Middle(lane)
        }
    }

    /// Window around the carrier inside which an opponent counts as pressing.
    pub fn pressure_window(self) -> (f64, f64) {
        match self {
            Situation::KeeperInBox | Situation::OwnBox => pressure::OWN_BOX,
            Situation::OppositionBox => pressure::OPPOSITION_BOX,
            Situation::OwnThird(_) => pressure::DEEP,
            Situation::KeeperOutsideBox
            | Situation::Middle(_)
            | Situation::FinalThird(_)
            | Situation::ByLineCorner => pressure::OPEN_PLAY,
        }
    }

    pub fn with_ball_weights(self, pressed: bool) -> Weights {
        use Lane::{Central, Wide};
        match (self, pressed) {
            (Situation::KeeperInBox, true) => [0, 0, 10, 0, 0, 0, 0, 10, 0, 40, 40],
            (Situation::KeeperInBox, false) => [0, 0, 50, 0, 0, 0, 0, 10, 0, 20, 20],
            (Situation::KeeperOutsideBox, true) => [0, 0, 20, 0, 0, 0, 0, 0, 0, 50, 30],
            (Situation::KeeperOutsideBox, false) => [0, 0, 60, 0, 0, 0, 0, 20, 0, 10, 10],
            (Situation::OwnBox, true) => [0, 0, 10, 0, 0, 0, 0, 10, 0, 40, 40],
            (Situation::OwnBox, false) => [0, 0, 40, 0, 0, 0, 0, 30, 0, 20, 10],
            (Situation::OwnThird(Central), true) => [0, 0, 0, 0, 0, 0, 0, 10, 0, 70, 20],
            (Situation::OwnThird(Central), false) => [0, 0, 30, 0, 0, 0, 0, 50, 0, 10, 10],
            (Situation::OwnThird(Wide), true) => [0, 0, 10, 0, 0, 0, 0, 10, 0, 60, 20],
            (Situation::OwnThird(Wide), false) => [0, 10, 30, 0, 0, 0, 0, 40, 10, 10, 0],
            (Situation::Middle(Central), true) => [0, 20, 50, 0, 0, 0, 0, 20, 0, 0, 10],
            (Situation::Middle(Central), false) => [0, 30, 40, 0, 0, 0, 0, 20, 10, 0, 0],
            (Situation::Middle(Wide), true) => [0, 10, 40, 20, 0, 0, 0, 20, 0, 0, 10],
            (Situation::Middle(Wide), false) => [0, 10, 20, 30, 0, 0, 0, 20, 20, 0, 0],
            (Situation::FinalThird(Central), true) => [40, 20, 20, 0, 0, 0, 0, 20, 0, 0, 0],
            (Situation::FinalThird(Central), false) => [50, 20, 10, 0, 0, 0, 0, 10, 10, 0, 0],
            (Situation::FinalThird(Wide), true) => [10, 10, 20, 40, 0, 0, 0, 20, 0, 0, 0],
            (Situation::FinalThird(Wide), false) => [20, 10, 10, 40, 0, 0, 0, 10, 10, 0, 0],
            (Situation::OppositionBox, true) => [50, 0, 30, 0, 0, 0, 0, 20, 0, 0, 0],
            (Situation::OppositionBox, false) => [90, 0, 10, 0, 0, 0, 0, 0, 0, 0, 0],
            (Situation::ByLineCorner, _) => [0, 0, 20, 80, 0, 0, 0, 0, 0, 0, 0],
        }
    }
}

/// Half of the pitch an off-ball player stands in, relative to the end they defend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldHalf {
    Own,
    Opposition,
}

impl FieldHalf {
    pub fn of(pitch: &Pitch, defended: PitchEnd, at: Point) -> Self {
        if pitch.depth_of(defended, at.y) < pitch.height / 2.0 {
            FieldHalf::Own
        } else {
            FieldHalf::Opposition
        }
    }
}

/// Who holds the ball, from an off-ball player's side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Possession {
    Opponent,
    Team,
    Loose,
}

/// Off-ball player's distance to the ball.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Proximity {
    Close,
    Near,
    Far,
}

impl Proximity {
    fn of(offset: Point) -> Self {
        if within(offset, pressure::CLOSE) {
            Proximity::Close
        } else if within(offset, pressure::NEAR) {
            Proximity::Near
        } else {
            Proximity::Far
        }
    }
}

const KEEPER_OFF_BALL: Weights = [0, 0, 0, 0, 0, 0, 0, 60, 40, 0, 0];

/// Off-ball weights. `own_third` only matters when closing down a carrier.
pub fn off_ball_weights(possession: Possession, proximity: Proximity, half: FieldHalf, own_third: bool) -> Weights {
    use FieldHalf::{Opposition, Own};
    use Proximity::{Close, Far, Near};
    match (possession, proximity, half) {
        (Possession::Opponent, Close, _) if own_third => [0, 0, 0, 0, 40, 10, 40, 5, 5, 0, 0],
        (Possession::Opponent, Close, _) => [0, 0, 0, 0, 50, 10, 20, 10, 10, 0, 0],
        (Possession::Opponent, Near, Own) => [0, 0, 0, 0, 20, 30, 0, 20, 30, 0, 0],
        (Possession::Opponent, Near, Opposition) => [0, 0, 0, 0, 30, 30, 0, 20, 20, 0, 0],
        (Possession::Opponent, Far, Own) => [0, 0, 0, 0, 0, 40, 0, 40, 20, 0, 0],
        (Possession::Opponent, Far, Opposition) => [0, 0, 0, 0, 0, 20, 0, 30, 50, 0, 0],
        (Possession::Team, Close | Near, Own) => [0, 0, 0, 0, 0, 0, 0, 60, 40, 0, 0],
        (Possession::Team, Close | Near, Opposition) => [0, 0, 0, 0, 0, 0, 0, 50, 50, 0, 0],
        (Possession::Team, Far, Own) => [0, 0, 0, 0, 0, 0, 0, 70, 30, 0, 0],
        (Possession::Team, Far, Opposition) => [0, 0, 0, 0, 0, 0, 0, 40, 60, 0, 0],
        (Possession::Loose, Close, _) => [0, 0, 0, 0, 0, 20, 0, 30, 50, 0, 0],
        (Possession::Loose, Near, _) => [0, 0, 0, 0, 0, 20, 0, 40, 40, 0, 0],
        (Possession::Loose, Far, Own) => [0, 0, 0, 0, 0, 10, 0, 60, 30, 0, 0],
        (Possession::Loose, Far, Opposition) => [0, 0, 0, 0, 0, 10, 0, 50, 40, 0, 0],
    }
}

fn within(offset: Point, window: (f64, f64)) -> bool {
    offset.x.abs() <= window.0 && offset.y.abs() <= window.1
}

/// Any on-pitch player of `side` strictly inside `window` around `at`.
fn pressed_by(md: &MatchDetails, side: TeamSide, at: Point, window: (f64, f64)) -> bool {
    md.team(side).players.iter().filter_map(|p| p.on_pitch()).any(|p| {
        between(p.x, at.x - window.0, at.x + window.0) && between(p.y, at.y - window.1, at.y + window.1)
    })
}

/// Weights for player `r` given the current possession and positions.
pub(crate) fn action_weights(md: &MatchDetails, r: PlayerRef) -> Result<Weights> {
    let player = md.player(r);
    let at = player.current()?;
    let keeper = player.position.is_goalkeeper();
    let defended = md.team(r.side).defended_end(&md.pitch);

    if player.has_ball {
        let situation = Situation::classify(&md.pitch, defended, keeper, at);
        let pressed = pressed_by(md, r.side.opponent(), at, situation.pressure_window());
        return Ok(situation.with_ball_weights(pressed));
    }
    if keeper {
        return Ok(KEEPER_OFF_BALL);
    }

    let ball = md.ball.position.planar();
    let proximity = Proximity::of(Point::new(ball.x - at.x, ball.y - at.y));
    let possession = match md.ball.with_team {
        Some(team) if team != md.team(r.side).team_id => Possession::Opponent,
        Some(_) => Possession::Team,
        None => Possession::Loose,
    };
    let half = FieldHalf::of(&md.pitch, defended, at);
    let own_third = md.pitch.depth_of(defended, at.y) < md.pitch.height / 3.0;
    Ok(off_ball_weights(possession, proximity, half, own_third))
}

impl<R: Rng> MatchEngine<R> {
    /// Weighted draw over [`Action::WEIGHTED`]; all-zero weights mean `Wait`.
    pub(crate) fn select_action(&mut self, weights: &Weights) -> Action {
        let total: u32 = weights.iter().sum();
        if total == 0 {
            return Action::Wait;
        }
        let draw = self.random(0, total as i64 - 1) as u32;
        let mut cumulative = 0;
        for (action, weight) in Action::WEIGHTED.iter().zip(weights) {
            cumulative += weight;
            if draw < cumulative {
                return *action;
            }
        }
        Action::Wait
    }

    /// Apply the externally supplied action of `r`, if any, over `computed`.
    ///
    /// An unknown action string is fatal. Ball actions without the ball become
    /// `Run`, challenges while holding the ball become a random ball action.
    pub(crate) fn check_provided_action(
        &mut self,
        md: &MatchDetails,
        r: PlayerRef,
        computed: Action,
    ) -> Result<Action> {
        let player = md.player(r);
        let provided = player.action.as_str();
        if provided.is_empty() || provided == "none" {
            return Ok(computed);
        }
        let action: Action = provided.parse().map_err(|_| MatchError::InvalidAction {
            player: player.name.clone(),
            action: provided.to_string(),
        })?;

        if action.requires_ball() && !player.has_ball {
            warn!(player = %player.name, %action, "ball action without the ball, running instead");
            return Ok(Action::Run);
        }
        if action.is_challenge() && player.has_ball {
            let last = Action::REPLACEMENT_BALL_ACTIONS.len() as i64 - 1;
            let replacement = Action::REPLACEMENT_BALL_ACTIONS[self.random(0, last) as usize];
            warn!(player = %player.name, %action, %replacement, "challenge while holding the ball");
            return Ok(replacement);
        }
        Ok(action)
    }

    /// Computed action for `r`, overridden by a valid provided action.
    pub(crate) fn choose_action(&mut self, md: &MatchDetails, r: PlayerRef) -> Result<Action> {
        let weights = action_weights(md, r)?;
        let computed = self.select_action(&weights);
        self.check_provided_action(md, r, computed)
    }
}
