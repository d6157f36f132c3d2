//! Ball Physics
//!
//! Turns a kick into a queue of sub-tick positions, scans each sampled arc for
//! players able to touch the ball, and resolves saves and deflections.
//!
//! - `calc_ball_movement_over_time`: split a kick into decelerating steps
//! - `resolve_ball_movement`: one step, with touch detection along the arc
//! - `resolve_deflection`: possession or rebound off an outfield touch
//! - `move_ball`: continue a kick from a previous tick

use rand::Rng;
use tracing::debug;

use super::constants::contact;
use super::math::{self, between};
use super::{Boundary, MatchEngine};
use crate::error::Result;
use crate::models::{BallDirection, MatchDetails, PlayerRef, Point, TeamSide};

/// Outcome of moving the ball one step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution {
    /// Ball is in play here.
    Position(Point),
    /// A restart was placed; the tick is over.
    EndIteration,
}

/// Nearest on-pitch player of `side` to `target` by Manhattan distance.
pub(crate) fn closest_player_to_position(
    md: &MatchDetails,
    side: TeamSide,
    target: Point,
    exclude: Option<PlayerRef>,
) -> Option<(PlayerRef, f64)> {
    md.team(side)
        .players
        .iter()
        .enumerate()
        .filter_map(|(index, player)| {
            let r = PlayerRef::new(side, index);
            if Some(r) == exclude {
                return None;
            }
            player.on_pitch().map(|p| (r, p.manhattan(target)))
        })
        .fold(None, |best: Option<(PlayerRef, f64)>, candidate| match best {
            Some(b) if b.1 <= candidate.1 => Some(b),
            _ => Some(candidate),
        })
}

impl<R: Rng> MatchEngine<R> {
    // ===========================================
    // Kick
    // ===========================================

    /// Queue a kick from the ball's position to `target` and resolve its first step.
    pub(crate) fn calc_ball_movement_over_time(
        &mut self,
        md: &mut MatchDetails,
        strength: f64,
        target: Point,
        kicker: Option<PlayerRef>,
    ) -> Result<Resolution> {
        let origin = md.ball.position.planar();
        let power = math::power(&mut self.rng, strength);
        let dx = target.x - origin.x;
        let dy = target.y - origin.y;

        let divisor = self.random(contact::SPEED_DIVISOR_MIN, contact::SPEED_DIVISOR_MAX) as f64;
        let iterations = (math::round_half_up(dx.abs().max(dy.abs()) / divisor) as usize).max(1);

        let xs = math::split_number_into_n(dx, iterations);
        let ys = math::split_number_into_n(dy, iterations);
        let powers = math::split_number_into_n(power, iterations);
        let steps = math::merge_arrays(iterations, origin, target, &xs, &ys, &powers);

        md.ball.ball_over_iterations = steps.into();
        let Some(first) = md.ball.ball_over_iterations.pop_front() else {
            return Ok(Resolution::Position(origin));
        };
        md.ball.direction = BallDirection::between(origin, first.point());
        if let Some(k) = kicker {
            md.record_touch(k);
        }

        md.log("resolving ball movement");
        // The opening step carries the full kick; later ticks use their split share.
        let resolution = self.resolve_ball_movement(md, kicker, origin, first.point(), power)?;
        if let Resolution::Position(p) = resolution {
            md.ball.set_position(p);
            md.log(format!("new ball position: {p}"));
        }
        Ok(resolution)
    }

    // ===========================================
    // One step
    // ===========================================

    /// Move the ball from `from` to `to`, checking every sample of the arc for a touch.
    pub(crate) fn resolve_ball_movement(
        &mut self,
        md: &mut MatchDetails,
        kicker: Option<PlayerRef>,
        from: Point,
        to: Point,
        power: f64,
    ) -> Result<Resolution> {
        md.remove_ball_from_all_players();
        md.ball.release();

        for sample in math::trajectory(from, to, power) {
            let point = sample.planar();
            let candidates = TeamSide::BOTH
                .map(|side| closest_player_to_position(md, side, point, kicker));

            // The larger of the two nearest distances decides who is tested.
            let in_proximity = match candidates {
                [Some(a), Some(b)] => Some(if a.1 >= b.1 { a.0 } else { b.0 }),
                [Some(a), None] => Some(a.0),
                [None, Some(b)] => Some(b.0),
                [None, None] => None,
            };
            let Some(r) = in_proximity else { continue };

            let player = md.player(r);
            let pos = player.current()?;
            let keeper = player.position.is_goalkeeper();
            let (reach_x, reach_y) = if keeper {
                (contact::KEEPER_REACH_X, contact::KEEPER_REACH_Y)
            } else {
                (contact::PLAYER_REACH, contact::PLAYER_REACH)
            };
            let touches = between(pos.x, point.x - reach_x, point.x + reach_x)
                && between(pos.y, point.y - reach_y, point.y + reach_y)
                && between(
                    sample.z,
                    contact::ELEVATION_FLOOR,
                    player.skill.jumping + contact::JUMP_ALLOWANCE,
                );
            if !touches {
                continue;
            }

            if keeper {
                let saving = player.skill.saving;
                if saving > self.random(0, power as i64) as f64 {
                    md.give_ball_to(r);
                    md.player_mut(r).stats.saves += 1;
                    md.log("Ball saved");
                    debug!(keeper = %md.player(r).name, "save in flight");
                    return Ok(Resolution::Position(pos));
                }
            } else {
                return self.resolve_deflection(md, r, from, power);
            }
        }

        let kicking = md.last_touch_side();
        match self.keep_in_boundaries(md, kicking, to)? {
            Boundary::InPlay(p) => Ok(Resolution::Position(Point::new(
                math::round_to(p.x, 2),
                math::round_to(p.y, 2),
            ))),
            Boundary::Restart => Ok(Resolution::EndIteration),
        }
    }

    // ===========================================
    // Deflection
    // ===========================================

    /// An outfield player got a touch on the ball travelling from `from`.
    pub(crate) fn resolve_deflection(
        &mut self,
        md: &mut MatchDetails,
        defender: PlayerRef,
        from: Point,
        power: f64,
    ) -> Result<Resolution> {
        let at = md.player(defender).current()?;
        let new_power = power - from.distance(at);
        let line = format!("Ball deflected off: {}", md.player(defender).name);
        md.log(line);

        if new_power < self.config.deflection.possession_threshold {
            md.give_ball_to(defender);
            return Ok(Resolution::Position(at));
        }

        let half = new_power / 2.0;
        let jitter = self.random(-contact::DEFLECTION_JITTER, contact::DEFLECTION_JITTER) as f64;
        let target = match md.ball.direction {
            BallDirection::East => Point::new(at.x - half, at.y + jitter),
            BallDirection::West => Point::new(at.x + half, at.y + jitter),
            BallDirection::North => Point::new(at.x + jitter, at.y + half),
            BallDirection::South => Point::new(at.x + jitter, at.y - half),
            BallDirection::Northeast => Point::new(at.x - half, at.y + half),
            BallDirection::Northwest => Point::new(at.x + half, at.y + half),
            BallDirection::Southeast => Point::new(at.x - half, at.y - half),
            BallDirection::Southwest => Point::new(at.x + half, at.y - half),
            BallDirection::Wait => {
                let x = self.random_between(-half, half);
                let y = self.random_between(-half, half);
                Point::new(at.x + x, at.y + y)
            }
        };

        md.remove_ball_from_all_players();
        md.ball.release();
        md.record_touch(defender);
        md.ball.ball_over_iterations.clear();
        match self.keep_in_boundaries(md, defender.side, target)? {
            Boundary::InPlay(p) => {
                md.ball.set_position(p);
                Ok(Resolution::Position(p))
            }
            Boundary::Restart => Ok(Resolution::EndIteration),
        }
    }

    // ===========================================
    // Flight across ticks
    // ===========================================

    /// Advance a kick queued by an earlier tick by one step.
    pub(crate) fn move_ball(&mut self, md: &mut MatchDetails) -> Result<()> {
        let Some(next) = md.ball.ball_over_iterations.pop_front() else {
            md.ball.direction = BallDirection::Wait;
            return Ok(());
        };
        let from = md.ball.position.planar();
        md.ball.direction = BallDirection::between(from, next.point());
        let kicker = md.ball.last_touch.player_id.and_then(|id| md.find_player(id));

        match self.resolve_ball_movement(md, kicker, from, next.point(), next.power)? {
            Resolution::Position(p) => {
                md.log(format!("ball still moving from previous kick: {p}"));
                md.ball.set_position(p);
                self.check_goal_scored(md)
            }
            Resolution::EndIteration => Ok(()),
        }
    }
}
