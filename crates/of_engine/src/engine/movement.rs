//! Player Movement
//!
//! Per-tick loop over one team: choose an action, turn it into a step, clamp the
//! step to the pitch, then settle possession and run any ball action.

use rand::Rng;
use tracing::debug;

use super::ball_physics::closest_player_to_position;
use super::constants::movement;
use super::math::between;
use super::tackle::TackleKind;
use super::MatchEngine;
use crate::error::Result;
use crate::models::{Action, Intent, MatchDetails, Pitch, PlayerRef, Point, TeamSide};

/// Nearest on-pitch player of `side` to the ball.
pub(crate) fn closest_player_to_ball(md: &MatchDetails, side: TeamSide) -> Option<PlayerRef> {
    let ball = md.ball.position.planar();
    closest_player_to_position(md, side, ball, None).map(|(r, _)| r)
}

/// Recompute every intent position of `side`.
///
/// Keepers hold their origin. Without possession the closest player chases the
/// ball; everybody else follows the ball up and down the pitch from their slot,
/// pushed forward when attacking and back when defending.
pub(crate) fn set_intent_position(md: &mut MatchDetails, side: TeamSide, closest: Option<PlayerRef>) {
    let pitch = md.pitch;
    let ball = md.ball.position.planar();
    let team = md.team(side);
    let in_possession = md.ball.with_team == Some(team.team_id);
    let forward = team.defended_end(&pitch).forward();
    let push = match team.intent {
        Intent::Attack => forward * pitch.height / movement::INTENT_PUSH_DIVISOR,
        Intent::Defend => -forward * pitch.height / movement::INTENT_PUSH_DIVISOR,
    };
    let follow = (ball.y - pitch.height / 2.0) * movement::INTENT_BALL_FOLLOW;

    for (index, player) in md.team_mut(side).players.iter_mut().enumerate() {
        if player.is_sent_off() {
            continue;
        }
        player.intent_pos = if player.position.is_goalkeeper() {
            player.origin_pos
        } else if closest == Some(PlayerRef::new(side, index)) && !in_possession {
            ball
        } else {
            let origin = player.origin_pos;
            pitch.clamp(Point::new(origin.x, origin.y + follow + push))
        };
    }
}

/// Clamp a moved position to the pitch plus its overhang, axis by axis.
fn clamp_to_overhang(pitch: &Pitch, p: Point) -> Point {
    let o = movement::PITCH_OVERHANG;
    Point::new(p.x.clamp(-o, pitch.width + o), p.y.clamp(-o, pitch.height + o))
}

fn sign(v: f64) -> f64 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Closest point to `p` on the segment `a`-`b`.
fn nearest_on_segment(p: Point, a: Point, b: Point) -> Point {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let len2 = dx * dx + dy * dy;
    if len2 == 0.0 {
        return a;
    }
    let t = (((p.x - a.x) * dx + (p.y - a.y) * dy) / len2).clamp(0.0, 1.0);
    Point::new(a.x + t * dx, a.y + t * dy)
}

impl<R: Rng> MatchEngine<R> {
    /// Move every on-pitch player of `side` for this tick.
    pub(crate) fn decide_movement(&mut self, md: &mut MatchDetails, side: TeamSide) -> Result<()> {
        for index in 0..md.team(side).players.len() {
            let r = PlayerRef::new(side, index);
            if md.player(r).is_sent_off() {
                continue;
            }
            let action = self.choose_action(md, r)?;
            let delta = self.get_movement(md, r, action)?;
            self.complete_movement(md, r, delta);

            self.check_possession(md, r, action)?;
            if md.end_iteration {
                return Ok(());
            }
            if md.player(r).has_ball && action.requires_ball() {
                self.handle_ball_player_actions(md, r, action)?;
                if md.end_iteration {
                    return Ok(());
                }
            }
        }
        Ok(())
    }

    /// Step for `r` this tick. Ball actions stand still; the ball does the moving.
    pub(crate) fn get_movement(&mut self, md: &mut MatchDetails, r: PlayerRef, action: Action) -> Result<Point> {
        let at = md.player(r).current()?;
        let ball = md.ball.position.planar();

        match action {
            Action::Tackle | Action::Slide => Ok(Point::new(sign(ball.x - at.x), sign(ball.y - at.y))),
            Action::Intercept => {
                let target = self.interception_point(md, r.side, at).unwrap_or(ball);
                Ok(Point::new(sign(target.x - at.x), sign(target.y - at.y)))
            }
            Action::Run | Action::Sprint => {
                self.tire(md, r, action);
                let target = self.run_target(md, r, at);
                let steps: &[f64] = match action {
                    Action::Sprint => &movement::SPRINT_STEPS,
                    _ => &movement::RUN_STEPS,
                };
                Ok(Point::new(self.axis_step(steps, target.x - at.x), self.axis_step(steps, target.y - at.y)))
            }
            _ => Ok(Point::default()),
        }
    }

    /// Where an interceptor heads: the nearest point on the opposition carrier's
    /// straight run to the goal it attacks.
    fn interception_point(&self, md: &MatchDetails, side: TeamSide, at: Point) -> Option<Point> {
        let opponent = side.opponent();
        let (carrier, _) = closest_player_to_position(md, opponent, md.ball.position.planar(), None)?;
        let from = md.player(carrier).on_pitch()?;
        let attacked = md.team(opponent).attacked_end(&md.pitch);
        let goal = Point::new(md.pitch.width / 2.0, md.pitch.byline(attacked));
        Some(nearest_on_segment(at, from, goal))
    }

    fn run_target(&self, md: &MatchDetails, r: PlayerRef, at: Point) -> Point {
        let player = md.player(r);
        if player.has_ball {
            let attacked = md.team(r.side).attacked_end(&md.pitch);
            return Point::new(md.pitch.width / 2.0, md.pitch.byline(attacked));
        }
        let ball = md.ball.position.planar();
        let window = self.config.movement.ball_attraction_window;
        if (ball.x - at.x).abs() <= window && (ball.y - at.y).abs() <= window {
            ball
        } else {
            player.intent_pos
        }
    }

    /// Random step from the half of `steps` that points toward `distance`,
    /// never overshooting it.
    fn axis_step(&mut self, steps: &[f64], distance: f64) -> f64 {
        let toward: Vec<f64> = if distance > 0.0 {
            steps.iter().copied().filter(|s| *s >= 0.0).collect()
        } else if distance < 0.0 {
            steps.iter().copied().filter(|s| *s <= 0.0).collect()
        } else {
            return 0.0;
        };
        let pick = toward[self.random(0, toward.len() as i64 - 1) as usize];
        pick.clamp(-distance.abs(), distance.abs())
    }

    fn tire(&mut self, md: &mut MatchDetails, r: PlayerRef, action: Action) {
        let cfg = self.config.movement;
        let (floor, decay) = match action {
            Action::Sprint => (cfg.sprint_fitness_floor, cfg.sprint_fitness_decay),
            _ => (cfg.run_fitness_floor, cfg.run_fitness_decay),
        };
        let player = md.player_mut(r);
        if player.fitness > floor {
            player.fitness -= decay;
        }
    }

    /// Apply `delta` to `r`; a carrier takes the ball along.
    pub(crate) fn complete_movement(&mut self, md: &mut MatchDetails, r: PlayerRef, delta: Point) {
        let pitch = md.pitch;
        let player = md.player_mut(r);
        let Some(at) = player.on_pitch() else { return };
        let moved = clamp_to_overhang(&pitch, at.offset(delta.x, delta.y));
        player.relocate(moved);
        if player.has_ball {
            md.ball.set_position(moved);
        }
    }

    /// Possession change for a player who ended up on top of a loose or
    /// opposition ball.
    fn check_possession(&mut self, md: &mut MatchDetails, r: PlayerRef, action: Action) -> Result<()> {
        let player = md.player(r);
        if player.has_ball {
            return Ok(());
        }
        let at = player.current()?;
        let ball = md.ball.position.planar();
        let w = self.config.movement.possession_window;
        if !(between(at.x, ball.x - w, ball.x + w) && between(at.y, ball.y - w, ball.y + w)) {
            return Ok(());
        }
        let own_id = md.team(r.side).team_id;
        let opponent_holds = md.ball.with_team.is_some_and(|t| t != own_id);
        if !md.ball.is_loose() && !opponent_holds {
            return Ok(());
        }

        if player.offside {
            let line = format!("{} is offside", player.name);
            md.log(line);
            return self.set_setpiece(md, r.side.opponent());
        }
        match TackleKind::from_action(action) {
            Some(kind) if opponent_holds && at == ball => {
                self.resolve_tackle(md, r, kind)?;
            }
            _ => {
                debug!(player = %player.name, "takes the ball");
                md.give_ball_to(r);
            }
        }
        Ok(())
    }
}
