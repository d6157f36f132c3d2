//! Ball Actions
//!
//! What a ball carrier does with it: shots, passes, crosses, through balls,
//! clearances and penalty kicks. Each one picks a target and hands it to
//! [`MatchEngine::calc_ball_movement_over_time`].

use rand::Rng;
use tracing::debug;

use super::constants::{goal, passing};
use super::math::{self, round_half_up};
use super::{MatchEngine, Resolution};
use crate::error::Result;
use crate::models::{Action, BallDirection, MatchDetails, PitchEnd, PlayerRef, Point, Tally};

/// Clearance directions for a team attacking the top end; mirrored for the bottom.
const CLEARANCE_COMPASS: [BallDirection; 15] = [
    BallDirection::Wait,
    BallDirection::North,
    BallDirection::North,
    BallDirection::North,
    BallDirection::North,
    BallDirection::East,
    BallDirection::East,
    BallDirection::West,
    BallDirection::West,
    BallDirection::Northeast,
    BallDirection::Northeast,
    BallDirection::Northeast,
    BallDirection::Northwest,
    BallDirection::Northwest,
    BallDirection::Northwest,
];

fn mirrored(direction: BallDirection) -> BallDirection {
    match direction {
        BallDirection::North => BallDirection::South,
        BallDirection::Northeast => BallDirection::Southeast,
        BallDirection::Northwest => BallDirection::Southwest,
        other => other,
    }
}

fn count(tally: &mut Tally, on_target: bool) {
    tally.total += 1;
    if on_target {
        tally.on += 1;
    } else {
        tally.off += 1;
    }
}

impl<R: Rng> MatchEngine<R> {
    pub(crate) fn handle_ball_player_actions(
        &mut self,
        md: &mut MatchDetails,
        r: PlayerRef,
        action: Action,
    ) -> Result<()> {
        match action {
            Action::Shoot => self.shot_made(md, r),
            Action::ThroughBall => self.through_ball(md, r),
            Action::Pass => self.ball_passed(md, r),
            Action::Cross => self.ball_crossed(md, r),
            Action::Cleared | Action::Boot => self.ball_kicked(md, r),
            Action::Penalty => self.penalty_taken(md, r),
            _ => Ok(()),
        }
    }

    // ===========================================
    // Clearances
    // ===========================================

    pub(crate) fn ball_kicked(&mut self, md: &mut MatchDetails, r: PlayerRef) -> Result<()> {
        let player = md.player(r);
        let at = player.current()?;
        let strength = player.skill.strength;
        let line = format!("ball kicked by: {}", player.name);
        md.log(line);

        let attacked = md.team(r.side).attacked_end(&md.pitch);
        let pick = CLEARANCE_COMPASS[self.random(0, CLEARANCE_COMPASS.len() as i64 - 1) as usize];
        let direction = match attacked {
            PitchEnd::Top => pick,
            PitchEnd::Bottom => mirrored(pick),
        };
        let p = math::power(&mut self.rng, strength);
        let target = self.clearance_target(at, direction, p);
        self.calc_ball_movement_over_time(md, strength, target, Some(r))?;
        Ok(())
    }

    fn clearance_target(&mut self, at: Point, direction: BallDirection, p: f64) -> Point {
        let half = p / 2.0;
        let (dx, dy) = match direction {
            BallDirection::Wait => (self.random_between(0.0, half), self.random_between(0.0, half)),
            BallDirection::North => (self.random(-20, 20) as f64, self.random_between(-p, -half)),
            BallDirection::South => (self.random(-20, 20) as f64, self.random_between(half, p)),
            BallDirection::East => (self.random_between(half, p), self.random(-20, 20) as f64),
            BallDirection::West => (self.random_between(-p, -half), self.random(-20, 20) as f64),
            BallDirection::Northeast => (self.random_between(0.0, half), self.random_between(-p, -half)),
            BallDirection::Northwest => (self.random_between(-half, 0.0), self.random_between(-p, -half)),
            BallDirection::Southeast => (self.random_between(0.0, half), self.random_between(half, p)),
            BallDirection::Southwest => (self.random_between(-half, 0.0), self.random_between(half, p)),
        };
        at.offset(dx, dy)
    }

    // ===========================================
    // Shots
    // ===========================================

    pub(crate) fn shot_made(&mut self, md: &mut MatchDetails, r: PlayerRef) -> Result<()> {
        let pitch = md.pitch;
        let player = md.player(r);
        let at = player.current()?;
        let skill = player.skill;
        let line = format!("Shot Made by: {}", player.name);
        md.log(line);

        let attacked = md.team(r.side).attacked_end(&pitch);
        let forward = md.team(r.side).defended_end(&pitch).forward();
        let p = math::power(&mut self.rng, skill.strength);
        let reaches_line = match attacked {
            PitchEnd::Top => at.y - p <= 0.0,
            PitchEnd::Bottom => at.y + p >= pitch.height,
        };
        let on_target = reaches_line && skill.shooting > self.random(0, goal::SHOT_ROLL) as f64;

        let target = if on_target {
            let centre = pitch.width / 2.0;
            let x = self.random_between(centre - goal::TARGET_SPREAD, centre + goal::TARGET_SPREAD);
            let y = match attacked {
                PitchEnd::Top => -1.0,
                PitchEnd::Bottom => pitch.height + 1.0,
            };
            md.log(format!("Shot On Target at X Position {x}"));
            Point::new(x, y)
        } else {
            let centre = pitch.width / 2.0;
            let x = if self.random(0, 1) == 0 {
                self.random_between(0.0, centre - goal::WIDE_CLEARANCE)
            } else {
                self.random_between(centre + goal::WIDE_CLEARANCE, pitch.width)
            };
            md.log(format!("Shot Off Target at X Position {x}"));
            Point::new(x, at.y + forward * p)
        };

        count(&mut md.player_mut(r).stats.shots, on_target);
        count(&mut md.statistics_mut(r.side).shots, on_target);
        debug!(player = %md.player(r).name, on_target, "shot");

        if let Resolution::Position(_) = self.calc_ball_movement_over_time(md, skill.strength, target, Some(r))? {
            self.check_goal_scored(md)?;
        }
        Ok(())
    }

    /// Taker placed by a penalty award shoots from the spot.
    pub(crate) fn penalty_taken(&mut self, md: &mut MatchDetails, r: PlayerRef) -> Result<()> {
        let pitch = md.pitch;
        let player = md.player_mut(r);
        player.action = "none".to_string();
        let skill = player.skill;
        let line = format!("Penalty Taken by: {}", player.name);
        md.log(line);

        let attacked = md.team(r.side).attacked_end(&pitch);
        let y = match attacked {
            PitchEnd::Top => -1.0,
            PitchEnd::Bottom => pitch.height + 1.0,
        };
        let scored = skill.penalty_taking > self.random(0, 100) as f64;
        let x = if scored {
            self.random_between(pitch.left_post() + 1.0, pitch.right_post() - 1.0)
        } else if self.random(0, 1) == 0 {
            self.random_between(pitch.left_post() - 30.0, pitch.left_post() - 1.0)
        } else {
            self.random_between(pitch.right_post() + 1.0, pitch.right_post() + 30.0)
        };

        count(&mut md.player_mut(r).stats.shots, scored);
        count(&mut md.statistics_mut(r.side).shots, scored);

        if let Resolution::Position(_) =
            self.calc_ball_movement_over_time(md, skill.strength, Point::new(x, y), Some(r))?
        {
            self.check_goal_scored(md)?;
        }
        Ok(())
    }

    // ===========================================
    // Passing
    // ===========================================

    /// Teammate to pass to. Players in the attacking half are preferred, and each
    /// re-roll keeps the more advanced of the two candidates.
    pub(crate) fn get_target_player(&mut self, md: &MatchDetails, r: PlayerRef) -> Option<PlayerRef> {
        let pitch = md.pitch;
        let attacked = md.team(r.side).attacked_end(&pitch);
        let depth = |index: usize| {
            md.team(r.side).players[index]
                .on_pitch()
                .map_or(f64::MAX, |p| pitch.depth_of(attacked, p.y))
        };

        let mates: Vec<usize> = (0..md.team(r.side).players.len())
            .filter(|&i| i != r.index && !md.team(r.side).players[i].is_sent_off())
            .collect();
        let advanced: Vec<usize> = mates.iter().copied().filter(|&i| depth(i) < pitch.height / 2.0).collect();
        let pool = if advanced.is_empty() { mates } else { advanced };
        if pool.is_empty() {
            return None;
        }

        let last = pool.len() as i64 - 1;
        let mut pick = pool[self.random(0, last) as usize];
        for _ in 0..passing::TARGET_REROLLS {
            let other = pool[self.random(0, last) as usize];
            if depth(other) < depth(pick) {
                pick = other;
            }
        }
        Some(PlayerRef::new(r.side, pick))
    }

    /// Spread of a misplaced pass landing at `target`.
    fn pass_spread(md: &MatchDetails, r: PlayerRef, target: Point) -> f64 {
        let pitch = md.pitch;
        let depth = pitch.depth_of(md.team(r.side).defended_end(&pitch), target.y);
        if depth > 2.0 * pitch.height / 3.0 {
            passing::SPREAD_FINAL_THIRD
        } else if depth > pitch.height / 3.0 {
            passing::SPREAD_MIDDLE_THIRD
        } else {
            passing::SPREAD_OWN_THIRD
        }
    }

    /// `aim` if the passing roll succeeds, otherwise somewhere around it.
    fn delivery(&mut self, md: &mut MatchDetails, r: PlayerRef, aim: Point) -> Point {
        let accurate = md.player(r).skill.passing > self.random(0, passing::ACCURACY_ROLL) as f64;
        count(&mut md.player_mut(r).stats.passes, accurate);
        if accurate {
            return aim;
        }
        let spread = Self::pass_spread(md, r, aim);
        let dx = self.random_between(-spread, spread);
        let dy = self.random_between(-spread, spread);
        aim.offset(dx, dy)
    }

    pub(crate) fn ball_passed(&mut self, md: &mut MatchDetails, r: PlayerRef) -> Result<()> {
        let Some(target) = self.get_target_player(md, r) else {
            return self.ball_kicked(md, r);
        };
        let aim = md.player(target).current()?;
        let line = format!("ball passed by: {} to: {}", md.player(r).name, md.player(target).name);
        md.log(line);

        let landing = self.delivery(md, r, aim);
        let strength = md.player(r).skill.strength;
        self.calc_ball_movement_over_time(md, strength, landing, Some(r))?;
        Ok(())
    }

    pub(crate) fn through_ball(&mut self, md: &mut MatchDetails, r: PlayerRef) -> Result<()> {
        let Some(target) = self.get_target_player(md, r) else {
            return self.ball_kicked(md, r);
        };
        let at = md.player(target).current()?;
        let forward = md.team(r.side).defended_end(&md.pitch).forward();
        let aim = md.pitch.clamp(at.offset(0.0, forward * passing::THROUGH_BALL_LEAD));
        let line = format!("through ball passed by: {} to: {}", md.player(r).name, md.player(target).name);
        md.log(line);

        let landing = self.delivery(md, r, aim);
        let strength = md.player(r).skill.strength;
        self.calc_ball_movement_over_time(md, strength, landing, Some(r))?;
        Ok(())
    }

    /// Cross into the far side of the area between the six-yard line and the box edge.
    pub(crate) fn ball_crossed(&mut self, md: &mut MatchDetails, r: PlayerRef) -> Result<()> {
        let pitch = md.pitch;
        let player = md.player(r);
        let at = player.current()?;
        let strength = player.skill.strength;
        let line = format!("ball crossed by: {}", player.name);
        md.log(line);

        let attacked = md.team(r.side).attacked_end(&pitch);
        let depth = self.random_between(
            round_half_up(pitch.height / passing::CROSS_NEAR_DIVISOR),
            pitch.height / 6.0,
        );
        let centre = pitch.width / 2.0;
        let x = if at.x < centre {
            self.random_between(centre, centre + pitch.width / 4.0)
        } else {
            self.random_between(centre - pitch.width / 4.0, centre)
        };
        let target = Point::new(x, pitch.depth_from(attacked, depth));
        self.calc_ball_movement_over_time(md, strength, target, Some(r))?;
        Ok(())
    }
}
