//! Boundary dispatch and the out-of-play restarts.
//!
//! `keep_in_boundaries` decides whether a ball target is still in play. Every
//! other branch places a full restart (throw-in, corner, goal kick or goal),
//! clears the flight queue and ends the tick.

use rand::Rng;
use tracing::debug;

use super::constants::restart;
use super::goal::scoring_side;
use super::math::{between, random_penalty_position};
use super::MatchEngine;
use crate::error::Result;
use crate::models::{MatchDetails, PitchEnd, PlayerRef, Point, TeamSide};

/// Result of the boundary check.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Boundary {
    InPlay(Point),
    Restart,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Touchline {
    Left,
    Right,
}

/// Side defending `end` right now.
pub(crate) fn defender_of(md: &MatchDetails, end: PitchEnd) -> TeamSide {
    if md.kick_off_team.defended_end(&md.pitch) == end {
        TeamSide::KickOff
    } else {
        TeamSide::Second
    }
}

impl<R: Rng> MatchEngine<R> {
    /// Route a ball target that may have left the pitch. `kicking` is the side that
    /// last played the ball.
    pub(crate) fn keep_in_boundaries(
        &mut self,
        md: &mut MatchDetails,
        kicking: TeamSide,
        intended: Point,
    ) -> Result<Boundary> {
        let pitch = md.pitch;

        if intended.x < 0.0 || intended.x > pitch.width {
            let touchline = if intended.x < 0.0 { Touchline::Left } else { Touchline::Right };
            self.set_throw_in(md, kicking.opponent(), touchline, intended.y);
            return Ok(Boundary::Restart);
        }

        if intended.y < 0.0 || intended.y > pitch.height {
            let end = if intended.y < 0.0 { PitchEnd::Top } else { PitchEnd::Bottom };
            if between(intended.x, pitch.left_post(), pitch.right_post()) {
                let scorer = scoring_side(md.half, end)?;
                self.goal_scored(md, scorer)?;
                return Ok(Boundary::Restart);
            }

            let defending = defender_of(md, end);
            if kicking == defending {
                let touchline =
                    if intended.x < pitch.width / 2.0 { Touchline::Left } else { Touchline::Right };
                self.set_corner(md, defending.opponent(), end, touchline);
            } else {
                self.set_goal_kick(md, defending);
            }
            return Ok(Boundary::Restart);
        }

        md.ball_intended = Some(intended);
        Ok(Boundary::InPlay(intended))
    }

    /// Common tail of every restart.
    pub(crate) fn finish_restart(&mut self, md: &mut MatchDetails) {
        md.ball.ball_over_iterations.clear();
        md.ball_intended = None;
        md.end_iteration = true;
    }

    /// Everyone back to their formation slot, nobody on the ball.
    pub(crate) fn reset_player_positions(&mut self, md: &mut MatchDetails) {
        for player in md.all_players_mut() {
            let origin = player.origin_pos;
            player.relocate(origin);
            player.intent_pos = origin;
            player.has_ball = false;
            player.offside = false;
        }
        md.ball.release();
    }

    // ===========================================
    // Throw-in
    // ===========================================

    pub(crate) fn set_throw_in(
        &mut self,
        md: &mut MatchDetails,
        side: TeamSide,
        touchline: Touchline,
        y: f64,
    ) {
        let pitch = md.pitch;
        let y = y.clamp(restart::THROW_IN_MIN_Y, pitch.height - restart::THROW_IN_BOTTOM_MARGIN);
        let (line_x, inward) = match touchline {
            Touchline::Left => (0.0, 1.0),
            Touchline::Right => (pitch.width, -1.0),
        };

        md.remove_ball_from_all_players();
        let Some(taker) = md.team(side).available_taker(restart::THROW_IN_TAKER) else {
            md.ball.release();
            md.ball.set_position(Point::new(line_x, y));
            self.finish_restart(md);
            return;
        };
        let shift = y - md.team(side).players[taker].origin_pos.y;

        for (team_side, dy) in [(side, shift), (side.opponent(), -shift)] {
            for player in md.team_mut(team_side).players.iter_mut() {
                let origin = player.origin_pos;
                player.relocate(Point::new(origin.x, (origin.y + dy).clamp(0.0, pitch.height)));
            }
        }

        let shape = [
            (restart::THROW_IN_SHORT, 15.0, 0.0),
            (restart::THROW_IN_AHEAD, 10.0, 10.0),
            (restart::THROW_IN_BEHIND, 10.0, -10.0),
        ];
        for (index, dx, dy) in shape {
            if index == taker {
                continue;
            }
            let spot = pitch.clamp(Point::new(line_x + inward * dx, y + dy));
            md.player_mut(PlayerRef::new(side, index)).relocate(spot);
        }
        md.player_mut(PlayerRef::new(side, taker)).relocate(Point::new(line_x, y));
        md.give_ball_to(PlayerRef::new(side, taker));

        let line = format!("Throw in to - {}", md.team(side).name);
        md.log(line);
        debug!(?side, ?touchline, y, "throw-in");
        self.finish_restart(md);
    }

    // ===========================================
    // Corner
    // ===========================================

    /// Corner for `side` at the `end` byline, on the `touchline` flag.
    pub(crate) fn set_corner(
        &mut self,
        md: &mut MatchDetails,
        side: TeamSide,
        end: PitchEnd,
        touchline: Touchline,
    ) {
        let pitch = md.pitch;
        md.remove_ball_from_all_players();

        for index in 0..md.team(side).players.len() {
            let spot = if index <= restart::CORNER_NEAR_POST {
                md.team(side).players[index].origin_pos
            } else {
                random_penalty_position(&mut self.rng, &pitch, end)
            };
            md.player_mut(PlayerRef::new(side, index)).relocate(spot);
        }
        for index in 0..md.team(side.opponent()).players.len() {
            let spot = random_penalty_position(&mut self.rng, &pitch, end);
            md.player_mut(PlayerRef::new(side.opponent(), index)).relocate(spot);
        }

        let (flag_x, post_x) = match touchline {
            Touchline::Left => (0.0, pitch.left_post()),
            Touchline::Right => (pitch.width, pitch.right_post()),
        };
        let near_post = Point::new(post_x, pitch.depth_from(end, restart::CORNER_NEAR_POST_DEPTH));
        md.player_mut(PlayerRef::new(side, restart::CORNER_NEAR_POST)).relocate(near_post);

        if let Some(taker) = md.team(side).available_taker(restart::CORNER_TAKER) {
            let flag = Point::new(flag_x, pitch.byline(end));
            md.player_mut(PlayerRef::new(side, taker)).relocate(flag);
            md.give_ball_to(PlayerRef::new(side, taker));
        }

        md.statistics_mut(side).corners += 1;
        let line = format!("Corner to - {}", md.team(side).name);
        md.log(line);
        debug!(?side, ?end, ?touchline, "corner");
        self.finish_restart(md);
    }

    // ===========================================
    // Goal kick
    // ===========================================

    /// Goal kick for `side` from the end it defends. Both outfields step away from
    /// that goal; keepers stay on their slots.
    pub(crate) fn set_goal_kick(&mut self, md: &mut MatchDetails, side: TeamSide) {
        let pitch = md.pitch;
        let end = md.team(side).defended_end(&pitch);
        self.reset_player_positions(md);

        let shift = end.forward() * restart::GOAL_KICK_SHIFT;
        for player in md.all_players_mut() {
            if player.position.is_goalkeeper() {
                continue;
            }
            let origin = player.origin_pos;
            player.relocate(Point::new(origin.x, (origin.y + shift).clamp(0.0, pitch.height)));
        }

        let keeper = md.team(side).goalkeeper_index().filter(|&i| !md.team(side).players[i].is_sent_off());
        let taker = keeper.or_else(|| md.team(side).available_taker(0));
        if let Some(taker) = taker {
            let spot = Point::new(pitch.width / 2.0, pitch.depth_from(end, restart::GOAL_KICK_DEPTH));
            md.player_mut(PlayerRef::new(side, taker)).relocate(spot);
            md.give_ball_to(PlayerRef::new(side, taker));
        }

        let line = format!("Goal Kick to - {}", md.team(side).name);
        md.log(line);
        debug!(?side, ?end, "goal kick");
        self.finish_restart(md);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::math::in_penalty_box;
    use crate::test_fixtures::{sample_match, seeded_engine};

    #[test]
    fn test_in_play_is_left_untouched() {
        let mut engine = seeded_engine(1);
        let mut md = sample_match();
        let before = md.clone();
        let res = engine.keep_in_boundaries(&mut md, TeamSide::KickOff, Point::new(100.0, 100.0)).unwrap();
        assert_eq!(res, Boundary::InPlay(Point::new(100.0, 100.0)));
        assert_eq!(md.ball_intended, Some(Point::new(100.0, 100.0)));
        md.ball_intended = None;
        assert_eq!(md, before);
    }

    #[test]
    fn test_every_restart_ends_iteration_with_empty_queue() {
        let targets = [
            Point::new(-5.0, 500.0),
            Point::new(700.0, 500.0),
            Point::new(340.0, -5.0),
            Point::new(340.0, 1060.0),
            Point::new(50.0, -5.0),
            Point::new(600.0, 1060.0),
        ];
        for kicking in TeamSide::BOTH {
            for target in targets {
                let mut engine = seeded_engine(9);
                let mut md = sample_match();
                md.ball.ball_over_iterations.push_back([1.0, 1.0, 1.0].into());
                let res = engine.keep_in_boundaries(&mut md, kicking, target).unwrap();
                assert_eq!(res, Boundary::Restart, "{target}");
                assert!(md.end_iteration, "{target}");
                assert!(md.ball.ball_over_iterations.is_empty(), "{target}");
                assert!(md.holder().is_some(), "{target}");
            }
        }
    }

    #[test]
    fn test_throw_in_shape() {
        let mut engine = seeded_engine(1);
        let mut md = sample_match();
        engine.keep_in_boundaries(&mut md, TeamSide::KickOff, Point::new(-3.0, 400.0)).unwrap();

        let taker = &md.second_team.players[5];
        assert!(taker.has_ball);
        assert_eq!(taker.on_pitch(), Some(Point::new(0.0, 400.0)));
        assert_eq!(md.second_team.players[8].on_pitch(), Some(Point::new(15.0, 400.0)));
        assert_eq!(md.second_team.players[7].on_pitch(), Some(Point::new(10.0, 410.0)));
        assert_eq!(md.second_team.players[9].on_pitch(), Some(Point::new(10.0, 390.0)));
        assert!(md.iteration_log.iter().any(|l| l == "Throw in to - Away"));

        // Taker origin y is 780, so the throwing team moves up by 380 and the
        // opponents move down by the same amount.
        assert_eq!(md.second_team.players[2].on_pitch().unwrap().y, 970.0 - 380.0);
        assert_eq!(md.kick_off_team.players[2].on_pitch().unwrap().y, 80.0 + 380.0);
    }

    #[test]
    fn test_throw_in_y_is_clamped() {
        let mut engine = seeded_engine(1);
        let mut md = sample_match();
        engine.set_throw_in(&mut md, TeamSide::KickOff, Touchline::Right, 2.0);
        assert_eq!(md.kick_off_team.players[5].on_pitch(), Some(Point::new(680.0, 30.0)));
        engine.set_throw_in(&mut md, TeamSide::KickOff, Touchline::Right, 1049.0);
        assert_eq!(md.kick_off_team.players[5].on_pitch(), Some(Point::new(680.0, 1040.0)));
    }

    #[test]
    fn test_corner_when_defender_puts_it_behind() {
        let mut engine = seeded_engine(4);
        let mut md = sample_match();
        // Home defends the top; Home's own touch over its byline is a corner for Away.
        engine.keep_in_boundaries(&mut md, TeamSide::KickOff, Point::new(600.0, -4.0)).unwrap();
        assert_eq!(md.second_team_statistics.corners, 1);
        assert!(md.iteration_log.iter().any(|l| l == "Corner to - Away"));

        let taker = &md.second_team.players[1];
        assert!(taker.has_ball);
        assert_eq!(taker.on_pitch(), Some(Point::new(680.0, 0.0)));
        assert_eq!(md.second_team.players[4].on_pitch(), Some(Point::new(385.0, 20.0)));
        for (i, player) in md.kick_off_team.players.iter().enumerate() {
            let p = player.on_pitch().unwrap();
            assert!(in_penalty_box(&md.pitch, PitchEnd::Top, p), "defender {i} at {p}");
        }
        for player in &md.second_team.players[5..] {
            assert!(in_penalty_box(&md.pitch, PitchEnd::Top, player.on_pitch().unwrap()));
        }
    }

    #[test]
    fn test_goal_kick_when_attacker_puts_it_behind() {
        let mut engine = seeded_engine(4);
        let mut md = sample_match();
        engine.keep_in_boundaries(&mut md, TeamSide::Second, Point::new(100.0, -4.0)).unwrap();
        let keeper = &md.kick_off_team.players[0];
        assert!(keeper.has_ball);
        assert_eq!(keeper.on_pitch(), Some(Point::new(340.0, 20.0)));
        assert!(md.iteration_log.iter().any(|l| l == "Goal Kick to - Home"));

        // Every outfield player of both teams is pushed 80 away from the top goal.
        for side in TeamSide::BOTH {
            for player in &md.team(side).players[1..] {
                let origin = player.origin_pos;
                assert_eq!(player.on_pitch(), Some(Point::new(origin.x, origin.y + 80.0)), "{}", player.name);
            }
        }
        assert_eq!(md.second_team.players[0].on_pitch(), Some(Point::new(340.0, 1050.0)));
    }

    #[test]
    fn test_goal_kick_at_bottom_shifts_up() {
        let mut engine = seeded_engine(4);
        let mut md = sample_match();
        engine.keep_in_boundaries(&mut md, TeamSide::KickOff, Point::new(600.0, 1060.0)).unwrap();
        let keeper = &md.second_team.players[0];
        assert!(keeper.has_ball);
        assert_eq!(keeper.on_pitch(), Some(Point::new(340.0, 1030.0)));
        assert_eq!(md.second_team.players[9].on_pitch(), Some(Point::new(280.0, 470.0)));
        assert_eq!(md.kick_off_team.players[9].on_pitch(), Some(Point::new(280.0, 420.0)));
        assert_eq!(md.kick_off_team.players[0].on_pitch(), Some(Point::new(340.0, 0.0)));
    }

    #[test]
    fn test_throw_in_without_taker_still_ends_tick() {
        let mut engine = seeded_engine(1);
        let mut md = sample_match();
        for player in &mut md.second_team.players[1..] {
            player.send_off();
        }
        md.ball.ball_over_iterations.push_back([1.0, 1.0, 1.0].into());
        let res = engine.keep_in_boundaries(&mut md, TeamSide::KickOff, Point::new(-3.0, 400.0)).unwrap();
        assert_eq!(res, Boundary::Restart);
        assert!(md.end_iteration);
        assert!(md.ball.ball_over_iterations.is_empty());
        assert!(md.holder().is_none());
        assert_eq!(md.ball.position.planar(), Point::new(0.0, 400.0));
    }

    #[test]
    fn test_ball_between_posts_is_goal() {
        let mut engine = seeded_engine(4);
        let mut md = sample_match();
        md.ball.last_touch.player_name = "Away Player 10".to_string();
        engine.keep_in_boundaries(&mut md, TeamSide::Second, Point::new(340.0, -4.0)).unwrap();
        assert_eq!(md.second_team_statistics.goals, 1);
        assert_eq!(md.second_team.players[9].stats.goals, 1);
        assert_eq!(md.holder().unwrap().side, TeamSide::KickOff);
    }
}
