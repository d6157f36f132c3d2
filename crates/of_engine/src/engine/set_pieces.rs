//! Set pieces awarded after a foul or an offside: penalty or free kick.

use rand::Rng;
use tracing::debug;

use super::constants::restart;
use super::math::{in_penalty_box, round_half_up};
use super::MatchEngine;
use crate::error::Result;
use crate::models::{Action, BallDirection, MatchDetails, PitchEnd, PlayerRef, Point, TeamSide};

impl<R: Rng> MatchEngine<R> {
    /// Restart for `fouled` at the ball: a penalty when the ball is inside the box
    /// the fouled side attacks, otherwise a free kick.
    pub(crate) fn set_setpiece(&mut self, md: &mut MatchDetails, fouled: TeamSide) -> Result<()> {
        let ball = md.ball.position.planar();
        let attacked = md.team(fouled).attacked_end(&md.pitch);
        if in_penalty_box(&md.pitch, attacked, ball) {
            md.statistics_mut(fouled).penalties += 1;
            self.set_penalty(md, fouled, attacked);
        } else {
            md.statistics_mut(fouled).freekicks += 1;
            self.set_free_kick(md, fouled, ball);
        }
        Ok(())
    }

    /// Penalty for `side` at the `end` goal.
    pub(crate) fn set_penalty(&mut self, md: &mut MatchDetails, side: TeamSide, end: PitchEnd) {
        let pitch = md.pitch;
        let edge = Point::new(pitch.width / 2.0, pitch.depth_from(end, pitch.height / 6.0));
        let spot = Point::new(
            pitch.width / 2.0,
            pitch.depth_from(end, round_half_up(pitch.height / restart::PENALTY_SPOT_DIVISOR)),
        );
        // Staggered line along the edge of the box, mirrored for the bottom end.
        let step = match end {
            PitchEnd::Top => restart::PENALTY_STAGGER,
            PitchEnd::Bottom => -restart::PENALTY_STAGGER,
        };
        let sign = step.signum();

        md.remove_ball_from_all_players();
        md.ball.release();
        for team_side in [side, side.opponent()] {
            let keeper = PlayerRef::new(team_side, 0);
            let origin = md.player(keeper).origin_pos;
            md.player_mut(keeper).relocate(origin);
        }

        let taker = md.team(side).available_taker(restart::PENALTY_TAKER);
        for index in 1..md.team(side).players.len() {
            let offset = (index - 1) as f64 * step;
            if Some(index) != taker {
                let x = edge.x + sign * restart::PENALTY_ATTACK_START + offset;
                md.player_mut(PlayerRef::new(side, index)).relocate(Point::new(x, edge.y));
            }
            let x = edge.x + sign * restart::PENALTY_DEFENCE_START + offset;
            md.player_mut(PlayerRef::new(side.opponent(), index)).relocate(Point::new(x, edge.y));
        }

        if let Some(taker) = taker {
            let r = PlayerRef::new(side, taker);
            md.player_mut(r).relocate(spot);
            md.player_mut(r).action = Action::Penalty.as_str().to_string();
            md.give_ball_to(r);
        }
        md.ball.direction = match end {
            PitchEnd::Top => BallDirection::North,
            PitchEnd::Bottom => BallDirection::South,
        };

        let line = format!("Penalty to - {}", md.team(side).name);
        md.log(line);
        debug!(?side, ?end, "penalty");
        self.finish_restart(md);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{sample_match, seeded_engine};

    #[test]
    fn test_foul_in_attacked_box_is_penalty() {
        let mut engine = seeded_engine(1);
        let mut md = sample_match();
        // Home attacks the bottom end.
        md.ball.set_position(Point::new(340.0, 1000.0));
        engine.set_setpiece(&mut md, TeamSide::KickOff).unwrap();

        assert_eq!(md.kick_off_team_statistics.penalties, 1);
        assert_eq!(md.kick_off_team_statistics.freekicks, 0);
        let taker = &md.kick_off_team.players[10];
        assert!(taker.has_ball);
        assert_eq!(taker.action, "penalty");
        assert_eq!(taker.on_pitch(), Some(Point::new(340.0, 1050.0 - 60.0)));
        assert_eq!(md.ball.direction, BallDirection::South);
        assert!(md.iteration_log.iter().any(|l| l == "Penalty to - Home"));
        assert!(md.end_iteration);
    }

    #[test]
    fn test_penalty_line_up() {
        let mut engine = seeded_engine(1);
        let mut md = sample_match();
        engine.set_penalty(&mut md, TeamSide::Second, PitchEnd::Top);

        let edge_y = 1050.0 / 6.0;
        assert_eq!(md.second_team.players[1].on_pitch(), Some(Point::new(331.0, edge_y)));
        assert_eq!(md.kick_off_team.players[1].on_pitch(), Some(Point::new(330.0, edge_y)));
        assert_eq!(md.second_team.players[2].on_pitch(), Some(Point::new(333.0, edge_y)));
        assert_eq!(md.kick_off_team.players[10].on_pitch(), Some(Point::new(348.0, edge_y)));
        assert_eq!(md.second_team.players[10].on_pitch(), Some(Point::new(340.0, 60.0)));
        assert_eq!(md.kick_off_team.players[0].on_pitch(), Some(Point::new(340.0, 0.0)));
        assert_eq!(md.ball.direction, BallDirection::North);
    }

    #[test]
    fn test_foul_outside_box_is_free_kick() {
        let mut engine = seeded_engine(1);
        let mut md = sample_match();
        md.ball.set_position(Point::new(340.0, 600.0));
        engine.set_setpiece(&mut md, TeamSide::Second).unwrap();
        assert_eq!(md.second_team_statistics.freekicks, 1);
        assert_eq!(md.second_team_statistics.penalties, 0);
        assert!(md.iteration_log.iter().any(|l| l == "Freekick to - Away"));
        assert!(md.end_iteration);
    }
}
