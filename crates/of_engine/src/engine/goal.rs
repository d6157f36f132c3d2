//! Goals, keeper claims and the kick-off that follows a goal.

use rand::Rng;
use tracing::debug;

use super::constants::{goal, restart};
use super::math::{between, in_bottom_penalty, in_top_penalty, is_odd};
use super::MatchEngine;
use crate::error::{MatchError, Result};
use crate::models::{MatchDetails, PitchEnd, PlayerRef, Point, TeamSide};

/// Team credited with a goal when the ball crosses `byline` in `half`.
///
/// In odd halves the kick-off team defends the top end, so a ball over the top
/// byline counts for the second team; even halves mirror this.
pub fn scoring_side(half: u8, byline: PitchEnd) -> Result<TeamSide> {
    if half == 0 {
        return Err(MatchError::InvalidHalf(half));
    }
    let top_scorer = if is_odd(half) { TeamSide::Second } else { TeamSide::KickOff };
    Ok(match byline {
        PitchEnd::Top => top_scorer,
        PitchEnd::Bottom => top_scorer.opponent(),
    })
}

impl<R: Rng> MatchEngine<R> {
    /// After any ball movement: keeper claim first, then a goal if the ball is over a
    /// byline inside the goal mouth.
    pub(crate) fn check_goal_scored(&mut self, md: &mut MatchDetails) -> Result<()> {
        if md.half == 0 {
            return Err(MatchError::InvalidHalf(md.half));
        }
        let ball = md.ball.position.planar();
        let window = goal::KEEPER_CLAIM_WINDOW;

        for side in TeamSide::BOTH {
            let Some(index) = md.team(side).goalkeeper_index() else { continue };
            let r = PlayerRef::new(side, index);
            let keeper = md.player(r);
            let Some(at) = keeper.on_pitch() else { continue };
            let saving = keeper.skill.saving;
            let in_reach = between(ball.x, at.x - window, at.x + window)
                && between(ball.y, at.y - window, at.y + window);
            if in_reach && saving > self.random(0, 100) as f64 {
                md.give_ball_to(r);
                if in_top_penalty(&md.pitch, ball) || in_bottom_penalty(&md.pitch, ball) {
                    md.player_mut(r).stats.saves += 1;
                    let line = format!("ball saved by {}", md.player(r).name);
                    md.log(line);
                }
                return Ok(());
            }
        }

        if between(ball.x, md.pitch.left_post(), md.pitch.right_post()) {
            if ball.y < goal::TOP_LINE {
                self.goal_scored(md, scoring_side(md.half, PitchEnd::Top)?)?;
            } else if ball.y >= md.pitch.height {
                self.goal_scored(md, scoring_side(md.half, PitchEnd::Bottom)?)?;
            }
        }
        Ok(())
    }

    /// Credit a goal to `scorer`, reset both formations and restart from the centre.
    pub(crate) fn goal_scored(&mut self, md: &mut MatchDetails, scorer: TeamSide) -> Result<()> {
        let name = md.ball.last_touch.player_name.clone();
        md.statistics_mut(scorer).goals += 1;
        // Credited by name; an own goal leaves no individual tally.
        if let Some(player) = md.team_mut(scorer).players.iter_mut().find(|p| p.name == name) {
            player.stats.goals += 1;
        }
        let line = format!("Goal Scored by - {} - ({})", name, md.team(scorer).name);
        md.log(line);
        debug!(match_id = md.match_id, scorer = %name, ?scorer, "goal");

        self.reset_player_positions(md);
        self.kick_off_restart(md, scorer.opponent());
        self.finish_restart(md);
        Ok(())
    }

    /// Centre-spot restart for `side`: one forward on the spot, the other alongside.
    pub(crate) fn kick_off_restart(&mut self, md: &mut MatchDetails, side: TeamSide) {
        let centre = md.pitch.centre();
        let (a, b) = restart::KICK_OFF_FORWARDS;
        let pick = self.random(a as i64, b as i64) as usize;
        let other = if pick == a { b } else { a };

        md.remove_ball_from_all_players();
        md.ball.release();
        md.ball.ball_over_iterations.clear();
        md.ball.set_position(centre);

        let team = md.team(side);
        let Some(taker) = team.available_taker(pick) else { return };
        let partner = team.available_taker(other).filter(|&p| p != taker);

        md.player_mut(PlayerRef::new(side, taker)).relocate(centre);
        if let Some(p) = partner {
            let beside = Point::new(centre.x + restart::KICK_OFF_PARTNER_OFFSET, centre.y);
            md.player_mut(PlayerRef::new(side, p)).relocate(beside);
        }
        md.give_ball_to(PlayerRef::new(side, taker));
    }
}
