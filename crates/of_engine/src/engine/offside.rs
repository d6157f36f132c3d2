//! Offside flags, recomputed from scratch after both teams have moved.

use crate::models::{MatchDetails, PitchEnd, TeamSide};

/// Offside window for attackers facing `defending`: the keeper's line and the
/// deepest outfield defender, never beyond halfway. A keeper holding the ball
/// collapses the window onto their own line.
pub(crate) fn offside_y_pos(md: &MatchDetails, defending: TeamSide) -> (f64, f64) {
    let pitch = md.pitch;
    let team = md.team(defending);
    let end = team.defended_end(&pitch);
    let mut keeper_line = pitch.byline(end);
    let mut last_defender = pitch.height / 2.0;

    for player in &team.players {
        let Some(at) = player.on_pitch() else { continue };
        if player.position.is_goalkeeper() {
            keeper_line = at.y;
            if player.has_ball {
                return (at.y, at.y);
            }
        } else {
            last_defender = match end {
                PitchEnd::Top => last_defender.min(at.y),
                PitchEnd::Bottom => last_defender.max(at.y),
            };
        }
    }
    (keeper_line, last_defender)
}

/// Flag attackers of `attacking` standing strictly inside the window.
fn flag_team(md: &mut MatchDetails, attacking: TeamSide, window: (f64, f64)) {
    let pitch = md.pitch;
    let attacked = md.team(attacking).attacked_end(&pitch);
    let (keeper_line, last_defender) = window;
    let (lo, hi) = (keeper_line.min(last_defender), keeper_line.max(last_defender));

    let team = md.team_mut(attacking);
    for player in team.players.iter_mut() {
        player.offside = false;
    }

    let most_advanced = team
        .players
        .iter()
        .filter_map(|p| p.on_pitch().map(|at| (p, pitch.depth_of(attacked, at.y))))
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(p, _)| p);
    if let Some(lead) = most_advanced {
        let beyond = lead.on_pitch().is_some_and(|at| {
            pitch.depth_of(attacked, at.y) < pitch.depth_of(attacked, last_defender)
        });
        if lead.has_ball && beyond {
            return;
        }
    }

    for player in team.players.iter_mut() {
        if player.has_ball {
            continue;
        }
        if let Some(at) = player.on_pitch() {
            player.offside = at.y > lo && at.y < hi;
        }
    }
}

/// Recompute every offside flag. Skipped while the ball is loose, so flags set
/// before a kick survive until someone gains possession.
pub(crate) fn check_offside(md: &mut MatchDetails) {
    if md.ball.with_team.is_none() {
        return;
    }
    for attacking in TeamSide::BOTH {
        let window = offside_y_pos(md, attacking.opponent());
        flag_team(md, attacking, window);
    }
}
