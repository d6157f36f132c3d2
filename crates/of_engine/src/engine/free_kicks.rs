//! Free Kick Recipes
//!
//! Positions are table driven: five vertical bands, measured from the byline the
//! taking team defends, each with a depth anchor per role class for both sides.
//! The horizontal band only picks the ball's initial direction.
//!
//! | band            | attack gk/cb/fb/mid/fwd        | defence cb/fb/mid/fwd |
//! |-----------------|--------------------------------|-----------------------|
//! | own box         | ball/0.25/0.33/0.5/0.66        | 0.66/0.66/0.5/0.33    |
//! | own half        | 0.15/0.33/0.5/0.66/0.75        | 0.75/0.75/0.66/0.5    |
//! | opposition half | 0.25/0.5/0.66/0.75/0.85        | 0.85/0.85/0.75/0.66   |
//! | approach to box | 0.33/0.5/0.66/0.85/0.9         | 0.9/0.9/wall/0.75     |
//! | by-line         | 0.33/0.66/0.75/0.85/0.9        | 0.9/0.9/0.85/0.66     |

use rand::Rng;
use tracing::debug;

use super::constants::restart;
use super::MatchEngine;
use crate::models::{
    BallDirection, MatchDetails, Pitch, PitchEnd, PlayerRef, Point, Role, RoleClass, Team, TeamSide,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FreeKickBand {
    OwnBox,
    OwnHalf,
    OppositionHalf,
    ApproachToBox,
    ByLine,
}

impl FreeKickBand {
    /// Band of a ball at `ball`, for a team defending `own`.
    pub fn of(pitch: &Pitch, own: PitchEnd, ball: Point) -> Self {
        let h = pitch.height;
        let depth = pitch.depth_of(own, ball.y);
        if depth <= h / 6.0 {
            FreeKickBand::OwnBox
        } else if depth <= h / 2.0 {
            FreeKickBand::OwnHalf
        } else if depth <= h * 0.75 {
            FreeKickBand::OppositionHalf
        } else if depth <= h - h / 6.0 {
            FreeKickBand::ApproachToBox
        } else {
            FreeKickBand::ByLine
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Anchor {
    Origin,
    Ball,
    Depth(f64),
    Wall,
}

/// Anchors indexed by [`slot`]: goalkeeper, centre back, full back, midfield, forward.
struct Recipe {
    attack: [Anchor; 5],
    defence: [Anchor; 5],
}

use Anchor::{Ball, Depth, Origin, Wall};

fn recipe(band: FreeKickBand) -> Recipe {
    match band {
        FreeKickBand::OwnBox => Recipe {
            attack: [Ball, Depth(0.25), Depth(0.33), Depth(0.5), Depth(0.66)],
            defence: [Origin, Depth(0.66), Depth(0.66), Depth(0.5), Depth(0.33)],
        },
        FreeKickBand::OwnHalf => Recipe {
            attack: [Depth(0.15), Depth(0.33), Depth(0.5), Depth(0.66), Depth(0.75)],
            defence: [Origin, Depth(0.75), Depth(0.75), Depth(0.66), Depth(0.5)],
        },
        FreeKickBand::OppositionHalf => Recipe {
            attack: [Depth(0.25), Depth(0.5), Depth(0.66), Depth(0.75), Depth(0.85)],
            defence: [Origin, Depth(0.85), Depth(0.85), Depth(0.75), Depth(0.66)],
        },
        FreeKickBand::ApproachToBox => Recipe {
            attack: [Depth(0.33), Depth(0.5), Depth(0.66), Depth(0.85), Depth(0.9)],
            defence: [Origin, Depth(0.9), Depth(0.9), Wall, Depth(0.75)],
        },
        FreeKickBand::ByLine => Recipe {
            attack: [Depth(0.33), Depth(0.66), Depth(0.75), Depth(0.85), Depth(0.9)],
            defence: [Origin, Depth(0.9), Depth(0.9), Depth(0.85), Depth(0.66)],
        },
    }
}

fn slot(class: RoleClass) -> usize {
    match class {
        RoleClass::Goalkeeper => 0,
        RoleClass::CentreBack => 1,
        RoleClass::FullBack => 2,
        RoleClass::Midfielder => 3,
        RoleClass::Forward => 4,
    }
}

/// Preferred taker for the band: keeper, centre back, central midfielder, striker,
/// or the wide midfielder on the ball's side.
fn taker_for(band: FreeKickBand, team: &Team, pitch: &Pitch, ball: Point) -> Option<usize> {
    let wanted = match band {
        FreeKickBand::OwnBox => Role::GK,
        FreeKickBand::OwnHalf => Role::CB,
        FreeKickBand::OppositionHalf => Role::CM,
        FreeKickBand::ApproachToBox => Role::ST,
        FreeKickBand::ByLine if ball.x < pitch.width / 2.0 => Role::LM,
        FreeKickBand::ByLine => Role::RM,
    };
    team.players
        .iter()
        .position(|p| p.position == wanted && !p.is_sent_off())
        .or_else(|| team.available_taker(restart::THROW_IN_TAKER))
}

fn kick_direction(pitch: &Pitch, attacked: PitchEnd, ball: Point) -> BallDirection {
    let third = pitch.width / 3.0;
    let left = ball.x < third;
    let right = ball.x > pitch.width - third;
    match (attacked, left, right) {
        (PitchEnd::Top, true, _) => BallDirection::Northeast,
        (PitchEnd::Top, _, true) => BallDirection::Northwest,
        (PitchEnd::Top, _, _) => BallDirection::North,
        (PitchEnd::Bottom, true, _) => BallDirection::Southeast,
        (PitchEnd::Bottom, _, true) => BallDirection::Southwest,
        (PitchEnd::Bottom, _, _) => BallDirection::South,
    }
}

impl<R: Rng> MatchEngine<R> {
    /// Free kick for `side` with the ball at `ball`.
    pub(crate) fn set_free_kick(&mut self, md: &mut MatchDetails, side: TeamSide, ball: Point) {
        let pitch = md.pitch;
        let own = md.team(side).defended_end(&pitch);
        let band = FreeKickBand::of(&pitch, own, ball);
        let recipe = recipe(band);
        let ball_depth = pitch.depth_of(own, ball.y);

        md.remove_ball_from_all_players();
        md.ball.release();

        let place = |anchor: Anchor, player_origin: Point| -> Option<Point> {
            match anchor {
                Origin => Some(player_origin),
                Ball => Some(ball),
                Depth(f) => Some(Point::new(player_origin.x, pitch.depth_from(own, f * pitch.height))),
                Wall => None,
            }
        };

        for index in 0..md.team(side).players.len() {
            let player = &md.team(side).players[index];
            let anchor = recipe.attack[slot(player.position.class())];
            if let Some(spot) = place(anchor, player.origin_pos) {
                md.player_mut(PlayerRef::new(side, index)).relocate(pitch.clamp(spot));
            }
        }

        let defence = side.opponent();
        let wall_depth = pitch.depth_from(own, ball_depth + restart::WALL_DEPTH * pitch.height);
        let wall: Vec<usize> = (0..md.team(defence).players.len())
            .filter(|&i| recipe.defence[slot(md.team(defence).players[i].position.class())] == Wall)
            .collect();
        for index in 0..md.team(defence).players.len() {
            let player = &md.team(defence).players[index];
            let anchor = recipe.defence[slot(player.position.class())];
            let spot = match place(anchor, player.origin_pos) {
                Some(spot) => spot,
                None => {
                    let k = wall.iter().position(|&w| w == index).unwrap_or(0) as f64;
                    let centre = (wall.len().saturating_sub(1)) as f64 / 2.0;
                    Point::new(ball.x + (k - centre) * 2.0, wall_depth)
                }
            };
            md.player_mut(PlayerRef::new(defence, index)).relocate(pitch.clamp(spot));
        }

        if let Some(taker) = taker_for(band, md.team(side), &pitch, ball) {
            let r = PlayerRef::new(side, taker);
            md.player_mut(r).relocate(ball);
            md.give_ball_to(r);
        }
        md.ball.set_position(ball);
        md.ball.direction = kick_direction(&pitch, own.opposite(), ball);

        let line = format!("Freekick to - {}", md.team(side).name);
        md.log(line);
        debug!(?side, ?band, "free kick");
        self.finish_restart(md);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{sample_match, sample_pitch, seeded_engine};

    fn y_of(md: &MatchDetails, side: TeamSide, index: usize) -> f64 {
        md.team(side).players[index].on_pitch().unwrap().y
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    /// Runs a free kick and checks every player against the anchors given for the
    /// band. The taker stands on the ball whatever its own anchor says.
    fn assert_layout(side: TeamSide, ball: Point, band: FreeKickBand, attack: [Anchor; 5], defence: [Anchor; 5]) {
        let mut engine = seeded_engine(4);
        let mut md = sample_match();
        let pitch = md.pitch;
        let own = md.team(side).defended_end(&pitch);
        assert_eq!(FreeKickBand::of(&pitch, own, ball), band);
        engine.set_free_kick(&mut md, side, ball);

        let h = pitch.height;
        let wall_y = pitch.depth_from(own, pitch.depth_of(own, ball.y) + 0.09 * h);
        let expected = |anchor: Anchor, origin: Point| match anchor {
            Origin => Some(origin),
            Ball => Some(ball),
            Depth(f) => Some(pitch.clamp(Point::new(origin.x, pitch.depth_from(own, f * h)))),
            Wall => None,
        };

        for (team_side, table) in [(side, attack), (side.opponent(), defence)] {
            for (index, player) in md.team(team_side).players.iter().enumerate() {
                let at = player.on_pitch().unwrap();
                if player.has_ball {
                    assert_eq!(team_side, side);
                    assert_eq!(at, ball);
                    continue;
                }
                match expected(table[slot(player.position.class())], player.origin_pos) {
                    Some(spot) => assert!(
                        close(at.x, spot.x) && close(at.y, spot.y),
                        "{band:?} {team_side:?} {index} at {at}, expected {spot}"
                    ),
                    None => assert!(close(at.y, wall_y), "{band:?} wall {index} at {at}"),
                }
            }
        }
        assert!(md.team(side).players.iter().any(|p| p.has_ball));
    }

    const OWN_BOX: ([Anchor; 5], [Anchor; 5]) = (
        [Ball, Depth(0.25), Depth(0.33), Depth(0.5), Depth(0.66)],
        [Origin, Depth(0.66), Depth(0.66), Depth(0.5), Depth(0.33)],
    );
    const OWN_HALF: ([Anchor; 5], [Anchor; 5]) = (
        [Depth(0.15), Depth(0.33), Depth(0.5), Depth(0.66), Depth(0.75)],
        [Origin, Depth(0.75), Depth(0.75), Depth(0.66), Depth(0.5)],
    );
    const OPPOSITION_HALF: ([Anchor; 5], [Anchor; 5]) = (
        [Depth(0.25), Depth(0.5), Depth(0.66), Depth(0.75), Depth(0.85)],
        [Origin, Depth(0.85), Depth(0.85), Depth(0.75), Depth(0.66)],
    );
    const APPROACH: ([Anchor; 5], [Anchor; 5]) = (
        [Depth(0.33), Depth(0.5), Depth(0.66), Depth(0.85), Depth(0.9)],
        [Origin, Depth(0.9), Depth(0.9), Wall, Depth(0.75)],
    );
    const BY_LINE: ([Anchor; 5], [Anchor; 5]) = (
        [Depth(0.33), Depth(0.66), Depth(0.75), Depth(0.85), Depth(0.9)],
        [Origin, Depth(0.9), Depth(0.9), Depth(0.85), Depth(0.66)],
    );

    #[test]
    fn test_own_box_anchors_from_both_ends() {
        let (attack, defence) = OWN_BOX;
        assert_layout(TeamSide::KickOff, Point::new(340.0, 100.0), FreeKickBand::OwnBox, attack, defence);
        assert_layout(TeamSide::Second, Point::new(340.0, 950.0), FreeKickBand::OwnBox, attack, defence);
    }

    #[test]
    fn test_own_half_anchors_from_both_ends() {
        let (attack, defence) = OWN_HALF;
        assert_layout(TeamSide::KickOff, Point::new(340.0, 400.0), FreeKickBand::OwnHalf, attack, defence);
        assert_layout(TeamSide::Second, Point::new(340.0, 650.0), FreeKickBand::OwnHalf, attack, defence);
    }

    #[test]
    fn test_opposition_half_anchors_from_both_ends() {
        let (attack, defence) = OPPOSITION_HALF;
        assert_layout(TeamSide::KickOff, Point::new(340.0, 600.0), FreeKickBand::OppositionHalf, attack, defence);
        assert_layout(TeamSide::Second, Point::new(340.0, 450.0), FreeKickBand::OppositionHalf, attack, defence);
    }

    #[test]
    fn test_approach_to_box_anchors_from_both_ends() {
        let (attack, defence) = APPROACH;
        assert_layout(TeamSide::KickOff, Point::new(200.0, 850.0), FreeKickBand::ApproachToBox, attack, defence);
        assert_layout(TeamSide::Second, Point::new(200.0, 200.0), FreeKickBand::ApproachToBox, attack, defence);
    }

    #[test]
    fn test_by_line_anchors_from_both_ends() {
        let (attack, defence) = BY_LINE;
        assert_layout(TeamSide::KickOff, Point::new(640.0, 1000.0), FreeKickBand::ByLine, attack, defence);
        assert_layout(TeamSide::Second, Point::new(40.0, 50.0), FreeKickBand::ByLine, attack, defence);
    }

    #[test]
    fn test_band_boundaries() {
        let pitch = sample_pitch();
        let top = PitchEnd::Top;
        assert_eq!(FreeKickBand::of(&pitch, top, Point::new(340.0, 100.0)), FreeKickBand::OwnBox);
        assert_eq!(FreeKickBand::of(&pitch, top, Point::new(340.0, 400.0)), FreeKickBand::OwnHalf);
        assert_eq!(FreeKickBand::of(&pitch, top, Point::new(340.0, 600.0)), FreeKickBand::OppositionHalf);
        assert_eq!(FreeKickBand::of(&pitch, top, Point::new(340.0, 850.0)), FreeKickBand::ApproachToBox);
        assert_eq!(FreeKickBand::of(&pitch, top, Point::new(40.0, 1000.0)), FreeKickBand::ByLine);
        // Mirrored for a team defending the bottom.
        assert_eq!(FreeKickBand::of(&pitch, PitchEnd::Bottom, Point::new(340.0, 950.0)), FreeKickBand::OwnBox);
    }

    #[test]
    fn test_opposition_half_recipe() {
        let mut engine = seeded_engine(1);
        let mut md = sample_match();
        engine.set_free_kick(&mut md, TeamSide::KickOff, Point::new(340.0, 600.0));

        let h = 1050.0;
        // Home defends the top: depths are measured from y = 0.
        assert!(close(y_of(&md, TeamSide::KickOff, 0), 0.25 * h));
        assert!(close(y_of(&md, TeamSide::KickOff, 2), 0.5 * h));
        assert!(close(y_of(&md, TeamSide::KickOff, 1), 0.66 * h));
        assert!(close(y_of(&md, TeamSide::KickOff, 5), 0.75 * h));
        assert!(close(y_of(&md, TeamSide::KickOff, 9), 0.85 * h));
        // First central midfielder takes it.
        let taker = &md.kick_off_team.players[6];
        assert!(taker.has_ball);
        assert_eq!(taker.on_pitch(), Some(Point::new(340.0, 600.0)));

        assert_eq!(md.second_team.players[0].on_pitch(), Some(Point::new(340.0, 1050.0)));
        assert!(close(y_of(&md, TeamSide::Second, 2), 0.85 * h));
        assert!(close(y_of(&md, TeamSide::Second, 4), 0.85 * h));
        assert!(close(y_of(&md, TeamSide::Second, 7), 0.75 * h));
        assert!(close(y_of(&md, TeamSide::Second, 10), 0.66 * h));

        assert_eq!(md.ball.direction, BallDirection::South);
        assert!(md.iteration_log.iter().any(|l| l == "Freekick to - Home"));
        assert!(md.end_iteration);
    }

    #[test]
    fn test_own_box_recipe_keeper_takes() {
        let mut engine = seeded_engine(1);
        let mut md = sample_match();
        // Away defends the bottom; ball 60 in front of its byline, on the left.
        engine.set_free_kick(&mut md, TeamSide::Second, Point::new(150.0, 990.0));
        let h = 1050.0;
        let keeper = &md.second_team.players[0];
        assert!(keeper.has_ball);
        assert_eq!(keeper.on_pitch(), Some(Point::new(150.0, 990.0)));
        assert!(close(y_of(&md, TeamSide::Second, 2), h - 0.25 * h));
        assert!(close(y_of(&md, TeamSide::Second, 10), h - 0.66 * h));
        assert!(close(y_of(&md, TeamSide::KickOff, 9), h - 0.33 * h));
        assert_eq!(md.ball.direction, BallDirection::Northeast);
    }

    #[test]
    fn test_wall_in_front_of_ball() {
        let mut engine = seeded_engine(1);
        let mut md = sample_match();
        engine.set_free_kick(&mut md, TeamSide::KickOff, Point::new(200.0, 850.0));
        let wall_y = 850.0 + 0.09 * 1050.0;
        for index in 5..=8 {
            let p = md.second_team.players[index].on_pitch().unwrap();
            assert!(close(p.y, wall_y), "wall player {index} at {p}");
            assert!((p.x - 200.0).abs() <= 3.0);
        }
        assert!(md.kick_off_team.players[9].has_ball);
        assert_eq!(md.ball.direction, BallDirection::Southeast);
    }

    #[test]
    fn test_by_line_wide_midfielder_takes() {
        let mut engine = seeded_engine(1);
        let mut md = sample_match();
        engine.set_free_kick(&mut md, TeamSide::KickOff, Point::new(640.0, 1000.0));
        assert!(md.kick_off_team.players[8].has_ball);
        assert_eq!(md.ball.direction, BallDirection::Southwest);
    }
}
