//! Tackle System
//!
//! Standing and slide tackles against the ball carrier:
//! - foul roll, with a card and a set piece for the fouled side
//! - tackle score against retention score
//! - contact injuries and the post-tackle nudge

use rand::Rng;
use tracing::debug;

use super::config::FoulOdds;
use super::math::between;
use super::MatchEngine;
use crate::error::Result;
use crate::models::{Action, MatchDetails, PlayerRef, Point};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TackleKind {
    Standing,
    Slide,
}

impl TackleKind {
    pub fn from_action(action: Action) -> Option<Self> {
        match action {
            Action::Tackle => Some(TackleKind::Standing),
            Action::Slide => Some(TackleKind::Slide),
            _ => None,
        }
    }

    /// Distance both players are pushed apart afterwards.
    pub fn increment(self) -> f64 {
        match self {
            TackleKind::Standing => 1.0,
            TackleKind::Slide => 3.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TackleOutcome {
    Foul,
    Won,
    Lost,
}

impl<R: Rng> MatchEngine<R> {
    /// `random(0, range)` landing strictly inside `(0, threshold/2 - 1)`.
    pub(crate) fn was_foul(&mut self, odds: FoulOdds) -> bool {
        let draw = self.random(0, odds.range) as f64;
        between(draw, 0.0, odds.threshold as f64 / 2.0 - 1.0)
    }

    /// `tackler` challenges the opposition ball carrier.
    pub(crate) fn resolve_tackle(
        &mut self,
        md: &mut MatchDetails,
        tackler: PlayerRef,
        kind: TackleKind,
    ) -> Result<TackleOutcome> {
        let Some(carrier) = md.holder().filter(|c| c.side != tackler.side) else {
            return Ok(TackleOutcome::Lost);
        };
        md.player_mut(tackler).stats.tackles.total += 1;
        let attempt = match kind {
            TackleKind::Standing => format!("Tackle attempted by: {}", md.player(tackler).name),
            TackleKind::Slide => format!("Slide tackle attempted by: {}", md.player(tackler).name),
        };
        md.log(attempt);

        let odds = match kind {
            TackleKind::Standing => self.config.fouls.standing,
            TackleKind::Slide => self.config.fouls.slide,
        };
        if self.was_foul(odds) {
            let line = format!("Foul against: {}", md.player(carrier).name);
            md.log(line);
            md.player_mut(tackler).stats.tackles.fouls += 1;
            md.statistics_mut(tackler.side).fouls += 1;
            self.award_foul_card(md, tackler, kind);
            debug!(tackler = %md.player(tackler).name, ?kind, "foul");
            self.set_setpiece(md, carrier.side)?;
            return Ok(TackleOutcome::Foul);
        }

        let t = md.player(tackler).skill;
        let c = md.player(carrier).skill;
        let tackle_score = (t.tackling + t.strength) / 2.0 + self.random(-5, 5) as f64;
        let retention_score = (c.agility + c.strength) / 2.0 + self.random(-5, 5) as f64;
        let injury = self.config.injury;

        let outcome = if tackle_score > retention_score {
            md.player_mut(tackler).stats.tackles.on += 1;
            md.give_ball_to(tackler);
            let line = format!("Successful tackle by: {}", md.player(tackler).name);
            md.log(line);
            self.tackle_injury(md, carrier, injury.tackle_likely_odds);
            self.tackle_injury(md, tackler, injury.tackle_unlikely_odds);
            self.set_post_tackle_position(md, tackler, carrier, kind.increment());
            TackleOutcome::Won
        } else {
            md.player_mut(tackler).stats.tackles.off += 1;
            let line = format!("Failed tackle by: {}", md.player(tackler).name);
            md.log(line);
            self.tackle_injury(md, tackler, injury.tackle_likely_odds);
            self.tackle_injury(md, carrier, injury.tackle_unlikely_odds);
            self.set_post_tackle_position(md, carrier, tackler, kind.increment());
            TackleOutcome::Lost
        };
        debug!(?outcome, ?kind, tackle_score, retention_score, "tackle");
        Ok(outcome)
    }

    /// Both players step toward the goal they attack; the ball stays with its holder.
    fn set_post_tackle_position(
        &mut self,
        md: &mut MatchDetails,
        winner: PlayerRef,
        loser: PlayerRef,
        increment: f64,
    ) {
        let pitch = md.pitch;
        for r in [winner, loser] {
            let forward = md.team(r.side).defended_end(&pitch).forward();
            if let Some(p) = md.player(r).on_pitch() {
                let y = (p.y + forward * increment).clamp(0.0, pitch.height);
                md.player_mut(r).relocate(Point::new(p.x, y));
            }
        }
        if let Some(at) = md.holder().and_then(|h| md.player(h).on_pitch()) {
            md.ball.set_position(at);
        }
    }
}
