//! Injury rolls: one random squad member per team each tick, and both players
//! after tackle contact.

use rand::Rng;

use super::MatchEngine;
use crate::models::{MatchDetails, PlayerRef, TeamSide};

impl<R: Rng> MatchEngine<R> {
    /// `random(0, odds) == hit_value`
    fn injury_roll(&mut self, odds: i64) -> bool {
        self.random(0, odds) == self.config.injury.hit_value
    }

    fn injure(md: &mut MatchDetails, r: PlayerRef) {
        let player = md.player_mut(r);
        if player.injured || player.is_sent_off() {
            return;
        }
        player.injured = true;
        let line = format!("Player Injured - {}", player.name);
        md.log(line);
    }

    /// Background roll for one random player of `side`.
    pub(crate) fn roll_match_injury(&mut self, md: &mut MatchDetails, side: TeamSide) {
        let squad = md.team(side).players.len();
        if squad == 0 {
            return;
        }
        let index = self.random(0, squad as i64 - 1) as usize;
        let odds = self.config.injury.per_tick_odds;
        if self.injury_roll(odds) {
            Self::injure(md, PlayerRef::new(side, index));
        }
    }

    /// Contact roll after a tackle; lower `odds` means a likelier injury.
    pub(crate) fn tackle_injury(&mut self, md: &mut MatchDetails, r: PlayerRef, odds: i64) -> bool {
        if self.injury_roll(odds) {
            Self::injure(md, r);
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::EngineConfig;
    use crate::test_fixtures::sample_match;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn engine_with(config: EngineConfig) -> MatchEngine<ChaCha8Rng> {
        MatchEngine::with_config(ChaCha8Rng::seed_from_u64(17), config)
    }

    #[test]
    fn test_certain_injury_marks_one_player() {
        let mut config = EngineConfig::default();
        config.injury.per_tick_odds = 0;
        config.injury.hit_value = 0;
        let mut engine = engine_with(config);
        let mut md = sample_match();
        engine.roll_match_injury(&mut md, TeamSide::Second);

        let injured: Vec<_> = md.second_team.players.iter().filter(|p| p.injured).collect();
        assert_eq!(injured.len(), 1);
        assert_eq!(md.iteration_log, vec![format!("Player Injured - {}", injured[0].name)]);
        assert!(md.kick_off_team.players.iter().all(|p| !p.injured));
    }

    #[test]
    fn test_deterministic_config_never_injures() {
        let mut engine = engine_with(EngineConfig::deterministic());
        let mut md = sample_match();
        for _ in 0..500 {
            engine.roll_match_injury(&mut md, TeamSide::KickOff);
            let odds = engine.config().injury.tackle_likely_odds;
            assert!(!engine.tackle_injury(&mut md, PlayerRef::new(TeamSide::Second, 3), odds));
        }
        assert!(md.iteration_log.is_empty());
    }

    #[test]
    fn test_injury_logged_once() {
        let mut config = EngineConfig::default();
        config.injury.hit_value = 0;
        let mut engine = engine_with(config);
        let mut md = sample_match();
        let r = PlayerRef::new(TeamSide::KickOff, 4);
        assert!(engine.tackle_injury(&mut md, r, 0));
        assert!(engine.tackle_injury(&mut md, r, 0));
        assert!(md.player(r).injured);
        assert_eq!(md.iteration_log.len(), 1);
    }
}
