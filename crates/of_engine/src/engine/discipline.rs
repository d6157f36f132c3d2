//! Cards with ejection support (yellow accumulation + red cards).

use rand::Rng;
use tracing::debug;

use super::tackle::TackleKind;
use super::MatchEngine;
use crate::models::{MatchDetails, PlayerRef};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardType {
    Yellow,
    Red,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardResult {
    Warning,
    Ejection,
}

/// Book player `r`. A second yellow is a red; any red sends the player off.
pub fn issue_card(md: &mut MatchDetails, r: PlayerRef, card: CardType) -> CardResult {
    let player = md.player_mut(r);
    let result = match card {
        CardType::Yellow => {
            player.stats.cards.yellow += 1;
            if player.stats.cards.yellow >= 2 {
                player.stats.cards.red += 1;
                player.send_off();
                CardResult::Ejection
            } else {
                CardResult::Warning
            }
        }
        CardType::Red => {
            player.stats.cards.red += 1;
            player.send_off();
            CardResult::Ejection
        }
    };
    let line = match card {
        CardType::Yellow => format!("Yellow card - {}", player.name),
        CardType::Red => format!("Red card - {}", player.name),
    };
    md.log(line);
    result
}

impl<R: Rng> MatchEngine<R> {
    /// Roll a foul intensity for the tackler and show the card it warrants, if any.
    pub(crate) fn award_foul_card(
        &mut self,
        md: &mut MatchDetails,
        tackler: PlayerRef,
        kind: TackleKind,
    ) -> Option<CardResult> {
        let bands = match kind {
            TackleKind::Standing => self.config.cards.standing,
            TackleKind::Slide => self.config.cards.slide,
        };
        let intensity = self.random(1, 99);
        let card = if bands.yellow.contains(intensity) {
            CardType::Yellow
        } else if bands.red.contains(intensity) {
            CardType::Red
        } else {
            return None;
        };
        let result = issue_card(md, tackler, card);
        debug!(player = %md.player(tackler).name, ?card, ?result, intensity, "card");
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::{EngineConfig, IntensityBand};
    use crate::engine::MatchEngine;
    use crate::models::{PitchPosition, TeamSide};
    use crate::test_fixtures::sample_match;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_yellow_then_ejection() {
        let mut md = sample_match();
        let r = PlayerRef::new(TeamSide::Second, 3);
        assert_eq!(issue_card(&mut md, r, CardType::Yellow), CardResult::Warning);
        assert!(!md.player(r).is_sent_off());

        assert_eq!(issue_card(&mut md, r, CardType::Yellow), CardResult::Ejection);
        let player = md.player(r);
        assert_eq!(player.pitch_position(), PitchPosition::SentOff);
        assert_eq!(player.stats.cards.yellow, 2);
        assert_eq!(player.stats.cards.red, 1);
        assert_eq!(
            md.iteration_log,
            vec!["Yellow card - Away Player 4".to_string(), "Yellow card - Away Player 4".to_string()]
        );
    }

    #[test]
    fn test_direct_red() {
        let mut md = sample_match();
        let r = PlayerRef::new(TeamSide::KickOff, 2);
        md.give_ball_to(r);
        assert_eq!(issue_card(&mut md, r, CardType::Red), CardResult::Ejection);
        assert!(md.player(r).is_sent_off());
        assert!(!md.player(r).has_ball);
        assert!(md.iteration_log.iter().any(|l| l == "Red card - Home Player 3"));
    }

    #[test]
    fn test_foul_card_bands() {
        let mut config = EngineConfig::default();
        // Every roll in 1..=99 lands in the yellow band.
        config.cards.standing.yellow = IntensityBand::new(0, 100);
        let mut engine = MatchEngine::with_config(ChaCha8Rng::seed_from_u64(1), config);
        let mut md = sample_match();
        let r = PlayerRef::new(TeamSide::KickOff, 6);
        assert_eq!(engine.award_foul_card(&mut md, r, TackleKind::Standing), Some(CardResult::Warning));

        let mut engine = MatchEngine::with_config(ChaCha8Rng::seed_from_u64(1), EngineConfig::deterministic());
        assert_eq!(engine.award_foul_card(&mut md, r, TackleKind::Slide), None);
    }
}
