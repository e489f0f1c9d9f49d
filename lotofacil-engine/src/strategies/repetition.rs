use lotofacil_db::models::DrawHistory;

use super::{Rationale, Selection, Strategy};
use crate::error::{EngineError, Result};
use crate::frequency::FrequencyTable;
use crate::repetition::{profile, select_repeating};

/// Jogo 5: repete do último sorteio a quantidade média histórica.
pub struct RepetitionStrategy;

impl Strategy for RepetitionStrategy {
    fn id(&self) -> u8 {
        5
    }

    fn name(&self) -> &str {
        "Repetições"
    }

    fn select(&self, history: &DrawHistory) -> Result<Selection> {
        let profile = profile(history)?;
        let last_contest = history.last().ok_or(EngineError::EmptyHistory)?.contest();
        let counts = FrequencyTable::new(history).counts();
        let pick = select_repeating(history, profile.target, &counts)?;
        Ok(Selection {
            game: pick.game,
            rationale: Rationale::Repetition {
                profile,
                last_contest,
                repeated: pick.repeated,
                fresh: pick.fresh,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_draw_scenario() {
        let history = crate::history_from(&[
            &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15],
            &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 24, 25],
        ]);
        let selection = RepetitionStrategy.select(&history).unwrap();
        for n in 1..=13 {
            assert!(selection.game.contains(n));
        }
        assert!(selection.game.contains(14) && selection.game.contains(15));
        match selection.rationale {
            Rationale::Repetition { profile, last_contest, .. } => {
                assert_eq!(profile.target, 13);
                assert_eq!(last_contest, 2);
            }
            other => panic!("unexpected rationale: {:?}", other),
        }
    }
}
