use lotofacil_db::models::DrawHistory;

use super::{number_counts, Rationale, Selection, Strategy};
use crate::error::{EngineError, Result};
use crate::frequency::FrequencyTable;
use crate::parity::{profile, select_balanced};

/// Jogo 4: divisão par/ímpar mais comum no histórico.
pub struct ParityStrategy;

impl Strategy for ParityStrategy {
    fn id(&self) -> u8 {
        4
    }

    fn name(&self) -> &str {
        "Equilíbrio par/ímpar"
    }

    fn select(&self, history: &DrawHistory) -> Result<Selection> {
        let profile = profile(history)?;
        let target = profile.mode().ok_or(EngineError::EmptyHistory)?;
        let counts = FrequencyTable::new(history).counts();
        let game = select_balanced(target, &counts)?;
        log::debug!("divisão alvo: {target}");
        Ok(Selection {
            game,
            rationale: Rationale::Parity {
                profile,
                target,
                counts: number_counts(&counts),
            },
        })
    }
}
