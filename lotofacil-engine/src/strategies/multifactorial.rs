use lotofacil_db::models::DrawHistory;

use super::{Rationale, Selection, Strategy};
use crate::error::Result;
use crate::scoring::{MultifactorialScorer, ScorerConfig};

/// Jogo 7: score ponderado de frequência, tendência, padrão e números quentes.
pub struct MultifactorialStrategy {
    scorer: MultifactorialScorer,
}

impl MultifactorialStrategy {
    pub fn new(config: ScorerConfig) -> Result<Self> {
        Ok(Self { scorer: MultifactorialScorer::new(config)? })
    }
}

impl Strategy for MultifactorialStrategy {
    fn id(&self) -> u8 {
        7
    }

    fn name(&self) -> &str {
        "Scoring multifatorial"
    }

    fn select(&self, history: &DrawHistory) -> Result<Selection> {
        let (game, scores) = self.scorer.select(history)?;
        Ok(Selection {
            game,
            rationale: Rationale::Multifactorial {
                config: *self.scorer.config(),
                scores,
            },
        })
    }
}
