use lotofacil_db::models::DrawHistory;

use super::{Rationale, Selection, Strategy};
use crate::error::Result;
use crate::streak::{pattern_scores, select_by_pattern};

/// Jogo 3: números "devidos", séries de presença em curso e frequência.
pub struct PatternStrategy;

impl Strategy for PatternStrategy {
    fn id(&self) -> u8 {
        3
    }

    fn name(&self) -> &str {
        "Padrões de sequência"
    }

    fn select(&self, history: &DrawHistory) -> Result<Selection> {
        let scores = pattern_scores(history)?;
        let game = select_by_pattern(&scores)?;
        Ok(Selection {
            game,
            rationale: Rationale::Pattern { scores },
        })
    }
}
