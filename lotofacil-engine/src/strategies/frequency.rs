use lotofacil_db::models::DrawHistory;

use super::{number_counts, Rationale, Selection, Strategy};
use crate::error::{require_history, Result};
use crate::frequency::{as_scores, FrequencyTable};
use crate::ranking::{top_game, Order};

/// Jogos 1 e 2: os 15 números mais (ou menos) sorteados no histórico.
pub struct FrequencyStrategy {
    order: Order,
}

impl FrequencyStrategy {
    pub fn most_drawn() -> Self {
        Self { order: Order::Descending }
    }

    pub fn least_drawn() -> Self {
        Self { order: Order::Ascending }
    }
}

impl Strategy for FrequencyStrategy {
    fn id(&self) -> u8 {
        match self.order {
            Order::Descending => 1,
            Order::Ascending => 2,
        }
    }

    fn name(&self) -> &str {
        match self.order {
            Order::Descending => "Mais sorteados",
            Order::Ascending => "Menos sorteados",
        }
    }

    fn select(&self, history: &DrawHistory) -> Result<Selection> {
        require_history(history.len(), 1)?;
        let counts = FrequencyTable::new(history).counts();
        let game = top_game(&as_scores(&counts), self.order)?;
        Ok(Selection {
            game,
            rationale: Rationale::Frequency { counts: number_counts(&counts) },
        })
    }
}
