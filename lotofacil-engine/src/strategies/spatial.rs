use lotofacil_db::models::DrawHistory;

use super::{number_counts, Rationale, Selection, Strategy};
use crate::error::Result;
use crate::frequency::FrequencyTable;
use crate::spatial::{profile, select_by_band};

/// Jogo 6: distribuição pelas cinco faixas de 5 números.
pub struct SpatialStrategy;

impl Strategy for SpatialStrategy {
    fn id(&self) -> u8 {
        6
    }

    fn name(&self) -> &str {
        "Distribuição espacial"
    }

    fn select(&self, history: &DrawHistory) -> Result<Selection> {
        let profile = profile(history)?;
        let counts = FrequencyTable::new(history).counts();
        let game = select_by_band(&profile.targets, &counts)?;
        Ok(Selection {
            game,
            rationale: Rationale::Spatial {
                profile,
                counts: number_counts(&counts),
            },
        })
    }
}
