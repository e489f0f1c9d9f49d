pub mod display;
pub mod error;
pub mod frequency;
pub mod parity;
pub mod ranking;
pub mod repetition;
pub mod scoring;
pub mod selector;
pub mod spatial;
pub mod stats;
pub mod strategies;
pub mod streak;

pub use error::{EngineError, Result};
pub use scoring::{MultifactorialScorer, ScorerConfig};
pub use selector::{StrategyReport, StrategySelector};
pub use strategies::{Rationale, Selection, Strategy};

#[cfg(test)]
pub(crate) fn history_from(rows: &[&[u8]]) -> lotofacil_db::models::DrawHistory {
    lotofacil_db::models::DrawHistory::from_numbers(rows.iter().copied()).unwrap()
}

/// Três sorteios: 1, 2 e 3 saem sempre; 12-15 e 21-24 uma vez só.
#[cfg(test)]
pub(crate) fn make_test_history() -> lotofacil_db::models::DrawHistory {
    history_from(&[
        &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15],
        &[1, 2, 3, 4, 5, 16, 17, 18, 19, 20, 21, 22, 23, 24, 25],
        &[1, 2, 3, 6, 7, 8, 9, 10, 11, 16, 17, 18, 19, 20, 25],
    ])
}
