pub mod frequency;
pub mod multifactorial;
pub mod parity;
pub mod pattern;
pub mod repetition;
pub mod spatial;

use serde::Serialize;

use lotofacil_db::models::{DrawHistory, Game};

use crate::error::Result;
use crate::parity::{ParityProfile, ParitySplit};
use crate::repetition::RepetitionProfile;
use crate::scoring::{FactorScore, ScorerConfig};
use crate::spatial::BandProfile;
use crate::streak::PatternScore;

/// Uma estratégia de seleção. As estratégias externas (agrupamento, redes
/// sequenciais) implementam o mesmo contrato: histórico somente leitura, jogo válido.
pub trait Strategy: Send + Sync {
    fn id(&self) -> u8;
    fn name(&self) -> &str;
    fn select(&self, history: &DrawHistory) -> Result<Selection>;
}

#[derive(Debug, Clone, Serialize)]
pub struct Selection {
    pub game: Game,
    pub rationale: Rationale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NumberCount {
    pub number: u8,
    pub count: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NumberScore {
    pub number: u8,
    pub score: f64,
}

pub fn number_counts(counts: &[u32]) -> Vec<NumberCount> {
    counts
        .iter()
        .enumerate()
        .map(|(i, &count)| NumberCount { number: i as u8 + 1, count })
        .collect()
}

/// O que justificou a escolha, por estratégia.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Rationale {
    Frequency {
        counts: Vec<NumberCount>,
    },
    Pattern {
        scores: Vec<PatternScore>,
    },
    Parity {
        profile: ParityProfile,
        target: ParitySplit,
        counts: Vec<NumberCount>,
    },
    Repetition {
        profile: RepetitionProfile,
        last_contest: u32,
        repeated: Vec<u8>,
        fresh: Vec<u8>,
    },
    Spatial {
        profile: BandProfile,
        counts: Vec<NumberCount>,
    },
    Multifactorial {
        config: ScorerConfig,
        scores: Vec<FactorScore>,
    },
    Scores {
        scores: Vec<NumberScore>,
    },
}

pub fn builtin_strategies(config: ScorerConfig) -> Result<Vec<Box<dyn Strategy>>> {
    Ok(vec![
        Box::new(frequency::FrequencyStrategy::most_drawn()),
        Box::new(frequency::FrequencyStrategy::least_drawn()),
        Box::new(pattern::PatternStrategy),
        Box::new(parity::ParityStrategy),
        Box::new(repetition::RepetitionStrategy),
        Box::new(spatial::SpatialStrategy),
        Box::new(multifactorial::MultifactorialStrategy::new(config)?),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::make_test_history;

    #[test]
    fn test_builtin_ids_are_one_to_seven() {
        let strategies = builtin_strategies(ScorerConfig::default()).unwrap();
        let ids: Vec<u8> = strategies.iter().map(|s| s.id()).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn test_every_builtin_returns_valid_game() {
        let history = make_test_history();
        for strategy in builtin_strategies(ScorerConfig::default()).unwrap() {
            let selection = strategy.select(&history).unwrap();
            let numbers = selection.game.numbers();
            assert_eq!(numbers.len(), 15, "{}", strategy.name());
            assert!(numbers.windows(2).all(|w| w[0] < w[1]), "{}", strategy.name());
            assert!(numbers.iter().all(|&n| (1..=25).contains(&n)), "{}", strategy.name());
        }
    }

    #[test]
    fn test_rationale_serializes_with_kind() {
        let history = make_test_history();
        let selection = parity::ParityStrategy.select(&history).unwrap();
        let json = serde_json::to_value(&selection).unwrap();
        assert_eq!(json["rationale"]["kind"], "parity");
        assert_eq!(json["rationale"]["target"]["even"], 7);
        assert_eq!(json["game"].as_array().unwrap().len(), 15);
    }
}
