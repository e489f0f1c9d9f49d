use serde::Serialize;

use lotofacil_db::models::{DrawHistory, PICK_COUNT, POOL_SIZE};

use crate::error::Result;
use crate::frequency::FrequencyTable;
use crate::streak::{analyze, StreakStat};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NumberTag {
    Hot,
    Cold,
    Normal,
}

impl std::fmt::Display for NumberTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NumberTag::Hot => write!(f, "QUENTE"),
            NumberTag::Cold => write!(f, "FRIO"),
            NumberTag::Normal => write!(f, "-"),
        }
    }
}

/// Estatística agregada de um número para uma execução.
#[derive(Debug, Clone, Serialize)]
pub struct NumberStat {
    pub number: u8,
    pub occurrences: u32,
    pub short_count: u32,
    pub long_count: u32,
    pub streak: StreakStat,
    pub tag: NumberTag,
}

const TAG_THRESHOLD: f64 = 0.3;

/// Quente ou frio segundo o desvio da frequência na janela longa
/// em relação ao esperado (15/25 por sorteio).
pub fn tag_for(count: u32, window: usize) -> NumberTag {
    if window == 0 {
        return NumberTag::Normal;
    }
    let expected = window as f64 * PICK_COUNT as f64 / POOL_SIZE as f64;
    let deviation = (count as f64 - expected) / expected;
    if deviation > TAG_THRESHOLD {
        NumberTag::Hot
    } else if deviation < -TAG_THRESHOLD {
        NumberTag::Cold
    } else {
        NumberTag::Normal
    }
}

pub fn compute_stats(history: &DrawHistory, short_window: usize, long_window: usize) -> Result<Vec<NumberStat>> {
    let streaks = analyze(history)?;
    let table = FrequencyTable::new(history);
    let short = table.recent_counts(short_window);
    let long = table.recent_counts(long_window);
    let effective_long = long_window.min(history.len());

    Ok(streaks
        .into_iter()
        .enumerate()
        .map(|(i, streak)| NumberStat {
            number: streak.number,
            occurrences: streak.occurrences,
            short_count: short[i],
            long_count: long[i],
            tag: tag_for(long[i], effective_long),
            streak,
        })
        .collect())
}
