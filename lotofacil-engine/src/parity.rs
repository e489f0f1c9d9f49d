use std::collections::BTreeMap;

use serde::Serialize;

use lotofacil_db::models::{DrawHistory, Game, PICK_COUNT};

use crate::error::{require_history, EngineError, Result};
use crate::ranking::{all_numbers, rank_by, Order};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ParitySplit {
    pub even: usize,
    pub odd: usize,
}

impl std::fmt::Display for ParitySplit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} pares / {} ímpares", self.even, self.odd)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ParityCount {
    pub split: ParitySplit,
    pub draws: u32,
}

/// Distribuição histórica das divisões par/ímpar, por número de pares crescente.
#[derive(Debug, Clone, Serialize)]
pub struct ParityProfile {
    pub distribution: Vec<ParityCount>,
    pub total_draws: usize,
}

impl ParityProfile {
    /// A divisão mais frequente; empate para a que tem menos pares.
    pub fn mode(&self) -> Option<ParitySplit> {
        self.distribution
            .iter()
            .fold(None::<&ParityCount>, |best, c| match best {
                Some(b) if b.draws >= c.draws => Some(b),
                _ => Some(c),
            })
            .map(|c| c.split)
    }
}

pub fn profile(history: &DrawHistory) -> Result<ParityProfile> {
    require_history(history.len(), 1)?;

    let mut counts: BTreeMap<usize, u32> = BTreeMap::new();
    for draw in history.draws() {
        let even = draw.numbers().iter().filter(|&&n| n % 2 == 0).count();
        *counts.entry(even).or_insert(0) += 1;
    }

    let distribution = counts
        .into_iter()
        .map(|(even, draws)| ParityCount {
            split: ParitySplit { even, odd: PICK_COUNT - even },
            draws,
        })
        .collect();

    Ok(ParityProfile {
        distribution,
        total_draws: history.len(),
    })
}

fn take_quota(ranked: &[u8], quota: usize, category: &'static str) -> Result<Vec<u8>> {
    if ranked.len() < quota {
        return Err(EngineError::InsufficientCandidates {
            category,
            required: quota,
            available: ranked.len(),
        });
    }
    Ok(ranked[..quota].to_vec())
}

/// Jogo 4: os pares e ímpares mais frequentes, na divisão modal.
pub fn select_balanced(target: ParitySplit, counts: &[u32]) -> Result<Game> {
    let score = |n: u8| counts[(n - 1) as usize] as f64;
    let evens = rank_by(all_numbers().filter(|n| n % 2 == 0), score, Order::Descending);
    let odds = rank_by(all_numbers().filter(|n| n % 2 != 0), score, Order::Descending);

    let mut picks = take_quota(&evens, target.even, "pares")?;
    picks.extend(take_quota(&odds, target.odd, "ímpares")?);
    Ok(Game::new(&picks)?)
}
