use serde::Serialize;

use lotofacil_db::models::{DrawHistory, Game, PICK_COUNT};

use crate::error::{require_history, EngineError, Result};
use crate::ranking::{all_numbers, rank_by, Order};

/// Quantos números se repetem entre sorteios consecutivos.
#[derive(Debug, Clone, Serialize)]
pub struct RepetitionProfile {
    #[serde(skip)]
    pub overlaps: Vec<u32>,
    pub mean: f64,
    pub min: u32,
    pub max: u32,
    pub target: usize,
}

pub fn profile(history: &DrawHistory) -> Result<RepetitionProfile> {
    require_history(history.len(), 2)?;

    let overlaps: Vec<u32> = history
        .draws()
        .windows(2)
        .map(|pair| {
            pair[1]
                .numbers()
                .iter()
                .filter(|&&n| pair[0].contains(n))
                .count() as u32
        })
        .collect();

    let mean = overlaps.iter().sum::<u32>() as f64 / overlaps.len() as f64;
    // arredondamento: metade para cima
    let target = ((mean + 0.5).floor() as usize).min(PICK_COUNT);

    Ok(RepetitionProfile {
        min: overlaps.iter().copied().min().unwrap_or(0),
        max: overlaps.iter().copied().max().unwrap_or(0),
        overlaps,
        mean,
        target,
    })
}

#[derive(Debug, Clone, Serialize)]
pub struct RepetitionPick {
    pub game: Game,
    pub repeated: Vec<u8>,
    pub fresh: Vec<u8>,
}

/// Jogo 5: `target` números do último sorteio mais os mais frequentes fora dele.
pub fn select_repeating(history: &DrawHistory, target: usize, counts: &[u32]) -> Result<RepetitionPick> {
    let last = history.last().ok_or(EngineError::EmptyHistory)?;
    let score = |n: u8| counts[(n - 1) as usize] as f64;

    let mut repeated = rank_by(last.numbers().iter().copied(), score, Order::Descending);
    repeated.truncate(target);

    let mut fresh = rank_by(all_numbers().filter(|&n| !last.contains(n)), score, Order::Descending);
    let wanted = PICK_COUNT - repeated.len();
    if fresh.len() < wanted {
        return Err(EngineError::InsufficientCandidates {
            category: "fora do último sorteio",
            required: wanted,
            available: fresh.len(),
        });
    }
    fresh.truncate(wanted);

    let mut picks = repeated.clone();
    picks.extend(&fresh);
    repeated.sort_unstable();
    fresh.sort_unstable();

    Ok(RepetitionPick {
        game: Game::new(&picks)?,
        repeated,
        fresh,
    })
}
