use std::cmp::Ordering;

use lotofacil_db::models::{Game, POOL_SIZE};

use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Descending,
    Ascending,
}

pub fn all_numbers() -> impl Iterator<Item = u8> {
    1..=POOL_SIZE
}

/// Ordena os candidatos pelo score; empates sempre pelo número crescente.
pub fn rank_by<F>(candidates: impl IntoIterator<Item = u8>, score: F, order: Order) -> Vec<u8>
where
    F: Fn(u8) -> f64,
{
    let mut ranked: Vec<(u8, f64)> = candidates.into_iter().map(|n| (n, score(n))).collect();
    ranked.sort_by(|a, b| {
        let by_score = match order {
            Order::Descending => b.1.partial_cmp(&a.1),
            Order::Ascending => a.1.partial_cmp(&b.1),
        };
        by_score.unwrap_or(Ordering::Equal).then(a.0.cmp(&b.0))
    });
    ranked.into_iter().map(|(n, _)| n).collect()
}

/// Os 15 melhores números segundo `score` (indexado por número - 1).
pub fn top_game(scores: &[f64], order: Order) -> Result<Game> {
    let ranked = rank_by(all_numbers(), |n| scores[(n - 1) as usize], order);
    Ok(Game::new(&ranked[..15])?)
}

/// Divide cada valor pelo máximo; um sinal cujo máximo é 0 vale 0 para todos.
pub fn normalize_by_max(values: &[f64]) -> Vec<f64> {
    let max = values.iter().cloned().fold(0.0f64, f64::max);
    if max > 0.0 {
        values.iter().map(|v| v / max).collect()
    } else {
        vec![0.0; values.len()]
    }
}
