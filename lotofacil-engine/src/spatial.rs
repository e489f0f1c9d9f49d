use serde::Serialize;

use lotofacil_db::models::{DrawHistory, Game, PICK_COUNT};

use crate::error::{require_history, Result};
use crate::ranking::{rank_by, Order};

pub const BAND_COUNT: usize = 5;
pub const BAND_WIDTH: u8 = 5;

/// Faixa (0..5) de um número: 1-5, 6-10, 11-15, 16-20, 21-25.
pub fn band_of(number: u8) -> usize {
    ((number - 1) / BAND_WIDTH) as usize
}

pub fn band_numbers(band: usize) -> impl Iterator<Item = u8> {
    let first = band as u8 * BAND_WIDTH + 1;
    first..first + BAND_WIDTH
}

pub fn band_label(band: usize) -> String {
    let first = band as u8 * BAND_WIDTH + 1;
    format!("{:02}-{:02}", first, first + BAND_WIDTH - 1)
}

#[derive(Debug, Clone, Serialize)]
pub struct BandProfile {
    pub totals: [u32; BAND_COUNT],
    pub averages: [f64; BAND_COUNT],
    pub targets: [usize; BAND_COUNT],
}

pub fn profile(history: &DrawHistory) -> Result<BandProfile> {
    require_history(history.len(), 1)?;

    let mut totals = [0u32; BAND_COUNT];
    for draw in history.draws() {
        for &n in draw.numbers() {
            totals[band_of(n)] += 1;
        }
    }

    let mut averages = [0.0f64; BAND_COUNT];
    for (avg, total) in averages.iter_mut().zip(totals) {
        *avg = total as f64 / history.len() as f64;
    }

    Ok(BandProfile {
        totals,
        averages,
        targets: largest_remainder(&totals, PICK_COUNT),
    })
}

/// Reparte `total` proporcionalmente a `weights` pelo método do maior resto,
/// em aritmética inteira. Empates de resto vão para a faixa mais baixa; nenhuma
/// faixa passa de sua largura.
pub fn largest_remainder(weights: &[u32; BAND_COUNT], total: usize) -> [usize; BAND_COUNT] {
    let capacity = BAND_WIDTH as usize;
    let sum: u64 = weights.iter().map(|&w| w as u64).sum();
    let mut targets = [0usize; BAND_COUNT];
    if sum == 0 {
        return targets;
    }

    let mut remainders: Vec<(usize, u64)> = Vec::with_capacity(BAND_COUNT);
    for (i, &w) in weights.iter().enumerate() {
        let share = w as u64 * total as u64;
        targets[i] = ((share / sum) as usize).min(capacity);
        remainders.push((i, share % sum));
    }
    remainders.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    let mut remaining = total.saturating_sub(targets.iter().sum());
    while remaining > 0 {
        let before = remaining;
        for &(i, _) in &remainders {
            if remaining == 0 {
                break;
            }
            if targets[i] < capacity {
                targets[i] += 1;
                remaining -= 1;
            }
        }
        if remaining == before {
            break;
        }
    }
    targets
}

/// Jogo 6: em cada faixa, os números mais frequentes até a meta da faixa.
pub fn select_by_band(targets: &[usize; BAND_COUNT], counts: &[u32]) -> Result<Game> {
    let score = |n: u8| counts[(n - 1) as usize] as f64;
    let mut picks = Vec::with_capacity(PICK_COUNT);
    for (band, &target) in targets.iter().enumerate() {
        let ranked = rank_by(band_numbers(band), score, Order::Descending);
        picks.extend(ranked.into_iter().take(target));
    }
    Ok(Game::new(&picks)?)
}
