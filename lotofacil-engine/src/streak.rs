use serde::Serialize;

use lotofacil_db::models::{DrawHistory, Game};

use crate::error::{require_history, Result};
use crate::frequency::{as_scores, FrequencyTable};
use crate::ranking::{all_numbers, normalize_by_max, top_game, Order};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StreakKind {
    Presence,
    Absence,
}

impl std::fmt::Display for StreakKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StreakKind::Presence => write!(f, "PRESENTE"),
            StreakKind::Absence => write!(f, "AUSENTE"),
        }
    }
}

/// Séries de presença e ausência de um número ao longo do histórico.
#[derive(Debug, Clone, Serialize)]
pub struct StreakStat {
    pub number: u8,
    pub occurrences: u32,
    pub current: StreakKind,
    pub current_length: u32,
    pub mean_presence: Option<f64>,
    pub mean_absence: Option<f64>,
    pub max_presence: u32,
    pub max_absence: u32,
    #[serde(skip)]
    pub presence_runs: Vec<u32>,
    #[serde(skip)]
    pub absence_runs: Vec<u32>,
}

fn mean(runs: &[u32]) -> Option<f64> {
    if runs.is_empty() {
        None
    } else {
        Some(runs.iter().sum::<u32>() as f64 / runs.len() as f64)
    }
}

/// Varre o histórico em ordem cronológica e fecha cada série maximal,
/// inclusive a que está em curso no último sorteio.
pub fn analyze_number(history: &DrawHistory, number: u8) -> StreakStat {
    let mut presence_runs = Vec::new();
    let mut absence_runs = Vec::new();
    let mut occurrences = 0u32;
    let mut run: Option<(StreakKind, u32)> = None;

    for draw in history.draws() {
        let kind = if draw.contains(number) {
            occurrences += 1;
            StreakKind::Presence
        } else {
            StreakKind::Absence
        };

        run = match run {
            Some((k, len)) if k == kind => Some((k, len + 1)),
            Some((k, len)) => {
                match k {
                    StreakKind::Presence => presence_runs.push(len),
                    StreakKind::Absence => absence_runs.push(len),
                }
                Some((kind, 1))
            }
            None => Some((kind, 1)),
        };
    }

    let (current, current_length) = run.unwrap_or((StreakKind::Absence, 0));
    if current_length > 0 {
        match current {
            StreakKind::Presence => presence_runs.push(current_length),
            StreakKind::Absence => absence_runs.push(current_length),
        }
    }

    StreakStat {
        number,
        occurrences,
        current,
        current_length,
        mean_presence: mean(&presence_runs),
        mean_absence: mean(&absence_runs),
        max_presence: presence_runs.iter().copied().max().unwrap_or(0),
        max_absence: absence_runs.iter().copied().max().unwrap_or(0),
        presence_runs,
        absence_runs,
    }
}

/// Séries dos 25 números. Exige pelo menos 2 sorteios.
pub fn analyze(history: &DrawHistory) -> Result<Vec<StreakStat>> {
    require_history(history.len(), 2)?;
    Ok(all_numbers().map(|n| analyze_number(history, n)).collect())
}

impl StreakStat {
    /// Ausente há pelo menos a média das ausências: current / média.
    /// Um número que nunca saiu não tem média definida e vale 0.
    pub fn due_bonus(&self) -> f64 {
        if self.current != StreakKind::Absence || self.occurrences == 0 {
            return 0.0;
        }
        match self.mean_absence {
            Some(m) if m > 0.0 && self.current_length as f64 >= m => self.current_length as f64 / m,
            _ => 0.0,
        }
    }

    /// Presente e ainda abaixo da média das presenças: 1 - current / média.
    pub fn continuation_bonus(&self) -> f64 {
        if self.current != StreakKind::Presence {
            return 0.0;
        }
        match self.mean_presence {
            Some(m) if m > 0.0 && (self.current_length as f64) < m => 1.0 - self.current_length as f64 / m,
            _ => 0.0,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PatternScore {
    pub number: u8,
    pub due: f64,
    pub continuation: f64,
    pub frequency: f64,
    pub score: f64,
    pub streak: StreakStat,
}

/// Score do Jogo 3: os três termos normalizados pelo máximo e somados.
pub fn pattern_scores(history: &DrawHistory) -> Result<Vec<PatternScore>> {
    let stats = analyze(history)?;
    let counts = FrequencyTable::new(history).counts();

    let due = normalize_by_max(&stats.iter().map(StreakStat::due_bonus).collect::<Vec<_>>());
    let continuation = normalize_by_max(&stats.iter().map(StreakStat::continuation_bonus).collect::<Vec<_>>());
    let frequency = normalize_by_max(&as_scores(&counts));

    let scores = stats
        .into_iter()
        .enumerate()
        .map(|(i, streak)| PatternScore {
            number: streak.number,
            due: due[i],
            continuation: continuation[i],
            frequency: frequency[i],
            score: due[i] + continuation[i] + frequency[i],
            streak,
        })
        .collect();
    Ok(scores)
}

pub fn select_by_pattern(scores: &[PatternScore]) -> Result<Game> {
    let values: Vec<f64> = scores.iter().map(|s| s.score).collect();
    top_game(&values, Order::Descending)
}
