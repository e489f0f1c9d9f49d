use serde::{Deserialize, Serialize};

use lotofacil_db::models::{DrawHistory, Game};

use crate::error::{EngineError, Result};
use crate::frequency::{as_scores, FrequencyTable};
use crate::ranking::{normalize_by_max, top_game, Order};
use crate::streak::pattern_scores;

const WEIGHT_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScorerConfig {
    pub frequency_weight: f64,
    pub trend_weight: f64,
    pub pattern_weight: f64,
    pub hot_weight: f64,
    pub trend_window: usize,
    pub hot_window: usize,
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            frequency_weight: 0.25,
            trend_weight: 0.30,
            pattern_weight: 0.25,
            hot_weight: 0.20,
            trend_window: 50,
            hot_window: 5,
        }
    }
}

impl ScorerConfig {
    pub fn weights(&self) -> [(&'static str, f64); 4] {
        [
            ("frequency_weight", self.frequency_weight),
            ("trend_weight", self.trend_weight),
            ("pattern_weight", self.pattern_weight),
            ("hot_weight", self.hot_weight),
        ]
    }

    pub fn validate(&self) -> Result<()> {
        for (name, w) in self.weights() {
            if !w.is_finite() || w < 0.0 {
                return Err(EngineError::InvalidConfiguration(format!(
                    "{name} deve ser finito e não negativo (recebido {w})"
                )));
            }
        }
        let sum: f64 = self.weights().iter().map(|(_, w)| w).sum();
        if (sum - 1.0).abs() > WEIGHT_TOLERANCE {
            return Err(EngineError::InvalidConfiguration(format!(
                "a soma dos pesos deve ser 1.0 (recebido {sum})"
            )));
        }
        if self.trend_window == 0 || self.hot_window == 0 {
            return Err(EngineError::InvalidConfiguration(
                "as janelas trend_window e hot_window devem ser >= 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Sinais normalizados de um número e o score ponderado final.
#[derive(Debug, Clone, Serialize)]
pub struct FactorScore {
    pub number: u8,
    pub frequency: f64,
    pub trend: f64,
    pub pattern: f64,
    pub hot: f64,
    pub score: f64,
    pub total_count: u32,
    pub trend_count: u32,
    pub hot_count: u32,
}

/// Jogo 7: frequência, tendência recente, padrão de séries e números quentes.
#[derive(Debug, Clone)]
pub struct MultifactorialScorer {
    config: ScorerConfig,
}

impl MultifactorialScorer {
    pub fn new(config: ScorerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ScorerConfig {
        &self.config
    }

    pub fn score(&self, history: &DrawHistory) -> Result<Vec<FactorScore>> {
        let table = FrequencyTable::new(history);
        let total = table.counts();
        let trend = table.recent_counts(self.config.trend_window);
        let hot = table.recent_counts(self.config.hot_window);
        let pattern: Vec<f64> = pattern_scores(history)?.iter().map(|p| p.score).collect();

        let frequency_n = normalize_by_max(&as_scores(&total));
        let trend_n = normalize_by_max(&as_scores(&trend));
        let pattern_n = normalize_by_max(&pattern);
        let hot_n = normalize_by_max(&as_scores(&hot));

        let c = &self.config;
        let scores = (0..total.len())
            .map(|i| FactorScore {
                number: i as u8 + 1,
                frequency: frequency_n[i],
                trend: trend_n[i],
                pattern: pattern_n[i],
                hot: hot_n[i],
                score: c.frequency_weight * frequency_n[i]
                    + c.trend_weight * trend_n[i]
                    + c.pattern_weight * pattern_n[i]
                    + c.hot_weight * hot_n[i],
                total_count: total[i],
                trend_count: trend[i],
                hot_count: hot[i],
            })
            .collect();

        log::debug!("scores multifatoriais calculados sobre {} sorteios", history.len());
        Ok(scores)
    }

    pub fn select(&self, history: &DrawHistory) -> Result<(Game, Vec<FactorScore>)> {
        let scores = self.score(history)?;
        let values: Vec<f64> = scores.iter().map(|s| s.score).collect();
        let game = top_game(&values, Order::Descending)?;
        Ok((game, scores))
    }
}
