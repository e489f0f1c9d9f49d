use std::collections::BTreeMap;

use rayon::prelude::*;
use serde::Serialize;

use lotofacil_db::models::{DrawHistory, Game};

use crate::error::{EngineError, Result};
use crate::scoring::ScorerConfig;
use crate::strategies::{builtin_strategies, Rationale, Strategy};

/// Identificadores reservados a estratégias externas (agrupamento, previsão sequencial).
pub const EXTENSION_IDS: [u8; 2] = [8, 9];

#[derive(Debug, Clone, Serialize)]
pub struct StrategyReport {
    pub id: u8,
    pub name: String,
    pub game: Game,
    pub rationale: Rationale,
}

pub struct StrategySelector {
    strategies: BTreeMap<u8, Box<dyn Strategy>>,
}

impl StrategySelector {
    /// Registra as estratégias 1 a 7; a configuração do Jogo 7 é validada aqui.
    pub fn new(config: ScorerConfig) -> Result<Self> {
        let strategies = builtin_strategies(config)?
            .into_iter()
            .map(|s| (s.id(), s))
            .collect();
        Ok(Self { strategies })
    }

    /// Acopla uma estratégia externa num dos slots de extensão.
    pub fn register(&mut self, strategy: Box<dyn Strategy>) -> Result<()> {
        let id = strategy.id();
        if !EXTENSION_IDS.contains(&id) {
            return Err(EngineError::UnknownStrategy(id));
        }
        log::info!("estratégia externa {} registrada: {}", id, strategy.name());
        self.strategies.insert(id, strategy);
        Ok(())
    }

    pub fn ids(&self) -> Vec<u8> {
        self.strategies.keys().copied().collect()
    }

    pub fn run(&self, id: u8, history: &DrawHistory) -> Result<StrategyReport> {
        let strategy = self
            .strategies
            .get(&id)
            .ok_or(EngineError::UnknownStrategy(id))?;
        let selection = strategy.select(history)?;
        log::debug!("estratégia {} ({}): {}", id, strategy.name(), selection.game);
        Ok(StrategyReport {
            id,
            name: strategy.name().to_string(),
            game: selection.game,
            rationale: selection.rationale,
        })
    }

    /// Calcula todas as estratégias registradas em paralelo, em ordem de identificador.
    pub fn run_all(&self, history: &DrawHistory) -> Result<Vec<StrategyReport>> {
        let ids = self.ids();
        let mut reports = ids
            .par_iter()
            .map(|&id| self.run(id, history))
            .collect::<Result<Vec<_>>>()?;
        reports.sort_by_key(|r| r.id);
        log::info!("{} estratégias calculadas sobre {} sorteios", reports.len(), history.len());
        Ok(reports)
    }
}
