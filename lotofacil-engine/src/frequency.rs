use lotofacil_db::models::{DrawHistory, POOL_SIZE};

use crate::error::{EngineError, Result};

/// Contagens de ocorrência por número sobre janelas do histórico.
#[derive(Debug, Clone, Copy)]
pub struct FrequencyTable<'a> {
    history: &'a DrawHistory,
}

impl<'a> FrequencyTable<'a> {
    pub fn new(history: &'a DrawHistory) -> Self {
        Self { history }
    }

    /// Ocorrências de `number` na janela `[start, end)`; histórico inteiro por padrão.
    pub fn count(&self, number: u8, start: Option<usize>, end: Option<usize>) -> Result<u32> {
        if number < 1 || number > POOL_SIZE {
            return Err(EngineError::InvalidNumber(number));
        }
        let window = self
            .history
            .window(start.unwrap_or(0), end.unwrap_or(self.history.len()));
        Ok(window.iter().filter(|d| d.contains(number)).count() as u32)
    }

    /// Contagens dos 25 números, indexadas por número - 1.
    pub fn counts_in(&self, start: usize, end: usize) -> Vec<u32> {
        let mut counts = vec![0u32; POOL_SIZE as usize];
        for draw in self.history.window(start, end) {
            for &n in draw.numbers() {
                counts[(n - 1) as usize] += 1;
            }
        }
        counts
    }

    pub fn counts(&self) -> Vec<u32> {
        self.counts_in(0, self.history.len())
    }

    /// Contagens nos `k` últimos sorteios (ou em todos se houver menos).
    pub fn recent_counts(&self, k: usize) -> Vec<u32> {
        let len = self.history.len();
        self.counts_in(len.saturating_sub(k), len)
    }
}

pub fn as_scores(counts: &[u32]) -> Vec<f64> {
    counts.iter().map(|&c| c as f64).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::make_test_history;

    #[test]
    fn test_count_full_history() {
        let history = make_test_history();
        let table = FrequencyTable::new(&history);
        assert_eq!(table.count(1, None, None).unwrap(), 3);
        assert_eq!(table.count(4, None, None).unwrap(), 2);
        assert_eq!(table.count(12, None, None).unwrap(), 1);
        assert_eq!(table.count(21, None, None).unwrap(), 1);
    }

    #[test]
    fn test_count_window() {
        let history = make_test_history();
        let table = FrequencyTable::new(&history);
        assert_eq!(table.count(12, Some(1), None).unwrap(), 0);
        assert_eq!(table.count(25, Some(1), Some(2)).unwrap(), 1);
        assert_eq!(table.count(25, Some(0), Some(1)).unwrap(), 0);
        assert_eq!(table.count(1, Some(2), Some(99)).unwrap(), 1);
    }

    #[test]
    fn test_count_invalid_number() {
        let history = make_test_history();
        let table = FrequencyTable::new(&history);
        assert_eq!(table.count(0, None, None), Err(EngineError::InvalidNumber(0)));
        assert_eq!(table.count(26, None, None), Err(EngineError::InvalidNumber(26)));
    }

    #[test]
    fn test_counts_sum_to_fifteen_per_draw() {
        let history = make_test_history();
        let table = FrequencyTable::new(&history);
        assert_eq!(table.counts().iter().sum::<u32>(), 45);
        assert_eq!(table.counts_in(1, 3).iter().sum::<u32>(), 30);
        assert_eq!(table.recent_counts(1).iter().sum::<u32>(), 15);
        assert_eq!(table.recent_counts(50).iter().sum::<u32>(), 45);
    }
}
