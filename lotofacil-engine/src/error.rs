use lotofacil_db::models::ValidationError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("jogo ou sorteio inválido: {0}")]
    Validation(#[from] ValidationError),

    #[error("número {0} fora dos limites (1-25)")]
    InvalidNumber(u8),

    #[error("histórico vazio")]
    EmptyHistory,

    #[error("histórico insuficiente: {required} sorteios necessários, {actual} disponíveis")]
    InsufficientHistory { required: usize, actual: usize },

    #[error("configuração inválida: {0}")]
    InvalidConfiguration(String),

    #[error("estratégia desconhecida: {0}")]
    UnknownStrategy(u8),

    #[error("candidatos insuficientes ({category}): {required} pedidos, {available} disponíveis")]
    InsufficientCandidates {
        category: &'static str,
        required: usize,
        available: usize,
    },
}

pub type Result<T> = std::result::Result<T, EngineError>;

/// Falha se o histórico tiver menos de `required` sorteios.
pub(crate) fn require_history(len: usize, required: usize) -> Result<()> {
    if len == 0 {
        return Err(EngineError::EmptyHistory);
    }
    if len < required {
        return Err(EngineError::InsufficientHistory { required, actual: len });
    }
    Ok(())
}
