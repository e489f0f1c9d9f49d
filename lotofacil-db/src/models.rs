use serde::Serialize;
use thiserror::Error;

/// Números possíveis: 1 a 25.
pub const POOL_SIZE: u8 = 25;
/// Números sorteados por concurso (e marcados por jogo).
pub const PICK_COUNT: usize = 15;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("esperados {expected} números, recebidos {actual}")]
    WrongCardinality { expected: usize, actual: usize },

    #[error("número repetido: {0}")]
    DuplicateNumber(u8),

    #[error("número {0} fora dos limites (1-25)")]
    NumberOutOfRange(u8),
}

/// Valida uma seleção de 15 números e devolve-a ordenada.
pub fn validate_numbers(numbers: &[u8]) -> Result<[u8; PICK_COUNT], ValidationError> {
    if numbers.len() != PICK_COUNT {
        return Err(ValidationError::WrongCardinality {
            expected: PICK_COUNT,
            actual: numbers.len(),
        });
    }

    let mut seen = [false; POOL_SIZE as usize + 1];
    for &n in numbers {
        if n < 1 || n > POOL_SIZE {
            return Err(ValidationError::NumberOutOfRange(n));
        }
        if seen[n as usize] {
            return Err(ValidationError::DuplicateNumber(n));
        }
        seen[n as usize] = true;
    }

    let mut sorted = [0u8; PICK_COUNT];
    sorted.copy_from_slice(numbers);
    sorted.sort_unstable();
    Ok(sorted)
}

/// Um sorteio histórico. Imutável depois de criado.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Draw {
    contest: u32,
    date: Option<String>,
    numbers: [u8; PICK_COUNT],
}

impl Draw {
    pub fn new(contest: u32, date: Option<String>, numbers: &[u8]) -> Result<Self, ValidationError> {
        Ok(Self {
            contest,
            date,
            numbers: validate_numbers(numbers)?,
        })
    }

    pub fn contest(&self) -> u32 {
        self.contest
    }

    pub fn date(&self) -> Option<&str> {
        self.date.as_deref()
    }

    /// Em ordem crescente.
    pub fn numbers(&self) -> &[u8; PICK_COUNT] {
        &self.numbers
    }

    pub fn contains(&self, number: u8) -> bool {
        self.numbers.binary_search(&number).is_ok()
    }
}

/// Jogo proposto por uma estratégia. Mesma invariante numérica de um `Draw`,
/// mas nunca entra no histórico.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Game([u8; PICK_COUNT]);

impl Game {
    pub fn new(numbers: &[u8]) -> Result<Self, ValidationError> {
        validate_numbers(numbers).map(Game)
    }

    pub fn numbers(&self) -> &[u8; PICK_COUNT] {
        &self.0
    }

    pub fn contains(&self, number: u8) -> bool {
        self.0.binary_search(&number).is_ok()
    }

    pub fn even_count(&self) -> usize {
        self.0.iter().filter(|&&n| n % 2 == 0).count()
    }
}

impl std::fmt::Display for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let joined = self
            .0
            .iter()
            .map(|n| format!("{:02}", n))
            .collect::<Vec<_>>()
            .join(" ");
        write!(f, "{joined}")
    }
}

/// Histórico cronológico (do mais antigo ao mais recente). A ordem é o que vale,
/// o número do concurso é apenas informativo.
#[derive(Debug, Clone, Default)]
pub struct DrawHistory {
    draws: Vec<Draw>,
}

impl DrawHistory {
    pub fn new(draws: Vec<Draw>) -> Self {
        Self { draws }
    }

    /// Monta um histórico a partir de listas de números, concursos numerados a partir de 1.
    pub fn from_numbers<I, R>(rows: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = R>,
        R: AsRef<[u8]>,
    {
        let draws = rows
            .into_iter()
            .enumerate()
            .map(|(i, row)| Draw::new(i as u32 + 1, None, row.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { draws })
    }

    pub fn len(&self) -> usize {
        self.draws.len()
    }

    pub fn is_empty(&self) -> bool {
        self.draws.is_empty()
    }

    pub fn draws(&self) -> &[Draw] {
        &self.draws
    }

    pub fn last(&self) -> Option<&Draw> {
        self.draws.last()
    }

    /// Janela semiaberta `[start, end)`, limitada ao tamanho do histórico.
    pub fn window(&self, start: usize, end: usize) -> &[Draw] {
        let end = end.min(self.draws.len());
        let start = start.min(end);
        &self.draws[start..end]
    }

    /// Os `k` últimos sorteios (o histórico inteiro se for mais curto).
    pub fn recent(&self, k: usize) -> &[Draw] {
        let start = self.draws.len().saturating_sub(k);
        &self.draws[start..]
    }
}
