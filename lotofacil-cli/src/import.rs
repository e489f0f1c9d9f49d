use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use indicatif::{ProgressBar, ProgressStyle};
use lotofacil_db::rusqlite::Connection;
use std::path::Path;

use lotofacil_db::db::insert_draw;
use lotofacil_db::models::{Draw, PICK_COUNT};

/// Posições das colunas úteis, localizadas pelo cabeçalho.
#[derive(Debug)]
struct Columns {
    contest: Option<usize>,
    date: Option<usize>,
    balls: [usize; PICK_COUNT],
}

impl Columns {
    fn locate(header: &csv::ByteRecord) -> Result<Self> {
        let find = |name: &str| {
            header.iter().position(|h| {
                std::str::from_utf8(h)
                    .map(|s| s.trim().eq_ignore_ascii_case(name))
                    .unwrap_or(false)
            })
        };

        let mut balls = [0usize; PICK_COUNT];
        for (i, slot) in balls.iter_mut().enumerate() {
            let name = format!("Bola{}", i + 1);
            *slot = find(&name).with_context(|| format!("Coluna {} ausente do cabeçalho", name))?;
        }

        Ok(Self {
            contest: find("Concurso"),
            date: find("Data Sorteio"),
            balls,
        })
    }
}

fn field<'r>(record: &'r csv::ByteRecord, idx: usize) -> Result<&'r str> {
    let raw = record
        .get(idx)
        .with_context(|| format!("Campo ausente no índice {}", idx))?;
    let s = std::str::from_utf8(raw)
        .with_context(|| format!("Campo não UTF-8 no índice {}", idx))?;
    Ok(s.trim())
}

pub fn parse_date(raw: &str) -> Result<String> {
    let date = NaiveDate::parse_from_str(raw.trim(), "%d/%m/%Y")
        .with_context(|| format!("Formato de data inválido: '{}'", raw))?;
    Ok(date.format("%Y-%m-%d").to_string())
}

fn parse_record(record: &csv::ByteRecord, columns: &Columns, line: u32) -> Result<Draw> {
    let contest = match columns.contest {
        Some(idx) => {
            let s = field(record, idx)?;
            s.parse::<u32>()
                .with_context(|| format!("Concurso inválido: '{}'", s))?
        }
        None => line,
    };

    let date = match columns.date {
        Some(idx) => {
            let s = field(record, idx)?;
            if s.is_empty() { None } else { Some(parse_date(s)?) }
        }
        None => None,
    };

    let mut numbers = [0u8; PICK_COUNT];
    for (slot, &idx) in numbers.iter_mut().zip(&columns.balls) {
        let s = field(record, idx)?;
        *slot = s
            .parse::<u8>()
            .with_context(|| format!("Impossível ler '{}' (índice {})", s, idx))?;
    }

    Ok(Draw::new(contest, date, &numbers)?)
}

#[derive(Debug, Default)]
pub struct ImportResult {
    pub total_records: u32,
    pub inserted: u32,
    pub skipped: u32,
}

pub fn import_csv(conn: &Connection, path: &Path) -> Result<ImportResult> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Impossível abrir {:?}", path))?;

    let header = reader.byte_headers().context("Cabeçalho ilegível")?.clone();
    if header.is_empty() {
        bail!("Arquivo sem cabeçalho: {:?}", path);
    }
    let columns = Columns::locate(&header)?;
    log::debug!("colunas localizadas: {:?}", columns);

    let tx = conn.unchecked_transaction()
        .context("Impossível iniciar a transação")?;

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] {pos} linhas {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );

    let mut result = ImportResult::default();

    // Uma linha inválida aborta tudo: a transação é descartada sem commit.
    for record_result in reader.byte_records() {
        result.total_records += 1;
        pb.inc(1);
        let line = result.total_records;
        let record = record_result.with_context(|| format!("Erro de leitura na linha {}", line))?;
        let draw = parse_record(&record, &columns, line)
            .with_context(|| format!("Linha {} inválida", line))?;
        if insert_draw(&tx, &draw).with_context(|| format!("Erro ao inserir a linha {}", line))? {
            result.inserted += 1;
        } else {
            log::warn!("concurso {} já presente, linha {} ignorada", draw.contest(), line);
            result.skipped += 1;
        }
    }

    tx.commit().context("Falha no commit")?;
    pb.finish_and_clear();
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lotofacil_db::db::{count_draws, fetch_history, migrate};
    use std::io::Write;

    const MOCK_CSV: &str = "Concurso;Data Sorteio;Bola1;Bola2;Bola3;Bola4;Bola5;Bola6;Bola7;Bola8;Bola9;Bola10;Bola11;Bola12;Bola13;Bola14;Bola15
1;01/01/2023;1;2;3;4;5;6;7;8;9;10;11;12;13;14;15
2;02/01/2023;1;2;3;4;5;16;17;18;19;20;21;22;23;24;25
3;03/01/2023;25;1;2;3;6;7;8;9;10;11;16;17;18;19;20
2;02/01/2023;1;2;3;4;5;16;17;18;19;20;21;22;23;24;25
";

    fn try_import(content: &str) -> (Connection, Result<ImportResult>) {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        let conn = Connection::open_in_memory().unwrap();
        migrate(&conn).unwrap();
        let result = import_csv(&conn, file.path());
        (conn, result)
    }

    fn import_mock(content: &str) -> (Connection, ImportResult) {
        let (conn, result) = try_import(content);
        (conn, result.unwrap())
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("17/02/2026").unwrap(), "2026-02-17");
        assert_eq!(parse_date("01/01/2020").unwrap(), "2020-01-01");
        assert!(parse_date("2020-01-01").is_err());
        assert!(parse_date("31/02/2020").is_err());
    }

    #[test]
    fn test_import_mock_history() {
        let (conn, result) = import_mock(MOCK_CSV);
        assert_eq!(result.total_records, 4);
        assert_eq!(result.inserted, 3);
        assert_eq!(result.skipped, 1);
        assert_eq!(count_draws(&conn).unwrap(), 3);

        let history = fetch_history(&conn).unwrap();
        assert_eq!(
            history.draws()[2].numbers().to_vec(),
            vec![1, 2, 3, 6, 7, 8, 9, 10, 11, 16, 17, 18, 19, 20, 25]
        );
        assert_eq!(history.draws()[0].date(), Some("2023-01-01"));
    }

    #[test]
    fn test_import_without_contest_column() {
        let csv = "Bola1;Bola2;Bola3;Bola4;Bola5;Bola6;Bola7;Bola8;Bola9;Bola10;Bola11;Bola12;Bola13;Bola14;Bola15
1;2;3;4;5;6;7;8;9;10;11;12;13;14;15
11;12;13;14;15;16;17;18;19;20;21;22;23;24;25
";
        let (conn, result) = import_mock(csv);
        assert_eq!(result.inserted, 2);
        let history = fetch_history(&conn).unwrap();
        assert_eq!(history.draws()[1].contest(), 2);
        assert_eq!(history.draws()[1].date(), None);
    }

    #[test]
    fn test_invalid_middle_row_aborts_import() {
        let csv = "Concurso;Data Sorteio;Bola1;Bola2;Bola3;Bola4;Bola5;Bola6;Bola7;Bola8;Bola9;Bola10;Bola11;Bola12;Bola13;Bola14;Bola15
1;01/01/2023;1;2;3;4;5;6;7;8;9;10;11;12;13;14;15
2;02/01/2023;1;2;3;4;5;6;7;8;9;10;11;12;13;14;99
3;03/01/2023;11;12;13;14;15;16;17;18;19;20;21;22;23;24;25
";
        let (conn, result) = try_import(csv);
        let err = result.unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.contains("Linha 2"), "{}", message);
        assert!(message.contains("99"), "{}", message);
        assert_eq!(count_draws(&conn).unwrap(), 0);
    }

    #[test]
    fn test_duplicate_ball_aborts_import() {
        let csv = "Bola1;Bola2;Bola3;Bola4;Bola5;Bola6;Bola7;Bola8;Bola9;Bola10;Bola11;Bola12;Bola13;Bola14;Bola15
1;2;3;4;5;6;7;8;9;10;11;12;13;14;15
1;1;2;3;4;5;6;7;8;9;10;11;12;13;14
";
        let (conn, result) = try_import(csv);
        assert!(result.is_err());
        assert_eq!(count_draws(&conn).unwrap(), 0);
    }

    #[test]
    fn test_import_missing_ball_column() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"Concurso;Bola1\n1;1\n").unwrap();
        let conn = Connection::open_in_memory().unwrap();
        migrate(&conn).unwrap();
        assert!(import_csv(&conn, file.path()).is_err());
    }
}
