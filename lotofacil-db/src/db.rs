use anyhow::{Context, Result};
use rusqlite::{Connection, Row};
use std::path::{Path, PathBuf};

use crate::models::{Draw, DrawHistory, PICK_COUNT};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS draws (
    contest  INTEGER PRIMARY KEY,
    date     TEXT,
    n1  INTEGER NOT NULL, n2  INTEGER NOT NULL, n3  INTEGER NOT NULL,
    n4  INTEGER NOT NULL, n5  INTEGER NOT NULL, n6  INTEGER NOT NULL,
    n7  INTEGER NOT NULL, n8  INTEGER NOT NULL, n9  INTEGER NOT NULL,
    n10 INTEGER NOT NULL, n11 INTEGER NOT NULL, n12 INTEGER NOT NULL,
    n13 INTEGER NOT NULL, n14 INTEGER NOT NULL, n15 INTEGER NOT NULL
);
";

const COLUMNS: &str = "contest, date, n1, n2, n3, n4, n5, n6, n7, n8, n9, n10, n11, n12, n13, n14, n15";

pub fn db_path() -> PathBuf {
    let mut path = std::env::current_dir().unwrap_or_default();
    path.push("data");
    path.push("lotofacil.db");
    path
}

pub fn open_db(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Impossível criar o diretório {:?}", parent))?;
    }
    let conn = Connection::open(path)
        .with_context(|| format!("Impossível abrir a base {:?}", path))?;
    log::debug!("base aberta em {}", path.display());
    Ok(conn)
}

pub fn migrate(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)
        .context("Falha na migração")?;
    Ok(())
}

/// Insere um sorteio; devolve `false` se o concurso já existia.
pub fn insert_draw(conn: &Connection, draw: &Draw) -> Result<bool> {
    let n = draw.numbers();
    let changed = conn.execute(
        &format!(
            "INSERT OR IGNORE INTO draws ({COLUMNS})
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17)"
        ),
        rusqlite::params![
            draw.contest(),
            draw.date(),
            n[0], n[1], n[2], n[3], n[4], n[5], n[6], n[7],
            n[8], n[9], n[10], n[11], n[12], n[13], n[14],
        ],
    ).context("Falha na inserção")?;
    Ok(changed > 0)
}

type RawDraw = (u32, Option<String>, [u8; PICK_COUNT]);

fn read_row(row: &Row<'_>) -> rusqlite::Result<RawDraw> {
    let mut numbers = [0u8; PICK_COUNT];
    for (i, slot) in numbers.iter_mut().enumerate() {
        *slot = row.get::<_, u8>(i + 2)?;
    }
    Ok((row.get(0)?, row.get(1)?, numbers))
}

fn into_draws(rows: Vec<RawDraw>) -> Result<Vec<Draw>> {
    rows.into_iter()
        .map(|(contest, date, numbers)| {
            Draw::new(contest, date, &numbers)
                .with_context(|| format!("Concurso {} inválido na base", contest))
        })
        .collect()
}

/// Os `limit` últimos sorteios, do mais recente ao mais antigo.
pub fn fetch_last_draws(conn: &Connection, limit: u32) -> Result<Vec<Draw>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {COLUMNS} FROM draws ORDER BY contest DESC LIMIT ?1"
    ))?;
    let rows = stmt
        .query_map([limit], read_row)?
        .collect::<Result<Vec<_>, _>>()?;
    into_draws(rows)
}

/// Histórico completo em ordem cronológica.
pub fn fetch_history(conn: &Connection) -> Result<DrawHistory> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {COLUMNS} FROM draws ORDER BY contest ASC"
    ))?;
    let rows = stmt
        .query_map([], read_row)?
        .collect::<Result<Vec<_>, _>>()?;
    let draws = into_draws(rows)?;
    log::info!("{} sorteios carregados", draws.len());
    Ok(DrawHistory::new(draws))
}

pub fn count_draws(conn: &Connection) -> Result<u32> {
    let count: u32 = conn.query_row("SELECT COUNT(*) FROM draws", [], |row| row.get(0))?;
    Ok(count)
}
