mod config;
mod display;
mod import;

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use crate::config::{resolve_config, save_config, ConfigOverrides};
use crate::display::{display_draws, display_import_summary};
use lotofacil_db::db::{count_draws, db_path, fetch_history, fetch_last_draws, insert_draw, migrate, open_db};
use lotofacil_db::models::{validate_numbers, Draw, PICK_COUNT};
use lotofacil_db::rusqlite::Connection;
use lotofacil_engine::display::{
    display_number_stats, display_repetition_chart, display_report, display_summary,
};
use lotofacil_engine::{repetition, stats, StrategySelector};

/// O binário não registra estratégias externas; os slots 8 e 9 ficam de fora.
const BUILTIN_COUNT: u8 = 7;

/// `all` ou o identificador de um jogo embutido (1 a 7).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StrategyChoice {
    All,
    One(u8),
}

impl FromStr for StrategyChoice {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        match s.parse::<u8>() {
            Ok(id) if (1..=BUILTIN_COUNT).contains(&id) => Ok(Self::One(id)),
            _ => Err(format!("estratégia inválida '{}': use 'all' ou 1-{}", s, BUILTIN_COUNT)),
        }
    }
}

#[derive(Parser)]
#[command(name = "lotofacil", about = "Analisador estatístico da Lotofácil")]
struct Cli {
    /// Caminho da base SQLite
    #[arg(long, global = true, env = "LOTOFACIL_DB")]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Importar os sorteios de um arquivo CSV da Caixa
    Import {
        /// Caminho do arquivo CSV
        #[arg(short, long, default_value = "assets/lotofacil.csv")]
        file: PathBuf,
    },

    /// Mostrar o caminho da base de dados
    DbPath,

    /// Listar os últimos sorteios
    List {
        /// Quantidade de sorteios exibidos
        #[arg(short, long, default_value = "10")]
        last: u32,
    },

    /// Estatísticas por número (frequências, sequências, quentes/frios)
    Stats {
        /// Janela curta (números quentes)
        #[arg(short, long, default_value = "5")]
        short_window: usize,

        /// Janela longa (tendência)
        #[arg(short, long, default_value = "50")]
        long_window: usize,
    },

    /// Gerar os jogos sugeridos
    Generate {
        /// `all` ou o número do jogo (1-7)
        #[arg(short, long, default_value = "all")]
        strategy: StrategyChoice,

        /// Configuração do scorer multifatorial (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        #[arg(long)]
        frequency_weight: Option<f64>,

        #[arg(long)]
        trend_weight: Option<f64>,

        #[arg(long)]
        pattern_weight: Option<f64>,

        #[arg(long)]
        hot_weight: Option<f64>,

        #[arg(long)]
        trend_window: Option<usize>,

        #[arg(long)]
        hot_window: Option<usize>,

        /// Gravar a configuração efetiva neste arquivo
        #[arg(long)]
        save_config: Option<PathBuf>,

        /// Saída em JSON
        #[arg(long)]
        json: bool,
    },

    /// Adicionar um sorteio manualmente
    Add,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let path = cli.db.unwrap_or_else(db_path);
    let conn = open_db(&path)?;
    migrate(&conn)?;

    match cli.command {
        Command::Import { file } => cmd_import(&conn, &file),
        Command::DbPath => {
            println!("{}", path.display());
            Ok(())
        }
        Command::List { last } => cmd_list(&conn, last),
        Command::Stats { short_window, long_window } => cmd_stats(&conn, short_window, long_window),
        Command::Generate {
            strategy,
            config,
            frequency_weight,
            trend_weight,
            pattern_weight,
            hot_weight,
            trend_window,
            hot_window,
            save_config: save_path,
            json,
        } => {
            let overrides = ConfigOverrides {
                frequency_weight,
                trend_weight,
                pattern_weight,
                hot_weight,
                trend_window,
                hot_window,
            };
            cmd_generate(&conn, strategy, config.as_deref(), overrides, save_path.as_deref(), json)
        }
        Command::Add => cmd_add(&conn),
    }
}

fn ensure_not_empty(conn: &Connection) -> Result<bool> {
    if count_draws(conn)? == 0 {
        println!("Base vazia. Execute primeiro: lotofacil import");
        return Ok(false);
    }
    Ok(true)
}

fn cmd_import(conn: &Connection, file: &Path) -> Result<()> {
    let result = import::import_csv(conn, file)?;
    display_import_summary(&result);
    Ok(())
}

fn cmd_list(conn: &Connection, last: u32) -> Result<()> {
    if !ensure_not_empty(conn)? {
        return Ok(());
    }
    let draws = fetch_last_draws(conn, last)?;
    display_draws(&draws);
    Ok(())
}

fn cmd_stats(conn: &Connection, short_window: usize, long_window: usize) -> Result<()> {
    if !ensure_not_empty(conn)? {
        return Ok(());
    }
    let history = fetch_history(conn)?;
    let number_stats = stats::compute_stats(&history, short_window, long_window)
        .context("Falha no cálculo das estatísticas")?;
    display_number_stats(&number_stats, short_window, long_window, history.len());

    let profile = repetition::profile(&history)?;
    display_repetition_chart(&profile);
    Ok(())
}

fn cmd_generate(
    conn: &Connection,
    strategy: StrategyChoice,
    config_path: Option<&Path>,
    overrides: ConfigOverrides,
    save_path: Option<&Path>,
    json: bool,
) -> Result<()> {
    if !ensure_not_empty(conn)? {
        return Ok(());
    }
    let config = resolve_config(config_path, overrides)?;
    let selector = StrategySelector::new(config).context("Configuração do scorer inválida")?;
    if let Some(p) = save_path {
        save_config(&config, p)?;
        log::info!("configuração gravada em {}", p.display());
    }

    let history = fetch_history(conn)?;

    match strategy {
        StrategyChoice::All => {
            let reports = selector.run_all(&history)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&reports)?);
            } else {
                for report in &reports {
                    display_report(report);
                }
                display_summary(&reports);
            }
        }
        StrategyChoice::One(id) => {
            let report = selector.run(id, &history)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                display_report(&report);
            }
        }
    }

    Ok(())
}

fn cmd_add(conn: &Connection) -> Result<()> {
    println!("Adicionar um sorteio manualmente\n");

    let contest: u32 = prompt("Número do concurso (ex: 3250): ")?
        .parse()
        .context("Número de concurso inválido")?;
    let raw_date = prompt("Data (DD/MM/AAAA, vazio se desconhecida): ")?;
    let date = if raw_date.is_empty() {
        None
    } else {
        Some(import::parse_date(&raw_date)?)
    };

    let numbers = prompt_numbers()?;
    let draw = Draw::new(contest, date, &numbers)?;

    println!("\nSorteio a inserir:");
    display_draws(std::slice::from_ref(&draw));

    let confirm = prompt("\nConfirmar a inserção? (s/n): ")?;
    if confirm.trim().to_lowercase() != "s" {
        println!("Inserção cancelada.");
        return Ok(());
    }

    if insert_draw(conn, &draw)? {
        println!("Sorteio inserido com sucesso.");
    } else {
        bail!("O concurso {} já existe na base", contest);
    }
    Ok(())
}

fn prompt(msg: &str) -> Result<String> {
    print!("{}", msg);
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .context("Erro de leitura")?;
    Ok(input.trim().to_string())
}

fn prompt_numbers() -> Result<[u8; PICK_COUNT]> {
    loop {
        let input = prompt("15 números (separados por espaços, 1-25): ")?;
        let parsed: std::result::Result<Vec<u8>, _> =
            input.split_whitespace().map(|s| s.parse::<u8>()).collect();
        match parsed {
            Ok(v) => match validate_numbers(&v) {
                Ok(numbers) => return Ok(numbers),
                Err(e) => println!("{}. Tente novamente.", e),
            },
            Err(_) => println!("Digite apenas números inteiros. Tente novamente."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_choice_parsing() {
        assert_eq!("all".parse::<StrategyChoice>(), Ok(StrategyChoice::All));
        assert_eq!("ALL".parse::<StrategyChoice>(), Ok(StrategyChoice::All));
        assert_eq!("7".parse::<StrategyChoice>(), Ok(StrategyChoice::One(7)));
        assert_eq!("1".parse::<StrategyChoice>(), Ok(StrategyChoice::One(1)));
        assert!("0".parse::<StrategyChoice>().is_err());
        assert!("8".parse::<StrategyChoice>().is_err());
        assert!("9".parse::<StrategyChoice>().is_err());
        assert!("10".parse::<StrategyChoice>().is_err());
        assert!("multi".parse::<StrategyChoice>().is_err());
    }

    #[test]
    fn test_cli_parses_generate() {
        let cli = Cli::try_parse_from([
            "lotofacil", "--db", "/tmp/x.db", "generate", "--strategy", "3", "--hot-window", "8", "--json",
        ])
        .unwrap();
        assert_eq!(cli.db, Some(PathBuf::from("/tmp/x.db")));
        match cli.command {
            Command::Generate { strategy, hot_window, json, .. } => {
                assert_eq!(strategy, StrategyChoice::One(3));
                assert_eq!(hot_window, Some(8));
                assert!(json);
            }
            _ => panic!("subcomando inesperado"),
        }
    }

    #[test]
    fn test_generate_end_to_end_on_temp_db() {
        let dir = tempfile::tempdir().unwrap();
        let conn = open_db(&dir.path().join("lotofacil.db")).unwrap();
        migrate(&conn).unwrap();
        let rows: [Vec<u8>; 3] = [
            (1..=15).collect(),
            [1, 2, 3, 4, 5, 16, 17, 18, 19, 20, 21, 22, 23, 24, 25].to_vec(),
            [1, 2, 3, 6, 7, 8, 9, 10, 11, 16, 17, 18, 19, 20, 25].to_vec(),
        ];
        for (i, row) in rows.iter().enumerate() {
            insert_draw(&conn, &Draw::new(i as u32 + 1, None, row).unwrap()).unwrap();
        }

        let history = fetch_history(&conn).unwrap();
        let config = resolve_config(None, ConfigOverrides::default()).unwrap();
        let reports = StrategySelector::new(config).unwrap().run_all(&history).unwrap();
        assert_eq!(reports.len(), 7);
        assert!(reports[0].game.contains(1));
    }
}
