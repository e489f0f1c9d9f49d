use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};
use textplots::Plot;

use crate::repetition::RepetitionProfile;
use crate::selector::StrategyReport;
use crate::spatial::{band_label, BAND_COUNT};
use crate::stats::{NumberStat, NumberTag};
use crate::strategies::{NumberCount, Rationale};
use crate::streak::StreakKind;

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

fn format_mean(mean: Option<f64>) -> String {
    mean.map(|m| format!("{:.1}", m)).unwrap_or_else(|| "—".to_string())
}

fn format_numbers(numbers: &[u8]) -> String {
    numbers
        .iter()
        .map(|n| format!("{:02}", n))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn display_report(report: &StrategyReport) {
    println!("\n=== JOGO {}: {} ===\n", report.id, report.name.to_uppercase());

    match &report.rationale {
        Rationale::Frequency { counts } => display_selected_counts(counts, report),
        Rationale::Pattern { scores } => {
            let mut table = new_table(vec!["#", "Número", "Score", "Situação", "Devido", "Continuação", "Frequência", "Média pres.", "Média aus."]);
            let mut ranked: Vec<_> = scores.iter().filter(|s| report.game.contains(s.number)).collect();
            ranked.sort_by(|a, b| {
                b.score
                    .partial_cmp(&a.score)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then(a.number.cmp(&b.number))
            });
            for (i, s) in ranked.iter().enumerate() {
                let color = match s.streak.current {
                    StreakKind::Presence => Color::Green,
                    StreakKind::Absence => Color::Yellow,
                };
                table.add_row(vec![
                    Cell::new(i + 1),
                    Cell::new(format!("{:2}", s.number)),
                    Cell::new(format!("{:.3}", s.score)),
                    Cell::new(format!("{} há {}", s.streak.current, s.streak.current_length)).fg(color),
                    Cell::new(format!("{:.2}", s.due)),
                    Cell::new(format!("{:.2}", s.continuation)),
                    Cell::new(format!("{:.2}", s.frequency)),
                    Cell::new(format_mean(s.streak.mean_presence)),
                    Cell::new(format_mean(s.streak.mean_absence)),
                ]);
            }
            println!("{table}");
        }
        Rationale::Parity { profile, target, counts } => {
            let mut table = new_table(vec!["Pares", "Ímpares", "Sorteios", "%"]);
            for c in &profile.distribution {
                let share = c.draws as f64 / profile.total_draws as f64 * 100.0;
                let row = vec![
                    Cell::new(c.split.even),
                    Cell::new(c.split.odd),
                    Cell::new(c.draws),
                    Cell::new(format!("{:.1}", share)),
                ];
                if c.split == *target {
                    table.add_row(row.into_iter().map(|cell| cell.fg(Color::Green)).collect::<Vec<_>>());
                } else {
                    table.add_row(row);
                }
            }
            println!("{table}");
            println!("Divisão mais comum: {target}");
            display_selected_counts(counts, report);
        }
        Rationale::Repetition { profile, last_contest, repeated, fresh } => {
            println!("Média de números repetidos: {:.2} (alvo {})", profile.mean, profile.target);
            println!("Mínimo: {} | Máximo: {}", profile.min, profile.max);
            println!("Repetidos do concurso {}: {}", last_contest, format_numbers(repeated));
            println!("Números novos: {}", format_numbers(fresh));
        }
        Rationale::Spatial { profile, counts } => {
            let mut table = new_table(vec!["Faixa", "Média", "Meta", "Selecionados"]);
            for band in 0..BAND_COUNT {
                let picked: Vec<u8> = report
                    .game
                    .numbers()
                    .iter()
                    .copied()
                    .filter(|&n| crate::spatial::band_of(n) == band)
                    .collect();
                table.add_row(vec![
                    Cell::new(band_label(band)),
                    Cell::new(format!("{:.2}", profile.averages[band])),
                    Cell::new(profile.targets[band]),
                    Cell::new(format_numbers(&picked)),
                ]);
            }
            println!("{table}");
            display_selected_counts(counts, report);
        }
        Rationale::Multifactorial { config, scores } => {
            println!(
                "Pesos: frequência {:.2} | tendência {:.2} (últimos {}) | padrão {:.2} | quentes {:.2} (últimos {})",
                config.frequency_weight,
                config.trend_weight,
                config.trend_window,
                config.pattern_weight,
                config.hot_weight,
                config.hot_window,
            );
            let mut table = new_table(vec!["#", "Número", "Score", "Total", "Recente", "Quentes", "Padrão"]);
            let mut ranked: Vec<_> = scores.iter().collect();
            ranked.sort_by(|a, b| {
                b.score
                    .partial_cmp(&a.score)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then(a.number.cmp(&b.number))
            });
            for (i, s) in ranked.iter().enumerate() {
                let row = vec![
                    Cell::new(i + 1),
                    Cell::new(format!("{:2}", s.number)),
                    Cell::new(format!("{:.3}", s.score)),
                    Cell::new(s.total_count),
                    Cell::new(s.trend_count),
                    Cell::new(s.hot_count),
                    Cell::new(format!("{:.2}", s.pattern)),
                ];
                if report.game.contains(s.number) {
                    table.add_row(row.into_iter().map(|cell| cell.fg(Color::Green)).collect::<Vec<_>>());
                } else {
                    table.add_row(row);
                }
            }
            println!("{table}");
        }
        Rationale::Scores { scores } => {
            let mut table = new_table(vec!["Número", "Score"]);
            for s in scores {
                table.add_row(vec![Cell::new(format!("{:2}", s.number)), Cell::new(format!("{:.4}", s.score))]);
            }
            println!("{table}");
        }
    }

    println!("\nNúmeros selecionados: {}", report.game);
}

fn display_selected_counts(counts: &[NumberCount], report: &StrategyReport) {
    let mut table = new_table(vec!["Número", "Sorteado"]);
    for c in counts.iter().filter(|c| report.game.contains(c.number)) {
        table.add_row(vec![format!("{:2}", c.number), format!("{} vezes", c.count)]);
    }
    println!("{table}");
}

pub fn display_summary(reports: &[StrategyReport]) {
    println!("\n=== RESUMO DOS JOGOS ===\n");

    let mut table = new_table(vec!["Jogo", "Estratégia", "Números", "Pares"]);
    for report in reports {
        table.add_row(vec![
            Cell::new(report.id).fg(Color::Green),
            Cell::new(&report.name),
            Cell::new(report.game.to_string()),
            Cell::new(report.game.even_count()),
        ]);
    }
    println!("{table}");
}

pub fn display_number_stats(stats: &[NumberStat], short_window: usize, long_window: usize, n_draws: usize) {
    println!("\n📊 Estatísticas sobre {} sorteios\n", n_draws);

    let short_header = format!("Últimos {}", short_window);
    let long_header = format!("Últimos {}", long_window);
    let mut table = new_table(vec![
        "Número",
        "Total",
        short_header.as_str(),
        long_header.as_str(),
        "Situação",
        "Média pres.",
        "Média aus.",
        "Máx. pres.",
        "Máx. aus.",
        "Tag",
    ]);

    let mut sorted = stats.to_vec();
    sorted.sort_by(|a, b| b.occurrences.cmp(&a.occurrences).then(a.number.cmp(&b.number)));

    for stat in &sorted {
        let color = match stat.tag {
            NumberTag::Hot => Color::Green,
            NumberTag::Cold => Color::Red,
            NumberTag::Normal => Color::White,
        };
        table.add_row(vec![
            Cell::new(format!("{:2}", stat.number)),
            Cell::new(stat.occurrences),
            Cell::new(stat.short_count),
            Cell::new(stat.long_count),
            Cell::new(format!("{} há {}", stat.streak.current, stat.streak.current_length)),
            Cell::new(format_mean(stat.streak.mean_presence)),
            Cell::new(format_mean(stat.streak.mean_absence)),
            Cell::new(stat.streak.max_presence),
            Cell::new(stat.streak.max_absence),
            Cell::new(stat.tag.to_string()).fg(color),
        ]);
    }
    println!("{table}");
}

/// Números repetidos entre sorteios consecutivos ao longo do histórico.
pub fn display_repetition_chart(profile: &RepetitionProfile) {
    println!("\n== Repetições entre sorteios consecutivos (média {:.2}) ==\n", profile.mean);

    if profile.overlaps.len() < 2 {
        println!("  (Dados insuficientes para o gráfico)");
        return;
    }

    let points: Vec<(f32, f32)> = profile
        .overlaps
        .iter()
        .enumerate()
        .map(|(i, &r)| (i as f32 + 2.0, r as f32))
        .collect();
    let x_max = points.len() as f32 + 1.0;
    let shape = textplots::Shape::Lines(&points);
    let mut chart = textplots::Chart::new_with_y_range(120, 40, 2.0, x_max, 0.0, 15.0);
    println!("{}", chart.lineplot(&shape));
}
