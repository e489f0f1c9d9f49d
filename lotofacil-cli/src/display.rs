use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};

use crate::import::ImportResult;
use lotofacil_db::models::Draw;

pub fn display_draws(draws: &[Draw]) {
    if draws.is_empty() {
        println!("Nenhum sorteio para exibir.");
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Concurso", "Data", "Números", "Pares"]);

    for draw in draws {
        let numbers = draw
            .numbers()
            .iter()
            .map(|n| format!("{:02}", n))
            .collect::<Vec<_>>()
            .join(" ");
        let evens = draw.numbers().iter().filter(|&&n| n % 2 == 0).count();

        table.add_row(vec![
            Cell::new(draw.contest()),
            Cell::new(draw.date().unwrap_or("—")),
            Cell::new(numbers),
            Cell::new(evens),
        ]);
    }

    println!("{table}");
}

pub fn display_import_summary(result: &ImportResult) {
    println!("Importação concluída:");
    println!("  Linhas lidas        : {}", result.total_records);
    println!("  Inseridos           : {}", result.inserted);
    println!("  Duplicados ignorados: {}", result.skipped);
}
