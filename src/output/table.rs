use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, ContentArrangement, Row, Table};

use crate::criteria::display_label;
use crate::engine::{DecisionMatrix, RankedResult};
use crate::weights::{WeightCheck, WeightShare};

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

pub fn format_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.3}")
    }
}

pub fn render_matrix_table(matrix: &DecisionMatrix) -> String {
    matrix_table(matrix).to_string()
}

pub fn matrix_table(matrix: &DecisionMatrix) -> Table {
    let mut table = new_table();
    let mut header = vec!["Case".to_string()];
    header.extend(matrix.criteria.iter().map(|c| display_label(c)));
    table.set_header(header);

    for (label, row) in matrix.alternatives.iter().zip(&matrix.values) {
        let mut cells = vec![label.clone()];
        cells.extend(row.iter().map(|v| format_value(*v)));
        table.add_row(cells);
    }
    table
}

pub fn render_ranking_table(
    result: &RankedResult,
    matrix: &DecisionMatrix,
    top_n: usize,
) -> String {
    ranking_table(result, matrix, top_n).to_string()
}

/// Best row is highlighted.
pub fn ranking_table(result: &RankedResult, matrix: &DecisionMatrix, top_n: usize) -> Table {
    let mut table = new_table();
    let mut header = vec!["Rank".to_string(), "Case".to_string()];
    header.extend(result.criteria.iter().map(|c| display_label(c)));
    header.push("TOPSIS Score".to_string());
    table.set_header(header);

    for entry in result.top(top_n) {
        let mut values = vec![entry.rank.to_string(), entry.label.clone()];
        if let Some(row) = matrix.row(entry.row) {
            values.extend(row.iter().map(|v| format_value(*v)));
        }
        values.push(format!("{:.4}", entry.score));

        let cells = values.into_iter().map(|text| {
            let cell = Cell::new(text);
            if entry.rank == 1 {
                cell.fg(Color::Green)
            } else {
                cell
            }
        });
        table.add_row(Row::from(cells.collect::<Vec<_>>()));
    }
    table
}

pub fn render_weights_table(check: &WeightCheck, shares: &[WeightShare]) -> String {
    let mut table = new_table();
    table.set_header(vec!["Criterion", "Weight", "Share"]);
    for share in shares {
        let name = Cell::new(display_label(&share.criterion));
        let name = if share.largest {
            name.fg(Color::Cyan)
        } else {
            name
        };
        table.add_row(Row::from(vec![
            name,
            Cell::new(format!("{:.3}", share.weight)),
            Cell::new(format!("{:.1}%", share.share_percent)),
        ]));
    }

    let status = if check.is_balanced() { "OK" } else { "ERROR" };
    format!("{table}\n[{status}] {check}")
}
