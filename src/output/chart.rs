use crate::engine::RankedResult;

pub const BAR_WIDTH: usize = 40;

pub fn render_bar_chart(result: &RankedResult, top_n: usize) -> String {
    let entries = result.top(top_n);
    let label_width = entries
        .iter()
        .map(|e| e.label.chars().count())
        .max()
        .unwrap_or(0);

    let mut out = format!("Top {} Aircraft - TOPSIS Scores\n", entries.len());
    for entry in entries {
        let filled = (entry.score.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize;
        out.push_str(&format!(
            "{:<width$} | {}{} {:.3}\n",
            entry.label,
            "█".repeat(filled),
            " ".repeat(BAR_WIDTH - filled),
            entry.score,
            width = label_width
        ));
    }
    out
}
