use anyhow::Result;

use crate::engine::{DecisionMatrix, RankedResult};

pub fn matrix_to_csv(matrix: &DecisionMatrix) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    let mut header = vec!["case".to_string()];
    header.extend(matrix.criteria.iter().cloned());
    writer.write_record(&header)?;
    for (label, row) in matrix.alternatives.iter().zip(&matrix.values) {
        let mut record = vec![label.clone()];
        record.extend(row.iter().map(|v| v.to_string()));
        writer.write_record(&record)?;
    }
    let data = writer.into_inner()?;
    Ok(String::from_utf8_lossy(&data).to_string())
}

pub fn ranking_to_csv(
    result: &RankedResult,
    matrix: &DecisionMatrix,
    top_n: usize,
) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    let mut header = vec!["rank".to_string(), "case".to_string()];
    header.extend(result.criteria.iter().cloned());
    header.extend([
        "distance_to_ideal".to_string(),
        "distance_to_anti_ideal".to_string(),
        "topsis_score".to_string(),
    ]);
    writer.write_record(&header)?;

    for entry in result.top(top_n) {
        let mut record = vec![entry.rank.to_string(), entry.label.clone()];
        if let Some(row) = matrix.row(entry.row) {
            record.extend(row.iter().map(|v| v.to_string()));
        }
        record.extend([
            format!("{:.6}", entry.distance_to_ideal),
            format!("{:.6}", entry.distance_to_anti_ideal),
            format!("{:.6}", entry.score),
        ]);
        writer.write_record(&record)?;
    }
    let data = writer.into_inner()?;
    Ok(String::from_utf8_lossy(&data).to_string())
}
