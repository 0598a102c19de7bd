use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use tracing::info;

use crate::criteria::canonical_name;
use crate::engine::DecisionMatrix;
use crate::source::MatrixSource;

/// Decision matrix read from a CSV file. The first column holds the
/// alternative labels; every other header cell names a criterion.
#[derive(Debug, Clone)]
pub struct CsvSource {
    pub path: PathBuf,
}

impl CsvSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl MatrixSource for CsvSource {
    fn name(&self) -> &str {
        "csv"
    }

    fn load(&self) -> Result<DecisionMatrix> {
        let data = std::fs::read_to_string(&self.path)
            .with_context(|| format!("failed reading matrix CSV: {}", self.path.display()))?;
        let matrix = parse_matrix_csv(&data).with_context(|| {
            format!("failed parsing matrix CSV: {}", self.path.display())
        })?;
        info!(
            "loaded {} alternatives x {} criteria from {}",
            matrix.alternative_count(),
            matrix.criterion_count(),
            display_path(&self.path)
        );
        Ok(matrix)
    }
}

pub fn parse_matrix_csv(data: &str) -> Result<DecisionMatrix> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(data.as_bytes());

    let headers = reader.headers()?.clone();
    if headers.len() < 2 {
        bail!("header needs a label column and at least one criterion");
    }
    let criteria = headers
        .iter()
        .skip(1)
        .map(canonical_name)
        .collect::<Vec<_>>();

    let mut alternatives = Vec::new();
    let mut values = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        // header is line 1
        let line = idx + 2;
        let record = record.with_context(|| format!("malformed record on line {line}"))?;
        let mut cells = record.iter();
        let label = cells
            .next()
            .ok_or_else(|| anyhow!("empty record on line {line}"))?;
        let row = cells
            .zip(&criteria)
            .map(|(cell, criterion)| {
                cell.parse::<f64>().map_err(|e| {
                    anyhow!("line {line}, criterion {criterion}: cannot parse {cell:?}: {e}")
                })
            })
            .collect::<Result<Vec<_>>>()?;
        alternatives.push(label.to_string());
        values.push(row);
    }

    Ok(DecisionMatrix::new(alternatives, criteria, values))
}

fn display_path(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
