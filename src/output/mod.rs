pub mod chart;
pub mod csv;
pub mod json;
pub mod table;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::engine::{DecisionMatrix, RankedAlternative, RankedResult};
use crate::weights::WeightCheck;

/// Machine-readable summary of one ranking run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingReport {
    pub generated_at: DateTime<Utc>,
    pub source: String,
    pub fingerprint: String,
    pub weight_check: WeightCheck,
    pub alternatives: usize,
    pub top_n: usize,
    pub criteria: Vec<String>,
    pub ideal: Vec<f64>,
    pub anti_ideal: Vec<f64>,
    pub ranking: Vec<ReportEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportEntry {
    #[serde(flatten)]
    pub ranked: RankedAlternative,
    pub values: Vec<f64>,
}

impl RankingReport {
    pub fn build(
        source: impl Into<String>,
        fingerprint: String,
        weight_check: WeightCheck,
        matrix: &DecisionMatrix,
        result: &RankedResult,
        top_n: usize,
    ) -> Self {
        let ranking = result
            .top(top_n)
            .iter()
            .map(|ranked| ReportEntry {
                ranked: ranked.clone(),
                values: matrix.row(ranked.row).map(<[f64]>::to_vec).unwrap_or_default(),
            })
            .collect::<Vec<_>>();
        Self {
            generated_at: Utc::now(),
            source: source.into(),
            fingerprint,
            weight_check,
            alternatives: result.len(),
            top_n: ranking.len(),
            criteria: result.criteria.clone(),
            ideal: result.ideal.clone(),
            anti_ideal: result.anti_ideal.clone(),
            ranking,
        }
    }
}

pub fn best_summary(result: &RankedResult) -> Option<String> {
    result.best().map(|best| {
        format!(
            "Best aircraft configuration: {} - TOPSIS Score: {:.4}",
            best.label, best.score
        )
    })
}
