pub mod errors;
pub mod fingerprint;
pub mod topsis;
pub mod validate;

use serde::{Deserialize, Serialize};

pub use errors::{InputViolation, RankError};
pub use fingerprint::fingerprint;
pub use topsis::{rank, rank_with_options};

/// Alternatives (rows) × criteria (columns). Shape is checked when ranking,
/// so a matrix read from an untrusted source can be held before validation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DecisionMatrix {
    pub alternatives: Vec<String>,
    pub criteria: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

impl DecisionMatrix {
    pub fn new(
        alternatives: Vec<String>,
        criteria: Vec<String>,
        values: Vec<Vec<f64>>,
    ) -> Self {
        Self {
            alternatives,
            criteria,
            values,
        }
    }

    pub fn from_rows<L, C>(criteria: C, rows: Vec<(L, Vec<f64>)>) -> Self
    where
        L: Into<String>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        let criteria = criteria.into_iter().map(Into::into).collect();
        let (alternatives, values) = rows
            .into_iter()
            .map(|(label, row)| (label.into(), row))
            .unzip();
        Self {
            alternatives,
            criteria,
            values,
        }
    }

    pub fn alternative_count(&self) -> usize {
        self.values.len()
    }

    pub fn criterion_count(&self) -> usize {
        self.criteria.len()
    }

    pub fn row(&self, index: usize) -> Option<&[f64]> {
        self.values.get(index).map(Vec::as_slice)
    }

    pub fn column_index(&self, criterion: &str) -> Option<usize> {
        self.criteria.iter().position(|c| c == criterion)
    }

    pub fn column(&self, index: usize) -> impl Iterator<Item = f64> + Clone + '_ {
        self.values
            .iter()
            .filter_map(move |row| row.get(index).copied())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RankOptions {
    /// When set, the engine rejects weight vectors whose sum is further than
    /// this from 1.0.
    pub weight_sum_tolerance: Option<f64>,
}

impl RankOptions {
    pub fn strict(tolerance: f64) -> Self {
        Self {
            weight_sum_tolerance: Some(tolerance),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RankedAlternative {
    pub rank: usize,
    pub label: String,
    pub row: usize,
    pub score: f64,
    pub distance_to_ideal: f64,
    pub distance_to_anti_ideal: f64,
}

/// Ranking sorted by score, best first. Ties keep input order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RankedResult {
    pub criteria: Vec<String>,
    pub ideal: Vec<f64>,
    pub anti_ideal: Vec<f64>,
    pub ranking: Vec<RankedAlternative>,
}

impl RankedResult {
    pub fn len(&self) -> usize {
        self.ranking.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranking.is_empty()
    }

    pub fn best(&self) -> Option<&RankedAlternative> {
        self.ranking.first()
    }

    pub fn top(&self, n: usize) -> &[RankedAlternative] {
        &self.ranking[..n.min(self.ranking.len())]
    }

    pub fn score_of(&self, label: &str) -> Option<f64> {
        self.ranking
            .iter()
            .find(|entry| entry.label == label)
            .map(|entry| entry.score)
    }
}
