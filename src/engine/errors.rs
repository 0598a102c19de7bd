use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RankError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InputViolation),
    #[error("weights sum to {total:.4}, expected 1 within ±{tolerance}")]
    InvalidWeightSum { total: f64, tolerance: f64 },
}

/// Which input constraint failed, with the offending row or column.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputViolation {
    #[error("at least 2 alternatives are required, found {found}")]
    TooFewAlternatives { found: usize },
    #[error("decision matrix has no criteria")]
    NoCriteria,
    #[error("{labels} alternative labels for {rows} rows")]
    LabelCountMismatch { labels: usize, rows: usize },
    #[error("row {row} has {found} values, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("criterion {name} appears more than once")]
    DuplicateCriterion { name: String },
    #[error("value at row {row}, criterion {column} is not finite")]
    NonFiniteValue { row: usize, column: String },
    #[error("no weight for criterion {criterion}")]
    MissingWeight { criterion: String },
    #[error("weight {weight} for criterion {criterion} is negative")]
    NegativeWeight { criterion: String, weight: f64 },
    #[error("weight {weight} for criterion {criterion} is above 1")]
    WeightAboveOne { criterion: String, weight: f64 },
    #[error("weight for criterion {criterion} is not finite")]
    NonFiniteWeight { criterion: String },
    #[error("weight given for {criterion}, which is not a matrix criterion")]
    UnmappedWeight { criterion: String },
    #[error("no optimization direction for criterion {criterion}")]
    MissingDirection { criterion: String },
}

impl RankError {
    pub fn violation(&self) -> Option<&InputViolation> {
        match self {
            Self::InvalidInput(violation) => Some(violation),
            Self::InvalidWeightSum { .. } => None,
        }
    }
}
