use std::collections::BTreeSet;

use crate::criteria::{Direction, DirectionMap, WeightMap};
use crate::engine::{DecisionMatrix, InputViolation};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnSpec {
    pub weight: f64,
    pub direction: Direction,
}

pub fn validate_matrix(matrix: &DecisionMatrix) -> Result<(), InputViolation> {
    if matrix.criteria.is_empty() {
        return Err(InputViolation::NoCriteria);
    }

    let mut seen = BTreeSet::new();
    for name in &matrix.criteria {
        if !seen.insert(name.as_str()) {
            return Err(InputViolation::DuplicateCriterion { name: name.clone() });
        }
    }

    let rows = matrix.values.len();
    if matrix.alternatives.len() != rows {
        return Err(InputViolation::LabelCountMismatch {
            labels: matrix.alternatives.len(),
            rows,
        });
    }
    if rows < 2 {
        return Err(InputViolation::TooFewAlternatives { found: rows });
    }

    let expected = matrix.criteria.len();
    for (row, values) in matrix.values.iter().enumerate() {
        if values.len() != expected {
            return Err(InputViolation::RaggedRow {
                row,
                expected,
                found: values.len(),
            });
        }
        if let Some(col) = values.iter().position(|v| !v.is_finite()) {
            return Err(InputViolation::NonFiniteValue {
                row,
                column: matrix.criteria[col].clone(),
            });
        }
    }
    Ok(())
}

pub fn resolve_columns(
    matrix: &DecisionMatrix,
    weights: &WeightMap,
    directions: &DirectionMap,
) -> Result<Vec<ColumnSpec>, InputViolation> {
    let mut specs = Vec::with_capacity(matrix.criteria.len());
    for name in &matrix.criteria {
        let weight = *weights
            .get(name)
            .ok_or_else(|| InputViolation::MissingWeight {
                criterion: name.clone(),
            })?;
        if !weight.is_finite() {
            return Err(InputViolation::NonFiniteWeight {
                criterion: name.clone(),
            });
        }
        if weight < 0.0 {
            return Err(InputViolation::NegativeWeight {
                criterion: name.clone(),
                weight,
            });
        }
        if weight > 1.0 {
            return Err(InputViolation::WeightAboveOne {
                criterion: name.clone(),
                weight,
            });
        }
        let direction = *directions
            .get(name)
            .ok_or_else(|| InputViolation::MissingDirection {
                criterion: name.clone(),
            })?;
        specs.push(ColumnSpec { weight, direction });
    }

    if let Some(extra) = weights
        .keys()
        .find(|name| matrix.column_index(name).is_none())
    {
        return Err(InputViolation::UnmappedWeight {
            criterion: extra.clone(),
        });
    }
    Ok(specs)
}
