use tracing::debug;

use crate::criteria::{Direction, DirectionMap, WeightMap};
use crate::engine::validate::{resolve_columns, validate_matrix, ColumnSpec};
use crate::engine::{DecisionMatrix, RankError, RankOptions, RankedAlternative, RankedResult};

/// Score given to an alternative whose distances to both reference points are zero.
pub const NEUTRAL_SCORE: f64 = 0.5;

pub fn rank(
    matrix: &DecisionMatrix,
    weights: &WeightMap,
    directions: &DirectionMap,
) -> Result<RankedResult, RankError> {
    rank_with_options(matrix, weights, directions, &RankOptions::default())
}

pub fn rank_with_options(
    matrix: &DecisionMatrix,
    weights: &WeightMap,
    directions: &DirectionMap,
    options: &RankOptions,
) -> Result<RankedResult, RankError> {
    validate_matrix(matrix)?;
    let columns = resolve_columns(matrix, weights, directions)?;

    if let Some(tolerance) = options.weight_sum_tolerance {
        let total: f64 = columns.iter().map(|c| c.weight).sum();
        if (total - 1.0).abs() > tolerance {
            return Err(RankError::InvalidWeightSum { total, tolerance });
        }
    }

    let weighted = weighted_normalized(matrix, &columns);
    let (ideal, anti_ideal) = reference_points(&weighted, &columns);

    let mut ranking = weighted
        .iter()
        .enumerate()
        .map(|(row, values)| {
            let d_plus = euclidean(values, &ideal);
            let d_minus = euclidean(values, &anti_ideal);
            RankedAlternative {
                rank: 0,
                label: matrix.alternatives[row].clone(),
                row,
                score: closeness(d_plus, d_minus),
                distance_to_ideal: d_plus,
                distance_to_anti_ideal: d_minus,
            }
        })
        .collect::<Vec<_>>();

    // sort_by is stable: equal scores keep input order.
    ranking.sort_by(|a, b| b.score.total_cmp(&a.score));
    for (idx, entry) in ranking.iter_mut().enumerate() {
        entry.rank = idx + 1;
    }

    debug!(
        alternatives = ranking.len(),
        criteria = columns.len(),
        "ranked decision matrix"
    );

    Ok(RankedResult {
        criteria: matrix.criteria.clone(),
        ideal,
        anti_ideal,
        ranking,
    })
}

/// Vector-normalizes each column and applies its weight. Zero-norm columns
/// are left unscaled before weighting.
fn weighted_normalized(matrix: &DecisionMatrix, columns: &[ColumnSpec]) -> Vec<Vec<f64>> {
    let norms = (0..columns.len())
        .map(|j| column_norm(matrix.column(j)))
        .collect::<Vec<_>>();

    matrix
        .values
        .iter()
        .map(|row| {
            row.iter()
                .zip(columns.iter().zip(&norms))
                .map(|(x, (spec, norm))| {
                    let normalized = if *norm == 0.0 { *x } else { x / norm };
                    spec.weight * normalized
                })
                .collect()
        })
        .collect()
}

/// Euclidean norm, scaled by the largest magnitude so squaring cannot overflow.
fn column_norm(values: impl Iterator<Item = f64> + Clone) -> f64 {
    let scale = values.clone().fold(0.0_f64, |acc, x| acc.max(x.abs()));
    if scale == 0.0 {
        return 0.0;
    }
    scale * values.map(|x| (x / scale).powi(2)).sum::<f64>().sqrt()
}

fn reference_points(weighted: &[Vec<f64>], columns: &[ColumnSpec]) -> (Vec<f64>, Vec<f64>) {
    let mut ideal = Vec::with_capacity(columns.len());
    let mut anti_ideal = Vec::with_capacity(columns.len());
    for (j, spec) in columns.iter().enumerate() {
        let (lo, hi) = weighted
            .iter()
            .map(|row| row[j])
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });
        match spec.direction {
            Direction::Maximize => {
                ideal.push(hi);
                anti_ideal.push(lo);
            }
            Direction::Minimize => {
                ideal.push(lo);
                anti_ideal.push(hi);
            }
        }
    }
    (ideal, anti_ideal)
}

fn euclidean(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).fold(0.0, |acc: f64, (x, y)| acc.hypot(x - y))
}

fn closeness(d_plus: f64, d_minus: f64) -> f64 {
    let total = d_plus + d_minus;
    if total == 0.0 {
        NEUTRAL_SCORE
    } else {
        d_minus / total
    }
}

#[cfg(test)]
mod tests {
    use super::{rank, rank_with_options, NEUTRAL_SCORE};
    use crate::criteria::{Direction, DirectionMap, WeightMap};
    use crate::engine::{DecisionMatrix, InputViolation, RankError, RankOptions};

    fn weights(pairs: &[(&str, f64)]) -> WeightMap {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    fn directions(pairs: &[(&str, Direction)]) -> DirectionMap {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    fn worked_example() -> (DecisionMatrix, WeightMap, DirectionMap) {
        let matrix = DecisionMatrix::from_rows(
            ["c1", "c2"],
            vec![
                ("Aircraft 1", vec![1.0, 3.0]),
                ("Aircraft 2", vec![2.0, 2.0]),
                ("Aircraft 3", vec![3.0, 1.0]),
            ],
        );
        (
            matrix,
            weights(&[("c1", 0.5), ("c2", 0.5)]),
            directions(&[("c1", Direction::Maximize), ("c2", Direction::Minimize)]),
        )
    }

    #[test]
    fn worked_example_ranks_dominant_alternative_first() {
        let (matrix, w, d) = worked_example();
        let result = rank(&matrix, &w, &d).expect("ranking failed");
        let labels = result
            .ranking
            .iter()
            .map(|r| r.label.as_str())
            .collect::<Vec<_>>();
        assert_eq!(labels, vec!["Aircraft 3", "Aircraft 2", "Aircraft 1"]);
        assert!((result.ranking[0].score - 1.0).abs() < 1e-12);
        assert!((result.ranking[1].score - 0.5).abs() < 1e-12);
        assert!(result.ranking[2].score.abs() < 1e-12);
        assert_eq!(result.ranking[0].rank, 1);
        assert_eq!(result.ranking[0].row, 2);
    }

    #[test]
    fn ideal_follows_direction() {
        let (matrix, w, d) = worked_example();
        let result = rank(&matrix, &w, &d).expect("ranking failed");
        let norm = 14.0_f64.sqrt();
        assert!((result.ideal[0] - 0.5 * 3.0 / norm).abs() < 1e-12);
        assert!((result.ideal[1] - 0.5 * 1.0 / norm).abs() < 1e-12);
        assert!((result.anti_ideal[0] - 0.5 * 1.0 / norm).abs() < 1e-12);
        assert!((result.anti_ideal[1] - 0.5 * 3.0 / norm).abs() < 1e-12);
    }

    #[test]
    fn zero_norm_column_contributes_nothing() {
        let with_zero = DecisionMatrix::from_rows(
            ["c1", "zero"],
            vec![
                ("a", vec![1.0, 0.0]),
                ("b", vec![4.0, 0.0]),
                ("c", vec![2.0, 0.0]),
            ],
        );
        let result = rank(
            &with_zero,
            &weights(&[("c1", 0.5), ("zero", 0.5)]),
            &directions(&[("c1", Direction::Maximize), ("zero", Direction::Minimize)]),
        )
        .expect("ranking failed");
        assert_eq!(result.ideal[1], 0.0);
        assert_eq!(result.anti_ideal[1], 0.0);

        let without = DecisionMatrix::from_rows(
            ["c1"],
            vec![("a", vec![1.0]), ("b", vec![4.0]), ("c", vec![2.0])],
        );
        let reference = rank(
            &without,
            &weights(&[("c1", 0.5)]),
            &directions(&[("c1", Direction::Maximize)]),
        )
        .expect("ranking failed");
        for (x, y) in result.ranking.iter().zip(&reference.ranking) {
            assert_eq!(x.label, y.label);
            assert!((x.score - y.score).abs() < 1e-12);
            assert!((x.distance_to_ideal - y.distance_to_ideal).abs() < 1e-12);
        }
    }

    #[test]
    fn identical_values_resolve_to_neutral_score() {
        let matrix = DecisionMatrix::from_rows(
            ["only"],
            vec![("a", vec![7.0]), ("b", vec![7.0]), ("c", vec![7.0])],
        );
        let result = rank(
            &matrix,
            &weights(&[("only", 1.0)]),
            &directions(&[("only", Direction::Minimize)]),
        )
        .expect("ranking failed");
        assert!(result.ranking.iter().all(|r| r.score == NEUTRAL_SCORE));
        let rows = result.ranking.iter().map(|r| r.row).collect::<Vec<_>>();
        assert_eq!(rows, vec![0, 1, 2]);
    }

    #[test]
    fn identical_rows_tie_in_input_order() {
        let matrix = DecisionMatrix::from_rows(
            ["c1", "c2"],
            vec![
                ("first", vec![2.0, 5.0]),
                ("worse", vec![1.0, 9.0]),
                ("second", vec![2.0, 5.0]),
            ],
        );
        let result = rank(
            &matrix,
            &weights(&[("c1", 0.5), ("c2", 0.5)]),
            &directions(&[("c1", Direction::Maximize), ("c2", Direction::Minimize)]),
        )
        .expect("ranking failed");
        assert_eq!(result.ranking[0].label, "first");
        assert_eq!(result.ranking[1].label, "second");
        assert_eq!(result.ranking[0].score, result.ranking[1].score);
    }

    #[test]
    fn missing_weight_is_invalid_input() {
        let (matrix, _, d) = worked_example();
        let err = rank(&matrix, &weights(&[("c1", 1.0)]), &d).expect_err("should fail");
        assert_eq!(
            err,
            RankError::InvalidInput(InputViolation::MissingWeight {
                criterion: "c2".to_string()
            })
        );
    }

    #[test]
    fn negative_weight_is_invalid_input() {
        let (matrix, _, d) = worked_example();
        let err = rank(&matrix, &weights(&[("c1", 0.9), ("c2", -0.2)]), &d)
            .expect_err("should fail");
        assert!(matches!(
            err.violation(),
            Some(InputViolation::NegativeWeight { criterion, .. }) if criterion == "c2"
        ));
    }

    #[test]
    fn weight_above_one_is_invalid_input() {
        let (matrix, _, d) = worked_example();
        let err = rank(&matrix, &weights(&[("c1", 1e300), ("c2", 0.5)]), &d)
            .expect_err("should fail");
        assert!(matches!(
            err.violation(),
            Some(InputViolation::WeightAboveOne { criterion, .. }) if criterion == "c1"
        ));
    }

    #[test]
    fn non_finite_weight_is_invalid_input() {
        let (matrix, _, d) = worked_example();
        for bad in [f64::INFINITY, f64::NAN] {
            let err = rank(&matrix, &weights(&[("c1", 0.5), ("c2", bad)]), &d)
                .expect_err("should fail");
            assert_eq!(
                err.violation(),
                Some(&InputViolation::NonFiniteWeight {
                    criterion: "c2".to_string()
                })
            );
        }
    }

    #[test]
    fn matrix_without_criteria_is_rejected() {
        let matrix =
            DecisionMatrix::from_rows(Vec::<String>::new(), vec![("a", vec![]), ("b", vec![])]);
        let err = rank(&matrix, &WeightMap::new(), &DirectionMap::new()).expect_err("should fail");
        assert_eq!(err.violation(), Some(&InputViolation::NoCriteria));
    }

    #[test]
    fn large_magnitudes_rank_like_their_scaled_values() {
        let w = weights(&[("c1", 1.0)]);
        let d = directions(&[("c1", Direction::Maximize)]);
        let huge = DecisionMatrix::from_rows(["c1"], vec![("lo", vec![1e155]), ("hi", vec![3e155])]);
        let small = DecisionMatrix::from_rows(["c1"], vec![("lo", vec![1.0]), ("hi", vec![3.0])]);
        let huge = rank(&huge, &w, &d).expect("ranking failed");
        let small = rank(&small, &w, &d).expect("ranking failed");

        assert_eq!(huge.best().map(|r| r.label.as_str()), Some("hi"));
        assert!((huge.score_of("hi").unwrap_or_default() - 1.0).abs() < 1e-12);
        assert!(huge.score_of("lo").unwrap_or(f64::NAN).abs() < 1e-12);
        for (x, y) in huge.ranking.iter().zip(&small.ranking) {
            assert_eq!(x.label, y.label);
            assert!((x.score - y.score).abs() < 1e-12);
        }
    }

    #[test]
    fn missing_direction_is_invalid_input() {
        let (matrix, w, _) = worked_example();
        let err = rank(&matrix, &w, &directions(&[("c1", Direction::Maximize)]))
            .expect_err("should fail");
        assert!(matches!(
            err.violation(),
            Some(InputViolation::MissingDirection { criterion }) if criterion == "c2"
        ));
    }

    #[test]
    fn non_finite_value_names_row_and_column() {
        let (mut matrix, w, d) = worked_example();
        matrix.values[1][1] = f64::NAN;
        let err = rank(&matrix, &w, &d).expect_err("should fail");
        assert_eq!(
            err.violation(),
            Some(&InputViolation::NonFiniteValue {
                row: 1,
                column: "c2".to_string()
            })
        );
    }

    #[test]
    fn single_alternative_is_rejected() {
        let matrix = DecisionMatrix::from_rows(["c1"], vec![("solo", vec![1.0])]);
        let err = rank(
            &matrix,
            &weights(&[("c1", 1.0)]),
            &directions(&[("c1", Direction::Maximize)]),
        )
        .expect_err("should fail");
        assert_eq!(
            err.violation(),
            Some(&InputViolation::TooFewAlternatives { found: 1 })
        );
    }

    #[test]
    fn weight_sum_is_only_enforced_when_requested() {
        let (matrix, _, d) = worked_example();
        let w = weights(&[("c1", 0.5), ("c2", 0.6)]);
        assert!(rank(&matrix, &w, &d).is_ok());

        let err = rank_with_options(&matrix, &w, &d, &RankOptions::strict(0.001))
            .expect_err("should fail");
        match err {
            RankError::InvalidWeightSum { total, tolerance } => {
                assert!((total - 1.1).abs() < 1e-9);
                assert!((tolerance - 0.001).abs() < 1e-12);
            }
            other => panic!("unexpected error: {other}"),
        }

        let within = weights(&[("c1", 0.5), ("c2", 0.5005)]);
        assert!(rank_with_options(&matrix, &within, &d, &RankOptions::strict(0.001)).is_ok());
    }

    #[test]
    fn repeated_runs_are_bit_identical() {
        let (matrix, w, d) = worked_example();
        let first = rank(&matrix, &w, &d).expect("ranking failed");
        let second = rank(&matrix, &w, &d).expect("ranking failed");
        assert_eq!(first, second);
        for (a, b) in first.ranking.iter().zip(&second.ranking) {
            assert_eq!(a.score.to_bits(), b.score.to_bits());
        }
    }
}
