use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::criteria::{DirectionMap, WeightMap};
use crate::engine::DecisionMatrix;

#[derive(Serialize)]
struct CanonicalInputs<'a> {
    matrix: &'a DecisionMatrix,
    weights: &'a WeightMap,
    directions: &'a DirectionMap,
}

/// SHA-256 over the canonical JSON form of a ranking's inputs. Identical
/// inputs always produce the same digest, so it can key a cache of results.
pub fn fingerprint(
    matrix: &DecisionMatrix,
    weights: &WeightMap,
    directions: &DirectionMap,
) -> String {
    let canonical = serde_json::to_string(&CanonicalInputs {
        matrix,
        weights,
        directions,
    })
    .expect("string-keyed maps and finite-or-null floats always serialize");
    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::fingerprint;
    use crate::criteria::{default_directions, default_weights};
    use crate::engine::DecisionMatrix;

    #[test]
    fn changes_when_any_input_changes() {
        let matrix = DecisionMatrix::from_rows(
            ["cruise_speed"],
            vec![("a", vec![210.0]), ("b", vec![240.0])],
        );
        let weights = default_weights();
        let directions = default_directions();
        let base = fingerprint(&matrix, &weights, &directions);
        assert_eq!(base.len(), 64);
        assert_eq!(base, fingerprint(&matrix, &weights, &directions));

        let mut edited = matrix.clone();
        edited.values[0][0] = 211.0;
        assert_ne!(base, fingerprint(&edited, &weights, &directions));

        let mut reweighted = weights.clone();
        reweighted.insert("cruise_speed".to_string(), 0.5);
        assert_ne!(base, fingerprint(&matrix, &reweighted, &directions));
    }
}
