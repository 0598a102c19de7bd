use anyhow::{bail, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use crate::criteria::{CriterionKind, SimulatedRange};
use crate::engine::DecisionMatrix;
use crate::source::MatrixSource;

pub const MIN_ALTERNATIVES: usize = 2;
pub const MAX_ALTERNATIVES: usize = 1_000_000;

/// Random aircraft cases drawn from the catalog ranges.
#[derive(Debug, Clone)]
pub struct SimulatedSource {
    pub alternatives: usize,
    pub seed: Option<u64>,
}

impl SimulatedSource {
    pub fn new(alternatives: usize, seed: Option<u64>) -> Self {
        Self { alternatives, seed }
    }

    fn generate<R: Rng>(&self, rng: &mut R) -> DecisionMatrix {
        let criteria = CriterionKind::ALL
            .iter()
            .map(|kind| kind.as_slug().to_string())
            .collect::<Vec<_>>();
        let alternatives = (1..=self.alternatives)
            .map(|i| format!("Aircraft {i}"))
            .collect::<Vec<_>>();
        let values = (0..self.alternatives)
            .map(|_| {
                CriterionKind::ALL
                    .iter()
                    .map(|kind| draw(rng, &kind.simulated_range()))
                    .collect()
            })
            .collect();
        DecisionMatrix::new(alternatives, criteria, values)
    }
}

impl MatrixSource for SimulatedSource {
    fn name(&self) -> &str {
        "simulation"
    }

    fn load(&self) -> Result<DecisionMatrix> {
        if self.alternatives < MIN_ALTERNATIVES {
            bail!(
                "at least {MIN_ALTERNATIVES} aircraft cases are required, got {}",
                self.alternatives
            );
        }
        if self.alternatives > MAX_ALTERNATIVES {
            bail!(
                "at most {MAX_ALTERNATIVES} aircraft cases can be simulated, got {}",
                self.alternatives
            );
        }
        info!(
            "simulating {} aircraft cases (seed: {:?})",
            self.alternatives, self.seed
        );
        let matrix = match self.seed {
            Some(seed) => self.generate(&mut StdRng::seed_from_u64(seed)),
            None => self.generate(&mut StdRng::from_entropy()),
        };
        Ok(matrix)
    }
}

fn draw<R: Rng>(rng: &mut R, range: &SimulatedRange) -> f64 {
    match range {
        SimulatedRange::Integer(bounds) => rng.gen_range(bounds.clone()) as f64,
        SimulatedRange::Uniform { low, high } => {
            let value: f64 = rng.gen_range(*low..=*high);
            (value * 1_000.0).round() / 1_000.0
        }
    }
}
