//! Weight configuration boundary: checks the caller performs before handing
//! a weight vector to the engine.

use std::fmt::{Display, Formatter};

use anyhow::{anyhow, bail, Result};
use serde::{Deserialize, Serialize};

use crate::criteria::{canonical_name, WeightMap};

pub const DEFAULT_WEIGHT_SUM_TOLERANCE: f64 = 0.001;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum WeightCheck {
    Balanced { total: f64 },
    BelowOne { total: f64 },
    AboveOne { total: f64 },
}

impl WeightCheck {
    pub fn is_balanced(&self) -> bool {
        matches!(self, Self::Balanced { .. })
    }

    pub fn total(&self) -> f64 {
        match self {
            Self::Balanced { total } | Self::BelowOne { total } | Self::AboveOne { total } => {
                *total
            }
        }
    }
}

impl Display for WeightCheck {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Balanced { .. } => write!(f, "The sum of weights equals 1."),
            Self::BelowOne { total } => write!(
                f,
                "The total of all weights is below 1, whereas it should be equal to 1. Current total = {total:.3}"
            ),
            Self::AboveOne { total } => write!(
                f,
                "The sum of all weights is greater than 1, whereas it should be equal to 1. Current total = {total:.3}"
            ),
        }
    }
}

pub fn check_weight_sum(weights: &WeightMap, tolerance: f64) -> WeightCheck {
    let total: f64 = weights.values().sum();
    if total < 1.0 - tolerance {
        WeightCheck::BelowOne { total }
    } else if total > 1.0 + tolerance {
        WeightCheck::AboveOne { total }
    } else {
        WeightCheck::Balanced { total }
    }
}

pub fn validate_weight_bounds(weights: &WeightMap) -> Result<()> {
    for (name, weight) in weights {
        if !weight.is_finite() || !(0.0..=1.0).contains(weight) {
            bail!("weight for {name} must be between 0 and 1, got {weight}");
        }
    }
    Ok(())
}

/// Parses a `name=value` CLI override. The name is canonicalised so
/// `fuel=0.2` and `trip_fuel=0.2` address the same criterion.
pub fn parse_weight_override(raw: &str) -> Result<(String, f64)> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| anyhow!("weight override must look like name=value, got {raw}"))?;
    let name = canonical_name(name);
    if name.is_empty() {
        bail!("weight override has an empty criterion name: {raw}");
    }
    let value = value
        .trim()
        .parse::<f64>()
        .map_err(|e| anyhow!("invalid weight value in {raw}: {e}"))?;
    Ok((name, value))
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeightShare {
    pub criterion: String,
    pub weight: f64,
    pub share_percent: f64,
    pub largest: bool,
}

pub fn weight_distribution(weights: &WeightMap) -> Vec<WeightShare> {
    let total: f64 = weights.values().sum();
    let max = weights.values().copied().fold(f64::NEG_INFINITY, f64::max);
    let mut shares = weights
        .iter()
        .map(|(criterion, weight)| WeightShare {
            criterion: criterion.clone(),
            weight: *weight,
            share_percent: if total > 0.0 {
                weight / total * 100.0
            } else {
                0.0
            },
            largest: *weight == max,
        })
        .collect::<Vec<_>>();
    shares.sort_by(|a, b| b.weight.total_cmp(&a.weight));
    shares
}
