use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::criteria::{canonical_name, default_directions, default_weights, Direction};
use crate::criteria::{DirectionMap, WeightMap};
use crate::weights::DEFAULT_WEIGHT_SUM_TOLERANCE;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub ranking: RankingConfig,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default = "default_weights")]
    pub weights: WeightMap,
    #[serde(default)]
    pub directions: BTreeMap<String, Direction>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    #[serde(default = "default_alternatives")]
    pub alternatives: usize,
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingConfig {
    #[serde(default = "default_top_n")]
    pub top_n: usize,
    #[serde(default = "default_tolerance")]
    pub weight_sum_tolerance: f64,
    #[serde(default)]
    pub enforce_in_engine: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct InputConfig {
    #[serde(default)]
    pub csv_path: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub alternatives: Option<usize>,
    pub top_n: Option<usize>,
    pub seed: Option<u64>,
    pub csv_path: Option<PathBuf>,
    pub weights: Vec<(String, f64)>,
    pub directions: Vec<(String, Direction)>,
}

impl Config {
    pub fn default_path() -> PathBuf {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.join(".config/aircraft-topsis/config.toml")
    }

    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path
            .map(|p| p.to_path_buf())
            .unwrap_or_else(Self::default_path);
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = fs::read_to_string(&path)
            .with_context(|| format!("failed reading config: {}", path.display()))?;
        Self::parse(&data)
            .with_context(|| format!("failed parsing TOML config: {}", path.display()))
    }

    pub fn parse(data: &str) -> Result<Self> {
        let mut parsed: Self = toml::from_str(data)?;
        parsed.weights = parsed
            .weights
            .into_iter()
            .map(|(name, weight)| (canonical_name(&name), weight))
            .collect();
        parsed.directions = parsed
            .directions
            .into_iter()
            .map(|(name, direction)| (canonical_name(&name), direction))
            .collect();
        Ok(parsed)
    }

    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(alternatives) = overrides.alternatives {
            self.simulation.alternatives = alternatives;
        }
        if let Some(top_n) = overrides.top_n {
            self.ranking.top_n = top_n;
        }
        if let Some(seed) = overrides.seed {
            self.simulation.seed = Some(seed);
        }
        if let Some(path) = overrides.csv_path {
            self.input.csv_path = Some(path.display().to_string());
        }
        for (name, weight) in overrides.weights {
            self.weights.insert(name, weight);
        }
        for (name, direction) in overrides.directions {
            self.directions.insert(name, direction);
        }
    }

    pub fn directions(&self) -> DirectionMap {
        let mut directions = default_directions();
        directions.extend(self.directions.iter().map(|(k, v)| (k.clone(), *v)));
        directions
    }

    pub fn resolved_csv_path(&self) -> Option<PathBuf> {
        self.input.csv_path.as_deref().map(expand_tilde)
    }

    pub fn effective_top_n(&self, alternatives: usize) -> usize {
        self.ranking.top_n.clamp(1, alternatives.max(1))
    }

    pub fn write_template(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("failed creating config directory: {}", parent.display())
            })?;
        }
        fs::write(path, Self::default_template())
            .with_context(|| format!("failed writing config template: {}", path.display()))
    }

    pub fn default_template() -> String {
        let template = r#"[simulation]
alternatives = 50
# seed = 42

[ranking]
top_n = 10
weight_sum_tolerance = 0.001
enforce_in_engine = false

[input]
# csv_path = "~/aircraft.csv"

[weights]
cruise_speed = 0.1667
total_energy = 0.1667
operating_cost = 0.1667
required_yield = 0.1667
acquisition_price = 0.1666
trip_fuel = 0.1666

[directions]
# noise_db = "minimize"
"#;
        template.to_string()
    }
}

pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            simulation: SimulationConfig::default(),
            ranking: RankingConfig::default(),
            input: InputConfig::default(),
            weights: default_weights(),
            directions: BTreeMap::new(),
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            alternatives: default_alternatives(),
            seed: None,
        }
    }
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            top_n: default_top_n(),
            weight_sum_tolerance: default_tolerance(),
            enforce_in_engine: false,
        }
    }
}

fn default_alternatives() -> usize {
    50
}

fn default_top_n() -> usize {
    10
}

fn default_tolerance() -> f64 {
    DEFAULT_WEIGHT_SUM_TOLERANCE
}
