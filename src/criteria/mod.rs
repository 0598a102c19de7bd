pub mod schema;

use std::collections::BTreeMap;
use std::str::FromStr;

use anyhow::{anyhow, bail, Result};

pub use schema::{
    CriterionKind, CriterionParseError, Direction, DirectionParseError, SimulatedRange,
};

pub type WeightMap = BTreeMap<String, f64>;

pub type DirectionMap = BTreeMap<String, Direction>;

pub fn default_weights() -> WeightMap {
    let share = 1.0 / CriterionKind::ALL.len() as f64;
    CriterionKind::ALL
        .iter()
        .map(|kind| (kind.as_slug().to_string(), share))
        .collect()
}

pub fn default_directions() -> DirectionMap {
    CriterionKind::ALL
        .iter()
        .map(|kind| (kind.as_slug().to_string(), kind.direction()))
        .collect()
}

pub fn display_label(name: &str) -> String {
    CriterionKind::from_str(name)
        .map(|kind| kind.label())
        .unwrap_or_else(|_| name.to_string())
}

/// Catalog slug when recognised, otherwise the trimmed input.
pub fn canonical_name(name: &str) -> String {
    CriterionKind::from_str(name)
        .map(|kind| kind.as_slug().to_string())
        .unwrap_or_else(|_| name.trim().to_string())
}

pub fn parse_direction_override(raw: &str) -> Result<(String, Direction)> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| anyhow!("direction override must look like name=max|min, got {raw}"))?;
    let name = canonical_name(name);
    if name.is_empty() {
        bail!("direction override has an empty criterion name: {raw}");
    }
    let direction = Direction::from_str(value).map_err(|e| anyhow!("{e} in {raw}"))?;
    Ok((name, direction))
}

#[cfg(test)]
mod tests {
    use super::{
        canonical_name, default_directions, default_weights, display_label,
        parse_direction_override, Direction,
    };

    #[test]
    fn default_weights_sum_to_one() {
        let total: f64 = default_weights().values().sum();
        assert!((total - 1.0).abs() < 1e-9);
        assert_eq!(default_weights().len(), 6);
    }

    #[test]
    fn default_directions_cover_catalog() {
        let directions = default_directions();
        assert_eq!(directions.get("cruise_speed"), Some(&Direction::Maximize));
        assert_eq!(directions.get("trip_fuel"), Some(&Direction::Minimize));
    }

    #[test]
    fn labels_fall_back_to_raw_names() {
        assert_eq!(display_label("trip_fuel"), "Trip Fuel (kg)");
        assert_eq!(display_label("noise_db"), "noise_db");
        assert_eq!(canonical_name("Fuel"), "trip_fuel");
        assert_eq!(canonical_name(" noise_db "), "noise_db");
    }

    #[test]
    fn parses_direction_overrides() {
        let (name, direction) = parse_direction_override("fuel=max").expect("failed to parse");
        assert_eq!(name, "trip_fuel");
        assert_eq!(direction, Direction::Maximize);
        let (name, direction) =
            parse_direction_override("noise_db=cost").expect("failed to parse");
        assert_eq!(name, "noise_db");
        assert_eq!(direction, Direction::Minimize);
        assert!(parse_direction_override("fuel").is_err());
        assert!(parse_direction_override("fuel=sideways").is_err());
        assert!(parse_direction_override("=max").is_err());
    }
}
