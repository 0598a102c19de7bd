use std::fmt::{Display, Formatter};
use std::ops::RangeInclusive;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Maximize,
    Minimize,
}

impl Display for Direction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Maximize => write!(f, "max"),
            Self::Minimize => write!(f, "min"),
        }
    }
}

#[derive(Debug, Error)]
#[error("unknown optimization direction: {0}")]
pub struct DirectionParseError(pub String);

impl FromStr for Direction {
    type Err = DirectionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "max" | "maximize" | "maximise" | "benefit" => Ok(Self::Maximize),
            "min" | "minimize" | "minimise" | "cost" => Ok(Self::Minimize),
            _ => Err(DirectionParseError(s.to_string())),
        }
    }
}

/// How the simulator draws values for a criterion.
#[derive(Debug, Clone, PartialEq)]
pub enum SimulatedRange {
    Integer(RangeInclusive<i64>),
    Uniform { low: f64, high: f64 },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum CriterionKind {
    CruiseSpeed,
    TotalEnergy,
    OperatingCost,
    RequiredYield,
    AcquisitionPrice,
    TripFuel,
}

impl CriterionKind {
    pub const ALL: [CriterionKind; 6] = [
        CriterionKind::CruiseSpeed,
        CriterionKind::TotalEnergy,
        CriterionKind::OperatingCost,
        CriterionKind::RequiredYield,
        CriterionKind::AcquisitionPrice,
        CriterionKind::TripFuel,
    ];

    pub fn as_slug(&self) -> &'static str {
        match self {
            Self::CruiseSpeed => "cruise_speed",
            Self::TotalEnergy => "total_energy",
            Self::OperatingCost => "operating_cost",
            Self::RequiredYield => "required_yield",
            Self::AcquisitionPrice => "acquisition_price",
            Self::TripFuel => "trip_fuel",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::CruiseSpeed => "Aircraft Cruise Speed",
            Self::TotalEnergy => "Total Energy Required",
            Self::OperatingCost => "Direct operating cost plus interest",
            Self::RequiredYield => "Required yield per revenue passenger mile",
            Self::AcquisitionPrice => "Acquisition price with spares",
            Self::TripFuel => "Trip Fuel",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Self::CruiseSpeed => "knots",
            Self::TotalEnergy => "MJ",
            Self::OperatingCost | Self::RequiredYield => "$/mile",
            Self::AcquisitionPrice => "$M",
            Self::TripFuel => "kg",
        }
    }

    pub fn label(&self) -> String {
        format!("{} ({})", self.display_name(), self.unit())
    }

    pub fn direction(&self) -> Direction {
        match self {
            Self::CruiseSpeed => Direction::Maximize,
            _ => Direction::Minimize,
        }
    }

    pub fn simulated_range(&self) -> SimulatedRange {
        match self {
            Self::CruiseSpeed => SimulatedRange::Integer(210..=250),
            Self::TotalEnergy => SimulatedRange::Uniform { low: 3.0, high: 7.0 },
            Self::OperatingCost => SimulatedRange::Uniform { low: 6.4, high: 8.7 },
            Self::RequiredYield => SimulatedRange::Uniform {
                low: 1.35,
                high: 1.5,
            },
            Self::AcquisitionPrice => SimulatedRange::Uniform {
                low: 220.0,
                high: 270.0,
            },
            Self::TripFuel => SimulatedRange::Integer(27_032..=31_032),
        }
    }
}

impl Display for CriterionKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_slug())
    }
}

#[derive(Debug, Error)]
#[error("unknown criterion: {0}")]
pub struct CriterionParseError(pub String);

impl FromStr for CriterionKind {
    type Err = CriterionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "cruise_speed" | "speed" => Ok(Self::CruiseSpeed),
            "total_energy" | "energy" => Ok(Self::TotalEnergy),
            "operating_cost" | "doc" | "direct_operating_cost" => Ok(Self::OperatingCost),
            "required_yield" | "yield" => Ok(Self::RequiredYield),
            "acquisition_price" | "price" => Ok(Self::AcquisitionPrice),
            "trip_fuel" | "fuel" => Ok(Self::TripFuel),
            _ => Err(CriterionParseError(s.to_string())),
        }
    }
}
