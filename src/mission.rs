//! # Mission parameters
//!
//! The user-facing inputs of a simulation run: launch epoch, propulsion technology and
//! payload class. A [`MissionParameters`] value is immutable once built; a new run needs a
//! new value.
//!
//! Labels follow the wire vocabulary of the remote estimation service
//! (`"chemical"`, `"ion"`, `"solar-sail"`, `"small"`, `"medium"`, `"large"`).
use std::fmt;
use std::str::FromStr;

use hifitime::Epoch;
use serde::{Deserialize, Serialize};

use crate::intercept_errors::InterceptError;
use crate::time::parse_launch_epoch;

/// Propulsion technology class. Drives both the trajectory shape and the fallback metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PropulsionVariant {
    Chemical,
    Ion,
    SolarSail,
}

/// Payload mass class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayloadClass {
    Small,
    Medium,
    Large,
}

impl PropulsionVariant {
    pub const ALL: [PropulsionVariant; 3] = [
        PropulsionVariant::Chemical,
        PropulsionVariant::Ion,
        PropulsionVariant::SolarSail,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PropulsionVariant::Chemical => "chemical",
            PropulsionVariant::Ion => "ion",
            PropulsionVariant::SolarSail => "solar-sail",
        }
    }
}

impl PayloadClass {
    pub const ALL: [PayloadClass; 3] = [PayloadClass::Small, PayloadClass::Medium, PayloadClass::Large];

    pub fn label(&self) -> &'static str {
        match self {
            PayloadClass::Small => "small",
            PayloadClass::Medium => "medium",
            PayloadClass::Large => "large",
        }
    }
}

impl fmt::Display for PropulsionVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for PayloadClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PropulsionVariant {
    type Err = InterceptError;

    /// Case-insensitive; `solar-sail`, `solar_sail`, `solarsail` and `solar sail` all name
    /// the solar sail.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_ascii_lowercase();
        match key.as_str() {
            "chemical" => Ok(PropulsionVariant::Chemical),
            "ion" => Ok(PropulsionVariant::Ion),
            "solarsail" => Ok(PropulsionVariant::SolarSail),
            _ => Err(InterceptError::InvalidPropulsionVariant(s.to_string())),
        }
    }
}

impl FromStr for PayloadClass {
    type Err = InterceptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "small" => Ok(PayloadClass::Small),
            "medium" => Ok(PayloadClass::Medium),
            "large" => Ok(PayloadClass::Large),
            _ => Err(InterceptError::InvalidPayloadClass(s.to_string())),
        }
    }
}

/// Inputs of one simulation run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MissionParameters {
    launch_epoch: Epoch,
    propulsion: PropulsionVariant,
    payload: PayloadClass,
}

impl MissionParameters {
    pub fn new(launch_epoch: Epoch, propulsion: PropulsionVariant, payload: PayloadClass) -> Self {
        MissionParameters {
            launch_epoch,
            propulsion,
            payload,
        }
    }

    /// Build parameters from raw form values.
    ///
    /// Arguments
    /// ---------
    /// * `launch_date`: launch date, see [`parse_launch_epoch`] for accepted forms
    /// * `propulsion`: propulsion label
    /// * `payload`: payload label
    ///
    /// Return
    /// ------
    /// * the parameters, or the validation error of the first invalid field
    pub fn parse(launch_date: &str, propulsion: &str, payload: &str) -> Result<Self, InterceptError> {
        Ok(MissionParameters {
            launch_epoch: parse_launch_epoch(launch_date)?,
            propulsion: propulsion.parse()?,
            payload: payload.parse()?,
        })
    }

    pub fn launch_epoch(&self) -> Epoch {
        self.launch_epoch
    }

    pub fn propulsion(&self) -> PropulsionVariant {
        self.propulsion
    }

    pub fn payload(&self) -> PayloadClass {
        self.payload
    }
}
