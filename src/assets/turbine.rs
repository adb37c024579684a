use serde::{Deserialize, Serialize};

use crate::error::AssetError;
use crate::smoothing::{SmoothingParams, smooth};

/// On-disk shape of a wind turbine record.
///
/// `rated_power` is not stored; it is always derived from `power` when the
/// record is validated into a [`TurbineRecord`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurbineConfig {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub manufacturer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Hub height (m).
    pub hub_height: f64,
    /// Every hub height the source reported, when there was more than one.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hub_heights: Vec<f64>,
    /// Wind speeds of the power curve (m/s).
    pub velocities: Vec<f64>,
    /// Power output at each wind speed (MW).
    pub power: Vec<f64>,
}

/// A validated wind turbine model.
///
/// # Invariants
///
/// * `velocities.len() == power.len() >= 2`
/// * `velocities` is non-decreasing and every value is finite
/// * `rated_power == max(power)`
#[derive(Debug, Clone, PartialEq)]
pub struct TurbineRecord {
    pub name: String,
    pub manufacturer: String,
    /// Provenance of the curve, if known.
    pub source: Option<String>,
    /// Wind speeds of the power curve (m/s).
    pub velocities: Vec<f64>,
    /// Power output at each wind speed (MW).
    pub power: Vec<f64>,
    /// Hub height (m). The mean when several heights were reported.
    pub hub_height: f64,
    /// Every reported hub height; empty when only one was given.
    pub hub_heights: Vec<f64>,
    /// Maximum of `power` (MW).
    pub rated_power: f64,
}

impl TurbineRecord {
    /// Builds a record from a curve, checking the record invariants.
    ///
    /// # Errors
    ///
    /// Returns [`AssetError::InvalidRecord`] if the curve is too short, the
    /// lengths differ, a value is not finite, or velocities decrease.
    pub fn new(
        name: impl Into<String>,
        manufacturer: impl Into<String>,
        velocities: Vec<f64>,
        power: Vec<f64>,
        hub_height: f64,
    ) -> Result<Self, AssetError> {
        Self::try_from(TurbineConfig {
            name: name.into(),
            manufacturer: manufacturer.into(),
            source: None,
            hub_height,
            hub_heights: Vec::new(),
            velocities,
            power,
        })
    }

    /// Returns a copy with the power curve replaced by its fleet-smoothed
    /// version and `rated_power` recomputed.
    pub fn smoothed(&self, params: &SmoothingParams) -> Self {
        let curve = smooth(&self.velocities, &self.power, params);
        Self {
            rated_power: max_power(&curve.power),
            velocities: curve.velocities,
            power: curve.power,
            ..self.clone()
        }
    }

    /// Converts back into the on-disk shape.
    pub fn to_config(&self) -> TurbineConfig {
        TurbineConfig {
            name: self.name.clone(),
            manufacturer: self.manufacturer.clone(),
            source: self.source.clone(),
            hub_height: self.hub_height,
            hub_heights: self.hub_heights.clone(),
            velocities: self.velocities.clone(),
            power: self.power.clone(),
        }
    }
}

impl TryFrom<TurbineConfig> for TurbineRecord {
    type Error = AssetError;

    fn try_from(config: TurbineConfig) -> Result<Self, Self::Error> {
        let TurbineConfig {
            name,
            manufacturer,
            source,
            hub_height,
            hub_heights,
            velocities,
            power,
        } = config;

        if velocities.len() != power.len() {
            return Err(AssetError::InvalidRecord(format!(
                "power curve of \"{name}\" has {} velocities but {} power values",
                velocities.len(),
                power.len()
            )));
        }
        if velocities.len() < 2 {
            return Err(AssetError::InvalidRecord(format!(
                "power curve of \"{name}\" needs at least two points"
            )));
        }
        if velocities.iter().chain(&power).any(|x| !x.is_finite()) || !hub_height.is_finite() {
            return Err(AssetError::InvalidRecord(format!(
                "turbine \"{name}\" contains non-finite values"
            )));
        }
        if velocities.windows(2).any(|w| w[1] < w[0]) {
            return Err(AssetError::InvalidRecord(format!(
                "velocities of \"{name}\" must be non-decreasing"
            )));
        }

        Ok(Self {
            rated_power: max_power(&power),
            name: name.trim().to_string(),
            manufacturer: manufacturer.trim().to_string(),
            source,
            velocities,
            power,
            hub_height,
            hub_heights,
        })
    }
}

fn max_power(power: &[f64]) -> f64 {
    power.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}
