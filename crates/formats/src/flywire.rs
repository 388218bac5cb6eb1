use std::collections::BTreeMap;

use foundation::math::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::FormatError;

pub const DEFAULT_TOTAL_POINTS: usize = 500;

/// One animated path: waypoints plus sweep parameters.
///
/// `length` and `step` are measured in resampled points, not scene units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlywireSpec {
    pub points: Vec<[f64; 2]>,
    pub length: f64,
    pub step: f64,
    /// Resample resolution.
    #[serde(default = "default_total_points")]
    pub total_points: usize,
    #[serde(default = "default_repeat")]
    pub repeat: usize,
    /// Start each sweep with zero visible length and let it grow in.
    #[serde(default = "default_is_grow")]
    pub is_grow: bool,
}

fn default_total_points() -> usize {
    DEFAULT_TOTAL_POINTS
}

fn default_repeat() -> usize {
    1
}

fn default_is_grow() -> bool {
    true
}

impl FlywireSpec {
    pub fn new(points: Vec<[f64; 2]>, length: f64, step: f64) -> Self {
        Self {
            points,
            length,
            step,
            total_points: DEFAULT_TOTAL_POINTS,
            repeat: 1,
            is_grow: true,
        }
    }

    pub fn with_repeat(mut self, repeat: usize) -> Self {
        self.repeat = repeat;
        self
    }

    pub fn with_total_points(mut self, total_points: usize) -> Self {
        self.total_points = total_points;
        self
    }

    pub fn with_grow(mut self, is_grow: bool) -> Self {
        self.is_grow = is_grow;
        self
    }

    pub fn waypoints(&self) -> Vec<Vec2> {
        self.points.iter().copied().map(Vec2::from_array).collect()
    }
}

/// Named paths plus named modes listing which paths animate together.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FlylinePresets {
    pub paths: BTreeMap<String, FlywireSpec>,
    #[serde(default)]
    pub modes: BTreeMap<String, Vec<String>>,
}

impl FlylinePresets {
    pub fn from_json_str(payload: &str) -> Result<Self, FormatError> {
        Ok(serde_json::from_str(payload)?)
    }

    pub fn to_json_string_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn mode_names(&self) -> impl Iterator<Item = &str> {
        self.modes.keys().map(String::as_str)
    }

    /// Resolves a mode into `(path name, spec)` pairs, in the order listed.
    pub fn mode(&self, name: &str) -> Result<Vec<(String, FlywireSpec)>, FormatError> {
        let paths = self
            .modes
            .get(name)
            .ok_or_else(|| FormatError::UnknownMode(name.to_string()))?;
        paths
            .iter()
            .map(|path| {
                self.paths
                    .get(path)
                    .map(|spec| (path.clone(), spec.clone()))
                    .ok_or_else(|| FormatError::UnknownPath {
                        mode: name.to_string(),
                        path: path.clone(),
                    })
            })
            .collect()
    }
}
