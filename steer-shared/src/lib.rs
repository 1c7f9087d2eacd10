#![cfg_attr(not(feature = "std"), no_std)]

use serde::{Deserialize, Serialize};
use steer_core::{SeparationConfig, Vector3D};

/// Represents a 3D position in world units
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Position {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Position {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Calculate distance to another position
    pub fn distance_to(&self, other: &Position) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        libm::sqrtf(dx * dx + dy * dy + dz * dz)
    }
}

impl From<Position> for Vector3D {
    fn from(position: Position) -> Self {
        Vector3D::new(position.x, position.y, position.z)
    }
}

impl From<Vector3D> for Position {
    fn from(vector: Vector3D) -> Self {
        Position::new(vector.x, vector.y, vector.z)
    }
}

/// Separation steering configuration.
///
/// Both values default to 1, which keeps plain 1/d falloff everywhere.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SeparationSettings {
    pub comfort_distance: f32,
    pub multiplier_inside_comfort_distance: f32,
}

impl SeparationSettings {
    pub fn to_config(&self) -> SeparationConfig {
        SeparationConfig::new(self.comfort_distance, self.multiplier_inside_comfort_distance)
    }

    #[cfg(feature = "std")]
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[cfg(feature = "std")]
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl Default for SeparationSettings {
    fn default() -> Self {
        Self {
            comfort_distance: 1.0,
            multiplier_inside_comfort_distance: 1.0,
        }
    }
}

impl From<SeparationSettings> for SeparationConfig {
    fn from(settings: SeparationSettings) -> Self {
        settings.to_config()
    }
}

impl From<SeparationConfig> for SeparationSettings {
    fn from(config: SeparationConfig) -> Self {
        Self {
            comfort_distance: config.comfort_distance(),
            multiplier_inside_comfort_distance: config.multiplier_inside_comfort_distance(),
        }
    }
}
