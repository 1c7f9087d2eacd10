#![cfg_attr(not(feature = "std"), no_std)]

//! Per-neighbor separation steering.
//!
//! A neighbor-group driver enumerates the entities near a vehicle and calls
//! [`separation_contribution`] once per neighbor, summing the results with
//! whatever other steering behaviors it runs. Nothing here knows about other
//! neighbors, the aggregation step, or the movement model.

/// A 3D vector used for positions and steering contributions
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector3D {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3D {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    pub fn sqr_magnitude(&self) -> f32 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    pub fn magnitude(&self) -> f32 {
        #[cfg(feature = "std")]
        {
            self.sqr_magnitude().sqrt()
        }
        #[cfg(not(feature = "std"))]
        {
            libm::sqrtf(self.sqr_magnitude())
        }
    }

    pub fn normalize(&self) -> Self {
        let mag = self.magnitude();
        if mag > 0.0 {
            *self / mag
        } else {
            Self::zero()
        }
    }

    pub fn distance(&self, other: &Vector3D) -> f32 {
        (*self - *other).magnitude()
    }

    /// True when no component is NaN or infinite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl core::ops::Add for Vector3D {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl core::ops::Sub for Vector3D {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl core::ops::Neg for Vector3D {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }
}

impl core::ops::Mul<f32> for Vector3D {
    type Output = Self;

    fn mul(self, scalar: f32) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
            z: self.z * scalar,
        }
    }
}

impl core::ops::Div<f32> for Vector3D {
    type Output = Self;

    fn div(self, scalar: f32) -> Self {
        Self {
            x: self.x / scalar,
            y: self.y / scalar,
            z: self.z / scalar,
        }
    }
}

impl core::ops::AddAssign for Vector3D {
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
        self.z += other.z;
    }
}

impl core::ops::MulAssign<f32> for Vector3D {
    fn mul_assign(&mut self, scalar: f32) {
        self.x *= scalar;
        self.y *= scalar;
        self.z *= scalar;
    }
}

/// Configuration for separation steering.
///
/// The squared comfort distance is derived on every read, so it always
/// matches `comfort_distance`, including right after construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeparationConfig {
    comfort_distance: f32,
    multiplier_inside_comfort_distance: f32,
}

impl SeparationConfig {
    pub fn new(comfort_distance: f32, multiplier_inside_comfort_distance: f32) -> Self {
        Self {
            comfort_distance,
            multiplier_inside_comfort_distance,
        }
    }

    /// Neighbors closer than this get the inside-comfort multiplier.
    pub fn comfort_distance(&self) -> f32 {
        self.comfort_distance
    }

    pub fn set_comfort_distance(&mut self, comfort_distance: f32) {
        self.comfort_distance = comfort_distance;
    }

    pub fn comfort_distance_squared(&self) -> f32 {
        self.comfort_distance * self.comfort_distance
    }

    /// Scale applied inside the comfort distance. 1 disables it.
    pub fn multiplier_inside_comfort_distance(&self) -> f32 {
        self.multiplier_inside_comfort_distance
    }

    pub fn set_multiplier_inside_comfort_distance(&mut self, multiplier: f32) {
        self.multiplier_inside_comfort_distance = multiplier;
    }
}

impl Default for SeparationConfig {
    fn default() -> Self {
        Self {
            comfort_distance: 1.0,
            multiplier_inside_comfort_distance: 1.0,
        }
    }
}

/// A per-neighbor steering hook: focal position, neighbor position, config.
pub type NeighborContribution = fn(Vector3D, Vector3D, &SeparationConfig) -> Vector3D;

/// Steering contribution pushing `focal` away from `neighbor`.
///
/// The result points from the neighbor toward the focal entity with a
/// magnitude of `1 / distance`, scaled by the inside-comfort multiplier when
/// the neighbor is strictly closer than the comfort distance.
///
/// Coincident positions are not guarded: the squared distance is zero and
/// the result is non-finite. Drivers must filter those neighbors out.
pub fn separation_contribution(
    focal: Vector3D,
    neighbor: Vector3D,
    config: &SeparationConfig,
) -> Vector3D {
    let offset = neighbor - focal;
    let sqr_dist = offset.sqr_magnitude();

    // opposite of the offset, divided once by distance to normalize and
    // once more for the 1/d falloff
    let mut steering = offset / -sqr_dist;

    let multiplier = config.multiplier_inside_comfort_distance;
    if multiplier != 1.0 && sqr_dist < config.comfort_distance_squared() {
        steering *= multiplier;
    }

    steering
}

/// Separation behavior owning its configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct Separation {
    config: SeparationConfig,
}

impl Separation {
    pub fn new(config: SeparationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SeparationConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut SeparationConfig {
        &mut self.config
    }

    pub fn contribution(&self, focal: Vector3D, neighbor: Vector3D) -> Vector3D {
        separation_contribution(focal, neighbor, &self.config)
    }
}
