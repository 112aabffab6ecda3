//! Rotation / scale adjustments for substituted placeholders.

use cabview_math::Transform;
use serde::{Deserialize, Serialize};

/// 3D vector with `f32` components, every axis optional (defaults to 0).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    /// X component.
    #[serde(default)]
    pub x: f32,
    /// Y component.
    #[serde(default)]
    pub y: f32,
    /// Z component.
    #[serde(default)]
    pub z: f32,
}

impl Vec3 {
    /// Create a new Vec3.
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    fn to_math(self) -> cabview_math::Vec3 {
        cabview_math::Vec3::new(self.x, self.y, self.z)
    }
}

fn one() -> f32 {
    1.0
}

/// Per-axis scale multiplier, every axis optional (defaults to 1).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ratio {
    /// X multiplier.
    #[serde(default = "one")]
    pub x: f32,
    /// Y multiplier.
    #[serde(default = "one")]
    pub y: f32,
    /// Z multiplier.
    #[serde(default = "one")]
    pub z: f32,
}

impl Ratio {
    /// Create a new ratio.
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

impl Default for Ratio {
    fn default() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }
}

fn hundred() -> i32 {
    100
}

/// A geometry block: rotation in degrees, a per-axis ratio and a uniform
/// percentage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    /// Incremental rotation in degrees.
    #[serde(default)]
    pub rotation: Vec3,
    /// Uniform scale percentage. Can be negative, which mirrors the node.
    #[serde(default = "hundred")]
    pub scalepercentage: i32,
    /// Per-axis scale multiplier.
    #[serde(default)]
    pub ratio: Ratio,
}

impl Default for Geometry {
    fn default() -> Self {
        Self {
            rotation: Vec3::default(),
            scalepercentage: 100,
            ratio: Ratio::default(),
        }
    }
}

impl Geometry {
    /// Apply this geometry to a node's local transform.
    ///
    /// The scale is multiplied by the ratio, then by `scalepercentage / 100`,
    /// and only then is the rotation applied on top of the current one.
    pub fn apply(&self, transform: &mut Transform) {
        let ratio = cabview_math::Vec3::new(self.ratio.x, self.ratio.y, self.ratio.z);
        transform.scale_by(&ratio);
        transform.scale_uniform(self.scalepercentage as f32 / 100.0);
        let r = self.rotation.to_math();
        transform.rotate_euler_degrees(r.x, r.y, r.z);
    }
}
