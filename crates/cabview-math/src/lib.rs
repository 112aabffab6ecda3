#![warn(missing_docs)]

//! Math types for the cabview cabinet viewer.
//!
//! Thin wrappers around nalgebra providing the handful of types the
//! scene graph and the binder need: vectors, rotations, a local
//! translate/rotate/scale transform, a linear RGBA color and tolerance
//! helpers for comparisons.

use nalgebra::{Matrix4, Quaternion, UnitQuaternion, Vector3, Vector4};
use serde::{Deserialize, Serialize};

/// A vector in 3D space.
pub type Vec3 = Vector3<f32>;

/// A point in 3D space.
pub type Point3 = nalgebra::Point3<f32>;

/// A 4x4 affine matrix.
pub type Mat4 = Matrix4<f32>;

/// A unit quaternion rotation.
pub type Quat = UnitQuaternion<f32>;

/// Build a rotation from Euler angles in degrees.
///
/// Angles are applied about Z first, then X, then Y, all relative to the
/// local frame. This is the convention cabinet authors tune their
/// `rotation` blocks against.
pub fn euler_degrees(x: f32, y: f32, z: f32) -> Quat {
    let qx = Quat::from_axis_angle(&Vec3::x_axis(), x.to_radians());
    let qy = Quat::from_axis_angle(&Vec3::y_axis(), y.to_radians());
    let qz = Quat::from_axis_angle(&Vec3::z_axis(), z.to_radians());
    qy * qx * qz
}

/// Build a rotation from `[x, y, z, w]` quaternion components, as stored in
/// glTF files. The input is normalized.
pub fn quat_from_xyzw(q: [f32; 4]) -> Quat {
    Quat::from_quaternion(Quaternion::new(q[3], q[0], q[1], q[2]))
}

/// A local transform: translation, rotation and non-uniform scale.
///
/// Composes as `T * R * S` when turned into a matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Local translation.
    pub translation: Vec3,
    /// Local rotation.
    pub rotation: Quat,
    /// Local scale per axis.
    pub scale: Vec3,
}

impl Transform {
    /// Identity transform.
    pub fn identity() -> Self {
        Self {
            translation: Vec3::zeros(),
            rotation: Quat::identity(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }

    /// Transform from explicit translation, rotation and scale.
    pub fn from_trs(translation: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self {
            translation,
            rotation,
            scale,
        }
    }

    /// Pure translation by `(dx, dy, dz)`.
    pub fn translation(dx: f32, dy: f32, dz: f32) -> Self {
        Self {
            translation: Vec3::new(dx, dy, dz),
            ..Self::identity()
        }
    }

    /// Multiply the local scale component-wise by `ratio`.
    pub fn scale_by(&mut self, ratio: &Vec3) {
        self.scale = self.scale.component_mul(ratio);
    }

    /// Multiply the local scale uniformly by `factor`.
    pub fn scale_uniform(&mut self, factor: f32) {
        self.scale *= factor;
    }

    /// Rotate incrementally by Euler angles in degrees, relative to the
    /// current local orientation.
    pub fn rotate_euler_degrees(&mut self, x: f32, y: f32, z: f32) {
        self.rotation *= euler_degrees(x, y, z);
    }

    /// The 4x4 affine matrix `T * R * S`.
    pub fn matrix(&self) -> Mat4 {
        Matrix4::new_translation(&self.translation)
            * self.rotation.to_homogeneous()
            * Matrix4::new_nonuniform_scaling(&self.scale)
    }

    /// Transform a point.
    pub fn apply_point(&self, p: &Point3) -> Point3 {
        let v = self.matrix() * Vector4::new(p.x, p.y, p.z, 1.0);
        Point3::new(v.x, v.y, v.z)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

/// A linear RGBA color with `f32` channels.
///
/// Channels are nominally in `0.0..=1.0` but may exceed 1.0 for HDR
/// emission values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    /// Red.
    pub r: f32,
    /// Green.
    pub g: f32,
    /// Blue.
    pub b: f32,
    /// Alpha.
    pub a: f32,
}

impl Rgba {
    /// Opaque white.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);

    /// Opaque black.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    /// Create a color from its four channels.
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Color from 8-bit channels, alpha 1.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0)
    }

    /// Scale every channel (alpha included) by `factor`.
    pub fn scaled(&self, factor: f32) -> Self {
        Self::new(
            self.r * factor,
            self.g * factor,
            self.b * factor,
            self.a * factor,
        )
    }

    /// Channels as an array `[r, g, b, a]`.
    pub fn to_array(&self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Tolerance constants for floating point comparisons.
#[derive(Debug, Clone, Copy)]
pub struct Tolerance {
    /// Absolute tolerance on scalar components.
    pub linear: f32,
    /// Angular tolerance in radians.
    pub angular: f32,
}

impl Tolerance {
    /// Default tolerances (1e-4 linear, 1e-4 rad angular).
    pub const DEFAULT: Self = Self {
        linear: 1e-4,
        angular: 1e-4,
    };

    /// Check if two vectors are equal component-wise within tolerance.
    pub fn vectors_equal(&self, a: &Vec3, b: &Vec3) -> bool {
        (a - b).abs().max() < self.linear
    }

    /// Check if two rotations are the same orientation within tolerance.
    pub fn rotations_equal(&self, a: &Quat, b: &Quat) -> bool {
        a.angle_to(b) < self.angular
    }

    /// Check if two colors are equal channel-wise within tolerance.
    pub fn colors_equal(&self, a: &Rgba, b: &Rgba) -> bool {
        a.to_array()
            .iter()
            .zip(b.to_array().iter())
            .all(|(x, y)| (x - y).abs() < self.linear)
    }

    /// Check if two transforms match within tolerance.
    pub fn transforms_equal(&self, a: &Transform, b: &Transform) -> bool {
        self.vectors_equal(&a.translation, &b.translation)
            && self.rotations_equal(&a.rotation, &b.rotation)
            && self.vectors_equal(&a.scale, &b.scale)
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_transform() {
        let t = Transform::identity();
        let p = Point3::new(1.0, 2.0, 3.0);
        let result = t.apply_point(&p);
        assert!((result - p).norm() < 1e-6);
    }

    #[test]
    fn test_translation() {
        let t = Transform::translation(10.0, 20.0, 30.0);
        let result = t.apply_point(&Point3::new(1.0, 2.0, 3.0));
        assert!((result.x - 11.0).abs() < 1e-5);
        assert!((result.y - 22.0).abs() < 1e-5);
        assert!((result.z - 33.0).abs() < 1e-5);
    }

    #[test]
    fn test_rotation_y_90() {
        let mut t = Transform::identity();
        t.rotate_euler_degrees(0.0, 90.0, 0.0);
        let result = t.apply_point(&Point3::new(1.0, 0.0, 0.0));
        // +X rotated 90° about +Y lands on -Z
        assert!(result.x.abs() < 1e-5);
        assert!((result.z + 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_rotation_is_incremental() {
        let mut t = Transform::identity();
        t.rotate_euler_degrees(0.0, 45.0, 0.0);
        t.rotate_euler_degrees(0.0, 45.0, 0.0);
        let expected = euler_degrees(0.0, 90.0, 0.0);
        assert!(Tolerance::DEFAULT.rotations_equal(&t.rotation, &expected));
    }

    #[test]
    fn test_scale_then_point() {
        let mut t = Transform::identity();
        t.scale_by(&Vec3::new(2.0, 3.0, 4.0));
        t.scale_uniform(0.5);
        let result = t.apply_point(&Point3::new(1.0, 1.0, 1.0));
        assert!((result.x - 1.0).abs() < 1e-6);
        assert!((result.y - 1.5).abs() < 1e-6);
        assert!((result.z - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_euler_order_z_then_x_then_y() {
        // Z 90 maps +X to +Y, then X 90 maps +Y to +Z, Y 0 leaves it.
        let q = euler_degrees(90.0, 0.0, 90.0);
        let v = q * Vec3::new(1.0, 0.0, 0.0);
        assert!(Tolerance::DEFAULT.vectors_equal(&v, &Vec3::new(0.0, 0.0, 1.0)));
    }

    #[test]
    fn test_quat_from_xyzw() {
        let half = std::f32::consts::FRAC_1_SQRT_2;
        let q = quat_from_xyzw([0.0, half, 0.0, half]);
        assert!(Tolerance::DEFAULT.rotations_equal(&q, &euler_degrees(0.0, 90.0, 0.0)));
    }

    #[test]
    fn test_rgba_from_rgb8() {
        let c = Rgba::from_rgb8(255, 0, 51);
        assert!(Tolerance::DEFAULT.colors_equal(&c, &Rgba::new(1.0, 0.0, 0.2, 1.0)));
    }

    #[test]
    fn test_tolerance_vectors_equal() {
        let tol = Tolerance::DEFAULT;
        let a = Vec3::new(1.0, 2.0, 3.0);
        assert!(tol.vectors_equal(&a, &Vec3::new(1.00001, 2.0, 3.0)));
        assert!(!tol.vectors_equal(&a, &Vec3::new(1.01, 2.0, 3.0)));
    }
}
