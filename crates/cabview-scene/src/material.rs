//! Materials, textures and the shader parameters the binder writes.

use std::collections::BTreeMap;
use std::sync::Arc;

use cabview_math::Rgba;

/// Shader parameter names.
pub mod param {
    /// Albedo texture.
    pub const BASE_MAP: &str = "base_map";
    /// Albedo texture scale/offset `(sx, sy, ox, oy)`.
    pub const BASE_MAP_ST: &str = "base_map_st";
    /// Albedo tint.
    pub const BASE_COLOR: &str = "base_color";
    /// Metalness, `0..=1`.
    pub const METALLIC: &str = "metallic";
    /// Glossiness, `0..=1`.
    pub const SMOOTHNESS: &str = "smoothness";
    /// Normal map texture.
    pub const BUMP_MAP: &str = "bump_map";
    /// Normal map strength.
    pub const BUMP_SCALE: &str = "bump_scale";
    /// HDR emitted color.
    pub const EMISSION_COLOR: &str = "emission_color";
}

/// A decoded RGBA8 image. Pixel data is shared between clones.
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    /// Logical name, usually the file stem.
    pub name: String,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Row-major RGBA8 pixels.
    pub pixels: Arc<Vec<u8>>,
}

impl Texture {
    /// Create a texture from RGBA8 pixels.
    pub fn new(name: impl Into<String>, width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            width,
            height,
            pixels: Arc::new(pixels),
        }
    }

    /// A 1x1 texture of one color, used for built-in maps.
    pub fn solid(name: impl Into<String>, color: [u8; 4]) -> Self {
        Self::new(name, 1, 1, color.to_vec())
    }
}

/// Value of a shader parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum MaterialParam {
    /// Scalar.
    Float(f32),
    /// Linear color.
    Color(Rgba),
    /// Four-component vector.
    Vector([f32; 4]),
    /// Texture slot.
    Texture(Texture),
}

/// A material: a named bag of shader parameters plus a render queue.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Material {
    /// Material name, for diagnostics.
    pub name: String,
    /// Parameters by name (see [`param`]).
    pub params: BTreeMap<String, MaterialParam>,
    /// Draw order override; `None` keeps the shader's default queue.
    pub render_queue: Option<i32>,
}

impl Material {
    /// An empty material.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Builder form of [`Material::set_color`].
    pub fn with_color(mut self, key: &str, color: Rgba) -> Self {
        self.set_color(key, color);
        self
    }

    /// Builder form of [`Material::set_float`].
    pub fn with_float(mut self, key: &str, value: f32) -> Self {
        self.set_float(key, value);
        self
    }

    /// Builder form of setting the render queue.
    pub fn with_render_queue(mut self, queue: i32) -> Self {
        self.render_queue = Some(queue);
        self
    }

    /// Set a scalar parameter.
    pub fn set_float(&mut self, key: &str, value: f32) {
        self.params.insert(key.to_string(), MaterialParam::Float(value));
    }

    /// Set a color parameter.
    pub fn set_color(&mut self, key: &str, color: Rgba) {
        self.params.insert(key.to_string(), MaterialParam::Color(color));
    }

    /// Set a vector parameter.
    pub fn set_vector(&mut self, key: &str, value: [f32; 4]) {
        self.params.insert(key.to_string(), MaterialParam::Vector(value));
    }

    /// Set a texture parameter.
    pub fn set_texture(&mut self, key: &str, texture: Texture) {
        self.params
            .insert(key.to_string(), MaterialParam::Texture(texture));
    }

    /// Read a scalar parameter.
    pub fn float(&self, key: &str) -> Option<f32> {
        match self.params.get(key) {
            Some(MaterialParam::Float(v)) => Some(*v),
            _ => None,
        }
    }

    /// Read a color parameter.
    pub fn color(&self, key: &str) -> Option<Rgba> {
        match self.params.get(key) {
            Some(MaterialParam::Color(c)) => Some(*c),
            _ => None,
        }
    }

    /// Read a vector parameter.
    pub fn vector(&self, key: &str) -> Option<[f32; 4]> {
        match self.params.get(key) {
            Some(MaterialParam::Vector(v)) => Some(*v),
            _ => None,
        }
    }

    /// Read a texture parameter.
    pub fn texture(&self, key: &str) -> Option<&Texture> {
        match self.params.get(key) {
            Some(MaterialParam::Texture(t)) => Some(t),
            _ => None,
        }
    }
}
