#![warn(missing_docs)]

//! Description document model for arcade cabinet skins.
//!
//! A cabinet is described by a `description.yaml` file sitting next to a
//! binary glTF model and a handful of images. This crate holds the typed
//! form of that document ([`Data`] and its sections) and the YAML reader
//! and writer.
//!
//! The document is purely declarative. Nothing here touches a scene graph;
//! node references, textures and metrics produced by binding live in
//! `cabview-bind`.

mod color;
mod crt;
mod error;
mod geometry;
mod lenient;
mod parse;
mod part;
mod validate;

use serde::{Deserialize, Serialize};

pub use color::ColorData;
pub use crt::{Crt, Orientation, Screen};
pub use error::ParseError;
pub use geometry::{Geometry, Ratio, Vec3};
pub use parse::{parse, to_yaml};
pub use part::{
    name_key, names_match, parse_part_type, Art, Emission, Marquee, MaterialProperties, Part,
    PartType,
};
pub use validate::ValidationIssue;

/// Where the cabinet's 3D shape comes from.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Model {
    /// A `.glb` file shipped with the cabinet.
    #[serde(
        default,
        deserialize_with = "lenient::string",
        skip_serializing_if = "Option::is_none"
    )]
    pub file: Option<String>,
    /// A built-in cabinet shape.
    #[serde(
        default,
        deserialize_with = "lenient::string",
        skip_serializing_if = "Option::is_none"
    )]
    pub style: Option<String>,
}

/// The resolved model choice, after precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelSource<'a> {
    /// Load this file from the cabinet bundle.
    File(&'a str),
    /// Use this built-in shape.
    Style(&'a str),
}

/// Attract-mode video.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Video {
    /// Video file inside the bundle.
    #[serde(
        default,
        deserialize_with = "lenient::string",
        skip_serializing_if = "Option::is_none"
    )]
    pub file: Option<String>,
    /// Flip along x.
    #[serde(default)]
    pub invertx: bool,
    /// Flip along y.
    #[serde(default)]
    pub inverty: bool,
    /// Distance at which the video stops playing.
    #[serde(
        rename = "max-player-distance",
        alias = "max_player_distance",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub max_player_distance: Option<f32>,
}

/// A cabinet description.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Data {
    /// Game title.
    #[serde(
        default,
        deserialize_with = "lenient::string",
        skip_serializing_if = "Option::is_none"
    )]
    pub game: Option<String>,
    /// Cabinet identifier.
    #[serde(
        default,
        deserialize_with = "lenient::string",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,
    /// Release year.
    #[serde(
        default,
        deserialize_with = "lenient::int",
        skip_serializing_if = "Option::is_none"
    )]
    pub year: Option<i32>,
    /// Skin author.
    #[serde(
        default,
        deserialize_with = "lenient::string",
        skip_serializing_if = "Option::is_none"
    )]
    pub author: Option<String>,
    /// Free text.
    #[serde(
        default,
        deserialize_with = "lenient::string",
        skip_serializing_if = "Option::is_none"
    )]
    pub comments: Option<String>,
    /// ROM file name.
    #[serde(
        default,
        deserialize_with = "lenient::string",
        skip_serializing_if = "Option::is_none"
    )]
    pub rom: Option<String>,
    /// ROM playlist; takes over from `rom` when non-empty.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub roms: Vec<String>,
    /// Seconds the game needs to boot.
    #[serde(
        default,
        deserialize_with = "lenient::int",
        skip_serializing_if = "Option::is_none"
    )]
    pub timetoload: Option<i32>,
    /// Checksum of the ROM.
    #[serde(
        default,
        deserialize_with = "lenient::string",
        skip_serializing_if = "Option::is_none"
    )]
    pub md5sum: Option<String>,
    /// Cabinet-wide fallback material name.
    #[serde(
        default,
        deserialize_with = "lenient::string",
        skip_serializing_if = "Option::is_none"
    )]
    pub material: Option<String>,
    /// Space the cabinet occupies.
    #[serde(
        default,
        deserialize_with = "lenient::string",
        skip_serializing_if = "Option::is_none"
    )]
    pub space: Option<String>,
    /// Description format version.
    #[serde(
        default,
        deserialize_with = "lenient::string",
        skip_serializing_if = "Option::is_none"
    )]
    pub version: Option<String>,
    /// Legacy top-level built-in shape.
    #[serde(
        default,
        deserialize_with = "lenient::string",
        skip_serializing_if = "Option::is_none"
    )]
    pub style: Option<String>,
    /// Model block.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<Model>,
    /// Emulator core.
    #[serde(
        default,
        deserialize_with = "lenient::string",
        skip_serializing_if = "Option::is_none"
    )]
    pub core: Option<String>,
    /// Attract video.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<Video>,
    /// Styled parts, in document order.
    #[serde(default)]
    pub parts: Vec<Part>,
    /// Screen block.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crt: Option<Crt>,
    /// Coin slot variant.
    #[serde(
        default,
        deserialize_with = "lenient::string",
        skip_serializing_if = "Option::is_none"
    )]
    pub coinslot: Option<String>,
    /// Adjustment applied to the substituted coin slot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coinslotgeometry: Option<Geometry>,
}

impl Data {
    /// Parse a description; same as [`parse`].
    pub fn from_yaml(text: &str) -> Result<Self, ParseError> {
        parse(text)
    }

    /// Serialize back to YAML; same as [`to_yaml`].
    pub fn to_yaml(&self) -> Result<String, ParseError> {
        to_yaml(self)
    }

    /// Number of part entries.
    pub fn part_count(&self) -> usize {
        self.parts.len()
    }

    /// The first part whose name matches `name`.
    pub fn find_part(&self, name: &str) -> Option<&Part> {
        self.parts.iter().find(|p| p.is_match(name))
    }

    /// The ROM playlist, or the single `rom` when the playlist is empty.
    pub fn roms_or_rom(&self) -> Vec<&str> {
        if !self.roms.is_empty() {
            return self.roms.iter().map(String::as_str).collect();
        }
        self.rom.as_deref().into_iter().collect()
    }

    /// The built-in style, from the model block or the legacy top-level key.
    pub fn model_style(&self) -> Option<&str> {
        self.model
            .as_ref()
            .and_then(|m| m.style.as_deref())
            .or(self.style.as_deref())
    }

    /// Model choice: a bundled file wins over any style.
    pub fn model_source(&self) -> Option<ModelSource<'_>> {
        let blank = |s: &&str| !s.trim().is_empty();
        if let Some(file) = self
            .model
            .as_ref()
            .and_then(|m| m.file.as_deref())
            .filter(blank)
        {
            return Some(ModelSource::File(file.trim()));
        }
        self.model_style()
            .filter(blank)
            .map(|s| ModelSource::Style(s.trim()))
    }

    /// The cabinet-wide material name, if set and non-blank.
    pub fn material_name(&self) -> Option<&str> {
        self.material
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
    }
}
