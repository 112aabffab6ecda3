//! Part definitions: the named, individually styled pieces of a cabinet.

use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

use crate::color::ColorData;
use crate::lenient;

/// Compare two names the way cabinets compare them: trimmed and
/// case-insensitive.
pub fn names_match(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

/// Normalize a name into the key used for name lookups.
pub fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// The closed set of part types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PartType {
    /// Regular part, styled by color, art or named material.
    #[default]
    Default,
    /// Glass layer over the screen.
    Bezel,
    /// Back-lit marquee.
    Marquee,
    /// Viewer-only volume that marks where the cabinet blocks the player.
    Blocker,
}

impl PartType {
    /// The lowercase name used in description documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            PartType::Default => "default",
            PartType::Bezel => "bezel",
            PartType::Marquee => "marquee",
            PartType::Blocker => "blocker",
        }
    }
}

impl fmt::Display for PartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse a part type name. Anything outside the known set, in any case,
/// is [`PartType::Default`].
pub fn parse_part_type(s: &str) -> PartType {
    match s.trim().to_lowercase().as_str() {
        "bezel" => PartType::Bezel,
        "marquee" => PartType::Marquee,
        "blocker" => PartType::Blocker,
        _ => PartType::Default,
    }
}

impl Serialize for PartType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for PartType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PartTypeVisitor;

        impl<'de> Visitor<'de> for PartTypeVisitor {
            type Value = PartType;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a part type name")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<PartType, E> {
                Ok(parse_part_type(v))
            }

            fn visit_bool<E: de::Error>(self, _: bool) -> Result<PartType, E> {
                Ok(PartType::Default)
            }

            fn visit_i64<E: de::Error>(self, _: i64) -> Result<PartType, E> {
                Ok(PartType::Default)
            }

            fn visit_u64<E: de::Error>(self, _: u64) -> Result<PartType, E> {
                Ok(PartType::Default)
            }

            fn visit_f64<E: de::Error>(self, _: f64) -> Result<PartType, E> {
                Ok(PartType::Default)
            }

            fn visit_unit<E: de::Error>(self) -> Result<PartType, E> {
                Ok(PartType::Default)
            }

            fn visit_none<E: de::Error>(self) -> Result<PartType, E> {
                Ok(PartType::Default)
            }

            fn visit_seq<A: de::SeqAccess<'de>>(self, mut seq: A) -> Result<PartType, A::Error> {
                while seq.next_element::<de::IgnoredAny>()?.is_some() {}
                Ok(PartType::Default)
            }

            fn visit_map<A: de::MapAccess<'de>>(self, mut map: A) -> Result<PartType, A::Error> {
                while map
                    .next_entry::<de::IgnoredAny, de::IgnoredAny>()?
                    .is_some()
                {}
                Ok(PartType::Default)
            }
        }

        deserializer.deserialize_any(PartTypeVisitor)
    }
}

/// How a part is textured. The image itself is supplied next to the
/// description and matched to the part by name.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Art {
    /// Image file name inside the cabinet bundle.
    #[serde(
        default,
        deserialize_with = "lenient::string",
        skip_serializing_if = "Option::is_none"
    )]
    pub file: Option<String>,
    /// Flip the image along x.
    #[serde(default)]
    pub invertx: bool,
    /// Flip the image along y.
    #[serde(default)]
    pub inverty: bool,
}

impl Art {
    /// UV scale/offset encoding the flips: `(±1, ±1, 0, 0)`.
    pub fn uv_scale_offset(&self) -> [f32; 4] {
        [
            if self.invertx { -1.0 } else { 1.0 },
            if self.inverty { -1.0 } else { 1.0 },
            0.0,
            0.0,
        ]
    }
}

/// Marquee lighting.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Marquee {
    /// Lamp setup: `none`, `one-lamp`, `two-lamps`, `one-tube`,
    /// `two-tubes`.
    #[serde(
        rename = "illumination-type",
        alias = "illumination_type",
        default,
        deserialize_with = "lenient::string",
        skip_serializing_if = "Option::is_none"
    )]
    pub illumination_type: Option<String>,
    /// Tint applied to the marquee.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorData>,
}

fn half() -> f32 {
    0.5
}

/// Shader scalars for a part's material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialProperties {
    /// How metal-like the surface is, `0..=1`.
    #[serde(default)]
    pub metallic: f32,
    /// How glossy the surface is, `0..=1`.
    #[serde(default = "half")]
    pub smoothness: f32,
    /// Tint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorData>,
    /// Emitted light.
    #[serde(
        rename = "emission-color",
        alias = "emission_color",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub emission_color: Option<ColorData>,
}

impl Default for MaterialProperties {
    fn default() -> Self {
        Self {
            metallic: 0.0,
            smoothness: 0.5,
            color: None,
            emission_color: None,
        }
    }
}

/// Emission settings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Emission {
    /// Whether the part glows.
    #[serde(default)]
    pub emissive: bool,
    /// Glow color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorData>,
}

/// A named piece of the cabinet model.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Part {
    /// Node name in the model. The only link between the two.
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub name: String,
    /// Part type; unknown values are `default`.
    #[serde(rename = "type", default)]
    pub kind: PartType,
    /// Tint color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorData>,
    /// Named built-in material.
    #[serde(
        default,
        deserialize_with = "lenient::string",
        skip_serializing_if = "Option::is_none"
    )]
    pub material: Option<String>,
    /// Named built-in normal map.
    #[serde(
        default,
        deserialize_with = "lenient::string",
        skip_serializing_if = "Option::is_none"
    )]
    pub normal: Option<String>,
    /// Texture block.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub art: Option<Art>,
    /// Marquee lighting block.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marquee: Option<Marquee>,
    /// Shader scalars.
    #[serde(
        rename = "material-properties",
        alias = "material_properties",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub material_properties: Option<MaterialProperties>,
    /// Emission block.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emission: Option<Emission>,
}

impl Part {
    /// A part with just a name and a type.
    pub fn new(name: impl Into<String>, kind: PartType) -> Self {
        Self {
            name: name.into(),
            kind,
            ..Self::default()
        }
    }

    /// True if `node_name` refers to this part.
    pub fn is_match(&self, node_name: &str) -> bool {
        names_match(&self.name, node_name)
    }

    /// The named material, if one is set and non-blank.
    pub fn material_name(&self) -> Option<&str> {
        self.material
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
    }

    /// The emission color this part asks for, by priority: marquee tint,
    /// emission block, material-properties emission color.
    pub fn emission_color(&self) -> Option<ColorData> {
        if self.kind == PartType::Marquee {
            if let Some(c) = self.marquee.as_ref().and_then(|m| m.color) {
                return Some(c);
            }
        }
        if let Some(e) = self.emission.as_ref().filter(|e| e.emissive) {
            if let Some(c) = e.color {
                return Some(c);
            }
        }
        self.material_properties
            .as_ref()
            .and_then(|p| p.emission_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn part_type_known_names() {
        assert_eq!(parse_part_type("bezel"), PartType::Bezel);
        assert_eq!(parse_part_type("MARQUEE"), PartType::Marquee);
        assert_eq!(parse_part_type("  Blocker "), PartType::Blocker);
        assert_eq!(parse_part_type("default"), PartType::Default);
    }

    #[test]
    fn part_type_unknown_is_default() {
        for s in ["", "glass", "bezels", "marquee-light", "0", "Default!", "blöcker"] {
            assert_eq!(parse_part_type(s), PartType::Default, "{s:?}");
        }
    }

    #[test]
    fn part_type_from_any_yaml_shape() {
        let kind = |yaml: &str| serde_yaml::from_str::<PartType>(yaml).unwrap();
        assert_eq!(kind("marquee"), PartType::Marquee);
        assert_eq!(kind("[bezel]"), PartType::Default);
        assert_eq!(kind("{bezel: true, nested: [1, 2]}"), PartType::Default);
        assert_eq!(kind("12"), PartType::Default);
        assert_eq!(kind("~"), PartType::Default);
    }

    #[test]
    fn names_match_ignores_case_and_padding() {
        assert!(names_match(" Coin-Slot ", "coin-slot"));
        assert!(!names_match("coin-slot", "coin slot"));
    }

    #[test]
    fn art_flip_encoding() {
        let art = Art {
            file: None,
            invertx: true,
            inverty: false,
        };
        assert_eq!(art.uv_scale_offset(), [-1.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn blank_material_is_none() {
        let mut part = Part::new("left", PartType::Default);
        part.material = Some("   ".to_string());
        assert_eq!(part.material_name(), None);
        part.material = Some(" black ".to_string());
        assert_eq!(part.material_name(), Some("black"));
    }

    #[test]
    fn emission_priority() {
        let mut part = Part::new("marquee", PartType::Marquee);
        part.emission = Some(Emission {
            emissive: true,
            color: Some(ColorData::rgb(0, 0, 255)),
        });
        assert_eq!(part.emission_color(), Some(ColorData::rgb(0, 0, 255)));

        part.marquee = Some(Marquee {
            illumination_type: None,
            color: Some(ColorData::rgb(255, 0, 0)),
        });
        assert_eq!(part.emission_color(), Some(ColorData::rgb(255, 0, 0)));

        part.kind = PartType::Default;
        assert_eq!(part.emission_color(), Some(ColorData::rgb(0, 0, 255)));
    }
}
