//! Asset library manifests.
//!
//! A manifest is a TOML file that adds to (or overrides) the built-in
//! asset library:
//!
//! ```toml
//! [[material]]
//! name = "red plastic"
//! category = "material"
//! color = [0.8, 0.1, 0.1]
//! metallic = 0.0
//! smoothness = 0.6
//!
//! [[prefab]]
//! name = "coin-slot-wide"
//! category = "coin-slot"
//! size = [0.1, 0.04, 0.01]
//!
//! [[normal_map]]
//! name = "wood-grain"
//! width = 4
//! height = 4
//! ```

use std::path::Path;

use cabview_bind::{AssetLibrary, Category};
use cabview_math::Rgba;
use cabview_scene::{param, Material, Mesh, Prefab, PrefabNode, Texture};
use serde::Deserialize;

use crate::error::LoadError;

/// A parsed asset library manifest.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct LibraryManifest {
    /// Extra materials.
    pub material: Vec<MaterialEntry>,
    /// Extra prefabs.
    pub prefab: Vec<PrefabEntry>,
    /// Extra normal maps.
    pub normal_map: Vec<NormalMapEntry>,
}

/// A `[[material]]` entry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MaterialEntry {
    /// Lookup name.
    pub name: String,
    /// `material` or `marquee`.
    #[serde(default = "default_material_category")]
    pub category: String,
    /// Linear RGB.
    #[serde(default = "default_color")]
    pub color: [f32; 3],
    /// Metalness.
    #[serde(default)]
    pub metallic: f32,
    /// Glossiness.
    #[serde(default = "default_smoothness")]
    pub smoothness: f32,
    /// Draw order override.
    #[serde(default)]
    pub render_queue: Option<i32>,
    /// Emission strength, marquee materials only.
    #[serde(default)]
    pub emission: Option<f32>,
}

/// A `[[prefab]]` entry: a box of the given size.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PrefabEntry {
    /// Lookup name.
    pub name: String,
    /// `coin-slot` or `screen`.
    pub category: String,
    /// Box extents in meters.
    pub size: [f32; 3],
}

/// A `[[normal_map]]` entry: a flat normal map of the given size.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NormalMapEntry {
    /// Lookup name.
    pub name: String,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

fn default_material_category() -> String {
    "material".to_string()
}

fn default_color() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

fn default_smoothness() -> f32 {
    0.5
}

// Tangent-space "straight up".
const FLAT_NORMAL: [u8; 4] = [128, 128, 255, 255];

/// Largest normal map a manifest may ask for, in pixels.
const MAX_NORMAL_MAP_PIXELS: usize = 4096 * 4096;

impl LibraryManifest {
    /// Parse a manifest from TOML text.
    pub fn from_toml(text: &str) -> Result<Self, LoadError> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a manifest file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.material.len() + self.prefab.len() + self.normal_map.len()
    }

    /// True when the manifest declares nothing.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Build a library holding only this manifest's entries.
    pub fn into_library(self) -> Result<AssetLibrary, LoadError> {
        let mut lib = AssetLibrary::new();

        for entry in self.material {
            let category = match Category::parse(&entry.category) {
                Some(c @ (Category::Material | Category::MarqueeMaterial)) => c,
                _ => {
                    return Err(LoadError::manifest_entry(
                        &entry.name,
                        format!("'{}' is not a material category", entry.category),
                    ))
                }
            };
            let [r, g, b] = entry.color;
            let mut material = Material::new(&entry.name)
                .with_color(param::BASE_COLOR, Rgba::new(r, g, b, 1.0))
                .with_float(param::METALLIC, entry.metallic)
                .with_float(param::SMOOTHNESS, entry.smoothness);
            if let Some(queue) = entry.render_queue {
                material = material.with_render_queue(queue);
            }
            if let Some(strength) = entry.emission {
                if category != Category::MarqueeMaterial {
                    return Err(LoadError::manifest_entry(
                        &entry.name,
                        "only marquee materials can emit",
                    ));
                }
                material.set_color(
                    param::EMISSION_COLOR,
                    Rgba::new(strength, strength, strength, 1.0),
                );
            }
            lib.insert_material(category, &entry.name, material);
        }

        for entry in self.prefab {
            let category = match Category::parse(&entry.category) {
                Some(c @ (Category::CoinSlot | Category::Screen)) => c,
                _ => {
                    return Err(LoadError::manifest_entry(
                        &entry.name,
                        format!("'{}' is not a prefab category", entry.category),
                    ))
                }
            };
            if entry.size.iter().any(|s| !s.is_finite() || *s <= 0.0) {
                return Err(LoadError::manifest_entry(
                    &entry.name,
                    "size must be positive",
                ));
            }
            let [x, y, z] = entry.size;
            let body = PrefabNode::mesh("body", Mesh::cuboid(x, y, z), Material::new(&entry.name));
            let prefab = Prefab::new(PrefabNode::group(&entry.name).with_child(body));
            lib.insert_prefab(category, &entry.name, prefab);
        }

        for entry in self.normal_map {
            if entry.width == 0 || entry.height == 0 {
                return Err(LoadError::manifest_entry(
                    &entry.name,
                    "normal map must not be empty",
                ));
            }
            let count = (entry.width as usize)
                .checked_mul(entry.height as usize)
                .filter(|&n| n <= MAX_NORMAL_MAP_PIXELS)
                .ok_or_else(|| {
                    LoadError::manifest_entry(&entry.name, "normal map larger than 4096x4096 pixels")
                })?;
            let pixels = FLAT_NORMAL.repeat(count);
            let texture = Texture::new(&entry.name, entry.width, entry.height, pixels);
            lib.insert_texture(Category::NormalMap, &entry.name, texture);
        }

        Ok(lib)
    }

    /// The built-in library with this manifest merged over it.
    pub fn apply_to_builtin(self) -> Result<AssetLibrary, LoadError> {
        let mut lib = AssetLibrary::builtin();
        let count = self.len();
        lib.extend(self.into_library()?);
        log::info!(
            "Asset library has {} entries after merging {} from the manifest",
            lib.len(),
            count
        );
        Ok(lib)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cabview_bind::{Asset, ResourceResolver};

    const MANIFEST: &str = r#"
[[material]]
name = "Red Plastic"
color = [0.8, 0.1, 0.1]
smoothness = 0.6

[[material]]
name = "four-tubes"
category = "marquee"
emission = 4.0

[[prefab]]
name = "coin-slot-wide"
category = "coin-slot"
size = [0.1, 0.04, 0.01]

[[normal_map]]
name = "wood-grain"
width = 2
height = 2
"#;

    #[test]
    fn parses_all_sections() {
        let manifest = LibraryManifest::from_toml(MANIFEST).unwrap();
        assert_eq!(manifest.material.len(), 2);
        assert_eq!(manifest.material[0].category, "material");
        assert_eq!(manifest.material[0].metallic, 0.0);
        assert_eq!(manifest.prefab[0].size, [0.1, 0.04, 0.01]);
        assert_eq!(manifest.normal_map[0].width, 2);
        assert_eq!(manifest.len(), 4);
    }

    #[test]
    fn empty_manifest() {
        let manifest = LibraryManifest::from_toml("").unwrap();
        assert!(manifest.is_empty());
        assert!(manifest.into_library().unwrap().is_empty());
    }

    #[test]
    fn library_entries_resolve() {
        let lib = LibraryManifest::from_toml(MANIFEST)
            .unwrap()
            .apply_to_builtin()
            .unwrap();

        let red = lib
            .resolve_material(Category::Material, Some("red plastic"), "base")
            .unwrap();
        assert_eq!(red.float(param::SMOOTHNESS), Some(0.6));

        let tubes = lib
            .resolve_material(Category::MarqueeMaterial, Some("four-tubes"), "one-lamp")
            .unwrap();
        assert_eq!(tubes.color(param::EMISSION_COLOR).map(|c| c.r), Some(4.0));

        let slot = lib
            .resolve_prefab(Category::CoinSlot, Some("coin-slot-wide"), "coin-slot-small")
            .unwrap();
        assert_eq!(slot.vertex_count(), 24);

        match lib.get(Category::NormalMap, "wood-grain") {
            Some(Asset::Texture(t)) => assert_eq!(t.pixels.len(), 16),
            other => panic!("expected texture, got {:?}", other),
        }
        // Builtins survive.
        assert!(lib.contains(Category::Screen, "19i"));
    }

    #[test]
    fn bad_entries_are_rejected() {
        let wrong_category = "[[prefab]]\nname = \"x\"\ncategory = \"material\"\nsize = [1.0, 1.0, 1.0]\n";
        assert!(matches!(
            LibraryManifest::from_toml(wrong_category).unwrap().into_library(),
            Err(LoadError::ManifestEntry { .. })
        ));

        let emitting_surface = "[[material]]\nname = \"x\"\nemission = 1.0\n";
        assert!(matches!(
            LibraryManifest::from_toml(emitting_surface).unwrap().into_library(),
            Err(LoadError::ManifestEntry { .. })
        ));

        let flat = "[[prefab]]\nname = \"x\"\ncategory = \"screen\"\nsize = [1.0, 0.0, 1.0]\n";
        assert!(matches!(
            LibraryManifest::from_toml(flat).unwrap().into_library(),
            Err(LoadError::ManifestEntry { .. })
        ));
    }

    #[test]
    fn oversized_normal_maps_are_rejected() {
        for (width, height) in [(70000, 70000), (4097, 4096), (u32::MAX, u32::MAX)] {
            let text = format!("[[normal_map]]\nname = \"huge\"\nwidth = {width}\nheight = {height}\n");
            assert!(
                matches!(
                    LibraryManifest::from_toml(&text).unwrap().into_library(),
                    Err(LoadError::ManifestEntry { .. })
                ),
                "{width}x{height}"
            );
        }

        let widest = "[[normal_map]]\nname = \"strip\"\nwidth = 65536\nheight = 1\n";
        let lib = LibraryManifest::from_toml(widest).unwrap().into_library().unwrap();
        assert!(lib.contains(Category::NormalMap, "strip"));
    }

    #[test]
    fn syntax_error() {
        assert!(matches!(
            LibraryManifest::from_toml("[[material]\n"),
            Err(LoadError::Manifest(_))
        ));
    }
}
