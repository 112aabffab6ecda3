//! In-memory asset library and the stock asset set.

use std::collections::BTreeMap;
use std::sync::Arc;

use cabview_ir::name_key;
use cabview_math::{Rgba, Transform};
use cabview_scene::{param, Material, Mesh, Prefab, PrefabNode, Texture};

use crate::resolver::{Asset, Category, ResourceResolver};

/// Category-scoped map of named assets.
///
/// Names are stored trimmed and lowercased, so `" Coin-Slot-Small"` and
/// `"coin-slot-small"` are the same entry.
#[derive(Debug, Clone, Default)]
pub struct AssetLibrary {
    assets: BTreeMap<(Category, String), Asset>,
}

impl AssetLibrary {
    /// An empty library.
    pub fn new() -> Self {
        Self::default()
    }

    /// The stock assets every cabinet can refer to.
    pub fn builtin() -> Self {
        let mut lib = Self::new();

        lib.insert_material(Category::Material, "base", surface("base", Rgba::WHITE, 0.0, 0.5));
        lib.insert_material(
            Category::Material,
            "layer glass",
            surface("layer glass", Rgba::new(1.0, 1.0, 1.0, 0.1), 0.0, 0.95),
        );
        lib.insert_material(
            Category::Material,
            "blocker",
            surface("blocker", Rgba::new(1.0, 0.0, 0.0, 0.35), 0.0, 0.0),
        );
        lib.insert_material(Category::Material, "black", surface("black", Rgba::BLACK, 0.0, 0.3));
        lib.insert_material(
            Category::Material,
            "glass",
            surface("glass", Rgba::new(1.0, 1.0, 1.0, 0.25), 0.0, 0.9),
        );

        for (name, strength) in [
            ("none", 0.0),
            ("one-lamp", 1.0),
            ("two-lamps", 1.5),
            ("one-tube", 2.0),
            ("two-tubes", 3.0),
        ] {
            let m = surface(name, Rgba::WHITE, 0.0, 0.5).with_color(
                param::EMISSION_COLOR,
                Rgba::new(strength, strength, strength, 1.0),
            );
            lib.insert_material(Category::MarqueeMaterial, name, m);
        }

        lib.insert_prefab(Category::CoinSlot, "coin-slot-small", coin_slot("coin-slot-small", &[0.0]));
        lib.insert_prefab(
            Category::CoinSlot,
            "coin-slot-double",
            coin_slot("coin-slot-double", &[-0.03, 0.03]),
        );

        // Visible area in meters.
        lib.insert_prefab(Category::Screen, "19i", screen("19i", 0.386, 0.290));
        lib.insert_prefab(Category::Screen, "25i", screen("25i", 0.508, 0.381));
        lib.insert_prefab(Category::Screen, "lcd", screen("lcd", 0.480, 0.270));

        lib
    }

    /// Add or replace an asset; returns the one it replaced.
    pub fn insert(&mut self, category: Category, name: &str, asset: Asset) -> Option<Asset> {
        self.assets.insert((category, name_key(name)), asset)
    }

    /// Add or replace a material.
    pub fn insert_material(&mut self, category: Category, name: &str, material: Material) {
        self.insert(category, name, Asset::Material(material));
    }

    /// Add or replace a prefab.
    pub fn insert_prefab(&mut self, category: Category, name: &str, prefab: Prefab) {
        self.insert(category, name, Asset::Prefab(Arc::new(prefab)));
    }

    /// Add or replace a texture.
    pub fn insert_texture(&mut self, category: Category, name: &str, texture: Texture) {
        self.insert(category, name, Asset::Texture(texture));
    }

    /// Exact lookup (after normalizing), no default.
    pub fn get(&self, category: Category, name: &str) -> Option<&Asset> {
        self.assets.get(&(category, name_key(name)))
    }

    /// Whether an entry exists.
    pub fn contains(&self, category: Category, name: &str) -> bool {
        self.get(category, name).is_some()
    }

    /// Normalized names in a category, sorted.
    pub fn names(&self, category: Category) -> Vec<&str> {
        self.assets
            .keys()
            .filter(|(c, _)| *c == category)
            .map(|(_, n)| n.as_str())
            .collect()
    }

    /// Total number of assets.
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    /// True when the library has no assets.
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// Merge `other` in; its entries replace same-named ones.
    pub fn extend(&mut self, other: AssetLibrary) {
        self.assets.extend(other.assets);
    }
}

impl ResourceResolver for AssetLibrary {
    fn resolve(&self, category: Category, name: Option<&str>, default: &str) -> Option<Asset> {
        if let Some(wanted) = name.map(name_key).filter(|n| !n.is_empty()) {
            if let Some(asset) = self.assets.get(&(category, wanted.clone())) {
                return Some(asset.clone());
            }
            log::debug!("No {} named '{}', trying '{}'", category, wanted, default);
        }
        let fallback = name_key(default);
        if fallback.is_empty() {
            return None;
        }
        self.assets.get(&(category, fallback)).cloned()
    }
}

fn surface(name: &str, color: Rgba, metallic: f32, smoothness: f32) -> Material {
    Material::new(name)
        .with_color(param::BASE_COLOR, color)
        .with_float(param::METALLIC, metallic)
        .with_float(param::SMOOTHNESS, smoothness)
}

fn coin_slot(name: &str, slots: &[f32]) -> Prefab {
    let width = 0.06 * slots.len() as f32;
    let mut root = PrefabNode::group(name).with_child(PrefabNode::mesh(
        "plate",
        Mesh::quad(width, 0.1),
        surface("coin plate", Rgba::new(0.7, 0.7, 0.72, 1.0), 1.0, 0.6),
    ));
    for (i, &x) in slots.iter().enumerate() {
        root = root.with_child(
            PrefabNode::mesh(
                format!("slot-{}", i + 1),
                Mesh::cuboid(0.004, 0.03, 0.01),
                surface("coin slot", Rgba::BLACK, 0.0, 0.2),
            )
            .with_transform(Transform::translation(x, 0.0, 0.005)),
        );
    }
    Prefab::new(root)
}

fn screen(name: &str, width: f32, height: f32) -> Prefab {
    Prefab::new(PrefabNode::group(name).with_child(PrefabNode::mesh(
        "screen",
        Mesh::quad(width, height),
        surface("screen", Rgba::BLACK, 0.0, 0.9),
    )))
}
