//! The resource resolver seam.

use std::fmt;
use std::sync::Arc;

use cabview_scene::{Material, Prefab, Texture};

/// Asset category. Names are only unique within a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    /// Surface materials for regular parts.
    Material,
    /// Marquee lighting materials, by illumination type.
    MarqueeMaterial,
    /// Coin slot prefabs.
    CoinSlot,
    /// Screen prefabs, by CRT type.
    Screen,
    /// Normal map textures.
    NormalMap,
}

impl Category {
    /// Every category.
    pub const ALL: [Category; 5] = [
        Category::Material,
        Category::MarqueeMaterial,
        Category::CoinSlot,
        Category::Screen,
        Category::NormalMap,
    ];

    /// The name looked up when the requested one is missing.
    pub fn default_name(&self) -> &'static str {
        match self {
            Category::Material => "base",
            Category::MarqueeMaterial => "one-lamp",
            Category::CoinSlot => "coin-slot-small",
            Category::Screen => "19i",
            Category::NormalMap => "",
        }
    }

    /// Parse the manifest spelling (`material`, `marquee`, `coin-slot`,
    /// `screen`, `normal-map`).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "material" => Some(Category::Material),
            "marquee" | "marquee-material" => Some(Category::MarqueeMaterial),
            "coin-slot" | "coinslot" => Some(Category::CoinSlot),
            "screen" => Some(Category::Screen),
            "normal-map" | "normal" => Some(Category::NormalMap),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Category::Material => "material",
            Category::MarqueeMaterial => "marquee material",
            Category::CoinSlot => "coin slot",
            Category::Screen => "screen",
            Category::NormalMap => "normal map",
        })
    }
}

/// A resolved asset. Materials and textures are handed out as copies the
/// caller may modify; prefabs are shared templates.
#[derive(Debug, Clone, PartialEq)]
pub enum Asset {
    /// A material template.
    Material(Material),
    /// A subtree template.
    Prefab(Arc<Prefab>),
    /// A texture.
    Texture(Texture),
}

/// Looks up named assets.
///
/// `resolve` tries `name` first, then `default`, and returns `None` when
/// neither exists. Lookups must not depend on earlier calls.
pub trait ResourceResolver {
    /// Look up an asset.
    fn resolve(&self, category: Category, name: Option<&str>, default: &str) -> Option<Asset>;

    /// Look up a material; `None` if the asset is something else.
    fn resolve_material(
        &self,
        category: Category,
        name: Option<&str>,
        default: &str,
    ) -> Option<Material> {
        match self.resolve(category, name, default) {
            Some(Asset::Material(m)) => Some(m),
            _ => None,
        }
    }

    /// Look up a prefab; `None` if the asset is something else.
    fn resolve_prefab(
        &self,
        category: Category,
        name: Option<&str>,
        default: &str,
    ) -> Option<Arc<Prefab>> {
        match self.resolve(category, name, default) {
            Some(Asset::Prefab(p)) => Some(p),
            _ => None,
        }
    }

    /// Look up a texture; `None` if the asset is something else.
    fn resolve_texture(
        &self,
        category: Category,
        name: Option<&str>,
        default: &str,
    ) -> Option<Texture> {
        match self.resolve(category, name, default) {
            Some(Asset::Texture(t)) => Some(t),
            _ => None,
        }
    }
}

impl<R: ResourceResolver + ?Sized> ResourceResolver for &R {
    fn resolve(&self, category: Category, name: Option<&str>, default: &str) -> Option<Asset> {
        (**self).resolve(category, name, default)
    }
}
