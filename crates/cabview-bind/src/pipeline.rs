//! Per-part visual pipeline.
//!
//! Given a part and the node it was matched to, pick a base material by part
//! type and layer texture, material properties, tint, normal map and
//! emission on top. Each node gets its own copy of the resolved material;
//! only the cabinet-wide fallback is shared between nodes, and only while
//! nothing is layered on it.

use cabview_ir::{Part, PartType};
use cabview_scene::{param, Material, MaterialId, NodeId, SceneGraph, Texture};

use crate::error::{Diagnostic, Diagnostics};
use crate::resolver::{Category, ResourceResolver};

/// Render queue for glass layers drawn over the screen.
pub const RENDER_QUEUE_OVERLAY: i32 = 3005;

/// Render queue for blocker volumes, after glass.
pub const RENDER_QUEUE_BLOCKER: i32 = 3006;

enum Base {
    /// A fresh per-node copy.
    Owned(Material),
    /// The shared fallback.
    Shared(MaterialId),
    /// Resolution failed; build on whatever the node has.
    Current,
}

/// Apply a part's visuals to `node`.
///
/// Returns the node when the part is bound to it, which includes nodes
/// without a renderer (they are bound but left unstyled). Returns `None`
/// when the node name does not match the part.
pub fn apply_part<S, R>(
    part: &Part,
    node: NodeId,
    scene: &mut S,
    resolver: &R,
    texture: Option<&Texture>,
    fallback: Option<MaterialId>,
    diagnostics: &mut Diagnostics,
) -> Option<NodeId>
where
    S: SceneGraph + ?Sized,
    R: ResourceResolver + ?Sized,
{
    let node_name = scene.name(node).unwrap_or_default().to_string();
    if !part.is_match(&node_name) {
        diagnostics.push(Diagnostic::BindingMismatch {
            part: part.name.clone(),
            node: node_name,
        });
        return None;
    }

    if !scene.has_renderer(node) {
        diagnostics.push(Diagnostic::StructuralAnomaly {
            part: part.name.clone(),
            node: node_name,
            reason: "no mesh renderer".to_string(),
        });
        return Some(node);
    }

    let base = base_material(part, texture, fallback, resolver, &node_name, diagnostics);

    let normal = part.normal.as_deref().and_then(|n| {
        let found = resolver.resolve_texture(Category::NormalMap, Some(n), "");
        if found.is_none() {
            log::debug!("No normal map '{}' for part '{}'", n, part.name);
        }
        found
    });

    let layered = texture.is_some()
        || part.material_properties.is_some()
        || part.color.is_some()
        || normal.is_some()
        || part.emission_color().is_some();

    let mut material = match base {
        Base::Owned(m) => m,
        Base::Shared(id) if !layered => {
            commit(scene, node, id, &part.name);
            return Some(node);
        }
        Base::Current if !layered => return Some(node),
        Base::Shared(id) => scene
            .material(id)
            .cloned()
            .unwrap_or_else(|| Material::new(part.name.clone())),
        Base::Current => scene
            .primary_material(node)
            .and_then(|id| scene.material(id))
            .cloned()
            .unwrap_or_else(|| Material::new(part.name.clone())),
    };

    if let Some(texture) = texture {
        let flips = part.art.clone().unwrap_or_default().uv_scale_offset();
        material.set_texture(param::BASE_MAP, texture.clone());
        material.set_vector(param::BASE_MAP_ST, flips);
    }

    if let Some(props) = &part.material_properties {
        material.set_float(param::SMOOTHNESS, props.smoothness);
        material.set_float(param::METALLIC, props.metallic);
    }

    if let Some(color) = part.color {
        material.set_color(param::BASE_COLOR, color.color());
    }

    if let Some(normal) = normal {
        material.set_texture(param::BUMP_MAP, normal);
        material.set_float(param::BUMP_SCALE, 1.0);
    }

    if let Some(emission) = part.emission_color() {
        material.set_color(param::EMISSION_COLOR, emission.emission_value());
    }

    let id = scene.add_material(material);
    commit(scene, node, id, &part.name);
    Some(node)
}

fn base_material<R: ResourceResolver + ?Sized>(
    part: &Part,
    texture: Option<&Texture>,
    fallback: Option<MaterialId>,
    resolver: &R,
    node_name: &str,
    diagnostics: &mut Diagnostics,
) -> Base {
    let mut lookup = |category: Category, name: Option<&str>, default: &str| {
        let found = resolver.resolve_material(category, name, default);
        if found.is_none() {
            diagnostics.push(Diagnostic::ResolutionMiss {
                category,
                name: name.map(str::to_string),
                default: default.to_string(),
                node: node_name.to_string(),
            });
        }
        found
    };

    let (material, queue) = match part.kind {
        PartType::Bezel => (
            lookup(Category::Material, Some("layer glass"), "base"),
            Some(RENDER_QUEUE_OVERLAY),
        ),
        PartType::Marquee => {
            let illumination = part
                .marquee
                .as_ref()
                .and_then(|m| m.illumination_type.as_deref());
            (lookup(Category::MarqueeMaterial, illumination, "one-lamp"), None)
        }
        PartType::Blocker => (
            lookup(Category::Material, Some("blocker"), "base"),
            Some(RENDER_QUEUE_BLOCKER),
        ),
        PartType::Default => {
            if texture.is_some() || part.color.is_some() {
                (lookup(Category::Material, Some("base"), "base"), None)
            } else if let (None, Some(id)) = (part.material_name(), fallback) {
                return Base::Shared(id);
            } else {
                let name = part.material_name();
                let queue = name
                    .filter(|n| n.to_lowercase().contains("glass"))
                    .map(|_| RENDER_QUEUE_OVERLAY);
                (lookup(Category::Material, name, "base"), queue)
            }
        }
    };

    match material {
        Some(mut m) => {
            if queue.is_some() {
                m.render_queue = queue;
            }
            Base::Owned(m)
        }
        None => Base::Current,
    }
}

fn commit<S: SceneGraph + ?Sized>(scene: &mut S, node: NodeId, id: MaterialId, part: &str) {
    if let Err(e) = scene.set_material(node, id) {
        log::warn!("Could not set material on part '{}': {}", part, e);
    }
}
