//! The scene binder.

use cabview_ir::{names_match, Crt, Data, Geometry, Orientation};
use cabview_scene::{Material, MaterialId, NodeId, SceneGraph};

use crate::binding::Binding;
use crate::error::{BindError, Diagnostic, Diagnostics};
use crate::images::ImageSet;
use crate::pipeline::apply_part;
use crate::resolver::{Category, ResourceResolver};

/// Name of the coin slot placeholder node.
pub const COIN_SLOT_PLACEHOLDER: &str = "coin-slot";

/// Marker the model exporter puts in the name of duplicated nodes.
const CLONE_MARKER: &str = "clone";

/// Size figures of a bound cabinet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CabinetMetrics {
    /// Vertices over every mesh under the root.
    pub vertices: usize,
    /// Distinct materials referenced by renderers under the root.
    pub materials: usize,
}

impl CabinetMetrics {
    /// Measure the subtree of `root`.
    pub fn measure<S: SceneGraph + ?Sized>(scene: &S, root: NodeId) -> Self {
        Self {
            vertices: scene.subtree_vertex_count(root),
            materials: scene.subtree_materials(root).len(),
        }
    }
}

/// Everything a bind produces.
#[derive(Debug, Clone, Default)]
pub struct BindResult {
    /// Node per bound part.
    pub binding: Binding,
    /// Metrics measured after binding.
    pub metrics: CabinetMetrics,
    /// Non-fatal problems, in the order they were found.
    pub diagnostics: Diagnostics,
    /// The substituted coin slot, if one was placed.
    pub coin_slot: Option<NodeId>,
    /// The substituted screen, if one was placed.
    pub screen: Option<NodeId>,
}

/// Binds a description onto an imported model.
///
/// The binder walks the immediate children of the model root once. Coin
/// slot and screen placeholders are swapped for resolved prefabs, the other
/// screen mock is dropped, and every remaining node is matched to a part by
/// name and styled through [`apply_part`].
pub struct Binder<'a, R: ResourceResolver + ?Sized> {
    resolver: &'a R,
    fallback: Option<Material>,
}

impl<'a, R: ResourceResolver + ?Sized> Binder<'a, R> {
    /// A binder without a cabinet-wide fallback material.
    pub fn new(resolver: &'a R) -> Self {
        Self {
            resolver,
            fallback: None,
        }
    }

    /// A binder whose fallback is the cabinet's `material`, or `base`.
    pub fn for_cabinet(data: &Data, resolver: &'a R) -> Self {
        let fallback = resolver.resolve_material(
            Category::Material,
            data.material_name(),
            Category::Material.default_name(),
        );
        if fallback.is_none() {
            log::warn!(
                "No cabinet material '{}', unmatched nodes keep their own",
                data.material_name().unwrap_or_default()
            );
        }
        Self { resolver, fallback }
    }

    /// Use `material` on nodes that match no part, and on parts without a
    /// named material.
    pub fn with_fallback_material(mut self, material: Material) -> Self {
        self.fallback = Some(material);
        self
    }

    /// Bind `data` onto the model under `root`.
    ///
    /// Fails only when `root` is missing. Everything else is recorded in
    /// [`BindResult::diagnostics`]; changes made before a failure stay.
    pub fn bind<S: SceneGraph + ?Sized>(
        &self,
        data: &Data,
        scene: &mut S,
        root: Option<NodeId>,
        images: &ImageSet,
    ) -> Result<BindResult, BindError> {
        let root = root
            .filter(|&r| scene.contains(r))
            .ok_or(BindError::MissingModel)?;

        let mut result = BindResult::default();
        let fallback = self.fallback.clone().map(|m| scene.add_material(m));
        let mock = data
            .crt
            .as_ref()
            .and_then(Crt::orientation)
            .map(|o| o.screen_mock_name());

        for child in scene.children(root) {
            let name = scene.name(child).unwrap_or_default().to_string();

            if names_match(&name, COIN_SLOT_PLACEHOLDER) {
                result.coin_slot =
                    self.place_coin_slot(data, scene, root, child, &mut result.diagnostics);
                continue;
            }

            if mock.is_some_and(|m| names_match(&name, m)) {
                result.screen = self.place_screen(data, scene, root, child, &mut result.diagnostics);
                continue;
            }

            if is_screen_mock(&name) {
                remove(scene, child);
                continue;
            }

            if name.to_lowercase().contains(CLONE_MARKER) {
                log::debug!("Skipping duplicated node '{}'", name);
                continue;
            }

            match data.find_part(&name) {
                Some(part) => {
                    let texture = images.texture_for(&part.name);
                    let bound = apply_part(
                        part,
                        child,
                        scene,
                        self.resolver,
                        texture,
                        fallback,
                        &mut result.diagnostics,
                    );
                    if let Some(node) = bound {
                        result.binding.insert(&part.name, node, part.kind);
                    }
                }
                None => apply_fallback(scene, child, &name, fallback),
            }
        }

        result.metrics = CabinetMetrics::measure(scene, root);
        log::info!(
            "Bound {} of {} parts: {} vertices, {} materials, {} diagnostics",
            result.binding.len(),
            data.part_count(),
            result.metrics.vertices,
            result.metrics.materials,
            result.diagnostics.len()
        );
        Ok(result)
    }

    fn place_coin_slot<S: SceneGraph + ?Sized>(
        &self,
        data: &Data,
        scene: &mut S,
        root: NodeId,
        placeholder: NodeId,
        diagnostics: &mut Diagnostics,
    ) -> Option<NodeId> {
        let default = Category::CoinSlot.default_name();
        let wanted = data.coinslot.as_deref();
        let Some(prefab) = self
            .resolver
            .resolve_prefab(Category::CoinSlot, wanted, default)
        else {
            diagnostics.push(miss(Category::CoinSlot, wanted, default, COIN_SLOT_PLACEHOLDER));
            return None;
        };

        let at = scene.transform(placeholder).unwrap_or_default();
        let placed = match scene.instantiate(&prefab, root, at) {
            Ok(id) => id,
            Err(e) => {
                log::warn!("Could not place coin slot: {}", e);
                return None;
            }
        };
        if let Some(geometry) = &data.coinslotgeometry {
            adjust(scene, placed, geometry);
        }
        remove(scene, placeholder);
        Some(placed)
    }

    fn place_screen<S: SceneGraph + ?Sized>(
        &self,
        data: &Data,
        scene: &mut S,
        root: NodeId,
        placeholder: NodeId,
        diagnostics: &mut Diagnostics,
    ) -> Option<NodeId> {
        let crt = data.crt.as_ref();
        let default = Category::Screen.default_name();
        let wanted = crt.and_then(|c| c.kind.as_deref());
        let parent = scene.parent(placeholder).unwrap_or(root);
        let at = scene.transform(placeholder).unwrap_or_default();

        let placed = match self.resolver.resolve_prefab(Category::Screen, wanted, default) {
            Some(prefab) => match scene.instantiate(&prefab, parent, at) {
                Ok(id) => Some(id),
                Err(e) => {
                    log::warn!("Could not place screen: {}", e);
                    None
                }
            },
            None => {
                let node = scene.name(placeholder).unwrap_or_default().to_string();
                diagnostics.push(miss(Category::Screen, wanted, default, &node));
                None
            }
        };

        if let (Some(id), Some(geometry)) = (placed, crt.and_then(|c| c.geometry.as_ref())) {
            adjust(scene, id, geometry);
        }
        remove(scene, placeholder);
        placed
    }
}

fn is_screen_mock(name: &str) -> bool {
    [Orientation::Horizontal, Orientation::Vertical]
        .iter()
        .any(|o| names_match(name, o.screen_mock_name()))
}

fn apply_fallback<S: SceneGraph + ?Sized>(
    scene: &mut S,
    node: NodeId,
    name: &str,
    fallback: Option<MaterialId>,
) {
    match fallback {
        Some(id) if scene.has_renderer(node) => {
            if let Err(e) = scene.set_material(node, id) {
                log::warn!("Could not set cabinet material on '{}': {}", name, e);
            }
        }
        Some(_) => {}
        None => log::debug!("Node '{}' matches no part", name),
    }
}

fn adjust<S: SceneGraph + ?Sized>(scene: &mut S, node: NodeId, geometry: &Geometry) {
    if let Some(mut t) = scene.transform(node) {
        geometry.apply(&mut t);
        if let Err(e) = scene.set_transform(node, t) {
            log::warn!("Could not adjust node: {}", e);
        }
    }
}

fn remove<S: SceneGraph + ?Sized>(scene: &mut S, node: NodeId) {
    if let Err(e) = scene.remove(node) {
        log::warn!("Could not remove placeholder: {}", e);
    }
}

fn miss(category: Category, name: Option<&str>, default: &str, node: &str) -> Diagnostic {
    Diagnostic::ResolutionMiss {
        category,
        name: name.map(str::to_string),
        default: default.to_string(),
        node: node.to_string(),
    }
}
