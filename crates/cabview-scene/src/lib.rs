#![warn(missing_docs)]

//! Scene graph seam for the cabview cabinet viewer.
//!
//! The binder never talks to a renderer directly. It works through the
//! [`SceneGraph`] trait: named nodes in a hierarchy, local transforms,
//! optional mesh renderers with material slots, and prefab instantiation.
//! [`Scene`] is the in-memory arena implementation used by the loader, the
//! CLI and the tests.

mod error;
mod material;
mod mesh;
mod scene;

use cabview_math::Transform;
use slotmap::new_key_type;

pub use error::SceneError;
pub use material::{param, Material, MaterialParam, Texture};
pub use mesh::{Mesh, MeshRenderer, Prefab, PrefabNode};
pub use scene::{Node, Scene};

new_key_type! {
    /// Handle to a node in a scene.
    pub struct NodeId;
    /// Handle to a material owned by a scene.
    pub struct MaterialId;
}

/// Operations the binder needs from a scene graph.
///
/// Node handles stay valid until the node (or an ancestor) is removed.
/// Lookups on a stale handle return `None` / empty values; mutations return
/// [`SceneError::UnknownNode`].
pub trait SceneGraph {
    /// Whether `node` exists.
    fn contains(&self, node: NodeId) -> bool;

    /// The node's name.
    fn name(&self, node: NodeId) -> Option<&str>;

    /// The node's parent, `None` for top-level nodes.
    fn parent(&self, node: NodeId) -> Option<NodeId>;

    /// Direct children, in order.
    fn children(&self, node: NodeId) -> Vec<NodeId>;

    /// Local transform.
    fn transform(&self, node: NodeId) -> Option<Transform>;

    /// Replace the local transform.
    fn set_transform(&mut self, node: NodeId, transform: Transform) -> Result<(), SceneError>;

    /// Remove a node and its whole subtree.
    fn remove(&mut self, node: NodeId) -> Result<(), SceneError>;

    /// Instantiate `prefab` under `parent`.
    ///
    /// The instance root takes the translation and rotation of `transform`
    /// and keeps the prefab root's own scale.
    fn instantiate(
        &mut self,
        prefab: &Prefab,
        parent: NodeId,
        transform: Transform,
    ) -> Result<NodeId, SceneError>;

    /// Vertices of the node's own mesh, 0 without one.
    fn vertex_count(&self, node: NodeId) -> usize;

    /// Material slots of the node's renderer; `None` without a renderer.
    fn material_slots(&self, node: NodeId) -> Option<Vec<Option<MaterialId>>>;

    /// Look up a material.
    fn material(&self, id: MaterialId) -> Option<&Material>;

    /// Store a material and return its handle.
    fn add_material(&mut self, material: Material) -> MaterialId;

    /// Put `material` in the first slot of the node's renderer.
    fn set_material(&mut self, node: NodeId, material: MaterialId) -> Result<(), SceneError>;

    /// Show or hide a node.
    fn set_active(&mut self, node: NodeId, active: bool) -> Result<(), SceneError>;

    /// Whether the node is shown.
    fn is_active(&self, node: NodeId) -> bool;

    /// Whether the node has a mesh renderer.
    fn has_renderer(&self, node: NodeId) -> bool {
        self.material_slots(node).is_some()
    }

    /// The material in the first renderer slot.
    fn primary_material(&self, node: NodeId) -> Option<MaterialId> {
        self.material_slots(node)
            .and_then(|slots| slots.first().copied().flatten())
    }

    /// `node` followed by all of its descendants, depth first.
    fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        if !self.contains(node) {
            return out;
        }
        let mut stack = vec![node];
        while let Some(n) = stack.pop() {
            out.push(n);
            let children = self.children(n);
            stack.extend(children.into_iter().rev());
        }
        out
    }

    /// Vertices of every mesh in the subtree of `node`.
    fn subtree_vertex_count(&self, node: NodeId) -> usize {
        self.descendants(node)
            .into_iter()
            .map(|n| self.vertex_count(n))
            .sum()
    }

    /// Distinct materials referenced by renderers in the subtree of `node`,
    /// in first-seen order.
    fn subtree_materials(&self, node: NodeId) -> Vec<MaterialId> {
        let mut seen = Vec::new();
        for n in self.descendants(node) {
            for id in self.material_slots(n).into_iter().flatten().flatten() {
                if !seen.contains(&id) {
                    seen.push(id);
                }
            }
        }
        seen
    }
}
