//! In-memory scene arena.

use cabview_math::Transform;
use slotmap::SlotMap;

use crate::error::SceneError;
use crate::material::Material;
use crate::mesh::{Mesh, MeshRenderer, Prefab, PrefabNode};
use crate::{MaterialId, NodeId, SceneGraph};

/// A node in a [`Scene`].
#[derive(Debug, Clone)]
pub struct Node {
    /// Node name, as authored in the model.
    pub name: String,
    /// Local transform.
    pub transform: Transform,
    /// Mesh, if any.
    pub mesh: Option<Mesh>,
    /// Renderer, if the node draws its mesh.
    pub renderer: Option<MeshRenderer>,
    /// Shown when true.
    pub active: bool,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    fn new(name: String, parent: Option<NodeId>, transform: Transform) -> Self {
        Self {
            name,
            transform,
            mesh: None,
            renderer: None,
            active: true,
            parent,
            children: Vec::new(),
        }
    }
}

/// Scene graph stored in slot maps. Dropping the scene releases every node
/// and material it owns.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    nodes: SlotMap<NodeId, Node>,
    materials: SlotMap<MaterialId, Material>,
    roots: Vec<NodeId>,
}

impl Scene {
    /// An empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node under `parent`, or at the top level.
    pub fn add_node(
        &mut self,
        name: impl Into<String>,
        parent: Option<NodeId>,
        transform: Transform,
    ) -> Result<NodeId, SceneError> {
        if let Some(p) = parent {
            if !self.nodes.contains_key(p) {
                return Err(SceneError::UnknownNode(p));
            }
        }
        let id = self.nodes.insert(Node::new(name.into(), parent, transform));
        match parent {
            Some(p) => {
                if let Some(parent) = self.nodes.get_mut(p) {
                    parent.children.push(id);
                }
            }
            None => self.roots.push(id),
        }
        Ok(id)
    }

    /// Attach a mesh drawn with the given material slots.
    pub fn set_mesh(
        &mut self,
        node: NodeId,
        mesh: Mesh,
        materials: Vec<Option<MaterialId>>,
    ) -> Result<(), SceneError> {
        let n = self
            .nodes
            .get_mut(node)
            .ok_or(SceneError::UnknownNode(node))?;
        n.mesh = Some(mesh);
        n.renderer = Some(MeshRenderer::new(materials));
        Ok(())
    }

    /// Borrow a node.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Borrow a node mutably.
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    /// Top-level nodes.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Number of live nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of stored materials, including unreferenced ones.
    pub fn material_count(&self) -> usize {
        self.materials.len()
    }

    /// First node in depth-first order whose name equals `name` exactly.
    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.roots
            .iter()
            .flat_map(|&r| self.descendants(r))
            .find(|&n| self.name(n) == Some(name))
    }

    fn spawn(&mut self, template: &PrefabNode, parent: NodeId, transform: Transform) -> NodeId {
        let id = self.nodes.insert(Node::new(
            template.name.clone(),
            Some(parent),
            transform,
        ));
        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.push(id);
        }
        if let Some(mesh) = &template.mesh {
            let slot = template
                .material
                .as_ref()
                .map(|m| self.materials.insert(m.clone()));
            if let Some(n) = self.nodes.get_mut(id) {
                n.mesh = Some(mesh.clone());
                n.renderer = Some(MeshRenderer::new(vec![slot]));
            }
        }
        for child in &template.children {
            self.spawn(child, id, child.transform);
        }
        id
    }
}

impl SceneGraph for Scene {
    fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains_key(node)
    }

    fn name(&self, node: NodeId) -> Option<&str> {
        self.nodes.get(node).map(|n| n.name.as_str())
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node).and_then(|n| n.parent)
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.nodes
            .get(node)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    fn transform(&self, node: NodeId) -> Option<Transform> {
        self.nodes.get(node).map(|n| n.transform)
    }

    fn set_transform(&mut self, node: NodeId, transform: Transform) -> Result<(), SceneError> {
        let n = self
            .nodes
            .get_mut(node)
            .ok_or(SceneError::UnknownNode(node))?;
        n.transform = transform;
        Ok(())
    }

    fn remove(&mut self, node: NodeId) -> Result<(), SceneError> {
        let parent = match self.nodes.get(node) {
            Some(n) => n.parent,
            None => return Err(SceneError::UnknownNode(node)),
        };
        match parent {
            Some(p) => {
                if let Some(p) = self.nodes.get_mut(p) {
                    p.children.retain(|&c| c != node);
                }
            }
            None => self.roots.retain(|&r| r != node),
        }
        for n in self.descendants(node) {
            self.nodes.remove(n);
        }
        Ok(())
    }

    fn instantiate(
        &mut self,
        prefab: &Prefab,
        parent: NodeId,
        transform: Transform,
    ) -> Result<NodeId, SceneError> {
        if !self.nodes.contains_key(parent) {
            return Err(SceneError::UnknownNode(parent));
        }
        let placed = Transform::from_trs(
            transform.translation,
            transform.rotation,
            prefab.root.transform.scale,
        );
        let id = self.spawn(&prefab.root, parent, placed);
        log::debug!("Instantiated prefab '{}'", prefab.name());
        Ok(id)
    }

    fn vertex_count(&self, node: NodeId) -> usize {
        self.nodes
            .get(node)
            .and_then(|n| n.mesh.as_ref())
            .map_or(0, Mesh::num_vertices)
    }

    fn material_slots(&self, node: NodeId) -> Option<Vec<Option<MaterialId>>> {
        self.nodes
            .get(node)
            .and_then(|n| n.renderer.as_ref())
            .map(|r| r.materials.clone())
    }

    fn material(&self, id: MaterialId) -> Option<&Material> {
        self.materials.get(id)
    }

    fn add_material(&mut self, material: Material) -> MaterialId {
        self.materials.insert(material)
    }

    fn set_material(&mut self, node: NodeId, material: MaterialId) -> Result<(), SceneError> {
        if !self.materials.contains_key(material) {
            return Err(SceneError::UnknownMaterial(material));
        }
        let n = self
            .nodes
            .get_mut(node)
            .ok_or(SceneError::UnknownNode(node))?;
        let renderer = n.renderer.as_mut().ok_or(SceneError::NoRenderer(node))?;
        match renderer.materials.first_mut() {
            Some(slot) => *slot = Some(material),
            None => renderer.materials.push(Some(material)),
        }
        Ok(())
    }

    fn set_active(&mut self, node: NodeId, active: bool) -> Result<(), SceneError> {
        let n = self
            .nodes
            .get_mut(node)
            .ok_or(SceneError::UnknownNode(node))?;
        n.active = active;
        Ok(())
    }

    fn is_active(&self, node: NodeId) -> bool {
        self.nodes.get(node).is_some_and(|n| n.active)
    }
}
