//! Triangle meshes, renderers and prefab templates.

use cabview_math::Transform;

use crate::material::Material;
use crate::MaterialId;

/// Triangle mesh data attached to a node.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Mesh {
    /// Flat array of vertex positions: `[x0, y0, z0, x1, y1, z1, ...]`.
    pub vertices: Vec<f32>,
    /// Flat array of triangle indices: `[i0, i1, i2, ...]`.
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Create a mesh from flat positions and indices.
    pub fn new(vertices: Vec<f32>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    /// Number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Number of triangles.
    pub fn num_triangles(&self) -> usize {
        self.indices.len() / 3
    }

    /// Merge another mesh into this one.
    pub fn merge(&mut self, other: &Mesh) {
        let offset = self.num_vertices() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.indices
            .extend(other.indices.iter().map(|&i| i + offset));
    }

    /// A single quad of size `w` x `h` in the XY plane, facing +Z.
    pub fn quad(w: f32, h: f32) -> Self {
        let (x, y) = (w / 2.0, h / 2.0);
        Self::new(
            vec![-x, -y, 0.0, x, -y, 0.0, x, y, 0.0, -x, y, 0.0],
            vec![0, 1, 2, 0, 2, 3],
        )
    }

    /// An axis-aligned box centered at the origin, 24 vertices (flat faces).
    pub fn cuboid(sx: f32, sy: f32, sz: f32) -> Self {
        let (x, y, z) = (sx / 2.0, sy / 2.0, sz / 2.0);
        // Four corners per face, counter-clockwise seen from outside.
        let faces: [[[f32; 3]; 4]; 6] = [
            [[-x, -y, z], [x, -y, z], [x, y, z], [-x, y, z]],
            [[x, -y, -z], [-x, -y, -z], [-x, y, -z], [x, y, -z]],
            [[x, -y, z], [x, -y, -z], [x, y, -z], [x, y, z]],
            [[-x, -y, -z], [-x, -y, z], [-x, y, z], [-x, y, -z]],
            [[-x, y, z], [x, y, z], [x, y, -z], [-x, y, -z]],
            [[-x, -y, -z], [x, -y, -z], [x, -y, z], [-x, -y, z]],
        ];
        let mut mesh = Mesh::default();
        for face in faces {
            let base = mesh.num_vertices() as u32;
            for corner in face {
                mesh.vertices.extend_from_slice(&corner);
            }
            mesh.indices
                .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }
        mesh
    }
}

/// Draws a node's mesh. One material slot per submesh; a slot may be empty.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MeshRenderer {
    /// Material per slot.
    pub materials: Vec<Option<MaterialId>>,
}

impl MeshRenderer {
    /// A renderer with the given slots.
    pub fn new(materials: Vec<Option<MaterialId>>) -> Self {
        Self { materials }
    }
}

/// One node of a prefab template.
#[derive(Debug, Clone, PartialEq)]
pub struct PrefabNode {
    /// Node name.
    pub name: String,
    /// Local transform.
    pub transform: Transform,
    /// Mesh, if the node draws something.
    pub mesh: Option<Mesh>,
    /// Material for the renderer. Ignored without a mesh.
    pub material: Option<Material>,
    /// Child nodes.
    pub children: Vec<PrefabNode>,
}

impl PrefabNode {
    /// An empty grouping node.
    pub fn group(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transform: Transform::identity(),
            mesh: None,
            material: None,
            children: Vec::new(),
        }
    }

    /// A node drawing `mesh` with `material`.
    pub fn mesh(name: impl Into<String>, mesh: Mesh, material: Material) -> Self {
        Self {
            mesh: Some(mesh),
            material: Some(material),
            ..Self::group(name)
        }
    }

    /// Builder: add a child.
    pub fn with_child(mut self, child: PrefabNode) -> Self {
        self.children.push(child);
        self
    }

    /// Builder: set the local transform.
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Vertices in this node and below.
    pub fn vertex_count(&self) -> usize {
        self.mesh.as_ref().map_or(0, Mesh::num_vertices)
            + self
                .children
                .iter()
                .map(PrefabNode::vertex_count)
                .sum::<usize>()
    }
}

/// A reusable subtree that can be instantiated into a scene, such as a coin
/// slot or a screen variant.
#[derive(Debug, Clone, PartialEq)]
pub struct Prefab {
    /// Root of the template.
    pub root: PrefabNode,
}

impl Prefab {
    /// Wrap a template root.
    pub fn new(root: PrefabNode) -> Self {
        Self { root }
    }

    /// The root node's name.
    pub fn name(&self) -> &str {
        &self.root.name
    }

    /// Total vertices in the template.
    pub fn vertex_count(&self) -> usize {
        self.root.vertex_count()
    }
}
