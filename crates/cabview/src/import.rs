//! glTF model import into an in-memory [`Scene`].

use std::collections::HashMap;

use cabview_math::{quat_from_xyzw, Rgba, Transform, Vec3};
use cabview_scene::{param, Material, MaterialId, Mesh, NodeId, Scene, SceneGraph};

use crate::error::LoadError;

/// Prefix of the synthetic root node that holds the imported model.
pub const ROOT_PREFIX: &str = "Cab: ";

/// Import a glTF or GLB model.
///
/// The nodes of the default scene (or the first one) become children of a
/// new root named `Cab: <cab_name>`. Node names and local transforms are
/// kept. Every node with a mesh gets one material slot per primitive,
/// filled with the file's own materials.
pub fn import_glb(bytes: &[u8], cab_name: &str) -> Result<(Scene, NodeId), LoadError> {
    let (document, buffers, _) = gltf::import_slice(bytes)?;

    let mut scene = Scene::new();
    let root = scene.add_node(
        format!("{}{}", ROOT_PREFIX, cab_name),
        None,
        Transform::identity(),
    )?;

    let mut importer = Importer {
        buffers: &buffers,
        materials: HashMap::new(),
        scene: &mut scene,
    };
    match document.default_scene().or_else(|| document.scenes().next()) {
        Some(gltf_scene) => {
            for node in gltf_scene.nodes() {
                importer.node(&node, root)?;
            }
        }
        None => log::warn!("Model for '{}' has no scene", cab_name),
    }

    log::info!(
        "Imported model for '{}': {} nodes, {} materials, {} vertices",
        cab_name,
        scene.node_count() - 1,
        scene.material_count(),
        scene.subtree_vertex_count(root)
    );
    Ok((scene, root))
}

struct Importer<'a> {
    buffers: &'a [gltf::buffer::Data],
    // glTF material index (None = default material) to scene material.
    materials: HashMap<Option<usize>, MaterialId>,
    scene: &'a mut Scene,
}

impl Importer<'_> {
    fn node(&mut self, node: &gltf::Node<'_>, parent: NodeId) -> Result<(), LoadError> {
        let (t, r, s) = node.transform().decomposed();
        let transform = Transform::from_trs(
            Vec3::new(t[0], t[1], t[2]),
            quat_from_xyzw(r),
            Vec3::new(s[0], s[1], s[2]),
        );
        let name = node
            .name()
            .map(str::to_string)
            .unwrap_or_else(|| format!("node{}", node.index()));
        let id = self.scene.add_node(name, Some(parent), transform)?;

        if let Some(mesh) = node.mesh() {
            let mut merged = Mesh::default();
            let mut slots = Vec::new();
            for primitive in mesh.primitives() {
                merged.merge(&self.primitive(&primitive));
                slots.push(Some(self.material(&primitive.material())));
            }
            self.scene.set_mesh(id, merged, slots)?;
        }

        for child in node.children() {
            self.node(&child, id)?;
        }
        Ok(())
    }

    fn primitive(&self, primitive: &gltf::Primitive<'_>) -> Mesh {
        let reader = primitive.reader(|buffer| Some(&self.buffers[buffer.index()].0[..]));
        let vertices: Vec<f32> = reader
            .read_positions()
            .map(|iter| iter.flatten().collect())
            .unwrap_or_default();
        let count = (vertices.len() / 3) as u32;
        let indices = reader
            .read_indices()
            .map(|iter| iter.into_u32().collect())
            .unwrap_or_else(|| (0..count).collect());
        Mesh::new(vertices, indices)
    }

    fn material(&mut self, material: &gltf::Material<'_>) -> MaterialId {
        if let Some(&id) = self.materials.get(&material.index()) {
            return id;
        }
        let id = self.scene.add_material(convert_material(material));
        self.materials.insert(material.index(), id);
        id
    }
}

fn convert_material(material: &gltf::Material<'_>) -> Material {
    let pbr = material.pbr_metallic_roughness();
    let [r, g, b, a] = pbr.base_color_factor();
    let mut converted = Material::new(material.name().unwrap_or("default"))
        .with_color(param::BASE_COLOR, Rgba::new(r, g, b, a))
        .with_float(param::METALLIC, pbr.metallic_factor())
        .with_float(param::SMOOTHNESS, 1.0 - pbr.roughness_factor());
    let [er, eg, eb] = material.emissive_factor();
    if er > 0.0 || eg > 0.0 || eb > 0.0 {
        converted.set_color(param::EMISSION_COLOR, Rgba::new(er, eg, eb, 1.0));
    }
    converted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn imports_nodes_under_named_root() {
        let glb = fixtures::glb(&["Left", "coin-slot", "joystick"]);
        let (scene, root) = import_glb(&glb, "Galaga").unwrap();

        assert_eq!(scene.name(root), Some("Cab: Galaga"));
        let names: Vec<_> = scene
            .children(root)
            .into_iter()
            .map(|c| scene.name(c).unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["Left", "coin-slot", "joystick"]);

        let second = scene.children(root)[1];
        let t = scene.transform(second).unwrap();
        assert!((t.translation.x - 1.0).abs() < 1e-6);
        assert_eq!(scene.vertex_count(second), 3);
        assert_eq!(scene.subtree_vertex_count(root), 9);
    }

    #[test]
    fn materials_are_converted_and_shared() {
        let glb = fixtures::glb(&["a", "b"]);
        let (scene, root) = import_glb(&glb, "t").unwrap();
        let children = scene.children(root);
        let slots_a = scene.material_slots(children[0]).unwrap();
        let slots_b = scene.material_slots(children[1]).unwrap();
        assert_eq!(slots_a.len(), 1);
        assert_eq!(slots_a, slots_b);
        assert_eq!(scene.material_count(), 1);

        let material = scene.material(slots_a[0].unwrap()).unwrap();
        assert_eq!(material.name, "wood");
        assert!((material.float(param::METALLIC).unwrap() - 0.25).abs() < 1e-6);
        assert!((material.float(param::SMOOTHNESS).unwrap() - 0.5).abs() < 1e-6);
        assert!(material.color(param::EMISSION_COLOR).is_none());
    }

    #[test]
    fn garbage_is_a_gltf_error() {
        assert!(matches!(
            import_glb(b"definitely not gltf", "x"),
            Err(LoadError::Gltf(_))
        ));
    }
}
