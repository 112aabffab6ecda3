//! Runtime link between parts and scene nodes.

use std::collections::BTreeMap;

use cabview_ir::{name_key, PartType};
use cabview_scene::{NodeId, SceneError, SceneGraph};

/// A part that found its node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundPart {
    /// The first node carrying the part.
    pub node: NodeId,
    /// The part's type.
    pub kind: PartType,
    /// Later nodes with the same name, styled the same way.
    pub others: Vec<NodeId>,
}

impl BoundPart {
    /// Every node carrying the part, first one first.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::once(self.node).chain(self.others.iter().copied())
    }
}

/// Node per bound part, keyed by normalized part name.
///
/// Only meaningful against the scene it was produced from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Binding {
    parts: BTreeMap<String, BoundPart>,
}

impl Binding {
    /// No parts bound.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a part's node. The first record for a name stays the primary
    /// node and keeps its kind; later nodes are appended to
    /// [`BoundPart::others`]. Returns true for a new part.
    pub fn insert(&mut self, part_name: &str, node: NodeId, kind: PartType) -> bool {
        let key = name_key(part_name);
        if let Some(bound) = self.parts.get_mut(&key) {
            if bound.node != node && !bound.others.contains(&node) {
                bound.others.push(node);
            }
            return false;
        }
        self.parts.insert(
            key,
            BoundPart {
                node,
                kind,
                others: Vec::new(),
            },
        );
        true
    }

    /// The first node bound to a part.
    pub fn node_for(&self, part_name: &str) -> Option<NodeId> {
        self.get(part_name).map(|b| b.node)
    }

    /// The full record for a part.
    pub fn get(&self, part_name: &str) -> Option<&BoundPart> {
        self.parts.get(&name_key(part_name))
    }

    /// Number of bound parts.
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// True when nothing bound.
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Bound parts, sorted by normalized name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BoundPart)> {
        self.parts.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Show or hide every node of every blocker part, same-named duplicates
    /// included. `None` flips each one; `Some(v)` forces them all to `v`.
    /// Returns how many nodes were touched; nodes no longer in the scene are
    /// skipped.
    pub fn toggle_blockers<S: SceneGraph + ?Sized>(
        &self,
        scene: &mut S,
        force: Option<bool>,
    ) -> Result<usize, SceneError> {
        let mut touched = 0;
        for bound in self.parts.values().filter(|b| b.kind == PartType::Blocker) {
            for node in bound.nodes() {
                if !scene.contains(node) {
                    continue;
                }
                let active = force.unwrap_or(!scene.is_active(node));
                scene.set_active(node, active)?;
                touched += 1;
            }
        }
        Ok(touched)
    }
}
