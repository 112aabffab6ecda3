//! Error types for scene graph operations.

use thiserror::Error;

use crate::{MaterialId, NodeId};

/// Errors from scene graph mutations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// The node does not exist, or was removed.
    #[error("Unknown scene node {0:?}")]
    UnknownNode(NodeId),

    /// The material does not exist in this scene.
    #[error("Unknown material {0:?}")]
    UnknownMaterial(MaterialId),

    /// The node has no mesh renderer to put a material on.
    #[error("Node {0:?} has no mesh renderer")]
    NoRenderer(NodeId),
}
