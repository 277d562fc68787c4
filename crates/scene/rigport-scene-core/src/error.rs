//! Scene host error taxonomy.

use crate::ids::NodeId;
use crate::value::AttrKind;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SceneError {
    #[error("node {0:?} does not exist")]
    NodeMissing(NodeId),

    #[error("node {node:?} has no attribute '{attr}'")]
    AttrMissing { node: NodeId, attr: String },

    #[error("attribute '{attr}' on node {node:?} is {found:?}, expected {expected:?}")]
    AttrKindMismatch {
        node: NodeId,
        attr: String,
        found: AttrKind,
        expected: AttrKind,
    },

    #[error("attribute '{attr}' already exists on node {node:?}")]
    AttrExists { node: NodeId, attr: String },

    #[error("animation layer '{0}' does not exist")]
    LayerMissing(String),

    #[error("name '{0}' is already in use")]
    NameTaken(String),

    #[error("no connection from the given attribute pair")]
    ConnectionMissing,

    #[error("export rejected: {0}")]
    ExportRejected(String),
}
