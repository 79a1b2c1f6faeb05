//! Layout engine error types.
//!
//! Layout math itself never fails; these cover tree construction, attribute
//! updates and scene loading.

use thiserror::Error;

use crate::node::NodeId;

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("node {node:?} is a {expected} and cannot take a {found} component")]
    TypeMismatch {
        node: NodeId,
        expected: &'static str,
        found: &'static str,
    },

    #[error("unknown node: {0:?}")]
    UnknownNode(NodeId),

    #[error("{kind} node {parent:?} cannot take another child")]
    ChildRejected { parent: NodeId, kind: &'static str },

    #[error("node {0:?} is already attached to a parent")]
    AlreadyAttached(NodeId),

    #[error("attaching {child:?} under {parent:?} would create a cycle")]
    Cycle { parent: NodeId, child: NodeId },

    #[error("invalid scene: {0}")]
    Scene(#[from] serde_json::Error),
}
