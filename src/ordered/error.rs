//! Tree errors.

use thiserror::Error;

use crate::ordered::NodeId;

/// Errors of tree operations.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeError {
    /// The node has been removed, or the ID belongs to another tree.
    #[error("node {0:?} does not exist in the tree")]
    NodeNotFound(NodeId),

    /// Attempt to make a node the ancestor of itself.
    #[error("attempt to make node {node:?} an ancestor of itself via parent {parent:?}")]
    AncestorDescendantLoop {
        /// Node being moved.
        node: NodeId,
        /// Requested parent.
        parent: NodeId,
    },

    /// The node refers to a parent that does not list it as a child.
    #[error("node {node:?} is not among the children of its parent {parent:?}")]
    NotAChild {
        /// Node being detached.
        node: NodeId,
        /// Parent recorded by the node.
        parent: NodeId,
    },
}

/// Result type of tree operations.
pub type TreeResult<T> = Result<T, TreeError>;
