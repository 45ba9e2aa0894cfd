//! Trees whose children are kept ordered by priority.

mod error;
mod hierarchy;
mod id;
mod key;
mod status;
pub mod tree;

pub use self::error::{TreeError, TreeResult};
pub use self::id::NodeId;
pub use self::key::generate_key;
pub use self::status::{NodeStatus, Transition};
pub use self::tree::traverse::DftEvent;
pub use self::tree::{Node, NodeMut, Tree, TreeBuilder};

/// Node priority.
///
/// Children with higher priority come first among their siblings.
pub type Priority = i32;
