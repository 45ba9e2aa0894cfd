//! Priority-ordered mutable tree stored in an arena.
//!
//! Every node keeps its children sorted by priority (descending), and nodes
//! with the same priority are ordered so that the most recently attached one
//! comes first. Nodes can be disabled to hide them (and their subtrees) from
//! traversal, reparented, reprioritized, and destroyed together with their
//! descendants.
//!
//! # Examples
//!
//! ```
//! use core::ops::ControlFlow;
//! use prioritree::ordered::Tree;
//!
//! let mut tree = Tree::new();
//! let root = tree.create_with_key(None, "R");
//! let a = tree.create_with_key(Some(1), "A");
//! let b = tree.create_with_key(Some(2), "B");
//! let c = tree.create_with_key(Some(3), "C");
//! tree.set_priority(a, 5)?;
//! tree.set_priority(b, 5)?;
//! tree.set_priority(c, 1)?;
//! tree.set_parent(a, Some(root))?;
//! tree.set_parent(b, Some(root))?;
//! tree.set_parent(c, Some(root))?;
//!
//! let keys = tree.map(
//!     root,
//!     |node, mut acc: Vec<String>| {
//!         acc.push(node.key().to_owned());
//!         ControlFlow::Continue(acc)
//!     },
//!     Vec::new(),
//! )?;
//! assert_eq!(keys, ["R", "B", "A", "C"]);
//! # Ok::<_, prioritree::ordered::TreeError>(())
//! ```
#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

pub mod ordered;
