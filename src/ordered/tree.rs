//! Tree.

mod builder;
mod debug_print;
mod node;
pub mod traverse;

use core::fmt;
use core::ops::ControlFlow;

use tracing::{debug, instrument, trace};

use crate::ordered::hierarchy::{Hierarchy, Slot};
use crate::ordered::{generate_key, NodeId, NodeStatus, Priority, TreeError, TreeResult};

pub use self::builder::TreeBuilder;
pub use self::debug_print::DebugPrint;
pub use self::node::{Node, NodeMut};
use self::traverse::{DepthFirstTraverse, Traverse};

/// Data associated to a node.
#[derive(Debug, Clone)]
pub(crate) struct Payload<T> {
    /// Key.
    key: String,
    /// Content.
    content: Option<T>,
}

/// Priority-ordered tree.
///
/// Strictly speaking this is a forest: it can hold any number of detached
/// nodes and trees at once. Nodes are addressed by [`NodeId`].
///
/// Mutation needs `&mut Tree`, so the tree cannot be modified while it is
/// being traversed.
#[derive(Clone)]
pub struct Tree<T> {
    /// Hierarchy.
    hierarchy: Hierarchy<Payload<T>>,
    /// Key generator used for nodes created without explicit keys.
    key_generator: fn() -> String,
}

impl<T> Tree<T> {
    /// Creates a new empty tree.
    ///
    /// Nodes created without explicit keys get [`generate_key`]d ones.
    ///
    /// # Examples
    ///
    /// ```
    /// use prioritree::ordered::Tree;
    ///
    /// let mut tree = Tree::new();
    ///
    /// let id = tree.create(Some(42));
    /// assert_eq!(tree.content(id).copied(), Some(42));
    /// ```
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_key_generator(generate_key)
    }

    /// Creates a new empty tree with the given key generator.
    ///
    /// # Examples
    ///
    /// ```
    /// use prioritree::ordered::Tree;
    ///
    /// let mut tree: Tree<()> = Tree::with_key_generator(|| "fixed".to_owned());
    ///
    /// let id = tree.create(None);
    /// assert_eq!(tree.node(id).map(|node| node.key()), Some("fixed"));
    /// ```
    #[must_use]
    pub fn with_key_generator(key_generator: fn() -> String) -> Self {
        Self {
            hierarchy: Hierarchy::default(),
            key_generator,
        }
    }

    /// Returns the number of nodes in the tree.
    ///
    /// Destroyed nodes are counted until they are [`remove`][`Self::remove`]d.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.hierarchy.len()
    }

    /// Returns true if the tree has no nodes.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if the node exists in the tree.
    #[inline]
    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.hierarchy.contains(id)
    }

    /// Creates a new detached node with a generated key.
    ///
    /// # Examples
    ///
    /// ```
    /// use prioritree::ordered::Tree;
    ///
    /// let mut tree = Tree::new();
    /// let id = tree.create(Some("content"));
    ///
    /// let node = tree.node(id).expect("should never fail: node exists");
    /// assert!(node.parent_id().is_none());
    /// assert!(node.status().is_unavailable());
    /// assert_eq!(node.priority(), 0);
    /// assert!(node.is_enabled());
    /// ```
    pub fn create(&mut self, content: Option<T>) -> NodeId {
        let key = (self.key_generator)();
        self.create_with_key(content, key)
    }

    /// Creates a new detached node with the given key.
    ///
    /// Keys are not checked for uniqueness.
    pub fn create_with_key(&mut self, content: Option<T>, key: impl Into<String>) -> NodeId {
        let key = key.into();
        trace!(%key, "creating a node");
        self.hierarchy.create(Payload { key, content })
    }

    /// Returns a [proxy object][`Node`] to the node.
    #[inline]
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<Node<'_, T>> {
        Node::new(self, id)
    }

    /// Returns a [proxy object][`NodeMut`] to the mutable node.
    #[inline]
    #[must_use]
    pub fn node_mut(&mut self, id: NodeId) -> Option<NodeMut<'_, T>> {
        NodeMut::new(self, id)
    }

    /// Returns a reference to the slot of the node.
    fn slot(&self, id: NodeId) -> TreeResult<&Slot<Payload<T>>> {
        self.hierarchy.slot(id).ok_or(TreeError::NodeNotFound(id))
    }

    /// Returns a mutable reference to the slot of the node.
    fn slot_mut(&mut self, id: NodeId) -> TreeResult<&mut Slot<Payload<T>>> {
        self.hierarchy
            .slot_mut(id)
            .ok_or(TreeError::NodeNotFound(id))
    }

    /// Returns a reference to the content of the node.
    ///
    /// Returns `None` if the node does not exist or has no content.
    #[must_use]
    pub fn content(&self, id: NodeId) -> Option<&T> {
        self.hierarchy
            .slot(id)
            .and_then(|slot| slot.data.content.as_ref())
    }

    /// Returns a mutable reference to the content of the node.
    ///
    /// Returns `None` if the node does not exist or has no content.
    #[must_use]
    pub fn content_mut(&mut self, id: NodeId) -> Option<&mut T> {
        self.hierarchy
            .slot_mut(id)
            .and_then(|slot| slot.data.content.as_mut())
    }

    /// Replaces the content of the node and returns the old one.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::NodeNotFound`] if the node does not exist.
    pub fn set_content(&mut self, id: NodeId, content: Option<T>) -> TreeResult<Option<T>> {
        let slot = self.slot_mut(id)?;
        Ok(core::mem::replace(&mut slot.data.content, content))
    }

    /// Enables or disables the node.
    ///
    /// Disabled nodes and their descendants are skipped by [`map`][`Self::map`]
    /// and [`traverse`][`Self::traverse`] (unless the node is where the
    /// traversal starts).
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::NodeNotFound`] if the node does not exist.
    #[instrument(level = "trace", skip(self))]
    pub fn set_enabled(&mut self, id: NodeId, enabled: bool) -> TreeResult<()> {
        self.slot_mut(id)?.enabled = enabled;
        Ok(())
    }

    /// Moves the node under the given parent, or detaches it if `parent` is
    /// `None`.
    ///
    /// The node is placed among the children of the new parent according to
    /// its priority. If some siblings have the same priority, the node is
    /// placed before them.
    /// Passing the current parent is allowed and re-sorts the node.
    ///
    /// The tree is not modified when an error is returned.
    ///
    /// # Errors
    ///
    /// * [`TreeError::NodeNotFound`]
    ///     + In case `node` or `parent` does not exist.
    /// * [`TreeError::AncestorDescendantLoop`]
    ///     + In case `parent` is `node` itself or one of its descendants.
    /// * [`TreeError::NotAChild`]
    ///     + In case the tree is inconsistent and the current parent does not
    ///       list the node among its children.
    ///
    /// # Examples
    ///
    /// ```
    /// use prioritree::ordered::Tree;
    ///
    /// let mut tree: Tree<()> = Tree::new();
    /// let root = tree.create_with_key(None, "root");
    /// let low = tree.create_with_key(None, "low");
    /// let high = tree.create_with_key(None, "high");
    /// tree.set_priority(high, 10)?;
    ///
    /// tree.set_parent(low, Some(root))?;
    /// tree.set_parent(high, Some(root))?;
    ///
    /// let keys: Vec<_> = tree
    ///     .node(root)
    ///     .expect("should never fail: node exists")
    ///     .children()
    ///     .map(|child| child.key())
    ///     .collect();
    /// assert_eq!(keys, ["high", "low"]);
    /// # Ok::<_, prioritree::ordered::TreeError>(())
    /// ```
    #[inline]
    pub fn set_parent(&mut self, id: NodeId, parent: Option<NodeId>) -> TreeResult<()> {
        self.hierarchy.set_parent(id, parent)
    }

    /// Changes the priority of the node, and re-sorts it among its siblings.
    ///
    /// # Errors
    ///
    /// * [`TreeError::NodeNotFound`]
    ///     + In case the node does not exist.
    /// * [`TreeError::NotAChild`]
    ///     + In case the tree is inconsistent and the current parent does not
    ///       list the node among its children.
    #[inline]
    pub fn set_priority(&mut self, id: NodeId, priority: Priority) -> TreeResult<()> {
        self.hierarchy.set_priority(id, priority)
    }

    /// Destroys the node and all of its descendants.
    ///
    /// Every destroyed node is detached and becomes
    /// [unavailable][`NodeStatus::is_unavailable`]. Destroyed nodes keep their
    /// keys and contents and can be attached again. Destroying an already
    /// destroyed node does nothing.
    ///
    /// # Errors
    ///
    /// * [`TreeError::NodeNotFound`]
    ///     + In case the node does not exist.
    /// * [`TreeError::NotAChild`]
    ///     + In case the tree is inconsistent.
    #[inline]
    pub fn destroy(&mut self, id: NodeId) -> TreeResult<()> {
        self.hierarchy.destroy(id)
    }

    /// Destroys the node and all of its descendants, and releases them from
    /// the tree.
    ///
    /// Returns the content of the node. Node IDs of the released nodes become
    /// invalid.
    ///
    /// # Errors
    ///
    /// Same as [`destroy`][`Self::destroy`].
    ///
    /// # Examples
    ///
    /// ```
    /// use prioritree::ordered::{Tree, TreeError};
    ///
    /// let mut tree = Tree::new();
    /// let root = tree.create(Some("root"));
    /// let child = tree.create(Some("child"));
    /// tree.set_parent(child, Some(root))?;
    ///
    /// assert_eq!(tree.remove(root)?, Some("root"));
    /// assert!(tree.is_empty());
    /// assert_eq!(tree.destroy(child), Err(TreeError::NodeNotFound(child)));
    /// # Ok::<_, TreeError>(())
    /// ```
    pub fn remove(&mut self, id: NodeId) -> TreeResult<Option<T>> {
        self.hierarchy
            .remove(id)
            .map(|payload| payload.content)
    }

    /// Returns the first node found with the given key.
    ///
    /// Nodes are searched in the storage order, not in the tree order.
    #[must_use]
    pub fn find_by_key(&self, key: &str) -> Option<NodeId> {
        self.hierarchy
            .iter()
            .find(|(_, slot)| slot.data.key == key)
            .map(|(id, _)| id)
    }

    /// Returns the status of the node.
    #[must_use]
    pub fn status(&self, id: NodeId) -> Option<NodeStatus> {
        self.hierarchy.slot(id).map(|slot| slot.status())
    }

    /// Returns an iterator visiting the subtree in pre-order, skipping
    /// disabled nodes.
    ///
    /// The node `id` is always visited first, even if it is disabled.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::NodeNotFound`] if the node does not exist.
    pub fn traverse(&self, id: NodeId) -> TreeResult<Traverse<'_, T>> {
        let node = self.node(id).ok_or(TreeError::NodeNotFound(id))?;
        Ok(node.traverse())
    }

    /// Returns an iterator visiting the node and its following siblings in
    /// pre-order, skipping disabled nodes.
    ///
    /// This is the order [`map`][`Self::map`] folds in. See [`Node::walk`].
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::NodeNotFound`] if the node does not exist.
    pub fn walk(&self, id: NodeId) -> TreeResult<Traverse<'_, T>> {
        let node = self.node(id).ok_or(TreeError::NodeNotFound(id))?;
        Ok(node.walk())
    }

    /// Returns an iterator of depth-first traversal events of all the nodes
    /// in the subtree, including disabled ones.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::NodeNotFound`] if the node does not exist.
    pub fn depth_first_traverse(&self, id: NodeId) -> TreeResult<DepthFirstTraverse<'_, T>> {
        let node = self.node(id).ok_or(TreeError::NodeNotFound(id))?;
        Ok(node.depth_first_traverse())
    }

    /// Folds the node, its descendants, and its following siblings with
    /// their descendants in pre-order, skipping disabled nodes.
    ///
    /// The walk starts at `id`, visits its subtree, then moves on to each
    /// following sibling of `id` and its subtree. It never climbs above `id`,
    /// so for a node without parent this is exactly its subtree.
    ///
    /// `combine` receives each visited node and the accumulated value, and
    /// returns [`ControlFlow::Continue`] with the new accumulated value, or
    /// [`ControlFlow::Break`] to stop the traversal at once. In the latter
    /// case the value carried by `Break` is returned.
    ///
    /// The node `id` is always visited first, even if it is disabled.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::NodeNotFound`] if the node does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use core::ops::ControlFlow;
    /// use prioritree::ordered::Tree;
    ///
    /// let mut tree = Tree::new();
    /// let root = tree.create(Some(1));
    /// for value in [2, 3, 4] {
    ///     let child = tree.create(Some(value));
    ///     tree.set_parent(child, Some(root))?;
    /// }
    ///
    /// // Children are 4, 3, 2 (the newest first). Stop when the sum exceeds 6.
    /// let sum = tree.map(
    ///     root,
    ///     |node, acc| {
    ///         let acc = acc + node.content().copied().unwrap_or(0);
    ///         if acc > 6 {
    ///             ControlFlow::Break(acc)
    ///         } else {
    ///             ControlFlow::Continue(acc)
    ///         }
    ///     },
    ///     0,
    /// )?;
    /// assert_eq!(sum, 8);
    ///
    /// // Starting at `3` visits `3` and its following sibling `2`.
    /// let three = tree
    ///     .node(root)
    ///     .expect("should never fail: node exists")
    ///     .children_ids()[1];
    /// let rest = tree.map(
    ///     three,
    ///     |node, acc| ControlFlow::Continue(acc + node.content().copied().unwrap_or(0)),
    ///     0,
    /// )?;
    /// assert_eq!(rest, 5);
    /// # Ok::<_, prioritree::ordered::TreeError>(())
    /// ```
    pub fn map<U, F>(&self, id: NodeId, combine: F, initial: U) -> TreeResult<U>
    where
        F: FnMut(Node<'_, T>, U) -> ControlFlow<U, U>,
    {
        let node = self.node(id).ok_or(TreeError::NodeNotFound(id))?;
        Ok(node.map(combine, initial))
    }

    /// Returns a printable wrapper of the subtree for debugging.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::NodeNotFound`] if the node does not exist.
    pub fn debug_print(&self, id: NodeId) -> TreeResult<DebugPrint<'_, T>> {
        let node = self.node(id).ok_or(TreeError::NodeNotFound(id))?;
        Ok(node.debug_print())
    }
}

/// Folds the nodes from the pre-order traversal.
///
/// Stops at the first `Break`.
pub(crate) fn fold_traverse<'a, T, U, F>(nodes: Traverse<'a, T>, mut combine: F, initial: U) -> U
where
    F: FnMut(Node<'a, T>, U) -> ControlFlow<U, U>,
{
    let mut acc = initial;
    for node in nodes {
        let id = node.id();
        acc = match combine(node, acc) {
            ControlFlow::Continue(acc) => acc,
            ControlFlow::Break(acc) => {
                debug!(?id, "traversal cancelled");
                return acc;
            }
        };
    }
    acc
}

impl<T> Default for Tree<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for Tree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree")
            .field("hierarchy", &self.hierarchy)
            .finish_non_exhaustive()
    }
}
