//! Node.

use core::ops::ControlFlow;

use crate::ordered::hierarchy::{Neighbors, Slot};
use crate::ordered::tree::traverse::{Ancestors, Children, DepthFirstTraverse, Traverse};
use crate::ordered::tree::{fold_traverse, DebugPrint, Payload};
use crate::ordered::{NodeId, NodeStatus, Priority, Tree, TreeResult};

/// Immutable reference to a node.
///
/// This type guarantees that the node ID is present in the tree.
#[derive(Debug)]
pub struct Node<'a, T> {
    /// Tree.
    tree: &'a Tree<T>,
    /// Node ID.
    id: NodeId,
}

// Manual impls to avoid `T: Clone` bound.
impl<T> Clone for Node<'_, T> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Node<'_, T> {}

impl<'a, T> Node<'a, T> {
    /// Creates a new `Node` object.
    #[must_use]
    pub(super) fn new(tree: &'a Tree<T>, id: NodeId) -> Option<Self> {
        if !tree.contains(id) {
            return None;
        }
        Some(Self { tree, id })
    }

    /// Creates a `Node` object for a node known to exist.
    ///
    /// # Panics
    ///
    /// Panics if the node does not exist.
    #[must_use]
    pub(super) fn new_existing(tree: &'a Tree<T>, id: NodeId) -> Self {
        Self::new(tree, id).expect("[consistency] the node must be the part of the tree")
    }

    /// Returns the tree the node belongs to.
    #[inline]
    #[must_use]
    pub fn tree(&self) -> &'a Tree<T> {
        self.tree
    }

    /// Returns the node ID.
    #[inline]
    #[must_use]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Returns the slot of the node.
    #[must_use]
    fn slot(&self) -> &'a Slot<Payload<T>> {
        self.tree
            .slot(self.id)
            .expect("[validity] the node has been checked to exist")
    }

    /// Returns the neighbors of the node.
    #[must_use]
    fn neighbors(&self) -> &'a Neighbors {
        self.slot().neighbors()
    }

    /// Returns the key of the node.
    #[inline]
    #[must_use]
    pub fn key(&self) -> &'a str {
        &self.slot().data.key
    }

    /// Returns a reference to the content of the node, if available.
    #[inline]
    #[must_use]
    pub fn content(&self) -> Option<&'a T> {
        self.slot().data.content.as_ref()
    }

    /// Returns true if the node is enabled.
    #[inline]
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.slot().enabled
    }

    /// Returns the priority of the node.
    #[inline]
    #[must_use]
    pub fn priority(&self) -> Priority {
        self.slot().priority()
    }

    /// Returns the status of the node.
    #[inline]
    #[must_use]
    pub fn status(&self) -> NodeStatus {
        self.slot().status()
    }

    /// Returns the node ID of the parent.
    #[inline]
    #[must_use]
    pub fn parent_id(&self) -> Option<NodeId> {
        self.neighbors().parent()
    }

    /// Returns the node ID of the next sibling.
    #[inline]
    #[must_use]
    pub fn next_id(&self) -> Option<NodeId> {
        self.neighbors().next()
    }

    /// Returns the node ID of the previous sibling.
    #[inline]
    #[must_use]
    pub fn previous_id(&self) -> Option<NodeId> {
        self.neighbors().previous()
    }

    /// Returns the node ID of the first child.
    #[inline]
    #[must_use]
    pub fn first_child_id(&self) -> Option<NodeId> {
        self.neighbors().first_child()
    }

    /// Returns the node ID of the last child.
    #[inline]
    #[must_use]
    pub fn last_child_id(&self) -> Option<NodeId> {
        self.neighbors().last_child()
    }

    /// Returns the node IDs of the children, in descending priority order.
    #[inline]
    #[must_use]
    pub fn children_ids(&self) -> &'a [NodeId] {
        self.neighbors().children()
    }

    /// Returns true if the node has children.
    #[inline]
    #[must_use]
    pub fn has_children(&self) -> bool {
        !self.children_ids().is_empty()
    }

    /// Returns the parent node.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        self.parent_id().map(|id| Self::new_existing(self.tree, id))
    }

    /// Returns the next sibling node.
    #[must_use]
    pub fn next(&self) -> Option<Self> {
        self.next_id().map(|id| Self::new_existing(self.tree, id))
    }

    /// Returns the previous sibling node.
    #[must_use]
    pub fn previous(&self) -> Option<Self> {
        self.previous_id().map(|id| Self::new_existing(self.tree, id))
    }

    /// Returns the first child node.
    #[must_use]
    pub fn first_child(&self) -> Option<Self> {
        self.first_child_id()
            .map(|id| Self::new_existing(self.tree, id))
    }

    /// Returns the last child node.
    #[must_use]
    pub fn last_child(&self) -> Option<Self> {
        self.last_child_id()
            .map(|id| Self::new_existing(self.tree, id))
    }

    /// Returns the number of ancestors of the node.
    ///
    /// A node without parent is at depth 0.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.ancestors().count() - 1
    }

    /// Returns an iterator of the children, in descending priority order.
    #[inline]
    #[must_use]
    pub fn children(&self) -> Children<'a, T> {
        Children::with_parent(self)
    }

    /// Returns an iterator of the node and its ancestors, starting from the
    /// node itself.
    #[inline]
    #[must_use]
    pub fn ancestors(&self) -> Ancestors<'a, T> {
        Ancestors::with_start(self)
    }

    /// Returns an iterator visiting the subtree in pre-order, skipping
    /// disabled nodes.
    ///
    /// The node itself is always visited first, even if it is disabled.
    #[inline]
    #[must_use]
    pub fn traverse(&self) -> Traverse<'a, T> {
        Traverse::with_toplevel(self)
    }

    /// Returns an iterator visiting the node and its following siblings in
    /// pre-order, skipping disabled nodes.
    ///
    /// This is the order of [`map`][`Self::map`]: the subtree of the node,
    /// then each following sibling with its subtree. The walk never climbs
    /// above the node. The node itself is always visited first, even if it
    /// is disabled.
    #[inline]
    #[must_use]
    pub fn walk(&self) -> Traverse<'a, T> {
        Traverse::with_start(self)
    }

    /// Returns an iterator of depth-first traversal events of all the nodes
    /// in the subtree, including disabled ones.
    #[inline]
    #[must_use]
    pub fn depth_first_traverse(&self) -> DepthFirstTraverse<'a, T> {
        DepthFirstTraverse::with_toplevel(self)
    }

    /// Folds the nodes in the [`walk`][`Self::walk`] order.
    ///
    /// See [`Tree::map`] for details.
    pub fn map<U, F>(&self, combine: F, initial: U) -> U
    where
        F: FnMut(Node<'a, T>, U) -> ControlFlow<U, U>,
    {
        fold_traverse(self.walk(), combine, initial)
    }

    /// Returns a printable wrapper of the subtree for debugging.
    #[inline]
    #[must_use]
    pub fn debug_print(&self) -> DebugPrint<'a, T> {
        DebugPrint::new(*self)
    }
}

/// Mutable reference to a node.
///
/// This type guarantees that the node ID is present in the tree.
#[derive(Debug)]
pub struct NodeMut<'a, T> {
    /// Tree.
    tree: &'a mut Tree<T>,
    /// Node ID.
    id: NodeId,
}

impl<'a, T> NodeMut<'a, T> {
    /// Creates a new `NodeMut` object.
    #[must_use]
    pub(super) fn new(tree: &'a mut Tree<T>, id: NodeId) -> Option<Self> {
        if !tree.contains(id) {
            return None;
        }
        Some(Self { tree, id })
    }

    /// Returns the node ID.
    #[inline]
    #[must_use]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Returns an immutable proxy to the node.
    #[inline]
    #[must_use]
    pub fn as_node(&self) -> Node<'_, T> {
        Node::new_existing(self.tree, self.id)
    }

    /// Returns a reference to the content of the node, if available.
    #[inline]
    #[must_use]
    pub fn content(&self) -> Option<&T> {
        self.tree.content(self.id)
    }

    /// Returns a mutable reference to the content of the node, if available.
    #[inline]
    #[must_use]
    pub fn content_mut(&mut self) -> Option<&mut T> {
        self.tree.content_mut(self.id)
    }

    /// Replaces the content of the node and returns the old one.
    pub fn set_content(&mut self, content: Option<T>) -> Option<T> {
        self.tree
            .set_content(self.id, content)
            .expect("[validity] the node has been checked to exist")
    }

    /// Takes the content out of the node.
    #[inline]
    pub fn take_content(&mut self) -> Option<T> {
        self.set_content(None)
    }

    /// Enables or disables the node.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.tree
            .set_enabled(self.id, enabled)
            .expect("[validity] the node has been checked to exist");
    }

    /// Moves the node under the given parent, or detaches it.
    ///
    /// See [`Tree::set_parent`] for details.
    ///
    /// # Errors
    ///
    /// Same as [`Tree::set_parent`].
    #[inline]
    pub fn set_parent(&mut self, parent: Option<NodeId>) -> TreeResult<()> {
        self.tree.set_parent(self.id, parent)
    }

    /// Changes the priority of the node, and re-sorts it among its siblings.
    ///
    /// # Errors
    ///
    /// Same as [`Tree::set_priority`].
    #[inline]
    pub fn set_priority(&mut self, priority: Priority) -> TreeResult<()> {
        self.tree.set_priority(self.id, priority)
    }

    /// Creates a new node with the given key and attaches it as a child.
    ///
    /// Returns the node ID of the new child.
    pub fn create_child(&mut self, content: Option<T>, key: impl Into<String>) -> NodeId {
        let child = self.tree.create_with_key(content, key);
        self.tree
            .set_parent(child, Some(self.id))
            .expect("[consistency] a new node is independent from the parent");
        child
    }

    /// Destroys the node and all of its descendants.
    ///
    /// The node stays in the tree and can be attached again.
    ///
    /// # Errors
    ///
    /// Same as [`Tree::destroy`].
    #[inline]
    pub fn destroy(&mut self) -> TreeResult<()> {
        self.tree.destroy(self.id)
    }
}
