//! Tree traversal.

use core::iter;
use core::slice;

use crate::ordered::hierarchy::traverse::{
    AncestorsTraverser, DepthFirstTraverser, DftEvent as DftEventSrc, PreorderTraverser, Scope,
};
use crate::ordered::tree::{Node, Tree};
use crate::ordered::NodeId;

/// Depth-first traverseal event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DftEvent<T> {
    /// Node open.
    Open(T),
    /// Node close.
    Close(T),
}

impl<T> DftEvent<T> {
    /// Converts the internal value.
    pub fn map<F, U>(self, f: F) -> DftEvent<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Self::Open(v) => DftEvent::Open(f(v)),
            Self::Close(v) => DftEvent::Close(f(v)),
        }
    }
}

/// Iterator for pre-order traversal skipping disabled nodes.
///
/// The start node is always visited, even if it is disabled. Other disabled
/// nodes are skipped together with their descendants.
///
/// Created by [`Node::traverse`] (the subtree only) or [`Node::walk`] (the
/// subtree, then the following siblings and their subtrees).
#[derive(Debug)]
pub struct Traverse<'a, T> {
    /// Tree.
    tree: &'a Tree<T>,
    /// Traverser.
    traverser: PreorderTraverser,
}

impl<'a, T> Traverse<'a, T> {
    /// Creates a new iterator over the subtree of the node.
    #[inline]
    #[must_use]
    pub(super) fn with_toplevel(node: &Node<'a, T>) -> Self {
        Self {
            tree: node.tree(),
            traverser: PreorderTraverser::new(node.id(), Scope::Subtree),
        }
    }

    /// Creates a new iterator over the node, its following siblings, and
    /// their subtrees.
    #[inline]
    #[must_use]
    pub(super) fn with_start(node: &Node<'a, T>) -> Self {
        Self {
            tree: node.tree(),
            traverser: PreorderTraverser::new(node.id(), Scope::FollowingSiblings),
        }
    }

    /// Returns the next node without advancing the iterator.
    #[must_use]
    pub fn peek(&self) -> Option<Node<'a, T>> {
        let id = self.traverser.peek()?;
        Some(Node::new_existing(self.tree, id))
    }
}

// Manual impl to avoid `T: Clone` bound.
impl<T> Clone for Traverse<'_, T> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            traverser: self.traverser.clone(),
        }
    }
}

impl<'a, T> Iterator for Traverse<'a, T> {
    type Item = Node<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.traverser.next(&self.tree.hierarchy)?;
        Some(Node::new_existing(self.tree, id))
    }
}

impl<T> iter::FusedIterator for Traverse<'_, T> {}

/// Iterator for depth-first traversal of all nodes.
#[derive(Debug)]
pub struct DepthFirstTraverse<'a, T> {
    /// Tree.
    tree: &'a Tree<T>,
    /// Traverser.
    traverser: DepthFirstTraverser,
}

impl<'a, T> DepthFirstTraverse<'a, T> {
    /// Creates a new iterator.
    #[inline]
    #[must_use]
    pub(super) fn with_toplevel(node: &Node<'a, T>) -> Self {
        Self {
            tree: node.tree(),
            traverser: DepthFirstTraverser::with_toplevel(node.id()),
        }
    }
}

// Manual impl to avoid `T: Clone` bound.
impl<T> Clone for DepthFirstTraverse<'_, T> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            traverser: self.traverser,
        }
    }
}

impl<'a, T> Iterator for DepthFirstTraverse<'a, T> {
    type Item = DftEvent<Node<'a, T>>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = |id| Node::new_existing(self.tree, id);
        Some(match self.traverser.next(&self.tree.hierarchy)? {
            DftEventSrc::Open(id) => DftEvent::Open(node(id)),
            DftEventSrc::Close(id) => DftEvent::Close(node(id)),
        })
    }
}

impl<T> iter::FusedIterator for DepthFirstTraverse<'_, T> {}

/// Ancestors iterator.
///
/// Note that this returns the starting node first.
#[derive(Debug)]
pub struct Ancestors<'a, T> {
    /// Tree.
    tree: &'a Tree<T>,
    /// Traverser.
    traverser: AncestorsTraverser,
}

impl<'a, T> Ancestors<'a, T> {
    /// Creates a new iterator.
    #[inline]
    #[must_use]
    pub(super) fn with_start(node: &Node<'a, T>) -> Self {
        Self {
            tree: node.tree(),
            traverser: AncestorsTraverser::with_start(node.id()),
        }
    }
}

impl<'a, T> Iterator for Ancestors<'a, T> {
    type Item = Node<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.traverser.next(&self.tree.hierarchy)?;
        Some(Node::new_existing(self.tree, id))
    }
}

impl<T> iter::FusedIterator for Ancestors<'_, T> {}

/// Double-ended iterator of children.
#[derive(Debug)]
pub struct Children<'a, T> {
    /// Tree.
    tree: &'a Tree<T>,
    /// Node IDs of the remaining children.
    ids: slice::Iter<'a, NodeId>,
}

impl<'a, T> Children<'a, T> {
    /// Creates a new iterator from a parent.
    #[inline]
    #[must_use]
    pub(super) fn with_parent(parent: &Node<'a, T>) -> Self {
        Self {
            tree: parent.tree(),
            ids: parent.children_ids().iter(),
        }
    }
}

impl<'a, T> Iterator for Children<'a, T> {
    type Item = Node<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = *self.ids.next()?;
        Some(Node::new_existing(self.tree, id))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.ids.size_hint()
    }
}

impl<T> DoubleEndedIterator for Children<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let id = *self.ids.next_back()?;
        Some(Node::new_existing(self.tree, id))
    }
}

impl<T> ExactSizeIterator for Children<'_, T> {}

impl<T> iter::FusedIterator for Children<'_, T> {}
