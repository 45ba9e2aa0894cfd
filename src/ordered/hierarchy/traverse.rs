//! Tree traversal.

use crate::ordered::hierarchy::Hierarchy;
use crate::ordered::NodeId;

/// Depth-first traverseal event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DftEvent {
    /// Node open.
    Open(NodeId),
    /// Node close.
    Close(NodeId),
}

/// Depth-first tree traverser emitting open and close events of all nodes.
///
/// Enable flags of the nodes are not taken into account.
#[derive(Debug, Clone, Copy)]
pub(crate) struct DepthFirstTraverser {
    /// Toplevel node.
    toplevel: NodeId,
    /// Next event to emit.
    next: Option<DftEvent>,
}

impl DepthFirstTraverser {
    /// Creates a traverser from a toplevel node.
    ///
    /// The toplevel does not need to be the root of a tree.
    #[must_use]
    pub(crate) fn with_toplevel(id: NodeId) -> Self {
        Self {
            toplevel: id,
            next: Some(DftEvent::Open(id)),
        }
    }

    /// Traverses the tree forward and returns the next node event.
    pub(crate) fn next<D>(&mut self, hier: &Hierarchy<D>) -> Option<DftEvent> {
        let next = self.next?;
        self.next = self.next_of_next(hier, next);
        Some(next)
    }

    /// Returns the event following the given one.
    fn next_of_next<D>(&self, hier: &Hierarchy<D>, next: DftEvent) -> Option<DftEvent> {
        match next {
            DftEvent::Open(id) => {
                // Dive into the first child if available, or leave the node.
                let neighbors = hier
                    .neighbors(id)
                    .expect("[consistency] the node being traversed must exist");
                Some(match neighbors.first_child() {
                    Some(first_child) => DftEvent::Open(first_child),
                    None => DftEvent::Close(id),
                })
            }
            DftEvent::Close(id) if id == self.toplevel => None,
            DftEvent::Close(id) => {
                // Dive into the next sibling if available, or leave the parent.
                let neighbors = hier
                    .neighbors(id)
                    .expect("[consistency] the node being traversed must exist");
                Some(match neighbors.next() {
                    Some(next_sibling) => DftEvent::Open(next_sibling),
                    None => {
                        let parent = neighbors.parent().expect(
                            "[consistency] parent node must exist since the node is not the toplevel",
                        );
                        DftEvent::Close(parent)
                    }
                })
            }
        }
    }
}

/// Range of nodes covered by a pre-order walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Scope {
    /// The start node and its descendants.
    Subtree,
    /// The start node, its following siblings, and their descendants.
    FollowingSiblings,
}

/// Pre-order traverser skipping disabled nodes.
///
/// The start node is always emitted. Any other disabled node is skipped
/// together with its whole subtree. Nodes above the start node (and, with
/// [`Scope::Subtree`], siblings of the start node) are never emitted.
///
/// The traverser keeps the ancestors of the current node on an explicit stack
/// and never recurses.
#[derive(Debug, Clone)]
pub(crate) struct PreorderTraverser {
    /// Start node.
    start: NodeId,
    /// Range of the walk.
    scope: Scope,
    /// Next node to emit.
    next: Option<NodeId>,
    /// Ancestors of `next`, up to the start node.
    ancestors: Vec<NodeId>,
}

impl PreorderTraverser {
    /// Creates a traverser from a start node.
    #[must_use]
    pub(crate) fn new(start: NodeId, scope: Scope) -> Self {
        Self {
            start,
            scope,
            next: Some(start),
            ancestors: Vec::new(),
        }
    }

    /// Returns true if the walk ends when it leaves the given node.
    fn stops_at(&self, id: NodeId) -> bool {
        self.scope == Scope::Subtree && id == self.start
    }

    /// Returns the next node without advancing the traverser.
    #[inline]
    #[must_use]
    pub(crate) fn peek(&self) -> Option<NodeId> {
        self.next
    }

    /// Traverses the tree and returns the next node.
    pub(crate) fn next<D>(&mut self, hier: &Hierarchy<D>) -> Option<NodeId> {
        let next = self.next?;
        self.next = self.successor(hier, next);
        Some(next)
    }

    /// Finds the node to be emitted after `current`.
    fn successor<D>(&mut self, hier: &Hierarchy<D>, current: NodeId) -> Option<NodeId> {
        let neighbors = hier
            .neighbors(current)
            .expect("[consistency] the node being traversed must exist");
        let mut candidate = match neighbors.first_child() {
            Some(first_child) => {
                self.ancestors.push(current);
                Some(first_child)
            }
            None if self.stops_at(current) => None,
            None => neighbors.next(),
        };

        loop {
            // Skip disabled siblings.
            while let Some(id) = candidate {
                let slot = hier
                    .slot(id)
                    .expect("[consistency] the node being traversed must exist");
                if slot.enabled {
                    return Some(id);
                }
                candidate = slot.neighbors().next();
            }
            // The sibling run is exhausted. Resume from the next sibling of
            // the nearest ancestor. The stack never holds the parent of the
            // start node, so the walk never climbs above it.
            let ancestor = self.ancestors.pop()?;
            if self.stops_at(ancestor) {
                return None;
            }
            candidate = hier
                .neighbors(ancestor)
                .expect("[consistency] ancestors of the node being traversed must exist")
                .next();
        }
    }
}

/// Ancestors traverser.
///
/// Note that this returns the starting node first.
#[derive(Debug, Clone, Copy)]
pub(crate) struct AncestorsTraverser {
    /// Next node to emit.
    next: Option<NodeId>,
}

impl AncestorsTraverser {
    /// Creates a traverser from the node.
    #[inline]
    #[must_use]
    pub(crate) fn with_start(id: NodeId) -> Self {
        Self { next: Some(id) }
    }

    /// Traverses to the parent and returns the current node.
    pub(crate) fn next<D>(&mut self, hier: &Hierarchy<D>) -> Option<NodeId> {
        let next = self.next?;
        self.next = hier
            .neighbors(next)
            .expect("[consistency] the node being traversed must exist")
            .parent();

        Some(next)
    }
}
