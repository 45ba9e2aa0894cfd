//! Priority-ordered hierarchy of nodes.

pub(crate) mod traverse;

use core::fmt;

use generational_arena::Arena;
use tracing::{debug, instrument, trace, warn};

use crate::ordered::hierarchy::traverse::AncestorsTraverser;
use crate::ordered::{NodeId, NodeStatus, Priority, Transition, TreeError, TreeResult};

/// Hierarchy of nodes, each associated with data of type `D`.
///
/// The hierarchy maintains the structure: parent and sibling links, ordering
/// of children by priority, enable flags, and status. It never looks into the
/// associated data.
#[derive(Debug, Clone)]
pub(crate) struct Hierarchy<D> {
    /// Node storage.
    slots: Arena<Slot<D>>,
}

impl<D> Hierarchy<D> {
    /// Creates a new detached node.
    #[instrument(level = "trace", skip(self, data))]
    pub(crate) fn create(&mut self, data: D) -> NodeId {
        let index = self.slots.insert(Slot {
            neighbors: Neighbors::default(),
            priority: 0,
            enabled: true,
            status: NodeStatus::UNAVAILABLE,
            data,
        });
        NodeId::from_index(index)
    }

    /// Returns the number of nodes (including destroyed but not removed ones).
    #[inline]
    #[must_use]
    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if the node exists in the hierarchy.
    #[inline]
    #[must_use]
    pub(crate) fn contains(&self, id: NodeId) -> bool {
        self.slots.contains(id.index())
    }

    /// Returns a reference to the slot of the node.
    #[inline]
    #[must_use]
    pub(crate) fn slot(&self, id: NodeId) -> Option<&Slot<D>> {
        self.slots.get(id.index())
    }

    /// Returns a mutable reference to the slot of the node.
    #[inline]
    #[must_use]
    pub(crate) fn slot_mut(&mut self, id: NodeId) -> Option<&mut Slot<D>> {
        self.slots.get_mut(id.index())
    }

    /// Returns the slot of the node, or an error if the node does not exist.
    fn existing_slot(&self, id: NodeId) -> TreeResult<&Slot<D>> {
        self.slot(id).ok_or(TreeError::NodeNotFound(id))
    }

    /// Returns the slot of the node, or an error if the node does not exist.
    fn existing_slot_mut(&mut self, id: NodeId) -> TreeResult<&mut Slot<D>> {
        self.slot_mut(id).ok_or(TreeError::NodeNotFound(id))
    }

    /// Returns a reference to the neighbors of the node.
    #[inline]
    #[must_use]
    pub(crate) fn neighbors(&self, id: NodeId) -> Option<&Neighbors> {
        self.slot(id).map(|slot| &slot.neighbors)
    }

    /// Returns an iterator of all the nodes in the storage order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (NodeId, &Slot<D>)> + '_ {
        self.slots
            .iter()
            .map(|(index, slot)| (NodeId::from_index(index), slot))
    }

    /// Returns true if `ancestor` is `node` itself or one of its ancestors.
    ///
    /// # Panics
    ///
    /// Panics if `node` does not exist.
    #[must_use]
    pub(crate) fn is_ancestor_or_self(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut ancestors = AncestorsTraverser::with_start(node);
        while let Some(id) = ancestors.next(self) {
            if id == ancestor {
                return true;
            }
        }
        false
    }

    /// Moves the node under the given parent, or detaches it if `parent` is `None`.
    ///
    /// The node is placed before the first child of the new parent whose
    /// priority is not greater than the node's, so children are kept in
    /// descending priority order and the node goes first among children of the
    /// same priority. Passing the current parent re-sorts the node.
    ///
    /// Nothing is modified when an error is returned.
    ///
    /// # Errors
    ///
    /// * [`TreeError::NodeNotFound`]
    ///     + In case `node` or `parent` does not exist.
    /// * [`TreeError::AncestorDescendantLoop`]
    ///     + In case `parent` is `node` itself or a descendant of `node`.
    /// * [`TreeError::NotAChild`]
    ///     + In case the current parent of `node` does not list it as a child.
    #[instrument(level = "trace", skip(self))]
    pub(crate) fn set_parent(&mut self, node: NodeId, parent: Option<NodeId>) -> TreeResult<()> {
        let old_parent = self.existing_slot(node)?.neighbors.parent;
        if let Some(parent) = parent {
            if !self.contains(parent) {
                return Err(TreeError::NodeNotFound(parent));
            }
            if self.is_ancestor_or_self(node, parent) {
                debug!(?node, ?parent, "rejected a parent change creating a loop");
                return Err(TreeError::AncestorDescendantLoop { node, parent });
            }
        }
        // Locate the node before touching any link.
        let old_position = match old_parent {
            Some(old_parent) => Some((old_parent, self.position_in_parent(node, old_parent)?)),
            None => None,
        };

        self.existing_slot_mut(node)?
            .status
            .begin(Transition::ChangingParent);

        if let Some((old_parent, index)) = old_position {
            self.unlink(node, old_parent, index);
        }
        if let Some(parent) = parent {
            self.link(node, parent);
        }

        let slot = self.existing_slot_mut(node)?;
        trace!(?node, status = %slot.status, "relinked");
        slot.status.end(Transition::ChangingParent);
        slot.status.set_working();

        Ok(())
    }

    /// Changes the priority of the node and re-sorts it among its siblings.
    ///
    /// A detached node only stores the new priority.
    ///
    /// # Errors
    ///
    /// * [`TreeError::NodeNotFound`]
    ///     + In case `node` does not exist.
    /// * [`TreeError::NotAChild`]
    ///     + In case the current parent of `node` does not list it as a child.
    #[instrument(level = "trace", skip(self))]
    pub(crate) fn set_priority(&mut self, node: NodeId, priority: Priority) -> TreeResult<()> {
        let slot = self.existing_slot_mut(node)?;
        slot.status.begin(Transition::ChangingPriority);
        slot.priority = priority;
        let parent = slot.neighbors.parent;

        let result = match parent {
            Some(parent) => self.set_parent(node, Some(parent)),
            None => Ok(()),
        };

        self.existing_slot_mut(node)?
            .status
            .end(Transition::ChangingPriority);
        result
    }

    /// Destroys the node and all of its descendants.
    ///
    /// Descendants are destroyed bottom-up, in children order. Every destroyed
    /// node is detached and becomes unavailable, but stays in the storage and
    /// can be attached again.
    ///
    /// # Errors
    ///
    /// * [`TreeError::NodeNotFound`]
    ///     + In case `node` does not exist.
    /// * [`TreeError::NotAChild`]
    ///     + In case some node in the subtree is not listed by its parent.
    #[instrument(level = "debug", skip(self))]
    pub(crate) fn destroy(&mut self, node: NodeId) -> TreeResult<()> {
        self.existing_slot_mut(node)?
            .status
            .begin(Transition::Removing);

        let mut stack = vec![node];
        while let Some(&current) = stack.last() {
            let first_child = self
                .neighbors(current)
                .expect("[consistency] nodes in the subtree being destroyed must exist")
                .first_child();
            match first_child {
                Some(child) => {
                    self.existing_slot_mut(child)?
                        .status
                        .begin(Transition::Removing);
                    stack.push(child);
                }
                None => {
                    stack.pop();
                    self.set_parent(current, None)?;
                    self.existing_slot_mut(current)?.status = NodeStatus::UNAVAILABLE;
                }
            }
        }

        Ok(())
    }

    /// Destroys the node and its descendants, and releases their storage.
    ///
    /// Returns the data associated to `node`.
    ///
    /// # Errors
    ///
    /// Same as [`destroy`][`Self::destroy`].
    #[instrument(level = "debug", skip(self))]
    pub(crate) fn remove(&mut self, node: NodeId) -> TreeResult<D> {
        let mut subtree = Vec::new();
        let mut stack = vec![node];
        while let Some(current) = stack.pop() {
            let neighbors = &self.existing_slot(current)?.neighbors;
            stack.extend(neighbors.children.iter().copied());
            subtree.push(current);
        }

        self.destroy(node)?;

        let mut removed = None;
        for id in subtree {
            let slot = self
                .slots
                .remove(id.index())
                .expect("[consistency] destroyed nodes must still be stored");
            if id == node {
                removed = Some(slot.data);
            }
        }
        debug!(?node, remaining = self.slots.len(), "released subtree");

        Ok(removed.expect("[consistency] the subtree contains its top node"))
    }

    /// Returns the index of the node in the children of the parent.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::NotAChild`] if the parent does not list the node.
    fn position_in_parent(&self, node: NodeId, parent: NodeId) -> TreeResult<usize> {
        self.existing_slot(parent)?
            .neighbors
            .children
            .iter()
            .position(|&child| child == node)
            .ok_or_else(|| {
                warn!(?node, ?parent, "node is missing from children of its parent");
                TreeError::NotAChild { node, parent }
            })
    }

    /// Removes the node at the given position from the children of the
    /// parent, and connects the siblings around the gap.
    ///
    /// ```text
    /// Before:
    ///
    ///             parent
    ///            /  |   \
    ///           /   |    \
    /// previous -> node -> next
    ///
    /// After:
    ///
    ///       parent
    ///        /  \
    ///       /    \
    /// previous -> next
    ///
    /// node
    /// ```
    fn unlink(&mut self, node: NodeId, parent: NodeId, index: usize) {
        let removed = self
            .slot_mut(parent)
            .expect("[precondition] the parent must exist")
            .neighbors
            .children
            .remove(index);
        debug_assert_eq!(removed, node, "[precondition] `index` must point to the node");

        let nbs = &mut self
            .slot_mut(node)
            .expect("[precondition] the node must exist")
            .neighbors;
        let previous = nbs.previous.take();
        let next = nbs.next.take();
        nbs.parent = None;

        if let Some(previous) = previous {
            self.slot_mut(previous)
                .expect("[consistency] the previous sibling must exist")
                .neighbors
                .next = next;
        }
        if let Some(next) = next {
            self.slot_mut(next)
                .expect("[consistency] the next sibling must exist")
                .neighbors
                .previous = previous;
        }
    }

    /// Inserts the detached node into the children of the parent, at the
    /// position determined by its priority.
    fn link(&mut self, node: NodeId, parent: NodeId) {
        let priority = self
            .slot(node)
            .expect("[precondition] the node must exist")
            .priority;
        let siblings = &self
            .neighbors(parent)
            .expect("[precondition] the parent must exist")
            .children;
        let index = siblings
            .iter()
            .position(|&sibling| {
                let sibling_priority = self
                    .slot(sibling)
                    .expect("[consistency] children of an existing node must exist")
                    .priority;
                priority >= sibling_priority
            })
            .unwrap_or(siblings.len());

        let siblings = &mut self
            .slot_mut(parent)
            .expect("[precondition] the parent must exist")
            .neighbors
            .children;
        siblings.insert(index, node);
        let previous = index.checked_sub(1).map(|i| siblings[i]);
        let next = siblings.get(index + 1).copied();

        let nbs = &mut self
            .slot_mut(node)
            .expect("[precondition] the node must exist")
            .neighbors;
        nbs.parent = Some(parent);
        nbs.previous = previous;
        nbs.next = next;

        if let Some(previous) = previous {
            self.slot_mut(previous)
                .expect("[consistency] siblings must exist")
                .neighbors
                .next = Some(node);
        }
        if let Some(next) = next {
            self.slot_mut(next)
                .expect("[consistency] siblings must exist")
                .neighbors
                .previous = Some(node);
        }
    }
}

impl<D> Default for Hierarchy<D> {
    #[inline]
    fn default() -> Self {
        Self {
            slots: Arena::new(),
        }
    }
}

/// Node slot.
#[derive(Debug, Clone)]
pub(crate) struct Slot<D> {
    /// Neighbors.
    neighbors: Neighbors,
    /// Priority among siblings.
    priority: Priority,
    /// Whether the node is visited by filtered traversals.
    pub(crate) enabled: bool,
    /// Status.
    status: NodeStatus,
    /// Associated data.
    pub(crate) data: D,
}

impl<D> Slot<D> {
    /// Returns the neighbors.
    #[inline]
    #[must_use]
    pub(crate) fn neighbors(&self) -> &Neighbors {
        &self.neighbors
    }

    /// Returns the priority.
    #[inline]
    #[must_use]
    pub(crate) fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the status.
    #[inline]
    #[must_use]
    pub(crate) fn status(&self) -> NodeStatus {
        self.status
    }
}

/// Neighbors.
#[derive(Default, Clone, PartialEq, Eq)]
pub(crate) struct Neighbors {
    /// Parent.
    parent: Option<NodeId>,
    /// Previous sibling.
    previous: Option<NodeId>,
    /// Next sibling.
    next: Option<NodeId>,
    /// Children, in descending priority order.
    children: Vec<NodeId>,
}

impl Neighbors {
    /// Returns the node ID of the parent.
    #[inline]
    #[must_use]
    pub(crate) fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Returns the node ID of the previous sibling.
    #[inline]
    #[must_use]
    pub(crate) fn previous(&self) -> Option<NodeId> {
        self.previous
    }

    /// Returns the node ID of the next sibling.
    #[inline]
    #[must_use]
    pub(crate) fn next(&self) -> Option<NodeId> {
        self.next
    }

    /// Returns the node IDs of the children.
    #[inline]
    #[must_use]
    pub(crate) fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Returns the node ID of the first child.
    #[inline]
    #[must_use]
    pub(crate) fn first_child(&self) -> Option<NodeId> {
        self.children.first().copied()
    }

    /// Returns the node ID of the last child.
    #[inline]
    #[must_use]
    pub(crate) fn last_child(&self) -> Option<NodeId> {
        self.children.last().copied()
    }
}

// For compact printing.
impl fmt::Debug for Neighbors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        /// A wrapper to print optional node ID in compact form.
        #[derive(Clone, Copy)]
        struct OptNodeId<'a>(&'a Option<NodeId>);
        impl fmt::Debug for OptNodeId<'_> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self.0 {
                    Some(id) => id.fmt(f),
                    None => f.write_str("None"),
                }
            }
        }

        f.debug_struct("Neighbors")
            .field("parent", &OptNodeId(&self.parent))
            .field("previous", &OptNodeId(&self.previous))
            .field("next", &OptNodeId(&self.next))
            .field("children", &self.children)
            .finish()
    }
}
