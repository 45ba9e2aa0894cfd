//! Node ID.

use core::fmt;

use generational_arena::Index;

/// Node ID.
///
/// A handle to a node slot in a [`Tree`][`crate::ordered::Tree`].
/// The handle carries a generation, so an ID of a node released by
/// [`Tree::remove`][`crate::ordered::Tree::remove`] never refers to a node
/// created later in the same slot.
///
/// The ordering (`PartialOrd` and `Ord`) for node IDs is only provided for
/// use with containers who want ordered key types (such as `BTreeSet`).
/// It is **not** guaranteed that the ordering has some relation to the order
/// the nodes are created.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(Index);

impl NodeId {
    /// Returns the arena index.
    #[inline]
    #[must_use]
    pub(crate) const fn index(self) -> Index {
        self.0
    }

    /// Creates a node ID from the arena index.
    #[inline]
    #[must_use]
    pub(crate) const fn from_index(index: Index) -> Self {
        Self(index)
    }
}

// Prevent `{:#?}` from printing the value in redundant lines.
impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (slot, generation) = self.0.into_raw_parts();
        write!(f, "NodeId({}v{})", slot, generation)
    }
}
