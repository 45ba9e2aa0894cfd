//! Node status.

use core::fmt;

/// Mutation in progress on a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transition {
    /// The node and its subtree are being destroyed.
    Removing,
    /// The priority is being changed.
    ChangingPriority,
    /// The node is being moved to another place.
    ChangingParent,
}

/// Status of a node.
///
/// A node is unavailable before it is attached for the first time and after
/// it is destroyed. Otherwise it is working, possibly with transitions of the
/// mutation in progress.
///
/// This is purely diagnostic state. It is not a lock, and transitions are only
/// observable from inside a mutation (for example in `tracing` events).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeStatus {
    /// Whether the node has been attached and not destroyed since.
    working: bool,
    /// Removal in progress.
    removing: bool,
    /// Priority change in progress.
    changing_priority: bool,
    /// Parent change in progress.
    changing_parent: bool,
}

impl NodeStatus {
    /// Status of a node that is not part of any hierarchy yet, or destroyed.
    pub const UNAVAILABLE: Self = Self {
        working: false,
        removing: false,
        changing_priority: false,
        changing_parent: false,
    };

    /// Returns true if no flag is set.
    #[inline]
    #[must_use]
    pub fn is_unavailable(self) -> bool {
        self == Self::UNAVAILABLE
    }

    /// Returns true if the node has been attached and not destroyed since.
    #[inline]
    #[must_use]
    pub fn is_working(self) -> bool {
        self.working
    }

    /// Returns true if the given transition is in progress.
    #[must_use]
    pub fn is_in(self, transition: Transition) -> bool {
        match transition {
            Transition::Removing => self.removing,
            Transition::ChangingPriority => self.changing_priority,
            Transition::ChangingParent => self.changing_parent,
        }
    }

    /// Returns true if any transition is in progress.
    #[inline]
    #[must_use]
    pub fn is_transient(self) -> bool {
        self.removing || self.changing_priority || self.changing_parent
    }

    /// Marks the transition as started.
    pub(crate) fn begin(&mut self, transition: Transition) {
        *self.flag_mut(transition) = true;
    }

    /// Marks the transition as finished.
    pub(crate) fn end(&mut self, transition: Transition) {
        *self.flag_mut(transition) = false;
    }

    /// Marks the node as working.
    pub(crate) fn set_working(&mut self) {
        self.working = true;
    }

    /// Returns the flag for the transition.
    fn flag_mut(&mut self, transition: Transition) -> &mut bool {
        match transition {
            Transition::Removing => &mut self.removing,
            Transition::ChangingPriority => &mut self.changing_priority,
            Transition::ChangingParent => &mut self.changing_parent,
        }
    }
}

impl fmt::Display for NodeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unavailable() {
            return f.write_str("unavailable");
        }
        let flags = [
            (self.working, "working"),
            (self.removing, "removing"),
            (self.changing_priority, "changing-priority"),
            (self.changing_parent, "changing-parent"),
        ];
        let mut first = true;
        for name in flags.iter().filter(|(set, _)| *set).map(|(_, name)| name) {
            if !first {
                f.write_str("+")?;
            }
            f.write_str(name)?;
            first = false;
        }
        Ok(())
    }
}
