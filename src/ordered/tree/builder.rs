//! Tree builder.

use crate::ordered::tree::Tree;
use crate::ordered::{NodeId, Priority};

/// Tree builder.
///
/// `TreeBuilder` remembers "the current node".
///
/// * [`TreeBuilder::child()`][`TreeBuilder::child`] creates a new child node
///   of the current node.
/// * [`TreeBuilder::sibling()`][`TreeBuilder::sibling`] creates a new sibling
///   of the current node.
/// * [`TreeBuilder::parent()`][`TreeBuilder::parent`] makes the parent the new current node.
///
/// Each new node becomes the current node. New nodes are attached through
/// [`Tree::set_parent`], so they are placed according to their priorities
/// (and before existing siblings of the same priority), not in the order
/// they are created.
///
/// # Examples
///
/// ```
/// use prioritree::ordered::{Tree, TreeBuilder};
///
/// let mut tree: Tree<()> = Tree::new();
/// let mut builder = TreeBuilder::new(&mut tree, "root", None);
/// builder
///     .child_with_priority("0", None, 10)
///     .child("0-0", None)
///     .parent()
///     .sibling_with_priority("1", None, 5)
///     .sibling("2", None);
///
/// // Tree:
/// //  root
/// //  |-- 0 (priority 10)
/// //  |   `-- 0-0
/// //  |-- 1 (priority 5)
/// //  `-- 2 (<-- current)
///
/// let root = builder.root_id();
/// let keys: Vec<_> = tree
///     .traverse(root)?
///     .map(|node| node.key())
///     .collect();
/// assert_eq!(keys, ["root", "0", "0-0", "1", "2"]);
/// # Ok::<_, prioritree::ordered::TreeError>(())
/// ```
#[derive(Debug)]
pub struct TreeBuilder<'a, T> {
    /// Target tree.
    tree: &'a mut Tree<T>,
    /// Node ID of the root node.
    root: NodeId,
    /// Current node.
    current: NodeId,
}

impl<'a, T> TreeBuilder<'a, T> {
    /// Creates a root node and the tree builder for the root node.
    pub fn new(tree: &'a mut Tree<T>, key: impl Into<String>, content: Option<T>) -> Self {
        let root = tree.create_with_key(content, key);
        Self {
            tree,
            root,
            current: root,
        }
    }

    /// Returns a reference to the tree.
    #[inline]
    #[must_use]
    pub fn tree(&self) -> &Tree<T> {
        self.tree
    }

    /// Returns a mutable reference to the tree.
    #[inline]
    #[must_use]
    pub fn tree_mut(&mut self) -> &mut Tree<T> {
        self.tree
    }

    /// Returns the node ID of the root node.
    #[inline]
    #[must_use]
    pub fn root_id(&self) -> NodeId {
        self.root
    }

    /// Returns the node ID of the current node.
    #[inline]
    #[must_use]
    pub fn current_id(&self) -> NodeId {
        self.current
    }

    /// Creates a node with the priority under the parent, and makes it current.
    fn attach(
        &mut self,
        parent: NodeId,
        key: impl Into<String>,
        content: Option<T>,
        priority: Priority,
    ) -> &mut Self {
        let new = self.tree.create_with_key(content, key);
        self.tree
            .set_priority(new, priority)
            .expect("[consistency] the new node must exist");
        self.tree
            .set_parent(new, Some(parent))
            .expect("[consistency] the new node is independent from the parent");
        self.current = new;
        self
    }

    /// Adds a child node of priority 0 to the current node, and changes the
    /// current node to it.
    pub fn child(&mut self, key: impl Into<String>, content: Option<T>) -> &mut Self {
        self.child_with_priority(key, content, 0)
    }

    /// Adds a child node to the current node, and changes the current node to it.
    pub fn child_with_priority(
        &mut self,
        key: impl Into<String>,
        content: Option<T>,
        priority: Priority,
    ) -> &mut Self {
        self.attach(self.current, key, content, priority)
    }

    /// Adds a sibling node of priority 0 to the current node, and changes the
    /// current node to it.
    ///
    /// # Panics
    ///
    /// Panics if the current node is the root of a tree.
    pub fn sibling(&mut self, key: impl Into<String>, content: Option<T>) -> &mut Self {
        self.sibling_with_priority(key, content, 0)
    }

    /// Adds a sibling node to the current node, and changes the current node to it.
    ///
    /// # Panics
    ///
    /// Panics if the current node is the root of a tree.
    pub fn sibling_with_priority(
        &mut self,
        key: impl Into<String>,
        content: Option<T>,
        priority: Priority,
    ) -> &mut Self {
        let parent = self
            .current_parent()
            .expect("[precondition] the current node should not be the root");
        self.attach(parent, key, content, priority)
    }

    /// Returns the parent of the current node.
    fn current_parent(&self) -> Option<NodeId> {
        self.tree
            .node(self.current)
            .expect("[consistency] nodes in the tree must exist")
            .parent_id()
    }

    /// Tries to change the current node to the parent of the current node.
    pub fn try_parent(&mut self) -> Option<&mut Self> {
        self.current = self.current_parent()?;
        Some(self)
    }

    /// Changes the current node to the parent of the current node.
    ///
    /// # Panics
    ///
    /// Panics if the current node is the root of a tree.
    pub fn parent(&mut self) -> &mut Self {
        self.current = self
            .current_parent()
            .expect("[precondition] the current node should not be the root");
        self
    }
}
