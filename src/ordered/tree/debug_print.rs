//! Debug printer.

use core::fmt;

use crate::ordered::tree::traverse::DftEvent;
use crate::ordered::tree::Node;

/// Tree printer for debugging.
///
/// Every node of the subtree is printed on its own line, disabled ones
/// included: the key, the content (if any), the priority, and a `disabled`
/// marker for disabled nodes. Contents are expected to fit in a single line.
///
/// This is provided mainly for debugging purpose. Note that the output format
/// is not guaranteed to be stable, and any format changes won't be considered
/// as breaking changes.
///
/// # Examples
///
/// ```
/// use prioritree::ordered::{Tree, TreeBuilder};
///
/// let mut tree = Tree::new();
/// let root = TreeBuilder::new(&mut tree, "root", None)
///     .child_with_priority("low", Some(1), -1)
///     .sibling("plain", None)
///     .child("leaf", Some(2))
///     .root_id();
/// let plain = tree.find_by_key("plain").expect("should never fail: node exists");
/// tree.set_enabled(plain, false)?;
///
/// let expected = "\
/// root (priority 0)
/// |-- plain (priority 0, disabled)
/// |   `-- leaf = 2 (priority 0)
/// `-- low = 1 (priority -1)";
/// assert_eq!(tree.debug_print(root)?.to_string(), expected);
/// # Ok::<_, prioritree::ordered::TreeError>(())
/// ```
pub struct DebugPrint<'a, T> {
    /// Root node of the (sub)tree to print.
    node: Node<'a, T>,
}

impl<'a, T> DebugPrint<'a, T> {
    /// Creates a new `DebugPrint` object for the node.
    pub(crate) fn new(node: Node<'a, T>) -> Self {
        Self { node }
    }

    /// Writes the whole subtree, printing contents with `write_content`.
    fn write_tree<F>(&self, f: &mut fmt::Formatter<'_>, mut write_content: F) -> fmt::Result
    where
        F: FnMut(&mut fmt::Formatter<'_>, &T) -> fmt::Result,
    {
        // Whether the node at each depth (below the root) has a next sibling.
        let mut has_next: Vec<bool> = Vec::new();
        let mut is_root = true;

        for ev in self.node.depth_first_traverse() {
            let node = match ev {
                DftEvent::Open(node) => node,
                DftEvent::Close(_) => {
                    has_next.pop();
                    continue;
                }
            };
            if is_root {
                is_root = false;
            } else {
                f.write_str("\n")?;
                for &more in &has_next {
                    f.write_str(if more { "|   " } else { "    " })?;
                }
                let more = node.next_id().is_some();
                f.write_str(if more { "|-- " } else { "`-- " })?;
                has_next.push(more);
            }
            write_line(f, node, &mut write_content)?;
        }

        Ok(())
    }
}

/// Writes the description of a single node.
fn write_line<T, F>(
    f: &mut fmt::Formatter<'_>,
    node: Node<'_, T>,
    write_content: &mut F,
) -> fmt::Result
where
    F: FnMut(&mut fmt::Formatter<'_>, &T) -> fmt::Result,
{
    f.write_str(node.key())?;
    if let Some(content) = node.content() {
        f.write_str(" = ")?;
        write_content(f, content)?;
    }
    write!(f, " (priority {}", node.priority())?;
    if !node.is_enabled() {
        f.write_str(", disabled")?;
    }
    f.write_str(")")
}

impl<T: fmt::Display> fmt::Display for DebugPrint<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_tree(f, |f, content| fmt::Display::fmt(content, f))
    }
}

impl<T: fmt::Debug> fmt::Debug for DebugPrint<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_tree(f, |f, content| fmt::Debug::fmt(content, f))
    }
}
