//! Tests for traversals, the builder, and the debug printer.

mod common;

use core::ops::ControlFlow;

use prioritree::ordered::{DftEvent, NodeId, Tree, TreeBuilder, TreeError};
use rstest::{fixture, rstest};

/// Sample tree and the ID of its root.
///
/// ```text
/// root = 0 (priority 0)
/// |-- 0 = 1 (priority 2)
/// |   |-- 0-1 = 3 (priority 0)
/// |   `-- 0-0 = 2 (priority 0)
/// |-- 1 = 4 (priority 1)
/// |   `-- 1-0 = 5 (priority 0)
/// `-- 2 = 6 (priority 0)
/// ```
struct Sample {
    tree: Tree<i32>,
    root: NodeId,
}

impl Sample {
    /// Returns the ID of the node with the key.
    fn id(&self, key: &str) -> NodeId {
        self.tree.find_by_key(key).expect("node exists")
    }

    /// Returns the keys of nodes visited by the filtered pre-order traversal.
    fn traverse_keys(&self, key: &str) -> Vec<&str> {
        self.tree
            .traverse(self.id(key))
            .expect("node exists")
            .map(|node| node.key())
            .collect()
    }
}

#[fixture]
fn sample() -> Sample {
    common::init_test_setup();
    let mut tree = Tree::new();
    let root = TreeBuilder::new(&mut tree, "root", Some(0))
        .child_with_priority("0", Some(1), 2)
        .child("0-0", Some(2))
        .sibling("0-1", Some(3))
        .parent()
        .sibling_with_priority("1", Some(4), 1)
        .child("1-0", Some(5))
        .parent()
        .sibling("2", Some(6))
        .root_id();
    Sample { tree, root }
}

const SAMPLE_PREORDER: &[&str] = &["root", "0", "0-1", "0-0", "1", "1-0", "2"];

#[rstest]
fn preorder_visits_parents_before_children(sample: Sample) {
    assert_eq!(sample.traverse_keys("root"), SAMPLE_PREORDER);

    // Same as the order nodes are opened in the depth-first traversal.
    let opened: Vec<_> = sample
        .tree
        .depth_first_traverse(sample.root)
        .expect("node exists")
        .filter_map(|ev| match ev {
            DftEvent::Open(node) => Some(node.key()),
            DftEvent::Close(_) => None,
        })
        .collect();
    assert_eq!(opened, SAMPLE_PREORDER);
}

#[rstest]
#[case("0", false, &["root", "1", "1-0", "2"])]
#[case("1-0", false, &["root", "0", "0-1", "0-0", "1", "2"])]
#[case("0-1", false, &["root", "0", "0-0", "1", "1-0", "2"])]
#[case("2", false, &["root", "0", "0-1", "0-0", "1", "1-0"])]
#[case("root", false, SAMPLE_PREORDER)]
#[case("0", true, SAMPLE_PREORDER)]
fn disabled_subtrees_are_skipped(
    mut sample: Sample,
    #[case] key: &str,
    #[case] enabled: bool,
    #[case] expected: &[&str],
) {
    let id = sample.id(key);
    sample.tree.set_enabled(id, enabled).expect("should succeed");

    assert_eq!(sample.traverse_keys("root"), expected);
}

#[rstest]
fn disabled_toplevel_is_visited(mut sample: Sample) {
    let zero = sample.id("0");
    sample.tree.set_enabled(zero, false).expect("should succeed");

    assert_eq!(sample.traverse_keys("0"), ["0", "0-1", "0-0"]);
}

#[rstest]
#[case("1", &["1", "1-0"])]
#[case("0-1", &["0-1"])]
#[case("0-0", &["0-0"])]
#[case("2", &["2"])]
fn traversal_stays_inside_the_subtree(sample: Sample, #[case] key: &str, #[case] expected: &[&str]) {
    assert_eq!(sample.traverse_keys(key), expected);
}

#[rstest]
fn cancelled_map_stops_at_the_visit(sample: Sample, #[values(1, 2, 3, 4, 5, 6, 7)] k: usize) {
    let visited = sample
        .tree
        .map(
            sample.root,
            |node, mut acc: Vec<String>| {
                acc.push(node.key().to_owned());
                if acc.len() == k {
                    ControlFlow::Break(acc)
                } else {
                    ControlFlow::Continue(acc)
                }
            },
            Vec::new(),
        )
        .expect("node exists");

    assert_eq!(visited, &SAMPLE_PREORDER[..k]);
}

#[rstest]
fn map_folds_contents(mut sample: Sample) {
    let sum = |sample: &Sample, key| {
        sample
            .tree
            .map(
                sample.id(key),
                |node, acc| ControlFlow::Continue(acc + node.content().copied().unwrap_or(0)),
                0,
            )
            .expect("node exists")
    };
    assert_eq!(sum(&sample, "root"), 21);
    // `0`, `0-1`, `0-0`, then the following siblings `1`, `1-0`, and `2`.
    assert_eq!(sum(&sample, "0"), 21);
    assert_eq!(sum(&sample, "0-1"), 5);
    assert_eq!(sum(&sample, "1"), 15);

    let one = sample.id("1");
    sample.tree.set_enabled(one, false).expect("should succeed");
    assert_eq!(sum(&sample, "root"), 12);
    assert_eq!(sum(&sample, "0"), 12);
    // Starting from the disabled node itself.
    assert_eq!(sum(&sample, "1"), 15);
}

/// Returns the keys of nodes visited by the walk used by `map`.
fn walk_keys<'a>(sample: &'a Sample, key: &str) -> Vec<&'a str> {
    sample
        .tree
        .walk(sample.id(key))
        .expect("node exists")
        .map(|node| node.key())
        .collect()
}

#[rstest]
#[case("root", SAMPLE_PREORDER)]
#[case("0", &["0", "0-1", "0-0", "1", "1-0", "2"])]
#[case("0-1", &["0-1", "0-0"])]
#[case("0-0", &["0-0"])]
#[case("1", &["1", "1-0", "2"])]
#[case("2", &["2"])]
fn walk_continues_to_following_siblings(
    sample: Sample,
    #[case] key: &str,
    #[case] expected: &[&str],
) {
    assert_eq!(walk_keys(&sample, key), expected);
}

#[rstest]
fn walk_skips_disabled_following_siblings(mut sample: Sample) {
    let one = sample.id("1");
    sample.tree.set_enabled(one, false).expect("should succeed");

    assert_eq!(walk_keys(&sample, "0"), ["0", "0-1", "0-0", "2"]);
    // The start node is visited even if disabled.
    assert_eq!(walk_keys(&sample, "1"), ["1", "1-0", "2"]);
}

#[rstest]
fn map_from_a_child_visits_the_following_siblings(sample: Sample) {
    let keys = sample
        .tree
        .map(
            sample.id("1"),
            |node, mut acc: Vec<String>| {
                acc.push(node.key().to_owned());
                ControlFlow::Continue(acc)
            },
            Vec::new(),
        )
        .expect("node exists");

    assert_eq!(keys, ["1", "1-0", "2"]);
}

#[rstest]
fn depth_first_traverse_ignores_enable_flags(mut sample: Sample) {
    let zero = sample.id("0");
    sample.tree.set_enabled(zero, false).expect("should succeed");

    let events: Vec<_> = sample
        .tree
        .depth_first_traverse(zero)
        .expect("node exists")
        .map(|ev| ev.map(|node| node.key()))
        .collect();
    assert_eq!(
        events,
        [
            DftEvent::Open("0"),
            DftEvent::Open("0-1"),
            DftEvent::Close("0-1"),
            DftEvent::Open("0-0"),
            DftEvent::Close("0-0"),
            DftEvent::Close("0"),
        ]
    );
}

#[rstest]
fn children_iterate_in_both_directions(sample: Sample) {
    let root = sample.tree.node(sample.root).expect("node exists");

    let forward: Vec<_> = root.children().map(|node| node.key()).collect();
    assert_eq!(forward, ["0", "1", "2"]);
    let backward: Vec<_> = root.children().rev().map(|node| node.key()).collect();
    assert_eq!(backward, ["2", "1", "0"]);
    assert_eq!(root.children().len(), 3);
}

#[rstest]
fn traverse_can_peek(sample: Sample) {
    let mut iter = sample.tree.traverse(sample.root).expect("node exists");
    assert_eq!(iter.peek().map(|node| node.key()), Some("root"));
    assert_eq!(iter.next().map(|node| node.key()), Some("root"));
    assert_eq!(iter.peek().map(|node| node.key()), Some("0"));
    assert_eq!(iter.count(), SAMPLE_PREORDER.len() - 1);
}

#[rstest]
fn depth_counts_ancestors(sample: Sample) {
    let depth = |key| sample.tree.node(sample.id(key)).expect("node exists").depth();
    assert_eq!(depth("root"), 0);
    assert_eq!(depth("1"), 1);
    assert_eq!(depth("0-1"), 2);
}

#[rstest]
fn builder_tracks_the_current_node() {
    common::init_test_setup();
    let mut tree: Tree<()> = Tree::new();
    let mut builder = TreeBuilder::new(&mut tree, "root", None);
    let root = builder.root_id();
    assert_eq!(builder.current_id(), root);
    assert!(builder.try_parent().is_none());

    builder.child("child", None);
    let child = builder.current_id();
    assert_ne!(child, root);
    assert_eq!(
        builder.tree().node(child).expect("node exists").parent_id(),
        Some(root)
    );

    assert!(builder.try_parent().is_some());
    assert_eq!(builder.current_id(), root);
    builder
        .tree_mut()
        .set_enabled(child, false)
        .expect("should succeed");
    assert!(!tree.node(child).expect("node exists").is_enabled());
}

#[rstest]
#[should_panic(expected = "should not be the root")]
fn builder_panics_on_root_sibling() {
    let mut tree: Tree<()> = Tree::new();
    TreeBuilder::new(&mut tree, "root", None).sibling("sibling", None);
}

#[rstest]
fn debug_print_shows_every_node(mut sample: Sample) {
    let one = sample.id("1");
    sample.tree.set_enabled(one, false).expect("should succeed");

    let expected = "\
root = 0 (priority 0)
|-- 0 = 1 (priority 2)
|   |-- 0-1 = 3 (priority 0)
|   `-- 0-0 = 2 (priority 0)
|-- 1 = 4 (priority 1, disabled)
|   `-- 1-0 = 5 (priority 0)
`-- 2 = 6 (priority 0)";
    let printed = sample.tree.debug_print(sample.root).expect("node exists");
    assert_eq!(printed.to_string(), expected);
    assert_eq!(format!("{:?}", printed), expected);
}

#[rstest]
fn debug_print_pads_below_last_children() {
    common::init_test_setup();
    let mut tree: Tree<()> = Tree::new();
    let root = TreeBuilder::new(&mut tree, "root", None)
        .child("a", None)
        .child("a-0", None)
        .sibling("a-1", None)
        .child("a-1-0", None)
        .root_id();

    let expected = "\
root (priority 0)
`-- a (priority 0)
    |-- a-1 (priority 0)
    |   `-- a-1-0 (priority 0)
    `-- a-0 (priority 0)";
    // `()` is not `Display`, and no node has content anyway.
    assert_eq!(
        format!("{:?}", tree.debug_print(root).expect("node exists")),
        expected
    );
}

#[rstest]
fn debug_print_of_a_subtree(sample: Sample) {
    let printed = sample
        .tree
        .debug_print(sample.id("1"))
        .expect("node exists")
        .to_string();
    assert_eq!(printed, "1 = 4 (priority 1)\n`-- 1-0 = 5 (priority 0)");
}

#[rstest]
fn traversals_of_missing_nodes_fail(mut sample: Sample) {
    let two = sample.id("2");
    sample.tree.remove(two).expect("should succeed");

    assert_eq!(
        sample.tree.traverse(two).err(),
        Some(TreeError::NodeNotFound(two))
    );
    assert_eq!(
        sample
            .tree
            .map(two, |_, acc| ControlFlow::Continue(acc), ())
            .err(),
        Some(TreeError::NodeNotFound(two))
    );
    assert!(sample.tree.debug_print(two).is_err());
    assert!(sample.tree.depth_first_traverse(two).is_err());
}
