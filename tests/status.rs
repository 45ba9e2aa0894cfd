//! Tests for transient status flags, observed through tracing events.

use std::fmt;
use std::sync::{Arc, Mutex};

use prioritree::ordered::{NodeId, Tree};
use rstest::{fixture, rstest};
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::prelude::*;

/// Layer recording the `status` field of `relinked` events.
#[derive(Clone, Default)]
struct RelinkRecorder {
    /// Recorded statuses, in event order.
    statuses: Arc<Mutex<Vec<String>>>,
}

impl RelinkRecorder {
    /// Takes the statuses recorded so far.
    fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.statuses.lock().expect("lock is not poisoned"))
    }
}

/// Field visitor of a single event.
#[derive(Default)]
struct EventFields {
    /// Message.
    message: Option<String>,
    /// `status` field.
    status: Option<String>,
}

impl Visit for EventFields {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        match field.name() {
            "message" => self.message = Some(format!("{:?}", value)),
            "status" => self.status = Some(format!("{:?}", value)),
            _ => {}
        }
    }
}

impl<S: Subscriber> Layer<S> for RelinkRecorder {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut fields = EventFields::default();
        event.record(&mut fields);
        if fields.message.as_deref() != Some("relinked") {
            return;
        }
        if let Some(status) = fields.status {
            self.statuses
                .lock()
                .expect("lock is not poisoned")
                .push(status);
        }
    }
}

/// Runs the closure with the recorder as the default subscriber of this thread.
fn record<R>(recorder: &RelinkRecorder, f: impl FnOnce() -> R) -> R {
    let subscriber = tracing_subscriber::registry().with(recorder.clone());
    tracing::subscriber::with_default(subscriber, f)
}

/// Root with the children `a` (1) and `b` (0).
struct Sample {
    tree: Tree<()>,
    root: NodeId,
    a: NodeId,
    b: NodeId,
}

#[fixture]
fn sample() -> Sample {
    let mut tree = Tree::new();
    let root = tree.create_with_key(None, "root");
    let a = tree.create_with_key(None, "a");
    let b = tree.create_with_key(None, "b");
    tree.set_priority(a, 1).expect("should succeed");
    tree.set_parent(a, Some(root)).expect("should succeed");
    tree.set_parent(b, Some(root)).expect("should succeed");
    Sample { tree, root, a, b }
}

#[rstest]
fn first_attach_is_changing_parent() {
    let recorder = RelinkRecorder::default();
    let mut tree: Tree<()> = Tree::new();
    let root = tree.create_with_key(None, "root");
    let child = tree.create_with_key(None, "child");

    record(&recorder, || tree.set_parent(child, Some(root))).expect("should succeed");

    assert_eq!(recorder.take(), ["changing-parent"]);
    let status = tree.status(child).expect("node exists");
    assert!(status.is_working());
    assert!(!status.is_transient());
}

#[rstest]
fn reattach_keeps_working(mut sample: Sample) {
    let recorder = RelinkRecorder::default();

    record(&recorder, || {
        sample.tree.set_parent(sample.b, Some(sample.a))?;
        sample.tree.set_parent(sample.b, None)
    })
    .expect("should succeed");

    assert_eq!(
        recorder.take(),
        ["working+changing-parent", "working+changing-parent"]
    );
    assert!(!sample.tree.status(sample.b).expect("node exists").is_transient());
}

#[rstest]
fn resorting_priority_change_carries_both_flags(mut sample: Sample) {
    let recorder = RelinkRecorder::default();

    record(&recorder, || sample.tree.set_priority(sample.b, 5)).expect("should succeed");

    assert_eq!(
        recorder.take(),
        ["working+changing-priority+changing-parent"]
    );
    let status = sample.tree.status(sample.b).expect("node exists");
    assert!(status.is_working());
    assert!(!status.is_transient());
}

#[rstest]
fn priority_change_of_detached_node_does_not_relink() {
    let recorder = RelinkRecorder::default();
    let mut tree: Tree<()> = Tree::new();
    let lonely = tree.create_with_key(None, "lonely");

    record(&recorder, || tree.set_priority(lonely, 3)).expect("should succeed");

    assert!(recorder.take().is_empty());
    assert!(tree.status(lonely).expect("node exists").is_unavailable());
}

#[rstest]
fn destroy_relinks_every_node_while_removing(mut sample: Sample) {
    let recorder = RelinkRecorder::default();
    let grandchild = sample.tree.create_with_key(None, "grandchild");
    sample
        .tree
        .set_parent(grandchild, Some(sample.a))
        .expect("should succeed");

    record(&recorder, || sample.tree.destroy(sample.a)).expect("should succeed");

    // `grandchild` first, then `a`.
    assert_eq!(
        recorder.take(),
        [
            "working+removing+changing-parent",
            "working+removing+changing-parent",
        ]
    );
    for id in [sample.a, grandchild] {
        assert!(sample.tree.status(id).expect("node exists").is_unavailable());
    }
    assert!(sample.tree.status(sample.b).expect("node exists").is_working());
    assert_eq!(
        sample.tree.node(sample.root).expect("node exists").children_ids(),
        [sample.b]
    );
}
