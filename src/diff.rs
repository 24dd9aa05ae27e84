//! Core structural diff algorithm.
//!
//! This module walks two [`Node`] trees in lock-step and produces one
//! [`Change`] per atomic leaf that was added, deleted or changed. Containers
//! never produce a change of their own; a record, map or sequence that exists
//! on only one side is enumerated with its own shape so that every atomic
//! descendant is reported individually.
//!
//! Traversal order is deterministic for records (declaration order) and
//! sequences (index order). Sequences are compared by position only: removing
//! an element from the middle reports the shifted tail, not a single removal.
//!
//! # Examples
//!
//! ```
//! use structdiff::{compute_diff, Node, Record};
//!
//! let before = Node::Record(Record::named("Config", vec![("Timeout".to_string(), Node::int(30))]));
//! let after = Node::Record(Record::named("Config", vec![("Timeout".to_string(), Node::int(15))]));
//!
//! let diff = compute_diff(&before, &after).unwrap();
//! assert_eq!(diff.stats.changed, 1);
//! assert_eq!(diff.changes[0].path.to_string(), ".Timeout");
//! ```

use crate::align::{align_fields, align_keys, Presence};
use crate::error::ShapeError;
use crate::path::{Path, PathSegment};
use crate::tree::{Atomic, Node};
use crate::validate::validate;
use log::{debug, trace};
use serde::Serialize;

/// The kind of change found at a leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    /// Present on both sides with different values
    Changed,
    /// Absent before, present after
    Added,
    /// Present before, absent after
    Deleted,
}

/// A single difference at an atomic leaf.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Change {
    /// Where the leaf lives, e.g. `.Mapping["yo"][0]`
    pub path: Path,
    pub kind: ChangeKind,
    /// Previous value (None for Added changes)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<Atomic>,
    /// New value (None for Deleted changes)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<Atomic>,
}

impl Change {
    pub fn changed(path: Path, before: Atomic, after: Atomic) -> Self {
        Self {
            path,
            kind: ChangeKind::Changed,
            before: Some(before),
            after: Some(after),
        }
    }

    pub fn added(path: Path, after: Atomic) -> Self {
        Self {
            path,
            kind: ChangeKind::Added,
            before: None,
            after: Some(after),
        }
    }

    pub fn deleted(path: Path, before: Atomic) -> Self {
        Self {
            path,
            kind: ChangeKind::Deleted,
            before: Some(before),
            after: None,
        }
    }
}

/// Counts of changes by kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DiffStats {
    pub changed: usize,
    pub added: usize,
    pub deleted: usize,
}

impl DiffStats {
    /// Creates a new DiffStats with all counts at zero.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_changes(changes: &[Change]) -> Self {
        let mut stats = Self::new();
        for change in changes {
            match change.kind {
                ChangeKind::Changed => stats.changed += 1,
                ChangeKind::Added => stats.added += 1,
                ChangeKind::Deleted => stats.deleted += 1,
            }
        }
        stats
    }

    pub fn total_changes(&self) -> usize {
        self.changed + self.added + self.deleted
    }

    pub fn is_empty(&self) -> bool {
        self.total_changes() == 0
    }
}

/// The complete diff result, in traversal order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Diff {
    pub changes: Vec<Change>,
    pub stats: DiffStats,
}

impl Diff {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_changes(changes: Vec<Change>) -> Self {
        let stats = DiffStats::from_changes(&changes);
        Self { changes, stats }
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}

/// Computes the structural diff between two validated container nodes.
///
/// # Errors
///
/// Returns a [`ShapeError`] when the two top-level values cannot be compared
/// (see [`crate::validate::validate`]). No traversal happens in that case.
pub fn compute_diff(before: &Node, after: &Node) -> Result<Diff, ShapeError> {
    validate(before, after)?;
    debug!(
        "Diffing {} against {}",
        describe(before),
        describe(after)
    );

    let mut walker = Walker::default();
    walker.walk(Some(before), Some(after));

    let diff = Diff::from_changes(walker.changes);
    debug!(
        "Found {} changes ({} changed, {} added, {} deleted)",
        diff.stats.total_changes(),
        diff.stats.changed,
        diff.stats.added,
        diff.stats.deleted
    );
    Ok(diff)
}

fn describe(node: &Node) -> String {
    match node.type_name() {
        Some(name) => format!("{} {}", node.shape(), name),
        None => node.shape().to_string(),
    }
}

/// Traversal state: the path stack and the changes found so far.
#[derive(Default)]
struct Walker {
    path: Path,
    changes: Vec<Change>,
}

impl Walker {
    /// Visits one node position. Either side may be missing, a `Null` counts
    /// as missing.
    fn walk(&mut self, before: Option<&Node>, after: Option<&Node>) {
        let before = before.filter(|node| !node.is_absent());
        let after = after.filter(|node| !node.is_absent());

        let layout = match (before, after) {
            (None, None) => return,
            (Some(b), Some(a)) if !b.comparable_with(a) => {
                trace!(
                    "{}: {} replaced by {}, reporting both subtrees",
                    self.path,
                    describe(b),
                    describe(a)
                );
                self.walk(Some(b), None);
                self.walk(None, Some(a));
                return;
            }
            (Some(node), _) | (None, Some(node)) => node,
        };

        match layout {
            Node::Record(_) => self.walk_record(before, after),
            Node::Map(_) => self.walk_map(before, after),
            Node::Sequence(_) => self.walk_sequence(before, after),
            Node::Atomic(_) => {
                self.leaf(before.and_then(Node::as_atomic), after.and_then(Node::as_atomic))
            }
        }
    }

    fn walk_record(&mut self, before: Option<&Node>, after: Option<&Node>) {
        let before = before.and_then(Node::as_record).map_or(&[][..], |r| r.fields.as_slice());
        let after = after.and_then(Node::as_record).map_or(&[][..], |r| r.fields.as_slice());

        for field in align_fields(before, after) {
            self.path.push(PathSegment::Field(field.name.to_string()));
            self.walk(field.before, field.after);
            self.path.pop();
        }
    }

    fn walk_map(&mut self, before: Option<&Node>, after: Option<&Node>) {
        let before = before.and_then(Node::as_map).unwrap_or_default();
        let after = after.and_then(Node::as_map).unwrap_or_default();

        for aligned in align_keys(before, after) {
            self.path.push(PathSegment::Key(aligned.key.clone()));
            // A key that comes or goes is a change even when its value is null.
            match (aligned.presence(), aligned.before, aligned.after) {
                (Presence::BeforeOnly, Some(Node::Atomic(b)), _) if b.is_null() => {
                    self.leaf(Some(b), None)
                }
                (Presence::AfterOnly, _, Some(Node::Atomic(a))) if a.is_null() => {
                    self.leaf(None, Some(a))
                }
                _ => self.walk(aligned.before, aligned.after),
            }
            self.path.pop();
        }
    }

    fn walk_sequence(&mut self, before: Option<&Node>, after: Option<&Node>) {
        let before = before.and_then(Node::as_sequence).unwrap_or_default();
        let after = after.and_then(Node::as_sequence).unwrap_or_default();
        let longest = before.len().max(after.len());

        for i in 0..longest {
            self.path.push(PathSegment::Index(i));
            self.walk(before.get(i), after.get(i));
            self.path.pop();
        }
    }

    fn leaf(&mut self, before: Option<&Atomic>, after: Option<&Atomic>) {
        let change = match (before, after) {
            (None, Some(a)) => Change::added(self.path.clone(), a.clone()),
            (Some(b), None) => Change::deleted(self.path.clone(), b.clone()),
            (Some(b), Some(a)) if !b.semantic_equals(a) => {
                Change::changed(self.path.clone(), b.clone(), a.clone())
            }
            _ => return,
        };

        trace!("{} {:?}", change.path, change.kind);
        self.changes.push(change);
    }
}
