//! Rendering change records as text.
//!
//! Each [`Change`] is rendered with the template bound to its kind. Template
//! sets are described by a [`Format`]; kinds it leaves out use the defaults:
//!
//! | kind    | default template                           |
//! |---------|--------------------------------------------|
//! | changed | `{Name} changed from {Before} to {After}`  |
//! | added   | `{Name} added {After}`                     |
//! | deleted | `{Name} deleted {Before}`                  |
//!
//! String values render quoted, everything else in its default form.
//!
//! # Examples
//!
//! ```
//! use structdiff::{compute_diff, Format, Node, Renderer};
//!
//! let before = Node::Sequence(vec![Node::int(1), Node::int(2), Node::int(3)]);
//! let after = Node::Sequence(vec![Node::int(1), Node::int(2)]);
//! let diff = compute_diff(&before, &after).unwrap();
//!
//! let renderer = Renderer::new(&Format::default()).unwrap();
//! assert_eq!(renderer.render_all(&diff), vec!["[2] deleted 3"]);
//! ```

use crate::diff::{Change, ChangeKind, Diff, DiffStats};
use crate::error::TemplateError;
use crate::template::{Piece, Placeholder, Template, Values};
use serde::Deserialize;

pub const DEFAULT_CHANGED: &str = "{Name} changed from {Before} to {After}";
pub const DEFAULT_ADDED: &str = "{Name} added {After}";
pub const DEFAULT_DELETED: &str = "{Name} deleted {Before}";

/// Template text per change kind. `None` selects the default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Format {
    pub changed: Option<String>,
    pub added: Option<String>,
    pub deleted: Option<String>,
}

impl Format {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn changed(mut self, template: impl Into<String>) -> Self {
        self.changed = Some(template.into());
        self
    }

    pub fn added(mut self, template: impl Into<String>) -> Self {
        self.added = Some(template.into());
        self
    }

    pub fn deleted(mut self, template: impl Into<String>) -> Self {
        self.deleted = Some(template.into());
        self
    }

    /// The template text in effect for a kind.
    pub fn template_for(&self, kind: ChangeKind) -> &str {
        match kind {
            ChangeKind::Changed => self.changed.as_deref().unwrap_or(DEFAULT_CHANGED),
            ChangeKind::Added => self.added.as_deref().unwrap_or(DEFAULT_ADDED),
            ChangeKind::Deleted => self.deleted.as_deref().unwrap_or(DEFAULT_DELETED),
        }
    }
}

/// Compiled templates for all three change kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Renderer {
    changed: Template,
    added: Template,
    deleted: Template,
}

impl Renderer {
    /// Compiles every template of `format` up front, so a malformed template
    /// fails before any diffing is done.
    pub fn new(format: &Format) -> Result<Self, TemplateError> {
        Ok(Self {
            changed: Template::parse(format.template_for(ChangeKind::Changed))?,
            added: Template::parse(format.template_for(ChangeKind::Added))?,
            deleted: Template::parse(format.template_for(ChangeKind::Deleted))?,
        })
    }

    pub fn template(&self, kind: ChangeKind) -> &Template {
        match kind {
            ChangeKind::Changed => &self.changed,
            ChangeKind::Added => &self.added,
            ChangeKind::Deleted => &self.deleted,
        }
    }

    pub fn render(&self, change: &Change) -> String {
        let name = change.path.to_string();
        let before = change.before.as_ref().map(ToString::to_string);
        let after = change.after.as_ref().map(ToString::to_string);

        self.template(change.kind).render(&Values {
            name: &name,
            before: before.as_deref(),
            after: after.as_deref(),
        })
    }

    /// Renders every change of a diff, preserving order.
    pub fn render_all(&self, diff: &Diff) -> Vec<String> {
        diff.changes.iter().map(|change| self.render(change)).collect()
    }
}

/// The default templates, assembled without parsing.
impl Default for Renderer {
    fn default() -> Self {
        let text = |s: &str| Piece::Literal(s.to_string());
        let name = Piece::Placeholder(Placeholder::Name);
        let before = Piece::Placeholder(Placeholder::Before);
        let after = Piece::Placeholder(Placeholder::After);

        Self {
            changed: Template::from_pieces(
                DEFAULT_CHANGED,
                vec![
                    name.clone(),
                    text(" changed from "),
                    before.clone(),
                    text(" to "),
                    after.clone(),
                ],
            ),
            added: Template::from_pieces(DEFAULT_ADDED, vec![name.clone(), text(" added "), after]),
            deleted: Template::from_pieces(DEFAULT_DELETED, vec![name, text(" deleted "), before]),
        }
    }
}

/// Formats summary statistics, e.g. `Summary: 1 changed, 2 added`.
pub fn format_summary(stats: &DiffStats) -> String {
    if stats.is_empty() {
        return "Summary: No changes".to_string();
    }

    let mut parts = Vec::new();
    if stats.changed > 0 {
        parts.push(format!("{} changed", stats.changed));
    }
    if stats.added > 0 {
        parts.push(format!("{} added", stats.added));
    }
    if stats.deleted > 0 {
        parts.push(format!("{} deleted", stats.deleted));
    }

    format!("Summary: {}", parts.join(", "))
}
