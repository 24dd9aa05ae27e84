//! The reusable diff pipeline.
//!
//! A [`Differ`] owns compiled templates and an optional path filter. Each
//! call introspects both values, validates their shapes, walks them, filters
//! the resulting changes and renders them. Nothing is shared between calls,
//! so one `Differ` can be built at startup and used from any thread.

use crate::diff::{compute_diff, Diff};
use crate::error::{DiffError, TemplateError};
use crate::filter::{filter_diff, FilterConfig};
use crate::introspect::to_node;
use crate::output::{Format, Renderer};
use crate::tree::Node;
use log::info;
use serde::Serialize;

#[derive(Debug, Clone, Default)]
pub struct Differ {
    renderer: Renderer,
    filter: FilterConfig,
}

impl Differ {
    /// A differ using the default templates.
    pub fn new() -> Self {
        Self::default()
    }

    /// A differ using `format`. All templates are compiled here.
    ///
    /// # Errors
    ///
    /// Returns a [`TemplateError`] if any template in `format` is malformed.
    pub fn with_format(format: &Format) -> Result<Self, TemplateError> {
        Ok(Self {
            renderer: Renderer::new(format)?,
            filter: FilterConfig::default(),
        })
    }

    pub fn with_filter(mut self, filter: FilterConfig) -> Self {
        self.filter = filter;
        self
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    /// Structured changes between two values, after filtering.
    pub fn changes<B, A>(&self, before: &B, after: &A) -> Result<Diff, DiffError>
    where
        B: Serialize + ?Sized,
        A: Serialize + ?Sized,
    {
        let before = to_node(before)?;
        let after = to_node(after)?;
        self.node_changes(&before, &after)
    }

    /// Rendered changes between two values, in traversal order.
    pub fn diff_all<B, A>(&self, before: &B, after: &A) -> Result<Vec<String>, DiffError>
    where
        B: Serialize + ?Sized,
        A: Serialize + ?Sized,
    {
        let diff = self.changes(before, after)?;
        Ok(self.renderer.render_all(&diff))
    }

    /// Like [`Differ::diff_all`], for values already lowered to nodes.
    pub fn diff_nodes(&self, before: &Node, after: &Node) -> Result<Vec<String>, DiffError> {
        let diff = self.node_changes(before, after)?;
        Ok(self.renderer.render_all(&diff))
    }

    /// Writes every rendered change to the `log` facade at info level and
    /// returns how many were written.
    pub fn log_all<B, A>(&self, before: &B, after: &A) -> Result<usize, DiffError>
    where
        B: Serialize + ?Sized,
        A: Serialize + ?Sized,
    {
        let lines = self.diff_all(before, after)?;
        for line in &lines {
            info!("{}", line);
        }
        Ok(lines.len())
    }

    fn node_changes(&self, before: &Node, after: &Node) -> Result<Diff, DiffError> {
        let diff = compute_diff(before, after)?;
        Ok(filter_diff(&diff, &self.filter))
    }
}
