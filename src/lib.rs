//! structdiff - structural diffs of nested values, rendered for logging.
//!
//! Two values of the same shape (structs, maps, sequences, and any nesting of
//! them) are compared leaf by leaf. Every atomic value that was changed, added
//! or deleted becomes one human-readable line, addressed by its path:
//!
//! ```text
//! .Debug changed from true to false
//! .Mapping["yo"][0] added "hi"
//! [2] deleted 3
//! ```
//!
//! Any `T: serde::Serialize` can be diffed; see [`introspect`] for how values
//! are mapped to records, maps, sequences and atomics.
//!
//! # Example
//!
//! ```
//! use serde::Serialize;
//! use structdiff::{diff_all, diff_all_formatted, Format};
//!
//! #[derive(Serialize)]
//! struct Config {
//!     debug: bool,
//!     version: String,
//!     timeout: u32,
//! }
//!
//! let old = Config { debug: true, version: "0.0.0".into(), timeout: 30 };
//! let new = Config { debug: false, version: "0.0.1".into(), timeout: 15 };
//!
//! let lines = diff_all(&old, &new).unwrap();
//! assert_eq!(lines, vec![
//!     ".debug changed from true to false",
//!     ".version changed from \"0.0.0\" to \"0.0.1\"",
//!     ".timeout changed from 30 to 15",
//! ]);
//!
//! let format = Format::new().changed("{Name}: {After}");
//! let lines = diff_all_formatted(&format, &old, &new).unwrap();
//! assert_eq!(lines[2], ".timeout: 15");
//! ```

pub mod align;
pub mod diff;
pub mod differ;
pub mod error;
pub mod filter;
pub mod introspect;
pub mod output;
pub mod parser;
pub mod path;
pub mod template;
pub mod tree;
pub mod validate;

// Re-export commonly used types for convenience
pub use align::{align_fields, align_keys, AlignedField, AlignedKey, Presence};
pub use diff::{compute_diff, Change, ChangeKind, Diff, DiffStats};
pub use differ::Differ;
pub use error::{Argument, DiffError, FormatError, IntrospectError, ShapeError, TemplateError};
pub use filter::{filter_diff, FilterConfig, PathPattern};
pub use introspect::to_node;
pub use output::{format_summary, Format, Renderer};
pub use parser::{parse_format, FormatHint};
pub use path::{Path, PathSegment};
pub use template::Template;
pub use tree::{Atomic, Node, Record, Shape};
pub use validate::validate;

use serde::Serialize;

/// Diffs two values with the default templates.
///
/// # Errors
///
/// Returns a [`DiffError`] if either value is not a record, map or sequence,
/// if their shapes or record type names differ, or if introspection fails.
pub fn diff_all<B, A>(before: &B, after: &A) -> Result<Vec<String>, DiffError>
where
    B: Serialize + ?Sized,
    A: Serialize + ?Sized,
{
    Differ::new().diff_all(before, after)
}

/// Diffs two values, rendering with the templates of `format`. Templates
/// left unset in `format` use the defaults.
///
/// # Errors
///
/// As [`diff_all`], plus a [`DiffError::Template`] for a malformed template,
/// reported before the values are looked at.
pub fn diff_all_formatted<B, A>(
    format: &Format,
    before: &B,
    after: &A,
) -> Result<Vec<String>, DiffError>
where
    B: Serialize + ?Sized,
    A: Serialize + ?Sized,
{
    Differ::with_format(format)?.diff_all(before, after)
}
