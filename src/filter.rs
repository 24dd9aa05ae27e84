//! Path filtering for diff results.
//!
//! Glob-style patterns select which change paths are reported, e.g. to keep
//! a noisy timestamp out of configuration change logs.
//!
//! # Pattern Syntax
//!
//! - `foo` - matches a field `foo`, a map key `"foo"`, or (for digits) an index
//! - `*` - matches any single path segment
//! - `**` - matches any number of path segments (including zero)
//! - `Mapping.*.0` - matches `.Mapping["yo"][0]`
//! - `**.Version` - matches `Version` at any depth
//!
//! # Examples
//!
//! ```
//! use structdiff::filter::PathPattern;
//! use structdiff::{Node, Path, PathSegment};
//!
//! let path = Path::from(vec![
//!     PathSegment::Field("Mapping".to_string()),
//!     PathSegment::Key(Node::string("yo")),
//!     PathSegment::Index(0),
//! ]);
//!
//! assert!(PathPattern::parse("Mapping.*.0").matches(&path));
//! assert!(PathPattern::parse("**.yo.*").matches(&path));
//! assert!(!PathPattern::parse("Mapping").matches(&path));
//! ```

use crate::diff::{Change, Diff};
use crate::path::{Path, PathSegment};

/// A single segment in a path pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternSegment {
    /// Matches a field name, key text or index
    Literal(String),
    /// Matches any single path segment (*)
    SingleWildcard,
    /// Matches any number of path segments (**)
    DoubleWildcard,
}

/// A compiled path pattern for matching against change paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    pub segments: Vec<PatternSegment>,
}

impl PathPattern {
    pub fn parse(pattern: &str) -> Self {
        let segments = pattern
            .split('.')
            .filter(|s| !s.is_empty())
            .map(|s| match s {
                "**" => PatternSegment::DoubleWildcard,
                "*" => PatternSegment::SingleWildcard,
                _ => PatternSegment::Literal(s.to_string()),
            })
            .collect();
        Self { segments }
    }

    pub fn matches(&self, path: &Path) -> bool {
        Self::matches_recursive(&self.segments, path.segments())
    }

    fn matches_recursive(pattern: &[PatternSegment], path: &[PathSegment]) -> bool {
        match (pattern.first(), path.first()) {
            (None, None) => true,
            (None, Some(_)) => false,
            (Some(_), None) => pattern
                .iter()
                .all(|s| matches!(s, PatternSegment::DoubleWildcard)),
            (Some(seg), Some(path_seg)) => match seg {
                PatternSegment::Literal(lit) => {
                    path_seg.matches_literal(lit)
                        && Self::matches_recursive(&pattern[1..], &path[1..])
                }
                PatternSegment::SingleWildcard => {
                    Self::matches_recursive(&pattern[1..], &path[1..])
                }
                PatternSegment::DoubleWildcard => {
                    Self::matches_recursive(&pattern[1..], path)
                        || Self::matches_recursive(pattern, &path[1..])
                }
            },
        }
    }
}

/// Configuration for filtering diff results.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterConfig {
    /// Patterns for paths to leave out
    pub ignore_patterns: Vec<PathPattern>,
    /// Patterns for paths to keep (if non-empty, only these are kept)
    pub only_patterns: Vec<PathPattern>,
}

impl FilterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ignore(mut self, pattern: &str) -> Self {
        self.ignore_patterns.push(PathPattern::parse(pattern));
        self
    }

    pub fn only(mut self, pattern: &str) -> Self {
        self.only_patterns.push(PathPattern::parse(pattern));
        self
    }

    pub fn has_filters(&self) -> bool {
        !self.ignore_patterns.is_empty() || !self.only_patterns.is_empty()
    }

    pub fn should_include(&self, path: &Path) -> bool {
        if self.ignore_patterns.iter().any(|p| p.matches(path)) {
            return false;
        }

        self.only_patterns.is_empty() || self.only_patterns.iter().any(|p| p.matches(path))
    }
}

/// Filters a diff based on the filter configuration.
pub fn filter_diff(diff: &Diff, config: &FilterConfig) -> Diff {
    if !config.has_filters() {
        return diff.clone();
    }

    let changes: Vec<Change> = diff
        .changes
        .iter()
        .filter(|change| config.should_include(&change.path))
        .cloned()
        .collect();

    Diff::from_changes(changes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{Atomic, Node};

    fn path(segments: Vec<PathSegment>) -> Path {
        Path::from(segments)
    }

    fn field(name: &str) -> PathSegment {
        PathSegment::Field(name.to_string())
    }

    #[test]
    fn test_parse_ignores_empty_segments() {
        let pattern = PathPattern::parse(".Timeout");
        assert_eq!(
            pattern.segments,
            vec![PatternSegment::Literal("Timeout".to_string())]
        );
    }

    #[test]
    fn test_double_wildcard_at_any_depth() {
        let pattern = PathPattern::parse("**.Version");
        assert!(pattern.matches(&path(vec![field("Version")])));
        assert!(pattern.matches(&path(vec![field("Deps"), PathSegment::Index(2), field("Version")])));
        assert!(!pattern.matches(&path(vec![field("Version"), field("Major")])));
    }

    #[test]
    fn test_filter_diff_recomputes_stats() {
        let diff = Diff::from_changes(vec![
            Change::added(path(vec![field("Updated")]), Atomic::Int(1)),
            Change::deleted(
                path(vec![field("Mapping"), PathSegment::Key(Node::string("yo"))]),
                Atomic::String("hello".to_string()),
            ),
        ]);

        let filtered = filter_diff(&diff, &FilterConfig::new().ignore("Updated"));
        assert_eq!(filtered.changes.len(), 1);
        assert_eq!(filtered.stats.added, 0);
        assert_eq!(filtered.stats.deleted, 1);

        let only = filter_diff(&diff, &FilterConfig::new().only("Mapping.yo"));
        assert_eq!(only.changes.len(), 1);
        assert_eq!(only.changes[0].path.to_string(), ".Mapping[\"yo\"]");
    }

    #[test]
    fn test_no_filters_is_identity() {
        let diff = Diff::from_changes(vec![Change::added(path(vec![field("A")]), Atomic::Int(1))]);
        assert_eq!(filter_diff(&diff, &FilterConfig::new()), diff);
    }
}
