//! Paths addressing a leaf inside a nested value.

use crate::tree::{Atomic, Node};
use serde::{Serialize, Serializer};
use std::fmt;

/// One level of path navigation.
#[derive(Debug, Clone, PartialEq)]
pub enum PathSegment {
    /// Record field, rendered `.name`.
    Field(String),
    /// Sequence position, rendered `[i]`.
    Index(usize),
    /// Map key, rendered `[key]` with string keys quoted.
    Key(Node),
}

impl PathSegment {
    /// Whether a filter literal names this segment.
    ///
    /// String keys match on their unquoted text; other keys on their
    /// rendered form.
    pub fn matches_literal(&self, literal: &str) -> bool {
        match self {
            PathSegment::Field(name) => name == literal,
            PathSegment::Index(index) => literal.parse::<usize>() == Ok(*index),
            PathSegment::Key(Node::Atomic(Atomic::String(key))) => key == literal,
            PathSegment::Key(key) => key.to_string() == literal,
        }
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Field(name) => write!(f, ".{}", name),
            PathSegment::Index(index) => write!(f, "[{}]", index),
            PathSegment::Key(key) => write!(f, "[{}]", key),
        }
    }
}

/// An ordered list of segments. Used as a push/pop stack while walking.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    segments: Vec<PathSegment>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, segment: PathSegment) {
        self.segments.push(segment);
    }

    pub fn pop(&mut self) -> Option<PathSegment> {
        self.segments.pop()
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl From<Vec<PathSegment>> for Path {
    fn from(segments: Vec<PathSegment>) -> Self {
        Self { segments }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

impl Serialize for Path {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_display_all_segment_kinds() {
        let path = Path::from(vec![
            PathSegment::Field("Mapping".to_string()),
            PathSegment::Key(Node::string("yo")),
            PathSegment::Index(0),
        ]);
        assert_eq!(path.to_string(), ".Mapping[\"yo\"][0]");
    }

    #[test]
    fn test_path_non_string_key() {
        let path = Path::from(vec![PathSegment::Key(Node::int(7))]);
        assert_eq!(path.to_string(), "[7]");
    }

    #[test]
    fn test_push_pop() {
        let mut path = Path::new();
        assert!(path.is_empty());
        path.push(PathSegment::Field("a".to_string()));
        path.push(PathSegment::Index(2));
        assert_eq!(path.len(), 2);
        assert_eq!(path.pop(), Some(PathSegment::Index(2)));
        assert_eq!(path.to_string(), ".a");
    }

    #[test]
    fn test_matches_literal() {
        assert!(PathSegment::Field("Timeout".to_string()).matches_literal("Timeout"));
        assert!(PathSegment::Index(3).matches_literal("3"));
        assert!(!PathSegment::Index(3).matches_literal("03x"));
        assert!(PathSegment::Key(Node::string("yo")).matches_literal("yo"));
        assert!(!PathSegment::Key(Node::string("yo")).matches_literal("\"yo\""));
        assert!(PathSegment::Key(Node::int(42)).matches_literal("42"));
    }
}
