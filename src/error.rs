//! Custom error types for structdiff.

use crate::tree::Shape;
use std::fmt;

/// Which of the two compared values an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Argument {
    Before,
    After,
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Argument::Before => f.write_str("before"),
            Argument::After => f.write_str("after"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShapeError {
    #[error("argument \"{argument}\" must be a record, map or sequence, found {found}")]
    Unsupported { argument: Argument, found: Shape },

    #[error("values have different shapes: before is a {before}, after is a {after}")]
    Mismatch { before: Shape, after: Shape },

    #[error("records are of different types: {before} and {after}")]
    TypeMismatch { before: String, after: String },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    #[error("template {template:?} references unknown placeholder {{{name}}}; expected Name, Before or After")]
    UnknownPlaceholder { template: String, name: String },

    #[error("template {template:?} has an empty placeholder at byte {position}")]
    EmptyPlaceholder { template: String, position: usize },

    #[error("template {template:?} has an unclosed '{{' at byte {position}")]
    Unclosed { template: String, position: usize },

    #[error("template {template:?} has an unmatched '}}' at byte {position}")]
    UnmatchedClose { template: String, position: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntrospectError {
    #[error("failed to introspect value: {message}")]
    Custom { message: String },

    #[error("map entry value was produced without a key")]
    ValueWithoutKey,

    #[error("map entry key was produced without a value")]
    KeyWithoutValue,
}

#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("Invalid JSON format definition: {source}")]
    JsonError {
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid YAML format definition: {source}")]
    YamlError {
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid TOML format definition: {source}")]
    TomlError {
        #[source]
        source: toml::de::Error,
    },

    #[error("Could not detect the encoding of the format definition")]
    UnknownFormat,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DiffError {
    #[error(transparent)]
    Shape(#[from] ShapeError),

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error(transparent)]
    Introspect(#[from] IntrospectError),
}

impl ShapeError {
    pub fn unsupported(argument: Argument, found: Shape) -> Self {
        Self::Unsupported { argument, found }
    }

    pub fn mismatch(before: Shape, after: Shape) -> Self {
        Self::Mismatch { before, after }
    }

    pub fn type_mismatch(before: impl Into<String>, after: impl Into<String>) -> Self {
        Self::TypeMismatch {
            before: before.into(),
            after: after.into(),
        }
    }
}

impl TemplateError {
    pub fn unknown_placeholder(template: impl Into<String>, name: impl Into<String>) -> Self {
        Self::UnknownPlaceholder {
            template: template.into(),
            name: name.into(),
        }
    }

    pub fn empty_placeholder(template: impl Into<String>, position: usize) -> Self {
        Self::EmptyPlaceholder {
            template: template.into(),
            position,
        }
    }

    pub fn unclosed(template: impl Into<String>, position: usize) -> Self {
        Self::Unclosed {
            template: template.into(),
            position,
        }
    }

    pub fn unmatched_close(template: impl Into<String>, position: usize) -> Self {
        Self::UnmatchedClose {
            template: template.into(),
            position,
        }
    }
}

impl serde::ser::Error for IntrospectError {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Self::Custom {
            message: msg.to_string(),
        }
    }
}
