//! Loading template sets from configuration text.
//!
//! A [`Format`] can be kept next to the rest of a program's configuration in
//! JSON, YAML or TOML. Keys are `changed`, `added` and `deleted`; any of them
//! may be omitted, unknown keys are rejected.
//!
//! # Examples
//!
//! ```
//! use structdiff::parser::{parse_format, FormatHint};
//!
//! let toml = r#"changed = "{Name}: {Before} -> {After}""#;
//! let format = parse_format(toml, Some(FormatHint::Toml)).unwrap();
//! assert_eq!(format.changed.as_deref(), Some("{Name}: {Before} -> {After}"));
//! assert!(format.added.is_none());
//! ```

use crate::error::FormatError;
use crate::output::Format;

/// Encoding of a format definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatHint {
    Json,
    Yaml,
    Toml,
}

impl FormatHint {
    /// Maps a file extension (without the dot, any case) to a hint.
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_lowercase().as_str() {
            "json" => Some(FormatHint::Json),
            "yaml" | "yml" => Some(FormatHint::Yaml),
            "toml" => Some(FormatHint::Toml),
            _ => None,
        }
    }
}

/// Parses a format definition.
///
/// With no hint, JSON is tried first, then TOML, then YAML.
///
/// # Errors
///
/// Returns the syntax error of the hinted encoding, or
/// `FormatError::UnknownFormat` if no encoding accepts the content.
pub fn parse_format(content: &str, hint: Option<FormatHint>) -> Result<Format, FormatError> {
    match hint {
        Some(FormatHint::Json) => {
            parse_json(content).map_err(|source| FormatError::JsonError { source })
        }
        Some(FormatHint::Yaml) => {
            parse_yaml(content).map_err(|source| FormatError::YamlError { source })
        }
        Some(FormatHint::Toml) => {
            parse_toml(content).map_err(|source| FormatError::TomlError { source })
        }
        None => parse_json(content)
            .map_err(|_| ())
            .or_else(|_| parse_toml(content).map_err(|_| ()))
            .or_else(|_| parse_yaml(content).map_err(|_| ()))
            .map_err(|_| FormatError::UnknownFormat),
    }
}

pub fn parse_json(content: &str) -> Result<Format, serde_json::Error> {
    serde_json::from_str(content)
}

pub fn parse_yaml(content: &str) -> Result<Format, serde_yaml::Error> {
    serde_yaml::from_str(content)
}

pub fn parse_toml(content: &str) -> Result<Format, toml::de::Error> {
    toml::from_str(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_extension() {
        assert_eq!(FormatHint::from_extension("JSON"), Some(FormatHint::Json));
        assert_eq!(FormatHint::from_extension("yml"), Some(FormatHint::Yaml));
        assert_eq!(FormatHint::from_extension("toml"), Some(FormatHint::Toml));
        assert_eq!(FormatHint::from_extension("txt"), None);
    }

    #[test]
    fn test_parse_json() {
        let format = parse_json(r#"{"added": "+ {Name}"}"#).unwrap();
        assert_eq!(format, Format::new().added("+ {Name}"));
    }

    #[test]
    fn test_parse_yaml() {
        let format = parse_yaml("deleted: \"- {Name}\"\nchanged: \"~ {Name}\"\n").unwrap();
        assert_eq!(format, Format::new().changed("~ {Name}").deleted("- {Name}"));
    }

    #[test]
    fn test_unknown_keys_rejected() {
        assert!(parse_json(r#"{"renamed": "{Name}"}"#).is_err());
    }

    #[test]
    fn test_detection_without_hint() {
        let format = parse_format(r#"added = "+{Name}""#, None).unwrap();
        assert_eq!(format.added.as_deref(), Some("+{Name}"));

        let format = parse_format(r#"{"changed": "{After}"}"#, None).unwrap();
        assert_eq!(format.changed.as_deref(), Some("{After}"));
    }

    #[test]
    fn test_hinted_error_keeps_source() {
        let err = parse_format("{not json", Some(FormatHint::Json)).unwrap_err();
        assert!(matches!(err, FormatError::JsonError { .. }));
        assert!(err.to_string().contains("Invalid JSON"));
    }
}
