//! A minimal template engine with named placeholders.
//!
//! Templates are plain text with `{Name}`, `{Before}` and `{After}`
//! placeholders. Whitespace inside the braces is ignored, and `{{` / `}}`
//! produce literal braces. Templates are compiled once; rendering a compiled
//! template cannot fail.
//!
//! ```
//! use structdiff::template::{Template, Values};
//!
//! let template = Template::parse("{Name}: {Before} -> {After}").unwrap();
//! let out = template.render(&Values {
//!     name: ".Timeout",
//!     before: Some("30"),
//!     after: Some("15"),
//! });
//! assert_eq!(out, ".Timeout: 30 -> 15");
//! ```

use crate::error::TemplateError;
use std::str::FromStr;

/// The values a template can reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    Name,
    Before,
    After,
}

impl Placeholder {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "Name" => Some(Placeholder::Name),
            "Before" => Some(Placeholder::Before),
            "After" => Some(Placeholder::After),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Piece {
    Literal(String),
    Placeholder(Placeholder),
}

/// Values substituted into a template. A missing value renders as nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct Values<'a> {
    pub name: &'a str,
    pub before: Option<&'a str>,
    pub after: Option<&'a str>,
}

/// A compiled template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
    pieces: Vec<Piece>,
}

impl Template {
    /// Compiles a template.
    ///
    /// # Errors
    ///
    /// Returns a [`TemplateError`] for an unknown or empty placeholder, an
    /// unclosed `{`, or a `}` with no matching `{`.
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        let mut pieces = Vec::new();
        let mut literal = String::new();
        let mut chars = source.char_indices().peekable();

        while let Some((position, c)) = chars.next() {
            match c {
                '{' if chars.next_if(|&(_, next)| next == '{').is_some() => literal.push('{'),
                '}' if chars.next_if(|&(_, next)| next == '}').is_some() => literal.push('}'),
                '{' => {
                    let mut name = String::new();
                    let mut closed = false;
                    for (_, inner) in chars.by_ref() {
                        match inner {
                            '}' => {
                                closed = true;
                                break;
                            }
                            '{' => break,
                            _ => name.push(inner),
                        }
                    }
                    if !closed {
                        return Err(TemplateError::unclosed(source, position));
                    }

                    let name = name.trim();
                    if name.is_empty() {
                        return Err(TemplateError::empty_placeholder(source, position));
                    }
                    let placeholder = Placeholder::from_name(name)
                        .ok_or_else(|| TemplateError::unknown_placeholder(source, name))?;

                    if !literal.is_empty() {
                        pieces.push(Piece::Literal(std::mem::take(&mut literal)));
                    }
                    pieces.push(Piece::Placeholder(placeholder));
                }
                '}' => return Err(TemplateError::unmatched_close(source, position)),
                _ => literal.push(c),
            }
        }

        if !literal.is_empty() {
            pieces.push(Piece::Literal(literal));
        }

        Ok(Self {
            source: source.to_string(),
            pieces,
        })
    }

    /// Assembles a template from pieces known to match `source`.
    pub(crate) fn from_pieces(source: &str, pieces: Vec<Piece>) -> Self {
        Self {
            source: source.to_string(),
            pieces,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// The placeholders referenced, in order of appearance.
    pub fn placeholders(&self) -> impl Iterator<Item = Placeholder> + '_ {
        self.pieces.iter().filter_map(|piece| match piece {
            Piece::Placeholder(placeholder) => Some(*placeholder),
            Piece::Literal(_) => None,
        })
    }

    pub fn render(&self, values: &Values<'_>) -> String {
        let mut output = String::with_capacity(self.source.len() + values.name.len());
        for piece in &self.pieces {
            match piece {
                Piece::Literal(text) => output.push_str(text),
                Piece::Placeholder(Placeholder::Name) => output.push_str(values.name),
                Piece::Placeholder(Placeholder::Before) => {
                    output.push_str(values.before.unwrap_or_default())
                }
                Piece::Placeholder(Placeholder::After) => {
                    output.push_str(values.after.unwrap_or_default())
                }
            }
        }
        output
    }
}

impl FromStr for Template {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
