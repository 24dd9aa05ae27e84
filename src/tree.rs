//! Dynamic value representation used by the diff engine.
//!
//! Every compared value is lowered into a [`Node`] tree (see
//! [`crate::introspect`]). A node has exactly one [`Shape`]: a record with a
//! fixed set of named fields, an associative map, an ordered sequence, or an
//! atomic leaf.

use serde::Serialize;
use std::fmt;

/// The four shape categories a value can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    Record,
    Map,
    Sequence,
    Atomic,
}

impl Shape {
    pub fn is_container(self) -> bool {
        !matches!(self, Shape::Atomic)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Shape::Record => "record",
            Shape::Map => "map",
            Shape::Sequence => "sequence",
            Shape::Atomic => "atomic",
        };
        f.write_str(name)
    }
}

/// A terminal value.
///
/// `Null` stands for a value that does not exist on one side of a diff
/// (`None`, `()`), not for a zero value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Atomic {
    Null,
    Bool(bool),
    Int(i128),
    UInt(u128),
    F32(f32),
    F64(f64),
    Char(char),
    String(String),
    Bytes(Vec<u8>),
    /// A fieldless enum variant, by variant name.
    Variant(String),
}

impl Atomic {
    /// Structural equality where `NaN` equals `NaN`, so a value always equals
    /// itself.
    pub fn semantic_equals(&self, other: &Atomic) -> bool {
        match (self, other) {
            (Atomic::F32(a), Atomic::F32(b)) => a == b || (a.is_nan() && b.is_nan()),
            (Atomic::F64(a), Atomic::F64(b)) => a == b || (a.is_nan() && b.is_nan()),
            _ => self == other,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Atomic::Null)
    }
}

impl fmt::Display for Atomic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Atomic::Null => f.write_str("null"),
            Atomic::Bool(b) => write!(f, "{}", b),
            Atomic::Int(n) => write!(f, "{}", n),
            Atomic::UInt(n) => write!(f, "{}", n),
            Atomic::F32(n) => write!(f, "{}", n),
            Atomic::F64(n) => write!(f, "{}", n),
            Atomic::Char(c) => write!(f, "{:?}", c),
            Atomic::String(s) => write!(f, "{:?}", s),
            Atomic::Bytes(bytes) => write!(f, "{:?}", bytes),
            Atomic::Variant(name) => f.write_str(name),
        }
    }
}

/// A record: a fixed, ordered set of named fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Declared type name, `None` for anonymous records.
    pub name: Option<String>,
    pub fields: Vec<(String, Node)>,
}

impl Record {
    pub fn new(name: Option<String>, fields: Vec<(String, Node)>) -> Self {
        Self { name, fields }
    }

    pub fn named(name: impl Into<String>, fields: Vec<(String, Node)>) -> Self {
        Self::new(Some(name.into()), fields)
    }

    pub fn anonymous(fields: Vec<(String, Node)>) -> Self {
        Self::new(None, fields)
    }

    pub fn field(&self, index: usize) -> Option<&Node> {
        self.fields.get(index).map(|(_, node)| node)
    }

    /// True when the fields are positional (`0`, `1`, ...), as for tuple
    /// structs.
    pub fn is_tuple(&self) -> bool {
        !self.fields.is_empty()
            && self
                .fields
                .iter()
                .enumerate()
                .all(|(i, (name, _))| name.parse::<usize>() == Ok(i))
    }

    /// Two records are walked field by field when their type names agree. An
    /// anonymous record agrees with any name. Field sets may differ, since
    /// serde can skip fields per value.
    pub fn same_type(&self, other: &Record) -> bool {
        match (&self.name, &other.name) {
            (Some(a), Some(b)) => a == b,
            _ => true,
        }
    }
}

/// A value in the dynamic tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Record(Record),
    Map(Vec<(Node, Node)>),
    Sequence(Vec<Node>),
    Atomic(Atomic),
}

impl Node {
    pub fn null() -> Self {
        Node::Atomic(Atomic::Null)
    }

    pub fn string(s: impl Into<String>) -> Self {
        Node::Atomic(Atomic::String(s.into()))
    }

    pub fn int(n: i64) -> Self {
        Node::Atomic(Atomic::Int(n.into()))
    }

    pub fn bool(b: bool) -> Self {
        Node::Atomic(Atomic::Bool(b))
    }

    pub fn shape(&self) -> Shape {
        match self {
            Node::Record(_) => Shape::Record,
            Node::Map(_) => Shape::Map,
            Node::Sequence(_) => Shape::Sequence,
            Node::Atomic(_) => Shape::Atomic,
        }
    }

    /// Declared type name of a record node.
    pub fn type_name(&self) -> Option<&str> {
        match self {
            Node::Record(record) => record.name.as_deref(),
            _ => None,
        }
    }

    /// True for a node that does not exist on its side of a diff.
    pub fn is_absent(&self) -> bool {
        matches!(self, Node::Atomic(Atomic::Null))
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Node::Record(record) => Some(record),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&[(Node, Node)]> {
        match self {
            Node::Map(entries) => Some(entries),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Node]> {
        match self {
            Node::Sequence(elements) => Some(elements),
            _ => None,
        }
    }

    pub fn as_atomic(&self) -> Option<&Atomic> {
        match self {
            Node::Atomic(atomic) => Some(atomic),
            _ => None,
        }
    }

    /// Whether two present nodes can be walked in lock-step.
    pub fn comparable_with(&self, other: &Node) -> bool {
        match (self, other) {
            (Node::Record(a), Node::Record(b)) => a.same_type(b),
            _ => self.shape() == other.shape(),
        }
    }
}

fn write_list<'a, I>(f: &mut fmt::Formatter<'_>, items: I) -> fmt::Result
where
    I: IntoIterator<Item = &'a Node>,
{
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Atomic(atomic) => write!(f, "{}", atomic),
            Node::Sequence(elements) => {
                f.write_str("[")?;
                write_list(f, elements)?;
                f.write_str("]")
            }
            Node::Map(entries) => {
                f.write_str("{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                f.write_str("}")
            }
            Node::Record(record) => {
                if let Some(name) = &record.name {
                    f.write_str(name)?;
                }
                if record.is_tuple() {
                    f.write_str("(")?;
                    write_list(f, record.fields.iter().map(|(_, node)| node))?;
                    return f.write_str(")");
                }
                if record.name.is_some() {
                    f.write_str(" ")?;
                }
                f.write_str("{")?;
                for (i, (name, value)) in record.fields.iter().enumerate() {
                    f.write_str(if i > 0 { ", " } else { " " })?;
                    write!(f, "{}: {}", name, value)?;
                }
                f.write_str(if record.fields.is_empty() { "}" } else { " }" })
            }
        }
    }
}
