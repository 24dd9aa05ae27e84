//! Lowering arbitrary values into [`Node`] trees.
//!
//! Any `T: Serialize` can be introspected. The serde data model already
//! distinguishes structs, maps, sequences and primitives, so a custom
//! [`serde::Serializer`] is enough to recover the runtime shape of a value
//! together with its field names in declaration order.
//!
//! Field visibility does not matter here: `#[derive(Serialize)]` writes every
//! field that is not marked `#[serde(skip)]`, private ones included. Deriving
//! `Serialize` is therefore the opt-in for having a type's fields diffed.
//!
//! | serde                          | Node                                  |
//! |--------------------------------|---------------------------------------|
//! | bool, integers, floats, char   | `Atomic`                              |
//! | str, bytes                     | `Atomic::String`, `Atomic::Bytes`     |
//! | `None`, `()`                   | `Atomic::Null` (absent)               |
//! | `Some(v)`, newtype struct      | same as `v`                           |
//! | unit struct                    | empty named `Record`                  |
//! | unit variant                   | `Atomic::Variant`                     |
//! | newtype/tuple/struct variant   | `Record` named `Enum::Variant`        |
//! | tuple struct, struct           | named `Record`                        |
//! | seq, tuple, array              | `Sequence`                            |
//! | map                            | `Map`                                 |
//!
//! # Examples
//!
//! ```
//! use serde::Serialize;
//! use structdiff::introspect::to_node;
//! use structdiff::Shape;
//!
//! #[derive(Serialize)]
//! struct Config {
//!     debug: bool,
//! }
//!
//! let node = to_node(&Config { debug: true }).unwrap();
//! assert_eq!(node.shape(), Shape::Record);
//! assert_eq!(node.type_name(), Some("Config"));
//! ```

use crate::error::IntrospectError;
use crate::tree::{Atomic, Node, Record};
use serde::ser::{self, Serialize};

/// Converts any serializable value into a [`Node`] tree.
///
/// # Errors
///
/// Returns an error if the value's `Serialize` impl reports one, or if it
/// writes a map value without a key.
pub fn to_node<T>(value: &T) -> Result<Node, IntrospectError>
where
    T: Serialize + ?Sized,
{
    value.serialize(NodeSerializer)
}

fn variant_name(name: &str, variant: &str) -> String {
    format!("{}::{}", name, variant)
}

struct NodeSerializer;

impl ser::Serializer for NodeSerializer {
    type Ok = Node;
    type Error = IntrospectError;

    type SerializeSeq = SequenceBuilder;
    type SerializeTuple = SequenceBuilder;
    type SerializeTupleStruct = RecordBuilder;
    type SerializeTupleVariant = RecordBuilder;
    type SerializeMap = MapBuilder;
    type SerializeStruct = RecordBuilder;
    type SerializeStructVariant = RecordBuilder;

    fn serialize_bool(self, v: bool) -> Result<Node, IntrospectError> {
        Ok(Node::Atomic(Atomic::Bool(v)))
    }

    fn serialize_i8(self, v: i8) -> Result<Node, IntrospectError> {
        self.serialize_i128(v.into())
    }

    fn serialize_i16(self, v: i16) -> Result<Node, IntrospectError> {
        self.serialize_i128(v.into())
    }

    fn serialize_i32(self, v: i32) -> Result<Node, IntrospectError> {
        self.serialize_i128(v.into())
    }

    fn serialize_i64(self, v: i64) -> Result<Node, IntrospectError> {
        self.serialize_i128(v.into())
    }

    fn serialize_i128(self, v: i128) -> Result<Node, IntrospectError> {
        Ok(Node::Atomic(Atomic::Int(v)))
    }

    fn serialize_u8(self, v: u8) -> Result<Node, IntrospectError> {
        self.serialize_u128(v.into())
    }

    fn serialize_u16(self, v: u16) -> Result<Node, IntrospectError> {
        self.serialize_u128(v.into())
    }

    fn serialize_u32(self, v: u32) -> Result<Node, IntrospectError> {
        self.serialize_u128(v.into())
    }

    fn serialize_u64(self, v: u64) -> Result<Node, IntrospectError> {
        self.serialize_u128(v.into())
    }

    fn serialize_u128(self, v: u128) -> Result<Node, IntrospectError> {
        Ok(Node::Atomic(Atomic::UInt(v)))
    }

    fn serialize_f32(self, v: f32) -> Result<Node, IntrospectError> {
        Ok(Node::Atomic(Atomic::F32(v)))
    }

    fn serialize_f64(self, v: f64) -> Result<Node, IntrospectError> {
        Ok(Node::Atomic(Atomic::F64(v)))
    }

    fn serialize_char(self, v: char) -> Result<Node, IntrospectError> {
        Ok(Node::Atomic(Atomic::Char(v)))
    }

    fn serialize_str(self, v: &str) -> Result<Node, IntrospectError> {
        Ok(Node::Atomic(Atomic::String(v.to_owned())))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Node, IntrospectError> {
        Ok(Node::Atomic(Atomic::Bytes(v.to_vec())))
    }

    fn serialize_none(self) -> Result<Node, IntrospectError> {
        Ok(Node::null())
    }

    fn serialize_some<T>(self, value: &T) -> Result<Node, IntrospectError>
    where
        T: Serialize + ?Sized,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Node, IntrospectError> {
        Ok(Node::null())
    }

    fn serialize_unit_struct(self, name: &'static str) -> Result<Node, IntrospectError> {
        Ok(Node::Record(Record::named(name, Vec::new())))
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Node, IntrospectError> {
        Ok(Node::Atomic(Atomic::Variant(variant.to_owned())))
    }

    fn serialize_newtype_struct<T>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<Node, IntrospectError>
    where
        T: Serialize + ?Sized,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Node, IntrospectError>
    where
        T: Serialize + ?Sized,
    {
        let inner = value.serialize(NodeSerializer)?;
        Ok(Node::Record(Record::named(
            variant_name(name, variant),
            vec![("0".to_string(), inner)],
        )))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SequenceBuilder, IntrospectError> {
        Ok(SequenceBuilder {
            elements: Vec::with_capacity(len.unwrap_or(0)),
        })
    }

    // Fixed-size arrays come through here too, so tuples are positional
    // sequences rather than records.
    fn serialize_tuple(self, len: usize) -> Result<SequenceBuilder, IntrospectError> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(
        self,
        name: &'static str,
        len: usize,
    ) -> Result<RecordBuilder, IntrospectError> {
        Ok(RecordBuilder::new(Some(name.to_owned()), len))
    }

    fn serialize_tuple_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<RecordBuilder, IntrospectError> {
        Ok(RecordBuilder::new(Some(variant_name(name, variant)), len))
    }

    fn serialize_map(self, len: Option<usize>) -> Result<MapBuilder, IntrospectError> {
        Ok(MapBuilder {
            entries: Vec::with_capacity(len.unwrap_or(0)),
            pending_key: None,
        })
    }

    fn serialize_struct(
        self,
        name: &'static str,
        len: usize,
    ) -> Result<RecordBuilder, IntrospectError> {
        Ok(RecordBuilder::new(Some(name.to_owned()), len))
    }

    fn serialize_struct_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<RecordBuilder, IntrospectError> {
        Ok(RecordBuilder::new(Some(variant_name(name, variant)), len))
    }
}

struct SequenceBuilder {
    elements: Vec<Node>,
}

impl ser::SerializeSeq for SequenceBuilder {
    type Ok = Node;
    type Error = IntrospectError;

    fn serialize_element<T>(&mut self, value: &T) -> Result<(), IntrospectError>
    where
        T: Serialize + ?Sized,
    {
        self.elements.push(value.serialize(NodeSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<Node, IntrospectError> {
        Ok(Node::Sequence(self.elements))
    }
}

/// Collects fields for structs, tuple structs and their enum-variant forms.
/// Positional fields are named by index.
struct RecordBuilder {
    name: Option<String>,
    fields: Vec<(String, Node)>,
}

impl RecordBuilder {
    fn new(name: Option<String>, len: usize) -> Self {
        Self {
            name,
            fields: Vec::with_capacity(len),
        }
    }

    fn push_positional<T>(&mut self, value: &T) -> Result<(), IntrospectError>
    where
        T: Serialize + ?Sized,
    {
        let index = self.fields.len().to_string();
        self.fields.push((index, value.serialize(NodeSerializer)?));
        Ok(())
    }

    fn push_named<T>(&mut self, key: &'static str, value: &T) -> Result<(), IntrospectError>
    where
        T: Serialize + ?Sized,
    {
        self.fields
            .push((key.to_owned(), value.serialize(NodeSerializer)?));
        Ok(())
    }

    fn finish(self) -> Node {
        Node::Record(Record::new(self.name, self.fields))
    }
}

impl ser::SerializeTuple for SequenceBuilder {
    type Ok = Node;
    type Error = IntrospectError;

    fn serialize_element<T>(&mut self, value: &T) -> Result<(), IntrospectError>
    where
        T: Serialize + ?Sized,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Node, IntrospectError> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleStruct for RecordBuilder {
    type Ok = Node;
    type Error = IntrospectError;

    fn serialize_field<T>(&mut self, value: &T) -> Result<(), IntrospectError>
    where
        T: Serialize + ?Sized,
    {
        self.push_positional(value)
    }

    fn end(self) -> Result<Node, IntrospectError> {
        Ok(self.finish())
    }
}

impl ser::SerializeTupleVariant for RecordBuilder {
    type Ok = Node;
    type Error = IntrospectError;

    fn serialize_field<T>(&mut self, value: &T) -> Result<(), IntrospectError>
    where
        T: Serialize + ?Sized,
    {
        self.push_positional(value)
    }

    fn end(self) -> Result<Node, IntrospectError> {
        Ok(self.finish())
    }
}

impl ser::SerializeStruct for RecordBuilder {
    type Ok = Node;
    type Error = IntrospectError;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<(), IntrospectError>
    where
        T: Serialize + ?Sized,
    {
        self.push_named(key, value)
    }

    fn end(self) -> Result<Node, IntrospectError> {
        Ok(self.finish())
    }
}

impl ser::SerializeStructVariant for RecordBuilder {
    type Ok = Node;
    type Error = IntrospectError;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<(), IntrospectError>
    where
        T: Serialize + ?Sized,
    {
        self.push_named(key, value)
    }

    fn end(self) -> Result<Node, IntrospectError> {
        Ok(self.finish())
    }
}

struct MapBuilder {
    entries: Vec<(Node, Node)>,
    pending_key: Option<Node>,
}

impl ser::SerializeMap for MapBuilder {
    type Ok = Node;
    type Error = IntrospectError;

    fn serialize_key<T>(&mut self, key: &T) -> Result<(), IntrospectError>
    where
        T: Serialize + ?Sized,
    {
        if self.pending_key.is_some() {
            return Err(IntrospectError::KeyWithoutValue);
        }
        self.pending_key = Some(key.serialize(NodeSerializer)?);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<(), IntrospectError>
    where
        T: Serialize + ?Sized,
    {
        let key = self
            .pending_key
            .take()
            .ok_or(IntrospectError::ValueWithoutKey)?;
        self.entries.push((key, value.serialize(NodeSerializer)?));
        Ok(())
    }

    fn end(self) -> Result<Node, IntrospectError> {
        if self.pending_key.is_some() {
            return Err(IntrospectError::KeyWithoutValue);
        }
        Ok(Node::Map(self.entries))
    }
}
