//! Key alignment for associative containers.
//!
//! Given the entries of a map (or the fields of a record) on both sides of a
//! diff, produce one entry per distinct key. Map keys are identified by their
//! rendered form, the same text that ends up in the change path; record
//! fields by name.
//!
//! Order: keys of `before` as they were produced, followed by keys that only
//! exist in `after`. Callers should not depend on it; a `HashMap` input has
//! no stable order to begin with.
//!
//! Duplicate keys on one side (only possible for hand-built nodes) are not
//! diffed separately: the first occurrence wins and later ones are ignored.

use crate::tree::Node;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Where a key was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    BeforeOnly,
    AfterOnly,
    Both,
}

/// A key from the union of both key sets, with the value on each side.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedKey<'a> {
    pub key: &'a Node,
    pub before: Option<&'a Node>,
    pub after: Option<&'a Node>,
}

impl AlignedKey<'_> {
    /// Returns `(present_before, present_after)`.
    pub fn flags(&self) -> (bool, bool) {
        (self.before.is_some(), self.after.is_some())
    }

    pub fn presence(&self) -> Presence {
        presence_of(self.flags())
    }
}

/// A field name from the union of two records' fields.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedField<'a> {
    pub name: &'a str,
    pub before: Option<&'a Node>,
    pub after: Option<&'a Node>,
}

impl AlignedField<'_> {
    pub fn presence(&self) -> Presence {
        presence_of((self.before.is_some(), self.after.is_some()))
    }
}

fn presence_of(flags: (bool, bool)) -> Presence {
    match flags {
        (true, true) => Presence::Both,
        (true, false) => Presence::BeforeOnly,
        _ => Presence::AfterOnly,
    }
}

/// Aligns the keys of two maps.
pub fn align_keys<'a>(
    before: &'a [(Node, Node)],
    after: &'a [(Node, Node)],
) -> Vec<AlignedKey<'a>> {
    align(before, after, |key| key.to_string())
        .into_iter()
        .map(|(key, before, after)| AlignedKey { key, before, after })
        .collect()
}

/// Aligns the fields of two records by name, so a field one side did not
/// serialize (e.g. `skip_serializing_if`) reads as absent on that side.
pub fn align_fields<'a>(
    before: &'a [(String, Node)],
    after: &'a [(String, Node)],
) -> Vec<AlignedField<'a>> {
    align(before, after, String::clone)
        .into_iter()
        .map(|(name, before, after)| AlignedField {
            name: name.as_str(),
            before,
            after,
        })
        .collect()
}

type Slot<'a, K> = (&'a K, Option<&'a Node>, Option<&'a Node>);

fn align<'a, K>(
    before: &'a [(K, Node)],
    after: &'a [(K, Node)],
    identity: impl Fn(&K) -> String,
) -> Vec<Slot<'a, K>> {
    let mut aligned: Vec<Slot<'a, K>> = Vec::with_capacity(before.len().max(after.len()));
    let mut index: HashMap<String, usize> = HashMap::with_capacity(aligned.capacity());

    for (key, value) in before {
        if let Entry::Vacant(slot) = index.entry(identity(key)) {
            slot.insert(aligned.len());
            aligned.push((key, Some(value), None));
        }
    }

    for (key, value) in after {
        match index.entry(identity(key)) {
            Entry::Occupied(slot) => {
                let existing = &mut aligned[*slot.get()];
                if existing.2.is_none() {
                    existing.2 = Some(value);
                }
            }
            Entry::Vacant(slot) => {
                slot.insert(aligned.len());
                aligned.push((key, None, Some(value)));
            }
        }
    }

    aligned
}
