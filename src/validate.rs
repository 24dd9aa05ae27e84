//! Top-level shape validation.
//!
//! Diffing is only meaningful below a container boundary, so both values must
//! be records, maps or sequences of the same shape. Named records must also
//! share a type name; anonymous records are exempt.

use crate::error::{Argument, ShapeError};
use crate::tree::Node;

/// Checks that `before` and `after` can be diffed against each other.
///
/// # Errors
///
/// - `ShapeError::Unsupported` if either value is atomic (including `None`)
/// - `ShapeError::Mismatch` if the shapes differ
/// - `ShapeError::TypeMismatch` if both are named records with different names
pub fn validate(before: &Node, after: &Node) -> Result<(), ShapeError> {
    if !before.shape().is_container() {
        return Err(ShapeError::unsupported(Argument::Before, before.shape()));
    }
    if !after.shape().is_container() {
        return Err(ShapeError::unsupported(Argument::After, after.shape()));
    }

    if before.shape() != after.shape() {
        return Err(ShapeError::mismatch(before.shape(), after.shape()));
    }

    if let (Some(before_name), Some(after_name)) = (before.type_name(), after.type_name()) {
        if before_name != after_name {
            return Err(ShapeError::type_mismatch(before_name, after_name));
        }
    }

    Ok(())
}
