//! Built-in converters for the vanilla construct kinds.
//!
//! Each submodule owns one category and exposes a `register` function; nothing outside this
//! module knows which kinds exist.

pub mod condition;
pub mod entry;
pub mod function;
pub mod number;

use crate::error::{RegistrationError, SchemaError, SchemaErrorKind};
use crate::ir::IntRange;
use crate::registry::Registry;
use crate::value::Node;

pub fn register_all(registry: &mut Registry) -> Result<(), RegistrationError> {
    entry::register(registry)?;
    condition::register(registry)?;
    function::register(registry)?;
    number::register(registry)?;
    Ok(())
}

/// `5` (exactly five) or `{ "min": 1, "max": 3 }` with at least one bound.
pub(crate) fn int_range(node: &Node<'_>) -> Result<IntRange, SchemaError> {
    if node.value().is_number() {
        let exact = node.as_i32()?;
        return Ok(IntRange { min: Some(exact), max: Some(exact) });
    }
    let range = IntRange { min: node.opt_i32("min")?, max: node.opt_i32("max")? };
    if range.min.is_none() && range.max.is_none() {
        return Err(node.error(SchemaErrorKind::InvalidValue(
            "range needs at least one of `min` or `max`".into(),
        )));
    }
    Ok(range)
}
