//! Depth-first traversal that proves every reachable value is well-typed,
//! plus the narrow scalar-array entry points used by benchmark harnesses.

use alloc::string::String;

use crate::{
    cursor::TypeTag,
    document::Document,
    error::{Error, SyntaxError},
    padded::PaddedBytes,
    value::Value,
};

/// Walks one value depth-first, forcing every scalar getter and recursing
/// into every container. Any structured error becomes `false`; the walk
/// short-circuits on the first failure.
///
/// Success here says nothing about trailing garbage; callers must check
/// [`Document::at_end`] separately.
pub fn validate_value(value: &mut Value<'_, '_>) -> bool {
    walk(value).is_ok()
}

/// Takes the document root and walks it, see [`validate_value`].
///
/// Returns `false` if the root was already taken.
pub fn validate(document: &mut Document<'_>) -> bool {
    match document.root() {
        Ok(mut root) => validate_value(&mut root),
        Err(_) => false,
    }
}

/// Recursion depth is bounded by the cursor's `max_depth`: every level of
/// recursion first opened a container, and opening past the limit fails.
fn walk(value: &mut Value<'_, '_>) -> Result<(), Error> {
    match value.tag()? {
        TypeTag::Array => {
            let mut items = value.get_array()?;
            while let Some(item) = items.next() {
                let mut child = item?;
                walk(&mut child)?;
            }
        }
        TypeTag::Object => {
            let mut fields = value.get_object()?;
            while let Some(field) = fields.next() {
                let (_key, mut child) = field?;
                walk(&mut child)?;
            }
        }
        TypeTag::Number => {
            value.get_double()?;
        }
        TypeTag::String => {
            value.get_string()?;
        }
        TypeTag::Boolean => {
            value.get_bool()?;
        }
        TypeTag::Null => {
            value.is_null()?;
        }
    }
    Ok(())
}

/// Parses `text` as an array of numbers and returns the last element.
///
/// Every element is read with the number getter, in order, mirroring the
/// scalar-benchmark loop: `[1,2,3]` yields `3.0`.
///
/// # Errors
///
/// Any parse or getter error, or an [`SyntaxError::EmptyScalarArray`] syntax
/// error when the array has no elements.
pub fn parse_scalar_array_to_double(text: &str) -> Result<f64, Error> {
    let padded = PaddedBytes::from_text(text)?;
    let mut document = Document::parse(&padded)?;
    let mut root = document.root()?;
    let mut values = root.get_array()?;
    let mut last = None;
    while let Some(value) = values.next() {
        last = Some(value?.get_double()?);
    }
    drop(values);
    drop(root);
    last.ok_or_else(|| Error::Syntax {
        offset: document.position(),
        reason: SyntaxError::EmptyScalarArray,
    })
}

/// Parses `text` as an array of strings and returns the last element.
///
/// # Errors
///
/// Any parse or getter error, or an [`SyntaxError::EmptyScalarArray`] syntax
/// error when the array has no elements.
pub fn parse_scalar_array_to_string(text: &str) -> Result<String, Error> {
    let padded = PaddedBytes::from_text(text)?;
    let mut document = Document::parse(&padded)?;
    let mut root = document.root()?;
    let mut values = root.get_array()?;
    let mut last = None;
    while let Some(value) = values.next() {
        last = Some(value?.get_string()?.into_owned());
    }
    drop(values);
    drop(root);
    last.ok_or_else(|| Error::Syntax {
        offset: document.position(),
        reason: SyntaxError::EmptyScalarArray,
    })
}
