//! Lazy typed views over the cursor.
//!
//! A [`Value`] is a transient accessor for the value the cursor is currently
//! positioned at. Nothing has been parsed when it is created; each getter
//! validates and consumes exactly the tokens belonging to that value, leaving
//! the cursor at the next sibling or the enclosing close bracket.
//!
//! Accessors are single-use. A getter on a consumed accessor fails with
//! [`Error::UseAfterConsume`]; a getter of the wrong type fails with
//! [`Error::TypeMismatch`] without consuming anything. Dropping an unconsumed
//! accessor skips its tokens so the enclosing sequence stays positioned
//! correctly.

use alloc::borrow::Cow;

use crate::{
    cursor::{Cursor, TypeTag},
    error::Error,
    unescape,
};

/// A lazy, single-use view of one JSON value.
#[derive(Debug)]
pub struct Value<'a, 'c> {
    cursor: &'c mut Cursor<'a>,
    start: usize,
    consumed: bool,
}

impl<'a, 'c> Value<'a, 'c> {
    pub(crate) fn new(cursor: &'c mut Cursor<'a>) -> Self {
        let start = cursor.offset();
        Value {
            cursor,
            start,
            consumed: false,
        }
    }

    /// Classifies this value without consuming it.
    ///
    /// Peeking is idempotent: repeated calls return the same tag and never
    /// advance the cursor past the value.
    ///
    /// # Errors
    ///
    /// [`Error::Syntax`] if the next byte cannot start a JSON value, or
    /// [`Error::UseAfterConsume`] if the value was already read.
    pub fn tag(&mut self) -> Result<TypeTag, Error> {
        if self.consumed {
            return Err(Error::UseAfterConsume { offset: self.start });
        }
        self.cursor.peek_tag()
    }

    fn expect(&mut self, expected: TypeTag) -> Result<(), Error> {
        let actual = self.tag()?;
        if actual == expected {
            Ok(())
        } else {
            Err(Error::TypeMismatch {
                expected,
                actual,
                offset: self.cursor.offset(),
            })
        }
    }

    /// Reads this value as a number, consuming it.
    ///
    /// # Errors
    ///
    /// [`Error::TypeMismatch`] if the value is not a number;
    /// [`Error::NumberFormat`] if the literal does not convert to a finite
    /// `f64`; [`Error::Syntax`] if the literal is malformed.
    pub fn get_double(&mut self) -> Result<f64, Error> {
        self.expect(TypeTag::Number)?;
        let offset = self.cursor.offset();
        let raw = self.cursor.read_number()?;
        self.consumed = true;
        let text =
            core::str::from_utf8(raw).map_err(|_| Error::NumberFormat { offset })?;
        let value: f64 = text.parse().map_err(|_| Error::NumberFormat { offset })?;
        if value.is_finite() {
            Ok(value)
        } else {
            Err(Error::NumberFormat { offset })
        }
    }

    /// Reads this value as a string, consuming it.
    ///
    /// Escape-free strings borrow from the input; strings with escapes are
    /// decoded into an owned buffer.
    ///
    /// # Errors
    ///
    /// [`Error::TypeMismatch`] if the value is not a string; [`Error::Utf8`]
    /// on invalid encoding; [`Error::Escape`] on malformed escape semantics;
    /// [`Error::Syntax`] if the literal itself is malformed.
    pub fn get_string(&mut self) -> Result<Cow<'a, str>, Error> {
        self.expect(TypeTag::String)?;
        let raw = self.cursor.read_string()?;
        self.consumed = true;
        unescape::decode(raw)
    }

    /// Reads this value as a boolean, consuming it.
    ///
    /// # Errors
    ///
    /// [`Error::TypeMismatch`] if the value is not a boolean;
    /// [`Error::Syntax`] if the literal is malformed.
    pub fn get_bool(&mut self) -> Result<bool, Error> {
        self.expect(TypeTag::Boolean)?;
        let value = self.cursor.read_bool()?;
        self.consumed = true;
        Ok(value)
    }

    /// Whether this value is `null`, consuming it only when it is.
    ///
    /// # Errors
    ///
    /// [`Error::Syntax`] if the value cannot be classified, or
    /// [`Error::UseAfterConsume`] if it was already read.
    pub fn is_null(&mut self) -> Result<bool, Error> {
        if self.tag()? == TypeTag::Null {
            self.cursor.read_null()?;
            self.consumed = true;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Opens this value as an array, consuming the opening bracket.
    ///
    /// The returned sequence is lazy and single-pass: elements are parsed as
    /// they are stepped over, and the sequence can only be restarted by
    /// re-deriving it from a fresh parse.
    ///
    /// # Errors
    ///
    /// [`Error::TypeMismatch`] if the value is not an array; [`Error::Syntax`]
    /// if the nesting depth limit is exceeded.
    pub fn get_array(&mut self) -> Result<ArrayValues<'a, '_>, Error> {
        self.expect(TypeTag::Array)?;
        self.cursor.begin_array()?;
        self.consumed = true;
        let depth = self.cursor.depth();
        Ok(ArrayValues {
            cursor: &mut *self.cursor,
            depth,
            done: false,
        })
    }

    /// Opens this value as an object, consuming the opening brace.
    ///
    /// Fields are yielded in source order as `(key, value)` pairs; keys are
    /// decoded like strings.
    ///
    /// # Errors
    ///
    /// [`Error::TypeMismatch`] if the value is not an object;
    /// [`Error::Syntax`] if the nesting depth limit is exceeded.
    pub fn get_object(&mut self) -> Result<ObjectFields<'a, '_>, Error> {
        self.expect(TypeTag::Object)?;
        self.cursor.begin_object()?;
        self.consumed = true;
        let depth = self.cursor.depth();
        Ok(ObjectFields {
            cursor: &mut *self.cursor,
            depth,
            done: false,
        })
    }
}

impl Drop for Value<'_, '_> {
    fn drop(&mut self) {
        if !self.consumed && self.cursor.poison().is_none() {
            if let Err(err) = self.cursor.skip_value() {
                self.cursor.set_poison(err);
            }
        }
    }
}

/// Lazy, single-pass sequence of array elements.
///
/// Not an [`Iterator`]: each element borrows the cursor, so the next element
/// can only be produced after the previous one is dropped.
#[derive(Debug)]
pub struct ArrayValues<'a, 'c> {
    cursor: &'c mut Cursor<'a>,
    depth: usize,
    done: bool,
}

impl<'a> ArrayValues<'a, '_> {
    /// Steps to the next element, if any.
    pub fn next(&mut self) -> Option<Result<Value<'a, '_>, Error>> {
        if self.done {
            return None;
        }
        if let Some(err) = self.cursor.poison() {
            self.done = true;
            return Some(Err(err));
        }
        match self.cursor.array_has_next() {
            Ok(true) => Some(Ok(Value::new(&mut *self.cursor))),
            Ok(false) => {
                self.done = true;
                None
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

impl Drop for ArrayValues<'_, '_> {
    fn drop(&mut self) {
        if !self.done && self.cursor.poison().is_none() {
            if let Err(err) = self.cursor.skip_to_depth(self.depth - 1) {
                self.cursor.set_poison(err);
            }
        }
    }
}

/// Lazy, single-pass sequence of object fields in source order.
#[derive(Debug)]
pub struct ObjectFields<'a, 'c> {
    cursor: &'c mut Cursor<'a>,
    depth: usize,
    done: bool,
}

impl<'a> ObjectFields<'a, '_> {
    /// Steps to the next field, if any. The key is decoded; the value is an
    /// unconsumed accessor positioned after the colon.
    #[allow(clippy::type_complexity)]
    pub fn next(&mut self) -> Option<Result<(Cow<'a, str>, Value<'a, '_>), Error>> {
        if self.done {
            return None;
        }
        if let Some(err) = self.cursor.poison() {
            self.done = true;
            return Some(Err(err));
        }
        let raw = match self.cursor.object_next_key() {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                self.done = true;
                return None;
            }
            Err(err) => {
                self.done = true;
                return Some(Err(err));
            }
        };
        let key = match unescape::decode(raw) {
            Ok(key) => key,
            Err(err) => {
                // The colon is already consumed; the pending value must still
                // be skipped for the cursor to stay positioned.
                self.done = true;
                if let Err(skip_err) = self.cursor.skip_value() {
                    self.cursor.set_poison(skip_err);
                }
                return Some(Err(err));
            }
        };
        Some(Ok((key, Value::new(&mut *self.cursor))))
    }
}

impl Drop for ObjectFields<'_, '_> {
    fn drop(&mut self) {
        if !self.done && self.cursor.poison().is_none() {
            if let Err(err) = self.cursor.skip_to_depth(self.depth - 1) {
                self.cursor.set_poison(err);
            }
        }
    }
}
