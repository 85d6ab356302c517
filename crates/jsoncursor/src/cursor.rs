//! The forward-only scanning primitive behind documents and value accessors.
//!
//! A [`Cursor`] owns the scan position over a [`PaddedBytes`] buffer: a byte
//! offset, the stack of open containers, and an explicit expected-next-token
//! state. It makes a single forward pass and never backtracks; structural
//! bytes (`{` `}` `[` `]` `,` `:`) are consumed internally and drive the state
//! machine.
//!
//! This layer validates syntax only. Strings are checked for escape shape and
//! raw control bytes but not decoded; numbers are checked against the JSON
//! numeric grammar but not converted. Conversion happens lazily in the
//! accessor layer, which is what makes wrong-type and malformed-value errors
//! surface only when a value is actually read.
//!
//! A failed mid-token scan poisons the cursor: the error is stored and every
//! subsequent operation returns it, so destructors can always run without
//! touching an inconsistent position.

use alloc::vec::Vec;
use core::fmt;

use crate::{
    error::{Error, SyntaxError},
    options::ParseOptions,
    padded::PaddedBytes,
};

/// The six JSON value categories, distinguishable from a value's first byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeTag {
    /// `[ ... ]`
    Array,
    /// `{ ... }`
    Object,
    /// A numeric literal.
    Number,
    /// A quoted string.
    String,
    /// `true` or `false`.
    Boolean,
    /// `null`.
    Null,
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TypeTag::Array => "array",
            TypeTag::Object => "object",
            TypeTag::Number => "number",
            TypeTag::String => "string",
            TypeTag::Boolean => "boolean",
            TypeTag::Null => "null",
        })
    }
}

/// A raw, undecoded string literal: the bytes between the quotes.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RawStr<'a> {
    /// Content between the quotes, escapes still in source form.
    pub bytes: &'a [u8],
    /// Byte offset of `bytes` within the input, for error reporting.
    pub offset: usize,
    /// Whether any backslash escape occurs in `bytes`.
    pub had_escape: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScopeKind {
    Array,
    Object,
}

/// One open container on the stack.
#[derive(Debug, Clone, Copy)]
struct Scope {
    kind: ScopeKind,
    /// Whether a first element (or key) has completed in this scope. Gates
    /// empty-container closes against trailing commas.
    seen_first: bool,
}

/// Expected-next-token states. `Done` is reached only when the container
/// stack empties after the root value; the cursor never advances past it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Start,
    InArrayExpectValue,
    InArrayExpectCommaOrEnd,
    InObjectExpectKey,
    InObjectExpectColon,
    InObjectExpectValue,
    InObjectExpectCommaOrEnd,
    Done,
}

#[derive(Debug)]
pub(crate) struct Cursor<'a> {
    input: &'a PaddedBytes,
    offset: usize,
    scopes: Vec<Scope>,
    state: State,
    max_depth: usize,
    allow_unicode_whitespace: bool,
    poisoned: Option<Error>,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(input: &'a PaddedBytes, options: ParseOptions) -> Self {
        Self {
            input,
            offset: 0,
            scopes: Vec::new(),
            state: State::Start,
            max_depth: options.max_depth,
            allow_unicode_whitespace: options.allow_unicode_whitespace,
            poisoned: None,
        }
    }

    #[inline]
    pub(crate) fn offset(&self) -> usize {
        self.offset
    }

    #[inline]
    pub(crate) fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Unread content from the current offset to the end of the input.
    pub(crate) fn remainder(&self) -> &'a [u8] {
        self.input.as_bytes().get(self.offset..).unwrap_or_default()
    }

    pub(crate) fn poison(&self) -> Option<Error> {
        self.poisoned.clone()
    }

    pub(crate) fn set_poison(&mut self, err: Error) {
        if self.poisoned.is_none() {
            self.poisoned = Some(err);
        }
    }

    fn check(&self) -> Result<(), Error> {
        match &self.poisoned {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn syntax_at(&mut self, offset: usize, reason: SyntaxError) -> Error {
        let err = Error::Syntax { offset, reason };
        self.set_poison(err.clone());
        err
    }

    fn syntax(&mut self, reason: SyntaxError) -> Error {
        self.syntax_at(self.offset, reason)
    }

    // ------------------------------------------------------------------
    // Byte-level scanning
    // ------------------------------------------------------------------

    fn skip_ws(&mut self) {
        let bytes = self.input.as_bytes();
        while self.offset < bytes.len() {
            match bytes[self.offset] {
                b' ' | b'\t' | b'\n' | b'\r' => self.offset += 1,
                b if b >= 0x80 && self.allow_unicode_whitespace => {
                    let (ch, size) = bstr::decode_utf8(&bytes[self.offset..]);
                    match ch {
                        Some(c) if c.is_whitespace() => self.offset += size,
                        _ => break,
                    }
                }
                _ => break,
            }
        }
    }

    /// Skips whitespace, then peeks the next content byte without consuming.
    #[inline]
    fn peek_byte(&mut self) -> Option<u8> {
        self.skip_ws();
        self.input.as_bytes().get(self.offset).copied()
    }

    /// Whether the byte at `i` may directly follow a number or literal.
    fn is_delimiter(&self, i: usize) -> bool {
        let bytes = self.input.as_bytes();
        let Some(&b) = bytes.get(i) else { return true };
        match b {
            b' ' | b'\t' | b'\n' | b'\r' | b',' | b']' | b'}' => true,
            b if b >= 0x80 && self.allow_unicode_whitespace => {
                matches!(bstr::decode_utf8(&bytes[i..]).0, Some(c) if c.is_whitespace())
            }
            _ => false,
        }
    }

    /// Fixed-width literal match against the padded buffer. The pad is
    /// zero-filled and `lit` contains no zero byte, so a match can never
    /// extend past the content.
    fn matches_literal(&self, lit: &[u8]) -> bool {
        &self.input.padded()[self.offset..self.offset + lit.len()] == lit
            && self.is_delimiter(self.offset + lit.len())
    }

    // ------------------------------------------------------------------
    // Value classification and consumption
    // ------------------------------------------------------------------

    /// Classifies the next value from its first byte, without consuming.
    ///
    /// Requires a value-expecting state; idempotent on well-formed input.
    pub(crate) fn peek_tag(&mut self) -> Result<TypeTag, Error> {
        self.check()?;
        match self.peek_byte() {
            None => Err(self.syntax(SyntaxError::UnexpectedEndOfInput)),
            Some(b'[') => Ok(TypeTag::Array),
            Some(b'{') => Ok(TypeTag::Object),
            Some(b'"') => Ok(TypeTag::String),
            Some(b't' | b'f') => Ok(TypeTag::Boolean),
            Some(b'n') => Ok(TypeTag::Null),
            Some(b'-' | b'0'..=b'9') => Ok(TypeTag::Number),
            Some(other) => Err(self.syntax(SyntaxError::UnexpectedCharacter(char::from(other)))),
        }
    }

    /// Marks the current value complete and restores the enclosing state.
    fn end_value(&mut self) {
        match self.scopes.last_mut() {
            None => self.state = State::Done,
            Some(scope) => {
                scope.seen_first = true;
                self.state = match scope.kind {
                    ScopeKind::Array => State::InArrayExpectCommaOrEnd,
                    ScopeKind::Object => State::InObjectExpectCommaOrEnd,
                };
            }
        }
    }

    /// Pops the innermost container and completes it as a value.
    fn close_scope(&mut self) {
        self.scopes.pop();
        self.end_value();
    }

    fn push_scope(&mut self, kind: ScopeKind) -> Result<(), Error> {
        if self.scopes.len() >= self.max_depth {
            return Err(self.syntax(SyntaxError::DepthLimitExceeded));
        }
        self.scopes.push(Scope {
            kind,
            seen_first: false,
        });
        Ok(())
    }

    pub(crate) fn begin_array(&mut self) -> Result<(), Error> {
        self.check()?;
        match self.peek_byte() {
            Some(b'[') => {
                self.offset += 1;
                self.push_scope(ScopeKind::Array)?;
                self.state = State::InArrayExpectValue;
                Ok(())
            }
            Some(other) => Err(self.syntax(SyntaxError::UnexpectedCharacter(char::from(other)))),
            None => Err(self.syntax(SyntaxError::UnexpectedEndOfInput)),
        }
    }

    pub(crate) fn begin_object(&mut self) -> Result<(), Error> {
        self.check()?;
        match self.peek_byte() {
            Some(b'{') => {
                self.offset += 1;
                self.push_scope(ScopeKind::Object)?;
                self.state = State::InObjectExpectKey;
                Ok(())
            }
            Some(other) => Err(self.syntax(SyntaxError::UnexpectedCharacter(char::from(other)))),
            None => Err(self.syntax(SyntaxError::UnexpectedEndOfInput)),
        }
    }

    /// Steps the innermost array: consumes a separating comma or the closing
    /// bracket. `Ok(true)` leaves the cursor positioned at the next element.
    pub(crate) fn array_has_next(&mut self) -> Result<bool, Error> {
        self.check()?;
        match self.state {
            State::InArrayExpectValue => match self.peek_byte() {
                Some(b']') if !self.top_seen_first() => {
                    self.offset += 1;
                    self.close_scope();
                    Ok(false)
                }
                Some(b']') => Err(self.syntax(SyntaxError::TrailingComma)),
                Some(_) => Ok(true),
                None => Err(self.syntax(SyntaxError::UnexpectedEndOfInput)),
            },
            State::InArrayExpectCommaOrEnd => match self.peek_byte() {
                Some(b',') => {
                    self.offset += 1;
                    self.state = State::InArrayExpectValue;
                    if self.peek_byte() == Some(b']') {
                        return Err(self.syntax(SyntaxError::TrailingComma));
                    }
                    Ok(true)
                }
                Some(b']') => {
                    self.offset += 1;
                    self.close_scope();
                    Ok(false)
                }
                Some(other) => {
                    Err(self.syntax(SyntaxError::UnexpectedCharacter(char::from(other))))
                }
                None => Err(self.syntax(SyntaxError::UnexpectedEndOfInput)),
            },
            _ => {
                debug_assert!(false, "array step in state {:?}", self.state);
                Ok(false)
            }
        }
    }

    /// Steps the innermost object: consumes a separating comma or the closing
    /// brace, then the next key and its colon. `Ok(Some(key))` leaves the
    /// cursor positioned at the key's value.
    pub(crate) fn object_next_key(&mut self) -> Result<Option<RawStr<'a>>, Error> {
        self.check()?;
        if self.state == State::InObjectExpectCommaOrEnd {
            match self.peek_byte() {
                Some(b',') => {
                    self.offset += 1;
                    self.state = State::InObjectExpectKey;
                }
                Some(b'}') => {
                    self.offset += 1;
                    self.close_scope();
                    return Ok(None);
                }
                Some(other) => {
                    return Err(self.syntax(SyntaxError::UnexpectedCharacter(char::from(other))));
                }
                None => return Err(self.syntax(SyntaxError::UnexpectedEndOfInput)),
            }
        }
        debug_assert_eq!(self.state, State::InObjectExpectKey);
        match self.peek_byte() {
            Some(b'}') if !self.top_seen_first() => {
                self.offset += 1;
                self.close_scope();
                Ok(None)
            }
            Some(b'}') => Err(self.syntax(SyntaxError::TrailingComma)),
            Some(b'"') => {
                let raw = self.scan_string()?;
                self.state = State::InObjectExpectColon;
                self.expect_colon()?;
                Ok(Some(raw))
            }
            Some(other) => Err(self.syntax(SyntaxError::UnexpectedCharacter(char::from(other)))),
            None => Err(self.syntax(SyntaxError::UnexpectedEndOfInput)),
        }
    }

    fn expect_colon(&mut self) -> Result<(), Error> {
        debug_assert_eq!(self.state, State::InObjectExpectColon);
        match self.peek_byte() {
            Some(b':') => {
                self.offset += 1;
                self.state = State::InObjectExpectValue;
                Ok(())
            }
            Some(other) => Err(self.syntax(SyntaxError::UnexpectedCharacter(char::from(other)))),
            None => Err(self.syntax(SyntaxError::UnexpectedEndOfInput)),
        }
    }

    fn top_seen_first(&self) -> bool {
        self.scopes.last().is_some_and(|scope| scope.seen_first)
    }

    /// Consumes a number token, validating the JSON numeric grammar only.
    /// Returns the raw literal; conversion is the accessor's business.
    pub(crate) fn read_number(&mut self) -> Result<&'a [u8], Error> {
        self.check()?;
        self.skip_ws();
        let bytes = self.input.as_bytes();
        let len = bytes.len();
        let start = self.offset;
        let mut i = start;

        if i < len && bytes[i] == b'-' {
            i += 1;
        }
        match bytes.get(i) {
            Some(b'0') => i += 1,
            Some(b'1'..=b'9') => {
                i += 1;
                while i < len && bytes[i].is_ascii_digit() {
                    i += 1;
                }
            }
            _ => return Err(self.syntax_at(start, SyntaxError::InvalidNumber)),
        }
        if i < len && bytes[i] == b'.' {
            i += 1;
            let fraction = i;
            while i < len && bytes[i].is_ascii_digit() {
                i += 1;
            }
            if i == fraction {
                return Err(self.syntax_at(start, SyntaxError::InvalidNumber));
            }
        }
        if i < len && (bytes[i] == b'e' || bytes[i] == b'E') {
            i += 1;
            if i < len && (bytes[i] == b'+' || bytes[i] == b'-') {
                i += 1;
            }
            let exponent = i;
            while i < len && bytes[i].is_ascii_digit() {
                i += 1;
            }
            if i == exponent {
                return Err(self.syntax_at(start, SyntaxError::InvalidNumber));
            }
        }
        if !self.is_delimiter(i) {
            return Err(self.syntax_at(i, SyntaxError::InvalidNumber));
        }

        self.offset = i;
        self.end_value();
        Ok(&bytes[start..i])
    }

    /// Consumes a string value. The returned [`RawStr`] is undecoded.
    pub(crate) fn read_string(&mut self) -> Result<RawStr<'a>, Error> {
        self.check()?;
        match self.peek_byte() {
            Some(b'"') => {
                let raw = self.scan_string()?;
                self.end_value();
                Ok(raw)
            }
            Some(other) => Err(self.syntax(SyntaxError::UnexpectedCharacter(char::from(other)))),
            None => Err(self.syntax(SyntaxError::UnexpectedEndOfInput)),
        }
    }

    pub(crate) fn read_bool(&mut self) -> Result<bool, Error> {
        self.check()?;
        self.skip_ws();
        if self.matches_literal(b"true") {
            self.offset += 4;
            self.end_value();
            return Ok(true);
        }
        if self.matches_literal(b"false") {
            self.offset += 5;
            self.end_value();
            return Ok(false);
        }
        Err(self.syntax(SyntaxError::InvalidLiteral))
    }

    pub(crate) fn read_null(&mut self) -> Result<(), Error> {
        self.check()?;
        self.skip_ws();
        if self.matches_literal(b"null") {
            self.offset += 4;
            self.end_value();
            return Ok(());
        }
        Err(self.syntax(SyntaxError::InvalidLiteral))
    }

    /// Scans a string literal starting at the opening quote, validating
    /// escape shape and rejecting raw control bytes. Does not decode.
    fn scan_string(&mut self) -> Result<RawStr<'a>, Error> {
        let bytes = self.input.as_bytes();
        debug_assert_eq!(bytes.get(self.offset), Some(&b'"'));
        let quote = self.offset;
        self.offset += 1;
        let start = self.offset;
        let mut had_escape = false;
        loop {
            if self.offset >= bytes.len() {
                return Err(self.syntax_at(quote, SyntaxError::UnterminatedString));
            }
            match bytes[self.offset] {
                b'"' => {
                    let raw = RawStr {
                        bytes: &self.input.as_bytes()[start..self.offset],
                        offset: start,
                        had_escape,
                    };
                    self.offset += 1;
                    return Ok(raw);
                }
                b'\\' => {
                    had_escape = true;
                    self.offset += 1;
                    self.scan_escape()?;
                }
                b @ 0x00..=0x1F => {
                    return Err(self.syntax(SyntaxError::ControlCharacter(b)));
                }
                _ => self.offset += 1,
            }
        }
    }

    /// Validates one escape sequence, positioned just after the backslash.
    fn scan_escape(&mut self) -> Result<(), Error> {
        let bytes = self.input.as_bytes();
        let Some(&b) = bytes.get(self.offset) else {
            return Err(self.syntax(SyntaxError::UnexpectedEndOfInput));
        };
        match b {
            b'"' | b'\\' | b'/' | b'b' | b'f' | b'n' | b'r' | b't' => {
                self.offset += 1;
                Ok(())
            }
            b'u' => {
                self.offset += 1;
                for _ in 0..4 {
                    match bytes.get(self.offset) {
                        Some(h) if h.is_ascii_hexdigit() => self.offset += 1,
                        _ => return Err(self.syntax(SyntaxError::InvalidUnicodeEscape)),
                    }
                }
                Ok(())
            }
            other => Err(self.syntax(SyntaxError::InvalidEscape(char::from(other)))),
        }
    }

    // ------------------------------------------------------------------
    // Skipping
    // ------------------------------------------------------------------

    /// Consumes the first token of a value: a scalar entirely, or the opening
    /// bracket of a container.
    fn skip_one(&mut self) -> Result<(), Error> {
        match self.peek_tag()? {
            TypeTag::Array => self.begin_array(),
            TypeTag::Object => self.begin_object(),
            TypeTag::Number => self.read_number().map(|_| ()),
            TypeTag::String => self.read_string().map(|_| ()),
            TypeTag::Boolean => self.read_bool().map(|_| ()),
            TypeTag::Null => self.read_null(),
        }
    }

    /// Drives the scan forward until the container stack shrinks back to
    /// `target`. Iterative on the explicit scope stack, so skipping deeply
    /// nested input does not grow the call stack.
    pub(crate) fn skip_to_depth(&mut self, target: usize) -> Result<(), Error> {
        self.check()?;
        while self.scopes.len() > target {
            match self.state {
                State::InObjectExpectColon => {
                    self.expect_colon()?;
                }
                State::InObjectExpectValue => {
                    self.skip_one()?;
                }
                _ => match self.scopes.last().map(|scope| scope.kind) {
                    Some(ScopeKind::Array) => {
                        if self.array_has_next()? {
                            self.skip_one()?;
                        }
                    }
                    Some(ScopeKind::Object) => {
                        if self.object_next_key()?.is_some() {
                            self.skip_one()?;
                        }
                    }
                    None => break,
                },
            }
        }
        Ok(())
    }

    /// Consumes one whole value, including any nested structure.
    pub(crate) fn skip_value(&mut self) -> Result<(), Error> {
        self.check()?;
        let base = self.scopes.len();
        self.skip_one()?;
        self.skip_to_depth(base)
    }

    // ------------------------------------------------------------------
    // End-of-document
    // ------------------------------------------------------------------

    /// True iff the root value has been consumed and only trailing
    /// whitespace (or nothing) remains.
    pub(crate) fn at_end(&mut self) -> bool {
        if self.poisoned.is_some() || self.state != State::Done {
            return false;
        }
        self.skip_ws();
        self.offset >= self.input.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cursor_over(padded: &PaddedBytes) -> Cursor<'_> {
        Cursor::new(padded, ParseOptions::default())
    }

    #[test]
    fn number_grammar_accepts() {
        for text in ["0", "-0", "10", "1.5", "1e3", "1E+3", "-2.5e-7", "0.0"] {
            let padded = PaddedBytes::from_text(text).unwrap();
            let mut cursor = cursor_over(&padded);
            let raw = cursor.read_number().unwrap_or_else(|err| {
                panic!("{text:?} should scan: {err}");
            });
            assert_eq!(raw, text.as_bytes());
            assert!(cursor.at_end());
        }
    }

    #[test]
    fn number_grammar_rejects() {
        for text in ["01", "-", "1.", "+1", ".5", "1e", "1e+", "--1", "1x", "0xFF"] {
            let padded = PaddedBytes::from_text(text).unwrap();
            let mut cursor = cursor_over(&padded);
            assert!(
                matches!(
                    cursor.read_number(),
                    Err(Error::Syntax {
                        reason: SyntaxError::InvalidNumber,
                        ..
                    })
                ),
                "{text:?} should be rejected"
            );
        }
    }

    #[test]
    fn literals_require_a_delimiter() {
        let padded = PaddedBytes::from_text("truex").unwrap();
        let mut cursor = cursor_over(&padded);
        assert!(matches!(
            cursor.read_bool(),
            Err(Error::Syntax {
                reason: SyntaxError::InvalidLiteral,
                ..
            })
        ));

        let padded = PaddedBytes::from_text("true").unwrap();
        let mut cursor = cursor_over(&padded);
        assert_eq!(cursor.read_bool().unwrap(), true);
        assert!(cursor.at_end());
    }

    #[test]
    fn truncated_literal_does_not_match_into_the_pad() {
        let padded = PaddedBytes::from_text("tru").unwrap();
        let mut cursor = cursor_over(&padded);
        assert!(cursor.read_bool().is_err());
    }

    #[test]
    fn unicode_whitespace_is_opt_in() {
        let text = "\u{00A0}1";
        let padded = PaddedBytes::from_text(text).unwrap();

        let mut strict = cursor_over(&padded);
        assert!(strict.peek_tag().is_err());

        let mut relaxed = Cursor::new(
            &padded,
            ParseOptions {
                allow_unicode_whitespace: true,
                ..ParseOptions::default()
            },
        );
        assert_eq!(relaxed.peek_tag().unwrap(), TypeTag::Number);
        assert_eq!(relaxed.read_number().unwrap(), b"1");
        assert!(relaxed.at_end());
    }

    #[test]
    fn skip_value_consumes_nested_structure() {
        let padded = PaddedBytes::from_text(r#"{"a":[1,{"x":2}],"b":"s"}"#).unwrap();
        let mut cursor = cursor_over(&padded);
        cursor.skip_value().unwrap();
        assert!(cursor.at_end());
    }

    #[test]
    fn depth_limit_is_enforced() {
        let padded = PaddedBytes::from_text("[[[1]]]").unwrap();
        let mut cursor = Cursor::new(
            &padded,
            ParseOptions {
                max_depth: 2,
                ..ParseOptions::default()
            },
        );
        assert!(matches!(
            cursor.skip_value(),
            Err(Error::Syntax {
                reason: SyntaxError::DepthLimitExceeded,
                ..
            })
        ));
    }

    #[test]
    fn poison_is_sticky() {
        let padded = PaddedBytes::from_text("[1,2,").unwrap();
        let mut cursor = cursor_over(&padded);
        let first = cursor.skip_value().unwrap_err();
        let second = cursor.skip_value().unwrap_err();
        assert_eq!(first, second);
        assert!(!cursor.at_end());
    }
}
