use thiserror::Error;

use crate::cursor::TypeTag;

/// Errors surfaced by parsing and traversal.
///
/// Every error is returned at the call that detects it; a malformed value deep
/// in a structure is not reported until traversal reaches it. All errors are
/// recoverable by discarding the [`Document`](crate::Document).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Backing storage for a padded buffer could not be reserved.
    #[error("allocation failed for input of {len} bytes")]
    Allocation {
        /// Content length of the rejected input.
        len: usize,
    },
    /// Syntax-level malformed JSON, detected during the forward scan.
    #[error("{reason} at offset {offset}")]
    Syntax {
        /// Byte offset of the offending input.
        offset: usize,
        /// What the scanner objected to.
        reason: SyntaxError,
    },
    /// A typed getter was invoked on a value of a different type.
    #[error("expected {expected} but found {actual} at offset {offset}")]
    TypeMismatch {
        /// The type the getter asked for.
        expected: TypeTag,
        /// The type actually present at the cursor.
        actual: TypeTag,
        /// Byte offset of the value.
        offset: usize,
    },
    /// A number literal is out of range or could not be converted.
    #[error("number literal out of range or malformed at offset {offset}")]
    NumberFormat {
        /// Byte offset of the literal.
        offset: usize,
    },
    /// A string contains invalid UTF-8.
    #[error("invalid utf-8 in string at offset {offset}")]
    Utf8 {
        /// Byte offset of the first invalid byte.
        offset: usize,
    },
    /// An escape sequence is syntactically valid but semantically malformed,
    /// e.g. an unpaired surrogate.
    #[error("malformed escape sequence at offset {offset}")]
    Escape {
        /// Byte offset of the escape.
        offset: usize,
    },
    /// A getter was re-invoked on an already-consumed accessor.
    #[error("value at offset {offset} was already consumed")]
    UseAfterConsume {
        /// Byte offset where the accessor was created.
        offset: usize,
    },
    /// Non-whitespace bytes remain after the root value.
    ///
    /// Produced only by [`Document::expect_end`](crate::Document::expect_end);
    /// the tokenizer itself never advances past the root.
    #[error("trailing content after root value at offset {offset}")]
    TrailingContent {
        /// Byte offset of the first trailing byte.
        offset: usize,
    },
}

/// Reasons for [`Error::Syntax`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SyntaxError {
    /// A byte that cannot start or continue the expected construct.
    #[error("unexpected character '{0}'")]
    UnexpectedCharacter(char),
    /// The input ended inside a value or an open container.
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
    /// A string literal was never closed.
    #[error("unterminated string")]
    UnterminatedString,
    /// The character after a backslash is not a valid escape.
    #[error("invalid escape character '{0}'")]
    InvalidEscape(char),
    /// A `\u` escape is not followed by four hex digits.
    #[error("invalid unicode escape sequence")]
    InvalidUnicodeEscape,
    /// A raw control byte appeared inside a string literal.
    #[error("unescaped control character 0x{0:02x} in string")]
    ControlCharacter(u8),
    /// A number literal violates the JSON numeric grammar.
    #[error("invalid number literal")]
    InvalidNumber,
    /// A literal is not exactly `true`, `false` or `null`.
    #[error("invalid literal")]
    InvalidLiteral,
    /// A comma directly before a closing bracket or brace.
    #[error("trailing comma in container")]
    TrailingComma,
    /// Container nesting exceeded [`ParseOptions::max_depth`](crate::ParseOptions::max_depth).
    #[error("nesting depth limit exceeded")]
    DepthLimitExceeded,
    /// A scalar-array entry point was handed an array with no elements.
    #[error("scalar array has no elements")]
    EmptyScalarArray,
}
