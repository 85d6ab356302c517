//! On-demand JSON parsing over a padded input buffer.
//!
//! Parsing here is a forward-only walk, not a tree build: [`Document::parse`]
//! only classifies the first token, and every later byte is validated at the
//! moment a [`Value`] getter or sequence step touches it. Values the caller
//! never reads are skipped structurally; wrong-type and malformed-value
//! errors surface at the access site, carrying the byte offset where they
//! were detected.
//!
//! Input must be staged in a [`PaddedBytes`] buffer first. The zero-filled
//! tail pad lets the scanner compare fixed-width literals without bounds
//! checks, which is the same trick large SIMD-accelerated parsers rely on.
//!
//! ```rust
//! use jsoncursor::{Document, PaddedBytes, TypeTag};
//!
//! let text = PaddedBytes::from_text(r#"{"name":"ada","tags":[1,2]}"#)?;
//! let mut doc = Document::parse(&text)?;
//! let mut root = doc.root()?;
//! let mut fields = root.get_object()?;
//! while let Some(field) = fields.next() {
//!     let (key, mut value) = field?;
//!     if key == "name" {
//!         assert_eq!(value.get_string()?, "ada");
//!     }
//!     // Unread values ("tags" here) are skipped when dropped.
//! }
//! drop(fields);
//! drop(root);
//! assert!(doc.at_end());
//! # Ok::<(), jsoncursor::Error>(())
//! ```

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod cursor;
mod document;
mod error;
mod options;
mod padded;
mod unescape;
mod validate;
mod value;

pub mod adapter;

#[cfg(test)]
mod tests;

pub use cursor::TypeTag;
pub use document::{Document, stringify_position};
pub use error::{Error, SyntaxError};
pub use options::ParseOptions;
pub use padded::{PADDING, PaddedBytes};
pub use validate::{
    parse_scalar_array_to_double, parse_scalar_array_to_string, validate, validate_value,
};
pub use value::{ArrayValues, ObjectFields, Value};
