//! The capability surface consumed by an external test/benchmark harness.
//!
//! Harnesses drive parser backends through one polymorphic interface; each
//! backend owns its document and cursor types behind the same contract. This
//! crate ships a single backend, [`OnDemandAdapter`], registered through
//! [`adapters`]. Exception-style signaling in other backends maps to
//! `Result` and `bool` here; nothing panics across this boundary.

use alloc::{boxed::Box, string::String, vec, vec::Vec};

use bstr::ByteSlice;
use log::debug;

use crate::{
    document::{Document, stringify_position},
    error::Error,
    padded::PaddedBytes,
    validate::{parse_scalar_array_to_double, parse_scalar_array_to_string, validate},
};

/// The retained outcome of [`ParserAdapter::parse`].
///
/// Owns its padded copy of the input plus the cursor offset observed at parse
/// time, so location rendering works after the borrowing [`Document`] is
/// gone.
pub struct ParsedDocument {
    text: PaddedBytes,
    position: usize,
}

/// One parser backend as seen by the harness.
pub trait ParserAdapter {
    /// Backend name, for reports.
    fn name(&self) -> &'static str;

    /// Parses the input far enough to classify the root value.
    ///
    /// # Errors
    ///
    /// Any parse error; the harness records a failure and moves on.
    fn parse(&self, json: &str) -> Result<ParsedDocument, Error>;

    /// Parses and fully validates the input, including the end-of-document
    /// check that catches trailing garbage.
    fn parse_validate(&self, json: &str) -> bool;

    /// Scalar-benchmark mode: the last number of a scalar array.
    ///
    /// # Errors
    ///
    /// Any parse or getter error.
    fn parse_double(&self, json: &str) -> Result<f64, Error>;

    /// Scalar-benchmark mode: the last string of a scalar array.
    ///
    /// # Errors
    ///
    /// Any parse or getter error.
    fn parse_string(&self, json: &str) -> Result<String, Error>;

    /// Parses, then echoes the cursor location (the remaining input text).
    ///
    /// # Errors
    ///
    /// Any parse error.
    fn sax_roundtrip(&self, json: &str) -> Result<String, Error>;

    /// Location echo from a retained parse outcome.
    fn stringify(&self, parsed: &ParsedDocument) -> String;
}

/// The on-demand engine of this crate, behind the harness contract.
pub struct OnDemandAdapter;

impl ParserAdapter for OnDemandAdapter {
    fn name(&self) -> &'static str {
        "jsoncursor"
    }

    fn parse(&self, json: &str) -> Result<ParsedDocument, Error> {
        let text = PaddedBytes::from_text(json)?;
        let position = Document::parse(&text)?.position();
        Ok(ParsedDocument { text, position })
    }

    fn parse_validate(&self, json: &str) -> bool {
        let Ok(text) = PaddedBytes::from_text(json) else {
            return false;
        };
        let Ok(mut document) = Document::parse(&text) else {
            debug!("parse_validate: input rejected at the first token");
            return false;
        };
        if !validate(&mut document) {
            debug!("parse_validate: traversal failed");
            return false;
        }
        document.at_end()
    }

    fn parse_double(&self, json: &str) -> Result<f64, Error> {
        parse_scalar_array_to_double(json)
    }

    fn parse_string(&self, json: &str) -> Result<String, Error> {
        parse_scalar_array_to_string(json)
    }

    fn sax_roundtrip(&self, json: &str) -> Result<String, Error> {
        let text = PaddedBytes::from_text(json)?;
        let document = Document::parse(&text)?;
        Ok(stringify_position(&document))
    }

    fn stringify(&self, parsed: &ParsedDocument) -> String {
        parsed
            .text
            .as_bytes()
            .get(parsed.position..)
            .unwrap_or_default()
            .to_str_lossy()
            .into_owned()
    }
}

/// All backends this crate registers.
#[must_use]
pub fn adapters() -> Vec<Box<dyn ParserAdapter>> {
    vec![Box::new(OnDemandAdapter)]
}
