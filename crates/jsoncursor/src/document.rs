//! The document root: one cursor per parse.

use alloc::string::String;

use bstr::ByteSlice;

use crate::{
    cursor::Cursor,
    error::Error,
    options::ParseOptions,
    padded::PaddedBytes,
    value::Value,
};

/// One in-flight parse over a padded input buffer.
///
/// A `Document` owns exactly one cursor and lives for the duration of the
/// parse. Nothing beyond the first token has been validated when `parse`
/// returns; traversal through [`Document::root`] does the work on demand.
///
/// # Examples
///
/// ```rust
/// use jsoncursor::{Document, PaddedBytes};
///
/// let text = PaddedBytes::from_text("[1,2,3]")?;
/// let mut doc = Document::parse(&text)?;
/// let mut root = doc.root()?;
/// let mut items = root.get_array()?;
/// let mut last = 0.0;
/// while let Some(item) = items.next() {
///     last = item?.get_double()?;
/// }
/// assert_eq!(last, 3.0);
/// # Ok::<(), jsoncursor::Error>(())
/// ```
pub struct Document<'a> {
    cursor: Cursor<'a>,
    root_taken: bool,
}

impl<'a> Document<'a> {
    /// Starts a parse with default options.
    ///
    /// # Errors
    ///
    /// [`Error::Syntax`] if the first token cannot be classified (empty
    /// input, or a byte that cannot start a JSON value).
    pub fn parse(input: &'a PaddedBytes) -> Result<Self, Error> {
        Self::parse_with(input, ParseOptions::default())
    }

    /// Starts a parse with explicit options.
    ///
    /// # Errors
    ///
    /// [`Error::Syntax`] if the first token cannot be classified.
    pub fn parse_with(input: &'a PaddedBytes, options: ParseOptions) -> Result<Self, Error> {
        let mut cursor = Cursor::new(input, options);
        cursor.peek_tag()?;
        Ok(Document {
            cursor,
            root_taken: false,
        })
    }

    /// The accessor for the top-level value. Callable once.
    ///
    /// # Errors
    ///
    /// [`Error::UseAfterConsume`] on a second call.
    pub fn root(&mut self) -> Result<Value<'a, '_>, Error> {
        if self.root_taken {
            return Err(Error::UseAfterConsume {
                offset: self.cursor.offset(),
            });
        }
        self.root_taken = true;
        Ok(Value::new(&mut self.cursor))
    }

    /// True iff the root value has been consumed and only trailing
    /// whitespace (or nothing) remains.
    ///
    /// Trailing non-whitespace bytes make this `false`, never an error; the
    /// tokenizer stops at the root and leaves trailing-garbage detection to
    /// this check.
    pub fn at_end(&mut self) -> bool {
        self.cursor.at_end()
    }

    /// The error form of [`Document::at_end`].
    ///
    /// # Errors
    ///
    /// [`Error::TrailingContent`] if anything but whitespace remains.
    pub fn expect_end(&mut self) -> Result<(), Error> {
        if self.at_end() {
            Ok(())
        } else {
            Err(Error::TrailingContent {
                offset: self.cursor.offset(),
            })
        }
    }

    /// Current byte offset of the cursor.
    #[must_use]
    pub fn position(&self) -> usize {
        self.cursor.offset()
    }
}

/// Renders the cursor's current location as the remaining input text,
/// lossily decoded.
///
/// This is a diagnostic location echo used for round-trip checks, not a
/// re-serialization of parsed content.
#[must_use]
pub fn stringify_position(document: &Document<'_>) -> String {
    document.cursor.remainder().to_str_lossy().into_owned()
}
