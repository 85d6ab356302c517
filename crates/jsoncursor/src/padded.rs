use alloc::vec::Vec;

use crate::error::Error;

/// Number of readable bytes guaranteed past the content.
///
/// The pad lets the scanner compare fixed-width windows (the longest is the
/// five bytes of `false`) without a bounds check at every position. Pad
/// content is unspecified by contract; this implementation zero-fills it,
/// which also guarantees a literal comparison can never match across the
/// content boundary.
pub const PADDING: usize = 32;

/// An immutable byte buffer with [`PADDING`] readable bytes past the content.
///
/// The input is copied on construction, so the buffer's lifetime is
/// independent of the caller's and the content cannot change under a live
/// cursor. Reads of up to [`PADDING`] bytes starting at any offset within the
/// content are in bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaddedBytes {
    bytes: Vec<u8>,
    len: usize,
}

impl PaddedBytes {
    /// Copies `content` into a freshly padded allocation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Allocation`] if the backing storage cannot be
    /// reserved.
    pub fn from_bytes(content: &[u8]) -> Result<Self, Error> {
        let mut bytes = Vec::new();
        bytes
            .try_reserve_exact(content.len() + PADDING)
            .map_err(|_| Error::Allocation { len: content.len() })?;
        bytes.extend_from_slice(content);
        bytes.resize(content.len() + PADDING, 0);
        Ok(Self {
            bytes,
            len: content.len(),
        })
    }

    /// Copies a text buffer, see [`PaddedBytes::from_bytes`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Allocation`] if the backing storage cannot be
    /// reserved.
    pub fn from_text(text: &str) -> Result<Self, Error> {
        Self::from_bytes(text.as_bytes())
    }

    /// Content length, excluding the pad.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the content is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The content without the pad.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    /// Content plus pad, for bounded lookahead.
    pub(crate) fn padded(&self) -> &[u8] {
        &self.bytes
    }
}
