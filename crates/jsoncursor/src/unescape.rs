//! Lazy string decoding: UTF-8 validation and escape resolution.
//!
//! The tokenizer has already checked escape *shape* (a valid escape character,
//! four hex digits after `\u`), so decoding only has to resolve semantics:
//! surrogate pairing and UTF-8 validity of the raw bytes.

use alloc::{
    borrow::Cow,
    string::String,
    vec::Vec,
};

use bstr::ByteSlice;

use crate::{cursor::RawStr, error::Error};

/// Decodes a raw string literal into text.
///
/// Escape-free literals are borrowed straight from the input; anything with
/// an escape is decoded into an owned string.
pub(crate) fn decode(raw: RawStr<'_>) -> Result<Cow<'_, str>, Error> {
    if !raw.had_escape {
        return raw
            .bytes
            .to_str()
            .map(Cow::Borrowed)
            .map_err(|err| Error::Utf8 {
                offset: raw.offset + err.valid_up_to(),
            });
    }

    let bytes = raw.bytes;
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'\\' {
            i += 1;
            let Some(&esc) = bytes.get(i) else {
                return Err(Error::Escape { offset: raw.offset + i });
            };
            match esc {
                b'"' => out.push(b'"'),
                b'\\' => out.push(b'\\'),
                b'/' => out.push(b'/'),
                b'b' => out.push(0x08),
                b'f' => out.push(0x0C),
                b'n' => out.push(b'\n'),
                b'r' => out.push(b'\r'),
                b't' => out.push(b'\t'),
                b'u' => {
                    let (ch, next) = decode_unicode(bytes, i + 1, raw.offset)?;
                    let mut utf8 = [0u8; 4];
                    out.extend_from_slice(ch.encode_utf8(&mut utf8).as_bytes());
                    i = next;
                    continue;
                }
                _ => return Err(Error::Escape { offset: raw.offset + i }),
            }
            i += 1;
        } else {
            let run = bytes[i..]
                .iter()
                .position(|&b| b == b'\\')
                .map_or(bytes.len(), |n| i + n);
            let chunk = &bytes[i..run];
            chunk.to_str().map_err(|err| Error::Utf8 {
                offset: raw.offset + i + err.valid_up_to(),
            })?;
            out.extend_from_slice(chunk);
            i = run;
        }
    }

    String::from_utf8(out)
        .map(Cow::Owned)
        .map_err(|_| Error::Utf8 { offset: raw.offset })
}

/// Resolves a `\u` escape whose four hex digits start at `hex`. Returns the
/// decoded character and the index just past the escape, consuming a paired
/// low surrogate when the first unit is a high surrogate.
fn decode_unicode(bytes: &[u8], hex: usize, base: usize) -> Result<(char, usize), Error> {
    let err = Error::Escape { offset: base + hex };
    let first = hex4(bytes, hex).ok_or_else(|| err.clone())?;
    let after = hex + 4;

    if (0xD800..=0xDBFF).contains(&first) {
        if bytes.get(after) == Some(&b'\\') && bytes.get(after + 1) == Some(&b'u') {
            let second = hex4(bytes, after + 2).ok_or_else(|| err.clone())?;
            if (0xDC00..=0xDFFF).contains(&second) {
                let combined = 0x10000 + (((first - 0xD800) << 10) | (second - 0xDC00));
                let ch = char::from_u32(combined).ok_or(err)?;
                return Ok((ch, after + 6));
            }
        }
        return Err(err);
    }
    if (0xDC00..=0xDFFF).contains(&first) {
        return Err(err);
    }
    let ch = char::from_u32(first).ok_or(err)?;
    Ok((ch, after))
}

fn hex4(bytes: &[u8], i: usize) -> Option<u32> {
    let digits = bytes.get(i..i + 4)?;
    let text = core::str::from_utf8(digits).ok()?;
    u32::from_str_radix(text, 16).ok()
}
