//! Property tests over generated documents and raw bytes.

use alloc::{format, string::String, string::ToString, vec::Vec};

use quickcheck::{Arbitrary, Gen, QuickCheck};
use serde_json::{Map, Value as Json, json};

use crate::{Document, PaddedBytes, validate};

/// A generated JSON document of bounded depth and width.
#[derive(Clone, Debug)]
struct ArbJson(Json);

impl Arbitrary for ArbJson {
    fn arbitrary(g: &mut Gen) -> Self {
        ArbJson(arbitrary_value(g, 3))
    }
}

fn arbitrary_value(g: &mut Gen, depth: usize) -> Json {
    let variants = if depth == 0 { 4 } else { 6 };
    match u8::arbitrary(g) % variants {
        0 => Json::Null,
        1 => Json::Bool(bool::arbitrary(g)),
        2 => {
            let n = f64::arbitrary(g);
            // JSON cannot represent non-finite numbers.
            json!(if n.is_finite() { n } else { 0.0 })
        }
        3 => Json::String(String::arbitrary(g)),
        4 => {
            let len = usize::arbitrary(g) % 4;
            Json::Array((0..len).map(|_| arbitrary_value(g, depth - 1)).collect())
        }
        _ => {
            let len = usize::arbitrary(g) % 4;
            Json::Object(
                (0..len)
                    .map(|i| (format!("k{i}"), arbitrary_value(g, depth - 1)))
                    .collect::<Map<_, _>>(),
            )
        }
    }
}

#[test]
fn serialized_documents_validate_and_end_cleanly() {
    fn prop(value: ArbJson) -> bool {
        let text = value.0.to_string();
        let Ok(input) = PaddedBytes::from_text(&text) else {
            return false;
        };
        let Ok(mut doc) = Document::parse(&input) else {
            return false;
        };
        validate(&mut doc) && doc.at_end()
    }
    QuickCheck::new()
        .tests(300)
        .quickcheck(prop as fn(ArbJson) -> bool);
}

#[test]
fn trailing_garbage_never_reaches_the_end() {
    fn prop(value: ArbJson) -> bool {
        let mut text = value.0.to_string();
        text.push_str(" x");
        let Ok(input) = PaddedBytes::from_text(&text) else {
            return false;
        };
        let Ok(mut doc) = Document::parse(&input) else {
            return false;
        };
        let _ = validate(&mut doc);
        !doc.at_end()
    }
    QuickCheck::new()
        .tests(300)
        .quickcheck(prop as fn(ArbJson) -> bool);
}

#[quickcheck_macros::quickcheck]
fn arbitrary_bytes_never_panic(bytes: Vec<u8>) -> bool {
    let Ok(input) = PaddedBytes::from_bytes(&bytes) else {
        return true;
    };
    if let Ok(mut doc) = Document::parse(&input) {
        let _ = validate(&mut doc);
        let _ = doc.at_end();
    }
    true
}
