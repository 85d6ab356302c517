//! Malformed and mistyped documents, and the errors they surface.

use rstest::rstest;

use crate::{
    Document, Error, PaddedBytes, ParseOptions, SyntaxError, TypeTag,
    parse_scalar_array_to_double, validate,
};

fn padded(text: &str) -> PaddedBytes {
    PaddedBytes::from_text(text).unwrap()
}

/// Full-pipeline rejection: a document is bad if it fails to parse, fails to
/// validate, or validates with trailing content.
fn rejected(text: &str) -> bool {
    let input = padded(text);
    match Document::parse(&input) {
        Ok(mut doc) => !(validate(&mut doc) && doc.at_end()),
        Err(_) => true,
    }
}

#[rstest]
#[case::truncated_array("[1,2,")]
#[case::truncated_object(r#"{"a":1,"#)]
#[case::missing_colon(r#"{"a" 1}"#)]
#[case::missing_value(r#"{"a":}"#)]
#[case::array_trailing_comma("[1,]")]
#[case::object_trailing_comma(r#"{"a":1,}"#)]
#[case::unquoted_key("{1:2}")]
#[case::unterminated_string("\"abc")]
#[case::unknown_escape(r#""a\qb""#)]
#[case::leading_zero("01")]
#[case::bare_fraction("1.")]
#[case::leading_plus("+1")]
#[case::bare_dot(".5")]
#[case::empty_exponent("1e")]
#[case::truncated_true("tru")]
#[case::truncated_null("nul")]
#[case::missing_comma("[1 2]")]
#[case::bare_open_bracket("[")]
#[case::bare_open_brace("{")]
#[case::bare_close_bracket("]")]
#[case::empty_input("")]
#[case::whitespace_only("   ")]
#[case::raw_control_byte("\"a\u{0}b\"")]
#[case::unpaired_high_surrogate(r#""\uD834""#)]
#[case::unpaired_low_surrogate(r#""\uDD1E""#)]
#[case::bad_hex_digit(r#""\u12G4""#)]
fn malformed_documents_are_rejected(#[case] text: &str) {
    assert!(rejected(text), "{text:?} should be rejected");
}

#[test]
fn truncation_surfaces_as_unexpected_end_of_input() {
    let input = padded("[1,2,");
    let mut doc = Document::parse(&input).unwrap();
    let mut root = doc.root().unwrap();
    let mut items = root.get_array().unwrap();
    assert_eq!(items.next().unwrap().unwrap().get_double().unwrap(), 1.0);
    assert_eq!(items.next().unwrap().unwrap().get_double().unwrap(), 2.0);
    // The comma was consumed, so a third element is promised but missing.
    let err = items.next().unwrap().unwrap().get_double().unwrap_err();
    assert!(matches!(
        err,
        Error::Syntax {
            reason: SyntaxError::UnexpectedEndOfInput,
            ..
        }
    ));
}

#[test]
fn errors_are_sticky_across_the_sequence() {
    let input = padded("[1,oops]");
    let mut doc = Document::parse(&input).unwrap();
    let mut root = doc.root().unwrap();
    let mut items = root.get_array().unwrap();
    assert_eq!(items.next().unwrap().unwrap().get_double().unwrap(), 1.0);
    let first = items.next().unwrap().unwrap().get_bool().unwrap_err();
    assert!(matches!(first, Error::Syntax { .. }));
    // The stored error is reported once more, then the sequence ends.
    assert_eq!(items.next().unwrap().unwrap_err(), first);
    assert!(items.next().is_none());
    drop(items);
    drop(root);
    assert!(!doc.at_end());
}

#[test]
fn wrong_type_access_reports_both_tags() {
    let input = padded("[1]");
    let mut doc = Document::parse(&input).unwrap();
    let mut root = doc.root().unwrap();
    assert_eq!(
        root.get_object().unwrap_err(),
        Error::TypeMismatch {
            expected: TypeTag::Object,
            actual: TypeTag::Array,
            offset: 0,
        }
    );
    // A mismatch consumes nothing; the right accessor still works.
    assert!(root.get_array().is_ok());
}

#[test]
fn a_consumed_accessor_cannot_be_read_again() {
    let input = padded("true");
    let mut doc = Document::parse(&input).unwrap();
    let mut root = doc.root().unwrap();
    assert!(root.get_bool().unwrap());
    assert!(matches!(
        root.get_bool(),
        Err(Error::UseAfterConsume { .. })
    ));
    assert!(matches!(root.tag(), Err(Error::UseAfterConsume { .. })));
}

#[test]
fn overflowing_numbers_fail_conversion_not_scanning() {
    let input = padded("1e999");
    let mut doc = Document::parse(&input).unwrap();
    assert_eq!(
        doc.root().unwrap().get_double().unwrap_err(),
        Error::NumberFormat { offset: 0 }
    );
}

#[test]
fn invalid_utf8_in_a_string_reports_the_byte_offset() {
    let input = PaddedBytes::from_bytes(b"\"ab\xFFcd\"").unwrap();
    let mut doc = Document::parse(&input).unwrap();
    assert_eq!(
        doc.root().unwrap().get_string().unwrap_err(),
        Error::Utf8 { offset: 3 }
    );
}

#[test]
fn scalar_helpers_reject_an_empty_array() {
    assert!(matches!(
        parse_scalar_array_to_double("[]"),
        Err(Error::Syntax {
            reason: SyntaxError::EmptyScalarArray,
            ..
        })
    ));
}

#[test]
fn scalar_helpers_reject_a_non_array_root() {
    assert!(matches!(
        parse_scalar_array_to_double("3.5"),
        Err(Error::TypeMismatch {
            expected: TypeTag::Array,
            ..
        })
    ));
}

#[test]
fn nesting_past_the_depth_limit_fails() {
    let input = padded("[[[0]]]");
    let options = ParseOptions {
        max_depth: 2,
        ..ParseOptions::default()
    };
    let mut doc = Document::parse_with(&input, options).unwrap();
    let mut root = doc.root().unwrap();
    let mut outer = root.get_array().unwrap();
    let mut middle_value = outer.next().unwrap().unwrap();
    let mut middle = middle_value.get_array().unwrap();
    let err = middle.next().unwrap().unwrap().get_array().unwrap_err();
    assert!(matches!(
        err,
        Error::Syntax {
            reason: SyntaxError::DepthLimitExceeded,
            ..
        }
    ));
}

#[test]
fn trailing_content_is_an_error_only_on_expect_end() {
    let input = padded("[1] [2]");
    let mut doc = Document::parse(&input).unwrap();
    assert!(validate(&mut doc));
    assert!(!doc.at_end());
    assert!(matches!(
        doc.expect_end(),
        Err(Error::TrailingContent { .. })
    ));
}
