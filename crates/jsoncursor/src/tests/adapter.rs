//! The harness-facing adapter surface.

use crate::adapter::{OnDemandAdapter, ParserAdapter, adapters};

#[test_log::test]
fn parse_double_takes_the_last_element() {
    assert_eq!(OnDemandAdapter.parse_double("[1,2,3]").unwrap(), 3.0);
    assert!(OnDemandAdapter.parse_double(r#"["a"]"#).is_err());
}

#[test]
fn parse_string_takes_the_last_element() {
    assert_eq!(
        OnDemandAdapter.parse_string(r#"["a","b"]"#).unwrap(),
        "b"
    );
    assert!(OnDemandAdapter.parse_string("[1]").is_err());
}

#[test_log::test]
fn parse_validate_rejects_trailing_garbage() {
    assert!(OnDemandAdapter.parse_validate(r#"{"a":[1,2]}"#));
    assert!(!OnDemandAdapter.parse_validate("[1,2]]"));
    assert!(!OnDemandAdapter.parse_validate("[1,2,"));
    assert!(!OnDemandAdapter.parse_validate(""));
}

#[test]
fn sax_roundtrip_echoes_from_the_first_token() {
    assert_eq!(OnDemandAdapter.sax_roundtrip("  [1,2]").unwrap(), "[1,2]");
    assert!(OnDemandAdapter.sax_roundtrip("   ").is_err());
}

#[test]
fn stringify_renders_the_retained_position() {
    let parsed = OnDemandAdapter.parse(r#"  {"a":1}"#).unwrap();
    assert_eq!(OnDemandAdapter.stringify(&parsed), r#"{"a":1}"#);
}

#[test]
fn the_registry_lists_this_backend() {
    let backends = adapters();
    assert_eq!(backends.len(), 1);
    assert_eq!(backends[0].name(), "jsoncursor");
}
