//! Integration tests for the end-to-end scenarios and properties in the
//! crate's design document: larger documents, error positions, and the
//! serializer's configuration axes working together.

use json5::{ErrorKind, Format, Indent, Number, Quote, QuoteKeys, TrailingComma, Value};
use pretty_assertions::assert_eq;

#[test]
fn scenario_one_app_manifest() {
    let text = "{ /* comment */ name: 'MyApp', version: 2, \
                features: ['auth','analytics',], }";
    let value = json5::parse(text).unwrap();
    let object = value.as_object().unwrap();
    assert_eq!(object.get("name"), Some(&Value::String("MyApp".to_string())));
    assert_eq!(object.get("version"), Some(&Value::Number(Number::Integer(2))));
    assert_eq!(
        object.get("features"),
        Some(&Value::Array(vec![
            Value::String("auth".to_string()),
            Value::String("analytics".to_string()),
        ]))
    );
}

#[test]
fn scenario_two_numeric_subkinds() {
    let text = "{ hex: 0xDECAF, leadingDot: .8675309, positiveSign: +1, notANumber: NaN }";
    let value = json5::parse(text).unwrap();
    let object = value.as_object().unwrap();
    assert_eq!(object.get("hex"), Some(&Value::Number(Number::Hexadecimal(0xDECAF))));
    assert_eq!(object.get("leadingDot"), Some(&Value::Number(Number::Decimal(0.8675309))));
    assert_eq!(object.get("positiveSign"), Some(&Value::Number(Number::Integer(1))));
    assert!(matches!(object.get("notANumber"), Some(Value::Number(Number::NaN))));
}

#[test]
fn scenario_three_duplicate_key_cites_both_positions() {
    let err = json5::parse("{a:1, a:2}").unwrap_err();
    assert_eq!(err.kind, ErrorKind::DuplicateKey);
    assert!(err.message.contains("1:2"), "message: {}", err.message);
    assert_eq!(err.position, json5::Position::new(1, 7));
}

#[test]
fn scenario_four_line_continuation() {
    let value = json5::parse("{multi:'a\\\nb'}").unwrap();
    assert_eq!(
        value.as_object().unwrap().get("multi"),
        Some(&Value::String("ab".to_string()))
    );
}

#[test]
fn scenario_five_quote_keys_when_needed() {
    let mut object = json5::Object::new();
    object.insert("needs quoting".to_string(), Value::Number(Number::Integer(1)));
    object.insert("ok".to_string(), Value::Number(Number::Integer(2)));
    let value = Value::Object(object);

    let format = Format {
        quote: Quote::Single,
        indent: Indent::None,
        trailing_comma: TrailingComma::Never,
        quote_keys: QuoteKeys::WhenNeeded,
    };
    assert_eq!(
        json5::stringify(&value, &format).unwrap(),
        "{'needs quoting':1,ok:2}"
    );
}

#[test]
fn scenario_six_extended_reals() {
    let value = Value::Array(vec![
        Value::Number(Number::Decimal(-0.0)),
        Value::Number(Number::PositiveInfinity),
        Value::Number(Number::NaN),
    ]);
    assert_eq!(
        json5::stringify(&value, &Format::default()).unwrap(),
        "[-0,Infinity,NaN]"
    );
}

#[test]
fn json_document_is_valid_json5() {
    let text = r#"{"a": [1, 2.5, true, false, null, "s\n"], "b": {}}"#;
    let value = json5::parse(text).unwrap();
    let rendered = json5::stringify(&value, &Format::default()).unwrap();
    let reparsed = json5::parse(&rendered).unwrap();
    assert!(value.eq_normalized(&reparsed));
}

#[test]
fn compact_output_has_no_stray_whitespace() {
    let text = "{ a: [1, 2, { b: 'x' }], c: true }";
    let value = json5::parse(text).unwrap();
    let rendered = json5::stringify(&value, &Format::default()).unwrap();
    assert!(
        !rendered.chars().any(|c| c.is_whitespace()),
        "compact output should contain no ASCII whitespace outside strings: {rendered}"
    );
}

#[test]
fn object_key_order_is_preserved_through_a_round_trip() {
    let text = "{ z: 1, a: 2, m: 3 }";
    let value = json5::parse(text).unwrap();
    let keys: Vec<&str> = value
        .as_object()
        .unwrap()
        .iter()
        .map(|(k, _)| k.as_str())
        .collect();
    assert_eq!(keys, vec!["z", "a", "m"]);

    let rendered = json5::stringify(&value, &Format::default()).unwrap();
    let reparsed = json5::parse(&rendered).unwrap();
    let reparsed_keys: Vec<&str> = reparsed
        .as_object()
        .unwrap()
        .iter()
        .map(|(k, _)| k.as_str())
        .collect();
    assert_eq!(keys, reparsed_keys);
}

#[test]
fn deeply_nested_input_at_the_boundary_succeeds() {
    let depth = json5::DEFAULT_MAX_DEPTH - 1;
    let text = "[".repeat(depth) + &"]".repeat(depth);
    assert!(json5::parse(&text).is_ok());
}

#[test]
fn deeply_nested_input_one_past_the_boundary_fails() {
    let depth = json5::DEFAULT_MAX_DEPTH + 1;
    let text = "[".repeat(depth) + &"]".repeat(depth);
    let err = json5::parse(&text).unwrap_err();
    assert_eq!(err.kind, ErrorKind::NestingTooDeep);
}

#[test]
fn integer_boundary_values() {
    assert_eq!(
        json5::parse("9223372036854775807").unwrap(),
        Value::Number(Number::Integer(i64::MAX))
    );
    assert!(matches!(
        json5::parse("9223372036854775808").unwrap(),
        Value::Number(Number::Decimal(_))
    ));
}

#[test]
fn indented_format_with_trailing_comma_round_trips() {
    let text = "{a:1,b:[1,2]}";
    let value = json5::parse(text).unwrap();
    let format = Format {
        indent: Indent::Spaces(2),
        trailing_comma: TrailingComma::WhenIndented,
        quote_keys: QuoteKeys::WhenNeeded,
        ..Format::default()
    };
    let rendered = json5::stringify(&value, &format).unwrap();
    assert_eq!(rendered, "{\n  a: 1,\n  b: [\n    1,\n    2,\n  ],\n}");
    let reparsed = json5::parse(&rendered).unwrap();
    assert!(value.eq_normalized(&reparsed));
}

#[test]
fn whole_number_decimal_round_trips_as_decimal_not_integer() {
    let value = json5::parse("1.0").unwrap();
    assert_eq!(value, Value::Number(Number::Decimal(1.0)));

    let rendered = json5::stringify(&value, &Format::default()).unwrap();
    assert_eq!(rendered, "1.0");

    let reparsed = json5::parse(&rendered).unwrap();
    assert_eq!(reparsed, Value::Number(Number::Decimal(1.0)));
}

#[test]
fn escaped_decimal_digit_is_rejected() {
    for text in [r"{a:'\1'}", r"{a:'\05'}"] {
        let err = json5::parse(text).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidEscape);
    }
}

#[test]
fn crlf_and_cr_each_advance_line_once() {
    for text in ["1\r\n2", "1\r2"] {
        let err = json5::parse(text).unwrap_err();
        assert_eq!(err.kind, ErrorKind::TrailingInput);
        assert_eq!(err.position.line, 2);
    }
}
