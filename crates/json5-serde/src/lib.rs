//! A lossless bridge between [`json5::Value`] and [`serde_json::Value`].
//!
//! JSON5's value tree is a strict superset of JSON's, with one wrinkle:
//! `json5::Number` keeps hexadecimal literals and the non-finite reals
//! (`Infinity`, `-Infinity`, `NaN`) distinct, none of which a standard
//! `serde_json::Number` can hold. [`to_serde_json`] and [`from_serde_json`]
//! convert between the two trees; [`decode`] and [`encode`] compose those
//! conversions with [`json5::parse`]/[`json5::stringify`] for text in, text
//! out round trips through a `serde_json::Value`.
//!
//! ```
//! use json5_serde::decode;
//!
//! let element = decode("{ name: 'demo', count: 3 }").unwrap();
//! assert_eq!(element["name"], serde_json::json!("demo"));
//! ```

use json5::{Error, ErrorKind, Number, Object, Position, Value};
use serde_json::{Map, Value as Json};

/// Parses `text` as JSON5 and converts the result to a `serde_json::Value`.
///
/// # Errors
///
/// Returns any lexer or parser error from [`json5::parse`], or
/// `UnrepresentableNumber` if the document contains `Infinity`, `-Infinity`,
/// or `NaN` (standard `serde_json::Number` cannot hold any of these).
pub fn decode(text: &str) -> Result<Json, Error> {
    to_serde_json(&json5::parse(text)?)
}

/// Converts `element` to a [`json5::Value`] and renders it as JSON5 text
/// under `format`.
///
/// # Errors
///
/// Returns any error [`json5::stringify`] can return (cyclic references
/// cannot occur, since `serde_json::Value` is itself acyclic).
pub fn encode(element: &Json, format: &json5::Format) -> Result<String, Error> {
    json5::stringify(&from_serde_json(element), format)
}

/// Converts a [`json5::Value`] into a `serde_json::Value`.
///
/// The conversion is lossless for every `Value` except `Number`: JSON5's
/// `Hexadecimal` sub-kind collapses into the same `serde_json::Number` an
/// `Integer` of the same magnitude would produce (both render as plain
/// decimal digits — `serde_json::Number` has no concept of the source
/// radix), and the three non-finite sub-kinds (`PositiveInfinity`,
/// `NegativeInfinity`, `NaN`) have no representation at all.
///
/// # Errors
///
/// Returns `UnrepresentableNumber` for a non-finite `Number`, or for a
/// `Decimal` built directly (bypassing the parser) with a non-finite `f64`.
pub fn to_serde_json(value: &Value) -> Result<Json, Error> {
    match value {
        Value::Null => Ok(Json::Null),
        Value::Boolean(b) => Ok(Json::Bool(*b)),
        Value::String(s) => Ok(Json::String(s.clone())),
        Value::Number(number) => number_to_serde_json(*number),
        Value::Array(items) => items.iter().map(to_serde_json).collect::<Result<_, _>>().map(Json::Array),
        Value::Object(object) => object_to_serde_json(object).map(Json::Object),
    }
}

fn number_to_serde_json(number: Number) -> Result<Json, Error> {
    let serde_number = match number {
        Number::Integer(n) | Number::Hexadecimal(n) => serde_json::Number::from(n),
        Number::Decimal(f) => serde_json::Number::from_f64(f).ok_or_else(|| {
            Error::new(
                ErrorKind::UnrepresentableNumber,
                "non-finite decimal has no serde_json::Number representation",
                Position::START,
            )
        })?,
        Number::PositiveInfinity | Number::NegativeInfinity | Number::NaN => {
            return Err(Error::new(
                ErrorKind::UnrepresentableNumber,
                format!("{number:?} has no serde_json::Number representation"),
                Position::START,
            ));
        }
    };
    Ok(Json::Number(serde_number))
}

fn object_to_serde_json(object: &Object) -> Result<Map<String, Json>, Error> {
    let mut map = Map::with_capacity(object.len());
    for (key, value) in object {
        map.insert(key.clone(), to_serde_json(value)?);
    }
    Ok(map)
}

/// Converts a `serde_json::Value` into a [`json5::Value`].
///
/// Every `serde_json::Value` has a representation, so this conversion never
/// fails. A `serde_json::Number` classifies as [`Number::Decimal`] if its
/// text contains `.`, `e`, or `E`, and as [`Number::Integer`] otherwise;
/// `serde_json::Number` cannot itself hold a hexadecimal literal or a
/// non-finite value, so [`Number::Hexadecimal`], [`Number::PositiveInfinity`],
/// [`Number::NegativeInfinity`], and [`Number::NaN`] never appear in the
/// output of this function (only a document parsed directly by
/// [`json5::parse`] can produce those sub-kinds).
#[must_use]
pub fn from_serde_json(element: &Json) -> Value {
    match element {
        Json::Null => Value::Null,
        Json::Bool(b) => Value::Boolean(*b),
        Json::String(s) => Value::String(s.clone()),
        Json::Number(n) => Value::Number(number_from_serde_json(n)),
        Json::Array(items) => Value::Array(items.iter().map(from_serde_json).collect()),
        Json::Object(map) => Value::Object(object_from_serde_json(map)),
    }
}

fn number_from_serde_json(n: &serde_json::Number) -> Number {
    let text = n.to_string();
    if text.contains(['.', 'e', 'E']) {
        Number::Decimal(n.as_f64().unwrap_or(f64::NAN))
    } else if let Some(i) = n.as_i64() {
        Number::Integer(i)
    } else {
        // Outside i64 range (e.g. a large u64): still an integer-shaped
        // literal, so render it through the decimal path rather than
        // losing precision by truncating to i64.
        Number::Decimal(n.as_f64().unwrap_or(f64::NAN))
    }
}

fn object_from_serde_json(map: &Map<String, Json>) -> Object {
    map.iter()
        .map(|(key, value)| (key.clone(), from_serde_json(value)))
        .collect()
}
